//! Lua AST deserializer — reduces a parsed Lua chunk to a [`Value`].
//!
//! The tree comes from an external Lua parser (luaparse node shapes, supplied
//! as JSON). Only the literal subset is understood: nil, booleans, numbers,
//! strings, unary negation of a literal, and table constructors. Any other
//! node fails with [`LualitError::UnsupportedNode`]. The `type` tags and
//! field names are trusted as already-validated syntax; a recognized tag with
//! a missing field surfaces as [`LualitError::MalformedNode`] rather than a
//! panic.
//!
//! # Key design decisions
//!
//! - **Table disambiguation on the first field**: a `TableKeyString` first
//!   field makes the whole table a `Mapping`; otherwise the table is a
//!   `Sequence`, and keyed fields inside it become `Property` elements
//!   carrying their own `[key] = value` fragment.
//! - **`KeyedField` stays private**: `TableKey`/`TableKeyString` reduce to an
//!   intermediate pair that never escapes this module; callers only ever see
//!   a `Value`.
//! - **Embedding escape on text leaves**: strings collected into containers
//!   get backslashes doubled and CR/LF rewritten as the two-character `\r` /
//!   `\n` sequences, so the result can be re-embedded as JSON text without
//!   losing line structure. The serializer does not reverse this; the
//!   asymmetry is pinned by a regression test.

use crate::error::{LualitError, Result};
use crate::value::{self, PropertyKey, Value};
use serde_json::Value as Json;

/// Reduce a parsed Lua chunk (or any literal subtree) to a [`Value`].
///
/// ```
/// use lualit_core::{deserialize, Value};
/// use serde_json::json;
///
/// let tree = json!({ "type": "NumericLiteral", "value": 5.0, "raw": "5" });
/// assert_eq!(deserialize(&tree).unwrap(), Value::Number(5.0));
/// ```
pub fn deserialize(tree: &Json) -> Result<Value> {
    walk(tree)
}

/// A single keyed table entry (`TableKey` / `TableKeyString`). Purely an
/// intermediate of the recursion, never returned to a caller.
struct KeyedField {
    key: Value,
    value: Value,
}

/// What a table field reduces to.
enum Field {
    Plain(Value),
    Keyed(KeyedField),
}

fn walk(node: &Json) -> Result<Value> {
    match kind_of(node)? {
        // Only the first statement carries data; trailing statements are
        // ignored by design.
        "Chunk" => match node_list(node, "Chunk", "body")?.first() {
            Some(statement) => walk(statement),
            None => Ok(Value::Nil),
        },
        "LocalStatement" => unwrap_single(node_list(node, "LocalStatement", "init")?),
        "ReturnStatement" => unwrap_single(node_list(node, "ReturnStatement", "arguments")?),
        "TableConstructorExpression" => table(node),
        "UnaryExpression" => negate(node),
        "Identifier" => Ok(Value::Text(node_str(node, "Identifier", "name")?.to_string())),
        "NilLiteral" => Ok(Value::Nil),
        "BooleanLiteral" => node
            .get("value")
            .and_then(Json::as_bool)
            .map(Value::Boolean)
            .ok_or_else(|| malformed("BooleanLiteral", "missing boolean `value`")),
        "NumericLiteral" => node
            .get("value")
            .and_then(Json::as_f64)
            .map(Value::Number)
            .ok_or_else(|| malformed("NumericLiteral", "missing numeric `value`")),
        "StringLiteral" => Ok(Value::Text(string_payload(node)?)),
        other => Err(LualitError::UnsupportedNode(other.to_string())),
    }
}

/// Statement initializers/arguments: one result is returned unwrapped,
/// anything else as the ordered sequence of results.
fn unwrap_single(nodes: &[Json]) -> Result<Value> {
    let mut values = Vec::with_capacity(nodes.len());
    for node in nodes {
        values.push(walk(node)?);
    }
    if values.len() == 1 {
        Ok(values.swap_remove(0))
    } else {
        Ok(Value::Sequence(values))
    }
}

fn negate(node: &Json) -> Result<Value> {
    let operator = node_str(node, "UnaryExpression", "operator")?;
    if operator != "-" {
        return Err(LualitError::UnsupportedNode(format!(
            "UnaryExpression with operator `{operator}`"
        )));
    }
    let argument = node
        .get("argument")
        .ok_or_else(|| malformed("UnaryExpression", "missing `argument`"))?;
    match walk(argument)? {
        Value::Number(n) => Ok(Value::Number(-n)),
        _ => Err(malformed(
            "UnaryExpression",
            "negation of a non-numeric literal",
        )),
    }
}

/// luaparse only fills `value` when asked; fall back to `raw` with the
/// surrounding quotes stripped.
fn string_payload(node: &Json) -> Result<String> {
    if let Some(text) = node.get("value").and_then(Json::as_str) {
        return Ok(text.to_string());
    }
    let raw = node_str(node, "StringLiteral", "raw")?;
    let inner = raw
        .strip_prefix('\'')
        .and_then(|r| r.strip_suffix('\''))
        .or_else(|| raw.strip_prefix('"').and_then(|r| r.strip_suffix('"')))
        .unwrap_or(raw);
    Ok(inner.to_string())
}

fn table(node: &Json) -> Result<Value> {
    let fields = node_list(node, "TableConstructorExpression", "fields")?;
    let Some(first) = fields.first() else {
        // An empty constructor is indistinguishable at the Lua level;
        // by convention it becomes an empty sequence.
        return Ok(Value::Sequence(Vec::new()));
    };
    if kind_of(first)? == "TableKeyString" {
        mapping(fields)
    } else {
        sequence(fields)
    }
}

fn mapping(fields: &[Json]) -> Result<Value> {
    let mut pairs: Vec<(String, Value)> = Vec::with_capacity(fields.len());
    for field in fields {
        // A stray unkeyed field inside a keyed table carries no key to bind.
        let Field::Keyed(entry) = field_of(field)? else {
            continue;
        };
        let key = key_text(entry.key)?;
        let val = escape_embedded(entry.value);
        // A duplicate key keeps its original position, value replaced.
        if let Some(slot) = pairs.iter_mut().find(|(existing, _)| *existing == key) {
            slot.1 = val;
        } else {
            pairs.push((key, val));
        }
    }
    if pairs.is_empty() {
        Ok(Value::Sequence(Vec::new()))
    } else {
        Ok(Value::Mapping(pairs))
    }
}

fn sequence(fields: &[Json]) -> Result<Value> {
    let mut items = Vec::with_capacity(fields.len());
    for field in fields {
        match field_of(field)? {
            // nil holes are dropped
            Field::Plain(Value::Nil) => {}
            Field::Plain(val) => items.push(escape_embedded(val)),
            Field::Keyed(entry) => items.push(Value::Property {
                key: property_key(entry.key)?,
                value: Box::new(escape_embedded(entry.value)),
            }),
        }
    }
    Ok(Value::Sequence(items))
}

fn field_of(field: &Json) -> Result<Field> {
    let kind = kind_of(field)?;
    match kind {
        "TableKey" | "TableKeyString" => {
            let key = field
                .get("key")
                .ok_or_else(|| malformed(kind, "missing `key`"))?;
            let val = field
                .get("value")
                .ok_or_else(|| malformed(kind, "missing `value`"))?;
            Ok(Field::Keyed(KeyedField {
                key: walk(key)?,
                value: walk(val)?,
            }))
        }
        "TableValue" => {
            let val = field
                .get("value")
                .ok_or_else(|| malformed("TableValue", "missing `value`"))?;
            Ok(Field::Plain(walk(val)?))
        }
        other => Err(LualitError::UnsupportedNode(other.to_string())),
    }
}

/// Mapping keys are text; numeric and boolean keys fold to their literal
/// text form. Container keys have no text form.
fn key_text(key: Value) -> Result<String> {
    match key {
        Value::Text(text) => Ok(text),
        Value::Number(n) => Ok(value::number_text(n)),
        Value::Boolean(b) => Ok(if b { "true" } else { "false" }.to_string()),
        Value::Nil => Ok("nil".to_string()),
        _ => Err(malformed("TableKey", "table keys cannot be containers")),
    }
}

fn property_key(key: Value) -> Result<PropertyKey> {
    match key {
        Value::Text(text) => Ok(PropertyKey::Text(text)),
        Value::Number(n) => Ok(PropertyKey::Number(n)),
        _ => Err(malformed(
            "TableKey",
            "property keys must be strings or numbers",
        )),
    }
}

/// The embedding escape applied to text leaves placed into containers:
/// backslashes double, then CR and LF become the two-character `\r` / `\n`
/// sequences. Keys are never escaped; non-text values pass through.
fn escape_embedded(value: Value) -> Value {
    match value {
        Value::Text(text) => Value::Text(
            text.replace('\\', "\\\\")
                .replace('\r', "\\r")
                .replace('\n', "\\n"),
        ),
        other => other,
    }
}

fn kind_of(node: &Json) -> Result<&str> {
    node.get("type")
        .and_then(Json::as_str)
        .ok_or_else(|| malformed("unknown", "missing `type` tag"))
}

fn node_list<'a>(node: &'a Json, kind: &str, field: &str) -> Result<&'a [Json]> {
    node.get(field)
        .and_then(Json::as_array)
        .map(Vec::as_slice)
        .ok_or_else(|| malformed(kind, &format!("missing `{field}` list")))
}

fn node_str<'a>(node: &'a Json, kind: &str, field: &str) -> Result<&'a str> {
    node.get(field)
        .and_then(Json::as_str)
        .ok_or_else(|| malformed(kind, &format!("missing `{field}`")))
}

fn malformed(kind: &str, message: &str) -> LualitError {
    LualitError::MalformedNode {
        kind: kind.to_string(),
        message: message.to_string(),
    }
}
