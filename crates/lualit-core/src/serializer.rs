//! Lua literal serializer — renders a [`Value`] as a `return <literal>` chunk.
//!
//! The output is Lua source text suitable for direct evaluation or for a
//! runtime's load-string facility. Rendering is a pure recursive walk over
//! the value tree:
//!
//! - **Tables**: one element per line with trailing commas when indentation
//!   is enabled, a single-line `{e1,e2,}` block when it is not
//! - **Keys**: identifier-shaped mapping keys render bare, everything else
//!   gets `["..."]` bracket form
//! - **Strings**: quoted with the configured quote character; only that
//!   character is escaped (the deserializer's embedding escape is not
//!   reversed here — the two steps are independent)
//! - **Properties**: `[key] = value` fragments inside a sequence block
//!
//! # Example
//! ```
//! use lualit_core::{serialize, FormatOptions, Value};
//! let value = Value::Sequence(vec![Value::Number(1.0), Value::Number(2.0)]);
//! let lua = serialize(&value, &FormatOptions::default()).unwrap();
//! assert_eq!(lua, "return {\n  1,\n  2,\n}");
//! ```

use crate::error::{LualitError, Result};
use crate::value::{self, PropertyKey, Value};

/// Formatting configuration for [`serialize`].
///
/// Transient, constructed per call. Callers override individual fields with
/// struct-update syntax:
///
/// ```
/// use lualit_core::{FormatOptions, Indent};
/// let compact = FormatOptions { spaces: Indent::None, ..FormatOptions::default() };
/// ```
#[derive(Debug, Clone)]
pub struct FormatOptions {
    /// Line terminator between elements when indentation is enabled.
    pub eol: String,
    /// `true` renders strings in single quotes, `false` in double quotes.
    pub single_quote: bool,
    /// Indentation unit; a falsy unit means compact output.
    pub spaces: Indent,
}

impl Default for FormatOptions {
    fn default() -> Self {
        FormatOptions {
            eol: "\n".to_string(),
            single_quote: true,
            spaces: Indent::Spaces(2),
        }
    }
}

/// Indentation unit for rendered tables.
#[derive(Debug, Clone, PartialEq)]
pub enum Indent {
    /// Compact output, no inter-element whitespace.
    None,
    /// A count of space characters per nesting level (`0` is compact).
    Spaces(usize),
    /// An arbitrary literal unit, e.g. `"\t"` (empty is compact).
    Unit(String),
}

impl Indent {
    /// The literal unit repeated per nesting level, or `None` when compact.
    fn unit(&self) -> Option<String> {
        match self {
            Indent::None | Indent::Spaces(0) => None,
            Indent::Spaces(n) => Some(" ".repeat(*n)),
            Indent::Unit(u) if u.is_empty() => None,
            Indent::Unit(u) => Some(u.clone()),
        }
    }
}

/// Render `value` as Lua source text of the form `return <literal>`.
///
/// Fails with [`LualitError::UnsupportedValue`] when the tree contains a
/// number with no Lua literal form (NaN or an infinity); no partial text is
/// returned.
pub fn serialize(value: &Value, options: &FormatOptions) -> Result<String> {
    let mut out = String::from("return ");
    render(value, options, 0, &mut out)?;
    Ok(out)
}

fn render(value: &Value, options: &FormatOptions, depth: usize, out: &mut String) -> Result<()> {
    match value {
        Value::Nil => out.push_str("nil"),
        Value::Boolean(b) => out.push_str(if *b { "true" } else { "false" }),
        Value::Number(n) => out.push_str(&render_number(*n)?),
        Value::Text(text) => render_quoted(text, options, out),
        Value::Sequence(items) => render_sequence(items, options, depth, out)?,
        Value::Mapping(pairs) => render_mapping(pairs, options, depth, out)?,
        Value::Property { key, value } => render_property(key, value, options, depth, out)?,
    }
    Ok(())
}

fn render_sequence(
    items: &[Value],
    options: &FormatOptions,
    depth: usize,
    out: &mut String,
) -> Result<()> {
    if items.is_empty() {
        out.push_str("{}");
        return Ok(());
    }
    out.push('{');
    match options.spaces.unit() {
        Some(unit) => {
            for item in items {
                out.push_str(&options.eol);
                out.push_str(&unit.repeat(depth + 1));
                render(item, options, depth + 1, out)?;
                out.push(',');
            }
            out.push_str(&options.eol);
            out.push_str(&unit.repeat(depth));
        }
        None => {
            for item in items {
                render(item, options, depth + 1, out)?;
                out.push(',');
            }
        }
    }
    out.push('}');
    Ok(())
}

fn render_mapping(
    pairs: &[(String, Value)],
    options: &FormatOptions,
    depth: usize,
    out: &mut String,
) -> Result<()> {
    if pairs.is_empty() {
        out.push_str("{}");
        return Ok(());
    }
    out.push('{');
    match options.spaces.unit() {
        Some(unit) => {
            for (key, val) in pairs {
                out.push_str(&options.eol);
                out.push_str(&unit.repeat(depth + 1));
                render_key(key, options, out);
                out.push_str(" = ");
                render(val, options, depth + 1, out)?;
                out.push(',');
            }
            out.push_str(&options.eol);
            out.push_str(&unit.repeat(depth));
        }
        None => {
            for (key, val) in pairs {
                render_key(key, options, out);
                out.push('=');
                render(val, options, depth + 1, out)?;
                out.push(',');
            }
        }
    }
    out.push('}');
    Ok(())
}

/// A property supplies its own `[key] = value` fragment; the enclosing
/// sequence provides the braces and separators.
fn render_property(
    key: &PropertyKey,
    value: &Value,
    options: &FormatOptions,
    depth: usize,
    out: &mut String,
) -> Result<()> {
    out.push('[');
    match key {
        PropertyKey::Text(text) => render_quoted(text, options, out),
        PropertyKey::Number(n) => out.push_str(&render_number(*n)?),
    }
    out.push(']');
    out.push_str(if options.spaces.unit().is_some() {
        " = "
    } else {
        "="
    });
    render(value, options, depth, out)
}

/// Identifier-shaped keys render bare, everything else as `["..."]`.
fn render_key(key: &str, options: &FormatOptions, out: &mut String) {
    if is_identifier(key) {
        out.push_str(key);
    } else {
        out.push('[');
        render_quoted(key, options, out);
        out.push(']');
    }
}

/// Matches `^[A-Za-z_][A-Za-z0-9_]*$`.
fn is_identifier(key: &str) -> bool {
    let mut chars = key.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}

/// Quote with the configured character; only that character is escaped.
fn render_quoted(text: &str, options: &FormatOptions, out: &mut String) {
    let quote = if options.single_quote { '\'' } else { '"' };
    out.push(quote);
    for ch in text.chars() {
        if ch == quote {
            out.push('\\');
        }
        out.push(ch);
    }
    out.push(quote);
}

/// Integer form for whole numbers, plain decimal otherwise. NaN and the
/// infinities have no Lua literal form.
fn render_number(n: f64) -> Result<String> {
    if !n.is_finite() {
        return Err(LualitError::UnsupportedValue(format!(
            "non-finite number {n}"
        )));
    }
    Ok(value::number_text(n))
}
