//! # lualit-core
//!
//! Serializer and deserializer for **Lua table literals**.
//!
//! One direction renders a JSON-like [`Value`] as Lua source text of the form
//! `return <literal>`, ready for a Lua runtime's load-string facility. The
//! other consumes an already-parsed Lua chunk (luaparse-style AST nodes,
//! supplied as JSON) and reduces it back to a [`Value`]. Lua parsing itself
//! stays external — this crate never tokenizes Lua source.
//!
//! Only the literal subset of Lua is covered: `nil`, booleans, numbers,
//! strings, unary negation of a literal, and table constructors.
//!
//! ## Quick start
//!
//! ```rust
//! use lualit_core::{deserialize, serialize, FormatOptions, Value};
//! use serde_json::json;
//!
//! // Value → Lua chunk
//! let value = Value::Mapping(vec![
//!     ("name".to_string(), Value::Text("Ada".to_string())),
//!     ("visits".to_string(), Value::Number(3.0)),
//! ]);
//! let lua = serialize(&value, &FormatOptions::default()).unwrap();
//! assert_eq!(lua, "return {\n  name = 'Ada',\n  visits = 3,\n}");
//!
//! // Parsed Lua chunk → Value
//! let tree = json!({
//!     "type": "Chunk",
//!     "body": [{
//!         "type": "ReturnStatement",
//!         "arguments": [{ "type": "BooleanLiteral", "value": true }]
//!     }]
//! });
//! assert_eq!(deserialize(&tree).unwrap(), Value::Boolean(true));
//! ```
//!
//! ## Modules
//!
//! - [`serializer`] — `Value` → Lua source text (`return <literal>`)
//! - [`deserializer`] — parsed Lua chunk → `Value`
//! - [`error`] — error types for both directions
//! - [`value`] — the shared `Value` model and its JSON interop

pub mod deserializer;
pub mod error;
pub mod serializer;
pub mod value;

pub use deserializer::deserialize;
pub use error::LualitError;
pub use serializer::{serialize, FormatOptions, Indent};
pub use value::{PropertyKey, Value};
