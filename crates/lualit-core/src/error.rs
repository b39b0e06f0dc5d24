//! Error types for Lua literal serialization and deserialization.

use thiserror::Error;

/// Errors that can occur while converting between values and Lua literals.
#[derive(Error, Debug)]
pub enum LualitError {
    /// The deserializer met an AST node outside the supported literal subset:
    /// an unrecognized `type` tag, or a unary operator other than negation.
    #[error("unsupported AST node: {0}")]
    UnsupportedNode(String),

    /// A recognized node was missing a field or carried one of the wrong
    /// shape. The external parser normally guarantees these are present.
    #[error("malformed {kind} node: {message}")]
    MalformedNode { kind: String, message: String },

    /// The serializer met a value with no Lua literal form
    /// (a non-finite number).
    #[error("unsupported value: {0}")]
    UnsupportedValue(String),
}

/// Convenience alias used throughout lualit-core.
pub type Result<T> = std::result::Result<T, LualitError>;
