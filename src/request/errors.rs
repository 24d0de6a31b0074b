//! Error types for building and parsing name/value-pair strings.

use thiserror::Error;

/// Errors raised while encoding or decoding a name/value-pair string.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum RequestError {
    /// A field name contains `&`, `=`, `[` or `]`.
    #[error("field name {0:?} contains a reserved character")]
    ReservedCharInName(String),
    /// A pair starts with `=` or `[`.
    #[error("empty field name at byte {0}")]
    EmptyName(usize),
    /// A field name is not followed by `=`.
    #[error("missing '=' after field name at byte {0}")]
    MissingSeparator(usize),
    /// The `[len]` clause is not a decimal byte count.
    #[error("invalid length clause for field {0:?}")]
    InvalidLength(String),
    /// The declared length runs past the end of the input or splits a
    /// UTF-8 character.
    #[error("declared length of field {0:?} does not fit its value")]
    LengthOverrun(String),
    /// A length-prefixed value is not followed by the delimiter.
    #[error("expected delimiter after field {0:?}")]
    MissingDelimiter(String),
}
