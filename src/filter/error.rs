use crate::parser::Field;
use serde::Serialize;
use thiserror::Error;

/// Errors that can occur when parsing filter expressions
#[derive(Debug, Error, PartialEq, Eq)]
pub enum FilterParseError {
    #[error(
        "Unknown field: '{0}'. Valid fields are: date (fecha), statuscode (status), description (desc), iporigen (ip)"
    )]
    UnknownField(String),

    #[error("Empty pattern for field '{0}'")]
    EmptyPattern(Field),

    #[error("Field '{0}' is given more than once")]
    DuplicateField(Field),

    #[error("Invalid filter expression: {0}")]
    InvalidExpression(String),
}

/// A user pattern that the regex engine refused to compile
#[derive(Debug, Clone, Error, PartialEq, Eq, Serialize)]
#[error("{field}: {message}")]
pub struct RegexCompileError {
    /// Field the pattern was typed for
    pub field: Field,
    /// Diagnostic from the regex compiler, unmodified
    pub message: String,
}
