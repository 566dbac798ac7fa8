use thiserror::Error;

/// Syntax error types. One of these aborts the parse for the statement;
/// no resynchronization is attempted.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ParseError {
    #[error("Unexpected token '{0}' at position {1}")]
    UnexpectedToken(String, usize),

    #[error("Expected {0} but found '{1}' at position {2}")]
    Expected(String, String, usize),

    #[error("Unexpected trailing input '{0}' at position {1}")]
    TrailingInput(String, usize),

    #[error("Unexpected end of input")]
    UnexpectedEnd,
}
