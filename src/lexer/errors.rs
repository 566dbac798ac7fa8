use thiserror::Error;

/// Lexical diagnostics. The scanner never aborts on these: the offending
/// character is skipped and scanning continues, so they are collected
/// rather than returned as a failure.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum LexicalError {
    #[error("Illegal character '{0}' at position {1}")]
    IllegalChar(char, usize),

    #[error("Invalid number format '{0}' at position {1}")]
    InvalidNumber(String, usize),
}
