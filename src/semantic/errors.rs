use thiserror::Error;

/// Semantic error kinds. All are accumulated in source order; the
/// not-declared class is computed but filtered from the externally
/// visible result.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SemanticError {
    #[error("Variable '{0}' already declared at line {1}")]
    Redeclaration(String, usize),

    #[error("Variable '{0}' not declared")]
    NotDeclared(String),

    /// Assignment requires an exact type match: fields are the variable
    /// name, the expression's type and the declared type
    #[error("Cannot assign {1} value to {2} variable '{0}'")]
    TypeMismatch(String, &'static str, &'static str),

    /// An operator applied to an incompatible operand pair inside a
    /// declaration initializer
    #[error("Cannot perform '{1}' operation between {2} and {3} in assignment to variable '{0}'")]
    InvalidOperation(String, char, &'static str, &'static str),

    /// Fallback when an invalid expression carries too few collected
    /// atoms to name the offending pair
    #[error("Type mismatch in expression assigned to variable '{0}'")]
    ExpressionMismatch(String),
}

impl SemanticError {
    /// The error class that is filtered from reported results:
    /// use-before-declaration is deliberately permitted
    #[must_use]
    pub fn is_not_declared(&self) -> bool {
        matches!(self, SemanticError::NotDeclared(_))
    }
}
