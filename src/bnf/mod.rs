use thiserror::Error;

/// The reconstructor only accepts well-formed expression text; anything
/// else is rejected up front instead of producing an undefined sequence.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ReconstructError {
    #[error("Expression is empty")]
    Empty,

    #[error("Unbalanced parentheses in '{0}'")]
    UnbalancedParens(String),

    #[error("'{0}' is not an identifier or numeric literal")]
    InvalidFactor(String),
}

/// Re-derive the `expression`/`term`/`factor` production sequence a
/// predictive parser applies to an expression built from `+`, `*`,
/// parentheses, identifiers and numeric literals. Works on the raw
/// text, independently of the derivation tree.
pub fn derive_sequence(expression: &str) -> Result<Vec<String>, ReconstructError> {
    let expr: Vec<char> = expression.chars().filter(|c| !c.is_whitespace()).collect();

    if expr.is_empty() {
        return Err(ReconstructError::Empty);
    }
    if !balanced(&expr) {
        return Err(ReconstructError::UnbalancedParens(expr.iter().collect()));
    }

    let mut steps = Vec::new();
    expression_rules(&expr, &mut steps)?;
    Ok(steps)
}

fn balanced(expr: &[char]) -> bool {
    let mut depth = 0i32;
    for &ch in expr {
        match ch {
            '(' => depth += 1,
            ')' => {
                depth -= 1;
                if depth < 0 {
                    return false;
                }
            }
            _ => {}
        }
    }
    depth == 0
}

/// Rightmost occurrence of `op` at parenthesis depth zero. Scanning
/// right-to-left with the depth constraint is what yields the
/// left-associative split.
fn split_point(expr: &[char], op: char) -> Option<usize> {
    let mut depth = 0i32;
    for i in (0..expr.len()).rev() {
        match expr[i] {
            ')' => depth += 1,
            '(' => depth -= 1,
            ch if ch == op && depth == 0 => return Some(i),
            _ => {}
        }
    }
    None
}

fn expression_rules(expr: &[char], steps: &mut Vec<String>) -> Result<(), ReconstructError> {
    if let Some(pos) = split_point(expr, '+') {
        steps.push("<expression> ::= <expression> + <term>".to_string());
        expression_rules(&expr[..pos], steps)?;
        term_rules(&expr[pos + 1..], steps)
    } else {
        steps.push("<expression> ::= <term>".to_string());
        term_rules(expr, steps)
    }
}

fn term_rules(expr: &[char], steps: &mut Vec<String>) -> Result<(), ReconstructError> {
    if let Some(pos) = split_point(expr, '*') {
        steps.push("<term> ::= <term> * <factor>".to_string());
        term_rules(&expr[..pos], steps)?;
        factor_rules(&expr[pos + 1..], steps)
    } else {
        steps.push("<term> ::= <factor>".to_string());
        factor_rules(expr, steps)
    }
}

fn factor_rules(expr: &[char], steps: &mut Vec<String>) -> Result<(), ReconstructError> {
    if expr.first() == Some(&'(') && expr.last() == Some(&')') && wraps(expr) {
        steps.push("<factor> ::= ( <expression> )".to_string());
        return expression_rules(&expr[1..expr.len() - 1], steps);
    }

    let text: String = expr.iter().collect();
    let is_terminal = !expr.is_empty()
        && expr
            .iter()
            .all(|&c| c.is_ascii_alphanumeric() || c == '_' || c == '.');

    if !is_terminal {
        return Err(ReconstructError::InvalidFactor(text));
    }

    steps.push(format!("<factor> ::= {}", text));
    Ok(())
}

/// True when the opening parenthesis matches the final closing one,
/// i.e. the whole slice is a single parenthesized group
fn wraps(expr: &[char]) -> bool {
    let mut depth = 0i32;
    for (i, &ch) in expr.iter().enumerate() {
        match ch {
            '(' => depth += 1,
            ')' => {
                depth -= 1;
                if depth == 0 {
                    return i == expr.len() - 1;
                }
            }
            _ => {}
        }
    }
    false
}
