use crate::lexer::{Token, TokenKind};
use crate::parser::{DerivationNode, Leaf, NodeKind, ParseError};

/// Predictive recursive-descent parser. Consumes the token stream and
/// builds the derivation tree; purely syntactic — semantic checks run in
/// a separate pass over the finished tree.
pub struct Parser {
    tokens: Vec<Token>,
    current: usize,
}

impl Parser {
    #[must_use]
    pub fn new(tokens: Vec<Token>) -> Self {
        Self { tokens, current: 0 }
    }

    /// Peek at the current token without consuming it
    pub(crate) fn peek(&self) -> Option<&Token> {
        self.tokens.get(self.current)
    }

    /// Consume and return the current token
    pub(crate) fn advance(&mut self) -> Option<Token> {
        let token = self.tokens.get(self.current).cloned();
        if token.is_some() {
            self.current += 1;
        }
        token
    }

    /// Check whether the current token has the given kind, ignoring payloads
    pub(crate) fn check(&self, kind: &TokenKind) -> bool {
        self.peek()
            .is_some_and(|t| std::mem::discriminant(&t.kind) == std::mem::discriminant(kind))
    }

    /// Consume the current token if it matches, otherwise report what was
    /// expected
    pub(crate) fn expect(&mut self, kind: &TokenKind, what: &str) -> Result<Token, ParseError> {
        if self.check(kind) {
            return self.advance().ok_or(ParseError::UnexpectedEnd);
        }

        match self.peek() {
            Some(tok) => Err(ParseError::Expected(
                what.to_string(),
                tok.lexeme.clone(),
                tok.offset,
            )),
            None => Err(ParseError::UnexpectedEnd),
        }
    }

    /// expression → term expression_prime
    pub(crate) fn parse_expression(&mut self) -> Result<DerivationNode, ParseError> {
        let mut node = DerivationNode::new(
            NodeKind::Expression,
            "expression",
            "expression → term expression_prime",
        );
        node.push(self.parse_term()?);
        node.push(self.parse_expression_prime()?);
        Ok(node)
    }

    /// expression_prime → + term expression_prime | ε
    fn parse_expression_prime(&mut self) -> Result<DerivationNode, ParseError> {
        if self.check(&TokenKind::Plus) {
            self.advance();
            let mut node = DerivationNode::new(
                NodeKind::ExpressionPrime,
                "expression_prime",
                "expression_prime → + term expression_prime",
            );
            node.push(DerivationNode::leaf(Leaf::Plus, "+", "+ → +"));
            node.push(self.parse_term()?);
            node.push(self.parse_expression_prime()?);
            Ok(node)
        } else {
            Ok(DerivationNode::new(
                NodeKind::ExpressionPrime,
                "expression_prime",
                "expression_prime → ε",
            ))
        }
    }

    /// term → factor term_prime
    fn parse_term(&mut self) -> Result<DerivationNode, ParseError> {
        let mut node =
            DerivationNode::new(NodeKind::Term, "term", "term → factor term_prime");
        node.push(self.parse_factor()?);
        node.push(self.parse_term_prime()?);
        Ok(node)
    }

    /// term_prime → * factor term_prime | ε
    fn parse_term_prime(&mut self) -> Result<DerivationNode, ParseError> {
        if self.check(&TokenKind::Asterisk) {
            self.advance();
            let mut node = DerivationNode::new(
                NodeKind::TermPrime,
                "term_prime",
                "term_prime → * factor term_prime",
            );
            node.push(DerivationNode::leaf(Leaf::Star, "*", "* → *"));
            node.push(self.parse_factor()?);
            node.push(self.parse_term_prime()?);
            Ok(node)
        } else {
            Ok(DerivationNode::new(
                NodeKind::TermPrime,
                "term_prime",
                "term_prime → ε",
            ))
        }
    }

    /// factor → ( expression ) | ID | NUMBER | DECIMAL | STRING | BOOL
    fn parse_factor(&mut self) -> Result<DerivationNode, ParseError> {
        let token = match self.peek() {
            Some(tok) => tok.clone(),
            None => return Err(ParseError::UnexpectedEnd),
        };

        match &token.kind {
            TokenKind::OpenParen => {
                self.advance();
                let mut node = DerivationNode::new(
                    NodeKind::Factor,
                    "factor",
                    "factor → ( expression )",
                );
                node.push(DerivationNode::leaf(Leaf::Punct, "(", "( → ("));
                node.push(self.parse_expression()?);
                self.expect(&TokenKind::CloseParen, "')'")?;
                node.push(DerivationNode::leaf(Leaf::Punct, ")", ") → )"));
                Ok(node)
            }
            TokenKind::Identifier(name) => {
                let name = name.clone();
                self.advance();
                let mut node = DerivationNode::new(NodeKind::Factor, "factor", "factor → ID");
                node.push(DerivationNode::leaf(
                    Leaf::Ident {
                        name: name.clone(),
                        line: token.line,
                    },
                    format!("ID({})", name),
                    format!("ID → {}", name),
                ));
                Ok(node)
            }
            TokenKind::Number(_) => {
                self.advance();
                let mut node =
                    DerivationNode::new(NodeKind::Factor, "factor", "factor → NUMBER");
                node.push(DerivationNode::leaf(
                    Leaf::Number,
                    format!("NUMBER({})", token.lexeme),
                    format!("NUMBER → {}", token.lexeme),
                ));
                Ok(node)
            }
            TokenKind::Decimal(_) => {
                self.advance();
                let mut node =
                    DerivationNode::new(NodeKind::Factor, "factor", "factor → DECIMAL");
                node.push(DerivationNode::leaf(
                    Leaf::Decimal,
                    format!("DECIMAL({})", token.lexeme),
                    format!("DECIMAL → {}", token.lexeme),
                ));
                Ok(node)
            }
            TokenKind::StringLiteral(_) => {
                self.advance();
                let mut node =
                    DerivationNode::new(NodeKind::Factor, "factor", "factor → STRING");
                node.push(DerivationNode::leaf(
                    Leaf::Str,
                    format!("STRING({})", token.lexeme),
                    format!("STRING → {}", token.lexeme),
                ));
                Ok(node)
            }
            TokenKind::BoolLiteral(_) => {
                self.advance();
                let mut node = DerivationNode::new(NodeKind::Factor, "factor", "factor → BOOL");
                node.push(DerivationNode::leaf(
                    Leaf::Bool,
                    format!("BOOL({})", token.lexeme),
                    format!("BOOL → {}", token.lexeme),
                ));
                Ok(node)
            }
            _ => Err(ParseError::UnexpectedToken(token.lexeme, token.offset)),
        }
    }

    /// condition → expression (GT|LT|GE|LE|EQ|NE) expression
    pub(crate) fn parse_condition(&mut self) -> Result<DerivationNode, ParseError> {
        let left = self.parse_expression()?;

        let (terminal, symbol) = match self.peek().map(|t| &t.kind) {
            Some(TokenKind::Greater) => ("GT", ">"),
            Some(TokenKind::Less) => ("LT", "<"),
            Some(TokenKind::GreaterEqual) => ("GE", ">="),
            Some(TokenKind::LessEqual) => ("LE", "<="),
            Some(TokenKind::Equal) => ("EQ", "=="),
            Some(TokenKind::NotEqual) => ("NE", "!="),
            Some(_) => {
                let tok = self.peek().ok_or(ParseError::UnexpectedEnd)?;
                return Err(ParseError::Expected(
                    "comparison operator".to_string(),
                    tok.lexeme.clone(),
                    tok.offset,
                ));
            }
            None => return Err(ParseError::UnexpectedEnd),
        };
        self.advance();

        let mut node = DerivationNode::new(
            NodeKind::Condition,
            "condition",
            format!("condition → expression {} expression", terminal),
        );
        node.push(left);
        node.push(DerivationNode::leaf(
            Leaf::Punct,
            terminal,
            format!("{} → {}", terminal, symbol),
        ));
        node.push(self.parse_expression()?);
        Ok(node)
    }
}
