use crate::lexer::{Keyword, LexicalError, Token, TokenKind, VarType};

/// Everything one scan produces: the token stream plus any lexical
/// diagnostics recovered from along the way.
#[derive(Debug, Clone, PartialEq)]
pub struct LexOutput {
    pub tokens: Vec<Token>,
    pub errors: Vec<LexicalError>,
}

/// Total scanner: malformed input never aborts the scan. Unrecognized
/// characters are reported, skipped one at a time, and scanning resumes.
pub struct Scanner {
    chars: Vec<char>,
    current: usize,
    line: usize,
    tokens: Vec<Token>,
    errors: Vec<LexicalError>,
}

impl Scanner {
    pub fn new(input: &str) -> Self {
        Self {
            chars: input.chars().collect(),
            current: 0,
            line: 1,
            tokens: Vec::new(),
            errors: Vec::new(),
        }
    }

    pub fn scan_all(mut self) -> LexOutput {
        while !self.is_at_end() {
            self.skip_whitespace();
            if self.is_at_end() {
                break;
            }
            self.scan_token();
        }

        LexOutput {
            tokens: self.tokens,
            errors: self.errors,
        }
    }

    fn is_at_end(&self) -> bool {
        self.current >= self.chars.len()
    }

    fn peek(&self) -> Option<char> {
        self.chars.get(self.current).copied()
    }

    fn peek_ahead(&self, offset: usize) -> Option<char> {
        self.chars.get(self.current + offset).copied()
    }

    fn advance(&mut self) -> Option<char> {
        let ch = self.peek()?;
        self.current += 1;
        Some(ch)
    }

    fn match_char(&mut self, expected: char) -> bool {
        if self.peek() == Some(expected) {
            self.current += 1;
            true
        } else {
            false
        }
    }

    fn skip_whitespace(&mut self) {
        while let Some(ch) = self.peek() {
            match ch {
                ' ' | '\t' => {
                    self.current += 1;
                }
                '\n' => {
                    self.line += 1;
                    self.current += 1;
                }
                _ => break,
            }
        }
    }

    fn lexeme(&self, start: usize) -> String {
        self.chars[start..self.current].iter().collect()
    }

    fn push_token(&mut self, kind: TokenKind, start: usize) {
        let lexeme = self.lexeme(start);
        self.tokens.push(Token::new(kind, lexeme, self.line, start));
    }

    fn scan_token(&mut self) {
        let start = self.current;
        let ch = match self.advance() {
            Some(ch) => ch,
            None => return,
        };

        match ch {
            '"' => self.scan_string(start),
            '0'..='9' => self.scan_number(start),
            ch if ch.is_ascii_alphabetic() || ch == '_' => self.scan_word(start),

            // Two-character comparisons are matched before their
            // one-character prefixes
            '>' => {
                let kind = if self.match_char('=') {
                    TokenKind::GreaterEqual
                } else {
                    TokenKind::Greater
                };
                self.push_token(kind, start);
            }
            '<' => {
                let kind = if self.match_char('=') {
                    TokenKind::LessEqual
                } else {
                    TokenKind::Less
                };
                self.push_token(kind, start);
            }
            '=' => {
                let kind = if self.match_char('=') {
                    TokenKind::Equal
                } else {
                    TokenKind::Assign
                };
                self.push_token(kind, start);
            }
            '!' => {
                // `!` only exists as the prefix of `!=`
                if self.match_char('=') {
                    self.push_token(TokenKind::NotEqual, start);
                } else {
                    self.errors.push(LexicalError::IllegalChar('!', start));
                }
            }

            '+' => self.push_token(TokenKind::Plus, start),
            '-' => self.push_token(TokenKind::Minus, start),
            '*' => self.push_token(TokenKind::Asterisk, start),
            '/' => self.push_token(TokenKind::Slash, start),
            '(' => self.push_token(TokenKind::OpenParen, start),
            ')' => self.push_token(TokenKind::CloseParen, start),
            '{' => self.push_token(TokenKind::OpenBrace, start),
            '}' => self.push_token(TokenKind::CloseBrace, start),
            ';' => self.push_token(TokenKind::Semicolon, start),

            _ => self.errors.push(LexicalError::IllegalChar(ch, start)),
        }
    }

    fn scan_string(&mut self, start: usize) {
        while let Some(ch) = self.peek() {
            if ch == '"' {
                self.current += 1;
                let lexeme = self.lexeme(start);
                let content: String = self.chars[start + 1..self.current - 1].iter().collect();
                self.tokens.push(Token::new(
                    TokenKind::StringLiteral(content),
                    lexeme,
                    self.line,
                    start,
                ));
                return;
            }
            self.current += 1;
        }

        // No closing quote: report the opening quote, skip it alone and
        // rescan everything after it
        self.current = start + 1;
        self.errors.push(LexicalError::IllegalChar('"', start));
    }

    fn scan_number(&mut self, start: usize) {
        while self.peek().is_some_and(|c| c.is_ascii_digit()) {
            self.current += 1;
        }

        // A `.` is only part of the number when digits follow it;
        // `3.` lexes as NUMBER(3) and a stray dot
        let is_decimal = self.peek() == Some('.')
            && self.peek_ahead(1).is_some_and(|c| c.is_ascii_digit());

        if is_decimal {
            self.current += 1;
            while self.peek().is_some_and(|c| c.is_ascii_digit()) {
                self.current += 1;
            }

            let lexeme = self.lexeme(start);
            match lexeme.parse::<f64>() {
                Ok(value) => self
                    .tokens
                    .push(Token::new(TokenKind::Decimal(value), lexeme, self.line, start)),
                Err(_) => self.errors.push(LexicalError::InvalidNumber(lexeme, start)),
            }
        } else {
            let lexeme = self.lexeme(start);
            match lexeme.parse::<i64>() {
                Ok(value) => self
                    .tokens
                    .push(Token::new(TokenKind::Number(value), lexeme, self.line, start)),
                Err(_) => self.errors.push(LexicalError::InvalidNumber(lexeme, start)),
            }
        }
    }

    fn scan_word(&mut self, start: usize) {
        while self
            .peek()
            .is_some_and(|c| c.is_ascii_alphanumeric() || c == '_')
        {
            self.current += 1;
        }

        let text = self.lexeme(start);

        let kind = if let Some(var_type) = VarType::from_str(&text) {
            TokenKind::TypeName(var_type)
        } else if text == "true" {
            TokenKind::BoolLiteral(true)
        } else if text == "false" {
            TokenKind::BoolLiteral(false)
        } else if let Some(keyword) = Keyword::from_str(&text) {
            TokenKind::Keyword(keyword)
        } else {
            TokenKind::Identifier(text.clone())
        };

        self.tokens.push(Token::new(kind, text, self.line, start));
    }
}

/// Convenience function for tokenizing input
pub fn tokenize(input: &str) -> LexOutput {
    Scanner::new(input).scan_all()
}
