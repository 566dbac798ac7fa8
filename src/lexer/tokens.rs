use serde::Serialize;
use std::fmt;

/// Keywords that are reserved but carry no type information.
/// `if` and `while` have grammar productions; the rest are reserved
/// for future use and are rejected by the parser.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Keyword {
    If,
    Else,
    While,
    Return,
    Void,
}

impl fmt::Display for Keyword {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let s = match self {
            Keyword::If => "if",
            Keyword::Else => "else",
            Keyword::While => "while",
            Keyword::Return => "return",
            Keyword::Void => "void",
        };
        write!(f, "{}", s)
    }
}

impl Keyword {
    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "if" => Some(Keyword::If),
            "else" => Some(Keyword::Else),
            "while" => Some(Keyword::While),
            "return" => Some(Keyword::Return),
            "void" => Some(Keyword::Void),
            _ => None,
        }
    }
}

/// Declarable variable types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum VarType {
    Int,
    Double,
    String,
    Bool,
}

impl VarType {
    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "int" => Some(VarType::Int),
            "double" => Some(VarType::Double),
            "string" => Some(VarType::String),
            "bool" => Some(VarType::Bool),
            _ => None,
        }
    }

    /// Grammar terminal name as it appears in production rules
    #[must_use]
    pub fn terminal(&self) -> &'static str {
        match self {
            VarType::Int => "INT",
            VarType::Double => "DOUBLE",
            VarType::String => "STRING_TYPE",
            VarType::Bool => "BOOL_TYPE",
        }
    }

    /// Type name used in semantic error messages
    #[must_use]
    pub fn long_name(&self) -> &'static str {
        match self {
            VarType::Int => "integer",
            VarType::Double => "decimal",
            VarType::String => "string",
            VarType::Bool => "boolean",
        }
    }
}

impl fmt::Display for VarType {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let s = match self {
            VarType::Int => "int",
            VarType::Double => "double",
            VarType::String => "string",
            VarType::Bool => "bool",
        };
        write!(f, "{}", s)
    }
}

/// Token kinds
#[derive(Debug, Clone, PartialEq)]
pub enum TokenKind {
    // Keywords and type names
    TypeName(VarType),
    Keyword(Keyword),

    // Identifiers and literals
    Identifier(String),
    Number(i64),
    Decimal(f64),
    StringLiteral(String), // unquoted content; the lexeme keeps the quotes
    BoolLiteral(bool),

    // Operators
    Plus,         // +
    Minus,        // -
    Asterisk,     // *
    Slash,        // /
    Assign,       // =
    Greater,      // >
    Less,         // <
    GreaterEqual, // >=
    LessEqual,    // <=
    Equal,        // ==
    NotEqual,     // !=

    // Delimiters
    OpenParen,  // (
    CloseParen, // )
    OpenBrace,  // {
    CloseBrace, // }
    Semicolon,  // ;
}

/// Token categories used when serializing the token list
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum TokenCategory {
    Keywords,
    Identifier,
    Operator,
    Delimiter,
    Literal,
}

impl fmt::Display for TokenCategory {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let s = match self {
            TokenCategory::Keywords => "Keywords",
            TokenCategory::Identifier => "Identifier",
            TokenCategory::Operator => "Operator",
            TokenCategory::Delimiter => "Delimiter",
            TokenCategory::Literal => "Literal",
        };
        write!(f, "{}", s)
    }
}

impl TokenKind {
    #[must_use]
    pub fn category(&self) -> TokenCategory {
        match self {
            TokenKind::TypeName(_) | TokenKind::Keyword(_) => TokenCategory::Keywords,
            TokenKind::Identifier(_) => TokenCategory::Identifier,
            TokenKind::Plus
            | TokenKind::Minus
            | TokenKind::Asterisk
            | TokenKind::Slash
            | TokenKind::Assign
            | TokenKind::Greater
            | TokenKind::Less
            | TokenKind::GreaterEqual
            | TokenKind::LessEqual
            | TokenKind::Equal
            | TokenKind::NotEqual => TokenCategory::Operator,
            TokenKind::OpenParen
            | TokenKind::CloseParen
            | TokenKind::OpenBrace
            | TokenKind::CloseBrace
            | TokenKind::Semicolon => TokenCategory::Delimiter,
            TokenKind::Number(_)
            | TokenKind::Decimal(_)
            | TokenKind::StringLiteral(_)
            | TokenKind::BoolLiteral(_) => TokenCategory::Literal,
        }
    }

    /// The `token_type` string paired with the category when serializing
    #[must_use]
    pub fn type_name(&self) -> &'static str {
        match self {
            TokenKind::TypeName(VarType::Int) => "int",
            TokenKind::TypeName(VarType::Double) => "double",
            TokenKind::TypeName(VarType::String) => "string",
            TokenKind::TypeName(VarType::Bool) => "bool",
            TokenKind::Keyword(Keyword::If) => "if",
            TokenKind::Keyword(Keyword::Else) => "else",
            TokenKind::Keyword(Keyword::While) => "while",
            TokenKind::Keyword(Keyword::Return) => "return",
            TokenKind::Keyword(Keyword::Void) => "void",
            TokenKind::Identifier(_) => "identifier",
            TokenKind::Number(_) => "integer",
            TokenKind::Decimal(_) => "decimal",
            TokenKind::StringLiteral(_) => "string",
            TokenKind::BoolLiteral(_) => "boolean",
            TokenKind::Plus => "+",
            TokenKind::Minus => "-",
            TokenKind::Asterisk => "*",
            TokenKind::Slash => "/",
            TokenKind::Assign => "=",
            TokenKind::Greater => ">",
            TokenKind::Less => "<",
            TokenKind::GreaterEqual => ">=",
            TokenKind::LessEqual => "<=",
            TokenKind::Equal => "==",
            TokenKind::NotEqual => "!=",
            TokenKind::OpenParen => "(",
            TokenKind::CloseParen => ")",
            TokenKind::OpenBrace => "{",
            TokenKind::CloseBrace => "}",
            TokenKind::Semicolon => ";",
        }
    }
}

/// A token with its lexeme and source location
#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    pub kind: TokenKind,
    pub lexeme: String,
    /// 1-based source line, recorded in symbol-table entries
    pub line: usize,
    /// Character offset in the input, used in error messages
    pub offset: usize,
}

impl Token {
    pub fn new(kind: TokenKind, lexeme: String, line: usize, offset: usize) -> Self {
        Self {
            kind,
            lexeme,
            line,
            offset,
        }
    }

    /// Serialization view of this token
    #[must_use]
    pub fn record(&self) -> TokenRecord {
        TokenRecord {
            lexeme: self.lexeme.clone(),
            token_type: self.kind.type_name().to_string(),
            category: self.kind.category(),
        }
    }
}

/// The `{lexeme, token_type, category}` triple exposed to callers
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TokenRecord {
    pub lexeme: String,
    pub token_type: String,
    pub category: TokenCategory,
}
