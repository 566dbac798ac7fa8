use crate::bnf;
use crate::lexer::{self, LexicalError, Token, TokenRecord};
use crate::parser::{DerivationNode, Leaf, NodeKind, ParseError, Parser};
use crate::semantic::{SemanticAnalyzer, SemanticError, SymbolEntry, SymbolTable};
use serde::Serialize;
use std::collections::HashMap;
use std::fmt;

/// Outcome of one analysis. Syntax errors take priority over semantic
/// errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Status {
    Success,
    SyntaxError,
    SemanticError,
}

impl Status {
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Status::Success => "success",
            Status::SyntaxError => "syntax_error",
            Status::SemanticError => "semantic_error",
        }
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Everything one analysis produces. On a syntax error no tree is
/// exposed and the semantic results are empty; on a semantic error the
/// tree is still available.
#[derive(Debug, Clone)]
pub struct AnalysisResult {
    pub status: Status,
    pub tokens: Vec<Token>,
    pub tree: Option<DerivationNode>,
    pub syntax_error: Option<ParseError>,
    /// Ordered, with not-declared references already filtered out
    pub semantic_errors: Vec<SemanticError>,
    pub lexical_errors: Vec<LexicalError>,
    pub symbols: HashMap<String, SymbolEntry>,
    /// Reconstructed production sequence; present only for expression
    /// statements the reconstructor covers
    pub bnf_derivation: Option<Vec<String>>,
}

impl AnalysisResult {
    /// Tokens as `{lexeme, token_type, category}` serialization triples
    #[must_use]
    pub fn token_records(&self) -> Vec<TokenRecord> {
        self.tokens.iter().map(Token::record).collect()
    }

    /// Pre-order production list of the derivation tree; empty when no
    /// tree was produced
    #[must_use]
    pub fn productions(&self) -> Vec<String> {
        self.tree
            .as_ref()
            .map(DerivationNode::productions)
            .unwrap_or_default()
    }
}

/// Analysis driver. Owns the symbol table, which persists across calls
/// until `reset` — callers reusing one instance must reset between
/// independent analyses, or declarations carry over.
#[derive(Debug, Default)]
pub struct Analyzer {
    table: SymbolTable,
}

impl Analyzer {
    #[must_use]
    pub fn new() -> Self {
        Self {
            table: SymbolTable::new(),
        }
    }

    /// Clear declarations carried over from earlier statements
    pub fn reset(&mut self) {
        self.table.reset();
    }

    /// Analyze a single statement: tokenize, parse into a derivation
    /// tree, then run the semantic pass over the tree. Never panics and
    /// produces no output; all diagnostics are returned in the result.
    pub fn analyze(&mut self, source: &str) -> AnalysisResult {
        let lex = lexer::tokenize(source);
        let mut parser = Parser::new(lex.tokens.clone());

        match parser.parse() {
            Ok(tree) => {
                let errors = SemanticAnalyzer::new(&mut self.table).check(&tree);
                let semantic_errors: Vec<SemanticError> = errors
                    .into_iter()
                    .filter(|e| !e.is_not_declared())
                    .collect();

                let bnf_derivation = if reconstructible(&tree) {
                    bnf::derive_sequence(source).ok()
                } else {
                    None
                };

                let status = if semantic_errors.is_empty() {
                    Status::Success
                } else {
                    Status::SemanticError
                };

                AnalysisResult {
                    status,
                    tokens: lex.tokens,
                    tree: Some(tree),
                    syntax_error: None,
                    semantic_errors,
                    lexical_errors: lex.errors,
                    symbols: self.table.snapshot(),
                    bnf_derivation,
                }
            }
            Err(err) => AnalysisResult {
                status: Status::SyntaxError,
                tokens: lex.tokens,
                tree: None,
                syntax_error: Some(err),
                semantic_errors: Vec::new(),
                lexical_errors: lex.errors,
                symbols: self.table.snapshot(),
                bnf_derivation: None,
            },
        }
    }
}

/// Analyze one statement with a fresh symbol table — the silent entry
/// point for embedding callers.
#[must_use]
pub fn analyze(source: &str) -> AnalysisResult {
    Analyzer::new().analyze(source)
}

/// The reconstructor covers expression statements built from `+`, `*`,
/// parentheses, identifiers and numeric literals only
fn reconstructible(tree: &DerivationNode) -> bool {
    let expression_statement = matches!(tree.kind, NodeKind::Statement)
        && tree
            .children
            .first()
            .is_some_and(|c| matches!(c.kind, NodeKind::Expression));

    expression_statement && numeric_only(tree)
}

fn numeric_only(node: &DerivationNode) -> bool {
    match &node.kind {
        NodeKind::Leaf(Leaf::Str | Leaf::Bool) => false,
        _ => node.children.iter().all(numeric_only),
    }
}
