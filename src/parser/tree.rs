use crate::lexer::VarType;
use serde::Serialize;

/// Terminal payloads carried by leaf nodes. The semantic pass matches on
/// these instead of re-parsing production strings.
#[derive(Debug, Clone, PartialEq)]
pub enum Leaf {
    Type(VarType),
    Ident { name: String, line: usize },
    Number,
    Decimal,
    Str,
    Bool,
    Plus,
    Star,
    /// Assignment, parentheses, keywords and comparison operators:
    /// structural terminals with no semantic payload
    Punct,
}

/// Grammar symbol a node was produced from
#[derive(Debug, Clone, PartialEq)]
pub enum NodeKind {
    Statement,
    Declaration,
    Expression,
    ExpressionPrime,
    Term,
    TermPrime,
    Factor,
    Condition,
    IfStatement,
    WhileStatement,
    Leaf(Leaf),
}

/// One grammar production application. Children are owned outright; the
/// tree has no cycles or shared nodes.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DerivationNode {
    #[serde(skip)]
    pub kind: NodeKind,
    /// Grammar symbol, e.g. `statement` or `ID(x)` for leaves
    pub label: String,
    /// The exact rule applied, with literal token values embedded,
    /// e.g. `declaration → INT ID ASSIGN expression` or `NUMBER → 5`
    pub production: String,
    pub children: Vec<DerivationNode>,
}

impl DerivationNode {
    #[must_use]
    pub fn new(kind: NodeKind, label: impl Into<String>, production: impl Into<String>) -> Self {
        Self {
            kind,
            label: label.into(),
            production: production.into(),
            children: Vec::new(),
        }
    }

    #[must_use]
    pub fn leaf(leaf: Leaf, label: impl Into<String>, production: impl Into<String>) -> Self {
        Self::new(NodeKind::Leaf(leaf), label, production)
    }

    pub fn push(&mut self, child: DerivationNode) {
        self.children.push(child);
    }

    /// Pre-order list of every production applied in this subtree
    #[must_use]
    pub fn productions(&self) -> Vec<String> {
        let mut out = Vec::new();
        self.collect_productions(&mut out);
        out
    }

    fn collect_productions(&self, out: &mut Vec<String>) {
        out.push(self.production.clone());
        for child in &self.children {
            child.collect_productions(out);
        }
    }

    /// Render the tree with box-drawing connectors for terminal display
    #[must_use]
    pub fn render(&self) -> String {
        let mut out = String::new();
        out.push_str(&self.production);
        out.push('\n');
        self.render_children("", &mut out);
        out
    }

    fn render_children(&self, prefix: &str, out: &mut String) {
        let count = self.children.len();
        for (i, child) in self.children.iter().enumerate() {
            let last = i + 1 == count;
            out.push_str(prefix);
            out.push_str(if last { "└── " } else { "├── " });
            out.push_str(&child.production);
            out.push('\n');

            let child_prefix = format!("{}{}", prefix, if last { "    " } else { "│   " });
            child.render_children(&child_prefix, out);
        }
    }
}
