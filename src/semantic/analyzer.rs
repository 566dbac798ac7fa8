use crate::lexer::VarType;
use crate::parser::{DerivationNode, Leaf, NodeKind};
use crate::semantic::{SemanticError, SymbolTable};

/// Type computed for an expression subtree
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExprType {
    Of(VarType),
    /// Single reference to a variable that was never declared;
    /// compatibility checks treat this permissively
    Undeclared,
    /// No typed operands found
    Unknown,
    /// An operator was applied to an incompatible operand pair
    Invalid,
}

/// One collected expression operand
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Operand {
    Typed(VarType),
    Undeclared,
}

impl Operand {
    fn long_name(self) -> &'static str {
        match self {
            Operand::Typed(t) => t.long_name(),
            Operand::Undeclared => "undeclared",
        }
    }
}

/// Walks a finished derivation tree and produces the ordered semantic
/// error list. Runs after parsing; errors come out in source order, with
/// a declaration's initializer checked before the name is declared.
pub struct SemanticAnalyzer<'t> {
    table: &'t mut SymbolTable,
    errors: Vec<SemanticError>,
}

impl<'t> SemanticAnalyzer<'t> {
    #[must_use]
    pub fn new(table: &'t mut SymbolTable) -> Self {
        Self {
            table,
            errors: Vec::new(),
        }
    }

    /// Check a statement tree and return every semantic error in source
    /// order, including the not-declared class the caller may filter.
    pub fn check(mut self, tree: &DerivationNode) -> Vec<SemanticError> {
        self.walk(tree);
        self.errors
    }

    fn walk(&mut self, node: &DerivationNode) {
        match &node.kind {
            NodeKind::Declaration => self.check_declaration(node),
            NodeKind::Leaf(Leaf::Ident { name, .. }) => {
                if let Some(err) = self.check_variable(name) {
                    self.errors.push(err);
                }
            }
            _ => {
                for child in &node.children {
                    self.walk(child);
                }
            }
        }
    }

    /// Verify an identifier reference was declared. The resulting error
    /// class is filtered from reported results — use-before-declaration
    /// is permitted — but is computed to support later checks.
    #[must_use]
    pub fn check_variable(&self, name: &str) -> Option<SemanticError> {
        if self.table.lookup(name).is_none() {
            Some(SemanticError::NotDeclared(name.to_string()))
        } else {
            None
        }
    }

    fn check_declaration(&mut self, node: &DerivationNode) {
        let mut var_type = None;
        let mut declared = None;
        let mut initializer = None;

        for child in &node.children {
            match &child.kind {
                NodeKind::Leaf(Leaf::Type(t)) => var_type = Some(*t),
                NodeKind::Leaf(Leaf::Ident { name, line }) => {
                    declared = Some((name.clone(), *line));
                }
                NodeKind::Expression => initializer = Some(child),
                _ => {}
            }
        }

        let (Some(var_type), Some((name, line))) = (var_type, declared) else {
            return;
        };

        // Identifier references inside the initializer are checked
        // before the name is declared
        if let Some(expr) = initializer {
            self.walk(expr);
        }

        if let Err(err) = self.table.declare(&name, var_type, line) {
            self.errors.push(err);
            return;
        }

        if let Some(expr) = initializer {
            if let Some(err) = self.check_compatibility(var_type, expr, &name) {
                self.errors.push(err);
            } else {
                self.table.mark_initialized(&name);
            }
        }
    }

    /// Compute the type of an expression subtree: collect every operand
    /// and `+`/`*` operator in left-to-right order, then fold with the
    /// validity table and the promotion rule.
    #[must_use]
    pub fn expression_type(&self, expr: &DerivationNode) -> ExprType {
        let (operands, operators) = self.collect_atoms(expr);
        Self::classify(&operands, &operators)
    }

    /// Assignment compatibility requires an exact type match; unknown
    /// and undeclared expression types are deferred to the reference
    /// checks instead of reported here.
    pub fn check_compatibility(
        &self,
        declared: VarType,
        expr: &DerivationNode,
        name: &str,
    ) -> Option<SemanticError> {
        let (operands, operators) = self.collect_atoms(expr);

        match Self::classify(&operands, &operators) {
            ExprType::Unknown | ExprType::Undeclared => None,
            ExprType::Invalid => Some(Self::invalid_operation(name, &operands, &operators)),
            ExprType::Of(found) if found == declared => None,
            ExprType::Of(found) => Some(SemanticError::TypeMismatch(
                name.to_string(),
                found.long_name(),
                declared.long_name(),
            )),
        }
    }

    /// The invalid-operation message names the first collected operand
    /// pair and operator
    fn invalid_operation(
        name: &str,
        operands: &[Operand],
        operators: &[char],
    ) -> SemanticError {
        match (operands.first(), operands.get(1), operators.first()) {
            (Some(left), Some(right), Some(op)) => SemanticError::InvalidOperation(
                name.to_string(),
                *op,
                left.long_name(),
                right.long_name(),
            ),
            _ => SemanticError::ExpressionMismatch(name.to_string()),
        }
    }

    fn collect_atoms(&self, node: &DerivationNode) -> (Vec<Operand>, Vec<char>) {
        let mut operands = Vec::new();
        let mut operators = Vec::new();
        self.collect_into(node, &mut operands, &mut operators);
        (operands, operators)
    }

    fn collect_into(
        &self,
        node: &DerivationNode,
        operands: &mut Vec<Operand>,
        operators: &mut Vec<char>,
    ) {
        match &node.kind {
            NodeKind::Leaf(leaf) => match leaf {
                Leaf::Plus => operators.push('+'),
                Leaf::Star => operators.push('*'),
                Leaf::Number => operands.push(Operand::Typed(VarType::Int)),
                Leaf::Decimal => operands.push(Operand::Typed(VarType::Double)),
                Leaf::Str => operands.push(Operand::Typed(VarType::String)),
                Leaf::Bool => operands.push(Operand::Typed(VarType::Bool)),
                Leaf::Ident { name, .. } => match self.table.lookup(name) {
                    Some(entry) => operands.push(Operand::Typed(entry.var_type)),
                    None => operands.push(Operand::Undeclared),
                },
                Leaf::Type(_) | Leaf::Punct => {}
            },
            _ => {
                for child in &node.children {
                    self.collect_into(child, operands, operators);
                }
            }
        }
    }

    fn classify(operands: &[Operand], operators: &[char]) -> ExprType {
        match operands {
            [] => ExprType::Unknown,
            [Operand::Typed(t)] => ExprType::Of(*t),
            [Operand::Undeclared] => ExprType::Undeclared,
            _ => Self::fold(operands, operators),
        }
    }

    /// Left-to-right fold: the running type is checked against each
    /// subsequent operand; the first invalid combination collapses the
    /// whole expression to Invalid.
    fn fold(operands: &[Operand], operators: &[char]) -> ExprType {
        let Some((&first, rest)) = operands.split_first() else {
            return ExprType::Unknown;
        };

        let mut acc = first;
        for (&op, &rhs) in operators.iter().zip(rest) {
            if !Self::operation_valid(acc, op, rhs) {
                return ExprType::Invalid;
            }
            acc = Self::promote(acc, rhs);
        }

        match acc {
            Operand::Typed(t) => ExprType::Of(t),
            Operand::Undeclared => ExprType::Undeclared,
        }
    }

    fn operation_valid(left: Operand, op: char, right: Operand) -> bool {
        use crate::lexer::VarType::{Double, Int, String};

        let (Operand::Typed(l), Operand::Typed(r)) = (left, right) else {
            return false;
        };

        matches!(
            (l, op, r),
            (Int, '+', Int)
                | (Int, '*', Int)
                | (Double, '+', Double)
                | (Double, '*', Double)
                | (Double, '+', Int)
                | (Int, '+', Double)
                | (Double, '*', Int)
                | (Int, '*', Double)
                | (String, '+', String)
        )
    }

    /// double wins over everything, string over the rest, otherwise the
    /// left operand's type carries through
    fn promote(left: Operand, right: Operand) -> Operand {
        match (left, right) {
            (Operand::Typed(VarType::Double), _) | (_, Operand::Typed(VarType::Double)) => {
                Operand::Typed(VarType::Double)
            }
            (Operand::Typed(VarType::String), _) | (_, Operand::Typed(VarType::String)) => {
                Operand::Typed(VarType::String)
            }
            _ => left,
        }
    }
}
