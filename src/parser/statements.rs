use crate::lexer::{Keyword, TokenKind, VarType};
use crate::parser::expressions::Parser;
use crate::parser::{DerivationNode, Leaf, NodeKind, ParseError};

impl Parser {
    /// Parse one complete statement. Anything left over after the
    /// statement is a syntax error.
    pub fn parse(&mut self) -> Result<DerivationNode, ParseError> {
        let statement = self.parse_statement()?;

        if let Some(tok) = self.peek() {
            return Err(ParseError::TrailingInput(tok.lexeme.clone(), tok.offset));
        }

        Ok(statement)
    }

    /// statement → declaration | expression | if_statement | while_statement
    fn parse_statement(&mut self) -> Result<DerivationNode, ParseError> {
        let first = match self.peek() {
            Some(tok) => tok.kind.clone(),
            None => return Err(ParseError::UnexpectedEnd),
        };

        let (child, alternative) = match first {
            TokenKind::TypeName(var_type) => (self.parse_declaration(var_type)?, "declaration"),
            TokenKind::Keyword(Keyword::If) => (self.parse_if_statement()?, "if_statement"),
            TokenKind::Keyword(Keyword::While) => {
                (self.parse_while_statement()?, "while_statement")
            }
            _ => (self.parse_expression()?, "expression"),
        };

        let mut node = DerivationNode::new(
            NodeKind::Statement,
            "statement",
            format!("statement → {}", alternative),
        );
        node.push(child);
        Ok(node)
    }

    /// declaration → (INT|DOUBLE|STRING_TYPE|BOOL_TYPE) ID [ASSIGN expression]
    ///
    /// One rule parametrized over the type tag; the recorded production
    /// still names the per-type terminal.
    fn parse_declaration(&mut self, var_type: VarType) -> Result<DerivationNode, ParseError> {
        self.advance(); // type name, already inspected by the dispatcher

        let id_token = self.expect(
            &TokenKind::Identifier(String::new()),
            "identifier",
        )?;
        let name = id_token.lexeme.clone();

        let type_leaf = DerivationNode::leaf(
            Leaf::Type(var_type),
            var_type.terminal(),
            format!("{} → {}", var_type.terminal(), var_type),
        );
        let id_leaf = DerivationNode::leaf(
            Leaf::Ident {
                name: name.clone(),
                line: id_token.line,
            },
            format!("ID({})", name),
            format!("ID → {}", name),
        );

        if self.check(&TokenKind::Assign) {
            self.advance();
            let mut node = DerivationNode::new(
                NodeKind::Declaration,
                "declaration",
                format!("declaration → {} ID ASSIGN expression", var_type.terminal()),
            );
            node.push(type_leaf);
            node.push(id_leaf);
            node.push(DerivationNode::leaf(Leaf::Punct, "ASSIGN", "ASSIGN → ="));
            node.push(self.parse_expression()?);
            Ok(node)
        } else {
            let mut node = DerivationNode::new(
                NodeKind::Declaration,
                "declaration",
                format!("declaration → {} ID", var_type.terminal()),
            );
            node.push(type_leaf);
            node.push(id_leaf);
            Ok(node)
        }
    }

    /// if_statement → IF LPAREN condition RPAREN
    fn parse_if_statement(&mut self) -> Result<DerivationNode, ParseError> {
        self.advance(); // 'if'
        self.expect(&TokenKind::OpenParen, "'('")?;
        let condition = self.parse_condition()?;
        self.expect(&TokenKind::CloseParen, "')'")?;

        let mut node = DerivationNode::new(
            NodeKind::IfStatement,
            "if_statement",
            "if_statement → IF LPAREN condition RPAREN",
        );
        node.push(DerivationNode::leaf(Leaf::Punct, "IF", "IF → if"));
        node.push(DerivationNode::leaf(Leaf::Punct, "LPAREN", "LPAREN → ("));
        node.push(condition);
        node.push(DerivationNode::leaf(Leaf::Punct, "RPAREN", "RPAREN → )"));
        Ok(node)
    }

    /// while_statement → WHILE LPAREN condition RPAREN
    fn parse_while_statement(&mut self) -> Result<DerivationNode, ParseError> {
        self.advance(); // 'while'
        self.expect(&TokenKind::OpenParen, "'('")?;
        let condition = self.parse_condition()?;
        self.expect(&TokenKind::CloseParen, "')'")?;

        let mut node = DerivationNode::new(
            NodeKind::WhileStatement,
            "while_statement",
            "while_statement → WHILE LPAREN condition RPAREN",
        );
        node.push(DerivationNode::leaf(Leaf::Punct, "WHILE", "WHILE → while"));
        node.push(DerivationNode::leaf(Leaf::Punct, "LPAREN", "LPAREN → ("));
        node.push(condition);
        node.push(DerivationNode::leaf(Leaf::Punct, "RPAREN", "RPAREN → )"));
        Ok(node)
    }
}
