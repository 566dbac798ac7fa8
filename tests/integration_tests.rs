use minilang::analysis::{analyze, Analyzer, Status};
use minilang::bnf::{derive_sequence, ReconstructError};
use minilang::lexer::{tokenize, LexicalError, TokenCategory};
use minilang::parser::{DerivationNode, Parser};
use minilang::semantic::{ExprType, SemanticAnalyzer, SemanticError, SymbolTable};

/// Helper to parse a statement into its derivation tree
fn parse_tree(source: &str) -> DerivationNode {
    let output = tokenize(source);
    assert!(output.errors.is_empty(), "unexpected lexical errors in {source:?}");
    let mut parser = Parser::new(output.tokens);
    parser.parse().expect("statement should parse")
}

#[test]
fn int_declaration_succeeds() {
    let result = analyze("int x = 5");
    assert_eq!(result.status, Status::Success);
    assert!(result.semantic_errors.is_empty());

    let entry = result.symbols.get("x").expect("x should be declared");
    assert_eq!(entry.line, 1);
    assert!(entry.initialized);
}

#[test]
fn reset_clears_declarations_between_analyses() {
    let mut analyzer = Analyzer::new();

    assert_eq!(analyzer.analyze("int x = 5").status, Status::Success);
    analyzer.reset();
    assert_eq!(analyzer.analyze("int x = 5").status, Status::Success);
}

#[test]
fn redeclaration_without_reset_is_a_semantic_error() {
    let mut analyzer = Analyzer::new();

    assert_eq!(analyzer.analyze("int x = 5").status, Status::Success);

    let second = analyzer.analyze("int x = 6");
    assert_eq!(second.status, Status::SemanticError);
    assert_eq!(
        second.semantic_errors,
        vec![SemanticError::Redeclaration("x".to_string(), 1)]
    );
    assert!(second.semantic_errors[0]
        .to_string()
        .contains("already declared"));
}

#[test]
fn fresh_instances_never_observe_each_other() {
    assert_eq!(analyze("int x = 5").status, Status::Success);
    assert_eq!(analyze("int x = 5").status, Status::Success);
}

#[test]
fn decimal_into_int_declaration_is_a_mismatch() {
    let result = analyze("int x = 3.14");
    assert_eq!(result.status, Status::SemanticError);
    assert_eq!(
        result.semantic_errors,
        vec![SemanticError::TypeMismatch(
            "x".to_string(),
            "decimal",
            "integer"
        )]
    );
}

#[test]
fn int_literal_into_double_declaration_is_a_mismatch() {
    // Declaration compatibility requires an exact type match even
    // though int/double mix freely inside expressions
    let result = analyze("double pi = 3");
    assert_eq!(result.status, Status::SemanticError);
    assert_eq!(
        result.semantic_errors,
        vec![SemanticError::TypeMismatch(
            "pi".to_string(),
            "integer",
            "decimal"
        )]
    );
}

#[test]
fn string_concatenation_declaration_succeeds() {
    let result = analyze("string s = \"a\" + \"b\"");
    assert_eq!(result.status, Status::Success);
    assert!(result.symbols.get("s").is_some_and(|e| e.initialized));
}

#[test]
fn bool_declaration_succeeds() {
    let result = analyze("bool b = true");
    assert_eq!(result.status, Status::Success);
    assert!(result.symbols.get("b").is_some_and(|e| e.initialized));
}

#[test]
fn declaration_without_initializer_stays_uninitialized() {
    let result = analyze("int x");
    assert_eq!(result.status, Status::Success);

    let entry = result.symbols.get("x").expect("x should be declared");
    assert!(!entry.initialized);
}

#[test]
fn int_plus_string_is_an_invalid_operation() {
    let result = analyze("int x = 3 + \"a\"");
    assert_eq!(result.status, Status::SemanticError);
    assert_eq!(
        result.semantic_errors,
        vec![SemanticError::InvalidOperation(
            "x".to_string(),
            '+',
            "integer",
            "string"
        )]
    );
}

#[test]
fn bool_operand_in_arithmetic_is_an_invalid_operation() {
    let result = analyze("int x = true + 1");
    assert_eq!(result.status, Status::SemanticError);
    assert_eq!(
        result.semantic_errors,
        vec![SemanticError::InvalidOperation(
            "x".to_string(),
            '+',
            "boolean",
            "integer"
        )]
    );
}

#[test]
fn expression_type_collapses_on_invalid_combination() {
    let tree = parse_tree("3 + \"a\"");
    let expression = &tree.children[0];

    let mut table = SymbolTable::new();
    let analyzer = SemanticAnalyzer::new(&mut table);
    assert_eq!(analyzer.expression_type(expression), ExprType::Invalid);
}

#[test]
fn expression_type_promotes_int_and_double() {
    let tree = parse_tree("1 + 2.5 * 3");
    let expression = &tree.children[0];

    let mut table = SymbolTable::new();
    let analyzer = SemanticAnalyzer::new(&mut table);
    assert_eq!(
        analyzer.expression_type(expression),
        ExprType::Of(minilang::lexer::VarType::Double)
    );
}

#[test]
fn promotion_inside_expression_still_requires_exact_declared_type() {
    assert_eq!(analyze("double d = 3.14 + 2").status, Status::Success);
    assert_eq!(analyze("int x = 1 + 2.5").status, Status::SemanticError);
}

#[test]
fn use_before_declaration_is_permitted() {
    let result = analyze("y + 1");
    assert_eq!(result.status, Status::Success);
    assert!(result.semantic_errors.is_empty());
}

#[test]
fn self_referencing_initializer_succeeds() {
    // The initializer's reference check runs before the declaration, so
    // the undeclared reference is filtered and the type resolves to int
    let result = analyze("int x = x");
    assert_eq!(result.status, Status::Success);
    assert!(result.symbols.get("x").is_some_and(|e| e.initialized));
}

#[test]
fn missing_identifier_is_a_syntax_error() {
    let result = analyze("int = 5");
    assert_eq!(result.status, Status::SyntaxError);
    assert!(result.tree.is_none());
    assert!(result.syntax_error.is_some());
    assert!(result.semantic_errors.is_empty());
}

#[test]
fn trailing_input_is_a_syntax_error() {
    let result = analyze("x + 1)");
    assert_eq!(result.status, Status::SyntaxError);
    assert!(result.tree.is_none());
}

#[test]
fn reserved_word_statement_is_a_syntax_error() {
    assert_eq!(analyze("return 5").status, Status::SyntaxError);
}

#[test]
fn condition_requires_a_comparison_operator() {
    assert_eq!(analyze("if(x 9)").status, Status::SyntaxError);
}

#[test]
fn if_and_while_statements_parse() {
    let result = analyze("if(x > 9)");
    assert_eq!(result.status, Status::Success);

    let productions = result.productions();
    assert!(productions.contains(&"if_statement → IF LPAREN condition RPAREN".to_string()));
    assert!(productions.contains(&"condition → expression GT expression".to_string()));
    assert!(result.bnf_derivation.is_none());

    assert_eq!(analyze("while(i < 7)").status, Status::Success);
}

#[test]
fn illegal_character_is_skipped_and_reported() {
    let result = analyze("int x @ = 5");
    assert_eq!(result.status, Status::Success);
    assert_eq!(
        result.lexical_errors,
        vec![LexicalError::IllegalChar('@', 6)]
    );
    assert!(result.symbols.contains_key("x"));
}

#[test]
fn token_records_classify_a_declaration() {
    let result = analyze("int x = 5");
    let records = result.token_records();

    let lexemes: Vec<&str> = records.iter().map(|r| r.lexeme.as_str()).collect();
    assert_eq!(lexemes, ["int", "x", "=", "5"]);

    let types: Vec<&str> = records.iter().map(|r| r.token_type.as_str()).collect();
    assert_eq!(types, ["int", "identifier", "=", "integer"]);

    let categories: Vec<TokenCategory> = records.iter().map(|r| r.category).collect();
    assert_eq!(
        categories,
        [
            TokenCategory::Keywords,
            TokenCategory::Identifier,
            TokenCategory::Operator,
            TokenCategory::Literal
        ]
    );
}

#[test]
fn declaration_records_its_full_production_sequence() {
    let result = analyze("int x = 5");
    assert_eq!(
        result.productions(),
        vec![
            "statement → declaration",
            "declaration → INT ID ASSIGN expression",
            "INT → int",
            "ID → x",
            "ASSIGN → =",
            "expression → term expression_prime",
            "term → factor term_prime",
            "factor → NUMBER",
            "NUMBER → 5",
            "term_prime → ε",
            "expression_prime → ε",
        ]
    );
}

#[test]
fn bnf_derivation_binds_multiplication_inside_addition() {
    let result = analyze("a+b*c");
    assert_eq!(result.status, Status::Success);
    assert_eq!(
        result.bnf_derivation,
        Some(vec![
            "<expression> ::= <expression> + <term>".to_string(),
            "<expression> ::= <term>".to_string(),
            "<term> ::= <factor>".to_string(),
            "<factor> ::= a".to_string(),
            "<term> ::= <term> * <factor>".to_string(),
            "<term> ::= <factor>".to_string(),
            "<factor> ::= b".to_string(),
            "<factor> ::= c".to_string(),
        ])
    );
}

#[test]
fn bnf_derivation_recurses_into_parentheses() {
    let steps = derive_sequence("(a+b)*c").expect("expression should reconstruct");
    assert_eq!(
        steps,
        vec![
            "<expression> ::= <term>",
            "<term> ::= <term> * <factor>",
            "<term> ::= <factor>",
            "<factor> ::= ( <expression> )",
            "<expression> ::= <expression> + <term>",
            "<expression> ::= <term>",
            "<term> ::= <factor>",
            "<factor> ::= a",
            "<term> ::= <factor>",
            "<factor> ::= b",
            "<factor> ::= c",
        ]
    );
}

#[test]
fn bnf_derivation_is_reserved_for_plain_expressions() {
    // Declarations and string/bool expressions are outside the
    // reconstructor's domain
    assert!(analyze("int x = 5").bnf_derivation.is_none());
    assert!(analyze("\"a\" + \"b\"").bnf_derivation.is_none());
    assert!(analyze("y + 1").bnf_derivation.is_some());
}

#[test]
fn reconstructor_rejects_malformed_text() {
    assert_eq!(derive_sequence(""), Err(ReconstructError::Empty));
    assert!(matches!(
        derive_sequence("(a))"),
        Err(ReconstructError::UnbalancedParens(_))
    ));
    assert!(matches!(
        derive_sequence("a+"),
        Err(ReconstructError::InvalidFactor(_))
    ));
    assert!(matches!(
        derive_sequence("(a)(b)"),
        Err(ReconstructError::InvalidFactor(_))
    ));
}

#[test]
fn syntax_errors_take_priority_over_semantic_errors() {
    let mut analyzer = Analyzer::new();
    assert_eq!(analyzer.analyze("int x = 5").status, Status::Success);

    // Redeclaration and trailing garbage together: syntax wins and no
    // semantic results are exposed
    let result = analyzer.analyze("int x = 6 )");
    assert_eq!(result.status, Status::SyntaxError);
    assert!(result.semantic_errors.is_empty());
}

#[test]
fn semantic_errors_still_expose_the_tree() {
    let result = analyze("int x = 3.14");
    assert_eq!(result.status, Status::SemanticError);
    assert!(result.tree.is_some());
}
