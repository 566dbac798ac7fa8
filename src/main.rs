use anyhow::{bail, Result};
use clap::{Parser as ClapParser, Subcommand};
use minilang::analysis::{analyze, Status};
use minilang::lexer::tokenize;
use minilang::parser::Parser;
use serde_json::json;

#[derive(ClapParser)]
#[command(name = "minilang")]
#[command(about = "Front end for a small statement language", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Tokenize a statement and print the classified tokens
    Lex {
        /// Statement to tokenize, e.g. "int x = 5"
        statement: String,
    },
    /// Parse a statement and print its derivation tree
    Parse {
        /// Statement to parse
        statement: String,
    },
    /// Run lexical, syntax and semantic analysis and print a report
    Analyze {
        /// Statement to analyze
        statement: String,

        /// Emit the machine-readable JSON envelope instead of the report
        #[arg(long)]
        json: bool,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Lex { statement } => lex_statement(&statement),
        Commands::Parse { statement } => parse_statement(&statement),
        Commands::Analyze { statement, json } => analyze_statement(&statement, json),
    }
}

fn trimmed(statement: &str) -> Result<&str> {
    let statement = statement.trim();
    if statement.is_empty() {
        bail!("statement is empty");
    }
    Ok(statement)
}

fn lex_statement(statement: &str) -> Result<()> {
    let statement = trimmed(statement)?;
    let output = tokenize(statement);

    println!(
        "{:<15} {:<12} {:<12} {:<10}",
        "Lexeme", "Token Type", "Category", "Position"
    );
    for token in &output.tokens {
        println!(
            "{:<15} {:<12} {:<12} {:<10}",
            token.lexeme,
            token.kind.type_name(),
            token.kind.category().to_string(),
            token.offset
        );
    }

    for error in &output.errors {
        eprintln!("Lexical error: {error}");
    }

    println!("\nTotal tokens: {}", output.tokens.len());
    Ok(())
}

fn parse_statement(statement: &str) -> Result<()> {
    let statement = trimmed(statement)?;
    let output = tokenize(statement);

    for error in &output.errors {
        eprintln!("Lexical error: {error}");
    }

    let mut parser = Parser::new(output.tokens);
    let tree = parser.parse()?;

    println!("Derivation tree:");
    print!("{}", tree.render());

    println!("\nProductions:");
    for production in tree.productions() {
        println!("  {production}");
    }

    Ok(())
}

fn analyze_statement(statement: &str, json: bool) -> Result<()> {
    let statement = trimmed(statement)?;
    let result = analyze(statement);

    if json {
        let accepted = matches!(result.status, Status::Success | Status::SemanticError);
        let bnf_steps: Vec<_> = result
            .bnf_derivation
            .as_deref()
            .unwrap_or_default()
            .iter()
            .enumerate()
            .map(|(i, rule)| json!({ "step": i + 1, "rule": rule }))
            .collect();

        let envelope = json!({
            "input_expression": statement,
            "status": if result.status == Status::Success { "success" } else { "error" },
            "result_type": result.status,
            "lexical_analysis": {
                "tokens": result.token_records(),
                "errors": result.lexical_errors.iter().map(ToString::to_string).collect::<Vec<_>>(),
            },
            "syntax_analysis": {
                "accepted": accepted,
                "derivation": result.productions(),
                "bnf_derivation": bnf_steps,
            },
            "semantic_analysis": {
                "errors": result.semantic_errors.iter().map(ToString::to_string).collect::<Vec<_>>(),
                "variables_declared": result.symbols,
            },
        });

        println!("{}", serde_json::to_string_pretty(&envelope)?);
        return Ok(());
    }

    for error in &result.lexical_errors {
        println!("Lexical error: {error}");
    }

    match result.status {
        Status::Success => {
            println!("Accepted: statement is syntactically and semantically correct");
        }
        Status::SyntaxError => {
            println!("Rejected: syntax error");
            if let Some(error) = &result.syntax_error {
                println!("  {error}");
            }
        }
        Status::SemanticError => {
            println!("Rejected: semantic errors found");
            for error in &result.semantic_errors {
                println!("  {error}");
            }
        }
    }

    if let Some(tree) = &result.tree {
        println!("\nDerivation tree:");
        print!("{}", tree.render());
    }

    if let Some(steps) = &result.bnf_derivation {
        println!("\nBNF derivation:");
        for step in steps {
            println!("  {step}");
        }
    }

    if !result.symbols.is_empty() {
        println!("\nVariables:");
        for entry in result.symbols.values() {
            println!(
                "  {} : {} (line {}, {})",
                entry.name,
                entry.var_type,
                entry.line,
                if entry.initialized {
                    "initialized"
                } else {
                    "uninitialized"
                }
            );
        }
    }

    Ok(())
}
