//! Generate error code documentation from the source of truth (error enums).
//!
//! This binary reads the error codes, descriptions, details, and help text
//! directly from the `ParseError` and `SolverError` implementations via their
//! `code()`, `description()`, `details()`, and `help()` methods.
//!
//! Run with:
//! ```bash
//! cargo run --bin generate_error_docs > docs/ERROR_CODES.md
//! ```

use wordplay::errors::ParseError;
use wordplay::solver::SolverError;

/// Macro to generate error documentation for any error type
/// with `code()`, `description()`, `details()`, `help()`, and `display_detailed()` methods
macro_rules! generate_error_docs {
    ($errors:expr) => {
        for error in $errors {
            println!("### {}: {}\n", error.code(), error.description());
            println!("**Details:** {}\n", error.details());

            if let Some(help_text) = error.help() {
                println!("**How to fix:**");
                println!("```");
                println!("{help_text}");
                println!("```\n");
            }

            println!("**Example error message:**");
            println!("```");
            println!("{error}");
            println!("```\n");

            println!("**Detailed format:**");
            println!("```");
            println!("{}", error.display_detailed());
            println!("```\n");

            println!("---\n");
        }
    };
}

/// Helper to create all `ParseError` variants for documentation
fn all_parse_error_variants() -> Vec<ParseError> {
    let mut variants = vec![ParseError::ParseFailure { s: "Illegal char: '1'".to_string() }];
    // RegexError--create by attempting to compile an invalid regex
    if let Err(e) = fancy_regex::Regex::new("(?P<invalid") {
        variants.push(ParseError::RegexError(e));
    }
    variants.extend([
        ParseError::EmptyPattern,
        ParseError::InvalidInput { str: "c!t".to_string(), reason: "illegal character '!' in pattern".to_string() },
        ParseError::InvalidCharsetRange('z', 'a'),
        ParseError::DanglingCharsetDash,
        ParseError::EmptyCharset { charset: "[^a-z]".to_string() },
        ParseError::InvalidLowercaseChar { invalid_char: 'X' },
        ParseError::InvalidLetters { letters: "ab1".to_string(), invalid_char: '1' },
        ParseError::InvalidFragment { fragment: "st-".to_string(), invalid_char: '-' },
        ParseError::BlanksNotAllowed { letters: "abc.".to_string() },
    ]);
    // ParseIntError--create by parsing invalid integer
    if let Err(e) = "not_a_number".parse::<u64>() {
        variants.push(ParseError::ParseIntError(e));
    }
    variants.extend([
        ParseError::InvalidCountLine { line: "apple".to_string() },
        ParseError::DuplicateWord { word: "apple".to_string() },
        ParseError::CountOverflow,
        ParseError::MalformedEquation { equation: "SEND + MORE".to_string(), reason: "missing '='".to_string() },
        ParseError::InvalidBase { base: 40 },
        // NomError--use a common error kind
        ParseError::NomError(nom::error::ErrorKind::Tag),
    ]);
    variants
}

/// Helper to create all `SolverError` variants for documentation
fn all_solver_error_variants() -> Vec<SolverError> {
    vec![
        SolverError::ParseFailure(Box::new(ParseError::MalformedEquation {
            equation: "SEND + MORE".to_string(),
            reason: "missing '='".to_string(),
        })),
        SolverError::UnknownVariable { name: 'Q' },
        SolverError::DuplicateVariable { name: 'A' },
        SolverError::EmptyDomain { name: 'A' },
        SolverError::TooManyLetters { letters: 11, base: 10 },
        SolverError::CoefficientOverflow { context: "place 19 of AAAAAAAAAAAAAAAAAAAA".to_string() },
        SolverError::NoVariables,
    ]
}

fn main() {
    println!("# Error Code Reference\n");
    println!("**⚠️ This document is auto-generated from the source code. Do not edit manually.**\n");

    println!("## Table of Contents\n");
    println!("- [Solver Errors (S001–S007)](#solver-errors)");
    println!("- [Parse Errors (E001–E018)](#parse-errors)");
    println!("- [How to Use Error Codes](#how-to-use-error-codes)\n");

    generate_solver_error_docs();
    generate_parse_error_docs();

    println!("\n## How to Use Error Codes\n");
    println!("When you see an error like:\n");
    println!("```");
    println!("Error: Empty pattern string (E003)");
    println!("Example: Use 'c.t' or 'A*A' instead of an empty string");
    println!("```\n");
    println!("1. Note the error code (e.g., `E003`)");
    println!("2. Look it up in this document for detailed explanation");
    println!("3. Follow the suggested resolution steps\n");

    println!("## Error Display Formats\n");
    println!("Errors are displayed in two formats:\n");
    println!("### Simple Format");
    println!("```");
    println!("Error: <message>");
    println!("```\n");
    println!("### Detailed Format (via `display_detailed()`)");
    println!("```");
    println!("<message> (<code>)");
    println!("<help text if available>");
    println!("```\n");
}

fn generate_solver_error_docs() {
    println!("## Solver Errors\n");
    println!("Errors from building or solving constraint problems. These wrap lower-level parse errors or indicate solver-specific issues.\n");
    generate_error_docs!(all_solver_error_variants());
}

fn generate_parse_error_docs() {
    println!("## Parse Errors\n");
    println!("Errors that occur when parsing patterns, letter bags, fragments, word lists, or cryptarithms.\n");
    generate_error_docs!(all_parse_error_variants());
}
