//! Finite-domain constraint solving, with cryptarithms as the main client.
//!
//! # Error Handling
//!
//! The solver uses [`SolverError`]:
//!
//! - S001: `ParseFailure` (Input parsing failed (wraps [`ParseError`]))
//! - S002: `UnknownVariable` (A constraint names an undeclared variable)
//! - S003: `DuplicateVariable` (A variable is declared twice)
//! - S004: `EmptyDomain` (A variable has no possible value)
//! - S005: `TooManyLetters` (More distinct letters than digits in the base)
//! - S006: `CoefficientOverflow` (A coefficient does not fit in 64 bits)
//! - S007: `NoVariables` (The problem has nothing to solve)
//!
//! Each error has a `code()`, optional `help()`, and `display_detailed()` method.
//!
//! ```
//! use wordplay::solver::{Cryptarithm, SolverError};
//!
//! let puzzle: Cryptarithm = "ABCDEFGHIJK = K".parse().unwrap();
//! match puzzle.to_problem() {
//!     Ok(_) => unreachable!(),
//!     Err(e) => {
//!         assert_eq!(e.code(), "S005");
//!         eprintln!("{}", e.display_detailed());
//!     }
//! }
//! ```

use crate::errors::ParseError;

pub mod cryptarithm;
pub mod problem;
pub mod search;

pub use cryptarithm::{complete_from_word_list, Completion, CompletionResult, Cryptarithm};
pub use problem::{Assignment, Constraint, ConstraintProblem, Domain};
pub use search::{solve, SolveResult};

/// Unified error type for building and solving constraint problems.
#[derive(Debug, thiserror::Error)]
pub enum SolverError {
    /// Failure while parsing the input (a cryptarithm or its words).
    ///
    /// These originate from the parser (`ParseError`), which we box to keep the
    /// error type size stable.
    #[error("parse failure: {0}")]
    ParseFailure(#[from] Box<ParseError>),

    #[error("unknown variable '{name}'")]
    UnknownVariable { name: char },

    #[error("variable '{name}' declared twice")]
    DuplicateVariable { name: char },

    #[error("variable '{name}' has an empty domain")]
    EmptyDomain { name: char },

    #[error("{letters} distinct letters but only {base} digits in base {base}")]
    TooManyLetters { letters: usize, base: u32 },

    #[error("coefficient overflow: {context}")]
    CoefficientOverflow { context: String },

    #[error("no variables to solve for")]
    NoVariables,
}

impl SolverError {
    /// Returns the error code for this error variant
    #[must_use]
    pub fn code(&self) -> &'static str {
        match self {
            SolverError::ParseFailure(_) => "S001",
            SolverError::UnknownVariable { .. } => "S002",
            SolverError::DuplicateVariable { .. } => "S003",
            SolverError::EmptyDomain { .. } => "S004",
            SolverError::TooManyLetters { .. } => "S005",
            SolverError::CoefficientOverflow { .. } => "S006",
            SolverError::NoVariables => "S007",
        }
    }

    /// Returns a short description of this error type (for documentation)
    #[must_use]
    pub fn description(&self) -> &'static str {
        match self {
            SolverError::ParseFailure(_) => "Input parsing failed",
            SolverError::UnknownVariable { .. } => "Constraint refers to an undeclared variable",
            SolverError::DuplicateVariable { .. } => "Variable declared twice",
            SolverError::EmptyDomain { .. } => "Variable has no possible value",
            SolverError::TooManyLetters { .. } => "More letters than digits",
            SolverError::CoefficientOverflow { .. } => "Coefficient overflow",
            SolverError::NoVariables => "Problem has no variables",
        }
    }

    /// Returns detailed explanation of this error type (for documentation)
    #[must_use]
    pub fn details(&self) -> &'static str {
        match self {
            SolverError::ParseFailure(_) => "The input could not be parsed. This wraps an underlying ParseError (see Parse Errors section for specific error codes).",
            SolverError::UnknownVariable { .. } => "Every variable a constraint mentions must first be declared with `add_variable`.",
            SolverError::DuplicateVariable { .. } => "Variable names are unique within a problem; `add_variable` was called twice with the same name.",
            SolverError::EmptyDomain { .. } => "A variable was declared with, or restricted down to, an empty set of values, so the problem has no solution.",
            SolverError::TooManyLetters { .. } => "Each letter of a cryptarithm needs its own digit, so a puzzle in base b can use at most b distinct letters.",
            SolverError::CoefficientOverflow { .. } => "A word is so long that its positional weight (base^length) does not fit in a 64-bit integer.",
            SolverError::NoVariables => "`solve` was called on a problem with no declared variables.",
        }
    }

    /// Returns a helpful suggestion for this error
    #[must_use]
    pub fn help(&self) -> Option<&'static str> {
        match self {
            SolverError::UnknownVariable { .. } => Some("Declare the variable with add_variable before using it in a constraint"),
            SolverError::DuplicateVariable { .. } => Some("Use restrict to narrow the domain of an existing variable"),
            SolverError::EmptyDomain { .. } => Some("Check the domain bounds; Domain::range(lo..=hi) is empty when lo > hi"),
            SolverError::TooManyLetters { .. } => Some("Use a larger base with with_base, or fewer distinct letters"),
            SolverError::CoefficientOverflow { .. } => Some("Use shorter words or a smaller base"),
            SolverError::NoVariables => Some("Add at least one variable with add_variable"),
            SolverError::ParseFailure(_) => None, // ParseError has its own help
        }
    }

    /// Formats the error with code and optional help text
    #[must_use]
    pub fn display_detailed(&self) -> String {
        match self {
            SolverError::ParseFailure(pe) => {
                // delegate to ParseError's detailed display
                format!("{}\n  caused by: {}", self.code(), pe.display_detailed())
            }
            _ => {
                crate::errors::format_error_with_code_and_help(&self.to_string(), self.code(), self.help())
            }
        }
    }
}
