//! Error types for parsing operations with error codes and helpful messages.
//!
//! # Error Codes
//!
//! Each error variant has a unique code (E001-E018) for documentation lookup:
//!
//! - E001: `ParseFailure` (Generic parse failure)
//! - E002: `RegexError` (Invalid regex pattern)
//! - E003: `EmptyPattern` (Empty pattern string)
//! - E004: `InvalidInput` (Illegal character or token in a pattern)
//! - E005: `InvalidCharsetRange` (Invalid charset range)
//! - E006: `DanglingCharsetDash` (Dangling '-' in charset)
//! - E007: `EmptyCharset` (Charset admits no letter)
//! - E008: `InvalidLowercaseChar` (Non-lowercase character)
//! - E009: `InvalidLetters` (Invalid characters in a letter bag)
//! - E010: `InvalidFragment` (Invalid characters in a fragment)
//! - E011: `BlanksNotAllowed` (Blank tiles where only letters make sense)
//! - E012: `ParseIntError` (Integer parsing error)
//! - E013: `InvalidCountLine` (Malformed line in a word-count list)
//! - E014: `DuplicateWord` (Word appears twice in a word-count list)
//! - E015: `CountOverflow` (Word counts overflow)
//! - E016: `MalformedEquation` (Cryptarithm could not be parsed)
//! - E017: `InvalidBase` (Cryptarithm base out of range)
//! - E018: `NomError` (Low-level nom parser error)
//!
//! # Examples
//!
//! ```
//! use wordplay::errors::ParseError;
//!
//! fn parse_something(input: &str) -> Result<(), Box<ParseError>> {
//!     if input.is_empty() {
//!         return Err(Box::new(ParseError::EmptyPattern));
//!     }
//!     Ok(())
//! }
//!
//! match parse_something("") {
//!     Err(e) => {
//!         println!("Error: {}", e);
//!         println!("Code: {}", e.code());
//!         if let Some(help) = e.help() {
//!             println!("Help: {}", help);
//!         }
//!     }
//!     Ok(_) => println!("Success"),
//! }
//! ```

use nom::error::{ErrorKind, ParseError as NomParseError};
use std::io;
use std::num::ParseIntError;

/// Custom error type for parsing operations
#[derive(Debug, thiserror::Error)]
pub enum ParseError {
    #[error("Parsing failed: \"{s}\"")]
    ParseFailure { s: String },

    #[error("Invalid regex pattern: {0}")]
    RegexError(#[from] fancy_regex::Error),

    #[error("Empty pattern string")]
    EmptyPattern,

    #[error("Invalid input \"{str}\": {reason}")]
    InvalidInput { str: String, reason: String },

    #[error("Invalid range in charset: {0}-{1}")]
    InvalidCharsetRange(char, char),

    #[error("Dangling '-' at end of charset")]
    DanglingCharsetDash,

    #[error("Charset \"{charset}\" admits no letters")]
    EmptyCharset { charset: String },

    #[error("Invalid character '{invalid_char}' (only lowercase a-z allowed)")]
    InvalidLowercaseChar { invalid_char: char },

    #[error("Letters \"{letters}\" contain invalid character '{invalid_char}' (only a-z and blanks allowed)")]
    InvalidLetters { letters: String, invalid_char: char },

    #[error("Fragment \"{fragment}\" contains invalid character '{invalid_char}' (only a-z and '.' allowed)")]
    InvalidFragment { fragment: String, invalid_char: char },

    #[error("Letters \"{letters}\" contain blanks, which cannot be arranged")]
    BlanksNotAllowed { letters: String },

    #[error("int-parsing error: {0}")]
    ParseIntError(#[from] ParseIntError),

    #[error("expected \"count word\", found \"{line}\"")]
    InvalidCountLine { line: String },

    #[error("duplicate word \"{word}\"")]
    DuplicateWord { word: String },

    #[error("total word count is too large")]
    CountOverflow,

    #[error("Malformed equation \"{equation}\": {reason}")]
    MalformedEquation { equation: String, reason: String },

    #[error("Invalid base {base} (must be 2-36)")]
    InvalidBase { base: u32 },

    // nom parser error (lowest level)
    #[error("nom parser error: {0:?}")]
    NomError(ErrorKind),
}

impl From<ParseError> for io::Error {
    fn from(pe: ParseError) -> Self {
        // String version is the least fragile (no Send/Sync bounds issues)
        io::Error::new(io::ErrorKind::InvalidInput, pe.to_string())
    }
}

impl From<ParseIntError> for Box<ParseError> {
    fn from(pie: ParseIntError) -> Self {
        Box::new(ParseError::ParseIntError(pie))
    }
}

impl From<fancy_regex::Error> for Box<ParseError> {
    fn from(e: fancy_regex::Error) -> Self {
        Box::new(ParseError::RegexError(e))
    }
}

impl From<Box<fancy_regex::Error>> for Box<ParseError> {
    fn from(e: Box<fancy_regex::Error>) -> Self {
        Box::new(ParseError::RegexError(*e))
    }
}

impl<'a> NomParseError<&'a str> for Box<ParseError> {
    fn from_error_kind(_input: &'a str, kind: ErrorKind) -> Self {
        Box::new(ParseError::NomError(kind))
    }

    fn append(_input: &'a str, _kind: ErrorKind, other: Self) -> Self {
        other
    }
}

impl ParseError {
    /// Returns the error code for this error variant
    #[must_use]
    pub fn code(&self) -> &'static str {
        match self {
            ParseError::ParseFailure { .. } => "E001",
            ParseError::RegexError(_) => "E002",
            ParseError::EmptyPattern => "E003",
            ParseError::InvalidInput { .. } => "E004",
            ParseError::InvalidCharsetRange(..) => "E005",
            ParseError::DanglingCharsetDash => "E006",
            ParseError::EmptyCharset { .. } => "E007",
            ParseError::InvalidLowercaseChar { .. } => "E008",
            ParseError::InvalidLetters { .. } => "E009",
            ParseError::InvalidFragment { .. } => "E010",
            ParseError::BlanksNotAllowed { .. } => "E011",
            ParseError::ParseIntError(_) => "E012",
            ParseError::InvalidCountLine { .. } => "E013",
            ParseError::DuplicateWord { .. } => "E014",
            ParseError::CountOverflow => "E015",
            ParseError::MalformedEquation { .. } => "E016",
            ParseError::InvalidBase { .. } => "E017",
            ParseError::NomError(_) => "E018",
        }
    }

    /// Returns a short description of this error type (for documentation)
    #[must_use]
    pub fn description(&self) -> &'static str {
        match self {
            ParseError::ParseFailure { .. } => "Generic parse failure",
            ParseError::RegexError(_) => "Invalid regex pattern",
            ParseError::EmptyPattern => "Empty pattern string",
            ParseError::InvalidInput { .. } => "Illegal character or token in a pattern",
            ParseError::InvalidCharsetRange(..) => "Invalid charset range",
            ParseError::DanglingCharsetDash => "Dangling '-' in charset",
            ParseError::EmptyCharset { .. } => "Charset admits no letter",
            ParseError::InvalidLowercaseChar { .. } => "Non-lowercase character",
            ParseError::InvalidLetters { .. } => "Invalid characters in a letter bag",
            ParseError::InvalidFragment { .. } => "Invalid characters in a fragment",
            ParseError::BlanksNotAllowed { .. } => "Blank tiles cannot be arranged",
            ParseError::ParseIntError(_) => "Integer parsing error",
            ParseError::InvalidCountLine { .. } => "Malformed line in a word-count list",
            ParseError::DuplicateWord { .. } => "Duplicate word in a word-count list",
            ParseError::CountOverflow => "Word counts overflow",
            ParseError::MalformedEquation { .. } => "Cryptarithm could not be parsed",
            ParseError::InvalidBase { .. } => "Cryptarithm base out of range",
            ParseError::NomError(_) => "Low-level nom parser error",
        }
    }

    /// Returns detailed explanation of this error type (for documentation)
    #[must_use]
    pub fn details(&self) -> &'static str {
        match self {
            ParseError::ParseFailure { .. } => "A character could not be mapped to a letter index.",
            ParseError::RegexError(_) => "A regular expression passed to a word-list search (or generated as a pattern prefilter) failed to compile.",
            ParseError::EmptyPattern => "Patterns must contain at least one slot.",
            ParseError::InvalidInput { .. } => "Patterns may only contain a-z, A-Z, '.', '@', '#', '*' and bracketed charsets.",
            ParseError::InvalidCharsetRange(..) => "A charset range such as 'z-a' runs backwards.",
            ParseError::DanglingCharsetDash => "A charset ends with '-' and no closing letter.",
            ParseError::EmptyCharset { .. } => "A negated charset excluded every letter, so no word can match it.",
            ParseError::InvalidLowercaseChar { .. } => "A character outside a-z was found where only lowercase letters are allowed.",
            ParseError::InvalidLetters { .. } => "Letter bags accept a-z and the blank tiles '.' and '?'.",
            ParseError::InvalidFragment { .. } => "Fragments accept a-z and '.' placeholders for unknown letters.",
            ParseError::BlanksNotAllowed { .. } => "Enumerating orderings needs concrete letters; blanks only make sense when matching against a word list.",
            ParseError::ParseIntError(_) => "A count or score could not be parsed as an integer.",
            ParseError::InvalidCountLine { .. } => "Count lists expect one \"count word\" pair per line, as produced by `uniq -c`.",
            ParseError::DuplicateWord { .. } => "Each word may appear only once in a count list.",
            ParseError::CountOverflow => "The sum of all counts does not fit in 64 bits.",
            ParseError::MalformedEquation { .. } => "Cryptarithms look like 'SEND + MORE = MONEY': words joined by '+' or '-' with exactly one '='.",
            ParseError::InvalidBase { .. } => "Cryptarithm digits must come from a base between 2 and 36.",
            ParseError::NomError(_) => "The underlying parser combinator failed.",
        }
    }

    /// Returns a helpful suggestion or example for this error
    #[must_use]
    pub fn help(&self) -> Option<&'static str> {
        match self {
            ParseError::EmptyPattern => Some("Example: Use 'c.t' or 'A*A' instead of an empty string"),
            ParseError::InvalidInput { .. } => Some("Use lowercase letters, variables A-Z, '.', '@', '#', '*', '[abc]' or '[^abc]'"),
            ParseError::InvalidCharsetRange(..) => Some("In a charset range, the first character must come before the second (e.g., 'a-z' not 'z-a')"),
            ParseError::DanglingCharsetDash => Some("Remove the trailing '-' or complete the range (e.g., '[abc]' or '[a-c]')"),
            ParseError::EmptyCharset { .. } => Some("Leave at least one letter out of a negated charset"),
            ParseError::InvalidLowercaseChar { .. } => Some("Only lowercase letters a-z are allowed"),
            ParseError::InvalidLetters { .. } => Some("Letter bags must contain only a-z, '.' or '?'"),
            ParseError::InvalidFragment { .. } => Some("Fragments must contain only a-z or '.'"),
            ParseError::BlanksNotAllowed { .. } => Some("Search a word list instead, or replace blanks with letters"),
            ParseError::InvalidCountLine { .. } => Some("Expected format: '<count> <word>' (e.g., '  42 apple')"),
            ParseError::MalformedEquation { .. } => Some("Example: 'SEND + MORE = MONEY'"),
            ParseError::InvalidBase { .. } => Some("Choose a base from 2 to 36 (10 is the usual choice)"),
            _ => None,
        }
    }

    /// Formats the error with code and optional help text
    #[must_use]
    pub fn display_detailed(&self) -> String {
        format_error_with_code_and_help(&self.to_string(), self.code(), self.help())
    }
}

/// Helper function to format error messages with code and optional help text
pub(crate) fn format_error_with_code_and_help(base_msg: &str, code: &str, help: Option<&str>) -> String {
    if let Some(help_text) = help {
        format!("{base_msg} ({code})\n{help_text}")
    } else {
        format!("{base_msg} ({code})")
    }
}
