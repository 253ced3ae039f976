//! Pattern matching against word lists.
//!
//! A pattern is parsed into [`Slot`]s ([`form`]), compiled into a regex
//! prefilter ([`prefilter`]) and checked word by word with a backtracking
//! matcher that keeps variable bindings consistent ([`matcher`]).

pub mod form;
pub mod matcher;
pub(crate) mod prefilter;

pub use form::{Pattern, Slot};
pub use matcher::{find_matches, MatchResult};
