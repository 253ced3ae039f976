//! Anagram and permutation search.
//!
//! - [`LetterBag`]: the tiles to rearrange, blanks included.
//! - [`Arrangements`]: each distinct ordering of a multiset, exactly once.
//! - [`AnagramQuery`]: single-word anagrams, optionally over subsets of the
//!   tiles and filtered by a [`Pattern`](crate::pattern::Pattern).
//! - [`phrase_anagrams`] and [`permute_fragments`]: multi-word results.

pub mod arrangements;
pub mod letter_bag;
pub mod phrase;
pub mod query;

pub use arrangements::Arrangements;
pub use letter_bag::LetterBag;
pub use phrase::{permute_fragments, phrase_anagrams};
pub use query::AnagramQuery;
