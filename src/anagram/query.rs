use log::debug;

use crate::budget::{timed_stop, SearchOptions, SearchStatus};
use crate::errors::ParseError;
use crate::pattern::{MatchResult, Pattern};
use crate::probability::{Dist, Prob};
use crate::word_list::WordList;

use super::letter_bag::LetterBag;

/// An anagram search over one letter bag.
///
/// By default every tile must be used (`exact`). [`AnagramQuery::subsets`]
/// relaxes that to any subset whose length lies in a range, and
/// [`AnagramQuery::with_pattern`] adds a positional filter on top.
///
/// ```
/// use wordplay::anagram::{AnagramQuery, LetterBag};
/// use wordplay::budget::SearchOptions;
/// use wordplay::word_list::WordList;
///
/// let words = WordList::from_words(["enlist", "listen", "silent", "tinsel", "lens"]);
/// let bag: LetterBag = "silent".parse().unwrap();
/// let found = AnagramQuery::new(bag).find(&words, &SearchOptions::default());
/// assert_eq!(found.words(), vec!["enlist", "listen", "silent", "tinsel"]);
/// ```
#[derive(Debug, Clone)]
pub struct AnagramQuery {
    pub letters: LetterBag,
    pub min_len: usize,
    pub max_len: usize,
    pub pattern: Option<Pattern>,
    pub exact: bool,
}

impl AnagramQuery {
    #[must_use]
    pub fn new(letters: LetterBag) -> Self {
        let len = letters.len();
        AnagramQuery { letters, min_len: len, max_len: len, pattern: None, exact: true }
    }

    /// Accept words using any `min..=max` of the tiles.
    #[must_use]
    pub fn subsets(self, min_len: usize, max_len: usize) -> Self {
        let max_len = max_len.min(self.letters.len());
        AnagramQuery { min_len, max_len, exact: false, ..self }
    }

    #[must_use]
    pub fn with_pattern(self, pattern: Pattern) -> Self {
        AnagramQuery { pattern: Some(pattern), ..self }
    }

    /// True if `word` satisfies the length, tile and pattern constraints.
    #[must_use]
    pub fn accepts(&self, word: &str) -> bool {
        let len = word.len();
        if len < self.min_len || len > self.max_len {
            return false;
        }
        let spelled = if self.exact {
            self.letters.is_anagram(word)
        } else {
            self.letters.can_spell(word)
        };
        spelled && self.pattern.as_ref().is_none_or(|p| p.is_match(word))
    }

    /// Words from `word_list` that satisfy the query, ranked by probability.
    #[must_use]
    pub fn find(&self, word_list: &WordList, opts: &SearchOptions) -> MatchResult {
        let budget = opts.start_budget();
        let scan_limit = opts.scan_limit(word_list.is_weighted());
        let mut matches = Dist::default();

        debug!(
            "anagrams of {} ({}..={} letters) in {} words",
            self.letters, self.min_len, self.max_len, word_list.len()
        );

        for entry in word_list.words_in_len_range(self.min_len, Some(self.max_len)) {
            if matches.len() >= scan_limit {
                break;
            }
            timed_stop!(budget, MatchResult::ranked(matches, &budget, opts.limit));
            if self.accepts(&entry.word) {
                matches.push(entry.rank_prob(), entry.word.clone());
            }
        }

        MatchResult::ranked(matches, &budget, opts.limit)
    }

    /// Letter strings that satisfy the query, whether or not they are words.
    ///
    /// Shorter strings come first, then lexicographic order.
    ///
    /// # Errors
    ///
    /// Returns [`ParseError::BlanksNotAllowed`] if the bag holds blanks.
    pub fn orderings(&self, opts: &SearchOptions) -> Result<MatchResult, Box<ParseError>> {
        if self.letters.blanks() > 0 {
            return Err(Box::new(ParseError::BlanksNotAllowed {
                letters: self.letters.to_string(),
            }));
        }

        let budget = opts.start_budget();
        let mut matches = Dist::default();

        'lengths: for k in self.min_len..=self.max_len {
            for candidate in self.letters.arrangements(k) {
                if matches.len() >= opts.limit {
                    break 'lengths;
                }
                timed_stop!(budget, Ok(MatchResult {
                    status: SearchStatus::from_run(&budget, matches.len(), opts.limit),
                    matches,
                }));
                if self.pattern.as_ref().is_none_or(|p| p.is_match(&candidate)) {
                    matches.push(Prob::always(), candidate);
                }
            }
        }

        let status = SearchStatus::from_run(&budget, matches.len(), opts.limit);
        Ok(MatchResult { matches, status })
    }
}
