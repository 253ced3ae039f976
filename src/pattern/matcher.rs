use log::{debug, trace};

use crate::bindings::LetterBindings;
use crate::budget::{timed_stop, SearchOptions, SearchStatus, TimeBudget};
use crate::probability::Dist;
use crate::word_list::WordList;

use super::form::{Pattern, Slot};

/// Words found by a search, ranked by probability, plus how the search ended.
#[derive(Debug, Clone)]
pub struct MatchResult {
    pub matches: Dist<String>,
    pub status: SearchStatus,
}

impl MatchResult {
    /// The matched strings alone, in ranked order.
    #[must_use]
    pub fn words(&self) -> Vec<&str> {
        self.matches.values().map(String::as_str).collect()
    }

    /// Rank `matches` and keep the `limit` most probable.
    pub(crate) fn ranked(mut matches: Dist<String>, budget: &TimeBudget, limit: usize) -> Self {
        let status = SearchStatus::from_run(budget, matches.len(), limit);
        matches.sort_by_probability();
        matches.truncate(limit);
        MatchResult { matches, status }
    }
}

impl Pattern {
    /// True if `word` satisfies every slot of this pattern.
    #[must_use]
    pub fn is_match(&self, word: &str) -> bool {
        self.first_binding(word).is_some()
    }

    /// The first variable binding under which `word` matches, if any.
    #[must_use]
    pub fn first_binding(&self, word: &str) -> Option<LetterBindings> {
        let mut results = Vec::new();
        self.match_internal(word, false, &mut results);
        results.into_iter().next()
    }

    /// Every distinct binding under which `word` matches.
    ///
    /// Gaps can make one word match in several ways (`A*A` on "anna" binds
    /// `A` only to 'a', but `*A*` on "abc" binds `A` three ways).
    #[must_use]
    pub fn all_bindings(&self, word: &str) -> Vec<LetterBindings> {
        let mut results = Vec::new();
        self.match_internal(word, true, &mut results);
        results
    }

    /// Core entry point for the backtracking search.
    ///
    /// - **Prefilter step:** reject the word cheaply with the compiled regex.
    /// - **Recursive search:** walk slots and letters together, binding variables
    ///   as they are first seen and backtracking on failure.
    fn match_internal(&self, word: &str, all_matches: bool, results: &mut Vec<LetterBindings>) {
        if !self.is_word_len_possible(word.len()) {
            return;
        }
        if !self.prefilter.is_match(word).unwrap_or(true) {
            return;
        }

        let chars: Vec<char> = word.chars().collect();
        let mut hp = HelperParams {
            bindings: LetterBindings::default(),
            results,
            all_matches,
        };
        hp.recurse(&chars, self.slots());
    }
}

// Helper params for recursion
struct HelperParams<'a> {
    bindings: LetterBindings,
    results: &'a mut Vec<LetterBindings>,
    all_matches: bool,
}

impl HelperParams<'_> {
    /// Recursive backtracking matcher.
    ///
    /// Returns `true` once the search should stop (a match was found and only
    /// one was wanted).
    fn recurse(&mut self, chars: &[char], slots: &[Slot]) -> bool {
        let Some((first, rest)) = slots.split_first() else {
            if chars.is_empty() {
                if !self.results.contains(&self.bindings) {
                    self.results.push(self.bindings.clone());
                }
                return !self.all_matches;
            }
            return false;
        };

        match first {
            Slot::Gap => {
                // Zero-or-more letters; try all possible splits
                (0..=chars.len()).any(|i| {
                    chars[..i].iter().all(|&c| first.admits(c)) && self.recurse(&chars[i..], rest)
                })
            }
            Slot::Var(var_char) => {
                let Some((&c, rest_chars)) = chars.split_first() else {
                    return false;
                };
                if let Some(bound) = self.bindings.get(*var_char) {
                    return bound == c && self.recurse(rest_chars, rest);
                }
                if !first.admits(c) || !self.bindings.bind(*var_char, c) {
                    return false;
                }
                let stop = self.recurse(rest_chars, rest);
                if !stop {
                    self.bindings.remove(*var_char);
                }
                stop
            }
            _ => chars
                .split_first()
                .is_some_and(|(&c, rest_chars)| first.admits(c) && self.recurse(rest_chars, rest)),
        }
    }
}

/// Find every word in `word_list` that matches `pattern`.
///
/// Only words of a length the pattern allows are scanned. Results are ranked by
/// probability (word-list order for ties) and capped by `opts`.
#[must_use]
pub fn find_matches(pattern: &Pattern, word_list: &WordList, opts: &SearchOptions) -> MatchResult {
    let budget = opts.start_budget();
    let (min_len, max_len) = pattern.len_bounds();
    let scan_limit = opts.scan_limit(word_list.is_weighted());
    let mut matches = Dist::default();

    debug!("matching {pattern} against {} words", word_list.len());

    for entry in word_list.words_in_len_range(min_len, max_len) {
        if matches.len() >= scan_limit {
            break;
        }
        timed_stop!(budget, MatchResult::ranked(matches, &budget, opts.limit));
        if pattern.is_match(&entry.word) {
            trace!("{pattern} matched {}", entry.word);
            matches.push(entry.rank_prob(), entry.word.clone());
        }
    }

    MatchResult::ranked(matches, &budget, opts.limit)
}
