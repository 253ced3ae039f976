use std::collections::HashSet;

use log::debug;

use crate::budget::{timed_stop, SearchOptions, TimeBudget};
use crate::errors::ParseError;
use crate::letters::{LetterChar, BLANK};
use crate::pattern::{MatchResult, Pattern};
use crate::probability::{Dist, Prob};
use crate::word_list::{Entry, WordList};

use super::arrangements::Arrangements;
use super::letter_bag::LetterBag;

/// Multi-word anagrams that use every tile of `letters`.
///
/// Phrases hold at most `max_words` words, listed in word-list order (shorter
/// words first), so "room dirty" is found but "dirty room" is not. A phrase's
/// probability is the product of its words' weights.
#[must_use]
pub fn phrase_anagrams(
    letters: &LetterBag,
    word_list: &WordList,
    max_words: usize,
    opts: &SearchOptions,
) -> MatchResult {
    let candidates: Vec<&Entry> = word_list
        .words_in_len_range(1, Some(letters.len()))
        .iter()
        .filter(|e| letters.can_spell(&e.word))
        .collect();

    debug!("phrase anagrams of {letters}: {} candidate words", candidates.len());

    let mut search = PhraseSearch {
        candidates,
        max_words,
        limit: opts.scan_limit(word_list.is_weighted()),
        budget: opts.start_budget(),
        chosen: Vec::new(),
        matches: Dist::default(),
    };
    if !letters.is_empty() {
        search.recurse(0, letters, Prob::always());
    }

    MatchResult::ranked(search.matches, &search.budget, opts.limit)
}

struct PhraseSearch<'a> {
    candidates: Vec<&'a Entry>,
    max_words: usize,
    limit: usize,
    budget: TimeBudget,
    chosen: Vec<&'a str>,
    matches: Dist<String>,
}

impl PhraseSearch<'_> {
    /// Extend the phrase with candidates at index `start` or later.
    fn recurse(&mut self, start: usize, remaining: &LetterBag, prob: Prob) {
        if remaining.is_empty() {
            self.matches.push(prob, self.chosen.join(" "));
            return;
        }
        if self.chosen.len() >= self.max_words {
            return;
        }

        for i in start..self.candidates.len() {
            if self.matches.len() >= self.limit {
                return;
            }
            timed_stop!(self.budget);
            let entry = self.candidates[i];
            if entry.word.len() > remaining.len() {
                // candidates are sorted by length
                return;
            }
            if let Some(rest) = remaining.without(&entry.word) {
                self.chosen.push(&entry.word);
                self.recurse(i, &rest, prob * entry.rank_prob());
                self.chosen.pop();
            }
        }
    }
}

/// Arrange `fragments` in every distinct order and split each concatenation
/// into dictionary words.
///
/// A fragment is lowercase letters plus `.` for an unknown letter. Each
/// distinct concatenation is tried once, and each phrase is reported once,
/// weighted by the product of its words' weights.
///
/// # Errors
///
/// Returns [`ParseError::InvalidFragment`] for a fragment with any other
/// character.
pub fn permute_fragments(
    fragments: &[&str],
    word_list: &WordList,
    opts: &SearchOptions,
) -> Result<MatchResult, Box<ParseError>> {
    let mut normalized = Vec::with_capacity(fragments.len());
    for fragment in fragments {
        let lower = fragment.to_ascii_lowercase();
        if let Some(invalid_char) = lower.chars().find(|&c| !c.is_literal() && c != BLANK) {
            return Err(Box::new(ParseError::InvalidFragment {
                fragment: (*fragment).to_string(),
                invalid_char,
            }));
        }
        normalized.push(lower);
    }

    let mut splitter = FragmentSplitter {
        word_list,
        limit: opts.scan_limit(word_list.is_weighted()),
        budget: opts.start_budget(),
        chosen: Vec::new(),
        seen: HashSet::new(),
        matches: Dist::default(),
    };

    let mut tried = HashSet::new();
    for ordering in Arrangements::permutations(normalized) {
        if splitter.matches.len() >= splitter.limit || splitter.budget.expired() {
            break;
        }
        let joined = ordering.concat();
        if joined.is_empty() || !tried.insert(joined.clone()) {
            continue;
        }
        splitter.split(&joined, Prob::always())?;
    }

    debug!("permute {fragments:?}: {} concatenations, {} phrases", tried.len(), splitter.matches.len());

    Ok(MatchResult::ranked(splitter.matches, &splitter.budget, opts.limit))
}

struct FragmentSplitter<'a> {
    word_list: &'a WordList,
    limit: usize,
    budget: TimeBudget,
    chosen: Vec<&'a str>,
    seen: HashSet<String>,
    matches: Dist<String>,
}

impl<'a> FragmentSplitter<'a> {
    /// Words that can stand for `prefix`, whose `.`s match any letter.
    fn words_for(&self, prefix: &str) -> Result<Vec<&'a Entry>, Box<ParseError>> {
        if !prefix.contains(BLANK) {
            return Ok(self.word_list.get(prefix).into_iter().collect());
        }
        let pattern: Pattern = prefix.parse()?;
        Ok(self
            .word_list
            .words_of_len(prefix.len())
            .iter()
            .filter(|e| pattern.is_match(&e.word))
            .collect())
    }

    fn split(&mut self, rest: &str, prob: Prob) -> Result<(), Box<ParseError>> {
        if rest.is_empty() {
            let phrase = self.chosen.join(" ");
            if self.seen.insert(phrase.clone()) {
                self.matches.push(prob, phrase);
            }
            return Ok(());
        }

        for len in 1..=rest.len() {
            if self.matches.len() >= self.limit {
                return Ok(());
            }
            timed_stop!(self.budget, Ok(()));
            let (prefix, tail) = rest.split_at(len);
            for entry in self.words_for(prefix)? {
                self.chosen.push(&entry.word);
                self.split(tail, prob * entry.rank_prob())?;
                self.chosen.pop();
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bag(s: &str) -> LetterBag {
        s.parse().unwrap()
    }

    #[test]
    fn test_phrase_anagrams() {
        let wl = WordList::from_words(["dirty", "room", "dormitory", "rod", "my", "tire", "dim"]);
        let found = phrase_anagrams(&bag("dormitory"), &wl, 2, &SearchOptions::default());
        assert_eq!(found.words(), vec!["room dirty", "dormitory"]);
    }

    #[test]
    fn test_phrase_anagrams_max_words() {
        let wl = WordList::from_words(["a", "b", "ab"]);
        let one = phrase_anagrams(&bag("ab"), &wl, 1, &SearchOptions::default());
        assert_eq!(one.words(), vec!["ab"]);
        let two = phrase_anagrams(&bag("ab"), &wl, 2, &SearchOptions::default());
        assert_eq!(two.words(), vec!["a b", "ab"]);
    }

    #[test]
    fn test_phrase_anagrams_repeat_word() {
        let wl = WordList::from_words(["no", "on"]);
        let found = phrase_anagrams(&bag("noon"), &wl, 2, &SearchOptions::default());
        assert_eq!(found.words(), vec!["no no", "no on", "on on"]);
    }

    #[test]
    fn test_phrase_anagrams_weighted() {
        let wl = WordList::parse_counts("5 ab\n1 a\n4 b\n").unwrap();
        let found = phrase_anagrams(&bag("ab"), &wl, 2, &SearchOptions::default());
        // ab = 0.5, a b = 0.1 * 0.4
        assert_eq!(found.words(), vec!["ab", "a b"]);

        // "a b" is reached first but "ab" is more probable
        let top = phrase_anagrams(&bag("ab"), &wl, 2, &SearchOptions::default().with_limit(1));
        assert_eq!(top.words(), vec!["ab"]);
    }

    #[test]
    fn test_permute_fragments() {
        let wl = WordList::from_words(["sting", "ray", "stingray"]);
        let found = permute_fragments(&["ray", "st", "ing"], &wl, &SearchOptions::default()).unwrap();
        // "raysting" is tried before "stingray"
        assert_eq!(found.words(), vec!["ray sting", "sting ray", "stingray"]);
    }

    #[test]
    fn test_permute_fragments_with_placeholder() {
        let wl = WordList::from_words(["cat", "cot", "dog"]);
        let found = permute_fragments(&["c.", "t"], &wl, &SearchOptions::default()).unwrap();
        assert_eq!(found.words(), vec!["cat", "cot"]);
    }

    #[test]
    fn test_permute_fragments_dedupes_phrases() {
        let wl = WordList::from_words(["aa"]);
        let found = permute_fragments(&["a", "a"], &wl, &SearchOptions::default()).unwrap();
        assert_eq!(found.words(), vec!["aa"]);
    }

    #[test]
    fn test_permute_fragments_invalid() {
        let err = permute_fragments(&["ab", "c-d"], &WordList::default(), &SearchOptions::default())
            .unwrap_err();
        assert!(matches!(*err, ParseError::InvalidFragment { invalid_char: '-', .. }));
    }
}
