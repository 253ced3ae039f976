//! `word_list`: load and preprocess the word lists searched by every engine
//!
//! Two text formats are understood:
//! - `word;score` per line (crossword-style lists). Lines without a semicolon or
//!   with an unparsable score are skipped, and entries below `min_score` are
//!   dropped. Scores are a filter only; the resulting list is unweighted.
//! - `count word` per line (compatible with `uniq -c` output). Each word gets a
//!   [`Prob`] of `count / total`. Malformed lines and duplicates are errors,
//!   since a silently skipped count would skew every probability.
//!
//! Either way, words are lowercased, words containing anything other than `a`-`z`
//! are skipped, duplicates are removed, and the final list is sorted by length
//! first, then alphabetically. The length ordering lets [`WordList::words_of_len`]
//! hand out a contiguous slice.

use fancy_regex::Regex;
use log::debug;
use once_cell::sync::Lazy;
use std::collections::{BTreeMap, HashMap};
use std::io;
use std::path::Path;

use crate::errors::ParseError;
use crate::letters::is_lowercase_word;
use crate::pattern::prefilter::get_regex;
use crate::probability::{Dist, Prob};

/// One word plus its frequency weight, if the list carries weights.
#[derive(Debug, Clone, PartialEq)]
pub struct Entry {
    pub word: String,
    pub prob: Option<Prob>,
}

impl Entry {
    /// The weight used for ranking; unweighted entries count as certain.
    #[must_use]
    pub fn rank_prob(&self) -> Prob {
        self.prob.unwrap_or_else(Prob::always)
    }
}

/// A processed, ready-to-search word list.
///
/// `entries` are distinct, lowercase `a`-`z` words sorted by (length, alphabetical).
#[derive(Debug, Clone, Default)]
pub struct WordList {
    entries: Vec<Entry>,
    index: HashMap<String, usize>,
}

impl WordList {
    /// Build an unweighted list from raw words.
    pub fn from_words<I, S>(words: I) -> WordList
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self::from_entries(words.into_iter().map(|w| (w.as_ref().to_string(), None)))
    }

    /// Normalize, filter, deduplicate and sort `(word, prob)` pairs.
    ///
    /// When a word appears more than once, the first occurrence wins.
    fn from_entries(raw: impl IntoIterator<Item = (String, Option<Prob>)>) -> WordList {
        let mut seen: HashMap<String, Option<Prob>> = HashMap::new();
        for (raw_word, prob) in raw {
            let word = raw_word.trim().to_lowercase();
            if !is_lowercase_word(&word) {
                if !word.is_empty() {
                    debug!("skipping non-alphabetic entry {word:?}");
                }
                continue;
            }
            seen.entry(word).or_insert(prob);
        }

        let mut entries: Vec<Entry> = seen
            .into_iter()
            .map(|(word, prob)| Entry { word, prob })
            .collect();
        entries.sort_by(|a, b| {
            a.word.len().cmp(&b.word.len()).then_with(|| a.word.cmp(&b.word))
        });

        let index = entries
            .iter()
            .enumerate()
            .map(|(i, e)| (e.word.clone(), i))
            .collect();

        WordList { entries, index }
    }

    /// Parse a `word;score` list from an in-memory string.
    ///
    /// Empty lines, lines without a `;`, and lines whose score is not an
    /// integer are skipped silently. Entries scoring below `min_score` are dropped.
    #[must_use]
    pub fn parse_scored(contents: &str, min_score: i32) -> WordList {
        let words = contents.lines().filter_map(|raw_line| {
            let line = raw_line.trim();
            // Split on the first ';' only
            let (word_raw, score_raw) = line.split_once(';')?;
            let score: i32 = score_raw.trim().parse().ok()?;
            (score >= min_score).then(|| word_raw.to_string())
        });
        Self::from_words(words)
    }

    /// Parse a `count word` list, assigning each word the probability `count / total`.
    ///
    /// # Errors
    ///
    /// - [`ParseError::InvalidCountLine`] for a non-blank line that is not `count word`
    /// - [`ParseError::ParseIntError`] for a count that does not fit in `u64`
    /// - [`ParseError::DuplicateWord`] if a (lowercased) word appears twice
    /// - [`ParseError::CountOverflow`] if the total does not fit in `u64`
    pub fn parse_counts(contents: &str) -> Result<WordList, Box<ParseError>> {
        // Leading whitespace is permitted for compatibility with `uniq -c`.
        static COUNT_RE: Lazy<Regex> = Lazy::new(|| {
            Regex::new(r"^\s*([0-9]+)\s+(\S+)\s*$").expect("invalid regex in source")
        });

        let mut total_count: u64 = 0;
        let mut counts = BTreeMap::<String, u64>::new();
        for line in contents.lines() {
            if line.trim().is_empty() {
                continue;
            }
            let Some(cap) = COUNT_RE.captures(line)? else {
                return Err(Box::new(ParseError::InvalidCountLine { line: line.to_string() }));
            };
            let count = cap[1].parse::<u64>()?;
            let word = cap[2].to_lowercase();
            if counts.insert(word, count).is_some() {
                return Err(Box::new(ParseError::DuplicateWord { word: cap[2].to_string() }));
            }
            total_count = total_count.checked_add(count).ok_or(ParseError::CountOverflow)?;
        }

        let entries = counts.into_iter().filter(|(_, count)| *count > 0).map(|(word, count)| {
            let prob = Prob::from_fraction(count, total_count);
            (word, Some(prob))
        });
        Ok(Self::from_entries(entries))
    }

    /// Read a `word;score` list from a file.
    ///
    /// # Errors
    ///
    /// Will return an `Error` if unable to read a file at `path`.
    pub fn load_scored_from_path<P: AsRef<Path>>(path: P, min_score: i32) -> io::Result<WordList> {
        let data = read_list(path.as_ref())?;
        Ok(Self::parse_scored(&data, min_score))
    }

    /// Read a `count word` list from a file.
    ///
    /// # Errors
    ///
    /// Will return an `Error` if the file cannot be read or fails to parse
    /// (see [`WordList::parse_counts`]).
    pub fn load_counts_from_path<P: AsRef<Path>>(path: P) -> io::Result<WordList> {
        let path_ref = path.as_ref();
        let data = read_list(path_ref)?;
        Self::parse_counts(&data).map_err(|pe| {
            io::Error::new(
                io::ErrorKind::InvalidData,
                format!("failed to parse word counts in '{}': {}", path_ref.display(), pe.display_detailed()),
            )
        })
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// True if any entry carries a frequency weight.
    #[must_use]
    pub fn is_weighted(&self) -> bool {
        self.entries.iter().any(|e| e.prob.is_some())
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Entry> {
        self.entries.iter()
    }

    /// The bare words, in list order.
    pub fn words(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|e| e.word.as_str())
    }

    #[must_use]
    pub fn contains(&self, word: &str) -> bool {
        self.index.contains_key(word)
    }

    /// The entry for `word`, if present.
    #[must_use]
    pub fn get(&self, word: &str) -> Option<&Entry> {
        self.index.get(word).map(|&i| &self.entries[i])
    }

    /// The weight of `word`, if present and weighted.
    #[must_use]
    pub fn prob(&self, word: &str) -> Option<Prob> {
        self.get(word).and_then(|e| e.prob)
    }

    /// All entries of exactly `len` letters.
    #[must_use]
    pub fn words_of_len(&self, len: usize) -> &[Entry] {
        self.words_in_len_range(len, Some(len))
    }

    /// All entries whose length lies in `min..=max` (`None` = no upper bound).
    #[must_use]
    pub fn words_in_len_range(&self, min: usize, max: Option<usize>) -> &[Entry] {
        let start = self.entries.partition_point(|e| e.word.len() < min);
        let end = match max {
            Some(max) if max < min => start,
            Some(max) => self.entries.partition_point(|e| e.word.len() <= max),
            None => self.entries.len(),
        };
        &self.entries[start..end]
    }

    /// Find all words matching `regex`, which is anchored at both ends.
    ///
    /// Results are ranked by probability (list order for ties).
    ///
    /// # Errors
    ///
    /// Returns [`ParseError::RegexError`] if `regex` does not compile.
    pub fn find_regex(&self, regex: &str) -> Result<Dist<String>, Box<ParseError>> {
        let re = get_regex(&format!("^(?:{regex})$"))?;
        let mut dist = Dist::default();
        for entry in &self.entries {
            if re.is_match(&entry.word)? {
                dist.push(entry.rank_prob(), entry.word.clone());
            }
        }
        dist.sort_by_probability();
        Ok(dist)
    }
}

impl<'a> IntoIterator for &'a WordList {
    type Item = &'a Entry;
    type IntoIter = std::slice::Iter<'a, Entry>;
    fn into_iter(self) -> Self::IntoIter { self.entries.iter() }
}

fn read_list(path: &Path) -> io::Result<String> {
    std::fs::read_to_string(path).map_err(|e| {
        io::Error::new(
            e.kind(),
            format!("failed to read word list from '{}': {}", path.display(), e),
        )
    })
}
