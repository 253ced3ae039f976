use std::fmt;
use std::str::FromStr;

use crate::errors::ParseError;
use crate::letters::{LetterChar, ALPHABET_SIZE, BLANK};

use super::arrangements::Arrangements;

/// A multiset of letters plus some blank tiles.
///
/// A blank stands for any single letter. Blanks are written `.` or `?`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LetterBag {
    counts: [usize; ALPHABET_SIZE],
    blanks: usize,
}

#[inline]
fn index_of(c: char) -> usize {
    (c as u8 - b'a') as usize
}

impl LetterBag {
    /// Total number of tiles, blanks included.
    #[must_use]
    pub fn len(&self) -> usize {
        self.counts.iter().sum::<usize>() + self.blanks
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    #[must_use]
    pub fn blanks(&self) -> usize {
        self.blanks
    }

    /// How many copies of letter `c` the bag holds (blanks not counted).
    #[must_use]
    pub fn count(&self, c: char) -> usize {
        if c.is_literal() { self.counts[index_of(c)] } else { 0 }
    }

    /// The bag left over after spelling `word`, spending blanks on any
    /// letters the bag lacks. `None` if the bag cannot spell `word`.
    #[must_use]
    pub fn without(&self, word: &str) -> Option<LetterBag> {
        let mut rest = self.clone();
        for c in word.chars() {
            if !c.is_literal() {
                return None;
            }
            let i = index_of(c);
            if rest.counts[i] > 0 {
                rest.counts[i] -= 1;
            } else if rest.blanks > 0 {
                rest.blanks -= 1;
            } else {
                return None;
            }
        }
        Some(rest)
    }

    /// True if `word` can be spelled from this bag's tiles.
    #[must_use]
    pub fn can_spell(&self, word: &str) -> bool {
        self.without(word).is_some()
    }

    /// True if `word` uses every tile exactly once.
    #[must_use]
    pub fn is_anagram(&self, word: &str) -> bool {
        self.without(word).is_some_and(|rest| rest.is_empty())
    }

    /// Every tile as a char, blanks as `.`.
    fn tiles(&self) -> Vec<char> {
        let mut tiles = vec![BLANK; self.blanks];
        for (c, &n) in ('a'..='z').zip(&self.counts) {
            tiles.extend(std::iter::repeat_n(c, n));
        }
        tiles
    }

    /// Each distinct ordering of all tiles.
    pub fn permutations(&self) -> impl Iterator<Item = String> + use<> {
        self.arrangements(self.len())
    }

    /// Each distinct ordering of `k` tiles.
    pub fn arrangements(&self, k: usize) -> impl Iterator<Item = String> + use<> {
        Arrangements::new(self.tiles(), k).map(|tiles| tiles.into_iter().collect())
    }
}

impl FromStr for LetterBag {
    type Err = Box<ParseError>;

    /// Letters are case-insensitive; whitespace is ignored.
    fn from_str(letters: &str) -> Result<Self, Self::Err> {
        let mut bag = LetterBag::default();
        for c in letters.chars() {
            let lc = c.to_ascii_lowercase();
            if lc.is_literal() {
                bag.counts[index_of(lc)] += 1;
            } else if c == BLANK || c == '?' {
                bag.blanks += 1;
            } else if !c.is_whitespace() {
                return Err(Box::new(ParseError::InvalidLetters {
                    letters: letters.to_string(),
                    invalid_char: c,
                }));
            }
        }
        Ok(bag)
    }
}

impl fmt::Display for LetterBag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (c, &n) in ('a'..='z').zip(&self.counts) {
            for _ in 0..n {
                write!(f, "{c}")?;
            }
        }
        for _ in 0..self.blanks {
            write!(f, "{BLANK}")?;
        }
        Ok(())
    }
}
