use std::fmt;
use std::ops::RangeInclusive;

use crate::errors::ParseError;
use crate::errors::ParseError::ParseFailure;

// Character-set constants
pub(crate) const ALPHABET_SIZE: usize = 26;
pub(crate) const LOWERCASE_ALPHABET: RangeInclusive<char> = 'a'..='z';
pub(crate) const UPPERCASE_ALPHABET: RangeInclusive<char> = 'A'..='Z';

pub(crate) const VOWELS: &str = "aeiouy";
pub(crate) const CONSONANTS: &str = "bcdfghjklmnpqrstvwxz";
pub(crate) const VARIABLE_CHARS: &str = "ABCDEFGHIJKLMNOPQRSTUVWXYZ";
pub(crate) const LITERAL_CHARS: &str = "abcdefghijklmnopqrstuvwxyz";

/// Character tile that stands in for any letter in letter bags and fragments.
pub(crate) const BLANK: char = '.';

pub(crate) trait LetterChar {
    fn is_vowel(&self) -> bool;
    fn is_consonant(&self) -> bool;
    fn is_variable(&self) -> bool;
    fn is_literal(&self) -> bool;
}

impl LetterChar for char {
    fn is_vowel(&self) -> bool {
        VOWELS.contains(*self)
    }
    fn is_consonant(&self) -> bool {
        CONSONANTS.contains(*self)
    }
    fn is_variable(&self) -> bool {
        self.is_ascii_uppercase()
    }
    fn is_literal(&self) -> bool {
        self.is_ascii_lowercase()
    }
}

/// Map `c` to 0..26 relative to `base` ('a' or 'A').
pub(crate) fn letter_index(c: char, base: char) -> Result<usize, Box<ParseError>> {
    (c as usize)
        .checked_sub(base as usize)
        .filter(|&diff| diff < ALPHABET_SIZE)
        .ok_or_else(|| Box::new(ParseFailure { s: format!("Illegal char: '{c}'") }))
}

/// True if `word` is non-empty and made only of `a`-`z`.
pub(crate) fn is_lowercase_word(word: &str) -> bool {
    !word.is_empty() && word.chars().all(|c| c.is_literal())
}

/// A set of lowercase letters stored as a 26-bit mask.
#[derive(Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct LetterSet(u32);

impl LetterSet {
    const FULL_MASK: u32 = (1 << ALPHABET_SIZE) - 1;

    #[must_use]
    pub fn empty() -> Self {
        LetterSet(0)
    }

    #[must_use]
    pub fn full() -> Self {
        LetterSet(Self::FULL_MASK)
    }

    #[must_use]
    pub fn vowels() -> Self {
        VOWELS.chars().collect()
    }

    #[must_use]
    pub fn consonants() -> Self {
        CONSONANTS.chars().collect()
    }

    /// Insert a letter; anything outside `a`-`z` is ignored.
    pub fn insert(&mut self, c: char) {
        if let Ok(i) = letter_index(c, 'a') {
            self.0 |= 1 << i;
        }
    }

    #[must_use]
    pub fn contains(&self, c: char) -> bool {
        letter_index(c, 'a').is_ok_and(|i| self.0 & (1 << i) != 0)
    }

    #[must_use]
    pub fn complement(&self) -> Self {
        LetterSet(!self.0 & Self::FULL_MASK)
    }

    #[must_use]
    pub fn union(&self, other: &LetterSet) -> Self {
        LetterSet(self.0 | other.0)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.count_ones() as usize
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0 == 0
    }

    /// Letters in alphabetical order.
    pub fn iter(&self) -> impl Iterator<Item = char> + '_ {
        LOWERCASE_ALPHABET.filter(|&c| self.contains(c))
    }
}

impl FromIterator<char> for LetterSet {
    fn from_iter<I: IntoIterator<Item = char>>(iter: I) -> Self {
        let mut set = LetterSet::empty();
        for c in iter {
            set.insert(c);
        }
        set
    }
}

impl fmt::Display for LetterSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for c in self.iter() {
            write!(f, "{c}")?;
        }
        Ok(())
    }
}

impl fmt::Debug for LetterSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "LetterSet({self})")
    }
}
