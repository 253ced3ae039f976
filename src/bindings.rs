use std::fmt;
use std::fmt::{Display, Formatter};

use crate::letters::{ALPHABET_SIZE, LetterSet, letter_index};

/// `LetterBindings` maps a pattern variable (`'A'`-`'Z'`) to the single letter
/// it stands for in a matched word.
///
/// Distinct variables are bound to distinct letters, so the set of letters in
/// use is tracked alongside the slots.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LetterBindings {
    /// index 0-25 for 'A'-'Z'
    slots: [Option<char>; ALPHABET_SIZE],
    taken: LetterSet,
}

/// Convert a variable character to an array index
/// 'A' -> 0, 'B' -> 1, ..., 'Z' -> 25
///
/// # Panics
/// Panics if `c` is not in 'A'..='Z'. The pattern parser only produces
/// variables in that range, so anything else is a programming error.
#[inline]
fn char_to_index(c: char) -> usize {
    match c {
        'A'..='Z' => (c as u8 - b'A') as usize,
        _ => panic!("Invalid variable character: '{c}' (parser should have validated this)"),
    }
}

impl Display for LetterBindings {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let pairs: Vec<String> = self.iter()
            .map(|(k, v)| format!("{k}→{v}"))
            .collect();
        write!(f, "[{}]", pairs.join(", "))
    }
}

impl LetterBindings {
    /// Bind `var_char` to `letter`.
    ///
    /// Returns `false` (and changes nothing) if the variable is already bound
    /// or the letter is already used by another variable.
    pub(crate) fn bind(&mut self, var_char: char, letter: char) -> bool {
        let i = char_to_index(var_char);
        if self.slots[i].is_some() || self.taken.contains(letter) {
            return false;
        }
        self.slots[i] = Some(letter);
        self.taken.insert(letter);
        true
    }

    /// Retrieve the binding for a variable
    ///
    /// `None` for anything outside `'A'`-`'Z'`.
    #[must_use]
    pub fn get(&self, var_char: char) -> Option<char> {
        letter_index(var_char, 'A').ok().and_then(|i| self.slots[i])
    }

    /// Remove a binding for the given variable
    pub(crate) fn remove(&mut self, var_char: char) {
        let i = char_to_index(var_char);
        if let Some(letter) = self.slots[i].take() {
            self.taken = self.iter().map(|(_, c)| c).collect();
            debug_assert!(!self.taken.contains(letter));
        }
    }

    /// True if some variable is bound to `letter`.
    #[must_use]
    pub fn is_taken(&self, letter: char) -> bool {
        self.taken.contains(letter)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.slots.iter().flatten().count()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.slots.iter().all(Option::is_none)
    }

    /// Iterate over `(variable, letter)` pairs in variable order.
    pub fn iter(&self) -> impl Iterator<Item = (char, char)> + '_ {
        self.slots.iter().zip('A'..='Z').filter_map(|(slot, var_char)| {
            slot.map(|letter| (var_char, letter))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::letters::UPPERCASE_ALPHABET;

    #[test]
    fn test_bind_and_get() {
        let mut b = LetterBindings::default();
        assert!(b.bind('A', 'x'));
        assert_eq!(b.get('A'), Some('x'));
        assert_eq!(b.get('B'), None);
        assert!(b.is_taken('x'));
    }

    #[test]
    fn test_bind_rejects_taken_letter() {
        let mut b = LetterBindings::default();
        assert!(b.bind('A', 'x'));
        assert!(!b.bind('B', 'x'));
        assert_eq!(b.get('B'), None);
    }

    #[test]
    fn test_bind_rejects_rebinding() {
        let mut b = LetterBindings::default();
        assert!(b.bind('A', 'x'));
        assert!(!b.bind('A', 'y'));
        assert_eq!(b.get('A'), Some('x'));
    }

    #[test]
    fn test_remove_frees_letter() {
        let mut b = LetterBindings::default();
        b.bind('A', 'x');
        b.bind('B', 'y');
        b.remove('A');
        assert_eq!(b.get('A'), None);
        assert!(!b.is_taken('x'));
        assert!(b.is_taken('y'));
        assert!(b.bind('C', 'x'));
    }

    #[test]
    fn test_iter_and_len() {
        let mut b = LetterBindings::default();
        assert!(b.is_empty());
        b.bind('C', 'c');
        b.bind('A', 'a');
        assert_eq!(b.iter().collect::<Vec<_>>(), vec![('A', 'a'), ('C', 'c')]);
        assert_eq!(b.len(), 2);
    }

    #[test]
    fn test_all_26_variables() {
        let mut b = LetterBindings::default();
        for (var_char, letter) in UPPERCASE_ALPHABET.zip('a'..='z') {
            assert!(b.bind(var_char, letter));
        }
        assert_eq!(b.len(), 26);
        assert_eq!(b.get('Q'), Some('q'));
    }

    #[test]
    fn test_display() {
        let mut b = LetterBindings::default();
        b.bind('A', 'n');
        b.bind('B', 'o');
        assert_eq!(b.to_string(), "[A→n, B→o]");
    }

    #[test]
    fn test_get_non_variable_is_none() {
        let mut b = LetterBindings::default();
        assert!(b.bind('A', 'q'));
        assert_eq!(b.get('A'), Some('q'));
        assert_eq!(b.get('a'), None);
        assert_eq!(b.get('?'), None);
        assert_eq!(b.get('é'), None);
    }
}
