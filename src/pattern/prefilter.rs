use std::collections::HashMap;
use std::fmt::Write;
use std::sync::{Mutex, OnceLock};

use fancy_regex::Regex;

use crate::letters::{letter_index, ALPHABET_SIZE, CONSONANTS, VOWELS};

use super::form::Slot;

/// Global, lazily initialized cache of compiled regexes.
///
/// The lock is held only for lookups and inserts. Compilation happens
/// outside it, with a double-check before insert. A poisoned lock degrades
/// to compiling without caching.
static REGEX_CACHE: OnceLock<Mutex<HashMap<String, Regex>>> = OnceLock::new();

/// Return a compiled `Regex` for `pattern`, caching the result.
pub(crate) fn get_regex(pattern: &str) -> Result<Regex, Box<fancy_regex::Error>> {
    let cache = REGEX_CACHE.get_or_init(|| Mutex::new(HashMap::new()));

    if let Ok(guard) = cache.lock()
        && let Some(re) = guard.get(pattern).cloned() {
        return Ok(re);
    }

    let compiled = Regex::new(pattern)?;

    if let Ok(mut guard) = cache.lock() {
        if let Some(existing) = guard.get(pattern).cloned() {
            return Ok(existing);
        }
        guard.insert(pattern.to_string(), compiled.clone());
    }
    Ok(compiled)
}

/// Render slots as an (unanchored) regex string.
///
/// The regex accepts every word the pattern matches, but not the other way
/// round: it cannot express that distinct variables take distinct letters.
/// - A variable used once renders as `[a-z]`.
/// - The first use of a repeated variable opens a capture group `([a-z])`,
///   later uses become backreferences.
pub(crate) fn slots_to_regex_str(slots: &[Slot]) -> String {
    let mut var_counts = [0usize; ALPHABET_SIZE];
    for slot in slots {
        if let Slot::Var(c) = slot && let Ok(i) = letter_index(*c, 'A') {
            var_counts[i] += 1;
        }
    }

    let mut group_of_var = [0usize; ALPHABET_SIZE];
    let mut group_count = 0;
    let mut regex_str = String::new();

    for slot in slots {
        match slot {
            Slot::Var(c) => {
                let Ok(i) = letter_index(*c, 'A') else {
                    regex_str.push_str("[a-z]");
                    continue;
                };
                if group_of_var[i] != 0 {
                    let _ = write!(regex_str, "\\{}", group_of_var[i]);
                } else if var_counts[i] > 1 {
                    group_count += 1;
                    group_of_var[i] = group_count;
                    regex_str.push_str("([a-z])");
                } else {
                    regex_str.push_str("[a-z]");
                }
            }
            Slot::Letter(c) => regex_str.push(*c),
            Slot::Any => regex_str.push_str("[a-z]"),
            Slot::Gap => regex_str.push_str("[a-z]*"),
            Slot::Vowel => { let _ = write!(regex_str, "[{VOWELS}]"); }
            Slot::Consonant => { let _ = write!(regex_str, "[{CONSONANTS}]"); }
            Slot::OneOf(set) => { let _ = write!(regex_str, "[{set}]"); }
            Slot::NoneOf(set) => { let _ = write!(regex_str, "[{}]", set.complement()); }
        }
    }

    regex_str
}
