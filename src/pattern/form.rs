use super::prefilter::{get_regex, slots_to_regex_str};
use crate::errors::ParseError;
use crate::letters::{LetterChar, LetterSet, LITERAL_CHARS, VARIABLE_CHARS};
use fancy_regex::Regex;
use nom::bytes::complete::take_while1;
use nom::{
    branch::alt,
    bytes::complete::tag,
    character::complete::one_of,
    combinator::{map, opt},
    IResult,
    Parser,
};
use std::fmt;
use std::str::FromStr;

/// Parser result type: input, output, with our custom `ParseError`
pub type PResult<'a, O> = IResult<&'a str, O, Box<ParseError>>;

/// One position (or, for `Gap`, a run of positions) in a pattern.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Slot {
    Letter(char),       // 'a': exactly this letter
    Any,                // '.': exactly one letter
    Vowel,              // '@': any vowel (aeiouy)
    Consonant,          // '#': any consonant
    OneOf(LetterSet),   // '[abc]': any of the given letters
    NoneOf(LetterSet),  // '[^abc]': any letter except these
    Var(char),          // 'A': a letter shared by every 'A', distinct from other variables
    Gap,                // '*': zero or more letters
}

impl Slot {
    /// True if this slot can hold `c` on its own, ignoring variable bindings.
    pub(crate) fn admits(&self, c: char) -> bool {
        match self {
            Slot::Letter(l) => *l == c,
            Slot::Any | Slot::Var(_) | Slot::Gap => c.is_literal(),
            Slot::Vowel => c.is_vowel(),
            Slot::Consonant => c.is_consonant(),
            Slot::OneOf(set) => set.contains(c),
            Slot::NoneOf(set) => c.is_literal() && !set.contains(c),
        }
    }
}

impl fmt::Display for Slot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Slot::Letter(c) | Slot::Var(c) => write!(f, "{c}"),
            Slot::Any => write!(f, "."),
            Slot::Vowel => write!(f, "@"),
            Slot::Consonant => write!(f, "#"),
            Slot::OneOf(set) => write!(f, "[{set}]"),
            Slot::NoneOf(set) => write!(f, "[^{set}]"),
            Slot::Gap => write!(f, "*"),
        }
    }
}

/// A parsed pattern: its slots plus a compiled regex prefilter.
#[derive(Debug, Clone)]
pub struct Pattern {
    slots: Vec<Slot>,
    pub(crate) prefilter: Regex,
}

impl PartialEq for Pattern {
    fn eq(&self, other: &Self) -> bool {
        self.slots == other.slots
    }
}

impl Pattern {
    fn of(slots: Vec<Slot>) -> Result<Self, Box<ParseError>> {
        let anchored = format!("^{}$", slots_to_regex_str(&slots));
        let prefilter = get_regex(&anchored)?;
        Ok(Pattern { slots, prefilter })
    }

    #[must_use]
    pub fn slots(&self) -> &[Slot] {
        &self.slots
    }

    /// Minimum and (if the pattern has no gap) maximum word length.
    #[must_use]
    pub fn len_bounds(&self) -> (usize, Option<usize>) {
        let min_len = self.slots.iter().filter(|s| !matches!(s, Slot::Gap)).count();
        let max_len = (!self.slots.contains(&Slot::Gap)).then_some(min_len);
        (min_len, max_len)
    }

    #[must_use]
    pub fn is_fixed_length(&self) -> bool {
        self.len_bounds().1.is_some()
    }

    #[must_use]
    pub fn is_word_len_possible(&self, len: usize) -> bool {
        let (min_len, max_len) = self.len_bounds();
        len >= min_len && max_len.is_none_or(|mx| len <= mx)
    }

    /// The distinct variables of this pattern, in order of first appearance.
    #[must_use]
    pub fn variables(&self) -> Vec<char> {
        let mut vars = Vec::new();
        for slot in &self.slots {
            if let Slot::Var(c) = slot && !vars.contains(c) {
                vars.push(*c);
            }
        }
        vars
    }
}

impl fmt::Display for Pattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for slot in &self.slots {
            write!(f, "{slot}")?;
        }
        Ok(())
    }
}

// Enable `for slot in &pattern { ... }`
impl<'a> IntoIterator for &'a Pattern {
    type Item = &'a Slot;
    type IntoIter = std::slice::Iter<'a, Slot>;
    fn into_iter(self) -> Self::IntoIter { self.slots.iter() }
}

impl FromStr for Pattern {
    type Err = Box<ParseError>;

    /// Parse a pattern string, consuming one slot at a time.
    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        let mut rest = raw;
        let mut slots = Vec::new();

        while !rest.is_empty() {
            match slot(rest) {
                Ok((next, parsed)) => {
                    slots.push(parsed);
                    rest = next;
                }
                Err(nom::Err::Failure(e)) => {
                    // bubble up the specific ParseError
                    return Err(e);
                }
                Err(_) => {
                    return Err(Box::new(ParseError::InvalidInput {
                        str: rest.to_string(),
                        reason: format!("illegal character '{}' in pattern", rest.chars().next().unwrap_or('?')),
                    }));
                }
            }
        }

        if slots.is_empty() {
            return Err(Box::new(ParseError::EmptyPattern));
        }

        Pattern::of(slots)
    }
}

// === Token parsers ===

fn variable(input: &'_ str) -> PResult<'_, Slot> {
    map(one_of(VARIABLE_CHARS), Slot::Var).parse(input)
}
fn letter(input: &'_ str) -> PResult<'_, Slot> {
    map(one_of(LITERAL_CHARS), Slot::Letter).parse(input)
}
fn any(input: &'_ str) -> PResult<'_, Slot> { single_char_slot(input, ".", Slot::Any) }
fn gap(input: &'_ str) -> PResult<'_, Slot> { single_char_slot(input, "*", Slot::Gap) }
fn vowel(input: &'_ str) -> PResult<'_, Slot> { single_char_slot(input, "@", Slot::Vowel) }
fn consonant(input: &'_ str) -> PResult<'_, Slot> { single_char_slot(input, "#", Slot::Consonant) }

// single-char tokens share the same shape
fn single_char_slot<'a>(
    input: &'a str,
    tag_str: &'static str,
    slot: Slot,
) -> PResult<'a, Slot> {
    map(tag(tag_str), move |_| slot).parse(input)
}

/// Expands a raw charset body string (like "abc" or "a-e") into a set of letters.
///
/// # Errors
/// - `ParseError::InvalidCharsetRange` if a range start is greater than its end (e.g., "z-a").
/// - `ParseError::DanglingCharsetDash` if the body ends with a dash.
fn expand_charset(body: &str) -> Result<LetterSet, Box<ParseError>> {
    let mut letters = LetterSet::empty();
    let mut iter = body.chars().peekable();

    while let Some(start) = iter.next() {
        if iter.peek() == Some(&'-') {
            iter.next(); // consume '-'
            match iter.next() {
                Some(end) if start <= end => (start..=end).for_each(|c| letters.insert(c)),
                Some(end) => return Err(Box::new(ParseError::InvalidCharsetRange(start, end))),
                None => return Err(Box::new(ParseError::DanglingCharsetDash)),
            }
        } else {
            letters.insert(start);
        }
    }

    Ok(letters)
}

/// Parses a bracketed charset.
///
/// - `[abc]` / `[a-e]`: one of the listed letters.
/// - `[^abc]` / `[!abc]`: an exclusion set; any letter *except* those listed.
///
/// Empty brackets are not allowed, and neither is an exclusion set that
/// removes every letter. Anything but `a`-`z` and `-` inside closed brackets
/// is [`ParseError::InvalidLowercaseChar`].
fn charset(input: &'_ str) -> PResult<'_, Slot> {
    let start = input;
    let (input, _) = tag("[").parse(input)?;
    let (input, negated) = opt(alt((tag("^"), tag("!")))).parse(input)?;
    let (input, body) = take_while1(|c: char| c != ']').parse(input)?;
    let (input, _) = tag("]").parse(input)?;

    if let Some(invalid_char) = body.chars().find(|&c| c != '-' && !c.is_literal()) {
        return Err(nom::Err::Failure(Box::new(ParseError::InvalidLowercaseChar { invalid_char })));
    }

    let letters = expand_charset(body).map_err(nom::Err::Failure)?;

    let admitted = if negated.is_some() { letters.complement() } else { letters };
    if admitted.is_empty() {
        let consumed = &start[..start.len() - input.len()];
        return Err(nom::Err::Failure(Box::new(ParseError::EmptyCharset {
            charset: consumed.to_string(),
        })));
    }

    let parsed = if negated.is_some() { Slot::NoneOf(letters) } else { Slot::OneOf(letters) };
    Ok((input, parsed))
}

fn slot(input: &'_ str) -> PResult<'_, Slot> {
    alt((variable, letter, charset, any, gap, vowel, consonant)).parse(input)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(s: &str) -> Vec<Slot> {
        s.parse::<Pattern>().unwrap().slots().to_vec()
    }

    #[test] fn test_empty_pattern_error() {
        assert!(matches!(*"".parse::<Pattern>().unwrap_err(), ParseError::EmptyPattern));
    }

    #[test] fn test_unclosed_bracket_error() {
        assert!(matches!(*"[".parse::<Pattern>().unwrap_err(), ParseError::InvalidInput { ref str, .. } if str == "["));
    }

    #[test] fn test_parse_letters() {
        assert_eq!(parse("cat"), vec![Slot::Letter('c'), Slot::Letter('a'), Slot::Letter('t')]);
    }

    #[test] fn test_parse_wildcards() {
        assert_eq!(parse(".*@#"), vec![Slot::Any, Slot::Gap, Slot::Vowel, Slot::Consonant]);
    }

    #[test] fn test_parse_variables() {
        assert_eq!(parse("AbA"), vec![Slot::Var('A'), Slot::Letter('b'), Slot::Var('A')]);
    }

    #[test] fn test_parse_charset() {
        assert_eq!(parse("[abc]"), vec![Slot::OneOf("abc".chars().collect())]);
        assert_eq!(parse("[a-c]"), vec![Slot::OneOf("abc".chars().collect())]);
    }

    #[test] fn test_parse_exclusion_set() {
        assert_eq!(parse("[^abc]"), vec![Slot::NoneOf("abc".chars().collect())]);
        assert_eq!(parse("[!abc]"), vec![Slot::NoneOf("abc".chars().collect())]);
    }

    #[test]
    fn test_expand_charset() {
        assert_eq!(expand_charset("a-e").unwrap(), "abcde".chars().collect());
        assert_eq!(expand_charset("ax-z").unwrap(), "axyz".chars().collect());
        assert!(matches!(*expand_charset("a-").unwrap_err(), ParseError::DanglingCharsetDash));
    }

    #[test]
    fn test_charset_errors() {
        assert!(matches!(*"[z-a]".parse::<Pattern>().unwrap_err(), ParseError::InvalidCharsetRange('z', 'a')));
        assert!(matches!(*"[a-]".parse::<Pattern>().unwrap_err(), ParseError::DanglingCharsetDash));
        assert!("[]".parse::<Pattern>().is_err());
        assert!("[abc".parse::<Pattern>().is_err());
    }

    #[test]
    fn test_charset_rejects_non_lowercase() {
        let err = "c[ABC]t".parse::<Pattern>().unwrap_err();
        assert!(matches!(*err, ParseError::InvalidLowercaseChar { invalid_char: 'A' }));
        assert_eq!(err.code(), "E008");
        assert!(matches!(*"[aé]".parse::<Pattern>().unwrap_err(), ParseError::InvalidLowercaseChar { invalid_char: 'é' }));
        assert!(matches!(*"[a.]".parse::<Pattern>().unwrap_err(), ParseError::InvalidLowercaseChar { invalid_char: '.' }));
        // an unclosed bracket is still plain invalid input
        assert_eq!("[aB".parse::<Pattern>().unwrap_err().code(), "E004");
    }

    #[test]
    fn test_exclusion_of_every_letter_is_rejected() {
        let err = "c[^a-z]t".parse::<Pattern>().unwrap_err();
        assert!(matches!(*err, ParseError::EmptyCharset { ref charset } if charset == "[^a-z]"));
    }

    #[test]
    fn test_illegal_characters() {
        for bad in ["abc123", "abc!def", "abc def", "abc\tdef", "café", "Ä", "~A", "?"] {
            let err = bad.parse::<Pattern>().unwrap_err();
            assert_eq!(err.code(), "E004", "expected InvalidInput for {bad:?}, got {err:?}");
        }
    }

    #[test]
    fn test_len_bounds() {
        assert_eq!("c.t".parse::<Pattern>().unwrap().len_bounds(), (3, Some(3)));
        assert_eq!("c*t".parse::<Pattern>().unwrap().len_bounds(), (2, None));
        assert_eq!("**".parse::<Pattern>().unwrap().len_bounds(), (0, None));
        let p = "A*A".parse::<Pattern>().unwrap();
        assert!(!p.is_fixed_length());
        assert!(p.is_word_len_possible(2));
        assert!(!p.is_word_len_possible(1));
    }

    #[test]
    fn test_variables_in_order() {
        assert_eq!("BAB.C".parse::<Pattern>().unwrap().variables(), vec!['B', 'A', 'C']);
    }

    #[test]
    fn test_display_is_canonical() {
        let p = "[cba][!zyx]A*@#.".parse::<Pattern>().unwrap();
        assert_eq!(p.to_string(), "[abc][^xyz]A*@#.");
    }

    #[test]
    fn test_slot_admits() {
        assert!(Slot::NoneOf("abc".chars().collect()).admits('d'));
        assert!(!Slot::NoneOf("abc".chars().collect()).admits('a'));
        assert!(!Slot::NoneOf("abc".chars().collect()).admits('D'));
        assert!(Slot::Vowel.admits('y'));
        assert!(!Slot::Any.admits('-'));
    }

    #[test]
    fn test_very_long_pattern() {
        let long_pattern = "a".repeat(150);
        assert_eq!(long_pattern.parse::<Pattern>().unwrap().slots().len(), 150);
    }
}
