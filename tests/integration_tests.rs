//! Integration tests for the wordplay engines.
//!
//! These tests run the public API end to end against the word lists in
//! `tests/fixtures`, from loading through searching to checking results.

use std::collections::{HashMap, HashSet};

use wordplay::anagram::{permute_fragments, phrase_anagrams, AnagramQuery, Arrangements, LetterBag};
use wordplay::budget::{SearchOptions, SearchStatus};
use wordplay::errors::ParseError;
use wordplay::pattern::{find_matches, Pattern, Slot};
use wordplay::solver::{complete_from_word_list, solve, ConstraintProblem, Cryptarithm, Domain, SolverError};
use wordplay::word_list::WordList;

const WORD_LIST: &str = "tests/fixtures/test_word_list.txt";
const COUNTS: &str = "tests/fixtures/test_counts.txt";

/// Load the test word list from fixtures (score >= 50)
fn load_test_word_list() -> WordList {
    WordList::load_scored_from_path(WORD_LIST, 50).expect("Failed to read test word list")
}

fn pattern(s: &str) -> Pattern {
    s.parse().expect("test pattern should parse")
}

fn bag(s: &str) -> LetterBag {
    s.parse().expect("test letters should parse")
}

fn all() -> SearchOptions {
    SearchOptions::unlimited()
}

/// Check `word` against a fixed-length pattern one slot at a time, without
/// going through the matcher: each variable must stand for one letter
/// throughout, and different variables for different letters.
fn slot_by_slot_match(slots: &[Slot], word: &str) -> bool {
    const VOWELS: &str = "aeiouy";
    let chars: Vec<char> = word.chars().collect();
    if chars.len() != slots.len() {
        return false;
    }
    let mut vars: HashMap<char, char> = HashMap::new();
    for (slot, &c) in slots.iter().zip(&chars) {
        let fits = match slot {
            Slot::Letter(l) => c == *l,
            Slot::Any => c.is_ascii_lowercase(),
            Slot::Vowel => VOWELS.contains(c),
            Slot::Consonant => c.is_ascii_lowercase() && !VOWELS.contains(c),
            Slot::OneOf(set) => set.contains(c),
            Slot::NoneOf(set) => c.is_ascii_lowercase() && !set.contains(c),
            Slot::Var(v) => *vars.entry(*v).or_insert(c) == c,
            Slot::Gap => panic!("only fixed-length patterns are checked slot by slot"),
        };
        if !fits {
            return false;
        }
    }
    let letters: HashSet<char> = vars.values().copied().collect();
    letters.len() == vars.len()
}

#[cfg(test)]
mod word_lists {
    use super::*;

    #[test]
    fn test_scored_list_filters_and_normalizes() {
        let wl = load_test_word_list();
        assert!(wl.contains("zebra"), "mixed case entries are lowercased");
        assert!(!wl.contains("lux"), "low-scoring entries are dropped");
        assert!(!wl.contains("xyzzy"));
        assert!(!wl.contains("don't"), "entries outside a-z are skipped");
        assert!(!wl.is_weighted());
    }

    #[test]
    fn test_scored_list_is_sorted_by_length() {
        let wl = load_test_word_list();
        let lens: Vec<usize> = wl.words().map(str::len).collect();
        assert!(lens.windows(2).all(|w| w[0] <= w[1]));
    }

    #[test]
    fn test_counts_list() {
        let wl = WordList::load_counts_from_path(COUNTS).unwrap();
        assert!(wl.is_weighted());
        assert_eq!(wl.len(), 4, "zero counts are dropped");
        let cat = wl.prob("cat").unwrap().value();
        assert!((cat - 0.3).abs() < 1e-9);
    }

    #[test]
    fn test_missing_file() {
        assert!(WordList::load_scored_from_path("tests/fixtures/no_such_file.txt", 0).is_err());
    }

    #[test]
    fn test_find_regex() {
        let wl = load_test_word_list();
        let found = wl.find_regex("l[aeiou]x").unwrap();
        assert_eq!(found.into_values(), vec!["lax", "lox"]);
    }
}

#[cfg(test)]
mod pattern_matching {
    use super::*;

    #[test]
    fn test_wildcard() {
        let wl = load_test_word_list();
        let result = find_matches(&pattern("l.x"), &wl, &all());
        assert_eq!(result.words(), vec!["lax", "lox"]);
        assert_eq!(result.status, SearchStatus::Exhausted);
    }

    #[test]
    fn test_abba() {
        let wl = load_test_word_list();
        let result = find_matches(&pattern("ABBA"), &wl, &all());
        assert_eq!(result.words(), vec!["abba", "anna", "deed", "noon", "otto", "peep", "toot"]);
    }

    #[test]
    fn test_five_letter_palindromes() {
        let wl = load_test_word_list();
        let result = find_matches(&pattern("AB.BA"), &wl, &all());
        assert_eq!(result.words(), vec!["civic", "kayak", "level", "radar", "refer"]);
    }

    #[test]
    fn test_gap() {
        let wl = load_test_word_list();
        let result = find_matches(&pattern("s*ing"), &wl, &all());
        assert_eq!(result.words(), vec!["sing", "sting", "spring", "string", "singing"]);
    }

    #[test]
    fn test_results_are_exactly_the_matching_words() {
        let wl = load_test_word_list();
        for p in ["c.t", "#@#", "A*A", "[^aeiou]*", "s[a-t]*", "@*@", "*BB*", "ABC"] {
            let p = pattern(p);
            let result = find_matches(&p, &wl, &all());
            let found: HashSet<&str> = result.words().into_iter().collect();
            let expected: HashSet<&str> = wl.words().filter(|w| p.is_match(w)).collect();
            assert_eq!(found, expected, "pattern {p}");
        }
    }

    #[test]
    fn test_results_agree_with_slot_by_slot_check() {
        let wl = load_test_word_list();
        for p in ["c.t", "#@#", "ABC", "ABCD", "AB.BA", "ABBA", "@B#", "[^aeiou]A[a-t]"] {
            let p = pattern(p);
            let result = find_matches(&p, &wl, &all());
            let found: HashSet<&str> = result.words().into_iter().collect();
            let expected: HashSet<&str> = wl.words().filter(|w| slot_by_slot_match(p.slots(), w)).collect();
            assert!(!expected.is_empty(), "pattern {p} should match something");
            assert_eq!(found, expected, "pattern {p}");
        }
    }

    #[test]
    fn test_slot_by_slot_check_rejects() {
        // "eagle" repeats A but breaks the B pair, "anna" reuses a letter for two variables
        for (p, word) in [("AB.BA", "eagle"), ("ABCD", "anna"), ("#@#", "act"), ("ABBA", "room")] {
            let p = pattern(p);
            assert!(!slot_by_slot_match(p.slots(), word), "{p} should reject {word}");
            assert!(!find_matches(&p, &load_test_word_list(), &all()).words().contains(&word));
        }
        let abba = pattern("ABBA");
        assert!(slot_by_slot_match(abba.slots(), "otto"));
    }

    #[test]
    fn test_limit() {
        let wl = load_test_word_list();
        let result = find_matches(&pattern("*"), &wl, &SearchOptions::default().with_limit(3));
        assert_eq!(result.words(), vec!["act", "cat", "cot"]);
        assert_eq!(result.status, SearchStatus::FoundEnough);
    }

    #[test]
    fn test_weighted_ranking() {
        let wl = WordList::load_counts_from_path(COUNTS).unwrap();
        let result = find_matches(&pattern("c.t"), &wl, &all());
        assert_eq!(result.words(), vec!["cat", "cot", "cut"]);
    }

    #[test]
    fn test_weighted_limit_keeps_most_probable() {
        let wl = WordList::parse_counts("1 bat\n1 cat\n98 hat\n").unwrap();
        let result = find_matches(&pattern(".at"), &wl, &SearchOptions::default().with_limit(1));
        assert_eq!(result.words(), vec!["hat"]);

        let wl = WordList::load_counts_from_path(COUNTS).unwrap();
        let result = find_matches(&pattern("c.t"), &wl, &SearchOptions::default().with_limit(2));
        assert_eq!(result.words(), vec!["cat", "cot"]);
    }
}

#[cfg(test)]
mod anagrams {
    use super::*;

    #[test]
    fn test_exact_anagrams() {
        let wl = load_test_word_list();
        let found = AnagramQuery::new(bag("listen")).find(&wl, &all());
        assert_eq!(found.words(), vec!["enlist", "inlets", "listen", "silent", "tinsel"]);
    }

    #[test]
    fn test_anagrams_with_blank() {
        let wl = load_test_word_list();
        let found = AnagramQuery::new(bag("st?r")).find(&wl, &all());
        assert_eq!(found.words(), vec!["arts", "rats", "star", "tars", "tsar"]);
    }

    #[test]
    fn test_subanagrams() {
        let wl = load_test_word_list();
        let found = AnagramQuery::new(bag("painters")).subsets(7, 8).find(&wl, &all());
        assert_eq!(found.words(), vec!["painter", "pertain", "repaint", "pantries"]);
    }

    #[test]
    fn test_anagrams_with_pattern() {
        let wl = load_test_word_list();
        let found = AnagramQuery::new(bag("stare")).with_pattern(pattern("*s")).find(&wl, &all());
        assert_eq!(found.words(), vec!["rates", "tares", "tears"]);
    }

    #[test]
    fn test_orderings_count_is_multinomial() {
        // 6! / (3! 2!)
        let found = AnagramQuery::new(bag("banana")).orderings(&all()).unwrap();
        assert_eq!(found.matches.len(), 60);
        let distinct: HashSet<&str> = found.words().into_iter().collect();
        assert_eq!(distinct.len(), 60);
    }

    #[test]
    fn test_arrangements_of_words() {
        let orders: Vec<String> = Arrangements::permutations(["to", "be", "to"])
            .map(|v| v.concat())
            .collect();
        assert_eq!(orders, vec!["betoto", "tobeto", "totobe"]);
    }
}

#[cfg(test)]
mod phrases {
    use super::*;

    #[test]
    fn test_phrase_anagrams() {
        let wl = load_test_word_list();
        let found = phrase_anagrams(&bag("dormitory"), &wl, 3, &all());
        assert_eq!(found.words(), vec!["room dirty", "dormitory"]);
    }

    #[test]
    fn test_permute_fragments() {
        let wl = load_test_word_list();
        let found = permute_fragments(&["st", "ing", "ray"], &wl, &all()).unwrap();
        assert_eq!(found.words(), vec!["ray sting", "sting ray", "stingray"]);
    }

    #[test]
    fn test_permute_fragments_with_placeholder() {
        let wl = load_test_word_list();
        let found = permute_fragments(&["c.", "t"], &wl, &all()).unwrap();
        assert_eq!(found.words(), vec!["cat", "cot", "cut"]);
    }
}

#[cfg(test)]
mod cryptarithms {
    use super::*;

    #[test]
    fn test_send_more_money() {
        let puzzle: Cryptarithm = "SEND + MORE = MONEY".parse().unwrap();
        let result = puzzle.solve(&all()).unwrap();
        assert_eq!(result.solutions.len(), 1);
        assert!(puzzle.check(&result.solutions[0]));
        assert_eq!(puzzle.render(&result.solutions[0]), "9567 + 1085 = 10652");
    }

    #[test]
    fn test_to_go_out() {
        let puzzle: Cryptarithm = "to + go = out".parse().unwrap();
        let rendered: Vec<String> = puzzle.solve(&all()).unwrap().into_iter().map(|s| puzzle.render(&s)).collect();
        assert_eq!(rendered, vec!["21 + 81 = 102"]);
    }

    #[test]
    fn test_solutions_satisfy_the_puzzle() {
        for eq in ["AB + BA = CC", "A + B = CD", "ABC - CBA = DEF"] {
            let puzzle: Cryptarithm = eq.parse().unwrap();
            let result = puzzle.solve(&all()).unwrap();
            assert!(!result.is_empty(), "{eq} should be solvable");
            assert!(result.solutions.iter().all(|s| puzzle.check(s)), "{eq}");
        }
    }

    #[test]
    fn test_complete_from_word_list() {
        let wl = load_test_word_list();
        let result = complete_from_word_list(&["send", "more"], &pattern("mo*"), &wl, &all()).unwrap();
        let words: Vec<&str> = result.completions.iter().map(|c| c.word.as_str()).collect();
        assert_eq!(words, vec!["money"]);
        assert_eq!(result.completions[0].rendered, "9567 + 1085 = 10652");
    }

    #[test]
    fn test_generic_problem() {
        // a magic-square row: three distinct digits 1-9 summing to 15, ascending
        let mut problem = ConstraintProblem::default();
        for v in ['X', 'Y', 'Z'] {
            problem.add_variable(v, Domain::range(1..=9)).unwrap();
        }
        problem.add_linear(&[('X', 1), ('Y', 1), ('Z', 1)], 15).unwrap();
        problem.add_all_different(&['X', 'Y', 'Z']).unwrap();
        problem.add_predicate("ascending", &['X', 'Y', 'Z'], |a| a[&'X'] < a[&'Y'] && a[&'Y'] < a[&'Z']).unwrap();
        let result = solve(&problem, &all()).unwrap();
        assert_eq!(result.solutions.len(), 8);
    }

    #[test]
    fn test_constraints_without_variables() {
        let mut problem = ConstraintProblem::default();
        problem.add_variable('A', Domain::range(0..=9)).unwrap();
        problem.add_linear(&[('A', 1), ('A', -1)], 5).unwrap();
        assert!(solve(&problem, &all()).unwrap().is_empty());

        let mut problem = ConstraintProblem::default();
        problem.add_variable('A', Domain::range(0..=9)).unwrap();
        problem.add_linear(&[], 3).unwrap();
        assert!(solve(&problem, &all()).unwrap().is_empty());

        let mut problem = ConstraintProblem::default();
        problem.add_variable('A', Domain::range(0..=9)).unwrap();
        problem.add_predicate("never", &[], |_| false).unwrap();
        assert!(solve(&problem, &all()).unwrap().is_empty());
    }
}

#[cfg(test)]
mod error_cases {
    use super::*;

    #[test]
    fn test_pattern_errors() {
        let err = "c!t".parse::<Pattern>().unwrap_err();
        assert_eq!(err.code(), "E004");
        assert!(err.display_detailed().contains("E004"));

        let err = "".parse::<Pattern>().unwrap_err();
        assert!(matches!(*err, ParseError::EmptyPattern));

        let err = "c[^a-z]t".parse::<Pattern>().unwrap_err();
        assert_eq!(err.code(), "E007");
    }

    #[test]
    fn test_letter_and_fragment_errors() {
        assert_eq!("ab1".parse::<LetterBag>().unwrap_err().code(), "E009");
        let err = permute_fragments(&["a_b"], &WordList::default(), &all()).unwrap_err();
        assert_eq!(err.code(), "E010");
        let err = AnagramQuery::new(bag("ab.")).orderings(&all()).unwrap_err();
        assert_eq!(err.code(), "E011");
    }

    #[test]
    fn test_word_list_errors() {
        assert_eq!(WordList::parse_counts("5 cat\nbogus\n").unwrap_err().code(), "E013");
        assert_eq!(WordList::parse_counts("5 cat\n3 Cat\n").unwrap_err().code(), "E014");
    }

    #[test]
    fn test_solver_errors() {
        let err = "SEND + MORE".parse::<Cryptarithm>().unwrap_err();
        assert_eq!(err.code(), "E016");

        let puzzle: Cryptarithm = "ABCDEFGHIJK = K".parse().unwrap();
        let err = puzzle.solve(&all()).unwrap_err();
        assert!(matches!(err, SolverError::TooManyLetters { .. }));
        assert!(err.display_detailed().contains("S005"));

        let err = solve(&ConstraintProblem::default(), &all()).unwrap_err();
        assert_eq!(err.code(), "S007");
    }

    #[test]
    fn test_empty_word_list() {
        let result = find_matches(&pattern("A*"), &WordList::default(), &all());
        assert!(result.matches.is_empty());
        assert_eq!(result.status, SearchStatus::Exhausted);
    }
}
