//! Letter-arithmetic puzzles such as `SEND + MORE = MONEY`.
//!
//! A [`Cryptarithm`] compiles to a [`ConstraintProblem`]: one variable per
//! letter, one linear equation of positional weights, and one `AllDifferent`.
//!
//! ```
//! use wordplay::budget::SearchOptions;
//! use wordplay::solver::Cryptarithm;
//!
//! let puzzle: Cryptarithm = "SEND + MORE = MONEY".parse()?;
//! let result = puzzle.solve(&SearchOptions::default())?;
//! assert_eq!(result.solutions.len(), 1);
//! assert_eq!(puzzle.render(&result.solutions[0]), "9567 + 1085 = 10652");
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

use std::fmt;
use std::str::FromStr;

use log::{debug, trace};
use nom::{
    branch::alt,
    character::complete::{alpha1, char},
    combinator::{map, opt, value},
    multi::many0,
    sequence::{pair, separated_pair},
    Parser,
};

use crate::budget::{timed_stop, SearchOptions, SearchStatus};
use crate::errors::ParseError;
use crate::pattern::form::PResult;
use crate::pattern::{find_matches, Pattern};
use crate::word_list::WordList;

use super::problem::{Assignment, ConstraintProblem, Domain};
use super::search::{solve, SolveResult};
use super::SolverError;

/// Base used when none is given.
pub const DEFAULT_BASE: u32 = 10;
const MAX_BASE: u32 = 36;

/// One word of a cryptarithm with its sign.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Term {
    /// uppercase letters
    pub word: String,
    pub negative: bool,
}

impl Term {
    fn new(word: &str, negative: bool) -> Self {
        Term { word: word.to_ascii_uppercase(), negative }
    }
}

/// An equation between two sums of words, each letter standing for a digit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cryptarithm {
    left: Vec<Term>,
    right: Vec<Term>,
    base: u32,
}

fn sign(input: &str) -> PResult<'_, bool> {
    alt((value(false, char('+')), value(true, char('-')))).parse(input)
}

fn term(input: &str) -> PResult<'_, Term> {
    map(pair(sign, alpha1), |(negative, word)| Term::new(word, negative)).parse(input)
}

fn first_term(input: &str) -> PResult<'_, Term> {
    map(pair(opt(sign), alpha1), |(negative, word)| Term::new(word, negative == Some(true)))
        .parse(input)
}

fn side(input: &str) -> PResult<'_, Vec<Term>> {
    let (input, first) = first_term(input)?;
    let (input, mut rest) = many0(term).parse(input)?;
    rest.insert(0, first);
    Ok((input, rest))
}

fn equation(input: &str) -> PResult<'_, (Vec<Term>, Vec<Term>)> {
    separated_pair(side, char('='), side).parse(input)
}

fn malformed(equation: &str, reason: &str) -> Box<ParseError> {
    Box::new(ParseError::MalformedEquation {
        equation: equation.to_string(),
        reason: reason.to_string(),
    })
}

fn terms_from_words(words: &[&str]) -> Result<Vec<Term>, Box<ParseError>> {
    if words.is_empty() {
        return Err(malformed("", "a side has no words"));
    }
    words
        .iter()
        .map(|w| {
            if w.is_empty() || !w.chars().all(|c| c.is_ascii_alphabetic()) {
                Err(malformed(&words.join(" + "), &format!("'{w}' is not a word")))
            } else {
                Ok(Term::new(w, false))
            }
        })
        .collect()
}

impl FromStr for Cryptarithm {
    type Err = Box<ParseError>;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let compact: String = s.chars().filter(|c| !c.is_whitespace()).collect();
        match compact.matches('=').count() {
            0 => return Err(malformed(s, "missing '='")),
            1 => {}
            _ => return Err(malformed(s, "more than one '='")),
        }

        let (rest, (left, right)) = equation(&compact)
            .map_err(|_| malformed(s, "expected words joined by '+' or '-'"))?;
        if !rest.is_empty() {
            return Err(malformed(s, &format!("unexpected '{rest}'")));
        }
        Ok(Cryptarithm { left, right, base: DEFAULT_BASE })
    }
}

impl Cryptarithm {
    /// `left[0] + left[1] + ... = right[0] + ...`, in base 10.
    ///
    /// # Errors
    ///
    /// [`ParseError::MalformedEquation`] if a side is empty or a word has
    /// anything but ASCII letters.
    pub fn from_terms(left: &[&str], right: &[&str]) -> Result<Self, Box<ParseError>> {
        Ok(Cryptarithm {
            left: terms_from_words(left)?,
            right: terms_from_words(right)?,
            base: DEFAULT_BASE,
        })
    }

    /// # Errors
    ///
    /// [`ParseError::InvalidBase`] unless `base` is in 2..=36.
    pub fn with_base(self, base: u32) -> Result<Self, Box<ParseError>> {
        if !(2..=MAX_BASE).contains(&base) {
            return Err(Box::new(ParseError::InvalidBase { base }));
        }
        Ok(Cryptarithm { base, ..self })
    }

    #[must_use]
    pub fn base(&self) -> u32 {
        self.base
    }

    fn terms(&self) -> impl Iterator<Item = &Term> {
        self.left.iter().chain(&self.right)
    }

    /// Distinct letters in order of first appearance.
    #[must_use]
    pub fn letters(&self) -> Vec<char> {
        let mut letters = Vec::new();
        for c in self.terms().flat_map(|t| t.word.chars()) {
            if !letters.contains(&c) {
                letters.push(c);
            }
        }
        letters
    }

    /// First letters of multi-letter words; these cannot be zero.
    fn leading_letters(&self) -> Vec<char> {
        let mut leading = Vec::new();
        for t in self.terms().filter(|t| t.word.len() > 1) {
            if let Some(c) = t.word.chars().next() && !leading.contains(&c) {
                leading.push(c);
            }
        }
        leading
    }

    /// Compile to a constraint problem over the letters.
    ///
    /// # Errors
    ///
    /// [`SolverError::TooManyLetters`] if there are more letters than digits,
    /// [`SolverError::CoefficientOverflow`] if a positional weight does not
    /// fit in an `i64`.
    pub fn to_problem(&self) -> Result<ConstraintProblem, SolverError> {
        let letters = self.letters();
        if letters.len() > self.base as usize {
            return Err(SolverError::TooManyLetters { letters: letters.len(), base: self.base });
        }

        let mut problem = ConstraintProblem::default();
        for &c in &letters {
            problem.add_variable(c, Domain::range(0..=self.base - 1))?;
        }
        for c in self.leading_letters() {
            problem.restrict(c, Domain::range(1..=self.base - 1))?;
        }

        let mut terms = Vec::new();
        let signed = self.left.iter().map(|t| (t, 1)).chain(self.right.iter().map(|t| (t, -1)));
        for (term, side_sign) in signed {
            let sign = if term.negative { -side_sign } else { side_sign };
            let mut weight: i64 = 1;
            for (i, c) in term.word.chars().rev().enumerate() {
                if i > 0 {
                    weight = weight.checked_mul(i64::from(self.base)).ok_or_else(|| {
                        SolverError::CoefficientOverflow { context: format!("place {i} of {}", term.word) }
                    })?;
                }
                terms.push((c, sign * weight));
            }
        }
        problem.add_linear(&terms, 0)?;
        problem.add_all_different(&letters)?;

        debug!("{self} (base {}) -> {:?}", self.base, problem.constraints());
        Ok(problem)
    }

    /// All solutions, subject to `opts`.
    ///
    /// # Errors
    ///
    /// Any error from [`Cryptarithm::to_problem`].
    pub fn solve(&self, opts: &SearchOptions) -> Result<SolveResult, SolverError> {
        solve(&self.to_problem()?, opts)
    }

    /// True if `assignment` is a valid solution: every letter has its own
    /// digit, leading letters are nonzero, and the arithmetic holds.
    #[must_use]
    pub fn check(&self, assignment: &Assignment) -> bool {
        let letters = self.letters();
        let mut used = Vec::with_capacity(letters.len());
        for c in &letters {
            match assignment.get(c) {
                Some(&v) if v < self.base && !used.contains(&v) => used.push(v),
                _ => return false,
            }
        }
        if self.leading_letters().iter().any(|c| assignment.get(c) == Some(&0)) {
            return false;
        }

        let side_value = |terms: &[Term]| -> Option<i128> {
            let mut total = 0i128;
            for t in terms {
                let mut n = 0i128;
                for c in t.word.chars() {
                    n = n.checked_mul(i128::from(self.base))?.checked_add(i128::from(*assignment.get(&c)?))?;
                }
                total = if t.negative { total.checked_sub(n)? } else { total.checked_add(n)? };
            }
            Some(total)
        };
        matches!((side_value(&self.left), side_value(&self.right)), (Some(l), Some(r)) if l == r)
    }

    /// The equation with each letter replaced by its digit. Digits above 9
    /// print as `a`-`z`; unassigned letters stay as they are.
    #[must_use]
    pub fn render(&self, assignment: &Assignment) -> String {
        self.format_with(|c| {
            assignment.get(&c).and_then(|&v| char::from_digit(v, self.base)).unwrap_or(c)
        })
    }

    fn format_with<F: Fn(char) -> char>(&self, symbol: F) -> String {
        let side = |terms: &[Term]| {
            let mut out = String::new();
            for (i, t) in terms.iter().enumerate() {
                match (i, t.negative) {
                    (0, true) => out.push('-'),
                    (0, false) => {}
                    (_, true) => out.push_str(" - "),
                    (_, false) => out.push_str(" + "),
                }
                out.extend(t.word.chars().map(&symbol));
            }
            out
        };
        format!("{} = {}", side(&self.left), side(&self.right))
    }
}

impl fmt::Display for Cryptarithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.format_with(|c| c))
    }
}

/// A word that completes a cryptarithm, with its first solution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Completion {
    pub word: String,
    pub solution: Assignment,
    /// the equation with digits substituted
    pub rendered: String,
}

#[derive(Debug, Clone)]
pub struct CompletionResult {
    pub completions: Vec<Completion>,
    pub status: SearchStatus,
}

/// Find words for the right-hand side of `left_terms[0] + ... = ?`.
///
/// Words from `word_list` that match `result_pattern` are proposed in ranked
/// order. A word is kept if the resulting base-10 cryptarithm has a solution.
/// Words with too many distinct letters are skipped.
///
/// # Errors
///
/// [`SolverError::ParseFailure`] if `left_terms` are not all words.
pub fn complete_from_word_list(
    left_terms: &[&str],
    result_pattern: &Pattern,
    word_list: &WordList,
    opts: &SearchOptions,
) -> Result<CompletionResult, SolverError> {
    terms_from_words(left_terms)?;
    let budget = opts.start_budget();
    let candidates = find_matches(
        result_pattern,
        word_list,
        &SearchOptions::unlimited().with_time_budget(opts.time_budget),
    );
    debug!("{} candidate words for {} = {result_pattern}", candidates.matches.len(), left_terms.join(" + "));

    let mut completions = Vec::new();
    for word in candidates.matches.values() {
        if completions.len() >= opts.limit {
            break;
        }
        timed_stop!(budget, Ok(CompletionResult {
            status: SearchStatus::from_run(&budget, completions.len(), opts.limit),
            completions,
        }));

        let puzzle = Cryptarithm::from_terms(left_terms, &[word.as_str()])?;
        let problem = match puzzle.to_problem() {
            Ok(problem) => problem,
            Err(e @ (SolverError::TooManyLetters { .. } | SolverError::CoefficientOverflow { .. })) => {
                trace!("skipping {word}: {e}");
                continue;
            }
            Err(e) => return Err(e),
        };

        let per_word = SearchOptions::default().with_limit(1).with_time_budget(budget.remaining());
        if let Some(solution) = solve(&problem, &per_word)?.solutions.into_iter().next() {
            completions.push(Completion {
                word: word.clone(),
                rendered: puzzle.render(&solution),
                solution,
            });
        }
    }

    let status = SearchStatus::from_run(&budget, completions.len(), opts.limit);
    Ok(CompletionResult { completions, status })
}
