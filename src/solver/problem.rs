use std::collections::BTreeMap;
use std::fmt;
use std::ops::RangeInclusive;
use std::rc::Rc;

use super::SolverError;

/// Largest value a [`Domain`] can hold.
pub const MAX_VALUE: u32 = 63;

/// A value for each assigned variable, ordered by variable name.
pub type Assignment = BTreeMap<char, u32>;

/// A set of small non-negative integers (0..=63), stored as a bitmask.
#[derive(Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Domain(u64);

impl Domain {
    #[must_use]
    pub fn empty() -> Self {
        Domain(0)
    }

    /// Every value in `range`. Values above [`MAX_VALUE`] are dropped.
    #[must_use]
    pub fn range(range: RangeInclusive<u32>) -> Self {
        let (lo, hi) = (*range.start(), (*range.end()).min(MAX_VALUE));
        if lo > hi {
            return Domain::empty();
        }
        let upper = if hi == MAX_VALUE { u64::MAX } else { (1u64 << (hi + 1)) - 1 };
        Domain(upper & (u64::MAX << lo))
    }

    /// The given values. Values above [`MAX_VALUE`] are dropped.
    #[must_use]
    pub fn from_values<I: IntoIterator<Item = u32>>(values: I) -> Self {
        let mut domain = Domain::empty();
        for v in values {
            domain.insert(v);
        }
        domain
    }

    pub fn insert(&mut self, value: u32) {
        if value <= MAX_VALUE {
            self.0 |= 1 << value;
        }
    }

    pub fn remove(&mut self, value: u32) {
        if value <= MAX_VALUE {
            self.0 &= !(1 << value);
        }
    }

    #[must_use]
    pub fn contains(&self, value: u32) -> bool {
        value <= MAX_VALUE && self.0 & (1 << value) != 0
    }

    #[must_use]
    pub fn intersect(&self, other: &Domain) -> Domain {
        Domain(self.0 & other.0)
    }

    #[must_use]
    pub fn min(&self) -> Option<u32> {
        (!self.is_empty()).then(|| self.0.trailing_zeros())
    }

    #[must_use]
    pub fn max(&self) -> Option<u32> {
        (!self.is_empty()).then(|| MAX_VALUE - self.0.leading_zeros())
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.count_ones() as usize
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0 == 0
    }

    /// Values in increasing order.
    pub fn iter(&self) -> impl Iterator<Item = u32> + use<> {
        let bits = self.0;
        (0..=MAX_VALUE).filter(move |&v| bits & (1 << v) != 0)
    }
}

impl fmt::Debug for Domain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.iter()).finish()
    }
}

/// A predicate over a (partial) assignment.
pub type PredicateFn = Rc<dyn Fn(&Assignment) -> bool>;

/// One constraint of a [`ConstraintProblem`].
#[derive(Clone)]
pub enum Constraint {
    /// Σ coef·var = rhs
    Linear { terms: Vec<(char, i64)>, rhs: i64 },
    /// Every listed variable takes a different value.
    AllDifferent(Vec<char>),
    /// Arbitrary check, run once every variable in `vars` has a value.
    Predicate { label: String, vars: Vec<char>, check: PredicateFn },
}

impl Constraint {
    /// Variables this constraint mentions.
    #[must_use]
    pub fn variables(&self) -> Vec<char> {
        match self {
            Constraint::Linear { terms, .. } => terms.iter().map(|(v, _)| *v).collect(),
            Constraint::AllDifferent(vars) | Constraint::Predicate { vars, .. } => vars.clone(),
        }
    }
}

impl fmt::Debug for Constraint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{self}")
    }
}

impl fmt::Display for Constraint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Constraint::Linear { terms, rhs } => {
                for (i, (var, coef)) in terms.iter().enumerate() {
                    match (i, coef.is_negative()) {
                        (0, false) => write!(f, "{coef}{var}")?,
                        (0, true) => write!(f, "-{}{var}", coef.unsigned_abs())?,
                        (_, false) => write!(f, " + {coef}{var}")?,
                        (_, true) => write!(f, " - {}{var}", coef.unsigned_abs())?,
                    }
                }
                if terms.is_empty() {
                    write!(f, "0")?;
                }
                write!(f, " = {rhs}")
            }
            Constraint::AllDifferent(vars) => {
                write!(f, "alldiff({})", vars.iter().collect::<String>())
            }
            Constraint::Predicate { label, vars, .. } => {
                write!(f, "{label}({})", vars.iter().collect::<String>())
            }
        }
    }
}

/// Variables with finite domains plus the constraints tying them together.
///
/// ```
/// use wordplay::budget::SearchOptions;
/// use wordplay::solver::{solve, ConstraintProblem, Domain};
///
/// let mut problem = ConstraintProblem::default();
/// problem.add_variable('X', Domain::range(0..=9))?;
/// problem.add_variable('Y', Domain::range(0..=9))?;
/// problem.add_linear(&[('X', 1), ('Y', 1)], 10)?;
/// problem.add_linear(&[('X', 1), ('Y', -1)], 4)?;
///
/// let result = solve(&problem, &SearchOptions::default())?;
/// assert_eq!(result.solutions.len(), 1);
/// assert_eq!(result.solutions[0][&'X'], 7);
/// # Ok::<(), wordplay::solver::SolverError>(())
/// ```
#[derive(Debug, Clone, Default)]
pub struct ConstraintProblem {
    variables: Vec<(char, Domain)>,
    constraints: Vec<Constraint>,
}

impl ConstraintProblem {
    /// Declare a variable.
    ///
    /// # Errors
    ///
    /// [`SolverError::DuplicateVariable`] if `name` is already declared,
    /// [`SolverError::EmptyDomain`] if `domain` is empty.
    pub fn add_variable(&mut self, name: char, domain: Domain) -> Result<(), SolverError> {
        if self.domain(name).is_some() {
            return Err(SolverError::DuplicateVariable { name });
        }
        if domain.is_empty() {
            return Err(SolverError::EmptyDomain { name });
        }
        self.variables.push((name, domain));
        Ok(())
    }

    /// Narrow a declared variable's domain to its intersection with `domain`.
    ///
    /// # Errors
    ///
    /// [`SolverError::UnknownVariable`] for an undeclared name,
    /// [`SolverError::EmptyDomain`] if nothing is left.
    pub fn restrict(&mut self, name: char, domain: Domain) -> Result<(), SolverError> {
        let slot = self
            .variables
            .iter_mut()
            .find(|(v, _)| *v == name)
            .ok_or(SolverError::UnknownVariable { name })?;
        let narrowed = slot.1.intersect(&domain);
        if narrowed.is_empty() {
            return Err(SolverError::EmptyDomain { name });
        }
        slot.1 = narrowed;
        Ok(())
    }

    /// Require Σ coef·var = rhs.
    ///
    /// Repeated variables have their coefficients summed, and terms whose
    /// coefficient ends up zero are dropped.
    ///
    /// # Errors
    ///
    /// [`SolverError::UnknownVariable`] for an undeclared name,
    /// [`SolverError::CoefficientOverflow`] if merged coefficients overflow.
    pub fn add_linear(&mut self, terms: &[(char, i64)], rhs: i64) -> Result<(), SolverError> {
        let mut merged: Vec<(char, i64)> = Vec::with_capacity(terms.len());
        for &(var, coef) in terms {
            self.check_declared(var)?;
            match merged.iter_mut().find(|(v, _)| *v == var) {
                Some((_, c)) => {
                    *c = c.checked_add(coef).ok_or_else(|| SolverError::CoefficientOverflow {
                        context: format!("coefficient of {var}"),
                    })?;
                }
                None => merged.push((var, coef)),
            }
        }
        merged.retain(|&(_, coef)| coef != 0);
        self.constraints.push(Constraint::Linear { terms: merged, rhs });
        Ok(())
    }

    /// Require the listed variables to take pairwise different values.
    ///
    /// A name listed more than once counts once.
    ///
    /// # Errors
    ///
    /// [`SolverError::UnknownVariable`] for an undeclared name.
    pub fn add_all_different(&mut self, vars: &[char]) -> Result<(), SolverError> {
        let mut distinct: Vec<char> = Vec::with_capacity(vars.len());
        for &var in vars {
            self.check_declared(var)?;
            if !distinct.contains(&var) {
                distinct.push(var);
            }
        }
        self.constraints.push(Constraint::AllDifferent(distinct));
        Ok(())
    }

    /// Add a named check that runs once all of `vars` are assigned.
    ///
    /// # Errors
    ///
    /// [`SolverError::UnknownVariable`] for an undeclared name.
    pub fn add_predicate<F>(&mut self, label: &str, vars: &[char], check: F) -> Result<(), SolverError>
    where
        F: Fn(&Assignment) -> bool + 'static,
    {
        for &var in vars {
            self.check_declared(var)?;
        }
        self.constraints.push(Constraint::Predicate {
            label: label.to_string(),
            vars: vars.to_vec(),
            check: Rc::new(check),
        });
        Ok(())
    }

    /// Declared variables with their domains, in declaration order.
    #[must_use]
    pub fn variables(&self) -> &[(char, Domain)] {
        &self.variables
    }

    #[must_use]
    pub fn constraints(&self) -> &[Constraint] {
        &self.constraints
    }

    #[must_use]
    pub fn domain(&self, name: char) -> Option<Domain> {
        self.variables.iter().find(|(v, _)| *v == name).map(|(_, d)| *d)
    }

    fn check_declared(&self, name: char) -> Result<(), SolverError> {
        match self.domain(name) {
            Some(_) => Ok(()),
            None => Err(SolverError::UnknownVariable { name }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_domain_range() {
        let d = Domain::range(2..=5);
        assert_eq!(d.iter().collect::<Vec<_>>(), vec![2, 3, 4, 5]);
        assert_eq!(d.len(), 4);
        assert_eq!(d.min(), Some(2));
        assert_eq!(d.max(), Some(5));
        assert!(Domain::range(5..=2).is_empty());
        assert_eq!(Domain::range(0..=100).len(), 64);
        assert_eq!(Domain::range(63..=63).max(), Some(63));
    }

    #[test]
    fn test_domain_edit() {
        let mut d = Domain::from_values([1, 3, 99]);
        assert_eq!(d.len(), 2);
        d.remove(1);
        d.insert(7);
        assert!(!d.contains(1));
        assert!(d.contains(7));
        assert!(!d.contains(99));
        assert_eq!(format!("{d:?}"), "{3, 7}");
        assert_eq!(Domain::empty().min(), None);
    }

    #[test]
    fn test_add_variable_errors() {
        let mut p = ConstraintProblem::default();
        p.add_variable('A', Domain::range(0..=9)).unwrap();
        assert!(matches!(
            p.add_variable('A', Domain::range(0..=9)),
            Err(SolverError::DuplicateVariable { name: 'A' })
        ));
        assert!(matches!(
            p.add_variable('B', Domain::empty()),
            Err(SolverError::EmptyDomain { name: 'B' })
        ));
    }

    #[test]
    fn test_restrict() {
        let mut p = ConstraintProblem::default();
        p.add_variable('A', Domain::range(0..=9)).unwrap();
        p.restrict('A', Domain::range(5..=20)).unwrap();
        assert_eq!(p.domain('A'), Some(Domain::range(5..=9)));
        assert!(matches!(p.restrict('A', Domain::range(0..=4)), Err(SolverError::EmptyDomain { .. })));
        assert!(matches!(p.restrict('Z', Domain::range(0..=4)), Err(SolverError::UnknownVariable { .. })));
    }

    #[test]
    fn test_add_linear_merges_terms() {
        let mut p = ConstraintProblem::default();
        p.add_variable('A', Domain::range(0..=9)).unwrap();
        p.add_variable('B', Domain::range(0..=9)).unwrap();
        p.add_linear(&[('A', 10), ('B', 1), ('A', -10), ('B', 2)], 6).unwrap();
        assert_eq!(p.constraints()[0].to_string(), "3B = 6");
        assert_eq!(p.constraints()[0].variables(), vec!['B']);
    }

    #[test]
    fn test_add_linear_keeps_constraint_when_terms_cancel() {
        let mut p = ConstraintProblem::default();
        p.add_variable('A', Domain::range(0..=9)).unwrap();
        p.add_linear(&[('A', 1), ('A', -1)], 5).unwrap();
        assert_eq!(p.constraints()[0].to_string(), "0 = 5");
        assert!(p.constraints()[0].variables().is_empty());
    }

    #[test]
    fn test_all_different_dedupes_names() {
        let mut p = ConstraintProblem::default();
        p.add_variable('A', Domain::range(0..=9)).unwrap();
        p.add_variable('B', Domain::range(0..=9)).unwrap();
        p.add_all_different(&['A', 'B', 'A']).unwrap();
        assert_eq!(p.constraints()[0].variables(), vec!['A', 'B']);
    }

    #[test]
    fn test_constraints_reject_unknown_variables() {
        let mut p = ConstraintProblem::default();
        p.add_variable('A', Domain::range(0..=9)).unwrap();
        assert!(matches!(p.add_linear(&[('Q', 1)], 0), Err(SolverError::UnknownVariable { name: 'Q' })));
        assert!(p.add_all_different(&['A', 'Q']).is_err());
        assert!(p.add_predicate("even", &['Q'], |_| true).is_err());
        assert!(p.constraints().is_empty());
    }

    #[test]
    fn test_constraint_display() {
        let mut p = ConstraintProblem::default();
        p.add_variable('A', Domain::range(0..=9)).unwrap();
        p.add_variable('B', Domain::range(0..=9)).unwrap();
        p.add_linear(&[('A', -2), ('B', 3)], 1).unwrap();
        p.add_all_different(&['A', 'B']).unwrap();
        p.add_predicate("even", &['A'], |a| a[&'A'] % 2 == 0).unwrap();
        let shown: Vec<String> = p.constraints().iter().map(ToString::to_string).collect();
        assert_eq!(shown, vec!["-2A + 3B = 1", "alldiff(AB)", "even(A)"]);
    }
}
