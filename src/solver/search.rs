use std::cmp::Reverse;

use log::{debug, info};

use crate::budget::{timed_stop, SearchOptions, SearchStatus, TimeBudget};

use super::problem::{Assignment, Constraint, ConstraintProblem, Domain, PredicateFn};
use super::SolverError;

/// Successful solver run (even if it stopped early).
#[derive(Debug, Clone)]
pub struct SolveResult {
    /// Solutions discovered (may be fewer than requested if timed out).
    pub solutions: Vec<Assignment>,
    /// Status indicating whether we finished or timed out.
    pub status: SearchStatus,
}

impl SolveResult {
    #[must_use]
    pub fn len(&self) -> usize {
        self.solutions.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.solutions.is_empty()
    }
}

impl IntoIterator for SolveResult {
    type Item = Assignment;
    type IntoIter = std::vec::IntoIter<Self::Item>;

    fn into_iter(self) -> Self::IntoIter {
        self.solutions.into_iter()
    }
}

/// A constraint with variable names replaced by indices into the problem's
/// variable list.
enum Check {
    Linear { terms: Vec<(usize, i64)>, rhs: i64 },
    AllDifferent(Vec<usize>),
    Predicate { vars: Vec<usize>, check: PredicateFn },
}

/// Find assignments satisfying every constraint of `problem`.
///
/// Depth-first search over a static variable order: largest absolute linear
/// coefficient first, then smallest domain. Each new value is checked against
/// the constraints that mention its variable before the search descends:
/// - `AllDifferent`: no assigned peer already holds the value.
/// - `Linear`: the right-hand side is still reachable given the domain bounds
///   of the unassigned terms.
/// - `Predicate`: evaluated once all of its variables are assigned.
///
/// # Errors
///
/// [`SolverError::NoVariables`] if the problem declares no variables.
pub fn solve(problem: &ConstraintProblem, opts: &SearchOptions) -> Result<SolveResult, SolverError> {
    if problem.variables().is_empty() {
        return Err(SolverError::NoVariables);
    }

    let mut search = Search::new(problem, opts);
    debug!(
        "solving {} variables, {} constraints; order {:?}",
        search.names.len(),
        search.checks.len(),
        search.order.iter().map(|&i| search.names[i]).collect::<String>()
    );

    if search.ground_checks_hold() {
        search.recurse(0);
    } else {
        debug!("a constraint without variables fails; no solutions");
    }

    let status = SearchStatus::from_run(&search.budget, search.solutions.len(), opts.limit);
    if let SearchStatus::TimedOut { elapsed } = status {
        info!("solver timed out after {elapsed:?} with {} solutions", search.solutions.len());
    }
    Ok(SolveResult { solutions: search.solutions, status })
}

struct Search {
    names: Vec<char>,
    domains: Vec<Domain>,
    order: Vec<usize>,
    checks: Vec<Check>,
    /// for each variable, the checks that mention it
    watchers: Vec<Vec<usize>>,
    values: Vec<Option<u32>>,
    solutions: Vec<Assignment>,
    limit: usize,
    budget: TimeBudget,
}

impl Search {
    fn new(problem: &ConstraintProblem, opts: &SearchOptions) -> Self {
        let names: Vec<char> = problem.variables().iter().map(|(v, _)| *v).collect();
        let domains: Vec<Domain> = problem.variables().iter().map(|(_, d)| *d).collect();
        let index_of = |var: char| names.iter().position(|&v| v == var).unwrap_or_default();

        let mut weight = vec![0u64; names.len()];
        let checks: Vec<Check> = problem
            .constraints()
            .iter()
            .map(|c| match c {
                Constraint::Linear { terms, rhs } => {
                    let terms: Vec<(usize, i64)> =
                        terms.iter().map(|&(v, coef)| (index_of(v), coef)).collect();
                    for &(i, coef) in &terms {
                        weight[i] = weight[i].max(coef.unsigned_abs());
                    }
                    Check::Linear { terms, rhs: *rhs }
                }
                Constraint::AllDifferent(vars) => {
                    Check::AllDifferent(vars.iter().map(|&v| index_of(v)).collect())
                }
                Constraint::Predicate { vars, check, .. } => Check::Predicate {
                    vars: vars.iter().map(|&v| index_of(v)).collect(),
                    check: check.clone(),
                },
            })
            .collect();

        let mut watchers = vec![Vec::new(); names.len()];
        for (ci, check) in checks.iter().enumerate() {
            let vars: Vec<usize> = match check {
                Check::Linear { terms, .. } => terms.iter().map(|&(i, _)| i).collect(),
                Check::AllDifferent(vars) | Check::Predicate { vars, .. } => vars.clone(),
            };
            for i in vars {
                if !watchers[i].contains(&ci) {
                    watchers[i].push(ci);
                }
            }
        }

        let mut order: Vec<usize> = (0..names.len()).collect();
        order.sort_by_key(|&i| (Reverse(weight[i]), domains[i].len()));

        Search {
            values: vec![None; names.len()],
            names,
            domains,
            order,
            checks,
            watchers,
            solutions: Vec::new(),
            limit: opts.limit,
            budget: opts.start_budget(),
        }
    }

    fn recurse(&mut self, depth: usize) {
        if self.solutions.len() >= self.limit {
            return;
        }
        timed_stop!(self.budget);

        let Some(&var) = self.order.get(depth) else {
            self.solutions.push(self.assignment());
            return;
        };

        for value in self.domains[var].iter() {
            self.values[var] = Some(value);
            if self.consistent(var) {
                self.recurse(depth + 1);
            }
            self.values[var] = None;
            if self.solutions.len() >= self.limit {
                return;
            }
        }
    }

    /// Evaluate the checks that mention no variable. No watcher ever fires
    /// for them, so they are decided once before the search starts.
    fn ground_checks_hold(&self) -> bool {
        self.checks.iter().all(|c| match c {
            Check::Linear { terms, rhs } => !terms.is_empty() || *rhs == 0,
            Check::Predicate { vars, check } => !vars.is_empty() || check(&Assignment::new()),
            Check::AllDifferent(_) => true,
        })
    }

    /// The assigned variables as a name-to-value map.
    fn assignment(&self) -> Assignment {
        self.names
            .iter()
            .zip(&self.values)
            .filter_map(|(&name, value)| value.map(|v| (name, v)))
            .collect()
    }

    /// Check every constraint mentioning `var`, which was just assigned.
    fn consistent(&self, var: usize) -> bool {
        self.watchers[var].iter().all(|&ci| match &self.checks[ci] {
            Check::AllDifferent(vars) => {
                let value = self.values[var];
                vars.iter().all(|&other| other == var || self.values[other] != value)
            }
            Check::Linear { terms, rhs } => self.linear_reachable(terms, *rhs),
            Check::Predicate { vars, check } => {
                !vars.iter().all(|&i| self.values[i].is_some()) || check(&self.assignment())
            }
        })
    }

    /// True if Σ coef·var can still equal `rhs`, bounding each unassigned
    /// variable by its domain's min and max.
    fn linear_reachable(&self, terms: &[(usize, i64)], rhs: i64) -> bool {
        let (mut lo, mut hi) = (0i128, 0i128);
        for &(i, coef) in terms {
            let coef = i128::from(coef);
            let (min, max) = match self.values[i] {
                Some(v) => (v, v),
                None => match (self.domains[i].min(), self.domains[i].max()) {
                    (Some(min), Some(max)) => (min, max),
                    _ => return false,
                },
            };
            let (a, b) = (coef * i128::from(min), coef * i128::from(max));
            lo += a.min(b);
            hi += a.max(b);
        }
        (lo..=hi).contains(&i128::from(rhs))
    }
}
