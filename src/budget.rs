//! Search limits shared by the matcher, the anagram engine and the solver.
//!
//! Every search is bounded twice: by a maximum number of results and by a
//! wall-clock [`TimeBudget`]. The outcome is reported as a [`SearchStatus`].

use instant::Instant;
use std::time::Duration;

/// Number of results returned when the caller does not say otherwise.
pub const DEFAULT_LIMIT: usize = 100;
/// The amount of time (in seconds) a search may run by default.
pub const DEFAULT_TIME_BUDGET: u64 = 30;

/// Caller-tunable knobs for a search.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchOptions {
    /// Stop after this many results.
    pub limit: usize,
    /// Stop once this much wall-clock time has passed.
    pub time_budget: Duration,
}

impl Default for SearchOptions {
    fn default() -> Self {
        SearchOptions {
            limit: DEFAULT_LIMIT,
            time_budget: Duration::from_secs(DEFAULT_TIME_BUDGET),
        }
    }
}

impl SearchOptions {
    /// No result cap; only the time budget applies.
    #[must_use]
    pub fn unlimited() -> Self {
        SearchOptions { limit: usize::MAX, ..Self::default() }
    }

    #[must_use]
    pub fn with_limit(self, limit: usize) -> Self {
        SearchOptions { limit, ..self }
    }

    #[must_use]
    pub fn with_time_budget(self, time_budget: Duration) -> Self {
        SearchOptions { time_budget, ..self }
    }

    /// How many results a scan may collect before stopping.
    ///
    /// Weighted results are ranked after the scan, so the scan cannot stop at
    /// `limit` without possibly missing a more probable result.
    pub(crate) fn scan_limit(&self, weighted: bool) -> usize {
        if weighted { usize::MAX } else { self.limit }
    }

    pub(crate) fn start_budget(&self) -> TimeBudget {
        TimeBudget::new(self.time_budget)
    }
}

/// How a search ended.
#[derive(Debug, Clone, PartialEq)]
pub enum SearchStatus {
    /// Every candidate was examined without reaching the requested number.
    Exhausted,

    /// Stopped early because the requested number of results was found.
    FoundEnough,

    /// Stopped because the time budget expired. Contains the elapsed time.
    TimedOut { elapsed: Duration },
}

impl SearchStatus {
    /// Pick the status for a finished run. Timeouts take precedence.
    pub(crate) fn from_run(budget: &TimeBudget, found: usize, limit: usize) -> Self {
        if budget.expired() {
            SearchStatus::TimedOut { elapsed: budget.elapsed() }
        } else if found >= limit {
            SearchStatus::FoundEnough
        } else {
            SearchStatus::Exhausted
        }
    }
}

/// Simple helper to enforce a wall-clock time limit.
///
/// ```ignore
/// let budget = TimeBudget::new(Duration::from_secs(30));
/// while !budget.expired() {
///     // do some work
/// }
/// ```
#[derive(Debug)]
pub(crate) struct TimeBudget {
    start: Instant,
    limit: Duration,
}

impl TimeBudget {
    pub(crate) fn new(limit: Duration) -> Self {
        Self { start: Instant::now(), limit }
    }

    pub(crate) fn elapsed(&self) -> Duration {
        self.start.elapsed()
    }

    pub(crate) fn expired(&self) -> bool {
        self.start.elapsed() >= self.limit
    }

    pub(crate) fn remaining(&self) -> Duration {
        self.limit.saturating_sub(self.elapsed())
    }
}

/// Return early from the enclosing function once `$budget` has expired.
macro_rules! timed_stop {
    ($budget:expr) => {
        if $budget.expired() {
            return;
        }
    };
    ($budget:expr, $ret_expr:expr) => {
        if $budget.expired() {
            return $ret_expr;
        }
    };
}
pub(crate) use timed_stop;
