//! Word probabilities and ranked result lists.

use std::cmp::Ordering;
use std::fmt;
use std::ops::Mul;

/// A probability, stored as a negative log probability so that products of
/// many small word probabilities never underflow an `f64`.
///
/// A probability of 0 is not representable. An impossible word is simply
/// absent from the word list.
#[derive(Clone, Copy, PartialEq)]
pub struct Prob(f64);

impl Prob {
    /// The probability of an event which always happens.
    #[must_use]
    pub fn always() -> Self {
        Prob(0.0)
    }

    /// Construct a probability from `num / denom`.
    ///
    /// `num` must be at most `denom`, and `denom` must be nonzero.
    #[must_use]
    pub fn from_fraction(num: u64, denom: u64) -> Self {
        debug_assert!(denom > 0 && num <= denom, "invalid fraction {num}/{denom}");
        Prob(-f64::ln(num as f64 / denom as f64))
    }

    /// The negative log probability.
    #[must_use]
    pub fn neg_log(self) -> f64 {
        self.0
    }

    /// The plain probability in `(0, 1]`.
    #[must_use]
    pub fn value(self) -> f64 {
        (-self.0).exp()
    }
}

impl fmt::Debug for Prob {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&self.0, f)
    }
}

impl fmt::Display for Prob {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

impl Mul for Prob {
    type Output = Self;
    fn mul(self, rhs: Self) -> Self {
        Prob(self.0 + rhs.0)
    }
}

impl PartialOrd for Prob {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        // flipped: a smaller negative log is a more likely event
        other.0.partial_cmp(&self.0)
    }
}

/// A ranked list of outcomes, each paired with its probability.
///
/// The probabilities need not sum to 1. An empty distribution means nothing
/// matched.
#[derive(Debug, Clone)]
pub struct Dist<T>(Vec<(Prob, T)>);

impl<T> Default for Dist<T> {
    fn default() -> Self {
        Dist(Vec::new())
    }
}

impl<T> Dist<T> {
    /// Construct a distribution from a vector of events.
    #[must_use]
    pub fn from_vec(v: Vec<(Prob, T)>) -> Self {
        Dist(v)
    }

    pub fn push(&mut self, prob: Prob, value: T) {
        self.0.push((prob, value));
    }

    /// Sort in order of descending probability. Ties keep their insertion order.
    pub fn sort_by_probability(&mut self) {
        self.0.sort_by(|(a, _), (b, _)| a.0.total_cmp(&b.0));
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn truncate(&mut self, len: usize) {
        self.0.truncate(len);
    }

    pub fn iter(&self) -> impl Iterator<Item = (Prob, &T)> {
        self.0.iter().map(|(prob, value)| (*prob, value))
    }

    /// The outcomes alone, in their current order.
    pub fn values(&self) -> impl Iterator<Item = &T> {
        self.0.iter().map(|(_, value)| value)
    }

    #[must_use]
    pub fn into_values(self) -> Vec<T> {
        self.0.into_iter().map(|(_, value)| value).collect()
    }
}

impl<T: fmt::Display> fmt::Display for Dist<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (p, v) in &self.0 {
            writeln!(f, "{:6.2} {}", p, v)?;
        }
        Ok(())
    }
}

impl<T> IntoIterator for Dist<T> {
    type Item = (Prob, T);
    type IntoIter = std::vec::IntoIter<(Prob, T)>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}
