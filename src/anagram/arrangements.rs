/// Iterator over the distinct orderings of `k` items drawn from a multiset.
///
/// Equal items are interchangeable, so "aab" yields `aab`, `aba`, `baa` and
/// nothing else. Orderings come out in lexicographic order.
///
/// The search keeps one stack of chosen symbol indices and a count of each
/// symbol still available. Advancing pops the last choice, tries the next
/// larger symbol in its place, and refills the tail with the smallest
/// available symbols.
#[derive(Debug, Clone)]
pub struct Arrangements<T> {
    /// distinct symbols, sorted
    symbols: Vec<T>,
    /// how many copies of each symbol are not on the stack
    remaining: Vec<usize>,
    stack: Vec<usize>,
    k: usize,
    started: bool,
    done: bool,
}

impl<T: Ord + Clone> Arrangements<T> {
    /// Orderings of length `k`. A `k` larger than the multiset yields nothing;
    /// `k == 0` yields a single empty ordering.
    pub fn new<I: IntoIterator<Item = T>>(items: I, k: usize) -> Self {
        let mut items: Vec<T> = items.into_iter().collect();
        items.sort();

        let mut symbols: Vec<T> = Vec::new();
        let mut remaining: Vec<usize> = Vec::new();
        for item in items {
            if symbols.last() == Some(&item) {
                if let Some(n) = remaining.last_mut() {
                    *n += 1;
                }
            } else {
                symbols.push(item);
                remaining.push(1);
            }
        }

        Arrangements {
            symbols,
            remaining,
            stack: Vec::with_capacity(k),
            k,
            started: false,
            done: false,
        }
    }

    /// Orderings that use every item.
    pub fn permutations<I: IntoIterator<Item = T>>(items: I) -> Self {
        let items: Vec<T> = items.into_iter().collect();
        let k = items.len();
        Self::new(items, k)
    }

    fn next_available(&self, from: usize) -> Option<usize> {
        (from..self.symbols.len()).find(|&j| self.remaining[j] > 0)
    }

    fn take(&mut self, j: usize) {
        self.remaining[j] -= 1;
        self.stack.push(j);
    }

    /// Extend the stack to `k` with the smallest symbols available.
    fn fill(&mut self) -> bool {
        while self.stack.len() < self.k {
            let Some(j) = self.next_available(0) else {
                return false;
            };
            self.take(j);
        }
        true
    }

    /// Step to the next ordering in lexicographic order.
    fn advance(&mut self) -> bool {
        while let Some(i) = self.stack.pop() {
            self.remaining[i] += 1;
            if let Some(j) = self.next_available(i + 1) {
                self.take(j);
                return self.fill();
            }
        }
        false
    }
}

impl<T: Ord + Clone> Iterator for Arrangements<T> {
    type Item = Vec<T>;

    fn next(&mut self) -> Option<Vec<T>> {
        if self.done {
            return None;
        }

        let found = if self.started {
            self.advance()
        } else {
            self.started = true;
            self.fill()
        };

        if !found {
            self.done = true;
            return None;
        }
        Some(self.stack.iter().map(|&i| self.symbols[i].clone()).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strings(items: &str, k: usize) -> Vec<String> {
        Arrangements::new(items.chars(), k)
            .map(|v| v.into_iter().collect())
            .collect()
    }

    fn factorial(n: usize) -> usize {
        (1..=n).product()
    }

    #[test]
    fn test_distinct_items() {
        assert_eq!(strings("cab", 3), vec!["abc", "acb", "bac", "bca", "cab", "cba"]);
    }

    #[test]
    fn test_repeated_items_yield_each_ordering_once() {
        assert_eq!(strings("aba", 3), vec!["aab", "aba", "baa"]);
    }

    #[test]
    fn test_count_is_multinomial() {
        // 11! / (4! 4! 2!) for "mississippi"
        let count = Arrangements::permutations("mississippi".chars()).count();
        let expected = factorial(11) / (factorial(4) * factorial(4) * factorial(2));
        assert_eq!(count, expected);
    }

    #[test]
    fn test_partial_length() {
        assert_eq!(strings("aab", 2), vec!["aa", "ab", "ba"]);
        assert_eq!(strings("abc", 1), vec!["a", "b", "c"]);
    }

    #[test]
    fn test_k_zero_yields_one_empty_ordering() {
        let all: Vec<Vec<char>> = Arrangements::new("abc".chars(), 0).collect();
        assert_eq!(all, vec![Vec::<char>::new()]);
    }

    #[test]
    fn test_k_too_large_yields_nothing() {
        assert_eq!(Arrangements::new("ab".chars(), 3).count(), 0);
    }

    #[test]
    fn test_empty_multiset() {
        assert_eq!(Arrangements::<char>::permutations(Vec::new()).count(), 1);
    }

    #[test]
    fn test_non_char_items() {
        let all: Vec<Vec<&str>> = Arrangements::permutations(["ing", "st", "st"]).collect();
        assert_eq!(all, vec![
            vec!["ing", "st", "st"],
            vec!["st", "ing", "st"],
            vec!["st", "st", "ing"],
        ]);
    }

    #[test]
    fn test_exhausted_iterator_stays_exhausted() {
        let mut it = Arrangements::new("a".chars(), 1);
        assert_eq!(it.next(), Some(vec!['a']));
        assert_eq!(it.next(), None);
        assert_eq!(it.next(), None);
    }
}
