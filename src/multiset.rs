//! Token multisets (bags).
//!
//! A multiset maps each token to a non-negative count. Order is irrelevant
//! to the semantics, but iteration follows insertion order (via `IndexMap`)
//! so that greedy fuzzy matching and group linkage are reproducible run to
//! run. A multiset is produced once per input string and not mutated
//! afterwards.

use indexmap::IndexMap;

/// Token → count mapping. Counts are real-valued to serve the coefficient
/// layer, but tokenizers only ever produce whole counts.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TokenMultiset {
    counts: IndexMap<String, f64>,
}

impl TokenMultiset {
    /// Empty multiset.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add one occurrence of `token`.
    pub fn insert(&mut self, token: impl Into<String>) {
        *self.counts.entry(token.into()).or_insert(0.0) += 1.0;
    }

    /// Add `count` occurrences of `token`. Non-positive counts are ignored;
    /// a multiset never stores a negative count.
    pub fn insert_count(&mut self, token: impl Into<String>, count: f64) {
        if count > 0.0 {
            *self.counts.entry(token.into()).or_insert(0.0) += count;
        }
    }

    /// Count for `token`, `0` when absent.
    pub fn count(&self, token: &str) -> f64 {
        self.counts.get(token).copied().unwrap_or(0.0)
    }

    /// Sum of all counts.
    pub fn total(&self) -> f64 {
        self.counts.values().sum()
    }

    /// Number of distinct tokens.
    pub fn distinct(&self) -> usize {
        self.counts.len()
    }

    /// Whether no token is present.
    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// Tokens with counts, in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> {
        self.counts.iter().map(|(token, &count)| (token.as_str(), count))
    }
}

impl<S: Into<String>> FromIterator<S> for TokenMultiset {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        let mut set = TokenMultiset::new();
        for token in iter {
            set.insert(token);
        }
        set
    }
}

mod test {
    use super::*;

    #[test]
    fn test_counts_accumulate() {
        let set: TokenMultiset = ["ab", "ab", "bc"].into_iter().collect();
        assert_eq!(set.count("ab"), 2.0);
        assert_eq!(set.count("bc"), 1.0);
        assert_eq!(set.count("zz"), 0.0);
        assert_eq!(set.total(), 3.0);
        assert_eq!(set.distinct(), 2);
    }

    #[test]
    fn test_non_positive_counts_ignored() {
        let mut set = TokenMultiset::new();
        set.insert_count("ab", -2.0);
        set.insert_count("cd", 0.0);
        assert!(set.is_empty());
    }

    #[test]
    fn test_iteration_is_insertion_ordered() {
        let set: TokenMultiset = ["c", "a", "b"].into_iter().collect();
        let order: Vec<&str> = set.iter().map(|(token, _)| token).collect();
        assert_eq!(order, ["c", "a", "b"]);
    }
}
