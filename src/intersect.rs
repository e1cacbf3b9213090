//! Token-multiset intersection.
//!
//! Two token multisets reduce to four comparable cardinalities (src-only,
//! tar-only, intersection and the two totals) under one of four
//! intersection semantics. Exposing this single contract lets the
//! downstream coefficient layer (Dice, Jaccard, Tversky, ...) be one-line
//! arithmetic instead of each measure reimplementing intersection logic.

use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use log::{debug, trace};

use crate::align::Alignment;
use crate::config::AlignConfig;
use crate::error::ConfigError;
use crate::multiset::TokenMultiset;

/// Intersection semantics.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum IntersectionKind {
    /// Exact multiset intersection: per distinct token,
    /// `min(count_src, count_tar)`.
    #[default]
    Crisp,
    /// Crisp first; leftover tokens are paired greedily in descending
    /// similarity (each token consumed at most once) and pairs at or above
    /// the threshold contribute `similarity * min(leftover counts)`.
    ///
    /// This is a greedy approximation of the optimal bipartite assignment,
    /// kept deliberately: see the crate docs on open questions.
    Fuzzy,
    /// Every cross-pair contributes `similarity * min(counts)`, with no
    /// threshold and no exclusivity. Intended for vector/distributional-style
    /// coefficients; the intersection may exceed either total.
    Soft,
    /// Tokens linked by similarity at or above the threshold merge into
    /// connected components (union-find); each component then intersects
    /// crisply on its summed counts, capturing transitive near-matches.
    GroupLinkage,
}

impl IntersectionKind {
    fn name(&self) -> &'static str {
        match self {
            IntersectionKind::Crisp => "crisp",
            IntersectionKind::Fuzzy => "fuzzy",
            IntersectionKind::Soft => "soft",
            IntersectionKind::GroupLinkage => "group-linkage",
        }
    }
}

/// Parses an intersection kind name. Unknown names fail here, at
/// configuration time.
impl FromStr for IntersectionKind {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, ConfigError> {
        match s.to_ascii_lowercase().as_str() {
            "crisp" => Ok(Self::Crisp),
            "fuzzy" => Ok(Self::Fuzzy),
            "soft" => Ok(Self::Soft),
            "group-linkage" | "linkage" | "group" => Ok(Self::GroupLinkage),
            _ => Err(ConfigError::UnknownIntersection(s.to_owned())),
        }
    }
}

/// Auxiliary similarity metric comparing two tokens, in `[0, 1]`.
pub trait Similarity: Send + Sync {
    /// Similarity of `a` and `b`; `1` means identical.
    fn sim(&self, a: &str, b: &str) -> f64;
}

/// Default auxiliary metric: `1 -` normalized unit-cost simple edit
/// distance, computed by the alignment engine.
#[derive(Debug, Clone, Copy, Default)]
pub struct EditSimilarity;

impl Similarity for EditSimilarity {
    fn sim(&self, a: &str, b: &str) -> f64 {
        let config = AlignConfig::default();
        match Alignment::run(&config, a, b) {
            // Unit costs cannot produce a domain error or NaN.
            Ok(alignment) => 1.0 - alignment.normalized,
            Err(_) => 0.0,
        }
    }
}

/// The four cardinalities.
///
/// `intersection + src_only == src_total` and
/// `intersection + tar_only == tar_total` hold by construction for every
/// semantics, including the non-integral fuzzy/soft cases.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct IntersectionResult {
    /// Weight of tokens only in the source.
    pub src_only: f64,
    /// Weight of tokens only in the target.
    pub tar_only: f64,
    /// Intersection weight.
    pub intersection: f64,
    /// Total source weight.
    pub src_total: f64,
    /// Total target weight.
    pub tar_total: f64,
}

impl IntersectionResult {
    fn new(intersection: f64, src_total: f64, tar_total: f64) -> Self {
        IntersectionResult {
            src_only: src_total - intersection,
            tar_only: tar_total - intersection,
            intersection,
            src_total,
            tar_total,
        }
    }

    /// Union cardinality, `src_total + tar_total - intersection`.
    pub fn union(&self) -> f64 {
        self.src_total + self.tar_total - self.intersection
    }
}

/// Immutable intersection configuration.
///
/// Built once and reusable across calls and threads; each call allocates its
/// own working state.
#[derive(Clone)]
pub struct Intersector {
    kind: IntersectionKind,
    threshold: f64,
    metric: Option<Arc<dyn Similarity>>,
}

impl fmt::Debug for Intersector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Intersector")
            .field("kind", &self.kind)
            .field("threshold", &self.threshold)
            .field("metric", &self.metric.as_ref().map(|_| "<dyn Similarity>"))
            .finish()
    }
}

impl Intersector {
    /// Crisp intersector; needs no metric or threshold and cannot fail.
    pub fn crisp() -> Self {
        Intersector {
            kind: IntersectionKind::Crisp,
            threshold: 1.0,
            metric: None,
        }
    }

    /// Build an intersector.
    ///
    /// * `threshold` gates Fuzzy and GroupLinkage pairing and must lie in
    ///   `(0, 1]` for those kinds (Soft and Crisp ignore it).
    /// * `metric` is required for every kind but Crisp;
    ///   [`EditSimilarity`] is the conventional default.
    pub fn new(
        kind: IntersectionKind,
        threshold: f64,
        metric: Option<Arc<dyn Similarity>>,
    ) -> Result<Self, ConfigError> {
        if kind != IntersectionKind::Crisp && metric.is_none() {
            return Err(ConfigError::MissingMetric(kind.name()));
        }
        if matches!(kind, IntersectionKind::Fuzzy | IntersectionKind::GroupLinkage)
            && !(threshold > 0.0 && threshold <= 1.0)
        {
            return Err(ConfigError::BadThreshold(threshold));
        }
        Ok(Intersector {
            kind,
            threshold,
            metric,
        })
    }

    /// Compute the four cardinalities of `src` vs `tar`.
    ///
    /// Empty multisets on either side yield zero cardinalities for that
    /// side, never an error.
    pub fn intersect(&self, src: &TokenMultiset, tar: &TokenMultiset) -> IntersectionResult {
        let src_total = src.total();
        let tar_total = tar.total();
        if src.is_empty() || tar.is_empty() {
            return IntersectionResult::new(0.0, src_total, tar_total);
        }
        debug!(
            "{} intersection of {}x{} distinct tokens",
            self.kind.name(),
            src.distinct(),
            tar.distinct()
        );
        let intersection = match self.kind {
            IntersectionKind::Crisp => crisp_card(src, tar),
            IntersectionKind::Fuzzy => self.fuzzy_card(src, tar),
            IntersectionKind::Soft => self.soft_card(src, tar),
            IntersectionKind::GroupLinkage => self.linkage_card(src, tar),
        };
        IntersectionResult::new(intersection, src_total, tar_total)
    }

    fn metric(&self) -> &dyn Similarity {
        // Guaranteed by `new` for every kind that reaches here.
        self.metric.as_deref().unwrap_or(&EditSimilarity)
    }

    /// Greedy descending-similarity pairing of the tokens left over after
    /// exact matching.
    fn fuzzy_card(&self, src: &TokenMultiset, tar: &TokenMultiset) -> f64 {
        let mut card = crisp_card(src, tar);

        let mut src_left: Vec<(&str, f64)> = src
            .iter()
            .map(|(token, count)| (token, count - tar.count(token).min(count)))
            .filter(|(_, left)| *left > 0.0)
            .collect();
        let mut tar_left: Vec<(&str, f64)> = tar
            .iter()
            .map(|(token, count)| (token, count - src.count(token).min(count)))
            .filter(|(_, left)| *left > 0.0)
            .collect();

        let metric = self.metric();
        let mut pairs: Vec<(f64, usize, usize)> = Vec::new();
        for (si, (s, _)) in src_left.iter().enumerate() {
            for (ti, (t, _)) in tar_left.iter().enumerate() {
                let sim = metric.sim(s, t);
                if sim >= self.threshold {
                    pairs.push((sim, si, ti));
                }
            }
        }
        trace!("{} candidate pairs above threshold", pairs.len());
        // Stable sort keeps insertion order between equal similarities.
        pairs.sort_by(|a, b| b.0.partial_cmp(&a.0).unwrap_or(std::cmp::Ordering::Equal));

        for (sim, si, ti) in pairs {
            let take = src_left[si].1.min(tar_left[ti].1);
            if take > 0.0 {
                card += sim * take;
                src_left[si].1 -= take;
                tar_left[ti].1 -= take;
            }
        }
        card
    }

    /// Similarity-weighted credit for every cross-pair.
    fn soft_card(&self, src: &TokenMultiset, tar: &TokenMultiset) -> f64 {
        let metric = self.metric();
        let mut card = 0.0;
        for (s, sc) in src.iter() {
            for (t, tc) in tar.iter() {
                let sim = if s == t { 1.0 } else { metric.sim(s, t) };
                if sim > 0.0 {
                    card += sim * sc.min(tc);
                }
            }
        }
        card
    }

    /// Union-find over all distinct tokens; components intersect crisply on
    /// their summed counts.
    fn linkage_card(&self, src: &TokenMultiset, tar: &TokenMultiset) -> f64 {
        let mut tokens: Vec<&str> = Vec::with_capacity(src.distinct() + tar.distinct());
        tokens.extend(src.iter().map(|(token, _)| token));
        for (token, _) in tar.iter() {
            if src.count(token) == 0.0 {
                tokens.push(token);
            }
        }

        let metric = self.metric();
        let mut dsu = UnionFind::new(tokens.len());
        for a in 0..tokens.len() {
            for b in a + 1..tokens.len() {
                if metric.sim(tokens[a], tokens[b]) >= self.threshold {
                    dsu.union(a, b);
                }
            }
        }

        // Summed counts per component root: (src side, tar side).
        let mut sums: Vec<(f64, f64)> = vec![(0.0, 0.0); tokens.len()];
        for (idx, token) in tokens.iter().enumerate() {
            let root = dsu.find(idx);
            sums[root].0 += src.count(token);
            sums[root].1 += tar.count(token);
        }
        sums.iter().map(|(s, t)| s.min(*t)).sum()
    }
}

fn crisp_card(src: &TokenMultiset, tar: &TokenMultiset) -> f64 {
    src.iter()
        .map(|(token, count)| count.min(tar.count(token)))
        .sum()
}

/// Disjoint-set forest with path halving, used only by group linkage.
struct UnionFind {
    parent: Vec<usize>,
}

impl UnionFind {
    fn new(len: usize) -> Self {
        UnionFind {
            parent: (0..len).collect(),
        }
    }

    fn find(&mut self, mut x: usize) -> usize {
        while self.parent[x] != x {
            self.parent[x] = self.parent[self.parent[x]];
            x = self.parent[x];
        }
        x
    }

    fn union(&mut self, a: usize, b: usize) {
        let ra = self.find(a);
        let rb = self.find(b);
        if ra != rb {
            self.parent[rb.max(ra)] = rb.min(ra);
        }
    }
}

mod test {
    use super::*;

    fn bag(tokens: &[&str]) -> TokenMultiset {
        tokens.iter().copied().collect()
    }

    #[test]
    fn test_crisp_identical() {
        let res = Intersector::crisp().intersect(&bag(&["a", "b"]), &bag(&["a", "b"]));
        assert_eq!(res.intersection, 2.0);
        assert_eq!(res.src_only, 0.0);
        assert_eq!(res.tar_only, 0.0);
        assert_eq!(res.src_total, 2.0);
        assert_eq!(res.tar_total, 2.0);
    }

    #[test]
    fn test_crisp_disjoint() {
        let res = Intersector::crisp().intersect(&bag(&["a", "b"]), &bag(&["c", "d", "e"]));
        assert_eq!(res.intersection, 0.0);
        assert_eq!(res.src_only + res.tar_only, res.src_total + res.tar_total);
        assert_eq!(res.union(), 5.0);
    }

    #[test]
    fn test_crisp_multiplicity() {
        let res = Intersector::crisp().intersect(&bag(&["a", "a", "b"]), &bag(&["a", "c"]));
        assert_eq!(res.intersection, 1.0);
        assert_eq!(res.src_only, 2.0);
        assert_eq!(res.tar_only, 1.0);
    }

    #[test]
    fn test_empty_sides() {
        let empty = TokenMultiset::new();
        for kind in [
            IntersectionKind::Crisp,
            IntersectionKind::Fuzzy,
            IntersectionKind::Soft,
            IntersectionKind::GroupLinkage,
        ] {
            let ix = Intersector::new(kind, 0.7, Some(Arc::new(EditSimilarity))).unwrap();
            let res = ix.intersect(&empty, &empty);
            assert_eq!(res, IntersectionResult::default());
            let res = ix.intersect(&empty, &bag(&["a"]));
            assert_eq!(res.intersection, 0.0);
            assert_eq!(res.tar_total, 1.0);
        }
    }

    #[test]
    fn test_missing_metric_rejected() {
        assert_eq!(
            Intersector::new(IntersectionKind::Fuzzy, 0.7, None).unwrap_err(),
            ConfigError::MissingMetric("fuzzy")
        );
    }

    #[test]
    fn test_bad_threshold_rejected() {
        let metric: Arc<dyn Similarity> = Arc::new(EditSimilarity);
        assert_eq!(
            Intersector::new(IntersectionKind::Fuzzy, 0.0, Some(metric.clone())).unwrap_err(),
            ConfigError::BadThreshold(0.0)
        );
        assert_eq!(
            Intersector::new(IntersectionKind::GroupLinkage, 1.5, Some(metric)).unwrap_err(),
            ConfigError::BadThreshold(1.5)
        );
    }

    #[test]
    fn test_unknown_kind_name_rejected() {
        assert!(matches!(
            "blurry".parse::<IntersectionKind>(),
            Err(ConfigError::UnknownIntersection(_))
        ));
        assert_eq!(
            "group-linkage".parse::<IntersectionKind>().unwrap(),
            IntersectionKind::GroupLinkage
        );
    }

    #[test]
    fn test_fuzzy_partial_credit() {
        let ix = Intersector::new(
            IntersectionKind::Fuzzy,
            0.5,
            Some(Arc::new(EditSimilarity)),
        )
        .unwrap();
        // "cat" vs "cut": similarity 2/3 >= 0.5 contributes partial credit.
        let res = ix.intersect(&bag(&["cat"]), &bag(&["cut"]));
        assert!((res.intersection - 2.0 / 3.0).abs() < 1e-12);
        assert!((res.src_only - 1.0 / 3.0).abs() < 1e-12);
        // Invariants hold with non-integral values.
        assert!((res.intersection + res.src_only - res.src_total).abs() < 1e-12);
    }

    #[test]
    fn test_fuzzy_exact_matches_not_double_counted() {
        let ix = Intersector::new(
            IntersectionKind::Fuzzy,
            0.5,
            Some(Arc::new(EditSimilarity)),
        )
        .unwrap();
        let res = ix.intersect(&bag(&["cat", "dog"]), &bag(&["cat", "dig"]));
        // cat matches exactly (1.0), dog/dig fuzzily (2/3).
        assert!((res.intersection - (1.0 + 2.0 / 3.0)).abs() < 1e-12);
    }

    #[test]
    fn test_fuzzy_monotone_in_threshold() {
        let src = bag(&["cat", "house", "tree"]);
        let tar = bag(&["cut", "mouse", "free"]);
        let mut last = f64::INFINITY;
        for threshold in [0.9, 0.7, 0.5, 0.3, 0.1] {
            let ix = Intersector::new(
                IntersectionKind::Fuzzy,
                threshold,
                Some(Arc::new(EditSimilarity)),
            )
            .unwrap();
            let card = ix.intersect(&src, &tar).intersection;
            assert!(card <= last + 1e-12, "relaxing threshold shrank the card");
            last = card;
        }
    }

    #[test]
    fn test_soft_no_exclusivity() {
        let ix = Intersector::new(IntersectionKind::Soft, 1.0, Some(Arc::new(EditSimilarity)))
            .unwrap();
        // One src token gets credit against both tar tokens.
        let res = ix.intersect(&bag(&["cat"]), &bag(&["cut", "cot"]));
        assert!((res.intersection - 4.0 / 3.0).abs() < 1e-12);
    }

    #[test]
    fn test_group_linkage_transitive() {
        // "cat" ~ "cut" and "cut" ~ "gut" chain into one component even
        // though "cat" vs "gut" alone falls below the threshold.
        let metric: Arc<dyn Similarity> = Arc::new(EditSimilarity);
        assert!(metric.sim("cat", "gut") < 0.5);
        let ix = Intersector::new(IntersectionKind::GroupLinkage, 0.5, Some(metric)).unwrap();
        let res = ix.intersect(&bag(&["cat", "gut"]), &bag(&["cut"]));
        assert_eq!(res.intersection, 1.0);
        assert_eq!(res.src_only, 1.0);
    }
}
