//! Backtrace extraction.
//!
//! Turns a completed cost/backtrace matrix pair into an edit script, or
//! computes the longest common subsequence / substring directly. The walks
//! here never choose between operations themselves: tie-breaking happened
//! when the matrices were filled.

use crate::matrix::{Grid, Step, TraceMatrix};
use crate::script::EditOp;

/// Walk a backtrace matrix from `(src.len(), tar.len())` back to the origin,
/// producing the edit script in target order.
///
/// `jumps` carries the `(i1, j1)` landing rows/cols of full-transposition
/// cells; `None` for modes whose transpositions are always adjacent. A
/// long-range transposition decomposes into its two moved characters plus
/// the inserts/deletes between them, keeping the script replayable.
pub(crate) fn walk_edit(
    steps: &TraceMatrix,
    jumps: Option<&Grid<(usize, usize)>>,
    src: &[char],
    tar: &[char],
) -> Vec<EditOp> {
    let mut ops = Vec::with_capacity(src.len().max(tar.len()));
    let mut i = src.len();
    let mut j = tar.len();
    loop {
        match steps[(i, j)] {
            Step::Stop => break,
            Step::Match => {
                ops.push(EditOp::Match { src: i - 1, tar: j - 1 });
                i -= 1;
                j -= 1;
            }
            Step::Sub => {
                ops.push(EditOp::Substitute {
                    src: i - 1,
                    tar: j - 1,
                    ch: tar[j - 1],
                });
                i -= 1;
                j -= 1;
            }
            Step::Del => {
                ops.push(EditOp::Delete { src: i - 1 });
                i -= 1;
            }
            Step::Ins => {
                ops.push(EditOp::Insert {
                    tar: j - 1,
                    ch: tar[j - 1],
                });
                j -= 1;
            }
            Step::Trans => {
                let (i1, j1) = match jumps {
                    Some(jumps) => jumps[(i, j)],
                    None => (i - 1, j - 1),
                };
                if i1 == i - 1 && j1 == j - 1 {
                    ops.push(EditOp::Transpose { src: i - 2, tar: j - 2 });
                } else {
                    // Ops are accumulated back to front, so push the block
                    // in reverse target order.
                    ops.push(EditOp::Substitute {
                        src: i1 - 1,
                        tar: j - 1,
                        ch: tar[j - 1],
                    });
                    for tpos in (j1..=j - 2).rev() {
                        ops.push(EditOp::Insert { tar: tpos, ch: tar[tpos] });
                    }
                    ops.push(EditOp::Substitute {
                        src: i - 1,
                        tar: j1 - 1,
                        ch: tar[j1 - 1],
                    });
                    for spos in (i1..=i - 2).rev() {
                        ops.push(EditOp::Delete { src: spos });
                    }
                }
                i = i1 - 1;
                j = j1 - 1;
            }
        }
    }
    ops.reverse();
    ops
}

/// Longest common subsequence.
///
/// Multiple maximal subsequences generally exist; the canonical choice here
/// is fixed by the walk: diagonal matches are always taken, and an
/// up-vs-left tie moves up, resolving towards earlier source positions.
pub(crate) fn lcs(src: &[char], tar: &[char]) -> String {
    let n = src.len();
    let m = tar.len();
    if n == 0 || m == 0 {
        return String::new();
    }
    let mut dp: Grid<usize> = Grid::new(n + 1, m + 1, 0);
    for i in 1..=n {
        for j in 1..=m {
            dp[(i, j)] = if src[i - 1] == tar[j - 1] {
                dp[(i - 1, j - 1)] + 1
            } else {
                dp[(i - 1, j)].max(dp[(i, j - 1)])
            };
        }
    }
    let mut out = Vec::with_capacity(dp[(n, m)]);
    let (mut i, mut j) = (n, m);
    while i > 0 && j > 0 {
        if src[i - 1] == tar[j - 1] {
            out.push(src[i - 1]);
            i -= 1;
            j -= 1;
        } else if dp[(i - 1, j)] >= dp[(i, j - 1)] {
            i -= 1;
        } else {
            j -= 1;
        }
    }
    out.reverse();
    out.into_iter().collect()
}

/// Longest common contiguous substring.
///
/// Classic suffix DP with a running best-(length, end) tracker reset to zero
/// on every mismatch; no backtrace storage is needed. The first maximal
/// occurrence (earliest end position in the source) wins ties.
pub(crate) fn lcs_str(src: &[char], tar: &[char]) -> String {
    let n = src.len();
    let m = tar.len();
    if n == 0 || m == 0 {
        return String::new();
    }
    let mut prev = vec![0usize; m + 1];
    let mut curr = vec![0usize; m + 1];
    let mut best_len = 0usize;
    let mut best_end = 0usize; // exclusive end in src
    for i in 1..=n {
        for j in 1..=m {
            curr[j] = if src[i - 1] == tar[j - 1] {
                prev[j - 1] + 1
            } else {
                0
            };
            if curr[j] > best_len {
                best_len = curr[j];
                best_end = i;
            }
        }
        std::mem::swap(&mut prev, &mut curr);
    }
    src[best_end - best_len..best_end].iter().collect()
}

mod test {
    use super::*;

    fn chars(s: &str) -> Vec<char> {
        s.chars().collect()
    }

    #[test]
    fn test_lcs_unique() {
        assert_eq!(lcs(&chars("AGGTAB"), &chars("GXTXAYB")), "GTAB");
    }

    #[test]
    fn test_lcs_identical_and_empty() {
        assert_eq!(lcs(&chars("abc"), &chars("abc")), "abc");
        assert_eq!(lcs(&chars(""), &chars("abc")), "");
        assert_eq!(lcs(&chars("xyz"), &chars("abc")), "");
    }

    #[test]
    fn test_lcs_deterministic_on_ties() {
        // "ab" vs "ba" has two maximal subsequences ("a" and "b"); the
        // canonical walk must always return the same one.
        let first = lcs(&chars("ab"), &chars("ba"));
        for _ in 0..10 {
            assert_eq!(lcs(&chars("ab"), &chars("ba")), first);
        }
        assert_eq!(first.len(), 1);
    }

    #[test]
    fn test_lcs_str_basic() {
        assert_eq!(lcs_str(&chars("ababc"), &chars("xabcx")), "abc");
        assert_eq!(lcs_str(&chars("abc"), &chars("xyz")), "");
        assert_eq!(lcs_str(&chars(""), &chars("abc")), "");
    }

    #[test]
    fn test_lcs_str_prefers_first_maximal() {
        // "ab" and "cd" both have length 2; the earlier one in src wins.
        assert_eq!(lcs_str(&chars("abzcd"), &chars("cdzab")), "ab");
    }
}
