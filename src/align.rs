//! The dynamic-programming alignment engine.
//!
//! One shared recurrence drives every mode:
//! `cell[i][j] = best of { cell[i-1][j] + del, cell[i][j-1] + ins,
//! cell[i-1][j-1] + sub(src[i-1], tar[j-1]), [transposition case] }`,
//! with base rows/columns holding cumulative (optionally tapered)
//! insert/delete cost. Equal and empty inputs are answered before any matrix
//! is allocated. All matrices are per-call; nothing is shared between calls
//! beyond the immutable [`AlignConfig`].

use std::collections::HashMap;

use log::debug;

use crate::{
    config::AlignConfig,
    cost::CostModel,
    error::DomainError,
    matrix::{DpMatrix, Grid, Step, TraceMatrix},
    mode::{AlignMode, GapScope},
    script::EditOp,
    task::AlignTask,
    trace,
};

/// Result of one alignment call.
///
/// `raw_cost` is integral whenever every configured cost is integral.
/// `normalized` divides the raw cost by the maximum possible cost,
/// `max(len(src) * del, len(tar) * ins)` (tapered sums when tapering is
/// enabled); it is **NaN** when that denominator is zero and the inputs
/// differ, which only happens under zero-cost configurations. The bound is
/// not guaranteed to keep the value inside `[0, 1]` for unusual cost models;
/// it is never clamped.
#[derive(Debug, Clone, Default)]
pub struct Alignment {
    /// Minimal transformation cost from source to target.
    pub raw_cost: f64,
    /// `raw_cost` over the maximum possible cost. May be NaN, see above.
    pub normalized: f64,
    /// Edit script reproducing the target, for [`AlignTask::Script`].
    pub script: Option<Vec<EditOp>>,
    /// Longest common subsequence, for [`AlignTask::Lcs`].
    pub lcs: Option<String>,
    /// Longest common contiguous substring, for [`AlignTask::LcsStr`].
    pub lcs_str: Option<String>,
}

impl Alignment {
    /// Aligns two sequences under `config`, returning the distance and
    /// whatever extraction the configured task asks for.
    ///
    /// Fails only with a [`DomainError`], and only when the configured
    /// substitution model meets a character outside its tables with no
    /// failsafe. Invalid configurations never reach this point.
    ///
    /// ### Example
    /// ```
    /// use strdist::{align::Alignment, config::AlignConfig, mode::AlignMode};
    ///
    /// let config = AlignConfig::with_mode(AlignMode::RestrictedTransposition);
    /// let res = Alignment::run(&config, "ab", "ba").unwrap();
    /// assert_eq!(res.raw_cost, 1.0);
    /// ```
    pub fn run(
        config: &AlignConfig,
        src: impl AsRef<str>,
        tar: impl AsRef<str>,
    ) -> Result<Self, DomainError> {
        let (src, tar) = (src.as_ref(), tar.as_ref());
        let src_chars: Vec<char> = src.chars().collect();
        let tar_chars: Vec<char> = tar.chars().collect();
        debug!(
            "aligning {}x{} symbols, mode {:?}, task {:?}",
            src_chars.len(),
            tar_chars.len(),
            config.mode,
            config.task
        );

        if src == tar {
            return Ok(Self::equal_inputs(config, &src_chars, src));
        }
        if src_chars.is_empty() || tar_chars.is_empty() {
            return Ok(Self::empty_side(config, &src_chars, &tar_chars));
        }

        let cm = &config.cost;
        let (raw, script) = match config.mode {
            AlignMode::SimpleEdit | AlignMode::RestrictedTransposition => {
                let allow_swap = config.mode == AlignMode::RestrictedTransposition;
                let (dp, steps) = edit_dp(cm, &src_chars, &tar_chars, allow_swap)?;
                let raw = dp[(src_chars.len(), tar_chars.len())];
                let script = (config.task == AlignTask::Script)
                    .then(|| trace::walk_edit(&steps, None, &src_chars, &tar_chars));
                (raw, script)
            }
            AlignMode::FullTransposition => {
                let (dp, steps, jumps) = damerau_dp(cm, &src_chars, &tar_chars)?;
                let raw = dp[(src_chars.len(), tar_chars.len())];
                let script = (config.task == AlignTask::Script)
                    .then(|| trace::walk_edit(&steps, Some(&jumps), &src_chars, &tar_chars));
                (raw, script)
            }
            AlignMode::AffineGap(scope) => {
                let gotoh = gotoh_dp(cm, &src_chars, &tar_chars, scope)?;
                let raw = gotoh.raw_cost;
                let script = (config.task == AlignTask::Script)
                    .then(|| walk_affine(&gotoh, &src_chars, &tar_chars));
                (raw, script)
            }
        };

        let mut alignment = Alignment {
            raw_cost: raw,
            normalized: normalize(config, raw, src_chars.len(), tar_chars.len()),
            script,
            ..Alignment::default()
        };
        match config.task {
            AlignTask::Lcs => alignment.lcs = Some(trace::lcs(&src_chars, &tar_chars)),
            AlignTask::LcsStr => alignment.lcs_str = Some(trace::lcs_str(&src_chars, &tar_chars)),
            AlignTask::Distance | AlignTask::Script => {}
        }
        Ok(alignment)
    }

    /// `src == tar`: zero cost, answered without touching a matrix.
    fn equal_inputs(config: &AlignConfig, chars: &[char], s: &str) -> Self {
        let mut alignment = Alignment::default();
        match config.task {
            AlignTask::Distance => {}
            AlignTask::Script => {
                alignment.script = Some(
                    (0..chars.len())
                        .map(|pos| EditOp::Match { src: pos, tar: pos })
                        .collect(),
                );
            }
            AlignTask::Lcs => alignment.lcs = Some(s.to_owned()),
            AlignTask::LcsStr => alignment.lcs_str = Some(s.to_owned()),
        }
        alignment
    }

    /// One side empty: cumulative (tapered) insert/delete cost of the other.
    fn empty_side(config: &AlignConfig, src: &[char], tar: &[char]) -> Self {
        let cm = &config.cost;
        let costs = cm.costs();
        let raw = if src.is_empty() {
            match config.mode {
                AlignMode::AffineGap(GapScope::Local) => 0.0,
                AlignMode::AffineGap(GapScope::Global) => tapered_gap_run(cm, tar.len()),
                _ => tapered_sum(cm, tar.len(), tar.len(), costs.ins),
            }
        } else {
            match config.mode {
                AlignMode::AffineGap(_) => tapered_gap_run(cm, src.len()),
                _ => tapered_sum(cm, src.len(), src.len(), costs.del),
            }
        };
        let mut alignment = Alignment {
            raw_cost: raw,
            normalized: normalize(config, raw, src.len(), tar.len()),
            ..Alignment::default()
        };
        match config.task {
            AlignTask::Distance => {}
            AlignTask::Script => {
                alignment.script = Some(if src.is_empty() {
                    tar.iter()
                        .enumerate()
                        .map(|(tar, &ch)| EditOp::Insert { tar, ch })
                        .collect()
                } else {
                    (0..src.len()).map(|src| EditOp::Delete { src }).collect()
                });
            }
            AlignTask::Lcs => alignment.lcs = Some(String::new()),
            AlignTask::LcsStr => alignment.lcs_str = Some(String::new()),
        }
        alignment
    }
}

/// `sum over p < len of taper(p, taper_len) * unit`.
fn tapered_sum(cm: &CostModel, len: usize, taper_len: usize, unit: f64) -> f64 {
    if !cm.taper().enabled() {
        return len as f64 * unit;
    }
    (0..len).map(|p| cm.taper().factor(p, taper_len) * unit).sum()
}

/// Tapered cost of one gap run covering `len` symbols: open once, extend
/// thereafter.
fn tapered_gap_run(cm: &CostModel, len: usize) -> f64 {
    let costs = cm.costs();
    (0..len)
        .map(|p| {
            let unit = if p == 0 { costs.gap_open } else { costs.gap_extend };
            cm.taper().factor(p, len) * unit
        })
        .sum()
}

/// Maximum-possible-cost denominator; NaN guard lives at the caller.
fn normalize(config: &AlignConfig, raw: f64, n: usize, m: usize) -> f64 {
    let cm = &config.cost;
    let costs = cm.costs();
    let taper_len = n.max(m);
    let denom = match config.mode {
        AlignMode::AffineGap(_) => tapered_gap_run(cm, n).max(tapered_gap_run(cm, m)),
        _ => tapered_sum(cm, n, taper_len, costs.del).max(tapered_sum(cm, m, taper_len, costs.ins)),
    };
    if denom == 0.0 {
        if raw == 0.0 {
            0.0
        } else {
            f64::NAN
        }
    } else {
        raw / denom
    }
}

/// Shared DP for [`AlignMode::SimpleEdit`] and
/// [`AlignMode::RestrictedTransposition`] (`allow_swap`).
fn edit_dp(
    cm: &CostModel,
    src: &[char],
    tar: &[char],
    allow_swap: bool,
) -> Result<(DpMatrix, TraceMatrix), DomainError> {
    let n = src.len();
    let m = tar.len();
    let taper_len = n.max(m);
    let costs = *cm.costs();
    let mut dp = DpMatrix::new(n + 1, m + 1, 0.0);
    let mut steps = TraceMatrix::new(n + 1, m + 1, Step::Stop);
    for i in 1..=n {
        dp[(i, 0)] = dp[(i - 1, 0)] + cm.taper().factor(i - 1, taper_len) * costs.del;
        steps[(i, 0)] = Step::Del;
    }
    for j in 1..=m {
        dp[(0, j)] = dp[(0, j - 1)] + cm.taper().factor(j - 1, taper_len) * costs.ins;
        steps[(0, j)] = Step::Ins;
    }
    for i in 1..=n {
        for j in 1..=m {
            let factor = cm.taper().factor(i.max(j) - 1, taper_len);
            let sub = cm.sub_cost(src[i - 1], tar[j - 1])?;

            // Candidates in tie-break order; only a strictly cheaper one
            // replaces the current best.
            let mut best = dp[(i - 1, j - 1)] + factor * sub;
            let mut step = if src[i - 1] == tar[j - 1] {
                Step::Match
            } else {
                Step::Sub
            };
            let del = dp[(i - 1, j)] + factor * costs.del;
            if del < best {
                best = del;
                step = Step::Del;
            }
            let ins = dp[(i, j - 1)] + factor * costs.ins;
            if ins < best {
                best = ins;
                step = Step::Ins;
            }
            if allow_swap
                && i > 1
                && j > 1
                && src[i - 1] == tar[j - 2]
                && src[i - 2] == tar[j - 1]
            {
                let swap = dp[(i - 2, j - 2)] + factor * costs.trans;
                if swap < best {
                    best = swap;
                    step = Step::Trans;
                }
            }
            dp[(i, j)] = best;
            steps[(i, j)] = step;
        }
    }
    Ok((dp, steps))
}

/// True Damerau DP. A per-symbol last-seen-row table (`da`) and a per-row
/// last-match column (`db`) locate the candidate transposition partner in
/// O(1), keeping the whole computation `O(n*m)`. The jump prices the
/// transposed pair plus every symbol skipped between the two positions.
fn damerau_dp(
    cm: &CostModel,
    src: &[char],
    tar: &[char],
) -> Result<(DpMatrix, TraceMatrix, Grid<(usize, usize)>), DomainError> {
    let n = src.len();
    let m = tar.len();
    let taper_len = n.max(m);
    let costs = *cm.costs();
    let mut dp = DpMatrix::new(n + 1, m + 1, 0.0);
    let mut steps = TraceMatrix::new(n + 1, m + 1, Step::Stop);
    let mut jumps: Grid<(usize, usize)> = Grid::new(n + 1, m + 1, (0, 0));
    for i in 1..=n {
        dp[(i, 0)] = dp[(i - 1, 0)] + cm.taper().factor(i - 1, taper_len) * costs.del;
        steps[(i, 0)] = Step::Del;
    }
    for j in 1..=m {
        dp[(0, j)] = dp[(0, j - 1)] + cm.taper().factor(j - 1, taper_len) * costs.ins;
        steps[(0, j)] = Step::Ins;
    }

    // Last row (1-based) where each symbol occurred in src, so far.
    let mut da: HashMap<char, usize> = HashMap::new();
    for i in 1..=n {
        // Last column (1-based) of this row where src[i-1] matched tar.
        let mut db = 0usize;
        for j in 1..=m {
            let i1 = da.get(&tar[j - 1]).copied().unwrap_or(0);
            let j1 = db;
            let factor = cm.taper().factor(i.max(j) - 1, taper_len);
            let equal = src[i - 1] == tar[j - 1];
            let sub = cm.sub_cost(src[i - 1], tar[j - 1])?;
            if equal {
                db = j;
            }

            let mut best = dp[(i - 1, j - 1)] + factor * sub;
            let mut step = if equal { Step::Match } else { Step::Sub };
            let del = dp[(i - 1, j)] + factor * costs.del;
            if del < best {
                best = del;
                step = Step::Del;
            }
            let ins = dp[(i, j - 1)] + factor * costs.ins;
            if ins < best {
                best = ins;
                step = Step::Ins;
            }
            if i1 > 0 && j1 > 0 {
                let skipped =
                    (i - i1 - 1) as f64 * costs.del + (j - j1 - 1) as f64 * costs.ins;
                let jump = dp[(i1 - 1, j1 - 1)] + factor * (costs.trans + skipped);
                if jump < best {
                    best = jump;
                    step = Step::Trans;
                    jumps[(i, j)] = (i1, j1);
                }
            }
            dp[(i, j)] = best;
            steps[(i, j)] = step;
        }
        da.insert(src[i - 1], i);
    }
    Ok((dp, steps, jumps))
}

/// Gotoh matrices: `d` closes at a match/substitution, `p` sits inside a
/// deletion run, `q` inside an insertion run.
struct GotohMatrices {
    raw_cost: f64,
    /// Column of the last row the optimum ends in; `tar.len()` for global.
    end_col: usize,
    dstep: TraceMatrix,
    /// `true` where the run was opened from `d` (rather than extended).
    popen: Grid<bool>,
    qopen: Grid<bool>,
}

/// Affine-gap DP (Gotoh). Two auxiliary matrices carry the cheapest cost of
/// ending in an open deletion/insertion run, so a run is priced
/// `gap_open + (k - 1) * gap_extend`. `GapScope::Local` zeroes the first row
/// and takes the minimum over the last, making leading/trailing target gaps
/// free.
fn gotoh_dp(
    cm: &CostModel,
    src: &[char],
    tar: &[char],
    scope: GapScope,
) -> Result<GotohMatrices, DomainError> {
    let n = src.len();
    let m = tar.len();
    let taper_len = n.max(m);
    let costs = *cm.costs();
    let inf = f64::INFINITY;

    let mut d = DpMatrix::new(n + 1, m + 1, 0.0);
    let mut p = DpMatrix::new(n + 1, m + 1, inf);
    let mut q = DpMatrix::new(n + 1, m + 1, inf);
    let mut dstep = TraceMatrix::new(n + 1, m + 1, Step::Stop);
    let mut popen: Grid<bool> = Grid::new(n + 1, m + 1, false);
    let mut qopen: Grid<bool> = Grid::new(n + 1, m + 1, false);

    for i in 1..=n {
        let unit = if i == 1 { costs.gap_open } else { costs.gap_extend };
        d[(i, 0)] = d[(i - 1, 0)] + cm.taper().factor(i - 1, taper_len) * unit;
        p[(i, 0)] = d[(i, 0)];
    }
    for j in 1..=m {
        d[(0, j)] = match scope {
            GapScope::Global => {
                let unit = if j == 1 { costs.gap_open } else { costs.gap_extend };
                d[(0, j - 1)] + cm.taper().factor(j - 1, taper_len) * unit
            }
            GapScope::Local => 0.0,
        };
        q[(0, j)] = d[(0, j)];
    }

    for i in 1..=n {
        for j in 1..=m {
            let factor = cm.taper().factor(i.max(j) - 1, taper_len);

            let open = d[(i - 1, j)] + factor * costs.gap_open;
            let extend = p[(i - 1, j)] + factor * costs.gap_extend;
            // On a tie, close the run: it keeps scripts canonical.
            if open <= extend {
                p[(i, j)] = open;
                popen[(i, j)] = true;
            } else {
                p[(i, j)] = extend;
            }

            let open = d[(i, j - 1)] + factor * costs.gap_open;
            let extend = q[(i, j - 1)] + factor * costs.gap_extend;
            if open <= extend {
                q[(i, j)] = open;
                qopen[(i, j)] = true;
            } else {
                q[(i, j)] = extend;
            }

            let sub = cm.sub_cost(src[i - 1], tar[j - 1])?;
            let mut best = d[(i - 1, j - 1)] + factor * sub;
            let mut step = if src[i - 1] == tar[j - 1] {
                Step::Match
            } else {
                Step::Sub
            };
            if p[(i, j)] < best {
                best = p[(i, j)];
                step = Step::Del;
            }
            if q[(i, j)] < best {
                best = q[(i, j)];
                step = Step::Ins;
            }
            d[(i, j)] = best;
            dstep[(i, j)] = step;
        }
    }

    let (raw_cost, end_col) = match scope {
        GapScope::Global => (d[(n, m)], m),
        GapScope::Local => {
            // Leftmost minimum for a deterministic backtrace.
            let mut best = (d[(n, 0)], 0);
            for j in 1..=m {
                if d[(n, j)] < best.0 {
                    best = (d[(n, j)], j);
                }
            }
            best
        }
    };
    Ok(GotohMatrices {
        raw_cost,
        end_col,
        dstep,
        popen,
        qopen,
    })
}

/// Backtrace over the three Gotoh matrices. Free local gaps at the target's
/// ends are still emitted as inserts so the script stays replayable.
fn walk_affine(g: &GotohMatrices, src: &[char], tar: &[char]) -> Vec<EditOp> {
    #[derive(Clone, Copy, PartialEq)]
    enum State {
        D,
        P,
        Q,
    }

    let mut ops = Vec::with_capacity(src.len().max(tar.len()));
    let mut i = src.len();
    let mut j = g.end_col;
    // Trailing free gap in local scope.
    for tpos in (g.end_col..tar.len()).rev() {
        ops.push(EditOp::Insert { tar: tpos, ch: tar[tpos] });
    }
    let mut state = State::D;
    loop {
        match state {
            State::D => {
                if i == 0 && j == 0 {
                    break;
                }
                if i == 0 {
                    ops.push(EditOp::Insert { tar: j - 1, ch: tar[j - 1] });
                    j -= 1;
                } else if j == 0 {
                    ops.push(EditOp::Delete { src: i - 1 });
                    i -= 1;
                } else {
                    match g.dstep[(i, j)] {
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
                        Step::Del => state = State::P,
                        Step::Ins => state = State::Q,
                        Step::Stop | Step::Trans => break,
                    }
                }
            }
            State::P => {
                ops.push(EditOp::Delete { src: i - 1 });
                let opened = g.popen[(i, j)];
                i -= 1;
                if opened {
                    state = State::D;
                }
            }
            State::Q => {
                ops.push(EditOp::Insert { tar: j - 1, ch: tar[j - 1] });
                let opened = g.qopen[(i, j)];
                j -= 1;
                if opened {
                    state = State::D;
                }
            }
        }
    }
    ops.reverse();
    ops
}

mod test {
    use super::*;
    use crate::cost::{CostModel, Costs, SubstitutionModel, Taper};
    use crate::script;

    fn run(mode: AlignMode, src: &str, tar: &str) -> Alignment {
        Alignment::run(&AlignConfig::with_mode(mode), src, tar).unwrap()
    }

    #[test]
    fn test_simple_edit_concrete() {
        assert_eq!(run(AlignMode::SimpleEdit, "kitten", "sitting").raw_cost, 3.0);
        assert_eq!(run(AlignMode::SimpleEdit, "ab", "ba").raw_cost, 2.0);
        assert_eq!(run(AlignMode::SimpleEdit, "abc", "abc").raw_cost, 0.0);
    }

    #[test]
    fn test_restricted_transposition_concrete() {
        assert_eq!(run(AlignMode::RestrictedTransposition, "ab", "ba").raw_cost, 1.0);
        // A transposed pair may not be edited again: OSA pays 3 here.
        assert_eq!(run(AlignMode::RestrictedTransposition, "ca", "abc").raw_cost, 3.0);
    }

    #[test]
    fn test_full_transposition_concrete() {
        assert_eq!(run(AlignMode::FullTransposition, "ab", "ba").raw_cost, 1.0);
        assert_eq!(run(AlignMode::FullTransposition, "ca", "abc").raw_cost, 2.0);
        assert_eq!(run(AlignMode::FullTransposition, "orange", "strange").raw_cost, 2.0);
    }

    #[test]
    fn test_restricted_dominates_full() {
        for (a, b) in [("ca", "abc"), ("ab", "ba"), ("orange", "strange"), ("abcdef", "fedcba")] {
            let osa = run(AlignMode::RestrictedTransposition, a, b).raw_cost;
            let full = run(AlignMode::FullTransposition, a, b).raw_cost;
            assert!(osa >= full, "{a} vs {b}: {osa} < {full}");
        }
    }

    #[test]
    fn test_empty_inputs() {
        for mode in [
            AlignMode::SimpleEdit,
            AlignMode::RestrictedTransposition,
            AlignMode::FullTransposition,
            AlignMode::AffineGap(GapScope::Global),
            AlignMode::AffineGap(GapScope::Local),
        ] {
            assert_eq!(run(mode, "", "").raw_cost, 0.0);
        }
        assert_eq!(run(AlignMode::SimpleEdit, "", "abc").raw_cost, 3.0);
        assert_eq!(run(AlignMode::SimpleEdit, "abc", "").raw_cost, 3.0);
    }

    #[test]
    fn test_normalized_bounds_unit_costs() {
        let res = run(AlignMode::SimpleEdit, "kitten", "sitting");
        assert!((res.normalized - 3.0 / 7.0).abs() < 1e-12);
        assert_eq!(run(AlignMode::SimpleEdit, "", "").normalized, 0.0);
    }

    #[test]
    fn test_affine_gap_prefers_one_long_gap() {
        // Unit open, cheap extension: one run of three beats three singles.
        let cost = CostModel::builder()
            .costs(Costs {
                gap_open: 1.0,
                gap_extend: 0.1,
                ..Costs::default()
            })
            .build()
            .unwrap();
        let config = AlignConfig {
            cost,
            mode: AlignMode::AffineGap(GapScope::Global),
            task: AlignTask::Distance,
        };
        let res = Alignment::run(&config, "abc", "abcxyz").unwrap();
        assert!((res.raw_cost - 1.2).abs() < 1e-12);
    }

    #[test]
    fn test_affine_local_free_target_ends() {
        // Source sits inside the target: only the matched span is paid.
        let res = run(AlignMode::AffineGap(GapScope::Local), "act", "cgactgac");
        assert_eq!(res.raw_cost, 0.0);
        let global = run(AlignMode::AffineGap(GapScope::Global), "act", "cgactgac");
        assert!(global.raw_cost > 0.0);
    }

    #[test]
    fn test_script_round_trip_all_modes() {
        let cases = [
            ("kitten", "sitting"),
            ("ab", "ba"),
            ("ca", "abc"),
            ("orange", "strange"),
            ("", "abc"),
            ("abc", ""),
            ("same", "same"),
        ];
        for mode in [
            AlignMode::SimpleEdit,
            AlignMode::RestrictedTransposition,
            AlignMode::FullTransposition,
            AlignMode::AffineGap(GapScope::Global),
            AlignMode::AffineGap(GapScope::Local),
        ] {
            for (src, tar) in cases {
                let config = AlignConfig {
                    mode,
                    task: AlignTask::Script,
                    ..AlignConfig::default()
                };
                let res = Alignment::run(&config, src, tar).unwrap();
                let script = res.script.expect("script requested");
                assert_eq!(
                    script::apply(src, &script),
                    tar,
                    "round trip failed for {src:?} -> {tar:?} under {mode:?}"
                );
            }
        }
    }

    #[test]
    fn test_taper_weights_early_edits_more() {
        let tapered = |src: &str, tar: &str| {
            let cost = CostModel::builder().taper(Taper::Linear).build().unwrap();
            let config = AlignConfig {
                cost,
                ..AlignConfig::default()
            };
            Alignment::run(&config, src, tar).unwrap().raw_cost
        };
        // One substitution at the front vs at the back of the same word.
        assert!(tapered("xbcdef", "abcdef") > tapered("abcdex", "abcdef"));
    }

    #[test]
    fn test_normalized_nan_documented_case() {
        let cost = CostModel::builder()
            .costs(Costs {
                ins: 0.0,
                del: 0.0,
                sub: 1.0,
                ..Costs::default()
            })
            .build()
            .unwrap();
        let config = AlignConfig {
            cost,
            ..AlignConfig::default()
        };
        let res = Alignment::run(&config, "ab", "cd").unwrap();
        assert!(res.normalized.is_nan());
    }

    #[test]
    fn test_letter_group_model_reduces_cost() {
        let cost = CostModel::builder()
            .costs(Costs {
                sub: 2.0,
                ..Costs::default()
            })
            .substitution(SubstitutionModel::LetterGroups)
            .build()
            .unwrap();
        let config = AlignConfig {
            cost,
            ..AlignConfig::default()
        };
        // d -> t is a within-group substitution.
        assert_eq!(Alignment::run(&config, "dip", "tip").unwrap().raw_cost, 1.0);
        assert_eq!(Alignment::run(&config, "zip", "tip").unwrap().raw_cost, 2.0);
    }

    #[test]
    fn test_keyboard_model_domain_error_surfaces() {
        let cost = CostModel::builder()
            .substitution(SubstitutionModel::Keyboard {
                layout: crate::keyboard::KeyLayout::Qwerty,
                metric: crate::keyboard::KeyMetric::Euclidean,
                shift_penalty: 0.5,
                failsafe: None,
            })
            .build()
            .unwrap();
        let config = AlignConfig {
            cost,
            ..AlignConfig::default()
        };
        let res = Alignment::run(&config, "a\u{3b1}", "ab");
        assert!(matches!(res, Err(DomainError::UnknownKey('\u{3b1}'))));
    }
}
