//! Property suite for the alignment engine and intersection framework.

use std::sync::Arc;

use proptest::prelude::*;

use strdist::{
    align::Alignment,
    config::AlignConfig,
    cost::{CostModel, Costs},
    intersect::{EditSimilarity, IntersectionKind, Intersector},
    mode::{AlignMode, GapScope},
    script,
    task::AlignTask,
    tokenize::{Tokenizer, WhitespaceTokenizer},
};

const ALL_MODES: [AlignMode; 5] = [
    AlignMode::SimpleEdit,
    AlignMode::RestrictedTransposition,
    AlignMode::FullTransposition,
    AlignMode::AffineGap(GapScope::Global),
    AlignMode::AffineGap(GapScope::Local),
];

fn raw(mode: AlignMode, src: &str, tar: &str) -> f64 {
    Alignment::run(&AlignConfig::with_mode(mode), src, tar)
        .unwrap()
        .raw_cost
}

proptest! {
    #[test]
    fn self_distance_is_zero(s in "[a-z]{0,12}") {
        for mode in ALL_MODES {
            prop_assert_eq!(raw(mode, &s, &s), 0.0);
        }
    }

    #[test]
    fn symmetric_costs_give_symmetric_distance(a in "[a-z]{0,10}", b in "[a-z]{0,10}") {
        // ins == del and the constant sub model is symmetric.
        for mode in [
            AlignMode::SimpleEdit,
            AlignMode::RestrictedTransposition,
            AlignMode::FullTransposition,
        ] {
            prop_assert_eq!(raw(mode, &a, &b), raw(mode, &b, &a));
        }
    }

    #[test]
    fn unit_cost_simple_edit_bounds(a in "[a-z]{0,10}", b in "[a-z]{0,10}") {
        let d = raw(AlignMode::SimpleEdit, &a, &b);
        let (la, lb) = (a.chars().count() as f64, b.chars().count() as f64);
        prop_assert!(d >= (la - lb).abs());
        prop_assert!(d <= la.max(lb));
    }

    #[test]
    fn restricted_dominates_full(a in "[a-z]{0,10}", b in "[a-z]{0,10}") {
        let osa = raw(AlignMode::RestrictedTransposition, &a, &b);
        let full = raw(AlignMode::FullTransposition, &a, &b);
        prop_assert!(osa >= full);
    }

    #[test]
    fn triangle_inequality_simple_edit(
        a in "[a-z]{0,8}",
        b in "[a-z]{0,8}",
        c in "[a-z]{0,8}",
    ) {
        let ab = raw(AlignMode::SimpleEdit, &a, &b);
        let bc = raw(AlignMode::SimpleEdit, &b, &c);
        let ac = raw(AlignMode::SimpleEdit, &a, &c);
        prop_assert!(ac <= ab + bc + 1e-9);
    }

    #[test]
    fn edit_script_round_trips(a in "[a-z]{0,10}", b in "[a-z]{0,10}") {
        for mode in ALL_MODES {
            let config = AlignConfig {
                mode,
                task: AlignTask::Script,
                ..AlignConfig::default()
            };
            let res = Alignment::run(&config, &a, &b).unwrap();
            let ops = res.script.unwrap();
            prop_assert_eq!(&script::apply(&a, &ops), &b, "mode {:?}", mode);
        }
    }

    #[test]
    fn weighted_distance_scales_with_sub_cost(a in "[a-z]{1,8}", b in "[a-z]{1,8}") {
        let cheap = CostModel::builder()
            .costs(Costs { sub: 0.5, ..Costs::default() })
            .build()
            .unwrap();
        let pricey = CostModel::builder()
            .costs(Costs { sub: 2.0, ..Costs::default() })
            .build()
            .unwrap();
        let run = |cost| {
            Alignment::run(
                &AlignConfig { cost, ..AlignConfig::default() },
                &a,
                &b,
            )
            .unwrap()
            .raw_cost
        };
        prop_assert!(run(cheap) <= run(pricey));
    }

    #[test]
    fn lcs_is_common_subsequence(a in "[a-z]{0,10}", b in "[a-z]{0,10}") {
        let config = AlignConfig {
            task: AlignTask::Lcs,
            ..AlignConfig::default()
        };
        let lcs = Alignment::run(&config, &a, &b).unwrap().lcs.unwrap();
        fn subsequence_of(needle: &str, hay: &str) -> bool {
            let mut it = hay.chars();
            needle.chars().all(|c| it.any(|h| h == c))
        }
        prop_assert!(subsequence_of(&lcs, &a));
        prop_assert!(subsequence_of(&lcs, &b));
    }

    #[test]
    fn lcs_str_is_substring_of_both(a in "[a-z]{0,10}", b in "[a-z]{0,10}") {
        let config = AlignConfig {
            task: AlignTask::LcsStr,
            ..AlignConfig::default()
        };
        let sub = Alignment::run(&config, &a, &b).unwrap().lcs_str.unwrap();
        prop_assert!(a.contains(&sub));
        prop_assert!(b.contains(&sub));
    }

    #[test]
    fn crisp_invariants(
        src in prop::collection::vec("[a-c]{1,2}", 0..8),
        tar in prop::collection::vec("[a-c]{1,2}", 0..8),
    ) {
        let src = src.iter().cloned().collect();
        let tar = tar.iter().cloned().collect();
        let res = Intersector::crisp().intersect(&src, &tar);
        prop_assert_eq!(res.intersection + res.src_only, res.src_total);
        prop_assert_eq!(res.intersection + res.tar_only, res.tar_total);
        prop_assert!(res.src_only >= 0.0 && res.tar_only >= 0.0);
    }

    #[test]
    fn fuzzy_monotone_in_threshold(a in "[a-z ]{0,20}", b in "[a-z ]{0,20}") {
        let src = WhitespaceTokenizer.tokenize(&a);
        let tar = WhitespaceTokenizer.tokenize(&b);
        let mut last = f64::INFINITY;
        for threshold in [1.0, 0.8, 0.6, 0.4, 0.2] {
            let ix = Intersector::new(
                IntersectionKind::Fuzzy,
                threshold,
                Some(Arc::new(EditSimilarity)),
            )
            .unwrap();
            let card = ix.intersect(&src, &tar).intersection;
            prop_assert!(card <= last + 1e-9);
            last = card;
        }
    }

    #[test]
    fn normalized_within_unit_interval_for_unit_costs(
        a in "[a-z]{0,10}",
        b in "[a-z]{0,10}",
    ) {
        let res = Alignment::run(&AlignConfig::default(), &a, &b).unwrap();
        prop_assert!(res.normalized >= 0.0);
        prop_assert!(res.normalized <= 1.0);
    }
}
