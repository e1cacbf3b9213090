use std::sync::Arc;

use strdist::{
    align::Alignment,
    config::AlignConfig,
    cost::{CostModel, Costs, SubstitutionModel},
    intersect::{EditSimilarity, IntersectionKind, Intersector},
    keyboard::{KeyLayout, KeyMetric},
    mode::{AlignMode, GapScope},
    script,
    task::AlignTask,
    tokenize::{QGramTokenizer, Tokenizer, WhitespaceTokenizer},
};

#[test]
fn test_distance_shortcuts() {
    assert_eq!(strdist::distance("kitten", "sitting"), 3.0);
    assert_eq!(strdist::distance("", ""), 0.0);
    assert!((strdist::normalized_distance("kitten", "sitting") - 3.0 / 7.0).abs() < 1e-12);
}

#[test]
fn test_mode_separation_concrete() {
    let d = |mode, a, b| {
        Alignment::run(&AlignConfig::with_mode(mode), a, b)
            .unwrap()
            .raw_cost
    };
    assert_eq!(d(AlignMode::SimpleEdit, "ab", "ba"), 2.0);
    assert_eq!(d(AlignMode::RestrictedTransposition, "ab", "ba"), 1.0);
    assert_eq!(d(AlignMode::FullTransposition, "orange", "strange"), 2.0);
    assert_eq!(d(AlignMode::RestrictedTransposition, "ca", "abc"), 3.0);
    assert_eq!(d(AlignMode::FullTransposition, "ca", "abc"), 2.0);
}

#[test]
fn test_trace_extraction_end_to_end() -> anyhow::Result<()> {
    let config = AlignConfig {
        task: AlignTask::Script,
        ..AlignConfig::default()
    };
    let res = Alignment::run(&config, "levenshtein", "frankenstein")?;
    let script = res.script.expect("script requested");
    assert_eq!(script::apply("levenshtein", &script), "frankenstein");

    let config = AlignConfig {
        task: AlignTask::Lcs,
        ..AlignConfig::default()
    };
    let res = Alignment::run(&config, "AGGTAB", "GXTXAYB")?;
    assert_eq!(res.lcs.as_deref(), Some("GTAB"));

    let config = AlignConfig {
        task: AlignTask::LcsStr,
        ..AlignConfig::default()
    };
    let res = Alignment::run(&config, "ababc", "xabcx")?;
    assert_eq!(res.lcs_str.as_deref(), Some("abc"));
    Ok(())
}

#[test]
fn test_typo_model_end_to_end() -> anyhow::Result<()> {
    let cost = CostModel::builder()
        .substitution(SubstitutionModel::Keyboard {
            layout: KeyLayout::Qwerty,
            metric: KeyMetric::Euclidean,
            shift_penalty: 0.5,
            failsafe: None,
        })
        .build()?;
    let config = AlignConfig {
        cost,
        ..AlignConfig::default()
    };
    // Neighbouring-key slip is cheaper than a far one.
    let slip = Alignment::run(&config, "cat", "cay")?.raw_cost; // t/y adjacent
    let far = Alignment::run(&config, "cat", "cap")?.raw_cost; // t/p distant
    assert!(slip < far);
    Ok(())
}

#[test]
fn test_phonetic_model_end_to_end() -> anyhow::Result<()> {
    let cost = CostModel::builder()
        .substitution(SubstitutionModel::PhoneticFeatures { weights: None })
        .build()?;
    let config = AlignConfig {
        cost,
        ..AlignConfig::default()
    };
    // Voicing difference (t/d) costs less than a vowel-for-stop swap.
    let voiced = Alignment::run(&config, "tip", "dip")?.raw_cost;
    let vowel = Alignment::run(&config, "tip", "oip")?.raw_cost;
    assert!(voiced < vowel);
    Ok(())
}

#[test]
fn test_qgram_jaccard_pipeline() {
    // The usual consumer shape: tokenize, intersect, one-line coefficient.
    let tok = QGramTokenizer::default();
    let src = tok.tokenize("nelson");
    let tar = tok.tokenize("neilsen");
    let res = Intersector::crisp().intersect(&src, &tar);
    let jaccard = res.intersection / res.union();
    assert!(jaccard > 0.0 && jaccard < 1.0);
    // Identical inputs give a full intersection.
    let res = Intersector::crisp().intersect(&src, &src);
    assert_eq!(res.intersection, res.src_total);
    assert_eq!(res.union(), res.src_total);
}

#[test]
fn test_fuzzy_word_bags() -> anyhow::Result<()> {
    let tok = WhitespaceTokenizer;
    let src = tok.tokenize("the quick brown fox");
    let tar = tok.tokenize("the quick browne fix");
    let crisp = Intersector::crisp().intersect(&src, &tar);
    let fuzzy = Intersector::new(
        IntersectionKind::Fuzzy,
        0.5,
        Some(Arc::new(EditSimilarity)),
    )?
    .intersect(&src, &tar);
    // Fuzzy credits brown/browne and fox/fix on top of the exact matches.
    assert_eq!(crisp.intersection, 2.0);
    assert!(fuzzy.intersection > crisp.intersection);
    assert!(fuzzy.intersection < 4.0);
    // The defining invariant survives fractional credit.
    assert!((fuzzy.intersection + fuzzy.src_only - fuzzy.src_total).abs() < 1e-12);
    Ok(())
}

#[test]
fn test_affine_modes_against_simple() -> anyhow::Result<()> {
    let config = AlignConfig::with_mode(AlignMode::AffineGap(GapScope::Global));
    // With default costs a lone gap costs gap_open = 1, like a unit indel.
    assert_eq!(Alignment::run(&config, "abc", "abxc")?.raw_cost, 1.0);
    let config = AlignConfig::with_mode(AlignMode::AffineGap(GapScope::Local));
    assert_eq!(Alignment::run(&config, "act", "cgactgac")?.raw_cost, 0.0);
    Ok(())
}

#[test]
fn test_cost_validation_is_eager() {
    let err = CostModel::builder()
        .costs(Costs {
            trans: -0.5,
            ..Costs::default()
        })
        .build()
        .unwrap_err();
    assert_eq!(
        err.to_string(),
        "negative trans cost -0.5"
    );
}
