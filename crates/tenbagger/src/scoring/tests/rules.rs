use super::common::*;
use crate::scoring::{Bucket, RuleTable, ScoreRange, ScoringConfig, ScoringEngine};

#[test]
fn numeric_values_select_buckets_highest_first() {
    let engine = engine();

    assert_eq!(engine.bucket_for("market_growth_rate", Some(35.0), None), Some("high"));
    assert_eq!(engine.bucket_for("market_growth_rate", Some(20.0), None), Some("medium"));
    assert_eq!(engine.bucket_for("market_growth_rate", Some(2.0), None), Some("low"));
    assert_eq!(engine.bucket_for("revenue_growth", Some(-12.5), None), Some("low"));
}

#[test]
fn values_on_a_threshold_fall_to_the_lower_bucket() {
    let engine = engine();

    assert_eq!(engine.bucket_for("roe", Some(15.0), None), Some("medium"));
    assert_eq!(engine.bucket_for("roe", Some(8.0), None), Some("low"));
    assert_eq!(engine.bucket_for("market_growth_rate", Some(30.0), None), Some("medium"));
    assert_eq!(engine.bucket_for("revenue_growth", Some(15.0), None), Some("low"));
}

#[test]
fn roe_on_threshold_scores_in_medium_range() {
    let engine = engine();
    let mut rng = rng(11);

    for _ in 0..200 {
        let score = engine.score_indicator("roe", Some(15.0), None, &mut rng);
        assert!((5.0..=7.0).contains(&score), "score {score} outside medium range");
    }
}

#[test]
fn categorical_labels_select_buckets() {
    let engine = midpoint_engine();
    let mut rng = rng(3);

    assert_eq!(
        engine.score_indicator("industry_lifecycle", None, Some("growth"), &mut rng),
        19.0
    );
    assert_eq!(
        engine.score_indicator("industry_lifecycle", None, Some("decline"), &mut rng),
        5.5
    );
    assert_eq!(
        engine.score_indicator("valuation_level", None, Some("medium"), &mut rng),
        9.5
    );
}

#[test]
fn labels_can_name_numeric_buckets() {
    let engine = engine();
    let mut rng = rng(5);

    let score = engine.score_indicator("roe", None, Some("high"), &mut rng);
    assert!((8.0..=10.0).contains(&score));
    assert_eq!(engine.bucket_for("roe", None, Some("High")), Some("high"));
}

#[test]
fn label_wins_over_value() {
    let engine = engine();

    assert_eq!(engine.bucket_for("roe", Some(2.0), Some("high")), Some("high"));
}

#[test]
fn blank_label_counts_as_absent() {
    let engine = engine();

    assert_eq!(engine.bucket_for("roe", Some(20.0), Some("   ")), Some("high"));
}

#[test]
fn malformed_inputs_fall_back_to_default_range() {
    let engine = engine();
    let default = engine.config().default_range;
    let mut rng = rng(17);

    let cases: [(&str, Option<f64>, Option<&str>); 6] = [
        ("unknown_code", Some(42.0), None),
        ("industry_lifecycle", None, Some("exploding")),
        ("industry_lifecycle", Some(50.0), None),
        ("roe", None, None),
        ("roe", Some(f64::NAN), None),
        ("market_growth_rate", Some(f64::INFINITY), None),
    ];

    for (code, value, label) in cases {
        assert_eq!(engine.bucket_for(code, value, label), None, "{code}");
        let score = engine.score_indicator(code, value, label, &mut rng);
        assert!(default.contains(score), "{code} scored {score}");
    }
}

#[test]
fn fixed_seed_reproduces_scores() {
    let engine = engine();

    let first = engine.score_indicator("market_growth_rate", Some(18.0), None, &mut rng(99));
    let second = engine.score_indicator("market_growth_rate", Some(18.0), None, &mut rng(99));

    assert_eq!(first, second);
}

#[test]
fn midpoint_mode_is_deterministic_across_generators() {
    let engine = midpoint_engine();

    let first = engine.score_indicator("revenue_growth", Some(40.0), None, &mut rng(1));
    let second = engine.score_indicator("revenue_growth", Some(40.0), None, &mut rng(2));

    assert_eq!(first, 11.0);
    assert_eq!(first, second);
}

#[test]
fn scores_are_clamped_to_bounds() {
    let mut config = ScoringConfig::default();
    config.rules.insert(
        "overheated".to_string(),
        RuleTable::new(vec![Bucket::labelled("hot", 95.0, 140.0)]),
    );
    config.default_range = ScoreRange::new(-10.0, -5.0);
    let engine = ScoringEngine::new(config);
    let mut rng = rng(8);

    for _ in 0..100 {
        let hot = engine.score_indicator("overheated", None, Some("hot"), &mut rng);
        assert!((95.0..=100.0).contains(&hot));
        let cold = engine.score_indicator("missing", None, None, &mut rng);
        assert_eq!(cold, 0.0);
    }
}

#[test]
fn malformed_bucket_ranges_fall_back_instead_of_panicking() {
    let mut config = ScoringConfig::default();
    config.rules.insert(
        "broken".to_string(),
        RuleTable::new(vec![
            Bucket::labelled("nan", f64::NAN, 10.0),
            Bucket::labelled("unbounded", 20.0, f64::INFINITY),
            Bucket::labelled("inverted", 60.0, 40.0),
        ]),
    );
    let engine = ScoringEngine::new(config);
    let default = engine.config().default_range;
    let mut rng = rng(21);

    for label in ["nan", "unbounded", "inverted"] {
        assert_eq!(engine.bucket_for("broken", None, Some(label)), None, "{label}");
        for _ in 0..50 {
            let score = engine.score_indicator("broken", None, Some(label), &mut rng);
            assert!(default.contains(score), "{label} scored {score}");
        }
    }
}

#[test]
fn malformed_default_range_still_yields_a_score() {
    let mut config = ScoringConfig::default();
    config.default_range = ScoreRange::new(f64::NAN, f64::INFINITY);
    let engine = ScoringEngine::new(config);
    let mut rng = rng(4);

    assert_eq!(engine.score_indicator("unknown_code", Some(3.0), None, &mut rng), 0.0);
}
