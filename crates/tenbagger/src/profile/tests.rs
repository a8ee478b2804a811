use chrono::NaiveDate;
use rand::rngs::StdRng;
use rand::SeedableRng;

use super::*;
use crate::scoring::{FixedClock, PotentialLevel, ScoringConfig, ScoringEngine};

fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 9, 24).expect("valid date")
}

fn engine(sampling: SamplingMode) -> ScoringEngine<FixedClock> {
    ScoringEngine::with_clock(
        ScoringConfig::default().with_sampling(sampling),
        FixedClock(today()),
    )
}

fn moutai() -> (CompanyProfile, FinancialRatios) {
    let profile = CompanyProfile {
        code: "600519".to_string(),
        name: "贵州茅台".to_string(),
        industry: "白酒".to_string(),
        list_date: NaiveDate::from_ymd_opt(2001, 8, 27).expect("valid date"),
        current_price: Some(1680.0),
    };
    let ratios = FinancialRatios {
        roe: Some(0.30),
        netprofit_ratio: Some(0.52),
        grossprofit_ratio: Some(0.91),
        debt_to_assets: Some(0.20),
        ..FinancialRatios::default()
    };
    (profile, ratios)
}

fn bank() -> (CompanyProfile, FinancialRatios) {
    let profile = CompanyProfile {
        code: "000001".to_string(),
        name: "平安银行".to_string(),
        industry: "银行".to_string(),
        list_date: NaiveDate::from_ymd_opt(1991, 4, 3).expect("valid date"),
        current_price: Some(12.5),
    };
    let ratios = FinancialRatios {
        roe: Some(0.12),
        netprofit_ratio: Some(0.25),
        debt_to_assets: Some(0.92),
        ..FinancialRatios::default()
    };
    (profile, ratios)
}

#[test]
fn midpoint_profile_scores_are_deterministic() {
    let engine = engine(SamplingMode::Midpoint);
    let (profile, ratios) = moutai();

    let first = engine.score_profile(&profile, &ratios, &mut StdRng::seed_from_u64(1));
    let second = engine.score_profile(&profile, &ratios, &mut StdRng::seed_from_u64(2));

    assert_eq!(first, second);
    let result = first.result;
    assert_eq!(result.industry_score, 90.0);
    assert_eq!(result.competitiveness_score, 100.0);
    assert_eq!(result.growth_score, 100.0);
    assert_eq!(result.timing_score, 65.0);
    assert!((result.total_score - 93.5).abs() < 1e-9);
    assert_eq!(result.potential_level, PotentialLevel::VeryHigh);
    assert_eq!(result.stock_code, "600519");
}

#[test]
fn cyclical_bank_is_penalised_for_leverage() {
    let engine = engine(SamplingMode::Midpoint);
    let (profile, ratios) = bank();

    let outcome = engine.score_profile(&profile, &ratios, &mut StdRng::seed_from_u64(1));

    let result = outcome.result;
    assert_eq!(result.industry_score, 80.0);
    assert_eq!(result.competitiveness_score, 75.0);
    assert_eq!(result.growth_score, 65.0);
    assert_eq!(result.timing_score, 75.0);
    assert!((result.total_score - 74.5).abs() < 1e-9);
    assert_eq!(result.potential_level, PotentialLevel::High);
    assert!(outcome
        .adjustments
        .iter()
        .any(|adjustment| adjustment.points == -10.0 && adjustment.dimension == Dimension::Competitiveness));
}

#[test]
fn unknown_recent_listing_uses_default_prior() {
    let rules = ProfileRules::default();
    let scorer = ProfileScorer::new(&rules, SamplingMode::Midpoint);
    let profile = CompanyProfile {
        code: "688999".to_string(),
        name: "New Co".to_string(),
        industry: "太空采矿".to_string(),
        list_date: NaiveDate::from_ymd_opt(2024, 1, 15).expect("valid date"),
        current_price: None,
    };

    let breakdown = scorer.score(
        &profile,
        &FinancialRatios::default(),
        today(),
        &mut StdRng::seed_from_u64(9),
    );

    assert_eq!(breakdown.scores.industry, 65.0);
    // Missing ratios score no bonus; missing debt counts as 50%.
    assert_eq!(breakdown.scores.competitiveness, 60.0);
    assert_eq!(breakdown.scores.growth, 65.0);
    // Missing price counts as 50.
    assert_eq!(breakdown.scores.timing, 70.0);
}

#[test]
fn jittered_scores_stay_within_noise_band() {
    let engine = engine(SamplingMode::Uniform);
    let (profile, ratios) = bank();
    let mut rng = StdRng::seed_from_u64(42);

    for _ in 0..200 {
        let result = engine.score_profile(&profile, &ratios, &mut rng).result;
        assert!((75.0..=85.0).contains(&result.industry_score));
        assert!((65.0..=85.0).contains(&result.competitiveness_score));
        assert!((57.0..=73.0).contains(&result.growth_score));
        assert!((65.0..=85.0).contains(&result.timing_score));
    }
}

#[test]
fn jittered_scores_are_clamped() {
    let engine = engine(SamplingMode::Uniform);
    let (profile, ratios) = moutai();
    let mut rng = StdRng::seed_from_u64(5);

    for _ in 0..200 {
        let result = engine.score_profile(&profile, &ratios, &mut rng).result;
        assert!(result.competitiveness_score <= 100.0);
        assert!(result.growth_score <= 100.0);
    }
}

#[test]
fn exchange_code_follows_leading_digit() {
    let (moutai, _) = moutai();
    let (bank, _) = bank();

    assert_eq!(moutai.exchange_code(), "600519.SH");
    assert_eq!(bank.exchange_code(), "000001.SZ");
}

#[test]
fn rejects_negative_jitter() {
    let mut rules = ProfileRules::default();
    rules.jitter.timing = -1.0;

    match rules.validate() {
        Err(RulesError::InvalidJitter { dimension, .. }) => assert_eq!(dimension, Dimension::Timing),
        other => panic!("expected invalid jitter, got {other:?}"),
    }
}
