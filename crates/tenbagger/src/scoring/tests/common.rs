use std::collections::HashMap;

use chrono::NaiveDate;
use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::scoring::{
    Dimension, FixedClock, Indicator, SamplingMode, ScoringConfig, ScoringEngine,
};

pub(super) fn score_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 9, 24).expect("valid date")
}

pub(super) fn engine() -> ScoringEngine<FixedClock> {
    ScoringEngine::with_clock(ScoringConfig::default(), FixedClock(score_date()))
}

pub(super) fn midpoint_engine() -> ScoringEngine<FixedClock> {
    ScoringEngine::with_clock(
        ScoringConfig::default().with_sampling(SamplingMode::Midpoint),
        FixedClock(score_date()),
    )
}

pub(super) fn rng(seed: u64) -> StdRng {
    StdRng::seed_from_u64(seed)
}

pub(super) fn scored(code: &str, dimension: Dimension, score: f64, weight: f64) -> Indicator {
    Indicator::numeric(code, dimension, 0.0, weight).with_score(score)
}

/// Raw indicators for a healthy growth stock, one or more per dimension.
pub(super) fn growth_stock() -> Vec<Indicator> {
    vec![
        Indicator::categorical("industry_lifecycle", Dimension::Industry, "growth", 0.15),
        Indicator::numeric("market_growth_rate", Dimension::Industry, 35.0, 0.10),
        Indicator::numeric("revenue_growth", Dimension::Competitiveness, 22.0, 0.10),
        Indicator::numeric("roe", Dimension::Competitiveness, 18.0, 0.07),
        Indicator::numeric("future_growth", Dimension::Growth, 25.0, 0.12),
        Indicator::categorical("valuation_level", Dimension::Timing, "low", 0.06),
    ]
}

pub(super) fn batch(codes: &[&str]) -> HashMap<String, Vec<Indicator>> {
    codes
        .iter()
        .map(|code| (code.to_string(), growth_stock()))
        .collect()
}
