mod aggregate;
mod analysis;
mod config;
mod domain;
mod engine;
mod policy;
mod rules;
mod sampling;

pub use analysis::{
    high_potential, StrengthReport, DEFAULT_HIGH_POTENTIAL_LIMIT, DEFAULT_HIGH_POTENTIAL_MIN,
};
pub use config::{
    AnalysisConfig, Bucket, DimensionWeights, PotentialThresholds, RuleTable, RulesError,
    ScoreRange, ScoringConfig, Threshold,
};
pub use domain::{
    Dimension, DimensionScore, DimensionScores, Indicator, ParseDimensionError, PotentialLevel,
    ScoreResult, MAX_SCORE,
};
pub use engine::{Clock, FixedClock, ScoringEngine, SystemClock};
pub use sampling::{scoring_rng, SamplingMode};

/// Failure to aggregate one stock's indicators. The batch skips the stock and carries on.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ScoringError {
    #[error("no indicators supplied for stock '{stock_code}'")]
    MissingIndicators { stock_code: String },
    #[error("indicator '{code}' carries invalid weight {weight}")]
    InvalidWeight { code: String, weight: f64 },
    #[error("indicator '{code}' has not been scored")]
    Unscored { code: String },
    #[error("indicator '{code}' carries invalid score {score}")]
    InvalidScore { code: String, score: f64 },
}

#[cfg(test)]
mod tests;
