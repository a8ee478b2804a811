use std::collections::{HashMap, HashSet};

use chrono::{Local, NaiveDate};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rayon::prelude::*;
use tracing::{debug, info, warn};

use super::aggregate::aggregate;
use super::analysis::{analyze, StrengthReport};
use super::config::ScoringConfig;
use super::domain::{
    round2, Dimension, DimensionScore, DimensionScores, Indicator, ScoreResult, MAX_SCORE,
};
use super::policy::classify;
use super::rules::{resolve, score_indicator};
use super::sampling::stock_seed;
use super::ScoringError;
use crate::profile::{CompanyProfile, FinancialRatios, ProfileOutcome, ProfileScorer};

/// Source of the scoring date.
pub trait Clock: Send + Sync {
    fn today(&self) -> NaiveDate;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn today(&self) -> NaiveDate {
        Local::now().date_naive()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedClock(pub NaiveDate);

impl Clock for FixedClock {
    fn today(&self) -> NaiveDate {
        self.0
    }
}

/// Stateless scorer that applies one rule configuration to indicator sets and profiles.
pub struct ScoringEngine<C = SystemClock> {
    config: ScoringConfig,
    clock: C,
}

impl ScoringEngine<SystemClock> {
    pub fn new(config: ScoringConfig) -> Self {
        Self::with_clock(config, SystemClock)
    }
}

impl<C: Clock> ScoringEngine<C> {
    pub fn with_clock(config: ScoringConfig, clock: C) -> Self {
        Self { config, clock }
    }

    pub fn config(&self) -> &ScoringConfig {
        &self.config
    }

    pub fn today(&self) -> NaiveDate {
        self.clock.today()
    }

    pub fn score_indicator<R: Rng + ?Sized>(
        &self,
        code: &str,
        value: Option<f64>,
        value_text: Option<&str>,
        rng: &mut R,
    ) -> f64 {
        score_indicator(&self.config, code, value, value_text, rng)
    }

    /// Name of the rule bucket a raw value falls into, if any table claims it.
    pub fn bucket_for(&self, code: &str, value: Option<f64>, value_text: Option<&str>) -> Option<&str> {
        resolve(&self.config, code, value, value_text)
            .bucket
            .map(|bucket| bucket.label.as_str())
    }

    /// Score every indicator and attach the result in place.
    pub fn score_indicators<R: Rng + ?Sized>(&self, indicators: &mut [Indicator], rng: &mut R) {
        for indicator in indicators.iter_mut() {
            let score = self.score_indicator(
                &indicator.code,
                indicator.value,
                indicator.value_text.as_deref(),
                rng,
            );
            indicator.set_score(score);
        }
    }

    pub fn aggregate(&self, indicators: &[Indicator], dimension: Dimension) -> Result<f64, ScoringError> {
        aggregate(indicators, dimension)
    }

    /// Composite result for already-scored indicators.
    pub fn compute(&self, stock_code: &str, indicators: &[Indicator]) -> Result<ScoreResult, ScoringError> {
        let mut scores = DimensionScores::default();
        for dimension in Dimension::ordered() {
            scores.set(dimension, aggregate(indicators, dimension)?);
        }
        Ok(self.compose(stock_code, scores))
    }

    /// Weight four dimension scores into a dated, classified result.
    pub fn compose(&self, stock_code: &str, scores: DimensionScores) -> ScoreResult {
        let weights = &self.config.dimension_weights;
        let total: f64 = Dimension::ordered()
            .into_iter()
            .map(|dimension| scores.get(dimension) * weights.weight(dimension))
            .sum();
        let total_score = round2(total.clamp(0.0, MAX_SCORE));
        let potential_level = classify(total_score, &self.config.potential_thresholds);

        debug!(
            stock = stock_code,
            total_score,
            level = potential_level.key(),
            "composite score computed"
        );

        ScoreResult {
            stock_code: stock_code.to_string(),
            total_score,
            industry_score: round2(scores.industry),
            competitiveness_score: round2(scores.competitiveness),
            growth_score: round2(scores.growth),
            timing_score: round2(scores.timing),
            potential_level,
            score_date: self.clock.today(),
        }
    }

    /// Dimension scores of a result paired with their configured weights.
    pub fn breakdown(&self, result: &ScoreResult) -> Vec<DimensionScore> {
        Dimension::ordered()
            .into_iter()
            .map(|dimension| DimensionScore {
                dimension,
                score: result.dimension_score(dimension),
                weight: self.config.dimension_weights.weight(dimension),
            })
            .collect()
    }

    pub fn analyze(&self, indicators: &[Indicator]) -> StrengthReport {
        analyze(indicators, &self.config.analysis)
    }

    /// Score raw indicators in place and compose the stock's result.
    pub fn score_stock<R: Rng + ?Sized>(
        &self,
        stock_code: &str,
        indicators: &mut [Indicator],
        rng: &mut R,
    ) -> Result<ScoreResult, ScoringError> {
        if indicators.is_empty() {
            return Err(ScoringError::MissingIndicators {
                stock_code: stock_code.to_string(),
            });
        }
        self.score_indicators(indicators, rng);
        self.compute(stock_code, indicators)
    }

    /// Score each listed stock in order, skipping any whose indicators are missing or corrupt.
    /// A code listed twice is scored once, at its first position.
    pub fn score_all<S, R>(
        &self,
        stock_codes: &[S],
        indicators_by_stock: &mut HashMap<String, Vec<Indicator>>,
        rng: &mut R,
    ) -> Vec<ScoreResult>
    where
        S: AsRef<str>,
        R: Rng + ?Sized,
    {
        let mut results = Vec::with_capacity(stock_codes.len());
        let mut seen = HashSet::new();
        for (position, code) in stock_codes.iter().enumerate() {
            let code = code.as_ref();
            if !seen.insert(code) {
                warn!(stock = code, position, "duplicate stock code, skipping");
                continue;
            }
            let outcome = match indicators_by_stock.get_mut(code) {
                Some(indicators) => self.score_stock(code, indicators, rng),
                None => Err(ScoringError::MissingIndicators {
                    stock_code: code.to_string(),
                }),
            };
            match outcome {
                Ok(result) => results.push(result),
                Err(err) => warn!(stock = code, error = %err, "skipping stock"),
            }
        }

        info!(
            requested = stock_codes.len(),
            scored = results.len(),
            "batch scoring finished"
        );
        results
    }

    /// Parallel [`score_all`](Self::score_all). Each stock draws from its own generator
    /// seeded by `seed` and its input position, so output does not depend on scheduling.
    /// A code listed twice is scored once, at its first position.
    pub fn score_all_parallel<S>(
        &self,
        stock_codes: &[S],
        indicators_by_stock: &mut HashMap<String, Vec<Indicator>>,
        seed: u64,
    ) -> Vec<ScoreResult>
    where
        S: AsRef<str> + Sync,
    {
        let mut slots: HashMap<&str, &mut Vec<Indicator>> = indicators_by_stock
            .iter_mut()
            .map(|(code, indicators)| (code.as_str(), indicators))
            .collect();
        let mut seen = HashSet::new();
        let jobs: Vec<(usize, &str, Option<&mut Vec<Indicator>>)> = stock_codes
            .iter()
            .enumerate()
            .filter_map(|(position, code)| {
                let code = code.as_ref();
                if !seen.insert(code) {
                    warn!(stock = code, position, "duplicate stock code, skipping");
                    return None;
                }
                Some((position, code, slots.remove(code)))
            })
            .collect();

        let results: Vec<ScoreResult> = jobs
            .into_par_iter()
            .filter_map(|(position, code, indicators)| {
                let mut rng = StdRng::seed_from_u64(stock_seed(seed, position));
                let outcome = match indicators {
                    Some(indicators) => self.score_stock(code, indicators, &mut rng),
                    None => Err(ScoringError::MissingIndicators {
                        stock_code: code.to_string(),
                    }),
                };
                outcome
                    .map_err(|err| warn!(stock = code, error = %err, "skipping stock"))
                    .ok()
            })
            .collect();

        info!(
            requested = stock_codes.len(),
            scored = results.len(),
            "parallel batch scoring finished"
        );
        results
    }

    /// Score a company from its profile and ratios instead of indicator rows.
    pub fn score_profile<R: Rng + ?Sized>(
        &self,
        profile: &CompanyProfile,
        ratios: &FinancialRatios,
        rng: &mut R,
    ) -> ProfileOutcome {
        let scorer = ProfileScorer::new(&self.config.profile, self.config.sampling);
        let breakdown = scorer.score(profile, ratios, self.clock.today(), rng);
        ProfileOutcome {
            result: self.compose(&profile.code, breakdown.scores),
            adjustments: breakdown.adjustments,
        }
    }
}
