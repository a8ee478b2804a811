use std::collections::{BTreeMap, HashSet};
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use rand::Rng;
use serde::{Deserialize, Serialize};

use super::domain::{Dimension, MAX_SCORE};
use super::sampling::{sample_between, SamplingMode};
use crate::profile::ProfileRules;

/// Immutable rule set handed to the engine at construction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoringConfig {
    pub dimension_weights: DimensionWeights,
    pub potential_thresholds: PotentialThresholds,
    pub rules: BTreeMap<String, RuleTable>,
    pub default_range: ScoreRange,
    pub sampling: SamplingMode,
    pub analysis: AnalysisConfig,
    pub profile: ProfileRules,
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            dimension_weights: DimensionWeights::default(),
            potential_thresholds: PotentialThresholds::default(),
            rules: default_rules(),
            default_range: ScoreRange::new(5.0, 8.0),
            sampling: SamplingMode::Uniform,
            analysis: AnalysisConfig::default(),
            profile: ProfileRules::default(),
        }
    }
}

impl ScoringConfig {
    pub fn with_sampling(mut self, sampling: SamplingMode) -> Self {
        self.sampling = sampling;
        self
    }

    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self, RulesError> {
        let file = File::open(path)?;
        Self::from_reader(BufReader::new(file))
    }

    /// Parse a JSON rule file. Omitted sections keep their defaults.
    pub fn from_reader<R: Read>(reader: R) -> Result<Self, RulesError> {
        let config: Self = serde_json::from_reader(reader)?;
        config.validate()?;
        Ok(config)
    }

    pub fn rule_table(&self, code: &str) -> Option<&RuleTable> {
        self.rules.get(code)
    }

    pub fn validate(&self) -> Result<(), RulesError> {
        self.dimension_weights.validate()?;
        self.potential_thresholds.validate()?;
        if !self.default_range.is_valid() {
            return Err(RulesError::InvalidDefaultRange {
                min: self.default_range.min,
                max: self.default_range.max,
            });
        }
        for (code, table) in &self.rules {
            table.validate(code)?;
        }
        self.profile.validate()
    }
}

/// Closed score interval `[min, max]` within `[0, 100]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScoreRange {
    pub min: f64,
    pub max: f64,
}

impl ScoreRange {
    pub const fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    pub fn contains(&self, score: f64) -> bool {
        score >= self.min && score <= self.max
    }

    pub fn midpoint(&self) -> f64 {
        (self.min + self.max) / 2.0
    }

    pub fn is_valid(&self) -> bool {
        self.min.is_finite()
            && self.max.is_finite()
            && self.min >= 0.0
            && self.min <= self.max
            && self.max <= MAX_SCORE
    }

    pub fn sample<R: Rng + ?Sized>(&self, mode: SamplingMode, rng: &mut R) -> f64 {
        sample_between(self.min, self.max, mode, rng)
    }
}

/// Predicate that selects a bucket for a raw value.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Threshold {
    /// Matches numbers strictly greater than the bound.
    Above(f64),
    /// Matches any number that no earlier threshold claimed.
    Floor,
    /// Matches only by label.
    #[default]
    Label,
}

impl Threshold {
    pub fn is_numeric(&self) -> bool {
        !matches!(self, Self::Label)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Bucket {
    pub label: String,
    pub range: ScoreRange,
    #[serde(default)]
    pub when: Threshold,
}

impl Bucket {
    pub fn labelled(label: impl Into<String>, min: f64, max: f64) -> Self {
        Self {
            label: label.into(),
            range: ScoreRange::new(min, max),
            when: Threshold::Label,
        }
    }

    pub fn above(label: impl Into<String>, bound: f64, min: f64, max: f64) -> Self {
        Self {
            label: label.into(),
            range: ScoreRange::new(min, max),
            when: Threshold::Above(bound),
        }
    }

    pub fn floor(label: impl Into<String>, min: f64, max: f64) -> Self {
        Self {
            label: label.into(),
            range: ScoreRange::new(min, max),
            when: Threshold::Floor,
        }
    }
}

/// Ordered buckets for one indicator code. Numeric buckets are checked highest-first.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RuleTable {
    buckets: Vec<Bucket>,
}

impl RuleTable {
    pub fn new(buckets: Vec<Bucket>) -> Self {
        Self { buckets }
    }

    pub fn buckets(&self) -> &[Bucket] {
        &self.buckets
    }

    pub fn by_label(&self, label: &str) -> Option<&Bucket> {
        self.buckets
            .iter()
            .find(|bucket| bucket.label.eq_ignore_ascii_case(label))
    }

    pub fn by_value(&self, value: f64) -> Option<&Bucket> {
        self.buckets.iter().find(|bucket| match bucket.when {
            Threshold::Above(bound) => value > bound,
            Threshold::Floor => true,
            Threshold::Label => false,
        })
    }

    pub fn is_numeric(&self) -> bool {
        self.buckets.iter().any(|bucket| bucket.when.is_numeric())
    }

    fn validate(&self, code: &str) -> Result<(), RulesError> {
        if self.buckets.is_empty() {
            return Err(RulesError::EmptyTable {
                code: code.to_string(),
            });
        }

        let mut seen = HashSet::new();
        for bucket in &self.buckets {
            if !bucket.range.is_valid() {
                return Err(RulesError::InvalidRange {
                    code: code.to_string(),
                    label: bucket.label.clone(),
                    min: bucket.range.min,
                    max: bucket.range.max,
                });
            }
            if !seen.insert(bucket.label.to_ascii_lowercase()) {
                return Err(RulesError::DuplicateBucket {
                    code: code.to_string(),
                    label: bucket.label.clone(),
                });
            }
        }

        let numeric: Vec<Threshold> = self
            .buckets
            .iter()
            .map(|bucket| bucket.when)
            .filter(Threshold::is_numeric)
            .collect();
        let Some((last, thresholds)) = numeric.split_last() else {
            return Ok(());
        };
        if *last != Threshold::Floor {
            return Err(RulesError::MissingFloor {
                code: code.to_string(),
            });
        }

        let mut previous = f64::INFINITY;
        for threshold in thresholds {
            match threshold {
                Threshold::Above(bound) if bound.is_finite() && *bound < previous => {
                    previous = *bound;
                }
                Threshold::Above(_) => {
                    return Err(RulesError::UnorderedThresholds {
                        code: code.to_string(),
                    })
                }
                _ => {
                    return Err(RulesError::MissingFloor {
                        code: code.to_string(),
                    })
                }
            }
        }
        Ok(())
    }
}

/// Share of each dimension in the composite score.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DimensionWeights {
    pub industry: f64,
    pub competitiveness: f64,
    pub growth: f64,
    pub timing: f64,
}

impl Default for DimensionWeights {
    fn default() -> Self {
        Self {
            industry: 0.30,
            competitiveness: 0.40,
            growth: 0.20,
            timing: 0.10,
        }
    }
}

impl DimensionWeights {
    pub fn weight(&self, dimension: Dimension) -> f64 {
        match dimension {
            Dimension::Industry => self.industry,
            Dimension::Competitiveness => self.competitiveness,
            Dimension::Growth => self.growth,
            Dimension::Timing => self.timing,
        }
    }

    pub fn sum(&self) -> f64 {
        Dimension::ordered()
            .into_iter()
            .map(|dimension| self.weight(dimension))
            .sum()
    }

    fn validate(&self) -> Result<(), RulesError> {
        for dimension in Dimension::ordered() {
            let weight = self.weight(dimension);
            if !weight.is_finite() || weight < 0.0 {
                return Err(RulesError::InvalidDimensionWeight { dimension, weight });
            }
        }
        let sum = self.sum();
        if (sum - 1.0).abs() > 1e-6 {
            return Err(RulesError::DimensionWeightSum { sum });
        }
        Ok(())
    }
}

/// Inclusive lower bounds of the potential levels.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PotentialThresholds {
    pub very_high: f64,
    pub high: f64,
    pub medium: f64,
}

impl Default for PotentialThresholds {
    fn default() -> Self {
        Self {
            very_high: 80.0,
            high: 60.0,
            medium: 40.0,
        }
    }
}

impl PotentialThresholds {
    fn validate(&self) -> Result<(), RulesError> {
        let ordered = [self.very_high, self.high, self.medium];
        let finite = ordered.iter().all(|bound| bound.is_finite());
        if !finite || !(self.very_high > self.high && self.high > self.medium) {
            return Err(RulesError::UnorderedPotentialThresholds);
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalysisConfig {
    pub strengths: usize,
    pub weaknesses: usize,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            strengths: 3,
            weaknesses: 2,
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum RulesError {
    #[error("failed to read rule file: {0}")]
    Io(#[from] std::io::Error),
    #[error("rule file is not valid JSON: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("rule table '{code}' has no buckets")]
    EmptyTable { code: String },
    #[error("bucket '{label}' of '{code}' has invalid range [{min}, {max}]")]
    InvalidRange {
        code: String,
        label: String,
        min: f64,
        max: f64,
    },
    #[error("rule table '{code}' repeats bucket '{label}'")]
    DuplicateBucket { code: String, label: String },
    #[error("numeric thresholds of '{code}' must be finite and strictly descending")]
    UnorderedThresholds { code: String },
    #[error("numeric buckets of '{code}' must end with exactly one floor bucket")]
    MissingFloor { code: String },
    #[error("default range [{min}, {max}] is invalid")]
    InvalidDefaultRange { min: f64, max: f64 },
    #[error("weight {weight} for dimension {dimension} is invalid")]
    InvalidDimensionWeight { dimension: Dimension, weight: f64 },
    #[error("dimension weights sum to {sum}, expected 1.0")]
    DimensionWeightSum { sum: f64 },
    #[error("potential thresholds must be finite and strictly descending")]
    UnorderedPotentialThresholds,
    #[error("profile jitter {jitter} for dimension {dimension} is invalid")]
    InvalidJitter { dimension: Dimension, jitter: f64 },
    #[error("industry prior {score} for '{industry}' is outside [0, 100]")]
    InvalidIndustryPrior { industry: String, score: f64 },
}

fn default_rules() -> BTreeMap<String, RuleTable> {
    let tables = [
        (
            "industry_lifecycle",
            vec![
                Bucket::labelled("growth", 18.0, 20.0),
                Bucket::labelled("mature", 12.0, 17.0),
                Bucket::labelled("decline", 0.0, 11.0),
            ],
        ),
        (
            "market_growth_rate",
            vec![
                Bucket::above("high", 30.0, 12.0, 15.0),
                Bucket::above("medium", 15.0, 8.0, 11.0),
                Bucket::floor("low", 0.0, 7.0),
            ],
        ),
        (
            "revenue_growth",
            vec![
                Bucket::above("high", 30.0, 10.0, 12.0),
                Bucket::above("medium", 15.0, 6.0, 9.0),
                Bucket::floor("low", 0.0, 5.0),
            ],
        ),
        (
            "roe",
            vec![
                Bucket::above("high", 15.0, 8.0, 10.0),
                Bucket::above("medium", 8.0, 5.0, 7.0),
                Bucket::floor("low", 0.0, 4.0),
            ],
        ),
        (
            "valuation_level",
            vec![
                Bucket::labelled("low", 12.0, 15.0),
                Bucket::labelled("medium", 8.0, 11.0),
                Bucket::labelled("high", 0.0, 7.0),
            ],
        ),
    ];

    tables
        .into_iter()
        .map(|(code, buckets)| (code.to_string(), RuleTable::new(buckets)))
        .collect()
}
