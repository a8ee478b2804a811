use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Upper bound of every indicator and dimension score.
pub const MAX_SCORE: f64 = 100.0;

/// Grouping category an indicator contributes to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Dimension {
    Industry,
    Competitiveness,
    Growth,
    Timing,
}

impl Dimension {
    pub const fn ordered() -> [Self; 4] {
        [
            Self::Industry,
            Self::Competitiveness,
            Self::Growth,
            Self::Timing,
        ]
    }

    pub const fn key(self) -> &'static str {
        match self {
            Self::Industry => "industry",
            Self::Competitiveness => "competitiveness",
            Self::Growth => "growth",
            Self::Timing => "timing",
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Industry => "Industry",
            Self::Competitiveness => "Competitiveness",
            Self::Growth => "Growth Potential",
            Self::Timing => "Timing",
        }
    }
}

impl fmt::Display for Dimension {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown dimension '{value}'")]
pub struct ParseDimensionError {
    pub value: String,
}

impl FromStr for Dimension {
    type Err = ParseDimensionError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "industry" => Ok(Self::Industry),
            "competitiveness" => Ok(Self::Competitiveness),
            "growth" => Ok(Self::Growth),
            "timing" => Ok(Self::Timing),
            _ => Err(ParseDimensionError {
                value: raw.to_string(),
            }),
        }
    }
}

/// One measurable or categorical fact about a stock.
///
/// Exactly one of `value` and `value_text` is expected to be populated. `score` stays empty
/// until the indicator has been run through the scorer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Indicator {
    pub code: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    pub dimension: Dimension,
    #[serde(default)]
    pub value: Option<f64>,
    #[serde(default)]
    pub value_text: Option<String>,
    pub weight: f64,
    #[serde(default)]
    pub score: Option<f64>,
    #[serde(default = "default_max_score")]
    pub max_score: f64,
}

fn default_max_score() -> f64 {
    MAX_SCORE
}

impl Indicator {
    pub fn numeric(code: impl Into<String>, dimension: Dimension, value: f64, weight: f64) -> Self {
        Self {
            code: code.into(),
            name: None,
            dimension,
            value: Some(value),
            value_text: None,
            weight,
            score: None,
            max_score: MAX_SCORE,
        }
    }

    pub fn categorical(
        code: impl Into<String>,
        dimension: Dimension,
        label: impl Into<String>,
        weight: f64,
    ) -> Self {
        Self {
            code: code.into(),
            name: None,
            dimension,
            value: None,
            value_text: Some(label.into()),
            weight,
            score: None,
            max_score: MAX_SCORE,
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn with_score(mut self, score: f64) -> Self {
        self.set_score(score);
        self
    }

    /// Attach a score, clamped to `[0, max_score]`. Non-finite input is recorded as 0.
    pub fn set_score(&mut self, score: f64) {
        let clamped = if score.is_finite() {
            score.clamp(0.0, self.max_score)
        } else {
            0.0
        };
        self.score = Some(clamped);
    }

    pub fn is_scored(&self) -> bool {
        self.score.is_some()
    }

    pub fn display_name(&self) -> &str {
        self.name.as_deref().unwrap_or(&self.code)
    }
}

/// Final categorical label derived from the total score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PotentialLevel {
    VeryHigh,
    High,
    Medium,
    Low,
}

impl PotentialLevel {
    pub const fn key(self) -> &'static str {
        match self {
            Self::VeryHigh => "very_high",
            Self::High => "high",
            Self::Medium => "medium",
            Self::Low => "low",
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::VeryHigh => "Very High",
            Self::High => "High",
            Self::Medium => "Medium",
            Self::Low => "Low",
        }
    }
}

impl fmt::Display for PotentialLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// Per-dimension scores before weighting.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct DimensionScores {
    pub industry: f64,
    pub competitiveness: f64,
    pub growth: f64,
    pub timing: f64,
}

impl DimensionScores {
    pub fn get(&self, dimension: Dimension) -> f64 {
        match dimension {
            Dimension::Industry => self.industry,
            Dimension::Competitiveness => self.competitiveness,
            Dimension::Growth => self.growth,
            Dimension::Timing => self.timing,
        }
    }

    pub fn set(&mut self, dimension: Dimension, score: f64) {
        match dimension {
            Dimension::Industry => self.industry = score,
            Dimension::Competitiveness => self.competitiveness = score,
            Dimension::Growth => self.growth = score,
            Dimension::Timing => self.timing = score,
        }
    }
}

/// A dimension score paired with the weight it carries in the composite.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DimensionScore {
    pub dimension: Dimension,
    pub score: f64,
    pub weight: f64,
}

/// Immutable outcome of scoring one stock on one date.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreResult {
    pub stock_code: String,
    pub total_score: f64,
    pub industry_score: f64,
    pub competitiveness_score: f64,
    pub growth_score: f64,
    pub timing_score: f64,
    pub potential_level: PotentialLevel,
    pub score_date: NaiveDate,
}

impl ScoreResult {
    pub fn dimension_score(&self, dimension: Dimension) -> f64 {
        match dimension {
            Dimension::Industry => self.industry_score,
            Dimension::Competitiveness => self.competitiveness_score,
            Dimension::Growth => self.growth_score,
            Dimension::Timing => self.timing_score,
        }
    }
}

pub(crate) fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
