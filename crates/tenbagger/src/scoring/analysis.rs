use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

use super::config::AnalysisConfig;
use super::domain::{Indicator, ScoreResult};

/// Highest and lowest scoring indicators of one stock.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StrengthReport {
    pub strengths: Vec<Indicator>,
    pub weaknesses: Vec<Indicator>,
}

fn ranking_score(indicator: &Indicator) -> f64 {
    indicator.score.unwrap_or(0.0)
}

pub(crate) fn analyze(indicators: &[Indicator], config: &AnalysisConfig) -> StrengthReport {
    let mut ranked: Vec<&Indicator> = indicators.iter().collect();
    ranked.sort_by(|a, b| {
        ranking_score(b)
            .partial_cmp(&ranking_score(a))
            .unwrap_or(Ordering::Equal)
    });

    let strengths = if ranked.len() >= config.strengths {
        ranked[..config.strengths]
            .iter()
            .map(|indicator| (*indicator).clone())
            .collect()
    } else {
        Vec::new()
    };

    let weaknesses = if ranked.len() >= config.weaknesses {
        ranked[ranked.len() - config.weaknesses..]
            .iter()
            .map(|indicator| (*indicator).clone())
            .collect()
    } else {
        Vec::new()
    };

    StrengthReport {
        strengths,
        weaknesses,
    }
}

pub const DEFAULT_HIGH_POTENTIAL_MIN: f64 = 80.0;
pub const DEFAULT_HIGH_POTENTIAL_LIMIT: usize = 20;

/// Results scoring at least `min_score`, best first, at most `limit` of them.
pub fn high_potential(results: &[ScoreResult], min_score: f64, limit: usize) -> Vec<ScoreResult> {
    let mut selected: Vec<ScoreResult> = results
        .iter()
        .filter(|result| result.total_score >= min_score)
        .cloned()
        .collect();
    selected.sort_by(|a, b| {
        b.total_score
            .partial_cmp(&a.total_score)
            .unwrap_or(Ordering::Equal)
    });
    selected.truncate(limit);
    selected
}
