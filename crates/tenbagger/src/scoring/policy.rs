use super::config::PotentialThresholds;
use super::domain::PotentialLevel;

/// Bucket a rounded total into a potential level. Lower bounds are inclusive.
pub(crate) fn classify(total_score: f64, thresholds: &PotentialThresholds) -> PotentialLevel {
    if total_score >= thresholds.very_high {
        PotentialLevel::VeryHigh
    } else if total_score >= thresholds.high {
        PotentialLevel::High
    } else if total_score >= thresholds.medium {
        PotentialLevel::Medium
    } else {
        PotentialLevel::Low
    }
}
