use super::domain::{Dimension, Indicator};
use super::ScoringError;

/// Weighted mean of the scores of every indicator in `dimension`.
///
/// Returns 0 when the dimension has no indicators or its weights sum to zero.
pub(crate) fn aggregate(indicators: &[Indicator], dimension: Dimension) -> Result<f64, ScoringError> {
    let mut weighted_sum = 0.0;
    let mut total_weight = 0.0;

    for indicator in indicators
        .iter()
        .filter(|indicator| indicator.dimension == dimension)
    {
        let weight = indicator.weight;
        if !weight.is_finite() || !(0.0..=1.0).contains(&weight) {
            return Err(ScoringError::InvalidWeight {
                code: indicator.code.clone(),
                weight,
            });
        }
        let score = indicator.score.ok_or_else(|| ScoringError::Unscored {
            code: indicator.code.clone(),
        })?;
        if !score.is_finite() {
            return Err(ScoringError::InvalidScore {
                code: indicator.code.clone(),
                score,
            });
        }

        weighted_sum += score.clamp(0.0, indicator.max_score) * weight;
        total_weight += weight;
    }

    if total_weight == 0.0 {
        return Ok(0.0);
    }
    Ok(weighted_sum / total_weight)
}
