use rand::Rng;
use tracing::{debug, warn};

use super::config::{Bucket, ScoreRange, ScoringConfig};
use super::domain::MAX_SCORE;

/// Range an indicator's score is drawn from, with the bucket that selected it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct Resolution<'a> {
    pub bucket: Option<&'a Bucket>,
    pub range: ScoreRange,
}

impl<'a> Resolution<'a> {
    fn matched(config: &ScoringConfig, code: &str, bucket: &'a Bucket) -> Self {
        let range = bucket.range;
        if !(range.min.is_finite() && range.max.is_finite()) || range.min > range.max {
            warn!(
                indicator = code,
                bucket = bucket.label.as_str(),
                min = range.min,
                max = range.max,
                "bucket has a malformed range, using default range"
            );
            return Self::fallback(config);
        }
        Self {
            bucket: Some(bucket),
            range,
        }
    }

    fn fallback(config: &ScoringConfig) -> Self {
        Self {
            bucket: None,
            range: config.default_range,
        }
    }
}

pub(crate) fn resolve<'a>(
    config: &'a ScoringConfig,
    code: &str,
    value: Option<f64>,
    value_text: Option<&str>,
) -> Resolution<'a> {
    let label = value_text.map(str::trim).filter(|label| !label.is_empty());

    let Some(table) = config.rule_table(code) else {
        debug!(indicator = code, "no rule table for indicator, using default range");
        return Resolution::fallback(config);
    };

    if let Some(label) = label {
        if value.is_some() {
            debug!(indicator = code, label, "value and label both supplied, label wins");
        }
        return match table.by_label(label) {
            Some(bucket) => Resolution::matched(config, code, bucket),
            None => {
                warn!(indicator = code, label, "unrecognised label, using default range");
                Resolution::fallback(config)
            }
        };
    }

    match value {
        Some(value) if !value.is_finite() => {
            warn!(indicator = code, value, "non-finite indicator value, using default range");
            Resolution::fallback(config)
        }
        Some(value) => match table.by_value(value) {
            Some(bucket) => Resolution::matched(config, code, bucket),
            None => {
                debug!(indicator = code, value, "label-only table given a number");
                Resolution::fallback(config)
            }
        },
        None => {
            debug!(indicator = code, "indicator has neither value nor label");
            Resolution::fallback(config)
        }
    }
}

pub(crate) fn score_indicator<R: Rng + ?Sized>(
    config: &ScoringConfig,
    code: &str,
    value: Option<f64>,
    value_text: Option<&str>,
    rng: &mut R,
) -> f64 {
    let resolution = resolve(config, code, value, value_text);
    resolution
        .range
        .sample(config.sampling, rng)
        .clamp(0.0, MAX_SCORE)
}
