use rand::rngs::{OsRng, StdRng};
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};

/// How a score is realized from a closed range.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SamplingMode {
    /// Draw uniformly from the range.
    #[default]
    Uniform,
    /// Always take the range midpoint.
    Midpoint,
}

impl SamplingMode {
    pub const fn from_jitter(jitter: bool) -> Self {
        if jitter {
            Self::Uniform
        } else {
            Self::Midpoint
        }
    }
}

pub(crate) fn sample_between<R: Rng + ?Sized>(
    min: f64,
    max: f64,
    mode: SamplingMode,
    rng: &mut R,
) -> f64 {
    let span = max - min;
    if !span.is_finite() {
        // NaN, infinite or overflowing bounds collapse to whichever bound is usable.
        return [min, max]
            .into_iter()
            .find(|bound| bound.is_finite())
            .unwrap_or(0.0);
    }
    match mode {
        SamplingMode::Midpoint => min + span / 2.0,
        SamplingMode::Uniform if min >= max => min,
        SamplingMode::Uniform => rng.gen_range(min..=max),
    }
}

/// Generator for a scoring run: seeded when a seed is given, otherwise from OS entropy.
pub fn scoring_rng(seed: Option<u64>) -> Result<StdRng, rand::Error> {
    match seed {
        Some(seed) => Ok(StdRng::seed_from_u64(seed)),
        None => StdRng::from_rng(OsRng),
    }
}

/// Per-stock seed for the parallel batch, fixed by the stock's position in the input.
pub(crate) fn stock_seed(base: u64, position: usize) -> u64 {
    base ^ (position as u64 + 1).wrapping_mul(0x9E37_79B9_7F4A_7C15)
}
