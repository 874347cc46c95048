//! Synthetic path samples.
//!
//! Scores are drawn uniformly from `[0, 10)` and rounded, which is enough to
//! exercise every bucket of every column.

use rand::prelude::*;
use rand::rngs::StdRng;

use crate::data::Dataset;
use crate::domain::{ATTRIBUTE_COUNT, Row, SCORE_MAX, SCORE_MIN, SampleConfig};
use crate::error::AppError;
use crate::rating::Classifier;

/// Rounding beyond this adds nothing an `f64` can hold for scores up to 10.
const MAX_DECIMALS: u32 = 10;

pub fn generate_sample(config: &SampleConfig, classifier: Classifier) -> Result<Dataset, AppError> {
    if config.count == 0 {
        return Err(AppError::new(2, "Sample count must be > 0."));
    }
    if config.decimals > MAX_DECIMALS {
        return Err(AppError::new(
            2,
            format!("Sample decimals must be <= {MAX_DECIMALS} (got {}).", config.decimals),
        ));
    }

    let mut rng = match config.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    tracing::debug!(seed = ?config.seed, count = config.count, "generating sample rows");

    let scale = 10f64.powi(config.decimals as i32);
    let mut dataset = Dataset::new(classifier);
    for _ in 0..config.count {
        let scores: [f64; ATTRIBUTE_COUNT] =
            std::array::from_fn(|_| round_to(rng.gen_range(SCORE_MIN..SCORE_MAX), scale));
        let row = Row::new(scores).map_err(|e| AppError::new(4, format!("Generated an invalid row: {e}")))?;
        dataset.push(row);
    }

    Ok(dataset)
}

fn round_to(value: f64, scale: f64) -> f64 {
    (value * scale).round() / scale
}
