//! Two-cut-point bucketing.
//!
//! Each column's domain `[0, max]` is split at `max/3` and `2*max/3`. Upper
//! bounds are inclusive, so a score sitting exactly on a cut point takes the
//! lower bucket:
//!
//! - `score <= max/3`     -> low
//! - `score <= 2*max/3`   -> mid
//! - otherwise            -> high
//!
//! Attributes use `max = 10`. The Total Score uses `max = 80` by default even
//! though nine attributes can sum to 90; the bound is configurable so callers can
//! opt into 90 explicitly.

use crate::domain::{Column, Level, RatedRow, Rating, Row, SCORE_MAX};
use crate::error::AppError;

/// Default domain bound used to bucket the Total Score.
pub const DEFAULT_TOTAL_DOMAIN: f64 = 80.0;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Classifier {
    total_domain: f64,
}

impl Default for Classifier {
    fn default() -> Self {
        Self {
            total_domain: DEFAULT_TOTAL_DOMAIN,
        }
    }
}

impl Classifier {
    pub fn new(total_domain: f64) -> Result<Self, AppError> {
        if !(total_domain.is_finite() && total_domain > 0.0) {
            return Err(AppError::new(
                2,
                format!("Invalid total-score domain: {total_domain} (must be finite and > 0)."),
            ));
        }
        Ok(Self { total_domain })
    }

    pub fn total_domain(&self) -> f64 {
        self.total_domain
    }

    /// Upper bound of the domain the column is bucketed over.
    pub fn domain_max(&self, column: Column) -> f64 {
        match column {
            Column::TotalScore => self.total_domain,
            _ => SCORE_MAX,
        }
    }

    /// `(low/mid, mid/high)` cut points for the column.
    pub fn cut_points(&self, column: Column) -> (f64, f64) {
        let max = self.domain_max(column);
        (max / 3.0, max * 2.0 / 3.0)
    }

    /// Bucket a score. Scores outside the domain saturate to the nearest end
    /// bucket; NaN carries no information and lands in the low bucket.
    pub fn level(&self, column: Column, score: f64) -> Level {
        let (low_cut, high_cut) = self.cut_points(column);
        if score.is_nan() || score <= low_cut {
            Level::Low
        } else if score <= high_cut {
            Level::Mid
        } else {
            Level::High
        }
    }

    pub fn classify(&self, column: Column, score: f64) -> Rating {
        Rating {
            column,
            level: self.level(column, score),
        }
    }

    /// Classify every column of a row, Total Score included.
    pub fn classify_row(&self, row: &Row) -> RatedRow {
        RatedRow::new(std::array::from_fn(|i| {
            let column = Column::ALL[i];
            self.classify(column, row.value(column))
        }))
    }
}
