//! Reporting utilities: the dataset summary and terminal formatting.

use serde::Serialize;

use crate::data::Dataset;
use crate::domain::{AverageRow, Column, Level, RatedRow};
use crate::error::RatingError;

pub mod format;

pub use format::*;

/// The "typical" sample: the mean row and its ratings.
#[derive(Debug, Clone, PartialEq)]
pub struct Summary {
    pub average: AverageRow,
    pub rated: RatedRow,
    pub total_domain: f64,
}

/// Average the dataset and rate the result with the dataset's own classifier,
/// so the mean row is bucketed exactly like the individual rows.
pub fn summarize(dataset: &Dataset) -> Result<Summary, RatingError> {
    let average = dataset.average_row()?;
    let rated = dataset.classifier().classify_row(&average.row);
    Ok(Summary {
        average,
        rated,
        total_domain: dataset.classifier().total_domain(),
    })
}

/// Serializable form of a `Summary` (JSON export).
#[derive(Debug, Clone, Serialize)]
pub struct SummaryFile {
    pub tool: String,
    pub sample_count: usize,
    pub total_domain: f64,
    pub average: Vec<SummaryColumn>,
}

#[derive(Debug, Clone, Serialize)]
pub struct SummaryColumn {
    pub column: &'static str,
    pub value: f64,
    pub level: Level,
    pub rating: &'static str,
}

impl From<&Summary> for SummaryFile {
    fn from(summary: &Summary) -> Self {
        let average = Column::ALL
            .into_iter()
            .map(|column| {
                let rating = summary.rated.get(column);
                SummaryColumn {
                    column: column.display_name(),
                    value: summary.average.row.value(column),
                    level: rating.level,
                    rating: rating.label(),
                }
            })
            .collect();

        SummaryFile {
            tool: "ratings".to_string(),
            sample_count: summary.average.sample_count,
            total_domain: summary.total_domain,
            average,
        }
    }
}
