//! Shared run pipeline: load rows -> rate them -> summarize.
//!
//! Both the `sample` and `rate` commands go through here; they only differ in
//! where the rows come from.

use crate::data::{Dataset, generate_sample};
use crate::domain::{RatedTable, RunConfig, Source};
use crate::error::{AppError, RatingError};
use crate::io::ingest::{RowError, read_rows_csv};
use crate::rating::Classifier;
use crate::report::{Summary, summarize};

/// All computed outputs of a single run.
#[derive(Debug, Clone)]
pub struct RunOutput {
    pub dataset: Dataset,
    pub rated: RatedTable,
    pub summary: Summary,
    /// Rows dropped by `--skip-invalid`.
    pub row_errors: Vec<RowError>,
}

pub fn run(config: &RunConfig) -> Result<RunOutput, AppError> {
    let classifier = Classifier::new(config.total_domain)?;
    let (dataset, row_errors) = load_dataset(&config.source, classifier)?;
    tracing::info!(rows = dataset.len(), skipped = row_errors.len(), "dataset ready");

    let rated = dataset.classified_view();
    let summary = summarize(&dataset)?;

    Ok(RunOutput {
        dataset,
        rated,
        summary,
        row_errors,
    })
}

/// Build the dataset for a run.
pub fn load_dataset(source: &Source, classifier: Classifier) -> Result<(Dataset, Vec<RowError>), AppError> {
    match source {
        Source::Sample(sample) => Ok((generate_sample(sample, classifier)?, Vec::new())),
        Source::Csv { path, skip_invalid } => {
            let ingested = read_rows_csv(path, *skip_invalid)?;
            tracing::debug!(path = %path.display(), rows_read = ingested.rows_read, "read CSV");

            let mut dataset = Dataset::new(classifier);
            let mut row_errors = ingested.row_errors;

            if *skip_invalid {
                for (input, &line) in ingested.inputs.iter().zip(&ingested.lines) {
                    if let Err(e) = dataset.append(input) {
                        row_errors.push(RowError {
                            line,
                            message: e.to_string(),
                        });
                    }
                }
                row_errors.sort_by_key(|e| e.line);
                for e in &row_errors {
                    tracing::warn!(line = e.line, "skipped row: {}", e.message);
                }
            } else {
                dataset.append_many(&ingested.inputs).map_err(|e| match e {
                    RatingError::BatchValidation { index, issue } => {
                        let line = ingested.lines.get(index).copied().unwrap_or_default();
                        AppError::new(3, format!("CSV line {line}: {issue}"))
                    }
                    other => other.into(),
                })?;
            }

            if dataset.is_empty() {
                return Err(AppError::new(3, format!("No valid rows in '{}'.", path.display())));
            }
            Ok((dataset, row_errors))
        }
    }
}
