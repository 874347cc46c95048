//! Error types.
//!
//! - `RatingError`: failures of the rating engine itself (bad rows, empty dataset)
//! - `AppError`: what the binary reports, carrying the process exit code

use crate::domain::Attribute;

/// Why a single row was rejected.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ValidationIssue {
    #[error("missing score for '{0}'")]
    MissingAttribute(Attribute),
    #[error("score for '{attribute}' is not a finite number ({value})")]
    NonFinite { attribute: Attribute, value: f64 },
    #[error("score for '{attribute}' is outside [0, 10] ({value})")]
    OutOfDomain { attribute: Attribute, value: f64 },
    #[error("expected {expected} positional scores, got {found}")]
    WrongArity { expected: usize, found: usize },
}

/// Errors raised by `Dataset` and the aggregator.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum RatingError {
    #[error("invalid row: {0}")]
    Validation(ValidationIssue),
    /// `index` is zero-based within the batch passed to `append_many`.
    #[error("invalid row at index {index}: {issue}")]
    BatchValidation { index: usize, issue: ValidationIssue },
    #[error("cannot average an empty dataset")]
    EmptyDataset,
}

impl From<ValidationIssue> for RatingError {
    fn from(issue: ValidationIssue) -> Self {
        RatingError::Validation(issue)
    }
}

#[derive(Clone)]
pub struct AppError {
    exit_code: u8,
    message: String,
}

impl AppError {
    pub fn new(exit_code: u8, message: impl Into<String>) -> Self {
        Self {
            exit_code,
            message: message.into(),
        }
    }

    pub fn exit_code(&self) -> u8 {
        self.exit_code
    }
}

impl From<RatingError> for AppError {
    fn from(err: RatingError) -> Self {
        let exit_code = match err {
            RatingError::Validation(_) | RatingError::BatchValidation { .. } => 3,
            RatingError::EmptyDataset => 4,
        };
        AppError::new(exit_code, err.to_string())
    }
}

impl std::fmt::Display for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::fmt::Debug for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppError")
            .field("exit_code", &self.exit_code)
            .field("message", &self.message)
            .finish()
    }
}

impl std::error::Error for AppError {}
