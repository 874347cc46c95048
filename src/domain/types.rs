//! Shared domain types.
//!
//! Columns are a closed set (nine attributes + Total Score) and rows are
//! fixed-size arrays indexed by those enums, so there is no string-keyed lookup
//! anywhere in the engine.

use std::collections::HashMap;
use std::path::PathBuf;

use clap::ValueEnum;
use serde::Serialize;

use crate::error::ValidationIssue;

pub const ATTRIBUTE_COUNT: usize = 9;
pub const COLUMN_COUNT: usize = ATTRIBUTE_COUNT + 1;

/// Inclusive bounds of every attribute score.
pub const SCORE_MIN: f64 = 0.0;
pub const SCORE_MAX: f64 = 10.0;

/// One of the nine scoring dimensions of a path sample.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Attribute {
    Length,
    Scenery,
    CarTraffic,
    FootTraffic,
    Safety,
    Urbanization,
    Steepness,
    Curvature,
    Cleanliness,
}

impl Attribute {
    /// Column order used by every table and export.
    pub const ALL: [Attribute; ATTRIBUTE_COUNT] = [
        Attribute::Length,
        Attribute::Scenery,
        Attribute::CarTraffic,
        Attribute::FootTraffic,
        Attribute::Safety,
        Attribute::Urbanization,
        Attribute::Steepness,
        Attribute::Curvature,
        Attribute::Cleanliness,
    ];

    pub fn index(self) -> usize {
        self as usize
    }

    pub fn display_name(self) -> &'static str {
        match self {
            Attribute::Length => "Length",
            Attribute::Scenery => "Scenery",
            Attribute::CarTraffic => "Car Traffic",
            Attribute::FootTraffic => "Foot Traffic",
            Attribute::Safety => "Safety",
            Attribute::Urbanization => "Urbanization",
            Attribute::Steepness => "Steepness",
            Attribute::Curvature => "Curvature",
            Attribute::Cleanliness => "Cleanliness",
        }
    }

    /// Labels for the (low, mid, high) buckets.
    pub fn labels(self) -> [&'static str; 3] {
        match self {
            Attribute::Length => ["Short", "Medium", "Long"],
            Attribute::Scenery => ["Drab", "Average", "Scenic"],
            Attribute::CarTraffic | Attribute::FootTraffic => ["Busy", "Average", "Empty"],
            Attribute::Safety => ["Unsafe", "Moderate", "Safe"],
            Attribute::Urbanization => ["Rural", "Suburban", "Urban"],
            Attribute::Steepness => ["Flat", "Moderate", "Steep"],
            Attribute::Curvature => ["Straight", "Moderate", "Winding"],
            Attribute::Cleanliness => ["Littered", "Moderate", "Clean"],
        }
    }
}

impl std::fmt::Display for Attribute {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.display_name())
    }
}

/// A table column: one of the attributes, or the derived Total Score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, ValueEnum)]
pub enum Column {
    Length,
    Scenery,
    CarTraffic,
    FootTraffic,
    Safety,
    Urbanization,
    Steepness,
    Curvature,
    Cleanliness,
    TotalScore,
}

impl Column {
    pub const ALL: [Column; COLUMN_COUNT] = [
        Column::Length,
        Column::Scenery,
        Column::CarTraffic,
        Column::FootTraffic,
        Column::Safety,
        Column::Urbanization,
        Column::Steepness,
        Column::Curvature,
        Column::Cleanliness,
        Column::TotalScore,
    ];

    pub fn index(self) -> usize {
        self as usize
    }

    /// `None` for Total Score.
    pub fn attribute(self) -> Option<Attribute> {
        Attribute::ALL.get(self.index()).copied()
    }

    pub fn display_name(self) -> &'static str {
        match self.attribute() {
            Some(attribute) => attribute.display_name(),
            None => "Total Score",
        }
    }

    pub fn labels(self) -> [&'static str; 3] {
        match self.attribute() {
            Some(attribute) => attribute.labels(),
            None => ["Subpar", "Ok", "Great"],
        }
    }
}

impl From<Attribute> for Column {
    fn from(attribute: Attribute) -> Self {
        Column::ALL[attribute.index()]
    }
}

impl std::fmt::Display for Column {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.display_name())
    }
}

/// Ordered qualitative bucket.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Level {
    Low,
    Mid,
    High,
}

impl Level {
    pub fn index(self) -> usize {
        self as usize
    }
}

/// A classified value: the column it came from and the bucket it landed in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Rating {
    pub column: Column,
    pub level: Level,
}

impl Rating {
    pub fn label(&self) -> &'static str {
        self.column.labels()[self.level.index()]
    }
}

impl std::fmt::Display for Rating {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Caller-supplied scores keyed by attribute.
pub type RowInput = HashMap<Attribute, f64>;

/// One sample: nine attribute scores plus the derived Total Score.
///
/// The total is computed when the row is built and there is no setter for it,
/// so `total() == scores().iter().sum()` holds for every `Row` value.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Row {
    scores: [f64; ATTRIBUTE_COUNT],
    total: f64,
}

impl Row {
    /// Build a row from scores in `Attribute::ALL` order, rejecting non-finite
    /// or out-of-domain values.
    pub fn new(scores: [f64; ATTRIBUTE_COUNT]) -> Result<Self, ValidationIssue> {
        for (attribute, value) in Attribute::ALL.into_iter().zip(scores) {
            validate_score(attribute, value)?;
        }
        Ok(Self::derived(scores))
    }

    pub fn from_input(input: &RowInput) -> Result<Self, ValidationIssue> {
        let mut scores = [0.0; ATTRIBUTE_COUNT];
        for attribute in Attribute::ALL {
            scores[attribute.index()] = input
                .get(&attribute)
                .copied()
                .ok_or(ValidationIssue::MissingAttribute(attribute))?;
        }
        Self::new(scores)
    }

    /// Positional form: `values[i]` is the score for `Attribute::ALL[i]`.
    pub fn from_values(values: &[f64]) -> Result<Self, ValidationIssue> {
        let scores = <[f64; ATTRIBUTE_COUNT]>::try_from(values).map_err(|_| ValidationIssue::WrongArity {
            expected: ATTRIBUTE_COUNT,
            found: values.len(),
        })?;
        Self::new(scores)
    }

    /// Unchecked constructor for rows computed from already-valid rows (means).
    pub(crate) fn derived(scores: [f64; ATTRIBUTE_COUNT]) -> Self {
        Self {
            scores,
            total: scores.iter().sum(),
        }
    }

    pub fn score(&self, attribute: Attribute) -> f64 {
        self.scores[attribute.index()]
    }

    pub fn scores(&self) -> &[f64; ATTRIBUTE_COUNT] {
        &self.scores
    }

    pub fn total(&self) -> f64 {
        self.total
    }

    pub fn value(&self, column: Column) -> f64 {
        match column.attribute() {
            Some(attribute) => self.score(attribute),
            None => self.total,
        }
    }

    /// All column values in `Column::ALL` order.
    pub fn values(&self) -> [f64; COLUMN_COUNT] {
        std::array::from_fn(|i| self.value(Column::ALL[i]))
    }

    pub fn to_input(&self) -> RowInput {
        Attribute::ALL.into_iter().map(|a| (a, self.score(a))).collect()
    }
}

fn validate_score(attribute: Attribute, value: f64) -> Result<(), ValidationIssue> {
    if !value.is_finite() {
        return Err(ValidationIssue::NonFinite { attribute, value });
    }
    if !(SCORE_MIN..=SCORE_MAX).contains(&value) {
        return Err(ValidationIssue::OutOfDomain { attribute, value });
    }
    Ok(())
}

/// Labels for one row, in `Column::ALL` order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RatedRow {
    ratings: [Rating; COLUMN_COUNT],
}

impl RatedRow {
    pub(crate) fn new(ratings: [Rating; COLUMN_COUNT]) -> Self {
        Self { ratings }
    }

    pub fn get(&self, column: Column) -> Rating {
        self.ratings[column.index()]
    }

    pub fn ratings(&self) -> &[Rating; COLUMN_COUNT] {
        &self.ratings
    }

    pub fn labels(&self) -> [&'static str; COLUMN_COUNT] {
        std::array::from_fn(|i| self.ratings[i].label())
    }
}

/// The qualitative projection of a dataset: one `RatedRow` per numeric row,
/// same order.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RatedTable {
    pub rows: Vec<RatedRow>,
}

impl RatedTable {
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// Per-attribute means over a dataset.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AverageRow {
    pub row: Row,
    pub sample_count: usize,
}

/// Synthetic sample settings.
#[derive(Debug, Clone, PartialEq)]
pub struct SampleConfig {
    pub count: usize,
    /// `None` seeds from OS entropy.
    pub seed: Option<u64>,
    pub decimals: u32,
}

/// Where the run's raw scores come from.
#[derive(Debug, Clone, PartialEq)]
pub enum Source {
    Sample(SampleConfig),
    Csv { path: PathBuf, skip_invalid: bool },
}

/// A full run's configuration as understood by the pipeline.
///
/// This is derived from CLI flags (plus `.env` / environment defaults).
#[derive(Debug, Clone, PartialEq)]
pub struct RunConfig {
    pub source: Source,
    /// Upper bound of the domain used to bucket the Total Score.
    pub total_domain: f64,
    /// Rows shown in terminal tables.
    pub head: usize,

    pub export_numeric: Option<PathBuf>,
    pub export_rated: Option<PathBuf>,
    pub export_summary: Option<PathBuf>,
}
