//! The numeric table and its derived views.

use rayon::prelude::*;

use crate::domain::{ATTRIBUTE_COUNT, AverageRow, RatedTable, Row, RowInput};
use crate::error::RatingError;
use crate::rating::Classifier;

/// An ordered table of rows plus the classifier used to rate it.
///
/// Rows are append-only. The rated table and the average row are recomputed
/// from the rows on every call; nothing derived is stored.
#[derive(Debug, Clone, Default)]
pub struct Dataset {
    rows: Vec<Row>,
    classifier: Classifier,
}

impl Dataset {
    pub fn new(classifier: Classifier) -> Self {
        Self {
            rows: Vec::new(),
            classifier,
        }
    }

    pub fn from_rows(rows: Vec<Row>, classifier: Classifier) -> Self {
        Self { rows, classifier }
    }

    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn classifier(&self) -> &Classifier {
        &self.classifier
    }

    /// Validate and append one row.
    pub fn append(&mut self, input: &RowInput) -> Result<&Row, RatingError> {
        let row = Row::from_input(input)?;
        Ok(self.push(row))
    }

    /// Append scores given in attribute order.
    pub fn append_values(&mut self, values: &[f64]) -> Result<&Row, RatingError> {
        let row = Row::from_values(values)?;
        Ok(self.push(row))
    }

    pub fn push(&mut self, row: Row) -> &Row {
        self.rows.push(row);
        &self.rows[self.rows.len() - 1]
    }

    /// Append rows in order, stopping at the first invalid one.
    ///
    /// Rows before the failing index stay appended. Returns the number of rows
    /// appended.
    pub fn append_many<'a, I>(&mut self, inputs: I) -> Result<usize, RatingError>
    where
        I: IntoIterator<Item = &'a RowInput>,
    {
        let mut appended = 0;
        for (index, input) in inputs.into_iter().enumerate() {
            let row = Row::from_input(input).map_err(|issue| RatingError::BatchValidation { index, issue })?;
            self.rows.push(row);
            appended += 1;
        }
        Ok(appended)
    }

    /// Classify every row and column. Rows are rated in parallel; `&self` keeps
    /// the table frozen for the duration.
    pub fn classified_view(&self) -> RatedTable {
        let classifier = self.classifier;
        RatedTable {
            rows: self.rows.par_iter().map(|row| classifier.classify_row(row)).collect(),
        }
    }

    /// Per-attribute means.
    pub fn average_row(&self) -> Result<AverageRow, RatingError> {
        if self.rows.is_empty() {
            return Err(RatingError::EmptyDataset);
        }

        let mut sums = [0.0; ATTRIBUTE_COUNT];
        for row in &self.rows {
            for (sum, score) in sums.iter_mut().zip(row.scores()) {
                *sum += score;
            }
        }

        let n = self.rows.len() as f64;
        Ok(AverageRow {
            row: Row::derived(sums.map(|sum| sum / n)),
            sample_count: self.rows.len(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Attribute, Column};
    use proptest::prelude::*;

    fn input(value: f64) -> RowInput {
        Attribute::ALL.into_iter().map(|a| (a, value)).collect()
    }

    #[test]
    fn append_derives_total() {
        let mut ds = Dataset::default();
        let row = *ds.append(&input(2.5)).unwrap();
        assert_eq!(row.total(), 22.5);
        assert_eq!(ds.len(), 1);
    }

    #[test]
    fn append_rejects_missing_and_out_of_domain() {
        let mut ds = Dataset::default();

        let mut missing = input(5.0);
        missing.remove(&Attribute::Scenery);
        assert!(matches!(ds.append(&missing), Err(RatingError::Validation(_))));

        let mut too_big = input(5.0);
        too_big.insert(Attribute::Length, 11.0);
        assert!(matches!(ds.append(&too_big), Err(RatingError::Validation(_))));

        assert!(ds.is_empty());
    }

    #[test]
    fn append_values_is_positional() {
        let mut ds = Dataset::default();
        ds.append_values(&[1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0, 9.0]).unwrap();
        assert_eq!(ds.rows()[0].score(Attribute::Length), 1.0);
        assert_eq!(ds.rows()[0].score(Attribute::Cleanliness), 9.0);
        assert!(ds.append_values(&[1.0; 8]).is_err());
        assert_eq!(ds.len(), 1);
    }

    #[test]
    fn append_many_stops_at_first_invalid_row() {
        let mut bad = input(5.0);
        bad.insert(Attribute::Safety, -1.0);
        let batch = vec![input(1.0), input(2.0), bad, input(3.0)];

        let mut ds = Dataset::default();
        let err = ds.append_many(&batch).unwrap_err();
        match err {
            RatingError::BatchValidation { index, .. } => assert_eq!(index, 2),
            other => panic!("unexpected error: {other:?}"),
        }
        assert_eq!(ds.len(), 2);
        assert_eq!(ds.rows()[1].score(Attribute::Length), 2.0);
    }

    #[test]
    fn append_many_returns_count() {
        let mut ds = Dataset::default();
        assert_eq!(ds.append_many(&[input(1.0), input(9.0)]).unwrap(), 2);
    }

    #[test]
    fn average_of_extremes_is_midpoint() {
        let mut ds = Dataset::default();
        ds.append_many(&[input(0.0), input(10.0)]).unwrap();
        let avg = ds.average_row().unwrap();
        assert_eq!(avg.sample_count, 2);
        for attribute in Attribute::ALL {
            assert_eq!(avg.row.score(attribute), 5.0);
        }
        assert_eq!(avg.row.total(), 45.0);
    }

    #[test]
    fn average_total_matches_mean_of_totals() {
        let mut ds = Dataset::default();
        ds.append_values(&[0.1, 9.9, 3.3, 4.4, 5.5, 6.6, 7.7, 8.8, 2.2]).unwrap();
        ds.append_values(&[1.234, 0.0, 10.0, 3.0, 7.5, 2.25, 6.125, 4.0, 9.999]).unwrap();
        ds.append_values(&[5.0; ATTRIBUTE_COUNT]).unwrap();

        let mean_total = ds.rows().iter().map(Row::total).sum::<f64>() / ds.len() as f64;
        let avg = ds.average_row().unwrap();
        assert!((avg.row.total() - mean_total).abs() < 1e-9);
    }

    #[test]
    fn average_of_empty_dataset_fails() {
        assert_eq!(Dataset::default().average_row(), Err(RatingError::EmptyDataset));
    }

    #[test]
    fn classified_view_preserves_shape_and_order() {
        let mut ds = Dataset::default();
        ds.append_many(&[input(1.0), input(5.0), input(9.0)]).unwrap();
        let view = ds.classified_view();

        assert_eq!(view.len(), 3);
        assert_eq!(view.rows[0].get(Column::Length).label(), "Short");
        assert_eq!(view.rows[1].get(Column::Length).label(), "Medium");
        assert_eq!(view.rows[2].get(Column::Length).label(), "Long");
        assert_eq!(view.rows[2].get(Column::TotalScore).label(), "Great");
    }

    #[test]
    fn classified_view_tracks_appends() {
        let mut ds = Dataset::default();
        ds.append(&input(1.0)).unwrap();
        let before = ds.classified_view();
        ds.append(&input(8.0)).unwrap();
        let after = ds.classified_view();

        assert_eq!(before.len(), 1);
        assert_eq!(after.len(), 2);
        assert_eq!(after.rows[0], before.rows[0]);
    }

    #[test]
    fn classified_view_uses_dataset_classifier() {
        let classifier = Classifier::new(90.0).unwrap();
        let mut ds = Dataset::new(classifier);
        // Total 54.0: High on the 80 domain, Mid on the 90 domain.
        ds.append(&input(6.0)).unwrap();
        assert_eq!(ds.classified_view().rows[0].get(Column::TotalScore).label(), "Ok");
    }

    fn row_strategy() -> impl Strategy<Value = [f64; ATTRIBUTE_COUNT]> {
        prop::array::uniform9(0.0..=10.0f64)
    }

    proptest! {
        /// Property: every stored row's total equals the sum of its scores.
        #[test]
        fn totals_hold_after_every_append(rows in prop::collection::vec(row_strategy(), 1..20)) {
            let mut ds = Dataset::default();
            for scores in &rows {
                ds.append_values(scores).unwrap();
                for row in ds.rows() {
                    prop_assert_eq!(row.total(), row.scores().iter().sum::<f64>());
                }
            }
        }

        /// Property: the rated view is a pure function of the rows.
        #[test]
        fn classified_view_is_idempotent(rows in prop::collection::vec(row_strategy(), 0..20)) {
            let mut ds = Dataset::default();
            for scores in &rows {
                ds.append_values(scores).unwrap();
            }
            prop_assert_eq!(ds.classified_view(), ds.classified_view());
        }

        /// Property: means stay inside the attribute domain.
        #[test]
        fn average_stays_in_domain(rows in prop::collection::vec(row_strategy(), 1..20)) {
            let mut ds = Dataset::default();
            for scores in &rows {
                ds.append_values(scores).unwrap();
            }
            let avg = ds.average_row().unwrap();
            for score in avg.row.scores() {
                prop_assert!((0.0..=10.0).contains(score));
            }
        }
    }
}
