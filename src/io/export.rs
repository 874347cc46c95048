//! Export tables to CSV and the summary to JSON.
//!
//! CSV exports use one header row (nine attributes + `Total Score`) and one
//! record per sample, in dataset order. Numeric cells use Rust's shortest
//! round-trip formatting so an export can be re-ingested without drift.

use std::fs::File;
use std::io::Write;
use std::path::Path;

use crate::domain::{Column, RatedTable, Row};
use crate::error::AppError;
use crate::report::{Summary, SummaryFile};

/// A table that can be exported.
#[derive(Debug, Clone, Copy)]
pub enum ExportTable<'a> {
    Numeric(&'a [Row]),
    Rated(&'a RatedTable),
}

impl ExportTable<'_> {
    fn kind(&self) -> &'static str {
        match self {
            ExportTable::Numeric(_) => "numeric",
            ExportTable::Rated(_) => "rated",
        }
    }
}

/// Write `table` as CSV to a file.
pub fn export(table: ExportTable<'_>, path: &Path) -> Result<(), AppError> {
    let file = File::create(path)
        .map_err(|e| AppError::new(2, format!("Failed to create export CSV '{}': {e}", path.display())))?;
    write_table_csv(table, file)?;
    tracing::info!(path = %path.display(), kind = table.kind(), "wrote CSV export");
    Ok(())
}

/// Write `table` as CSV to any writer.
pub fn write_table_csv<W: Write>(table: ExportTable<'_>, writer: W) -> Result<(), AppError> {
    let mut out = csv::Writer::from_writer(writer);

    out.write_record(Column::ALL.iter().map(|c| c.display_name()))
        .map_err(|e| AppError::new(2, format!("Failed to write export CSV header: {e}")))?;

    match table {
        ExportTable::Numeric(rows) => {
            for row in rows {
                out.write_record(row.values().iter().map(|v| v.to_string()))
                    .map_err(|e| AppError::new(2, format!("Failed to write export CSV row: {e}")))?;
            }
        }
        ExportTable::Rated(rated) => {
            for row in &rated.rows {
                out.write_record(row.labels())
                    .map_err(|e| AppError::new(2, format!("Failed to write export CSV row: {e}")))?;
            }
        }
    }

    out.flush()
        .map_err(|e| AppError::new(2, format!("Failed to flush export CSV: {e}")))?;
    Ok(())
}

/// Write the average-row summary as pretty JSON.
pub fn write_summary_json(path: &Path, summary: &Summary) -> Result<(), AppError> {
    let file = File::create(path)
        .map_err(|e| AppError::new(2, format!("Failed to create summary JSON '{}': {e}", path.display())))?;

    serde_json::to_writer_pretty(file, &SummaryFile::from(summary))
        .map_err(|e| AppError::new(2, format!("Failed to write summary JSON: {e}")))?;

    tracing::info!(path = %path.display(), "wrote summary JSON");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::Dataset;
    use crate::domain::ATTRIBUTE_COUNT;
    use crate::rating::Classifier;
    use crate::report::summarize;

    const HEADER: &str = "Length,Scenery,Car Traffic,Foot Traffic,Safety,Urbanization,Steepness,Curvature,Cleanliness,Total Score";

    fn dataset() -> Dataset {
        Dataset::from_rows(
            vec![
                Row::new([1.5, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0, 9.25]).unwrap(),
                Row::new([10.0; ATTRIBUTE_COUNT]).unwrap(),
            ],
            Classifier::default(),
        )
    }

    fn to_string(table: ExportTable<'_>) -> String {
        let mut buf = Vec::new();
        write_table_csv(table, &mut buf).unwrap();
        String::from_utf8(buf).unwrap()
    }

    #[test]
    fn numeric_export_layout() {
        let ds = dataset();
        let text = to_string(ExportTable::Numeric(ds.rows()));
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], HEADER);
        assert_eq!(lines[1], "1.5,2,3,4,5,6,7,8,9.25,45.75");
        assert_eq!(lines[2], "10,10,10,10,10,10,10,10,10,90");
        assert_eq!(lines.len(), 3);
    }

    #[test]
    fn rated_export_shares_header() {
        let ds = dataset();
        let rated = ds.classified_view();
        let text = to_string(ExportTable::Rated(&rated));
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], HEADER);
        assert_eq!(
            lines[1],
            "Short,Drab,Busy,Average,Moderate,Suburban,Steep,Winding,Clean,Ok"
        );
        assert_eq!(lines[2], "Long,Scenic,Empty,Empty,Safe,Urban,Steep,Winding,Clean,Great");
    }

    #[test]
    fn export_writes_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("rows.csv");
        let ds = dataset();
        export(ExportTable::Numeric(ds.rows()), &path).unwrap();
        let text = std::fs::read_to_string(&path).unwrap();
        assert!(text.starts_with(HEADER));
    }

    #[test]
    fn export_to_missing_dir_fails_with_io_code() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nope").join("rows.csv");
        let ds = dataset();
        assert_eq!(export(ExportTable::Numeric(ds.rows()), &path).unwrap_err().exit_code(), 2);
    }

    #[test]
    fn summary_json_round_trips_through_serde() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("summary.json");
        let summary = summarize(&dataset()).unwrap();
        write_summary_json(&path, &summary).unwrap();

        let value: serde_json::Value = serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(value["sample_count"], 2);
        assert_eq!(value["total_domain"], 80.0);
        assert_eq!(value["average"][0]["column"], "Length");
        assert_eq!(value["average"][0]["value"], 5.75);
        assert_eq!(value["average"][0]["level"], "mid");
        assert_eq!(value["average"][0]["rating"], "Medium");
    }
}
