//! CSV ingest of externally supplied scores.
//!
//! This module turns a CSV with one column per attribute into `RowInput`s. It
//! only parses; domain validation happens when the inputs are appended to a
//! `Dataset`.
//!
//! - header names match case-insensitively, ignoring spaces, `_`, `-` and a BOM
//! - unknown columns (e.g. a leading index column) are ignored
//! - `Total Score` is ignored since it is always recomputed
//! - a blank cell leaves that attribute absent from the row

use std::collections::HashMap;
use std::fs::File;
use std::io::Read;
use std::path::Path;

use csv::StringRecord;

use crate::domain::{Attribute, RowInput};
use crate::error::AppError;

/// A row-level error encountered during ingest.
#[derive(Debug, Clone, PartialEq)]
pub struct RowError {
    pub line: usize,
    pub message: String,
}

/// Ingest output: parsed inputs (with their CSV line numbers) plus skipped rows.
#[derive(Debug, Clone, Default)]
pub struct IngestedRows {
    pub inputs: Vec<RowInput>,
    /// `lines[i]` is the 1-based CSV line `inputs[i]` came from.
    pub lines: Vec<usize>,
    pub row_errors: Vec<RowError>,
    pub rows_read: usize,
}

/// Open and parse a scores CSV.
///
/// With `skip_invalid`, unparsable records are collected in `row_errors`;
/// otherwise the first one aborts with exit code 3.
pub fn read_rows_csv(path: &Path, skip_invalid: bool) -> Result<IngestedRows, AppError> {
    let file = File::open(path)
        .map_err(|e| AppError::new(2, format!("Failed to open CSV '{}': {e}", path.display())))?;
    read_rows(file, skip_invalid)
}

pub fn read_rows<R: Read>(reader: R, skip_invalid: bool) -> Result<IngestedRows, AppError> {
    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let headers = reader
        .headers()
        .map_err(|e| AppError::new(2, format!("Failed to read CSV headers: {e}")))?
        .clone();
    let columns = resolve_columns(&headers)?;

    let mut out = IngestedRows::default();
    for (idx, result) in reader.records().enumerate() {
        out.rows_read += 1;

        // Blank lines are skipped and quoted cells may span lines, so the
        // record index is only a fallback (+2: header, 1-based lines).
        let position = match &result {
            Ok(record) => record.position(),
            Err(e) => e.position(),
        };
        let line = position.map_or(idx + 2, |p| p.line() as usize);

        let parsed = result
            .map_err(|e| format!("CSV parse error: {e}"))
            .and_then(|record| parse_record(&record, &columns));

        match parsed {
            Ok(input) => {
                out.inputs.push(input);
                out.lines.push(line);
            }
            Err(message) if skip_invalid => out.row_errors.push(RowError { line, message }),
            Err(message) => return Err(AppError::new(3, format!("CSV line {line}: {message}"))),
        }
    }

    Ok(out)
}

/// Map each attribute to its header position.
///
/// Two headers that normalize to the same attribute (e.g. `Car Traffic` and
/// `car_traffic`) are a schema error.
fn resolve_columns(headers: &StringRecord) -> Result<Vec<(Attribute, usize)>, AppError> {
    let mut by_name: HashMap<String, Vec<usize>> = HashMap::new();
    for (idx, name) in headers.iter().enumerate() {
        by_name.entry(normalize_header_name(name)).or_default().push(idx);
    }

    let mut columns = Vec::with_capacity(Attribute::ALL.len());
    let mut missing = Vec::new();
    let mut ambiguous = Vec::new();
    for attribute in Attribute::ALL {
        match by_name.get(&normalize_header_name(attribute.display_name())).map(Vec::as_slice) {
            Some(&[idx]) => columns.push((attribute, idx)),
            Some(_) => ambiguous.push(attribute.display_name()),
            None => missing.push(attribute.display_name()),
        }
    }

    if !ambiguous.is_empty() {
        return Err(AppError::new(
            2,
            format!("CSV has more than one column for: {}", ambiguous.join(", ")),
        ));
    }
    if !missing.is_empty() {
        return Err(AppError::new(
            2,
            format!("CSV is missing required column(s): {}", missing.join(", ")),
        ));
    }
    Ok(columns)
}

fn normalize_header_name(name: &str) -> String {
    // Spreadsheet exports sometimes prefix the first header with a UTF-8 BOM.
    name.trim()
        .trim_start_matches('\u{feff}')
        .chars()
        .filter(|c| !matches!(c, ' ' | '_' | '-'))
        .flat_map(char::to_lowercase)
        .collect()
}

fn parse_record(record: &StringRecord, columns: &[(Attribute, usize)]) -> Result<RowInput, String> {
    let mut input = RowInput::with_capacity(columns.len());
    for &(attribute, idx) in columns {
        let Some(cell) = record.get(idx).filter(|c| !c.is_empty()) else {
            continue;
        };
        let value: f64 = cell
            .parse()
            .map_err(|_| format!("'{attribute}' is not a number: '{cell}'"))?;
        input.insert(attribute, value);
    }
    Ok(input)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::Dataset;
    use crate::domain::{ATTRIBUTE_COUNT, Row};
    use crate::io::{ExportTable, write_table_csv};
    use crate::rating::Classifier;

    const HEADER: &str = "Length,Scenery,Car Traffic,Foot Traffic,Safety,Urbanization,Steepness,Curvature,Cleanliness";

    #[test]
    fn reads_rows_in_order() {
        let csv = format!("{HEADER}\n1,2,3,4,5,6,7,8,9\n9,8,7,6,5,4,3,2,1\n");
        let rows = read_rows(csv.as_bytes(), false).unwrap();
        assert_eq!(rows.rows_read, 2);
        assert_eq!(rows.lines, vec![2, 3]);
        assert_eq!(rows.inputs[0][&Attribute::Length], 1.0);
        assert_eq!(rows.inputs[1][&Attribute::Length], 9.0);
        assert_eq!(rows.inputs[1][&Attribute::Cleanliness], 1.0);
    }

    #[test]
    fn header_matching_is_lenient_and_ignores_extras() {
        let csv = "\u{feff},length,SCENERY,car_traffic,foot-traffic,safety,urbanization,steepness,curvature,cleanliness,Total Score\n\
                   0,1,1,1,1,1,1,1,1,1,999\n";
        let rows = read_rows(csv.as_bytes(), false).unwrap();
        assert_eq!(rows.inputs.len(), 1);
        assert_eq!(rows.inputs[0].len(), ATTRIBUTE_COUNT);
        assert_eq!(rows.inputs[0][&Attribute::CarTraffic], 1.0);
    }

    #[test]
    fn missing_column_is_a_schema_error() {
        let csv = "Length,Scenery\n1,2\n";
        let err = read_rows(csv.as_bytes(), false).unwrap_err();
        assert_eq!(err.exit_code(), 2);
        assert!(err.to_string().contains("Car Traffic"));
    }

    #[test]
    fn duplicate_attribute_headers_are_a_schema_error() {
        let csv = format!("{HEADER},car_traffic\n1,2,3,4,5,6,7,8,9,3\n");
        let err = read_rows(csv.as_bytes(), false).unwrap_err();
        assert_eq!(err.exit_code(), 2);
        assert!(err.to_string().contains("Car Traffic"), "{err}");
    }

    #[test]
    fn line_numbers_count_blank_lines_and_multiline_cells() {
        let csv = format!(
            "{HEADER},note\n1,1,1,1,1,1,1,1,1,a\n\n1,1,1,1,1,1,1,1,1,\"two\nlines\"\n1,x,1,1,1,1,1,1,1,b\n"
        );

        let rows = read_rows(csv.as_bytes(), true).unwrap();
        assert_eq!(rows.lines, vec![2, 4]);
        assert_eq!(rows.row_errors[0].line, 6);

        let err = read_rows(csv.as_bytes(), false).unwrap_err();
        assert!(err.to_string().starts_with("CSV line 6:"), "{err}");
    }

    #[test]
    fn blank_cell_leaves_attribute_absent() {
        let csv = format!("{HEADER}\n1,2,,4,5,6,7,8,9\n");
        let rows = read_rows(csv.as_bytes(), false).unwrap();
        assert!(!rows.inputs[0].contains_key(&Attribute::CarTraffic));
    }

    #[test]
    fn non_numeric_cell_fails_strict_and_is_skipped_leniently() {
        let csv = format!("{HEADER}\n1,2,3,4,5,6,7,8,9\n1,x,3,4,5,6,7,8,9\n2,2,2,2,2,2,2,2,2\n");

        let err = read_rows(csv.as_bytes(), false).unwrap_err();
        assert_eq!(err.exit_code(), 3);
        assert!(err.to_string().starts_with("CSV line 3:"));

        let rows = read_rows(csv.as_bytes(), true).unwrap();
        assert_eq!(rows.inputs.len(), 2);
        assert_eq!(rows.lines, vec![2, 4]);
        assert_eq!(rows.row_errors.len(), 1);
        assert_eq!(rows.row_errors[0].line, 3);
    }

    #[test]
    fn numeric_export_reingests_to_same_rows() {
        let ds = Dataset::from_rows(
            vec![
                Row::new([0.123, 9.999, 3.3, 6.6, 0.0, 10.0, 1.1, 2.2, 7.77]).unwrap(),
                Row::new([5.0; ATTRIBUTE_COUNT]).unwrap(),
            ],
            Classifier::default(),
        );
        let mut buf = Vec::new();
        write_table_csv(ExportTable::Numeric(ds.rows()), &mut buf).unwrap();

        let rows = read_rows(buf.as_slice(), false).unwrap();
        let mut reloaded = Dataset::default();
        reloaded.append_many(&rows.inputs).unwrap();
        assert_eq!(reloaded.rows(), ds.rows());
    }

    #[test]
    fn read_rows_csv_reports_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = read_rows_csv(&dir.path().join("absent.csv"), false).unwrap_err();
        assert_eq!(err.exit_code(), 2);
    }
}
