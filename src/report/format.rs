//! Formatted terminal output.
//!
//! We keep formatting code in one place so the engine stays free of
//! presentation concerns and output changes are localized.

use crate::domain::{Column, RatedRow, RatedTable, Row};
use crate::report::Summary;

const INDEX_WIDTH: usize = 4;
const MIN_CELL_WIDTH: usize = 8;

/// Print the first `head` numeric rows (all rows when `head` is 0).
pub fn format_numeric_table(rows: &[Row], head: usize) -> String {
    let mut out = header_lines();
    for (i, row) in take_head(rows, head).iter().enumerate() {
        let cells: Vec<String> = row.values().iter().map(|v| format!("{v:.3}")).collect();
        out.push_str(&format_line(&i.to_string(), &cells));
    }
    out.push_str(&footer_line(rows.len(), head));
    out
}

/// Print the first `head` rated rows (all rows when `head` is 0).
pub fn format_rated_table(table: &RatedTable, head: usize) -> String {
    let mut out = header_lines();
    for (i, row) in take_head(&table.rows, head).iter().enumerate() {
        out.push_str(&format_line(&i.to_string(), &label_cells(row)));
    }
    out.push_str(&footer_line(table.len(), head));
    out
}

/// Average row, numeric and rated.
pub fn format_summary(summary: &Summary) -> String {
    let mut out = String::new();
    out.push_str(&format!("Average of {} rows:\n", summary.average.sample_count));
    out.push_str(&header_lines());

    let cells: Vec<String> = summary
        .average
        .row
        .values()
        .iter()
        .map(|v| format!("{v:.3}"))
        .collect();
    out.push_str(&format_line("mean", &cells));
    out.push_str(&format_line("", &label_cells(&summary.rated)));

    out.push_str(&format!(
        "(Total Score bucketed over [0, {}])\n",
        summary.total_domain
    ));
    out
}

fn take_head<T>(items: &[T], head: usize) -> &[T] {
    if head == 0 { items } else { &items[..head.min(items.len())] }
}

fn label_cells(row: &RatedRow) -> Vec<String> {
    row.labels().iter().map(|l| l.to_string()).collect()
}

fn cell_width(column: Column) -> usize {
    column.display_name().len().max(MIN_CELL_WIDTH)
}

fn header_lines() -> String {
    let mut out = String::new();
    let names: Vec<String> = Column::ALL.iter().map(|c| c.display_name().to_string()).collect();
    out.push_str(&format_line("", &names));

    let mut rule = format!("{:-<width$}", "", width = INDEX_WIDTH);
    for column in Column::ALL {
        rule.push(' ');
        rule.push_str(&"-".repeat(cell_width(column)));
    }
    out.push_str(&rule);
    out.push('\n');
    out
}

fn format_line(index: &str, cells: &[String]) -> String {
    let mut line = format!("{index:<width$}", width = INDEX_WIDTH);
    for (column, cell) in Column::ALL.iter().zip(cells) {
        line.push_str(&format!(" {cell:>width$}", width = cell_width(*column)));
    }
    let mut line = line.trim_end().to_string();
    line.push('\n');
    line
}

fn footer_line(len: usize, head: usize) -> String {
    if head == 0 || len <= head {
        String::new()
    } else {
        format!("... ({} more rows)\n", len - head)
    }
}
