//! Reference sheet row extraction.
//!
//! The published sheet starts with a title banner, a blank spacer and the
//! column header, so the first [`HEADER_ROW_COUNT`] rows carry no problems.
//! Columns are positional: name in column 0, type in column 5, difficulty in
//! column 6.

use tracing::{debug, instrument};

use super::MetadataRow;

/// Leading rows of the sheet that are banner/header noise.
pub const HEADER_ROW_COUNT: usize = 3;

/// Column holding the problem name.
pub const NAME_COLUMN: usize = 0;

/// Column holding the problem category.
pub const TYPE_COLUMN: usize = 5;

/// Column holding the difficulty label.
pub const DIFFICULTY_COLUMN: usize = 6;

/// Converts raw sheet rows into [`MetadataRow`]s, skipping `header_rows`
/// leading rows. Missing cells read as empty.
#[must_use]
#[instrument(skip(raw_rows), fields(raw_rows = raw_rows.len()))]
pub fn rows_from_sheet(raw_rows: &[Vec<String>], header_rows: usize) -> Vec<MetadataRow> {
    fn cell(row: &[String], column: usize) -> String {
        row.get(column)
            .map(|value| value.trim().to_string())
            .unwrap_or_default()
    }

    let rows: Vec<MetadataRow> = raw_rows
        .iter()
        .skip(header_rows)
        .map(|row| {
            MetadataRow::new(
                cell(row, NAME_COLUMN),
                cell(row, TYPE_COLUMN),
                &cell(row, DIFFICULTY_COLUMN),
            )
        })
        .collect();

    debug!(rows = rows.len(), header_rows, "sheet rows extracted");
    rows
}

/// Splits CSV text (as exported from the sheet) into rows of cells.
///
/// Quoted cells may hold commas, line breaks and `""` escapes. Rows may have
/// differing widths. Fully empty lines carry no cells and are dropped by the
/// reader, so [`HEADER_ROW_COUNT`] counts only lines with content.
///
/// # Errors
///
/// Returns a [`csv::Error`] if a record cannot be read.
pub fn parse_sheet_csv(text: &str) -> Result<Vec<Vec<String>>, csv::Error> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(text.as_bytes());

    reader
        .records()
        .map(|record| record.map(|record| record.iter().map(str::to_string).collect()))
        .collect()
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::metadata::Difficulty;

    fn raw(cells: &[&str]) -> Vec<String> {
        cells.iter().map(|c| (*c).to_string()).collect()
    }

    #[test]
    fn test_rows_from_sheet_skips_header_rows() {
        let raw_rows = vec![
            raw(&["NeetCode 150"]),
            raw(&[]),
            raw(&["Name", "", "", "", "", "Type", "Difficulty"]),
            raw(&["Two Sum", "", "", "", "", "Arrays & Hashing", "Easy"]),
        ];

        let rows = rows_from_sheet(&raw_rows, HEADER_ROW_COUNT);
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].name, "Two Sum");
        assert_eq!(rows[0].category, "Arrays & Hashing");
        assert_eq!(rows[0].difficulty, Some(Difficulty::Easy));
    }

    #[test]
    fn test_rows_from_sheet_short_rows_read_as_empty() {
        let raw_rows = vec![raw(&["LRU Cache"])];
        let rows = rows_from_sheet(&raw_rows, 0);
        assert_eq!(rows[0].name, "LRU Cache");
        assert!(rows[0].category.is_empty());
        assert_eq!(rows[0].difficulty, None);
    }

    #[test]
    fn test_rows_from_sheet_header_count_larger_than_sheet() {
        let raw_rows = vec![raw(&["a"]), raw(&["b"])];
        assert!(rows_from_sheet(&raw_rows, HEADER_ROW_COUNT).is_empty());
    }

    #[test]
    fn test_parse_sheet_csv_simple_rows() {
        let rows = parse_sheet_csv("a,b,c\nd,e,f\n").unwrap();
        assert_eq!(rows, vec![raw(&["a", "b", "c"]), raw(&["d", "e", "f"])]);
    }

    #[test]
    fn test_parse_sheet_csv_quoted_cells() {
        let rows = parse_sheet_csv("\"Pow(x, n)\",\"say \"\"hi\"\"\"\r\nnext,\"multi\nline\"").unwrap();
        assert_eq!(rows[0], raw(&["Pow(x, n)", "say \"hi\""]));
        assert_eq!(rows[1], raw(&["next", "multi\nline"]));
    }

    #[test]
    fn test_parse_sheet_csv_keeps_empty_cells_and_ragged_rows() {
        let rows = parse_sheet_csv("x,,z\n,,\ny").unwrap();
        assert_eq!(rows[0], raw(&["x", "", "z"]));
        assert_eq!(rows[1], raw(&["", "", ""]));
        assert_eq!(rows[2], raw(&["y"]));
    }

    #[test]
    fn test_parse_sheet_csv_drops_fully_empty_lines() {
        let rows = parse_sheet_csv("x\n\ny\n").unwrap();
        assert_eq!(rows, vec![raw(&["x"]), raw(&["y"])]);
    }

    #[test]
    fn test_parse_sheet_csv_empty_input() {
        assert!(parse_sheet_csv("").unwrap().is_empty());
    }
}
