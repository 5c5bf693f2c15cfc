//! Tabular price-list input and its normalization.
//!
//! Price lists arrive in several loose shapes (delimited text, pre-split
//! rows, or a JSON array hidden inside a one-element list). Everything is
//! normalized once into a [`PriceSheet`] of string cells; numeric parsing
//! happens later, in the selector.

use serde_json::Value;

use crate::error::QuoteError;

/// One element of a [`TabularInput::Rows`] sequence.
#[derive(Debug, Clone, PartialEq)]
pub enum RawRow {
    /// Unsplit text; split on commas for data rows, one cell for headers.
    Line(String),
    Cells(Vec<String>),
}

/// Raw header or data-row input.
#[derive(Debug, Clone, PartialEq)]
pub enum TabularInput {
    /// Comma-separated cells, newline-separated rows.
    Delimited(String),
    /// Pre-split rows.
    Rows(Vec<RawRow>),
    /// A JSON array of rows (arrays of cells) or lines (strings).
    JsonEncoded(String),
}

impl TabularInput {
    /// Build from plain strings, probing for the JSON-encoded form: a single
    /// element whose trimmed text starts with `[`.
    pub fn from_lines(lines: Vec<String>) -> Self {
        if let [only] = lines.as_slice() {
            if only.trim_start().starts_with('[') {
                return TabularInput::JsonEncoded(only.clone());
            }
        }
        TabularInput::Rows(lines.into_iter().map(RawRow::Line).collect())
    }

    /// Build from a loosely-typed configuration value.
    ///
    /// Strings are delimited text; arrays are row sequences (with the same
    /// JSON detection as [`TabularInput::from_lines`]). Anything else is rejected.
    pub fn from_value(value: &Value, what: &'static str) -> Result<Self, QuoteError> {
        match value {
            Value::String(s) => Ok(TabularInput::Delimited(s.clone())),
            Value::Array(items) => {
                if let [Value::String(only)] = items.as_slice() {
                    if only.trim_start().starts_with('[') {
                        return Ok(TabularInput::JsonEncoded(only.clone()));
                    }
                }
                let rows = items
                    .iter()
                    .map(|item| raw_row_from_value(item, what))
                    .collect::<Result<Vec<_>, _>>()?;
                Ok(TabularInput::Rows(rows))
            }
            other => Err(malformed(
                what,
                format!("expected a string or an array, got {}", value_kind(other)),
            )),
        }
    }

    /// Normalize as a header: a single row of trimmed cells.
    pub fn header_cells(&self, what: &'static str) -> Result<Vec<String>, QuoteError> {
        let cells = match self {
            TabularInput::Delimited(text) => {
                let first = text.lines().next().unwrap_or_default();
                split_line(first)
            }
            TabularInput::Rows(rows) => header_from_rows(rows),
            TabularInput::JsonEncoded(json) => header_from_rows(&parse_json_rows(json, what)?),
        };

        if cells.is_empty() || cells.iter().all(|c| c.is_empty()) {
            return Err(malformed(what, "header row is empty".to_string()));
        }
        Ok(cells)
    }

    /// Normalize as data rows: one vector of trimmed cells per row.
    pub fn data_rows(&self, what: &'static str) -> Result<Vec<Vec<String>>, QuoteError> {
        match self {
            TabularInput::Delimited(text) => Ok(text.split('\n').map(split_line).collect()),
            TabularInput::Rows(rows) => Ok(rows.iter().map(split_row).collect()),
            TabularInput::JsonEncoded(json) => {
                Ok(parse_json_rows(json, what)?.iter().map(split_row).collect())
            }
        }
    }
}

/// Normalized price list: header cells plus data rows of string cells.
///
/// A leading data row that repeats the header is already removed.
#[derive(Debug, Clone, PartialEq)]
pub struct PriceSheet {
    pub header: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl PriceSheet {
    /// Normalize header and data-row inputs into a sheet.
    pub fn normalize(header: &TabularInput, rows: &TabularInput) -> Result<Self, QuoteError> {
        let header = header.header_cells("csvHeaders")?;
        let rows = rows.data_rows("csvDataRows")?;
        Ok(Self::from_cells(header, rows))
    }

    /// Build from already-split cells, applying the duplicate-header guard.
    pub fn from_cells(header: Vec<String>, mut rows: Vec<Vec<String>>) -> Self {
        let repeats_header = match (rows.first().and_then(|r| r.first()), header.first()) {
            (Some(first), Some(head)) => first.to_lowercase() == head.to_lowercase(),
            _ => false,
        };
        if repeats_header {
            tracing::debug!("first data row repeats the header; removing it");
            rows.remove(0);
        }
        Self { header, rows }
    }
}

fn split_line(line: &str) -> Vec<String> {
    let line = line.strip_suffix('\r').unwrap_or(line);
    line.split(',').map(|s| s.trim().to_string()).collect()
}

fn split_row(row: &RawRow) -> Vec<String> {
    match row {
        RawRow::Line(line) => split_line(line),
        RawRow::Cells(cells) => cells.iter().map(|c| c.trim().to_string()).collect(),
    }
}

fn header_from_rows(rows: &[RawRow]) -> Vec<String> {
    // A list of arrays carries the header as its first array; a list of
    // strings is the header itself, one cell per string.
    match rows.first() {
        Some(RawRow::Cells(cells)) => cells.iter().map(|c| c.trim().to_string()).collect(),
        _ => rows
            .iter()
            .filter_map(|r| match r {
                RawRow::Line(cell) => Some(cell.trim().to_string()),
                RawRow::Cells(_) => None,
            })
            .collect(),
    }
}

fn parse_json_rows(json: &str, what: &'static str) -> Result<Vec<RawRow>, QuoteError> {
    let value: Value = serde_json::from_str(json.trim())
        .map_err(|e| malformed(what, format!("not a valid JSON array: {e}")))?;
    match value {
        Value::Array(items) => items.iter().map(|item| raw_row_from_value(item, what)).collect(),
        other => Err(malformed(
            what,
            format!("expected a JSON array, got {}", value_kind(&other)),
        )),
    }
}

fn raw_row_from_value(value: &Value, what: &'static str) -> Result<RawRow, QuoteError> {
    match value {
        Value::String(s) => Ok(RawRow::Line(s.clone())),
        Value::Number(n) => Ok(RawRow::Line(n.to_string())),
        Value::Array(cells) => cells
            .iter()
            .map(|cell| cell_text(cell, what))
            .collect::<Result<Vec<_>, _>>()
            .map(RawRow::Cells),
        other => Err(malformed(
            what,
            format!("unsupported row of type {}", value_kind(other)),
        )),
    }
}

fn cell_text(value: &Value, what: &'static str) -> Result<String, QuoteError> {
    match value {
        Value::String(s) => Ok(s.clone()),
        Value::Number(n) => Ok(n.to_string()),
        Value::Null => Ok(String::new()),
        other => Err(malformed(
            what,
            format!("unsupported cell of type {}", value_kind(other)),
        )),
    }
}

fn value_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

fn malformed(what: &'static str, reason: String) -> QuoteError {
    QuoteError::MalformedTable { what, reason }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn strings(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn delimited_text_is_split_and_trimmed() {
        let header = TabularInput::Delimited("Width , Type 1,Type 2".to_string());
        assert_eq!(header.header_cells("h").unwrap(), strings(&["Width", "Type 1", "Type 2"]));

        let rows = TabularInput::Delimited("500, 10 ,11\r\n1000,20,21".to_string());
        assert_eq!(
            rows.data_rows("r").unwrap(),
            vec![strings(&["500", "10", "11"]), strings(&["1000", "20", "21"])]
        );
    }

    #[test]
    fn single_bracketed_line_is_read_as_json() {
        let input = TabularInput::from_lines(vec![r#"[["500","10"],[1000,20]]"#.to_string()]);
        assert!(matches!(input, TabularInput::JsonEncoded(_)));
        assert_eq!(
            input.data_rows("r").unwrap(),
            vec![strings(&["500", "10"]), strings(&["1000", "20"])]
        );

        let plain = TabularInput::from_lines(strings(&["500,10", "1000,20"]));
        assert!(matches!(plain, TabularInput::Rows(_)));
    }

    #[test]
    fn json_header_accepts_strings_or_nested_row() {
        let flat = TabularInput::from_lines(vec![r#"["Width","Type 1"]"#.to_string()]);
        assert_eq!(flat.header_cells("h").unwrap(), strings(&["Width", "Type 1"]));

        let nested = TabularInput::JsonEncoded(r#"[["Width","Type 1"]]"#.to_string());
        assert_eq!(nested.header_cells("h").unwrap(), strings(&["Width", "Type 1"]));
    }

    #[test]
    fn header_sequence_is_one_cell_per_string() {
        let header = TabularInput::from_lines(strings(&["Width", "Type 1", "Type 2"]));
        assert_eq!(header.header_cells("h").unwrap(), strings(&["Width", "Type 1", "Type 2"]));
    }

    #[test]
    fn from_value_handles_each_shape() {
        let text = TabularInput::from_value(&json!("Width,Type 1"), "h").unwrap();
        assert_eq!(text, TabularInput::Delimited("Width,Type 1".to_string()));

        let nested = TabularInput::from_value(&json!([["500", 10], ["1000", 20]]), "r").unwrap();
        assert_eq!(
            nested.data_rows("r").unwrap(),
            vec![strings(&["500", "10"]), strings(&["1000", "20"])]
        );

        let encoded = TabularInput::from_value(&json!(["[[\"500\",\"10\"]]"]), "r").unwrap();
        assert!(matches!(encoded, TabularInput::JsonEncoded(_)));
    }

    #[test]
    fn wrong_shapes_are_malformed() {
        let err = TabularInput::from_value(&json!(42), "csvHeaders").unwrap_err();
        assert!(matches!(err, QuoteError::MalformedTable { what: "csvHeaders", .. }));

        let bad_json = TabularInput::from_lines(vec!["[1, 2".to_string()]);
        assert!(matches!(
            bad_json.data_rows("csvDataRows"),
            Err(QuoteError::MalformedTable { .. })
        ));

        let object = TabularInput::JsonEncoded(r#"[{"width": 1}]"#.to_string());
        assert!(object.data_rows("csvDataRows").is_err());

        let empty = TabularInput::Delimited("  ".to_string());
        assert!(empty.header_cells("csvHeaders").is_err());
    }

    #[test]
    fn duplicate_header_row_is_dropped_case_insensitively() {
        let header = TabularInput::Delimited("Width/Type (mm),Type 1".to_string());
        let rows = TabularInput::Delimited("WIDTH/TYPE (MM),Type 1\n500,10".to_string());
        let sheet = PriceSheet::normalize(&header, &rows).unwrap();
        assert_eq!(sheet.rows, vec![strings(&["500", "10"])]);
    }

    #[test]
    fn only_the_first_row_is_checked_for_a_repeated_header() {
        let sheet = PriceSheet::from_cells(
            strings(&["Width", "Type 1"]),
            vec![strings(&["500", "10"]), strings(&["Width", "Type 1"])],
        );
        assert_eq!(sheet.rows.len(), 2);
    }
}
