//! Price-table CSV ingest.
//!
//! Reads a price list file into a [`PriceSheet`]:
//! - the first record is the header (a UTF-8 BOM on its first cell is removed)
//! - records may have differing lengths; short rows are dealt with later
//! - unreadable records are skipped and counted, not fatal

use std::fs::File;
use std::io::Read;
use std::path::Path;

use crate::error::AppError;
use crate::pricing::PriceSheet;

/// A row-level error encountered while reading the file.
#[derive(Debug, Clone)]
pub struct RowError {
    pub line: usize,
    pub message: String,
}

/// Ingest output: the normalized sheet plus any skipped records.
#[derive(Debug, Clone)]
pub struct IngestedTable {
    pub sheet: PriceSheet,
    pub row_errors: Vec<RowError>,
}

/// Load a price list from a CSV file.
pub fn load_price_table(path: &Path) -> Result<IngestedTable, AppError> {
    let file = File::open(path)
        .map_err(|e| AppError::new(2, format!("Failed to open price table '{}': {e}", path.display())))?;
    read_price_table(file)
}

/// Read a price list from any CSV source.
pub fn read_price_table<R: Read>(reader: R) -> Result<IngestedTable, AppError> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let mut header: Option<Vec<String>> = None;
    let mut rows = Vec::new();
    let mut row_errors = Vec::new();

    for (idx, result) in reader.records().enumerate() {
        let line = idx + 1;
        let record = match result {
            Ok(r) => r,
            Err(e) => {
                tracing::debug!(line, error = %e, "unreadable CSV record");
                row_errors.push(RowError {
                    line,
                    message: format!("CSV parse error: {e}"),
                });
                continue;
            }
        };

        let cells: Vec<String> = record.iter().map(str::to_string).collect();
        if header.is_none() {
            header = Some(cells.into_iter().map(|c| normalize_header_cell(&c)).collect());
        } else {
            rows.push(cells);
        }
    }

    let header = header
        .filter(|h| h.iter().any(|c| !c.is_empty()))
        .ok_or_else(|| AppError::new(2, "Price table has no header row."))?;

    tracing::debug!(columns = header.len(), rows = rows.len(), "price table loaded");

    Ok(IngestedTable {
        sheet: PriceSheet::from_cells(header, rows),
        row_errors,
    })
}

fn normalize_header_cell(name: &str) -> String {
    // Spreadsheet exports often prefix the first header with a BOM.
    name.trim().trim_start_matches('\u{feff}').to_string()
}
