//! Price selection: smallest listed width at or above the requirement.
//!
//! Two column-resolution policies feed one shared selection core:
//!
//! - by **name**: exact header match, missing names are an error
//! - by **type number**: 1-based column, clamped to the last column and
//!   defaulting to type 1, never an error
//!
//! Rows that are too short or do not parse as numbers are skipped. Only a
//! table with no usable rows at all fails.

use crate::domain::{ColumnKey, PriceTableRow, SelectedPrice, TrackCatalog};
use crate::error::QuoteError;
use crate::pricing::table::PriceSheet;

/// Width is always the first column.
pub const WIDTH_COLUMN: usize = 0;

/// Type number used when none (or an invalid one) is given.
pub const DEFAULT_TYPE_NUMBER: usize = 1;

impl PriceSheet {
    /// Select by header name. Fails with `ColumnNotFound` if the name is absent.
    pub fn select_by_name(
        &self,
        required_width: f64,
        name: &str,
        catalog: TrackCatalog,
    ) -> Result<SelectedPrice, QuoteError> {
        let column = resolve_named_column(&self.header, name, catalog)?;
        select_from_column(required_width, &self.rows, column, catalog)
    }

    /// Select by 1-based track type number, clamped to the available columns.
    pub fn select_by_type(
        &self,
        required_width: f64,
        type_number: Option<usize>,
    ) -> Result<SelectedPrice, QuoteError> {
        let column = resolve_type_column(&self.header, type_number);
        select_from_column(required_width, &self.rows, column, TrackCatalog::Standard)
    }
}

/// Select a price for `required_width` using either column policy.
pub fn select_price(required_width: f64, sheet: &PriceSheet, key: &ColumnKey) -> Result<SelectedPrice, QuoteError> {
    match key {
        ColumnKey::Named { name, catalog } => sheet.select_by_name(required_width, name, *catalog),
        ColumnKey::TypeNumber(n) => sheet.select_by_type(required_width, *n),
    }
}

/// Index of the header cell equal to `name`.
pub fn resolve_named_column(header: &[String], name: &str, catalog: TrackCatalog) -> Result<usize, QuoteError> {
    header
        .iter()
        .position(|h| h == name)
        .ok_or_else(|| QuoteError::ColumnNotFound {
            column: name.to_string(),
            catalog: catalog.column_label(),
        })
}

/// Column index for a 1-based type number.
///
/// Type `n` maps to column `n` (column 0 holds widths). Missing or zero
/// numbers fall back to type 1; numbers past the end clamp to the last column.
pub fn resolve_type_column(header: &[String], type_number: Option<usize>) -> usize {
    let requested = match type_number {
        Some(n) if n >= 1 => n,
        _ => DEFAULT_TYPE_NUMBER,
    };
    let last = header.len().saturating_sub(1);
    if requested > last {
        tracing::warn!(
            requested,
            last,
            "header has no column for track type {requested}; using the last column"
        );
        return last;
    }
    requested
}

/// Parse the usable `(width, price)` options out of `rows`.
pub fn parse_options(rows: &[Vec<String>], price_column: usize) -> Vec<PriceTableRow> {
    let mut options = Vec::with_capacity(rows.len());
    for (idx, row) in rows.iter().enumerate() {
        if row.len() <= price_column {
            tracing::debug!(row = idx, cells = row.len(), "row too short; skipped");
            continue;
        }
        match (parse_leading_f64(&row[WIDTH_COLUMN]), parse_leading_f64(&row[price_column])) {
            (Some(width), Some(price)) => options.push(PriceTableRow { width, price }),
            _ => tracing::debug!(row = idx, "non-numeric width or price; skipped"),
        }
    }
    options
}

/// Choose the first option with `width >= required_width`, or the widest
/// option if none is wide enough. `options` must be sorted by width.
pub fn choose_option(options: &[PriceTableRow], required_width: f64) -> Option<PriceTableRow> {
    options
        .iter()
        .find(|opt| opt.width >= required_width)
        .or_else(|| options.last())
        .copied()
}

fn select_from_column(
    required_width: f64,
    rows: &[Vec<String>],
    price_column: usize,
    catalog: TrackCatalog,
) -> Result<SelectedPrice, QuoteError> {
    let mut options = parse_options(rows, price_column);
    // Stable: equal widths keep their table order.
    options.sort_by(|a, b| a.width.total_cmp(&b.width));

    let chosen = choose_option(&options, required_width).ok_or(QuoteError::NoValidOptions {
        source_label: catalog.source_label(),
    })?;
    if chosen.width < required_width {
        tracing::info!(
            required_width,
            widest = chosen.width,
            "no option wide enough; using the widest available"
        );
    }
    Ok(chosen.into())
}

/// Parse the leading number of `text`.
///
/// Leading whitespace is skipped, then the longest prefix of the form
/// `[+-]digits[.digits][e[+-]digits]` is parsed; trailing text is ignored.
/// Returns `None` when no digits lead the text.
pub fn parse_leading_f64(text: &str) -> Option<f64> {
    let s = text.trim_start();
    let bytes = s.as_bytes();
    let mut end = 0;

    if matches!(bytes.first(), Some(b'+' | b'-')) {
        end += 1;
    }
    let int_start = end;
    while bytes.get(end).is_some_and(u8::is_ascii_digit) {
        end += 1;
    }
    let mut digits = end - int_start;

    if bytes.get(end) == Some(&b'.') {
        let frac_start = end + 1;
        let mut frac_end = frac_start;
        while bytes.get(frac_end).is_some_and(u8::is_ascii_digit) {
            frac_end += 1;
        }
        digits += frac_end - frac_start;
        end = frac_end;
    }
    if digits == 0 {
        return None;
    }

    if matches!(bytes.get(end), Some(b'e' | b'E')) {
        let mut exp_end = end + 1;
        if matches!(bytes.get(exp_end), Some(b'+' | b'-')) {
            exp_end += 1;
        }
        let exp_digits_start = exp_end;
        while bytes.get(exp_end).is_some_and(u8::is_ascii_digit) {
            exp_end += 1;
        }
        if exp_end > exp_digits_start {
            end = exp_end;
        }
    }

    s[..end].parse::<f64>().ok()
}
