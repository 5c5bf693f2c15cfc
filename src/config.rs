//! Input boundary: loosely-typed JSON configuration objects.
//!
//! Configuration arrives as a JSON object whose numbers may be real numbers
//! or numeric-looking strings. This module coerces it into typed requests and
//! fails fast on anything that does not coerce.

use std::fs;
use std::path::Path;

use serde_json::{Map, Value};

use crate::domain::{ColumnKey, CurtainType, Measurement, TrackCatalog};
use crate::error::{AppError, QuoteError};
use crate::pricing::TabularInput;

/// A curtain calculation request.
#[derive(Debug, Clone, PartialEq)]
pub struct CurtainRequest {
    pub measurement: Measurement,
    pub curtain: CurtainType,
}

/// A track price lookup request.
#[derive(Debug, Clone, PartialEq)]
pub struct PriceRequest {
    pub track_width: f64,
    pub header: TabularInput,
    pub rows: TabularInput,
    pub key: ColumnKey,
}

/// Named-column fields, in precedence order.
const NAMED_SELECTORS: [(&str, TrackCatalog); 3] = [
    ("trackTypeName", TrackCatalog::Standard),
    ("motorizedType", TrackCatalog::Motorized),
    ("sfoldType", TrackCatalog::SFold),
];

impl CurtainRequest {
    /// Coerce `{ width, drop, curtainType }`.
    pub fn from_value(value: &Value) -> Result<Self, QuoteError> {
        let obj = as_object(value)?;
        let width = required(obj, "width")?;
        let drop = required(obj, "drop")?;
        let curtain = match required(obj, "curtainType")? {
            Value::String(s) if s.is_empty() => return Err(missing("curtainType")),
            Value::String(s) => s.parse::<CurtainType>()?,
            other => return Err(QuoteError::UnknownCurtainType(other.to_string())),
        };

        Ok(Self {
            measurement: Measurement {
                width_mm: coerce_number("width", width)?,
                drop_mm: coerce_number("drop", drop)?,
            },
            curtain,
        })
    }
}

impl PriceRequest {
    /// Coerce `{ trackWidth, csvHeaders, csvDataRows, <selector> }`.
    ///
    /// The selector is the first named field present (`trackTypeName`,
    /// `motorizedType`, `sfoldType`), else `selectedTrackTypeNumber`.
    pub fn from_value(value: &Value) -> Result<Self, QuoteError> {
        let obj = as_object(value)?;
        let track_width = coerce_number("trackWidth", required(obj, "trackWidth")?)?;
        let header = TabularInput::from_value(required(obj, "csvHeaders")?, "csvHeaders")?;
        let rows = TabularInput::from_value(required(obj, "csvDataRows")?, "csvDataRows")?;

        let named = NAMED_SELECTORS
            .iter()
            .find_map(|(field, catalog)| obj.get(*field).map(|v| named_key(v, *catalog)))
            .transpose()?;
        let key = match named {
            Some(key) => key,
            None => ColumnKey::TypeNumber(coerce_type_number(obj.get("selectedTrackTypeNumber"))),
        };

        Ok(Self {
            track_width,
            header,
            rows,
            key,
        })
    }
}

/// A present named selector must be a header name. Anything else (including
/// `null`) can never match a header cell, so it fails instead of falling back
/// to the numeric selector.
fn named_key(value: &Value, catalog: TrackCatalog) -> Result<ColumnKey, QuoteError> {
    match value {
        Value::String(name) => Ok(ColumnKey::Named {
            name: name.clone(),
            catalog,
        }),
        other => Err(QuoteError::ColumnNotFound {
            column: other.to_string(),
            catalog: catalog.column_label(),
        }),
    }
}

/// Read a JSON configuration file.
pub fn read_config_json(path: &Path) -> Result<Value, AppError> {
    let text = fs::read_to_string(path)
        .map_err(|e| AppError::new(2, format!("Failed to read config '{}': {e}", path.display())))?;
    serde_json::from_str(&text)
        .map_err(|e| AppError::new(2, format!("Invalid config JSON '{}': {e}", path.display())))
}

/// Coerce a JSON value to a number.
///
/// Numbers pass through; strings are trimmed and must parse in full to a
/// finite value (`"inf"` and `"NaN"` are rejected).
pub fn coerce_number(field: &str, value: &Value) -> Result<f64, QuoteError> {
    let parsed = match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    };
    match parsed {
        Some(v) if v.is_finite() => Ok(v),
        _ => Err(QuoteError::InvalidNumber {
            field: field.to_string(),
            value: value.to_string(),
        }),
    }
}

/// Coerce an optional track type number. Invalid values become `None`.
pub fn coerce_type_number(value: Option<&Value>) -> Option<usize> {
    let value = match value {
        None | Some(Value::Null) => return None,
        Some(v) => v,
    };
    match coerce_number("selectedTrackTypeNumber", value) {
        Ok(n) if n >= 1.0 && n.fract() == 0.0 && n.is_finite() => Some(n as usize),
        _ => {
            tracing::warn!(%value, "selectedTrackTypeNumber is invalid; defaulting to 1");
            None
        }
    }
}

fn as_object(value: &Value) -> Result<&Map<String, Value>, QuoteError> {
    value.as_object().ok_or_else(|| QuoteError::InvalidConfig {
        reason: "expected a JSON object".to_string(),
    })
}

fn required<'a>(obj: &'a Map<String, Value>, field: &str) -> Result<&'a Value, QuoteError> {
    match obj.get(field) {
        None | Some(Value::Null) => Err(missing(field)),
        Some(v) => Ok(v),
    }
}

fn missing(field: &str) -> QuoteError {
    QuoteError::MissingField {
        field: field.to_string(),
    }
}
