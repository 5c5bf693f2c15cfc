//! JSON result documents.
//!
//! `--json` output wraps each result in a small envelope naming the tool and
//! the generation time, so saved outputs can be told apart later.

use std::io::Write;

use chrono::Local;
use serde::Serialize;

use crate::domain::{CurtainType, Measurement, QuantityResult, SelectedPrice};
use crate::error::AppError;
use crate::report::format_currency;

const TOOL: &str = "cq";

#[derive(Debug, Clone, Serialize)]
pub struct Envelope<T: Serialize> {
    pub tool: &'static str,
    pub generated: String,
    #[serde(flatten)]
    pub body: T,
}

impl<T: Serialize> Envelope<T> {
    pub fn new(body: T) -> Self {
        Self {
            tool: TOOL,
            generated: Local::now().to_rfc3339(),
            body,
        }
    }
}

/// A curtain calculation and its inputs.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CurtainDocument {
    pub curtain_type: CurtainType,
    pub width: f64,
    pub drop: f64,
    pub result: QuantityResult,
}

impl CurtainDocument {
    pub fn new(measurement: Measurement, curtain: CurtainType, result: QuantityResult) -> Self {
        Self {
            curtain_type: curtain,
            width: measurement.width_mm,
            drop: measurement.drop_mm,
            result,
        }
    }
}

/// A price lookup: the raw price and its currency rendering.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PriceDocument {
    pub track_width: f64,
    pub selected_track_width: f64,
    pub track_price: f64,
    pub track_price_display: String,
}

impl PriceDocument {
    pub fn new(track_width: f64, selected: SelectedPrice) -> Self {
        Self {
            track_width,
            selected_track_width: selected.selected_track_width,
            track_price: selected.track_price,
            track_price_display: format_currency(selected.track_price),
        }
    }
}

/// Write `body` as a pretty-printed JSON document followed by a newline.
pub fn write_json<W: Write, T: Serialize>(out: &mut W, body: T) -> Result<(), AppError> {
    serde_json::to_writer_pretty(&mut *out, &Envelope::new(body))
        .map_err(|e| AppError::new(4, format!("Failed to write JSON output: {e}")))?;
    writeln!(out).map_err(|e| AppError::new(4, format!("Failed to write JSON output: {e}")))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::Value;

    #[test]
    fn curtain_document_omits_missing_lining() {
        let result = QuantityResult {
            making: 4.4,
            fabric: 4.4,
            lining: None,
            track: 2.0,
            installation: 2.0,
        };
        let doc = CurtainDocument::new(
            Measurement { width_mm: 2000.0, drop_mm: 2700.0 },
            CurtainType::SheerOnSTrack,
            result,
        );

        let mut buf = Vec::new();
        write_json(&mut buf, doc).unwrap();
        let value: Value = serde_json::from_slice(&buf).unwrap();
        assert_eq!(value["tool"], "cq");
        assert_eq!(value["curtainType"], "sheer_on_strack");
        assert_eq!(value["result"]["making"], 4.4);
        assert!(value["result"].get("lining").is_none());
        assert!(value["generated"].as_str().is_some());
    }

    #[test]
    fn price_document_carries_both_price_forms() {
        let doc = PriceDocument::new(
            1200.0,
            SelectedPrice { selected_track_width: 1500.0, track_price: 30.0 },
        );
        let value = serde_json::to_value(&doc).unwrap();
        assert_eq!(value["selectedTrackWidth"], 1500.0);
        assert_eq!(value["trackPrice"], 30.0);
        assert_eq!(value["trackPriceDisplay"], "$30.00");
    }
}
