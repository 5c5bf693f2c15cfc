//! Shared domain types.
//!
//! These types are plain data and serializable so they can be:
//!
//! - produced by the calculator and the price selector
//! - printed by the report formatter
//! - written out as JSON documents

use std::fmt;
use std::str::FromStr;

use clap::ValueEnum;
use serde::Serialize;

use crate::error::QuoteError;

/// Curtain construction variant. Each one has its own quantity formula.
///
/// The textual tags (`sheer_on_strack`, ...) are the names used in
/// configuration files and on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CurtainType {
    #[serde(rename = "sheer_on_strack")]
    SheerOnSTrack,
    #[serde(rename = "sheer_on_strack_long_drop")]
    SheerOnSTrackLongDrop,
    #[serde(rename = "drape_on_strack")]
    DrapeOnSTrack,
    DrapeOnSilonTrack,
    SheerOnSilonTrackOrRod,
}

impl CurtainType {
    pub const ALL: [CurtainType; 5] = [
        CurtainType::SheerOnSTrack,
        CurtainType::SheerOnSTrackLongDrop,
        CurtainType::DrapeOnSTrack,
        CurtainType::DrapeOnSilonTrack,
        CurtainType::SheerOnSilonTrackOrRod,
    ];

    pub fn tag(self) -> &'static str {
        match self {
            CurtainType::SheerOnSTrack => "sheer_on_strack",
            CurtainType::SheerOnSTrackLongDrop => "sheer_on_strack_long_drop",
            CurtainType::DrapeOnSTrack => "drape_on_strack",
            CurtainType::DrapeOnSilonTrack => "drape_on_silon_track",
            CurtainType::SheerOnSilonTrackOrRod => "sheer_on_silon_track_or_rod",
        }
    }

    pub fn display_name(self) -> &'static str {
        match self {
            CurtainType::SheerOnSTrack => "Sheer on S Track",
            CurtainType::SheerOnSTrackLongDrop => "Sheer on S Track (drop > 3m)",
            CurtainType::DrapeOnSTrack => "Drape on S Track",
            CurtainType::DrapeOnSilonTrack => "Drape on Silon Track",
            CurtainType::SheerOnSilonTrackOrRod => "Sheer on Silon Track or Rod",
        }
    }

    /// Drape variants carry a lining equal to the fabric quantity.
    pub fn is_drape(self) -> bool {
        matches!(self, CurtainType::DrapeOnSTrack | CurtainType::DrapeOnSilonTrack)
    }
}

impl FromStr for CurtainType {
    type Err = QuoteError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        CurtainType::ALL
            .into_iter()
            .find(|t| t.tag() == s)
            .ok_or_else(|| QuoteError::UnknownCurtainType(s.to_string()))
    }
}

impl fmt::Display for CurtainType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

/// Window measurement in millimeters.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Measurement {
    pub width_mm: f64,
    pub drop_mm: f64,
}

/// Quantities required for one curtain.
///
/// `making`, `fabric` and `lining` are in meters; `track` and
/// `installation` are the window width converted to meters.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct QuantityResult {
    pub making: f64,
    pub fabric: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lining: Option<f64>,
    pub track: f64,
    pub installation: f64,
}

impl QuantityResult {
    /// Named outputs in display order. `lining` only appears when present.
    pub fn entries(&self) -> Vec<(&'static str, f64)> {
        let mut out = vec![("making", self.making), ("fabric", self.fabric)];
        if let Some(lining) = self.lining {
            out.push(("lining", lining));
        }
        out.push(("track", self.track));
        out.push(("installation", self.installation));
        out
    }
}

/// One usable `(width, price)` option from a price table.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PriceTableRow {
    pub width: f64,
    pub price: f64,
}

/// The option chosen for a required track width.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SelectedPrice {
    pub selected_track_width: f64,
    pub track_price: f64,
}

impl From<PriceTableRow> for SelectedPrice {
    fn from(row: PriceTableRow) -> Self {
        Self {
            selected_track_width: row.width,
            track_price: row.price,
        }
    }
}

/// Which price list a named lookup targets.
///
/// Only the wording of lookup errors depends on it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum TrackCatalog {
    #[default]
    Standard,
    Motorized,
    SFold,
}

impl TrackCatalog {
    pub fn column_label(self) -> &'static str {
        match self {
            TrackCatalog::Standard => "Track",
            TrackCatalog::Motorized => "Motorized track",
            TrackCatalog::SFold => "S-Fold track",
        }
    }

    pub fn source_label(self) -> &'static str {
        match self {
            TrackCatalog::Standard => "CSV",
            TrackCatalog::Motorized => "motorized CSV",
            TrackCatalog::SFold => "S-Fold CSV",
        }
    }
}

/// How the price column is chosen.
#[derive(Debug, Clone, PartialEq)]
pub enum ColumnKey {
    /// Exact header name; absent names are an error.
    Named { name: String, catalog: TrackCatalog },
    /// 1-based track type number. `None` stands for a missing or invalid
    /// number and resolves to type 1.
    TypeNumber(Option<usize>),
}
