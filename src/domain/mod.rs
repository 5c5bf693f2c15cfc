//! Domain types used throughout the crate.
//!
//! This module defines:
//!
//! - curtain inputs and outputs (`CurtainType`, `Measurement`, `QuantityResult`)
//! - price table options and lookups (`PriceTableRow`, `SelectedPrice`, `ColumnKey`, `TrackCatalog`)

pub mod types;

pub use types::*;
