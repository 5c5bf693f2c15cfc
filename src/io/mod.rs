//! Input/output helpers.
//!
//! - price-table CSV ingest (`ingest`)
//! - JSON result documents (`export`)

pub mod export;
pub mod ingest;

pub use export::*;
pub use ingest::*;
