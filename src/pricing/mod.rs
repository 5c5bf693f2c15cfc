//! Track price lookup from a tabular price list.
//!
//! - input normalization (`table`)
//! - column resolution and option selection (`select`)

pub mod select;
pub mod table;

pub use select::*;
pub use table::*;
