//! `curtain-quote` library crate.
//!
//! Two independent components:
//!
//! - [`calc`]: fabric, lining, track and installation quantities for a window
//! - [`pricing`]: track price lookup from a loosely-shaped price table
//!
//! The binary (`cq`) is a thin wrapper around this library so the
//! calculations are testable without spawning processes.

pub mod app;
pub mod calc;
pub mod cli;
pub mod config;
pub mod domain;
pub mod error;
pub mod io;
pub mod pricing;
pub mod report;
