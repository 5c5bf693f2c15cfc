//! Command-line parsing for the curtain quantity and track price tool.
//!
//! The goal of this module is to keep **argument parsing** separate from the
//! calculator and the price selector.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use crate::domain::TrackCatalog;

/// Top-level CLI.
#[derive(Debug, Parser)]
#[command(name = "cq", version, about = "Curtain fabric quantities and track price lookup")]
pub struct Cli {
    /// Print results as a JSON document.
    #[arg(long, global = true)]
    pub json: bool,

    /// Enable debug logging on stderr (`RUST_LOG` takes precedence).
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

/// CLI subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Compute making, fabric, lining, track and installation quantities.
    Curtain(CurtainArgs),
    /// Look up a track price for a required width.
    Price(PriceArgs),
    /// Run the reference case for each curtain type.
    Samples,
}

#[derive(Debug, Args, Clone)]
pub struct CurtainArgs {
    /// JSON config with `width`, `drop` and `curtainType`.
    #[arg(long, value_name = "JSON", conflicts_with_all = ["width", "drop", "curtain_type"])]
    pub config: Option<PathBuf>,

    /// Window width in millimeters.
    #[arg(long, allow_negative_numbers = true)]
    pub width: Option<String>,

    /// Curtain drop in millimeters.
    #[arg(long, allow_negative_numbers = true)]
    pub drop: Option<String>,

    /// Curtain type tag, e.g. `drape_on_silon_track`.
    #[arg(long = "type", value_name = "TAG")]
    pub curtain_type: Option<String>,
}

#[derive(Debug, Args, Clone)]
pub struct PriceArgs {
    /// JSON config with `trackWidth`, `csvHeaders`, `csvDataRows` and a selector.
    /// `--table` (or `CQ_PRICE_TABLE`) is ignored when a config is given.
    #[arg(
        long,
        value_name = "JSON",
        conflicts_with_all = ["track_width", "headers", "rows", "column", "type_number", "catalog"]
    )]
    pub config: Option<PathBuf>,

    /// Required track width in millimeters.
    #[arg(long, allow_negative_numbers = true)]
    pub track_width: Option<String>,

    /// Price table CSV (first line is the header, column 0 is width).
    /// Ignored when `--headers`/`--rows` are given.
    #[arg(long, value_name = "CSV", env = "CQ_PRICE_TABLE")]
    pub table: Option<PathBuf>,

    /// Header line, e.g. "Width,Type 1,Type 2". Use with `--rows`.
    #[arg(long, requires = "rows")]
    pub headers: Option<String>,

    /// Data rows, comma-separated cells and newline-separated rows.
    #[arg(long, requires = "headers")]
    pub rows: Option<String>,

    /// Price column by header name.
    #[arg(long, conflicts_with = "type_number")]
    pub column: Option<String>,

    /// Price list the named column belongs to (affects error wording only).
    #[arg(long, value_enum, default_value_t = TrackCatalog::Standard)]
    pub catalog: TrackCatalog,

    /// Price column by 1-based track type number.
    #[arg(long, allow_negative_numbers = true)]
    pub type_number: Option<String>,
}
