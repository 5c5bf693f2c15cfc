//! Top-level application orchestration.
//!
//! `src/main.rs` is intentionally tiny; this module is the "real main" that:
//! - loads `.env` and parses CLI arguments
//! - sets up logging
//! - turns flags or config files into typed requests
//! - runs the calculator or the price selector
//! - prints text reports or JSON documents

use std::io::Write;

use clap::Parser;
use serde_json::{Map, Value};
use tracing_subscriber::EnvFilter;

use crate::calc::compute_measurement;
use crate::cli::{Cli, Command, CurtainArgs, PriceArgs};
use crate::config::{CurtainRequest, PriceRequest, coerce_number, coerce_type_number, read_config_json};
use crate::domain::{ColumnKey, SelectedPrice};
use crate::error::{AppError, QuoteError};
use crate::io::{CurtainDocument, PriceDocument, load_price_table, write_json};
use crate::pricing::{PriceSheet, TabularInput, select_price};
use crate::report::{format_price_selection, format_quantities, format_samples, run_samples};

/// Entry point for the `cq` binary.
pub fn run() -> Result<(), AppError> {
    // `CQ_PRICE_TABLE` may come from `.env`, so load it before clap reads env defaults.
    dotenvy::dotenv().ok();
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let output = if cli.json { OutputMode::Json } else { OutputMode::Text };
    match cli.command {
        Command::Curtain(args) => handle_curtain(&args, output),
        Command::Price(args) => handle_price(&args, output),
        Command::Samples => handle_samples(output),
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum OutputMode {
    Text,
    Json,
}

fn init_logging(verbose: bool) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(if verbose { "debug" } else { "warn" }));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

fn handle_curtain(args: &CurtainArgs, output: OutputMode) -> Result<(), AppError> {
    let request = curtain_request(args)?;
    tracing::debug!(?request, "curtain request");
    let result = compute_measurement(request.measurement, request.curtain)?;

    match output {
        OutputMode::Text => print!("{}", format_quantities(request.measurement, request.curtain, &result)),
        OutputMode::Json => write_stdout_json(CurtainDocument::new(request.measurement, request.curtain, result))?,
    }
    Ok(())
}

/// Build a curtain request from a config file or from flags.
///
/// Flags are routed through the same coercion as config files.
pub fn curtain_request(args: &CurtainArgs) -> Result<CurtainRequest, AppError> {
    let value = match &args.config {
        Some(path) => read_config_json(path)?,
        None => {
            let mut obj = Map::new();
            insert_opt(&mut obj, "width", args.width.as_deref());
            insert_opt(&mut obj, "drop", args.drop.as_deref());
            insert_opt(&mut obj, "curtainType", args.curtain_type.as_deref());
            Value::Object(obj)
        }
    };
    Ok(CurtainRequest::from_value(&value)?)
}

fn handle_price(args: &PriceArgs, output: OutputMode) -> Result<(), AppError> {
    let (track_width, selected) = price_lookup(args)?;

    match output {
        OutputMode::Text => print!("{}", format_price_selection(track_width, &selected)),
        OutputMode::Json => write_stdout_json(PriceDocument::new(track_width, selected))?,
    }
    Ok(())
}

/// Resolve the price table and selector from flags or a config file, then select.
pub fn price_lookup(args: &PriceArgs) -> Result<(f64, SelectedPrice), AppError> {
    if let Some(path) = &args.config {
        if let Some(table) = &args.table {
            tracing::warn!(table = %table.display(), "price table ignored; the config supplies its own table");
        }
        let request = PriceRequest::from_value(&read_config_json(path)?)?;
        let sheet = PriceSheet::normalize(&request.header, &request.rows)?;
        let selected = select_price(request.track_width, &sheet, &request.key)?;
        return Ok((request.track_width, selected));
    }

    let track_width = match args.track_width.as_deref() {
        Some(raw) => coerce_number("trackWidth", &Value::String(raw.to_string()))?,
        None => {
            return Err(QuoteError::MissingField {
                field: "trackWidth".to_string(),
            }
            .into());
        }
    };

    let key = match &args.column {
        Some(name) => ColumnKey::Named {
            name: name.clone(),
            catalog: args.catalog,
        },
        None => ColumnKey::TypeNumber(coerce_type_number(
            args.type_number.as_ref().map(|n| Value::String(n.clone())).as_ref(),
        )),
    };

    let sheet = match (&args.headers, &args.rows, &args.table) {
        (Some(headers), Some(rows), _) => PriceSheet::normalize(
            &TabularInput::Delimited(headers.clone()),
            &TabularInput::Delimited(rows.clone()),
        )?,
        (_, _, Some(path)) => {
            let table = load_price_table(path)?;
            for err in &table.row_errors {
                tracing::warn!(line = err.line, "skipped price table record: {}", err.message);
            }
            table.sheet
        }
        _ => {
            return Err(AppError::new(
                2,
                "No price table given: use --table (or CQ_PRICE_TABLE), --headers with --rows, or --config.",
            ));
        }
    };

    let selected = select_price(track_width, &sheet, &key)?;
    Ok((track_width, selected))
}

fn handle_samples(output: OutputMode) -> Result<(), AppError> {
    let cases = run_samples();
    match output {
        OutputMode::Text => print!("{}", format_samples(&cases)),
        OutputMode::Json => {
            let docs: Vec<Value> = cases
                .iter()
                .map(|case| match &case.outcome {
                    Ok(result) => serde_json::json!({
                        "description": case.description,
                        "curtainType": case.curtain,
                        "width": case.measurement.width_mm,
                        "drop": case.measurement.drop_mm,
                        "result": result,
                    }),
                    Err(e) => serde_json::json!({
                        "description": case.description,
                        "error": e.to_string(),
                    }),
                })
                .collect();
            write_stdout_json(serde_json::json!({ "samples": docs }))?;
        }
    }
    Ok(())
}

fn write_stdout_json<T: serde::Serialize>(body: T) -> Result<(), AppError> {
    let stdout = std::io::stdout();
    let mut lock = stdout.lock();
    write_json(&mut lock, body)?;
    lock.flush()
        .map_err(|e| AppError::new(4, format!("Failed to flush output: {e}")))
}

fn insert_opt(obj: &mut Map<String, Value>, key: &str, value: Option<&str>) {
    if let Some(v) = value {
        obj.insert(key.to_string(), Value::String(v.to_string()));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{CurtainType, TrackCatalog};

    fn price_args() -> PriceArgs {
        PriceArgs {
            config: None,
            track_width: Some("1200".to_string()),
            table: None,
            headers: Some("Width,Type 1,Type 2,Type 3".to_string()),
            rows: Some("Width,Type 1,Type 2,Type 3\n500,10,11,12\n1000,20,21,22\n1500,30,31,32".to_string()),
            column: None,
            catalog: TrackCatalog::Standard,
            type_number: None,
        }
    }

    #[test]
    fn curtain_flags_use_config_coercion() {
        let args = CurtainArgs {
            config: None,
            width: Some("3000".to_string()),
            drop: Some("2140".to_string()),
            curtain_type: Some("drape_on_strack".to_string()),
        };
        let req = curtain_request(&args).unwrap();
        assert_eq!(req.curtain, CurtainType::DrapeOnSTrack);
        assert_eq!(req.measurement.width_mm, 3000.0);
    }

    #[test]
    fn curtain_flags_report_missing_drop() {
        let args = CurtainArgs {
            config: None,
            width: Some("3000".to_string()),
            drop: None,
            curtain_type: Some("drape_on_strack".to_string()),
        };
        let err = curtain_request(&args).unwrap_err();
        assert_eq!(err.exit_code(), 2);
        assert_eq!(err.to_string(), "Missing required field 'drop'.");
    }

    #[test]
    fn price_lookup_from_inline_table() {
        let (width, sel) = price_lookup(&price_args()).unwrap();
        assert_eq!(width, 1200.0);
        assert_eq!(sel.selected_track_width, 1500.0);
        assert_eq!(sel.track_price, 30.0);
    }

    #[test]
    fn price_lookup_clamps_type_number() {
        let args = PriceArgs {
            type_number: Some("99".to_string()),
            ..price_args()
        };
        let (_, sel) = price_lookup(&args).unwrap();
        assert_eq!(sel.track_price, 32.0);
    }

    #[test]
    fn price_lookup_named_column_missing() {
        let args = PriceArgs {
            column: Some("Type 7".to_string()),
            ..price_args()
        };
        let err = price_lookup(&args).unwrap_err();
        assert_eq!(err.exit_code(), 2);
        assert!(err.to_string().contains("not found in headers"));
    }

    #[test]
    fn config_table_wins_over_table_flag() {
        let dir = tempfile::tempdir().unwrap();
        let config = dir.path().join("price.json");
        std::fs::write(
            &config,
            r#"{"trackWidth": 700, "csvHeaders": "Width,Type 1", "csvDataRows": "800,42"}"#,
        )
        .unwrap();
        let args = PriceArgs {
            config: Some(config),
            track_width: None,
            table: Some(dir.path().join("missing.csv")),
            headers: None,
            rows: None,
            ..price_args()
        };
        let (width, sel) = price_lookup(&args).unwrap();
        assert_eq!(width, 700.0);
        assert_eq!(sel.track_price, 42.0);
    }

    #[test]
    fn price_lookup_without_table_fails() {
        let args = PriceArgs {
            headers: None,
            rows: None,
            ..price_args()
        };
        assert_eq!(price_lookup(&args).unwrap_err().exit_code(), 2);
    }
}
