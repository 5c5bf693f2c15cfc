//! Error types.
//!
//! Library operations fail with [`QuoteError`], one variant per failure kind.
//! The binary converts those into [`AppError`], which carries the process
//! exit code alongside the message.

use thiserror::Error;

/// Failure kinds of the calculator and the price selector.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum QuoteError {
    /// A required configuration field is absent (or `null`).
    #[error("Missing required field '{field}'.")]
    MissingField { field: String },

    /// A configuration value could not be coerced to a number.
    #[error("Field '{field}' is not a valid number: {value}")]
    InvalidNumber { field: String, value: String },

    /// A measurement is numeric but not finite and non-negative.
    #[error("Invalid {field}: {value} (expected a finite, non-negative millimeter value)")]
    InvalidInput { field: &'static str, value: f64 },

    /// The configuration itself has the wrong shape.
    #[error("Invalid config: {reason}")]
    InvalidConfig { reason: String },

    #[error("Unknown curtainType: {0}")]
    UnknownCurtainType(String),

    /// Tabular input was neither delimited text, a row sequence, nor a JSON array.
    #[error("Malformed {what}: {reason}")]
    MalformedTable { what: &'static str, reason: String },

    /// A named price column is absent from the header row.
    #[error("{catalog} type '{column}' not found in headers")]
    ColumnNotFound { column: String, catalog: &'static str },

    #[error("No valid pricing options found in the {source_label} data.")]
    NoValidOptions { source_label: &'static str },
}

impl QuoteError {
    /// Process exit code for this failure kind.
    pub fn exit_code(&self) -> u8 {
        match self {
            QuoteError::NoValidOptions { .. } => 3,
            _ => 2,
        }
    }
}

#[derive(Clone)]
pub struct AppError {
    exit_code: u8,
    message: String,
}

impl AppError {
    pub fn new(exit_code: u8, message: impl Into<String>) -> Self {
        Self {
            exit_code,
            message: message.into(),
        }
    }

    pub fn exit_code(&self) -> u8 {
        self.exit_code
    }
}

impl From<QuoteError> for AppError {
    fn from(err: QuoteError) -> Self {
        AppError::new(err.exit_code(), err.to_string())
    }
}

impl std::fmt::Display for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::fmt::Debug for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppError")
            .field("exit_code", &self.exit_code)
            .field("message", &self.message)
            .finish()
    }
}

impl std::error::Error for AppError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quote_errors_map_to_exit_codes() {
        let missing = QuoteError::MissingField { field: "width".to_string() };
        assert_eq!(AppError::from(missing).exit_code(), 2);

        let empty = QuoteError::NoValidOptions { source_label: "CSV" };
        let app = AppError::from(empty);
        assert_eq!(app.exit_code(), 3);
        assert_eq!(app.to_string(), "No valid pricing options found in the CSV data.");
    }
}
