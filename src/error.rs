//! Error taxonomy for report generation.
//!
//! Aggregation rejects malformed inputs with [`InputError`], the layout
//! engine fails with [`RenderError`], and the storage step surfaces
//! [`SinkError`]. [`ReportError`] is the single failure signal returned by
//! the end-to-end pipeline.

use std::fmt;
use std::io;

use thiserror::Error;

/// Result type for the end-to-end pipeline.
pub type ReportResult<T> = Result<T, ReportError>;

/// Malformed numeric field on a device or tariff record.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum InputError {
    #[error("device {id} ({name}): power must be >= 0 W, got {value}")]
    NegativePower { id: u64, name: String, value: f64 },

    #[error("device {id} ({name}): quantity must be >= 1, got {value}")]
    NonPositiveQuantity { id: u64, name: String, value: i64 },

    #[error("device {id} ({name}): usage must be within 0-24 h/day, got {value}")]
    HoursOutOfRange { id: u64, name: String, value: f64 },

    #[error("device {id} ({name}): {field} is not a finite number")]
    NonFiniteValue {
        id: u64,
        name: String,
        field: &'static str,
    },

    #[error("{field} overflows to a non-finite total")]
    NonFiniteTotal { field: &'static str },

    #[error("tariff must be a finite value >= 0 per kWh, got {0}")]
    NegativeTariff(f64),
}

/// Failure to allocate a page surface or to complete pagination.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum RenderError {
    /// Page dimensions leave no room for content.
    #[error("invalid page geometry: {0}")]
    InvalidGeometry(String),

    /// The engine refused to allocate another page surface.
    #[error("page limit of {limit} exceeded, render aborted")]
    PageLimitExceeded { limit: usize },

    /// A draw was attempted with no open page.
    #[error("no active page to draw on")]
    NoActivePage,
}

/// Failure of the external write step.
#[derive(Error, Debug)]
pub enum SinkError {
    #[error("failed to write document: {0}")]
    Io(#[from] io::Error),

    #[error("failed to encode document: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// Configuration error with field path and constraint description.
#[derive(Debug, Clone, PartialEq)]
pub struct ConfigError {
    /// Dotted field path (e.g., `"page.height"`).
    pub field: String,
    /// Human-readable constraint description.
    pub message: String,
}

impl ConfigError {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "config error: {}: {}", self.field, self.message)
    }
}

impl std::error::Error for ConfigError {}

/// Top-level failure of a report run.
#[derive(Error, Debug)]
pub enum ReportError {
    #[error(transparent)]
    Input(#[from] InputError),

    #[error(transparent)]
    Render(#[from] RenderError),

    #[error(transparent)]
    Sink(#[from] SinkError),

    #[error("{}", join_config_errors(.0))]
    Config(Vec<ConfigError>),
}

impl From<ConfigError> for ReportError {
    fn from(err: ConfigError) -> Self {
        Self::Config(vec![err])
    }
}

fn join_config_errors(errors: &[ConfigError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("\n")
}
