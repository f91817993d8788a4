//! Office electrical usage analysis and paginated report generation.

/// Energy aggregation, report model, and recommendations.
pub mod analysis;
pub mod cli;
pub mod config;
pub mod error;
mod format;
pub mod inventory;
pub mod io;
/// Page layout and report composition.
pub mod layout;
pub mod logging;
pub mod pipeline;
pub mod reporting;
