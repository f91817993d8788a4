//! Output: page sinks and CSV export.

pub mod export;
pub mod sink;

pub use sink::{DocumentSink, JsonFileSink, MemorySink};
