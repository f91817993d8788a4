//! Energy aggregation, report model construction, and recommendations.

/// Per-device energy and cost arithmetic.
pub mod aggregator;
pub mod builder;
/// Load classification bands.
pub mod classify;
pub mod model;
/// Rule-based advisory text.
pub mod recommend;
pub mod simulate;

pub use aggregator::{CostHorizons, DerivedDeviceMetrics, device_metrics, total_energy};
pub use builder::ReportModelBuilder;
pub use classify::LoadClass;
pub use model::{DeviceLine, RankedDevice, ReportModel, RoomAggregate};
pub use recommend::recommend;
