//! The normalized report tree produced by the builder.

use chrono::NaiveDateTime;
use serde::Serialize;

use super::aggregator::{CostHorizons, DAYS_PER_MONTH, DAYS_PER_WEEK, DerivedDeviceMetrics};
use super::classify::LoadClass;

/// Room name used for devices whose room id matches no known room.
pub const UNKNOWN_ROOM: &str = "Unknown";

/// Placeholder for the most-consuming room when there are no rooms.
pub const NO_ROOM: &str = "N/A";

/// One device with its derived metrics, as listed in the report.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DeviceLine {
    pub device_id: u64,
    pub name: String,
    pub power_watt: f64,
    pub usage_hours_per_day: f64,
    pub quantity: i64,
    pub metrics: DerivedDeviceMetrics,
}

impl DeviceLine {
    pub fn load_class(&self) -> LoadClass {
        LoadClass::of(self.power_watt)
    }
}

/// Per-room rollup of its devices.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RoomAggregate {
    /// `None` for the "Unknown" bucket.
    pub room_id: Option<u64>,
    pub name: String,
    pub description: Option<String>,
    pub device_count: usize,
    /// Summed daily energy (kWh/day).
    pub energy_kwh: f64,
    pub daily_cost: f64,
    pub monthly_cost: f64,
    /// Share of total energy, 0–100.
    pub percentage: f64,
    pub devices: Vec<DeviceLine>,
}

/// A device paired with the name of the room that owns it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RankedDevice {
    pub room_name: String,
    pub device: DeviceLine,
}

/// Daily energy summed over all devices sharing a (trimmed) name.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DeviceTypeTotal {
    pub name: String,
    pub daily_energy_kwh: f64,
}

/// Whole-office report data, built fresh from a snapshot.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReportModel {
    pub generated_at: NaiveDateTime,
    pub total_rooms: usize,
    pub total_devices: usize,
    /// Total daily energy (kWh/day).
    pub total_energy_kwh: f64,
    pub costs: CostHorizons,
    pub tariff_per_kwh: f64,
    /// Display name of the most-consuming room, or "N/A".
    pub most_consuming_room: String,
    /// Position of that room in `rooms`.
    pub most_consuming_index: Option<usize>,
    pub rooms: Vec<RoomAggregate>,
    pub top_devices: Vec<RankedDevice>,
    pub device_type_totals: Vec<DeviceTypeTotal>,
    pub recommendations: Vec<String>,
}

impl ReportModel {
    pub fn weekly_energy_kwh(&self) -> f64 {
        self.total_energy_kwh * DAYS_PER_WEEK
    }

    pub fn monthly_energy_kwh(&self) -> f64 {
        self.total_energy_kwh * DAYS_PER_MONTH
    }

    /// The most-consuming aggregate, if any rooms exist.
    pub fn top_room(&self) -> Option<&RoomAggregate> {
        self.most_consuming_index.and_then(|i| self.rooms.get(i))
    }

    /// Iterates every device line in room order.
    pub fn devices(&self) -> impl Iterator<Item = &DeviceLine> {
        self.rooms.iter().flat_map(|r| r.devices.iter())
    }

    /// Replaces the advisory lines; used once while assembling the model.
    pub fn with_recommendations(mut self, recommendations: Vec<String>) -> Self {
        self.recommendations = recommendations;
        self
    }
}
