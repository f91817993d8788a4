//! Builds the report tree from rooms, devices, and a tariff.

use std::collections::HashMap;

use chrono::NaiveDateTime;
use tracing::{debug, info, warn};

use super::aggregator::{
    CostHorizons, DAYS_PER_MONTH, checked_device_metrics, share_pct, stable_sum,
};
use super::model::{
    DeviceLine, DeviceTypeTotal, NO_ROOM, RankedDevice, ReportModel, RoomAggregate, UNKNOWN_ROOM,
};
use crate::error::InputError;
use crate::inventory::{DeviceRecord, RoomRecord, TariffRate};

/// Number of devices in the top-consumers section.
pub const DEFAULT_TOP_N: usize = 5;

/// Combines a snapshot into a [`ReportModel`].
///
/// The builder holds no state between calls: identical ordered inputs give
/// identical models apart from `generated_at`.
#[derive(Debug, Clone)]
pub struct ReportModelBuilder {
    top_n: usize,
}

impl Default for ReportModelBuilder {
    fn default() -> Self {
        Self {
            top_n: DEFAULT_TOP_N,
        }
    }
}

impl ReportModelBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_top_n(mut self, top_n: usize) -> Self {
        self.top_n = top_n;
        self
    }

    /// Builds the report model. Recommendations are left empty.
    ///
    /// # Arguments
    ///
    /// * `rooms` - Rooms in display order
    /// * `devices` - Devices, each referencing a room by id
    /// * `tariff` - Price per kWh
    /// * `now` - Generation timestamp
    ///
    /// # Errors
    ///
    /// Returns the first [`InputError`] found in the tariff or devices, or
    /// one for totals that overflow; no partial model is produced.
    pub fn build(
        &self,
        rooms: &[RoomRecord],
        devices: &[DeviceRecord],
        tariff: TariffRate,
        now: NaiveDateTime,
    ) -> Result<ReportModel, InputError> {
        tariff.validate()?;
        let lines = devices
            .iter()
            .map(|d| device_line(d, tariff))
            .collect::<Result<Vec<_>, _>>()?;
        let total_energy_kwh = stable_sum(lines.iter().map(|l| l.metrics.daily_energy_kwh));
        let total_daily_cost = total_energy_kwh * tariff.price_per_kwh;
        for (field, value) in [
            ("total_energy_kwh", total_energy_kwh),
            ("daily_cost", total_daily_cost),
        ] {
            if !value.is_finite() {
                return Err(InputError::NonFiniteTotal { field });
            }
        }

        let mut room_aggregates: Vec<RoomAggregate> = rooms
            .iter()
            .map(|room| {
                let members = devices
                    .iter()
                    .zip(&lines)
                    .filter(|(d, _)| d.room_id == room.id)
                    .map(|(_, line)| line.clone())
                    .collect();
                aggregate(
                    Some(room.id),
                    &room.name,
                    room.description.clone(),
                    members,
                    tariff,
                    total_energy_kwh,
                )
            })
            .collect();

        let orphans: Vec<DeviceLine> = devices
            .iter()
            .zip(&lines)
            .filter(|(d, _)| !rooms.iter().any(|r| r.id == d.room_id))
            .map(|(_, line)| line.clone())
            .collect();
        if !orphans.is_empty() {
            warn!(
                count = orphans.len(),
                "devices reference unknown rooms, grouping under \"{UNKNOWN_ROOM}\""
            );
            room_aggregates.push(aggregate(
                None,
                UNKNOWN_ROOM,
                None,
                orphans,
                tariff,
                total_energy_kwh,
            ));
        }

        let most_consuming_index = most_consuming(&room_aggregates);
        let most_consuming_room = most_consuming_index
            .map_or_else(|| NO_ROOM.to_string(), |i| room_aggregates[i].name.clone());
        let top_devices = top_devices(&room_aggregates, self.top_n);
        let device_type_totals = device_type_totals(&lines);
        let costs = CostHorizons::from_daily(total_daily_cost);

        info!(
            rooms = rooms.len(),
            devices = devices.len(),
            total_energy_kwh,
            "report model built"
        );

        Ok(ReportModel {
            generated_at: now,
            total_rooms: rooms.len(),
            total_devices: devices.len(),
            total_energy_kwh,
            costs,
            tariff_per_kwh: tariff.price_per_kwh,
            most_consuming_room,
            most_consuming_index,
            rooms: room_aggregates,
            top_devices,
            device_type_totals,
            recommendations: Vec::new(),
        })
    }
}

fn device_line(device: &DeviceRecord, tariff: TariffRate) -> Result<DeviceLine, InputError> {
    Ok(DeviceLine {
        device_id: device.id,
        name: device.name.clone(),
        power_watt: device.power_watt,
        usage_hours_per_day: device.usage_hours_per_day,
        quantity: device.quantity,
        metrics: checked_device_metrics(device, tariff)?,
    })
}

fn aggregate(
    room_id: Option<u64>,
    name: &str,
    description: Option<String>,
    devices: Vec<DeviceLine>,
    tariff: TariffRate,
    total_energy_kwh: f64,
) -> RoomAggregate {
    let energy_kwh = stable_sum(devices.iter().map(|l| l.metrics.daily_energy_kwh));
    let daily_cost = energy_kwh * tariff.price_per_kwh;
    debug!(room = name, devices = devices.len(), energy_kwh, "room aggregated");
    RoomAggregate {
        room_id,
        name: name.to_string(),
        description,
        device_count: devices.len(),
        energy_kwh,
        daily_cost,
        monthly_cost: daily_cost * DAYS_PER_MONTH,
        percentage: share_pct(energy_kwh, total_energy_kwh),
        devices,
    }
}

/// Index of the room with maximum energy; the first one wins on ties.
pub fn most_consuming(rooms: &[RoomAggregate]) -> Option<usize> {
    first_max_index_by(rooms, |r| r.energy_kwh)
}

/// Position of the first element holding the maximum key, or `None` if empty.
pub fn first_max_index_by<T>(items: &[T], key: impl Fn(&T) -> f64) -> Option<usize> {
    let mut best: Option<usize> = None;
    for (i, item) in items.iter().enumerate() {
        match best {
            Some(b) if key(item) <= key(&items[b]) => {}
            _ => best = Some(i),
        }
    }
    best
}

/// First element holding the maximum key, or `None` if empty.
pub fn first_max_by<T>(items: &[T], key: impl Fn(&T) -> f64) -> Option<&T> {
    first_max_index_by(items, key).map(|i| &items[i])
}

/// Stable descending sort by `key`, truncated to `n` items.
///
/// Items with equal keys keep their input order.
pub fn top_n<T>(mut items: Vec<T>, n: usize, key: impl Fn(&T) -> f64) -> Vec<T> {
    items.sort_by(|a, b| key(b).total_cmp(&key(a)));
    items.truncate(n);
    items
}

/// Highest daily-energy devices across all rooms, in room then device order
/// before ranking.
pub fn top_devices(rooms: &[RoomAggregate], n: usize) -> Vec<RankedDevice> {
    let flattened = rooms
        .iter()
        .flat_map(|room| {
            room.devices.iter().map(|d| RankedDevice {
                room_name: room.name.clone(),
                device: d.clone(),
            })
        })
        .collect();
    top_n(flattened, n, |r| r.device.metrics.daily_energy_kwh)
}

/// Daily energy per device name (trimmed), largest first.
pub fn device_type_totals(lines: &[DeviceLine]) -> Vec<DeviceTypeTotal> {
    let mut index: HashMap<&str, usize> = HashMap::new();
    let mut totals: Vec<(String, Vec<f64>)> = Vec::new();
    for line in lines {
        let name = line.name.trim();
        let slot = *index.entry(name).or_insert_with(|| {
            totals.push((name.to_string(), Vec::new()));
            totals.len() - 1
        });
        totals[slot].1.push(line.metrics.daily_energy_kwh);
    }
    let totals = totals
        .into_iter()
        .map(|(name, values)| DeviceTypeTotal {
            name,
            daily_energy_kwh: stable_sum(values),
        })
        .collect::<Vec<_>>();
    let len = totals.len();
    top_n(totals, len, |t| t.daily_energy_kwh)
}
