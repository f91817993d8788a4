//! Per-device energy and cost arithmetic.
//!
//! Horizons use fixed day multipliers (7 / 30 / 365) rather than calendar
//! lengths, so a "month" is always 30 days.

use serde::Serialize;

use crate::error::InputError;
use crate::inventory::{DeviceRecord, TariffRate};

pub const DAYS_PER_WEEK: f64 = 7.0;
pub const DAYS_PER_MONTH: f64 = 30.0;
pub const DAYS_PER_YEAR: f64 = 365.0;

/// Metrics derived from a single device record. Never persisted.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct DerivedDeviceMetrics {
    /// `power × hours × quantity / 1000` (kWh/day).
    pub daily_energy_kwh: f64,
    /// Daily energy priced at the tariff.
    pub daily_cost: f64,
    /// `daily_energy_kwh × 30`.
    pub monthly_energy_kwh: f64,
    /// `daily_energy_kwh × 365`.
    pub yearly_energy_kwh: f64,
    /// `power × quantity` (W).
    pub connected_load_w: f64,
}

impl DerivedDeviceMetrics {
    pub fn weekly_energy_kwh(&self) -> f64 {
        self.daily_energy_kwh * DAYS_PER_WEEK
    }

    pub fn costs(&self) -> CostHorizons {
        CostHorizons::from_daily(self.daily_cost)
    }
}

/// A daily cost projected onto the fixed reporting horizons.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct CostHorizons {
    pub daily: f64,
    pub weekly: f64,
    pub monthly: f64,
    pub yearly: f64,
}

impl CostHorizons {
    /// Weekly cost is always `daily × 7`, never recomputed independently.
    pub fn from_daily(daily: f64) -> Self {
        Self {
            daily,
            weekly: daily * DAYS_PER_WEEK,
            monthly: daily * DAYS_PER_MONTH,
            yearly: daily * DAYS_PER_YEAR,
        }
    }
}

/// Daily energy of one device record in kWh.
pub fn daily_energy_kwh(device: &DeviceRecord) -> f64 {
    device.power_watt * device.usage_hours_per_day * device.quantity as f64 / 1000.0
}

/// Daily cost of `energy_kwh` at `tariff`.
pub fn daily_cost(energy_kwh: f64, tariff: TariffRate) -> f64 {
    energy_kwh * tariff.price_per_kwh
}

/// Computes the derived metrics of one device. Pure; does not validate.
///
/// # Examples
///
/// ```
/// use office_energy_report::analysis::aggregator::device_metrics;
/// use office_energy_report::inventory::{DeviceRecord, TariffRate};
///
/// let device = DeviceRecord::new(1, 1, "Fan", 100.0, 10.0, 2);
/// let m = device_metrics(&device, TariffRate::new(1000.0));
/// assert_eq!(m.daily_energy_kwh, 2.0);
/// assert_eq!(m.daily_cost, 2000.0);
/// assert_eq!(m.monthly_energy_kwh, 60.0);
/// assert_eq!(m.connected_load_w, 200.0);
/// ```
pub fn device_metrics(device: &DeviceRecord, tariff: TariffRate) -> DerivedDeviceMetrics {
    let daily_energy_kwh = daily_energy_kwh(device);
    DerivedDeviceMetrics {
        daily_energy_kwh,
        daily_cost: daily_cost(daily_energy_kwh, tariff),
        monthly_energy_kwh: daily_energy_kwh * DAYS_PER_MONTH,
        yearly_energy_kwh: daily_energy_kwh * DAYS_PER_YEAR,
        connected_load_w: device.power_watt * device.quantity as f64,
    }
}

/// Validates the device before computing its metrics.
///
/// # Errors
///
/// Returns an [`InputError`] for negative power, quantity below one, hours
/// outside 0–24, or inputs and derived figures that are not finite.
pub fn checked_device_metrics(
    device: &DeviceRecord,
    tariff: TariffRate,
) -> Result<DerivedDeviceMetrics, InputError> {
    device.validate()?;
    let metrics = device_metrics(device, tariff);
    for (field, value) in [
        ("daily_energy_kwh", metrics.daily_energy_kwh),
        ("daily_cost", metrics.daily_cost),
    ] {
        if !value.is_finite() {
            return Err(InputError::NonFiniteValue {
                id: device.id,
                name: device.name.clone(),
                field,
            });
        }
    }
    Ok(metrics)
}

/// Sum of daily energy over `devices` (kWh).
pub fn total_energy<'a>(devices: impl IntoIterator<Item = &'a DeviceRecord>) -> f64 {
    stable_sum(devices.into_iter().map(daily_energy_kwh))
}

/// Compensated (Neumaier) summation.
pub fn stable_sum(values: impl IntoIterator<Item = f64>) -> f64 {
    let mut sum = 0.0_f64;
    let mut compensation = 0.0_f64;
    for v in values {
        let t = sum + v;
        if sum.abs() >= v.abs() {
            compensation += (sum - t) + v;
        } else {
            compensation += (v - t) + sum;
        }
        sum = t;
    }
    sum + compensation
}

/// Percentage of `part` in `total`; 0 when `total` is not positive.
pub fn share_pct(part: f64, total: f64) -> f64 {
    if total > 0.0 {
        part / total * 100.0
    } else {
        0.0
    }
}
