//! What-if cost estimate for a single hypothetical device.

use serde::Serialize;

use super::aggregator::{CostHorizons, checked_device_metrics};
use crate::error::InputError;
use crate::inventory::{DeviceRecord, TariffRate};

/// Projected cost of running one unit at the given power and duration.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct UsageEstimate {
    pub daily_energy_kwh: f64,
    pub costs: CostHorizons,
}

/// Estimates the cost of one unit drawing `power_watt` for `hours_per_day`.
///
/// # Errors
///
/// Returns an [`InputError`] for negative power, hours outside 0–24, or a
/// negative tariff.
pub fn estimate(
    power_watt: f64,
    hours_per_day: f64,
    tariff: TariffRate,
) -> Result<UsageEstimate, InputError> {
    tariff.validate()?;
    let probe = DeviceRecord::new(0, 0, "Simulation", power_watt, hours_per_day, 1);
    let metrics = checked_device_metrics(&probe, tariff)?;
    Ok(UsageEstimate {
        daily_energy_kwh: metrics.daily_energy_kwh,
        costs: metrics.costs(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn air_conditioner_estimate() {
        let est = estimate(900.0, 8.0, TariffRate::new(1500.0));
        assert!(est.is_ok());
        let est = est.unwrap_or(UsageEstimate {
            daily_energy_kwh: 0.0,
            costs: CostHorizons::default(),
        });
        assert!((est.daily_energy_kwh - 7.2).abs() < 1e-9);
        assert!((est.costs.daily - 10800.0).abs() < 1e-6);
        assert!((est.costs.monthly - 324000.0).abs() < 1e-6);
        assert!((est.costs.yearly - 3942000.0).abs() < 1e-6);
    }

    #[test]
    fn rejects_out_of_range_hours() {
        assert!(matches!(
            estimate(100.0, 30.0, TariffRate::default()),
            Err(InputError::HoursOutOfRange { .. })
        ));
    }

    #[test]
    fn rejects_negative_tariff() {
        assert!(matches!(
            estimate(100.0, 1.0, TariffRate::new(-1.0)),
            Err(InputError::NegativeTariff(_))
        ));
    }
}
