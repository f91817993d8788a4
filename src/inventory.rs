//! Strongly-typed snapshot of rooms, devices, and tariff.
//!
//! Records are decoded once at the boundary (TOML or JSON) into these shapes
//! and never carried as untyped maps further into the pipeline.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{ConfigError, InputError};

/// Price per kWh used when no tariff has been configured.
pub const DEFAULT_TARIFF_PER_KWH: f64 = 1444.70;

/// A monitored room.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RoomRecord {
    pub id: u64,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
}

impl RoomRecord {
    pub fn new(id: u64, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            description: None,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}

/// An electrical device type installed in a room.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DeviceRecord {
    pub id: u64,
    pub room_id: u64,
    pub name: String,
    /// Rated power per unit (W).
    pub power_watt: f64,
    /// Daily usage duration (h/day).
    pub usage_hours_per_day: f64,
    /// Number of identical units.
    pub quantity: i64,
}

impl DeviceRecord {
    pub fn new(
        id: u64,
        room_id: u64,
        name: impl Into<String>,
        power_watt: f64,
        usage_hours_per_day: f64,
        quantity: i64,
    ) -> Self {
        Self {
            id,
            room_id,
            name: name.into(),
            power_watt,
            usage_hours_per_day,
            quantity,
        }
    }

    /// Rejects values that would produce negative or non-finite metrics.
    ///
    /// # Errors
    ///
    /// Returns the first [`InputError`] found, checking finiteness, power,
    /// hours, then quantity.
    pub fn validate(&self) -> Result<(), InputError> {
        for (field, value) in [
            ("power_watt", self.power_watt),
            ("usage_hours_per_day", self.usage_hours_per_day),
        ] {
            if !value.is_finite() {
                return Err(InputError::NonFiniteValue {
                    id: self.id,
                    name: self.name.clone(),
                    field,
                });
            }
        }
        if self.power_watt < 0.0 {
            return Err(InputError::NegativePower {
                id: self.id,
                name: self.name.clone(),
                value: self.power_watt,
            });
        }
        if !(0.0..=24.0).contains(&self.usage_hours_per_day) {
            return Err(InputError::HoursOutOfRange {
                id: self.id,
                name: self.name.clone(),
                value: self.usage_hours_per_day,
            });
        }
        if self.quantity < 1 {
            return Err(InputError::NonPositiveQuantity {
                id: self.id,
                name: self.name.clone(),
                value: self.quantity,
            });
        }
        Ok(())
    }
}

/// Electricity price per kWh, currency-agnostic.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TariffRate {
    pub price_per_kwh: f64,
}

impl TariffRate {
    pub fn new(price_per_kwh: f64) -> Self {
        Self { price_per_kwh }
    }

    /// Returns the configured rate, or `default_per_kwh` when none is set.
    pub fn resolve(rate: Option<TariffRate>, default_per_kwh: f64) -> Self {
        rate.unwrap_or(Self::new(default_per_kwh))
    }

    /// # Errors
    ///
    /// Returns [`InputError::NegativeTariff`] for negative or non-finite prices.
    pub fn validate(&self) -> Result<(), InputError> {
        if !self.price_per_kwh.is_finite() || self.price_per_kwh < 0.0 {
            return Err(InputError::NegativeTariff(self.price_per_kwh));
        }
        Ok(())
    }
}

impl Default for TariffRate {
    fn default() -> Self {
        Self::new(DEFAULT_TARIFF_PER_KWH)
    }
}

/// Point-in-time snapshot handed to the report builder.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Inventory {
    #[serde(default)]
    pub rooms: Vec<RoomRecord>,
    #[serde(default)]
    pub devices: Vec<DeviceRecord>,
    #[serde(default)]
    pub tariff: Option<TariffRate>,
}

impl Inventory {
    /// Loads an inventory from a `.json` or `.toml` file, chosen by extension.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` if the file cannot be read or decoded.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|e| {
            ConfigError::new("inventory", format!("cannot read \"{}\": {e}", path.display()))
        })?;
        match path.extension().and_then(|ext| ext.to_str()) {
            Some("json") => Self::from_json_str(&content),
            _ => Self::from_toml_str(&content),
        }
    }

    /// # Errors
    ///
    /// Returns a `ConfigError` if the TOML is invalid or contains unknown fields.
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        toml::from_str(s).map_err(|e| ConfigError::new("inventory", e.to_string()))
    }

    /// # Errors
    ///
    /// Returns a `ConfigError` if the JSON is invalid or contains unknown fields.
    pub fn from_json_str(s: &str) -> Result<Self, ConfigError> {
        serde_json::from_str(s).map_err(|e| ConfigError::new("inventory", e.to_string()))
    }

    /// Validates every device and the tariff, failing on the first problem.
    ///
    /// # Errors
    ///
    /// Returns the first [`InputError`] encountered in input order.
    pub fn validate(&self) -> Result<(), InputError> {
        if let Some(tariff) = &self.tariff {
            tariff.validate()?;
        }
        self.devices.iter().try_for_each(DeviceRecord::validate)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn valid_device_passes() {
        let d = DeviceRecord::new(1, 1, "Lamp", 18.0, 10.0, 4);
        assert!(d.validate().is_ok());
    }

    #[test]
    fn zero_power_and_zero_hours_are_allowed() {
        let d = DeviceRecord::new(1, 1, "Spare", 0.0, 0.0, 1);
        assert!(d.validate().is_ok());
        let d = DeviceRecord::new(2, 1, "Server", 300.0, 24.0, 1);
        assert!(d.validate().is_ok());
    }

    #[test]
    fn negative_power_rejected() {
        let d = DeviceRecord::new(3, 1, "Broken", -1.0, 2.0, 1);
        assert!(matches!(d.validate(), Err(InputError::NegativePower { id: 3, .. })));
    }

    #[test]
    fn zero_quantity_rejected() {
        let d = DeviceRecord::new(4, 1, "Ghost", 10.0, 2.0, 0);
        assert!(matches!(
            d.validate(),
            Err(InputError::NonPositiveQuantity { value: 0, .. })
        ));
    }

    #[test]
    fn hours_beyond_day_rejected() {
        let d = DeviceRecord::new(5, 1, "Clock", 1.0, 25.0, 1);
        assert!(matches!(d.validate(), Err(InputError::HoursOutOfRange { .. })));
    }

    #[test]
    fn nan_power_rejected() {
        let d = DeviceRecord::new(6, 1, "Odd", f64::NAN, 1.0, 1);
        assert!(matches!(
            d.validate(),
            Err(InputError::NonFiniteValue { field: "power_watt", .. })
        ));
    }

    #[test]
    fn missing_tariff_falls_back_to_default() {
        let rate = TariffRate::resolve(None, DEFAULT_TARIFF_PER_KWH);
        assert_eq!(rate.price_per_kwh, 1444.70);
        let rate = TariffRate::resolve(Some(TariffRate::new(1000.0)), DEFAULT_TARIFF_PER_KWH);
        assert_eq!(rate.price_per_kwh, 1000.0);
    }

    #[test]
    fn negative_tariff_rejected() {
        let inv = Inventory {
            tariff: Some(TariffRate::new(-2.0)),
            ..Inventory::default()
        };
        assert_eq!(inv.validate(), Err(InputError::NegativeTariff(-2.0)));
    }

    #[test]
    fn toml_inventory_parses() {
        let toml = r#"
tariff = { price_per_kwh = 1500.0 }

[[rooms]]
id = 1
name = "Office"
description = "Open plan"

[[devices]]
id = 10
room_id = 1
name = "Monitor"
power_watt = 30.0
usage_hours_per_day = 8.0
quantity = 6
"#;
        let inv = Inventory::from_toml_str(toml);
        assert!(inv.is_ok(), "inventory should parse: {:?}", inv.err());
        let inv = inv.unwrap_or_default();
        assert_eq!(inv.rooms.len(), 1);
        assert_eq!(inv.devices[0].quantity, 6);
        assert_eq!(inv.tariff.map(|t| t.price_per_kwh), Some(1500.0));
    }

    #[test]
    fn json_inventory_without_tariff_parses() {
        let json = r#"{"rooms":[{"id":1,"name":"Lab"}],"devices":[]}"#;
        let inv = Inventory::from_json_str(json);
        assert!(inv.is_ok());
        assert!(inv.unwrap_or_default().tariff.is_none());
    }

    #[test]
    fn unknown_field_rejected() {
        let json = r#"{"rooms":[{"id":1,"name":"Lab","floor":3}]}"#;
        assert!(Inventory::from_json_str(json).is_err());
    }
}
