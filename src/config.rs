//! TOML-based report configuration and page presets.

use std::fs;
use std::path::Path;

use chrono::format::{Item, StrftimeItems};
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::inventory::DEFAULT_TARIFF_PER_KWH;

/// Top-level report configuration parsed from TOML.
///
/// All fields have defaults matching the A4 preset. Load from TOML with
/// [`ReportConfig::from_toml_file`] or use [`ReportConfig::a4`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ReportConfig {
    /// Document identity and fallback tariff.
    #[serde(default)]
    pub report: ReportInfoConfig,
    /// Currency, number, and date formatting.
    #[serde(default)]
    pub format: FormatConfig,
    /// Page size and margins.
    #[serde(default)]
    pub page: PageConfig,
    /// Column widths per table kind.
    #[serde(default)]
    pub columns: ColumnConfig,
}

/// Document identity and fallback tariff.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ReportInfoConfig {
    /// Office or location shown on the cover; blank renders as a dash.
    pub office_name: String,
    pub prepared_by: String,
    pub reporting_period: String,
    /// Price per kWh used when the inventory carries no tariff.
    pub default_tariff_per_kwh: f64,
}

impl Default for ReportInfoConfig {
    fn default() -> Self {
        Self {
            office_name: String::new(),
            prepared_by: "Energy Report System".to_string(),
            reporting_period: "Monthly Estimate".to_string(),
            default_tariff_per_kwh: DEFAULT_TARIFF_PER_KWH,
        }
    }
}

/// Currency, number, and date formatting.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FormatConfig {
    pub currency_symbol: String,
    pub thousands_separator: String,
    pub decimal_separator: String,
    /// Fraction digits shown on currency amounts.
    pub currency_decimals: usize,
    /// chrono strftime pattern for the generation date.
    pub date_format: String,
}

impl Default for FormatConfig {
    fn default() -> Self {
        Self {
            currency_symbol: "Rp".to_string(),
            thousands_separator: ".".to_string(),
            decimal_separator: ",".to_string(),
            currency_decimals: 0,
            date_format: "%d %B %Y, %H:%M".to_string(),
        }
    }
}

/// Page size and margins, in points.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PageConfig {
    /// Running title painted in every body page header band.
    pub title: String,
    pub width: f32,
    pub height: f32,
    /// Left and right content margin.
    pub margin_x: f32,
    /// Cursor position after a page starts.
    pub content_top: f32,
    /// Distance from the page bottom that content may not cross.
    pub bottom_margin: f32,
    /// Height of the sticky header band.
    pub header_band: f32,
    /// Maximum pages a render may allocate, cover included.
    pub max_pages: usize,
    /// Average glyph advance as a fraction of the font size.
    pub char_width_factor: f32,
}

impl Default for PageConfig {
    fn default() -> Self {
        Self {
            title: "ELECTRICAL USAGE ANALYSIS".to_string(),
            width: 595.0,
            height: 842.0,
            margin_x: 50.0,
            content_top: 38.0,
            bottom_margin: 40.0,
            header_band: 22.0,
            max_pages: 200,
            char_width_factor: 0.5,
        }
    }
}

impl PageConfig {
    /// Vertical limit for content (`height - bottom_margin`).
    pub fn bottom_limit(&self) -> f32 {
        self.height - self.bottom_margin
    }

    /// Height available to flowing content on a fresh page.
    pub fn usable_height(&self) -> f32 {
        self.bottom_limit() - self.content_top
    }

    pub fn content_width(&self) -> f32 {
        self.width - 2.0 * self.margin_x
    }
}

/// Column widths for each table kind.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ColumnConfig {
    /// Room directory: No, Room, Description, Dev, Energy, Cost, Share.
    pub rooms: Vec<f32>,
    /// Per-room inventory: No, Device, Watt, Qty, Hrs/Day, kWh/Day, Cost/Day.
    pub devices: Vec<f32>,
    /// Top consumers: #, Device, Room, Watt, Hrs/Day, kWh/Day, Cost/Day.
    pub top_devices: Vec<f32>,
}

impl ColumnConfig {
    pub const ROOM_COLUMNS: usize = 7;
    pub const DEVICE_COLUMNS: usize = 7;
    pub const TOP_DEVICE_COLUMNS: usize = 7;
}

impl Default for ColumnConfig {
    fn default() -> Self {
        Self {
            rooms: vec![25.0, 135.0, 95.0, 35.0, 80.0, 90.0, 55.0],
            devices: vec![22.0, 128.0, 55.0, 35.0, 52.0, 68.0, 85.0],
            top_devices: vec![20.0, 120.0, 95.0, 50.0, 52.0, 68.0, 90.0],
        }
    }
}

impl ReportConfig {
    /// Available preset names.
    pub const PRESETS: &[&str] = &["a4", "letter", "a5"];

    /// Returns the A4 portrait preset (the defaults).
    pub fn a4() -> Self {
        Self::default()
    }

    /// Returns the US Letter preset.
    pub fn letter() -> Self {
        Self {
            page: PageConfig {
                width: 612.0,
                height: 792.0,
                ..PageConfig::default()
            },
            ..Self::default()
        }
    }

    /// Returns the A5 preset: narrower margins and scaled columns.
    pub fn a5() -> Self {
        Self {
            page: PageConfig {
                width: 420.0,
                height: 595.0,
                margin_x: 30.0,
                ..PageConfig::default()
            },
            columns: ColumnConfig {
                rooms: vec![18.0, 95.0, 66.0, 24.0, 56.0, 63.0, 38.0],
                devices: vec![15.0, 90.0, 38.0, 25.0, 36.0, 48.0, 60.0],
                top_devices: vec![14.0, 84.0, 66.0, 35.0, 36.0, 48.0, 63.0],
            },
            ..Self::default()
        }
    }

    /// Loads a configuration from a named preset.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` if the preset name is unknown.
    pub fn from_preset(name: &str) -> Result<Self, ConfigError> {
        match name {
            "a4" => Ok(Self::a4()),
            "letter" => Ok(Self::letter()),
            "a5" => Ok(Self::a5()),
            _ => Err(ConfigError::new(
                "preset",
                format!(
                    "unknown preset \"{name}\", available: {}",
                    Self::PRESETS.join(", ")
                ),
            )),
        }
    }

    /// Parses a configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` if the file cannot be read or the TOML is invalid.
    pub fn from_toml_file(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|e| {
            ConfigError::new("config", format!("cannot read \"{}\": {e}", path.display()))
        })?;
        Self::from_toml_str(&content)
    }

    /// Parses a configuration from a TOML string.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` if the TOML is invalid or contains unknown fields.
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        toml::from_str(s).map_err(|e| ConfigError::new("toml", e.to_string()))
    }

    /// Validates all fields and returns a list of errors.
    ///
    /// Returns an empty vector if configuration is valid.
    pub fn validate(&self) -> Vec<ConfigError> {
        let mut errors = Vec::new();

        let r = &self.report;
        if !r.default_tariff_per_kwh.is_finite() || r.default_tariff_per_kwh < 0.0 {
            errors.push(ConfigError::new(
                "report.default_tariff_per_kwh",
                "must be a finite value >= 0",
            ));
        }

        let f = &self.format;
        if f.date_format.is_empty() {
            errors.push(ConfigError::new("format.date_format", "must not be empty"));
        } else if StrftimeItems::new(&f.date_format).any(|item| matches!(item, Item::Error)) {
            errors.push(ConfigError::new(
                "format.date_format",
                format!("\"{}\" is not a valid strftime pattern", f.date_format),
            ));
        }
        if f.currency_decimals > 6 {
            errors.push(ConfigError::new("format.currency_decimals", "must be <= 6"));
        }

        let p = &self.page;
        for (field, value) in [
            ("page.width", p.width),
            ("page.height", p.height),
            ("page.char_width_factor", p.char_width_factor),
        ] {
            if !value.is_finite() || value <= 0.0 {
                errors.push(ConfigError::new(field, "must be > 0"));
            }
        }
        for (field, value) in [
            ("page.margin_x", p.margin_x),
            ("page.content_top", p.content_top),
            ("page.bottom_margin", p.bottom_margin),
            ("page.header_band", p.header_band),
        ] {
            if !value.is_finite() || value < 0.0 {
                errors.push(ConfigError::new(field, "must be >= 0"));
            }
        }
        if p.content_width() <= 0.0 {
            errors.push(ConfigError::new("page.margin_x", "must leave a positive content width"));
        }
        if p.usable_height() <= 0.0 {
            errors.push(ConfigError::new(
                "page.content_top",
                "must be < page.height - page.bottom_margin",
            ));
        }
        if p.header_band > p.content_top {
            errors.push(ConfigError::new("page.header_band", "must be <= page.content_top"));
        }
        if p.max_pages == 0 {
            errors.push(ConfigError::new("page.max_pages", "must be >= 1"));
        }

        let c = &self.columns;
        for (field, widths, expected) in [
            ("columns.rooms", &c.rooms, ColumnConfig::ROOM_COLUMNS),
            ("columns.devices", &c.devices, ColumnConfig::DEVICE_COLUMNS),
            ("columns.top_devices", &c.top_devices, ColumnConfig::TOP_DEVICE_COLUMNS),
        ] {
            if widths.len() != expected {
                errors.push(ConfigError::new(
                    field,
                    format!("expected {expected} widths, got {}", widths.len()),
                ));
            } else if widths.iter().any(|w| !w.is_finite() || *w <= 0.0) {
                errors.push(ConfigError::new(field, "every width must be > 0"));
            } else if p.margin_x + widths.iter().sum::<f32>() > p.width {
                errors.push(ConfigError::new(field, "columns extend past the page edge"));
            }
        }

        errors
    }
}
