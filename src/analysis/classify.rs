//! Load classification by rated power per unit.

use std::fmt;

use serde::Serialize;

/// Power above which a device counts as a critical load (W).
pub const CRITICAL_LOAD_W: f64 = 2000.0;

/// Load band of a single device unit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
pub enum LoadClass {
    /// Below 200 W.
    Low,
    /// 200 W up to 800 W.
    Medium,
    /// 800 W up to 2000 W.
    High,
    /// Above 2000 W.
    Critical,
}

impl LoadClass {
    pub const ALL: [LoadClass; 4] = [Self::Low, Self::Medium, Self::High, Self::Critical];

    pub fn of(power_watt: f64) -> Self {
        if power_watt > CRITICAL_LOAD_W {
            Self::Critical
        } else if power_watt >= 800.0 {
            Self::High
        } else if power_watt >= 200.0 {
            Self::Medium
        } else {
            Self::Low
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Low => "Low Load",
            Self::Medium => "Medium Load",
            Self::High => "High Load",
            Self::Critical => "Critical Load",
        }
    }

    /// Human-readable power range for the reference table.
    pub fn range(self) -> &'static str {
        match self {
            Self::Low => "< 200 Watt",
            Self::Medium => "200 - 800 Watt",
            Self::High => "800 - 2000 Watt",
            Self::Critical => "> 2000 Watt",
        }
    }
}

impl fmt::Display for LoadClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
