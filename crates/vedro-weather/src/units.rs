//! Display rules for the unit system.
//!
//! Data is requested from the API already in the target system, so nothing
//! here converts values; it only labels and rounds them.

use serde::{Deserialize, Serialize};

/// Unit system preference
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Units {
    #[default]
    Metric,
    Imperial,
}

impl Units {
    /// Temperature suffix shown after a rounded value
    pub fn suffix(self) -> &'static str {
        match self {
            Self::Metric => "°C",
            Self::Imperial => "°F",
        }
    }

    /// Wind speed suffix; the API reports m/s for metric and mph for imperial
    pub fn wind_suffix(self) -> &'static str {
        match self {
            Self::Metric => "m/s",
            Self::Imperial => "mph",
        }
    }

    /// Value of the `units` query parameter
    pub fn as_query(self) -> &'static str {
        match self {
            Self::Metric => "metric",
            Self::Imperial => "imperial",
        }
    }
}

impl std::str::FromStr for Units {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "metric" | "celsius" | "c" => Ok(Self::Metric),
            "imperial" | "fahrenheit" | "f" => Ok(Self::Imperial),
            other => Err(format!("unknown unit system: {other}")),
        }
    }
}

impl std::fmt::Display for Units {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_query())
    }
}

/// Round half away from zero
pub fn round_temp(value: f64) -> i64 {
    value.round() as i64
}

/// Rounded temperature with its suffix, e.g. "21°C"
pub fn format_temp(value: f64, units: Units) -> String {
    format!("{}{}", round_temp(value), units.suffix())
}
