//! Weather data for Vedro
//!
//! OpenWeatherMap payload types, the HTTP client, and the pure pieces that
//! shape a payload for display: unit labels, condition classification and
//! daily forecast aggregation.

pub mod aggregate;
pub mod condition;
mod de;
pub mod location;
pub mod provider;
pub mod types;
pub mod units;

pub use aggregate::{group_daily, group_daily_in, hourly};
pub use condition::{accent_for, gradient_for, icon_for, ConditionIcon, Gradient, DEFAULT_ACCENT};
pub use location::{Geolocator, StaticGeolocator};
pub use provider::{ProviderSettings, WeatherProvider};
pub use types::*;
pub use units::{format_temp, round_temp, Units};
