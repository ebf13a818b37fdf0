use chrono::{DateTime, FixedOffset, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::de::{lenient, lenient_list, lenient_string};

/// API status code. OpenWeatherMap sends `200` on `/weather` but `"200"` on
/// `/forecast` and `"404"` for unknown cities, so both shapes are accepted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ApiCode {
    Number(i64),
    Text(String),
}

impl ApiCode {
    /// Numeric value of the code, if it parses
    pub fn as_number(&self) -> Option<i64> {
        match self {
            Self::Number(n) => Some(*n),
            Self::Text(s) => s.trim().parse().ok(),
        }
    }

    pub fn is_success(&self) -> bool {
        self.as_number() == Some(200)
    }
}

/// One entry of the `weather` array
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Condition {
    #[serde(default, deserialize_with = "lenient")]
    pub id: Option<i64>,
    /// Condition group, e.g. "Rain"
    #[serde(default, deserialize_with = "lenient_string")]
    pub main: String,
    /// Localized free text, e.g. "slaba kiša"
    #[serde(default, deserialize_with = "lenient_string")]
    pub description: String,
    /// Icon id, e.g. "10d"
    #[serde(default, deserialize_with = "lenient_string")]
    pub icon: String,
}

/// The `main` block of a reading
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MainReadings {
    #[serde(default, deserialize_with = "lenient")]
    pub temp: Option<f64>,
    #[serde(default, deserialize_with = "lenient")]
    pub feels_like: Option<f64>,
    #[serde(default, deserialize_with = "lenient")]
    pub humidity: Option<u8>,
    #[serde(default, deserialize_with = "lenient")]
    pub pressure: Option<f64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Wind {
    #[serde(default, deserialize_with = "lenient")]
    pub speed: Option<f64>,
}

/// Current conditions for one location, as returned by `/weather`.
///
/// Every block is optional so partial payloads still deserialize; the view
/// layer decides what a missing block means.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WeatherSnapshot {
    #[serde(default, deserialize_with = "lenient")]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub dt: Option<i64>,
    #[serde(default, deserialize_with = "lenient")]
    pub main: Option<MainReadings>,
    #[serde(default, deserialize_with = "lenient")]
    pub wind: Option<Wind>,
    #[serde(default, deserialize_with = "lenient_list")]
    pub weather: Vec<Condition>,
    #[serde(default, deserialize_with = "lenient")]
    pub cod: Option<ApiCode>,
    #[serde(default, deserialize_with = "lenient")]
    pub message: Option<String>,
}

impl WeatherSnapshot {
    /// False when the payload carries a non-200 status code
    pub fn is_ok(&self) -> bool {
        self.cod.as_ref().map_or(true, ApiCode::is_success)
    }

    pub fn primary_condition(&self) -> Option<&Condition> {
        self.weather.first()
    }

    /// Text used to derive the accent color: the condition group, falling
    /// back to the description.
    pub fn condition_text(&self) -> Option<&str> {
        let condition = self.primary_condition()?;
        [condition.main.as_str(), condition.description.as_str()]
            .into_iter()
            .find(|s| !s.trim().is_empty())
    }
}

/// One entry of the `/forecast` list
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ForecastSample {
    #[serde(default, deserialize_with = "lenient")]
    pub dt: Option<i64>,
    #[serde(default, deserialize_with = "lenient")]
    pub main: Option<MainReadings>,
    #[serde(default, deserialize_with = "lenient_list")]
    pub weather: Vec<Condition>,
}

impl ForecastSample {
    pub fn new(dt: i64, temp: f64, description: &str, icon: &str) -> Self {
        Self {
            dt: Some(dt),
            main: Some(MainReadings {
                temp: Some(temp),
                ..MainReadings::default()
            }),
            weather: vec![Condition {
                description: description.to_string(),
                icon: icon.to_string(),
                ..Condition::default()
            }],
        }
    }

    /// Timestamp of the sample; `None` if missing or out of range
    pub fn timestamp(&self) -> Option<DateTime<Utc>> {
        self.dt.and_then(|dt| DateTime::from_timestamp(dt, 0))
    }

    /// Temperature, if present and finite
    pub fn temperature(&self) -> Option<f64> {
        self.main.as_ref().and_then(|m| m.temp).filter(|t| t.is_finite())
    }

    pub fn description(&self) -> &str {
        self.weather.first().map_or("", |c| c.description.as_str())
    }

    pub fn icon(&self) -> &str {
        self.weather.first().map_or("", |c| c.icon.as_str())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CityInfo {
    #[serde(default, deserialize_with = "lenient")]
    pub name: Option<String>,
    /// Offset from UTC in seconds
    #[serde(default, deserialize_with = "lenient")]
    pub timezone: Option<i32>,
}

/// Response of `/forecast`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ForecastFeed {
    #[serde(default, deserialize_with = "lenient")]
    pub cod: Option<ApiCode>,
    #[serde(default, deserialize_with = "lenient_list")]
    pub list: Vec<ForecastSample>,
    #[serde(default, deserialize_with = "lenient")]
    pub city: Option<CityInfo>,
}

impl ForecastFeed {
    pub fn is_ok(&self) -> bool {
        self.cod.as_ref().map_or(true, ApiCode::is_success)
    }

    /// The city's own UTC offset, when the feed reports one
    pub fn city_offset(&self) -> Option<FixedOffset> {
        self.city
            .as_ref()
            .and_then(|c| c.timezone)
            .and_then(FixedOffset::east_opt)
    }
}

/// Daily forecast entry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailyForecast {
    pub date: NaiveDate,
    pub high: f64,
    pub low: f64,
    /// Description of the sample closest to local noon
    pub description: String,
    pub icon: String,
}

/// Hourly strip entry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HourlySample {
    pub time: DateTime<Utc>,
    pub temperature: f64,
    pub description: String,
    pub icon: String,
}

/// Geographic position supplied by the geolocation collaborator
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub latitude: f64,
    pub longitude: f64,
}

/// Location service errors
#[derive(Debug, thiserror::Error)]
pub enum LocationError {
    #[error("Location permission denied")]
    PermissionDenied,
    #[error("Location service unavailable")]
    ServiceUnavailable,
    #[error("Invalid coordinates: {latitude}, {longitude}")]
    InvalidCoordinates { latitude: f64, longitude: f64 },
}

/// Weather provider errors
#[derive(Debug, thiserror::Error)]
pub enum WeatherError {
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),
    #[error("City not found: {0}")]
    CityNotFound(String),
    #[error("API error {code}: {message}")]
    Api { code: i64, message: String },
    #[error("Parse error: {0}")]
    Parse(String),
    #[error("No API key configured")]
    MissingApiKey,
}
