//! OpenWeatherMap client.

use crate::types::{ApiCode, Coordinates, ForecastFeed, WeatherError, WeatherSnapshot};
use crate::units::Units;
use reqwest::Client;
use serde::de::DeserializeOwned;
use std::sync::Arc;
use std::time::Duration;

pub const DEFAULT_BASE_URL: &str = "https://api.openweathermap.org/data/2.5";
const DEFAULT_TIMEOUT_SECS: u64 = 10;

/// Settings for [`WeatherProvider`]
#[derive(Debug, Clone)]
pub struct ProviderSettings {
    pub base_url: String,
    pub api_key: String,
    /// Language of condition descriptions
    pub language: String,
    pub timeout: Duration,
}

impl ProviderSettings {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            api_key: api_key.into(),
            language: "hr".to_string(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }
}

#[derive(Debug, Clone)]
pub struct WeatherProvider {
    client: Arc<Client>,
    settings: ProviderSettings,
}

impl WeatherProvider {
    pub fn new(settings: ProviderSettings) -> Result<Self, WeatherError> {
        if settings.api_key.trim().is_empty() {
            return Err(WeatherError::MissingApiKey);
        }

        let client = Client::builder().timeout(settings.timeout).build()?;

        Ok(Self {
            client: Arc::new(client),
            settings,
        })
    }

    /// Current conditions for a city
    pub async fn weather(&self, city: &str, units: Units) -> Result<WeatherSnapshot, WeatherError> {
        let snapshot: WeatherSnapshot = self.get("weather", &[("q", city.to_string())], units).await?;
        check_code(snapshot.cod.as_ref(), snapshot.message.as_deref(), city)?;
        Ok(snapshot)
    }

    /// Current conditions at a position
    pub async fn weather_at(
        &self,
        coords: Coordinates,
        units: Units,
    ) -> Result<WeatherSnapshot, WeatherError> {
        let query = [
            ("lat", coords.latitude.to_string()),
            ("lon", coords.longitude.to_string()),
        ];
        let snapshot: WeatherSnapshot = self.get("weather", &query, units).await?;
        let label = format!("{}, {}", coords.latitude, coords.longitude);
        check_code(snapshot.cod.as_ref(), snapshot.message.as_deref(), &label)?;
        Ok(snapshot)
    }

    /// Five-day, three-hour forecast for a city
    pub async fn forecast(&self, city: &str, units: Units) -> Result<ForecastFeed, WeatherError> {
        let feed: ForecastFeed = self.get("forecast", &[("q", city.to_string())], units).await?;
        check_code(feed.cod.as_ref(), None, city)?;
        Ok(feed)
    }

    async fn get<T: DeserializeOwned>(
        &self,
        endpoint: &str,
        query: &[(&str, String)],
        units: Units,
    ) -> Result<T, WeatherError> {
        let url = format!("{}/{}", self.settings.base_url.trim_end_matches('/'), endpoint);
        tracing::debug!("GET {} ({})", url, units);

        let response = self
            .client
            .get(&url)
            .query(query)
            .query(&[
                ("units", units.as_query()),
                ("appid", self.settings.api_key.as_str()),
                ("lang", self.settings.language.as_str()),
            ])
            .send()
            .await?;

        // Error payloads (404 city not found, 401 bad key) still carry a JSON
        // body with `cod`, so the body is parsed regardless of HTTP status.
        let status = response.status();
        let body = response.text().await?;
        serde_json::from_str(&body).map_err(|e| {
            tracing::debug!("Unparseable {} response ({}): {}", endpoint, status, e);
            WeatherError::Parse(e.to_string())
        })
    }
}

fn check_code(code: Option<&ApiCode>, message: Option<&str>, target: &str) -> Result<(), WeatherError> {
    match code.map(|c| c.as_number()) {
        None | Some(Some(200)) => Ok(()),
        Some(Some(404)) => Err(WeatherError::CityNotFound(target.to_string())),
        Some(Some(code)) => Err(WeatherError::Api {
            code,
            message: message.unwrap_or("request failed").to_string(),
        }),
        Some(None) => Err(WeatherError::Parse(format!("unreadable status code for {}", target))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_api_key_rejected() {
        let result = WeatherProvider::new(ProviderSettings::new("  "));
        assert!(matches!(result, Err(WeatherError::MissingApiKey)));
    }

    #[test]
    fn test_check_code() {
        assert!(check_code(None, None, "Zagreb").is_ok());
        assert!(check_code(Some(&ApiCode::Number(200)), None, "Zagreb").is_ok());
        assert!(matches!(
            check_code(Some(&ApiCode::Text("404".into())), None, "Atlantis"),
            Err(WeatherError::CityNotFound(c)) if c == "Atlantis"
        ));
        assert!(matches!(
            check_code(Some(&ApiCode::Number(401)), Some("Invalid API key"), "Zagreb"),
            Err(WeatherError::Api { code: 401, .. })
        ));
    }
}
