//! Centralized error types for the Vedro application.
//!
//! This module provides a typed error hierarchy that:
//! - Enables precise error handling throughout the codebase
//! - Provides user-friendly messages suitable for UI display
//! - Preserves full error context for debugging/logging

use thiserror::Error;
use vedro_weather::WeatherError;

/// Top-level application error type.
///
/// Use `user_message()` to get a UI-appropriate message.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Network error: {0}")]
    Network(#[from] NetworkError),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Weather service error: {0}")]
    Weather(WeatherError),

    #[error("{0}")]
    Other(#[from] anyhow::Error),
}

impl From<WeatherError> for AppError {
    fn from(e: WeatherError) -> Self {
        match e {
            WeatherError::Network(err) => AppError::Network(err.into_network_error()),
            other => AppError::Weather(other),
        }
    }
}

impl AppError {
    /// Returns a user-friendly message suitable for display in the UI.
    pub fn user_message(&self) -> &'static str {
        match self {
            AppError::Network(e) => e.user_message(),
            AppError::Config(e) => e.user_message(),
            AppError::Weather(e) => weather_message(e),
            AppError::Other(_) => "An unexpected error occurred. Please try again.",
        }
    }
}

fn weather_message(e: &WeatherError) -> &'static str {
    match e {
        WeatherError::CityNotFound(_) => "City not found. Please try again.",
        WeatherError::MissingApiKey => "Weather API key is missing. Check settings.",
        WeatherError::Api { code: 401, .. } => "Weather API key is invalid. Check settings.",
        WeatherError::Api { .. } | WeatherError::Parse(_) => {
            "Failed to fetch weather data. Please try again."
        }
        WeatherError::Network(_) => "Unable to connect. Check your internet connection.",
    }
}

/// Network-related errors (HTTP, connectivity).
#[derive(Debug, Error)]
pub enum NetworkError {
    #[error("Connection failed: {0}")]
    ConnectionFailed(String),

    #[error("Request timed out")]
    Timeout,

    #[error("Invalid response: {0}")]
    InvalidResponse(String),
}

impl NetworkError {
    pub fn user_message(&self) -> &'static str {
        match self {
            NetworkError::ConnectionFailed(_) => {
                "Unable to connect. Check your internet connection."
            }
            NetworkError::Timeout => "The request timed out. Please try again.",
            NetworkError::InvalidResponse(_) => {
                "Received an unexpected response. Please try again."
            }
        }
    }
}

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid configuration: {0}")]
    Invalid(String),

    #[error("Missing required setting: {0}")]
    MissingSetting(String),
}

impl ConfigError {
    pub fn user_message(&self) -> &'static str {
        match self {
            ConfigError::Invalid(_) => "Invalid configuration. Check your settings.",
            ConfigError::MissingSetting(_) => "A required setting is missing. Check your settings.",
        }
    }
}

/// Extension trait for converting reqwest errors to our error types.
pub trait ReqwestErrorExt {
    fn into_network_error(self) -> NetworkError;
}

impl ReqwestErrorExt for reqwest::Error {
    fn into_network_error(self) -> NetworkError {
        if self.is_timeout() {
            NetworkError::Timeout
        } else if self.is_connect() {
            NetworkError::ConnectionFailed(self.to_string())
        } else if self.is_decode() || self.is_body() {
            NetworkError::InvalidResponse(self.to_string())
        } else {
            NetworkError::ConnectionFailed(self.to_string())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_weather_error_conversion() {
        let app_err: AppError = WeatherError::CityNotFound("Atlantis".into()).into();
        assert!(matches!(app_err, AppError::Weather(WeatherError::CityNotFound(_))));
        assert_eq!(app_err.user_message(), "City not found. Please try again.");
    }

    #[test]
    fn test_parse_error_message() {
        let app_err: AppError = WeatherError::Parse("expected value".into()).into();
        assert_eq!(
            app_err.user_message(),
            "Failed to fetch weather data. Please try again."
        );
    }

    #[test]
    fn test_invalid_key_message() {
        let app_err: AppError = WeatherError::Api {
            code: 401,
            message: "Invalid API key".into(),
        }
        .into();
        assert_eq!(
            app_err.user_message(),
            "Weather API key is invalid. Check settings."
        );
    }

    #[test]
    fn test_network_messages() {
        assert_eq!(
            AppError::Network(NetworkError::Timeout).user_message(),
            "The request timed out. Please try again."
        );
        assert!(NetworkError::InvalidResponse("truncated".into())
            .user_message()
            .contains("unexpected response"));
    }
}
