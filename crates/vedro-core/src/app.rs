use parking_lot::{Mutex, RwLock};
use std::sync::Arc;
use vedro_services::{FavoritesStorage, FavoritesStore, JsonFileStorage, ThemeState};
use vedro_weather::{StaticGeolocator, WeatherProvider, WeatherSnapshot};

use crate::{AppError, Config, ConfigError};

/// Favorites handle shared with the UI layer
pub type SharedFavorites = Arc<Mutex<FavoritesStore>>;

/// Theme handle shared with the UI layer
pub type SharedTheme = Arc<RwLock<ThemeState>>;

/// Main application state and lifecycle manager.
///
/// Owns the favorites and theme state; screens get handles through
/// [`App::favorites`] and [`App::theme`].
#[derive(Debug)]
pub struct App {
    config: Arc<Config>,
    favorites: SharedFavorites,
    theme: SharedTheme,
}

impl App {
    /// Create an application from the on-disk configuration
    pub fn new() -> Result<Self, AppError> {
        let config = Config::load()?;

        let validation = config.validate();
        if !validation.is_valid() {
            return Err(ConfigError::Invalid(validation.error_summary()).into());
        }
        for warning in &validation.warnings {
            tracing::warn!("Config warning: {}", warning);
        }

        Ok(Self::with_config(config))
    }

    /// Create an application with favorites stored in the config directory
    pub fn with_config(config: Config) -> Self {
        let storage = JsonFileStorage::in_config_dir(&config.config_dir);
        Self::with_storage(config, Box::new(storage))
    }

    pub fn with_storage(config: Config, storage: Box<dyn FavoritesStorage>) -> Self {
        let favorites = FavoritesStore::load(storage);
        tracing::info!("Loaded {} favorite cities", favorites.len());

        let theme = ThemeState::new(config.ui.dark_mode, config.weather.units)
            .with_background_animation(config.ui.background_animation);

        Self {
            config: Arc::new(config),
            favorites: Arc::new(Mutex::new(favorites)),
            theme: Arc::new(RwLock::new(theme)),
        }
    }

    /// Get reference to application config
    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn favorites(&self) -> SharedFavorites {
        Arc::clone(&self.favorites)
    }

    pub fn theme(&self) -> SharedTheme {
        Arc::clone(&self.theme)
    }

    /// Weather client built from the current configuration
    pub fn provider(&self) -> Result<WeatherProvider, AppError> {
        let settings = self
            .config
            .weather
            .provider_settings()
            .ok_or_else(|| ConfigError::MissingSetting("weather.api_key".to_string()))?;
        Ok(WeatherProvider::new(settings)?)
    }

    pub fn geolocator(&self) -> StaticGeolocator {
        StaticGeolocator::new(self.config.location.coordinates())
    }

    /// Record a freshly fetched snapshot: the accent follows its condition.
    /// Snapshots with an error code are ignored.
    pub fn observe(&self, snapshot: &WeatherSnapshot) {
        if !snapshot.is_ok() {
            return;
        }
        self.theme
            .write()
            .set_accent_from_weather(snapshot.condition_text());
    }

    /// Shutdown the application
    pub fn shutdown(&self) {
        tracing::info!(
            "Shutting down with {} favorite cities",
            self.favorites.lock().len()
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use vedro_services::MemoryStorage;
    use vedro_weather::{Condition, Units, DEFAULT_ACCENT};

    fn app_with(storage: MemoryStorage) -> App {
        let mut config = Config::default();
        config.ui.dark_mode = true;
        config.weather.units = Units::Imperial;
        App::with_storage(config, Box::new(storage))
    }

    fn snapshot(main: &str) -> WeatherSnapshot {
        WeatherSnapshot {
            weather: vec![Condition {
                main: main.to_string(),
                ..Condition::default()
            }],
            ..WeatherSnapshot::default()
        }
    }

    #[test]
    fn test_theme_starts_from_config() {
        let app = app_with(MemoryStorage::new());
        let theme = app.theme();
        let theme = theme.read();
        assert!(theme.is_dark());
        assert_eq!(theme.units(), Units::Imperial);
        assert_eq!(theme.accent(), DEFAULT_ACCENT);
    }

    #[test]
    fn test_favorites_loaded_from_storage() {
        let app = app_with(MemoryStorage::with_favorites(["Zagreb", "Split"]));
        assert!(app.favorites().lock().contains("Split"));
    }

    #[test]
    fn test_handles_share_state() {
        let storage = MemoryStorage::new();
        let app = app_with(storage.clone());

        app.favorites().lock().add("Rijeka");

        assert!(app.favorites().lock().contains("Rijeka"));
        assert_eq!(storage.saved(), vec!["Rijeka"]);
    }

    #[test]
    fn test_observe_updates_accent() {
        let app = app_with(MemoryStorage::new());

        app.observe(&snapshot("Snow"));
        let snowy = app.theme().read().accent();
        assert_ne!(snowy, DEFAULT_ACCENT);

        app.observe(&snapshot("Squall"));
        assert_eq!(app.theme().read().accent(), snowy);
    }

    #[test]
    fn test_provider_requires_key() {
        let mut config = Config::default();
        config.weather.api_key = Some("key".to_string());
        let app = App::with_storage(config, Box::new(MemoryStorage::new()));
        assert!(app.provider().is_ok());
    }

    #[test]
    fn test_geolocator_uses_config() {
        let mut config = Config::default();
        config.location.latitude = Some(43.5);
        config.location.longitude = Some(16.4);
        let app = App::with_storage(config, Box::new(MemoryStorage::new()));

        use vedro_weather::Geolocator;
        let coords = app.geolocator().locate().unwrap();
        assert_eq!(coords.latitude, 43.5);
    }
}
