//! Screen flows: fetch from the network, update shared state, build views.
//!
//! Network work is async; favorites and theme locks are only held while a
//! view is being built, never across an `.await`.

use std::sync::Arc;

use tokio::task::JoinSet;
use vedro_core::{App, AppError};
use vedro_weather::{Geolocator, WeatherProvider, WeatherSnapshot};

use crate::view_model::{CurrentView, HomeView, LocationView, ViewModelBuilder, ViewState};

pub struct Screens<'a> {
    app: &'a App,
    provider: Arc<WeatherProvider>,
    builder: ViewModelBuilder,
}

impl<'a> Screens<'a> {
    /// Screens backed by the app's configured weather provider
    pub fn new(app: &'a App) -> Result<Self, AppError> {
        let builder = ViewModelBuilder::new(app.config().weather.hourly_count);
        Ok(Self::with_provider(app, app.provider()?, builder))
    }

    pub fn with_provider(app: &'a App, provider: WeatherProvider, builder: ViewModelBuilder) -> Self {
        Self {
            app,
            provider: Arc::new(provider),
            builder,
        }
    }

    /// Search a city. A missing forecast only hides the forecast section,
    /// and a blank name shows an empty screen without a request.
    pub async fn home(&self, city: &str) -> Result<HomeView, AppError> {
        let city = city.trim();
        if city.is_empty() {
            return Ok(HomeView {
                current: ViewState::Empty,
                forecast: None,
            });
        }
        let units = self.app.theme().read().units();

        let (snapshot, forecast) = tokio::join!(
            self.provider.weather(city, units),
            self.provider.forecast(city, units)
        );
        let snapshot = snapshot?;
        let forecast = forecast
            .inspect_err(|e| tracing::warn!("Forecast for {} unavailable: {}", city, e))
            .ok();

        self.app.observe(&snapshot);

        let favorites = self.app.favorites();
        let theme = self.app.theme();
        let view = self.builder.home(
            Some(&snapshot),
            forecast.as_ref(),
            &favorites.lock(),
            &theme.read(),
        );
        Ok(view)
    }

    /// One card per favorite city, fetched concurrently. Failed lookups
    /// become `NoData` cards.
    pub async fn favorites(&self) -> Vec<ViewState<CurrentView>> {
        let cities = self.app.favorites().lock().cities().to_vec();
        let units = self.app.theme().read().units();

        let mut tasks = JoinSet::new();
        for (index, city) in cities.iter().cloned().enumerate() {
            let provider = Arc::clone(&self.provider);
            tasks.spawn(async move {
                let result = provider.weather(&city, units).await;
                (index, city, result)
            });
        }

        let mut snapshots: Vec<Option<WeatherSnapshot>> = vec![None; cities.len()];
        while let Some(joined) = tasks.join_next().await {
            match joined {
                Ok((index, _, Ok(snapshot))) => snapshots[index] = Some(snapshot),
                Ok((_, city, Err(e))) => tracing::warn!("No weather for favorite {}: {}", city, e),
                Err(e) => tracing::warn!("Favorite lookup task failed: {}", e),
            }
        }

        let theme = self.app.theme();
        let theme = theme.read();
        cities
            .iter()
            .zip(&snapshots)
            .map(|(city, snapshot)| self.builder.favorite_card(city, snapshot.as_ref(), &theme))
            .collect()
    }

    /// Weather at the device position
    pub async fn here(&self, geolocator: &dyn Geolocator) -> LocationView {
        let coords = match geolocator.locate() {
            Ok(coords) => coords,
            Err(e) => {
                tracing::info!("Location unavailable: {}", e);
                let favorites = self.app.favorites();
                let theme = self.app.theme();
                let view = self
                    .builder
                    .location(Err(&e), &favorites.lock(), &theme.read());
                return view;
            }
        };

        let units = self.app.theme().read().units();
        let snapshot = match self.provider.weather_at(coords, units).await {
            Ok(snapshot) => {
                self.app.observe(&snapshot);
                Some(snapshot)
            }
            Err(e) => {
                tracing::warn!("Weather lookup for current location failed: {}", e);
                None
            }
        };

        let favorites = self.app.favorites();
        let theme = self.app.theme();
        let view = self
            .builder
            .location(Ok(snapshot.as_ref()), &favorites.lock(), &theme.read());
        view
    }
}
