//! Per-screen display records.
//!
//! `ViewModelBuilder` is pure: it combines a snapshot, a forecast feed and
//! the favorites/theme state into exactly what each screen renders. Missing
//! or partial payloads become `ViewState::Empty` / `ViewState::NoData`,
//! never a panic.

use chrono::{DateTime, FixedOffset, Local, NaiveDate, Utc};
use serde::Serialize;
use vedro_services::{FavoritesStore, ThemeState};
use vedro_weather::{
    gradient_for, group_daily, group_daily_in, hourly, icon_for, round_temp, ConditionIcon,
    DailyForecast, ForecastFeed, Gradient, HourlySample, LocationError, Units, WeatherSnapshot,
};

use crate::format;

/// Title for a reading the API did not name
pub const UNNAMED_CITY: &str = "Unnamed place";

/// Title for an unnamed reading on the "weather here" screen
pub const HERE_TITLE: &str = "Your location";

/// What a screen section shows
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum ViewState<T> {
    /// Nothing requested yet
    Empty,
    /// A response arrived but lacks the data to render
    NoData { city: Option<String> },
    Ready(T),
}

impl<T> ViewState<T> {
    pub fn is_ready(&self) -> bool {
        matches!(self, ViewState::Ready(_))
    }

    pub fn ready(&self) -> Option<&T> {
        match self {
            ViewState::Ready(view) => Some(view),
            _ => None,
        }
    }
}

/// Current conditions card
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CurrentView {
    pub city: String,
    pub temperature: i64,
    /// e.g. "21°C"
    pub temperature_label: String,
    pub feels_like_label: Option<String>,
    pub humidity_label: Option<String>,
    pub pressure_label: Option<String>,
    pub wind_label: Option<String>,
    /// Capitalized, single line
    pub condition: String,
    pub icon: ConditionIcon,
    pub icon_url: Option<String>,
    pub is_favorite: bool,
    pub gradient: Gradient,
    pub accent: &'static str,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HourlyRow {
    /// Local "HH:MM"
    pub time: String,
    pub temperature_label: String,
    pub icon: ConditionIcon,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DailyRow {
    pub date: NaiveDate,
    /// Abbreviated weekday, e.g. "Mon"
    pub weekday: String,
    pub high_label: String,
    pub low_label: String,
    pub condition: String,
    pub icon: ConditionIcon,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ForecastView {
    pub hourly: Vec<HourlyRow>,
    pub daily: Vec<DailyRow>,
}

/// Home screen: searched city plus its forecast
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HomeView {
    pub current: ViewState<CurrentView>,
    pub forecast: Option<ForecastView>,
}

/// "Weather here" screen
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum LocationView {
    PermissionDenied,
    /// Location service off or coordinates unusable
    Unavailable,
    NoData,
    Ready(CurrentView),
}

/// Which clock forecast times are shown in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DisplayZone {
    /// The device's zone
    #[default]
    Local,
    /// The forecast city's own offset, falling back to the device's zone
    City,
    Fixed(FixedOffset),
}

#[derive(Debug, Clone)]
pub struct ViewModelBuilder {
    hourly_limit: usize,
    zone: DisplayZone,
}

impl Default for ViewModelBuilder {
    fn default() -> Self {
        Self::new(8)
    }
}

impl ViewModelBuilder {
    pub fn new(hourly_limit: usize) -> Self {
        Self {
            hourly_limit,
            zone: DisplayZone::default(),
        }
    }

    pub fn with_zone(mut self, zone: DisplayZone) -> Self {
        self.zone = zone;
        self
    }

    pub fn home(
        &self,
        snapshot: Option<&WeatherSnapshot>,
        forecast: Option<&ForecastFeed>,
        favorites: &FavoritesStore,
        theme: &ThemeState,
    ) -> HomeView {
        HomeView {
            current: self.current(snapshot, favorites, theme),
            forecast: forecast.and_then(|feed| self.forecast(feed, theme)),
        }
    }

    /// Current conditions; `Empty` without a snapshot, `NoData` when the
    /// snapshot has an error code or lacks `main` or `weather[0]`. A
    /// snapshot without a place name is titled [`UNNAMED_CITY`].
    pub fn current(
        &self,
        snapshot: Option<&WeatherSnapshot>,
        favorites: &FavoritesStore,
        theme: &ThemeState,
    ) -> ViewState<CurrentView> {
        self.current_titled(snapshot, UNNAMED_CITY, favorites, theme)
    }

    fn current_titled(
        &self,
        snapshot: Option<&WeatherSnapshot>,
        fallback_title: &str,
        favorites: &FavoritesStore,
        theme: &ThemeState,
    ) -> ViewState<CurrentView> {
        let Some(snapshot) = snapshot else {
            return ViewState::Empty;
        };
        let name = snapshot.name.as_deref().filter(|n| !n.trim().is_empty());
        let title = name.unwrap_or(fallback_title).to_string();
        let is_favorite = name.is_some_and(|n| favorites.contains(n));

        match current_view(snapshot, title, is_favorite, theme) {
            Some(view) => ViewState::Ready(view),
            None => ViewState::NoData {
                city: name.map(str::to_string),
            },
        }
    }

    /// Card for one favorite. The card is titled by the stored name, which
    /// may differ from the name the API reports.
    pub fn favorite_card(
        &self,
        city: &str,
        snapshot: Option<&WeatherSnapshot>,
        theme: &ThemeState,
    ) -> ViewState<CurrentView> {
        snapshot
            .and_then(|s| current_view(s, city.to_string(), true, theme))
            .map_or_else(
                || ViewState::NoData {
                    city: Some(city.to_string()),
                },
                ViewState::Ready,
            )
    }

    /// Cards for every favorite, in favorites order
    pub fn favorites<'a, F>(
        &self,
        favorites: &FavoritesStore,
        mut lookup: F,
        theme: &ThemeState,
    ) -> Vec<ViewState<CurrentView>>
    where
        F: FnMut(&str) -> Option<&'a WeatherSnapshot>,
    {
        favorites
            .cities()
            .iter()
            .map(|city| self.favorite_card(city, lookup(city), theme))
            .collect()
    }

    /// "Weather here": the geolocation outcome followed by the fetched snapshot
    pub fn location(
        &self,
        located: Result<Option<&WeatherSnapshot>, &LocationError>,
        favorites: &FavoritesStore,
        theme: &ThemeState,
    ) -> LocationView {
        match located {
            Err(LocationError::PermissionDenied) => LocationView::PermissionDenied,
            Err(_) => LocationView::Unavailable,
            Ok(snapshot) => match self.current_titled(snapshot, HERE_TITLE, favorites, theme) {
                ViewState::Ready(view) => LocationView::Ready(view),
                _ => LocationView::NoData,
            },
        }
    }

    /// Hourly strip and daily rows; `None` if the feed carries an error code
    pub fn forecast(&self, feed: &ForecastFeed, theme: &ThemeState) -> Option<ForecastView> {
        if !feed.is_ok() {
            return None;
        }
        let offset = self.offset_for(feed);
        let units = theme.units();

        let hourly = hourly(&feed.list, self.hourly_limit)
            .iter()
            .map(|sample| hourly_row(sample, offset, units))
            .collect();

        let days = match offset {
            Some(offset) => group_daily_in(&feed.list, &offset),
            None => group_daily(&feed.list),
        };
        let daily = days.iter().map(|day| daily_row(day, units)).collect();

        Some(ForecastView { hourly, daily })
    }

    /// `None` means the device's local zone
    fn offset_for(&self, feed: &ForecastFeed) -> Option<FixedOffset> {
        match self.zone {
            DisplayZone::Local => None,
            DisplayZone::City => feed.city_offset(),
            DisplayZone::Fixed(offset) => Some(offset),
        }
    }
}

fn current_view(
    snapshot: &WeatherSnapshot,
    city: String,
    is_favorite: bool,
    theme: &ThemeState,
) -> Option<CurrentView> {
    if !snapshot.is_ok() {
        return None;
    }
    let main = snapshot.main.as_ref()?;
    let temp = main.temp.filter(|t| t.is_finite())?;
    let condition = snapshot.primary_condition()?;
    let units = theme.units();

    let icon_source = if condition.description.trim().is_empty() {
        &condition.main
    } else {
        &condition.description
    };

    Some(CurrentView {
        city,
        temperature: round_temp(temp),
        temperature_label: format::temperature(temp, units),
        feels_like_label: main.feels_like.map(|t| format::temperature(t, units)),
        humidity_label: main.humidity.map(format::humidity),
        pressure_label: main.pressure.map(format::pressure),
        wind_label: snapshot
            .wind
            .as_ref()
            .and_then(|w| w.speed)
            .map(|s| format::wind(s, units)),
        condition: format::condition_line(&condition.description),
        icon: icon_for(icon_source),
        icon_url: format::icon_url(&condition.icon),
        is_favorite,
        gradient: gradient_for(Some(condition.main.as_str()), theme.is_dark()),
        accent: theme.accent(),
    })
}

fn local_time(time: DateTime<Utc>, offset: Option<FixedOffset>) -> DateTime<FixedOffset> {
    match offset {
        Some(offset) => time.with_timezone(&offset),
        None => time.with_timezone(&Local).fixed_offset(),
    }
}

fn hourly_row(sample: &HourlySample, offset: Option<FixedOffset>, units: Units) -> HourlyRow {
    HourlyRow {
        time: local_time(sample.time, offset).format("%H:%M").to_string(),
        temperature_label: format::temperature(sample.temperature, units),
        icon: icon_for(&sample.description),
    }
}

fn daily_row(day: &DailyForecast, units: Units) -> DailyRow {
    DailyRow {
        date: day.date,
        weekday: day.date.format("%a").to_string(),
        high_label: format::temperature(day.high, units),
        low_label: format::temperature(day.low, units),
        condition: format::condition_line(&day.description),
        icon: icon_for(&day.description),
    }
}
