//! Presentation layer: per-screen view models, display formatting and the
//! async flows that feed them.

pub mod format;
pub mod screens;
pub mod view_model;

pub use screens::Screens;
pub use view_model::{
    CurrentView, DailyRow, DisplayZone, ForecastView, HomeView, HourlyRow, LocationView,
    ViewModelBuilder, ViewState, HERE_TITLE, UNNAMED_CITY,
};
