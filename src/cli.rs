use clap::builder::{styling::AnsiColor, Styles};
use clap::{Parser, Subcommand};
use vedro_weather::Units;

const ABOUT: &str = "Weather lookup backed by OpenWeatherMap";

const LONG_ABOUT: &str = "
Weather lookup backed by OpenWeatherMap.

Search a city for current conditions and the five-day forecast, keep a list of
favorite cities, or look up the weather at the position set in config.toml.

The API key is read from config.toml or the OPENWEATHER_API_KEY environment
variable.
";

const STYLES: Styles = Styles::styled()
    .header(AnsiColor::Yellow.on_default())
    .usage(AnsiColor::Green.on_default())
    .literal(AnsiColor::Green.on_default())
    .placeholder(AnsiColor::Green.on_default());

#[derive(Parser, Debug)]
#[command(version, styles=STYLES, about=ABOUT, long_about = LONG_ABOUT)]
pub struct Args {
    #[command(subcommand)]
    pub command: Command,

    #[arg(long, global = true, help = "Unit system for this run (metric or imperial)")]
    pub units: Option<Units>,

    #[arg(long, global = true, help = "Use the dark palette")]
    pub dark: bool,

    #[arg(long, global = true, help = "Print views as JSON")]
    pub json: bool,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Current conditions and forecast for a city
    Show { city: String },
    /// Weather at the configured position
    Here,
    /// Current conditions for every favorite city
    Favorites,
    /// Add a city to favorites
    Add { city: String },
    /// Remove a city from favorites
    Remove { city: String },
}

/// City argument with surrounding whitespace removed; `None` when blank
pub fn city_name(raw: &str) -> Option<&str> {
    let city = raw.trim();
    (!city.is_empty()).then_some(city)
}
