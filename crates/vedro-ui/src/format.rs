//! Display strings.

use vedro_weather::{format_temp, Units};

/// Shown when a condition has no description
pub const NOT_AVAILABLE: &str = "N/A";

/// Upper-case the first letter of every word and collapse all whitespace,
/// line breaks included, into single spaces.
pub fn capitalize_words(text: &str) -> String {
    text.split_whitespace()
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect::<String>(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// Condition line for a card; `N/A` when blank
pub fn condition_line(description: &str) -> String {
    let line = capitalize_words(description);
    if line.is_empty() {
        NOT_AVAILABLE.to_string()
    } else {
        line
    }
}

pub fn temperature(value: f64, units: Units) -> String {
    format_temp(value, units)
}

pub fn humidity(percent: u8) -> String {
    format!("{}%", percent)
}

pub fn pressure(hpa: f64) -> String {
    format!("{} hPa", hpa.round())
}

pub fn wind(speed: f64, units: Units) -> String {
    format!("{:.1} {}", speed, units.wind_suffix())
}

/// OpenWeatherMap condition image for an icon id such as `10d`
pub fn icon_url(icon: &str) -> Option<String> {
    let icon = icon.trim();
    if icon.is_empty() {
        return None;
    }
    Some(format!("https://openweathermap.org/img/wn/{}@4x.png", icon))
}
