//! Condition classification: free text to icon, gradient and accent.
//!
//! Matching is a case-insensitive substring search over ordered rule tables.
//! The first rule with a matching keyword wins, so more specific conditions
//! (thunder, sleet, snow) are listed before the generic ones they contain.
//! Keywords cover both English and Croatian (`lang=hr`) API descriptions.

use serde::{Deserialize, Serialize};

/// Accent used until a recognizable condition has been observed
pub const DEFAULT_ACCENT: &str = "#5EE1FF";

/// Symbolic icon for a weather condition
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum ConditionIcon {
    Clear,
    PartlyCloudy,
    Cloudy,
    Fog,
    Drizzle,
    Rain,
    HeavyRain,
    Snow,
    Sleet,
    Thunderstorm,
    #[default]
    Unknown,
}

impl ConditionIcon {
    /// Material Community Icons glyph name
    pub fn icon_name(&self) -> &'static str {
        match self {
            Self::Clear => "weather-sunny",
            Self::PartlyCloudy => "weather-partly-cloudy",
            Self::Cloudy => "weather-cloudy",
            Self::Fog => "weather-fog",
            Self::Drizzle => "weather-partly-rainy",
            Self::Rain => "weather-rainy",
            Self::HeavyRain => "weather-pouring",
            Self::Snow => "weather-snowy",
            Self::Sleet => "weather-snowy-rainy",
            Self::Thunderstorm => "weather-lightning-rainy",
            Self::Unknown => "weather-cloudy-alert",
        }
    }
}

/// Two-stop background gradient
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Gradient {
    pub start: &'static str,
    pub end: &'static str,
}

impl Gradient {
    const fn new(start: &'static str, end: &'static str) -> Self {
        Self { start, end }
    }
}

const NEUTRAL_LIGHT: Gradient = Gradient::new("#F7F9FC", "#E6EDF3");
const NEUTRAL_DARK: Gradient = Gradient::new("#0F1621", "#0B0F14");

type Rule<T> = (&'static [&'static str], T);

const ICON_RULES: &[Rule<ConditionIcon>] = &[
    (&["thunder", "grmljavin", "oluj"], ConditionIcon::Thunderstorm),
    (&["sleet", "freezing", "susnježic", "ledena"], ConditionIcon::Sleet),
    (&["snow", "snij"], ConditionIcon::Snow),
    (&["drizzle", "rosulj", "sitna kiša"], ConditionIcon::Drizzle),
    (
        &["heavy", "extreme", "shower", "jaka kiša", "pljus"],
        ConditionIcon::HeavyRain,
    ),
    (&["rain", "kiš"], ConditionIcon::Rain),
    (
        &["mist", "fog", "haze", "smoke", "dust", "magl", "sumaglic"],
        ConditionIcon::Fog,
    ),
    (
        &["few clouds", "scattered", "partly", "djelomično", "malo oblaka", "raštrkan"],
        ConditionIcon::PartlyCloudy,
    ),
    (&["cloud", "overcast", "oblač", "oblak"], ConditionIcon::Cloudy),
    (&["clear", "sun", "vedro", "sunčan"], ConditionIcon::Clear),
];

struct Palette {
    light: Gradient,
    dark: Gradient,
    accent: &'static str,
}

const PALETTE_RULES: &[Rule<Palette>] = &[
    (
        &["thunder", "grmljavin", "oluj"],
        Palette {
            light: Gradient::new("#D5D0E8", "#A99BD1"),
            dark: Gradient::new("#1C1830", "#0B0F14"),
            accent: "#B388FF",
        },
    ),
    (
        &["snow", "sleet", "snij", "susnježic"],
        Palette {
            light: Gradient::new("#F4F8FC", "#DCE8F4"),
            dark: Gradient::new("#1E2833", "#0B0F14"),
            accent: "#CFE8FF",
        },
    ),
    (
        &["rain", "drizzle", "kiš", "rosulj", "pljus"],
        Palette {
            light: Gradient::new("#CFE3F5", "#9CC3E6"),
            dark: Gradient::new("#0F1C2A", "#0B0F14"),
            accent: "#5EA8FF",
        },
    ),
    (
        &["mist", "fog", "haze", "smoke", "dust", "magl", "sumaglic"],
        Palette {
            light: Gradient::new("#ECEFF1", "#CFD8DC"),
            dark: Gradient::new("#1F2528", "#0B0F14"),
            accent: "#B0BEC5",
        },
    ),
    (
        &["cloud", "overcast", "oblač", "oblak"],
        Palette {
            light: Gradient::new("#E3E9F0", "#C9D3DE"),
            dark: Gradient::new("#1A222C", "#0B0F14"),
            accent: "#8AB4F8",
        },
    ),
    (
        &["clear", "sun", "vedro", "sunčan"],
        Palette {
            light: Gradient::new("#FFE8A3", "#FFD469"),
            dark: Gradient::new("#1B2A3A", "#0B0F14"),
            accent: "#FFD469",
        },
    ),
];

fn classify<'a, T>(text: &str, rules: &'a [Rule<T>]) -> Option<&'a T> {
    let needle = text.trim().to_lowercase();
    if needle.is_empty() {
        return None;
    }
    rules
        .iter()
        .find(|(keywords, _)| keywords.iter().any(|k| needle.contains(k)))
        .map(|(_, value)| value)
}

/// Icon for a condition description; `Unknown` when nothing matches
pub fn icon_for(description: &str) -> ConditionIcon {
    classify(description, ICON_RULES)
        .copied()
        .unwrap_or_default()
}

/// Background gradient for a condition group; neutral when nothing matches
pub fn gradient_for(condition_main: Option<&str>, is_dark: bool) -> Gradient {
    match condition_main.and_then(|c| classify(c, PALETTE_RULES)) {
        Some(palette) if is_dark => palette.dark,
        Some(palette) => palette.light,
        None if is_dark => NEUTRAL_DARK,
        None => NEUTRAL_LIGHT,
    }
}

/// Accent color for a condition, or `None` if it is not recognized
pub fn accent_for(condition: &str) -> Option<&'static str> {
    classify(condition, PALETTE_RULES).map(|palette| palette.accent)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_icon_is_case_insensitive() {
        assert_eq!(icon_for("light rain"), icon_for("Light Rain"));
        assert_eq!(icon_for("LIGHT RAIN"), ConditionIcon::Rain);
    }

    #[test]
    fn test_icon_first_rule_wins() {
        assert_eq!(
            icon_for("thunderstorm with light rain"),
            ConditionIcon::Thunderstorm
        );
        assert_eq!(icon_for("heavy snow"), ConditionIcon::Snow);
        assert_eq!(icon_for("heavy intensity rain"), ConditionIcon::HeavyRain);
        assert_eq!(icon_for("few clouds"), ConditionIcon::PartlyCloudy);
        assert_eq!(icon_for("overcast clouds"), ConditionIcon::Cloudy);
        assert_eq!(icon_for("clear sky"), ConditionIcon::Clear);
        assert_eq!(icon_for("mist"), ConditionIcon::Fog);
    }

    #[test]
    fn test_icon_croatian_descriptions() {
        assert_eq!(icon_for("slaba kiša"), ConditionIcon::Rain);
        assert_eq!(icon_for("Vedro"), ConditionIcon::Clear);
        assert_eq!(icon_for("oblačno"), ConditionIcon::Cloudy);
        assert_eq!(icon_for("malo oblaka"), ConditionIcon::PartlyCloudy);
        assert_eq!(icon_for("Snijeg"), ConditionIcon::Snow);
        assert_eq!(icon_for("grmljavinska oluja"), ConditionIcon::Thunderstorm);
    }

    #[test]
    fn test_icon_default() {
        assert_eq!(icon_for(""), ConditionIcon::Unknown);
        assert_eq!(icon_for("volcanic ash"), ConditionIcon::Unknown);
        assert_eq!(ConditionIcon::Unknown.icon_name(), "weather-cloudy-alert");
    }

    #[test]
    fn test_gradient_depends_on_theme() {
        let light = gradient_for(Some("Clear"), false);
        let dark = gradient_for(Some("Clear"), true);
        assert_ne!(light, dark);
        assert_eq!(gradient_for(Some("clear"), false), light);
    }

    #[test]
    fn test_gradient_neutral_default() {
        assert_eq!(gradient_for(None, false), NEUTRAL_LIGHT);
        assert_eq!(gradient_for(Some("Tornado"), true), NEUTRAL_DARK);
    }

    #[test]
    fn test_accent() {
        assert_eq!(accent_for("Rain"), Some("#5EA8FF"));
        assert_eq!(accent_for("drizzle"), accent_for("Rain"));
        assert_eq!(accent_for("   "), None);
        assert_eq!(accent_for("Squall"), None);
    }
}
