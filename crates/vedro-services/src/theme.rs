//! Theme state: dark mode, unit system and the weather-derived accent.

use vedro_weather::{accent_for, Units, DEFAULT_ACCENT};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ThemeState {
    is_dark: bool,
    units: Units,
    accent: &'static str,
    background_animation: bool,
}

impl Default for ThemeState {
    fn default() -> Self {
        Self::new(false, Units::default())
    }
}

impl ThemeState {
    pub fn new(is_dark: bool, units: Units) -> Self {
        Self {
            is_dark,
            units,
            accent: DEFAULT_ACCENT,
            background_animation: true,
        }
    }

    pub fn with_background_animation(mut self, enabled: bool) -> Self {
        self.background_animation = enabled;
        self
    }

    pub fn is_dark(&self) -> bool {
        self.is_dark
    }

    pub fn units(&self) -> Units {
        self.units
    }

    pub fn accent(&self) -> &'static str {
        self.accent
    }

    pub fn background_animation(&self) -> bool {
        self.background_animation
    }

    pub fn toggle_dark(&mut self) {
        self.is_dark = !self.is_dark;
    }

    pub fn set_dark(&mut self, is_dark: bool) {
        self.is_dark = is_dark;
    }

    /// Changes how values are labeled from the next read on. Re-fetching data
    /// in the new system is up to the caller.
    pub fn set_units(&mut self, units: Units) {
        self.units = units;
    }

    pub fn toggle_background_animation(&mut self) {
        self.background_animation = !self.background_animation;
    }

    /// Derive the accent from an observed condition.
    ///
    /// Returns the new accent, or `None` when the condition is missing or not
    /// recognized, in which case the previous accent stays in place.
    pub fn set_accent_from_weather(&mut self, condition: Option<&str>) -> Option<&'static str> {
        let accent = condition.and_then(accent_for);
        match accent {
            Some(accent) => self.accent = accent,
            None => tracing::debug!("Keeping accent {} for condition {:?}", self.accent, condition),
        }
        accent
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let theme = ThemeState::default();
        assert!(!theme.is_dark());
        assert_eq!(theme.units(), Units::Metric);
        assert_eq!(theme.accent(), DEFAULT_ACCENT);
        assert!(theme.background_animation());
    }

    #[test]
    fn test_toggles() {
        let mut theme = ThemeState::default();
        theme.toggle_dark();
        assert!(theme.is_dark());
        theme.toggle_dark();
        assert!(!theme.is_dark());

        theme.toggle_background_animation();
        assert!(!theme.background_animation());
    }

    #[test]
    fn test_set_units() {
        let mut theme = ThemeState::default();
        theme.set_units(Units::Imperial);
        assert_eq!(theme.units(), Units::Imperial);
        assert_eq!(theme.units().suffix(), "°F");
    }

    #[test]
    fn test_accent_follows_weather() {
        let mut theme = ThemeState::default();
        let applied = theme.set_accent_from_weather(Some("Rain"));
        assert_eq!(applied, Some("#5EA8FF"));
        assert_eq!(theme.accent(), "#5EA8FF");
    }

    #[test]
    fn test_unrecognized_condition_keeps_accent() {
        let mut theme = ThemeState::default();
        theme.set_accent_from_weather(Some("Clear"));
        let before = theme.accent();

        assert_eq!(theme.set_accent_from_weather(Some("Squall")), None);
        assert_eq!(theme.set_accent_from_weather(None), None);
        assert_eq!(theme.accent(), before);
    }
}
