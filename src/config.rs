//! Environment-driven settings.
//!
//! Values come from the process environment, after loading a `.env` file
//! from the working directory if one exists. Command-line flags override
//! anything read here.

use crate::domain::{DEFAULT_MUNICIPALITY, Locale};
use crate::error::AppError;

pub const ENV_MUNICIPALITY: &str = "ZONING_MUNICIPALITY";
pub const ENV_LOCALE: &str = "ZONING_LOCALE";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    /// Municipality used when an input does not name one.
    pub municipality: String,
    pub locale: Locale,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            municipality: DEFAULT_MUNICIPALITY.to_string(),
            locale: Locale::default(),
        }
    }
}

impl Settings {
    pub fn from_env() -> Result<Self, AppError> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build settings from an arbitrary key lookup. Blank values count as unset.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, AppError> {
        let get = |key: &str| lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());

        let mut settings = Settings::default();
        if let Some(municipality) = get(ENV_MUNICIPALITY) {
            settings.municipality = municipality.to_uppercase();
        }
        if let Some(raw) = get(ENV_LOCALE) {
            settings.locale = raw
                .parse()
                .map_err(|e| AppError::input(format!("Invalid {ENV_LOCALE}: {e}")))?;
        }
        Ok(settings)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn defaults_when_nothing_is_set() {
        let settings = Settings::from_lookup(lookup(&[])).unwrap();
        assert_eq!(settings, Settings::default());
        assert_eq!(settings.municipality, "SORRISO");
        assert_eq!(settings.locale, Locale::En);
    }

    #[test]
    fn reads_municipality_and_locale() {
        let settings = Settings::from_lookup(lookup(&[
            (ENV_MUNICIPALITY, " sinop "),
            (ENV_LOCALE, "pt-BR"),
        ]))
        .unwrap();
        assert_eq!(settings.municipality, "SINOP");
        assert_eq!(settings.locale, Locale::PtBr);
    }

    #[test]
    fn blank_values_are_ignored() {
        let settings = Settings::from_lookup(lookup(&[(ENV_MUNICIPALITY, "  "), (ENV_LOCALE, "")])).unwrap();
        assert_eq!(settings, Settings::default());
    }

    #[test]
    fn bad_locale_is_an_input_error() {
        let err = Settings::from_lookup(lookup(&[(ENV_LOCALE, "fr")])).unwrap_err();
        assert_eq!(err.exit_code(), crate::error::EXIT_INPUT);
        assert!(err.to_string().contains("ZONING_LOCALE"));
    }
}
