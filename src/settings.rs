//! The user-editable configuration for the tracker.
//!
//! Settings are an explicit value passed to whichever component needs them,
//! persisted through the [SettingsStore](crate::stores::SettingsStore) port
//! so they can be tested without a real storage backend.

use serde::{Deserialize, Serialize};

/// The currency code used when none has been configured.
pub const DEFAULT_CURRENCY: &str = "IDR";

/// The timezone used when none has been configured.
pub const DEFAULT_TIMEZONE: &str = "Etc/UTC";

/// User-editable configuration: profile name, display currency, the list of
/// categories offered by entry forms, and the timezone used to resolve range
/// presets.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// The profile name shown in the UI and stamped onto new transactions.
    pub user_name: Option<String>,
    /// ISO 4217 currency code used for display formatting.
    pub currency: String,
    /// Categories the user has used before, offered as suggestions.
    pub known_categories: Vec<String>,
    /// Canonical timezone name used to resolve range presets against the
    /// local calendar.
    pub timezone: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            user_name: None,
            currency: DEFAULT_CURRENCY.to_owned(),
            known_categories: Vec::new(),
            timezone: DEFAULT_TIMEZONE.to_owned(),
        }
    }
}

impl Settings {
    /// Set the profile name. A blank name clears it back to the default.
    pub fn set_user_name(&mut self, name: &str) {
        let trimmed = name.trim();
        self.user_name = if trimmed.is_empty() {
            None
        } else {
            Some(trimmed.to_owned())
        };
    }

    /// Set the display currency, normalised to upper case. A blank code
    /// resets to [DEFAULT_CURRENCY].
    pub fn set_currency(&mut self, code: &str) {
        let normalized = code.trim().to_uppercase();
        self.currency = if normalized.is_empty() {
            DEFAULT_CURRENCY.to_owned()
        } else {
            normalized
        };
    }

    /// Remember a category so entry forms can offer it again. Blank and
    /// already-known categories are ignored.
    pub fn add_known_category(&mut self, category: &str) {
        let trimmed = category.trim();
        if trimmed.is_empty() {
            return;
        }

        if !self.known_categories.iter().any(|known| known == trimmed) {
            self.known_categories.push(trimmed.to_owned());
        }
    }

    /// Forget all known categories.
    pub fn reset_known_categories(&mut self) {
        self.known_categories.clear();
    }
}

#[cfg(test)]
mod settings_tests {
    use super::{DEFAULT_CURRENCY, Settings};

    #[test]
    fn default_settings() {
        let settings = Settings::default();

        assert_eq!(settings.user_name, None);
        assert_eq!(settings.currency, "IDR");
        assert!(settings.known_categories.is_empty());
        assert_eq!(settings.timezone, "Etc/UTC");
    }

    #[test]
    fn set_user_name_trims_and_clears() {
        let mut settings = Settings::default();

        settings.set_user_name("  Alice  ");
        assert_eq!(settings.user_name.as_deref(), Some("Alice"));

        settings.set_user_name("   ");
        assert_eq!(settings.user_name, None);
    }

    #[test]
    fn set_currency_normalises() {
        let mut settings = Settings::default();

        settings.set_currency(" usd ");
        assert_eq!(settings.currency, "USD");

        settings.set_currency("");
        assert_eq!(settings.currency, DEFAULT_CURRENCY);
    }

    #[test]
    fn add_known_category_deduplicates() {
        let mut settings = Settings::default();

        settings.add_known_category("Food");
        settings.add_known_category("Food");
        settings.add_known_category("  ");
        settings.add_known_category("Transport");

        assert_eq!(settings.known_categories, vec!["Food", "Transport"]);
    }

    #[test]
    fn reset_known_categories_clears_the_list() {
        let mut settings = Settings::default();
        settings.add_known_category("Food");

        settings.reset_known_categories();

        assert!(settings.known_categories.is_empty());
    }

    #[test]
    fn missing_fields_deserialize_to_defaults() {
        let settings: Settings = serde_json::from_str("{\"currency\": \"NZD\"}").unwrap();

        assert_eq!(settings.currency, "NZD");
        assert_eq!(settings.timezone, "Etc/UTC");
    }
}
