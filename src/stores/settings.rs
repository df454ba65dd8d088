//! Defines the settings store trait.

use crate::{Error, settings::Settings};

/// Persistence port for [Settings].
///
/// Keeping this behind a trait lets components that need configuration be
/// tested without a real storage backend.
pub trait SettingsStore {
    /// Load the persisted settings, or the defaults when none have been
    /// saved yet.
    ///
    /// # Errors
    /// This function will return an [Error::StorageUnavailable] or
    /// [Error::SqlError] if the settings could not be read.
    fn load(&self) -> Result<Settings, Error>;

    /// Persist `settings`, replacing whatever was stored before.
    ///
    /// # Errors
    /// This function will return an [Error::StorageUnavailable] or
    /// [Error::SqlError] if the settings could not be written.
    fn save(&mut self, settings: &Settings) -> Result<(), Error>;
}
