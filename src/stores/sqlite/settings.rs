//! Implements a SQLite backed settings store.
use std::sync::{Arc, Mutex, MutexGuard};

use rusqlite::Connection;

use crate::{Error, db::CreateTable, settings::Settings, stores::SettingsStore};

/// Stores the application settings in a SQLite database.
///
/// Settings are stored as a single JSON document so schema changes on the
/// [Settings] struct do not need column migrations.
#[derive(Debug, Clone)]
pub struct SQLiteSettingsStore {
    connection: Arc<Mutex<Connection>>,
}

impl SQLiteSettingsStore {
    /// Create a new store for the SQLite `connection`.
    pub fn new(connection: Arc<Mutex<Connection>>) -> Self {
        Self { connection }
    }

    fn lock(&self) -> Result<MutexGuard<'_, Connection>, Error> {
        self.connection
            .lock()
            .map_err(|_| Error::StorageUnavailable("the database lock was poisoned".to_owned()))
    }
}

impl SettingsStore for SQLiteSettingsStore {
    /// Load the persisted settings, or [Settings::default] when nothing has
    /// been saved yet.
    ///
    /// # Errors
    /// This function will return a:
    /// - [Error::JsonSerializationError] if the stored document cannot be
    ///   deserialized,
    /// - [Error::StorageUnavailable] if the database lock was poisoned,
    /// - or [Error::SqlError] if there is some other SQL error.
    fn load(&self) -> Result<Settings, Error> {
        let connection = self.lock()?;

        let document: Result<String, rusqlite::Error> = connection.query_row(
            "SELECT document FROM settings WHERE id = 1",
            [],
            |row| row.get(0),
        );

        match document {
            Ok(document) => serde_json::from_str(&document)
                .map_err(|error| Error::JsonSerializationError(error.to_string())),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(Settings::default()),
            Err(error) => Err(error.into()),
        }
    }

    /// Persist `settings`, replacing whatever was stored before.
    ///
    /// # Errors
    /// This function will return a:
    /// - [Error::JsonSerializationError] if the settings cannot be serialized,
    /// - [Error::StorageUnavailable] if the database lock was poisoned,
    /// - or [Error::SqlError] if there is some other SQL error.
    fn save(&mut self, settings: &Settings) -> Result<(), Error> {
        let document = serde_json::to_string(settings)
            .map_err(|error| Error::JsonSerializationError(error.to_string()))?;

        let connection = self.lock()?;

        connection.execute(
            "INSERT INTO settings (id, document) VALUES (1, ?1)
             ON CONFLICT(id) DO UPDATE SET document = excluded.document",
            [&document],
        )?;

        Ok(())
    }
}

impl CreateTable for SQLiteSettingsStore {
    fn create_table(connection: &Connection) -> Result<(), rusqlite::Error> {
        connection.execute(
            "CREATE TABLE IF NOT EXISTS settings (
                    id INTEGER PRIMARY KEY CHECK (id = 1),
                    document TEXT NOT NULL
                    )",
            (),
        )?;

        Ok(())
    }
}
