//! SQLite-backed implementations of the store traits.

pub mod ledger;
pub mod settings;

pub use ledger::SQLiteLedgerStore;
pub use settings::SQLiteSettingsStore;

use std::{
    path::Path,
    sync::{Arc, Mutex},
};

use rusqlite::Connection;

use crate::{Error, db::initialize};

/// Open (or create) the database at `db_path` and build the SQLite stores on
/// a shared connection.
///
/// This function will modify the database by adding the tables for the
/// domain models when they do not exist yet.
///
/// # Errors
/// Returns an [Error::StorageUnavailable] if the database file could not be
/// opened, or an [Error::SqlError] if the schema could not be created.
pub fn open_stores(db_path: &Path) -> Result<(SQLiteLedgerStore, SQLiteSettingsStore), Error> {
    let connection = Connection::open(db_path)
        .map_err(|error| Error::StorageUnavailable(error.to_string()))?;

    initialize(&connection)?;

    let connection = Arc::new(Mutex::new(connection));

    Ok((
        SQLiteLedgerStore::new(connection.clone()),
        SQLiteSettingsStore::new(connection),
    ))
}
