//! Defines the crate level error type.

/// The errors that may occur while operating on the ledger.
#[derive(Debug, thiserror::Error, PartialEq)]
pub enum Error {
    /// The durable store could not be reached, e.g. the database file could
    /// not be opened or the connection lock was poisoned.
    ///
    /// Fatal to the attempted operation. The store never retries internally;
    /// retry and backoff for transient issues are a caller concern.
    #[error("the ledger storage backend is unavailable: {0}")]
    StorageUnavailable(String),

    /// A transaction was added with an `id` that already exists in the ledger.
    ///
    /// Adds are strict inserts rather than silent overwrites so that an
    /// accidental ID collision cannot destroy an existing record. Overwriting
    /// by ID is only available through bulk import, which uses upsert
    /// semantics on purpose so re-importing a backup is idempotent.
    #[error("a transaction with the same ID already exists in the ledger")]
    DuplicateId,

    /// A record in a bulk import batch failed to write.
    ///
    /// The whole batch is treated as failed and rolled back; the ledger is
    /// left in its prior state.
    #[error("could not import transactions, no changes were applied: {0}")]
    ImportFailed(String),

    /// A transaction amount was not a finite, non-negative number.
    ///
    /// The sign of an amount is implied by the transaction kind and is never
    /// stored negative.
    #[error("transaction amounts must be finite, non-negative numbers")]
    InvalidAmount,

    /// An empty string was used as a transaction category.
    #[error("transaction categories must not be empty")]
    EmptyCategory,

    /// A timestamp string could not be parsed as a point in time.
    #[error("could not parse \"{0}\" as an ISO-8601 timestamp")]
    InvalidTimestamp(String),

    /// A canonical timezone name could not be resolved to a UTC offset.
    #[error("invalid timezone {0}")]
    InvalidTimezone(String),

    /// An error occurred while serializing a value as JSON.
    #[error("could not serialize as JSON: {0}")]
    JsonSerializationError(String),

    /// An error occurred while encoding transactions as CSV.
    #[error("could not encode transactions as CSV: {0}")]
    CsvError(String),

    /// An unhandled/unexpected SQL error.
    #[error("an unexpected SQL error occurred: {0}")]
    SqlError(rusqlite::Error),
}

impl From<rusqlite::Error> for Error {
    fn from(value: rusqlite::Error) -> Self {
        match value {
            // Codes 1555 and 2067 occur when a PRIMARY KEY or UNIQUE
            // constraint failed on the transaction ID column.
            rusqlite::Error::SqliteFailure(sql_error, Some(ref desc))
                if (sql_error.extended_code == 1555 || sql_error.extended_code == 2067)
                    && desc.contains("transactions.id") =>
            {
                Error::DuplicateId
            }
            error => {
                tracing::error!("an unhandled SQL error occurred: {}", error);
                Error::SqlError(error)
            }
        }
    }
}
