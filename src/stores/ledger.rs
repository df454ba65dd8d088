//! Defines the ledger store trait.

use crate::{Error, models::Transaction};

/// Durable, keyed storage of [Transaction] records.
///
/// The trait is a uniform collection port so the ledger can be backed by an
/// embedded database, a file, or an in-memory structure interchangeably.
/// Implementations own the schema and the uniqueness of identifiers.
pub trait LedgerStore {
    /// Persist `transaction` as a new entry.
    ///
    /// Adds are strict: the record's `id` must not already exist. Use
    /// [LedgerStore::bulk_import] for upsert semantics.
    ///
    /// # Errors
    /// This function will return a:
    /// - [Error::DuplicateId] if a record with the same `id` already exists,
    /// - [Error::StorageUnavailable] if the backend cannot be reached,
    /// - or [Error::SqlError] if there is some other storage error.
    fn add(&mut self, transaction: &Transaction) -> Result<(), Error>;

    /// Retrieve every stored record, sorted by timestamp descending (most
    /// recent first).
    ///
    /// Ordering compares parsed timestamps, not strings, so records with
    /// differing ISO-8601 precision or offsets still order correctly. An
    /// empty store yields an empty vector, never an error.
    ///
    /// # Errors
    /// This function will return an [Error::StorageUnavailable] or
    /// [Error::SqlError] if the records could not be read.
    fn get_all(&self) -> Result<Vec<Transaction>, Error>;

    /// Write each record using upsert semantics: a record whose `id` already
    /// exists overwrites the stored record, so re-importing a previously
    /// exported backup is idempotent.
    ///
    /// The whole batch is atomic: either every record is written or none are.
    /// An empty batch is a no-op.
    ///
    /// # Errors
    /// This function will return an [Error::ImportFailed] if any record in
    /// the batch fails to write; the store is left in its prior state.
    fn bulk_import(&mut self, transactions: &[Transaction]) -> Result<(), Error>;

    /// Remove every record. Irreversible.
    ///
    /// # Errors
    /// This function will return an [Error::StorageUnavailable] or
    /// [Error::SqlError] if the records could not be deleted.
    fn clear_all(&mut self) -> Result<(), Error>;
}
