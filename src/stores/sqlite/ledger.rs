//! Implements a SQLite backed ledger store.
use std::sync::{Arc, Mutex, MutexGuard};

use rusqlite::{Connection, Row};

use crate::{
    Error,
    db::{CreateTable, MapRow},
    models::{Transaction, TransactionKind},
    range::parse_timestamp,
    stores::LedgerStore,
};

/// Stores transactions in a SQLite database.
#[derive(Debug, Clone)]
pub struct SQLiteLedgerStore {
    connection: Arc<Mutex<Connection>>,
}

impl SQLiteLedgerStore {
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

impl LedgerStore for SQLiteLedgerStore {
    /// Persist `transaction` as a new entry in the database.
    ///
    /// # Errors
    /// This function will return a:
    /// - [Error::DuplicateId] if a record with the same `id` already exists,
    /// - [Error::StorageUnavailable] if the database lock was poisoned,
    /// - or [Error::SqlError] if there is some other SQL error.
    fn add(&mut self, transaction: &Transaction) -> Result<(), Error> {
        let connection = self.lock()?;

        connection.execute(
            "INSERT INTO transactions (id, user, kind, category, amount, note, created_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
            (
                &transaction.id,
                &transaction.user,
                transaction.kind.as_str(),
                &transaction.category,
                transaction.amount,
                &transaction.note,
                &transaction.created_at,
            ),
        )?;

        Ok(())
    }

    /// Retrieve every transaction, most recent first.
    ///
    /// Sorting happens after reading because the `created_at` column holds
    /// the original ISO-8601 strings, and string order disagrees with
    /// timestamp order once offsets or precision differ.
    ///
    /// # Errors
    /// This function will return an [Error::SqlError] if there is an SQL error.
    fn get_all(&self) -> Result<Vec<Transaction>, Error> {
        let mut transactions = {
            let connection = self.lock()?;

            let transactions: Result<Vec<Transaction>, Error> = connection
                .prepare(
                    "SELECT id, user, kind, category, amount, note, created_at FROM transactions",
                )?
                .query_map([], Self::map_row)?
                .map(|maybe_transaction| maybe_transaction.map_err(Error::SqlError))
                .collect();

            transactions?
        };

        transactions.sort_by(|a, b| {
            let a_key = parse_timestamp(&a.created_at).ok();
            let b_key = parse_timestamp(&b.created_at).ok();
            b_key.cmp(&a_key)
        });

        Ok(transactions)
    }

    /// Write each transaction with upsert semantics inside a single SQL
    /// transaction.
    ///
    /// # Errors
    /// This function will return an [Error::ImportFailed] if any record in
    /// the batch fails to write. The batch is rolled back as a whole.
    fn bulk_import(&mut self, transactions: &[Transaction]) -> Result<(), Error> {
        if transactions.is_empty() {
            return Ok(());
        }

        let connection = self.lock()?;

        let tx = connection
            .unchecked_transaction()
            .map_err(|error| Error::ImportFailed(error.to_string()))?;

        {
            let mut stmt = tx
                .prepare(
                    "INSERT OR REPLACE INTO transactions
                     (id, user, kind, category, amount, note, created_at)
                     VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
                )
                .map_err(|error| Error::ImportFailed(error.to_string()))?;

            for transaction in transactions {
                stmt.execute((
                    &transaction.id,
                    &transaction.user,
                    transaction.kind.as_str(),
                    &transaction.category,
                    transaction.amount,
                    &transaction.note,
                    &transaction.created_at,
                ))
                .map_err(|error| Error::ImportFailed(error.to_string()))?;
            }
        }

        tx.commit()
            .map_err(|error| Error::ImportFailed(error.to_string()))?;

        tracing::debug!("imported {} transactions", transactions.len());

        Ok(())
    }

    /// Remove every transaction from the database.
    ///
    /// # Errors
    /// This function will return an [Error::SqlError] if there is an SQL error.
    fn clear_all(&mut self) -> Result<(), Error> {
        let connection = self.lock()?;

        connection.execute("DELETE FROM transactions", ())?;

        Ok(())
    }
}

impl CreateTable for SQLiteLedgerStore {
    fn create_table(connection: &Connection) -> Result<(), rusqlite::Error> {
        connection.execute(
            "CREATE TABLE IF NOT EXISTS transactions (
                    id TEXT PRIMARY KEY,
                    user TEXT NOT NULL,
                    kind TEXT NOT NULL,
                    category TEXT NOT NULL,
                    amount REAL NOT NULL,
                    note TEXT NOT NULL,
                    created_at TEXT NOT NULL
                    )",
            (),
        )?;

        connection.execute(
            "CREATE INDEX IF NOT EXISTS idx_transactions_created_at
             ON transactions (created_at)",
            (),
        )?;

        Ok(())
    }
}

impl MapRow for SQLiteLedgerStore {
    type ReturnType = Transaction;

    fn map_row_with_offset(row: &Row, offset: usize) -> Result<Self::ReturnType, rusqlite::Error> {
        let kind_text: String = row.get(offset + 2)?;
        let kind = match kind_text.as_str() {
            "income" => TransactionKind::Income,
            "expense" => TransactionKind::Expense,
            other => {
                return Err(rusqlite::Error::FromSqlConversionFailure(
                    offset + 2,
                    rusqlite::types::Type::Text,
                    format!("unknown transaction kind \"{other}\"").into(),
                ));
            }
        };

        Ok(Transaction {
            id: row.get(offset)?,
            user: row.get(offset + 1)?,
            kind,
            category: row.get(offset + 3)?,
            amount: row.get(offset + 4)?,
            note: row.get(offset + 5)?,
            created_at: row.get(offset + 6)?,
        })
    }
}
