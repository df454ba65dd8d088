//! Monitrack is the storage and analytics core of a local-first personal
//! finance tracker.
//!
//! The crate has two halves:
//!
//! - The [ledger store](crate::stores::LedgerStore): durable, keyed storage
//!   of [Transaction](crate::models::Transaction) records backed by SQLite,
//!   with strict single-record adds, atomic bulk import and full clear.
//! - [Range analytics](crate::analytics): pure functions over an in-memory
//!   transaction collection that compute date-filtered income/expense totals
//!   and fixed-window daily spending buckets for charting.
//!
//! Import and export adapters ([import](crate::import), [export](crate::export))
//! translate between the persisted record shape and JSON/CSV backup files.

#![warn(missing_docs)]

pub mod analytics;
pub mod db;
mod error;
pub mod export;
pub mod import;
pub mod logging;
pub mod models;
pub mod range;
pub mod settings;
pub mod stores;
pub mod timezone;

pub use error::Error;
