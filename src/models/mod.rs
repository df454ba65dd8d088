//! Contains the domain model for the ledger.

mod transaction;

pub use transaction::{
    DEFAULT_CATEGORY, DEFAULT_USER, Transaction, TransactionBuilder, TransactionKind,
};
