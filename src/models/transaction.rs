//! This file defines the type `Transaction`, the sole persisted entity of the
//! ledger, along with the builder used to validate candidate records before
//! they reach the store.

use serde::{Deserialize, Serialize};
use time::{OffsetDateTime, format_description::well_known::Rfc3339};
use uuid::Uuid;

use crate::{Error, range::parse_timestamp};

/// The owner tag given to transactions when no profile name is set.
pub const DEFAULT_USER: &str = "default";

/// The category label given to imported transactions without a usable category.
pub const DEFAULT_CATEGORY: &str = "Other";

/// Whether a transaction records money earned or money spent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionKind {
    /// Money earned.
    Income,
    /// Money spent.
    Expense,
}

impl TransactionKind {
    /// The wire/storage representation of the kind.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Income => "income",
            Self::Expense => "expense",
        }
    }
}

/// An income or expense record, i.e. an event where money was either earned
/// or spent.
///
/// This struct is the boundary contract shared by storage, import/export and
/// any future consumer, so the field names below (via serde) match the
/// persisted shape exactly: `type` for the kind and `createdAt` for the
/// timestamp.
///
/// `created_at` is kept as the original ISO-8601 string rather than a parsed
/// value so that records survive storage and export byte-for-byte. Sorting
/// and filtering always go through [parse_timestamp] rather than comparing
/// strings, so records order correctly across differing precision and offset
/// representations.
///
/// To create a new `Transaction`, use [Transaction::build].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
    /// Unique identifier, assigned by the writer before persistence and
    /// immutable afterwards.
    pub id: String,
    /// Owner tag. Defaults to [DEFAULT_USER]; not enforced as a foreign key.
    pub user: String,
    /// Whether this is income or an expense.
    #[serde(rename = "type")]
    pub kind: TransactionKind,
    /// Free-text label, non-empty after trimming.
    pub category: String,
    /// Non-negative magnitude. The sign is implied by `kind`.
    pub amount: f64,
    /// Free-text note, may be empty.
    pub note: String,
    /// ISO-8601 timestamp. Both the business timestamp and the sort/filter key.
    pub created_at: String,
}

impl Transaction {
    /// Create a new transaction.
    ///
    /// Shortcut for [TransactionBuilder::new] for discoverability.
    pub fn build(kind: TransactionKind, amount: f64) -> TransactionBuilder {
        TransactionBuilder::new(kind, amount)
    }
}

/// Builder for creating a new, validated [Transaction].
///
/// The function for finalizing the builder is [TransactionBuilder::finalise],
/// which validates the amount, category and timestamp and generates a
/// collision-resistant ID when none was supplied.
#[derive(Debug, Clone, PartialEq)]
pub struct TransactionBuilder {
    kind: TransactionKind,
    amount: f64,
    id: Option<String>,
    user: Option<String>,
    category: String,
    note: String,
    created_at: Option<String>,
}

impl TransactionBuilder {
    /// Create a builder for a transaction of `kind` for `amount`.
    pub fn new(kind: TransactionKind, amount: f64) -> Self {
        Self {
            kind,
            amount,
            id: None,
            user: None,
            category: String::new(),
            note: String::new(),
            created_at: None,
        }
    }

    /// Set the ID for the transaction. A random UUID is generated when unset.
    pub fn id(mut self, id: &str) -> Self {
        self.id = Some(id.to_owned());
        self
    }

    /// Set the owner tag for the transaction.
    pub fn user(mut self, user: &str) -> Self {
        self.user = Some(user.to_owned());
        self
    }

    /// Set the category for the transaction.
    pub fn category(mut self, category: &str) -> Self {
        self.category = category.to_owned();
        self
    }

    /// Set the note for the transaction.
    pub fn note(mut self, note: &str) -> Self {
        self.note = note.to_owned();
        self
    }

    /// Set the timestamp for the transaction. The current time is used when
    /// unset.
    pub fn created_at(mut self, created_at: &str) -> Self {
        self.created_at = Some(created_at.to_owned());
        self
    }

    /// Validate the builder and produce a [Transaction].
    ///
    /// # Errors
    /// This function will return a:
    /// - [Error::InvalidAmount] if the amount is not a finite, non-negative number,
    /// - [Error::EmptyCategory] if the category is empty after trimming,
    /// - or [Error::InvalidTimestamp] if the timestamp does not parse as a
    ///   point in time.
    pub fn finalise(self) -> Result<Transaction, Error> {
        if !self.amount.is_finite() || self.amount < 0.0 {
            return Err(Error::InvalidAmount);
        }

        let category = self.category.trim();
        if category.is_empty() {
            return Err(Error::EmptyCategory);
        }

        let created_at = match self.created_at {
            Some(created_at) => {
                parse_timestamp(&created_at)?;
                created_at
            }
            None => OffsetDateTime::now_utc()
                .format(&Rfc3339)
                .map_err(|error| Error::InvalidTimestamp(error.to_string()))?,
        };

        let user = match self.user {
            Some(user) if !user.trim().is_empty() => user.trim().to_owned(),
            _ => DEFAULT_USER.to_owned(),
        };

        let id = self
            .id
            .unwrap_or_else(|| Uuid::new_v4().to_string());

        Ok(Transaction {
            id,
            user,
            kind: self.kind,
            category: category.to_owned(),
            amount: self.amount,
            note: self.note,
            created_at,
        })
    }
}

#[cfg(test)]
mod transaction_tests {
    use crate::Error;

    use super::{DEFAULT_USER, Transaction, TransactionKind};

    #[test]
    fn finalise_succeeds_with_full_details() {
        let transaction = Transaction::build(TransactionKind::Expense, 42.5)
            .id("abc-123")
            .user("alice")
            .category("Food")
            .note("lunch")
            .created_at("2024-08-07T12:00:00+07:00")
            .finalise()
            .unwrap();

        assert_eq!(transaction.id, "abc-123");
        assert_eq!(transaction.user, "alice");
        assert_eq!(transaction.kind, TransactionKind::Expense);
        assert_eq!(transaction.category, "Food");
        assert_eq!(transaction.amount, 42.5);
        assert_eq!(transaction.note, "lunch");
        assert_eq!(transaction.created_at, "2024-08-07T12:00:00+07:00");
    }

    #[test]
    fn finalise_generates_unique_ids() {
        let first = Transaction::build(TransactionKind::Income, 1.0)
            .category("Salary")
            .finalise()
            .unwrap();
        let second = Transaction::build(TransactionKind::Income, 1.0)
            .category("Salary")
            .finalise()
            .unwrap();

        assert_ne!(first.id, second.id);
    }

    #[test]
    fn finalise_defaults_user_and_timestamp() {
        let transaction = Transaction::build(TransactionKind::Income, 1000.0)
            .category("Salary")
            .finalise()
            .unwrap();

        assert_eq!(transaction.user, DEFAULT_USER);
        assert!(
            !transaction.created_at.is_empty(),
            "expected a generated timestamp, got an empty string"
        );
    }

    #[test]
    fn finalise_fails_on_negative_amount() {
        let result = Transaction::build(TransactionKind::Expense, -1.0)
            .category("Food")
            .finalise();

        assert_eq!(result, Err(Error::InvalidAmount));
    }

    #[test]
    fn finalise_fails_on_non_finite_amount() {
        for amount in [f64::NAN, f64::INFINITY, f64::NEG_INFINITY] {
            let result = Transaction::build(TransactionKind::Expense, amount)
                .category("Food")
                .finalise();

            assert_eq!(result, Err(Error::InvalidAmount), "amount: {amount}");
        }
    }

    #[test]
    fn finalise_fails_on_blank_category() {
        let result = Transaction::build(TransactionKind::Expense, 1.0)
            .category("   ")
            .finalise();

        assert_eq!(result, Err(Error::EmptyCategory));
    }

    #[test]
    fn finalise_trims_category() {
        let transaction = Transaction::build(TransactionKind::Expense, 1.0)
            .category("  Food  ")
            .finalise()
            .unwrap();

        assert_eq!(transaction.category, "Food");
    }

    #[test]
    fn finalise_fails_on_unparseable_timestamp() {
        let result = Transaction::build(TransactionKind::Expense, 1.0)
            .category("Food")
            .created_at("not-a-date")
            .finalise();

        assert_eq!(
            result,
            Err(Error::InvalidTimestamp("not-a-date".to_owned()))
        );
    }

    #[test]
    fn serde_uses_wire_field_names() {
        let transaction = Transaction {
            id: "id-1".to_owned(),
            user: "default".to_owned(),
            kind: TransactionKind::Income,
            category: "Salary".to_owned(),
            amount: 1000.0,
            note: String::new(),
            created_at: "2024-08-07T12:00:00Z".to_owned(),
        };

        let json = serde_json::to_value(&transaction).unwrap();

        assert_eq!(json["type"], "income");
        assert_eq!(json["createdAt"], "2024-08-07T12:00:00Z");

        let round_tripped: Transaction = serde_json::from_value(json).unwrap();
        assert_eq!(round_tripped, transaction);
    }
}
