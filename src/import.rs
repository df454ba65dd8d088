//! Sanitizing JSON import for transactions.
//!
//! Backups come from [export](crate::export), but users also hand-edit them or
//! bring files from other tools, so every record is validated field by field
//! before it is allowed anywhere near the store. Records that cannot be
//! repaired with safe defaults are rejected individually with a structured
//! reason rather than failing the whole file.

use serde_json::Value;

use crate::{
    Error,
    models::{DEFAULT_CATEGORY, DEFAULT_USER, Transaction, TransactionKind},
    range::parse_timestamp,
};
use uuid::Uuid;

/// A record that could not be sanitized into a [Transaction].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RejectedRecord {
    /// Position of the record in the imported array.
    pub index: usize,
    /// The field that caused the rejection.
    pub field: &'static str,
    /// Human-readable description of what was wrong.
    pub reason: String,
}

/// The outcome of sanitizing an import file: the records safe to store and
/// the ones that were turned away.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SanitizedImport {
    /// Records that passed sanitization, in file order.
    pub accepted: Vec<Transaction>,
    /// Records that were rejected, with the reason for each.
    pub rejected: Vec<RejectedRecord>,
}

/// Parse `text` as a JSON array of transaction records and sanitize each one.
///
/// Missing `id`, `user`, `category` and `note` fields are repaired with safe
/// defaults (a fresh UUID, [DEFAULT_USER], [DEFAULT_CATEGORY] and an empty
/// note). A record with a missing or invalid `type`, `amount` or `createdAt`
/// is rejected, since guessing any of those would silently corrupt the ledger.
///
/// # Errors
/// This function will return an [Error::ImportFailed] if `text` is not a JSON
/// array. Per-record problems never fail the call; they are reported through
/// [SanitizedImport::rejected].
pub fn sanitize_json(text: &str) -> Result<SanitizedImport, Error> {
    let records: Vec<Value> = serde_json::from_str(text).map_err(|error| {
        Error::ImportFailed(format!("the file is not a JSON array of records: {error}"))
    })?;

    let mut import = SanitizedImport::default();

    for (index, record) in records.iter().enumerate() {
        match sanitize_record(index, record) {
            Ok(transaction) => import.accepted.push(transaction),
            Err(rejected) => {
                tracing::debug!(
                    "rejected record {} ({}): {}",
                    rejected.index,
                    rejected.field,
                    rejected.reason
                );
                import.rejected.push(rejected);
            }
        }
    }

    Ok(import)
}

fn sanitize_record(index: usize, record: &Value) -> Result<Transaction, RejectedRecord> {
    let Some(object) = record.as_object() else {
        return Err(reject(index, "record", "the record is not a JSON object"));
    };

    let kind = match object.get("type").and_then(Value::as_str) {
        Some("income") => TransactionKind::Income,
        Some("expense") => TransactionKind::Expense,
        Some(other) => {
            return Err(reject(
                index,
                "type",
                &format!("\"{other}\" is not \"income\" or \"expense\""),
            ));
        }
        None => {
            return Err(reject(
                index,
                "type",
                "the field is missing or not a string",
            ));
        }
    };

    let amount = parse_amount(object.get("amount"))
        .ok_or_else(|| reject(index, "amount", "not a finite, non-negative number"))?;

    let created_at = match object.get("createdAt").and_then(Value::as_str) {
        Some(created_at) if parse_timestamp(created_at).is_ok() => created_at.to_owned(),
        Some(created_at) => {
            return Err(reject(
                index,
                "createdAt",
                &format!("\"{created_at}\" is not an ISO-8601 timestamp"),
            ));
        }
        None => {
            return Err(reject(
                index,
                "createdAt",
                "the field is missing or not a string",
            ));
        }
    };

    let category = match object.get("category").and_then(Value::as_str) {
        Some(category) if !category.trim().is_empty() => category.trim().to_owned(),
        _ => DEFAULT_CATEGORY.to_owned(),
    };

    let user = match object.get("user").and_then(Value::as_str) {
        Some(user) if !user.trim().is_empty() => user.trim().to_owned(),
        _ => DEFAULT_USER.to_owned(),
    };

    let note = object
        .get("note")
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_owned();

    let id = match object.get("id").and_then(Value::as_str) {
        Some(id) if !id.trim().is_empty() => id.trim().to_owned(),
        _ => Uuid::new_v4().to_string(),
    };

    Ok(Transaction {
        id,
        user,
        kind,
        category,
        amount,
        note,
        created_at,
    })
}

/// Accepts a JSON number or a numeric string. Spreadsheet exports often quote
/// the amount column.
fn parse_amount(value: Option<&Value>) -> Option<f64> {
    let amount = match value {
        Some(Value::Number(number)) => number.as_f64()?,
        Some(Value::String(text)) => text.trim().parse().ok()?,
        _ => return None,
    };

    (amount.is_finite() && amount >= 0.0).then_some(amount)
}

fn reject(index: usize, field: &'static str, reason: &str) -> RejectedRecord {
    RejectedRecord {
        index,
        field,
        reason: reason.to_owned(),
    }
}
