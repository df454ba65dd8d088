//! Serializes the ledger for backups and spreadsheets.
//!
//! JSON is the lossless backup format: [to_json] output round-trips through
//! [sanitize_json](crate::import::sanitize_json) and
//! [bulk_import](crate::stores::LedgerStore::bulk_import) without changing a
//! single record. CSV is for spreadsheets and is export-only.

use crate::{Error, models::Transaction};

const CSV_HEADER: &str = "id,user,type,category,amount,note,createdAt";

/// Serialize `transactions` as a pretty-printed JSON array, suitable for
/// re-import.
///
/// # Errors
/// This function will return an [Error::JsonSerializationError] if
/// serialization fails.
pub fn to_json(transactions: &[Transaction]) -> Result<String, Error> {
    serde_json::to_string_pretty(transactions)
        .map_err(|error| Error::JsonSerializationError(error.to_string()))
}

/// Serialize `transactions` as CSV with a header row.
///
/// The header is written plain so consumers can match it literally; every
/// data field is quoted so that notes containing commas or newlines survive
/// naive spreadsheet tooling.
///
/// # Errors
/// This function will return an [Error::CsvError] if a record fails to encode.
pub fn to_csv(transactions: &[Transaction]) -> Result<String, Error> {
    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .quote_style(csv::QuoteStyle::Always)
        .from_writer(vec![]);

    for transaction in transactions {
        writer
            .serialize(transaction)
            .map_err(|error| Error::CsvError(error.to_string()))?;
    }

    let bytes = writer
        .into_inner()
        .map_err(|error| Error::CsvError(error.to_string()))?;

    let rows = String::from_utf8(bytes).map_err(|error| Error::CsvError(error.to_string()))?;

    Ok(format!("{CSV_HEADER}\n{rows}"))
}

#[cfg(test)]
mod export_tests {
    use crate::models::{Transaction, TransactionKind};

    use super::{to_csv, to_json};

    fn sample_transactions() -> Vec<Transaction> {
        vec![
            Transaction {
                id: "id-1".to_owned(),
                user: "default".to_owned(),
                kind: TransactionKind::Income,
                category: "Salary".to_owned(),
                amount: 1000.0,
                note: String::new(),
                created_at: "2024-08-01T09:00:00Z".to_owned(),
            },
            Transaction {
                id: "id-2".to_owned(),
                user: "default".to_owned(),
                kind: TransactionKind::Expense,
                category: "Food".to_owned(),
                amount: 12.5,
                note: "lunch, with friends".to_owned(),
                created_at: "2024-08-07T12:00:00+07:00".to_owned(),
            },
        ]
    }

    #[test]
    fn to_json_uses_wire_field_names() {
        let json = to_json(&sample_transactions()).unwrap();
        let values: Vec<serde_json::Value> = serde_json::from_str(&json).unwrap();

        assert_eq!(values.len(), 2);
        assert_eq!(values[0]["type"], "income");
        assert_eq!(values[0]["createdAt"], "2024-08-01T09:00:00Z");
        assert_eq!(values[1]["note"], "lunch, with friends");
    }

    #[test]
    fn to_json_of_empty_ledger_is_an_empty_array() {
        assert_eq!(to_json(&[]).unwrap(), "[]");
    }

    #[test]
    fn to_csv_of_empty_ledger_is_the_header_only() {
        assert_eq!(
            to_csv(&[]).unwrap(),
            "id,user,type,category,amount,note,createdAt\n"
        );
    }

    #[test]
    fn to_csv_writes_plain_header_and_quotes_every_data_field() {
        let csv = to_csv(&sample_transactions()).unwrap();
        let mut lines = csv.lines();

        assert_eq!(
            lines.next(),
            Some("id,user,type,category,amount,note,createdAt")
        );
        assert_eq!(
            lines.next(),
            Some("\"id-1\",\"default\",\"income\",\"Salary\",\"1000.0\",\"\",\"2024-08-01T09:00:00Z\"")
        );
        assert_eq!(
            lines.next(),
            Some(
                "\"id-2\",\"default\",\"expense\",\"Food\",\"12.5\",\"lunch, with friends\",\"2024-08-07T12:00:00+07:00\""
            )
        );
        assert_eq!(lines.next(), None);
    }

    #[test]
    fn export_import_round_trip_preserves_records() {
        let transactions = sample_transactions();

        let json = to_json(&transactions).unwrap();
        let import = crate::import::sanitize_json(&json).unwrap();

        assert!(import.rejected.is_empty());
        assert_eq!(import.accepted, transactions);
    }

    #[test]
    fn export_import_round_trip_through_a_store() {
        use std::sync::{Arc, Mutex};

        use rusqlite::Connection;

        use crate::{
            db::initialize,
            stores::{LedgerStore, sqlite::SQLiteLedgerStore},
        };

        let conn = Connection::open_in_memory().unwrap();
        initialize(&conn).unwrap();
        let mut store = SQLiteLedgerStore::new(Arc::new(Mutex::new(conn)));

        let json = to_json(&sample_transactions()).unwrap();
        let import = crate::import::sanitize_json(&json).unwrap();
        store.bulk_import(&import.accepted).unwrap();

        let mut got = store.get_all().unwrap();
        let mut want = sample_transactions();
        got.sort_by(|a, b| a.id.cmp(&b.id));
        want.sort_by(|a, b| a.id.cmp(&b.id));

        assert_eq!(got, want);
    }
}
