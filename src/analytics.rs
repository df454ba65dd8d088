//! Pure aggregation over an in-memory transaction collection.
//!
//! These functions have no side effects and touch no storage: callers load
//! the collection through the [ledger store](crate::stores::LedgerStore) and
//! hand it in. They are safe to call from any context.

use time::{Date, Duration, OffsetDateTime};

use crate::{
    models::{Transaction, TransactionKind},
    range::{DateRange, is_within_range, parse_timestamp},
};

/// The default number of daily buckets for the spending chart.
pub const DEFAULT_SPENDING_WINDOW: usize = 7;

/// Income, expense and balance totals for a date range.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct RangeTotals {
    /// Sum of income amounts.
    pub income: f64,
    /// Sum of expense amounts.
    pub expense: f64,
    /// `income - expense`.
    pub balance: f64,
}

/// The total amount spent on a single calendar day.
#[derive(Debug, Clone, PartialEq)]
pub struct DailySpending {
    /// The calendar day this bucket covers.
    pub date: Date,
    /// Sum of expense amounts on that day. Zero when nothing was spent.
    pub total_expense: f64,
}

/// Sum income and expense amounts for the transactions within `range`.
///
/// Transactions are filtered by [is_within_range] on their timestamps. The
/// fold is order-independent: permuting `transactions` does not change the
/// result. Empty or fully filtered-out input yields all-zero totals.
pub fn totals_for_range(transactions: &[Transaction], range: &DateRange) -> RangeTotals {
    let mut totals = RangeTotals::default();

    for transaction in transactions {
        if !is_within_range(&transaction.created_at, range) {
            continue;
        }

        match transaction.kind {
            TransactionKind::Income => totals.income += transaction.amount,
            TransactionKind::Expense => totals.expense += transaction.amount,
        }
    }

    totals.balance = totals.income - totals.expense;
    totals
}

/// Bucket expense amounts by calendar day over a trailing fixed-length window.
///
/// Returns exactly `window_days` buckets in chronologically ascending order.
/// The last bucket is `now`'s calendar day and the first is `window_days - 1`
/// days prior. Every bucket is present even when no transaction falls in it,
/// so the result is always a full fixed-length series for charting.
///
/// Only `expense` transactions accumulate. Calendar days are taken in `now`'s
/// UTC offset. Transactions whose timestamps fail to parse are skipped; they
/// are unusable data, not an error.
pub fn daily_spending(
    transactions: &[Transaction],
    window_days: usize,
    now: OffsetDateTime,
) -> Vec<DailySpending> {
    if window_days == 0 {
        return Vec::new();
    }

    let today = now.date();
    let start = today - Duration::days(window_days as i64 - 1);

    let mut buckets: Vec<DailySpending> = (0..window_days)
        .map(|day| DailySpending {
            date: start + Duration::days(day as i64),
            total_expense: 0.0,
        })
        .collect();

    for transaction in transactions {
        if transaction.kind != TransactionKind::Expense {
            continue;
        }

        let timestamp = match parse_timestamp(&transaction.created_at) {
            Ok(timestamp) => timestamp,
            Err(_) => {
                tracing::debug!(
                    "skipping transaction {} with unparseable timestamp \"{}\"",
                    transaction.id,
                    transaction.created_at
                );
                continue;
            }
        };

        let date = timestamp.to_offset(now.offset()).date();
        let index = (date - start).whole_days();

        if (0..window_days as i64).contains(&index) {
            buckets[index as usize].total_expense += transaction.amount;
        }
    }

    buckets
}
