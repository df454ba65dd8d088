//! Date-range types and helpers for filtering the ledger.
//!
//! [is_within_range] is the single source of truth for range filtering: every
//! range-filtered view (totals, history, charts) goes through it rather than
//! reimplementing its own timestamp comparison.

use serde::Deserialize;
use time::{
    Date, Duration, Month, OffsetDateTime, PrimitiveDateTime, Time, UtcOffset,
    format_description::well_known::{Iso8601, Rfc3339},
    macros::time,
};

use crate::Error;

/// A closed interval of time used to filter the ledger.
///
/// `None` on either bound means unbounded in that direction. Both bounds are
/// inclusive when present.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DateRange {
    /// The earliest instant included in the range.
    pub from: Option<OffsetDateTime>,
    /// The latest instant included in the range.
    pub to: Option<OffsetDateTime>,
}

impl DateRange {
    /// The unbounded range that includes every parseable timestamp.
    pub const ALL: DateRange = DateRange {
        from: None,
        to: None,
    };
}

/// A named range preset, resolved to a concrete [DateRange] against a
/// caller-supplied "now".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum RangePreset {
    /// The calendar day containing "now".
    Today,
    /// Monday through Sunday of the week containing "now".
    ThisWeek,
    /// The first through last calendar day of the month containing "now".
    ThisMonth,
    /// Unbounded on both ends.
    All,
}

const END_OF_DAY: Time = time!(23:59:59.999);

/// Resolve `preset` against `now`.
///
/// Day edges are taken in `now`'s UTC offset, so passing a local "now" (see
/// [now_in](crate::timezone::now_in)) yields ranges aligned to the local
/// calendar.
pub fn resolve_preset(preset: RangePreset, now: OffsetDateTime) -> DateRange {
    let anchor = now.date();
    let offset = now.offset();

    match preset {
        RangePreset::Today => bounds_to_range(anchor, anchor, offset),
        RangePreset::ThisWeek => {
            let (monday, sunday) = week_bounds(anchor);
            bounds_to_range(monday, sunday, offset)
        }
        RangePreset::ThisMonth => {
            let (first, last) = month_bounds(anchor.year(), anchor.month());
            bounds_to_range(first, last, offset)
        }
        RangePreset::All => DateRange::ALL,
    }
}

/// Returns true iff `timestamp` parses and falls within `range` (bounds
/// inclusive).
///
/// An unparseable timestamp is never within any range, including the
/// unbounded one.
pub fn is_within_range(timestamp: &str, range: &DateRange) -> bool {
    let Ok(value) = parse_timestamp(timestamp) else {
        return false;
    };

    if let Some(from) = range.from
        && value < from
    {
        return false;
    }

    if let Some(to) = range.to
        && value > to
    {
        return false;
    }

    true
}

/// Parse an ISO-8601 timestamp string into an [OffsetDateTime].
///
/// Accepts full timestamps with a UTC offset, RFC 3339 timestamps, date-times
/// without an offset (assumed UTC) and bare calendar dates (midnight UTC), so
/// that records written with differing precision still compare correctly.
///
/// # Errors
/// Returns [Error::InvalidTimestamp] if `value` does not parse under any of
/// the accepted representations.
pub fn parse_timestamp(value: &str) -> Result<OffsetDateTime, Error> {
    if let Ok(parsed) = OffsetDateTime::parse(value, &Iso8601::DEFAULT) {
        return Ok(parsed);
    }

    if let Ok(parsed) = OffsetDateTime::parse(value, &Rfc3339) {
        return Ok(parsed);
    }

    if let Ok(parsed) = PrimitiveDateTime::parse(value, &Iso8601::DEFAULT) {
        return Ok(parsed.assume_utc());
    }

    if let Ok(parsed) = Date::parse(value, &Iso8601::DEFAULT) {
        return Ok(parsed.midnight().assume_utc());
    }

    Err(Error::InvalidTimestamp(value.to_owned()))
}

fn bounds_to_range(start: Date, end: Date, offset: UtcOffset) -> DateRange {
    DateRange {
        from: Some(start.with_time(Time::MIDNIGHT).assume_offset(offset)),
        to: Some(end.with_time(END_OF_DAY).assume_offset(offset)),
    }
}

fn week_bounds(anchor_date: Date) -> (Date, Date) {
    // number_from_monday puts Sunday at 7, i.e. the last day of the week.
    let weekday_number = anchor_date.weekday().number_from_monday() as i64;
    let monday = anchor_date - Duration::days(weekday_number - 1);
    let sunday = monday + Duration::days(6);

    (monday, sunday)
}

fn month_bounds(year: i32, month: Month) -> (Date, Date) {
    let first = Date::from_calendar_date(year, month, 1).expect("invalid month start date");
    let last = Date::from_calendar_date(year, month, last_day_of_month(year, month))
        .expect("invalid month end date");

    (first, last)
}

fn last_day_of_month(year: i32, month: Month) -> u8 {
    match month {
        Month::January
        | Month::March
        | Month::May
        | Month::July
        | Month::August
        | Month::October
        | Month::December => 31,
        Month::April | Month::June | Month::September | Month::November => 30,
        Month::February => {
            if is_leap_year(year) {
                29
            } else {
                28
            }
        }
    }
}

fn is_leap_year(year: i32) -> bool {
    (year % 4 == 0 && year % 100 != 0) || (year % 400 == 0)
}
