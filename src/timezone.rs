//! Resolves canonical timezone names to UTC offsets.

use time::{OffsetDateTime, UtcOffset};
use time_tz::{Offset, TimeZone};

use crate::Error;

/// Get the current UTC offset for a canonical timezone name such as
/// `"Asia/Jakarta"`.
pub fn local_offset(canonical_timezone: &str) -> Option<UtcOffset> {
    time_tz::timezones::get_by_name(canonical_timezone)
        .map(|tz| tz.get_offset_utc(&OffsetDateTime::now_utc()).to_utc())
}

/// The current time in the given timezone.
///
/// Range presets resolve against a caller-supplied "now"; this is how callers
/// obtain one aligned to the configured local calendar (see
/// [Settings::timezone](crate::settings::Settings)).
///
/// # Errors
/// Returns [Error::InvalidTimezone] if `canonical_timezone` is not a valid
/// canonical timezone name.
pub fn now_in(canonical_timezone: &str) -> Result<OffsetDateTime, Error> {
    local_offset(canonical_timezone)
        .map(|offset| OffsetDateTime::now_utc().to_offset(offset))
        .ok_or_else(|| Error::InvalidTimezone(canonical_timezone.to_owned()))
}

#[cfg(test)]
mod timezone_tests {
    use crate::Error;

    use super::{local_offset, now_in};

    #[test]
    fn local_offset_resolves_canonical_names() {
        assert!(local_offset("Asia/Jakarta").is_some());
        assert!(local_offset("Etc/UTC").is_some());
        assert!(local_offset("Not/AZone").is_none());
    }

    #[test]
    fn now_in_fails_on_invalid_timezone() {
        let result = now_in("Not/AZone");

        assert_eq!(result, Err(Error::InvalidTimezone("Not/AZone".to_owned())));
    }

    #[test]
    fn now_in_applies_the_offset() {
        let now = now_in("Etc/UTC").unwrap();

        assert!(now.offset().is_utc());
    }
}
