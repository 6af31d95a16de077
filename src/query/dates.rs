//! Date parsing and date-derived fields.

use chrono::{Datelike, Local, NaiveDate};

use crate::errors::AppError;

/// Parse an ISO-8601 date or date-time string down to its calendar date.
///
/// Only the literal `YYYY-MM-DD` component is used; no timezone conversion is
/// performed. Blank strings are treated as absent.
pub fn parse_iso_date(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    let date_part = raw.get(..10)?;
    match raw.as_bytes().get(10) {
        None | Some(b'T') | Some(b't') | Some(b' ') => {}
        Some(_) => return None,
    }
    NaiveDate::parse_from_str(date_part, "%Y-%m-%d").ok()
}

/// The literal `YYYY-MM` prefix of a date string.
pub fn month_key(raw: &str) -> Option<&str> {
    let raw = raw.trim();
    let bytes = raw.as_bytes();
    let well_formed = bytes.len() >= 7
        && bytes[..4].iter().all(u8::is_ascii_digit)
        && bytes[4] == b'-'
        && bytes[5..7].iter().all(u8::is_ascii_digit)
        && bytes.get(7).is_none_or(|b| *b == b'-');
    well_formed.then(|| &raw[..7])
}

/// Whole years between `birth` and `today`.
///
/// Birth dates after `today` are not rejected here; callers validate that.
pub fn compute_age(birth: NaiveDate, today: NaiveDate) -> i32 {
    let mut age = today.year() - birth.year();
    if (today.month(), today.day()) < (birth.month(), birth.day()) {
        age -= 1;
    }
    age
}

/// [`compute_age`] over ISO strings. `now` defaults to the local calendar date.
pub fn compute_age_iso(birth: &str, now: Option<&str>) -> Result<i32, AppError> {
    let birth_date = parse_iso_date(birth)
        .ok_or_else(|| AppError::InvalidInput(format!("Invalid birth date: {:?}", birth)))?;
    let today = match now {
        Some(raw) => parse_iso_date(raw)
            .ok_or_else(|| AppError::InvalidInput(format!("Invalid current date: {:?}", raw)))?,
        None => Local::now().date_naive(),
    };
    Ok(compute_age(birth_date, today))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_age_boundary_at_birthday() {
        assert_eq!(compute_age_iso("2000-06-15", Some("2024-06-14")).unwrap(), 23);
        assert_eq!(compute_age_iso("2000-06-15", Some("2024-06-15")).unwrap(), 24);
        assert_eq!(compute_age_iso("2000-06-15", Some("2024-06-16")).unwrap(), 24);
    }

    #[test]
    fn test_age_compares_month_before_day() {
        // Later day in an earlier month must not count as past the birthday.
        assert_eq!(compute_age_iso("1990-12-01", Some("2024-11-30")).unwrap(), 33);
        assert_eq!(compute_age_iso("1990-01-31", Some("2024-02-01")).unwrap(), 34);
    }

    #[test]
    fn test_leap_day_birthday() {
        assert_eq!(compute_age_iso("2000-02-29", Some("2023-02-28")).unwrap(), 22);
        assert_eq!(compute_age_iso("2000-02-29", Some("2023-03-01")).unwrap(), 23);
    }

    #[test]
    fn test_age_accepts_date_time_strings() {
        assert_eq!(
            compute_age_iso("1985-04-20T00:00:00Z", Some("2024-04-20T08:30:00")).unwrap(),
            39
        );
    }

    #[test]
    fn test_unparsable_birth_date_is_invalid_input() {
        let err = compute_age_iso("", Some("2024-01-01")).unwrap_err();
        assert_eq!(err.error_code(), "INVALID_INPUT");
        assert!(compute_age_iso("15/06/2000", Some("2024-01-01")).is_err());
    }

    #[test]
    fn test_parse_iso_date() {
        assert!(parse_iso_date("2024-06-15").is_some());
        assert!(parse_iso_date("2024-06-15 10:00:00").is_some());
        assert!(parse_iso_date("").is_none());
        assert!(parse_iso_date("2024-06-151").is_none());
        assert!(parse_iso_date("2024-02-30").is_none());
    }

    #[test]
    fn test_month_key_is_literal_prefix() {
        assert_eq!(month_key("2024-01-31T23:30:00-05:00"), Some("2024-01"));
        assert_eq!(month_key("2024-12"), Some("2024-12"));
        assert_eq!(month_key("2024/01/31"), None);
        assert_eq!(month_key(""), None);
    }
}
