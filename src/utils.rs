use crate::error::{InvoiceTrackerError, Result};
use chrono::{DateTime, Datelike, Duration, Months, NaiveDate, NaiveDateTime, NaiveTime};

pub fn start_of_day(date: NaiveDate) -> NaiveDateTime {
    date.and_time(NaiveTime::MIN)
}

/// Last representable instant of the given day.
pub fn end_of_day(date: NaiveDate) -> NaiveDateTime {
    start_of_day(date) + Duration::days(1) - Duration::nanoseconds(1)
}

/// Steps back whole calendar months, clamping to the end of shorter months
/// (Mar 31 minus one month is Feb 28/29).
pub fn subtract_months(at: NaiveDateTime, months: u32) -> NaiveDateTime {
    at.checked_sub_months(Months::new(months))
        .unwrap_or(NaiveDateTime::MIN)
}

pub fn month_start(date: NaiveDate) -> NaiveDate {
    date.with_day(1).unwrap_or(date)
}

pub fn next_month_start(date: NaiveDate) -> NaiveDate {
    month_start(date)
        .checked_add_months(Months::new(1))
        .unwrap_or(NaiveDate::MAX)
}

pub fn months_between(start: NaiveDate, end: NaiveDate) -> i32 {
    let year_diff = end.year() - start.year();
    let month_diff = end.month() as i32 - start.month() as i32;
    year_diff * 12 + month_diff
}

/// First day of every calendar month touched by `[start, end]`.
pub fn get_month_starts_in_period(start: NaiveDate, end: NaiveDate) -> Vec<NaiveDate> {
    let mut dates = Vec::new();

    let mut current = month_start(start);
    while current <= end {
        dates.push(current);
        current = next_month_start(current);
    }

    dates
}

/// Every seventh day from `start` while still inside `[start, end]`.
pub fn get_week_starts_in_period(start: NaiveDate, end: NaiveDate) -> Vec<NaiveDate> {
    let mut dates = Vec::new();

    let mut current = start;
    while current <= end {
        dates.push(current);
        current = match current.checked_add_signed(Duration::days(7)) {
            Some(next) => next,
            None => break,
        };
    }

    dates
}

pub fn round_to_cents(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

pub fn parse_date(raw: &str) -> Result<NaiveDate> {
    let text = raw.trim();
    if let Ok(date) = NaiveDate::parse_from_str(text, "%Y-%m-%d") {
        return Ok(date);
    }
    parse_date_time(text).map(|dt| dt.date())
}

/// Parses "YYYY-MM-DD", "YYYY-MM-DDTHH:MM:SS" (optionally with fractional seconds),
/// "YYYY-MM-DD HH:MM:SS" or an RFC 3339 timestamp. Offsets are converted to UTC.
pub fn parse_date_time(raw: &str) -> Result<NaiveDateTime> {
    let text = raw.trim();

    if let Ok(dt) = DateTime::parse_from_rfc3339(text) {
        return Ok(dt.naive_utc());
    }

    for format in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"] {
        if let Ok(dt) = NaiveDateTime::parse_from_str(text, format) {
            return Ok(dt);
        }
    }

    NaiveDate::parse_from_str(text, "%Y-%m-%d")
        .map(start_of_day)
        .map_err(|_| {
            InvoiceTrackerError::DateError(format!(
                "Invalid date format: {}. Expected YYYY-MM-DD or an ISO 8601 timestamp",
                raw
            ))
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_subtract_months_clamps_to_month_end() {
        let at = ymd(2026, 3, 31).and_hms_opt(12, 0, 0).unwrap();
        assert_eq!(
            subtract_months(at, 1),
            ymd(2026, 2, 28).and_hms_opt(12, 0, 0).unwrap()
        );
        assert_eq!(
            subtract_months(at, 12),
            ymd(2025, 3, 31).and_hms_opt(12, 0, 0).unwrap()
        );
    }

    #[test]
    fn test_end_of_day() {
        let end = end_of_day(ymd(2026, 10, 18));
        assert_eq!(end.date(), ymd(2026, 10, 18));
        assert!(end < start_of_day(ymd(2026, 10, 19)));
    }

    #[test]
    fn test_month_starts_in_period() {
        let months = get_month_starts_in_period(ymd(2025, 11, 15), ymd(2026, 2, 3));
        assert_eq!(
            months,
            vec![
                ymd(2025, 11, 1),
                ymd(2025, 12, 1),
                ymd(2026, 1, 1),
                ymd(2026, 2, 1)
            ]
        );
        assert_eq!(months_between(ymd(2025, 11, 15), ymd(2026, 2, 3)), 3);
    }

    #[test]
    fn test_week_starts_in_period() {
        let weeks = get_week_starts_in_period(ymd(2026, 9, 18), ymd(2026, 10, 18));
        assert_eq!(weeks.len(), 5);
        assert_eq!(weeks[0], ymd(2026, 9, 18));
        assert_eq!(weeks[4], ymd(2026, 10, 16));
    }

    #[test]
    fn test_parse_date_time_formats() {
        let expected = ymd(2026, 10, 1).and_hms_opt(9, 30, 0).unwrap();
        assert_eq!(parse_date_time("2026-10-01T09:30:00").unwrap(), expected);
        assert_eq!(parse_date_time("2026-10-01 09:30:00").unwrap(), expected);
        assert_eq!(parse_date_time("2026-10-01T11:30:00+02:00").unwrap(), expected);
        assert_eq!(
            parse_date_time("2026-10-01").unwrap(),
            ymd(2026, 10, 1).and_hms_opt(0, 0, 0).unwrap()
        );
        assert!(matches!(
            parse_date_time("01/10/2026"),
            Err(InvoiceTrackerError::DateError(_))
        ));
        assert_eq!(parse_date("2026-10-01T09:30:00Z").unwrap(), ymd(2026, 10, 1));
    }

    #[test]
    fn test_round_to_cents() {
        assert_eq!(round_to_cents(10.456), 10.46);
        assert_eq!(round_to_cents(2500.0), 2500.0);
    }
}
