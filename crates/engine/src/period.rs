//! Calendar windows used by the budget and report engines.
//!
//! Two kinds of windows exist and must not be confused:
//!
//! - **calendar-aligned**: a whole month (budget status) or the week starting
//!   at the current Monday (weekly focus key);
//! - **rolling**: the last 7 calendar days ending today (weekly snapshot).

use chrono::{DateTime, Datelike, Duration, NaiveDate, NaiveTime, Utc};

use crate::{EngineError, ResultEngine};

/// Half-open UTC datetime range `[start, end)`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) struct Window {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

/// Validates `year`/`month` and returns the calendar month as a half-open
/// datetime range.
pub(crate) fn month_window(year: i32, month: u32) -> ResultEngine<Window> {
    if !(1..=12).contains(&month) {
        return Err(EngineError::Validation(
            "month must be between 1 and 12".to_string(),
        ));
    }
    if !(2000..=2100).contains(&year) {
        return Err(EngineError::Validation(
            "year must be between 2000 and 2100".to_string(),
        ));
    }

    let first = NaiveDate::from_ymd_opt(year, month, 1)
        .ok_or_else(|| EngineError::Validation("invalid year or month".to_string()))?;
    let (next_year, next_month) = if month == 12 {
        (year + 1, 1)
    } else {
        (year, month + 1)
    };
    let next_first = NaiveDate::from_ymd_opt(next_year, next_month, 1)
        .ok_or_else(|| EngineError::Validation("invalid year or month".to_string()))?;

    Ok(Window {
        start: first.and_time(NaiveTime::MIN).and_utc(),
        end: next_first.and_time(NaiveTime::MIN).and_utc(),
    })
}

/// Rolling 7-calendar-day window ending on `today` (both days inclusive).
///
/// Returns the inclusive date bounds together with the half-open datetime
/// range covering `[today-6 00:00, tomorrow 00:00)`.
pub(crate) fn rolling_week(today: NaiveDate) -> (NaiveDate, NaiveDate, Window) {
    let start_date = today - Duration::days(6);
    let window = Window {
        start: start_date.and_time(NaiveTime::MIN).and_utc(),
        end: (today + Duration::days(1)).and_time(NaiveTime::MIN).and_utc(),
    };
    (start_date, today, window)
}

/// The Monday of the week containing `today`. Upsert key for weekly focus.
pub(crate) fn week_monday(today: NaiveDate) -> NaiveDate {
    today - Duration::days(i64::from(today.weekday().num_days_from_monday()))
}

/// Today's date in UTC.
pub(crate) fn today_utc() -> NaiveDate {
    Utc::now().date_naive()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn month_window_covers_whole_month() {
        let window = month_window(2026, 2).unwrap();
        assert_eq!(window.start.to_rfc3339(), "2026-02-01T00:00:00+00:00");
        assert_eq!(window.end.to_rfc3339(), "2026-03-01T00:00:00+00:00");
    }

    #[test]
    fn month_window_wraps_december() {
        let window = month_window(2026, 12).unwrap();
        assert_eq!(window.end.to_rfc3339(), "2027-01-01T00:00:00+00:00");
    }

    #[test]
    fn month_window_rejects_out_of_range() {
        assert!(month_window(2026, 0).is_err());
        assert!(month_window(2026, 13).is_err());
        assert!(month_window(1999, 6).is_err());
        assert!(month_window(2101, 6).is_err());
    }

    #[test]
    fn rolling_week_spans_seven_days() {
        let today = NaiveDate::from_ymd_opt(2026, 8, 29).unwrap();
        let (start, end, window) = rolling_week(today);
        assert_eq!(start, NaiveDate::from_ymd_opt(2026, 8, 23).unwrap());
        assert_eq!(end, today);
        assert_eq!(window.start.to_rfc3339(), "2026-08-23T00:00:00+00:00");
        assert_eq!(window.end.to_rfc3339(), "2026-08-30T00:00:00+00:00");
    }

    #[test]
    fn week_monday_is_calendar_aligned() {
        // 2026-08-29 is a Saturday.
        let saturday = NaiveDate::from_ymd_opt(2026, 8, 29).unwrap();
        let monday = NaiveDate::from_ymd_opt(2026, 8, 24).unwrap();
        assert_eq!(week_monday(saturday), monday);
        assert_eq!(week_monday(monday), monday);
    }
}
