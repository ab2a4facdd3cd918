//! Time-zone day splitting logic.
//!
//! This module converts a UTC instant interval into an ordered sequence of
//! (local calendar day, hours-in-that-day) segments for a fixed IANA zone,
//! and provides the local-midnight helpers the driver uses to compute UTC
//! window bounds for its overlap query.

use chrono::{DateTime, Duration, LocalResult, NaiveDate, NaiveTime, TimeZone, Utc};
use chrono_tz::Tz;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A (local day, hours) slice of an event's UTC span.
///
/// # Example
///
/// ```
/// use labor_engine::calculation::DaySegment;
/// use chrono::NaiveDate;
/// use rust_decimal::Decimal;
///
/// let segment = DaySegment {
///     day: NaiveDate::from_ymd_opt(2025, 10, 7).unwrap(),
///     hours: Decimal::new(20, 1), // 2.0 hours
/// };
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DaySegment {
    /// The local calendar day this segment falls on.
    pub day: NaiveDate,
    /// The number of hours of the interval within that day.
    pub hours: Decimal,
}

/// Returns the UTC instant of local midnight starting the given day.
///
/// In zones where a clock shift lands exactly on midnight, the day starts
/// at the earliest valid local instant instead.
pub fn local_day_start_utc(day: NaiveDate, tz: Tz) -> DateTime<Utc> {
    let midnight = day.and_time(NaiveTime::MIN);
    match tz.from_local_datetime(&midnight) {
        LocalResult::Single(dt) => dt.with_timezone(&Utc),
        LocalResult::Ambiguous(earliest, _) => earliest.with_timezone(&Utc),
        LocalResult::None => tz
            .from_local_datetime(&(midnight + Duration::hours(1)))
            .earliest()
            .map(|dt| dt.with_timezone(&Utc))
            .unwrap_or_else(|| Utc.from_utc_datetime(&midnight)),
    }
}

/// Computes the UTC bounds of an inclusive local-day window.
///
/// Returns `[start 00:00 local, end+1 00:00 local)` expressed as UTC
/// instants, suitable for the driver's event overlap query.
///
/// # Example
///
/// ```
/// use labor_engine::calculation::day_window_utc;
/// use chrono::NaiveDate;
///
/// let start = NaiveDate::from_ymd_opt(2025, 10, 7).unwrap();
/// let end = NaiveDate::from_ymd_opt(2025, 10, 10).unwrap();
/// let (window_start, window_end) = day_window_utc(start, end, chrono_tz::America::New_York);
/// // Early October is UTC-4 in New York.
/// assert_eq!(window_start.to_rfc3339(), "2025-10-07T04:00:00+00:00");
/// assert_eq!(window_end.to_rfc3339(), "2025-10-11T04:00:00+00:00");
/// ```
pub fn day_window_utc(start_day: NaiveDate, end_day: NaiveDate, tz: Tz) -> (DateTime<Utc>, DateTime<Utc>) {
    (
        local_day_start_utc(start_day, tz),
        local_day_start_utc(end_day + Duration::days(1), tz),
    )
}

/// Splits a UTC interval at local midnight boundaries.
///
/// For each local calendar day intersected by `[start_utc, end_utc)`, the
/// day's midnight-to-midnight boundaries are expressed as UTC instants,
/// intersected with the interval, and emitted as a [`DaySegment`].
///
/// # Behavior
///
/// - Segments are contiguous, non-overlapping, and ordered by day ascending
/// - Segment hours sum to the interval's elapsed hours (minute precision)
/// - Zero-length overlaps are omitted
/// - A degenerate interval (`end_utc <= start_utc`) yields no segments
///
/// # Example
///
/// ```
/// use labor_engine::calculation::split_by_local_day;
/// use chrono::{TimeZone, Utc};
/// use rust_decimal::Decimal;
///
/// // 22:00 Oct 7 to 06:00 Oct 8 New York local (UTC-4).
/// let start = Utc.with_ymd_and_hms(2025, 10, 8, 2, 0, 0).unwrap();
/// let end = Utc.with_ymd_and_hms(2025, 10, 8, 10, 0, 0).unwrap();
///
/// let segments = split_by_local_day(start, end, chrono_tz::America::New_York);
/// assert_eq!(segments.len(), 2);
/// assert_eq!(segments[0].hours, Decimal::new(20, 1)); // 2.0 hours on Oct 7
/// assert_eq!(segments[1].hours, Decimal::new(60, 1)); // 6.0 hours on Oct 8
/// ```
pub fn split_by_local_day(start_utc: DateTime<Utc>, end_utc: DateTime<Utc>, tz: Tz) -> Vec<DaySegment> {
    let mut segments = Vec::new();
    if end_utc <= start_utc {
        return segments;
    }

    let mut cursor = start_utc;
    while cursor < end_utc {
        let day = cursor.with_timezone(&tz).date_naive();
        let boundary = local_day_start_utc(day + Duration::days(1), tz);

        // Boundary must advance the cursor; bail out rather than loop forever
        // on a zone database anomaly.
        if boundary <= cursor {
            break;
        }

        let segment_end = if boundary < end_utc { boundary } else { end_utc };
        let hours = hours_between(cursor, segment_end);
        if hours > Decimal::ZERO {
            segments.push(DaySegment { day, hours });
        }

        cursor = segment_end;
    }

    segments
}

/// Calculates the number of hours between two UTC instants.
fn hours_between(start: DateTime<Utc>, end: DateTime<Utc>) -> Decimal {
    let minutes = (end - start).num_minutes();
    Decimal::new(minutes, 0) / Decimal::new(60, 0)
}
