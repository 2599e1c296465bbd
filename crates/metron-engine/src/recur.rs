//! Recurring-date and recurring-period enumeration.
//!
//! The scan is driven by UTC instants, one candidate per whole minute in
//! `[start, end)`. Each candidate is converted to its local civil time in
//! the requested timezone and tested against the pattern. Working from the
//! UTC instant forward makes DST handling total: a local time repeated by a
//! fold matches twice (two distinct UTC instants), and a local time skipped
//! by a gap matches never — there is no local→UTC conversion to go wrong.

use chrono::{DateTime, TimeDelta};
use serde::Deserialize;
use tracing::debug;

use metron_core::{Duration, Error, Instant, Period, Result};

use crate::cron::{CivilTime, CronPattern};
use crate::duration::compute_date;
use crate::timezone::resolve_timezone;

const MS_PER_MINUTE: i64 = 60_000;

/// The UTC range a recurrence is evaluated over. `end` is exclusive: an
/// instant exactly equal to it is not emitted. Callers wanting to include a
/// boundary instant pad `end` themselves (the conventional one-millisecond
/// pad); the engine stays strictly half-open.
#[derive(Debug, Clone, Deserialize)]
pub struct DateWindow {
    /// Inclusive start of the range.
    #[serde(rename = "startDate")]
    pub start: Instant,
    /// Exclusive end of the range.
    #[serde(rename = "endDate")]
    pub end: Instant,
    /// IANA timezone the pattern's wall-clock fields are read in.
    /// Defaults to UTC when absent.
    #[serde(default)]
    pub timezone: Option<String>,
}

/// A [`DateWindow`] plus the fixed duration of each emitted period.
#[derive(Debug, Clone, Deserialize)]
pub struct PeriodWindow {
    /// Inclusive start of the range.
    #[serde(rename = "startDate")]
    pub start: Instant,
    /// Exclusive end of the range.
    #[serde(rename = "endDate")]
    pub end: Instant,
    /// IANA timezone the pattern's wall-clock fields are read in.
    #[serde(default)]
    pub timezone: Option<String>,
    /// Length of each emitted period; compact string or unit map.
    pub duration: Duration,
}

impl PeriodWindow {
    fn date_window(&self) -> DateWindow {
        DateWindow {
            start: self.start,
            end: self.end,
            timezone: self.timezone.clone(),
        }
    }
}

/// ## Summary
/// Enumerates every UTC instant in `[window.start, window.end)` whose local
/// civil time in `window.timezone` satisfies `pattern`. The result is
/// strictly increasing and minute-aligned (`:00.000` seconds).
///
/// ## Errors
/// - `Error::InvalidCronPattern` if `pattern` is not five valid fields.
/// - `Error::InvalidTimezone` if the timezone is not a known IANA name.
/// - `Error::InvalidArgument` if `window.end` is not after `window.start`.
pub fn compute_recurring_dates(pattern: &str, window: &DateWindow) -> Result<Vec<Instant>> {
    let parsed = CronPattern::parse(pattern)?;
    let timezone = resolve_timezone(window.timezone.as_deref())?;
    if window.end <= window.start {
        return Err(Error::InvalidArgument(format!(
            "endDate {} must be after startDate {}",
            window.end, window.start
        )));
    }

    // Candidates live on the whole-minute grid; an unaligned start is
    // ceiled to the first grid point inside the range.
    let start_millis = window.start.timestamp_millis();
    let mut cursor_millis = start_millis.div_euclid(MS_PER_MINUTE) * MS_PER_MINUTE;
    if cursor_millis < start_millis {
        cursor_millis += MS_PER_MINUTE;
    }
    let Some(mut cursor) = DateTime::from_timestamp_millis(cursor_millis) else {
        return Err(Error::InvalidArgument(format!(
            "startDate {} is outside the supported range",
            window.start
        )));
    };

    let end = window.end.as_utc();
    let mut matches = Vec::new();
    while cursor < end {
        let civil = CivilTime::from_local(&cursor.with_timezone(&timezone));
        if parsed.matches(&civil) {
            matches.push(Instant::from_utc(cursor));
        }
        cursor = match cursor.checked_add_signed(TimeDelta::minutes(1)) {
            Some(next) => next,
            None => break,
        };
    }

    debug!(
        pattern,
        timezone = %timezone,
        count = matches.len(),
        "expanded recurring dates"
    );
    Ok(matches)
}

/// ## Summary
/// Enumerates the periods of `window.duration` starting at each instant
/// `compute_recurring_dates` yields for the same range and timezone. No
/// deduplication or overlap-merging is performed; callers filter with
/// [`crate::period::is_intersection`] when they need disjoint results.
///
/// ## Errors
/// Everything `compute_recurring_dates` raises, plus
/// `Error::InvalidArgument` when the duration does not advance time (the
/// period `start < end` invariant) or overflows the datetime range.
pub fn compute_recurring_periods(pattern: &str, window: &PeriodWindow) -> Result<Vec<Period>> {
    let starts = compute_recurring_dates(pattern, &window.date_window())?;

    let mut periods = Vec::with_capacity(starts.len());
    for start in starts {
        let end = compute_date(&start, &window.duration)?;
        periods.push(Period::new(start, end)?);
    }
    Ok(periods)
}
