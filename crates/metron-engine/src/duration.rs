//! Calendar-aware duration arithmetic over instants.

use metron_core::{Duration, Error, Instant, Result};

/// ## Summary
/// Adds `duration` to `instant`. Calendar units (years, months, weeks,
/// days) move through the civil calendar — month addition clamps the
/// day-of-month to the target month's length — while hours and below are
/// fixed millisecond offsets.
///
/// The string and map duration forms are interchangeable here:
/// `compute_date(t, "2d")` and `compute_date(t, {d: 2})` agree once parsed.
///
/// ## Errors
/// Returns `Error::InvalidArgument` if the result falls outside the
/// representable datetime range.
pub fn compute_date(instant: &Instant, duration: &Duration) -> Result<Instant> {
    duration
        .add_to(instant.as_utc())
        .map(Instant::from_utc)
        .ok_or_else(|| {
            Error::InvalidArgument(format!(
                "duration {duration:?} applied to {instant} overflows the datetime range"
            ))
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;

    fn instant(s: &str) -> Instant {
        s.parse().expect("valid instant")
    }

    #[test]
    fn test_day_addition() {
        let duration = "2d".parse().expect("valid duration");
        let end = compute_date(&instant("2018-01-01T00:00:00.000Z"), &duration).expect("adds");
        assert_eq!(end, instant("2018-01-03T00:00:00.000Z"));
    }

    #[test]
    fn test_string_and_map_forms_agree() {
        let start = instant("2018-01-01T06:30:00.000Z");
        let compact: Duration = "2d".parse().expect("valid duration");
        let mut map = BTreeMap::new();
        map.insert("d".to_string(), 2);
        let mapped = Duration::from_map(&map).expect("valid duration");
        assert_eq!(
            compute_date(&start, &compact).expect("adds"),
            compute_date(&start, &mapped).expect("adds"),
        );
    }

    #[test]
    fn test_month_addition_is_calendar_aware() {
        let duration = "1M".parse().expect("valid duration");
        let end = compute_date(&instant("2018-01-31T12:00:00.000Z"), &duration).expect("adds");
        assert_eq!(end, instant("2018-02-28T12:00:00.000Z"));
    }

    #[test]
    fn test_fixed_units_are_exact() {
        let duration = "15m".parse().expect("valid duration");
        let end = compute_date(&instant("2018-01-01T00:00:00.000Z"), &duration).expect("adds");
        assert_eq!(end, instant("2018-01-01T00:15:00.000Z"));

        let duration = "500ms".parse().expect("valid duration");
        let end = compute_date(&instant("2018-01-01T00:00:00.000Z"), &duration).expect("adds");
        assert_eq!(end, instant("2018-01-01T00:00:00.500Z"));
    }

    #[test]
    fn test_overflow_is_an_error() {
        let duration = "262142y".parse().expect("valid duration");
        let result = compute_date(&instant("2018-01-01T00:00:00.000Z"), &duration);
        assert!(matches!(result, Err(Error::InvalidArgument(_))));
    }
}
