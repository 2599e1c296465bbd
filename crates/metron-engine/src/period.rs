//! Interval intersection over half-open periods.

use metron_core::Period;

/// ## Summary
/// Returns true iff `candidate` overlaps any element of `periods` with a
/// non-zero intersection.
///
/// Intervals are half-open `[start, end)`, so touching endpoints (a
/// candidate starting exactly when another period ends) do not count. The
/// whole sequence is scanned; no sort order is assumed.
#[must_use]
pub fn is_intersection(periods: &[Period], candidate: &Period) -> bool {
    periods
        .iter()
        .any(|period| candidate.start() < period.end() && candidate.end() > period.start())
}
