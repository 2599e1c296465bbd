//! Rounding instants onto a minute grid.

use metron_core::{Error, Instant, Result};

const MS_PER_MINUTE: i64 = 60_000;

/// ## Summary
/// Rounds an instant to the nearest multiple of `minutes` on the minute
/// grid, half-up (ties round up). Seconds and milliseconds participate in
/// the fraction, so `00:00:50` at granularity 1 rounds to `00:01:00` and
/// `00:03:10` at granularity 5 rounds to `00:05:00`. The result always has
/// `:00.000` seconds.
///
/// ## Errors
/// Returns `Error::InvalidArgument` if `minutes` is not positive or the
/// rounded instant leaves the representable range.
pub fn round_date(instant: &Instant, minutes: i64) -> Result<Instant> {
    if minutes <= 0 {
        return Err(Error::InvalidArgument(format!(
            "rounding granularity must be positive, got {minutes}"
        )));
    }

    let overflow =
        || Error::InvalidArgument(format!("cannot round {instant} to {minutes} minutes"));

    let step = minutes.checked_mul(MS_PER_MINUTE).ok_or_else(overflow)?;
    let millis = instant.timestamp_millis();
    let rounded = millis
        .checked_add(step / 2)
        .ok_or_else(overflow)?
        .div_euclid(step)
        .checked_mul(step)
        .ok_or_else(overflow)?;

    Instant::from_timestamp_millis(rounded).ok_or_else(overflow)
}

/// Rounds an instant to the nearest whole minute (granularity 1).
///
/// ## Errors
/// Returns `Error::InvalidArgument` if the rounded instant leaves the
/// representable range.
pub fn round_to_minute(instant: &Instant) -> Result<Instant> {
    round_date(instant, 1)
}
