//! Recurring-date computation engine.
//!
//! Given a five-field cron pattern, a UTC date range, and an optional IANA
//! timezone, enumerates every UTC instant whose local wall-clock time
//! matches the pattern, with DST gaps and folds handled by always working
//! from the UTC instant forward. A secondary layer turns matched instants
//! into fixed-duration periods, and an interval intersection check filters
//! conflicting periods.
//!
//! Every operation is a pure, synchronous transformation over immutable
//! inputs; nothing here performs I/O or holds state between calls.

pub mod cron;
pub mod duration;
pub mod period;
pub mod recur;
pub mod round;
pub mod timezone;

pub use metron_core::{Duration, Error, Instant, Period, Result};

pub use cron::{CivilTime, CronPattern};
pub use duration::compute_date;
pub use period::is_intersection;
pub use recur::{DateWindow, PeriodWindow, compute_recurring_dates, compute_recurring_periods};
pub use round::{round_date, round_to_minute};
pub use timezone::{is_valid_timezone, resolve_timezone};

#[cfg(test)]
mod tests;
