//! Boundary value types for the metron recurrence engine.
//!
//! Everything here is a plain value: instants, periods, and durations are
//! created fresh per call and never mutated after construction.

pub mod duration;
pub mod error;
pub mod types;

pub use duration::Duration;
pub use error::{Error, Result};
pub use types::{Instant, Period};
