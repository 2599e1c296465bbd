//! Timezone identifier validation and resolution.

use std::str::FromStr;

use chrono_tz::Tz;
use metron_core::{Error, Result};

/// Returns true iff `name` is a recognized IANA timezone identifier.
///
/// Unknown or malformed names return false; this never errors.
#[must_use]
pub fn is_valid_timezone(name: &str) -> bool {
    Tz::from_str(name).is_ok()
}

/// ## Summary
/// Resolves an optional timezone name to a [`Tz`], defaulting to UTC when
/// absent.
///
/// ## Errors
/// Returns `Error::InvalidTimezone` if a name is given and is not a
/// recognized IANA identifier. An unknown timezone never falls back to UTC.
pub fn resolve_timezone(name: Option<&str>) -> Result<Tz> {
    match name {
        None => Ok(Tz::UTC),
        Some(name) => Tz::from_str(name).map_err(|_e| Error::InvalidTimezone(name.to_string())),
    }
}
