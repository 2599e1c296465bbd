//! Instants and periods.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::{Error, Result};

/// A UTC point in time with millisecond precision.
///
/// The boundary form is an ISO-8601 string with exactly three fractional
/// digits and a literal `Z` suffix, e.g. `2018-01-01T00:00:00.000Z`. Parsing
/// accepts any RFC 3339 offset and normalizes to UTC; sub-millisecond
/// precision is truncated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Instant(DateTime<Utc>);

impl Instant {
    /// Creates an instant from a UTC datetime, truncated to milliseconds.
    #[must_use]
    pub fn from_utc(datetime: DateTime<Utc>) -> Self {
        // from_timestamp_millis only fails outside the representable range,
        // which a valid DateTime is already inside.
        DateTime::from_timestamp_millis(datetime.timestamp_millis())
            .map_or(Self(datetime), Self)
    }

    /// Creates an instant from a count of milliseconds since the epoch.
    ///
    /// Returns `None` if the count is outside the representable range.
    #[must_use]
    pub fn from_timestamp_millis(millis: i64) -> Option<Self> {
        DateTime::from_timestamp_millis(millis).map(Self)
    }

    /// Milliseconds since the Unix epoch.
    #[must_use]
    pub fn timestamp_millis(&self) -> i64 {
        self.0.timestamp_millis()
    }

    /// The underlying UTC datetime.
    #[must_use]
    pub fn as_utc(&self) -> DateTime<Utc> {
        self.0
    }
}

impl fmt::Display for Instant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0.to_rfc3339_opts(SecondsFormat::Millis, true))
    }
}

impl FromStr for Instant {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let parsed = DateTime::parse_from_rfc3339(s)
            .map_err(|_e| Error::InvalidArgument(format!("invalid instant: {s}")))?;
        Ok(Self::from_utc(parsed.with_timezone(&Utc)))
    }
}

impl From<DateTime<Utc>> for Instant {
    fn from(datetime: DateTime<Utc>) -> Self {
        Self::from_utc(datetime)
    }
}

impl Serialize for Instant {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Instant {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

/// A half-open interval of time, `[start, end)`.
///
/// The `start < end` invariant holds for every `Period` in existence:
/// construction goes through [`Period::new`], including deserialization.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "PeriodRepr")]
pub struct Period {
    #[serde(rename = "startDate")]
    start: Instant,
    #[serde(rename = "endDate")]
    end: Instant,
}

impl Period {
    /// ## Summary
    /// Creates a period, enforcing the `start < end` invariant.
    ///
    /// ## Errors
    /// Returns `Error::InvalidArgument` if `end` is not after `start`.
    pub fn new(start: Instant, end: Instant) -> Result<Self> {
        if end <= start {
            return Err(Error::InvalidArgument(format!(
                "period end {end} must be after start {start}"
            )));
        }
        Ok(Self { start, end })
    }

    /// Inclusive start of the period.
    #[must_use]
    pub fn start(&self) -> Instant {
        self.start
    }

    /// Exclusive end of the period.
    #[must_use]
    pub fn end(&self) -> Instant {
        self.end
    }
}

/// Boundary form of a period; validated into [`Period`] on deserialize.
#[derive(Deserialize)]
struct PeriodRepr {
    #[serde(rename = "startDate")]
    start: Instant,
    #[serde(rename = "endDate")]
    end: Instant,
}

impl TryFrom<PeriodRepr> for Period {
    type Error = Error;

    fn try_from(repr: PeriodRepr) -> Result<Self> {
        Self::new(repr.start, repr.end)
    }
}

impl fmt::Display for Period {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {})", self.start, self.end)
    }
}
