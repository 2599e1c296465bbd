//! Amounts of calendar and clock time.
//!
//! A duration is a mapping from unit symbol to signed count. Calendar units
//! (`y`, `M`, `w`, `d`) move through the civil calendar when applied, so
//! month addition accounts for variable month length; fixed units (`h`, `m`,
//! `s`, `ms`) are plain millisecond offsets.

use std::collections::BTreeMap;
use std::str::FromStr;

use chrono::{DateTime, Days, Months, TimeDelta, Utc};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::{Error, Result};

const MS_PER_SECOND: i64 = 1_000;
const MS_PER_MINUTE: i64 = 60 * MS_PER_SECOND;
const MS_PER_HOUR: i64 = 60 * MS_PER_MINUTE;

/// An amount of time, canonically a unit → count mapping.
///
/// Accepted unit symbols: `y`, `M`, `w`, `d`, `h`, `m`, `s`, `ms`. The
/// compact string form `"<integer><unit>"` (exactly one unit, e.g. `"2d"`,
/// `"15m"`) parses to the equivalent mapping.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Duration {
    /// Calendar years (`y`).
    pub years: i64,
    /// Calendar months (`M`).
    pub months: i64,
    /// Weeks (`w`).
    pub weeks: i64,
    /// Days (`d`).
    pub days: i64,
    /// Hours (`h`).
    pub hours: i64,
    /// Minutes (`m`).
    pub minutes: i64,
    /// Seconds (`s`).
    pub seconds: i64,
    /// Milliseconds (`ms`).
    pub millis: i64,
}

impl Duration {
    /// ## Summary
    /// Parses the compact form `"<integer><unit>"`, e.g. `"2d"` or `"15m"`.
    ///
    /// ## Errors
    /// Returns `Error::InvalidDuration` if the string is not digits followed
    /// by a known unit symbol.
    pub fn from_compact(s: &str) -> Result<Self> {
        let split = s
            .find(|c: char| !c.is_ascii_digit())
            .filter(|&at| at > 0)
            .ok_or_else(|| Error::InvalidDuration(format!("malformed duration: {s:?}")))?;

        let (count, unit) = s.split_at(split);
        if !unit.chars().all(|c| c.is_ascii_alphabetic()) {
            return Err(Error::InvalidDuration(format!("malformed duration: {s:?}")));
        }

        let count: i64 = count
            .parse()
            .map_err(|_e| Error::InvalidDuration(format!("duration count out of range: {s:?}")))?;

        let mut duration = Self::default();
        *duration.slot(unit)? = count;
        Ok(duration)
    }

    /// ## Summary
    /// Builds a duration from a unit → count mapping, e.g. `{d: 2}`.
    ///
    /// ## Errors
    /// Returns `Error::InvalidDuration` if any key is not a known unit
    /// symbol.
    pub fn from_map(map: &BTreeMap<String, i64>) -> Result<Self> {
        let mut duration = Self::default();
        for (unit, &count) in map {
            *duration.slot(unit)? = count;
        }
        Ok(duration)
    }

    fn slot(&mut self, unit: &str) -> Result<&mut i64> {
        match unit {
            "y" => Ok(&mut self.years),
            "M" => Ok(&mut self.months),
            "w" => Ok(&mut self.weeks),
            "d" => Ok(&mut self.days),
            "h" => Ok(&mut self.hours),
            "m" => Ok(&mut self.minutes),
            "s" => Ok(&mut self.seconds),
            "ms" => Ok(&mut self.millis),
            other => Err(Error::InvalidDuration(format!("unknown unit: {other:?}"))),
        }
    }

    /// True if every unit count is zero.
    #[must_use]
    pub fn is_zero(&self) -> bool {
        *self == Self::default()
    }

    /// ## Summary
    /// Applies this duration to a UTC datetime with calendar-aware
    /// arithmetic: years and months move through the civil calendar
    /// (day-of-month clamps to the target month's length), weeks and days
    /// move whole days, and the fixed units are millisecond offsets.
    ///
    /// Returns `None` if the result falls outside the representable range.
    #[must_use]
    pub fn add_to(&self, datetime: DateTime<Utc>) -> Option<DateTime<Utc>> {
        let months = self.years.checked_mul(12)?.checked_add(self.months)?;
        let datetime = shift_months(datetime, months)?;

        let days = self.weeks.checked_mul(7)?.checked_add(self.days)?;
        let datetime = shift_days(datetime, days)?;

        let fixed = self
            .hours
            .checked_mul(MS_PER_HOUR)?
            .checked_add(self.minutes.checked_mul(MS_PER_MINUTE)?)?
            .checked_add(self.seconds.checked_mul(MS_PER_SECOND)?)?
            .checked_add(self.millis)?;
        datetime.checked_add_signed(TimeDelta::milliseconds(fixed))
    }
}

fn shift_months(datetime: DateTime<Utc>, months: i64) -> Option<DateTime<Utc>> {
    let magnitude = Months::new(u32::try_from(months.unsigned_abs()).ok()?);
    if months >= 0 {
        datetime.checked_add_months(magnitude)
    } else {
        datetime.checked_sub_months(magnitude)
    }
}

fn shift_days(datetime: DateTime<Utc>, days: i64) -> Option<DateTime<Utc>> {
    let magnitude = Days::new(days.unsigned_abs());
    if days >= 0 {
        datetime.checked_add_days(magnitude)
    } else {
        datetime.checked_sub_days(magnitude)
    }
}

impl FromStr for Duration {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::from_compact(s)
    }
}

impl Serialize for Duration {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let entries = [
            ("y", self.years),
            ("M", self.months),
            ("w", self.weeks),
            ("d", self.days),
            ("h", self.hours),
            ("m", self.minutes),
            ("s", self.seconds),
            ("ms", self.millis),
        ];
        let mut map = serializer.serialize_map(None)?;
        for (unit, count) in entries {
            if count != 0 {
                map.serialize_entry(unit, &count)?;
            }
        }
        map.end()
    }
}

/// Boundary forms a duration deserializes from.
#[derive(Deserialize)]
#[serde(untagged)]
enum DurationRepr {
    Compact(String),
    Map(BTreeMap<String, i64>),
}

impl<'de> Deserialize<'de> for Duration {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let parsed = match DurationRepr::deserialize(deserializer)? {
            DurationRepr::Compact(s) => Self::from_compact(&s),
            DurationRepr::Map(map) => Self::from_map(&map),
        };
        parsed.map_err(serde::de::Error::custom)
    }
}
