//! Five-field cron pattern parsing and civil-time matching.

mod field;

pub use field::{CronField, FieldKind};

use chrono::{DateTime, Datelike, TimeZone, Timelike};
use tracing::debug;

use metron_core::{Error, Result};

/// A civil (wall-clock) date-time decomposed into the fields cron tests,
/// in some timezone's local calendar.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CivilTime {
    /// Minute of hour, 0–59.
    pub minute: u32,
    /// Hour of day, 0–23.
    pub hour: u32,
    /// Day of month, 1–31.
    pub day_of_month: u32,
    /// Month of year, 1–12.
    pub month: u32,
    /// Day of week, 0 = Sunday through 6 = Saturday.
    pub day_of_week: u32,
}

impl CivilTime {
    /// Decomposes a zoned datetime into its local calendar fields.
    #[must_use]
    pub fn from_local<Tz: TimeZone>(local: &DateTime<Tz>) -> Self {
        Self {
            minute: local.minute(),
            hour: local.hour(),
            day_of_month: local.day(),
            month: local.month(),
            day_of_week: local.weekday().num_days_from_sunday(),
        }
    }
}

/// A parsed five-field cron pattern: minute, hour, day-of-month, month,
/// day-of-week.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CronPattern {
    minute: CronField,
    hour: CronField,
    day_of_month: CronField,
    month: CronField,
    day_of_week: CronField,
}

impl CronPattern {
    /// ## Summary
    /// Parses a pattern such as `"0-5 4,6 * * 1,5"`.
    ///
    /// ## Errors
    /// Returns `Error::InvalidCronPattern` unless the pattern has exactly
    /// five whitespace-separated fields, each a valid comma list of `*`,
    /// literals, and ranges within that field's bounds.
    pub fn parse(pattern: &str) -> Result<Self> {
        let fields: Vec<&str> = pattern.split_whitespace().collect();
        let [minute, hour, day_of_month, month, day_of_week] = fields.as_slice() else {
            return Err(Error::InvalidCronPattern(format!(
                "expected 5 fields, got {}: {pattern:?}",
                fields.len()
            )));
        };

        let parsed = Self {
            minute: CronField::parse(minute, FieldKind::Minute)?,
            hour: CronField::parse(hour, FieldKind::Hour)?,
            day_of_month: CronField::parse(day_of_month, FieldKind::DayOfMonth)?,
            month: CronField::parse(month, FieldKind::Month)?,
            day_of_week: CronField::parse(day_of_week, FieldKind::DayOfWeek)?,
        };
        debug!(pattern, "parsed cron pattern");
        Ok(parsed)
    }

    /// ## Summary
    /// Tests a civil time against this pattern.
    ///
    /// Minute, hour, and month must all match. The two day fields follow
    /// standard cron semantics: when both are restricted they are OR-ed;
    /// when either is `*` it imposes no constraint of its own.
    #[must_use]
    pub fn matches(&self, civil: &CivilTime) -> bool {
        if !self.minute.contains(civil.minute)
            || !self.hour.contains(civil.hour)
            || !self.month.contains(civil.month)
        {
            return false;
        }

        let day_of_month = self.day_of_month.contains(civil.day_of_month);
        let day_of_week = self.day_of_week.contains(civil.day_of_week);
        if self.day_of_month.is_wildcard() || self.day_of_week.is_wildcard() {
            day_of_month && day_of_week
        } else {
            day_of_month || day_of_week
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn civil(y: i32, mo: u32, d: u32, h: u32, mi: u32) -> CivilTime {
        let local = Utc
            .with_ymd_and_hms(y, mo, d, h, mi, 0)
            .single()
            .expect("valid datetime");
        CivilTime::from_local(&local)
    }

    #[test]
    fn test_parse_rejects_wrong_field_count() {
        assert!(CronPattern::parse("* * * *").is_err());
        assert!(CronPattern::parse("* * * * * *").is_err());
        assert!(CronPattern::parse("").is_err());
    }

    #[test]
    fn test_parse_rejects_out_of_range_fields() {
        assert!(CronPattern::parse("60 * * * *").is_err());
        assert!(CronPattern::parse("* * * 13 *").is_err());
    }

    #[test]
    fn test_every_minute_matches_anything() {
        let pattern = CronPattern::parse("* * * * *").expect("valid pattern");
        assert!(pattern.matches(&civil(2018, 1, 1, 0, 0)));
        assert!(pattern.matches(&civil(2018, 12, 31, 23, 59)));
    }

    #[test]
    fn test_daily_midnight() {
        let pattern = CronPattern::parse("0 0 * * *").expect("valid pattern");
        assert!(pattern.matches(&civil(2018, 1, 1, 0, 0)));
        assert!(!pattern.matches(&civil(2018, 1, 1, 0, 1)));
        assert!(!pattern.matches(&civil(2018, 1, 1, 1, 0)));
    }

    #[test]
    fn test_weekday_restriction() {
        // 2018-01-01 was a Monday.
        let pattern = CronPattern::parse("0 0 * * 1").expect("valid pattern");
        assert!(pattern.matches(&civil(2018, 1, 1, 0, 0)));
        assert!(!pattern.matches(&civil(2018, 1, 2, 0, 0)));
    }

    #[test]
    fn test_day_fields_or_when_both_restricted() {
        // Day-of-month 15 OR Monday.
        let pattern = CronPattern::parse("0 0 15 * 1").expect("valid pattern");
        assert!(pattern.matches(&civil(2018, 1, 15, 0, 0))); // the 15th (also a Monday)
        assert!(pattern.matches(&civil(2018, 1, 8, 0, 0))); // a Monday, not the 15th
        assert!(pattern.matches(&civil(2018, 2, 15, 0, 0))); // the 15th, a Thursday
        assert!(!pattern.matches(&civil(2018, 1, 9, 0, 0))); // neither
    }

    #[test]
    fn test_day_fields_and_when_one_is_wildcard() {
        // Day-of-week restricted, day-of-month free: only the weekday binds.
        let pattern = CronPattern::parse("0 0 * * 1").expect("valid pattern");
        assert!(pattern.matches(&civil(2018, 1, 15, 0, 0))); // a Monday
        assert!(!pattern.matches(&civil(2018, 1, 16, 0, 0))); // a Tuesday
        // Day-of-month restricted, day-of-week free.
        let pattern = CronPattern::parse("0 0 15 * *").expect("valid pattern");
        assert!(pattern.matches(&civil(2018, 1, 15, 0, 0)));
        assert!(!pattern.matches(&civil(2018, 1, 8, 0, 0)));
    }

    #[test]
    fn test_minute_block_pattern() {
        let pattern = CronPattern::parse("0-5 4,6 * * 1,5").expect("valid pattern");
        assert!(pattern.matches(&civil(2018, 1, 1, 4, 0)));
        assert!(pattern.matches(&civil(2018, 1, 1, 6, 5)));
        assert!(!pattern.matches(&civil(2018, 1, 1, 5, 0)));
        assert!(!pattern.matches(&civil(2018, 1, 1, 4, 6)));
        assert!(!pattern.matches(&civil(2018, 1, 2, 4, 0))); // Tuesday
    }
}
