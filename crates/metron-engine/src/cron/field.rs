//! Cron field expansion.
//!
//! Each field is expanded once, at parse time, into either a wildcard or an
//! explicit sorted set of allowed values. The wildcard is kept distinct from
//! a full explicit set so the day-of-month/day-of-week OR rule can tell an
//! unrestricted field apart from a restricted one.

use metron_core::{Error, Result};

/// Which of the five cron fields is being parsed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    /// Minute of hour, 0–59.
    Minute,
    /// Hour of day, 0–23.
    Hour,
    /// Day of month, 1–31.
    DayOfMonth,
    /// Month of year, 1–12.
    Month,
    /// Day of week, 0–7 with both 0 and 7 meaning Sunday.
    DayOfWeek,
}

impl FieldKind {
    const fn bounds(self) -> (u32, u32) {
        match self {
            Self::Minute => (0, 59),
            Self::Hour => (0, 23),
            Self::DayOfMonth => (1, 31),
            Self::Month => (1, 12),
            Self::DayOfWeek => (0, 7),
        }
    }

    const fn name(self) -> &'static str {
        match self {
            Self::Minute => "minute",
            Self::Hour => "hour",
            Self::DayOfMonth => "day-of-month",
            Self::Month => "month",
            Self::DayOfWeek => "day-of-week",
        }
    }
}

/// A single cron field, expanded to the set of values it allows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CronField {
    /// `*` — every value is allowed.
    Wildcard,
    /// Explicit sorted set of allowed values.
    Set(Vec<u32>),
}

impl CronField {
    /// ## Summary
    /// Parses one field: a comma list of `*`, literals, and `a-b` ranges.
    ///
    /// A `*` anywhere in the list makes the whole field a wildcard.
    /// Day-of-week 7 is normalized to 0 (Sunday).
    ///
    /// ## Errors
    /// Returns `Error::InvalidCronPattern` for empty parts, non-numeric
    /// values, out-of-range values, or inverted ranges.
    pub fn parse(text: &str, kind: FieldKind) -> Result<Self> {
        if text == "*" {
            return Ok(Self::Wildcard);
        }

        let mut values = Vec::new();
        for part in text.split(',') {
            if part == "*" {
                return Ok(Self::Wildcard);
            }
            if let Some((lo, hi)) = part.split_once('-') {
                let lo = parse_value(lo, kind)?;
                let hi = parse_value(hi, kind)?;
                if lo > hi {
                    return Err(Error::InvalidCronPattern(format!(
                        "inverted {} range: {part}",
                        kind.name()
                    )));
                }
                values.extend(lo..=hi);
            } else {
                values.push(parse_value(part, kind)?);
            }
        }

        if kind == FieldKind::DayOfWeek {
            for value in &mut values {
                if *value == 7 {
                    *value = 0;
                }
            }
        }

        values.sort_unstable();
        values.dedup();
        Ok(Self::Set(values))
    }

    /// True if `value` is in this field's allowed set.
    #[must_use]
    pub fn contains(&self, value: u32) -> bool {
        match self {
            Self::Wildcard => true,
            Self::Set(values) => values.binary_search(&value).is_ok(),
        }
    }

    /// True if this field is `*` (unrestricted).
    #[must_use]
    pub fn is_wildcard(&self) -> bool {
        matches!(self, Self::Wildcard)
    }
}

fn parse_value(text: &str, kind: FieldKind) -> Result<u32> {
    let value: u32 = text.parse().map_err(|_e| {
        Error::InvalidCronPattern(format!("invalid {} value: {text:?}", kind.name()))
    })?;
    let (lo, hi) = kind.bounds();
    if value < lo || value > hi {
        return Err(Error::InvalidCronPattern(format!(
            "{} value {value} out of range {lo}-{hi}",
            kind.name()
        )));
    }
    Ok(value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wildcard_contains_everything() {
        let field = CronField::parse("*", FieldKind::Minute).expect("valid field");
        assert!(field.is_wildcard());
        assert!(field.contains(0));
        assert!(field.contains(59));
    }

    #[test]
    fn test_literal_and_list() {
        let field = CronField::parse("4,6", FieldKind::Hour).expect("valid field");
        assert!(field.contains(4));
        assert!(field.contains(6));
        assert!(!field.contains(5));
        assert!(!field.is_wildcard());
    }

    #[test]
    fn test_range_expansion() {
        let field = CronField::parse("0-5", FieldKind::Minute).expect("valid field");
        for value in 0..=5 {
            assert!(field.contains(value));
        }
        assert!(!field.contains(6));
    }

    #[test]
    fn test_mixed_list_and_range() {
        let field = CronField::parse("1,3-5,9", FieldKind::Hour).expect("valid field");
        assert!(field.contains(1));
        assert!(field.contains(4));
        assert!(field.contains(9));
        assert!(!field.contains(2));
    }

    #[test]
    fn test_out_of_range_rejected() {
        assert!(CronField::parse("60", FieldKind::Minute).is_err());
        assert!(CronField::parse("24", FieldKind::Hour).is_err());
        assert!(CronField::parse("0", FieldKind::DayOfMonth).is_err());
        assert!(CronField::parse("13", FieldKind::Month).is_err());
        assert!(CronField::parse("8", FieldKind::DayOfWeek).is_err());
    }

    #[test]
    fn test_inverted_range_rejected() {
        assert!(CronField::parse("5-2", FieldKind::Minute).is_err());
    }

    #[test]
    fn test_non_numeric_rejected() {
        assert!(CronField::parse("mon", FieldKind::DayOfWeek).is_err());
        assert!(CronField::parse("", FieldKind::Minute).is_err());
        assert!(CronField::parse("1,", FieldKind::Minute).is_err());
    }

    #[test]
    fn test_day_of_week_seven_is_sunday() {
        let field = CronField::parse("7", FieldKind::DayOfWeek).expect("valid field");
        assert!(field.contains(0));
        assert!(!field.contains(7));
    }

    #[test]
    fn test_star_inside_list_widens_field() {
        let field = CronField::parse("5,*", FieldKind::Minute).expect("valid field");
        assert!(field.is_wildcard());
    }
}
