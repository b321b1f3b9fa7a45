//! Departure times.
//!
//! Listings store their departing time as a time of day, written either as
//! "HH:MM" or "HH:MM:SS" depending on how the table was loaded. This module
//! accepts both and always binds the long form to SQL.

use std::fmt;

use chrono::{NaiveTime, Timelike};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Error returned when parsing an invalid time string.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid departure time: {reason}")]
pub struct TimeError {
    reason: &'static str,
}

impl TimeError {
    fn new(reason: &'static str) -> Self {
        Self { reason }
    }
}

/// A time of day at which a bus departs.
///
/// # Examples
///
/// ```
/// use bus_server::domain::DepartureTime;
///
/// let t = DepartureTime::parse("08:30").unwrap();
/// assert_eq!(t.to_string(), "08:30");
/// assert_eq!(t.to_sql(), "08:30:00");
///
/// // Seconds are accepted too
/// assert_eq!(DepartureTime::parse("08:30:00").unwrap(), t);
///
/// assert!(DepartureTime::parse("8:30").is_err());
/// assert!(DepartureTime::parse("24:00").is_err());
/// ```
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct DepartureTime(NaiveTime);

impl DepartureTime {
    /// Fallback used when a route has no known departure times.
    pub const MIDNIGHT: DepartureTime = DepartureTime(NaiveTime::MIN);

    /// Create from hour and minute. Returns `None` if out of range.
    pub fn from_hm(hour: u32, minute: u32) -> Option<Self> {
        NaiveTime::from_hms_opt(hour, minute, 0).map(Self)
    }

    /// Parse "HH:MM" or "HH:MM:SS".
    pub fn parse(s: &str) -> Result<Self, TimeError> {
        let bytes = s.as_bytes();

        if bytes.len() != 5 && bytes.len() != 8 {
            return Err(TimeError::new("expected HH:MM or HH:MM:SS format"));
        }

        if bytes[2] != b':' {
            return Err(TimeError::new("expected colon at position 2"));
        }

        let hour =
            parse_two_digits(&bytes[0..2]).ok_or_else(|| TimeError::new("invalid hour digits"))?;
        if hour > 23 {
            return Err(TimeError::new("hour must be 0-23"));
        }

        let minute = parse_two_digits(&bytes[3..5])
            .ok_or_else(|| TimeError::new("invalid minute digits"))?;
        if minute > 59 {
            return Err(TimeError::new("minute must be 0-59"));
        }

        let second = if bytes.len() == 8 {
            if bytes[5] != b':' {
                return Err(TimeError::new("expected colon at position 5"));
            }
            let second = parse_two_digits(&bytes[6..8])
                .ok_or_else(|| TimeError::new("invalid second digits"))?;
            if second > 59 {
                return Err(TimeError::new("second must be 0-59"));
            }
            second
        } else {
            0
        };

        NaiveTime::from_hms_opt(hour, minute, second)
            .map(Self)
            .ok_or_else(|| TimeError::new("invalid time"))
    }

    /// The value bound to SQL placeholders ("HH:MM:SS").
    pub fn to_sql(&self) -> String {
        self.0.format("%H:%M:%S").to_string()
    }

    pub fn hour(&self) -> u32 {
        self.0.hour()
    }

    pub fn minute(&self) -> u32 {
        self.0.minute()
    }
}

/// Parse exactly two ASCII digits.
fn parse_two_digits(bytes: &[u8]) -> Option<u32> {
    match bytes {
        [a, b] if a.is_ascii_digit() && b.is_ascii_digit() => {
            Some(u32::from(a - b'0') * 10 + u32::from(b - b'0'))
        }
        _ => None,
    }
}

impl fmt::Debug for DepartureTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "DepartureTime({})", self.to_sql())
    }
}

impl fmt::Display for DepartureTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.second() == 0 {
            write!(f, "{:02}:{:02}", self.hour(), self.minute())
        } else {
            f.write_str(&self.to_sql())
        }
    }
}

impl Serialize for DepartureTime {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for DepartureTime {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        DepartureTime::parse(&s).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_short_and_long_forms() {
        let short = DepartureTime::parse("14:05").unwrap();
        let long = DepartureTime::parse("14:05:00").unwrap();
        assert_eq!(short, long);
        assert_eq!(short.hour(), 14);
        assert_eq!(short.minute(), 5);
    }

    #[test]
    fn parse_with_seconds_keeps_them() {
        let t = DepartureTime::parse("06:15:30").unwrap();
        assert_eq!(t.to_sql(), "06:15:30");
        assert_eq!(t.to_string(), "06:15:30");
    }

    #[test]
    fn reject_bad_formats() {
        assert!(DepartureTime::parse("").is_err());
        assert!(DepartureTime::parse("1430").is_err());
        assert!(DepartureTime::parse("14-30").is_err());
        assert!(DepartureTime::parse("14:3").is_err());
        assert!(DepartureTime::parse("14:30:0").is_err());
        assert!(DepartureTime::parse("14:30-00").is_err());
        assert!(DepartureTime::parse("ab:cd").is_err());
    }

    #[test]
    fn reject_out_of_range() {
        assert!(DepartureTime::parse("24:00").is_err());
        assert!(DepartureTime::parse("23:60").is_err());
        assert!(DepartureTime::parse("23:59:60").is_err());
    }

    #[test]
    fn midnight_fallback() {
        assert_eq!(DepartureTime::MIDNIGHT.to_string(), "00:00");
        assert_eq!(DepartureTime::MIDNIGHT.to_sql(), "00:00:00");
        assert_eq!(DepartureTime::parse("00:00").unwrap(), DepartureTime::MIDNIGHT);
    }

    #[test]
    fn ordering_follows_time_of_day() {
        let early = DepartureTime::parse("07:59").unwrap();
        let late = DepartureTime::parse("08:00").unwrap();
        assert!(early < late);
        assert!(DepartureTime::MIDNIGHT < early);
    }

    #[test]
    fn serde_as_string() {
        let t = DepartureTime::parse("21:45").unwrap();
        let json = serde_json::to_string(&t).unwrap();
        assert_eq!(json, "\"21:45\"");
        let back: DepartureTime = serde_json::from_str(&json).unwrap();
        assert_eq!(back, t);

        assert!(serde_json::from_str::<DepartureTime>("\"9pm\"").is_err());
    }
}

#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        /// Any valid hour/minute parses in both forms to the same value
        #[test]
        fn both_forms_agree(h in 0u32..24, m in 0u32..60) {
            let short = format!("{h:02}:{m:02}");
            let long = format!("{h:02}:{m:02}:00");
            let a = DepartureTime::parse(&short).unwrap();
            let b = DepartureTime::parse(&long).unwrap();
            prop_assert_eq!(a, b);
            prop_assert_eq!(a.to_string(), short);
            prop_assert_eq!(a.to_sql(), long);
        }

        /// The SQL form sorts lexicographically in time order
        #[test]
        fn sql_form_sorts_like_time(a in 0u32..1440, b in 0u32..1440) {
            let ta = DepartureTime::from_hm(a / 60, a % 60).unwrap();
            let tb = DepartureTime::from_hm(b / 60, b % 60).unwrap();
            prop_assert_eq!(ta.cmp(&tb), ta.to_sql().cmp(&tb.to_sql()));
        }
    }
}
