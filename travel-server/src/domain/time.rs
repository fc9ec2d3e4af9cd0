//! Time-of-day handling.
//!
//! Departure times arrive as free text from forms and sample content, either
//! as 24-hour "HH:MM" (what an HTML time input produces) or as 12-hour
//! "H:MM AM/PM" (how timetables are usually written). Both parse to the same
//! [`TimeOfDay`].

use chrono::{NaiveTime, Timelike};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// Error returned when parsing an invalid time string.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid time: {reason}")]
pub struct TimeError {
    reason: &'static str,
}

impl TimeError {
    fn new(reason: &'static str) -> Self {
        Self { reason }
    }
}

/// A wall-clock time of day with minute precision.
///
/// # Examples
///
/// ```
/// use travel_server::domain::TimeOfDay;
///
/// let evening = TimeOfDay::parse("7:00 PM").unwrap();
/// assert_eq!(evening.to_string(), "19:00");
///
/// let morning = TimeOfDay::parse("06:30").unwrap();
/// assert!(morning < evening);
///
/// assert!(TimeOfDay::parse("").is_err());
/// assert!(TimeOfDay::parse("25:00").is_err());
/// ```
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TimeOfDay(NaiveTime);

impl TimeOfDay {
    /// Build a time from hour (0-23) and minute (0-59).
    pub fn from_hm(hour: u32, minute: u32) -> Result<Self, TimeError> {
        if hour > 23 {
            return Err(TimeError::new("hour must be 0-23"));
        }
        if minute > 59 {
            return Err(TimeError::new("minute must be 0-59"));
        }
        NaiveTime::from_hms_opt(hour, minute, 0)
            .map(Self)
            .ok_or_else(|| TimeError::new("invalid time"))
    }

    /// Parse "HH:MM", "H:MM", or a 12-hour time with an AM/PM suffix.
    pub fn parse(s: &str) -> Result<Self, TimeError> {
        let s = s.trim();
        if s.is_empty() {
            return Err(TimeError::new("time is empty"));
        }

        let upper = s.to_ascii_uppercase();
        let (clock, meridiem) = if let Some(rest) = upper.strip_suffix("AM") {
            (rest.trim_end(), Some(false))
        } else if let Some(rest) = upper.strip_suffix("PM") {
            (rest.trim_end(), Some(true))
        } else {
            (upper.as_str(), None)
        };

        let (hour, minute) = split_clock(clock)?;

        match meridiem {
            None => Self::from_hm(hour, minute),
            Some(is_pm) => {
                if !(1..=12).contains(&hour) {
                    return Err(TimeError::new("12-hour clock hour must be 1-12"));
                }
                let hour = match (hour, is_pm) {
                    (12, false) => 0,
                    (12, true) => 12,
                    (h, false) => h,
                    (h, true) => h + 12,
                };
                Self::from_hm(hour, minute)
            }
        }
    }

    /// Returns the hour (0-23).
    pub fn hour(&self) -> u32 {
        self.0.hour()
    }

    /// Returns the minute (0-59).
    pub fn minute(&self) -> u32 {
        self.0.minute()
    }
}

/// Split "H:MM" / "HH:MM" into hour and minute digits.
fn split_clock(clock: &str) -> Result<(u32, u32), TimeError> {
    let (hour, minute) = clock
        .split_once(':')
        .ok_or_else(|| TimeError::new("expected HH:MM format"))?;

    let hour_bytes = hour.as_bytes();
    let hour = match hour_bytes.len() {
        1 => parse_digit(hour_bytes[0]),
        2 => parse_two_digits(hour_bytes),
        _ => None,
    }
    .ok_or_else(|| TimeError::new("invalid hour digits"))?;

    let minute = parse_two_digits(minute.as_bytes())
        .ok_or_else(|| TimeError::new("invalid minute digits"))?;

    Ok((hour, minute))
}

fn parse_digit(b: u8) -> Option<u32> {
    (b as char).to_digit(10)
}

/// Parse two ASCII digit bytes into a u32.
fn parse_two_digits(bytes: &[u8]) -> Option<u32> {
    if bytes.len() != 2 {
        return None;
    }
    let d1 = parse_digit(bytes[0])?;
    let d2 = parse_digit(bytes[1])?;
    Some(d1 * 10 + d2)
}

impl FromStr for TimeOfDay {
    type Err = TimeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Debug for TimeOfDay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "TimeOfDay({:02}:{:02})", self.hour(), self.minute())
    }
}

impl fmt::Display for TimeOfDay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}", self.hour(), self.minute())
    }
}

impl Serialize for TimeOfDay {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for TimeOfDay {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Self::parse(&s).map_err(serde::de::Error::custom)
    }
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        /// Display then parse returns the same time
        #[test]
        fn display_parse_roundtrip(hour in 0u32..24, minute in 0u32..60) {
            let t = TimeOfDay::from_hm(hour, minute).unwrap();
            prop_assert_eq!(TimeOfDay::parse(&t.to_string()).unwrap(), t);
        }

        /// 12-hour and 24-hour spellings agree
        #[test]
        fn twelve_hour_matches_24_hour(hour in 1u32..=12, minute in 0u32..60, pm in any::<bool>()) {
            let suffix = if pm { "PM" } else { "AM" };
            let twelve = TimeOfDay::parse(&format!("{hour}:{minute:02} {suffix}")).unwrap();
            let expected_hour = match (hour, pm) {
                (12, false) => 0,
                (12, true) => 12,
                (h, false) => h,
                (h, true) => h + 12,
            };
            prop_assert_eq!(twelve.hour(), expected_hour);
            prop_assert_eq!(twelve.minute(), minute);
        }

        /// Parsing arbitrary text never panics
        #[test]
        fn parse_never_panics(s in "\\PC{0,12}") {
            let _ = TimeOfDay::parse(&s);
        }
    }
}
