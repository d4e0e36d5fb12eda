//! Minimum age parsing for age-based retention

use std::fmt;
use std::str::FromStr;

use chrono::Duration;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::{Error, Result};

/// How long a version must have existed before it may be removed
///
/// Written as one or more `<number><unit>` groups: `s` seconds, `m` minutes,
/// `h` hours, `d` days, `w` weeks. `"2d3h"` is two days and three hours.
/// A bare number is a count of days.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct MinAge(Duration);

impl MinAge {
    pub fn new(duration: Duration) -> Self {
        Self(duration)
    }

    pub fn days(days: i64) -> Self {
        Self(Duration::days(days))
    }

    pub fn hours(hours: i64) -> Self {
        Self(Duration::hours(hours))
    }

    pub fn weeks(weeks: i64) -> Self {
        Self(Duration::weeks(weeks))
    }

    /// Parse an age string such as `"4d"`, `"2w"` or `"1d12h"`
    pub fn parse(input: &str) -> Result<Self> {
        let text = input.trim();
        if text.is_empty() {
            return Err(Error::InvalidAge("age cannot be empty".to_string()));
        }

        if text.chars().all(|c| c.is_ascii_digit()) {
            let days: i64 = text
                .parse()
                .map_err(|_| Error::InvalidAge(format!("number too large in '{}'", input)))?;
            return checked(Duration::try_days(days), input).map(Self);
        }

        let mut total = Duration::zero();
        let mut digits = String::new();

        for c in text.chars() {
            if c.is_ascii_digit() {
                digits.push(c);
                continue;
            }

            if digits.is_empty() {
                return Err(Error::InvalidAge(format!(
                    "expected a number before '{}' in '{}'",
                    c, input
                )));
            }

            let value: i64 = digits
                .parse()
                .map_err(|_| Error::InvalidAge(format!("number too large in '{}'", input)))?;
            digits.clear();

            let part = match c.to_ascii_lowercase() {
                's' => Duration::try_seconds(value),
                'm' => Duration::try_minutes(value),
                'h' => Duration::try_hours(value),
                'd' => Duration::try_days(value),
                'w' => Duration::try_weeks(value),
                other => {
                    return Err(Error::InvalidAge(format!(
                        "unknown unit '{}' in '{}'. Supported units: s, m, h, d, w",
                        other, input
                    )))
                }
            };
            let part = checked(part, input)?;
            total = total
                .checked_add(&part)
                .ok_or_else(|| Error::InvalidAge(format!("'{}' is out of range", input)))?;
        }

        if !digits.is_empty() {
            return Err(Error::InvalidAge(format!(
                "missing unit after '{}' in '{}'",
                digits, input
            )));
        }

        Ok(Self(total))
    }

    pub fn as_duration(&self) -> Duration {
        self.0
    }
}

fn checked(duration: Option<Duration>, input: &str) -> Result<Duration> {
    duration.ok_or_else(|| Error::InvalidAge(format!("'{}' is out of range", input)))
}

impl FromStr for MinAge {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl From<Duration> for MinAge {
    fn from(duration: Duration) -> Self {
        Self(duration)
    }
}

impl fmt::Display for MinAge {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut secs = self.0.num_seconds();
        if secs <= 0 {
            return write!(f, "{}s", secs);
        }

        for (unit, size) in [('w', 604_800), ('d', 86_400), ('h', 3_600), ('m', 60), ('s', 1)] {
            if secs >= size {
                write!(f, "{}{}", secs / size, unit)?;
                secs %= size;
            }
        }
        Ok(())
    }
}

impl Serialize for MinAge {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for MinAge {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let text = String::deserialize(deserializer)?;
        Self::parse(&text).map_err(serde::de::Error::custom)
    }
}
