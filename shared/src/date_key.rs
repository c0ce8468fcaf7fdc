use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

const DATE_KEY_FORMAT: &str = "%Y-%m-%d";

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DateKeyError {
    #[error("Date key must have the form YYYY-MM-DD, got '{0}'")]
    Malformed(String),
    #[error("'{0}' is not a real calendar date")]
    NotACalendarDate(String),
}

/// Snapshot key: a real calendar date rendered as zero-padded `YYYY-MM-DD`.
///
/// Construction always goes through [`DateKey::parse`], so any value of this
/// type formats back to exactly the string it was built from.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct DateKey {
    key: String,
    date: NaiveDate,
}

impl DateKey {
    /// Validate a `YYYY-MM-DD` string by rebuilding the calendar date and
    /// checking it echoes back identically (so `2024-02-30` is rejected).
    pub fn parse(value: &str) -> Result<Self, DateKeyError> {
        let bytes = value.as_bytes();
        let shape_ok = bytes.len() == 10
            && bytes.iter().enumerate().all(|(i, b)| match i {
                4 | 7 => *b == b'-',
                _ => b.is_ascii_digit(),
            });
        if !shape_ok {
            return Err(DateKeyError::Malformed(value.to_string()));
        }

        let year: i32 = value[0..4]
            .parse()
            .map_err(|_| DateKeyError::Malformed(value.to_string()))?;
        let month: u32 = value[5..7]
            .parse()
            .map_err(|_| DateKeyError::Malformed(value.to_string()))?;
        let day: u32 = value[8..10]
            .parse()
            .map_err(|_| DateKeyError::Malformed(value.to_string()))?;

        let date = NaiveDate::from_ymd_opt(year, month, day)
            .ok_or_else(|| DateKeyError::NotACalendarDate(value.to_string()))?;
        let echoed = date.format(DATE_KEY_FORMAT).to_string();
        if echoed != value {
            return Err(DateKeyError::NotACalendarDate(value.to_string()));
        }

        Ok(Self { key: echoed, date })
    }

    pub fn from_date(date: NaiveDate) -> Self {
        Self {
            key: date.format(DATE_KEY_FORMAT).to_string(),
            date,
        }
    }

    pub fn as_str(&self) -> &str {
        &self.key
    }

    pub fn to_date(&self) -> NaiveDate {
        self.date
    }

    /// Human-readable form, e.g. "January 5, 2025".
    pub fn display_long(&self) -> String {
        let date = self.to_date();
        format!("{} {}, {}", month_name(date.month()), date.day(), date.year())
    }
}

fn month_name(month: u32) -> &'static str {
    match month {
        1 => "January", 2 => "February", 3 => "March", 4 => "April",
        5 => "May", 6 => "June", 7 => "July", 8 => "August",
        9 => "September", 10 => "October", 11 => "November", 12 => "December",
        _ => "January",
    }
}

impl fmt::Display for DateKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.key)
    }
}

impl FromStr for DateKey {
    type Err = DateKeyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for DateKey {
    type Error = DateKeyError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<DateKey> for String {
    fn from(key: DateKey) -> Self {
        key.key
    }
}

impl AsRef<str> for DateKey {
    fn as_ref(&self) -> &str {
        &self.key
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_valid_keys_round_trip() {
        for key in ["2024-01-01", "2024-02-29", "2023-12-31", "1999-06-15", "0001-01-01"] {
            let parsed = DateKey::parse(key).expect("valid key");
            assert_eq!(parsed.as_str(), key);
            assert_eq!(parsed.to_string(), key);
        }
    }

    #[test]
    fn test_every_day_of_a_leap_year_round_trips() {
        let mut date = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        while date.year() == 2024 {
            let key = DateKey::from_date(date);
            assert_eq!(DateKey::parse(key.as_str()).unwrap(), key);
            assert_eq!(key.to_date(), date);
            date = date.succ_opt().unwrap();
        }
    }

    #[test]
    fn test_rejects_impossible_dates() {
        for key in ["2024-02-30", "2023-02-29", "2024-13-01", "2024-00-10", "2024-04-31", "2024-01-00"] {
            assert_eq!(
                DateKey::parse(key),
                Err(DateKeyError::NotACalendarDate(key.to_string())),
                "key {}",
                key
            );
        }
    }

    #[test]
    fn test_rejects_malformed_keys() {
        for key in ["", "2024-1-01", "2024/01/01", "24-01-01", "2024-01-011", "abcd-ef-gh", " 2024-01-01"] {
            assert!(matches!(DateKey::parse(key), Err(DateKeyError::Malformed(_))), "key '{}'", key);
        }
    }

    #[test]
    fn test_display_long() {
        let key = DateKey::parse("2025-01-05").unwrap();
        assert_eq!(key.display_long(), "January 5, 2025");
    }

    #[test]
    fn test_serde_validates() {
        let key: DateKey = serde_json::from_str("\"2024-03-10\"").unwrap();
        assert_eq!(key.as_str(), "2024-03-10");
        assert!(serde_json::from_str::<DateKey>("\"2024-02-30\"").is_err());
        assert_eq!(serde_json::to_string(&key).unwrap(), "\"2024-03-10\"");
    }

    #[test]
    fn test_keys_sort_chronologically() {
        let mut keys = vec![
            DateKey::parse("2024-03-01").unwrap(),
            DateKey::parse("2023-12-31").unwrap(),
            DateKey::parse("2024-01-15").unwrap(),
        ];
        keys.sort();
        let sorted: Vec<&str> = keys.iter().map(DateKey::as_str).collect();
        assert_eq!(sorted, vec!["2023-12-31", "2024-01-15", "2024-03-01"]);
    }
}
