//! Date type for receivables calculations.

use chrono::{Datelike, NaiveDate, Weekday};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Add, Sub};

use crate::error::{OptimaError, OptimaResult};

/// A calendar date without time-of-day or timezone.
///
/// This is a newtype wrapper around `chrono::NaiveDate`. All day counts in
/// the engine are differences of `Date` values, so there is no daylight
/// saving or UTC boundary shift to account for.
///
/// # Example
///
/// ```rust
/// use optima_core::types::Date;
///
/// let op = Date::from_ymd(2025, 3, 3).unwrap();
/// let due = Date::parse("2025-03-23").unwrap();
/// assert_eq!(op.days_between(&due), 20);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Date(NaiveDate);

impl Date {
    /// Creates a new date from year, month, and day.
    ///
    /// # Errors
    ///
    /// Returns `OptimaError::InvalidDate` if the date is invalid.
    pub fn from_ymd(year: i32, month: u32, day: u32) -> OptimaResult<Self> {
        NaiveDate::from_ymd_opt(year, month, day)
            .map(Date)
            .ok_or_else(|| OptimaError::invalid_date(format!("{year}-{month:02}-{day:02}")))
    }

    /// Creates a date from an ISO 8601 string (YYYY-MM-DD).
    ///
    /// # Errors
    ///
    /// Returns `OptimaError::InvalidDate` if the string is not a valid date.
    pub fn parse(s: &str) -> OptimaResult<Self> {
        NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d")
            .map(Date)
            .map_err(|_| OptimaError::invalid_date(format!("Cannot parse: {s}")))
    }

    /// Parses a date, mapping empty or malformed input to `None`.
    ///
    /// Form inputs arrive as strings that may be blank while a title is
    /// still being filled in; those titles are "not yet computable".
    #[must_use]
    pub fn parse_lenient(s: &str) -> Option<Self> {
        if s.trim().is_empty() {
            return None;
        }
        Self::parse(s).ok()
    }

    /// Returns today's local date.
    #[must_use]
    pub fn today() -> Self {
        Date(chrono::Local::now().date_naive())
    }

    /// Returns the year component.
    #[must_use]
    pub fn year(&self) -> i32 {
        self.0.year()
    }

    /// Returns the month component (1-12).
    #[must_use]
    pub fn month(&self) -> u32 {
        self.0.month()
    }

    /// Returns the day component (1-31).
    #[must_use]
    pub fn day(&self) -> u32 {
        self.0.day()
    }

    /// Adds a number of days to the date.
    #[must_use]
    pub fn add_days(&self, days: i64) -> Self {
        Date(self.0 + chrono::Duration::days(days))
    }

    /// Calculates the number of calendar days from `self` to `other`.
    ///
    /// Positive when `other` is later.
    #[must_use]
    pub fn days_between(&self, other: &Date) -> i64 {
        (other.0 - self.0).num_days()
    }

    /// Returns the underlying `NaiveDate`.
    #[must_use]
    pub fn as_naive_date(&self) -> NaiveDate {
        self.0
    }

    /// Returns the day of week.
    #[must_use]
    pub fn weekday(&self) -> Weekday {
        self.0.weekday()
    }

    /// Checks if the date is a weekend (Saturday or Sunday).
    #[must_use]
    pub fn is_weekend(&self) -> bool {
        matches!(self.weekday(), Weekday::Sat | Weekday::Sun)
    }
}

impl fmt::Display for Date {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format("%Y-%m-%d"))
    }
}

impl From<NaiveDate> for Date {
    fn from(date: NaiveDate) -> Self {
        Date(date)
    }
}

impl From<Date> for NaiveDate {
    fn from(date: Date) -> Self {
        date.0
    }
}

impl Add<i64> for Date {
    type Output = Self;

    /// Adds days to a date.
    fn add(self, days: i64) -> Self::Output {
        self.add_days(days)
    }
}

impl Sub<i64> for Date {
    type Output = Self;

    /// Subtracts days from a date.
    fn sub(self, days: i64) -> Self::Output {
        self.add_days(-days)
    }
}

impl Sub<Date> for Date {
    type Output = i64;

    /// Returns the number of days between two dates.
    fn sub(self, other: Date) -> Self::Output {
        other.days_between(&self)
    }
}

/// Serde adapter for optional dates stored as possibly-blank strings.
///
/// `None` serializes as `""`; blank or malformed strings deserialize to `None`.
///
/// ```rust
/// use optima_core::types::Date;
/// use serde::{Deserialize, Serialize};
///
/// #[derive(Serialize, Deserialize)]
/// struct Row {
///     #[serde(with = "optima_core::types::lenient_date", default)]
///     due: Option<Date>,
/// }
///
/// let row: Row = serde_json::from_str(r#"{"due": ""}"#).unwrap();
/// assert!(row.due.is_none());
/// ```
pub mod lenient_date {
    use super::Date;
    use serde::{Deserialize, Deserializer, Serializer};

    /// Serializes an optional date, writing `""` for `None`.
    pub fn serialize<S>(value: &Option<Date>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match value {
            Some(date) => serializer.collect_str(date),
            None => serializer.serialize_str(""),
        }
    }

    /// Deserializes an optional date, mapping blank or invalid strings to `None`.
    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<Date>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw: Option<String> = Option::deserialize(deserializer)?;
        Ok(raw.as_deref().and_then(Date::parse_lenient))
    }
}
