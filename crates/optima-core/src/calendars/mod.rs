//! Business day calendars and settlement projection.
//!
//! This module provides:
//! - The national holiday calendar (fixed dates plus Easter-derived holidays)
//! - Business day detection and date rolling
//! - Settlement projection with a working-day float

use std::collections::BTreeSet;

mod bitmap;
mod national;

pub use bitmap::{easter_sunday, HolidayBitmap, HolidayCalendarBuilder};
pub use national::{
    holidays_for_year, holidays_for_years, named_holidays_for_year, NationalCalendar,
};

use crate::types::Date;

/// Trait for business day calendars.
///
/// Calendars determine which days are business days vs holidays.
pub trait Calendar: Send + Sync {
    /// Returns the name of the calendar.
    fn name(&self) -> &'static str;

    /// Returns true if the date is a business day.
    fn is_business_day(&self, date: Date) -> bool;

    /// Returns true if the date is not a business day.
    fn is_holiday(&self, date: Date) -> bool {
        !self.is_business_day(date)
    }

    /// Advances a date by a number of business days.
    fn add_business_days(&self, date: Date, days: u32) -> Date {
        let mut result = date;
        let mut remaining = days;

        while remaining > 0 {
            result = result.add_days(1);
            if self.is_business_day(result) {
                remaining -= 1;
            }
        }

        result
    }

    /// Returns the next business day on or after the given date.
    fn next_business_day(&self, date: Date) -> Date {
        let mut result = date;
        while !self.is_business_day(result) {
            result = result.add_days(1);
        }
        result
    }

    /// Counts business days between two dates (exclusive of start, inclusive of end).
    fn business_days_between(&self, start: Date, end: Date) -> u32 {
        let mut count = 0;
        let mut current = start.add_days(1);

        while current <= end {
            if self.is_business_day(current) {
                count += 1;
            }
            current = current.add_days(1);
        }

        count
    }

    /// Projects the date funds settle for a title due on `due`.
    ///
    /// A due date that is not a business day rolls forward to the next one.
    /// From there, `float` business days are counted. A float of zero returns
    /// the rolled-forward date unchanged.
    fn project_settlement(&self, due: Date, float: u32) -> Date {
        let anchor = self.next_business_day(due);
        self.add_business_days(anchor, float)
    }
}

/// A simple weekend-only calendar (no holidays).
///
/// Useful for testing or when holiday data is not available.
#[derive(Debug, Clone, Copy, Default)]
pub struct WeekendCalendar;

impl Calendar for WeekendCalendar {
    fn name(&self) -> &'static str {
        "Weekend Only"
    }

    fn is_business_day(&self, date: Date) -> bool {
        !date.is_weekend()
    }
}

/// An explicit holiday set is a calendar on its own.
impl Calendar for BTreeSet<Date> {
    fn name(&self) -> &'static str {
        "Holiday Set"
    }

    fn is_business_day(&self, date: Date) -> bool {
        !date.is_weekend() && !self.contains(&date)
    }
}

/// Returns false for weekends and for dates in `holidays`.
#[must_use]
pub fn is_business_day(date: Date, holidays: &BTreeSet<Date>) -> bool {
    holidays.is_business_day(date)
}

/// Projects the settlement date of a title due on `due` against a holiday set.
///
/// See [`Calendar::project_settlement`].
#[must_use]
pub fn project_settlement(due: Date, float: u32, holidays: &BTreeSet<Date>) -> Date {
    holidays.project_settlement(due, float)
}
