//! Bitmap-based holiday storage for O(1) lookups.
//!
//! Unlike a fixed-range table, the bitmap only covers the years it was built
//! for, so a calendar for a two-year simulation window costs a dozen words.

use crate::types::Date;
use chrono::{Datelike, NaiveDate};
use std::collections::BTreeSet;

/// Bits reserved per year (leap years use all of them).
const DAYS_PER_YEAR_SLOT: usize = 366;

/// Holiday bitmap over a contiguous span of years.
///
/// Each bit represents a day: 1 = holiday, 0 = not a holiday. Dates outside
/// the span are never holidays. Weekends are not stored here.
#[derive(Clone, PartialEq, Eq)]
pub struct HolidayBitmap {
    start_year: i32,
    end_year: i32,
    bits: Vec<u64>,
}

impl std::fmt::Debug for HolidayBitmap {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HolidayBitmap")
            .field("start_year", &self.start_year)
            .field("end_year", &self.end_year)
            .field("holiday_count", &self.count_holidays())
            .finish()
    }
}

impl HolidayBitmap {
    /// Creates an empty bitmap covering `start_year..=end_year`.
    ///
    /// The bounds are swapped if given in reverse order.
    #[must_use]
    pub fn new(start_year: i32, end_year: i32) -> Self {
        let (start_year, end_year) = if start_year <= end_year {
            (start_year, end_year)
        } else {
            (end_year, start_year)
        };
        let years = (end_year - start_year) as usize + 1;
        let words = (years * DAYS_PER_YEAR_SLOT + 63) / 64;
        Self {
            start_year,
            end_year,
            bits: vec![0u64; words],
        }
    }

    /// First year covered.
    #[inline]
    #[must_use]
    pub fn start_year(&self) -> i32 {
        self.start_year
    }

    /// Last year covered.
    #[inline]
    #[must_use]
    pub fn end_year(&self) -> i32 {
        self.end_year
    }

    /// Returns true if the date falls inside the covered span.
    #[inline]
    #[must_use]
    pub fn covers(&self, date: NaiveDate) -> bool {
        (self.start_year..=self.end_year).contains(&date.year())
    }

    /// Marks a date as a holiday. Dates outside the span are ignored.
    pub fn add_holiday(&mut self, date: NaiveDate) {
        if let Some((word_idx, bit_idx)) = self.date_to_indices(date) {
            self.bits[word_idx] |= 1u64 << bit_idx;
        }
    }

    /// Checks if a date is a holiday (weekends excluded).
    #[inline]
    #[must_use]
    pub fn is_holiday(&self, date: NaiveDate) -> bool {
        match self.date_to_indices(date) {
            Some((word_idx, bit_idx)) => (self.bits[word_idx] & (1u64 << bit_idx)) != 0,
            None => false,
        }
    }

    /// Checks if a date is a business day: not Saturday, Sunday or a holiday.
    #[inline]
    #[must_use]
    pub fn is_business_day(&self, date: NaiveDate) -> bool {
        if matches!(date.weekday(), chrono::Weekday::Sat | chrono::Weekday::Sun) {
            return false;
        }
        !self.is_holiday(date)
    }

    /// Counts the holidays stored.
    #[must_use]
    pub fn count_holidays(&self) -> usize {
        self.bits.iter().map(|w| w.count_ones() as usize).sum()
    }

    /// Returns every stored holiday in ascending order.
    #[must_use]
    pub fn holidays(&self) -> Vec<Date> {
        (self.start_year..=self.end_year)
            .flat_map(|year| {
                let first = NaiveDate::from_ymd_opt(year, 1, 1);
                first
                    .into_iter()
                    .flat_map(move |first| first.iter_days().take_while(move |d| d.year() == year))
            })
            .filter(|d| self.is_holiday(*d))
            .map(Date::from)
            .collect()
    }

    #[inline]
    fn date_to_indices(&self, date: NaiveDate) -> Option<(usize, usize)> {
        if !self.covers(date) {
            return None;
        }

        let year_offset = (date.year() - self.start_year) as usize;
        let bit_position = year_offset * DAYS_PER_YEAR_SLOT + date.ordinal0() as usize;

        Some((bit_position / 64, bit_position % 64))
    }
}

/// Builder for holiday sets defined by yearly rules.
pub struct HolidayCalendarBuilder {
    holidays: BTreeSet<NaiveDate>,
    start_year: i32,
    end_year: i32,
}

impl HolidayCalendarBuilder {
    /// Creates a builder generating holidays for `start_year..=end_year`.
    #[must_use]
    pub fn new(start_year: i32, end_year: i32) -> Self {
        Self {
            holidays: BTreeSet::new(),
            start_year: start_year.min(end_year),
            end_year: start_year.max(end_year),
        }
    }

    /// Adds a fixed holiday (same month and day every year).
    #[must_use]
    pub fn add_fixed_holiday(mut self, month: u32, day: u32) -> Self {
        for year in self.start_year..=self.end_year {
            if let Some(date) = NaiveDate::from_ymd_opt(year, month, day) {
                self.holidays.insert(date);
            }
        }
        self
    }

    /// Adds an Easter-based holiday (offset in days from Easter Sunday).
    #[must_use]
    pub fn add_easter_holiday(mut self, offset_days: i64) -> Self {
        for year in self.start_year..=self.end_year {
            if let Some(date) = easter_sunday(year)
                .and_then(|easter| easter.checked_add_signed(chrono::Duration::days(offset_days)))
            {
                self.holidays.insert(date);
            }
        }
        self
    }

    /// Returns the generated holidays as an ordered set.
    #[must_use]
    pub fn into_set(self) -> BTreeSet<Date> {
        self.holidays.into_iter().map(Date::from).collect()
    }

    /// Builds the holiday bitmap.
    #[must_use]
    pub fn build(self) -> HolidayBitmap {
        let mut bitmap = HolidayBitmap::new(self.start_year, self.end_year);
        for &date in &self.holidays {
            bitmap.add_holiday(date);
        }
        bitmap
    }
}

/// Calculates Easter Sunday using the anonymous Gregorian algorithm
/// (Meeus/Jones/Butcher).
#[allow(clippy::many_single_char_names)]
#[must_use]
pub fn easter_sunday(year: i32) -> Option<NaiveDate> {
    let a = year % 19;
    let b = year / 100;
    let c = year % 100;
    let d = b / 4;
    let e = b % 4;
    let f = (b + 8) / 25;
    let g = (b - f + 1) / 3;
    let h = (19 * a + b - d - g + 15) % 30;
    let i = c / 4;
    let k = c % 4;
    let l = (32 + 2 * e + 2 * i - h - k) % 7;
    let m = (a + 11 * h + 22 * l) / 451;
    let month = (h + l - 7 * m + 114) / 31;
    let day = ((h + l - 7 * m + 114) % 31) + 1;

    NaiveDate::from_ymd_opt(year, month as u32, day as u32)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bitmap_basic() {
        let mut bitmap = HolidayBitmap::new(2025, 2025);

        let date = NaiveDate::from_ymd_opt(2025, 1, 1).unwrap();
        assert!(!bitmap.is_holiday(date));

        bitmap.add_holiday(date);
        assert!(bitmap.is_holiday(date));
        assert_eq!(bitmap.count_holidays(), 1);
    }

    #[test]
    fn test_out_of_range_is_ignored() {
        let mut bitmap = HolidayBitmap::new(2026, 2025);
        assert_eq!(bitmap.start_year(), 2025);
        assert_eq!(bitmap.end_year(), 2026);

        let outside = NaiveDate::from_ymd_opt(2030, 1, 1).unwrap();
        bitmap.add_holiday(outside);
        assert!(!bitmap.is_holiday(outside));
        assert!(!bitmap.covers(outside));
        assert_eq!(bitmap.count_holidays(), 0);
    }

    #[test]
    fn test_leap_day_slot() {
        let mut bitmap = HolidayBitmap::new(2024, 2025);
        let leap = NaiveDate::from_ymd_opt(2024, 2, 29).unwrap();
        let new_year = NaiveDate::from_ymd_opt(2025, 1, 1).unwrap();
        bitmap.add_holiday(leap);
        assert!(bitmap.is_holiday(leap));
        assert!(!bitmap.is_holiday(new_year));
    }

    #[test]
    fn test_weekend_check() {
        let bitmap = HolidayBitmap::new(2025, 2025);

        let saturday = NaiveDate::from_ymd_opt(2025, 1, 4).unwrap();
        let sunday = NaiveDate::from_ymd_opt(2025, 1, 5).unwrap();
        let monday = NaiveDate::from_ymd_opt(2025, 1, 6).unwrap();

        assert!(!bitmap.is_business_day(saturday));
        assert!(!bitmap.is_business_day(sunday));
        assert!(bitmap.is_business_day(monday));
    }

    #[test]
    fn test_easter() {
        let easter = easter_sunday(2025).unwrap();
        assert_eq!(easter, NaiveDate::from_ymd_opt(2025, 4, 20).unwrap());

        let easter = easter_sunday(2024).unwrap();
        assert_eq!(easter, NaiveDate::from_ymd_opt(2024, 3, 31).unwrap());

        // Earliest possible Easter
        let easter = easter_sunday(2285).unwrap();
        assert_eq!(easter, NaiveDate::from_ymd_opt(2285, 3, 22).unwrap());
    }

    #[test]
    fn test_builder() {
        let builder = HolidayCalendarBuilder::new(2025, 2026)
            .add_fixed_holiday(1, 1)
            .add_easter_holiday(-2);

        let bitmap = HolidayCalendarBuilder::new(2025, 2026)
            .add_fixed_holiday(1, 1)
            .add_easter_holiday(-2)
            .build();

        let set = builder.into_set();
        assert_eq!(set.len(), 4);
        assert_eq!(bitmap.holidays(), set.into_iter().collect::<Vec<_>>());
        assert!(bitmap.is_holiday(NaiveDate::from_ymd_opt(2025, 4, 18).unwrap()));
        assert!(bitmap.is_holiday(NaiveDate::from_ymd_opt(2026, 4, 3).unwrap()));
    }

    #[test]
    fn test_holidays_span_years_in_order() {
        let bitmap = HolidayCalendarBuilder::new(2024, 2026)
            .add_fixed_holiday(12, 31)
            .add_fixed_holiday(1, 1)
            .build();

        let years: Vec<(i32, u32)> = bitmap
            .holidays()
            .iter()
            .map(|d| (d.year(), d.month()))
            .collect();
        assert_eq!(
            years,
            vec![(2024, 1), (2024, 12), (2025, 1), (2025, 12), (2026, 1), (2026, 12)]
        );
    }
}
