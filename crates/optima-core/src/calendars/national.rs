//! Brazilian national holiday calendar.
//!
//! Nine fixed-date holidays plus four holidays derived from Easter Sunday.
//! Calendars are built for an explicit span of years; the process-wide cache
//! in [`NationalCalendar::cached`] avoids rerunning the Easter computation
//! for every title of a simulation.

use std::collections::{BTreeSet, HashMap};
use std::ops::RangeInclusive;
use std::sync::Arc;

use chrono::NaiveDate;
use once_cell::sync::Lazy;
use parking_lot::Mutex;

use super::bitmap::{easter_sunday, HolidayBitmap, HolidayCalendarBuilder};
use super::Calendar;
use crate::types::Date;

/// Fixed-date holidays as (month, day, name).
const FIXED_HOLIDAYS: [(u32, u32, &str); 9] = [
    (1, 1, "Confraternização Universal"),
    (4, 21, "Tiradentes"),
    (5, 1, "Dia do Trabalho"),
    (9, 7, "Independência do Brasil"),
    (10, 12, "Nossa Senhora Aparecida"),
    (11, 2, "Finados"),
    (11, 15, "Proclamação da República"),
    (11, 20, "Dia da Consciência Negra"),
    (12, 25, "Natal"),
];

/// Easter-relative holidays as (offset from Easter Sunday, name).
const EASTER_HOLIDAYS: [(i64, &str); 4] = [
    (-48, "Segunda-feira de Carnaval"),
    (-47, "Terça-feira de Carnaval"),
    (-2, "Sexta-feira Santa"),
    (60, "Corpus Christi"),
];

/// Spans above this many cached entries flush the cache.
const CACHE_CAPACITY: usize = 64;

static CALENDAR_CACHE: Lazy<Mutex<HashMap<(i32, i32), Arc<NationalCalendar>>>> =
    Lazy::new(|| Mutex::new(HashMap::new()));

fn national_builder(start_year: i32, end_year: i32) -> HolidayCalendarBuilder {
    let builder = FIXED_HOLIDAYS
        .iter()
        .fold(HolidayCalendarBuilder::new(start_year, end_year), |b, &(month, day, _)| {
            b.add_fixed_holiday(month, day)
        });
    EASTER_HOLIDAYS
        .iter()
        .fold(builder, |b, &(offset, _)| b.add_easter_holiday(offset))
}

/// Returns the national holidays of one year.
///
/// Thirteen dates unless two rules land on the same day.
#[must_use]
pub fn holidays_for_year(year: i32) -> BTreeSet<Date> {
    national_builder(year, year).into_set()
}

/// Returns the union of national holidays over a span of years.
///
/// An empty range yields an empty set.
#[must_use]
pub fn holidays_for_years(years: RangeInclusive<i32>) -> BTreeSet<Date> {
    if years.is_empty() {
        return BTreeSet::new();
    }
    national_builder(*years.start(), *years.end()).into_set()
}

/// Returns the holidays of one year with their names, ordered by date.
#[must_use]
pub fn named_holidays_for_year(year: i32) -> Vec<(Date, &'static str)> {
    let fixed = FIXED_HOLIDAYS.iter().filter_map(|&(month, day, name)| {
        NaiveDate::from_ymd_opt(year, month, day).map(|d| (Date::from(d), name))
    });
    let mobile = EASTER_HOLIDAYS.iter().filter_map(|&(offset, name)| {
        easter_sunday(year).map(|easter| (Date::from(easter).add_days(offset), name))
    });

    let mut holidays: Vec<_> = fixed.chain(mobile).collect();
    holidays.sort_by_key(|(date, _)| *date);
    holidays
}

/// National business day calendar over a span of years.
///
/// Dates outside the span are treated as holiday-free, so callers build the
/// calendar for every year a computation can touch.
///
/// # Example
///
/// ```rust
/// use optima_core::calendars::{Calendar, NationalCalendar};
/// use optima_core::types::Date;
///
/// let cal = NationalCalendar::for_years(2025, 2025);
/// // Carnival Tuesday
/// assert!(!cal.is_business_day(Date::from_ymd(2025, 3, 4).unwrap()));
/// ```
#[derive(Debug, Clone)]
pub struct NationalCalendar {
    bitmap: HolidayBitmap,
}

impl NationalCalendar {
    /// Builds the calendar for `start_year..=end_year`.
    ///
    /// Reversed bounds are swapped.
    #[must_use]
    pub fn for_years(start_year: i32, end_year: i32) -> Self {
        Self {
            bitmap: national_builder(start_year, end_year).build(),
        }
    }

    /// Returns a shared calendar for the span, building it on first use.
    #[must_use]
    pub fn cached(start_year: i32, end_year: i32) -> Arc<Self> {
        let key = (start_year.min(end_year), start_year.max(end_year));
        let mut cache = CALENDAR_CACHE.lock();

        if let Some(calendar) = cache.get(&key) {
            return Arc::clone(calendar);
        }

        if cache.len() >= CACHE_CAPACITY {
            cache.clear();
        }

        log::debug!("building national calendar for {}..={}", key.0, key.1);
        let calendar = Arc::new(Self::for_years(key.0, key.1));
        cache.insert(key, Arc::clone(&calendar));
        calendar
    }

    /// First year covered.
    #[must_use]
    pub fn start_year(&self) -> i32 {
        self.bitmap.start_year()
    }

    /// Last year covered.
    #[must_use]
    pub fn end_year(&self) -> i32 {
        self.bitmap.end_year()
    }

    /// Returns true if the date falls inside the covered span.
    #[must_use]
    pub fn covers(&self, date: Date) -> bool {
        self.bitmap.covers(date.as_naive_date())
    }

    /// Returns every holiday in the span, ascending.
    #[must_use]
    pub fn holidays(&self) -> Vec<Date> {
        self.bitmap.holidays()
    }
}

impl Calendar for NationalCalendar {
    fn name(&self) -> &'static str {
        "Brazil National"
    }

    fn is_business_day(&self, date: Date) -> bool {
        self.bitmap.is_business_day(date.as_naive_date())
    }
}
