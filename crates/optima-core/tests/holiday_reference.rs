//! Integration tests against published national holiday dates.

use optima_core::calendars::{
    holidays_for_year, holidays_for_years, project_settlement, Calendar, NationalCalendar,
};
use optima_core::types::Date;

fn d(y: i32, m: u32, day: u32) -> Date {
    Date::from_ymd(y, m, day).unwrap()
}

/// (year, carnival monday, carnival tuesday, good friday, corpus christi)
const MOBILE_HOLIDAYS: [(i32, (u32, u32), (u32, u32), (u32, u32), (u32, u32)); 5] = [
    (2023, (2, 20), (2, 21), (4, 7), (6, 8)),
    (2024, (2, 12), (2, 13), (3, 29), (5, 30)),
    (2025, (3, 3), (3, 4), (4, 18), (6, 19)),
    (2026, (2, 16), (2, 17), (4, 3), (6, 4)),
    (2027, (2, 8), (2, 9), (3, 26), (5, 27)),
];

#[test]
fn test_mobile_holidays_match_published_dates() {
    for (year, monday, tuesday, friday, corpus) in MOBILE_HOLIDAYS {
        let holidays = holidays_for_year(year);
        for (month, day) in [monday, tuesday, friday, corpus] {
            assert!(
                holidays.contains(&d(year, month, day)),
                "{year}-{month:02}-{day:02} missing"
            );
        }
        assert_eq!(holidays.len(), 13, "year {year}");
    }
}

#[test]
fn test_fixed_holidays_every_year() {
    let fixed = [(1, 1), (4, 21), (5, 1), (9, 7), (10, 12), (11, 2), (11, 15), (11, 20), (12, 25)];
    let span = holidays_for_years(2023..=2027);
    assert_eq!(span.len(), 13 * 5);

    for year in 2023..=2027 {
        for (month, day) in fixed {
            assert!(span.contains(&d(year, month, day)));
        }
    }
}

#[test]
fn test_settlement_across_year_end() {
    let holidays = holidays_for_years(2025..=2026);
    // Wednesday Dec 31, then New Year's Day
    assert_eq!(project_settlement(d(2025, 12, 31), 0, &holidays), d(2025, 12, 31));
    assert_eq!(project_settlement(d(2025, 12, 31), 1, &holidays), d(2026, 1, 2));

    let calendar = NationalCalendar::for_years(2025, 2026);
    assert_eq!(calendar.project_settlement(d(2025, 12, 31), 1), d(2026, 1, 2));
}

#[test]
fn test_carnival_block() {
    let calendar = NationalCalendar::cached(2026, 2026);
    // Due on the Saturday before Carnival: Sat, Sun, Mon, Tue are all skipped
    assert_eq!(calendar.next_business_day(d(2026, 2, 14)), d(2026, 2, 18));
    assert_eq!(calendar.project_settlement(d(2026, 2, 14), 3), d(2026, 2, 23));
}
