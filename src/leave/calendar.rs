use chrono::{Datelike, NaiveDate, Weekday};
use std::collections::HashSet;

/// Number of working days in the inclusive range `[start, end]`:
/// every day that is neither Saturday/Sunday nor a public holiday.
/// Dates are compared as plain calendar dates, never as instants.
/// `start > end` counts as an empty range, not an error.
pub fn business_day_count(start: NaiveDate, end: NaiveDate, holidays: &HashSet<NaiveDate>) -> u32 {
    if start > end {
        return 0;
    }

    let mut count = 0;
    let mut current = start;
    loop {
        let weekend = matches!(current.weekday(), Weekday::Sat | Weekday::Sun);
        if !weekend && !holidays.contains(&current) {
            count += 1;
        }
        if current == end {
            break;
        }
        match current.succ_opt() {
            Some(next) => current = next,
            None => break, // end of the calendar
        }
    }
    count
}

/// Full years of service, anniversary-aware: a partial year does not
/// count until the join-date anniversary has passed.
pub fn tenure_years(join_date: NaiveDate, as_of: NaiveDate) -> i32 {
    let mut years = as_of.year() - join_date.year();
    if (as_of.month(), as_of.day()) < (join_date.month(), join_date.day()) {
        years -= 1;
    }
    years
}

/// Annual leave quota from tenure. Company step table:
/// < 1y = 0, 1-5y = 12, 5-10y = 18, 10y and up = 24.
pub fn tenure_quota(join_date: Option<NaiveDate>, as_of: NaiveDate) -> i32 {
    let Some(join_date) = join_date else {
        return 0;
    };

    let years = tenure_years(join_date, as_of);
    if years < 1 {
        0
    } else if years < 5 {
        12
    } else if years < 10 {
        18
    } else {
        24
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    #[test]
    fn full_week_has_five_working_days() {
        // 2024-01-01 is a Monday
        let count = business_day_count(d(2024, 1, 1), d(2024, 1, 7), &HashSet::new());
        assert_eq!(count, 5);
    }

    #[test]
    fn plain_weekday_stretch_equals_inclusive_day_count() {
        // Wed Jan 10 through Fri Jan 12, 2024
        let count = business_day_count(d(2024, 1, 10), d(2024, 1, 12), &HashSet::new());
        assert_eq!(count, 3);
    }

    #[test]
    fn holiday_on_single_day_range_yields_zero() {
        let holidays = HashSet::from([d(2024, 1, 1)]);
        assert_eq!(business_day_count(d(2024, 1, 1), d(2024, 1, 1), &holidays), 0);
    }

    #[test]
    fn inverted_range_counts_as_empty() {
        assert_eq!(business_day_count(d(2024, 1, 7), d(2024, 1, 1), &HashSet::new()), 0);
    }

    #[test]
    fn weekend_holiday_is_not_double_subtracted() {
        // Sat Jan 6, 2024 declared a holiday: the week still has 5 days
        let holidays = HashSet::from([d(2024, 1, 6)]);
        assert_eq!(business_day_count(d(2024, 1, 1), d(2024, 1, 7), &holidays), 5);
    }

    #[test]
    fn midweek_holiday_shortens_the_week() {
        let holidays = HashSet::from([d(2024, 1, 3)]);
        assert_eq!(business_day_count(d(2024, 1, 1), d(2024, 1, 7), &holidays), 4);
    }

    #[test]
    fn pure_and_repeatable() {
        let holidays = HashSet::from([d(2024, 1, 3)]);
        let a = business_day_count(d(2024, 1, 1), d(2024, 1, 7), &holidays);
        let b = business_day_count(d(2024, 1, 1), d(2024, 1, 7), &holidays);
        assert_eq!(a, b);
    }

    #[test]
    fn tenure_counts_full_anniversaries_only() {
        assert_eq!(tenure_years(d(2018, 6, 15), d(2024, 6, 14)), 5);
        assert_eq!(tenure_years(d(2018, 6, 15), d(2024, 6, 15)), 6);
        assert_eq!(tenure_years(d(2018, 6, 15), d(2024, 6, 16)), 6);
    }

    #[test]
    fn quota_step_table() {
        let today = d(2024, 8, 1);
        assert_eq!(tenure_quota(Some(d(2023, 9, 1)), today), 0); // ~11 months
        assert_eq!(tenure_quota(Some(d(2023, 8, 1)), today), 12); // exactly 1y
        assert_eq!(tenure_quota(Some(d(2018, 8, 1)), today), 18); // 6y
        assert_eq!(tenure_quota(Some(d(2013, 8, 1)), today), 24); // 11y
        assert_eq!(tenure_quota(Some(d(2014, 8, 2)), today), 18); // 10y minus a day
        assert_eq!(tenure_quota(None, today), 0);
    }
}
