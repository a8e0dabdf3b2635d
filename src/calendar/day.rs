use super::CalendarError;
use std::fmt;
use time::{Date, Month, Weekday};

pub(crate) const DAYS_IN_WEEK: usize = 7;

/// Number of days between a date and the same weekday one week later
pub(crate) const WEEK_SPAN: i64 = 7;

pub(crate) trait WeekdayExt {
    fn abbrev(&self) -> &'static str;
}

impl WeekdayExt for Weekday {
    fn abbrev(&self) -> &'static str {
        match self {
            Weekday::Sunday => "Su",
            Weekday::Monday => "Mo",
            Weekday::Tuesday => "Tu",
            Weekday::Wednesday => "We",
            Weekday::Thursday => "Th",
            Weekday::Friday => "Fr",
            Weekday::Saturday => "Sa",
        }
    }
}

/// A single calendar date shown as one cell of the strip.  Two `Day`s are
/// equal iff they fall on the same date.
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub(crate) struct Day(Date);

impl Day {
    pub(crate) fn new(date: Date) -> Self {
        Day(date)
    }

    pub(crate) fn date(self) -> Date {
        self.0
    }

    pub(crate) fn year(self) -> i32 {
        self.0.year()
    }

    pub(crate) fn month(self) -> Month {
        self.0.month()
    }

    pub(crate) fn day(self) -> u8 {
        self.0.day()
    }

    pub(crate) fn weekday(self) -> Weekday {
        self.0.weekday()
    }

    /// Returns the day `days` days after this one, or `DateOverflow` if that
    /// falls outside the range of representable dates
    pub(crate) fn checked_add_days(self, days: i64) -> Result<Day, CalendarError> {
        i32::try_from(days)
            .ok()
            .and_then(|n| self.0.to_julian_day().checked_add(n))
            .and_then(|jd| Date::from_julian_day(jd).ok())
            .map(Day)
            .ok_or(CalendarError::DateOverflow { date: self.0, days })
    }

    pub(crate) fn show(self, is_today: bool) -> String {
        if is_today {
            format!("[{:2}]", self.day())
        } else {
            format!(" {:2} ", self.day())
        }
    }
}

impl fmt::Display for Day {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Seven consecutive days, starting on the first weekday of the
/// [`WeekCalendar`] that produced them
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) struct Week([Day; DAYS_IN_WEEK]);

impl Week {
    pub(crate) fn first(&self) -> Day {
        self.0[0]
    }

    pub(crate) fn last(&self) -> Day {
        self.0[DAYS_IN_WEEK - 1]
    }

    pub(crate) fn get(&self, i: usize) -> Option<Day> {
        self.0.get(i).copied()
    }

    pub(crate) fn iter(&self) -> impl Iterator<Item = Day> + '_ {
        self.0.iter().copied()
    }
}

/// The calendar system used to lay out weeks: the proleptic Gregorian
/// calendar with a configurable first day of the week.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) struct WeekCalendar {
    first_weekday: Weekday,
}

impl WeekCalendar {
    pub(crate) fn new(first_weekday: Weekday) -> Self {
        WeekCalendar { first_weekday }
    }

    /// Position of `date` within its week, counting the first weekday as 1
    pub(crate) fn weekday_ordinal(&self, date: Date) -> u8 {
        let first = self.first_weekday.number_days_from_monday();
        let wd = date.weekday().number_days_from_monday();
        (wd + 7 - first) % 7 + 1
    }

    /// Returns the week containing `date`, which can be at any day of the
    /// week.  Fails if any day of that week cannot be represented.
    pub(crate) fn week_containing(&self, date: Date) -> Result<Week, CalendarError> {
        let base = Day::new(date);
        let ordinal = i64::from(self.weekday_ordinal(date));
        let mut days = [base; DAYS_IN_WEEK];
        for (offset, slot) in (1i64..).zip(days.iter_mut()) {
            *slot = base.checked_add_days(offset - ordinal)?;
        }
        Ok(Week(days))
    }

    pub(crate) fn week_before(&self, week: &Week) -> Result<Week, CalendarError> {
        let eve = week.first().checked_add_days(-1)?;
        self.week_containing(eve.date())
    }

    pub(crate) fn week_after(&self, week: &Week) -> Result<Week, CalendarError> {
        let morrow = week.last().checked_add_days(1)?;
        self.week_containing(morrow.date())
    }
}

impl Default for WeekCalendar {
    fn default() -> Self {
        WeekCalendar::new(Weekday::Sunday)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use time::macros::date;
    use time::Weekday::*;

    fn dates(week: &Week) -> Vec<Date> {
        week.iter().map(Day::date).collect()
    }

    #[test]
    fn test_week_containing() {
        let week = WeekCalendar::default()
            .week_containing(date!(2023 - 11 - 16))
            .unwrap();
        assert_eq!(
            dates(&week),
            [
                date!(2023 - 11 - 12),
                date!(2023 - 11 - 13),
                date!(2023 - 11 - 14),
                date!(2023 - 11 - 15),
                date!(2023 - 11 - 16),
                date!(2023 - 11 - 17),
                date!(2023 - 11 - 18),
            ]
        );
    }

    #[test]
    fn test_week_containing_first_weekday() {
        let week = WeekCalendar::default()
            .week_containing(date!(2023 - 11 - 12))
            .unwrap();
        assert_eq!(week.first().date(), date!(2023 - 11 - 12));
        assert_eq!(week.last().date(), date!(2023 - 11 - 18));
    }

    #[test]
    fn test_week_containing_last_weekday() {
        let week = WeekCalendar::default()
            .week_containing(date!(2023 - 11 - 18))
            .unwrap();
        assert_eq!(week.first().date(), date!(2023 - 11 - 12));
        assert_eq!(week.last().date(), date!(2023 - 11 - 18));
    }

    #[test]
    fn test_week_containing_monday_start() {
        let calendar = WeekCalendar::new(Monday);
        let week = calendar.week_containing(date!(2023 - 11 - 12)).unwrap();
        assert_eq!(week.first().date(), date!(2023 - 11 - 06));
        assert_eq!(week.last().date(), date!(2023 - 11 - 12));
        let week = calendar.week_containing(date!(2023 - 11 - 13)).unwrap();
        assert_eq!(week.first().date(), date!(2023 - 11 - 13));
    }

    #[test]
    fn test_week_across_year() {
        let week = WeekCalendar::default()
            .week_containing(date!(2025 - 01 - 01))
            .unwrap();
        assert_eq!(week.first().date(), date!(2024 - 12 - 29));
        assert_eq!(week.last().date(), date!(2025 - 01 - 04));
    }

    #[test]
    fn test_weekday_ordinal() {
        let calendar = WeekCalendar::default();
        assert_eq!(calendar.weekday_ordinal(date!(2023 - 11 - 12)), 1);
        assert_eq!(calendar.weekday_ordinal(date!(2023 - 11 - 15)), 4);
        assert_eq!(calendar.weekday_ordinal(date!(2023 - 11 - 18)), 7);
        let calendar = WeekCalendar::new(Wednesday);
        assert_eq!(calendar.weekday_ordinal(date!(2023 - 11 - 15)), 1);
        assert_eq!(calendar.weekday_ordinal(date!(2023 - 11 - 14)), 7);
    }

    #[test]
    fn test_week_before_after() {
        let calendar = WeekCalendar::default();
        let week = calendar.week_containing(date!(2024 - 02 - 29)).unwrap();
        let before = calendar.week_before(&week).unwrap();
        let after = calendar.week_after(&week).unwrap();
        assert_eq!(before.first().date(), date!(2024 - 02 - 18));
        assert_eq!(before.last().date(), date!(2024 - 02 - 24));
        assert_eq!(after.first().date(), date!(2024 - 03 - 03));
        assert_eq!(after.last().date(), date!(2024 - 03 - 09));
    }

    #[test]
    fn test_week_containing_end_of_time() {
        let last = Date::MAX;
        // A week ending on the last representable date can be built ...
        let calendar = WeekCalendar::new(last.weekday().next());
        let week = calendar.week_containing(last).unwrap();
        assert_eq!(week.last().date(), last);
        // ... but not one that would run past it.
        let calendar = WeekCalendar::new(last.weekday());
        assert_eq!(
            calendar.week_containing(last),
            Err(CalendarError::DateOverflow {
                date: last,
                days: 1
            })
        );
    }

    #[test]
    fn test_week_containing_beginning_of_time() {
        let first = Date::MIN;
        let calendar = WeekCalendar::new(first.weekday());
        let week = calendar.week_containing(first).unwrap();
        assert_eq!(week.first().date(), first);
        let calendar = WeekCalendar::new(first.weekday().previous());
        assert!(matches!(
            calendar.week_containing(first),
            Err(CalendarError::DateOverflow { days: -1, .. })
        ));
    }

    #[test]
    fn test_checked_add_days_extremes() {
        let day = Day::new(date!(2025 - 01 - 22));
        for days in [i64::MAX, i64::MIN, i64::from(i32::MAX) + 1, -10_000_000] {
            assert_eq!(
                day.checked_add_days(days),
                Err(CalendarError::DateOverflow {
                    date: date!(2025 - 01 - 22),
                    days
                })
            );
        }
        assert_eq!(
            Day::new(Date::MAX).checked_add_days(0),
            Ok(Day::new(Date::MAX))
        );
        assert_eq!(
            Day::new(Date::MIN).checked_add_days(-1),
            Err(CalendarError::DateOverflow {
                date: Date::MIN,
                days: -1
            })
        );
    }

    #[test]
    fn test_show() {
        let day = Day::new(date!(2025 - 01 - 07));
        assert_eq!(day.show(false), "  7 ");
        assert_eq!(day.show(true), "[ 7]");
        assert_eq!(Day::new(date!(2025 - 01 - 22)).show(true), "[22]");
    }

    fn any_date() -> impl Strategy<Value = Date> {
        // 0001-01-01 through roughly 8977-01-01
        (1_721_426i32..5_000_000).prop_map(|jd| Date::from_julian_day(jd).unwrap())
    }

    fn any_weekday() -> impl Strategy<Value = Weekday> {
        prop::sample::select(vec![
            Monday, Tuesday, Wednesday, Thursday, Friday, Saturday, Sunday,
        ])
    }

    proptest! {
        #[test]
        fn week_is_seven_consecutive_days_containing_date(
            date in any_date(),
            first in any_weekday(),
        ) {
            let calendar = WeekCalendar::new(first);
            let week = calendar.week_containing(date).unwrap();
            prop_assert!(week.iter().any(|d| d.date() == date));
            prop_assert_eq!(week.first().weekday(), first);
            for (a, b) in week.iter().zip(week.iter().skip(1)) {
                prop_assert_eq!(a.checked_add_days(1).unwrap(), b);
            }
        }

        #[test]
        fn week_start_is_stable_within_week(
            date in any_date(),
            first in any_weekday(),
        ) {
            let calendar = WeekCalendar::new(first);
            let week = calendar.week_containing(date).unwrap();
            for day in week.iter() {
                prop_assert_eq!(calendar.week_containing(day.date()).unwrap(), week);
            }
        }
    }
}
