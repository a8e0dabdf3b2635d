use super::day::{Day, Week, WeekCalendar, DAYS_IN_WEEK, WEEK_SPAN};
use super::CalendarError;
use std::collections::VecDeque;
use std::ops::Range;
use time::Date;

/// The materialized window of the strip: whole weeks of days laid end to end,
/// together with the day the user has selected.
///
/// The window only ever grows, one week at a time, at either end.  The
/// selected day may lie outside of it while a swipe has moved the selection
/// ahead of window growth.
#[derive(Clone, Debug, Eq, PartialEq)]
pub(crate) struct CalendarModel {
    calendar: WeekCalendar,
    // Invariant: consecutive weeks are contiguous
    weeks: VecDeque<Week>,
    selected: Day,
}

impl CalendarModel {
    /// Builds a window of three weeks (the week before the one containing
    /// `selected`, that week, and the week after) and selects `selected`.
    pub(crate) fn new(selected: Date, calendar: WeekCalendar) -> Result<Self, CalendarError> {
        let selected = Day::new(selected);
        let last_week = selected.checked_add_days(-WEEK_SPAN)?;
        let next_week = selected.checked_add_days(WEEK_SPAN)?;
        let weeks = VecDeque::from([
            calendar.week_containing(last_week.date())?,
            calendar.week_containing(selected.date())?,
            calendar.week_containing(next_week.date())?,
        ]);
        Ok(CalendarModel {
            calendar,
            weeks,
            selected,
        })
    }

    pub(crate) fn calendar(&self) -> WeekCalendar {
        self.calendar
    }

    pub(crate) fn selected_day(&self) -> Day {
        self.selected
    }

    /// Number of days in the window; always a multiple of seven
    pub(crate) fn len(&self) -> usize {
        self.weeks.len() * DAYS_IN_WEEK
    }

    pub(crate) fn week_count(&self) -> usize {
        self.weeks.len()
    }

    pub(crate) fn days(&self) -> impl Iterator<Item = Day> + '_ {
        self.weeks.iter().flat_map(Week::iter)
    }

    pub(crate) fn day(&self, index: usize) -> Option<Day> {
        self.weeks
            .get(index / DAYS_IN_WEEK)
            .and_then(|w| w.get(index % DAYS_IN_WEEK))
    }

    /// Returns the position of the selected day within the window, or `None`
    /// if it currently lies outside of it
    pub(crate) fn index_of_selected_day(&self) -> Option<usize> {
        self.days().position(|d| d == self.selected)
    }

    /// Selects `day`.  Returns the previously selected day if the selection
    /// changed, so that the caller knows which two cells to restyle.
    pub(crate) fn select_day(&mut self, day: Day) -> Option<Day> {
        if day == self.selected {
            None
        } else {
            log::debug!("Selected {day} (was {})", self.selected);
            Some(std::mem::replace(&mut self.selected, day))
        }
    }

    /// Moves the selection `days` days into the future (or the past, if
    /// negative).  On failure, the selection is left unchanged.
    pub(crate) fn shift_selected_day_by(&mut self, days: i64) -> Result<(), CalendarError> {
        let day = self.selected.checked_add_days(days)?;
        log::debug!("Shifted selection by {days} days to {day}");
        self.selected = day;
        Ok(())
    }

    /// Adds the week preceding the window to the front of the window and
    /// returns the indices of the new days.  Indices of all days already in
    /// the window increase by seven.
    pub(crate) fn prepend_week(&mut self) -> Result<Range<usize>, CalendarError> {
        let first = self.weeks.front().ok_or(CalendarError::EmptyWindow)?;
        let week = self.calendar.week_before(first)?;
        log::debug!("Prepending week starting {}", week.first());
        self.weeks.push_front(week);
        Ok(0..DAYS_IN_WEEK)
    }

    /// Adds the week following the window to the end of the window and
    /// returns the indices of the new days
    pub(crate) fn append_week(&mut self) -> Result<Range<usize>, CalendarError> {
        let last = self.weeks.back().ok_or(CalendarError::EmptyWindow)?;
        let week = self.calendar.week_after(last)?;
        log::debug!("Appending week starting {}", week.first());
        self.weeks.push_back(week);
        Ok((self.len() - DAYS_IN_WEEK)..self.len())
    }
}
