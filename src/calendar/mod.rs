mod day;
mod model;
mod pager;
mod widget;
pub(crate) use self::day::{WeekCalendar, DAYS_IN_WEEK};
pub(crate) use self::model::CalendarModel;
pub(crate) use self::pager::{Edge, Pager};
pub(crate) use self::widget::{Strip, CELL_PITCH, STRIP_HEIGHT};
use thiserror::Error;
use time::Date;

#[derive(Copy, Clone, Debug, Eq, Error, PartialEq)]
pub(crate) enum CalendarError {
    #[error("cannot move {date} by {days} days: reached the end of time")]
    DateOverflow { date: Date, days: i64 },
    #[error("calendar window contains no weeks")]
    EmptyWindow,
}
