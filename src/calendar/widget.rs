use super::day::{Day, WeekdayExt, DAYS_IN_WEEK};
use super::model::CalendarModel;
use super::pager::Pager;
use crate::theme::{SELECTED_STYLE, TITLE_STYLE, WEEKDAY_STYLE};
use ratatui::{buffer::Buffer, layout::Rect, style::Style, widgets::Widget};
use std::num::NonZeroUsize;
use time::Date;

/// Number of columns per day cell
const DAY_WIDTH: u16 = 6;

/// Columns of blank space after each day cell
const SPACING: u16 = 1;

/// Scroll distance between the left edges of adjacent day cells
pub(crate) const CELL_PITCH: u16 = DAY_WIDTH + SPACING;

/// Width of one week-group of cells, and thus of the visible strip
const GROUP_WIDTH: u16 = CELL_PITCH * 7;

const TITLE_ROW: u16 = 0;
const RULE_ROW: u16 = 1;
const WEEKDAY_ROW: u16 = 2;
const DATE_ROW: u16 = 3;

/// Number of lines taken up by the strip
pub(crate) const STRIP_HEIGHT: u16 = 4;

const ACS_HLINE: char = '─';

/// A one-week-wide viewport onto a [`CalendarModel`], scrolled `offset`
/// columns from the start of the window
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) struct Strip<'a> {
    model: &'a CalendarModel,
    today: Date,
    offset: usize,
}

impl<'a> Strip<'a> {
    pub(crate) fn new(model: &'a CalendarModel, today: Date, offset: usize) -> Self {
        Strip {
            model,
            today,
            offset,
        }
    }

    pub(crate) fn pager() -> Pager {
        Pager::new(
            NonZeroUsize::new(usize::from(GROUP_WIDTH)).expect("group width should be nonzero"),
        )
    }
}

impl Widget for Strip<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let left = area.width.saturating_sub(GROUP_WIDTH) / 2;
        let area = Rect {
            x: area.x + left,
            width: GROUP_WIDTH.min(area.width),
            height: STRIP_HEIGHT.min(area.height),
            ..area
        };
        let mut canvas = BufferCanvas::new(area, buf, self.offset);
        let first_visible = Self::pager().group_index(self.offset) * DAYS_IN_WEEK;
        if let Some(day) = self.model.day(first_visible) {
            canvas.draw_title(day);
        }
        let selected = self.model.selected_day();
        canvas.draw_selected(selected);
        canvas.draw_rule();
        canvas.style_row(WEEKDAY_ROW, WEEKDAY_STYLE);
        // At most eight cells can overlap the visible columns
        let first_cell = self.offset / usize::from(CELL_PITCH);
        for i in first_cell..=(first_cell + DAYS_IN_WEEK) {
            let Some(day) = self.model.day(i) else {
                break;
            };
            let style = if day == selected {
                SELECTED_STYLE
            } else {
                Style::new()
            };
            canvas.draw_day(i, day, day.date() == self.today, style);
        }
    }
}

#[derive(Debug, Eq, PartialEq)]
struct BufferCanvas<'a> {
    area: Rect,
    buf: &'a mut Buffer,
    scroll: usize,
}

impl<'a> BufferCanvas<'a> {
    fn new(area: Rect, buf: &'a mut Buffer, scroll: usize) -> Self {
        Self { area, buf, scroll }
    }

    fn draw_title(&mut self, day: Day) {
        let title = format!("{} {}", day.month(), day.year());
        self.mvprint(TITLE_ROW, 0, &title, TITLE_STYLE);
    }

    fn draw_selected(&mut self, day: Day) {
        let s = day.to_string();
        let width = u16::try_from(s.chars().count()).unwrap_or(u16::MAX);
        self.mvprint(
            TITLE_ROW,
            self.area.width.saturating_sub(width),
            &s,
            Style::new(),
        );
    }

    fn draw_rule(&mut self) {
        let rule = String::from(ACS_HLINE).repeat(self.area.width.into());
        self.mvprint(RULE_ROW, 0, &rule, Style::new());
    }

    fn style_row(&mut self, y: u16, style: Style) {
        if y < self.area.height {
            let row = Rect {
                y: self.area.y + y,
                height: 1,
                ..self.area
            };
            self.buf.set_style(row, style);
        }
    }

    // `index` is the position of `day` within the window; its cell is drawn
    // only as far as it overlaps the visible columns.
    fn draw_day(&mut self, index: usize, day: Day, is_today: bool, style: Style) {
        let start = index * usize::from(CELL_PITCH);
        let visible = self.scroll..(self.scroll + usize::from(self.area.width));
        if start + usize::from(DAY_WIDTH) <= visible.start || start >= visible.end {
            return;
        }
        let weekday = format!("  {}  ", day.weekday().abbrev());
        let date = format!(" {} ", day.show(is_today));
        for (col, (wch, dch)) in (start..).zip(weekday.chars().zip(date.chars())) {
            let Some(x) = col
                .checked_sub(self.scroll)
                .and_then(|x| u16::try_from(x).ok())
            else {
                continue;
            };
            self.mvaddch(WEEKDAY_ROW, x, wch, style);
            self.mvaddch(DATE_ROW, x, dch, style);
        }
    }

    fn mvaddch(&mut self, y: u16, x: u16, ch: char, style: Style) {
        if y < self.area.height && x < self.area.width {
            if let Some(cell) = self.buf.cell_mut((x + self.area.x, y + self.area.y)) {
                cell.set_char(ch).set_style(style);
            }
        }
    }

    fn mvprint(&mut self, y: u16, x: u16, s: &str, style: Style) {
        for (x, ch) in (x..self.area.width).zip(s.chars()) {
            self.mvaddch(y, x, ch, style);
        }
    }
}
