use crate::calendar::{
    CalendarModel, Edge, Pager, Strip, CELL_PITCH, DAYS_IN_WEEK, STRIP_HEIGHT,
};
use crate::help::Help;
use crate::theme::BASE_STYLE;
use crossterm::event::{read, KeyCode, KeyEvent, KeyModifiers};
use ratatui::{
    backend::Backend,
    buffer::Buffer,
    layout::{Flex, Layout, Rect},
    widgets::Widget,
    Terminal,
};
use std::io::{self, Write};
use time::Date;

#[derive(Clone, Debug, Eq, PartialEq)]
pub(crate) struct App {
    today: Date,
    model: CalendarModel,
    pager: Pager,
    /// Horizontal scroll position of the strip, in columns from the start of
    /// the window
    offset: usize,
    /// Scroll position at which the drag in progress, if any, began
    drag_start: Option<usize>,
    state: AppState,
}

impl App {
    pub(crate) fn new(today: Date, model: CalendarModel) -> App {
        let pager = Strip::pager();
        let week = model.index_of_selected_day().map_or(1, |i| i / DAYS_IN_WEEK);
        let offset = pager.group_offset(week);
        App {
            today,
            model,
            pager,
            offset,
            drag_start: None,
            state: AppState::Strip,
        }
    }

    pub(crate) fn run<B: Backend>(mut self, mut terminal: Terminal<B>) -> io::Result<()> {
        while !self.quitting() {
            self.draw(&mut terminal)?;
            self.handle_input()?;
        }
        Ok(())
    }

    fn draw<B: Backend>(&self, terminal: &mut Terminal<B>) -> io::Result<()> {
        terminal.draw(|frame| frame.render_widget(self, frame.area()))?;
        Ok(())
    }

    fn handle_input(&mut self) -> io::Result<()> {
        let normal_modifiers = KeyModifiers::NONE | KeyModifiers::SHIFT;
        if let Some(KeyEvent {
            code, modifiers, ..
        }) = read()?.as_key_press_event()
        {
            if modifiers == KeyModifiers::CONTROL && code == KeyCode::Char('c') {
                self.state = AppState::Quitting;
            } else if !normal_modifiers.contains(modifiers) || !self.handle_key(code) {
                self.beep()?;
            }
        }
        // else: Redraw on resize, and we might as well redraw on other stuff
        // too
        Ok(())
    }

    // Returns `false` if the key was invalid or had no effect
    fn handle_key(&mut self, key: KeyCode) -> bool {
        match self.state {
            AppState::Strip => match key {
                KeyCode::Char(c @ '1'..='7') => self.tap(c),
                KeyCode::Char('h') | KeyCode::Left => self.drag(Direction::Backward),
                KeyCode::Char('l') | KeyCode::Right => self.drag(Direction::Forward),
                KeyCode::Char(' ') | KeyCode::Enter => self.release(),
                KeyCode::Char('[') => self.swipe(Direction::Backward),
                KeyCode::Char(']') => self.swipe(Direction::Forward),
                KeyCode::Char('0') | KeyCode::Home => self.reset(),
                KeyCode::Char('q') | KeyCode::Esc => {
                    self.state = AppState::Quitting;
                    true
                }
                KeyCode::Char('?') => {
                    self.state = AppState::Helping;
                    true
                }
                _ => false,
            },
            AppState::Helping => {
                self.state = AppState::Strip;
                true
            }
            AppState::Quitting => false,
        }
    }

    fn beep(&self) -> io::Result<()> {
        io::stdout().write_all(b"\x07")
    }

    fn quitting(&self) -> bool {
        self.state == AppState::Quitting
    }

    fn max_offset(&self) -> usize {
        self.pager
            .group_offset(self.model.week_count().saturating_sub(1))
    }

    /// Selects the `cell`-th visible day (counting from '1')
    fn tap(&mut self, cell: char) -> bool {
        if self.drag_start.is_some() {
            return false;
        }
        let Some(n) = cell.to_digit(10).and_then(|n| usize::try_from(n).ok()) else {
            return false;
        };
        let index = self.pager.group_index(self.offset) * DAYS_IN_WEEK + n.saturating_sub(1);
        match self.model.day(index) {
            Some(day) => {
                self.model.select_day(day);
                true
            }
            None => false,
        }
    }

    /// Moves the strip by one cell.  A single drag never travels more than
    /// one week-group from where it began.
    fn drag(&mut self, direction: Direction) -> bool {
        let start = self.drag_start.unwrap_or(self.offset);
        let width = self.pager.group_width();
        let pitch = usize::from(CELL_PITCH);
        let offset = match direction {
            Direction::Backward => self
                .offset
                .saturating_sub(pitch)
                .max(start.saturating_sub(width)),
            Direction::Forward => (self.offset + pitch)
                .min(start + width)
                .min(self.max_offset()),
        };
        if offset == self.offset {
            return false;
        }
        self.offset = offset;
        self.drag_start = Some(start);
        true
    }

    /// Ends the drag in progress, snapping the strip to a week-group and
    /// growing the window if that group is at either end of it
    fn release(&mut self) -> bool {
        let Some(start) = self.drag_start.take() else {
            return false;
        };
        let settle = self.pager.settle(start, self.offset);
        log::debug!(
            "Drag from {start} to {} settled on group {}",
            self.offset,
            settle.group()
        );
        self.offset = settle.offset();
        let mut ok = true;
        if let Some(days) = settle.shift_days() {
            if let Err(e) = self.model.shift_selected_day_by(days) {
                log::warn!("Not moving selection: {e}");
                ok = false;
            }
        }
        match settle.edge(self.model.week_count()) {
            Some(Edge::Start) => match self.model.prepend_week() {
                Ok(_) => {
                    // Everything already in the window moved one group to the
                    // right; follow it so that the visible week stays put.
                    self.offset += self.pager.group_width();
                }
                Err(e) => {
                    log::warn!("Cannot extend calendar backwards: {e}");
                    ok = false;
                }
            },
            Some(Edge::End) => {
                if let Err(e) = self.model.append_week() {
                    log::warn!("Cannot extend calendar forwards: {e}");
                    ok = false;
                }
            }
            None => (),
        }
        ok
    }

    /// Drags the strip a full week-group and releases it
    fn swipe(&mut self, direction: Direction) -> bool {
        if self.drag_start.is_some() {
            return false;
        }
        let width = self.pager.group_width();
        let target = match direction {
            Direction::Backward => self.offset.checked_sub(width),
            Direction::Forward => Some(self.offset + width).filter(|&o| o <= self.max_offset()),
        };
        let Some(target) = target else {
            return false;
        };
        self.drag_start = Some(self.offset);
        self.offset = target;
        self.release()
    }

    /// Rebuilds the strip around today
    fn reset(&mut self) -> bool {
        match CalendarModel::new(self.today, self.model.calendar()) {
            Ok(model) => {
                *self = App::new(self.today, model);
                true
            }
            Err(e) => {
                log::warn!("Cannot jump to today: {e}");
                false
            }
        }
    }
}

impl Widget for &App {
    fn render(self, area: Rect, buf: &mut Buffer) {
        buf.set_style(area, BASE_STYLE);
        let [strip_area] = Layout::vertical([STRIP_HEIGHT])
            .flex(Flex::Center)
            .areas(area);
        Strip::new(&self.model, self.today, self.offset).render(strip_area, buf);
        if self.state == AppState::Helping {
            Help.render(area, buf);
        }
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
enum AppState {
    Strip,
    Helping,
    Quitting,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
enum Direction {
    Backward,
    Forward,
}
