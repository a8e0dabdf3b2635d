use super::day::WEEK_SPAN;
use std::cmp::Ordering;
use std::num::NonZeroUsize;

/// Translates horizontal scroll offsets into week-group positions.
///
/// A week-group is the span of scroll distance occupied by one week of
/// cells, spacing included; its width is dictated by the layout of whoever
/// draws the strip.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) struct Pager {
    group_width: NonZeroUsize,
}

impl Pager {
    pub(crate) fn new(group_width: NonZeroUsize) -> Self {
        Pager { group_width }
    }

    pub(crate) fn group_width(&self) -> usize {
        self.group_width.get()
    }

    /// Index of the week-group that the scroll offset falls in
    pub(crate) fn group_index(&self, offset: usize) -> usize {
        offset / self.group_width
    }

    /// Scroll offset at which the given week-group starts
    pub(crate) fn group_offset(&self, group: usize) -> usize {
        group.saturating_mul(self.group_width.get())
    }

    /// Decides where a drag that began at `drag_start` and was released at
    /// `offset` comes to rest.
    ///
    /// The strip snaps to the start of the group under `offset` if no more
    /// than half of that group has been scrolled past, and to the start of the
    /// following group otherwise.  If the resting group differs from the one
    /// the drag began in, the selection moves by one week in that direction.
    pub(crate) fn settle(&self, drag_start: usize, offset: usize) -> Settle {
        let width = self.group_width.get();
        let group = self.group_index(offset);
        let remainder = offset % width;
        let target = if remainder.saturating_mul(2) <= width {
            group
        } else {
            group.saturating_add(1)
        };
        let shift_days = match target.cmp(&self.group_index(drag_start)) {
            Ordering::Less => Some(-WEEK_SPAN),
            Ordering::Equal => None,
            Ordering::Greater => Some(WEEK_SPAN),
        };
        Settle {
            group: target,
            offset: self.group_offset(target),
            shift_days,
        }
    }
}

/// Outcome of releasing a drag
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) struct Settle {
    group: usize,
    offset: usize,
    shift_days: Option<i64>,
}

impl Settle {
    /// The week-group the strip comes to rest on
    pub(crate) fn group(&self) -> usize {
        self.group
    }

    /// The scroll offset the strip comes to rest at
    pub(crate) fn offset(&self) -> usize {
        self.offset
    }

    /// How far to move the selected day, if at all
    pub(crate) fn shift_days(&self) -> Option<i64> {
        self.shift_days
    }

    /// Reports whether the strip has come to rest on the first or last of
    /// `week_count` week-groups, in which case the window must grow before
    /// the user can scroll any further in that direction
    pub(crate) fn edge(&self, week_count: usize) -> Option<Edge> {
        if self.group == 0 {
            Some(Edge::Start)
        } else if self.group.saturating_add(1) >= week_count {
            Some(Edge::End)
        } else {
            None
        }
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) enum Edge {
    Start,
    End,
}
