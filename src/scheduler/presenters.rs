//! Presenter bookings over the timeline.
//!
//! A presenter cannot be in two rooms at once. [`PresenterCalendar`]
//! records the slots each presenter is already booked for, both within a
//! run and from submissions placed by earlier runs.

use std::collections::HashMap;

use super::{DurationTable, OPEN_PRESENTER};
use crate::availability::Timeline;
use crate::error::Result;
use crate::models::{SlotRange, Submission};

/// Booked slots per presenter.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PresenterCalendar {
    timeline_len: usize,
    busy: HashMap<String, Vec<bool>>,
}

impl PresenterCalendar {
    /// Creates an empty calendar over `timeline_len` slots.
    pub fn new(timeline_len: usize) -> Self {
        Self {
            timeline_len,
            busy: HashMap::new(),
        }
    }

    /// Books the presenters of already-scheduled submissions.
    ///
    /// Each submission's span is its start slot plus the slot count its
    /// duration level needs under `durations`. Submissions whose start is
    /// not on the timeline are skipped.
    pub fn from_scheduled<'a, I>(
        submissions: I,
        timeline: &Timeline,
        durations: &DurationTable,
    ) -> Result<Self>
    where
        I: IntoIterator<Item = &'a Submission>,
    {
        let mut calendar = Self::new(timeline.len());
        let Some(slot_duration) = timeline.slot_duration() else {
            return Ok(calendar);
        };
        for submission in submissions {
            if !submission.is_scheduled() {
                continue;
            }
            let Some(index) = submission.start.and_then(|s| timeline.position_at(s)) else {
                tracing::debug!(
                    submission = %submission.id,
                    "scheduled start is off the timeline"
                );
                continue;
            };
            let needed =
                durations.required_slots(submission.duration, slot_duration, timeline.len())?;
            let range = SlotRange::new(index, needed);
            for presenter in &submission.presenters {
                calendar.book(presenter, range);
            }
        }
        Ok(calendar)
    }

    /// Number of slots the calendar covers.
    pub fn timeline_len(&self) -> usize {
        self.timeline_len
    }

    /// Whether nobody is booked.
    pub fn is_empty(&self) -> bool {
        self.busy.is_empty()
    }

    /// Marks a presenter busy over a range. The placeholder presenter is
    /// never booked; slots past the timeline are ignored.
    pub fn book(&mut self, presenter: &str, range: SlotRange) {
        if presenter == OPEN_PRESENTER {
            return;
        }
        let len = self.timeline_len;
        let busy = self
            .busy
            .entry(presenter.to_string())
            .or_insert_with(|| vec![false; len]);
        let end = range.end().min(len);
        let start = range.start.min(end);
        busy[start..end].fill(true);
    }

    /// Whether a presenter has no booking inside the range.
    pub fn is_free(&self, presenter: &str, range: SlotRange) -> bool {
        match self.busy.get(presenter) {
            Some(busy) => {
                let end = range.end().min(busy.len());
                let start = range.start.min(end);
                !busy[start..end].iter().any(|&b| b)
            }
            None => true,
        }
    }
}
