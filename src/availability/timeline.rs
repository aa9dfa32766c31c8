//! Validated convention timeline.

use chrono::{NaiveDateTime, TimeDelta};
use std::collections::HashMap;

use crate::error::{Result, ScheduleError};
use crate::models::{SlotRange, Timeslot};

/// A convention's ordered timeslot sequence.
///
/// Slots are sorted, non-overlapping and share one duration. Gaps between
/// slots are allowed (e.g. a timeline with overnight hours removed), but a
/// window may not span a gap. Slot indices are renumbered to positions.
#[derive(Debug, Clone, PartialEq)]
pub struct Timeline {
    slots: Vec<Timeslot>,
    slot_duration: Option<TimeDelta>,
    /// `gap_after[i]` is true if slot `i + 1` does not start where slot `i` ends.
    gap_after: Vec<bool>,
    by_start: HashMap<NaiveDateTime, usize>,
}

impl Timeline {
    /// Validates and indexes a timeslot sequence.
    pub fn new(mut slots: Vec<Timeslot>) -> Result<Self> {
        let slot_duration = slots.first().map(Timeslot::duration);
        if let Some(duration) = slot_duration {
            if duration <= TimeDelta::zero() {
                return Err(ScheduleError::configuration(
                    "timeline slots must have a positive duration",
                ));
            }
        }

        for pair in slots.windows(2) {
            let (prev, next) = (&pair[0], &pair[1]);
            if Some(next.duration()) != slot_duration {
                return Err(ScheduleError::configuration(format!(
                    "timeslot at {} differs in length from the first slot",
                    next.start
                )));
            }
            if next.start < prev.end {
                return Err(ScheduleError::configuration(format!(
                    "timeslot at {} overlaps or precedes the slot at {}",
                    next.start, prev.start
                )));
            }
        }

        let mut by_start = HashMap::with_capacity(slots.len());
        for (position, slot) in slots.iter_mut().enumerate() {
            slot.index = position;
            by_start.insert(slot.start, position);
        }
        let gap_after = slots
            .windows(2)
            .map(|pair| !pair[0].is_followed_by(&pair[1]))
            .collect();

        Ok(Self {
            slots,
            slot_duration,
            gap_after,
            by_start,
        })
    }

    /// Number of slots.
    #[inline]
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    /// Whether the timeline has no slots.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Common slot length (`None` for an empty timeline).
    pub fn slot_duration(&self) -> Option<TimeDelta> {
        self.slot_duration
    }

    /// All slots in order.
    pub fn slots(&self) -> &[Timeslot] {
        &self.slots
    }

    /// Slot at a position.
    pub fn get(&self, index: usize) -> Option<&Timeslot> {
        self.slots.get(index)
    }

    /// Position of a slot with the same start and end.
    pub fn position_of(&self, slot: &Timeslot) -> Option<usize> {
        self.by_start
            .get(&slot.start)
            .copied()
            .filter(|&i| self.slots[i].end == slot.end)
    }

    /// Position of the slot starting at `start`.
    pub fn position_at(&self, start: NaiveDateTime) -> Option<usize> {
        self.by_start.get(&start).copied()
    }

    /// Whether the range lies on the timeline with no gap inside it.
    pub fn is_contiguous(&self, range: SlotRange) -> bool {
        if range.len == 0 || range.end() > self.slots.len() {
            return false;
        }
        !self.gap_after[range.start..range.end() - 1]
            .iter()
            .any(|&gap| gap)
    }

    /// Start of the first and end of the last slot of a range.
    pub fn span(&self, range: SlotRange) -> Option<(NaiveDateTime, NaiveDateTime)> {
        if range.len == 0 {
            return None;
        }
        let first = self.slots.get(range.start)?;
        let last = self.slots.get(range.end() - 1)?;
        Some((first.start, last.end))
    }
}
