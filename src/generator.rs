//! Timeslot generation.
//!
//! Splits a convention's `[start, end)` span into contiguous slots of a
//! fixed length. Generation is lazy: [`TimeslotGenerator::iter`] yields
//! slots on demand and can be called again to restart from the beginning.
//!
//! A trailing remainder shorter than one slot is dropped, so every emitted
//! slot is exactly `slot_duration` long and lies within the bounds.

use chrono::{NaiveDateTime, TimeDelta};

use crate::error::{Result, ScheduleError};
use crate::models::Timeslot;

/// Validated timeslot generation parameters.
///
/// # Example
///
/// ```
/// use chrono::{NaiveDate, TimeDelta};
/// use trax_schedule::generator::TimeslotGenerator;
///
/// let start = NaiveDate::from_ymd_opt(2013, 4, 26).unwrap().and_hms_opt(16, 0, 0).unwrap();
/// let end = NaiveDate::from_ymd_opt(2013, 4, 28).unwrap().and_hms_opt(16, 0, 0).unwrap();
/// let generator = TimeslotGenerator::new(start, end, TimeDelta::hours(1)).unwrap();
/// assert_eq!(generator.iter().count(), 48);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimeslotGenerator {
    start: NaiveDateTime,
    end: NaiveDateTime,
    slot_duration: TimeDelta,
    limit: Option<usize>,
}

impl TimeslotGenerator {
    /// Creates a generator.
    ///
    /// Fails if `slot_duration` is not positive or `end <= start`.
    pub fn new(start: NaiveDateTime, end: NaiveDateTime, slot_duration: TimeDelta) -> Result<Self> {
        if slot_duration <= TimeDelta::zero() {
            return Err(ScheduleError::configuration(format!(
                "slot duration must be positive, got {} minutes",
                slot_duration.num_minutes()
            )));
        }
        if end <= start {
            return Err(ScheduleError::configuration(format!(
                "convention end {end} is not after start {start}"
            )));
        }
        tracing::debug!(%start, %end, slot_minutes = slot_duration.num_minutes(), "timeslot generator configured");
        Ok(Self {
            start,
            end,
            slot_duration,
            limit: None,
        })
    }

    /// Caps the number of generated slots.
    pub fn with_limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }

    /// Sets or clears the cap.
    pub fn with_optional_limit(mut self, limit: Option<usize>) -> Self {
        self.limit = limit;
        self
    }

    /// Slot length.
    pub fn slot_duration(&self) -> TimeDelta {
        self.slot_duration
    }

    /// Number of slots [`iter`](Self::iter) will yield.
    pub fn len(&self) -> usize {
        let span = (self.end - self.start).num_milliseconds();
        let slot = self.slot_duration.num_milliseconds().max(1);
        let full = usize::try_from(span / slot).unwrap_or(0);
        match self.limit {
            Some(limit) => full.min(limit),
            None => full,
        }
    }

    /// Whether no slot fits (only possible with a zero limit or a span
    /// shorter than one slot).
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Lazily yields the slots from the beginning.
    pub fn iter(&self) -> Timeslots {
        Timeslots {
            next_start: self.start,
            end: self.end,
            slot_duration: self.slot_duration,
            remaining: self.limit,
            index: 0,
        }
    }

    /// Collects all slots.
    pub fn generate(&self) -> Vec<Timeslot> {
        self.iter().collect()
    }
}

impl<'a> IntoIterator for &'a TimeslotGenerator {
    type Item = Timeslot;
    type IntoIter = Timeslots;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Iterator over generated timeslots.
#[derive(Debug, Clone)]
pub struct Timeslots {
    next_start: NaiveDateTime,
    end: NaiveDateTime,
    slot_duration: TimeDelta,
    remaining: Option<usize>,
    index: usize,
}

impl Iterator for Timeslots {
    type Item = Timeslot;

    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining == Some(0) {
            return None;
        }
        let slot_end = self.next_start.checked_add_signed(self.slot_duration)?;
        if slot_end > self.end {
            return None;
        }

        let slot = Timeslot::new(self.index, self.next_start, slot_end);
        self.next_start = slot_end;
        self.index += 1;
        if let Some(remaining) = self.remaining.as_mut() {
            *remaining -= 1;
        }
        Some(slot)
    }
}
