//! Room opening policy.
//!
//! Decides which timeline slots a room is opened for before allocation:
//! daily quiet hours (typically overnight) and absolute blocked periods
//! (setup, teardown, venue events).
//!
//! # Precedence
//! A slot is admitted iff its start does not fall in any quiet window AND
//! the slot does not overlap any blocked period.

use chrono::{NaiveDateTime, NaiveTime};
use serde::{Deserialize, Serialize};

use crate::models::Timeslot;

/// A recurring daily window. Wraps midnight when `end < start`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DailyWindow {
    /// Window start (inclusive).
    pub start: NaiveTime,
    /// Window end (exclusive).
    pub end: NaiveTime,
}

impl DailyWindow {
    /// Creates a daily window.
    pub fn new(start: NaiveTime, end: NaiveTime) -> Self {
        Self { start, end }
    }

    /// Whether a time of day falls in the window.
    pub fn contains(&self, time: NaiveTime) -> bool {
        if self.start <= self.end {
            time >= self.start && time < self.end
        } else {
            time >= self.start || time < self.end
        }
    }
}

/// An absolute interval [start, end) in which no room is opened.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlockedPeriod {
    /// Interval start (inclusive).
    pub start: NaiveDateTime,
    /// Interval end (exclusive).
    pub end: NaiveDateTime,
}

impl BlockedPeriod {
    /// Creates a blocked period.
    pub fn new(start: NaiveDateTime, end: NaiveDateTime) -> Self {
        Self { start, end }
    }

    fn overlaps(&self, slot: &Timeslot) -> bool {
        self.start < slot.end && slot.start < self.end
    }
}

/// Filter applied to the timeline when rooms are opened.
///
/// The default policy admits every slot.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AvailabilityPolicy {
    /// Daily windows in which events do not start.
    pub quiet_hours: Vec<DailyWindow>,
    /// Absolute periods in which no room is available.
    pub blocked_periods: Vec<BlockedPeriod>,
}

impl AvailabilityPolicy {
    /// Creates a policy that admits every slot.
    pub fn always_open() -> Self {
        Self::default()
    }

    /// Adds daily quiet hours.
    pub fn with_quiet_hours(mut self, start: NaiveTime, end: NaiveTime) -> Self {
        self.quiet_hours.push(DailyWindow::new(start, end));
        self
    }

    /// Adds a blocked period.
    pub fn with_blocked(mut self, start: NaiveDateTime, end: NaiveDateTime) -> Self {
        self.blocked_periods.push(BlockedPeriod::new(start, end));
        self
    }

    /// Whether a room may be opened for this slot.
    pub fn admits(&self, slot: &Timeslot) -> bool {
        // Blocked periods first
        if self.blocked_periods.iter().any(|b| b.overlaps(slot)) {
            return false;
        }
        let time_of_day = slot.start.time();
        !self.quiet_hours.iter().any(|w| w.contains(time_of_day))
    }

    /// The admitted subset of `slots`, in order.
    pub fn apply(&self, slots: &[Timeslot]) -> Vec<Timeslot> {
        slots.iter().filter(|s| self.admits(s)).cloned().collect()
    }
}
