//! Timeslot model.
//!
//! A timeslot is a fixed-length interval on a convention's timeline.
//! Rooms reference timeslots, they never own them.
//!
//! # Time Model
//! All times are naive local datetimes of the convention venue.

use chrono::{NaiveDateTime, TimeDelta};
use serde::{Deserialize, Serialize};
use std::fmt;

/// A discrete interval [start, end) on a convention timeline.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Timeslot {
    /// Position on the convention timeline (0-indexed).
    pub index: usize,
    /// Interval start (inclusive).
    pub start: NaiveDateTime,
    /// Interval end (exclusive).
    pub end: NaiveDateTime,
}

impl Timeslot {
    /// Creates a new timeslot.
    pub fn new(index: usize, start: NaiveDateTime, end: NaiveDateTime) -> Self {
        Self { index, start, end }
    }

    /// Length of this slot.
    #[inline]
    pub fn duration(&self) -> TimeDelta {
        self.end - self.start
    }

    /// Whether a datetime falls within this slot.
    #[inline]
    pub fn contains(&self, time: NaiveDateTime) -> bool {
        time >= self.start && time < self.end
    }

    /// Whether two slots overlap.
    pub fn overlaps(&self, other: &Self) -> bool {
        self.start < other.end && other.start < self.end
    }

    /// Whether `next` starts exactly where this slot ends.
    #[inline]
    pub fn is_followed_by(&self, next: &Self) -> bool {
        self.end == next.start
    }
}

/// A half-open range of timeline indices: `[start, start + len)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct SlotRange {
    /// First slot index.
    pub start: usize,
    /// Number of slots.
    pub len: usize,
}

impl SlotRange {
    /// Creates a range of `len` slots starting at `start`.
    pub fn new(start: usize, len: usize) -> Self {
        Self { start, len }
    }

    /// One past the last slot index.
    #[inline]
    pub fn end(&self) -> usize {
        self.start + self.len
    }

    /// Iterates over the slot indices.
    pub fn indices(&self) -> std::ops::Range<usize> {
        self.start..self.end()
    }

    /// Whether `index` lies in the range.
    #[inline]
    pub fn contains(&self, index: usize) -> bool {
        index >= self.start && index < self.end()
    }

    /// Whether two ranges share a slot.
    pub fn overlaps(&self, other: &Self) -> bool {
        self.start < other.end() && other.start < self.end()
    }
}

impl fmt::Display for SlotRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {})", self.start, self.end())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn at(hour: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2013, 4, 26)
            .unwrap()
            .and_hms_opt(hour, 0, 0)
            .unwrap()
    }

    #[test]
    fn test_timeslot_bounds() {
        let slot = Timeslot::new(0, at(16), at(17));
        assert_eq!(slot.duration(), TimeDelta::hours(1));
        assert!(slot.contains(at(16)));
        assert!(!slot.contains(at(17))); // exclusive end
    }

    #[test]
    fn test_timeslot_adjacency() {
        let a = Timeslot::new(0, at(16), at(17));
        let b = Timeslot::new(1, at(17), at(18));
        let c = Timeslot::new(2, at(19), at(20));
        assert!(a.is_followed_by(&b));
        assert!(!b.is_followed_by(&c));
        assert!(!a.overlaps(&b));
    }

    #[test]
    fn test_slot_range() {
        let r = SlotRange::new(3, 4);
        assert_eq!(r.end(), 7);
        assert!(r.contains(3));
        assert!(r.contains(6));
        assert!(!r.contains(7));
        assert_eq!(r.indices().collect::<Vec<_>>(), vec![3, 4, 5, 6]);
        assert_eq!(r.to_string(), "[3, 7)");
    }

    #[test]
    fn test_slot_range_overlap() {
        let a = SlotRange::new(0, 3);
        assert!(a.overlaps(&SlotRange::new(2, 2)));
        assert!(!a.overlaps(&SlotRange::new(3, 1)));
    }
}
