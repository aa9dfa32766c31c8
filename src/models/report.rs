//! Assignment report model.
//!
//! The outcome of an allocation run: which submissions were placed where,
//! and which could not be placed and why. A report with unplaced
//! submissions is still a successful run.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

use super::SlotRange;

/// Result of an allocation run.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AssignmentReport {
    /// Placed submissions, in processing order.
    pub assigned: Vec<Placement>,
    /// Submissions that could not be placed, in processing order.
    pub unassigned: Vec<Unplaced>,
}

/// A submission placed in a room over a contiguous slot range.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Placement {
    /// Placed submission ID.
    pub submission_id: String,
    /// Assigned room ID.
    pub room_id: String,
    /// Start of the first slot.
    pub start: NaiveDateTime,
    /// End of the last slot.
    pub end: NaiveDateTime,
    /// Timeline slots occupied.
    pub slots: SlotRange,
}

/// A submission the allocator could not place.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Unplaced {
    /// Submission ID.
    pub submission_id: String,
    /// Why no placement was found.
    pub reason: InfeasibleReason,
}

/// Why a submission could not be placed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum InfeasibleReason {
    /// The submission's pool has no rooms.
    PoolEmpty,
    /// No room in the pool provides the mandatory resources.
    UnmetResources,
    /// Free windows exist, but only while a presenter is busy elsewhere.
    PresenterConflict,
    /// No room in the pool has a long enough contiguous free window.
    NoFreeWindow,
}

impl fmt::Display for InfeasibleReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            InfeasibleReason::PoolEmpty => "no rooms in pool",
            InfeasibleReason::UnmetResources => "no room provides the required resources",
            InfeasibleReason::PresenterConflict => "presenters are busy in every free window",
            InfeasibleReason::NoFreeWindow => "no free window of the required length",
        };
        f.write_str(text)
    }
}

impl Placement {
    /// Number of slots occupied.
    #[inline]
    pub fn slot_count(&self) -> usize {
        self.slots.len
    }
}

impl AssignmentReport {
    /// Creates an empty report.
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a placement.
    pub fn add_placement(&mut self, placement: Placement) {
        self.assigned.push(placement);
    }

    /// Records an unplaced submission.
    pub fn add_unplaced(&mut self, submission_id: impl Into<String>, reason: InfeasibleReason) {
        self.unassigned.push(Unplaced {
            submission_id: submission_id.into(),
            reason,
        });
    }

    /// Whether every submission was placed.
    pub fn is_complete(&self) -> bool {
        self.unassigned.is_empty()
    }

    /// Finds the placement of a submission.
    pub fn placement_for(&self, submission_id: &str) -> Option<&Placement> {
        self.assigned
            .iter()
            .find(|p| p.submission_id == submission_id)
    }

    /// Finds why a submission was not placed.
    pub fn reason_for(&self, submission_id: &str) -> Option<InfeasibleReason> {
        self.unassigned
            .iter()
            .find(|u| u.submission_id == submission_id)
            .map(|u| u.reason)
    }

    /// All placements in a room, in processing order.
    pub fn placements_for_room(&self, room_id: &str) -> Vec<&Placement> {
        self.assigned
            .iter()
            .filter(|p| p.room_id == room_id)
            .collect()
    }

    /// Occupied slots divided by `horizon_slots` for one room.
    ///
    /// Returns `None` if the horizon is zero.
    pub fn room_utilization(&self, room_id: &str, horizon_slots: usize) -> Option<f64> {
        if horizon_slots == 0 {
            return None;
        }
        let busy: usize = self
            .placements_for_room(room_id)
            .iter()
            .map(|p| p.slot_count())
            .sum();
        Some(busy as f64 / horizon_slots as f64)
    }

    /// Unplaced submissions grouped by reason.
    pub fn unplaced_by_reason(&self) -> BTreeMap<InfeasibleReason, Vec<&str>> {
        let mut grouped: BTreeMap<InfeasibleReason, Vec<&str>> = BTreeMap::new();
        for u in &self.unassigned {
            grouped
                .entry(u.reason)
                .or_default()
                .push(u.submission_id.as_str());
        }
        grouped
    }

    /// Number of placements.
    pub fn assigned_count(&self) -> usize {
        self.assigned.len()
    }

    /// Number of submissions considered.
    pub fn total_count(&self) -> usize {
        self.assigned.len() + self.unassigned.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn at(hour: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2013, 4, 27)
            .unwrap()
            .and_hms_opt(hour, 0, 0)
            .unwrap()
    }

    fn sample_report() -> AssignmentReport {
        let mut r = AssignmentReport::new();
        r.add_placement(Placement {
            submission_id: "S1".into(),
            room_id: "R1".into(),
            start: at(10),
            end: at(12),
            slots: SlotRange::new(0, 2),
        });
        r.add_placement(Placement {
            submission_id: "S2".into(),
            room_id: "R2".into(),
            start: at(10),
            end: at(11),
            slots: SlotRange::new(0, 1),
        });
        r.add_placement(Placement {
            submission_id: "S3".into(),
            room_id: "R1".into(),
            start: at(12),
            end: at(13),
            slots: SlotRange::new(2, 1),
        });
        r.add_unplaced("S4", InfeasibleReason::NoFreeWindow);
        r.add_unplaced("S5", InfeasibleReason::PoolEmpty);
        r.add_unplaced("S6", InfeasibleReason::NoFreeWindow);
        r
    }

    #[test]
    fn test_lookup() {
        let r = sample_report();
        assert_eq!(r.placement_for("S1").unwrap().room_id, "R1");
        assert!(r.placement_for("S4").is_none());
        assert_eq!(r.reason_for("S5"), Some(InfeasibleReason::PoolEmpty));
        assert_eq!(r.reason_for("S1"), None);
    }

    #[test]
    fn test_counts() {
        let r = sample_report();
        assert_eq!(r.assigned_count(), 3);
        assert_eq!(r.total_count(), 6);
        assert!(!r.is_complete());
        assert!(AssignmentReport::new().is_complete());
    }

    #[test]
    fn test_room_utilization() {
        let r = sample_report();
        // R1: 2 + 1 slots over a 6-slot horizon
        let util = r.room_utilization("R1", 6).unwrap();
        assert!((util - 0.5).abs() < 1e-10);
        assert_eq!(r.room_utilization("R1", 0), None);
        assert_eq!(r.placements_for_room("R2").len(), 1);
    }

    #[test]
    fn test_unplaced_by_reason() {
        let r = sample_report();
        let grouped = r.unplaced_by_reason();
        assert_eq!(grouped[&InfeasibleReason::NoFreeWindow], vec!["S4", "S6"]);
        assert_eq!(grouped[&InfeasibleReason::PoolEmpty], vec!["S5"]);
        // Ordered by reason
        let reasons: Vec<_> = grouped.keys().copied().collect();
        assert_eq!(
            reasons,
            vec![InfeasibleReason::PoolEmpty, InfeasibleReason::NoFreeWindow]
        );
    }

    #[test]
    fn test_report_json_shape() {
        let r = sample_report();
        let value = serde_json::to_value(&r).unwrap();
        assert_eq!(value["assigned"][0]["submission_id"], "S1");
        assert_eq!(value["unassigned"][1]["reason"], "PoolEmpty");
    }
}
