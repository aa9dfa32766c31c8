//! Schedule quality metrics (KPIs).
//!
//! Computes allocation indicators from a report and the rooms it was
//! computed against.
//!
//! # Metrics
//!
//! | Metric | Definition |
//! |--------|-----------|
//! | Placement Rate | placed / (placed + unplaced) |
//! | Placed by Pool | Placements per room pool |
//! | Unplaced by Reason | Unplaced submissions per infeasibility reason |
//! | Room Utilization | Slots booked / slots the room was open |
//! | Avg Utilization | Mean room utilization over rooms that were open |
//! | Last End | End of the latest placement |

use chrono::NaiveDateTime;
use std::collections::{BTreeMap, HashMap};

use crate::models::{AssignmentReport, InfeasibleReason, Room, RoomPool};

/// Allocation performance indicators.
#[derive(Debug, Clone)]
pub struct ScheduleKpi {
    /// Fraction of submissions placed (0.0..1.0).
    pub placement_rate: f64,
    /// Number of placed submissions.
    pub placed: usize,
    /// Number of unplaced submissions.
    pub unplaced: usize,
    /// Placements per pool (every pool listed).
    pub placed_by_pool: BTreeMap<RoomPool, usize>,
    /// Unplaced submissions per reason.
    pub unplaced_by_reason: BTreeMap<InfeasibleReason, usize>,
    /// Per-room utilization, keyed by room ID.
    pub utilization_by_room: HashMap<String, f64>,
    /// Average utilization over rooms with at least one open slot.
    pub avg_utilization: f64,
    /// End of the latest placement.
    pub last_end: Option<NaiveDateTime>,
}

impl ScheduleKpi {
    /// Computes KPIs from a report.
    ///
    /// # Arguments
    /// * `report` - The allocation outcome.
    /// * `rooms` - The rooms as they were before allocation (their
    ///   available timeslots are the utilization denominator).
    ///
    /// [`generate_schedule`](super::generate_schedule) writes the remaining
    /// free slots back to each room; use
    /// [`calculate_after`](Self::calculate_after) on those rooms.
    pub fn calculate(report: &AssignmentReport, rooms: &[Room]) -> Self {
        Self::with_open_slots(report, rooms, |room| room.free_slot_count())
    }

    /// Computes KPIs from a report and the rooms after its placements were
    /// written back.
    ///
    /// A room's open slots are its remaining free slots plus the slots the
    /// report booked in it.
    pub fn calculate_after(report: &AssignmentReport, rooms: &[Room]) -> Self {
        Self::with_open_slots(report, rooms, |room| {
            let booked: usize = report
                .placements_for_room(&room.id)
                .iter()
                .map(|p| p.slot_count())
                .sum();
            room.free_slot_count() + booked
        })
    }

    fn with_open_slots<F>(report: &AssignmentReport, rooms: &[Room], open_slots: F) -> Self
    where
        F: Fn(&Room) -> usize,
    {
        let placed = report.assigned.len();
        let unplaced = report.unassigned.len();
        let total = placed + unplaced;

        let placement_rate = if total == 0 {
            1.0
        } else {
            placed as f64 / total as f64
        };

        let pool_of: HashMap<&str, RoomPool> =
            rooms.iter().map(|r| (r.id.as_str(), r.pool())).collect();
        let mut placed_by_pool: BTreeMap<RoomPool, usize> =
            RoomPool::ALL.iter().map(|&p| (p, 0)).collect();
        for placement in &report.assigned {
            if let Some(&pool) = pool_of.get(placement.room_id.as_str()) {
                *placed_by_pool.entry(pool).or_default() += 1;
            }
        }

        let mut unplaced_by_reason = BTreeMap::new();
        for u in &report.unassigned {
            *unplaced_by_reason.entry(u.reason).or_insert(0) += 1;
        }

        // Utilization
        let mut utilization_by_room = HashMap::new();
        for room in rooms {
            let open = open_slots(room);
            if let Some(u) = report.room_utilization(&room.id, open) {
                utilization_by_room.insert(room.id.clone(), u);
            }
        }
        let avg_utilization = if utilization_by_room.is_empty() {
            0.0
        } else {
            let sum: f64 = utilization_by_room.values().sum();
            sum / utilization_by_room.len() as f64
        };

        let last_end = report.assigned.iter().map(|p| p.end).max();

        Self {
            placement_rate,
            placed,
            unplaced,
            placed_by_pool,
            unplaced_by_reason,
            utilization_by_room,
            avg_utilization,
            last_end,
        }
    }

    /// Whether the allocation meets the given quality thresholds.
    pub fn meets_thresholds(&self, min_placement_rate: f64, min_utilization: f64) -> bool {
        self.placement_rate >= min_placement_rate && self.avg_utilization >= min_utilization
    }
}
