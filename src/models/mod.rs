//! Convention scheduling domain models.
//!
//! Provides the data types the scheduler reads and writes: conventions,
//! their rooms and timeline, submissions, and the allocation report.
//!
//! # Overview
//!
//! | Type | Role |
//! |------|------|
//! | Convention | Owns rooms, timeslots, submissions, resources |
//! | Submission | An event to be placed |
//! | Room | Hosts events; tagged with a pool |
//! | Timeslot | One fixed-length slot of the timeline |
//! | AssignmentReport | Placements and unplaced submissions |

mod convention;
mod report;
mod room;
mod submission;
mod timeslot;

pub use convention::{Convention, DEFAULT_TIMESLOT_MINUTES};
pub use report::{AssignmentReport, InfeasibleReason, Placement, Unplaced};
pub use room::{Room, RoomPool};
pub use submission::{DurationLevel, Repetition, Resource, SetupTime, Submission, Track};
pub use timeslot::{SlotRange, Timeslot};
