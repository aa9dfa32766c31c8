//! Room and timeslot allocation.
//!
//! Places submissions into rooms with a greedy first-fit heuristic and
//! reports what could not be placed.
//!
//! # Algorithm
//!
//! `Allocator` walks submissions in order and gives each the earliest free
//! window in the first suitable room of its pool. It is not optimal, but it
//! is fast and fully deterministic.
//!
//! # Pipeline
//!
//! [`generate_schedule`] runs the whole convention flow: generate the
//! timeline, open rooms, classify pools, allocate, and write the result
//! back to the convention.
//!
//! # KPI
//!
//! `ScheduleKpi` computes placement rate, per-pool counts and room
//! utilization.

mod abort;
mod allocator;
mod duration;
mod kpi;
mod presenters;

pub use abort::AbortHandle;
pub use allocator::{AllocationRequest, Allocator, EventRequest, OPEN_PRESENTER};
pub use duration::{DurationSpan, DurationTable};
pub use kpi::ScheduleKpi;
pub use presenters::PresenterCalendar;

use crate::availability::{AvailabilityArena, Timeline};
use crate::config::ScheduleConfig;
use crate::error::{Result, ScheduleError};
use crate::models::{AssignmentReport, Convention};
use crate::validation::validate_input;

/// Generates a schedule for every unscheduled submission of a convention.
///
/// Steps:
/// 1. Generate the timeline if the convention has none
/// 2. Open rooms without timeslots under the availability policy
/// 3. Tag untagged rooms with pools, derive tracks, and classify
///    submissions from their room hints
/// 4. Book the presenters of submissions placed by earlier runs
/// 5. Allocate unscheduled submissions in submission order
/// 6. Write assigned room and start back to submissions, and each room's
///    remaining free slots back to the room
///
/// On error no assignment is written back, though steps 1-3 may already
/// have updated the convention.
pub fn generate_schedule(
    convention: &mut Convention,
    config: &ScheduleConfig,
    abort: &AbortHandle,
) -> Result<AssignmentReport> {
    if convention.timeslots.is_empty() {
        convention.generate_timeslots(config.timeslot_limit)?;
    }
    config.validate(convention.timeslot_duration())?;

    let opened = convention.open_rooms(&config.availability);
    let tagged = config.pools.tag_rooms(&mut convention.rooms);
    convention.derive_tracks();
    config
        .pools
        .classify_submissions(&mut convention.submissions, &convention.rooms);
    tracing::debug!(
        convention = %convention.id,
        timeslots = convention.timeslots.len(),
        opened,
        tagged,
        "convention prepared for allocation"
    );

    let events: Vec<EventRequest> = convention
        .unscheduled()
        .map(|s| EventRequest::from_submission(s, &convention.resources))
        .collect();
    validate_input(&events, &convention.rooms, &convention.timeslots)
        .map_err(ScheduleError::InvalidInput)?;

    let allocator = config.allocator();
    let timeline = Timeline::new(convention.timeslots.clone())?;
    let mut presenters = PresenterCalendar::from_scheduled(
        &convention.submissions,
        &timeline,
        allocator.durations(),
    )?;
    let mut arena = AvailabilityArena::new(timeline, &convention.rooms)?;
    let report = allocator.allocate_into_with_presenters(
        &convention.rooms,
        &mut arena,
        &mut presenters,
        &events,
        abort,
    )?;

    apply_report(convention, &report, &arena);
    Ok(report)
}

fn apply_report(convention: &mut Convention, report: &AssignmentReport, arena: &AvailabilityArena) {
    for placement in &report.assigned {
        if let Some(submission) = convention
            .submissions
            .iter_mut()
            .find(|s| s.id == placement.submission_id)
        {
            submission.assigned_room = Some(placement.room_id.clone());
            submission.start = Some(placement.start);
        }
    }
    for (i, room) in convention.rooms.iter_mut().enumerate() {
        room.available_timeslots = arena.free_timeslots(i);
    }
}
