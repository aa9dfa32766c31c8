//! Greedy first-fit room/timeslot allocator.
//!
//! # Algorithm
//!
//! 1. Process events in caller order.
//! 2. Convert the event's duration level to a slot count.
//! 3. Walk the rooms of the event's pool in (name, id) order, skipping rooms
//!    that lack a mandatory resource.
//! 4. In each room, take the earliest free, gap-free window of that length
//!    whose slots are not already taken by one of the event's presenters.
//! 5. If no room yields a window, record the event as unplaced and go on.
//!
//! No randomness and no unordered iteration: identical input gives an
//! identical report.
//!
//! # Complexity
//! O(e * r * t * k) where e=events, r=rooms per pool, t=timeline slots,
//! k=slots per event.

use super::{AbortHandle, DurationTable, PresenterCalendar};
use crate::availability::{AvailabilityArena, Timeline};
use crate::error::{Result, ScheduleError};
use crate::models::{
    AssignmentReport, DurationLevel, InfeasibleReason, Placement, Resource, Room, RoomPool,
    SlotRange, Submission, Timeslot,
};
use crate::pools::PoolPartition;
use crate::validation::validate_input;

/// Placeholder presenter for open events. Never blocks other events.
pub const OPEN_PRESENTER: &str = "Open";

/// One submission as seen by the allocator.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct EventRequest {
    /// Submission being placed.
    pub submission_id: String,
    /// Requested length.
    pub duration: DurationLevel,
    /// Pool the submission may use.
    pub pool: RoomPool,
    /// Resources the room must provide.
    pub resource_needs: Vec<String>,
    /// Presenters who cannot be in two places at once.
    pub presenters: Vec<String>,
}

impl EventRequest {
    /// Creates a request with no resource needs or presenters.
    pub fn new(submission_id: impl Into<String>, duration: DurationLevel, pool: RoomPool) -> Self {
        Self {
            submission_id: submission_id.into(),
            duration,
            pool,
            resource_needs: Vec::new(),
            presenters: Vec::new(),
        }
    }

    /// Adds a required resource.
    pub fn with_resource_need(mut self, resource: impl Into<String>) -> Self {
        self.resource_needs.push(resource.into());
        self
    }

    /// Adds a presenter.
    pub fn with_presenter(mut self, name: impl Into<String>) -> Self {
        self.presenters.push(name.into());
        self
    }

    /// Builds a request from a classified submission.
    ///
    /// Only resources marked mandatory in `catalog` become needs. A
    /// submission without a computed pool falls back to General.
    pub fn from_submission(submission: &Submission, catalog: &[Resource]) -> Self {
        Self {
            submission_id: submission.id.clone(),
            duration: submission.duration,
            pool: submission.suitable_pool.unwrap_or_default(),
            resource_needs: submission.mandatory_resources(catalog),
            presenters: submission
                .presenters
                .iter()
                .filter(|p| p.as_str() != OPEN_PRESENTER)
                .cloned()
                .collect(),
        }
    }
}

/// Everything one allocation run needs.
#[derive(Debug, Clone, Default, serde::Serialize, serde::Deserialize)]
pub struct AllocationRequest {
    /// Convention timeline.
    pub timeslots: Vec<Timeslot>,
    /// Rooms with pool tags and available timeslots.
    pub rooms: Vec<Room>,
    /// Events in processing order.
    pub events: Vec<EventRequest>,
}

impl AllocationRequest {
    /// Creates a request.
    pub fn new(timeslots: Vec<Timeslot>, rooms: Vec<Room>, events: Vec<EventRequest>) -> Self {
        Self {
            timeslots,
            rooms,
            events,
        }
    }
}

/// Greedy first-fit allocator.
///
/// # Example
///
/// ```
/// use chrono::{NaiveDate, TimeDelta};
/// use trax_schedule::generator::TimeslotGenerator;
/// use trax_schedule::models::{DurationLevel, Room, RoomPool};
/// use trax_schedule::scheduler::{AllocationRequest, Allocator, EventRequest};
///
/// let start = NaiveDate::from_ymd_opt(2013, 4, 26).unwrap().and_hms_opt(16, 0, 0).unwrap();
/// let slots = TimeslotGenerator::new(start, start + TimeDelta::hours(4), TimeDelta::hours(1))
///     .unwrap()
///     .generate();
/// let rooms = vec![Room::new("R1", "Ballroom").with_timeslots(slots.clone())];
/// let events = vec![EventRequest::new("S1", DurationLevel::new(2).unwrap(), RoomPool::General)];
///
/// let report = Allocator::new()
///     .allocate(&AllocationRequest::new(slots, rooms, events))
///     .unwrap();
/// assert_eq!(report.assigned_count(), 1);
/// assert_eq!(report.assigned[0].start, start);
/// ```
#[derive(Debug, Clone)]
pub struct Allocator {
    durations: DurationTable,
    presenter_exclusive: bool,
}

impl Allocator {
    /// Creates an allocator with the default duration table and
    /// presenter exclusivity enabled.
    pub fn new() -> Self {
        Self {
            durations: DurationTable::default(),
            presenter_exclusive: true,
        }
    }

    /// Sets the duration table.
    pub fn with_durations(mut self, durations: DurationTable) -> Self {
        self.durations = durations;
        self
    }

    /// Enables or disables the presenter double-booking check.
    pub fn with_presenter_exclusive(mut self, exclusive: bool) -> Self {
        self.presenter_exclusive = exclusive;
        self
    }

    /// The duration table in use.
    pub fn durations(&self) -> &DurationTable {
        &self.durations
    }

    /// Validates the request and allocates on a fresh arena.
    pub fn allocate(&self, request: &AllocationRequest) -> Result<AssignmentReport> {
        self.allocate_with_abort(request, &AbortHandle::new())
    }

    /// Like [`allocate`](Self::allocate), stopping early if `abort` fires.
    pub fn allocate_with_abort(
        &self,
        request: &AllocationRequest,
        abort: &AbortHandle,
    ) -> Result<AssignmentReport> {
        validate_input(&request.events, &request.rooms, &request.timeslots)
            .map_err(ScheduleError::InvalidInput)?;
        let timeline = Timeline::new(request.timeslots.clone())?;
        let mut arena = AvailabilityArena::new(timeline, &request.rooms)?;
        self.allocate_into(&request.rooms, &mut arena, &request.events, abort)
    }

    /// Allocates events against an existing arena.
    ///
    /// Arena index `i` must belong to `rooms[i]`. On success the consumed
    /// windows stay consumed. On abort or conflict every window consumed
    /// by this call is released before the error is returned, leaving the
    /// arena as it was.
    pub fn allocate_into<'a, I>(
        &self,
        rooms: &[Room],
        arena: &mut AvailabilityArena,
        events: I,
        abort: &AbortHandle,
    ) -> Result<AssignmentReport>
    where
        I: IntoIterator<Item = &'a EventRequest>,
    {
        let mut presenters = PresenterCalendar::new(arena.timeline().len());
        self.allocate_into_with_presenters(rooms, arena, &mut presenters, events, abort)
    }

    /// Like [`allocate_into`](Self::allocate_into), honoring presenter
    /// bookings made before this call.
    ///
    /// On success `presenters` also holds this run's bookings. On error it
    /// is left unchanged.
    pub fn allocate_into_with_presenters<'a, I>(
        &self,
        rooms: &[Room],
        arena: &mut AvailabilityArena,
        presenters: &mut PresenterCalendar,
        events: I,
        abort: &AbortHandle,
    ) -> Result<AssignmentReport>
    where
        I: IntoIterator<Item = &'a EventRequest>,
    {
        check_arena_matches(rooms, arena)?;

        let partition = PoolPartition::new(rooms);
        let timeline_len = arena.timeline().len();
        let slot_duration = arena.timeline().slot_duration();
        if presenters.timeline_len() != timeline_len {
            return Err(ScheduleError::configuration(format!(
                "presenter calendar covers {} slots but the timeline has {}",
                presenters.timeline_len(),
                timeline_len
            )));
        }
        let mut booked = presenters.clone();
        let mut consumed: Vec<(usize, SlotRange)> = Vec::new();
        let mut report = AssignmentReport::new();

        tracing::info!(
            rooms = rooms.len(),
            timeslots = timeline_len,
            "allocation started"
        );

        for event in events {
            if abort.is_aborted() {
                let released = rollback(arena, &consumed);
                tracing::warn!(placed = consumed.len(), released, "allocation aborted");
                return Err(ScheduleError::Aborted { released });
            }

            let needed = match slot_duration {
                Some(duration) => {
                    match self.durations.required_slots(event.duration, duration, timeline_len) {
                        Ok(slots) => slots,
                        Err(err) => {
                            rollback(arena, &consumed);
                            return Err(err);
                        }
                    }
                }
                // Nothing fits on an empty timeline
                None => usize::MAX,
            };

            let found = self.find_window(event, needed, rooms, arena, &partition, &booked);
            let (room_idx, range) = match found {
                Ok(hit) => hit,
                Err(reason) => {
                    tracing::warn!(
                        submission = %event.submission_id,
                        pool = %event.pool,
                        slots = needed,
                        %reason,
                        "submission not placed"
                    );
                    report.add_unplaced(&event.submission_id, reason);
                    continue;
                }
            };

            let span = arena.timeline().span(range);
            if let Err(err) = arena.consume(room_idx, range) {
                tracing::error!(submission = %event.submission_id, error = %err, "double booking detected");
                rollback(arena, &consumed);
                return Err(err);
            }
            consumed.push((room_idx, range));

            for presenter in &event.presenters {
                booked.book(presenter, range);
            }

            let Some((start, end)) = span else {
                rollback(arena, &consumed);
                return Err(ScheduleError::configuration(format!(
                    "window {range} is not on the timeline"
                )));
            };
            let room_id = &rooms[room_idx].id;
            tracing::debug!(
                submission = %event.submission_id,
                room = %room_id,
                %start,
                slots = range.len,
                "submission placed"
            );
            report.add_placement(Placement {
                submission_id: event.submission_id.clone(),
                room_id: room_id.clone(),
                start,
                end,
                slots: range,
            });
        }

        *presenters = booked;
        tracing::info!(
            assigned = report.assigned.len(),
            unassigned = report.unassigned.len(),
            "allocation finished"
        );
        Ok(report)
    }

    fn find_window(
        &self,
        event: &EventRequest,
        needed: usize,
        rooms: &[Room],
        arena: &AvailabilityArena,
        partition: &PoolPartition,
        presenters: &PresenterCalendar,
    ) -> std::result::Result<(usize, SlotRange), InfeasibleReason> {
        let candidates = partition.rooms_in(event.pool);
        if candidates.is_empty() {
            return Err(InfeasibleReason::PoolEmpty);
        }

        let mut any_equipped = false;
        let mut presenter_blocked = false;
        for &room_idx in candidates {
            if !rooms[room_idx].provides_all(&event.resource_needs) {
                continue;
            }
            any_equipped = true;
            let Some(availability) = arena.room(room_idx) else {
                continue;
            };
            for range in availability.free_windows(needed, arena.timeline()) {
                if self.presenters_free(event, range, presenters) {
                    return Ok((room_idx, range));
                }
                presenter_blocked = true;
            }
        }

        Err(if !any_equipped {
            InfeasibleReason::UnmetResources
        } else if presenter_blocked {
            InfeasibleReason::PresenterConflict
        } else {
            InfeasibleReason::NoFreeWindow
        })
    }

    fn presenters_free(
        &self,
        event: &EventRequest,
        range: SlotRange,
        presenters: &PresenterCalendar,
    ) -> bool {
        !self.presenter_exclusive || event.presenters.iter().all(|p| presenters.is_free(p, range))
    }
}

impl Default for Allocator {
    fn default() -> Self {
        Self::new()
    }
}

fn check_arena_matches(rooms: &[Room], arena: &AvailabilityArena) -> Result<()> {
    if rooms.len() != arena.len() {
        return Err(ScheduleError::configuration(format!(
            "arena tracks {} rooms but {} were given",
            arena.len(),
            rooms.len()
        )));
    }
    for (room, availability) in rooms.iter().zip(arena.iter()) {
        if room.id != availability.room_id() {
            return Err(ScheduleError::configuration(format!(
                "arena room '{}' does not match room '{}'",
                availability.room_id(),
                room.id
            )));
        }
    }
    Ok(())
}

fn rollback(arena: &mut AvailabilityArena, consumed: &[(usize, SlotRange)]) -> usize {
    for &(room_idx, range) in consumed.iter().rev() {
        arena.release(room_idx, range);
    }
    consumed.len()
}
