//! Property tests for the allocator.

use std::collections::{HashMap, HashSet};

use chrono::{NaiveDate, TimeDelta};
use proptest::prelude::*;
use trax_schedule::availability::{AvailabilityArena, Timeline};
use trax_schedule::generator::TimeslotGenerator;
use trax_schedule::models::{DurationLevel, Room, RoomPool, Timeslot};
use trax_schedule::scheduler::{
    AbortHandle, AllocationRequest, Allocator, DurationTable, EventRequest,
};

const POOLS: [RoomPool; 3] = [RoomPool::Food, RoomPool::Hackerspace, RoomPool::General];

fn timeline(count: usize) -> Vec<Timeslot> {
    let start = NaiveDate::from_ymd_opt(2013, 4, 26)
        .unwrap()
        .and_hms_opt(16, 0, 0)
        .unwrap();
    TimeslotGenerator::new(start, start + TimeDelta::hours(count as i64), TimeDelta::hours(1))
        .unwrap()
        .generate()
}

#[derive(Debug, Clone)]
struct RoomShape {
    pool: usize,
    open_from: usize,
    open_len: usize,
}

#[derive(Debug, Clone)]
struct EventShape {
    level: u8,
    pool: usize,
    presenter: Option<usize>,
}

fn room_shape() -> impl Strategy<Value = RoomShape> {
    (0..3usize, 0..12usize, 0..12usize).prop_map(|(pool, open_from, open_len)| RoomShape {
        pool,
        open_from,
        open_len,
    })
}

fn event_shape() -> impl Strategy<Value = EventShape> {
    (1..=5u8, 0..3usize, proptest::option::of(0..4usize)).prop_map(|(level, pool, presenter)| {
        EventShape {
            level,
            pool,
            presenter,
        }
    })
}

fn build(slots: usize, rooms: &[RoomShape], events: &[EventShape]) -> AllocationRequest {
    let timeslots = timeline(slots);
    let rooms = rooms
        .iter()
        .enumerate()
        .map(|(i, shape)| {
            let from = shape.open_from.min(slots);
            let to = (from + shape.open_len).min(slots);
            Room::new(format!("R{i}"), format!("Room {i}"))
                .with_pool(POOLS[shape.pool])
                .with_timeslots(timeslots[from..to].to_vec())
        })
        .collect();
    let events = events
        .iter()
        .enumerate()
        .map(|(i, shape)| {
            let event = EventRequest::new(
                format!("S{i}"),
                DurationLevel::new(shape.level).unwrap(),
                POOLS[shape.pool],
            );
            match shape.presenter {
                Some(p) => event.with_presenter(format!("P{p}")),
                None => event,
            }
        })
        .collect();
    AllocationRequest::new(timeslots, rooms, events)
}

proptest! {
    #[test]
    fn no_slot_is_double_booked(
        slots in 1..12usize,
        rooms in prop::collection::vec(room_shape(), 0..5),
        events in prop::collection::vec(event_shape(), 0..15),
    ) {
        let request = build(slots, &rooms, &events);
        let report = Allocator::new().allocate(&request).unwrap();

        let mut taken: HashSet<(String, usize)> = HashSet::new();
        for p in &report.assigned {
            for i in p.slots.indices() {
                prop_assert!(taken.insert((p.room_id.clone(), i)));
            }
        }
        prop_assert_eq!(report.total_count(), events.len());
    }

    #[test]
    fn placements_respect_pool_and_availability(
        slots in 1..12usize,
        rooms in prop::collection::vec(room_shape(), 0..5),
        events in prop::collection::vec(event_shape(), 0..15),
    ) {
        let request = build(slots, &rooms, &events);
        let report = Allocator::new().allocate(&request).unwrap();
        let durations = DurationTable::default();
        let by_id: HashMap<&str, &Room> =
            request.rooms.iter().map(|r| (r.id.as_str(), r)).collect();
        let events: HashMap<&str, &EventRequest> =
            request.events.iter().map(|e| (e.submission_id.as_str(), e)).collect();

        for p in &report.assigned {
            let room = by_id[p.room_id.as_str()];
            let event = events[p.submission_id.as_str()];
            prop_assert_eq!(room.pool(), event.pool);

            let expected = durations
                .required_slots(event.duration, TimeDelta::hours(1), slots)
                .unwrap();
            prop_assert_eq!(p.slot_count(), expected);

            for i in p.slots.indices() {
                let slot = &request.timeslots[i];
                prop_assert!(room
                    .available_timeslots
                    .iter()
                    .any(|t| t.start == slot.start && t.end == slot.end));
            }
        }
    }

    #[test]
    fn presenters_never_overlap(
        slots in 1..12usize,
        rooms in prop::collection::vec(room_shape(), 0..5),
        events in prop::collection::vec(event_shape(), 0..15),
    ) {
        let request = build(slots, &rooms, &events);
        let report = Allocator::new().allocate(&request).unwrap();
        let events: HashMap<&str, &EventRequest> =
            request.events.iter().map(|e| (e.submission_id.as_str(), e)).collect();

        let mut busy: HashSet<(String, usize)> = HashSet::new();
        for p in &report.assigned {
            for presenter in &events[p.submission_id.as_str()].presenters {
                for i in p.slots.indices() {
                    prop_assert!(busy.insert((presenter.clone(), i)));
                }
            }
        }
    }

    #[test]
    fn allocation_is_deterministic(
        slots in 1..12usize,
        rooms in prop::collection::vec(room_shape(), 0..5),
        events in prop::collection::vec(event_shape(), 0..15),
    ) {
        let request = build(slots, &rooms, &events);
        let allocator = Allocator::new();
        prop_assert_eq!(allocator.allocate(&request).unwrap(), allocator.allocate(&request).unwrap());
    }

    #[test]
    fn abort_restores_arena(
        slots in 1..12usize,
        rooms in prop::collection::vec(room_shape(), 1..5),
        events in prop::collection::vec(event_shape(), 1..15),
        cut in 0..15usize,
    ) {
        let request = build(slots, &rooms, &events);
        let timeline = Timeline::new(request.timeslots.clone()).unwrap();
        let mut arena = AvailabilityArena::new(timeline, &request.rooms).unwrap();
        let before = arena.clone();

        let abort = AbortHandle::new();
        let trigger = abort.clone();
        let cut = cut % request.events.len();
        let feed = request.events.iter().enumerate().map(|(i, e)| {
            if i == cut {
                trigger.abort();
            }
            e
        });

        let result = Allocator::new().allocate_into(&request.rooms, &mut arena, feed, &abort);
        prop_assert!(result.is_err());
        prop_assert_eq!(arena, before);
    }
}

#[test]
fn convention_weekend_has_48_hourly_slots() {
    let start = NaiveDate::from_ymd_opt(2013, 4, 26)
        .unwrap()
        .and_hms_opt(16, 0, 0)
        .unwrap();
    let end = NaiveDate::from_ymd_opt(2013, 4, 28)
        .unwrap()
        .and_hms_opt(16, 0, 0)
        .unwrap();
    let generator = TimeslotGenerator::new(start, end, TimeDelta::hours(1)).unwrap();
    assert_eq!(generator.len(), 48);
    assert_eq!(generator.iter().count(), 48);
}
