//! Input validation for allocation requests.
//!
//! Checks structural integrity of events, rooms, and the timeline
//! before allocation. Detects:
//! - Duplicate and empty IDs
//! - Presenters listed twice on one event
//! - Malformed timelines (unsorted, overlapping, mixed slot lengths)
//! - Room timeslots that are not on the timeline
//!
//! All problems are collected; validation does not stop at the first one.

use crate::models::{Room, Timeslot};
use crate::scheduler::{AllocationRequest, EventRequest};
use chrono::{NaiveDateTime, TimeDelta};
use std::collections::HashSet;

/// Validation result.
pub type ValidationResult = Result<(), Vec<ValidationError>>;

/// A validation error.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidationError {
    /// Error category.
    pub kind: ValidationErrorKind,
    /// Human-readable description.
    pub message: String,
}

/// Categories of validation errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationErrorKind {
    /// Two entities share the same ID.
    DuplicateId,
    /// An entity has an empty ID.
    EmptyId,
    /// A presenter appears twice on the same event.
    DuplicatePresenter,
    /// Timeslots are unsorted, overlapping, or of mixed length.
    InvalidTimeline,
    /// A room lists a timeslot that is not on the timeline.
    InvalidTimeslotReference,
}

impl ValidationError {
    /// Creates a validation error.
    pub fn new(kind: ValidationErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

/// Validates a complete allocation request.
pub fn validate_request(request: &AllocationRequest) -> ValidationResult {
    validate_input(&request.events, &request.rooms, &request.timeslots)
}

/// Validates the input data for an allocation run.
///
/// Checks:
/// 1. No duplicate or empty room IDs
/// 2. No duplicate or empty submission IDs
/// 3. No presenter listed twice on one event
/// 4. Timeslots are sorted, non-overlapping and share one positive length
/// 5. Every room timeslot is on the timeline
///
/// # Returns
/// `Ok(())` if all checks pass, `Err(errors)` with all detected issues.
pub fn validate_input(
    events: &[EventRequest],
    rooms: &[Room],
    timeslots: &[Timeslot],
) -> ValidationResult {
    let mut errors = Vec::new();

    // Rooms
    let mut room_ids = HashSet::new();
    for room in rooms {
        if room.id.is_empty() {
            errors.push(ValidationError::new(
                ValidationErrorKind::EmptyId,
                format!("Room '{}' has an empty ID", room.name),
            ));
        } else if !room_ids.insert(room.id.as_str()) {
            errors.push(ValidationError::new(
                ValidationErrorKind::DuplicateId,
                format!("Duplicate room ID: {}", room.id),
            ));
        }
    }

    // Events
    let mut event_ids = HashSet::new();
    for event in events {
        if event.submission_id.is_empty() {
            errors.push(ValidationError::new(
                ValidationErrorKind::EmptyId,
                "Submission with an empty ID",
            ));
        } else if !event_ids.insert(event.submission_id.as_str()) {
            errors.push(ValidationError::new(
                ValidationErrorKind::DuplicateId,
                format!("Duplicate submission ID: {}", event.submission_id),
            ));
        }

        let mut seen = HashSet::new();
        for presenter in &event.presenters {
            if !seen.insert(presenter.as_str()) {
                errors.push(ValidationError::new(
                    ValidationErrorKind::DuplicatePresenter,
                    format!(
                        "Submission '{}' lists presenter '{}' twice",
                        event.submission_id, presenter
                    ),
                ));
            }
        }
    }

    errors.extend(check_timeline(timeslots));

    // Room timeslot references
    let on_timeline: HashSet<(NaiveDateTime, NaiveDateTime)> =
        timeslots.iter().map(|t| (t.start, t.end)).collect();
    for room in rooms {
        for slot in &room.available_timeslots {
            if !on_timeline.contains(&(slot.start, slot.end)) {
                errors.push(ValidationError::new(
                    ValidationErrorKind::InvalidTimeslotReference,
                    format!(
                        "Room '{}' lists timeslot {}..{} which is not on the timeline",
                        room.id, slot.start, slot.end
                    ),
                ));
            }
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

fn check_timeline(timeslots: &[Timeslot]) -> Vec<ValidationError> {
    let mut errors = Vec::new();
    let Some(first) = timeslots.first() else {
        return errors;
    };

    let duration = first.duration();
    if duration <= TimeDelta::zero() {
        errors.push(ValidationError::new(
            ValidationErrorKind::InvalidTimeline,
            format!("Timeslot at {} has a non-positive length", first.start),
        ));
    }

    for pair in timeslots.windows(2) {
        let (prev, next) = (&pair[0], &pair[1]);
        if next.duration() != duration {
            errors.push(ValidationError::new(
                ValidationErrorKind::InvalidTimeline,
                format!(
                    "Timeslot at {} is {} minutes long, expected {}",
                    next.start,
                    next.duration().num_minutes(),
                    duration.num_minutes()
                ),
            ));
        }
        if next.start < prev.end {
            errors.push(ValidationError::new(
                ValidationErrorKind::InvalidTimeline,
                format!(
                    "Timeslot at {} overlaps or precedes the slot at {}",
                    next.start, prev.start
                ),
            ));
        }
    }
    errors
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generator::TimeslotGenerator;
    use crate::models::{DurationLevel, RoomPool};
    use chrono::NaiveDate;

    fn at(hour: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2013, 4, 26)
            .unwrap()
            .and_hms_opt(hour, 0, 0)
            .unwrap()
    }

    fn sample_timeslots() -> Vec<Timeslot> {
        TimeslotGenerator::new(at(10), at(14), TimeDelta::hours(1))
            .unwrap()
            .generate()
    }

    fn sample_rooms() -> Vec<Room> {
        let slots = sample_timeslots();
        vec![
            Room::new("R1", "Ballroom").with_timeslots(slots.clone()),
            Room::new("R2", "Food")
                .with_pool(RoomPool::Food)
                .with_timeslots(slots),
        ]
    }

    fn event(id: &str) -> EventRequest {
        EventRequest::new(id, DurationLevel::default(), RoomPool::General)
    }

    #[test]
    fn test_valid_input() {
        let events = vec![event("S1").with_presenter("Ada"), event("S2")];
        assert!(validate_input(&events, &sample_rooms(), &sample_timeslots()).is_ok());
    }

    #[test]
    fn test_valid_request() {
        let request = AllocationRequest::new(sample_timeslots(), sample_rooms(), vec![event("S1")]);
        assert!(validate_request(&request).is_ok());
    }

    #[test]
    fn test_duplicate_submission_id() {
        let events = vec![event("S1"), event("S1")];
        let errors = validate_input(&events, &sample_rooms(), &sample_timeslots()).unwrap_err();
        assert!(errors
            .iter()
            .any(|e| e.kind == ValidationErrorKind::DuplicateId && e.message.contains("submission")));
    }

    #[test]
    fn test_duplicate_room_id() {
        let rooms = vec![Room::new("R1", "Ballroom"), Room::new("R1", "Windsor")];
        let errors = validate_input(&[], &rooms, &sample_timeslots()).unwrap_err();
        assert!(errors
            .iter()
            .any(|e| e.kind == ValidationErrorKind::DuplicateId && e.message.contains("room")));
    }

    #[test]
    fn test_empty_ids() {
        let rooms = vec![Room::new("", "Ballroom")];
        let events = vec![event("")];
        let errors = validate_input(&events, &rooms, &sample_timeslots()).unwrap_err();
        assert_eq!(
            errors
                .iter()
                .filter(|e| e.kind == ValidationErrorKind::EmptyId)
                .count(),
            2
        );
    }

    #[test]
    fn test_duplicate_presenter() {
        let events = vec![event("S1").with_presenter("Ada").with_presenter("Ada")];
        let errors = validate_input(&events, &[], &sample_timeslots()).unwrap_err();
        assert!(errors
            .iter()
            .any(|e| e.kind == ValidationErrorKind::DuplicatePresenter));
    }

    #[test]
    fn test_overlapping_timeline() {
        let slots = vec![
            Timeslot::new(0, at(10), at(12)),
            Timeslot::new(1, at(11), at(13)),
        ];
        let errors = validate_input(&[], &[], &slots).unwrap_err();
        assert!(errors
            .iter()
            .any(|e| e.kind == ValidationErrorKind::InvalidTimeline));
    }

    #[test]
    fn test_mixed_slot_lengths() {
        let slots = vec![
            Timeslot::new(0, at(10), at(11)),
            Timeslot::new(1, at(11), at(13)),
        ];
        let errors = validate_input(&[], &[], &slots).unwrap_err();
        assert!(errors[0].message.contains("expected 60"));
    }

    #[test]
    fn test_gaps_are_allowed() {
        let slots = vec![
            Timeslot::new(0, at(10), at(11)),
            Timeslot::new(1, at(13), at(14)),
        ];
        assert!(validate_input(&[], &[], &slots).is_ok());
    }

    #[test]
    fn test_foreign_room_timeslot() {
        let rooms = vec![Room::new("R1", "Ballroom")
            .with_timeslots(vec![Timeslot::new(0, at(20), at(21))])];
        let errors = validate_input(&[], &rooms, &sample_timeslots()).unwrap_err();
        assert!(errors
            .iter()
            .any(|e| e.kind == ValidationErrorKind::InvalidTimeslotReference));
    }

    #[test]
    fn test_multiple_errors() {
        let rooms = vec![
            Room::new("R1", "Ballroom"),
            Room::new("R1", "Windsor")
                .with_timeslots(vec![Timeslot::new(0, at(20), at(21))]),
        ];
        let events = vec![event("S1"), event("S1")];
        let errors = validate_input(&events, &rooms, &sample_timeslots()).unwrap_err();
        assert!(errors.len() >= 3);
    }
}
