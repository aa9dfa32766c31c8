//! Convention model.
//!
//! A convention owns its rooms, timeline, submissions and resource
//! catalog. Timeslots are generated once all rooms and submissions are
//! known.

use chrono::{NaiveDateTime, TimeDelta};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

use super::{Resource, Room, Submission, Timeslot, Track};
use crate::availability::AvailabilityPolicy;
use crate::error::Result;
use crate::generator::TimeslotGenerator;

/// Default timeslot length in minutes.
pub const DEFAULT_TIMESLOT_MINUTES: u32 = 60;

/// A convention and everything scheduled in it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Convention {
    /// Unique convention identifier.
    pub id: String,
    /// Display name.
    pub name: String,
    /// Public URL.
    #[serde(default)]
    pub url: String,
    /// Free-form description.
    #[serde(default)]
    pub description: String,
    /// First moment of the convention.
    pub start: NaiveDateTime,
    /// End of the convention (exclusive).
    pub end: NaiveDateTime,
    /// Length of one timeslot in minutes.
    #[serde(default = "default_timeslot_minutes")]
    pub timeslot_minutes: u32,
    /// Rooms.
    #[serde(default)]
    pub rooms: Vec<Room>,
    /// Generated timeline, empty until generated.
    #[serde(default)]
    pub timeslots: Vec<Timeslot>,
    /// Submitted events.
    #[serde(default)]
    pub submissions: Vec<Submission>,
    /// Resource catalog.
    #[serde(default = "Resource::predefined")]
    pub resources: Vec<Resource>,
    /// Track catalog.
    #[serde(default = "Track::predefined")]
    pub tracks: Vec<Track>,
}

fn default_timeslot_minutes() -> u32 {
    DEFAULT_TIMESLOT_MINUTES
}

impl Convention {
    /// Creates a convention with hourly slots and the predefined resources
    /// and tracks.
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        start: NaiveDateTime,
        end: NaiveDateTime,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            url: String::new(),
            description: String::new(),
            start,
            end,
            timeslot_minutes: DEFAULT_TIMESLOT_MINUTES,
            rooms: Vec::new(),
            timeslots: Vec::new(),
            submissions: Vec::new(),
            resources: Resource::predefined(),
            tracks: Track::predefined(),
        }
    }

    /// Sets the public URL.
    pub fn with_url(mut self, url: impl Into<String>) -> Self {
        self.url = url.into();
        self
    }

    /// Sets the description.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Sets the timeslot length.
    pub fn with_timeslot_minutes(mut self, minutes: u32) -> Self {
        self.timeslot_minutes = minutes;
        self
    }

    /// Adds a room.
    pub fn with_room(mut self, room: Room) -> Self {
        self.rooms.push(room);
        self
    }

    /// Adds a submission.
    pub fn with_submission(mut self, submission: Submission) -> Self {
        self.submissions.push(submission);
        self
    }

    /// Timeslot length.
    pub fn timeslot_duration(&self) -> TimeDelta {
        TimeDelta::minutes(i64::from(self.timeslot_minutes))
    }

    /// Generates and stores the timeline, replacing any previous one.
    pub fn generate_timeslots(&mut self, limit: Option<usize>) -> Result<&[Timeslot]> {
        let generator = TimeslotGenerator::new(self.start, self.end, self.timeslot_duration())?
            .with_optional_limit(limit);
        self.timeslots = generator.generate();
        Ok(&self.timeslots)
    }

    /// Opens every room without timeslots for the policy-admitted slots.
    ///
    /// Rooms that already list timeslots, and fully booked rooms hosting a
    /// submission, are left alone. Returns the number of rooms opened.
    pub fn open_rooms(&mut self, policy: &AvailabilityPolicy) -> usize {
        let admitted = policy.apply(&self.timeslots);
        let hosting: HashSet<&str> = self
            .submissions
            .iter()
            .filter_map(|s| s.assigned_room.as_deref())
            .collect();
        let mut opened = 0;
        for room in self.rooms.iter_mut() {
            if room.available_timeslots.is_empty() && !hosting.contains(room.id.as_str()) {
                room.available_timeslots = admitted.clone();
                opened += 1;
            }
        }
        opened
    }

    /// Sets each untracked submission's track from its tags. Returns the
    /// number of submissions that gained a track.
    pub fn derive_tracks(&mut self) -> usize {
        let mut derived = 0;
        for submission in self.submissions.iter_mut() {
            let had_track = submission.track.is_some();
            if submission.derive_track(&self.tracks).is_some() && !had_track {
                derived += 1;
            }
        }
        derived
    }

    /// Looks up a room.
    pub fn room(&self, id: &str) -> Option<&Room> {
        self.rooms.iter().find(|r| r.id == id)
    }

    /// Looks up a submission.
    pub fn submission(&self, id: &str) -> Option<&Submission> {
        self.submissions.iter().find(|s| s.id == id)
    }

    /// Submissions without a room yet, in submission order.
    pub fn unscheduled(&self) -> impl Iterator<Item = &Submission> {
        self.submissions.iter().filter(|s| !s.is_scheduled())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, NaiveTime};

    fn at(day: u32, hour: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2013, 4, day)
            .unwrap()
            .and_hms_opt(hour, 0, 0)
            .unwrap()
    }

    fn sample() -> Convention {
        Convention::new("TC13", "Trax Con", at(26, 16), at(28, 16))
            .with_url("http://example.org/tc13")
            .with_room(Room::new("R1", "Ballroom"))
            .with_room(Room::new("R2", "Food"))
            .with_submission(Submission::new("S1", "Keynote"))
    }

    #[test]
    fn test_generate_timeslots() {
        let mut c = sample();
        assert_eq!(c.generate_timeslots(None).unwrap().len(), 48);
        assert_eq!(c.timeslots[47].end, at(28, 16));
        assert_eq!(c.generate_timeslots(Some(10)).unwrap().len(), 10);
    }

    #[test]
    fn test_bad_bounds() {
        let mut c = Convention::new("X", "Backwards", at(28, 16), at(26, 16));
        assert!(c.generate_timeslots(None).is_err());
    }

    #[test]
    fn test_open_rooms_with_policy() {
        let mut c = sample();
        c.generate_timeslots(None).unwrap();
        let policy = AvailabilityPolicy::always_open().with_quiet_hours(
            NaiveTime::from_hms_opt(2, 0, 0).unwrap(),
            NaiveTime::from_hms_opt(8, 0, 0).unwrap(),
        );
        assert_eq!(c.open_rooms(&policy), 2);
        // Two nights of six quiet hours each
        assert_eq!(c.room("R1").unwrap().free_slot_count(), 36);
        // Already-open rooms are untouched
        assert_eq!(c.open_rooms(&AvailabilityPolicy::always_open()), 0);
    }

    #[test]
    fn test_fully_booked_room_stays_closed() {
        let mut c = sample();
        c.generate_timeslots(None).unwrap();
        c.submissions[0].assigned_room = Some("R1".into());
        assert_eq!(c.open_rooms(&AvailabilityPolicy::always_open()), 1);
        assert_eq!(c.room("R1").unwrap().free_slot_count(), 0);
        assert_eq!(c.room("R2").unwrap().free_slot_count(), 48);
    }

    #[test]
    fn test_derive_tracks() {
        let mut c = sample()
            .with_submission(Submission::new("S2", "Tasting").with_tag("food"))
            .with_submission(Submission::new("S3", "Panel").with_tag("film").with_track("tech"));
        assert_eq!(c.derive_tracks(), 1);
        assert_eq!(c.submission("S1").unwrap().track, None);
        assert_eq!(c.submission("S2").unwrap().track.as_deref(), Some("food"));
        assert_eq!(c.submission("S3").unwrap().track.as_deref(), Some("tech"));
        assert_eq!(c.derive_tracks(), 0);
    }

    #[test]
    fn test_unscheduled() {
        let mut c = sample().with_submission(Submission::new("S2", "Panel"));
        c.submissions[0].assigned_room = Some("R1".into());
        c.submissions[0].start = Some(at(26, 16));
        let ids: Vec<&str> = c.unscheduled().map(|s| s.id.as_str()).collect();
        assert_eq!(ids, vec!["S2"]);
    }

    #[test]
    fn test_serde_defaults() {
        let json = r#"{"id":"C","name":"Con","start":"2013-04-26T16:00:00","end":"2013-04-27T16:00:00"}"#;
        let c: Convention = serde_json::from_str(json).unwrap();
        assert_eq!(c.timeslot_minutes, 60);
        assert_eq!(c.resources.len(), 4);
        assert_eq!(c.tracks.len(), 16);
        assert!(c.rooms.is_empty());
    }
}
