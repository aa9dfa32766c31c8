//! Submission model.
//!
//! A submission is a proposed or scheduled event: a talk, panel or
//! activity. Organizers attach presenters, tags, a track and resource
//! needs; the allocator fills in the assigned room and start time.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use std::fmt;

use super::RoomPool;
use crate::error::ScheduleError;

/// A proposed or scheduled event.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Submission {
    /// Unique submission identifier.
    pub id: String,
    /// Event title.
    pub title: String,
    /// Event description.
    pub description: String,
    /// Requested length.
    pub duration: DurationLevel,
    /// Requested setup time.
    pub setup_time: SetupTime,
    /// How often the event should run.
    #[serde(default)]
    pub repetition: Repetition,
    /// Presenter names.
    pub presenters: Vec<String>,
    /// Normalized tag names.
    pub tags: Vec<String>,
    /// Track name, if any tag is also a track.
    pub track: Option<String>,
    /// Names of requested resources.
    pub resources: Vec<String>,
    /// Room names already attached to the submission (e.g. by an import).
    pub room_hints: Vec<String>,
    /// Pool computed before allocation. Not persisted.
    #[serde(skip)]
    pub suitable_pool: Option<RoomPool>,
    /// Room assigned by the allocator.
    pub assigned_room: Option<String>,
    /// Start time assigned by the allocator.
    pub start: Option<NaiveDateTime>,
}

/// Ordinal event length, 1 to 5.
///
/// The mapping to real time spans is configurable through
/// [`DurationTable`](crate::scheduler::DurationTable).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct DurationLevel(u8);

impl DurationLevel {
    /// Shortest level.
    pub const MIN: u8 = 1;
    /// Longest level ("all weekend").
    pub const MAX: u8 = 5;

    /// Creates a level, rejecting values outside 1..=5.
    pub fn new(level: u8) -> Result<Self, ScheduleError> {
        if (Self::MIN..=Self::MAX).contains(&level) {
            Ok(Self(level))
        } else {
            Err(ScheduleError::configuration(format!(
                "duration level {level} outside {}..={}",
                Self::MIN,
                Self::MAX
            )))
        }
    }

    /// The raw level.
    #[inline]
    pub fn get(&self) -> u8 {
        self.0
    }

    /// Human-readable length.
    pub fn label(&self) -> &'static str {
        match self.0 {
            1 => "50 minutes",
            2 => "1 hour and 50 minutes",
            3 => "2 hours and 50 minutes",
            4 => "More than 2 hours and 50 minutes",
            5 => "All weekend",
            _ => "Unknown",
        }
    }
}

impl Default for DurationLevel {
    fn default() -> Self {
        Self(1)
    }
}

impl TryFrom<u8> for DurationLevel {
    type Error = ScheduleError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<DurationLevel> for u8 {
    fn from(level: DurationLevel) -> Self {
        level.0
    }
}

impl fmt::Display for DurationLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Requested setup time before the event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SetupTime {
    #[default]
    None,
    OneHour,
    TwoHours,
    MoreThanTwoHours,
}

impl SetupTime {
    /// Human-readable setup time.
    pub fn label(&self) -> &'static str {
        match self {
            SetupTime::None => "None",
            SetupTime::OneHour => "1 hour",
            SetupTime::TwoHours => "2 hours",
            SetupTime::MoreThanTwoHours => "More than 2 hours",
        }
    }
}

/// How often an event should be repeated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Repetition {
    #[default]
    Once,
    Twice,
    Thrice,
    MoreThanThrice,
}

impl Repetition {
    /// Human-readable repetition, as shown on the request form.
    pub fn label(&self) -> &'static str {
        match self {
            Repetition::Once => "No",
            Repetition::Twice => "Twice",
            Repetition::Thrice => "Thrice",
            Repetition::MoreThanThrice => "More than thrice",
        }
    }
}

/// A track: an official tag that groups events under one staff lead.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Track {
    /// Normalized track name, equal to its tag.
    pub name: String,
    /// What the track covers.
    pub description: String,
}

impl Track {
    /// Creates a track.
    pub fn new(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
        }
    }

    /// The official tracks every convention starts with.
    pub fn predefined() -> Vec<Track> {
        [
            ("diy", "Making, building, and tinkering."),
            ("action-adventure", "Weapons, guns, martial arts."),
            ("penguicon", "All about Penguicon itself."),
            ("costuming", "Costumes and accessories, masks, special effects makeup."),
            ("music", "Listening to, creating, and discussing music."),
            ("tech", "Software, hardware, and engineering."),
            ("eco", "The environment, energy efficiency, self-sufficiency."),
            ("after-dark", "Sex, alcohol, parties, adult pastimes."),
            ("mayhem", "Fun that happens outside our event spaces."),
            ("film", "Watching or discussing film or TV."),
            ("food", "Cooking demos, tastings, what we eat."),
            ("literature", "Genre fiction, the craft and profession of writing."),
            ("science", "Talks and demos from the lab, in the field, or even outer space."),
            ("video-gaming", "Playing or discussing electronic interactive entertainment."),
            ("life", "Lifestyles, skills, wellness, money, career, and fun!"),
            ("gaming", "Playing or discussing board games, card games, and roleplaying games."),
        ]
        .into_iter()
        .map(|(name, description)| Track::new(name, description))
        .collect()
    }
}

/// A resource an event may request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Resource {
    /// Unique resource name.
    pub name: String,
    /// Label shown on the request form.
    pub request_form_label: String,
    /// Whether the event cannot happen without it.
    pub mandatory: bool,
}

impl Resource {
    /// Creates a resource.
    pub fn new(name: impl Into<String>, label: impl Into<String>, mandatory: bool) -> Self {
        Self {
            name: name.into(),
            request_form_label: label.into(),
            mandatory,
        }
    }

    /// The resources every convention starts with.
    pub fn predefined() -> Vec<Resource> {
        vec![
            Resource::new(
                "Projector",
                "This event CANNOT happen without a projector",
                true,
            ),
            Resource::new(
                "Microphone/sound system",
                "This event CANNOT happen without a microphone and sound system",
                true,
            ),
            Resource::new("Drinking water", "Drinking water", false),
            Resource::new("Quiet (no airwalls)", "Quiet (no airwalls)", false),
        ]
    }
}

impl Submission {
    /// Creates a one-level submission with the given ID and title.
    pub fn new(id: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            description: String::new(),
            duration: DurationLevel::default(),
            setup_time: SetupTime::default(),
            repetition: Repetition::default(),
            presenters: Vec::new(),
            tags: Vec::new(),
            track: None,
            resources: Vec::new(),
            room_hints: Vec::new(),
            suitable_pool: None,
            assigned_room: None,
            start: None,
        }
    }

    /// Sets the description.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Sets the duration level.
    pub fn with_duration(mut self, duration: DurationLevel) -> Self {
        self.duration = duration;
        self
    }

    /// Sets the setup time.
    pub fn with_setup_time(mut self, setup_time: SetupTime) -> Self {
        self.setup_time = setup_time;
        self
    }

    /// Sets the repetition.
    pub fn with_repetition(mut self, repetition: Repetition) -> Self {
        self.repetition = repetition;
        self
    }

    /// Adds a presenter.
    pub fn with_presenter(mut self, name: impl Into<String>) -> Self {
        self.presenters.push(name.into());
        self
    }

    /// Adds a tag.
    pub fn with_tag(mut self, tag: impl Into<String>) -> Self {
        self.tags.push(tag.into());
        self
    }

    /// Sets the track.
    pub fn with_track(mut self, track: impl Into<String>) -> Self {
        self.track = Some(track.into());
        self
    }

    /// Adds a requested resource.
    pub fn with_resource(mut self, resource: impl Into<String>) -> Self {
        self.resources.push(resource.into());
        self
    }

    /// Adds a room hint.
    pub fn with_room_hint(mut self, room_name: impl Into<String>) -> Self {
        self.room_hints.push(room_name.into());
        self
    }

    /// Whether the allocator placed this submission.
    pub fn is_scheduled(&self) -> bool {
        self.assigned_room.is_some() && self.start.is_some()
    }

    /// Sets the track from the first tag that names a track, unless one is
    /// already set. Returns the resulting track.
    pub fn derive_track(&mut self, tracks: &[Track]) -> Option<&str> {
        if self.track.is_none() {
            self.track = self
                .tags
                .iter()
                .find(|tag| tracks.iter().any(|t| &t.name == *tag))
                .cloned();
        }
        self.track.as_deref()
    }

    /// Presenters as "A, B, C." or an empty string.
    pub fn presenter_list(&self) -> String {
        if self.presenters.is_empty() {
            return String::new();
        }
        format!("{}.", self.presenters.join(", "))
    }

    /// Requested resources that are mandatory in `catalog`.
    ///
    /// Resources not present in the catalog are ignored.
    pub fn mandatory_resources(&self, catalog: &[Resource]) -> Vec<String> {
        self.resources
            .iter()
            .filter(|name| catalog.iter().any(|r| r.mandatory && &r.name == *name))
            .cloned()
            .collect()
    }
}
