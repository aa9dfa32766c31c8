//! Room model.
//!
//! Rooms host events. Each room carries an optional pool tag, the
//! resources it provides, and the timeslots it is still free in.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;

use super::Timeslot;

/// A room that can host submissions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Room {
    /// Unique room identifier.
    pub id: String,
    /// Human-readable name (e.g. "Hackerspace A").
    pub name: String,
    /// Explicit suitability pool. Untagged rooms are tagged from their
    /// name when a convention is scheduled.
    #[serde(default)]
    pub pool: Option<RoomPool>,
    /// Resources the room provides (e.g. "Projector").
    pub resources: BTreeSet<String>,
    /// Timeslots the room may still host an event in, in timeline order.
    pub available_timeslots: Vec<Timeslot>,
}

/// Disjoint room groupings sharing suitability characteristics.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum RoomPool {
    /// Kitchens and tasting areas.
    Food,
    /// Maker spaces.
    Hackerspace,
    /// Every other room.
    #[default]
    General,
}

impl RoomPool {
    /// All pools in priority order.
    pub const ALL: [RoomPool; 3] = [RoomPool::Food, RoomPool::Hackerspace, RoomPool::General];

    /// Lowercase pool name.
    pub fn as_str(&self) -> &'static str {
        match self {
            RoomPool::Food => "food",
            RoomPool::Hackerspace => "hackerspace",
            RoomPool::General => "general",
        }
    }
}

impl fmt::Display for RoomPool {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Room {
    /// Creates an untagged room with no availability.
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            pool: None,
            resources: BTreeSet::new(),
            available_timeslots: Vec::new(),
        }
    }

    /// Sets the pool.
    pub fn with_pool(mut self, pool: RoomPool) -> Self {
        self.pool = Some(pool);
        self
    }

    /// Pool the room is allocated from. Untagged rooms count as General.
    #[inline]
    pub fn pool(&self) -> RoomPool {
        self.pool.unwrap_or_default()
    }

    /// Adds a provided resource.
    pub fn with_resource(mut self, resource: impl Into<String>) -> Self {
        self.resources.insert(resource.into());
        self
    }

    /// Sets the available timeslots.
    pub fn with_timeslots(mut self, timeslots: Vec<Timeslot>) -> Self {
        self.available_timeslots = timeslots;
        self
    }

    /// Whether the room provides every resource in `needs`.
    pub fn provides_all<'a>(&self, needs: impl IntoIterator<Item = &'a String>) -> bool {
        needs.into_iter().all(|n| self.resources.contains(n))
    }

    /// Number of timeslots the room is still free in.
    pub fn free_slot_count(&self) -> usize {
        self.available_timeslots.len()
    }
}
