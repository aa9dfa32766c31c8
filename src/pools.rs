//! Suitability classification.
//!
//! Partitions rooms into disjoint [`RoomPool`]s and decides which pool a
//! submission may use. Rooms configured with an explicit tag keep it; name
//! matching only fills in rooms that have none.
//!
//! # Submission Pools
//! A submission's pool follows the rooms it was already attached to (for
//! example by a legacy import). A hint naming a known room uses that room's
//! tag; an unknown name is classified by pattern.
//! 1. any hinted room is a Food room → Food
//! 2. else any hinted room is a Hackerspace room → Hackerspace
//! 3. else (including no hints at all) → General

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::models::{Room, RoomPool, Submission};

/// Name patterns used to tag rooms with pools.
///
/// Patterns match case-insensitively anywhere in the room name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PoolClassifier {
    /// Patterns for the Food pool.
    pub food: Vec<String>,
    /// Patterns for the Hackerspace pool.
    pub hackerspace: Vec<String>,
}

impl Default for PoolClassifier {
    fn default() -> Self {
        Self {
            food: vec!["food".into()],
            hackerspace: vec!["hackerspace".into()],
        }
    }
}

impl PoolClassifier {
    /// Creates a classifier with explicit patterns.
    pub fn new(food: Vec<String>, hackerspace: Vec<String>) -> Self {
        Self { food, hackerspace }
    }

    /// Pool for a room name. Food wins over Hackerspace.
    pub fn classify_room(&self, name: &str) -> RoomPool {
        let name = name.to_lowercase();
        let matches = |patterns: &[String]| {
            patterns
                .iter()
                .any(|p| !p.is_empty() && name.contains(&p.to_lowercase()))
        };
        if matches(&self.food) {
            RoomPool::Food
        } else if matches(&self.hackerspace) {
            RoomPool::Hackerspace
        } else {
            RoomPool::General
        }
    }

    /// Tags every untagged room from its name. Returns the number tagged.
    pub fn tag_rooms(&self, rooms: &mut [Room]) -> usize {
        let mut tagged = 0;
        for room in rooms.iter_mut().filter(|r| r.pool.is_none()) {
            room.pool = Some(self.classify_room(&room.name));
            tagged += 1;
        }
        tagged
    }

    /// Tags untagged rooms and groups all rooms into pools.
    pub fn partition(&self, rooms: &mut [Room]) -> PoolPartition {
        self.tag_rooms(rooms);
        PoolPartition::new(rooms)
    }

    /// Pool of one hinted room: the tag of the room with that name if there
    /// is one, else the pattern match.
    fn hinted_pool(&self, hint: &str, rooms: &[Room]) -> RoomPool {
        match rooms.iter().find(|r| r.name == hint) {
            Some(room) => room.pool.unwrap_or_else(|| self.classify_room(&room.name)),
            None => self.classify_room(hint),
        }
    }

    /// Pool for a submission attached to the named rooms.
    pub fn pool_for_hints<S: AsRef<str>>(&self, hints: &[S], rooms: &[Room]) -> RoomPool {
        let pools: Vec<RoomPool> = hints
            .iter()
            .map(|h| self.hinted_pool(h.as_ref(), rooms))
            .collect();
        if pools.contains(&RoomPool::Food) {
            RoomPool::Food
        } else if pools.contains(&RoomPool::Hackerspace) {
            RoomPool::Hackerspace
        } else {
            RoomPool::General
        }
    }

    /// Computes and stores the suitable pool of each submission.
    pub fn classify_submissions(&self, submissions: &mut [Submission], rooms: &[Room]) {
        for submission in submissions {
            let pool = self.pool_for_hints(&submission.room_hints, rooms);
            submission.suitable_pool = Some(pool);
        }
    }
}

/// Rooms grouped by their pool tag.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PoolPartition {
    pools: BTreeMap<RoomPool, Vec<usize>>,
}

impl PoolPartition {
    /// Groups room indices by `room.pool()`, each group sorted by (name, id).
    pub fn new(rooms: &[Room]) -> Self {
        let mut pools: BTreeMap<RoomPool, Vec<usize>> = BTreeMap::new();
        for (i, room) in rooms.iter().enumerate() {
            pools.entry(room.pool()).or_default().push(i);
        }
        for members in pools.values_mut() {
            members.sort_by(|&a, &b| {
                (&rooms[a].name, &rooms[a].id).cmp(&(&rooms[b].name, &rooms[b].id))
            });
        }
        Self { pools }
    }

    /// Room indices in a pool, in candidate order.
    pub fn rooms_in(&self, pool: RoomPool) -> &[usize] {
        self.pools.get(&pool).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Whether a pool has no rooms.
    pub fn is_empty(&self, pool: RoomPool) -> bool {
        self.rooms_in(pool).is_empty()
    }

    /// Number of rooms per pool.
    pub fn sizes(&self) -> BTreeMap<RoomPool, usize> {
        RoomPool::ALL
            .iter()
            .map(|&p| (p, self.rooms_in(p).len()))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn legacy_rooms() -> Vec<Room> {
        vec![
            Room::new("1", "Windsor"),
            Room::new("2", "Hackerspace B"),
            Room::new("3", "Food"),
            Room::new("4", "Hackerspace A"),
            Room::new("5", "Ballroom"),
        ]
    }

    #[test]
    fn test_classify_room() {
        let c = PoolClassifier::default();
        assert_eq!(c.classify_room("Food"), RoomPool::Food);
        assert_eq!(c.classify_room("Hackerspace A"), RoomPool::Hackerspace);
        assert_eq!(c.classify_room("HACKERSPACE b"), RoomPool::Hackerspace);
        assert_eq!(c.classify_room("Ballroom"), RoomPool::General);
    }

    #[test]
    fn test_food_wins_over_hackerspace() {
        let c = PoolClassifier::default();
        assert_eq!(c.classify_room("Hackerspace Food Lab"), RoomPool::Food);
    }

    #[test]
    fn test_custom_patterns() {
        let c = PoolClassifier::new(vec!["kitchen".into()], vec!["maker".into(), "lab".into()]);
        assert_eq!(c.classify_room("Main Kitchen"), RoomPool::Food);
        assert_eq!(c.classify_room("Makerspace"), RoomPool::Hackerspace);
        assert_eq!(c.classify_room("Food"), RoomPool::General);
    }

    #[test]
    fn test_partition_is_disjoint_and_sorted() {
        let c = PoolClassifier::default();
        let mut rooms = legacy_rooms();
        let p = c.partition(&mut rooms);

        assert_eq!(p.rooms_in(RoomPool::Food), &[2]);
        // Sorted by name: Hackerspace A, Hackerspace B
        assert_eq!(p.rooms_in(RoomPool::Hackerspace), &[3, 1]);
        // Ballroom, Windsor
        assert_eq!(p.rooms_in(RoomPool::General), &[4, 0]);

        let total: usize = p.sizes().values().sum();
        assert_eq!(total, rooms.len());
    }

    #[test]
    fn test_empty_pool() {
        let rooms = vec![Room::new("1", "Ballroom")];
        let p = PoolPartition::new(&rooms);
        assert!(p.is_empty(RoomPool::Food));
        assert_eq!(p.sizes()[&RoomPool::Food], 0);
    }

    #[test]
    fn test_explicit_tags_survive() {
        let c = PoolClassifier::default();
        let mut rooms = vec![
            Room::new("1", "Kitchen").with_pool(RoomPool::Food),
            Room::new("2", "Food Court").with_pool(RoomPool::General),
            Room::new("3", "Food"),
        ];
        assert_eq!(c.tag_rooms(&mut rooms), 1);
        assert_eq!(rooms[0].pool, Some(RoomPool::Food));
        assert_eq!(rooms[1].pool, Some(RoomPool::General));
        assert_eq!(rooms[2].pool, Some(RoomPool::Food));
        // Tagging again changes nothing
        assert_eq!(c.tag_rooms(&mut rooms), 0);
    }

    #[test]
    fn test_pool_for_hints_priority() {
        let c = PoolClassifier::default();
        let rooms = legacy_rooms();
        assert_eq!(c.pool_for_hints(&["Hackerspace A", "Food"], &rooms), RoomPool::Food);
        assert_eq!(
            c.pool_for_hints(&["Ballroom", "Hackerspace B"], &rooms),
            RoomPool::Hackerspace
        );
        assert_eq!(c.pool_for_hints(&["Ballroom"], &rooms), RoomPool::General);
        let none: [&str; 0] = [];
        assert_eq!(c.pool_for_hints(&none, &rooms), RoomPool::General);
    }

    #[test]
    fn test_hints_use_room_tags() {
        let c = PoolClassifier::default();
        let rooms = vec![
            Room::new("1", "Kitchen").with_pool(RoomPool::Food),
            Room::new("2", "Food Court").with_pool(RoomPool::General),
        ];
        assert_eq!(c.pool_for_hints(&["Kitchen"], &rooms), RoomPool::Food);
        assert_eq!(c.pool_for_hints(&["Food Court"], &rooms), RoomPool::General);
        // Unknown rooms fall back to the name patterns
        assert_eq!(c.pool_for_hints(&["Hackerspace C"], &rooms), RoomPool::Hackerspace);
    }

    #[test]
    fn test_classify_submissions() {
        let c = PoolClassifier::default();
        let mut rooms = legacy_rooms();
        c.tag_rooms(&mut rooms);
        let mut subs = vec![
            Submission::new("S1", "Cooking demo").with_room_hint("Food"),
            Submission::new("S2", "Keynote"),
        ];
        c.classify_submissions(&mut subs, &rooms);
        assert_eq!(subs[0].suitable_pool, Some(RoomPool::Food));
        assert_eq!(subs[1].suitable_pool, Some(RoomPool::General));
    }
}
