//! Per-room free-slot bitmaps and the arena that owns them.

use std::collections::HashMap;

use super::Timeline;
use crate::error::{Result, ScheduleError};
use crate::models::{Room, SlotRange, Timeslot};

/// Free/consumed state of one room over the timeline.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoomAvailability {
    room_id: String,
    /// Slots the room was opened for.
    opened: Vec<bool>,
    /// Slots still free.
    free: Vec<bool>,
}

impl RoomAvailability {
    /// Creates availability for `timeline_len` slots, free at `open_slots`.
    pub fn new(room_id: impl Into<String>, timeline_len: usize, open_slots: &[usize]) -> Self {
        let mut opened = vec![false; timeline_len];
        for &i in open_slots {
            if let Some(flag) = opened.get_mut(i) {
                *flag = true;
            }
        }
        Self {
            room_id: room_id.into(),
            free: opened.clone(),
            opened,
        }
    }

    /// Room this bitmap belongs to.
    pub fn room_id(&self) -> &str {
        &self.room_id
    }

    /// Whether every slot in the range is still free.
    pub fn is_available(&self, range: SlotRange) -> bool {
        range.end() <= self.free.len() && self.free[range.start..range.end()].iter().all(|&f| f)
    }

    /// Whether the room was opened for every slot in the range.
    pub fn was_opened(&self, range: SlotRange) -> bool {
        range.end() <= self.opened.len()
            && self.opened[range.start..range.end()].iter().all(|&f| f)
    }

    /// Marks a range as consumed.
    ///
    /// Availability is re-checked first; nothing is marked on conflict.
    pub fn consume(&mut self, range: SlotRange) -> Result<()> {
        if !self.is_available(range) {
            return Err(ScheduleError::Conflict {
                room_id: self.room_id.clone(),
                range,
            });
        }
        self.free[range.start..range.end()].fill(false);
        Ok(())
    }

    /// Returns consumed slots in a range to the free set.
    ///
    /// Slots the room was never opened for stay unavailable.
    pub fn release(&mut self, range: SlotRange) {
        let end = range.end().min(self.free.len());
        for i in range.start.min(end)..end {
            self.free[i] = self.opened[i];
        }
    }

    /// Every free, gap-free window of `len` slots, earliest first.
    pub fn free_windows<'a>(
        &'a self,
        len: usize,
        timeline: &'a Timeline,
    ) -> impl Iterator<Item = SlotRange> + 'a {
        let last_start = self.free.len().checked_sub(len).filter(|_| len > 0);
        last_start
            .into_iter()
            .flat_map(|last| 0..=last)
            .map(move |start| SlotRange::new(start, len))
            .filter(move |&range| self.is_available(range) && timeline.is_contiguous(range))
    }

    /// Earliest free, gap-free window of `len` slots.
    pub fn first_free_window(&self, len: usize, timeline: &Timeline) -> Option<SlotRange> {
        self.free_windows(len, timeline).next()
    }

    /// Number of free slots.
    pub fn free_count(&self) -> usize {
        self.free.iter().filter(|&&f| f).count()
    }

    /// Positions of free slots, ascending.
    pub fn free_indices(&self) -> Vec<usize> {
        self.free
            .iter()
            .enumerate()
            .filter_map(|(i, &f)| f.then_some(i))
            .collect()
    }
}

/// Availability of every room, indexed by room.
///
/// The arena is the single owner of free-slot state during a run; all
/// mutation goes through [`consume`](Self::consume) and
/// [`release`](Self::release).
#[derive(Debug, Clone, PartialEq)]
pub struct AvailabilityArena {
    timeline: Timeline,
    rooms: Vec<RoomAvailability>,
    index: HashMap<String, usize>,
}

impl AvailabilityArena {
    /// Builds bitmaps from each room's available timeslots.
    ///
    /// Arena index `i` corresponds to `rooms[i]`. Fails on duplicate room
    /// IDs or on a room timeslot that is not on the timeline.
    pub fn new(timeline: Timeline, rooms: &[Room]) -> Result<Self> {
        let mut index = HashMap::with_capacity(rooms.len());
        let mut bitmaps = Vec::with_capacity(rooms.len());

        for (i, room) in rooms.iter().enumerate() {
            if index.insert(room.id.clone(), i).is_some() {
                return Err(ScheduleError::configuration(format!(
                    "room '{}' listed twice",
                    room.id
                )));
            }
            let open = room
                .available_timeslots
                .iter()
                .map(|slot| {
                    timeline.position_of(slot).ok_or_else(|| {
                        ScheduleError::configuration(format!(
                            "room '{}' lists timeslot {}..{} which is not on the timeline",
                            room.id, slot.start, slot.end
                        ))
                    })
                })
                .collect::<Result<Vec<_>>>()?;
            bitmaps.push(RoomAvailability::new(&room.id, timeline.len(), &open));
        }

        Ok(Self {
            timeline,
            rooms: bitmaps,
            index,
        })
    }

    /// The shared timeline.
    pub fn timeline(&self) -> &Timeline {
        &self.timeline
    }

    /// Number of rooms.
    pub fn len(&self) -> usize {
        self.rooms.len()
    }

    /// Whether the arena has no rooms.
    pub fn is_empty(&self) -> bool {
        self.rooms.is_empty()
    }

    /// Arena index of a room.
    pub fn position(&self, room_id: &str) -> Option<usize> {
        self.index.get(room_id).copied()
    }

    /// Availability of the room at an arena index.
    pub fn room(&self, index: usize) -> Option<&RoomAvailability> {
        self.rooms.get(index)
    }

    /// Availability of a room by ID.
    pub fn room_by_id(&self, room_id: &str) -> Option<&RoomAvailability> {
        self.position(room_id).and_then(|i| self.rooms.get(i))
    }

    /// Iterates over all room bitmaps in arena order.
    pub fn iter(&self) -> impl Iterator<Item = &RoomAvailability> {
        self.rooms.iter()
    }

    /// Consumes a range in one room.
    pub fn consume(&mut self, index: usize, range: SlotRange) -> Result<()> {
        let room = self.rooms.get_mut(index).ok_or_else(|| {
            ScheduleError::configuration(format!("no room at arena index {index}"))
        })?;
        room.consume(range)
    }

    /// Releases a range in one room. Unknown indices are ignored.
    pub fn release(&mut self, index: usize, range: SlotRange) {
        if let Some(room) = self.rooms.get_mut(index) {
            room.release(range);
        }
    }

    /// The timeslots a room is still free in.
    pub fn free_timeslots(&self, index: usize) -> Vec<Timeslot> {
        self.rooms
            .get(index)
            .map(|room| {
                room.free_indices()
                    .into_iter()
                    .filter_map(|i| self.timeline.get(i).cloned())
                    .collect()
            })
            .unwrap_or_default()
    }
}
