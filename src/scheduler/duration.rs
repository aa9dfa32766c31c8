//! Duration level to slot count mapping.
//!
//! # Default Table
//!
//! | Level | Label | Span |
//! |-------|-------|------|
//! | 1 | 50 minutes | 50 min |
//! | 2 | 1 hour and 50 minutes | 110 min |
//! | 3 | 2 hours and 50 minutes | 170 min |
//! | 4 | More than 2 hours and 50 minutes | 240 min |
//! | 5 | All weekend | whole convention |
//!
//! Minute spans round up to whole slots, so with one-hour slots levels 1-4
//! need 1, 2, 3 and 4 slots.

use chrono::TimeDelta;
use serde::{Deserialize, Serialize};

use crate::error::{Result, ScheduleError};
use crate::models::DurationLevel;

/// Real length of one duration level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum DurationSpan {
    /// A span in minutes, rounded up to whole slots.
    Minutes { minutes: u32 },
    /// A fixed number of slots regardless of slot length.
    Slots { slots: u32 },
    /// Every slot of the timeline.
    WholeConvention,
}

/// Configurable mapping from [`DurationLevel`] to required slots.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DurationTable {
    /// Spans for levels 1 through 5.
    pub levels: [DurationSpan; 5],
}

impl Default for DurationTable {
    fn default() -> Self {
        Self {
            levels: [
                DurationSpan::Minutes { minutes: 50 },
                DurationSpan::Minutes { minutes: 110 },
                DurationSpan::Minutes { minutes: 170 },
                DurationSpan::Minutes { minutes: 240 },
                DurationSpan::WholeConvention,
            ],
        }
    }
}

impl DurationTable {
    /// The legacy convention importer's table: four slots for every level.
    ///
    /// Kept as an explicit opt-in; it ignores the submitted duration.
    pub fn legacy_import() -> Self {
        Self {
            levels: [DurationSpan::Slots { slots: 4 }; 5],
        }
    }

    /// Replaces the span of one level.
    pub fn with_level(mut self, level: DurationLevel, span: DurationSpan) -> Self {
        self.levels[usize::from(level.get() - 1)] = span;
        self
    }

    /// Span of a level.
    pub fn span(&self, level: DurationLevel) -> DurationSpan {
        self.levels[usize::from(level.get() - 1)]
    }

    /// Slots needed for `level` on a timeline of `timeline_len` slots of
    /// `slot_duration` each.
    ///
    /// Fails on zero-length spans and non-positive slot durations.
    pub fn required_slots(
        &self,
        level: DurationLevel,
        slot_duration: TimeDelta,
        timeline_len: usize,
    ) -> Result<usize> {
        let slots = match self.span(level) {
            DurationSpan::Minutes { minutes } => {
                let slot_minutes = slot_duration.num_minutes();
                if slot_minutes <= 0 {
                    return Err(ScheduleError::configuration(format!(
                        "slot duration of {slot_minutes} minutes cannot hold minute spans"
                    )));
                }
                let minutes = i64::from(minutes);
                usize::try_from((minutes + slot_minutes - 1) / slot_minutes).unwrap_or(usize::MAX)
            }
            DurationSpan::Slots { slots } => usize::try_from(slots).unwrap_or(usize::MAX),
            DurationSpan::WholeConvention => timeline_len,
        };
        if slots == 0 {
            return Err(ScheduleError::configuration(format!(
                "duration level {} maps to zero slots",
                level.get()
            )));
        }
        Ok(slots)
    }

    /// Checks every level against a slot duration.
    pub fn validate(&self, slot_duration: TimeDelta) -> Result<()> {
        for raw in DurationLevel::MIN..=DurationLevel::MAX {
            let level = DurationLevel::new(raw)?;
            // Whole-convention spans are validated against the real timeline later
            self.required_slots(level, slot_duration, 1)?;
        }
        Ok(())
    }
}
