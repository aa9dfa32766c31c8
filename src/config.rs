//! Schedule generation settings.
//!
//! Every field has a default, so an empty file is a valid configuration.
//!
//! ```toml
//! presenter_exclusive = true
//! timeslot_limit = 48
//!
//! [durations]
//! levels = [
//!     { kind = "minutes", minutes = 50 },
//!     { kind = "minutes", minutes = 110 },
//!     { kind = "minutes", minutes = 170 },
//!     { kind = "minutes", minutes = 240 },
//!     { kind = "whole_convention" },
//! ]
//!
//! [pools]
//! food = ["food", "kitchen"]
//! hackerspace = ["hackerspace"]
//!
//! [[availability.quiet_hours]]
//! start = "02:00:00"
//! end = "08:00:00"
//! ```

use serde::{Deserialize, Serialize};
use std::path::Path;

use chrono::TimeDelta;

use crate::availability::AvailabilityPolicy;
use crate::error::{Result, ScheduleError};
use crate::pools::PoolClassifier;
use crate::scheduler::{Allocator, DurationTable};

/// Settings for one schedule generation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScheduleConfig {
    /// Duration level to slot mapping.
    pub durations: DurationTable,
    /// Room name patterns per pool.
    pub pools: PoolClassifier,
    /// Refuse to book a presenter into overlapping events.
    pub presenter_exclusive: bool,
    /// Upper bound on generated timeslots.
    pub timeslot_limit: Option<usize>,
    /// Filter applied when rooms are opened.
    pub availability: AvailabilityPolicy,
}

impl Default for ScheduleConfig {
    fn default() -> Self {
        Self {
            durations: DurationTable::default(),
            pools: PoolClassifier::default(),
            presenter_exclusive: true,
            timeslot_limit: None,
            availability: AvailabilityPolicy::default(),
        }
    }
}

impl ScheduleConfig {
    /// Parses a TOML document.
    pub fn from_toml_str(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }

    /// Loads configuration from a TOML file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)?;
        let config = Self::from_toml_str(&content)?;
        tracing::debug!(path = %path.display(), "loaded schedule configuration");
        Ok(config)
    }

    /// Validates the configuration against a slot length.
    pub fn validate(&self, slot_duration: TimeDelta) -> Result<()> {
        if self.timeslot_limit == Some(0) {
            return Err(ScheduleError::configuration(
                "timeslot_limit must be greater than 0",
            ));
        }
        self.durations.validate(slot_duration)
    }

    /// An allocator using these settings.
    pub fn allocator(&self) -> Allocator {
        Allocator::new()
            .with_durations(self.durations.clone())
            .with_presenter_exclusive(self.presenter_exclusive)
    }
}
