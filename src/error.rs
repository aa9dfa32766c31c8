//! Error types for schedule generation.
//!
//! Only structural problems surface as errors. A submission that cannot be
//! placed is not an error: it is reported in the
//! [`AssignmentReport`](crate::models::AssignmentReport) and the run goes on.

use thiserror::Error;

use crate::models::SlotRange;
use crate::validation::ValidationError;

/// Result alias for schedule operations.
pub type Result<T> = std::result::Result<T, ScheduleError>;

/// Errors that abort a scheduling operation.
#[derive(Error, Debug)]
pub enum ScheduleError {
    /// Invalid timeslot bounds, slot duration or duration table.
    #[error("configuration error: {0}")]
    Configuration(String),

    /// A room slot was consumed twice. Indicates a logic bug; fatal to the run.
    #[error("room '{room_id}' is already booked in slots {range}")]
    Conflict { room_id: String, range: SlotRange },

    /// The run was aborted through its [`AbortHandle`](crate::scheduler::AbortHandle).
    #[error("allocation aborted, {released} consumed window(s) released")]
    Aborted { released: usize },

    /// The request failed validation.
    #[error("invalid input: {}", summarize(.0))]
    InvalidInput(Vec<ValidationError>),

    /// Configuration file could not be parsed.
    #[error("failed to parse configuration: {0}")]
    ConfigParse(#[from] toml::de::Error),

    /// Configuration file could not be read.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

fn summarize(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(|e| e.message.as_str())
        .collect::<Vec<_>>()
        .join("; ")
}

impl ScheduleError {
    /// Creates a configuration error.
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration(message.into())
    }

    /// Whether this error was caused by an abort request.
    pub fn is_aborted(&self) -> bool {
        matches!(self, Self::Aborted { .. })
    }
}
