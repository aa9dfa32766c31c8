//! Convention persistence seam.
//!
//! The scheduling core never touches storage. [`ScheduleService`] loads a
//! convention from a [`ConventionStore`], runs
//! [`generate_schedule`](crate::scheduler::generate_schedule) and saves
//! the result.

use std::collections::HashMap;
use std::sync::Mutex;

use thiserror::Error;

use crate::config::ScheduleConfig;
use crate::error::ScheduleError;
use crate::models::{AssignmentReport, Convention};
use crate::scheduler::{generate_schedule, AbortHandle};

/// Errors returned by a [`ConventionStore`] or the [`ScheduleService`].
#[derive(Error, Debug)]
pub enum StoreError {
    /// The requested convention does not exist.
    #[error("convention does not exist")]
    NotExisting,

    /// The backing store failed.
    #[error("store unavailable: {0}")]
    Unavailable(String),

    /// Schedule generation failed.
    #[error(transparent)]
    Schedule(#[from] ScheduleError),
}

/// Storage for conventions.
pub trait ConventionStore: Send + Sync {
    /// Loads a convention by ID.
    fn load(&self, id: &str) -> Result<Convention, StoreError>;

    /// Inserts or replaces a convention.
    fn save(&self, convention: &Convention) -> Result<(), StoreError>;
}

/// In-memory [`ConventionStore`], for tests and embedding.
#[derive(Debug, Default)]
pub struct MemoryStore {
    data: Mutex<HashMap<String, Convention>>,
}

impl MemoryStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored conventions.
    pub fn len(&self) -> usize {
        self.data.lock().map(|d| d.len()).unwrap_or(0)
    }

    /// Whether the store holds no conventions.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl ConventionStore for MemoryStore {
    fn load(&self, id: &str) -> Result<Convention, StoreError> {
        let data = self
            .data
            .lock()
            .map_err(|e| StoreError::Unavailable(e.to_string()))?;
        data.get(id).cloned().ok_or(StoreError::NotExisting)
    }

    fn save(&self, convention: &Convention) -> Result<(), StoreError> {
        let mut data = self
            .data
            .lock()
            .map_err(|e| StoreError::Unavailable(e.to_string()))?;
        data.insert(convention.id.clone(), convention.clone());
        Ok(())
    }
}

/// Wires a store to schedule generation.
pub struct ScheduleService<S> {
    store: S,
    config: ScheduleConfig,
}

impl<S: ConventionStore> ScheduleService<S> {
    /// Creates a service with the default configuration.
    pub fn new(store: S) -> Self {
        Self {
            store,
            config: ScheduleConfig::default(),
        }
    }

    /// Sets the configuration.
    pub fn with_config(mut self, config: ScheduleConfig) -> Self {
        self.config = config;
        self
    }

    /// The underlying store.
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Schedules a stored convention and saves the result.
    ///
    /// Nothing is saved if generation fails.
    pub fn schedule(
        &self,
        convention_id: &str,
        abort: &AbortHandle,
    ) -> Result<AssignmentReport, StoreError> {
        let mut convention = self.store.load(convention_id)?;
        let report = generate_schedule(&mut convention, &self.config, abort)?;
        self.store.save(&convention)?;
        tracing::info!(
            convention = %convention_id,
            assigned = report.assigned.len(),
            unassigned = report.unassigned.len(),
            "schedule saved"
        );
        Ok(report)
    }
}
