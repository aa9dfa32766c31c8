//! Cooperative abort for allocation runs.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Shared flag that stops an allocation run between submissions.
///
/// Clones share the flag, so an interactive caller can keep one clone and
/// hand another to the run.
#[derive(Debug, Clone, Default)]
pub struct AbortHandle {
    aborted: Arc<AtomicBool>,
}

impl AbortHandle {
    /// Creates a handle that is not aborted.
    pub fn new() -> Self {
        Self::default()
    }

    /// Requests the run to stop.
    pub fn abort(&self) {
        self.aborted.store(true, Ordering::SeqCst);
        tracing::info!("allocation abort requested");
    }

    /// Whether an abort was requested.
    pub fn is_aborted(&self) -> bool {
        self.aborted.load(Ordering::SeqCst)
    }

    /// Clears the flag so the handle can be reused.
    pub fn reset(&self) {
        self.aborted.store(false, Ordering::SeqCst);
    }
}
