//! Application state.
//!
//! Constructed once at startup and shared immutably across requests; the
//! pipeline holds no cross-request mutable state.

use std::sync::Arc;
use std::time::Instant;

use kingen_backend::GenerationBackend;
use kingen_core::Config;
use kingen_storage::ArtifactStore;

#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    pub store: Arc<dyn ArtifactStore>,
    pub backend: Arc<dyn GenerationBackend>,
    /// Process start, for the /health uptime report.
    pub started_at: Instant,
}

impl AppState {
    pub fn new(
        config: Config,
        store: Arc<dyn ArtifactStore>,
        backend: Arc<dyn GenerationBackend>,
    ) -> Self {
        Self {
            config,
            store,
            backend,
            started_at: Instant::now(),
        }
    }
}
