use std::sync::Arc;

use crate::config::Config;
use crate::sessions::{InMemorySessionStore, SessionStore};

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    /// Pluggable session storage. Default: InMemorySessionStore.
    pub sessions: Arc<dyn SessionStore>,
}

impl AppState {
    pub fn in_memory(config: Config) -> Self {
        let sessions = Arc::new(InMemorySessionStore::new(config.session_capacity));
        Self { config, sessions }
    }
}
