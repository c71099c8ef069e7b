use std::sync::Arc;

use crate::config::Config;
use crate::llm_client::CompletionBackend;
use crate::store::Storage;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    /// Memory or PostgreSQL, chosen at startup from `DATABASE_URL`.
    pub store: Arc<dyn Storage>,
    /// Model backend. Production uses `LlmClient`; tests script replies.
    pub llm: Arc<dyn CompletionBackend>,
    pub config: Config,
}
