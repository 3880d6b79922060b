use std::sync::Arc;

use crate::config::Config;
use crate::llm_client::ChatModel;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    /// Chat backend for the interview endpoints. Production: `LlmClient`.
    pub llm: Arc<dyn ChatModel>,
    pub config: Config,
}
