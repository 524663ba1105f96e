use std::sync::Arc;

use sqlx::PgPool;

use crate::config::Config;
use crate::llm_client::LlmClient;
use crate::matching::selector::BlockSelector;
use crate::tax::config::TaxConfig;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub db: PgPool,
    /// `None` when no API key is configured.
    pub llm: Option<LlmClient>,
    pub config: Config,
    /// Pluggable block selector. Heuristic by default; LLM with heuristic
    /// fallback when an API key is present.
    pub selector: Arc<dyn BlockSelector>,
    pub tax_config: Arc<TaxConfig>,
}
