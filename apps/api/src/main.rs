mod blocks;
mod config;
mod db;
mod errors;
mod jobs;
mod llm_client;
mod matching;
mod render;
mod routes;
mod state;
mod tax;

use std::net::SocketAddr;
use std::path::Path;
use std::sync::Arc;

use anyhow::Result;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;
use crate::db::{create_pool, run_migrations};
use crate::llm_client::LlmClient;
use crate::matching::selector::{BlockSelector, FallbackSelector, HeuristicSelector, LlmSelector};
use crate::routes::build_router;
use crate::state::AppState;
use crate::tax::config::TaxConfig;

#[tokio::main]
async fn main() -> Result<()> {
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_CRATE_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting JobHunt API v{}", env!("CARGO_PKG_VERSION"));

    let db = create_pool(&config.database_url).await?;
    run_migrations(&db).await?;

    let tax_config = match &config.tax_config_path {
        Some(path) => {
            let loaded = TaxConfig::load(Path::new(path))?;
            info!("Tax config loaded from {path} (tax year {})", loaded.tax_year);
            loaded
        }
        None => TaxConfig::default(),
    };

    // LLM selection with heuristic fallback when a key is present; heuristic only otherwise
    let llm = match &config.anthropic_api_key {
        Some(key) => Some(LlmClient::new(key.clone())?),
        None => None,
    };
    let selector: Arc<dyn BlockSelector> = match &llm {
        Some(client) => {
            info!("LLM client initialized (model: {})", llm_client::MODEL);
            Arc::new(FallbackSelector::new(Arc::new(LlmSelector(client.clone()))))
        }
        None => {
            info!("ANTHROPIC_API_KEY not set; using heuristic block selection");
            Arc::new(HeuristicSelector)
        }
    };

    let state = AppState {
        db,
        llm,
        config: config.clone(),
        selector,
        tax_config: Arc::new(tax_config),
    };

    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive()); // TODO: restrict origins once the dashboard has a fixed host

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
