mod config;
mod db;
mod errors;
mod extract;
mod llm_client;
mod models;
mod optimizer;
mod routes;
mod state;
mod store;
mod templates;

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;
use crate::db::connect;
use crate::llm_client::LlmClient;
use crate::routes::build_router;
use crate::state::AppState;
use crate::store::{MemoryStore, PgStore, Storage};

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first; only malformed numeric values are fatal
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!(
                "{}={}",
                env!("CARGO_PKG_NAME").replace('-', "_"),
                &config.rust_log
            ))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting PromptLab API v{}", env!("CARGO_PKG_VERSION"));

    // Initialize storage
    let store: Arc<dyn Storage> = match &config.database_url {
        Some(url) => {
            let pool = connect(url).await?;
            Arc::new(PgStore::init(pool).await?)
        }
        None => {
            info!("DATABASE_URL not set, keeping records in memory");
            Arc::new(MemoryStore::new())
        }
    };
    info!("Storage backend: {}", config.storage_kind());

    // Initialize LLM client
    let mut llm = LlmClient::new(
        config.anthropic_api_key.clone(),
        Duration::from_secs(config.llm_timeout_secs),
    )?;
    if let Some(url) = &config.anthropic_api_url {
        llm = llm.with_endpoint(url.clone());
    }
    if llm.has_api_key() {
        info!("LLM client initialized (model: {})", llm_client::MODEL);
    } else {
        warn!("ANTHROPIC_API_KEY not set, every analysis will use the local fallback");
    }

    // Build app state
    let state = AppState {
        store,
        llm: Arc::new(llm),
        config: config.clone(),
    };

    // Build router
    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
