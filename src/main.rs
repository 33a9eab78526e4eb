mod config;
mod db;
mod error;
mod game;
mod models;
mod routes;
mod stats;
mod words;

use std::{sync::Arc, time::Duration};

use anyhow::Result;
use config::Config;
use db::{MemoryStore, PgStore, Store};
use game::{GameEngine, RankingService, ScoreLedger};
use stats::{StatsCache, StatsRefresher};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use words::{DictionaryWordSource, HttpWordSource, WordSource};

/// Application state shared across all handlers
pub struct AppState {
    pub engine: GameEngine,
    pub ledger: ScoreLedger,
    pub rankings: RankingService,
    /// Read by request handlers, written by the background refresher only
    pub stats: Arc<StatsCache>,
    pub stats_refresher: StatsRefresher,
}

impl AppState {
    /// Wire the services together and start the stats refresher.
    /// Must be called from within a tokio runtime.
    pub fn new(config: Config, store: Arc<dyn Store>, words: Arc<dyn WordSource>) -> Self {
        let stats = Arc::new(StatsCache::new());
        let stats_refresher = StatsRefresher::spawn(
            stats.clone(),
            store.clone(),
            config.game.stats_queue_capacity,
        );

        Self {
            engine: GameEngine::new(store.clone(), words, config.game.default_attempts),
            ledger: ScoreLedger::new(store.clone()),
            rankings: RankingService::new(store),
            stats,
            stats_refresher,
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "hangman_backend=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting Hangman backend server...");

    // Load configuration
    let config = Config::from_env()?;
    tracing::info!("Configuration loaded");

    let store = create_store(&config).await?;
    let words = create_word_source(&config).await?;

    let addr = config.server_addr();
    let state = Arc::new(AppState::new(config, store, words));

    // Configure CORS
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    // Build router
    let app = routes::create_routes()
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state);

    // Start server
    let listener = tokio::net::TcpListener::bind(&addr).await?;

    tracing::info!("Server listening on {}", addr);
    tracing::info!("Health check: http://{}/health", addr);

    axum::serve(listener, app).await?;

    Ok(())
}

/// Connect to Postgres when configured, otherwise keep everything in memory
async fn create_store(config: &Config) -> Result<Arc<dyn Store>> {
    match config.database_url() {
        Some(url) => {
            let pool = db::create_pool(url, config.database.max_connections).await?;
            tracing::info!("Connected to database");

            sqlx::migrate!("./migrations").run(&pool).await?;
            tracing::info!("Database migrations completed");

            Ok(Arc::new(PgStore::new(pool)))
        }
        None => {
            tracing::warn!("DATABASE_URL not set, using in-memory store; data will not survive restarts");
            Ok(Arc::new(MemoryStore::new()))
        }
    }
}

/// Prefer a local word list when one is configured and loads, else use HTTP
async fn create_word_source(config: &Config) -> Result<Arc<dyn WordSource>> {
    if let Some(path) = &config.words.list_path {
        match DictionaryWordSource::load(path).await {
            Ok(source) if !source.is_empty() => return Ok(Arc::new(source)),
            Ok(_) => tracing::warn!("Word list {} is empty, falling back to HTTP", path),
            Err(e) => tracing::warn!(
                "Failed to load word list {}: {}. Falling back to HTTP",
                path,
                e
            ),
        }
    }

    // Shared HTTP client for reusing connections
    let http_client = reqwest::Client::builder()
        .timeout(Duration::from_secs(config.words.timeout_secs))
        .build()?;
    tracing::info!("Fetching words from {}", config.words.url);

    Ok(Arc::new(HttpWordSource::new(
        http_client,
        config.words.url.clone(),
    )))
}
