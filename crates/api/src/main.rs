use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Context;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use pictura_api::config::ServerConfig;
use pictura_api::identity::Identity;
use pictura_api::routes;
use pictura_api::state::AppState;
use pictura_events::EventBus;
use pictura_genai::{GenAiClient, GenAiConfig};
use pictura_pipeline::{Pipeline, SessionHandle};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    // --- Tracing ---
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "pictura_api=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // --- Configuration ---
    let config = ServerConfig::from_env();
    tracing::info!(host = %config.host, port = %config.port, "Loaded server configuration");

    // --- Database (optional: without it the studio runs local-only) ---
    let pool = match std::env::var("DATABASE_URL") {
        Ok(database_url) => {
            let pool = pictura_store::create_pool(&database_url)
                .await
                .context("failed to connect to database")?;
            pictura_store::health_check(&pool)
                .await
                .context("database health check failed")?;
            pictura_store::run_migrations(&pool)
                .await
                .context("failed to run database migrations")?;
            tracing::info!("Database ready; project persistence enabled");
            Some(pool)
        }
        Err(_) => {
            tracing::warn!("DATABASE_URL not set; running local-only (projects disabled)");
            None
        }
    };

    // --- Identity ---
    let identity = Arc::new(Identity::resolve());
    tracing::info!(user_id = %identity.user_id, "Session identity ready");

    // --- Session, generation backend, pipeline ---
    let session = SessionHandle::new();
    let event_bus = Arc::new(EventBus::default());
    let backend = Arc::new(GenAiClient::new(GenAiConfig::from_env()));
    let pipeline = Arc::new(Pipeline::new(
        session.clone(),
        backend,
        event_bus.clone(),
    ));

    let state = AppState {
        pool,
        config: Arc::new(config.clone()),
        identity,
        session,
        pipeline,
        event_bus,
    };

    // --- Serve ---
    let app = routes::build_app(state);
    let addr: SocketAddr = format!("{}:{}", config.host, config.port)
        .parse()
        .context("invalid HOST/PORT")?;
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;
    tracing::info!(%addr, "Pictura API listening");

    axum::serve(listener, app).await.context("server error")?;
    Ok(())
}
