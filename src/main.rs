use std::sync::Arc;

use anyhow::Context;
use kanban_server::{
    app_state::{AppState, SharedState},
    map_routes,
    persist::open_store,
    repository::TaskRepository,
    settings::Settings,
};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let settings = Settings::load().context("failed to load settings")?;

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&settings.log.filter));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    // ── Open the store ─────────────────────────────────────────
    let store = open_store(&settings.store).context("failed to open task store")?;
    let repository = Arc::new(TaskRepository::new(store));

    // First read seeds an empty store, so a broken store fails here, not on
    // the first request.
    let tasks = repository.list().context("failed to read tasks")?;
    tracing::info!(tasks = tasks.len(), "board loaded");

    // ── Router ─────────────────────────────────────────────────
    let state: SharedState = Arc::new(AppState::new(repository));
    let app = map_routes(state);

    // ── Start ──────────────────────────────────────────────────
    let addr = settings.bind_address();
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;
    tracing::info!(%addr, "server running");
    axum::serve(listener, app).await.context("server error")?;
    Ok(())
}
