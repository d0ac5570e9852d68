mod app;
mod config;
mod error;
mod feedback;
mod groceries;
mod images;
mod menu;
mod recipes;
mod sessions;
mod state;
mod storage;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let env_filter = std::env::var("RUST_LOG")
        .unwrap_or_else(|_| "homieskitchen=debug,axum=info,tower_http=info".to_string());
    let json_logs = std::env::var("LOG_FORMAT")
        .map(|v| v == "json")
        .unwrap_or(false);

    if json_logs {
        tracing_subscriber::fmt()
            .with_env_filter(env_filter)
            .with_target(false)
            .json()
            .init();
    } else {
        tracing_subscriber::fmt().with_env_filter(env_filter).init();
    }

    let app_state = state::AppState::init()?;
    tracing::info!(
        max_sessions = app_state.config.max_sessions,
        max_upload_bytes = app_state.config.max_upload_bytes,
        session_idle_secs = app_state.config.session_idle_ttl.as_secs(),
        "recipe store ready (in-memory, per session)"
    );

    tokio::spawn(sessions::services::run_sweeper(app_state.clone()));

    let app = app::build_app(app_state.clone());
    app::serve(app, &app_state).await
}
