use std::time::Duration;

mod app;
mod auth;
mod config;
mod db;
mod error;
mod items;
mod state;
mod views;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let env_filter = std::env::var("RUST_LOG")
        .unwrap_or_else(|_| "listkeeper=debug,axum=info,tower_http=info".to_string());
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

    let state = state::AppState::init().await?;
    db::migrate(&state.db).await?;
    tracing::info!(database_url = %state.config.database_url, "database ready");

    match &state.config.seed {
        Some(seed) => {
            auth::services::ensure_user(&state.db, &seed.email, &seed.password).await?;
        }
        None => {
            if auth::repo_types::User::count(&state.db).await? == 0 {
                tracing::warn!(
                    "no users exist and SEED_EMAIL/SEED_PASSWORD are unset; nobody can log in"
                );
            }
        }
    }

    if state.config.session.sweep_secs > 0 {
        state
            .sessions
            .spawn_sweeper(Duration::from_secs(state.config.session.sweep_secs));
    }

    let config = state.config.clone();
    app::serve(app::build_app(state), &config).await
}
