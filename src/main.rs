use anyhow::Context;

mod app;
mod auth;
mod config;
mod db;
mod error;
mod users;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let env_filter = std::env::var("RUST_LOG")
        .unwrap_or_else(|_| "accountd=debug,axum=info,tower_http=info".to_string());
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

    let state = db::AppState::init().await?;

    // A failure to create the schema is fatal; the service must not come up
    // half-wired.
    db::ensure_schema(&state.db)
        .await
        .context("create data schema")?;

    let app = app::build_app(state);
    app::serve(app).await
}
