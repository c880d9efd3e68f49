//! Server: opens the database, ensures tables, seeds empty ones, binds providers, serves.

use genapp_runtime::{bootstrap, build_app, db, default_providers, load_from_path, AppState, EntityRegistry, ServerConfig};
use tokio::net::TcpListener;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("genapp_runtime=info,tower_http=info")),
        )
        .init();

    let config = ServerConfig::from_env()?;
    let pool = db::connect(&config.database_url, config.max_connections).await?;

    let entities = if config.entities_path.exists() {
        load_from_path(&config.entities_path).await?
    } else {
        tracing::warn!(path = %config.entities_path.display(), "entities file not found, starting with no entities");
        EntityRegistry::default()
    };
    tracing::info!(entities = entities.len(), "entity registry loaded");

    let state = AppState::new(pool, entities);
    bootstrap(&state).await?;

    let (app, report) = build_app(state, &default_providers(), &config.cors_allowed_origins);
    tracing::info!(
        registered = report.registered.len(),
        skipped = report.skipped.len(),
        failed = report.failed.len(),
        "providers bound"
    );

    let listener = TcpListener::bind(config.bind_addr).await?;
    tracing::info!("listening on {}", listener.local_addr()?);
    axum::serve(listener, app).await?;
    Ok(())
}
