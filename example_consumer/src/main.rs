//! Example consumer: a separate Rust project that uses genapp-runtime as a dependency.
//! Entities are registered in code instead of an entities.json file, and one extra
//! provider is bound next to the built-in ones.
//!
//! Run from repo root: `cargo run -p example-consumer`

use axum::{routing::get, Json, Router};
use genapp_runtime::{
    bootstrap, build_app, db, default_providers, AppState, ColumnDescriptor, EntityRegistry, EntitySchema,
    ProviderEntry, RouteProvider, SeedStatus,
};
use tokio::net::TcpListener;

struct EntitiesRoutes;

impl RouteProvider for EntitiesRoutes {
    fn name(&self) -> &str {
        "entities"
    }

    fn router(&self, state: &AppState) -> Option<Router> {
        let labels: Vec<String> = state.entities.entities().iter().map(|e| e.label.clone()).collect();
        Some(Router::new().route("/entities", get(move || async move { Json(labels) })))
    }
}

fn load_entities_routes() -> Result<Box<dyn RouteProvider>, String> {
    Ok(Box::new(EntitiesRoutes))
}

fn registry() -> Result<EntityRegistry, genapp_runtime::ConfigError> {
    EntityRegistry::builder()
        .register(
            EntitySchema::new("Customer", "customers")
                .column(ColumnDescriptor::primary_key("id", "Integer"))
                .column(ColumnDescriptor::new("name", "String(120)").not_null())
                .column(ColumnDescriptor::new("vip", "Boolean")),
        )
        .register(
            EntitySchema::new("Invoice", "invoices")
                .column(ColumnDescriptor::primary_key("id", "Integer"))
                .column(ColumnDescriptor::new("customer_id", "Integer"))
                .column(ColumnDescriptor::new("total", "Numeric(10, 2)")),
        )
        .build()
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("genapp_runtime=info,example_consumer=info")),
        )
        .init();

    let pool = db::connect_in_memory().await?;
    let state = AppState::new(pool, registry()?);

    for result in bootstrap(&state).await? {
        if let SeedStatus::Failed(reason) = &result.status {
            tracing::warn!(entity = %result.entity, reason = %reason, "seed failed");
        }
    }

    let mut providers = default_providers();
    providers.push(ProviderEntry::new("entities", load_entities_routes));
    let (app, _report) = build_app(state, &providers, &[]);

    let listener = TcpListener::bind("127.0.0.1:3000").await?;
    let port = listener.local_addr()?.port();
    tracing::info!("Example consumer listening on http://127.0.0.1:{}", port);
    axum::serve(listener, app).await?;
    Ok(())
}
