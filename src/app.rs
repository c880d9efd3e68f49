//! Startup sequence and router assembly.

use crate::error::AppError;
use crate::migration::apply_migrations;
use crate::registry::{register_all, ProviderEntry, RegistrationReport};
use crate::routes::common_routes;
use crate::service::{SeedResult, SeedStatus, Seeder};
use crate::state::AppState;
use axum::http::HeaderValue;
use axum::Router;
use tower::ServiceBuilder;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::trace::TraceLayer;

/// Create missing tables, then seed every empty one. Must finish before serving.
pub async fn bootstrap(state: &AppState) -> Result<Vec<SeedResult>, AppError> {
    apply_migrations(&state.pool, &state.entities).await?;
    let results = Seeder::seed_all(&state.pool, state.entities.entities()).await?;
    let seeded = results.iter().filter(|r| r.status == SeedStatus::Seeded).count();
    let failed = results.iter().filter(|r| matches!(r.status, SeedStatus::Failed(_))).count();
    tracing::info!(entities = results.len(), seeded, failed, "seeding finished");
    Ok(results)
}

/// Any method and header; `origins` empty means any origin.
pub fn cors_layer(origins: &[String]) -> CorsLayer {
    let cors = CorsLayer::new().allow_methods(Any).allow_headers(Any);
    if origins.is_empty() || origins.iter().any(|o| o == "*") {
        return cors.allow_origin(Any);
    }
    let mut allowed = Vec::new();
    for origin in origins {
        match HeaderValue::from_str(origin) {
            Ok(v) => allowed.push(v),
            Err(_) => tracing::error!(origin = %origin, "invalid CORS origin, ignored"),
        }
    }
    cors.allow_origin(AllowOrigin::list(allowed))
}

/// Health routes plus every provider that binds, wrapped in tracing and CORS.
pub fn build_app(state: AppState, providers: &[ProviderEntry], cors_origins: &[String]) -> (Router, RegistrationReport) {
    let (app, report) = register_all(common_routes(state.clone()), providers, &state);
    let app = app.layer(
        ServiceBuilder::new()
            .layer(TraceLayer::new_for_http())
            .layer(cors_layer(cors_origins)),
    );
    (app, report)
}
