//! Common routes: liveness, readiness, version. Always mounted, never discovered.

use crate::response::{RootBody, StatusBody};
use crate::state::AppState;
use axum::{extract::State, http::StatusCode, routing::get, Json, Router};

async fn health() -> Json<StatusBody> {
    Json(StatusBody::ok())
}

async fn root() -> Json<RootBody> {
    Json(RootBody {
        message: "API is running",
        health: "/health",
    })
}

async fn ready(State(state): State<AppState>) -> Result<Json<StatusBody>, (StatusCode, Json<StatusBody>)> {
    if sqlx::query("SELECT 1").fetch_optional(&state.pool).await.is_err() {
        return Err((
            StatusCode::SERVICE_UNAVAILABLE,
            Json(StatusBody {
                status: "degraded",
                database: Some("unavailable"),
            }),
        ));
    }
    Ok(Json(StatusBody {
        status: "ok",
        database: Some("ok"),
    }))
}

async fn version() -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "name": env!("CARGO_PKG_NAME"),
        "version": env!("CARGO_PKG_VERSION")
    }))
}

/// GET /, /health, /api/health, /ready, /version.
pub fn common_routes(state: AppState) -> Router {
    Router::new()
        .route("/", get(root))
        .route("/health", get(health))
        .route("/api/health", get(health))
        .route("/ready", get(ready))
        .route("/version", get(version))
        .with_state(state)
}
