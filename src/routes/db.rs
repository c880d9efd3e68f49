//! Database admin and export routes, each exposed as a discoverable provider.

use crate::handlers::{export_csv, list_tables, preview_table};
use crate::registry::RouteProvider;
use crate::state::AppState;
use axum::{routing::get, Router};

pub fn db_routes(state: AppState) -> Router {
    Router::new()
        .route("/db/tables", get(list_tables))
        .route("/db/table/:table_name", get(preview_table))
        .with_state(state)
}

pub fn export_routes(state: AppState) -> Router {
    Router::new()
        .route("/db/export/csv/:table_name", get(export_csv))
        .with_state(state)
}

pub struct DbAdminRoutes;

impl RouteProvider for DbAdminRoutes {
    fn name(&self) -> &str {
        "db_admin"
    }

    fn router(&self, state: &AppState) -> Option<Router> {
        Some(db_routes(state.clone()))
    }
}

pub struct ExportRoutes;

impl RouteProvider for ExportRoutes {
    fn name(&self) -> &str {
        "export"
    }

    fn router(&self, state: &AppState) -> Option<Router> {
        Some(export_routes(state.clone()))
    }
}
