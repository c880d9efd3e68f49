mod common;
mod db;

pub use common::common_routes;
pub use db::{db_routes, export_routes, DbAdminRoutes, ExportRoutes};

use crate::registry::{ProviderEntry, RouteProvider};

fn load_db_admin() -> Result<Box<dyn RouteProvider>, String> {
    Ok(Box::new(DbAdminRoutes))
}

fn load_export() -> Result<Box<dyn RouteProvider>, String> {
    Ok(Box::new(ExportRoutes))
}

/// Providers shipped with the runtime, in binding order.
pub fn default_providers() -> Vec<ProviderEntry> {
    vec![
        ProviderEntry::new("db_admin", load_db_admin),
        ProviderEntry::new("export", load_export),
    ]
}
