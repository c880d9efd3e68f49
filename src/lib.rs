//! Generated-app runtime: entity registry, table creation, one-shot seeding of empty
//! tables, live table catalog, preview/CSV export, and startup endpoint binding.

pub mod app;
pub mod case;
pub mod catalog;
pub mod config;
pub mod db;
pub mod error;
pub mod handlers;
pub mod migration;
pub mod registry;
pub mod response;
pub mod routes;
pub mod service;
pub mod sql;
pub mod state;

pub use app::{bootstrap, build_app, cors_layer};
pub use catalog::{CatalogReader, ValidatedTable};
pub use config::{load_from_path, resolve, ColumnDescriptor, ColumnKind, EntityRegistry, EntitySchema, ServerConfig};
pub use error::{AppError, ConfigError};
pub use migration::apply_migrations;
pub use registry::{register_all, DiscoveryFailure, ProviderEntry, RegistrationReport, RouteProvider};
pub use routes::{common_routes, db_routes, default_providers, export_routes};
pub use service::{DefaultResolver, RowRecord, SeedResult, SeedStatus, Seeder, TableService};
pub use state::AppState;
