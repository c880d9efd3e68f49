//! Seeding and table access services over the shared pool.

mod defaults;
mod rows;
mod seed;
mod table;
pub use defaults::DefaultResolver;
pub use rows::RowRecord;
pub use seed::{SeedResult, SeedStatus, Seeder};
pub use table::{CsvExport, TableService, PREVIEW_LIMIT};
