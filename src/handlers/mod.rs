//! HTTP handlers for table listing, preview and export.

pub mod db;
pub mod export;
pub use db::*;
pub use export::*;
