//! Response bodies for the db admin, export and liveness endpoints.

use crate::service::RowRecord;
use serde::Serialize;

#[derive(Serialize)]
pub struct ErrorBody {
    pub detail: String,
}

impl ErrorBody {
    pub fn new(detail: impl Into<String>) -> Self {
        ErrorBody { detail: detail.into() }
    }
}

#[derive(Serialize)]
pub struct TablesBody {
    pub tables: Vec<String>,
}

#[derive(Serialize)]
pub struct TablePreviewBody {
    pub table: String,
    pub rows: Vec<RowRecord>,
}

#[derive(Serialize)]
pub struct StatusBody {
    pub status: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub database: Option<&'static str>,
}

impl StatusBody {
    pub fn ok() -> Self {
        StatusBody {
            status: "ok",
            database: None,
        }
    }
}

#[derive(Serialize)]
pub struct RootBody {
    pub message: &'static str,
    pub health: &'static str,
}
