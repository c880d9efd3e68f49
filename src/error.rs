//! Typed errors and HTTP mapping.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;

use crate::response::ErrorBody;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("config load: {0}")]
    Load(String),
    #[error("config parse: {0}")]
    Parse(String),
    #[error("invalid identifier for {kind}: '{name}'")]
    InvalidIdentifier { kind: &'static str, name: String },
    #[error("invalid declared type '{declared}' for column {table}.{column}")]
    InvalidType {
        table: String,
        column: String,
        declared: String,
    },
    #[error("duplicate table: {0}")]
    DuplicateTable(String),
    #[error("duplicate column: {table}.{column}")]
    DuplicateColumn { table: String, column: String },
    #[error("table {table} declares more than one primary key: {columns:?}")]
    MultiplePrimaryKeys { table: String, columns: Vec<String> },
    #[error("table {0} declares no columns")]
    EmptyEntity(String),
    #[error("environment: {0}")]
    Env(String),
    #[error("validation pattern: {0}")]
    Pattern(String),
}

#[derive(Error, Debug)]
pub enum AppError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("invalid table name: {0}")]
    InvalidTable(String),
    #[error("no data in table: {0}")]
    NoData(String),
    #[error("database: {0}")]
    Db(#[from] sqlx::Error),
    #[error("export: {0}")]
    Export(#[from] csv::Error),
}

impl AppError {
    /// True when the database itself could not be reached; nothing else can proceed.
    pub fn is_connectivity(&self) -> bool {
        matches!(self, AppError::Db(e) if is_connectivity_error(e))
    }
}

pub(crate) fn is_connectivity_error(e: &sqlx::Error) -> bool {
    matches!(
        e,
        sqlx::Error::Io(_)
            | sqlx::Error::Tls(_)
            | sqlx::Error::PoolTimedOut
            | sqlx::Error::PoolClosed
            | sqlx::Error::WorkerCrashed
    )
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, detail) = match &self {
            AppError::InvalidTable(_) => (StatusCode::BAD_REQUEST, "Invalid table name"),
            AppError::NoData(_) => (StatusCode::NOT_FOUND, "No data"),
            AppError::Db(e) if is_connectivity_error(e) => {
                tracing::error!(error = %e, "database unavailable");
                (StatusCode::SERVICE_UNAVAILABLE, "Database unavailable")
            }
            AppError::Db(e) => {
                tracing::error!(error = %e, "database error");
                (StatusCode::INTERNAL_SERVER_ERROR, "Database error")
            }
            AppError::Config(e) => {
                tracing::error!(error = %e, "config error");
                (StatusCode::INTERNAL_SERVER_ERROR, "Configuration error")
            }
            AppError::Export(e) => {
                tracing::error!(error = %e, "export failed");
                (StatusCode::INTERNAL_SERVER_ERROR, "Export failed")
            }
        };
        (status, Json(ErrorBody::new(detail))).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::to_bytes;

    async fn body_json(resp: Response) -> serde_json::Value {
        let bytes = to_bytes(resp.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn invalid_table_is_400_with_detail() {
        let resp = AppError::InvalidTable("nope; DROP TABLE x".into()).into_response();
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        assert_eq!(body_json(resp).await, serde_json::json!({ "detail": "Invalid table name" }));
    }

    #[tokio::test]
    async fn no_data_is_404() {
        let resp = AppError::NoData("widgets".into()).into_response();
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
        assert_eq!(body_json(resp).await["detail"], "No data");
    }

    #[tokio::test]
    async fn database_errors_do_not_leak_sql() {
        let resp = AppError::Db(sqlx::Error::Protocol("near \"FROM\": syntax error".into())).into_response();
        assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let body = body_json(resp).await;
        assert_eq!(body["detail"], "Database error");
        assert!(!body.to_string().contains("syntax"));
    }

    #[test]
    fn pool_closed_counts_as_connectivity() {
        assert!(AppError::Db(sqlx::Error::PoolClosed).is_connectivity());
        assert!(!AppError::Db(sqlx::Error::RowNotFound).is_connectivity());
        assert!(!AppError::InvalidTable("x".into()).is_connectivity());
    }
}
