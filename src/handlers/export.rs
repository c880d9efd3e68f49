//! CSV export handler.

use crate::error::AppError;
use crate::service::TableService;
use crate::state::AppState;
use axum::{
    extract::{Path, State},
    http::{header, HeaderValue},
    response::{IntoResponse, Response},
};

pub async fn export_csv(
    State(state): State<AppState>,
    Path(table_name): Path<String>,
) -> Result<Response, AppError> {
    let export = TableService::export_csv(&state.pool, &table_name).await?;
    let disposition = content_disposition(&export.file_name);
    let mut resp = export.bytes.into_response();
    let headers = resp.headers_mut();
    headers.insert(header::CONTENT_TYPE, HeaderValue::from_static("text/csv; charset=utf-8"));
    // catalog names may hold bytes a header cannot carry
    if let Ok(v) = HeaderValue::from_str(&disposition) {
        headers.insert(header::CONTENT_DISPOSITION, v);
    } else {
        headers.insert(header::CONTENT_DISPOSITION, HeaderValue::from_static("attachment; filename=\"export.csv\""));
    }
    Ok(resp)
}

/// Quoted-string filename; catalog names may hold spaces, `;` or quotes.
fn content_disposition(file_name: &str) -> String {
    let escaped = file_name.replace('\\', "\\\\").replace('"', "\\\"");
    format!("attachment; filename=\"{}\"", escaped)
}
