//! Database admin handlers: list tables, preview one table.

use crate::catalog::CatalogReader;
use crate::error::AppError;
use crate::response::{TablePreviewBody, TablesBody};
use crate::service::TableService;
use crate::state::AppState;
use axum::{
    extract::{Path, State},
    Json,
};

pub async fn list_tables(State(state): State<AppState>) -> Result<Json<TablesBody>, AppError> {
    let tables = CatalogReader::list_tables(&state.pool).await?;
    Ok(Json(TablesBody { tables }))
}

pub async fn preview_table(
    State(state): State<AppState>,
    Path(table_name): Path<String>,
) -> Result<Json<TablePreviewBody>, AppError> {
    let rows = TableService::preview(&state.pool, &table_name).await?;
    Ok(Json(TablePreviewBody {
        table: table_name,
        rows,
    }))
}
