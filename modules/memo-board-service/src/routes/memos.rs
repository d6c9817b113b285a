//! Handlers under /memos.

use axum::extract::rejection::{JsonRejection, PathRejection, QueryRejection};
use axum::extract::{Path, Query, State};
use axum::response::Json;
use memo_board_types::*;
use std::sync::Arc;

use super::{body, list_query, page_request, path_id, AppState};
use crate::error::ApiError;

// GET /memos?keyword=&page=&size=&orderBy=
pub async fn list(
    State(state): State<Arc<AppState>>,
    query: Result<Query<ListQuery>, QueryRejection>,
) -> Result<Json<Page<Memo>>, ApiError> {
    let query = list_query(query)?;
    let request = page_request(&query)?;
    let page = state.memos.list(&request, query.keyword.as_deref())?;
    Ok(Json(page))
}

// GET /memos/:id
pub async fn get_by_id(
    State(state): State<Arc<AppState>>,
    path: Result<Path<i64>, PathRejection>,
) -> Result<Json<Memo>, ApiError> {
    let id = path_id(path)?;
    Ok(Json(state.memos.get_by_id(id)?))
}

// POST /memos
pub async fn create(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<CreateMemoRequest>, JsonRejection>,
) -> Result<Json<Memo>, ApiError> {
    let req = body(payload)?;
    Ok(Json(state.memos.create(&req)?))
}

// PUT /memos
pub async fn update(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<UpdateMemoRequest>, JsonRejection>,
) -> Result<Json<Memo>, ApiError> {
    let req = body(payload)?;
    Ok(Json(state.memos.update(&req)?))
}

// DELETE /memos/:id
pub async fn delete_by_id(
    State(state): State<Arc<AppState>>,
    path: Result<Path<i64>, PathRejection>,
) -> Result<&'static str, ApiError> {
    let id = path_id(path)?;
    state.memos.delete_by_id(id)?;
    Ok("success")
}
