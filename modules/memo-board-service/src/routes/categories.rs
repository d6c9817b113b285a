//! Handlers under /categories.

use axum::extract::rejection::{JsonRejection, PathRejection, QueryRejection};
use axum::extract::{Path, Query, State};
use axum::response::Json;
use memo_board_types::*;
use std::sync::Arc;

use super::{body, list_query, page_request, path_id, AppState};
use crate::error::ApiError;

// GET /categories?keyword=&page=&size=&orderBy=
pub async fn list(
    State(state): State<Arc<AppState>>,
    query: Result<Query<ListQuery>, QueryRejection>,
) -> Result<Json<Page<Category>>, ApiError> {
    let query = list_query(query)?;
    let request = page_request(&query)?;
    let page = state.categories.list(&request, query.keyword.as_deref())?;
    Ok(Json(page))
}

// GET /categories/all
pub async fn list_all(State(state): State<Arc<AppState>>) -> Result<Json<Vec<Category>>, ApiError> {
    Ok(Json(state.categories.get_all()?))
}

// GET /categories/:id
pub async fn get_by_id(
    State(state): State<Arc<AppState>>,
    path: Result<Path<i64>, PathRejection>,
) -> Result<Json<Category>, ApiError> {
    let id = path_id(path)?;
    Ok(Json(state.categories.get_by_id(id)?))
}

// POST /categories
pub async fn create(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<CreateCategoryRequest>, JsonRejection>,
) -> Result<Json<Category>, ApiError> {
    let req = body(payload)?;
    Ok(Json(state.categories.create(&req)?))
}

// PUT /categories
pub async fn update(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<UpdateCategoryRequest>, JsonRejection>,
) -> Result<Json<Category>, ApiError> {
    let req = body(payload)?;
    Ok(Json(state.categories.update(&req)?))
}

// DELETE /categories/:id
pub async fn delete_by_id(
    State(state): State<Arc<AppState>>,
    path: Result<Path<i64>, PathRejection>,
) -> Result<Json<i64>, ApiError> {
    let id = path_id(path)?;
    Ok(Json(state.categories.delete_by_id(id)?))
}
