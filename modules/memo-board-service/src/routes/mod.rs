//! Axum router and shared handler plumbing for the memo board API.

pub mod categories;
pub mod memos;

use axum::extract::rejection::{JsonRejection, PathRejection, QueryRejection};
use axum::extract::{Path, Query, State};
use axum::response::Json;
use axum::routing::get;
use axum::Router;
use memo_board_types::*;
use std::sync::Arc;
use std::time::Instant;

use crate::db::Database;
use crate::error::ApiError;
use crate::service::{CategoryService, MemoService};

pub struct AppState {
    pub categories: CategoryService,
    pub memos: MemoService,
    pub start_time: Instant,
}

impl AppState {
    pub fn new(db: Arc<Database>) -> Self {
        Self {
            categories: CategoryService::new(db.clone()),
            memos: MemoService::new(db),
            start_time: Instant::now(),
        }
    }
}

pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route(
            "/categories",
            get(categories::list)
                .post(categories::create)
                .put(categories::update),
        )
        .route("/categories/all", get(categories::list_all))
        .route(
            "/categories/:id",
            get(categories::get_by_id).delete(categories::delete_by_id),
        )
        .route(
            "/memos",
            get(memos::list).post(memos::create).put(memos::update),
        )
        .route("/memos/:id", get(memos::get_by_id).delete(memos::delete_by_id))
        .route("/rpc/status", get(status))
        .with_state(state)
}

// GET /rpc/status
pub async fn status(State(state): State<Arc<AppState>>) -> Json<ServiceStatus> {
    Json(ServiceStatus {
        running: true,
        uptime_secs: state.start_time.elapsed().as_secs(),
        total_categories: state.categories.count().unwrap_or(0),
        total_memos: state.memos.count().unwrap_or(0),
    })
}

// =====================================================
// Extraction helpers
// =====================================================

pub(crate) fn body<T>(payload: Result<Json<T>, JsonRejection>) -> Result<T, ApiError> {
    payload
        .map(|Json(v)| v)
        .map_err(|e| ApiError::BadRequest(e.body_text()))
}

pub(crate) fn path_id(path: Result<Path<i64>, PathRejection>) -> Result<i64, ApiError> {
    path.map(|Path(id)| id)
        .map_err(|e| ApiError::BadRequest(e.body_text()))
}

pub(crate) fn list_query(query: Result<Query<ListQuery>, QueryRejection>) -> Result<ListQuery, ApiError> {
    query
        .map(|Query(q)| q)
        .map_err(|e| ApiError::BadRequest(e.body_text()))
}

/// Translate `page`/`size`/`sort`/`orderBy` into a page request.
///
/// Negative pages clamp to 0, sizes below 1 fall back to the default, and
/// `sort=prop[,asc|desc]` takes precedence over `orderBy=prop`.
pub(crate) fn page_request(query: &ListQuery) -> Result<PageRequest, ApiError> {
    let page = query.page.unwrap_or(0).clamp(0, u32::MAX as i64) as u32;
    let size = match query.size {
        Some(s) if s >= 1 => s.min(MAX_PAGE_SIZE as i64) as u32,
        _ => DEFAULT_PAGE_SIZE,
    };
    let request = PageRequest::new(page, size);

    let spec = query
        .sort
        .as_deref()
        .or(query.order_by.as_deref())
        .map(str::trim)
        .filter(|s| !s.is_empty());
    let Some(spec) = spec else {
        return Ok(request);
    };

    let (property, direction) = match spec.split_once(',') {
        Some((property, dir)) => {
            let direction: Direction = dir.parse().map_err(ApiError::BadRequest)?;
            (property.trim(), direction)
        }
        None => (spec, Direction::Asc),
    };
    Ok(request.sorted_by(property, direction))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn query(page: Option<i64>, size: Option<i64>, order_by: Option<&str>, sort: Option<&str>) -> ListQuery {
        ListQuery {
            keyword: None,
            page,
            size,
            order_by: order_by.map(String::from),
            sort: sort.map(String::from),
        }
    }

    #[test]
    fn test_page_request_defaults() {
        let req = page_request(&ListQuery::default()).unwrap();
        assert_eq!(req, PageRequest::default());
    }

    #[test]
    fn test_page_request_clamps_bad_values() {
        let req = page_request(&query(Some(-3), Some(0), None, None)).unwrap();
        assert_eq!(req.page, 0);
        assert_eq!(req.size, DEFAULT_PAGE_SIZE);

        let req = page_request(&query(Some(2), Some(1_000_000), None, None)).unwrap();
        assert_eq!(req.page, 2);
        assert_eq!(req.size, MAX_PAGE_SIZE);
    }

    #[test]
    fn test_order_by_and_sort() {
        let req = page_request(&query(None, None, Some("name"), None)).unwrap();
        assert_eq!(req.sort.unwrap().property, "name");

        let req = page_request(&query(None, None, Some("name"), Some("id,desc"))).unwrap();
        let sort = req.sort.unwrap();
        assert_eq!(sort.property, "id");
        assert_eq!(sort.direction, Direction::Desc);

        assert!(page_request(&query(None, None, None, Some(""))).unwrap().sort.is_none());
        assert!(matches!(
            page_request(&query(None, None, None, Some("name,sideways"))),
            Err(ApiError::BadRequest(_))
        ));
    }
}
