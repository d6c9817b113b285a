//! Business rules for categories and memos, applied before touching storage.

pub mod category_service;
pub mod memo_service;

pub use category_service::CategoryService;
pub use memo_service::MemoService;

use crate::error::ApiError;

/// Column width of `categories.name` and `memos.name`.
pub const MAX_NAME_CHARS: usize = 100;

const MISSING_ID: &str = "아이디가 비었습니다.";
const NAME_TOO_LONG: &str = "이름은 100자를 넘을 수 없습니다.";

/// Reject a missing or blank name, or one wider than the column.
fn require_name<'a>(name: Option<&'a str>, empty_message: &str) -> Result<&'a str, ApiError> {
    let name = match name {
        Some(n) if !n.trim().is_empty() => n,
        _ => return Err(ApiError::Validation(empty_message.to_string())),
    };
    if name.chars().count() > MAX_NAME_CHARS {
        return Err(ApiError::Validation(NAME_TOO_LONG.to_string()));
    }
    Ok(name)
}

fn require_id(id: Option<i64>) -> Result<i64, ApiError> {
    id.ok_or_else(|| ApiError::Validation(MISSING_ID.to_string()))
}

/// Turn a storage-level UNIQUE violation into a conflict with `message`.
fn unique_as_conflict(err: ApiError, message: &str) -> ApiError {
    if err.is_unique_violation() {
        ApiError::Conflict(message.to_string())
    } else {
        err
    }
}
