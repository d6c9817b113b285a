use std::sync::Arc;

use memo_board_types::{CreateMemoRequest, Memo, Page, PageRequest, UpdateMemoRequest};

use super::{require_id, require_name, unique_as_conflict};
use crate::db::tables::memos::MemoRow;
use crate::db::Database;
use crate::error::ApiError;

const DUPLICATE_MEMO: &str = "중복된 메모입니다.";
const NOT_FOUND: &str = "메모가 존재하지 않습니다.";
const CATEGORY_NOT_FOUND: &str = "카테고리가 존재하지 않습니다.";
const EMPTY_TITLE: &str = "제목이 비었습니다.";

#[derive(Clone)]
pub struct MemoService {
    db: Arc<Database>,
}

impl MemoService {
    pub fn new(db: Arc<Database>) -> Self {
        Self { db }
    }

    /// Create a memo, optionally filed under an existing category.
    pub fn create(&self, request: &CreateMemoRequest) -> Result<Memo, ApiError> {
        let name = require_name(request.name.as_deref(), EMPTY_TITLE)?;

        if self.db.find_memo_by_name(name)?.is_some() {
            log::warn!("Rejected duplicate memo name {:?}", name);
            return Err(ApiError::Conflict(DUPLICATE_MEMO.to_string()));
        }

        let category_id = match request.category_id {
            Some(id) => {
                let category = self
                    .db
                    .find_category_by_id(id)?
                    .ok_or_else(|| ApiError::NotFound(CATEGORY_NOT_FOUND.to_string()))?;
                Some(category.id)
            }
            None => None,
        };

        let memo = self
            .db
            .save_memo(&MemoRow {
                id: None,
                category_id,
                name: name.to_string(),
                content: request.content.clone(),
            })
            .map_err(|e| unique_as_conflict(e, DUPLICATE_MEMO))?;
        log::info!("Created memo #{} {:?}", memo.id, memo.name);
        Ok(memo)
    }

    pub fn get_by_id(&self, id: i64) -> Result<Memo, ApiError> {
        self.db
            .find_memo_by_id(id)?
            .ok_or_else(|| ApiError::NotFound(NOT_FOUND.to_string()))
    }

    pub fn list(&self, request: &PageRequest, keyword: Option<&str>) -> Result<Page<Memo>, ApiError> {
        match keyword {
            None => self.db.find_all_memos(request),
            Some(keyword) => self.db.find_memos_by_name_contains(keyword, request),
        }
    }

    /// Replace name and content. The memo keeps whatever category it had.
    pub fn update(&self, request: &UpdateMemoRequest) -> Result<Memo, ApiError> {
        let name = require_name(request.name.as_deref(), EMPTY_TITLE)?;
        let id = require_id(request.id)?;

        let existing = self
            .db
            .find_memo_by_id(id)?
            .ok_or_else(|| ApiError::NotFound(NOT_FOUND.to_string()))?;

        let memo = self
            .db
            .save_memo(&MemoRow {
                id: Some(id),
                category_id: existing.category.map(|c| c.id),
                name: name.to_string(),
                content: request.content.clone(),
            })
            .map_err(|e| unique_as_conflict(e, DUPLICATE_MEMO))?;
        log::info!("Updated memo #{}", memo.id);
        Ok(memo)
    }

    /// Idempotent: deleting a missing id is not an error.
    pub fn delete_by_id(&self, id: i64) -> Result<(), ApiError> {
        if self.db.delete_memo_by_id(id)? {
            log::info!("Deleted memo #{}", id);
        } else {
            log::debug!("Delete of missing memo #{} ignored", id);
        }
        Ok(())
    }

    pub fn count(&self) -> Result<i64, ApiError> {
        self.db.count_memos()
    }
}
