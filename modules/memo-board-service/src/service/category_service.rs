use std::sync::Arc;

use memo_board_types::{Category, CreateCategoryRequest, Page, PageRequest, UpdateCategoryRequest};

use super::{require_id, require_name, unique_as_conflict};
use crate::db::Database;
use crate::error::ApiError;

const DUPLICATE_NAME: &str = "중복된 이름입니다.";
const NOT_FOUND: &str = "카테고리가 존재하지 않습니다.";
const EMPTY_NAME: &str = "비어있음";

#[derive(Clone)]
pub struct CategoryService {
    db: Arc<Database>,
}

impl CategoryService {
    pub fn new(db: Arc<Database>) -> Self {
        Self { db }
    }

    pub fn create(&self, request: &CreateCategoryRequest) -> Result<Category, ApiError> {
        let name = require_name(request.name.as_deref(), EMPTY_NAME)?;

        if self.db.find_category_by_name(name)?.is_some() {
            log::warn!("Rejected duplicate category name {:?}", name);
            return Err(ApiError::Conflict(DUPLICATE_NAME.to_string()));
        }

        let category = self
            .db
            .save_category(None, name)
            .map_err(|e| unique_as_conflict(e, DUPLICATE_NAME))?;
        log::info!("Created category #{} {:?}", category.id, category.name);
        Ok(category)
    }

    pub fn get_by_id(&self, id: i64) -> Result<Category, ApiError> {
        self.db
            .find_category_by_id(id)?
            .ok_or_else(|| ApiError::NotFound(NOT_FOUND.to_string()))
    }

    pub fn get_all(&self) -> Result<Vec<Category>, ApiError> {
        self.db.list_categories()
    }

    /// Unfiltered page when `keyword` is `None`, otherwise names containing it.
    pub fn list(
        &self,
        request: &PageRequest,
        keyword: Option<&str>,
    ) -> Result<Page<Category>, ApiError> {
        match keyword {
            None => self.db.find_all_categories(request),
            Some(keyword) => self.db.find_categories_by_name_contains(keyword, request),
        }
    }

    /// Replace the name of an existing category. The name is checked before
    /// the row is looked up.
    pub fn update(&self, request: &UpdateCategoryRequest) -> Result<Category, ApiError> {
        let name = require_name(request.name.as_deref(), EMPTY_NAME)?;
        let id = require_id(request.id)?;

        if self.db.find_category_by_id(id)?.is_none() {
            return Err(ApiError::NotFound(NOT_FOUND.to_string()));
        }

        let category = self
            .db
            .save_category(Some(id), name)
            .map_err(|e| unique_as_conflict(e, DUPLICATE_NAME))?;
        log::info!("Updated category #{} to {:?}", category.id, category.name);
        Ok(category)
    }

    /// Idempotent: deleting a missing id still succeeds and echoes the id.
    pub fn delete_by_id(&self, id: i64) -> Result<i64, ApiError> {
        if self.db.delete_category_by_id(id)? {
            log::info!("Deleted category #{}", id);
        } else {
            log::debug!("Delete of missing category #{} ignored", id);
        }
        Ok(id)
    }

    pub fn count(&self) -> Result<i64, ApiError> {
        self.db.count_categories()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn service() -> CategoryService {
        CategoryService::new(Arc::new(Database::open(":memory:", 1).unwrap()))
    }

    fn create(svc: &CategoryService, name: &str) -> Result<Category, ApiError> {
        svc.create(&CreateCategoryRequest {
            name: Some(name.to_string()),
        })
    }

    #[test]
    fn test_create_then_get_by_id() {
        let svc = service();
        let created = create(&svc, "newCategory1").unwrap();
        let fetched = svc.get_by_id(created.id).unwrap();
        assert_eq!(fetched.name, "newCategory1");
        assert_eq!(fetched.id, created.id);
    }

    #[test]
    fn test_duplicate_create_is_conflict_and_adds_nothing() {
        let svc = service();
        create(&svc, "newCategory1").unwrap();
        let err = create(&svc, "newCategory1").unwrap_err();
        assert!(matches!(err, ApiError::Conflict(ref m) if m == DUPLICATE_NAME));
        assert_eq!(svc.count().unwrap(), 1);
    }

    #[test]
    fn test_blank_create_rejected() {
        let svc = service();
        assert!(matches!(
            svc.create(&CreateCategoryRequest { name: None }),
            Err(ApiError::Validation(_))
        ));
        assert_eq!(svc.count().unwrap(), 0);
    }

    #[test]
    fn test_get_missing_is_not_found() {
        let svc = service();
        assert!(matches!(svc.get_by_id(99), Err(ApiError::NotFound(m)) if m == NOT_FOUND));
    }

    #[test]
    fn test_update_replaces_name_and_keeps_id() {
        let svc = service();
        let created = create(&svc, "newCategory1").unwrap();
        let updated = svc
            .update(&UpdateCategoryRequest {
                id: Some(created.id),
                name: Some("modCategory1".to_string()),
            })
            .unwrap();
        assert_eq!(updated.id, created.id);
        assert_eq!(svc.get_by_id(created.id).unwrap().name, "modCategory1");
    }

    #[test]
    fn test_update_missing_id_leaves_store_unchanged() {
        let svc = service();
        create(&svc, "newCategory1").unwrap();
        let err = svc
            .update(&UpdateCategoryRequest {
                id: Some(404),
                name: Some("ghost".to_string()),
            })
            .unwrap_err();
        assert!(matches!(err, ApiError::NotFound(_)));
        assert_eq!(svc.get_all().unwrap().len(), 1);
        assert!(svc.get_by_id(404).is_err());
    }

    #[test]
    fn test_update_checks_name_before_existence() {
        let svc = service();
        let err = svc
            .update(&UpdateCategoryRequest {
                id: Some(404),
                name: Some(String::new()),
            })
            .unwrap_err();
        assert!(matches!(err, ApiError::Validation(m) if m == EMPTY_NAME));
    }

    #[test]
    fn test_update_onto_existing_name_is_conflict() {
        let svc = service();
        create(&svc, "a").unwrap();
        let b = create(&svc, "b").unwrap();
        let err = svc
            .update(&UpdateCategoryRequest {
                id: Some(b.id),
                name: Some("a".to_string()),
            })
            .unwrap_err();
        assert!(matches!(err, ApiError::Conflict(_)));
    }

    #[test]
    fn test_list_with_and_without_keyword() {
        let svc = service();
        for name in ["newCategory1", "newCategory2", "work"] {
            create(&svc, name).unwrap();
        }
        let req = PageRequest::new(0, 10);
        assert_eq!(svc.list(&req, None).unwrap().total_elements, 3);
        let filtered = svc.list(&req, Some("Cate")).unwrap();
        assert_eq!(filtered.total_elements, 2);
        assert!(filtered.content.iter().all(|c| c.name.contains("Cate")));
    }

    #[test]
    fn test_delete_twice_is_idempotent() {
        let svc = service();
        let created = create(&svc, "newCategory1").unwrap();
        assert_eq!(svc.delete_by_id(created.id).unwrap(), created.id);
        assert_eq!(svc.delete_by_id(created.id).unwrap(), created.id);
        assert_eq!(svc.count().unwrap(), 0);
    }
}
