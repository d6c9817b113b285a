//! Category table operations (categories)

use memo_board_types::{Category, Page, PageRequest};
use rusqlite::OptionalExtension;

use super::super::{page_clause, Database};
use crate::error::ApiError;

const SORT_COLUMNS: &[(&str, &str)] = &[("id", "id"), ("name", "name")];

impl Database {
    pub fn find_category_by_id(&self, id: i64) -> Result<Option<Category>, ApiError> {
        let conn = self.conn()?;
        let category = conn
            .query_row(
                "SELECT id, name FROM categories WHERE id = ?1",
                [id],
                row_to_category,
            )
            .optional()?;
        Ok(category)
    }

    /// Exact, case-sensitive name match.
    pub fn find_category_by_name(&self, name: &str) -> Result<Option<Category>, ApiError> {
        let conn = self.conn()?;
        let category = conn
            .query_row(
                "SELECT id, name FROM categories WHERE name = ?1",
                [name],
                row_to_category,
            )
            .optional()?;
        Ok(category)
    }

    /// Categories whose name contains `keyword`, paginated.
    pub fn find_categories_by_name_contains(
        &self,
        keyword: &str,
        request: &PageRequest,
    ) -> Result<Page<Category>, ApiError> {
        self.query_category_page(Some(keyword), request)
    }

    pub fn find_all_categories(&self, request: &PageRequest) -> Result<Page<Category>, ApiError> {
        self.query_category_page(None, request)
    }

    /// Every category, ordered by id.
    pub fn list_categories(&self) -> Result<Vec<Category>, ApiError> {
        let conn = self.conn()?;
        let mut stmt = conn.prepare("SELECT id, name FROM categories ORDER BY id ASC")?;
        let categories = stmt
            .query_map([], row_to_category)?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(categories)
    }

    pub fn count_categories(&self) -> Result<i64, ApiError> {
        let conn = self.conn()?;
        let count = conn.query_row("SELECT COUNT(*) FROM categories", [], |r| r.get(0))?;
        Ok(count)
    }

    /// Insert when `id` is `None`, otherwise replace every column of that row.
    pub fn save_category(&self, id: Option<i64>, name: &str) -> Result<Category, ApiError> {
        let conn = self.conn()?;
        let id = match id {
            None => {
                conn.execute("INSERT INTO categories (name) VALUES (?1)", [name])?;
                conn.last_insert_rowid()
            }
            Some(id) => {
                conn.execute(
                    "INSERT INTO categories (id, name) VALUES (?1, ?2)
                     ON CONFLICT(id) DO UPDATE SET name = excluded.name",
                    rusqlite::params![id, name],
                )?;
                id
            }
        };

        Ok(Category {
            id,
            name: name.to_string(),
        })
    }

    /// Returns whether a row was removed.
    pub fn delete_category_by_id(&self, id: i64) -> Result<bool, ApiError> {
        let conn = self.conn()?;
        let rows = conn.execute("DELETE FROM categories WHERE id = ?1", [id])?;
        Ok(rows > 0)
    }

    fn query_category_page(
        &self,
        keyword: Option<&str>,
        request: &PageRequest,
    ) -> Result<Page<Category>, ApiError> {
        let tail = page_clause(request, SORT_COLUMNS)?;
        let conn = self.conn()?;

        let (total, content) = match keyword {
            Some(keyword) => {
                let total: i64 = conn.query_row(
                    "SELECT COUNT(*) FROM categories WHERE instr(name, ?1) > 0",
                    [keyword],
                    |r| r.get(0),
                )?;
                let mut stmt = conn.prepare(&format!(
                    "SELECT id, name FROM categories WHERE instr(name, ?1) > 0 {}",
                    tail
                ))?;
                let rows = stmt
                    .query_map([keyword], row_to_category)?
                    .collect::<rusqlite::Result<Vec<_>>>()?;
                (total, rows)
            }
            None => {
                let total: i64 =
                    conn.query_row("SELECT COUNT(*) FROM categories", [], |r| r.get(0))?;
                let mut stmt = conn.prepare(&format!("SELECT id, name FROM categories {}", tail))?;
                let rows = stmt
                    .query_map([], row_to_category)?
                    .collect::<rusqlite::Result<Vec<_>>>()?;
                (total, rows)
            }
        };

        Ok(Page::new(content, request, total))
    }
}

fn row_to_category(row: &rusqlite::Row) -> rusqlite::Result<Category> {
    Ok(Category {
        id: row.get(0)?,
        name: row.get(1)?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use memo_board_types::Direction;

    fn seeded() -> Database {
        let db = Database::open(":memory:", 1).unwrap();
        for name in ["newCategory1", "newCategory2", "work", "newCategory3", "travel"] {
            db.save_category(None, name).unwrap();
        }
        db
    }

    #[test]
    fn test_save_assigns_fresh_ids() {
        let db = Database::open(":memory:", 1).unwrap();
        let a = db.save_category(None, "a").unwrap();
        let b = db.save_category(None, "b").unwrap();
        assert_ne!(a.id, b.id);
        assert_eq!(db.find_category_by_id(b.id).unwrap(), Some(b));
    }

    #[test]
    fn test_save_with_id_replaces_row() {
        let db = seeded();
        let saved = db.save_category(Some(1), "renamed").unwrap();
        assert_eq!(saved.id, 1);
        assert_eq!(db.find_category_by_id(1).unwrap().unwrap().name, "renamed");
        assert_eq!(db.count_categories().unwrap(), 5);
    }

    #[test]
    fn test_unique_name_enforced_by_storage() {
        let db = seeded();
        let err = db.save_category(None, "work").unwrap_err();
        assert!(err.is_unique_violation());
    }

    #[test]
    fn test_find_by_name_is_exact() {
        let db = seeded();
        assert!(db.find_category_by_name("work").unwrap().is_some());
        assert!(db.find_category_by_name("wor").unwrap().is_none());
        assert!(db.find_category_by_name("Work").unwrap().is_none());
    }

    #[test]
    fn test_name_contains_pages_in_id_order() {
        let db = seeded();
        let page = db
            .find_categories_by_name_contains("Cate", &PageRequest::new(0, 2))
            .unwrap();
        assert_eq!(page.total_elements, 3);
        assert_eq!(page.total_pages, 2);
        let names: Vec<_> = page.content.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, vec!["newCategory1", "newCategory2"]);

        let page = db
            .find_categories_by_name_contains("Cate", &PageRequest::new(1, 2))
            .unwrap();
        assert_eq!(page.content.len(), 1);
        assert_eq!(page.content[0].name, "newCategory3");
        assert!(page.last);
    }

    #[test]
    fn test_name_contains_treats_wildcards_literally() {
        let db = seeded();
        db.save_category(None, "100%").unwrap();
        let page = db
            .find_categories_by_name_contains("%", &PageRequest::default())
            .unwrap();
        assert_eq!(page.total_elements, 1);
    }

    #[test]
    fn test_find_all_sorted_by_name_desc() {
        let db = seeded();
        let req = PageRequest::new(0, 10).sorted_by("name", Direction::Desc);
        let page = db.find_all_categories(&req).unwrap();
        assert_eq!(page.total_elements, 5);
        assert_eq!(page.content[0].name, "work");
        assert!(page.sort.sorted);
    }

    #[test]
    fn test_delete_reports_whether_row_existed() {
        let db = seeded();
        assert!(db.delete_category_by_id(2).unwrap());
        assert!(!db.delete_category_by_id(2).unwrap());
        assert_eq!(db.list_categories().unwrap().len(), 4);
    }
}
