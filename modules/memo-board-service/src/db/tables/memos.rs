//! Memo table operations (memos), with the category joined in on every read

use memo_board_types::{Category, Memo, Page, PageRequest};
use rusqlite::{Connection, OptionalExtension};

use super::super::{page_clause, Database};
use crate::error::ApiError;

const SORT_COLUMNS: &[(&str, &str)] = &[("id", "m.id"), ("name", "m.name"), ("content", "m.content")];

const SELECT_MEMO: &str = "SELECT m.id, m.name, m.content, c.id, c.name
     FROM memos m
     LEFT JOIN categories c ON c.id = m.category_id";

/// Column values of a memo row as written to storage.
#[derive(Debug, Clone, Default)]
pub struct MemoRow {
    pub id: Option<i64>,
    pub category_id: Option<i64>,
    pub name: String,
    pub content: Option<String>,
}

impl Database {
    pub fn find_memo_by_id(&self, id: i64) -> Result<Option<Memo>, ApiError> {
        let conn = self.conn()?;
        let memo = conn
            .query_row(&format!("{} WHERE m.id = ?1", SELECT_MEMO), [id], row_to_memo)
            .optional()?;
        Ok(memo)
    }

    /// Exact, case-sensitive name match.
    pub fn find_memo_by_name(&self, name: &str) -> Result<Option<Memo>, ApiError> {
        let conn = self.conn()?;
        let memo = conn
            .query_row(&format!("{} WHERE m.name = ?1", SELECT_MEMO), [name], row_to_memo)
            .optional()?;
        Ok(memo)
    }

    /// Memos whose name contains `keyword`, paginated.
    pub fn find_memos_by_name_contains(
        &self,
        keyword: &str,
        request: &PageRequest,
    ) -> Result<Page<Memo>, ApiError> {
        let tail = page_clause(request, SORT_COLUMNS)?;
        let conn = self.conn()?;

        let total: i64 = conn.query_row(
            "SELECT COUNT(*) FROM memos WHERE instr(name, ?1) > 0",
            [keyword],
            |r| r.get(0),
        )?;
        let mut stmt = conn.prepare(&format!(
            "{} WHERE instr(m.name, ?1) > 0 {}",
            SELECT_MEMO, tail
        ))?;
        let content = stmt
            .query_map([keyword], row_to_memo)?
            .collect::<rusqlite::Result<Vec<_>>>()?;

        Ok(Page::new(content, request, total))
    }

    pub fn find_all_memos(&self, request: &PageRequest) -> Result<Page<Memo>, ApiError> {
        let tail = page_clause(request, SORT_COLUMNS)?;
        let conn = self.conn()?;

        let total: i64 = conn.query_row("SELECT COUNT(*) FROM memos", [], |r| r.get(0))?;
        let mut stmt = conn.prepare(&format!("{} {}", SELECT_MEMO, tail))?;
        let content = stmt
            .query_map([], row_to_memo)?
            .collect::<rusqlite::Result<Vec<_>>>()?;

        Ok(Page::new(content, request, total))
    }

    pub fn count_memos(&self) -> Result<i64, ApiError> {
        let conn = self.conn()?;
        let count = conn.query_row("SELECT COUNT(*) FROM memos", [], |r| r.get(0))?;
        Ok(count)
    }

    /// Insert when `row.id` is `None`, otherwise replace every column of that
    /// row. Returns the stored memo with its category resolved.
    pub fn save_memo(&self, row: &MemoRow) -> Result<Memo, ApiError> {
        let conn = self.conn()?;
        let id = match row.id {
            None => {
                conn.execute(
                    "INSERT INTO memos (category_id, name, content) VALUES (?1, ?2, ?3)",
                    rusqlite::params![row.category_id, row.name, row.content],
                )?;
                conn.last_insert_rowid()
            }
            Some(id) => {
                conn.execute(
                    "INSERT INTO memos (id, category_id, name, content) VALUES (?1, ?2, ?3, ?4)
                     ON CONFLICT(id) DO UPDATE SET
                        category_id = excluded.category_id,
                        name = excluded.name,
                        content = excluded.content",
                    rusqlite::params![id, row.category_id, row.name, row.content],
                )?;
                id
            }
        };

        Ok(memo_by_id(&conn, id)?)
    }

    /// Returns whether a row was removed.
    pub fn delete_memo_by_id(&self, id: i64) -> Result<bool, ApiError> {
        let conn = self.conn()?;
        let rows = conn.execute("DELETE FROM memos WHERE id = ?1", [id])?;
        Ok(rows > 0)
    }
}

fn memo_by_id(conn: &Connection, id: i64) -> rusqlite::Result<Memo> {
    conn.query_row(&format!("{} WHERE m.id = ?1", SELECT_MEMO), [id], row_to_memo)
}

fn row_to_memo(row: &rusqlite::Row) -> rusqlite::Result<Memo> {
    let category = match row.get::<_, Option<i64>>(3)? {
        Some(id) => Some(Category {
            id,
            name: row.get(4)?,
        }),
        None => None,
    };

    Ok(Memo {
        id: row.get(0)?,
        category,
        name: row.get(1)?,
        content: row.get(2)?,
    })
}
