//! SQLite storage for categories and memos, behind an r2d2 connection pool.

pub mod tables;

use memo_board_types::{Direction, PageRequest};
use r2d2::{Pool, PooledConnection};
use r2d2_sqlite::SqliteConnectionManager;
use rusqlite::Connection;

use crate::error::ApiError;

pub type DbConn = PooledConnection<SqliteConnectionManager>;

pub struct Database {
    pool: Pool<SqliteConnectionManager>,
}

impl Database {
    /// Open (or create) the database at `path`. `:memory:` gives a
    /// single-connection pool so every caller sees the same data.
    pub fn open(path: &str, pool_size: u32) -> Result<Self, ApiError> {
        let in_memory = path == ":memory:";
        let manager = if in_memory {
            SqliteConnectionManager::memory()
        } else {
            SqliteConnectionManager::file(path)
        };
        let manager = manager.with_init(|conn| {
            conn.execute_batch("PRAGMA foreign_keys=ON; PRAGMA busy_timeout=5000;")
        });

        let builder = Pool::builder();
        // An in-memory database lives only as long as its one connection,
        // so that connection must never be reaped.
        let builder = if in_memory {
            builder.max_size(1).max_lifetime(None).idle_timeout(None)
        } else {
            builder.max_size(pool_size.max(1))
        };
        let pool = builder.build(manager)?;
        let db = Self { pool };

        {
            let conn = db.conn()?;
            if !in_memory {
                conn.execute_batch("PRAGMA journal_mode=WAL;")?;
            }
            create_tables(&conn)?;
        }
        Ok(db)
    }

    pub fn conn(&self) -> Result<DbConn, ApiError> {
        Ok(self.pool.get()?)
    }
}

fn create_tables(conn: &Connection) -> rusqlite::Result<()> {
    conn.execute(
        "CREATE TABLE IF NOT EXISTS categories (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            name VARCHAR(100) NOT NULL UNIQUE
        )",
        [],
    )?;

    conn.execute(
        "CREATE TABLE IF NOT EXISTS memos (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            category_id INTEGER,
            name VARCHAR(100) NOT NULL UNIQUE,
            content TEXT,
            FOREIGN KEY (category_id) REFERENCES categories(id) ON DELETE SET NULL
        )",
        [],
    )?;

    conn.execute(
        "CREATE INDEX IF NOT EXISTS idx_memos_category ON memos(category_id)",
        [],
    )?;

    log::debug!("Initialized categories and memos tables");
    Ok(())
}

/// Build the `ORDER BY ... LIMIT ... OFFSET ...` tail for a page request.
///
/// `columns` maps accepted sort properties to qualified column names; the
/// first entry is the id column and is always used as the tie-breaker.
pub(crate) fn page_clause(
    request: &PageRequest,
    columns: &[(&str, &str)],
) -> Result<String, ApiError> {
    let id_column = columns[0].1;
    let order = match &request.sort {
        Some(sort) => {
            let column = columns
                .iter()
                .find(|(prop, _)| *prop == sort.property)
                .map(|(_, col)| *col)
                .ok_or_else(|| {
                    ApiError::Validation(format!("No property '{}' found to sort by", sort.property))
                })?;
            if column == id_column {
                format!("{} {}", id_column, sort.direction.as_sql())
            } else {
                format!(
                    "{} {}, {} {}",
                    column,
                    sort.direction.as_sql(),
                    id_column,
                    Direction::Asc.as_sql()
                )
            }
        }
        None => format!("{} ASC", id_column),
    };

    Ok(format!(
        "ORDER BY {} LIMIT {} OFFSET {}",
        order,
        request.size,
        request.offset()
    ))
}
