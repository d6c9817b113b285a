//! Memo board: REST service for categories and memos on SQLite.

pub mod config;
pub mod db;
pub mod error;
pub mod routes;
pub mod service;

pub use routes::{router, AppState};
