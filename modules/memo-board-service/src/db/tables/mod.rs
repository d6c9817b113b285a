pub mod categories;
pub mod memos;
