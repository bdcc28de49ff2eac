//! Storage Layer - SQLite-backed persistence
//!
//! System of record is SQLite with tables:
//! - entries(id, source, original_text)
//! - word_frequencies(id, word, frequency)

pub mod dao;
pub mod database;
pub mod schema;
pub mod sqlite;

pub use dao::{EntryDao, EntryStore};
pub use database::{Database, TableDump};
pub use sqlite::{DbStats, SqliteStore};
