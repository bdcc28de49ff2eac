//! The narrow capability set the writers and the report need from a store

use rusqlite::types::Value;

use crate::Result;

/// Every row of one table, as returned by `SELECT *`
#[derive(Debug, Clone, PartialEq)]
pub struct TableDump {
    pub name: String,
    pub columns: Vec<String>,
    pub rows: Vec<Vec<Value>>,
}

/// A relational store with explicit transactions and parameterized statements.
///
/// Implementations are shared for the whole run and accessed serially; callers
/// borrow them and never close them.
pub trait Database {
    fn begin(&self) -> Result<()>;

    /// Run one parameterized statement and return the number of changed rows.
    /// The statement handle must be released before returning, on success or error.
    fn execute(&self, sql: &str, params: &[Value]) -> Result<usize>;

    fn commit(&self) -> Result<()>;

    fn rollback(&self) -> Result<()>;

    fn table_names(&self) -> Result<Vec<String>>;

    fn fetch_all(&self, table: &str) -> Result<TableDump>;
}
