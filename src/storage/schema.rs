//! Database schema definitions

/// SQL to create the entries table
pub const CREATE_ENTRIES_TABLE: &str =
    "CREATE TABLE IF NOT EXISTS entries (id TEXT PRIMARY KEY, source TEXT, original_text TEXT)";

/// SQL to create the word_frequencies table
/// `id` refers to entries(id) but is not enforced
pub const CREATE_WORD_FREQUENCIES_TABLE: &str =
    "CREATE TABLE IF NOT EXISTS word_frequencies (id TEXT, word TEXT, frequency INTEGER)";

/// Replaces any existing row with the same id
pub const UPSERT_ENTRY: &str = "INSERT OR REPLACE INTO entries VALUES (?1, ?2, ?3)";

/// Plain insert; reprocessing an entry appends another set of rows
pub const INSERT_WORD_FREQUENCY: &str = "INSERT INTO word_frequencies VALUES (?1, ?2, ?3)";

/// All schema creation statements
pub fn all_schema_statements() -> Vec<&'static str> {
    vec![CREATE_ENTRIES_TABLE, CREATE_WORD_FREQUENCIES_TABLE]
}
