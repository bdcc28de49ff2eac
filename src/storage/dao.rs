//! Entry and word-frequency writers
//!
//! Each operation runs in its own transaction on a borrowed [`Database`]. The
//! DAO never opens or closes the connection itself.

use rusqlite::types::Value;

use super::database::Database;
use super::schema;
use crate::entry::Entry;
use crate::text::WordFrequencies;
use crate::{Error, Result};

/// Persists entries and their word counts
pub trait EntryStore {
    /// Insert the entry, fully replacing any row with the same id
    fn save_entry(&self, entry: &Entry) -> Result<()>;

    /// Append one `(id, word, count)` row per word, all or nothing
    fn save_words_frequency(&self, entry_id: &str, word_freq: &WordFrequencies) -> Result<()>;
}

/// [`EntryStore`] over any [`Database`]
pub struct EntryDao<'a, D: Database + ?Sized> {
    db: &'a D,
}

impl<'a, D: Database + ?Sized> EntryDao<'a, D> {
    pub fn new(db: &'a D) -> Self {
        Self { db }
    }

    /// Run `work` between BEGIN and COMMIT, rolling back if either fails
    fn in_transaction<F>(&self, work: F) -> Result<()>
    where
        F: FnOnce(&D) -> Result<()>,
    {
        self.db.begin()?;
        let outcome = work(self.db).and_then(|()| self.db.commit());
        if let Err(err) = outcome {
            if let Err(rollback_err) = self.db.rollback() {
                tracing::warn!("Rollback failed after {}: {}", err, rollback_err);
            }
            return Err(err);
        }
        Ok(())
    }
}

impl<D: Database + ?Sized> EntryStore for EntryDao<'_, D> {
    fn save_entry(&self, entry: &Entry) -> Result<()> {
        self.in_transaction(|db| {
            db.execute(
                schema::UPSERT_ENTRY,
                &[
                    Value::Text(entry.id.clone()),
                    Value::Text(entry.source.clone()),
                    Value::Text(entry.text.clone()),
                ],
            )?;
            Ok(())
        })
        .map_err(|source| Error::SaveEntry {
            id: entry.id.clone(),
            source: Box::new(source),
        })
    }

    fn save_words_frequency(&self, entry_id: &str, word_freq: &WordFrequencies) -> Result<()> {
        self.in_transaction(|db| {
            for (word, count) in word_freq {
                db.execute(
                    schema::INSERT_WORD_FREQUENCY,
                    &[
                        Value::Text(entry_id.to_string()),
                        Value::Text(word.clone()),
                        Value::Integer(i64::from(*count)),
                    ],
                )?;
            }
            Ok(())
        })
        .map_err(|source| Error::SaveWordFrequencies {
            id: entry_id.to_string(),
            source: Box::new(source),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::{SqliteStore, TableDump};
    use std::cell::{Cell, RefCell};

    /// Records every call and can be told to fail the n-th `execute`
    #[derive(Default)]
    struct RecordingDb {
        calls: RefCell<Vec<String>>,
        fail_on_execute: Option<usize>,
        executed: Cell<usize>,
    }

    impl RecordingDb {
        fn failing_on(n: usize) -> Self {
            Self {
                fail_on_execute: Some(n),
                ..Self::default()
            }
        }

        fn calls(&self) -> Vec<String> {
            self.calls.borrow().clone()
        }

        fn record(&self, call: impl Into<String>) {
            self.calls.borrow_mut().push(call.into());
        }
    }

    impl Database for RecordingDb {
        fn begin(&self) -> Result<()> {
            self.record("begin");
            Ok(())
        }

        fn execute(&self, sql: &str, params: &[Value]) -> Result<usize> {
            let n = self.executed.get() + 1;
            self.executed.set(n);
            self.record(format!("execute {} {:?}", sql, params));
            if self.fail_on_execute == Some(n) {
                return Err(Error::Storage(rusqlite::Error::InvalidQuery));
            }
            Ok(1)
        }

        fn commit(&self) -> Result<()> {
            self.record("commit");
            Ok(())
        }

        fn rollback(&self) -> Result<()> {
            self.record("rollback");
            Ok(())
        }

        fn table_names(&self) -> Result<Vec<String>> {
            Ok(Vec::new())
        }

        fn fetch_all(&self, table: &str) -> Result<TableDump> {
            Ok(TableDump {
                name: table.to_string(),
                columns: Vec::new(),
                rows: Vec::new(),
            })
        }
    }

    fn freq(pairs: &[(&str, u32)]) -> WordFrequencies {
        pairs.iter().map(|(w, c)| (w.to_string(), *c)).collect()
    }

    #[test]
    fn test_save_entry_success() {
        let db = RecordingDb::default();
        let dao = EntryDao::new(&db);

        dao.save_entry(&Entry::new("test_id", "test_source", "test text")).unwrap();

        let calls = db.calls();
        assert_eq!(calls.len(), 3);
        assert_eq!(calls[0], "begin");
        assert!(calls[1].starts_with("execute INSERT OR REPLACE INTO entries"));
        assert!(calls[1].contains("test text"));
        assert_eq!(calls[2], "commit");
    }

    #[test]
    fn test_save_entry_error_rolls_back() {
        let db = RecordingDb::failing_on(1);
        let dao = EntryDao::new(&db);

        let err = dao
            .save_entry(&Entry::new("test_id", "test_source", "test text"))
            .unwrap_err();

        let message = err.to_string();
        assert!(message.contains("Error saving entry"));
        assert!(message.contains(&rusqlite::Error::InvalidQuery.to_string()));
        assert!(matches!(err, Error::SaveEntry { ref id, .. } if id == "test_id"));
        assert_eq!(db.calls().last().map(String::as_str), Some("rollback"));
        assert!(!db.calls().contains(&"commit".to_string()));
    }

    #[test]
    fn test_save_words_frequency_success() {
        let db = RecordingDb::default();
        let dao = EntryDao::new(&db);

        dao.save_words_frequency("test_id", &freq(&[("word1", 2), ("word2", 1)]))
            .unwrap();

        let calls = db.calls();
        let inserts: Vec<&String> = calls.iter().filter(|c| c.starts_with("execute")).collect();
        assert_eq!(inserts.len(), 2);
        assert!(inserts.iter().any(|c| c.contains("\"word1\"") && c.contains("Integer(2)")));
        assert!(inserts.iter().any(|c| c.contains("\"word2\"") && c.contains("Integer(1)")));
        assert_eq!(calls.first().map(String::as_str), Some("begin"));
        assert_eq!(calls.last().map(String::as_str), Some("commit"));
    }

    #[test]
    fn test_save_words_frequency_error_stops_at_first_failure() {
        let db = RecordingDb::failing_on(1);
        let dao = EntryDao::new(&db);

        let err = dao
            .save_words_frequency("test_id", &freq(&[("a1", 1), ("b2", 1), ("c3", 1)]))
            .unwrap_err();

        assert!(err.to_string().contains("Error saving word frequencies"));
        let calls = db.calls();
        assert_eq!(calls.iter().filter(|c| c.starts_with("execute")).count(), 1);
        assert_eq!(calls.last().map(String::as_str), Some("rollback"));
    }

    #[test]
    fn test_save_entry_upserts() {
        let store = SqliteStore::open_in_memory().unwrap();
        let dao = EntryDao::new(&store);

        dao.save_entry(&Entry::new("1234567", "src", "first")).unwrap();
        dao.save_entry(&Entry::new("1234567", "src", "second")).unwrap();

        let dump = store.fetch_all("entries").unwrap();
        assert_eq!(dump.rows.len(), 1);
        assert_eq!(dump.rows[0][2], Value::Text("second".into()));
    }

    #[test]
    fn test_save_words_frequency_appends_duplicates() {
        // Reprocessing an entry appends a second set of rows; nothing is replaced.
        let store = SqliteStore::open_in_memory().unwrap();
        let dao = EntryDao::new(&store);
        let counts = freq(&[("hello", 2), ("world", 1)]);

        dao.save_words_frequency("1234567", &counts).unwrap();
        dao.save_words_frequency("1234567", &counts).unwrap();

        assert_eq!(store.count_rows("word_frequencies").unwrap(), 4);
    }

    #[test]
    fn test_failed_batch_leaves_no_rows() {
        let store = SqliteStore::open_in_memory().unwrap();
        store.execute("DROP TABLE word_frequencies", &[]).unwrap();
        store
            .execute(
                "CREATE TABLE word_frequencies (id TEXT, word TEXT, frequency INTEGER CHECK (frequency < 2))",
                &[],
            )
            .unwrap();
        let dao = EntryDao::new(&store);

        let result = dao.save_words_frequency("1", &freq(&[("ok", 1), ("too_many", 5)]));

        assert!(matches!(result, Err(Error::SaveWordFrequencies { .. })));
        assert_eq!(store.count_rows("word_frequencies").unwrap(), 0);
    }
}
