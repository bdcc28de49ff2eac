//! # wordfreq - CSV entry ingestion with word frequencies
//!
//! Scans a directory for CSV files, splits them into `(id, source, text)`
//! entries, counts the words of every entry and persists both into SQLite:
//! - entries(id, source, original_text)
//! - word_frequencies(id, word, frequency)
//!
//! Processed files are moved to an output directory.

pub mod config;
pub mod entry;
pub mod fs;
pub mod pipeline;
pub mod stopwords;
pub mod storage;
pub mod text;
pub mod ui;

use std::path::PathBuf;

// Re-exports for convenient access
pub use entry::{Entry, parse_entries};
pub use pipeline::{FileReport, Pipeline, RunReport};
pub use stopwords::StopwordSet;
pub use storage::{EntryDao, EntryStore, SqliteStore};
pub use text::{RegexWordCounter, WordCounter, WordFrequencies};

/// Result type alias for wordfreq operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error types for wordfreq operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Storage error: {0}")]
    Storage(#[from] rusqlite::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid entry format: {0}")]
    InvalidEntry(String),

    #[error("Error saving entry {id}: {source}")]
    SaveEntry {
        id: String,
        #[source]
        source: Box<Error>,
    },

    #[error("Error saving word frequencies for {id}: {source}")]
    SaveWordFrequencies {
        id: String,
        #[source]
        source: Box<Error>,
    },

    #[error("Error creating output folder {}: {source}", .path.display())]
    OutputDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Error listing input folder {}: {source}", .path.display())]
    ListInput {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Error reading CSV file {}: {source}", .path.display())]
    ReadFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Error moving {} to {}: {source}", .from.display(), .to.display())]
    MoveFile {
        from: PathBuf,
        to: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
