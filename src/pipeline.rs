//! Run orchestration
//!
//! One run walks through:
//! `ensure output dir -> for each csv file (parse -> persist -> move) -> report -> close`
//!
//! Only a failure to prepare the store or the output directory aborts a run.
//! Unreadable or unmovable files are recorded in [`RunReport::failures`], and
//! malformed or unstorable entries in [`FileReport::skipped`]; processing always
//! continues with the next file or entry.

use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::config::{CSV_EXTENSION, Settings};
use crate::entry::{Entry, parse_entries};
use crate::fs::{FileSystem, LocalFs};
use crate::stopwords::StopwordSet;
use crate::storage::{Database, DbStats, EntryDao, EntryStore, SqliteStore, TableDump};
use crate::text::{RegexWordCounter, WordCounter};
use crate::ui::progress::file_progress;
use crate::{Error, Result};

/// An entry that could not be parsed or stored
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EntryFailure {
    /// 1-based position of the segment in its file
    pub segment: usize,
    pub entry_id: Option<String>,
    pub error: String,
}

/// Outcome of one fully handled file
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FileReport {
    pub file_name: String,
    pub segments: usize,
    pub processed: usize,
    pub skipped: Vec<EntryFailure>,
}

impl FileReport {
    fn new(file_name: impl Into<String>) -> Self {
        Self {
            file_name: file_name.into(),
            segments: 0,
            processed: 0,
            skipped: Vec::new(),
        }
    }
}

impl std::fmt::Display for FileReport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Successfully processed {} out of {} entries.",
            self.processed, self.segments
        )
    }
}

/// A file that was abandoned (unreadable) or could not be moved
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FileFailure {
    pub file_name: String,
    pub error: String,
}

/// Everything one run did
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RunReport {
    pub files: Vec<FileReport>,
    pub failures: Vec<FileFailure>,
}

impl RunReport {
    pub fn entries_processed(&self) -> usize {
        self.files.iter().map(|f| f.processed).sum()
    }

    pub fn segments_seen(&self) -> usize {
        self.files.iter().map(|f| f.segments).sum()
    }

    /// No file failed and no entry was skipped
    pub fn is_clean(&self) -> bool {
        self.failures.is_empty() && self.files.iter().all(|f| f.skipped.is_empty())
    }
}

/// Processes every csv file of the input directory into an [`EntryStore`]
pub struct Pipeline<'a> {
    input_dir: PathBuf,
    output_dir: PathBuf,
    fs: &'a dyn FileSystem,
    counter: &'a dyn WordCounter,
    store: &'a dyn EntryStore,
}

impl<'a> Pipeline<'a> {
    pub fn new(
        input_dir: impl Into<PathBuf>,
        output_dir: impl Into<PathBuf>,
        fs: &'a dyn FileSystem,
        counter: &'a dyn WordCounter,
        store: &'a dyn EntryStore,
    ) -> Self {
        Self {
            input_dir: input_dir.into(),
            output_dir: output_dir.into(),
            fs,
            counter,
            store,
        }
    }

    /// Process every csv file once. Errors only for fatal setup failures.
    pub fn run(&self) -> Result<RunReport> {
        self.ensure_output_dir()?;

        let files = self.csv_files()?;
        tracing::info!("Found {} csv file(s) in {}", files.len(), self.input_dir.display());

        let progress = file_progress(files.len());
        let mut report = RunReport::default();

        for path in files {
            let file_name = file_name_of(&path);
            progress.set_message(file_name.clone());

            match self.process_file(&path) {
                Ok(file_report) => report.files.push(file_report),
                Err(e) => {
                    tracing::error!("Error processing file {}: {}", file_name, e);
                    report.failures.push(FileFailure {
                        file_name,
                        error: e.to_string(),
                    });
                }
            }
            progress.inc(1);
        }

        progress.finish_and_clear();
        Ok(report)
    }

    fn ensure_output_dir(&self) -> Result<()> {
        self.fs
            .create_dir_all(&self.output_dir)
            .map_err(|source| Error::OutputDir {
                path: self.output_dir.clone(),
                source,
            })
    }

    fn csv_files(&self) -> Result<Vec<PathBuf>> {
        let files = self
            .fs
            .list_files(&self.input_dir)
            .map_err(|source| Error::ListInput {
                path: self.input_dir.clone(),
                source,
            })?;

        Ok(files
            .into_iter()
            .filter(|p| file_name_of(p).ends_with(CSV_EXTENSION))
            .collect())
    }

    /// Read, process and move one file
    pub fn process_file(&self, path: &Path) -> Result<FileReport> {
        let file_name = file_name_of(path);
        let content = self.fs.read_lossy(path).map_err(|source| Error::ReadFile {
            path: path.to_path_buf(),
            source,
        })?;

        let report = self.process_content(&file_name, &content);
        tracing::info!("{}: {}", file_name, report);

        let destination = self.output_dir.join(&file_name);
        self.fs
            .move_file(path, &destination)
            .map_err(|source| Error::MoveFile {
                from: path.to_path_buf(),
                to: destination.clone(),
                source,
            })?;
        tracing::debug!("Moved {} to {}", path.display(), destination.display());

        Ok(report)
    }

    /// Parse and persist the entries of already-read file content
    pub fn process_content(&self, file_name: &str, content: &str) -> FileReport {
        let mut report = FileReport::new(file_name);

        for (index, parsed) in parse_entries(content).enumerate() {
            report.segments += 1;
            let segment = index + 1;

            let outcome = match parsed {
                Ok(entry) => self.persist_entry(&entry).map_err(|e| (Some(entry.id), e)),
                Err(e) => Err((None, e)),
            };

            match outcome {
                Ok(()) => report.processed += 1,
                Err((entry_id, e)) => {
                    if matches!(e, Error::InvalidEntry(_)) {
                        tracing::warn!("Skipping invalid entry in {} (segment {}): {}", file_name, segment, e);
                    } else {
                        tracing::error!("Error processing entry in {} (segment {}): {}", file_name, segment, e);
                    }
                    report.skipped.push(EntryFailure {
                        segment,
                        entry_id,
                        error: e.to_string(),
                    });
                }
            }
        }

        report
    }

    fn persist_entry(&self, entry: &Entry) -> Result<()> {
        let word_freq = self.counter.count_words(&entry.text);
        self.store.save_entry(entry)?;
        self.store.save_words_frequency(&entry.id, &word_freq)?;
        tracing::debug!("Stored entry {} with {} distinct words", entry.id, word_freq.len());
        Ok(())
    }
}

/// Every table of the store with all of its rows
pub fn collect_tables<D: Database + ?Sized>(db: &D) -> Result<Vec<TableDump>> {
    db.table_names()?
        .iter()
        .map(|name| db.fetch_all(name))
        .collect()
}

/// Result of [`execute`]: the run report, row counts and, when enabled, the table dump
#[derive(Debug)]
pub struct Outcome {
    pub report: RunReport,
    pub stats: Option<DbStats>,
    pub tables: Option<Vec<TableDump>>,
}

/// Open the configured store, run the pipeline on the local file system,
/// collect the table dump and close the connection.
///
/// The connection is closed on every path once it has been opened.
pub fn execute(settings: &Settings) -> Result<Outcome> {
    let store = SqliteStore::open(&settings.database)?;
    tracing::info!("Opened database {}", settings.database.display());

    let result = {
        let stopwords = StopwordSet::english().with_extra(&settings.extra_stopwords);
        let counter = RegexWordCounter::new(stopwords);
        let dao = EntryDao::new(&store);
        Pipeline::new(
            &settings.input_dir,
            &settings.output_dir,
            &LocalFs,
            &counter,
            &dao,
        )
        .run()
    };

    let stats = match store.stats() {
        Ok(stats) => Some(stats),
        Err(e) => {
            tracing::error!("Failed to count rows: {}", e);
            None
        }
    };

    let tables = match &result {
        Ok(_) if settings.show_tables => match collect_tables(&store) {
            Ok(tables) => Some(tables),
            Err(e) => {
                tracing::error!("Failed to read tables for display: {}", e);
                None
            }
        },
        _ => None,
    };

    if let Err(e) = store.close() {
        tracing::error!("Failed to close database: {}", e);
    }

    result.map(|report| Outcome {
        report,
        stats,
        tables,
    })
}

fn file_name_of(path: &Path) -> String {
    path.file_name()
        .map(|s| s.to_string_lossy().to_string())
        .unwrap_or_else(|| path.display().to_string())
}
