use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Directory scanned for `*.csv` files
pub const DEFAULT_INPUT_DIR: &str = "app/inputs/entries";
/// Where processed files are moved
pub const DEFAULT_OUTPUT_DIR: &str = "app/inputs/processed";
pub const DEFAULT_DATABASE: &str = "app/storage/database/word_frequency.db";
pub const CSV_EXTENSION: &str = ".csv";

/// Optional overrides read from `wordfreq.toml`
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct WordfreqConfig {
    pub input_dir: Option<String>,
    pub output_dir: Option<String>,
    pub database: Option<String>,
    #[serde(default)]
    pub extra_stopwords: Vec<String>,
    pub show_tables: Option<bool>,
}

/// Fully resolved settings for one run
#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    pub input_dir: PathBuf,
    pub output_dir: PathBuf,
    pub database: PathBuf,
    pub extra_stopwords: Vec<String>,
    pub show_tables: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            input_dir: PathBuf::from(DEFAULT_INPUT_DIR),
            output_dir: PathBuf::from(DEFAULT_OUTPUT_DIR),
            database: PathBuf::from(DEFAULT_DATABASE),
            extra_stopwords: Vec::new(),
            show_tables: true,
        }
    }
}

impl Settings {
    /// Apply file overrides on top of the defaults
    pub fn from_config(config: Option<WordfreqConfig>) -> Self {
        let defaults = Self::default();
        let Some(config) = config else {
            return defaults;
        };

        Self {
            input_dir: config.input_dir.map(PathBuf::from).unwrap_or(defaults.input_dir),
            output_dir: config.output_dir.map(PathBuf::from).unwrap_or(defaults.output_dir),
            database: config.database.map(PathBuf::from).unwrap_or(defaults.database),
            extra_stopwords: config.extra_stopwords,
            show_tables: config.show_tables.unwrap_or(defaults.show_tables),
        }
    }
}

pub fn default_config_path() -> PathBuf {
    PathBuf::from("wordfreq.toml")
}

pub fn load_config(path: Option<&Path>) -> anyhow::Result<Option<WordfreqConfig>> {
    let path = path.map(Path::to_path_buf).unwrap_or_else(default_config_path);
    if !path.exists() {
        return Ok(None);
    }

    let contents = std::fs::read_to_string(&path)?;
    let config: WordfreqConfig = toml::from_str(&contents)?;
    Ok(Some(config))
}

/// Load settings, falling back to the built-in paths when no config file exists
pub fn load_settings(path: Option<&Path>) -> anyhow::Result<Settings> {
    Ok(Settings::from_config(load_config(path)?))
}
