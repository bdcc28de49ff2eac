//! wordfreq CLI - ingest CSV entries and their word frequencies into SQLite

use clap::Parser;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};
use wordfreq::config::{self, Settings};
use wordfreq::pipeline::{self, Outcome};
use wordfreq::ui;

#[derive(Parser)]
#[command(name = "wordfreq")]
#[command(version)]
#[command(about = "Ingest CSV text entries and their word frequencies into SQLite")]
#[command(long_about = r#"
Scans the input folder for *.csv files, stores every entry and its word
frequencies in SQLite, moves the processed files to the output folder and
prints the contents of every table.

Without arguments the built-in paths are used:
  input     app/inputs/entries
  output    app/inputs/processed
  database  app/storage/database/word_frequency.db

They can be overridden in wordfreq.toml.
"#)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    /// Path to the config file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Print the run report as JSON instead of tables
    #[arg(long)]
    json: bool,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    // RUST_LOG wins over the verbosity flag
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        if cli.verbose {
            EnvFilter::new("debug")
        } else {
            EnvFilter::new("info")
        }
    });

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();

    let code = match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            ui::error(&format!("An error occurred during processing: {:#}", e));
            ExitCode::FAILURE
        }
    };

    println!("Processing complete.");
    code
}

fn run(cli: &Cli) -> anyhow::Result<()> {
    let settings = config::load_settings(cli.config.as_deref())?;
    tracing::debug!("Settings: {:?}", settings);

    if !cli.json {
        ui::header("Processing CSV entries");
        ui::info("Input", &settings.input_dir.display().to_string());
        ui::info("Output", &settings.output_dir.display().to_string());
        ui::info("Database", &settings.database.display().to_string());
    }

    let outcome = pipeline::execute(&settings)?;

    if cli.json {
        println!("{}", serde_json::to_string_pretty(&outcome.report)?);
    } else {
        print_outcome(&settings, &outcome);
    }
    Ok(())
}

fn print_outcome(settings: &Settings, outcome: &Outcome) {
    let report = &outcome.report;

    ui::phase("Files");
    if report.files.is_empty() && report.failures.is_empty() {
        ui::summary_row("No csv files found in", &settings.input_dir.display().to_string());
    }
    for file in &report.files {
        ui::file_processed(&file.file_name, &file.to_string());
        for skipped in &file.skipped {
            ui::summary_row(&format!("segment {}:", skipped.segment), &skipped.error);
        }
    }
    for failure in &report.failures {
        ui::file_failed(&failure.file_name, &failure.error);
    }

    if let Some(tables) = &outcome.tables {
        for dump in tables {
            ui::phase(&format!("Items in table '{}':", dump.name));
            println!("{}", ui::render_dump(dump));
        }
    }

    let mut rows = vec![
        ("Files processed", report.files.len().to_string()),
        ("Files failed", report.failures.len().to_string()),
        ("Entries stored", report.entries_processed().to_string()),
        ("Segments seen", report.segments_seen().to_string()),
    ];
    if let Some(stats) = &outcome.stats {
        rows.push(("Entries in database", stats.entries.to_string()));
        rows.push(("Word frequency rows", stats.word_frequencies.to_string()));
    }

    ui::phase("Summary");
    println!("{}", ui::stats_table(&rows));

    if report.is_clean() {
        ui::success("All entries processed");
    } else {
        ui::warn("Some files or entries were skipped, see above");
    }
}
