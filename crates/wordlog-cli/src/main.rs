//! wordlog CLI — record the day's word counts for a book project.
//!
//! Usage: `wordlog [-l PATH] [-v] WC_CHAPTERS WC_JOURNALS WC_SCENES`

mod config;

use std::io::IsTerminal;
use std::path::PathBuf;

use anyhow::{Context, Result};
use chrono::NaiveDate;
use clap::Parser;
use tracing::{debug, Level};

use wordlog_core::{upsert, UpsertReport, WordCounts};

use crate::config::RunConfig;

#[derive(Parser, Debug)]
#[command(name = "wordlog")]
#[command(version)]
#[command(about = "Update the word count log for the book")]
#[command(after_help = concat!("wordlog v", env!("CARGO_PKG_VERSION"), " / daily word count ledger"))]
struct Cli {
    /// Number of words in chapter files
    #[arg(value_name = "WC_CHAPTERS")]
    chapters: u64,

    /// Number of words in journal files
    #[arg(value_name = "WC_JOURNALS")]
    journals: u64,

    /// Number of words in scene files
    #[arg(value_name = "WC_SCENES")]
    scenes: u64,

    /// Log file to use to record the word counts
    #[arg(short = 'l', long = "log-file", value_name = "PATH")]
    log_file: Option<PathBuf>,

    /// Enable more verbose output
    #[arg(short, long)]
    verbose: bool,

    /// Record the counts under this date instead of today
    #[arg(long, value_name = "YYYY-MM-DD")]
    date: Option<NaiveDate>,

    /// Print the result as JSON
    #[arg(long)]
    json: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let cfg = RunConfig::resolve(cli.log_file, cli.date, cli.verbose, cli.json)?;
    init_tracing(cfg.verbose);

    let counts = WordCounts::new(cli.chapters, cli.journals, cli.scenes);
    debug!(log_file = %cfg.log_file.display(), "argument parsing: log file");
    debug!(
        chapters = counts.chapters,
        journals = counts.journals,
        scenes = counts.scenes,
        "argument parsing: counts"
    );

    let report = upsert(&cfg.log_file, cfg.date, counts)
        .with_context(|| format!("updating word count log {}", cfg.log_file.display()))?;

    if cfg.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        println!("{}", summary(&report));
    }
    Ok(())
}

fn init_tracing(verbose: bool) {
    let level = if verbose { Level::DEBUG } else { Level::INFO };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_target(false)
        .with_ansi(std::io::stderr().is_terminal())
        .with_writer(std::io::stderr)
        .init();
}

fn summary(report: &UpsertReport) -> String {
    let verb = if report.created() { "Created" } else { "Updated" };
    format!(
        "{verb} {}: {} chapters={} journals={} scenes={} (total {}, {} rows)",
        report.path.display(),
        report.date,
        report.counts.chapters,
        report.counts.journals,
        report.counts.scenes,
        report.counts.total(),
        report.rows_written,
    )
}
