//! Run configuration resolved from the command line and the environment
//! the binary runs in.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::{Local, NaiveDate};

/// Default ledger file name, placed in the project root.
pub const DEFAULT_LOG_FILE: &str = "wordcount.csv";

/// Everything a single run needs, fixed before the ledger is touched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunConfig {
    pub log_file: PathBuf,
    pub date: NaiveDate,
    pub verbose: bool,
    pub json: bool,
}

impl RunConfig {
    /// Fill in the default ledger path and today's local date where the
    /// caller gave none.
    pub fn resolve(
        log_file: Option<PathBuf>,
        date: Option<NaiveDate>,
        verbose: bool,
        json: bool,
    ) -> Result<Self> {
        let log_file = match log_file {
            Some(path) => path,
            None => default_log_file()?,
        };
        let date = date.unwrap_or_else(|| Local::now().date_naive());

        Ok(Self {
            log_file,
            date,
            verbose,
            json,
        })
    }
}

/// `wordcount.csv` in the project root: one level above the directory
/// holding the executable (`<project>/bin/wordlog`).
pub fn default_log_file() -> Result<PathBuf> {
    let exe = std::env::current_exe().context("locating the wordlog executable")?;
    Ok(project_root(&exe).join(DEFAULT_LOG_FILE))
}

fn project_root(exe: &Path) -> PathBuf {
    let exe_dir = exe.parent().unwrap_or_else(|| Path::new("."));
    exe_dir.parent().unwrap_or(exe_dir).to_path_buf()
}
