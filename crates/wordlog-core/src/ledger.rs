//! Reading, writing and upserting the word count ledger.
//!
//! The ledger is rewritten whole on every update. The new content is staged
//! in a temporary file next to the target and renamed over it, so readers see
//! either the old ledger or the new one, never a partial write.

use std::fs::{self, File};
use std::io::{Read, Write};
use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use serde::Serialize;
use tempfile::NamedTempFile;
use tracing::{debug, info, warn};

use crate::error::{LedgerError, Result};
use crate::record::{LedgerRecord, WordCounts, FIELDS, HEADER_TOKEN};

/// Mode of a newly created ledger on Unix.
#[cfg(unix)]
const NEW_LEDGER_MODE: u32 = 0o644;

/// Whether an upsert created the ledger or rewrote an existing one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum UpsertOutcome {
    Created,
    Updated,
}

/// Summary of a single [`upsert`] call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UpsertReport {
    pub outcome: UpsertOutcome,
    pub path: PathBuf,
    pub date: NaiveDate,
    pub counts: WordCounts,
    /// Data rows in the ledger after the write, header excluded.
    pub rows_written: usize,
    /// Existing rows for `date` that were superseded.
    pub rows_replaced: usize,
    /// Header lines found below the first row and dropped.
    pub stray_headers_skipped: usize,
}

impl UpsertReport {
    #[must_use]
    pub fn created(&self) -> bool {
        self.outcome == UpsertOutcome::Created
    }
}

/// Rows read from an existing ledger.
#[derive(Debug, Default)]
struct ParsedLedger {
    records: Vec<LedgerRecord>,
    stray_headers: usize,
}

/// Record `counts` under `today` in the ledger at `path`.
///
/// Creates the ledger (header plus one row) when `path` does not exist.
/// Otherwise keeps every row for other dates in order, drops any row for
/// `today`, and appends the new row last.
///
/// # Errors
///
/// Returns [`LedgerError::Io`] if the ledger or its directory cannot be
/// read or written, [`LedgerError::Csv`] or [`LedgerError::InvalidRow`] if an
/// existing row is malformed, and [`LedgerError::Persist`] if the staged file
/// cannot be moved into place. The existing ledger is unchanged on error.
pub fn upsert(path: &Path, today: NaiveDate, counts: WordCounts) -> Result<UpsertReport> {
    let fresh = LedgerRecord::new(today, counts);

    if !path.try_exists()? {
        info!(date = %today, path = %path.display(), "recording counts (new file)");
        let staged = stage(path, std::slice::from_ref(&fresh))?;
        set_new_ledger_permissions(staged.as_file())?;
        staged.persist_noclobber(path).map_err(|err| LedgerError::Persist {
            path: path.to_path_buf(),
            source: err.error,
        })?;
        info!(rows = 1, path = %path.display(), "ledger created");

        return Ok(UpsertReport {
            outcome: UpsertOutcome::Created,
            path: path.to_path_buf(),
            date: today,
            counts,
            rows_written: 1,
            rows_replaced: 0,
            stray_headers_skipped: 0,
        });
    }

    info!(date = %today, path = %path.display(), "recording counts (existing file)");
    let parsed = parse_ledger(File::open(path)?)?;

    let mut rows_replaced = 0;
    let mut records = Vec::with_capacity(parsed.records.len() + 1);
    for (index, record) in parsed.records.into_iter().enumerate() {
        if record.date == today {
            debug!(index, date = %record.date, "dropping superseded row");
            rows_replaced += 1;
        } else {
            debug!(index, date = %record.date, "keeping existing row");
            records.push(record);
        }
    }
    debug!(
        chapters = counts.chapters,
        journals = counts.journals,
        scenes = counts.scenes,
        "appending row for today"
    );
    records.push(fresh);

    let staged = stage(path, &records)?;
    staged
        .as_file()
        .set_permissions(fs::metadata(path)?.permissions())?;
    debug!(from = %staged.path().display(), to = %path.display(), "replacing ledger");
    staged.persist(path).map_err(|err| LedgerError::Persist {
        path: path.to_path_buf(),
        source: err.error,
    })?;
    info!(
        rows = records.len(),
        replaced = rows_replaced,
        path = %path.display(),
        "ledger updated"
    );

    Ok(UpsertReport {
        outcome: UpsertOutcome::Updated,
        path: path.to_path_buf(),
        date: today,
        counts,
        rows_written: records.len(),
        rows_replaced,
        stray_headers_skipped: parsed.stray_headers,
    })
}

/// Read every record from the ledger at `path`, in file order.
///
/// Header lines are skipped wherever they appear.
///
/// # Errors
///
/// Returns [`LedgerError::Io`] if the file cannot be opened, and
/// [`LedgerError::Csv`] or [`LedgerError::InvalidRow`] for malformed rows.
pub fn read_ledger(path: &Path) -> Result<Vec<LedgerRecord>> {
    Ok(parse_ledger(File::open(path)?)?.records)
}

/// Write the header row followed by `records`.
///
/// # Errors
///
/// Returns [`LedgerError::Csv`] or [`LedgerError::Io`] if writing fails.
pub fn write_ledger<W: Write>(writer: W, records: &[LedgerRecord]) -> Result<()> {
    let mut wtr = csv::WriterBuilder::new()
        .has_headers(false)
        .terminator(csv::Terminator::Any(b'\n'))
        .from_writer(writer);

    wtr.write_record(FIELDS)?;
    for record in records {
        wtr.serialize(record)?;
    }
    wtr.flush()?;
    Ok(())
}

fn parse_ledger<R: Read>(reader: R) -> Result<ParsedLedger> {
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(false)
        .from_reader(reader);

    let mut parsed = ParsedLedger::default();
    for (index, row) in rdr.records().enumerate() {
        let row = row?;
        let line = row.position().map_or(0, csv::Position::line);

        if row.get(0) == Some(HEADER_TOKEN) {
            if index > 0 {
                warn!(line, "skipping stray header row");
                parsed.stray_headers += 1;
            }
            continue;
        }

        let record: LedgerRecord = row.deserialize(None).map_err(|err| LedgerError::InvalidRow {
            line,
            reason: err.to_string(),
        })?;
        parsed.records.push(record);
    }

    Ok(parsed)
}

/// Write `records` to a temporary file beside `path`, synced to disk.
fn stage(path: &Path, records: &[LedgerRecord]) -> Result<NamedTempFile> {
    let mut staged = tempfile::Builder::new()
        .prefix(".wordlog-")
        .suffix(".tmp")
        .tempfile_in(staging_dir(path))?;
    debug!(path = %staged.path().display(), "staging ledger");

    write_ledger(staged.as_file_mut(), records)?;
    staged.as_file().sync_all()?;
    Ok(staged)
}

/// Staged files start owner-only; a fresh ledger gets the usual
/// world-readable mode instead.
#[cfg(unix)]
fn set_new_ledger_permissions(file: &File) -> Result<()> {
    use std::os::unix::fs::PermissionsExt;

    file.set_permissions(fs::Permissions::from_mode(NEW_LEDGER_MODE))?;
    Ok(())
}

#[cfg(not(unix))]
fn set_new_ledger_permissions(_file: &File) -> Result<()> {
    Ok(())
}

/// Directory the staged file goes in: the target's own, so the final
/// rename never crosses filesystems.
fn staging_dir(path: &Path) -> &Path {
    match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    }
}
