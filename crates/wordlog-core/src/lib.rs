//! # wordlog-core
//!
//! Types and the dated-row upsert behind the `wordlog` ledger.
//!
//! The ledger is a small CSV file with one row per day, holding word
//! counts for chapters, journals and scenes:
//! - [`LedgerRecord`] / [`WordCounts`] — one day's row
//! - [`upsert`] — insert or replace today's row, atomically
//! - [`read_ledger`] / [`write_ledger`] — the file format
//! - Error type ([`LedgerError`])

pub mod error;
pub mod ledger;
pub mod record;

pub use error::{LedgerError, Result};
pub use ledger::{read_ledger, upsert, write_ledger, UpsertOutcome, UpsertReport};
pub use record::{LedgerRecord, WordCounts, FIELDS};
