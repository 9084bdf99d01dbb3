//! Ledger record types.
//!
//! One row of the ledger holds the word counts for a single day:
//!
//! ```text
//! date,count_chapters,count_journals,count_scenes
//! 2025-11-08,41250,3120,18045
//! ```

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Column names, in file order. Also written as the header row.
pub const FIELDS: [&str; 4] = ["date", "count_chapters", "count_journals", "count_scenes"];

/// The token in the `date` column that marks a header line.
pub const HEADER_TOKEN: &str = FIELDS[0];

/// Word counts for the three categories of writing.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WordCounts {
    pub chapters: u64,
    pub journals: u64,
    pub scenes: u64,
}

impl WordCounts {
    #[must_use]
    pub fn new(chapters: u64, journals: u64, scenes: u64) -> Self {
        Self {
            chapters,
            journals,
            scenes,
        }
    }

    /// Sum across all three categories, saturating at `u64::MAX`.
    #[must_use]
    pub fn total(&self) -> u64 {
        self.chapters
            .saturating_add(self.journals)
            .saturating_add(self.scenes)
    }
}

/// One dated row of the ledger. `date` is the unique key.
///
/// Field names match [`FIELDS`]; rows are (de)serialized positionally.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LedgerRecord {
    pub date: NaiveDate,
    pub count_chapters: u64,
    pub count_journals: u64,
    pub count_scenes: u64,
}

impl LedgerRecord {
    #[must_use]
    pub fn new(date: NaiveDate, counts: WordCounts) -> Self {
        Self {
            date,
            count_chapters: counts.chapters,
            count_journals: counts.journals,
            count_scenes: counts.scenes,
        }
    }

    #[must_use]
    pub fn counts(&self) -> WordCounts {
        WordCounts::new(self.count_chapters, self.count_journals, self.count_scenes)
    }
}
