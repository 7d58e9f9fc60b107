//! Daily prompt-card journaling: entry storage, the month calendar grid and
//! ranked search over past entries.

pub mod calendar;
pub mod card;
pub mod config;
pub mod entry_store;
pub mod error;
pub mod inspiration;
pub mod journal_entry;
pub mod search;
pub mod storage;

pub use error::{JournalError, Result};
pub use journal_entry::{EntryId, JournalEntry};
