use chrono::NaiveDate;
use thiserror::Error;

use crate::journal_entry::EntryId;

/// Failures of journal operations. None of these are fatal: the UI reports
/// them as a notice and keeps running with the previous state.
#[derive(Debug, Error)]
pub enum JournalError {
    #[error("storage error: {0}")]
    Storage(#[from] std::io::Error),

    #[error("stored entries are unreadable: {0}")]
    Corrupt(#[from] serde_json::Error),

    #[error("you have already submitted an entry for {day}, come back tomorrow!")]
    DailyLimit { day: NaiveDate },

    #[error("please write a response before submitting")]
    EmptyResponse,

    #[error("entry {0} not found")]
    EntryNotFound(EntryId),

    #[error("no entry selected")]
    NoSelection,
}

impl JournalError {
    /// The message as shown to the user.
    pub fn notice(&self) -> String {
        let message = self.to_string();
        let mut chars = message.chars();
        match chars.next() {
            Some(first) => first.to_uppercase().chain(chars).collect(),
            None => message,
        }
    }
}

pub type Result<T> = std::result::Result<T, JournalError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_notice_is_capitalized() {
        assert_eq!(JournalError::NoSelection.notice(), "No entry selected");
        assert_eq!(
            JournalError::EmptyResponse.notice(),
            "Please write a response before submitting"
        );
    }
}
