use chrono::{DateTime, Local, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Opaque entry identifier. Older documents carry millisecond timestamps,
/// newer ones UUID strings; both are accepted.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum EntryId {
    Text(String),
    Timestamp(i64),
}

impl EntryId {
    pub fn generate() -> Self {
        EntryId::Text(Uuid::new_v4().to_string())
    }
}

impl fmt::Display for EntryId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EntryId::Text(s) => f.write_str(s),
            EntryId::Timestamp(ms) => write!(f, "{ms}"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JournalEntry {
    pub id: EntryId,
    #[serde(default)]
    pub prompt: String,
    #[serde(default)]
    pub response: String,
    pub date: DateTime<Utc>,
    #[serde(default)]
    pub image: Option<String>,
    #[serde(default)]
    pub alt: Option<String>,
    #[serde(default)]
    pub favorite: bool,
}

impl JournalEntry {
    pub fn new(prompt: String, response: String, date: DateTime<Utc>) -> Self {
        JournalEntry {
            id: EntryId::generate(),
            prompt,
            response,
            date,
            image: None,
            alt: None,
            favorite: false,
        }
    }

    /// The calendar day this entry belongs to, in local time.
    pub fn local_day(&self) -> NaiveDate {
        self.date.with_timezone(&Local).date_naive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_accepts_numeric_and_string_ids() {
        let json = r#"[
            {"id": 1716206400000, "prompt": "p", "response": "r", "date": "2025-05-20T12:00:00.000Z"},
            {"id": "abc", "prompt": "p", "response": "r", "date": "2025-05-21T12:00:00.000Z", "favorite": true}
        ]"#;
        let entries: Vec<JournalEntry> = serde_json::from_str(json).unwrap();

        assert_eq!(entries[0].id, EntryId::Timestamp(1716206400000));
        assert_eq!(entries[1].id, EntryId::Text("abc".to_string()));
        assert!(!entries[0].favorite);
        assert!(entries[1].favorite);
        assert_eq!(entries[0].image, None);
    }

    #[test]
    fn test_missing_text_fields_default_to_empty() {
        let json = r#"{"id": "x", "date": "2025-05-20T12:00:00Z"}"#;
        let entry: JournalEntry = serde_json::from_str(json).unwrap();
        assert_eq!(entry.prompt, "");
        assert_eq!(entry.response, "");
    }

    #[test]
    fn test_serializes_date_as_iso_8601() {
        let date = Utc.with_ymd_and_hms(2025, 5, 20, 12, 0, 0).unwrap();
        let entry = JournalEntry::new("p".into(), "r".into(), date);
        let value = serde_json::to_value(&entry).unwrap();
        assert_eq!(value["date"], "2025-05-20T12:00:00Z");
        assert_eq!(value["favorite"], false);
        assert!(value["image"].is_null());
    }

    #[test]
    fn test_generated_ids_are_unique() {
        assert_ne!(EntryId::generate(), EntryId::generate());
    }
}
