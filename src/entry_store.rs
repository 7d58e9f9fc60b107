use crate::error::{JournalError, Result};
use crate::journal_entry::{EntryId, JournalEntry};
use crate::storage::KeyValueStore;
use chrono::NaiveDate;
use log::{info, warn};

pub const ENTRIES_KEY: &str = "journalEntries";

/// Journal entries persisted as one JSON array under [`ENTRIES_KEY`].
///
/// Nothing is cached: every call reads the whole document, and every
/// mutation writes it back. A failed write leaves the stored document as it
/// was.
pub struct EntryStore<S: KeyValueStore> {
    storage: S,
    one_per_day: bool,
}

impl<S: KeyValueStore> EntryStore<S> {
    pub fn new(storage: S) -> Self {
        EntryStore {
            storage,
            one_per_day: true,
        }
    }

    pub fn with_daily_limit(mut self, enabled: bool) -> Self {
        self.one_per_day = enabled;
        self
    }

    pub fn enforces_daily_limit(&self) -> bool {
        self.one_per_day
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    /// All entries, newest insertion first. An absent document is empty.
    pub fn get_all(&self) -> Result<Vec<JournalEntry>> {
        match self.storage.get_item(ENTRIES_KEY)? {
            Some(serialized) => Ok(serde_json::from_str(&serialized)?),
            None => Ok(Vec::new()),
        }
    }

    pub fn find(&self, id: &EntryId) -> Result<Option<JournalEntry>> {
        Ok(self.get_all()?.into_iter().find(|e| &e.id == id))
    }

    pub fn entry_on(&self, day: NaiveDate) -> Result<Option<JournalEntry>> {
        Ok(self.get_all()?.into_iter().find(|e| e.local_day() == day))
    }

    pub fn daily_limit_met(&self, day: NaiveDate) -> Result<bool> {
        Ok(self.entry_on(day)?.is_some())
    }

    pub fn append(&mut self, entry: JournalEntry) -> Result<()> {
        let mut entries = self.get_all()?;
        let day = entry.local_day();
        if self.one_per_day && entries.iter().any(|e| e.local_day() == day) {
            warn!("rejected second entry for {day}");
            return Err(JournalError::DailyLimit { day });
        }

        info!("saving entry {} for {day}", entry.id);
        entries.insert(0, entry);
        self.save(&entries)
    }

    pub fn delete(&mut self, id: &EntryId) -> Result<JournalEntry> {
        let mut entries = self.get_all()?;
        let index = entries
            .iter()
            .position(|e| &e.id == id)
            .ok_or_else(|| JournalError::EntryNotFound(id.clone()))?;
        let removed = entries.remove(index);
        self.save(&entries)?;
        info!("deleted entry {id}");
        Ok(removed)
    }

    pub fn set_favorite(&mut self, id: &EntryId, favorite: bool) -> Result<()> {
        let mut entries = self.get_all()?;
        let entry = entries
            .iter_mut()
            .find(|e| &e.id == id)
            .ok_or_else(|| JournalError::EntryNotFound(id.clone()))?;
        entry.favorite = favorite;
        self.save(&entries)?;
        info!("entry {id} favorite = {favorite}");
        Ok(())
    }

    /// Flips the favorite flag and returns the new value.
    pub fn toggle_favorite(&mut self, id: &EntryId) -> Result<bool> {
        let current = self
            .find(id)?
            .ok_or_else(|| JournalError::EntryNotFound(id.clone()))?
            .favorite;
        self.set_favorite(id, !current)?;
        Ok(!current)
    }

    fn save(&mut self, entries: &[JournalEntry]) -> Result<()> {
        let serialized = serde_json::to_string(entries)?;
        self.storage.set_item(ENTRIES_KEY, &serialized)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::{FileStorage, MemoryStorage};
    use chrono::{Duration, TimeZone, Utc};

    fn entry_at(prompt: &str, days_ago: i64) -> JournalEntry {
        let date = Utc.with_ymd_and_hms(2025, 5, 20, 12, 0, 0).unwrap() - Duration::days(days_ago);
        JournalEntry::new(prompt.to_string(), format!("response to {prompt}"), date)
    }

    #[test]
    fn test_empty_store_has_no_entries() {
        let store = EntryStore::new(MemoryStorage::new());
        assert!(store.get_all().unwrap().is_empty());
    }

    #[test]
    fn test_append_inserts_newest_first() {
        let mut store = EntryStore::new(MemoryStorage::new());
        store.append(entry_at("older", 3)).unwrap();
        store.append(entry_at("newer", 1)).unwrap();

        let prompts: Vec<_> = store
            .get_all()
            .unwrap()
            .into_iter()
            .map(|e| e.prompt)
            .collect();
        assert_eq!(prompts, vec!["newer", "older"]);
    }

    #[test]
    fn test_second_entry_same_day_is_rejected() {
        let mut store = EntryStore::new(MemoryStorage::new());
        let first = entry_at("first", 0);
        let mut second = entry_at("second", 0);
        second.date = first.date + Duration::seconds(1);

        store.append(first.clone()).unwrap();
        let err = store.append(second).unwrap_err();

        assert!(matches!(err, JournalError::DailyLimit { day } if day == first.local_day()));
        let entries = store.get_all().unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0], first);
    }

    #[test]
    fn test_daily_limit_can_be_disabled() {
        let mut store = EntryStore::new(MemoryStorage::new()).with_daily_limit(false);
        store.append(entry_at("first", 0)).unwrap();
        store.append(entry_at("second", 0)).unwrap();
        assert_eq!(store.get_all().unwrap().len(), 2);
    }

    #[test]
    fn test_daily_limit_met() {
        let mut store = EntryStore::new(MemoryStorage::new());
        let entry = entry_at("today", 0);
        let day = entry.local_day();
        assert!(!store.daily_limit_met(day).unwrap());
        store.append(entry).unwrap();
        assert!(store.daily_limit_met(day).unwrap());
    }

    #[test]
    fn test_round_trip_preserves_every_field() {
        let temp_dir = tempfile::tempdir().unwrap();
        let mut store = EntryStore::new(FileStorage::new(temp_dir.path()));

        let mut entry = entry_at("with image", 2);
        entry.image = Some("https://via.placeholder.com/300x100".to_string());
        entry.alt = Some("Journal card image".to_string());
        entry.favorite = true;
        let plain = entry_at("plain", 5);

        store.append(plain.clone()).unwrap();
        store.append(entry.clone()).unwrap();

        let reopened = EntryStore::new(FileStorage::new(temp_dir.path()));
        assert_eq!(reopened.get_all().unwrap(), vec![entry, plain]);
    }

    #[test]
    fn test_delete_removes_entry() {
        let mut store = EntryStore::new(MemoryStorage::new());
        let keep = entry_at("keep", 2);
        let gone = entry_at("gone", 1);
        store.append(keep.clone()).unwrap();
        store.append(gone.clone()).unwrap();

        let removed = store.delete(&gone.id).unwrap();
        assert_eq!(removed.prompt, "gone");
        assert_eq!(store.get_all().unwrap(), vec![keep]);
    }

    #[test]
    fn test_delete_unknown_id() {
        let mut store = EntryStore::new(MemoryStorage::new());
        let err = store.delete(&EntryId::Timestamp(42)).unwrap_err();
        assert!(matches!(err, JournalError::EntryNotFound(EntryId::Timestamp(42))));
    }

    #[test]
    fn test_favorite_toggle() {
        let mut store = EntryStore::new(MemoryStorage::new());
        let entry = entry_at("fav", 1);
        store.append(entry.clone()).unwrap();

        assert!(store.toggle_favorite(&entry.id).unwrap());
        assert!(store.find(&entry.id).unwrap().unwrap().favorite);

        store.set_favorite(&entry.id, false).unwrap();
        assert!(!store.find(&entry.id).unwrap().unwrap().favorite);
    }

    #[test]
    fn test_corrupt_document_is_reported() {
        let mut storage = MemoryStorage::new();
        storage.set_item(ENTRIES_KEY, "{not json").unwrap();
        let mut store = EntryStore::new(storage);

        assert!(matches!(store.get_all(), Err(JournalError::Corrupt(_))));
        assert!(matches!(
            store.append(entry_at("x", 0)),
            Err(JournalError::Corrupt(_))
        ));
        assert_eq!(
            store.storage().get_item(ENTRIES_KEY).unwrap().as_deref(),
            Some("{not json")
        );
    }

    /// Serves reads from memory and fails every write.
    struct ReadOnlyStorage(MemoryStorage);

    impl KeyValueStore for ReadOnlyStorage {
        fn get_item(&self, key: &str) -> std::io::Result<Option<String>> {
            self.0.get_item(key)
        }

        fn set_item(&mut self, _key: &str, _value: &str) -> std::io::Result<()> {
            Err(std::io::Error::new(
                std::io::ErrorKind::PermissionDenied,
                "read-only",
            ))
        }
    }

    #[test]
    fn test_failed_write_keeps_previous_document() {
        let mut seeded = EntryStore::new(MemoryStorage::new());
        let existing = entry_at("existing", 2);
        seeded.append(existing.clone()).unwrap();

        let mut store = EntryStore::new(ReadOnlyStorage(seeded.storage));

        assert!(matches!(
            store.append(entry_at("new", 0)),
            Err(JournalError::Storage(_))
        ));
        assert!(matches!(
            store.delete(&existing.id),
            Err(JournalError::Storage(_))
        ));
        assert!(matches!(
            store.set_favorite(&existing.id, true),
            Err(JournalError::Storage(_))
        ));
        assert!(matches!(
            store.toggle_favorite(&existing.id),
            Err(JournalError::Storage(_))
        ));

        assert_eq!(store.get_all().unwrap(), vec![existing]);
    }
}
