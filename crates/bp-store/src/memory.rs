use std::sync::{Mutex, PoisonError};

use crate::{StoreError, UsageHistory, UsageRecord, UsageStore};

/// In-memory usage store, lost when the process exits.
#[derive(Debug, Default)]
pub struct MemoryStore {
    records: Mutex<UsageHistory>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start from an existing history
    pub fn with_history(history: UsageHistory) -> Self {
        Self {
            records: Mutex::new(history),
        }
    }
}

impl UsageStore for MemoryStore {
    fn load_all(&self) -> Result<UsageHistory, StoreError> {
        let records = self.records.lock().unwrap_or_else(PoisonError::into_inner);
        Ok(records.clone())
    }

    fn get(&self, topic_id: &str) -> Result<Option<UsageRecord>, StoreError> {
        let records = self.records.lock().unwrap_or_else(PoisonError::into_inner);
        Ok(records.get(topic_id).copied())
    }

    fn save_all(&self, history: &UsageHistory) -> Result<(), StoreError> {
        let mut records = self.records.lock().unwrap_or_else(PoisonError::into_inner);
        records.clone_from(history);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    #[test]
    fn test_save_and_get() {
        let store = MemoryStore::with_history(UsageHistory::from([(
            "stale".to_string(),
            UsageRecord::default(),
        )]));
        assert_eq!(store.get("t1").unwrap(), None);

        let record = UsageRecord {
            last_used: Some(Utc::now()),
            use_count: 2,
        };
        store
            .save_all(&UsageHistory::from([("t1".to_string(), record)]))
            .unwrap();

        assert_eq!(store.get("t1").unwrap(), Some(record));
        assert_eq!(store.get("stale").unwrap(), None);
        assert_eq!(store.load_all().unwrap().len(), 1);
    }
}
