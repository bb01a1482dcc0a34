//! Usage-history persistence for the topic selector.
//!
//! The selector only needs three operations from its backing store, captured by
//! [`UsageStore`]. Two backends are provided: a human-inspectable JSON file
//! ([`JsonFileStore`]) and an in-memory map ([`MemoryStore`]) for tests and
//! throwaway runs.

pub mod error;
pub mod file;
pub mod memory;
pub mod models;

pub use error::StoreError;
pub use file::JsonFileStore;
pub use memory::MemoryStore;
pub use models::{UsageHistory, UsageRecord};

/// Key-value store of topic usage, keyed by topic id.
///
/// Writes are last-writer-wins. Nothing here protects against two processes
/// updating the same backing file concurrently; one of the updates can be lost.
pub trait UsageStore: Send + Sync {
    /// Load every persisted usage record.
    fn load_all(&self) -> Result<UsageHistory, StoreError>;

    /// Look up the usage record for a single topic.
    fn get(&self, topic_id: &str) -> Result<Option<UsageRecord>, StoreError> {
        Ok(self.load_all()?.remove(topic_id))
    }

    /// Replace the stored history with `history`, one record per topic.
    ///
    /// Once this returns `Ok`, the durable representation holds exactly
    /// `history`.
    fn save_all(&self, history: &UsageHistory) -> Result<(), StoreError>;
}

impl<S: UsageStore + ?Sized> UsageStore for Box<S> {
    fn load_all(&self) -> Result<UsageHistory, StoreError> {
        (**self).load_all()
    }

    fn get(&self, topic_id: &str) -> Result<Option<UsageRecord>, StoreError> {
        (**self).get(topic_id)
    }

    fn save_all(&self, history: &UsageHistory) -> Result<(), StoreError> {
        (**self).save_all(history)
    }
}
