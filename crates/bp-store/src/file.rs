//! JSON file backend for the usage history.
//!
//! The file is a single JSON object keyed by topic id:
//!
//! ```json
//! { "ai-ethics": { "lastUsed": "2024-05-01T10:00:00Z", "useCount": 3 } }
//! ```

use std::{
    fs, io,
    path::{Path, PathBuf},
    sync::{Mutex, PoisonError},
};

use crate::{StoreError, UsageHistory, UsageStore};

/// Usage store persisted as a pretty-printed JSON file.
///
/// Every save rewrites the whole history through a temporary sibling file
/// followed by a rename, so readers never see a half-written file.
#[derive(Debug)]
pub struct JsonFileStore {
    path: PathBuf,
    // Serializes writers within this process only
    write_lock: Mutex<()>,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            write_lock: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_history(&self) -> Result<UsageHistory, StoreError> {
        let raw = match fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                tracing::debug!(path = %self.path.display(), "No usage history yet");
                return Ok(UsageHistory::new());
            }
            Err(e) => return Err(e.into()),
        };

        if raw.trim().is_empty() {
            return Ok(UsageHistory::new());
        }

        Ok(serde_json::from_str(&raw)?)
    }

    fn write_history(&self, history: &UsageHistory) -> Result<(), StoreError> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }

        let mut json = serde_json::to_string_pretty(history)?;
        json.push('\n');

        let tmp_path = self.tmp_path();
        fs::write(&tmp_path, json)?;
        fs::rename(&tmp_path, &self.path)?;

        Ok(())
    }

    fn tmp_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(|n| n.to_os_string())
            .unwrap_or_default();
        name.push(".tmp");
        self.path.with_file_name(name)
    }
}

impl UsageStore for JsonFileStore {
    fn load_all(&self) -> Result<UsageHistory, StoreError> {
        self.read_history()
    }

    fn save_all(&self, history: &UsageHistory) -> Result<(), StoreError> {
        let _guard = self.write_lock.lock().unwrap_or_else(PoisonError::into_inner);

        self.write_history(history)?;

        tracing::debug!(
            path = %self.path.display(),
            topics = history.len(),
            "Usage history written"
        );
        Ok(())
    }
}
