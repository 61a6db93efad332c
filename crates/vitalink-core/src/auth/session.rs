use std::path::PathBuf;
use std::sync::RwLock;

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::SessionStore;

/// Session file name in cache directory
const SESSION_FILE: &str = "session.json";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionData {
    pub token: String,
    pub created_at: DateTime<Utc>,
}

impl SessionData {
    pub fn new(token: impl Into<String>) -> Self {
        Self {
            token: token.into(),
            created_at: Utc::now(),
        }
    }
}

/// Session store persisted as JSON in the cache directory.
///
/// Used when no OS keychain is available.
pub struct FileSessionStore {
    cache_dir: PathBuf,
    data: RwLock<Option<SessionData>>,
}

impl FileSessionStore {
    /// Open the store, loading any session already on disk.
    pub fn open(cache_dir: PathBuf) -> Result<Self> {
        let store = Self {
            cache_dir,
            data: RwLock::new(None),
        };
        let loaded = store.load()?;
        *store.write() = loaded;
        Ok(store)
    }

    fn data(&self) -> Option<SessionData> {
        self.data
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }

    fn load(&self) -> Result<Option<SessionData>> {
        let path = self.session_path();
        if !path.exists() {
            return Ok(None);
        }
        let contents = std::fs::read_to_string(&path).context("Failed to read session file")?;
        let data: SessionData =
            serde_json::from_str(&contents).context("Failed to parse session file")?;
        Ok(Some(data))
    }

    fn save(&self, data: &SessionData) -> Result<()> {
        let path = self.session_path();
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let contents = serde_json::to_string_pretty(data)?;
        std::fs::write(path, contents).context("Failed to write session file")?;
        Ok(())
    }

    fn write(&self) -> std::sync::RwLockWriteGuard<'_, Option<SessionData>> {
        self.data
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn session_path(&self) -> PathBuf {
        self.cache_dir.join(SESSION_FILE)
    }
}

impl SessionStore for FileSessionStore {
    fn token(&self) -> Option<String> {
        self.data().map(|d| d.token)
    }

    fn set_token(&self, token: &str) -> Result<()> {
        let data = SessionData::new(token);
        self.save(&data)?;
        *self.write() = Some(data);
        Ok(())
    }

    fn clear(&self) -> Result<()> {
        *self.write() = None;
        let path = self.session_path();
        if path.exists() {
            std::fs::remove_file(path).context("Failed to remove session file")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_file_store_persists_across_open() {
        let dir = tempfile::tempdir().unwrap();

        let store = FileSessionStore::open(dir.path().to_path_buf()).unwrap();
        assert_eq!(store.token(), None);
        store.set_token("abc123").unwrap();

        let reopened = FileSessionStore::open(dir.path().to_path_buf()).unwrap();
        assert_eq!(reopened.token().as_deref(), Some("abc123"));
    }

    #[test]
    fn test_session_file_holds_token_and_timestamp_only() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileSessionStore::open(dir.path().to_path_buf()).unwrap();
        store.set_token("abc123").unwrap();

        let contents = std::fs::read_to_string(dir.path().join(SESSION_FILE)).unwrap();
        let json: serde_json::Value = serde_json::from_str(&contents).unwrap();
        let mut keys: Vec<&str> = json.as_object().unwrap().keys().map(String::as_str).collect();
        keys.sort();
        assert_eq!(keys, vec!["created_at", "token"]);
        assert_eq!(json["token"], "abc123");
    }

    #[test]
    fn test_file_store_clear_removes_file() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileSessionStore::open(dir.path().to_path_buf()).unwrap();
        store.set_token("abc123").unwrap();
        assert!(dir.path().join(SESSION_FILE).exists());

        store.clear().unwrap();
        assert!(!dir.path().join(SESSION_FILE).exists());
        assert_eq!(store.token(), None);

        // Clearing again is a no-op
        store.clear().unwrap();
    }

    #[test]
    fn test_file_store_rejects_corrupt_file() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join(SESSION_FILE), "not json").unwrap();
        assert!(FileSessionStore::open(dir.path().to_path_buf()).is_err());
    }
}
