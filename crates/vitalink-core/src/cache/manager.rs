use std::path::PathBuf;

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use tracing::debug;

use crate::models::{Document, EmergencyContact, HealthRecord, Profile, ShareLink};

/// Consider cache stale after 1 hour.
const CACHE_STALE_MINUTES: i64 = 60;

const MINUTES_PER_HOUR: i64 = 60;
const MINUTES_PER_DAY: i64 = 24 * MINUTES_PER_HOUR;

fn rounded_div(value: i64, unit: i64) -> i64 {
    (value + unit / 2) / unit
}

/// A cache of server responses that can be invalidated wholesale.
pub trait ResponseCache: Send + Sync {
    fn clear(&self) -> Result<()>;
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CachedData<T> {
    pub data: T,
    pub cached_at: DateTime<Utc>,
}

impl<T> CachedData<T> {
    pub fn new(data: T) -> Self {
        Self {
            data,
            cached_at: Utc::now(),
        }
    }

    pub fn age_minutes(&self) -> i64 {
        (Utc::now() - self.cached_at).num_minutes()
    }

    /// Age rounded to the nearest unit: "just now", "5m ago", "2h ago", "3d ago".
    pub fn age_display(&self) -> String {
        match self.age_minutes() {
            // Negative ages come from clock skew
            m if m < 1 => "just now".to_string(),
            m if m < MINUTES_PER_HOUR => format!("{}m ago", m),
            m if m < MINUTES_PER_DAY => format!("{}h ago", rounded_div(m, MINUTES_PER_HOUR)),
            m => format!("{}d ago", rounded_div(m, MINUTES_PER_DAY)),
        }
    }

    pub fn is_stale(&self) -> bool {
        self.age_minutes() > CACHE_STALE_MINUTES
    }
}

pub struct CacheManager {
    cache_dir: PathBuf,
}

impl CacheManager {
    pub fn new(cache_dir: PathBuf) -> Result<Self> {
        std::fs::create_dir_all(&cache_dir)?;
        Ok(Self { cache_dir })
    }

    fn cache_path(&self, name: &str) -> PathBuf {
        self.cache_dir.join(format!("{}.json", name))
    }

    fn load<T: DeserializeOwned>(&self, name: &str) -> Result<Option<CachedData<T>>> {
        let path = self.cache_path(name);
        if !path.exists() {
            return Ok(None);
        }

        let contents = std::fs::read_to_string(&path)
            .with_context(|| format!("Failed to read cache file: {}", name))?;

        let cached: CachedData<T> = serde_json::from_str(&contents)
            .with_context(|| format!("Failed to parse cache file: {}", name))?;

        Ok(Some(cached))
    }

    fn save<T: Serialize>(&self, name: &str, data: &T) -> Result<()> {
        let cached = CachedData::new(data);
        let contents = serde_json::to_string_pretty(&cached)?;
        std::fs::write(self.cache_path(name), contents)
            .with_context(|| format!("Failed to write cache file: {}", name))?;
        Ok(())
    }

    // ===== Profile =====

    pub fn load_profile(&self) -> Result<Option<CachedData<Profile>>> {
        self.load("profile")
    }

    pub fn save_profile(&self, profile: &Profile) -> Result<()> {
        self.save("profile", profile)
    }

    // ===== Documents =====

    pub fn load_documents(&self) -> Result<Option<CachedData<Vec<Document>>>> {
        self.load("documents")
    }

    pub fn save_documents(&self, documents: &[Document]) -> Result<()> {
        self.save("documents", &documents)
    }

    // ===== Health Records =====

    pub fn load_health_records(&self) -> Result<Option<CachedData<Vec<HealthRecord>>>> {
        self.load("health_records")
    }

    pub fn save_health_records(&self, records: &[HealthRecord]) -> Result<()> {
        self.save("health_records", &records)
    }

    // ===== Emergency Contacts =====

    pub fn load_emergency_contacts(&self) -> Result<Option<CachedData<Vec<EmergencyContact>>>> {
        self.load("emergency_contacts")
    }

    pub fn save_emergency_contacts(&self, contacts: &[EmergencyContact]) -> Result<()> {
        self.save("emergency_contacts", &contacts)
    }

    // ===== Share Links =====

    pub fn load_share_links(&self) -> Result<Option<CachedData<Vec<ShareLink>>>> {
        self.load("share_links")
    }

    pub fn save_share_links(&self, links: &[ShareLink]) -> Result<()> {
        self.save("share_links", &links)
    }
}

impl ResponseCache for CacheManager {
    /// Remove every cached response file.
    fn clear(&self) -> Result<()> {
        if !self.cache_dir.exists() {
            return Ok(());
        }
        let mut removed = 0;
        for entry in std::fs::read_dir(&self.cache_dir).context("Failed to read cache directory")? {
            let path = entry?.path();
            if path.extension().is_some_and(|ext| ext == "json") {
                std::fs::remove_file(&path)
                    .with_context(|| format!("Failed to remove {}", path.display()))?;
                removed += 1;
            }
        }
        debug!(removed = removed, "Cleared response cache");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    #[test]
    fn test_cached_data_age_display() {
        let mut cached = CachedData::new(vec![1, 2, 3]);
        assert_eq!(cached.age_display(), "just now");

        cached.cached_at = Utc::now() - Duration::minutes(5);
        assert_eq!(cached.age_display(), "5m ago");

        cached.cached_at = Utc::now() - Duration::minutes(95);
        assert_eq!(cached.age_display(), "2h ago");

        cached.cached_at = Utc::now() - Duration::hours(26);
        assert_eq!(cached.age_display(), "1d ago");

        cached.cached_at = Utc::now() - Duration::hours(40);
        assert_eq!(cached.age_display(), "2d ago");

        // Clock skew
        cached.cached_at = Utc::now() + Duration::minutes(10);
        assert_eq!(cached.age_display(), "just now");
    }

    #[test]
    fn test_cached_data_is_stale() {
        let fresh = CachedData::new(vec![1]);
        assert!(!fresh.is_stale());

        let mut old = CachedData::new(vec![1]);
        old.cached_at = Utc::now() - Duration::minutes(61);
        assert!(old.is_stale());
    }

    #[test]
    fn test_save_load_and_clear() {
        let dir = tempfile::tempdir().unwrap();
        let cache = CacheManager::new(dir.path().join("cache")).unwrap();

        assert!(cache.load_profile().unwrap().is_none());

        let profile = Profile {
            name: Some("Jane".to_string()),
            blood_type: Some("A-".to_string()),
            ..Default::default()
        };
        cache.save_profile(&profile).unwrap();
        cache.save_documents(&[]).unwrap();
        cache.save_share_links(&[]).unwrap();
        assert!(cache.load_share_links().unwrap().unwrap().data.is_empty());

        let loaded = cache.load_profile().unwrap().unwrap();
        assert_eq!(loaded.data, profile);

        cache.clear().unwrap();
        assert!(cache.load_profile().unwrap().is_none());
        assert!(cache.load_documents().unwrap().is_none());
        assert!(cache.load_share_links().unwrap().is_none());

        // Clearing an empty cache is a no-op
        cache.clear().unwrap();
    }
}
