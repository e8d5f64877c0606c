//! Time-bounded cache of job source pages

use crate::error::Result;
use crate::jobs::models::JobPosting;
use crate::jobs::source::JobSource;
use chrono::{DateTime, Duration, Utc};
use log::{debug, info, warn};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard};

#[derive(Debug, Clone, Serialize, Deserialize)]
struct CacheEntry {
    fetched_at: DateTime<Utc>,
    jobs: Vec<JobPosting>,
}

/// Wraps a [`JobSource`] and serves repeated `(query, page, location)`
/// lookups from memory until the entry is older than the TTL.
///
/// Failed fetches are never cached. With a store path the cache survives
/// between runs as a JSON file.
pub struct CachedJobSource<S> {
    inner: S,
    ttl: Duration,
    entries: Mutex<HashMap<String, CacheEntry>>,
    store: Option<PathBuf>,
}

impl<S: JobSource> CachedJobSource<S> {
    pub fn new(inner: S, ttl: Duration) -> Self {
        Self {
            inner,
            ttl,
            entries: Mutex::new(HashMap::new()),
            store: None,
        }
    }

    /// Cache backed by a JSON file. A missing or unreadable file starts empty.
    pub fn with_store(inner: S, ttl: Duration, path: &Path) -> Self {
        let entries = match load_entries(path) {
            Ok(entries) => {
                debug!("Loaded {} cached job pages from {}", entries.len(), path.display());
                entries
            }
            Err(e) => {
                warn!("Ignoring job cache at {}: {}", path.display(), e);
                HashMap::new()
            }
        };

        Self {
            inner,
            ttl,
            entries: Mutex::new(entries),
            store: Some(path.to_path_buf()),
        }
    }

    pub fn cache_key(query: &str, page: u32, location: Option<&str>) -> String {
        format!("jobs_{}_{}_{}", query, page, location.unwrap_or("None"))
    }

    pub fn inner(&self) -> &S {
        &self.inner
    }

    /// Number of live (unexpired) entries
    pub fn len(&self) -> usize {
        let now = Utc::now();
        self.lock()
            .values()
            .filter(|entry| self.is_fresh(entry, now))
            .count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Write unexpired entries to the store, if one is configured
    pub fn persist(&self) -> Result<()> {
        let Some(path) = &self.store else {
            return Ok(());
        };

        let now = Utc::now();
        let live: HashMap<String, CacheEntry> = self
            .lock()
            .iter()
            .filter(|(_, entry)| self.is_fresh(entry, now))
            .map(|(key, entry)| (key.clone(), entry.clone()))
            .collect();

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, serde_json::to_string(&live)?)?;
        info!("Saved {} cached job pages to {}", live.len(), path.display());
        Ok(())
    }

    fn lock(&self) -> MutexGuard<'_, HashMap<String, CacheEntry>> {
        self.entries.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn is_fresh(&self, entry: &CacheEntry, now: DateTime<Utc>) -> bool {
        now.signed_duration_since(entry.fetched_at) < self.ttl
    }

    fn lookup(&self, key: &str) -> Option<Vec<JobPosting>> {
        let now = Utc::now();
        let mut entries = self.lock();
        match entries.get(key) {
            Some(entry) if self.is_fresh(entry, now) => Some(entry.jobs.clone()),
            Some(_) => {
                entries.remove(key);
                None
            }
            None => None,
        }
    }

    fn insert(&self, key: String, jobs: Vec<JobPosting>) {
        self.lock().insert(
            key,
            CacheEntry {
                fetched_at: Utc::now(),
                jobs,
            },
        );
    }
}

fn load_entries(path: &Path) -> Result<HashMap<String, CacheEntry>> {
    if !path.exists() {
        return Ok(HashMap::new());
    }
    let content = std::fs::read_to_string(path)?;
    Ok(serde_json::from_str(&content)?)
}

impl<S: JobSource> JobSource for CachedJobSource<S> {
    async fn fetch_page(&self, query: &str, page: u32, location: Option<&str>) -> Result<Vec<JobPosting>> {
        let key = Self::cache_key(query, page, location);
        if let Some(jobs) = self.lookup(&key) {
            debug!("Job cache hit for {}", key);
            return Ok(jobs);
        }

        let jobs = self.inner.fetch_page(query, page, location).await?;
        self.insert(key, jobs.clone());
        Ok(jobs)
    }
}
