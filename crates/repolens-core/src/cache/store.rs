//! Disk-backed repository cache

use super::file_times::{last_access, touch};
use super::types::{CacheConfig, CacheEntry, CacheKey, CacheStats, is_entry_file};
use chrono::{DateTime, Utc};
use std::io;
use std::path::{Path, PathBuf};
use std::time::{Duration, SystemTime};
use tokio::fs;
use tracing::{debug, error, info, warn};

/// Filesystem cache of repository analyses with TTL expiry and LRU eviction.
///
/// Callers only see [`lookup`](Self::lookup) and [`store`](Self::store);
/// eviction runs after every store. Concurrent requests are not serialized:
/// two writers for the same key simply race and the last rename wins.
#[derive(Debug, Clone)]
pub struct RepoCache {
    dir: PathBuf,
    ttl: Duration,
    max_entries: usize,
}

/// One entry file seen by the eviction sweep
#[derive(Debug)]
pub(super) struct SweepCandidate {
    pub(super) path: PathBuf,
    pub(super) name: String,
    pub(super) accessed: SystemTime,
}

impl RepoCache {
    pub fn new(config: &CacheConfig) -> Self {
        Self {
            dir: config.dir.clone(),
            ttl: config.ttl,
            max_entries: config.max_entries,
        }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    pub fn max_entries(&self) -> usize {
        self.max_entries
    }

    fn entry_path(&self, key: &CacheKey) -> PathBuf {
        self.dir.join(key.file_name())
    }

    /// Look up a fresh entry for `(owner, repo)`.
    pub async fn lookup(&self, owner: &str, repo: &str) -> Option<CacheEntry> {
        self.lookup_at(owner, repo, Utc::now()).await
    }

    /// Look up an entry as of `now`.
    ///
    /// Any existing file has its access time refreshed, even when the entry
    /// turns out to be stale or unreadable; stale files stay on disk.
    pub async fn lookup_at(&self, owner: &str, repo: &str, now: DateTime<Utc>) -> Option<CacheEntry> {
        let key = match CacheKey::new(owner, repo) {
            Ok(key) => key,
            Err(e) => {
                warn!("Refusing cache lookup for {}/{}: {}", owner, repo, e);
                return None;
            }
        };
        let path = self.entry_path(&key);

        let bytes = match fs::read(&path).await {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                info!("Cache miss for {}", key);
                return None;
            }
            Err(e) => {
                error!("Error loading cache for {}: {}", key, e);
                return None;
            }
        };

        if let Err(e) = touch(&path, now).await {
            warn!("Failed to refresh access time for {}: {}", key, e);
        }

        let entry: CacheEntry = match serde_json::from_slice(&bytes) {
            Ok(entry) => entry,
            Err(e) => {
                error!("Error decoding cache for {}: {}", key, e);
                return None;
            }
        };

        if !entry.matches(&key) {
            warn!(
                "Cache file for {} holds {}/{}, ignoring",
                key, entry.owner, entry.repo
            );
            return None;
        }
        if entry.is_expired_at(now, self.ttl) {
            info!("Cache entry for {} expired (cached at {})", key, entry.cached_at);
            return None;
        }

        info!("Cache hit for {}", key);
        Some(entry)
    }

    /// Persist an analysis for `(owner, repo)`, replacing any previous entry.
    pub async fn store(
        &self,
        owner: &str,
        repo: &str,
        summary: &str,
        raw_tree: &serde_json::Value,
        content: &serde_json::Value,
    ) {
        self.store_at(owner, repo, summary, raw_tree, content, Utc::now())
            .await
    }

    /// Persist an analysis stamped with `now`. Failures are logged, never returned.
    pub async fn store_at(
        &self,
        owner: &str,
        repo: &str,
        summary: &str,
        raw_tree: &serde_json::Value,
        content: &serde_json::Value,
        now: DateTime<Utc>,
    ) {
        let key = match CacheKey::new(owner, repo) {
            Ok(key) => key,
            Err(e) => {
                warn!("Refusing to cache {}/{}: {}", owner, repo, e);
                return;
            }
        };
        let entry = CacheEntry::new(&key, summary, raw_tree.clone(), content.clone(), now);

        let path = match self.write_entry(&key, &entry).await {
            Ok(path) => path,
            Err(e) => {
                error!("Error saving cache for {}: {}", key, e);
                return;
            }
        };
        info!("Saved cache for {}", key);

        // The entry is on disk now, so the bound applies even without an atime.
        if let Err(e) = touch(&path, entry.cached_at).await {
            warn!("Failed to set access time for {}: {}", key, e);
        }
        self.evict_overflow().await;
    }

    /// Write to a unique temp file in the cache directory, then rename over
    /// the entry so readers never observe a partial file.
    async fn write_entry(&self, key: &CacheKey, entry: &CacheEntry) -> io::Result<PathBuf> {
        fs::create_dir_all(&self.dir).await?;

        let payload = serde_json::to_vec(entry).map_err(io::Error::other)?;
        let final_path = self.entry_path(key);
        let temp_path = self
            .dir
            .join(format!(".{}.{}.tmp", key.file_name(), uuid::Uuid::new_v4()));

        if let Err(e) = fs::write(&temp_path, &payload).await {
            let _ = fs::remove_file(&temp_path).await;
            return Err(e);
        }
        if let Err(e) = fs::rename(&temp_path, &final_path).await {
            let _ = fs::remove_file(&temp_path).await;
            return Err(e);
        }
        Ok(final_path)
    }

    /// Delete the least recently accessed entries beyond `max_entries`.
    async fn evict_overflow(&self) {
        let mut candidates = match self.list_entries().await {
            Ok(candidates) => candidates,
            Err(e) => {
                error!("Error enforcing cache limit: {}", e);
                return;
            }
        };
        if candidates.len() <= self.max_entries {
            return;
        }

        candidates.sort_by(|a, b| a.accessed.cmp(&b.accessed).then_with(|| a.name.cmp(&b.name)));
        let excess = candidates.len() - self.max_entries;
        candidates.truncate(excess);

        let evicted = remove_candidates(candidates).await;
        debug!("Evicted {} of {} overflowing cache files", evicted, excess);
    }

    pub(super) async fn list_entries(&self) -> io::Result<Vec<SweepCandidate>> {
        let mut entries = Vec::new();
        let mut dir = match fs::read_dir(&self.dir).await {
            Ok(dir) => dir,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(entries),
            Err(e) => return Err(e),
        };

        while let Some(dir_entry) = dir.next_entry().await? {
            let name = dir_entry.file_name().to_string_lossy().into_owned();
            if !is_entry_file(&name) {
                continue;
            }
            // Files can vanish between listing and stat under concurrent sweeps.
            let metadata = match dir_entry.metadata().await {
                Ok(metadata) if metadata.is_file() => metadata,
                Ok(_) => continue,
                Err(e) if e.kind() == io::ErrorKind::NotFound => continue,
                Err(e) => return Err(e),
            };
            entries.push(SweepCandidate {
                path: dir_entry.path(),
                accessed: last_access(&metadata),
                name,
            });
        }
        Ok(entries)
    }

    /// Summarize the cache directory without touching access times.
    pub async fn stats(&self) -> io::Result<CacheStats> {
        self.stats_at(Utc::now()).await
    }

    pub async fn stats_at(&self, now: DateTime<Utc>) -> io::Result<CacheStats> {
        let mut stats = CacheStats::default();
        for candidate in self.list_entries().await? {
            let bytes = match fs::read(&candidate.path).await {
                Ok(bytes) => bytes,
                Err(e) if e.kind() == io::ErrorKind::NotFound => continue,
                Err(e) => return Err(e),
            };
            // Reading may bump atime on strictatime mounts; put it back.
            if let Err(e) = touch(&candidate.path, DateTime::<Utc>::from(candidate.accessed)).await {
                debug!("Failed to restore access time for {}: {}", candidate.name, e);
            }

            stats.entries += 1;
            stats.size_bytes += bytes.len() as u64;
            match serde_json::from_slice::<CacheEntry>(&bytes) {
                Ok(entry) if entry.is_expired_at(now, self.ttl) => stats.expired += 1,
                Ok(_) => {}
                Err(_) => stats.corrupt += 1,
            }
        }
        Ok(stats)
    }

    /// Remove every entry; returns how many files were deleted.
    pub async fn clear(&self) -> io::Result<usize> {
        let removed = remove_candidates(self.list_entries().await?).await;
        info!("Cleared {} cache entries from {}", removed, self.dir.display());
        Ok(removed)
    }
}

/// Delete each candidate, returning how many files this call removed.
///
/// A file that is already gone was taken by a concurrent sweep; any other
/// failure is logged and the remaining candidates are still processed.
pub(super) async fn remove_candidates(candidates: Vec<SweepCandidate>) -> usize {
    let mut removed = 0;
    for candidate in candidates {
        match fs::remove_file(&candidate.path).await {
            Ok(()) => {
                debug!("Removed cache file {}", candidate.name);
                removed += 1;
            }
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                debug!("Cache file {} already removed", candidate.name);
            }
            Err(e) => warn!("Failed to remove cache file {}: {}", candidate.name, e),
        }
    }
    removed
}
