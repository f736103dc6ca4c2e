//! Cache types and data structures

use crate::error::{RepolensError, RepolensResult};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

/// Default time-to-live for cached analyses (6 hours)
pub const DEFAULT_TTL: Duration = Duration::from_secs(6 * 60 * 60);

/// Default maximum number of cached repositories
pub const DEFAULT_MAX_ENTRIES: usize = 100;

const KEY_SEPARATOR: char = '_';
const ENTRY_EXTENSION: &str = "json";

/// Validated cache key for one repository
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CacheKey {
    owner: String,
    repo: String,
}

impl CacheKey {
    /// Build a key, rejecting parts that could escape the cache directory.
    pub fn new(owner: impl Into<String>, repo: impl Into<String>) -> RepolensResult<Self> {
        let owner = owner.into();
        let repo = repo.into();
        validate_part(&owner, "owner")?;
        validate_part(&repo, "repo")?;
        Ok(Self { owner, repo })
    }

    pub fn owner(&self) -> &str {
        &self.owner
    }

    pub fn repo(&self) -> &str {
        &self.repo
    }

    /// File name of the entry inside the cache directory
    pub fn file_name(&self) -> String {
        format!(
            "{}{}{}.{}",
            self.owner, KEY_SEPARATOR, self.repo, ENTRY_EXTENSION
        )
    }
}

impl std::fmt::Display for CacheKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}/{}", self.owner, self.repo)
    }
}

fn validate_part(part: &str, field: &str) -> RepolensResult<()> {
    if part.is_empty() {
        return Err(RepolensError::invalid_input_field(
            format!("{} must not be empty", field),
            field,
        ));
    }
    if part == "." || part == ".." || part.contains(['/', '\\', '\0']) {
        return Err(RepolensError::invalid_input_field(
            format!("{} contains path characters: {:?}", field, part),
            field,
        ));
    }
    Ok(())
}

pub(crate) fn is_entry_file(name: &str) -> bool {
    !name.starts_with('.') && name.ends_with(&format!(".{}", ENTRY_EXTENSION))
}

/// One cached analysis result
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CacheEntry {
    pub owner: String,
    pub repo: String,
    /// Ingestion summary, kept verbatim
    pub summary: String,
    /// Tree exactly as ingestion returned it, before normalization
    pub raw_tree: serde_json::Value,
    /// Ingested content, passed through untouched
    pub content: serde_json::Value,
    pub cached_at: DateTime<Utc>,
}

impl CacheEntry {
    pub fn new(
        key: &CacheKey,
        summary: impl Into<String>,
        raw_tree: serde_json::Value,
        content: serde_json::Value,
        cached_at: DateTime<Utc>,
    ) -> Self {
        Self {
            owner: key.owner().to_string(),
            repo: key.repo().to_string(),
            summary: summary.into(),
            raw_tree,
            content,
            cached_at,
        }
    }

    /// Age of the entry at `now`; negative ages (clock skew) count as zero.
    pub fn age_at(&self, now: DateTime<Utc>) -> Duration {
        (now - self.cached_at).to_std().unwrap_or(Duration::ZERO)
    }

    /// An entry is stale once its age reaches the TTL.
    pub fn is_expired_at(&self, now: DateTime<Utc>, ttl: Duration) -> bool {
        self.age_at(now) >= ttl
    }

    pub fn matches(&self, key: &CacheKey) -> bool {
        self.owner == key.owner() && self.repo == key.repo()
    }
}

/// Cache configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CacheConfig {
    /// Directory holding one file per cached repository
    pub dir: PathBuf,
    /// Entries older than this are treated as absent
    #[serde(with = "humantime_serde")]
    pub ttl: Duration,
    /// Upper bound on persisted entries
    pub max_entries: usize,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            dir: std::env::temp_dir().join("repo_cache"),
            ttl: DEFAULT_TTL,
            max_entries: DEFAULT_MAX_ENTRIES,
        }
    }
}

/// Snapshot of the cache directory
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CacheStats {
    /// Number of entry files
    pub entries: usize,
    /// Total size of entry files in bytes
    pub size_bytes: u64,
    /// Entries past their TTL (still on disk until evicted)
    pub expired: usize,
    /// Entries that could not be decoded
    pub corrupt: usize,
}
