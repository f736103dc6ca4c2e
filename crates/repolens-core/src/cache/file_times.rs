//! Access-time bookkeeping for cache files
//!
//! Plain reads do not reliably move a file's access time (`relatime`,
//! `noatime` mounts), so the cache sets it explicitly.

use chrono::{DateTime, Utc};
use std::fs::{File, FileTimes};
use std::io;
use std::path::Path;
use std::time::SystemTime;

/// Set the access time of `path` to `when`, leaving the modification time alone.
pub(super) async fn touch(path: &Path, when: DateTime<Utc>) -> io::Result<()> {
    let path = path.to_path_buf();
    let when = SystemTime::from(when);
    tokio::task::spawn_blocking(move || set_accessed(&path, when))
        .await
        .map_err(io::Error::other)?
}

// Setting timestamps needs ownership, not write access.
fn set_accessed(path: &Path, when: SystemTime) -> io::Result<()> {
    let file = File::open(path)?;
    file.set_times(FileTimes::new().set_accessed(when))
}

/// Last access time, falling back to modification time where atime is unsupported.
pub(super) fn last_access(metadata: &std::fs::Metadata) -> SystemTime {
    metadata
        .accessed()
        .or_else(|_| metadata.modified())
        .unwrap_or(SystemTime::UNIX_EPOCH)
}
