//! Repository analysis cache
//!
//! One JSON file per `(owner, repo)` under a single cache directory. Entries
//! expire after a TTL and the directory is kept under a fixed entry count by
//! evicting the least recently accessed files, using each file's own access
//! time as the recency signal.
//!
//! The cache is an optimization only: every I/O or decode failure is logged
//! and reported to callers as a miss.

mod file_times;
mod store;
mod types;


pub use store::RepoCache;
pub use types::{CacheConfig, CacheEntry, CacheKey, CacheStats};
