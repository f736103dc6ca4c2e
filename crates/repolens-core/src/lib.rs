//! Repolens core library
//!
//! Analyzes public GitHub repositories: ingests a repository into a digest,
//! normalizes its file tree into one canonical shape, caches the result on
//! disk with TTL expiry and LRU eviction, and combines it with live branch
//! and commit metadata.

pub mod analysis;
pub mod cache;
pub mod config;
pub mod error;
pub mod github;
pub mod ingest;
pub mod tree;

pub use analysis::{AnalysisOrchestrator, AnalysisResult, CommitSummary, RepoMetadata, RepoProvider};
pub use cache::{CacheConfig, CacheEntry, CacheStats, RepoCache};
pub use config::{Config, load_config};
pub use error::{RepolensError, RepolensResult, UnifiedError};
pub use github::{GithubClient, RepoId};
pub use ingest::{GithubIngestor, Ingestion, Ingestor};
pub use tree::{TreeNode, normalize};

use std::sync::Arc;

/// Wire the GitHub-backed collaborators and the cache from `config`.
pub fn build_orchestrator(config: &Config) -> RepolensResult<AnalysisOrchestrator> {
    let client = GithubClient::new(&config.github)?;
    Ok(AnalysisOrchestrator::new(
        RepoCache::new(&config.cache),
        Arc::new(GithubIngestor::new(client.clone())),
        Arc::new(client),
        config.analysis.clone(),
    ))
}
