//! Collaborator seams used by the orchestrator

use super::types::RepoMetadata;
use crate::error::RepolensResult;
use crate::github::RepoId;
use crate::tree::TreeNode;
use async_trait::async_trait;

/// Hosting provider abstraction
///
/// Implemented by [`GithubClient`](crate::github::GithubClient); tests
/// substitute in-memory fakes.
#[async_trait]
pub trait RepoProvider: Send + Sync {
    /// Whether the repository exists and is readable. Failures read as `false`.
    async fn exists(&self, repo: &RepoId) -> bool;

    /// Full file tree of the default branch
    async fn fetch_tree(&self, repo: &RepoId) -> RepolensResult<Vec<TreeNode>>;

    /// Branches, recent commits and the default branch
    async fn fetch_metadata(&self, repo: &RepoId) -> RepolensResult<RepoMetadata>;
}
