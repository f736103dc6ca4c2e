//! Repository ingestion
//!
//! An [`Ingestor`] turns a repository into a textual digest: a summary
//! carrying the estimated token count, a raw tree in any shape
//! [`normalize`](crate::tree::normalize) understands, and per-file content.

mod github;
mod tokens;

pub use github::GithubIngestor;
pub use tokens::{estimate_tokens, format_token_estimate, parse_token_estimate};

use crate::error::RepolensResult;
use crate::github::RepoId;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Output of one ingestion run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ingestion {
    /// Human-readable digest; contains an `Estimated tokens: <n>` line
    pub summary: String,
    /// Repository tree in any supported raw shape
    pub tree: Value,
    pub content: Value,
}

/// Ingestion collaborator
#[async_trait]
pub trait Ingestor: Send + Sync {
    /// Ingest `repo`, skipping paths matching any of `exclude_patterns`.
    async fn ingest(&self, repo: &RepoId, exclude_patterns: &[String])
    -> RepolensResult<Ingestion>;
}
