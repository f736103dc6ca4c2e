//! Ingestion backed by the GitHub tree listing

use super::tokens::{estimate_tokens, format_token_estimate};
use super::{Ingestion, Ingestor};
use crate::error::{RepolensError, RepolensResult};
use crate::github::{GitTree, GithubClient, RepoId};
use async_trait::async_trait;
use glob::Pattern;
use serde_json::{Value, json};
use tracing::{debug, info};

/// Builds a digest from the repository's recursive git tree.
///
/// No file contents are downloaded: the token estimate is derived from blob
/// sizes, and `content` lists each kept file with its size.
#[derive(Debug, Clone)]
pub struct GithubIngestor {
    client: GithubClient,
}

impl GithubIngestor {
    pub fn new(client: GithubClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl Ingestor for GithubIngestor {
    async fn ingest(&self, repo: &RepoId, exclude_patterns: &[String]) -> RepolensResult<Ingestion> {
        let patterns = compile_patterns(exclude_patterns)?;
        let listing = self.client.list_tree(repo).await?;
        let ingestion = digest(repo, &listing, &patterns);
        info!("Ingested {}: {}", repo, ingestion.summary.replace('\n', " "));
        Ok(ingestion)
    }
}

fn compile_patterns(patterns: &[String]) -> RepolensResult<Vec<Pattern>> {
    patterns
        .iter()
        .map(|p| {
            Pattern::new(p).map_err(|e| {
                RepolensError::invalid_input(format!("Invalid exclude pattern '{}': {}", p, e))
            })
        })
        .collect()
}

/// Summarize the blobs of `listing` that no pattern excludes.
fn digest(repo: &RepoId, listing: &GitTree, patterns: &[Pattern]) -> Ingestion {
    let mut paths = Vec::new();
    let mut files = Vec::new();
    let mut total_bytes = 0u64;

    for item in listing.tree.iter().filter(|item| item.is_blob()) {
        if patterns.iter().any(|p| p.matches(&item.path)) {
            debug!("Excluded {}", item.path);
            continue;
        }
        let size = item.size.unwrap_or(0);
        total_bytes += size;
        paths.push(Value::String(item.path.clone()));
        files.push(json!({ "path": item.path, "size": size }));
    }

    let summary = format!(
        "Repository: {}\nFiles analyzed: {}\n\nEstimated tokens: {}",
        repo,
        files.len(),
        format_token_estimate(estimate_tokens(total_bytes))
    );

    Ingestion {
        summary,
        tree: Value::Array(paths),
        content: Value::Array(files),
    }
}
