//! Request orchestration

use super::traits::RepoProvider;
use super::types::AnalysisResult;
use crate::cache::RepoCache;
use crate::config::AnalysisConfig;
use crate::error::{RepolensError, RepolensResult, UnifiedError};
use crate::github::RepoId;
use crate::ingest::{Ingestor, parse_token_estimate};
use crate::tree::{TreeNode, normalize};
use serde_json::Value;
use std::sync::Arc;
use tracing::{error, info, warn};

/// Answers analysis requests from the cache or a fresh ingestion.
///
/// Live metadata is always fetched from the provider, even on a cache hit.
#[derive(Clone)]
pub struct AnalysisOrchestrator {
    cache: RepoCache,
    ingestor: Arc<dyn Ingestor>,
    provider: Arc<dyn RepoProvider>,
    policy: AnalysisConfig,
}

impl AnalysisOrchestrator {
    pub fn new(
        cache: RepoCache,
        ingestor: Arc<dyn Ingestor>,
        provider: Arc<dyn RepoProvider>,
        policy: AnalysisConfig,
    ) -> Self {
        Self {
            cache,
            ingestor,
            provider,
            policy,
        }
    }

    pub fn cache(&self) -> &RepoCache {
        &self.cache
    }

    pub fn policy(&self) -> &AnalysisConfig {
        &self.policy
    }

    pub async fn analyze(&self, repo: &RepoId) -> RepolensResult<AnalysisResult> {
        let structure = match self.cache.lookup(repo.owner(), repo.repo()).await {
            Some(entry) => self.structure_from(&entry.raw_tree, repo, "cached tree").await,
            None => self.ingest_fresh(repo).await?,
        };

        let metadata = self.provider.fetch_metadata(repo).await.map_err(|e| {
            error!("Failed to fetch metadata for {}: {}", repo, e);
            e
        })?;

        Ok(AnalysisResult::new(structure, metadata))
    }

    /// Ingest, enforce the size limit, cache, then normalize.
    async fn ingest_fresh(&self, repo: &RepoId) -> RepolensResult<Vec<TreeNode>> {
        if !self.provider.exists(repo).await {
            return Err(RepolensError::not_found("Repository not found or inaccessible")
                .with_context(repo.url().to_string()));
        }

        let ingestion = self
            .ingestor
            .ingest(repo, &self.policy.exclude_patterns)
            .await
            .map_err(|e| {
                error!("Ingestion failed for {}: {}", repo, e);
                match e {
                    upstream @ RepolensError::UpstreamFailure { .. } => upstream,
                    other => RepolensError::upstream(format!(
                        "Failed to ingest repository: {}",
                        other.message()
                    )),
                }
            })?;

        if let Some(tokens) = parse_token_estimate(&ingestion.summary) {
            if tokens > self.policy.max_tokens {
                warn!(
                    "Rejecting {}: {} estimated tokens over limit {}",
                    repo, tokens, self.policy.max_tokens
                );
                return Err(RepolensError::too_large(tokens, self.policy.max_tokens));
            }
        }

        self.cache
            .store(
                repo.owner(),
                repo.repo(),
                &ingestion.summary,
                &ingestion.tree,
                &ingestion.content,
            )
            .await;

        Ok(self.structure_from(&ingestion.tree, repo, "ingested tree").await)
    }

    /// Normalize `raw`, falling back to the provider's tree when that yields
    /// nothing. A failed fallback degrades to an empty structure.
    async fn structure_from(&self, raw: &Value, repo: &RepoId, source: &str) -> Vec<TreeNode> {
        let structure = normalize(raw);
        if !structure.is_empty() {
            return structure;
        }

        warn!("Empty structure from {} for {}, fetching from GitHub", source, repo);
        match self.provider.fetch_tree(repo).await {
            Ok(structure) => {
                info!("Fetched fallback tree for {} ({} roots)", repo, structure.len());
                structure
            }
            Err(e) => {
                warn!("Fallback tree fetch failed for {}: {}", repo, e);
                Vec::new()
            }
        }
    }
}
