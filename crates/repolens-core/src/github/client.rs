//! GitHub REST client

use super::repo_id::RepoId;
use super::wire::{BranchPayload, CommitPayload, GitTree, RepositoryPayload};
use crate::analysis::{CommitSummary, RepoMetadata, RepoProvider};
use crate::config::GithubConfig;
use crate::error::{RepolensError, RepolensResult};
use crate::tree::{TreeBuilder, TreeNode};
use async_trait::async_trait;
use reqwest::header::{ACCEPT, AUTHORIZATION, HeaderMap, HeaderValue};
use reqwest::{Client, StatusCode};
use serde::de::DeserializeOwned;
use tracing::{debug, error, warn};

const GITHUB_ACCEPT: &str = "application/vnd.github.v3+json";

/// Number of commits returned by [`fetch_metadata`](RepoProvider::fetch_metadata)
pub const RECENT_COMMITS: usize = 5;

/// Thin client over the GitHub REST API.
///
/// Cloning is cheap; clones share the underlying connection pool.
#[derive(Debug, Clone)]
pub struct GithubClient {
    http: Client,
    api_base: String,
}

impl GithubClient {
    pub fn new(config: &GithubConfig) -> RepolensResult<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static(GITHUB_ACCEPT));
        if let Some(token) = config.token.as_deref().filter(|t| !t.is_empty()) {
            let mut value = HeaderValue::from_str(&format!("token {}", token))
                .map_err(|_| RepolensError::config("github.token contains invalid characters"))?;
            value.set_sensitive(true);
            headers.insert(AUTHORIZATION, value);
        }

        let http = Client::builder()
            .user_agent(config.user_agent.clone())
            .default_headers(headers)
            .timeout(config.timeout)
            .build()
            .map_err(|e| RepolensError::config(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            http,
            api_base: config.api_base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn api_base(&self) -> &str {
        &self.api_base
    }

    fn repo_url(&self, repo: &RepoId, suffix: &str) -> String {
        format!("{}/repos/{}/{}{}", self.api_base, repo.owner(), repo.repo(), suffix)
    }

    /// GET `url` and decode a JSON body, mapping failure statuses to errors.
    async fn get_json<T: DeserializeOwned>(&self, url: &str, what: &str) -> RepolensResult<T> {
        debug!("GitHub API request: GET {}", url);
        let response = self.http.get(url).send().await.map_err(|e| {
            error!("Failed to fetch {}: {}", what, e);
            RepolensError::from(e).with_context(format!("Fetching {}", what))
        })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            error!("Failed to fetch {}: {} {}", what, status, body.trim());
            return Err(status_error(status, url, what));
        }

        response.json::<T>().await.map_err(|e| {
            RepolensError::upstream_status(
                format!("Failed to parse {} response: {}", what, e),
                url,
                status.as_u16(),
            )
        })
    }

    /// List every entry of the repository's default branch, recursively.
    pub async fn list_tree(&self, repo: &RepoId) -> RepolensResult<GitTree> {
        let url = self.repo_url(repo, "/git/trees/HEAD?recursive=1");
        let tree: GitTree = self.get_json(&url, "repository tree").await?;
        if tree.truncated {
            warn!("GitHub truncated the tree listing for {}", repo);
        }
        Ok(tree)
    }
}

/// Map a non-success status to the matching error kind.
pub(crate) fn status_error(status: StatusCode, url: &str, what: &str) -> RepolensError {
    match status {
        StatusCode::FORBIDDEN | StatusCode::TOO_MANY_REQUESTS => {
            RepolensError::forbidden("Repository is private or rate limit exceeded")
                .with_context(format!("Fetching {}", what))
        }
        StatusCode::NOT_FOUND => RepolensError::not_found("Repository not found")
            .with_context(format!("Fetching {}", what)),
        _ => RepolensError::upstream_status(
            format!("Failed to fetch {}: {}", what, status.as_u16()),
            url,
            status.as_u16(),
        ),
    }
}

/// Build canonical nodes from a git tree listing: blobs become files and
/// everything else (trees, submodules) becomes a directory.
pub(crate) fn tree_from_listing(listing: &GitTree) -> Vec<TreeNode> {
    let mut builder = TreeBuilder::new();
    for item in &listing.tree {
        if item.is_blob() {
            builder.insert_file(&item.path);
        } else {
            builder.insert_dir(&item.path);
        }
    }
    builder.finish()
}

fn summarize_commit(payload: CommitPayload) -> CommitSummary {
    let author = payload.commit.author.unwrap_or_default();
    CommitSummary {
        sha: payload.sha,
        message: payload.commit.message.trim().to_string(),
        author: author.name,
        date: author.date,
    }
}

fn branch_ref(name: &str) -> String {
    format!("refs/heads/{}", name)
}

#[async_trait]
impl RepoProvider for GithubClient {
    async fn exists(&self, repo: &RepoId) -> bool {
        let url = self.repo_url(repo, "");
        match self.http.get(&url).send().await {
            Ok(response) => {
                let status = response.status();
                debug!("GitHub API response for {}: status={}", url, status);
                if status != StatusCode::OK {
                    let body = response.text().await.unwrap_or_default();
                    error!("GitHub API error for {}: {}", url, body.trim());
                }
                status == StatusCode::OK
            }
            Err(e) => {
                error!("Error checking repo {}: {}", repo, e);
                false
            }
        }
    }

    async fn fetch_tree(&self, repo: &RepoId) -> RepolensResult<Vec<TreeNode>> {
        let listing = self.list_tree(repo).await?;
        let structure = tree_from_listing(&listing);
        debug!("Fetched GitHub tree for {}: {} root entries", repo, structure.len());
        Ok(structure)
    }

    async fn fetch_metadata(&self, repo: &RepoId) -> RepolensResult<RepoMetadata> {
        let branches_url = self.repo_url(repo, "/branches");
        let commits_url = self.repo_url(repo, &format!("/commits?per_page={}", RECENT_COMMITS));
        let repo_url = self.repo_url(repo, "");

        let (branches, commits, info) = futures::try_join!(
            self.get_json::<Vec<BranchPayload>>(&branches_url, "branches"),
            self.get_json::<Vec<CommitPayload>>(&commits_url, "commits"),
            self.get_json::<RepositoryPayload>(&repo_url, "repository info"),
        )?;

        Ok(RepoMetadata {
            branches: branches.iter().map(|b| branch_ref(&b.name)).collect(),
            recent_commits: commits
                .into_iter()
                .take(RECENT_COMMITS)
                .map(summarize_commit)
                .collect(),
            default_branch: branch_ref(&info.default_branch),
        })
    }
}
