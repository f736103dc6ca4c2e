//! Repository URL validation

use crate::error::{RepolensError, RepolensResult};
use serde::Serialize;
use std::fmt;

/// Prefix accepted when no other web base is configured
pub const DEFAULT_WEB_BASE: &str = "https://github.com/";

/// A repository identified by owner and name, plus its canonical web URL.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct RepoId {
    owner: String,
    repo: String,
    url: String,
}

impl RepoId {
    /// Parse a `https://github.com/<owner>/<repo>` URL.
    pub fn parse(url: &str) -> RepolensResult<Self> {
        Self::parse_with_base(url, DEFAULT_WEB_BASE)
    }

    /// Parse a URL that must start with `web_base` (which ends in `/`).
    ///
    /// Exactly two path segments must follow the base. A trailing `/` and a
    /// `.git` suffix are tolerated and dropped from the canonical URL.
    pub fn parse_with_base(url: &str, web_base: &str) -> RepolensResult<Self> {
        let url = url.trim();
        if url.is_empty() {
            return Err(RepolensError::invalid_input_field(
                "Repository URL is required",
                "repoUrl",
            ));
        }

        let Some(rest) = url.strip_prefix(web_base) else {
            return Err(RepolensError::invalid_input_field(
                "Invalid GitHub repository URL",
                "repoUrl",
            ));
        };

        let rest = rest.trim_end_matches('/');
        let rest = rest.strip_suffix(".git").unwrap_or(rest);
        let parts: Vec<&str> = rest.split('/').collect();
        let [owner, repo] = parts.as_slice() else {
            return Err(RepolensError::invalid_input_field(
                "Invalid repository URL format",
                "repoUrl",
            ));
        };
        if !is_valid_segment(owner) || !is_valid_segment(repo) {
            return Err(RepolensError::invalid_input_field(
                "Invalid repository URL format",
                "repoUrl",
            ));
        }

        Ok(Self {
            url: format!("{}{}/{}", web_base, owner, repo),
            owner: owner.to_string(),
            repo: repo.to_string(),
        })
    }

    pub fn owner(&self) -> &str {
        &self.owner
    }

    pub fn repo(&self) -> &str {
        &self.repo
    }

    pub fn url(&self) -> &str {
        &self.url
    }
}

impl fmt::Display for RepoId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.owner, self.repo)
    }
}

/// GitHub names are ASCII letters, digits, `-`, `_` and `.`.
fn is_valid_segment(segment: &str) -> bool {
    !segment.is_empty()
        && segment != "."
        && segment != ".."
        && segment
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.'))
}
