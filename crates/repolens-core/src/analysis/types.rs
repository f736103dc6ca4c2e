//! Analysis result types

use crate::tree::TreeNode;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommitSummary {
    pub sha: String,
    pub message: String,
    pub author: String,
    pub date: String,
}

/// Live repository metadata
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RepoMetadata {
    /// Branch names as `refs/heads/<name>`
    pub branches: Vec<String>,
    /// Newest first, at most five
    pub recent_commits: Vec<CommitSummary>,
    pub default_branch: String,
}

/// Response body of a successful analysis
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalysisResult {
    pub structure: Vec<TreeNode>,
    pub branches: Vec<String>,
    pub recent_commits: Vec<CommitSummary>,
    pub default_branch: String,
}

impl AnalysisResult {
    pub fn new(structure: Vec<TreeNode>, metadata: RepoMetadata) -> Self {
        Self {
            structure,
            branches: metadata.branches,
            recent_commits: metadata.recent_commits,
            default_branch: metadata.default_branch,
        }
    }
}
