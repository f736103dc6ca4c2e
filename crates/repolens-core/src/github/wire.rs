//! GitHub REST payloads
//!
//! Only the fields repolens reads are declared; everything else in the
//! responses is ignored by serde.

use serde::Deserialize;

/// Response of `GET /repos/{o}/{r}/git/trees/{sha}?recursive=1`
#[derive(Debug, Clone, Default, Deserialize)]
pub struct GitTree {
    #[serde(default)]
    pub tree: Vec<GitTreeItem>,
    /// Set when the listing exceeded GitHub's size limit
    #[serde(default)]
    pub truncated: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct GitTreeItem {
    pub path: String,
    /// `blob`, `tree` or `commit` (submodule)
    #[serde(rename = "type")]
    pub kind: String,
    /// Present for blobs only
    #[serde(default)]
    pub size: Option<u64>,
}

impl GitTreeItem {
    pub fn is_blob(&self) -> bool {
        self.kind == "blob"
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct BranchPayload {
    pub name: String,
}

#[derive(Debug, Deserialize)]
pub(crate) struct CommitPayload {
    pub sha: String,
    pub commit: CommitDetail,
}

#[derive(Debug, Deserialize)]
pub(crate) struct CommitDetail {
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub author: Option<Signature>,
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct Signature {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub date: String,
}

#[derive(Debug, Deserialize)]
pub(crate) struct RepositoryPayload {
    pub default_branch: String,
}
