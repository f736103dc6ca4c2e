//! GitHub REST API access
//!
//! [`GithubClient`] talks to the REST API and implements the
//! [`RepoProvider`](crate::analysis::RepoProvider) seam; [`RepoId`] is the
//! validated form of a user-supplied repository URL.

mod client;
mod repo_id;
mod wire;

pub use client::GithubClient;
pub use repo_id::RepoId;
pub use wire::{GitTree, GitTreeItem};
