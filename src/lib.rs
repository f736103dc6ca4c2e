//! Repolens
//!
//! Umbrella crate re-exporting the analysis library and the CLI/HTTP layer.

pub use repolens_cli;
pub use repolens_core;

pub use repolens_core::{
    AnalysisOrchestrator, AnalysisResult, Config, RepoCache, RepoId, RepolensError,
    RepolensResult, TreeNode, build_orchestrator, load_config, normalize,
};
