//! Repository analysis
//!
//! [`AnalysisOrchestrator`] ties the cache, the ingestion collaborator and
//! the hosting provider together to answer one analysis request.

mod orchestrator;
mod traits;
mod types;


pub use orchestrator::AnalysisOrchestrator;
pub use traits::RepoProvider;
pub use types::{AnalysisResult, CommitSummary, RepoMetadata};
