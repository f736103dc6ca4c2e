//! Error types for repolens
//!
//! Every failure that can reach the request boundary is a [`RepolensError`].
//! Each variant maps to a stable error code and a fixed HTTP status, so the
//! server layer never has to inspect messages to pick a response.
//!
//! Cache failures never appear here: the cache absorbs them and degrades to
//! a miss.

mod constructors;
mod conversions;
mod types;
mod unified_error;

pub use types::{RepolensError, RepolensResult, ResultExt, UnifiedError};
