//! Repomap Repository - Remote repository access
//!
//! Responsible for reading repository structure and metadata over the GitHub
//! REST API, bounded to a configurable traversal depth

pub mod api;
pub mod fetcher;

pub use api::*;
pub use fetcher::*;
