//! Repomap Core - Shared data structures, errors, configuration, and logging
//!
//! This module defines the core abstractions used across the repomap workspace

pub mod config;
pub mod error;
pub mod logging;
pub mod progress;
pub mod types;

pub use error::*;
pub use logging::*;
pub use progress::*;
pub use types::*;

// Re-export commonly used external types
pub use tokio;
pub use tracing;
