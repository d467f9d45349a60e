//! Repomap Analysis - Conversation generation
//!
//! Produces the analysis exchange shown before the visualization: a
//! deterministic scripted dialogue by default, or a single pass-through
//! call to a generative endpoint when credentials are available.

pub mod conversation;
pub mod llm;

pub use conversation::{extract_conversation, scripted_conversation, ConversationTurn};
pub use llm::{analyze, detect_client, AnalysisClient};
