//! Text-generation backed recommendations for Trendly.
//!
//! Builds prompts from competitor data, sends them to an OpenAI-compatible
//! chat completion endpoint, and decodes the JSON replies. Every operation
//! has a fixed fallback payload for when generation is unavailable.

pub mod analyzer;
pub mod client;
pub mod error;
pub mod extract;
pub mod fallback;
pub mod prompt;
pub mod types;

pub use analyzer::{
    analyze_captions, analyze_post_performance, assemble, assemble_or_fallback,
    content_ideas_or_fallback, generate_content_ideas, generate_weekly_strategy, performance_band,
    weekly_strategy_or_fallback,
};
pub use client::{ChatMessage, OpenAiClient, Role, TextGenerator};
pub use error::AiError;
pub use extract::{extract_json, ExtractError};
pub use types::{AiResponse, AnalysisResult, ContentIdeas};
