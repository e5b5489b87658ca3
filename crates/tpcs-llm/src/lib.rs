//! tpcs-llm
//!
//! Text generation backends used by the staging workflow: Bedrock Converse
//! and Azure OpenAI chat completions, behind a single [`TextGenerator`]
//! trait.

pub mod azure;
pub mod bedrock;
pub mod config;
pub mod error;
pub mod generator;
pub mod tokens;

pub use generator::{BoxFuture, Generation, TextGenerator};
