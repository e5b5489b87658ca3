use std::future::Future;
use std::pin::Pin;

use tpcs_core::models::token_count::TokenUsage;

use crate::error::LlmError;

pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

/// One completed generation call.
#[derive(Debug, Clone)]
pub struct Generation {
    pub text: String,
    pub model_id: String,
    pub usage: TokenUsage,
}

/// A backend that turns a system prompt plus one user message into text.
///
/// Each call is independent; the workflow never sends conversation history.
pub trait TextGenerator: Send + Sync {
    /// Model or deployment identifier recorded against each call.
    fn model_id(&self) -> &str;

    fn generate<'a>(
        &'a self,
        system_prompt: &'a str,
        user_message: &'a str,
    ) -> BoxFuture<'a, Result<Generation, LlmError>>;
}
