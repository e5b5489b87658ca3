use thiserror::Error;

#[derive(Debug, Error)]
pub enum LlmError {
    #[error("model invocation failed: {0}")]
    Invocation(String),

    #[error("response parsing failed: {0}")]
    ResponseParse(String),

    #[error("model returned an empty response")]
    EmptyResponse,

    #[error("model call timed out after {0} seconds")]
    Timeout(u64),

    #[error("provider config error: {0}")]
    Config(String),
}
