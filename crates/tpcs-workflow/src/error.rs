use thiserror::Error;

use tpcs_core::models::case::Step;
use tpcs_llm::error::LlmError;

#[derive(Debug, Error)]
pub enum WorkflowError {
    #[error("step {step} failed: {source}")]
    Step {
        step: Step,
        #[source]
        source: LlmError,
    },
}

impl WorkflowError {
    pub fn step(&self) -> Step {
        match self {
            WorkflowError::Step { step, .. } => *step,
        }
    }
}
