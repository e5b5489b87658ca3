//! The four generation steps.
//!
//! Each step issues exactly one generation call and returns its parsed
//! output together with the [`StepRecord`] of that call. Skipping a step is
//! the orchestrator's decision, not the step's.

mod criteria;
mod identify;
mod report;
mod stage;

pub use criteria::analyze_criteria;
pub use identify::{identify_cancer, interpret_identification};
pub use report::generate_report;
pub use stage::calculate_stage;

use tracing::debug;

use tpcs_core::models::case::{Step, StepRecord};
use tpcs_llm::TextGenerator;

use crate::error::WorkflowError;
use crate::prompts::Prompt;

async fn invoke(
    generator: &dyn TextGenerator,
    step: Step,
    prompt: &Prompt,
) -> Result<StepRecord, WorkflowError> {
    debug!(
        step = %step,
        system_len = prompt.system.len(),
        user_len = prompt.user.len(),
        "sending generation request"
    );

    let generation = generator
        .generate(&prompt.system, &prompt.user)
        .await
        .map_err(|source| WorkflowError::Step { step, source })?;

    Ok(StepRecord {
        step,
        model_id: generation.model_id,
        response: generation.text,
        tokens: generation.usage.tokens,
        cost_usd: generation.usage.cost_usd,
    })
}
