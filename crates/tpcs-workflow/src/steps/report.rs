use tracing::info;

use tpcs_core::models::case::{CriteriaFindings, Identification, StageAssessment, Step, StepRecord};
use tpcs_llm::TextGenerator;

use super::invoke;
use crate::error::WorkflowError;
use crate::prompts;

/// Write the narrative report. Runs for every case, covered or not.
pub async fn generate_report(
    generator: &dyn TextGenerator,
    note: &str,
    identification: &Identification,
    criteria: &CriteriaFindings,
    assessment: &StageAssessment,
) -> Result<(String, StepRecord), WorkflowError> {
    let prompt = prompts::report(note, identification, criteria, assessment);
    let record = invoke(generator, Step::GenerateReport, &prompt).await?;

    info!(report_len = record.response.len(), "report generated");
    Ok((record.response.clone(), record))
}
