//! The staging state machine.
//!
//! ```text
//! start -> identified -> criteria_analyzed -> staged -> reported
//!                     \-> not_covered ----------------/
//! ```
//!
//! Each state carries what has been decided so far. Every step runs at
//! most once per case and the first failure ends the case; nothing is
//! retried.

use tracing::{Instrument, debug, info, info_span};
use uuid::Uuid;

use tpcs_core::context::StagingContext;
use tpcs_core::models::case::{
    CaseState, CriteriaFindings, Identification, Note, StageAssessment, StepRecord,
};
use tpcs_core::models::token_count::TokenCount;
use tpcs_llm::TextGenerator;

use crate::error::WorkflowError;
use crate::steps;

/// Pipeline position of one case.
#[derive(Debug)]
pub enum WorkflowState {
    Start,
    Identified {
        identification: Identification,
    },
    CriteriaAnalyzed {
        identification: Identification,
        category: String,
        criteria: CriteriaFindings,
    },
    Staged {
        identification: Identification,
        criteria: CriteriaFindings,
        assessment: StageAssessment,
    },
    /// Criteria and stage carry their not-applicable sentinels.
    NotCovered {
        identification: Identification,
    },
    Reported {
        identification: Identification,
        criteria: CriteriaFindings,
        assessment: StageAssessment,
        report: String,
    },
}

impl WorkflowState {
    pub fn name(&self) -> &'static str {
        match self {
            WorkflowState::Start => "start",
            WorkflowState::Identified { .. } => "identified",
            WorkflowState::CriteriaAnalyzed { .. } => "criteria_analyzed",
            WorkflowState::Staged { .. } => "staged",
            WorkflowState::NotCovered { .. } => "not_covered",
            WorkflowState::Reported { .. } => "reported",
        }
    }
}

/// Runs cases against a shared context and generator.
#[derive(Clone, Copy)]
pub struct Workflow<'a> {
    ctx: &'a StagingContext,
    generator: &'a dyn TextGenerator,
}

impl<'a> Workflow<'a> {
    pub fn new(ctx: &'a StagingContext, generator: &'a dyn TextGenerator) -> Self {
        Self { ctx, generator }
    }

    /// Process one note from start to report.
    pub async fn run(&self, note: &Note) -> Result<CaseState, WorkflowError> {
        let case_id = Uuid::new_v4();
        let span = info_span!("case", case_id = %case_id, note = %note.id);
        self.run_case(case_id, note).instrument(span).await
    }

    async fn run_case(&self, case_id: Uuid, note: &Note) -> Result<CaseState, WorkflowError> {
        info!(note_len = note.text.len(), "processing note");
        let mut transcript: Vec<StepRecord> = Vec::with_capacity(4);
        let mut state = WorkflowState::Start;

        loop {
            debug!(state = state.name(), "workflow state");
            state = match state {
                WorkflowState::Start => {
                    let (identification, record) =
                        steps::identify_cancer(self.ctx, self.generator, &note.text).await?;
                    transcript.push(record);
                    WorkflowState::Identified { identification }
                }
                WorkflowState::Identified { identification } => {
                    match identification.covered_category().map(str::to_string) {
                        Some(category) => {
                            let (criteria, record) = steps::analyze_criteria(
                                self.ctx,
                                self.generator,
                                &category,
                                &note.text,
                            )
                            .await?;
                            transcript.push(record);
                            WorkflowState::CriteriaAnalyzed {
                                identification,
                                category,
                                criteria,
                            }
                        }
                        None => WorkflowState::NotCovered { identification },
                    }
                }
                WorkflowState::CriteriaAnalyzed {
                    identification,
                    category,
                    criteria,
                } => {
                    let (assessment, record) = steps::calculate_stage(
                        self.ctx,
                        self.generator,
                        &category,
                        &note.text,
                        &criteria,
                    )
                    .await?;
                    transcript.push(record);
                    WorkflowState::Staged {
                        identification,
                        criteria,
                        assessment,
                    }
                }
                WorkflowState::Staged {
                    identification,
                    criteria,
                    assessment,
                } => {
                    self.report(&mut transcript, &note.text, identification, criteria, assessment)
                        .await?
                }
                WorkflowState::NotCovered { identification } => {
                    info!("category not covered, skipping criteria and stage");
                    self.report(
                        &mut transcript,
                        &note.text,
                        identification,
                        CriteriaFindings::NotApplicable,
                        StageAssessment::not_applicable(),
                    )
                    .await?
                }
                WorkflowState::Reported {
                    identification,
                    criteria,
                    assessment,
                    report,
                } => {
                    let mut tokens = TokenCount::default();
                    for record in &transcript {
                        tokens += record.tokens;
                    }
                    info!(
                        stage = %assessment.stage,
                        steps = transcript.len(),
                        total_tokens = tokens.total(),
                        "case complete"
                    );
                    return Ok(CaseState {
                        case_id,
                        note: note.clone(),
                        identification,
                        criteria,
                        assessment,
                        report,
                        transcript,
                        tokens,
                    });
                }
            };
        }
    }

    async fn report(
        &self,
        transcript: &mut Vec<StepRecord>,
        note: &str,
        identification: Identification,
        criteria: CriteriaFindings,
        assessment: StageAssessment,
    ) -> Result<WorkflowState, WorkflowError> {
        let (report, record) =
            steps::generate_report(self.generator, note, &identification, &criteria, &assessment)
                .await?;
        transcript.push(record);
        Ok(WorkflowState::Reported {
            identification,
            criteria,
            assessment,
            report,
        })
    }
}
