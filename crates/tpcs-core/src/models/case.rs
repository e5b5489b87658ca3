use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::token_count::TokenCount;
use crate::sentinel;

/// A medical note as handed to the workflow.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Note {
    /// Identifier shown in outputs, usually the source file path.
    pub id: String,
    pub text: String,
}

impl Note {
    pub fn new(id: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            text: text.into(),
        }
    }
}

/// Output of the extraction step.
///
/// `standardized_category` is always either a reference table key or
/// `None`, and `covered` is true exactly when it is `Some`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Identification {
    pub cancer_type: String,
    /// The category label as the model wrote it, before resolution.
    pub reported_category: String,
    pub standardized_category: Option<String>,
    pub covered: bool,
    pub primary_site: String,
    pub metastasis_sites: String,
    /// Stage explicitly written in the note (the EMR stage).
    pub emr_stage: String,
}

impl Identification {
    /// The reference table key to stage against, when covered.
    pub fn covered_category(&self) -> Option<&str> {
        if self.covered {
            self.standardized_category.as_deref()
        } else {
            None
        }
    }

    /// Display label for the category: the resolved key, else what the model reported.
    pub fn category_label(&self) -> &str {
        self.standardized_category
            .as_deref()
            .unwrap_or(&self.reported_category)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "text", rename_all = "snake_case")]
pub enum CriteriaFindings {
    /// Free-text findings returned by the criteria step.
    Analysis(String),
    NotApplicable,
}

impl CriteriaFindings {
    pub fn as_text(&self) -> &str {
        match self {
            CriteriaFindings::Analysis(text) => text,
            CriteriaFindings::NotApplicable => sentinel::CRITERIA_NOT_APPLICABLE,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "name", rename_all = "snake_case")]
pub enum CalculatedStage {
    Named(String),
    InsufficientInformation,
    NotApplicable,
}

impl CalculatedStage {
    pub fn as_str(&self) -> &str {
        match self {
            CalculatedStage::Named(name) => name,
            CalculatedStage::InsufficientInformation => sentinel::INSUFFICIENT_INFORMATION,
            CalculatedStage::NotApplicable => sentinel::NOT_APPLICABLE,
        }
    }
}

impl fmt::Display for CalculatedStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Output of the stage step.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StageAssessment {
    pub stage: CalculatedStage,
    pub explanation: String,
}

impl StageAssessment {
    pub fn not_applicable() -> Self {
        Self {
            stage: CalculatedStage::NotApplicable,
            explanation: sentinel::NOT_COVERED_EXPLANATION.to_string(),
        }
    }
}

/// The four generation steps, named after their workflow nodes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Step {
    IdentifyCancer,
    AnalyzeCriteria,
    CalculateStage,
    GenerateReport,
}

impl Step {
    pub fn as_str(&self) -> &'static str {
        match self {
            Step::IdentifyCancer => "identify_cancer",
            Step::AnalyzeCriteria => "analyze_criteria",
            Step::CalculateStage => "calculate_stage",
            Step::GenerateReport => "generate_report",
        }
    }
}

impl fmt::Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One generation call made while processing a case.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StepRecord {
    pub step: Step,
    pub model_id: String,
    pub response: String,
    pub tokens: TokenCount,
    /// Estimated from the generator's model pricing; zero when the model
    /// has no known price.
    pub cost_usd: f64,
}

/// The fully processed case returned by the orchestrator.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CaseState {
    pub case_id: Uuid,
    pub note: Note,
    pub identification: Identification,
    pub criteria: CriteriaFindings,
    pub assessment: StageAssessment,
    pub report: String,
    pub transcript: Vec<StepRecord>,
    pub tokens: TokenCount,
}

impl CaseState {
    pub fn covered(&self) -> bool {
        self.identification.covered
    }

    pub fn calculated_stage(&self) -> &CalculatedStage {
        &self.assessment.stage
    }

    pub fn emr_stage(&self) -> &str {
        &self.identification.emr_stage
    }

    pub fn cost_usd(&self) -> f64 {
        self.transcript.iter().map(|r| r.cost_usd).sum()
    }

    /// Steps that issued a generation call, in order.
    pub fn steps_run(&self) -> Vec<Step> {
        self.transcript.iter().map(|r| r.step).collect()
    }
}
