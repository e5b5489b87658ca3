#![allow(dead_code)]

use jiff::Zoned;
use jiff::civil::date;
use jiff::tz::TimeZone;
use uuid::Uuid;

use tpcs_core::models::case::{
    CalculatedStage, CaseState, CriteriaFindings, Identification, Note, StageAssessment, Step,
    StepRecord,
};
use tpcs_core::models::token_count::TokenCount;

pub fn now() -> Zoned {
    date(2026, 3, 4).at(9, 5, 7, 0).to_zoned(TimeZone::UTC).unwrap()
}

fn record(step: Step, response: &str) -> StepRecord {
    StepRecord {
        step,
        model_id: "gpt-4o-mini".to_string(),
        response: response.to_string(),
        tokens: TokenCount { input: 100, output: 20 },
        cost_usd: 0.000027,
    }
}

pub fn covered_case() -> CaseState {
    CaseState {
        case_id: Uuid::new_v4(),
        note: Note::new("notes/wilms_case.txt", "Left renal mass, 9 cm. Lung nodules on CT."),
        identification: Identification {
            cancer_type: "**Wilms Tumor**".to_string(),
            reported_category: "Renal Tumors".to_string(),
            standardized_category: Some("Wilms Tumor (Renal Tumors)".to_string()),
            covered: true,
            primary_site: "Left kidney".to_string(),
            metastasis_sites: "Lungs".to_string(),
            emr_stage: "Not mentioned".to_string(),
        },
        criteria: CriteriaFindings::Analysis("Hematogenous metastases: present".to_string()),
        assessment: StageAssessment {
            stage: CalculatedStage::Named("Stage IV".to_string()),
            explanation: "Stage: Stage IV\nLung nodules \u{2013} hematogenous spread.".to_string(),
        },
        report: "Staging Summary: Stage IV Wilms tumor.\nPlan: chemotherapy \u{2014} per protocol."
            .to_string(),
        transcript: vec![
            record(Step::IdentifyCancer, "Cancer Type: Wilms Tumor"),
            record(Step::AnalyzeCriteria, "Hematogenous metastases: present"),
            record(Step::CalculateStage, "Stage: Stage IV"),
            record(Step::GenerateReport, "Staging Summary: ..."),
        ],
        tokens: TokenCount { input: 400, output: 80 },
    }
}

pub fn uncovered_case() -> CaseState {
    CaseState {
        case_id: Uuid::new_v4(),
        note: Note::new("notes/retino.txt", "Leukocoria in the right eye."),
        identification: Identification {
            cancer_type: "Retinoblastoma".to_string(),
            reported_category: "Unknown".to_string(),
            standardized_category: None,
            covered: false,
            primary_site: "Right eye".to_string(),
            metastasis_sites: "None".to_string(),
            emr_stage: "Not mentioned".to_string(),
        },
        criteria: CriteriaFindings::NotApplicable,
        assessment: StageAssessment::not_applicable(),
        report: "Retinoblastoma is outside the staging system.".to_string(),
        transcript: vec![
            record(Step::IdentifyCancer, "Cancer Type: Retinoblastoma"),
            record(Step::GenerateReport, "Retinoblastoma is outside the staging system."),
        ],
        tokens: TokenCount { input: 200, output: 40 },
    }
}
