//! tpcs-workflow
//!
//! The four-step staging pipeline: identify the cancer, analyze the
//! category's criteria, calculate a stage, write the report. Criteria and
//! stage are skipped when the category is not covered by the reference
//! table.

pub mod batch;
pub mod error;
pub mod orchestrator;
pub mod parse;
pub mod prompts;
pub mod steps;

pub use orchestrator::Workflow;
