//! Sequential processing of many notes.
//!
//! A failed note is recorded and the batch moves on to the next one.

use serde::Serialize;
use tracing::{error, info};

use tpcs_core::models::case::{CaseState, Note, Step};
use tpcs_core::models::token_count::TokenCount;

use crate::orchestrator::Workflow;

/// A note that did not make it to a report.
#[derive(Debug, Clone, Serialize)]
pub struct FailedNote {
    pub note_id: String,
    /// Step that failed; `None` when the failure was outside a generation
    /// step, such as an unreadable note or an output that was not written.
    pub step: Option<Step>,
    pub error: String,
}

#[derive(Debug, Default)]
pub struct BatchOutcome {
    pub completed: Vec<CaseState>,
    pub failed: Vec<FailedNote>,
}

impl BatchOutcome {
    pub fn record_failure(&mut self, note_id: impl Into<String>, step: Option<Step>, error: impl Into<String>) {
        self.failed.push(FailedNote {
            note_id: note_id.into(),
            step,
            error: error.into(),
        });
    }

    pub fn total(&self) -> usize {
        self.completed.len() + self.failed.len()
    }

    pub fn has_failures(&self) -> bool {
        !self.failed.is_empty()
    }

    pub fn tokens(&self) -> TokenCount {
        let mut total = TokenCount::default();
        for case in &self.completed {
            total += case.tokens;
        }
        total
    }

    pub fn cost_usd(&self) -> f64 {
        self.completed.iter().map(CaseState::cost_usd).sum()
    }
}

impl Workflow<'_> {
    /// Run every note in order, calling `on_complete` as each case finishes.
    pub async fn run_batch<I, F>(&self, notes: I, mut on_complete: F) -> BatchOutcome
    where
        I: IntoIterator<Item = Note>,
        F: FnMut(&CaseState),
    {
        let mut outcome = BatchOutcome::default();

        for note in notes {
            match self.run(&note).await {
                Ok(case) => {
                    on_complete(&case);
                    outcome.completed.push(case);
                }
                Err(e) => {
                    error!(note = %note.id, step = %e.step(), error = %e, "note failed");
                    outcome.record_failure(note.id, Some(e.step()), e.to_string());
                }
            }
        }

        info!(
            processed = outcome.completed.len(),
            failed = outcome.failed.len(),
            "batch complete"
        );
        outcome
    }
}
