//! Per-case output files for a `tpcs stage` run.
//!
//! A case only counts as processed once its CSV row (and Markdown report,
//! when enabled) is on disk. A write failure moves the case to the failed
//! list so the status file and exit code report it.

use std::path::{Path, PathBuf};

use eyre::{Result, WrapErr};
use jiff::Zoned;
use tracing::error;

use tpcs_core::models::case::{CaseState, Note};
use tpcs_export::csv_report::{CaseRow, CsvReportWriter};
use tpcs_export::error::ExportError;
use tpcs_export::markdown::write_case_report;
use tpcs_workflow::Workflow;
use tpcs_workflow::batch::BatchOutcome;

pub struct CaseOutputs {
    csv: CsvReportWriter,
    report_dir: Option<PathBuf>,
    report_paths: Vec<PathBuf>,
}

impl CaseOutputs {
    /// Create the CSV (with its header) and the report directory.
    ///
    /// `report_dir` of `None` disables Markdown reports.
    pub fn create(csv_path: &Path, report_dir: Option<PathBuf>) -> Result<Self> {
        let csv_dir = parent_dir(csv_path);
        std::fs::create_dir_all(&csv_dir)
            .wrap_err_with(|| format!("failed to create output directory {}", csv_dir.display()))?;
        if let Some(dir) = &report_dir {
            std::fs::create_dir_all(dir)
                .wrap_err_with(|| format!("failed to create report directory {}", dir.display()))?;
        }
        let csv = CsvReportWriter::create(csv_path)
            .wrap_err_with(|| format!("failed to create {}", csv_path.display()))?;
        Ok(Self {
            csv,
            report_dir,
            report_paths: Vec::new(),
        })
    }

    /// Write the CSV row, then the Markdown report.
    pub fn write(&mut self, case: &CaseState, now: &Zoned) -> Result<(), ExportError> {
        let date = now.strftime("%Y-%m-%d").to_string();
        self.csv.append(&CaseRow::from_case(case, &date))?;
        if let Some(dir) = &self.report_dir {
            let path = write_case_report(dir, case, now)?;
            self.report_paths.push(path);
        }
        Ok(())
    }

    pub fn csv_path(&self) -> &Path {
        self.csv.path()
    }

    pub fn rows(&self) -> usize {
        self.csv.rows()
    }

    pub fn report_dir(&self) -> Option<&Path> {
        self.report_dir.as_deref()
    }

    pub fn report_paths(&self) -> &[PathBuf] {
        &self.report_paths
    }
}

/// Run every note and write its outputs as it completes.
///
/// `on_case` sees each case that finished the workflow, before its outputs
/// are written.
pub async fn stage_notes<F>(
    workflow: &Workflow<'_>,
    notes: Vec<Note>,
    outputs: &mut CaseOutputs,
    mut on_case: F,
) -> BatchOutcome
where
    F: FnMut(&CaseState),
{
    let mut write_failures = Vec::new();
    let mut outcome = workflow
        .run_batch(notes, |case| {
            on_case(case);
            if let Err(e) = outputs.write(case, &Zoned::now()) {
                error!(note = %case.note.id, error = %e, "failed to write case outputs");
                write_failures.push((case.case_id, case.note.id.clone(), e.to_string()));
            }
        })
        .await;

    for (case_id, note_id, error) in write_failures {
        outcome.completed.retain(|case| case.case_id != case_id);
        outcome.record_failure(note_id, None, format!("output not written: {error}"));
    }
    outcome
}

/// Directory holding `path`, `.` for a bare file name.
pub fn parent_dir(path: &Path) -> PathBuf {
    match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => PathBuf::from("."),
    }
}
