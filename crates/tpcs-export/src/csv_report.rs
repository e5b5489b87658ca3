//! The per-run CSV summary, one row per completed case.

use std::fs::File;
use std::path::{Path, PathBuf};

use serde::Serialize;
use tracing::debug;

use tpcs_core::models::case::CaseState;
use tpcs_core::sentinel;

use crate::clean::clean_value;
use crate::error::ExportError;

pub const HEADER: [&str; 10] = [
    "Medical Note",
    "Cancer Type",
    "Standardized Category",
    "Primary Site",
    "Extracted Stage",
    "Calculated Stage",
    "Sites of Metastasis",
    "Covered by Toronto",
    "Explanation",
    "Date Processed",
];

/// One CSV row. Field order matches [`HEADER`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CaseRow {
    pub note: String,
    pub cancer_type: String,
    pub standardized_category: String,
    pub primary_site: String,
    pub extracted_stage: String,
    pub calculated_stage: String,
    pub metastasis_sites: String,
    pub covered: &'static str,
    pub explanation: String,
    pub date_processed: String,
}

impl CaseRow {
    pub fn from_case(case: &CaseState, date_processed: &str) -> Self {
        let id = &case.identification;
        Self {
            note: case.note.id.clone(),
            cancer_type: clean_value(&id.cancer_type, sentinel::UNKNOWN),
            standardized_category: clean_value(id.category_label(), sentinel::UNKNOWN),
            primary_site: clean_value(&id.primary_site, sentinel::NOT_SPECIFIED),
            extracted_stage: clean_value(&id.emr_stage, sentinel::NOT_MENTIONED),
            calculated_stage: case.assessment.stage.as_str().to_string(),
            metastasis_sites: clean_value(&id.metastasis_sites, sentinel::NONE_IDENTIFIED),
            covered: if case.covered() { "Yes" } else { "No" },
            explanation: case.assessment.explanation.trim().to_string(),
            date_processed: date_processed.to_string(),
        }
    }
}

/// Appends rows as cases complete, so a crash mid-batch keeps earlier rows.
pub struct CsvReportWriter {
    writer: csv::Writer<File>,
    path: PathBuf,
    rows: usize,
}

impl CsvReportWriter {
    /// Create (or truncate) the file and write the header.
    pub fn create(path: &Path) -> Result<Self, ExportError> {
        let file = File::create(path).map_err(|source| ExportError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let mut writer = csv::WriterBuilder::new()
            .has_headers(false)
            .from_writer(file);
        writer.write_record(HEADER)?;
        writer.flush().map_err(|source| ExportError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        Ok(Self {
            writer,
            path: path.to_path_buf(),
            rows: 0,
        })
    }

    pub fn append(&mut self, row: &CaseRow) -> Result<(), ExportError> {
        self.writer.serialize(row)?;
        self.writer.flush().map_err(|source| ExportError::Io {
            path: self.path.clone(),
            source,
        })?;
        self.rows += 1;
        debug!(path = %self.path.display(), note = %row.note, "csv row written");
        Ok(())
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}
