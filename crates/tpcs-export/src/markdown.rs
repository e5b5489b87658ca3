//! Per-case Markdown reports.

use std::fs::{File, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use jiff::Zoned;
use serde::Serialize;
use tera::{Context, Tera};
use tracing::info;

use tpcs_core::models::case::CaseState;
use tpcs_core::sentinel;

use crate::clean::{clean_value, normalize_dashes, promote_headers};
use crate::error::ExportError;

const TEMPLATE_NAME: &str = "case_report.md";
const TEMPLATE: &str = include_str!("templates/case_report.md.tera");
/// Numbered variants tried when a report name is already taken.
const MAX_NAME_ATTEMPTS: u32 = 100;

#[derive(Debug, Serialize)]
struct StepView<'a> {
    step: &'a str,
    model_id: &'a str,
    input_tokens: u64,
    output_tokens: u64,
}

/// Template context for one case.
#[derive(Debug, Serialize)]
struct CaseReportView<'a> {
    date: String,
    note_id: &'a str,
    case_id: String,
    cancer_type: String,
    standardized_category: String,
    primary_site: String,
    metastasis_sites: String,
    extracted_stage: String,
    calculated_stage: &'a str,
    covered: bool,
    explanation: String,
    report: String,
    note_text: &'a str,
    steps: Vec<StepView<'a>>,
}

impl<'a> CaseReportView<'a> {
    fn new(case: &'a CaseState, date: String) -> Self {
        let id = &case.identification;
        Self {
            date,
            note_id: &case.note.id,
            case_id: case.case_id.to_string(),
            cancer_type: clean_value(&id.cancer_type, sentinel::UNKNOWN),
            standardized_category: clean_value(id.category_label(), sentinel::UNKNOWN),
            primary_site: clean_value(&id.primary_site, sentinel::NOT_SPECIFIED),
            metastasis_sites: clean_value(&id.metastasis_sites, sentinel::NONE_IDENTIFIED),
            extracted_stage: clean_value(&id.emr_stage, sentinel::NOT_MENTIONED),
            calculated_stage: case.assessment.stage.as_str(),
            covered: case.covered(),
            explanation: normalize_dashes(&case.assessment.explanation),
            report: promote_headers(&normalize_dashes(&case.report)),
            note_text: &case.note.text,
            steps: case
                .transcript
                .iter()
                .map(|r| StepView {
                    step: r.step.as_str(),
                    model_id: &r.model_id,
                    input_tokens: r.tokens.input,
                    output_tokens: r.tokens.output,
                })
                .collect(),
        }
    }
}

/// Render the Markdown report for a case processed at `now`.
pub fn render_case_report(case: &CaseState, now: &Zoned) -> Result<String, ExportError> {
    let mut tera = Tera::default();
    tera.add_raw_template(TEMPLATE_NAME, TEMPLATE)
        .map_err(|e| ExportError::TemplateParse(e.to_string()))?;

    let view = CaseReportView::new(case, now.strftime("%Y-%m-%d").to_string());
    let value = serde_json::to_value(&view)?;
    let context =
        Context::from_value(value).map_err(|e| ExportError::TemplateRender(e.to_string()))?;

    let rendered = tera.render(TEMPLATE_NAME, &context)?;
    Ok(rendered)
}

/// `results_{note stem}_{YYYYMMDD_HHMMSS}.md`
pub fn report_file_name(note_id: &str, now: &Zoned) -> String {
    let stem = Path::new(note_id)
        .file_stem()
        .and_then(|s| s.to_str())
        .filter(|s| !s.is_empty())
        .unwrap_or("note");
    format!("results_{stem}_{}.md", now.strftime("%Y%m%d_%H%M%S"))
}

/// Render and write a case report into `dir`, returning the file path.
///
/// An existing file is never overwritten: when the name is taken (two notes
/// with the same stem finishing in the same second) a `_2`, `_3`, ...
/// suffix is added.
pub fn write_case_report(dir: &Path, case: &CaseState, now: &Zoned) -> Result<PathBuf, ExportError> {
    let rendered = render_case_report(case, now)?;
    let name = report_file_name(&case.note.id, now);
    let (path, mut file) = create_unique(dir, &name)?;
    file.write_all(rendered.as_bytes())
        .map_err(|source| ExportError::Io {
            path: path.clone(),
            source,
        })?;
    info!(path = %path.display(), note = %case.note.id, "markdown report written");
    Ok(path)
}

fn create_unique(dir: &Path, name: &str) -> Result<(PathBuf, File), ExportError> {
    let stem = name.strip_suffix(".md").unwrap_or(name);
    let mut path = dir.join(name);
    for attempt in 2..=MAX_NAME_ATTEMPTS + 1 {
        match OpenOptions::new().write(true).create_new(true).open(&path) {
            Ok(file) => return Ok((path, file)),
            Err(e) if e.kind() == io::ErrorKind::AlreadyExists => {
                path = dir.join(format!("{stem}_{attempt}.md"));
            }
            Err(source) => return Err(ExportError::Io { path, source }),
        }
    }
    Err(ExportError::Io {
        path,
        source: io::Error::new(
            io::ErrorKind::AlreadyExists,
            "no free report file name",
        ),
    })
}
