//! Reading labeled fields out of free-text model responses.
//!
//! Responses are plain text. Fields are found by substring search for a
//! label and run to the end of that line; nothing here is a grammar. A
//! missing field is not an error, callers substitute the named default.

use tpcs_core::models::case::CalculatedStage;
use tpcs_core::reference::ReferenceEntry;
use tpcs_core::sentinel;

/// Marker whose presence anywhere in an extraction response means the
/// cancer is outside the reference table. Matched case-sensitively; a
/// paraphrased marker is not detected.
pub const NOT_COVERED_MARKER: &str = "NOT COVERED BY THE TORONTO PEDIATRIC CANCER STAGING SYSTEM";

pub const CANCER_TYPE_LABEL: &str = "Cancer Type:";
pub const CATEGORY_LABEL: &str = "Standardized Category:";
pub const PRIMARY_SITE_LABEL: &str = "Primary Site:";
pub const METASTASIS_LABEL: &str = "Metastasis Sites:";
pub const EXTRACTED_STAGE_LABEL: &str = "Extracted Stage:";
pub const STAGE_LABEL: &str = "Stage:";

/// Ordinals scanned, in this order, when a stage response has no label.
/// The first one contained anywhere in the text wins, so a response that
/// mentions "Stage III" also matches "Stage I" first.
pub const ORDINAL_FALLBACK: [&str; 4] = ["Stage I", "Stage II", "Stage III", "Stage IV"];

/// Text following the first occurrence of `label`, up to the line break.
///
/// Surrounding whitespace and markdown emphasis are trimmed. `None` when
/// the label is absent or its value is blank.
pub fn labeled_field<'a>(response: &'a str, label: &str) -> Option<&'a str> {
    let start = response.find(label)? + label.len();
    let rest = &response[start..];
    let line = rest.split('\n').next().unwrap_or_default();
    let value = clean(line);
    (!value.is_empty()).then_some(value)
}

/// [`labeled_field`] with a default for a missing or blank value.
pub fn field_or(response: &str, label: &str, default: &str) -> String {
    labeled_field(response, label).unwrap_or(default).to_string()
}

pub fn has_not_covered_marker(response: &str) -> bool {
    response.contains(NOT_COVERED_MARKER)
}

/// The raw fields of an extraction response, before category resolution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractedFields {
    pub cancer_type: String,
    pub category: String,
    pub primary_site: String,
    pub metastasis_sites: String,
    pub emr_stage: String,
    pub not_covered_marker: bool,
}

pub fn parse_extraction(response: &str) -> ExtractedFields {
    ExtractedFields {
        cancer_type: field_or(response, CANCER_TYPE_LABEL, sentinel::UNKNOWN),
        category: field_or(response, CATEGORY_LABEL, sentinel::UNKNOWN),
        primary_site: field_or(response, PRIMARY_SITE_LABEL, sentinel::NOT_SPECIFIED),
        metastasis_sites: field_or(response, METASTASIS_LABEL, sentinel::NONE_IDENTIFIED),
        emr_stage: field_or(response, EXTRACTED_STAGE_LABEL, sentinel::NOT_MENTIONED),
        not_covered_marker: has_not_covered_marker(response),
    }
}

/// Value of the first line that begins with `Stage:`.
///
/// Only line starts count, so `Extracted Stage:` or `Calculated Stage:`
/// inside a sentence do not match. Leading whitespace and markdown markers
/// before the label are ignored. A label with nothing after it takes the
/// next non-blank line.
pub fn stage_label(response: &str) -> Option<&str> {
    let mut lines = response.lines();
    while let Some(line) = lines.next() {
        let line = line.trim_start_matches(|c: char| c.is_whitespace() || c == '*' || c == '#');
        if let Some(value) = line.strip_prefix(STAGE_LABEL) {
            let value = clean(value);
            if !value.is_empty() {
                return Some(value);
            }
            return lines.map(clean).find(|next| !next.is_empty()).or(Some(value));
        }
    }
    None
}

/// First ordinal from [`ORDINAL_FALLBACK`] contained anywhere in `response`.
pub fn ordinal_fallback(response: &str) -> Option<&'static str> {
    ORDINAL_FALLBACK
        .iter()
        .copied()
        .find(|ordinal| response.contains(ordinal))
}

/// Decide the calculated stage from a stage response.
///
/// With a `Stage:` label, its value must name one of the entry's stages
/// (ignoring case), either whole or followed by a note such as
/// `Stage III (residual tumor)`; anything else becomes insufficient
/// information. Without a label, the ordinal fallback applies under the
/// same constraint.
pub fn parse_stage(response: &str, entry: &ReferenceEntry) -> CalculatedStage {
    let candidate = match stage_label(response) {
        Some(value) => {
            let value = value.trim_end_matches('.').trim();
            if starts_with_ignore_case(value, sentinel::INSUFFICIENT_INFORMATION) {
                return CalculatedStage::InsufficientInformation;
            }
            value
        }
        None => match ordinal_fallback(response) {
            Some(ordinal) => ordinal,
            None => return CalculatedStage::InsufficientInformation,
        },
    };

    match entry
        .canonical_stage(candidate)
        .or_else(|| entry.leading_stage(candidate))
    {
        Some(name) => CalculatedStage::Named(name.to_string()),
        None => CalculatedStage::InsufficientInformation,
    }
}

fn starts_with_ignore_case(value: &str, prefix: &str) -> bool {
    value
        .get(..prefix.len())
        .is_some_and(|head| head.eq_ignore_ascii_case(prefix))
}

fn clean(value: &str) -> &str {
    value.trim().trim_matches('*').trim()
}
