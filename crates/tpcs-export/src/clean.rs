//! Tidying model-written values for display.

/// Values that mean "nothing was extracted".
const PLACEHOLDERS: &[&str] = &["**", "None", "Unknown", "Not specified"];

/// Report headings promoted to `###` when a report uses them as plain lines.
pub const REPORT_HEADERS: &[&str] = &[
    "Cancer Staging Report",
    "Patient Information:",
    "Staging Summary:",
    "Staging Explanation:",
    "Key Findings:",
    "Multidisciplinary Conference (MDC) Summary:",
    "Clinical Summary:",
    "Plan:",
    "Radiology Summary:",
    "Pathology Summary:",
    "First Visit Note",
];

/// Strip markdown residue from a field value, substituting `default` for
/// blank or placeholder values.
pub fn clean_value(raw: &str, default: &str) -> String {
    let trimmed = raw.trim();
    if trimmed.is_empty() || PLACEHOLDERS.contains(&trimmed) {
        return default.to_string();
    }
    let cleaned = trimmed.trim_matches(|c: char| matches!(c, '*' | '[' | ']' | ' '));
    if cleaned.is_empty() {
        default.to_string()
    } else {
        cleaned.to_string()
    }
}

/// Replace en and em dashes with `-`.
pub fn normalize_dashes(text: &str) -> String {
    text.replace(['\u{2013}', '\u{2014}'], "-")
}

/// Prefix known report headings with `### ` unless the text already does.
pub fn promote_headers(text: &str) -> String {
    let mut out = text.to_string();
    for header in REPORT_HEADERS {
        let promoted = format!("### {header}");
        if out.contains(header) && !out.contains(&promoted) {
            out = out.replace(header, &promoted);
        }
    }
    out
}
