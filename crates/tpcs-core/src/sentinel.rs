//! Named default values.
//!
//! A field that could not be extracted or does not apply always carries
//! one of these strings, never an empty value.

/// Cancer type or category label missing from an extraction response.
pub const UNKNOWN: &str = "Unknown";

/// Primary site missing from an extraction response.
pub const NOT_SPECIFIED: &str = "Not specified";

/// Metastasis sites missing from an extraction response.
pub const NONE_IDENTIFIED: &str = "None identified";

/// Stage explicitly written in the note, when the note states none.
pub const NOT_MENTIONED: &str = "Not mentioned";

/// Calculated stage for categories outside the reference table.
pub const NOT_APPLICABLE: &str = "Not applicable";

/// Calculated stage when the model could not commit to a defined stage.
pub const INSUFFICIENT_INFORMATION: &str = "Insufficient information";

/// Criteria findings for categories outside the reference table.
pub const CRITERIA_NOT_APPLICABLE: &str = "Not applicable: staging criteria are only analyzed for \
categories covered by the Toronto Pediatric Cancer Staging System.";

/// Stage explanation for categories outside the reference table.
pub const NOT_COVERED_EXPLANATION: &str =
    "This cancer type is not covered by the Toronto Pediatric Cancer Staging System.";
