//! tpcs-export
//!
//! Result files for processed cases: the CSV summary, one Markdown report
//! per case rendered from an embedded Tera template, and the run status
//! file.

pub mod clean;
pub mod csv_report;
pub mod error;
pub mod markdown;
pub mod status;
