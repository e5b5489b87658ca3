use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ReferenceError {
    #[error("failed to read reference table at {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid reference entry '{category}': {reason}")]
    InvalidEntry { category: String, reason: String },

    #[error("reference table root must be a JSON object")]
    NotAnObject,

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}
