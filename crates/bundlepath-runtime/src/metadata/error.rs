//! Error types for on-disk bundle metadata.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while loading an info dictionary.
#[derive(Debug, Error)]
pub enum MetadataError {
    /// The info file exists but could not be read.
    #[error("Failed to read info dictionary {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The info file is not a JSON object of the expected shape.
    #[error("Malformed info dictionary {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}
