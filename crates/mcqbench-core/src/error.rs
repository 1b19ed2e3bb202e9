//! Dataset error types.
//!
//! Only whole-file failures surface here. Malformed rows and undecodable bytes
//! are recovered inside the loader and never become errors.

use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur when loading a question dataset.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum DatasetError {
    /// The dataset file could not be opened or read.
    #[error("failed to read dataset {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
