use std::path::PathBuf;

use thiserror::Error;

/// Unrecoverable build failures. Everything expected (bad declarations,
/// unknown types, missing source directories, verification failures) flows
/// through `Diagnostic` values instead.
#[derive(Debug, Error)]
pub enum BuildError {
    #[error("failed to read config {path}: {source}")]
    ConfigIo {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("config parse error: {0}")]
    ConfigParse(#[from] serde_json::Error),
    #[error("failed to create output directory {path}: {source}")]
    OutputDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
