use std::path::PathBuf;

use thiserror::Error;

/// Errors raised while obtaining Form-16 text.
///
/// Parsing itself never fails; these only cover reading the source.
#[derive(Debug, Error)]
pub enum Form16Error {
    #[error("Could not read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Text extraction failed: {0}")]
    Extraction(String),
}
