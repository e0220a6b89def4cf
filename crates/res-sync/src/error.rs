//! Error types for res-sync

use std::path::PathBuf;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("INI error: {0}")]
    Ini(#[from] res_ini::Error),

    #[error("Resource error: {0}")]
    Resource(#[from] res_model::Error),

    #[error("I/O error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Unsupported definitions format: {extension:?}")]
    UnsupportedFormat { extension: String },

    #[error("Failed to parse {format} definitions at {path}: {message}")]
    DefinitionParse {
        path: PathBuf,
        format: String,
        message: String,
    },

    #[error("Invalid resource name: {name:?}")]
    InvalidResourceName { name: String },
}
