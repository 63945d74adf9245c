//! Error types for routemap.
//!
//! The resolution engine itself is total. Errors only arise at the edges:
//! reading configuration and decoding the extractor's output.

use thiserror::Error;

pub type Result<T> = std::result::Result<T, RoutemapError>;

#[derive(Error, Debug)]
pub enum RoutemapError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid configuration: {0}")]
    Config(#[from] toml::de::Error),

    #[error("invalid JSON: {0}")]
    Json(#[from] serde_json::Error),
}
