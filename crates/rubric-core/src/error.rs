//! Error types for rubric-core

use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum RubricError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse {}: {source}", .path.display())]
    Config {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },

    #[error("Invalid document tree: {0}")]
    Tree(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, RubricError>;
