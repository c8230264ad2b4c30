use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum PlanError {
    #[error(transparent)]
    IoError(#[from] std::io::Error),

    #[error("Source file '{0}' not found or not supported by the splitter")]
    SourceFileNotFound(PathBuf),

    #[error("Track {0} has no INDEX 01 position")]
    MissingIndex(String),

    #[error("Invalid INDEX timestamp: {0}")]
    InvalidTimestamp(String),
}

pub type PlanResult<T> = Result<T, PlanError>;
