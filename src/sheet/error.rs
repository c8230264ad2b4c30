use crate::cue::error::CueError;
use crate::plan::error::PlanError;
use crate::sox::error::SoxError;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SheetError {
    #[error(transparent)]
    IoError(#[from] std::io::Error),

    #[error(transparent)]
    SoxError(#[from] SoxError),

    #[error(transparent)]
    CueError(#[from] CueError),

    #[error(transparent)]
    PlanError(#[from] PlanError),

    #[error("Source path '{0}' not found")]
    SourcePathNotFound(PathBuf),
}

pub type SheetResult<T> = Result<T, SheetError>;
