use crate::cue::error::CueError;
use crate::plan::error::PlanError;
use crate::process::error::ProcessError;
use crate::sheet::error::SheetError;
use crate::sox::error::SoxError;
use std::result;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CueSplitError {
    #[error("Configuration error: {0}")]
    Configuration(#[from] SoxError),

    #[error("Parse error: {0}")]
    Parse(#[from] CueError),

    #[error("Discovery error: {0}")]
    Discovery(SheetError),

    #[error("Planning error: {0}")]
    Planning(#[from] PlanError),

    #[error(transparent)]
    Process(#[from] ProcessError),
}

impl From<SheetError> for CueSplitError {
    fn from(err: SheetError) -> Self {
        match err {
            SheetError::SoxError(err) => Self::Configuration(err),
            SheetError::CueError(err) => Self::Parse(err),
            SheetError::PlanError(err) => Self::Planning(err),
            other => Self::Discovery(other),
        }
    }
}

pub type CueSplitResult<T> = result::Result<T, CueSplitError>;
