use crate::tags::error::TagError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ProcessError {
    #[error(transparent)]
    IoError(#[from] std::io::Error),

    #[error(transparent)]
    JoinError(#[from] tokio::task::JoinError),

    #[error(transparent)]
    TemplateError(#[from] indicatif::style::TemplateError),

    #[error(transparent)]
    TagError(#[from] TagError),

    #[error(transparent)]
    JsonError(#[from] serde_json::Error),

    #[error("Command failed with {status}: {command}\n{stderr}")]
    CommandFailed {
        command: String,
        status: std::process::ExitStatus,
        stderr: String,
    },
}

pub type ProcessResult<T> = Result<T, ProcessError>;
