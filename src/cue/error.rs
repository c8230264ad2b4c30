use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CueError {
    #[error(transparent)]
    IoError(#[from] std::io::Error),

    #[error("Unknown text encoding: {0}")]
    UnknownEncoding(String),

    #[error(
        "Could not decode {path:?} as {encoding}, undecodable text, encoding must be specified explicitly"
    )]
    Undecodable {
        path: PathBuf,
        encoding: &'static str,
    },
}

pub type CueResult<T> = Result<T, CueError>;
