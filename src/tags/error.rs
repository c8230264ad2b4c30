use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum TagError {
    #[error(transparent)]
    IoError(#[from] std::io::Error),

    #[error(transparent)]
    LoftyError(#[from] lofty::error::LoftyError),

    #[error("Could not create a tag for {0:?}")]
    NoTag(PathBuf),
}

pub type TagResult<T> = Result<T, TagError>;
