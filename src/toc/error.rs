use crate::io::ContainerError;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum TocError {
    #[error(transparent)]
    IoError(#[from] std::io::Error),

    #[error(transparent)]
    ContainerError(#[from] ContainerError),

    #[error("Invalid file size for CD audio: {file} is {size} bytes, not a multiple of 2352")]
    InvalidFileSize { file: String, size: u64 },

    #[error("CUE file references missing file: {0}")]
    MissingFile(PathBuf),
}

pub type TocResult<T> = Result<T, TocError>;
