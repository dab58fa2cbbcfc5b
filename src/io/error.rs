use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ContainerError {
    #[error(transparent)]
    IoError(#[from] std::io::Error),

    #[error(transparent)]
    ZipError(#[from] zip::result::ZipError),

    #[error("Invalid argument: {0}")]
    InvalidArgument(&'static str),

    #[error("File not found: {0}")]
    FileNotFound(PathBuf),

    #[error("File not found inside archive: {0}")]
    EntryNotFound(String),

    #[error("Archive entry {0} uses an unsupported compression method or is encrypted")]
    UnsupportedEntry(String),

    #[error("Archive entry stream is closed")]
    StreamClosed,

    #[error("Archive handle is poisoned")]
    Poisoned,
}

pub type ContainerResult<T> = Result<T, ContainerError>;

pub(crate) fn require_name(file_name: &str) -> ContainerResult<()> {
    if file_name.is_empty() {
        return Err(ContainerError::InvalidArgument("file name must not be empty"));
    }

    Ok(())
}
