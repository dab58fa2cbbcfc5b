use crate::cue::CueError;
use crate::io::ContainerError;
use crate::toc::TocError;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AlbumError {
    #[error(transparent)]
    CueError(#[from] CueError),

    #[error(transparent)]
    ContainerError(#[from] ContainerError),

    #[error(transparent)]
    TocError(#[from] TocError),

    #[error("File not found: {0}")]
    FileNotFound(PathBuf),

    #[error("Unsupported file format, expected a .cue or .zip file: {0}")]
    UnsupportedPath(PathBuf),

    #[error("No .{extension} file found in the container: {container}")]
    NoCueSheetFound {
        extension: String,
        container: PathBuf,
    },
}

pub type AlbumResult<T> = Result<T, AlbumError>;
