use thiserror::Error;

#[derive(Debug, Error)]
pub enum CueError {
    #[error(transparent)]
    IoError(#[from] std::io::Error),

    #[error(transparent)]
    FmtError(#[from] std::fmt::Error),

    #[error("Cue sheet is not valid UTF-8")]
    InvalidEncoding(#[from] std::string::FromUtf8Error),
}

pub type CueResult<T> = Result<T, CueError>;
