use std::io;
use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("failed to create log directory: {path}: {source}")]
    DirCreationFailed { path: PathBuf, source: io::Error },

    #[error("failed to open log file: {path}: {source}")]
    OpenFailed { path: PathBuf, source: io::Error },

    #[error("failed to write log file: {path}: {source}")]
    WriteFailed { path: PathBuf, source: io::Error },

    #[error("failed to duplicate log handle: {source}")]
    SinkFailed { source: io::Error },

    #[error(transparent)]
    Io(#[from] io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
