use std::io;
use std::path::PathBuf;
use std::process::ExitStatus;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("strip_components must be a non-negative integer, got '{raw}'")]
    InvalidStripComponents { raw: String },

    #[error("archive not found: {path}")]
    ArchiveNotFound { path: PathBuf },

    #[error("archive is not readable: {path}: {source}")]
    ArchiveUnreadable { path: PathBuf, source: io::Error },

    #[error("destination exists but is not a directory: {path}")]
    DestinationInvalid { path: PathBuf },

    #[error("destination does not exist and auto-create is disabled: {path}")]
    DestinationMissing { path: PathBuf },

    #[error("failed to create destination directory: {path}: {source}")]
    DestinationCreateFailed { path: PathBuf, source: io::Error },

    #[error("destination directory is not writable: {path}")]
    DestinationNotWritable { path: PathBuf },

    #[error("no usable tar on PATH: {source}")]
    ToolNotFound { source: which::Error },

    #[error("extraction failed with {status}")]
    ExtractionFailed { status: ExitStatus },

    #[error(transparent)]
    Io(#[from] io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
