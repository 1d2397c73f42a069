use std::fs::{File, OpenOptions, create_dir_all};
use std::io::{BufRead, BufReader, Write};
use std::path::{Path, PathBuf};

use chrono::Local;

use crate::Result;
use crate::error::Error;

const FILE_PREFIX: &str = "extraction_log_";
const STAMP_FORMAT: &str = "%Y%m%d_%H%M%S";
const LINE_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Append-only transcript of one run.
///
/// Every [`line`](Self::line) lands on disk before it returns, so a crash
/// mid-run still leaves the history written so far. File names have
/// one-second resolution; two sessions opened within the same second share
/// a file and interleave rather than truncate.
pub struct LogSession {
    path: PathBuf,
    file: File,
}

impl LogSession {
    /// Open a session under `dir`, or the current working directory when
    /// `dir` is `None`. A configured directory is created if missing.
    pub fn open(dir: Option<&Path>) -> Result<Self> {
        let dir = match dir {
            Some(dir) => {
                create_dir_all(dir).map_err(|source| Error::DirCreationFailed {
                    path: dir.to_path_buf(),
                    source,
                })?;
                dir.to_path_buf()
            }
            None => PathBuf::from("."),
        };

        let stamp = Local::now().format(STAMP_FORMAT);
        let path = dir.join(format!("{FILE_PREFIX}{stamp}.log"));
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&path)
            .map_err(|source| Error::OpenFailed {
                path: path.clone(),
                source,
            })?;

        Ok(Self { path, file })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Write one timestamped line, flush it, and echo it to stdout.
    pub fn line(&mut self, msg: &str) -> Result<()> {
        let stamped = format!("[{}] {msg}", Local::now().format(LINE_FORMAT));
        println!("{stamped}");
        writeln!(self.file, "{stamped}")
            .and_then(|()| self.file.flush())
            .map_err(|source| Error::WriteFailed {
                path: self.path.clone(),
                source,
            })
    }

    /// Duplicated handle positioned for append, for redirecting a child
    /// process's output into the same file.
    pub fn sink(&self) -> Result<File> {
        self.file
            .try_clone()
            .map_err(|source| Error::SinkFailed { source })
    }

    /// Last `n` lines of the file as written so far.
    pub fn tail(&self, n: usize) -> Result<Vec<String>> {
        let file = File::open(&self.path).map_err(|source| Error::OpenFailed {
            path: self.path.clone(),
            source,
        })?;
        let lines: Vec<String> = BufReader::new(file).lines().collect::<std::io::Result<_>>()?;
        let skip = lines.len().saturating_sub(n);
        Ok(lines.into_iter().skip(skip).collect())
    }
}
