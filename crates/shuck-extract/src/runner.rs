use std::fs::File;
use std::path::{Path, PathBuf};
use std::process::{Command, ExitStatus, Stdio};

use crate::Result;
use crate::error::Error;

/// Outcome of one child-process run: the command line as executed and the
/// exit status captured from the spawn itself, never re-read from ambient
/// state.
#[derive(Debug)]
pub struct Invocation {
    pub command: String,
    pub status: ExitStatus,
}

impl Invocation {
    pub fn success(&self) -> bool {
        self.status.success()
    }
}

/// Builds and runs the external `tar -x` invocation.
pub struct TarRunner {
    tool: PathBuf,
    verbose: bool,
}

impl TarRunner {
    /// Locate `tar` on PATH.
    pub fn locate(verbose: bool) -> Result<Self> {
        let tool = which::which("tar").map_err(|source| Error::ToolNotFound { source })?;
        Ok(Self { tool, verbose })
    }

    /// Use a specific tool binary instead of searching PATH.
    pub fn with_tool(tool: PathBuf, verbose: bool) -> Self {
        Self { tool, verbose }
    }

    fn args(&self, archive: &Path, dest: &Path, strip: usize) -> Vec<String> {
        let mut args = vec!["-x".to_string()];
        if self.verbose {
            args.push("-v".to_string());
        }
        args.push("-f".to_string());
        args.push(archive.display().to_string());
        args.push(format!("--strip-components={strip}"));
        args.push("-C".to_string());
        args.push(dest.display().to_string());
        args
    }

    /// The exact command line [`run`](Self::run) will execute, for the
    /// transcript.
    pub fn command_line(&self, archive: &Path, dest: &Path, strip: usize) -> String {
        let mut line = self.tool.display().to_string();
        for arg in self.args(archive, dest, strip) {
            line.push(' ');
            line.push_str(&arg);
        }
        line
    }

    /// Run the extraction synchronously, with the child's stdout and stderr
    /// both appended to `sink`. Blocks until the child exits; no timeout.
    pub fn run(&self, archive: &Path, dest: &Path, strip: usize, sink: File) -> Result<Invocation> {
        let command = self.command_line(archive, dest, strip);
        tracing::debug!(%command, "spawning archive tool");

        let stderr_sink = sink.try_clone()?;
        let status = Command::new(&self.tool)
            .args(self.args(archive, dest, strip))
            .stdin(Stdio::null())
            .stdout(Stdio::from(sink))
            .stderr(Stdio::from(stderr_sink))
            .status()?;

        Ok(Invocation { command, status })
    }
}
