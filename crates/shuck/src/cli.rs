use std::path::PathBuf;
use std::time::Instant;

use anyhow::Context;
use chrono::{DateTime, Local};
use clap::Parser;

use shuck_extract::{
    Error as ExtractError, TarRunner, ensure_destination, ensure_readable_archive,
    resolve_strip_components,
};
use shuck_log::LogSession;

use crate::config::RunConfig;

const TAIL_LINES: usize = 5;
const WALL_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Extract an archive into a destination directory, logging the run to a
/// timestamped file.
#[derive(Debug, Parser)]
#[command(name = "shuck", version, about, long_about = None)]
pub struct App {
    /// Path to a readable archive
    pub archive: PathBuf,

    /// Directory to extract into (created if missing)
    pub destination: PathBuf,

    /// Leading path segments to strip from each entry [default: 5]
    pub strip_components: Option<String>,
}

/// Wall-clock and monotonic view of one run, flushed to the log as the
/// final report lines.
struct RunContext {
    started_at: DateTime<Local>,
    clock: Instant,
}

impl RunContext {
    fn begin() -> Self {
        Self {
            started_at: Local::now(),
            clock: Instant::now(),
        }
    }

    fn elapsed_secs(&self) -> u64 {
        self.clock.elapsed().as_secs()
    }
}

pub fn run(app: App, config: &RunConfig) -> anyhow::Result<()> {
    // Validation failures land here, before the log file exists, so they
    // reach the console only.
    let strip = resolve_strip_components(app.strip_components.as_deref(), config.default_strip)?;
    ensure_readable_archive(&app.archive)?;
    ensure_destination(&app.destination, config.auto_create_dest)?;
    let runner = TarRunner::locate(config.verbose)?;

    let mut session =
        LogSession::open(config.log_dir.as_deref()).context("failed to open log session")?;

    let ctx = RunContext::begin();
    session.line(&format!(
        "Extraction started at {}",
        ctx.started_at.format(WALL_FORMAT)
    ))?;
    session.line(&format!("Archive: {}", app.archive.display()))?;
    session.line(&format!("Destination: {}", app.destination.display()))?;
    session.line(&format!("Strip components: {strip}"))?;

    let command = runner.command_line(&app.archive, &app.destination, strip);
    session.line(&format!("Running: {command}"))?;

    let invocation = runner.run(&app.archive, &app.destination, strip, session.sink()?)?;

    let outcome = if invocation.success() {
        session.line(&format!("Extraction succeeded ({})", invocation.status))?;
        Ok(())
    } else {
        session.line(&format!("Extraction failed ({})", invocation.status))?;
        for line in session.tail(TAIL_LINES)? {
            eprintln!("{line}");
        }
        Err(ExtractError::ExtractionFailed {
            status: invocation.status,
        })
    };

    session.line(&format!(
        "Extraction finished at {}",
        Local::now().format(WALL_FORMAT)
    ))?;
    session.line(&format!("Duration: {}s", ctx.elapsed_secs()))?;

    outcome.map_err(Into::into)
}
