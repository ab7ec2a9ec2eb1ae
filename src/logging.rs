use anyhow::{Context, Result, anyhow};
use std::fs::{File, OpenOptions};
use std::path::{Path, PathBuf};
use tracing::level_filters::LevelFilter;
use tracing_appender::non_blocking::{self, WorkerGuard};
use tracing_subscriber::EnvFilter;
use tracing_subscriber::fmt::writer::BoxMakeWriter;

#[cfg(test)]
mod tests;

/// Where log lines go. The TUI owns the terminal, so it always logs to a file.
#[derive(Debug, Clone)]
pub enum LogDestination {
    Stderr,
    File(PathBuf),
}

/// Keeps the non-blocking file writer alive; drop it last so buffered lines are flushed.
pub struct LoggingGuard {
    _worker: Option<WorkerGuard>,
}

/// Installs the global subscriber. `RUST_LOG` overrides `level` when set.
pub fn init_logging(destination: &LogDestination, level: LevelFilter) -> Result<LoggingGuard> {
    let env_filter = EnvFilter::builder()
        .with_default_directive(level.into())
        .from_env_lossy();

    let (writer, worker) = match destination {
        LogDestination::Stderr => (BoxMakeWriter::new(std::io::stderr), None),
        LogDestination::File(path) => {
            let file = open_log_file(path)?;
            let (writer, guard) = non_blocking::NonBlockingBuilder::default()
                .lossy(false)
                .finish(file);
            (BoxMakeWriter::new(writer), Some(guard))
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(writer)
        .with_ansi(matches!(destination, LogDestination::Stderr))
        .with_target(true)
        .with_thread_ids(true)
        .try_init()
        .map_err(|e| anyhow!("Failed to install log subscriber: {e}"))?;

    Ok(LoggingGuard { _worker: worker })
}

/// Opens `path` for appending, creating missing parent directories.
fn open_log_file(path: &Path) -> Result<File> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create log directory {parent:?}"))?;
    }

    OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("Failed to open log file {path:?}"))
}
