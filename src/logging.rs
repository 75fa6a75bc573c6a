use std::fs::{self, OpenOptions};

use anyhow::{Context, Result};
use once_cell::sync::OnceCell;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;

use crate::config::Config;

static LOG_GUARD: OnceCell<WorkerGuard> = OnceCell::new();

/// File logger for the TUI (stdout belongs to the terminal). Falls back to
/// stderr when no log file can be opened.
pub fn init(config: &Config) {
    match open_file_writer(config) {
        Ok(guard) => {
            let _ = LOG_GUARD.set(guard);
        }
        Err(err) => {
            let _ = tracing_subscriber::fmt()
                .with_env_filter(env_filter())
                .with_target(false)
                .with_writer(std::io::stderr)
                .try_init();
            tracing::warn!(error = %format!("{err:#}"), "failed to open log file; using stderr");
        }
    }
}

/// Plain stderr logger for the command-line tools.
pub fn init_stderr() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter())
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init();
}

fn open_file_writer(config: &Config) -> Result<WorkerGuard> {
    let path = config
        .log_file
        .as_ref()
        .context("no log file location available")?;
    if let Some(dir) = path.parent() {
        fs::create_dir_all(dir).context("create log dir")?;
    }
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("open {}", path.display()))?;
    let (writer, guard) = tracing_appender::non_blocking(file);
    tracing_subscriber::fmt()
        .with_env_filter(env_filter())
        .with_target(false)
        .with_ansi(false)
        .with_writer(writer)
        .try_init()
        .map_err(|err| anyhow::anyhow!("{err}"))?;
    tracing::info!(path = %path.display(), "logging initialized");
    Ok(guard)
}

fn env_filter() -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
}
