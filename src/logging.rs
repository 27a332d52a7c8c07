//! Tracing subscriber setup
//!
//! The TUI owns the terminal, so it logs to a file under the user's home
//! directory. One-shot CLI commands log to stderr.

use std::fs::{self, File, OpenOptions};
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use tracing_subscriber::EnvFilter;

use crate::types::{ContribError, Result};

/// Filter used when `RUST_LOG` is unset
const DEFAULT_FILTER: &str = "contribgraph=info";

const LOG_FILE_NAME: &str = "contribgraph.log";

/// Where log lines go
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LogTarget {
    Stderr,
    /// Append to `contribgraph.log` inside this directory
    File(PathBuf),
}

/// `~/.contribgraph`
pub fn default_log_dir() -> Result<PathBuf> {
    let base_dirs = directories::BaseDirs::new()
        .ok_or_else(|| ContribError::Config("Cannot determine home directory".into()))?;
    Ok(base_dirs.home_dir().join(".contribgraph"))
}

/// Open (creating if needed) the log file inside `dir` for appending
pub fn open_log_file(dir: &Path) -> Result<File> {
    fs::create_dir_all(dir)?;
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(dir.join(LOG_FILE_NAME))?;
    Ok(file)
}

fn env_filter() -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER))
}

/// Install the global subscriber
pub fn init(target: LogTarget) -> Result<()> {
    let builder = tracing_subscriber::fmt().with_env_filter(env_filter());
    let installed = match target {
        LogTarget::Stderr => builder.with_writer(std::io::stderr).try_init(),
        LogTarget::File(dir) => {
            let file = open_log_file(&dir)?;
            builder
                .with_writer(Mutex::new(file))
                .with_ansi(false)
                .try_init()
        }
    };
    installed.map_err(|e| ContribError::Config(format!("failed to install logger: {}", e)))
}
