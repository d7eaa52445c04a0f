// Diagnostic logging for Action Tennis
// The TUI owns the terminal, so interactive sessions log to a file (--debug)

use anyhow::{anyhow, Context, Result};
use std::fs::OpenOptions;
use std::io::Write;
use std::path::PathBuf;
use std::sync::Mutex;
use std::time::SystemTime;
use tracing_subscriber::EnvFilter;

const LOG_FILE_NAME: &str = "action-tennis-debug.log";
const DEFAULT_FILTER: &str = "action_tennis=debug";

/// Where log output goes
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LogTarget {
    /// No subscriber is installed; events are dropped
    Off,
    File(PathBuf),
    Stderr,
}

pub fn default_log_path() -> PathBuf {
    std::env::temp_dir().join(LOG_FILE_NAME)
}

fn env_filter() -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER))
}

/// Install the global `tracing` subscriber
///
/// `RUST_LOG` overrides the default filter. A file target is truncated and
/// given a short header, then receives plain (non-ANSI) lines.
pub fn init(target: &LogTarget) -> Result<()> {
    match target {
        LogTarget::Off => Ok(()),
        LogTarget::Stderr => tracing_subscriber::fmt()
            .with_env_filter(env_filter())
            .with_writer(std::io::stderr)
            .try_init()
            .map_err(|e| anyhow!("installing log subscriber: {e}")),
        LogTarget::File(path) => {
            let mut file = OpenOptions::new()
                .create(true)
                .write(true)
                .truncate(true)
                .open(path)
                .with_context(|| format!("opening log file {}", path.display()))?;

            writeln!(file, "=== Action Tennis Debug Log ===")?;
            writeln!(file, "Session started: {:?}", SystemTime::now())?;
            writeln!(file, "To monitor: tail -f {}", path.display())?;
            writeln!(file, "========================================\n")?;

            tracing_subscriber::fmt()
                .with_env_filter(env_filter())
                .with_ansi(false)
                .with_writer(Mutex::new(file))
                .try_init()
                .map_err(|e| anyhow!("installing log subscriber: {e}"))
        }
    }
}
