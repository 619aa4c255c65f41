use std::fs::{self, File, OpenOptions};
use std::io;
use std::path::PathBuf;
use std::sync::Mutex;

use tracing_subscriber::EnvFilter;

const APP_DIR_NAME: &str = "snake-charmer";
const LOG_FILE_NAME: &str = "snake-charmer.log";

/// Where log output is written.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum LogTarget {
    /// Standard error; used when no terminal UI owns the screen.
    Stderr,
    /// Append to [`log_path`] so the alternate screen stays clean.
    File,
}

/// Returns the platform-correct log file path.
#[must_use]
pub fn log_path() -> PathBuf {
    let mut base = dirs::data_local_dir().unwrap_or_else(|| PathBuf::from("."));
    base.push(APP_DIR_NAME);
    base.push(LOG_FILE_NAME);
    base
}

/// Installs the global tracing subscriber. Filter comes from `RUST_LOG`, default `info`.
pub fn init(target: LogTarget) -> io::Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .compact();

    let result = match target {
        LogTarget::Stderr => builder.with_writer(io::stderr).try_init(),
        LogTarget::File => builder
            .with_ansi(false)
            .with_writer(Mutex::new(open_log_file()?))
            .try_init(),
    };

    result.map_err(io::Error::other)
}

fn open_log_file() -> io::Result<File> {
    let path = log_path();
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }

    OpenOptions::new().create(true).append(true).open(path)
}

#[cfg(test)]
mod tests {
    use super::log_path;

    #[test]
    fn log_path_ends_in_app_directory() {
        let path = log_path();

        assert!(path.ends_with("snake-charmer/snake-charmer.log"));
    }
}
