//! File logging. The terminal belongs to the UI, so traces go to a file.

use std::fs::{self, OpenOptions};
use std::path::PathBuf;
use std::sync::Mutex;

use directories::ProjectDirs;
use tracing_subscriber::EnvFilter;

/// Environment variable holding the log filter.
const LOG_ENV: &str = "MISTVEIL_LOG";

/// Install the global subscriber writing to `mistveil.log` in the data
/// directory. Returns the log path, or `None` if logging is unavailable.
pub fn init() -> Option<PathBuf> {
    let dirs = ProjectDirs::from("com", "mistveil", "mistveil")?;
    let dir = dirs.data_dir();
    fs::create_dir_all(dir).ok()?;

    let path = dir.join("mistveil.log");
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&path)
        .ok()?;

    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .try_init()
        .ok()?;

    Some(path)
}
