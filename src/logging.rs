use std::fs::{self, File};
use std::path::PathBuf;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

/// The environment variable that overrides the log filter.
const LOG_ENV: &str = "MINDGARDEN_LOG";

/// Set up logging into a file, since the terminal belongs to the garden while it runs.
///
/// Returns the path of the log file, or `None` if no log file could be created, in which case
/// logging is disabled.
pub fn init(verbose: bool) -> Option<PathBuf> {
    let path = log_path()?;
    let file = match File::create(&path) {
        Ok(file) => file,
        Err(e) => {
            eprintln!("[mindgarden] note: logging disabled, can't create {}: {e}", path.display());
            return None;
        }
    };

    let level = if verbose { tracing::Level::DEBUG } else { tracing::Level::INFO };
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(level.as_str()));
    tracing_subscriber::fmt().with_env_filter(filter).with_writer(Arc::new(file)).with_ansi(false).init();

    tracing::info!("starting mindgarden version {}", env!("CARGO_PKG_VERSION"));
    tracing::debug!("debug logging enabled");
    Some(path)
}

fn log_path() -> Option<PathBuf> {
    let dirs = directories::ProjectDirs::from("", "", "mindgarden")?;
    let dir = dirs.cache_dir();
    fs::create_dir_all(dir).ok()?;
    Some(dir.join("mindgarden.log"))
}
