// Logging setup plus conditional macros that are only active in debug builds.
//
// The terminal UI owns the screen, so records go to a file rather than stderr.

use std::fs::{self, File};
use std::io::{self, Write};
use std::path::PathBuf;

pub const LOG_FILE_NAME: &str = "wordle-heart.log";

#[cfg(debug_assertions)]
#[macro_export]
macro_rules! debug_log {
    ($($arg:tt)*) => {
        log::debug!($($arg)*);
    };
}

#[cfg(not(debug_assertions))]
#[macro_export]
macro_rules! debug_log {
    ($($arg:tt)*) => {{}};
}

#[cfg(debug_assertions)]
#[macro_export]
macro_rules! info_log {
    ($($arg:tt)*) => {
        log::info!($($arg)*);
    };
}

#[cfg(not(debug_assertions))]
#[macro_export]
macro_rules! info_log {
    ($($arg:tt)*) => {{}};
}

/// `<cache dir>/wordle-heart/wordle-heart.log`, if the platform has a cache dir.
#[must_use]
pub fn default_log_path() -> Option<PathBuf> {
    dirs::cache_dir().map(|dir| dir.join("wordle-heart").join(LOG_FILE_NAME))
}

/// Route `log` records to `path` (or the default location), filtered by
/// `RUST_LOG` and defaulting to `info`. Returns the file in use.
///
/// # Errors
/// Fails if no path is available or the file cannot be created.
pub fn init(path: Option<PathBuf>) -> io::Result<PathBuf> {
    let path = path.or_else(default_log_path).ok_or_else(|| {
        io::Error::new(io::ErrorKind::NotFound, "no cache directory for the log file")
    })?;
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let file = File::create(&path)?;

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .target(env_logger::Target::Pipe(Box::new(file)))
        .format(|buf, record| {
            writeln!(
                buf,
                "{} [{}] {}: {}",
                chrono::Local::now().format("%Y-%m-%d %H:%M:%S%.3f"),
                record.level(),
                record.target(),
                record.args()
            )
        })
        .try_init()
        .map_err(io::Error::other)?;

    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_log_path_file_name() {
        if let Some(path) = default_log_path() {
            assert!(path.ends_with(PathBuf::from("wordle-heart").join(LOG_FILE_NAME)));
        }
    }
}
