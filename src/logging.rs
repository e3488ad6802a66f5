use std::env;
use std::fs::{self, OpenOptions};
use std::path::{Path, PathBuf};

use env_logger::{Env, Target};

use crate::error::FriendifyError;

pub fn get_cache_dir() -> Result<PathBuf, FriendifyError> {
    // Check the XDG_CACHE_HOME environment variable first
    let base_cache_dir = match env::var_os("XDG_CACHE_HOME") {
        Some(dir) => PathBuf::from(dir),
        None => {
            let home = env::var_os("HOME")
                .ok_or_else(|| FriendifyError::Config("Home environment variable not set".to_string()))?;
            Path::new(&home).join(".cache")
        }
    };

    let app_cache_dir = base_cache_dir.join("friendify");

    // Create the directory if it doesn't exist
    fs::create_dir_all(&app_cache_dir)
        .map_err(|e| FriendifyError::Io(format!("Failed to create cache directory: {}", e)))?;

    Ok(app_cache_dir)
}

/// Route `log` output to a file: the terminal UI owns stdout and stderr.
///
/// Level comes from `RUST_LOG`, defaulting to `info`.
pub fn init() -> Result<PathBuf, FriendifyError> {
    let log_path = get_cache_dir()?.join("friendify.log");
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&log_path)?;

    env_logger::Builder::from_env(Env::default().default_filter_or("info"))
        .target(Target::Pipe(Box::new(file)))
        .try_init()
        .map_err(|e| FriendifyError::Config(format!("Failed to initialise logger: {}", e)))?;

    Ok(log_path)
}
