use std::fs::{self, File};
use std::io;
use std::path::{Path, PathBuf};

use log::LevelFilter;
use simplelog::{Config, WriteLogger};

use crate::error::AppError;

const APP_DIR_NAME: &str = "bonus-snake";
const LOG_FILE_NAME: &str = "bonus-snake.log";

/// Returns the platform-correct default log file path.
#[must_use]
pub fn default_log_path() -> Option<PathBuf> {
    dirs::data_local_dir().map(|base| base.join(APP_DIR_NAME).join(LOG_FILE_NAME))
}

/// Installs a file logger. The terminal is in raw mode while the game runs,
/// so log output never goes to stdout or stderr.
pub fn init(path: &Path, level: LevelFilter) -> Result<(), AppError> {
    let file = open_log_file(path)?;
    WriteLogger::init(level, Config::default(), file)?;

    log::info!("logging to {}", path.display());
    Ok(())
}

/// Creates (truncating) the log file and any missing parent directories.
fn open_log_file(path: &Path) -> Result<File, AppError> {
    let with_path = |source: io::Error| AppError::LogFile {
        path: path.to_path_buf(),
        source,
    };

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(with_path)?;
    }

    File::create(path).map_err(with_path)
}
