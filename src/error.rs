use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Failures of the terminal front end. The game core itself cannot fail.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("terminal I/O failed: {0}")]
    Io(#[from] io::Error),

    #[error("cannot open log file {path}: {source}")]
    LogFile {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("logger already installed: {0}")]
    Logger(#[from] log::SetLoggerError),

    #[error("no default log location on this platform; pass --log-file")]
    NoLogDir,
}
