//! Error types for log summarization

use std::path::PathBuf;
use thiserror::Error;

/// Fatal errors: bad configuration or failed I/O
#[derive(Error, Debug)]
pub enum TallyError {
    #[error("LOG_FILE_PATH environment variable not defined (or pass --log-file)")]
    MissingLogPath,

    #[error("Invalid chunk size: {0} (must be >= 1)")]
    InvalidChunkSize(usize),

    #[error("Failed to read log file {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

pub type Result<T> = std::result::Result<T, TallyError>;
