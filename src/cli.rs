//! CLI argument parsing for syscall-tally

use crate::error::{Result, TallyError};
use crate::lines::DEFAULT_CHUNK_SIZE;
use clap::Parser;
use std::path::PathBuf;

/// Environment variable naming the log file
pub const LOG_FILE_ENV: &str = "LOG_FILE_PATH";

#[derive(Parser, Debug)]
#[command(name = "syscall-tally")]
#[command(version)]
#[command(about = "Summarize syscall test suite logs by syscall", long_about = None)]
pub struct Cli {
    /// Syscall test log to summarize
    #[arg(long = "log-file", value_name = "PATH", env = LOG_FILE_ENV)]
    pub log_file: Option<PathBuf>,

    /// Bytes read from the log per chunk
    #[arg(long = "chunk-size", value_name = "BYTES", default_value_t = DEFAULT_CHUNK_SIZE)]
    pub chunk_size: usize,

    /// Enable trace-level diagnostics on stderr
    #[arg(long)]
    pub debug: bool,
}

impl Cli {
    /// The configured log path, or a configuration error if none was given
    pub fn log_path(&self) -> Result<&PathBuf> {
        self.log_file.as_ref().ok_or(TallyError::MissingLogPath)
    }

    /// Validate settings before any processing starts
    pub fn validate(&self) -> Result<()> {
        if self.chunk_size == 0 {
            return Err(TallyError::InvalidChunkSize(self.chunk_size));
        }
        self.log_path()?;
        Ok(())
    }
}
