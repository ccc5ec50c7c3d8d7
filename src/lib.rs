//! syscall-tally - per-syscall summaries of kernel syscall test suite logs
//!
//! This library parses the `key=value` result log written by the test
//! driver, groups results by syscall name, and renders a three-bucket
//! report (failed, not tested, passed).

pub mod cli;
pub mod diagnostics;
pub mod error;
pub mod lines;
pub mod pipeline;
pub mod record;
pub mod report;
pub mod stats;
pub mod status;

pub use error::{Result, TallyError};
pub use pipeline::{parse_log_file, parse_reader, ParsedLog, PipelineStats};
pub use record::{classify_line, parse_line, parse_syscall_name, ParsedLine, TestResult};
pub use stats::{aggregate, SyscallGroup, SyscallMap};
