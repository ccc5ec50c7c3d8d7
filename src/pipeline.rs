//! Single-pass log processing: stream -> lines -> results -> syscall map
//!
//! Each line is parsed and aggregated before the next chunk is read, so the
//! per-group test lists follow log order.

use crate::diagnostics::Diagnostics;
use crate::error::{Result, TallyError};
use crate::lines::lines_from_reader;
use crate::record::{classify_line, ParsedLine};
use crate::stats::SyscallMap;
use std::fs::File;
use std::io::{self, Read};
use std::path::Path;

/// Line counts gathered while processing one log
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PipelineStats {
    /// Lines produced by the segmenter
    pub lines: u64,
    /// Lines that became results
    pub records: u64,
    /// Administrative `startup` lines
    pub startup_lines: u64,
    /// Lines dropped because no result could be built
    pub rejected_lines: u64,
}

/// Aggregated results of one log
#[derive(Debug, Default)]
pub struct ParsedLog {
    pub syscalls: SyscallMap,
    pub stats: PipelineStats,
}

/// Process every line of `reader`
///
/// Parse problems go to `diagnostics`; only read errors abort.
pub fn parse_reader<R, D>(
    reader: R,
    chunk_size: usize,
    diagnostics: &mut D,
) -> io::Result<ParsedLog>
where
    R: Read,
    D: Diagnostics + ?Sized,
{
    let mut parsed = ParsedLog::default();

    for line in lines_from_reader(reader, chunk_size) {
        let line = line?;
        parsed.stats.lines += 1;

        match classify_line(&line, diagnostics) {
            ParsedLine::Record(result) => {
                parsed.stats.records += 1;
                parsed.syscalls.aggregate(Some(result));
            }
            ParsedLine::Administrative => parsed.stats.startup_lines += 1,
            ParsedLine::Rejected => parsed.stats.rejected_lines += 1,
        }
    }

    Ok(parsed)
}

/// Process the log file at `path`
///
/// The file handle is scoped to this call and closed on every return path.
pub fn parse_log_file<D>(
    path: &Path,
    chunk_size: usize,
    diagnostics: &mut D,
) -> Result<ParsedLog>
where
    D: Diagnostics + ?Sized,
{
    if chunk_size == 0 {
        return Err(TallyError::InvalidChunkSize(chunk_size));
    }

    let io_error = |source: io::Error| TallyError::Io {
        path: path.to_path_buf(),
        source,
    };

    tracing::debug!("Reading syscall test log {}", path.display());
    let file = File::open(path).map_err(io_error)?;
    let parsed = parse_reader(file, chunk_size, diagnostics).map_err(io_error)?;

    tracing::debug!(
        lines = parsed.stats.lines,
        records = parsed.stats.records,
        startup = parsed.stats.startup_lines,
        rejected = parsed.stats.rejected_lines,
        syscalls = parsed.syscalls.len(),
        "Finished processing log"
    );
    Ok(parsed)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diagnostics::{IgnoreDiagnostics, ParseWarning};
    use std::io::Write;

    const LOG: &str = "\
startup='Thu Jan  1 00:00:00 1970'
tag=read01 stime=1 dur=0 exit=exited stat=0 core=no cu=0 cs=1
tag=read02 stime=1 dur=0 exit=exited stat=1 core=no cu=0 cs=1
bogus line
tag=open01 stime=2 dur=1 exit=exited stat=32 core=no cu=1 cs=0";

    #[test]
    fn test_parse_reader_end_to_end() {
        let mut warnings: Vec<ParseWarning> = Vec::new();
        let parsed = parse_reader(LOG.as_bytes(), 16, &mut warnings).unwrap();

        assert_eq!(
            parsed.stats,
            PipelineStats {
                lines: 5,
                records: 3,
                startup_lines: 1,
                rejected_lines: 1,
            }
        );
        assert_eq!(parsed.syscalls.len(), 2);

        let read = parsed.syscalls.get("read").unwrap();
        assert_eq!(read.status_counters.passed, 1);
        assert_eq!(read.status_counters.failed, 1);

        let open = parsed.syscalls.get("open").unwrap();
        assert_eq!(open.status_counters.not_appropriate_config, 1);

        // "bogus line": two malformed tokens, then no tag
        assert_eq!(warnings.len(), 3);
        assert!(matches!(warnings[2], ParseWarning::MissingTag { .. }));
    }

    #[test]
    fn test_line_outcomes_counted_from_parser() {
        let log = "  startup indented\nstartupX=1\ntag=read01 stat=0 core=no\nstat=1 core=no\n";
        let mut warnings: Vec<ParseWarning> = Vec::new();
        let parsed = parse_reader(log.as_bytes(), 8, &mut warnings).unwrap();

        assert_eq!(
            parsed.stats,
            PipelineStats {
                lines: 4,
                records: 1,
                startup_lines: 2,
                rejected_lines: 1,
            }
        );
        assert_eq!(warnings.len(), 1);
        assert_eq!(parsed.syscalls.total_tests(), 1);
    }

    #[test]
    fn test_chunk_size_does_not_change_result() {
        let mut sink = IgnoreDiagnostics;
        let whole = parse_reader(LOG.as_bytes(), 4096, &mut sink).unwrap();
        for chunk_size in [1, 2, 3, 7, 64] {
            let chunked = parse_reader(LOG.as_bytes(), chunk_size, &mut sink).unwrap();
            assert_eq!(chunked.stats, whole.stats);
            assert_eq!(chunked.syscalls.total_tests(), whole.syscalls.total_tests());
            assert_eq!(chunked.syscalls.get("read"), whole.syscalls.get("read"));
        }
    }

    #[test]
    fn test_parse_log_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(LOG.as_bytes()).unwrap();

        let mut warnings: Vec<ParseWarning> = Vec::new();
        let parsed = parse_log_file(file.path(), 8192, &mut warnings).unwrap();
        assert_eq!(parsed.syscalls.len(), 2);
        assert_eq!(parsed.syscalls.total_tests(), 3);
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("does-not-exist.log");
        let err = parse_log_file(&path, 8192, &mut IgnoreDiagnostics).unwrap_err();
        match err {
            TallyError::Io { path: p, .. } => assert_eq!(p, path),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_zero_chunk_size_rejected() {
        let err =
            parse_log_file(Path::new("unused.log"), 0, &mut IgnoreDiagnostics).unwrap_err();
        assert!(matches!(err, TallyError::InvalidChunkSize(0)));
    }

    struct FailingReader {
        served: bool,
    }

    impl Read for FailingReader {
        fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
            if self.served {
                return Err(io::Error::other("device error"));
            }
            self.served = true;
            let data = b"tag=read01 stat=0 core=no\n";
            buf[..data.len()].copy_from_slice(data);
            Ok(data.len())
        }
    }

    #[test]
    fn test_read_error_aborts() {
        let reader = FailingReader { served: false };
        let err = parse_reader(reader, 64, &mut IgnoreDiagnostics).unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::Other);
    }
}
