//! Categorized summary report
//!
//! Every syscall lands in exactly one bucket, decided by its passed and
//! failed counters:
//!
//! | passed | failed | bucket     |
//! |--------|--------|------------|
//! | 0      | > 0    | Failed     |
//! | 0      | 0      | Not tested |
//! | > 0    | any    | Passed     |

use crate::stats::{StatusCounters, SyscallGroup, SyscallMap};
use std::io::{self, Write};

/// Column width of the syscall name in group lines
pub const NAME_WIDTH: usize = 25;

/// Report section a syscall belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Bucket {
    /// Never passed and failed at least once
    Failed,
    /// Never passed and never failed
    NotTested,
    /// Passed at least once
    Passed,
}

impl Bucket {
    /// Buckets in report order
    pub const ALL: [Bucket; 3] = [Bucket::Failed, Bucket::NotTested, Bucket::Passed];

    /// Classify a group by its counters
    pub fn classify(counters: &StatusCounters) -> Self {
        match (counters.passed, counters.failed) {
            (0, 0) => Bucket::NotTested,
            (0, _) => Bucket::Failed,
            _ => Bucket::Passed,
        }
    }

    /// Section heading
    pub fn heading(&self) -> &'static str {
        match self {
            Bucket::Failed => "Failed (never passed and failed at least once):",
            Bucket::NotTested => "Not tested (did not pass or failed once):",
            Bucket::Passed => "Passed (at least once):",
        }
    }
}

/// Format one group line
pub fn format_group(group: &SyscallGroup) -> String {
    let counters = &group.status_counters;
    format!(
        "    {:<width$}(Passed: {:>2} Failed: {:>2} Broken: {:>2})",
        group.name,
        counters.passed,
        counters.failed,
        counters.broken,
        width = NAME_WIDTH
    )
}

/// Write the full report to `out`
pub fn render_report<W: Write>(syscalls: &SyscallMap, out: &mut W) -> io::Result<()> {
    writeln!(out, "Syscalls test summary:")?;
    writeln!(out)?;

    for bucket in Bucket::ALL {
        writeln!(out, "  {}", bucket.heading())?;
        for group in syscalls
            .groups()
            .filter(|g| Bucket::classify(&g.status_counters) == bucket)
        {
            writeln!(out, "{}", format_group(group))?;
        }
        writeln!(out)?;
    }

    writeln!(out, "Total of syscalls tested: {}", syscalls.len())?;
    Ok(())
}

/// Render the report into a string
pub fn report_to_string(syscalls: &SyscallMap) -> String {
    let mut buffer = Vec::new();
    render_report(syscalls, &mut buffer).expect("writing to a Vec cannot fail");
    String::from_utf8_lossy(&buffer).into_owned()
}

/// Print the report to stdout
pub fn print_report(syscalls: &SyscallMap) -> io::Result<()> {
    let stdout = io::stdout();
    let mut out = stdout.lock();
    render_report(syscalls, &mut out)?;
    out.flush()
}
