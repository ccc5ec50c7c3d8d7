//! Exit status decoding for syscall test results
//!
//! The test harness reports each test's exit status as a bitmask. Zero means
//! the test passed; every other outcome is an independent bit, so a single
//! test can be failed, broken and warned at the same time.

/// Test passed flag
pub const TPASS: i64 = 0;
/// Test failed flag
pub const TFAIL: i64 = 1;
/// Test broken flag
pub const TBROK: i64 = 2;
/// Test warning flag
pub const TWARN: i64 = 4;
/// Test information flag
pub const TINFO: i64 = 16;
/// Test not appropriate for configuration flag
pub const TCONF: i64 = 32;

/// Six independent classifications decoded from an exit status
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StatusFlags {
    pub passed: bool,
    pub failed: bool,
    pub broken: bool,
    pub warning: bool,
    pub info: bool,
    pub not_appropriate_config: bool,
}

impl StatusFlags {
    /// Decode an exit status bitmask
    ///
    /// A missing status (`None`) decodes to all flags false, including
    /// `passed`.
    pub fn from_exit_status(exit_status: Option<i64>) -> Self {
        match exit_status {
            Some(status) => Self {
                passed: status == TPASS,
                failed: has_flag(status, TFAIL),
                broken: has_flag(status, TBROK),
                warning: has_flag(status, TWARN),
                info: has_flag(status, TINFO),
                not_appropriate_config: has_flag(status, TCONF),
            },
            None => Self::default(),
        }
    }

    /// True when no flag is set
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

fn has_flag(status: i64, flag: i64) -> bool {
    status & flag == flag
}
