//! Per-syscall aggregation of test results
//!
//! Results are grouped by their derived syscall name. Groups keep first-seen
//! order so the report lists syscalls in the order the log introduced them.

use crate::record::TestResult;
use crate::status::StatusFlags;
use indexmap::IndexMap;

/// Running totals of each status flag across a group's tests
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StatusCounters {
    pub passed: u64,
    pub failed: u64,
    pub broken: u64,
    pub warning: u64,
    pub info: u64,
    pub not_appropriate_config: u64,
}

impl StatusCounters {
    /// Add one result's flags to the totals
    pub fn add(&mut self, flags: &StatusFlags) {
        self.passed += u64::from(flags.passed);
        self.failed += u64::from(flags.failed);
        self.broken += u64::from(flags.broken);
        self.warning += u64::from(flags.warning);
        self.info += u64::from(flags.info);
        self.not_appropriate_config += u64::from(flags.not_appropriate_config);
    }
}

/// All results sharing one syscall name
#[derive(Debug, Clone, PartialEq)]
pub struct SyscallGroup {
    pub name: String,
    /// Results in log order
    pub tests: Vec<TestResult>,
    pub status_counters: StatusCounters,
}

impl SyscallGroup {
    /// Create an empty group
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            tests: Vec::new(),
            status_counters: StatusCounters::default(),
        }
    }

    fn push(&mut self, result: TestResult) {
        self.status_counters.add(&result.status);
        self.tests.push(result);
    }
}

/// Syscall name to group, iterated in insertion order
#[derive(Debug, Default, Clone)]
pub struct SyscallMap {
    groups: IndexMap<String, SyscallGroup>,
}

impl SyscallMap {
    /// Create an empty map
    pub fn new() -> Self {
        Self::default()
    }

    /// Fold one result into its group, creating the group on first sight
    ///
    /// Returns `false` and leaves the map untouched when `result` is `None`.
    pub fn aggregate(&mut self, result: Option<TestResult>) -> bool {
        let Some(result) = result else {
            return false;
        };

        tracing::trace!(syscall = %result.syscall, test = %result.test, "aggregating result");
        self.groups
            .entry(result.syscall.clone())
            .or_insert_with(|| SyscallGroup::new(result.syscall.as_str()))
            .push(result);
        true
    }

    /// Look up a group by syscall name
    pub fn get(&self, name: &str) -> Option<&SyscallGroup> {
        self.groups.get(name)
    }

    /// Number of distinct syscalls
    pub fn len(&self) -> usize {
        self.groups.len()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    /// Groups in first-seen order
    pub fn groups(&self) -> impl Iterator<Item = &SyscallGroup> {
        self.groups.values()
    }

    /// (name, group) pairs in first-seen order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &SyscallGroup)> {
        self.groups.iter().map(|(name, group)| (name.as_str(), group))
    }

    /// Total number of results across all groups
    pub fn total_tests(&self) -> usize {
        self.groups.values().map(|g| g.tests.len()).sum()
    }
}

/// Fold `result` into `map`
///
/// A no-op returning `false` when either side is absent, so callers can feed
/// the parser's output straight in without checking for skipped lines.
pub fn aggregate(map: Option<&mut SyscallMap>, result: Option<TestResult>) -> bool {
    match map {
        Some(map) => map.aggregate(result),
        None => false,
    }
}
