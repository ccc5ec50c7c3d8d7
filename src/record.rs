//! Parsing of single log lines into test results
//!
//! A data line is a sequence of space separated `key=value` tokens:
//!
//! ```text
//! tag=read01 stime=1700000000 dur=0 exit=exited stat=0 core=no cu=0 cs=1
//! ```
//!
//! Lines starting with `startup` are administrative and carry no result.

use crate::diagnostics::{Diagnostics, ParseWarning};
use crate::status::StatusFlags;
use std::collections::HashMap;

/// Prefix of administrative lines that carry no test result
pub const STARTUP_PREFIX: &str = "startup";

/// One parsed log line
#[derive(Debug, Clone, PartialEq)]
pub struct TestResult {
    /// Syscall family, derived from `test`
    pub syscall: String,
    /// Raw test tag (e.g. `read01`)
    pub test: String,
    /// Start time in seconds (`stime`)
    pub start_time: Option<f64>,
    /// Duration in seconds (`dur`)
    pub duration: Option<f64>,
    /// Why the test stopped (`exit`), e.g. `exited` or `signaled`
    pub test_stop_reason: Option<String>,
    /// Exit status bitmask (`stat`)
    pub exit_status: Option<i64>,
    /// Whether the test dumped core (`core`)
    pub core_dumped: bool,
    /// Cumulative user time (`cu`)
    pub cumulative_user_time: Option<f64>,
    /// Cumulative system time (`cs`)
    pub cumulative_system_time: Option<f64>,
    /// Flags decoded from `exit_status`
    pub status: StatusFlags,
}

/// Parse a number, returning `None` for anything that is not one
pub fn parse_number(value: &str) -> Option<f64> {
    value.trim().parse::<f64>().ok().filter(|n| !n.is_nan())
}

/// Parse an exit status bitmask; only finite integral values are accepted
fn parse_exit_status(value: &str) -> Option<i64> {
    parse_number(value)
        .filter(|n| n.is_finite() && n.fract() == 0.0)
        .map(|n| n as i64)
}

/// Derive the syscall name from a test tag
///
/// The name is everything before the first ASCII digit (`read01` -> `read`).
/// A tag without digits, or one that starts with a digit, is returned
/// unchanged.
pub fn parse_syscall_name(tag: &str) -> &str {
    match tag.find(|c: char| c.is_ascii_digit()) {
        Some(0) | None => tag,
        Some(index) => &tag[..index],
    }
}

/// What a single log line turned into
#[derive(Debug, Clone, PartialEq)]
pub enum ParsedLine {
    /// A usable test result
    Record(TestResult),
    /// A `startup` line, skipped without warning
    Administrative,
    /// A line with no usable `tag`
    Rejected,
}

impl ParsedLine {
    /// The result, if the line produced one
    pub fn into_record(self) -> Option<TestResult> {
        match self {
            ParsedLine::Record(result) => Some(result),
            ParsedLine::Administrative | ParsedLine::Rejected => None,
        }
    }
}

/// Parse one log line
///
/// Returns `None` for administrative lines and for lines without a `tag`.
/// Malformed tokens are reported to `diagnostics` and skipped; the rest of
/// the line is still used.
pub fn parse_line<D>(line: &str, diagnostics: &mut D) -> Option<TestResult>
where
    D: Diagnostics + ?Sized,
{
    classify_line(line, diagnostics).into_record()
}

/// Parse one log line, keeping the reason when no result is produced
pub fn classify_line<D>(line: &str, diagnostics: &mut D) -> ParsedLine
where
    D: Diagnostics + ?Sized,
{
    let trimmed = line.trim();
    if trimmed.starts_with(STARTUP_PREFIX) {
        return ParsedLine::Administrative;
    }

    let mut fields: HashMap<&str, &str> = HashMap::new();
    for token in trimmed.split(' ') {
        match token.split_once('=') {
            Some((key, value)) if !value.contains('=') => {
                fields.insert(key, value.trim());
            }
            _ => diagnostics.warn(ParseWarning::MalformedToken {
                line: line.to_string(),
                token: token.to_string(),
            }),
        }
    }

    let tag = match fields.get("tag") {
        Some(tag) if !tag.is_empty() => *tag,
        _ => {
            diagnostics.warn(ParseWarning::MissingTag {
                line: line.to_string(),
            });
            return ParsedLine::Rejected;
        }
    };

    let core_dumped = match fields.get("core") {
        Some(core) => core.trim().eq_ignore_ascii_case("yes"),
        None => {
            diagnostics.warn(ParseWarning::MissingCore {
                test: tag.to_string(),
            });
            false
        }
    };

    let number = |key: &str| fields.get(key).and_then(|v| parse_number(v));
    let exit_status = fields.get("stat").and_then(|v| parse_exit_status(v));

    ParsedLine::Record(TestResult {
        syscall: parse_syscall_name(tag).to_string(),
        test: tag.to_string(),
        start_time: number("stime"),
        duration: number("dur"),
        test_stop_reason: fields.get("exit").map(|v| v.to_string()),
        exit_status,
        core_dumped,
        cumulative_user_time: number("cu"),
        cumulative_system_time: number("cs"),
        status: StatusFlags::from_exit_status(exit_status),
    })
}
