//! Non-fatal parse warnings and the sinks that receive them

use thiserror::Error;

/// A recoverable problem found while parsing a log line
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseWarning {
    /// A token did not split into exactly one key and one value
    #[error("failed to read key value '{token}' in line '{line}'")]
    MalformedToken { line: String, token: String },

    /// The line carried no usable `tag`, so it was dropped
    #[error("failed to find tag in line '{line}'")]
    MissingTag { line: String },

    /// The line had no `core` key; treated as no core dump
    #[error("missing core field for test '{test}', assuming no core dump")]
    MissingCore { test: String },
}

/// Destination for parse warnings
///
/// The parser reports through this trait instead of logging directly, so
/// callers decide where warnings end up.
pub trait Diagnostics {
    fn warn(&mut self, warning: ParseWarning);
}

/// Forwards warnings to `tracing` at WARN level
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingDiagnostics;

impl Diagnostics for TracingDiagnostics {
    fn warn(&mut self, warning: ParseWarning) {
        tracing::warn!("{}", warning);
    }
}

/// Collects warnings in memory
impl Diagnostics for Vec<ParseWarning> {
    fn warn(&mut self, warning: ParseWarning) {
        self.push(warning);
    }
}

/// Discards warnings
#[derive(Debug, Default, Clone, Copy)]
pub struct IgnoreDiagnostics;

impl Diagnostics for IgnoreDiagnostics {
    fn warn(&mut self, _warning: ParseWarning) {}
}

impl<D: Diagnostics + ?Sized> Diagnostics for &mut D {
    fn warn(&mut self, warning: ParseWarning) {
        (**self).warn(warning);
    }
}
