//! Destination for runtime diagnostics.
//!
//! Errors are reported at exactly two places: the plugin dispatch boundary
//! (recoverable errors, execution continues) and the outermost
//! `interpret()` (fatal errors, the run stops). Both go through a
//! [`Reporter`] and are also emitted as `tracing` events.

use std::sync::Arc;

use parking_lot::Mutex;

use crate::errors::RuntimeError;

/// How serious a reported error was for the run.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Severity {
    /// One plugin call was abandoned; the run continued.
    Recovered,
    /// The run stopped.
    Fatal,
}

/// A reported diagnostic, as captured by [`Reporter::Buffer`].
#[derive(Clone, Debug, PartialEq)]
pub struct Report {
    pub severity: Severity,
    pub error: RuntimeError,
}

impl Report {
    /// Textual form, `error[E3002]: ...`.
    pub fn render(&self) -> String {
        let prefix = match self.severity {
            Severity::Recovered => "warning",
            Severity::Fatal => "error",
        };
        format!("{prefix}[{}]: {}", self.error.code(), self.error)
    }
}

pub enum Reporter {
    Stderr,
    Buffer(Mutex<Vec<Report>>),
    Silent,
}

impl Reporter {
    pub fn report(&self, severity: Severity, error: &RuntimeError) {
        match severity {
            Severity::Recovered => {
                tracing::warn!(code = error.code(), "recovered from plugin error: {error}");
            }
            Severity::Fatal => {
                tracing::error!(code = error.code(), "run aborted: {error}");
            }
        }
        let report = Report {
            severity,
            error: error.clone(),
        };
        match self {
            Reporter::Stderr => eprintln!("{}", report.render()),
            Reporter::Buffer(reports) => reports.lock().push(report),
            Reporter::Silent => {}
        }
    }

    /// Captured reports; empty for handlers that don't capture.
    pub fn reports(&self) -> Vec<Report> {
        match self {
            Reporter::Buffer(reports) => reports.lock().clone(),
            Reporter::Stderr | Reporter::Silent => Vec::new(),
        }
    }
}

/// Reporter shared by every interpreter of a run.
pub type SharedReporter = Arc<Reporter>;

pub fn stderr_reporter() -> SharedReporter {
    Arc::new(Reporter::Stderr)
}

pub fn buffer_reporter() -> SharedReporter {
    Arc::new(Reporter::Buffer(Mutex::new(Vec::new())))
}

pub fn silent_reporter() -> SharedReporter {
    Arc::new(Reporter::Silent)
}
