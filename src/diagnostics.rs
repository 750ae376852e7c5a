//! Leveled diagnostics.
//!
//! Components receive a [`DiagnosticSink`] at construction instead of
//! reaching for a global logger. [`LogSink`] forwards to the `log` facade;
//! [`CollectingSink`] keeps events in memory.

use std::error::Error;
use std::fmt;

/// Severity of a diagnostic event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Severity {
    Debug,
    Info,
    Warn,
    Error,
    Fatal,
}

impl Severity {
    /// Maps onto the `log` facade. `log` has no fatal level, so fatal events
    /// are logged as errors.
    pub fn log_level(self) -> log::Level {
        match self {
            Severity::Debug => log::Level::Debug,
            Severity::Info => log::Level::Info,
            Severity::Warn => log::Level::Warn,
            Severity::Error | Severity::Fatal => log::Level::Error,
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Severity::Debug => "DEBUG",
            Severity::Info => "INFO",
            Severity::Warn => "WARN",
            Severity::Error => "ERROR",
            Severity::Fatal => "FATAL",
        };
        f.write_str(name)
    }
}

/// Receiver of diagnostic events.
///
/// Emitting must never fail from the caller's point of view.
pub trait DiagnosticSink {
    fn emit(&mut self, severity: Severity, message: &str, cause: Option<&dyn Error>);

    fn debug(&mut self, message: &str) {
        self.emit(Severity::Debug, message, None);
    }

    fn info(&mut self, message: &str) {
        self.emit(Severity::Info, message, None);
    }

    fn warn(&mut self, message: &str, cause: Option<&dyn Error>) {
        self.emit(Severity::Warn, message, cause);
    }

    fn error(&mut self, message: &str, cause: Option<&dyn Error>) {
        self.emit(Severity::Error, message, cause);
    }

    fn fatal(&mut self, message: &str, cause: Option<&dyn Error>) {
        self.emit(Severity::Fatal, message, cause);
    }
}

impl<S: DiagnosticSink + ?Sized> DiagnosticSink for &mut S {
    fn emit(&mut self, severity: Severity, message: &str, cause: Option<&dyn Error>) {
        (**self).emit(severity, message, cause);
    }
}

/// Forwards diagnostics to whatever `log` backend is installed.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogSink;

impl DiagnosticSink for LogSink {
    fn emit(&mut self, severity: Severity, message: &str, cause: Option<&dyn Error>) {
        let prefix = if severity == Severity::Fatal { "FATAL " } else { "" };
        match cause {
            Some(cause) => log::log!(severity.log_level(), "{}{}: {}", prefix, message, cause),
            None => log::log!(severity.log_level(), "{}{}", prefix, message),
        }
    }
}

/// One recorded diagnostic.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    pub severity: Severity,
    pub message: String,
    /// Rendered cause, if one was attached.
    pub cause: Option<String>,
}

/// Keeps every event in emission order.
#[derive(Debug, Default)]
pub struct CollectingSink {
    events: Vec<Diagnostic>,
}

impl CollectingSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> &[Diagnostic] {
        &self.events
    }

    /// Events at exactly the given severity.
    pub fn at(&self, severity: Severity) -> impl Iterator<Item = &Diagnostic> {
        self.events.iter().filter(move |d| d.severity == severity)
    }

    pub fn count(&self, severity: Severity) -> usize {
        self.at(severity).count()
    }
}

impl DiagnosticSink for CollectingSink {
    fn emit(&mut self, severity: Severity, message: &str, cause: Option<&dyn Error>) {
        self.events.push(Diagnostic {
            severity,
            message: message.to_string(),
            cause: cause.map(ToString::to_string),
        });
    }
}
