//! Diagnostics sink for load-time warnings.
//!
//! Loading a lexicon can surface data-quality problems (duplicate synset ids,
//! unknown parts-of-speech, dangling relation targets) that are recorded and
//! skipped rather than aborting the load. The sink is passed explicitly
//! through the load and inversion passes; logging is fire-and-forget and
//! never affects control flow.

use std::io::Write;

use parking_lot::Mutex;

/// Severity of a diagnostic message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Severity {
    /// Unrecoverable faults, reported just before the load aborts.
    Error,
    /// Recoverable data-quality issues; the offending record is skipped.
    Warning,
    /// Progress notes.
    Info,
}

impl Severity {
    /// Short label used when rendering messages.
    pub fn label(&self) -> &'static str {
        match self {
            Severity::Error => "error",
            Severity::Warning => "warning",
            Severity::Info => "info",
        }
    }
}

/// A sink for diagnostic messages.
pub trait Diagnostics {
    /// Record one message. Must not fail; implementations swallow I/O errors.
    fn log(&self, message: &str, severity: Severity);
}

/// Diagnostics sink that writes to standard error.
#[derive(Debug, Default)]
pub struct StderrDiagnostics {
    /// Most verbose severity that is still written.
    max_severity: Option<Severity>,
}

impl StderrDiagnostics {
    /// Create a sink that writes every message.
    pub fn new() -> Self {
        StderrDiagnostics { max_severity: None }
    }

    /// Create a sink that writes messages up to the given severity
    /// (`Error` < `Warning` < `Info`).
    pub fn with_max_severity(max_severity: Severity) -> Self {
        StderrDiagnostics {
            max_severity: Some(max_severity),
        }
    }
}

impl Diagnostics for StderrDiagnostics {
    fn log(&self, message: &str, severity: Severity) {
        if let Some(max) = self.max_severity {
            if severity > max {
                return;
            }
        }
        let _ = writeln!(std::io::stderr(), "{}: {}", severity.label(), message);
    }
}

/// Diagnostics sink that buffers messages in memory.
///
/// Used by tests to assert on warnings produced during load and inversion.
#[derive(Debug, Default)]
pub struct MemoryDiagnostics {
    messages: Mutex<Vec<(Severity, String)>>,
}

impl MemoryDiagnostics {
    /// Create an empty sink.
    pub fn new() -> Self {
        MemoryDiagnostics {
            messages: Mutex::new(Vec::new()),
        }
    }

    /// All messages recorded so far, in order.
    pub fn messages(&self) -> Vec<(Severity, String)> {
        self.messages.lock().clone()
    }

    /// Messages recorded at the given severity.
    pub fn messages_with_severity(&self, severity: Severity) -> Vec<String> {
        self.messages
            .lock()
            .iter()
            .filter(|(s, _)| *s == severity)
            .map(|(_, m)| m.clone())
            .collect()
    }

    /// Drop all recorded messages.
    pub fn clear(&self) {
        self.messages.lock().clear();
    }
}

impl Diagnostics for MemoryDiagnostics {
    fn log(&self, message: &str, severity: Severity) {
        self.messages.lock().push((severity, message.to_string()));
    }
}

/// Diagnostics sink that discards everything.
#[derive(Debug, Default)]
pub struct NullDiagnostics;

impl Diagnostics for NullDiagnostics {
    fn log(&self, _message: &str, _severity: Severity) {}
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_sink_records_in_order() {
        let sink = MemoryDiagnostics::new();
        sink.log("first", Severity::Info);
        sink.log("second", Severity::Warning);

        let messages = sink.messages();
        assert_eq!(messages.len(), 2);
        assert_eq!(messages[0], (Severity::Info, "first".to_string()));
        assert_eq!(messages[1], (Severity::Warning, "second".to_string()));

        let warnings = sink.messages_with_severity(Severity::Warning);
        assert_eq!(warnings, vec!["second".to_string()]);
    }

    #[test]
    fn test_severity_ordering() {
        assert!(Severity::Error < Severity::Warning);
        assert!(Severity::Warning < Severity::Info);
    }

    #[test]
    fn test_null_sink() {
        // Nothing observable; just exercise the call.
        NullDiagnostics.log("ignored", Severity::Error);
    }
}
