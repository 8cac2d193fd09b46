//! Log sink trait and implementations.
//!
//! The fetch routine writes all of its diagnostics and every forwarded log
//! line through a sink supplied by the caller, keeping the routine free of
//! ambient logging state.

use parking_lot::RwLock;

/// Severity of a sink message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogLevel {
    /// Informational output, including forwarded log lines.
    Info,
    /// Degraded-but-recovered conditions.
    Warning,
    /// Failures that ended a retrieval.
    Error,
}

/// Trait for the caller-supplied logging interface.
pub trait LogSink: Send + Sync {
    /// Emits an informational message.
    fn info(&self, message: &str);

    /// Emits a warning.
    fn warning(&self, message: &str);

    /// Emits an error.
    fn error(&self, message: &str);
}

/// A sink that discards all messages.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoOpLogSink;

impl LogSink for NoOpLogSink {
    fn info(&self, _message: &str) {}
    fn warning(&self, _message: &str) {}
    fn error(&self, _message: &str) {}
}

/// A sink that routes messages to the tracing framework.
///
/// Used as the default when no sink is configured.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingLogSink;

impl LogSink for TracingLogSink {
    fn info(&self, message: &str) {
        tracing::info!("{message}");
    }

    fn warning(&self, message: &str) {
        tracing::warn!("{message}");
    }

    fn error(&self, message: &str) {
        tracing::error!("{message}");
    }
}

/// A collecting sink for testing purposes.
#[derive(Debug, Default)]
pub struct CollectingLogSink {
    entries: RwLock<Vec<(LogLevel, String)>>,
}

impl CollectingLogSink {
    /// Creates a new collecting sink.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns all collected entries.
    #[must_use]
    pub fn entries(&self) -> Vec<(LogLevel, String)> {
        self.entries.read().clone()
    }

    /// Returns all collected messages regardless of level.
    #[must_use]
    pub fn messages(&self) -> Vec<String> {
        self.entries
            .read()
            .iter()
            .map(|(_, message)| message.clone())
            .collect()
    }

    /// Returns messages collected at a given level.
    #[must_use]
    pub fn messages_at(&self, level: LogLevel) -> Vec<String> {
        self.entries
            .read()
            .iter()
            .filter(|(l, _)| *l == level)
            .map(|(_, message)| message.clone())
            .collect()
    }

    /// Returns true if any collected message contains the fragment.
    #[must_use]
    pub fn contains(&self, fragment: &str) -> bool {
        self.entries
            .read()
            .iter()
            .any(|(_, message)| message.contains(fragment))
    }

    /// Returns the number of collected entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.read().len()
    }

    /// Returns true if nothing has been collected.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.read().is_empty()
    }

    /// Clears all collected entries.
    pub fn clear(&self) {
        self.entries.write().clear();
    }
}

impl LogSink for CollectingLogSink {
    fn info(&self, message: &str) {
        self.entries
            .write()
            .push((LogLevel::Info, message.to_string()));
    }

    fn warning(&self, message: &str) {
        self.entries
            .write()
            .push((LogLevel::Warning, message.to_string()));
    }

    fn error(&self, message: &str) {
        self.entries
            .write()
            .push((LogLevel::Error, message.to_string()));
    }
}
