//! Log sinks
//!
//! A [`LogSink`] is the logging backend the request logger writes to. Calls are
//! fire-and-forget; implementations must tolerate concurrent callers.

use parking_lot::Mutex;
use std::fmt;
use std::sync::Arc;

/// `tracing` target used by [`TracingSink`]
pub const TARGET: &str = "reqlog";

/// Destination for informational log lines
pub trait LogSink: Send + Sync + fmt::Debug {
    /// Record one informational message
    fn log_info(&self, message: &str);
}

impl<T: LogSink + ?Sized> LogSink for Arc<T> {
    fn log_info(&self, message: &str) {
        (**self).log_info(message)
    }
}

/// Sink that forwards every message as a `tracing` INFO event under [`TARGET`]
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingSink;

impl TracingSink {
    /// Create a tracing-backed sink
    pub fn new() -> Self {
        Self
    }
}

impl LogSink for TracingSink {
    fn log_info(&self, message: &str) {
        tracing::info!(target: TARGET, "{}", message);
    }
}

/// Sink that keeps every message in memory, in arrival order
#[derive(Debug, Default)]
pub struct MemorySink {
    messages: Mutex<Vec<String>>,
}

impl MemorySink {
    /// Create an empty sink
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of the messages recorded so far
    pub fn messages(&self) -> Vec<String> {
        self.messages.lock().clone()
    }

    /// Number of recorded messages
    pub fn len(&self) -> usize {
        self.messages.lock().len()
    }

    /// Whether nothing has been recorded
    pub fn is_empty(&self) -> bool {
        self.messages.lock().is_empty()
    }

    /// Remove and return everything recorded so far
    pub fn drain(&self) -> Vec<String> {
        std::mem::take(&mut *self.messages.lock())
    }

    /// Forget all recorded messages
    pub fn clear(&self) {
        self.messages.lock().clear();
    }
}

impl LogSink for MemorySink {
    fn log_info(&self, message: &str) {
        self.messages.lock().push(message.to_string());
    }
}
