//! Middleware chain builder
//!
//! This module provides a builder pattern for constructing middleware chains.

use crate::logging::{LoggingConfig, RequestLogger};
use reqlog_core::{LogSink, Middleware};
use std::sync::Arc;

/// Middleware chain builder
#[derive(Debug, Default)]
pub struct MiddlewareBuilder {
    middlewares: Vec<Arc<dyn Middleware>>,
}

impl MiddlewareBuilder {
    /// Create a new middleware builder
    #[must_use]
    pub fn new() -> Self {
        Self {
            middlewares: Vec::new(),
        }
    }

    /// Add a request logger writing to `sink`
    #[must_use]
    pub fn with_request_logger(mut self, sink: impl LogSink + 'static) -> Self {
        self.middlewares.push(Arc::new(RequestLogger::new(sink)));
        self
    }

    /// Add a request logger with custom configuration
    #[must_use]
    pub fn with_request_logger_config(
        mut self,
        sink: impl LogSink + 'static,
        config: LoggingConfig,
    ) -> Self {
        self.middlewares
            .push(Arc::new(RequestLogger::with_config(sink, config)));
        self
    }

    /// Add custom middleware
    #[must_use]
    pub fn with_middleware(mut self, middleware: Arc<dyn Middleware>) -> Self {
        self.middlewares.push(middleware);
        self
    }

    /// Build the middleware chain
    ///
    /// Returns an `Arc<[Arc<dyn Middleware>]>` for efficient sharing.
    #[must_use]
    pub fn build(self) -> Arc<[Arc<dyn Middleware>]> {
        self.middlewares.into()
    }

    /// Get the number of middlewares in the chain
    #[must_use]
    pub fn len(&self) -> usize {
        self.middlewares.len()
    }

    /// Check if the chain is empty
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.middlewares.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use reqlog_core::{MemorySink, TracingSink};

    #[test]
    fn test_builder_empty() {
        let chain = MiddlewareBuilder::new().build();
        assert!(chain.is_empty());
    }

    #[test]
    fn test_builder_single_middleware() {
        let chain = MiddlewareBuilder::new()
            .with_request_logger(TracingSink::new())
            .build();
        assert_eq!(chain.len(), 1);
    }

    #[test]
    fn test_builder_custom_config() {
        let config = LoggingConfig {
            max_field_length: 20,
            ..Default::default()
        };

        let builder = MiddlewareBuilder::new()
            .with_request_logger_config(MemorySink::new(), config)
            .with_middleware(Arc::new(RequestLogger::default()));

        assert_eq!(builder.len(), 2);
        assert!(!builder.is_empty());
    }
}
