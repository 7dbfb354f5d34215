//! # reqlog Middleware
//!
//! Request logging for HTTP services:
//! - Correlation id per request (UUID v4 or v7)
//! - Method, path, credentials, query, and body logged to a pluggable sink
//! - Length capping of logged values
//! - Middleware adapter that carries the id downstream and onto the response

#![forbid(unsafe_code)]
#![warn(
    missing_docs,
    missing_debug_implementations,
    rust_2018_idioms,
    unreachable_pub
)]

pub mod builder;
pub mod logging;
pub mod request_id;
pub mod truncate;

pub use builder::MiddlewareBuilder;
pub use logging::{LoggingConfig, RequestLogger};
pub use request_id::IdGenerator;
pub use truncate::truncate;

// Re-export core middleware types from reqlog-core
pub use reqlog_core::middleware::{Middleware, Next};

/// Re-export commonly used types
pub mod prelude {
    pub use crate::builder::MiddlewareBuilder;
    pub use crate::logging::{LoggingConfig, RequestLogger};
    pub use crate::request_id::IdGenerator;
    pub use crate::truncate::truncate;
    pub use reqlog_core::prelude::*;
}
