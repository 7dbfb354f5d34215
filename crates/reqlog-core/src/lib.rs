//! # reqlog Core
//!
//! Core types, traits, and error handling for reqlog.
//!
//! This crate provides the seams the request logger is built on:
//! - [`RequestView`], the read-only request capability
//! - [`LogSink`], the logging backend capability
//! - [`Middleware`] and [`Next`], the request/response chain
//! - Error types

#![forbid(unsafe_code)]
#![warn(
    missing_docs,
    missing_debug_implementations,
    rust_2018_idioms,
    unreachable_pub
)]

pub mod error;
pub mod middleware;
pub mod request;
pub mod sink;

pub use error::{Error, Result};
pub use middleware::{Body, HandlerFn, HandlerFuture, Middleware, Next};
pub use request::{CorrelationId, RequestView};
pub use sink::{LogSink, MemorySink, TracingSink};

// Re-export commonly used HTTP types
pub use bytes::Bytes;
pub use http::{Method, Request, Response, StatusCode};

/// Re-export commonly used types
pub mod prelude {
    pub use crate::error::{Error, Result};
    pub use crate::middleware::{Body, Middleware, Next};
    pub use crate::request::{CorrelationId, RequestView};
    pub use crate::sink::{LogSink, MemorySink, TracingSink};
}
