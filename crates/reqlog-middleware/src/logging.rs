//! Request logging middleware
//!
//! [`RequestLogger`] assigns each request a correlation id and writes five
//! informational lines describing it to a [`LogSink`]:
//!
//! ```text
//! Request 0b6c1f2e-6f0d-4a8e-9f57-1f0f3c9d2a41
//! -> GET /test-path
//! -> Auth: N/A
//! -> Query: N/A
//! -> Body: N/A
//! ```
//!
//! Absent or empty fields are replaced with a placeholder, long values are
//! capped with [`truncate`].

use crate::request_id::IdGenerator;
use crate::truncate::{truncate, DEFAULT_MAX_LENGTH};
use async_trait::async_trait;
use bytes::Bytes;
use http::header::{HeaderName, HeaderValue};
use http::{Request, Response};
use http_body::Body as HttpBody;
use http_body_util::{BodyExt, Full};
use reqlog_core::{
    Body, CorrelationId, Error, LogSink, Middleware, Next, RequestView, Result, TracingSink,
};
use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use std::fmt;
use std::sync::Arc;
use tracing::{warn, Instrument};

/// Default cap for the request path
pub const DEFAULT_MAX_PATH_LENGTH: usize = 500;

/// Default placeholder for absent or empty fields
pub const DEFAULT_PLACEHOLDER: &str = "N/A";

/// Default header carrying the correlation id downstream
pub const DEFAULT_CORRELATION_HEADER: &str = "x-request-id";

/// Logging configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Maximum characters logged for auth, query, and body
    pub max_field_length: usize,
    /// Maximum characters logged for the path
    pub max_path_length: usize,
    /// Text logged in place of an absent or empty field
    pub placeholder: String,
    /// Header holding the credentials to log
    pub auth_header: String,
    /// Header used to pass the correlation id on (request and response).
    /// `None` keeps the id in request extensions only.
    pub correlation_header: Option<String>,
    /// Correlation id strategy
    pub id_generator: IdGenerator,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            max_field_length: DEFAULT_MAX_LENGTH,
            max_path_length: DEFAULT_MAX_PATH_LENGTH,
            placeholder: DEFAULT_PLACEHOLDER.to_string(),
            auth_header: "authorization".to_string(),
            correlation_header: Some(DEFAULT_CORRELATION_HEADER.to_string()),
            id_generator: IdGenerator::UuidV4,
        }
    }
}

/// Request logging middleware
///
/// Usable directly through [`RequestLogger::log_request`] with anything that
/// implements [`RequestView`], or as a [`Middleware`] in a chain.
#[derive(Clone)]
pub struct RequestLogger {
    sink: Arc<dyn LogSink>,
    config: LoggingConfig,
    correlation_header: Option<HeaderName>,
}

impl RequestLogger {
    /// Create a logger writing to `sink` with default config
    pub fn new(sink: impl LogSink + 'static) -> Self {
        Self::with_config(sink, LoggingConfig::default())
    }

    /// Create a logger writing to `sink` with custom config
    pub fn with_config(sink: impl LogSink + 'static, config: LoggingConfig) -> Self {
        Self::from_shared(Arc::new(sink), config)
    }

    /// Create a logger from an already shared sink
    pub fn from_shared(sink: Arc<dyn LogSink>, config: LoggingConfig) -> Self {
        let correlation_header = config.correlation_header.as_deref().map(|name| {
            HeaderName::from_bytes(name.as_bytes()).unwrap_or_else(|_| {
                warn!(header = name, "Invalid correlation header, using default");
                HeaderName::from_static(DEFAULT_CORRELATION_HEADER)
            })
        });

        Self {
            sink,
            config,
            correlation_header,
        }
    }

    /// Active configuration
    pub fn config(&self) -> &LoggingConfig {
        &self.config
    }

    /// Log `request` and return the correlation id assigned to it.
    ///
    /// Every field is read once. Nothing here fails: missing values are logged
    /// as the placeholder.
    pub fn log_request<R: RequestView + ?Sized>(&self, request: &R) -> String {
        let request_id = self.config.id_generator.generate();

        let method = request.method();
        let path = request.path();
        let auth = self.describe_auth(request);
        let query = self.describe_query(request);
        let body = request.body_text();
        let body = if body.is_empty() {
            Cow::Borrowed(self.config.placeholder.as_str())
        } else {
            body
        };

        let max = self.config.max_field_length;
        self.sink.log_info(&format!("Request {request_id}"));
        self.sink.log_info(&format!(
            "-> {} {}",
            method,
            truncate(path, self.config.max_path_length)
        ));
        self.sink.log_info(&format!("-> Auth: {auth}"));
        self.sink
            .log_info(&format!("-> Query: {}", truncate(&query, max)));
        self.sink.log_info(&format!("-> Body: {}", truncate(&body, max)));

        request_id
    }

    /// Drain a streaming body, then log the buffered request.
    ///
    /// Returns the correlation id with the request rebuilt around the
    /// collected bytes. A body that fails mid-stream is reported as
    /// [`Error::Body`] and nothing is logged.
    pub async fn buffer_and_log<B>(&self, req: Request<B>) -> Result<(String, Request<Bytes>)>
    where
        B: HttpBody,
        B::Error: fmt::Display,
    {
        let (parts, body) = req.into_parts();
        let bytes = body.collect().await.map_err(Error::body)?.to_bytes();
        let buffered = Request::from_parts(parts, bytes);

        let request_id = self.log_request(&buffered);
        Ok((request_id, buffered))
    }

    /// Auth header values, each capped on its own, joined with `,`
    fn describe_auth<R: RequestView + ?Sized>(&self, request: &R) -> String {
        let values: Vec<String> = request
            .header_values(&self.config.auth_header)
            .into_iter()
            .filter(|value| !value.is_empty())
            .map(|value| truncate(&value, self.config.max_field_length).into_owned())
            .collect();

        if values.is_empty() {
            truncate(&self.config.placeholder, self.config.max_field_length).into_owned()
        } else {
            values.join(",")
        }
    }

    /// Query string with its leading `?`
    fn describe_query<R: RequestView + ?Sized>(&self, request: &R) -> String {
        match request.query() {
            Some(query) if !query.is_empty() => format!("?{query}"),
            _ => self.config.placeholder.clone(),
        }
    }

    fn correlation_value(&self, request_id: &str) -> Option<(HeaderName, HeaderValue)> {
        let name = self.correlation_header.clone()?;
        match HeaderValue::from_str(request_id) {
            Ok(value) => Some((name, value)),
            Err(e) => {
                warn!(request_id, error = %e, "Correlation id is not a valid header value");
                None
            }
        }
    }
}

impl Default for RequestLogger {
    fn default() -> Self {
        Self::new(TracingSink::new())
    }
}

impl fmt::Debug for RequestLogger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RequestLogger")
            .field("sink", &self.sink)
            .field("max_field_length", &self.config.max_field_length)
            .field("max_path_length", &self.config.max_path_length)
            .field("correlation_header", &self.correlation_header)
            .finish()
    }
}

#[async_trait]
impl Middleware for RequestLogger {
    async fn call(&self, req: Request<Body>, next: Next) -> Result<Response<Body>> {
        // Buffer the whole body so it can be logged and still passed on
        let (request_id, buffered) = self.buffer_and_log(req).await?;
        let header = self.correlation_value(&request_id);

        let (mut parts, bytes) = buffered.into_parts();
        parts
            .extensions
            .insert(CorrelationId(request_id.clone()));
        if let Some((name, value)) = &header {
            parts.headers.insert(name.clone(), value.clone());
        }
        let req = Request::from_parts(parts, Full::new(bytes));

        let span = tracing::info_span!("request", request_id = %request_id);
        let mut response = next.run(req).instrument(span).await?;

        if let Some((name, value)) = header {
            response.headers_mut().insert(name, value);
        }

        Ok(response)
    }
}
