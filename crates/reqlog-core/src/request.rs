//! Read-only request view and correlation context

use std::borrow::Cow;
use std::fmt;

/// The subset of an HTTP request that the request logger reads.
///
/// Implementations must expose data already held by the request; draining a
/// streaming body is the caller's job (see the middleware adapter).
pub trait RequestView {
    /// HTTP method, e.g. `GET`
    fn method(&self) -> &str;

    /// Request path without the query component
    fn path(&self) -> &str;

    /// All values stored under `name`, in order. Lookup is case-insensitive.
    /// Bytes that are not UTF-8 are replaced with U+FFFD.
    fn header_values(&self, name: &str) -> Vec<Cow<'_, str>>;

    /// Raw query string without the leading `?`, if the URI has one
    fn query(&self) -> Option<&str>;

    /// Full body decoded as UTF-8
    fn body_text(&self) -> Cow<'_, str>;
}

impl<B: AsRef<[u8]>> RequestView for http::Request<B> {
    fn method(&self) -> &str {
        http::Request::method(self).as_str()
    }

    fn path(&self) -> &str {
        self.uri().path()
    }

    fn header_values(&self, name: &str) -> Vec<Cow<'_, str>> {
        self.headers()
            .get_all(name)
            .iter()
            .map(|value| String::from_utf8_lossy(value.as_bytes()))
            .collect()
    }

    fn query(&self) -> Option<&str> {
        self.uri().query()
    }

    fn body_text(&self) -> Cow<'_, str> {
        String::from_utf8_lossy(self.body().as_ref())
    }
}

impl<T: RequestView + ?Sized> RequestView for &T {
    fn method(&self) -> &str {
        (**self).method()
    }

    fn path(&self) -> &str {
        (**self).path()
    }

    fn header_values(&self, name: &str) -> Vec<Cow<'_, str>> {
        (**self).header_values(name)
    }

    fn query(&self) -> Option<&str> {
        (**self).query()
    }

    fn body_text(&self) -> Cow<'_, str> {
        (**self).body_text()
    }
}

/// Correlation id assigned to a request, stored in its extensions
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CorrelationId(pub String);

impl CorrelationId {
    /// Borrow the id as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CorrelationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<CorrelationId> for String {
    fn from(id: CorrelationId) -> Self {
        id.0
    }
}
