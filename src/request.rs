//! Outgoing request types.

use crate::{
    config::{CacheMode, RedirectPolicy, TransportOptions},
    query::{IntoQueryValue, Query},
    Error, Result,
};
use http::{HeaderMap, HeaderName, HeaderValue, Method};
use serde::Serialize;
use serde_json::Value;

/// A single outgoing request, before client defaults are applied.
///
/// This is what a [`RequestInterceptor`](crate::RequestInterceptor) sees and
/// returns. Client default headers and the base URL are applied after the
/// interceptor has run.
#[derive(Debug, Clone, PartialEq)]
pub struct Request {
    /// The HTTP method.
    pub method: Method,

    /// The request path, appended verbatim to the client's base URL.
    pub path: String,

    /// The JSON body, if any.
    pub body: Option<Value>,

    /// Query parameters.
    pub query: Query,

    /// Per-call headers. These win over the client's default headers.
    pub headers: HeaderMap,

    /// Per-call transport options. These win over the client's defaults.
    pub transport: TransportOptions,
}

impl Request {
    /// Creates a bodiless request with the given method and path.
    pub fn new(method: Method, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            body: None,
            query: Query::new(),
            headers: HeaderMap::new(),
            transport: TransportOptions::default(),
        }
    }

    /// Builds a request from a method, a path, an optional body and call options.
    pub fn from_options(
        method: Method,
        path: impl Into<String>,
        body: Option<Value>,
        options: RequestOptions,
    ) -> Self {
        Self {
            method,
            path: path.into(),
            body,
            query: options.query,
            headers: options.headers,
            transport: options.transport,
        }
    }

    /// Serializes `body` into the request.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Encode`] if `body` cannot be represented as JSON.
    pub fn with_body<B: Serialize + ?Sized>(mut self, body: &B) -> Result<Self> {
        self.body = Some(serde_json::to_value(body).map_err(Error::Encode)?);
        Ok(self)
    }

    /// Adds a header to the request.
    ///
    /// # Errors
    ///
    /// Returns an error if the header name or value is invalid.
    pub fn with_header(mut self, name: impl AsRef<str>, value: impl AsRef<str>) -> Result<Self> {
        let (name, value) = parse_header(name.as_ref(), value.as_ref())?;
        self.headers.insert(name, value);
        Ok(self)
    }

    /// Sets a query parameter. `None` values are dropped from the query string.
    pub fn with_query_param(mut self, key: impl Into<String>, value: impl IntoQueryValue) -> Self {
        self.query.insert(key, value);
        self
    }
}

impl Default for Request {
    fn default() -> Self {
        Self::new(Method::GET, "")
    }
}

/// Per-call options accepted by the `*_with` verb methods.
///
/// The method and path are fixed by the verb and never part of the options.
///
/// # Examples
///
/// ```
/// use fetchkit::{CacheMode, RequestOptions};
///
/// # fn example() -> Result<(), fetchkit::Error> {
/// let options = RequestOptions::new()
///     .query("page", 2)
///     .query("filter", None::<&str>)
///     .header("X-Trace", "1")?
///     .cache(CacheMode::NoStore);
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RequestOptions {
    /// Query parameters.
    pub query: Query,

    /// Header overrides.
    pub headers: HeaderMap,

    /// Transport passthrough options.
    pub transport: TransportOptions,
}

impl RequestOptions {
    /// Creates empty options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets a query parameter. `None` values are dropped from the query string.
    pub fn query(mut self, key: impl Into<String>, value: impl IntoQueryValue) -> Self {
        self.query.insert(key, value);
        self
    }

    /// Replaces all query parameters.
    pub fn with_query(mut self, query: Query) -> Self {
        self.query = query;
        self
    }

    /// Adds a header override.
    ///
    /// # Errors
    ///
    /// Returns an error if the header name or value is invalid.
    pub fn header(mut self, name: impl AsRef<str>, value: impl AsRef<str>) -> Result<Self> {
        let (name, value) = parse_header(name.as_ref(), value.as_ref())?;
        self.headers.insert(name, value);
        Ok(self)
    }

    /// Sets the cache-mode hint for this call.
    pub fn cache(mut self, mode: CacheMode) -> Self {
        self.transport.cache = Some(mode);
        self
    }

    /// Sets the redirect policy for this call.
    pub fn redirect(mut self, policy: RedirectPolicy) -> Self {
        self.transport.redirect = Some(policy);
        self
    }
}

pub(crate) fn parse_header(name: &str, value: &str) -> Result<(HeaderName, HeaderValue)> {
    let name = HeaderName::try_from(name)
        .map_err(|e| Error::Configuration(format!("Invalid header name: {}", e)))?;
    let value = HeaderValue::try_from(value)
        .map_err(|e| Error::Configuration(format!("Invalid header value: {}", e)))?;
    Ok((name, value))
}
