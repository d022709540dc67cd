//! Request and response hooks.
//!
//! An interceptor receives a value and returns the value to use in its place.
//! A hook that was never configured behaves as [`Identity`].
//!
//! Closures of the right shape implement the traits directly:
//!
//! ```
//! use fetchkit::{Client, Request};
//! use http::{header::AUTHORIZATION, HeaderValue};
//!
//! # fn example() -> Result<(), fetchkit::Error> {
//! let client = Client::builder()
//!     .base_url("https://api.example.com")?
//!     .request_interceptor(|mut request: Request| {
//!         request
//!             .headers
//!             .insert(AUTHORIZATION, HeaderValue::from_static("Bearer secret-token"));
//!         request
//!     })
//!     .build()?;
//! # Ok(())
//! # }
//! ```

use crate::{Request, Response};
use serde_json::Value;
use std::fmt;
use std::sync::Arc;

/// Rewrites an outgoing request before it is sent.
pub trait RequestInterceptor: Send + Sync {
    /// Returns the request that will actually be sent.
    fn intercept(&self, request: Request) -> Request;
}

/// Rewrites an assembled response before it is handed to the caller.
///
/// The payload is still a JSON tree at this point (`Null` for 204 answers).
/// It is converted into the caller's type after the hook returns.
pub trait ResponseInterceptor: Send + Sync {
    /// Returns the response the caller will see.
    fn intercept(&self, response: Response<Value>) -> Response<Value>;
}

impl<F> RequestInterceptor for F
where
    F: Fn(Request) -> Request + Send + Sync,
{
    fn intercept(&self, request: Request) -> Request {
        self(request)
    }
}

impl<F> ResponseInterceptor for F
where
    F: Fn(Response<Value>) -> Response<Value> + Send + Sync,
{
    fn intercept(&self, response: Response<Value>) -> Response<Value> {
        self(response)
    }
}

/// The no-op hook.
#[derive(Debug, Clone, Copy, Default)]
pub struct Identity;

impl RequestInterceptor for Identity {
    fn intercept(&self, request: Request) -> Request {
        request
    }
}

impl ResponseInterceptor for Identity {
    fn intercept(&self, response: Response<Value>) -> Response<Value> {
        response
    }
}

/// The pair of hooks a client runs around every call.
#[derive(Clone)]
pub struct Interceptors {
    pub(crate) request: Arc<dyn RequestInterceptor>,
    pub(crate) response: Arc<dyn ResponseInterceptor>,
}

impl Interceptors {
    /// Both hooks set to [`Identity`].
    pub fn new() -> Self {
        Self {
            request: Arc::new(Identity),
            response: Arc::new(Identity),
        }
    }

    /// Replaces the request hook.
    pub fn with_request(mut self, interceptor: impl RequestInterceptor + 'static) -> Self {
        self.request = Arc::new(interceptor);
        self
    }

    /// Replaces the response hook.
    pub fn with_response(mut self, interceptor: impl ResponseInterceptor + 'static) -> Self {
        self.response = Arc::new(interceptor);
        self
    }
}

impl Default for Interceptors {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for Interceptors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Interceptors").finish_non_exhaustive()
    }
}
