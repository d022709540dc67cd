//! Error types for HTTP calls.
//!
//! Only one kind of failure is built by this crate from a response that
//! arrived: [`ClientError`], for answers whose status is not ok. Transport and
//! decode failures are passed through with their original source attached.

use http::{HeaderMap, StatusCode};
use serde_json::Value;
use std::fmt;

/// An answer whose status was not ok, with its decoded JSON error body.
///
/// # Type Parameters
///
/// * `E` - The type the error body is decoded into
#[derive(Debug, Clone)]
pub struct ClientError<E = Value> {
    /// `Fetch failed (<status text>)`.
    pub message: String,
    /// The HTTP status code.
    pub status: StatusCode,
    /// The canonical reason phrase, or the numeric code when there is none.
    pub status_text: String,
    /// The response headers.
    pub headers: HeaderMap,
    /// The decoded error body.
    pub body: E,
}

impl<E> ClientError<E> {
    pub(crate) fn new(status: StatusCode, headers: HeaderMap, body: E) -> Self {
        let status_text = status_text(status);
        Self {
            message: format!("Fetch failed ({})", status_text),
            status,
            status_text,
            headers,
            body,
        }
    }
}

/// The canonical reason phrase for `status`, or its numeric code when it has none.
pub(crate) fn status_text(status: StatusCode) -> String {
    match status.canonical_reason() {
        Some(reason) => reason.to_string(),
        None => status.as_str().to_string(),
    }
}

impl<E> fmt::Display for ClientError<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

impl<E: fmt::Debug> std::error::Error for ClientError<E> {}

/// The main error type for HTTP calls.
///
/// # Examples
///
/// ```no_run
/// use fetchkit::{Client, Error};
///
/// # async fn example() -> Result<(), Error> {
/// let client = Client::builder()
///     .base_url("https://api.example.com")?
///     .build()?;
///
/// match client.get::<serde_json::Value>("/endpoint").await {
///     Ok(response) => println!("Success: {:?}", response.data),
///     Err(Error::Http(err)) => {
///         eprintln!("{} (status {}): {}", err.message, err.status, err.body);
///     }
///     Err(Error::Decode { raw_response, source, .. }) => {
///         eprintln!("Body was not JSON: {} ({})", raw_response, source);
///     }
///     Err(e) => eprintln!("Other error: {}", e),
/// }
/// # Ok(())
/// # }
/// ```
#[derive(thiserror::Error, Debug)]
pub enum Error<E: fmt::Debug = Value> {
    /// The transport failed (connection refused, DNS lookup failed, etc.).
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    /// A redirect was answered while the call used [`RedirectPolicy::Error`](crate::RedirectPolicy::Error).
    #[error("Redirect rejected (status {status})")]
    Redirect {
        /// The 3xx status code.
        status: StatusCode,
        /// The `Location` header, if the server sent a readable one.
        location: Option<String>,
    },

    /// The response body (success or error) was not valid JSON for the expected type.
    #[error("Failed to decode response (status {status}): {source}")]
    Decode {
        /// The HTTP status code.
        status: StatusCode,
        /// The raw response body.
        raw_response: String,
        /// The underlying serde error.
        #[source]
        source: serde_json::Error,
    },

    /// The server answered with a status that is not ok.
    #[error("{0}")]
    Http(Box<ClientError<E>>),

    /// The request body could not be encoded as JSON.
    #[error("Failed to encode request body: {0}")]
    Encode(#[source] serde_json::Error),

    /// The base URL and path did not form a valid URL.
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// Invalid client or request configuration, such as a bad header.
    #[error("Configuration error: {0}")]
    Configuration(String),
}

impl<E: fmt::Debug> Error<E> {
    /// Returns the HTTP status code if the error came from a response.
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            Error::Http(err) => Some(err.status),
            Error::Decode { status, .. } => Some(*status),
            Error::Redirect { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Returns the raw body of a response that failed to decode.
    pub fn raw_response(&self) -> Option<&str> {
        match self {
            Error::Decode { raw_response, .. } => Some(raw_response),
            _ => None,
        }
    }

    /// Returns the [`ClientError`] if the server answered with a status that is not ok.
    pub fn client_error(&self) -> Option<&ClientError<E>> {
        match self {
            Error::Http(err) => Some(&**err),
            _ => None,
        }
    }
}

impl<E: fmt::Debug> From<ClientError<E>> for Error<E> {
    fn from(err: ClientError<E>) -> Self {
        Error::Http(Box::new(err))
    }
}

/// A specialized `Result` type for HTTP calls.
///
/// `E` is the type error bodies are decoded into.
pub type Result<T, E = Value> = std::result::Result<T, Error<E>>;
