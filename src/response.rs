//! Response wrapper that keeps the transport metadata next to the decoded payload.
//!
//! The [`Response`] type carries everything the transport reported about the
//! answer (status, reason phrase, headers, final URL) together with the decoded
//! body under `data`.

use http::{HeaderMap, StatusCode};
use std::time::Duration;
use url::Url;

/// A successful (ok) HTTP response.
///
/// # Type Parameters
///
/// * `T` - The type of the decoded payload
///
/// # Examples
///
/// ```no_run
/// use fetchkit::Client;
/// use serde::Deserialize;
///
/// #[derive(Deserialize)]
/// struct User {
///     id: u64,
///     name: String,
/// }
///
/// # async fn example() -> Result<(), fetchkit::Error> {
/// let client = Client::builder()
///     .base_url("https://api.example.com")?
///     .build()?;
///
/// let response = client.get::<User>("/users/123").await?;
///
/// println!("User: {}", response.data.name);
/// println!("Status: {} {}", response.status, response.status_text);
/// println!("Request took {:?}", response.latency);
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct Response<T> {
    /// The decoded payload. For 204 answers this is decoded from JSON `null`.
    pub data: T,

    /// The HTTP status code.
    pub status: StatusCode,

    /// The canonical reason phrase for `status`, or the numeric code when there is none.
    pub status_text: String,

    /// `true` for 2xx statuses. Always `true` on values returned by the client.
    pub ok: bool,

    /// The response headers.
    pub headers: HeaderMap,

    /// The final URL, after any redirects.
    pub url: Url,

    /// Whether the transport followed at least one redirect.
    pub redirected: bool,

    /// The raw response body. Empty for 204 answers.
    pub raw_body: String,

    /// Time from sending the request until the body was read.
    pub latency: Duration,
}

impl<T> Response<T> {
    /// Maps the payload to a different type, keeping the metadata.
    ///
    /// # Examples
    ///
    /// ```no_run
    /// # async fn example() -> Result<(), fetchkit::Error> {
    /// # let client = fetchkit::Client::builder().base_url("https://api.example.com")?.build()?;
    /// let response = client.get::<Vec<u64>>("/ids").await?;
    /// let count = response.map(|ids| ids.len());
    /// println!("{} ids", count.data);
    /// # Ok(())
    /// # }
    /// ```
    pub fn map<U, F>(self, f: F) -> Response<U>
    where
        F: FnOnce(T) -> U,
    {
        Response {
            data: f(self.data),
            status: self.status,
            status_text: self.status_text,
            ok: self.ok,
            headers: self.headers,
            url: self.url,
            redirected: self.redirected,
            raw_body: self.raw_body,
            latency: self.latency,
        }
    }

    /// Returns a header value by name, if present and valid UTF-8.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name)?.to_str().ok()
    }
}

impl<T> AsRef<T> for Response<T> {
    fn as_ref(&self) -> &T {
        &self.data
    }
}

impl<T> std::ops::Deref for Response<T> {
    type Target = T;

    fn deref(&self) -> &Self::Target {
        &self.data
    }
}
