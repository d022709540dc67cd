//! HTTP client with JSON bodies, default headers and interceptors.
//!
//! The [`Client`] type is the main entry point for making HTTP requests.
//! Use [`ClientBuilder`] or [`ClientConfig`] to configure and create clients.

use crate::{
    config::{CacheMode, ClientConfig, RedirectPolicy, TransportOptions},
    error::{status_text, ClientError},
    interceptor::{RequestInterceptor, ResponseInterceptor},
    request::{parse_header, Request, RequestOptions},
    Error, Response, Result,
};
use http::{header, HeaderMap, HeaderValue, Method, StatusCode};
use serde::{de::DeserializeOwned, Serialize};
use serde_json::Value;
use std::fmt::Debug;
use std::sync::Arc;
use std::time::Instant;
use url::Url;

/// An HTTP client for JSON APIs.
///
/// The client is designed to be reused across multiple requests and shared
/// between tasks: cloning it is cheap, and its configuration never changes
/// after construction.
///
/// # Examples
///
/// ```no_run
/// use fetchkit::{Client, Response};
/// use serde::{Deserialize, Serialize};
///
/// #[derive(Serialize)]
/// struct CreateUser {
///     name: String,
///     email: String,
/// }
///
/// #[derive(Deserialize)]
/// struct User {
///     id: u64,
///     name: String,
///     email: String,
/// }
///
/// # async fn example() -> Result<(), fetchkit::Error> {
/// let client = Client::builder()
///     .base_url("https://api.example.com")?
///     .default_header("User-Agent", "my-app/1.0")?
///     .build()?;
///
/// // GET request
/// let user: Response<User> = client.get("/users/123").await?;
/// println!("User: {}", user.data.name);
///
/// // POST request
/// let new_user = CreateUser {
///     name: "Alice".to_string(),
///     email: "alice@example.com".to_string(),
/// };
/// let created: Response<User> = client.post("/users", &new_user).await?;
/// println!("Created user with ID: {}", created.data.id);
/// # Ok(())
/// # }
/// ```
#[derive(Clone)]
pub struct Client {
    inner: Arc<ClientInner>,
}

struct ClientInner {
    http_client: reqwest::Client,
    no_redirect_client: reqwest::Client,
    base_url: String,
    default_headers: HeaderMap,
    transport: TransportOptions,
    request_interceptor: Arc<dyn RequestInterceptor>,
    response_interceptor: Arc<dyn ResponseInterceptor>,
}

impl Client {
    /// Creates a client from a configuration.
    ///
    /// Default headers start from `Content-Type: application/json`; headers in
    /// `config` are laid over it.
    ///
    /// # Errors
    ///
    /// Returns an error if the base URL or a header is invalid, or if the
    /// underlying HTTP client cannot be built.
    pub fn new(config: ClientConfig) -> Result<Self> {
        let transport = config.transport();
        let base_url = config.base_url.unwrap_or_default();
        if !base_url.is_empty() {
            Url::parse(&base_url)?;
        }

        let mut default_headers = HeaderMap::new();
        default_headers.insert(
            header::CONTENT_TYPE,
            HeaderValue::from_static("application/json"),
        );
        for (name, value) in &config.headers {
            let (name, value) = parse_header(name, value)?;
            default_headers.insert(name, value);
        }

        let http_client = reqwest::Client::builder().build().map_err(|e| {
            Error::Configuration(format!("Failed to build HTTP client: {}", e))
        })?;
        let no_redirect_client = reqwest::Client::builder()
            .redirect(reqwest::redirect::Policy::none())
            .build()
            .map_err(|e| Error::Configuration(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Client {
            inner: Arc::new(ClientInner {
                http_client,
                no_redirect_client,
                base_url,
                default_headers,
                transport,
                request_interceptor: config.interceptors.request,
                response_interceptor: config.interceptors.response,
            }),
        })
    }

    /// Creates a new `ClientBuilder` for configuring a client.
    ///
    /// # Examples
    ///
    /// ```
    /// use fetchkit::Client;
    ///
    /// # fn example() -> Result<(), fetchkit::Error> {
    /// let client = Client::builder()
    ///     .base_url("https://api.example.com")?
    ///     .build()?;
    /// # Ok(())
    /// # }
    /// ```
    pub fn builder() -> ClientBuilder {
        ClientBuilder::new()
    }

    /// Sends a request and decodes the answer.
    ///
    /// The request interceptor runs first, on the request exactly as given.
    /// The base URL, query string, default headers and transport defaults are
    /// applied to whatever it returns. Answers with a status that is not ok
    /// become [`Error::Http`], with the JSON error body decoded into `E`.
    /// Otherwise the response interceptor sees the assembled response before
    /// its payload is decoded into `T`.
    ///
    /// # Type Parameters
    ///
    /// * `T` - The success payload type
    /// * `E` - The error body type
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use fetchkit::{Client, Error, Request};
    /// use http::Method;
    /// use serde::Deserialize;
    ///
    /// #[derive(Debug, Deserialize)]
    /// struct ApiError { error: String }
    ///
    /// #[derive(Deserialize)]
    /// struct SearchResults { results: Vec<String> }
    ///
    /// # async fn example() -> Result<(), Error<ApiError>> {
    /// let client = Client::builder()
    ///     .base_url("https://api.example.com")
    ///     .map_err(|_| Error::Configuration("bad base url".into()))?
    ///     .build()
    ///     .map_err(|_| Error::Configuration("client".into()))?;
    ///
    /// let request = Request::new(Method::GET, "/search").with_query_param("q", "rust");
    ///
    /// match client.send::<SearchResults, ApiError>(request).await {
    ///     Ok(response) => println!("Found {} results", response.data.results.len()),
    ///     Err(Error::Http(err)) => eprintln!("API said: {}", err.body.error),
    ///     Err(e) => return Err(e),
    /// }
    /// # Ok(())
    /// # }
    /// ```
    pub async fn send<T, E>(&self, request: Request) -> Result<Response<T>, E>
    where
        T: DeserializeOwned,
        E: DeserializeOwned + Debug,
    {
        let request = self.inner.request_interceptor.intercept(request);

        let start_time = Instant::now();
        let (response, requested_url) = self.execute_request::<E>(&request).await?;
        let response = self
            .parse_response::<E>(response, &requested_url, start_time)
            .await?;
        let mut response = self.inner.response_interceptor.intercept(response);

        let data = std::mem::take(&mut response.data);
        match serde_json::from_value::<T>(data) {
            Ok(data) => Ok(response.map(|_| data)),
            Err(source) => {
                tracing::error!(
                    error = %source,
                    status = response.status.as_u16(),
                    "Failed to decode response payload"
                );
                Err(Error::Decode {
                    status: response.status,
                    raw_response: response.raw_body,
                    source,
                })
            }
        }
    }

    /// Builds the URL, body and headers for `request` and sends it.
    ///
    /// Returns the raw response together with the URL that was requested.
    async fn execute_request<E: Debug>(
        &self,
        request: &Request,
    ) -> Result<(reqwest::Response, Url), E> {
        let mut url = Url::parse(&format!("{}{}", self.inner.base_url, request.path))?;
        request.query.append_to(&mut url);

        let body = request
            .body
            .as_ref()
            .map(serde_json::to_vec)
            .transpose()
            .map_err(Error::Encode)?;

        let mut headers = self.inner.default_headers.clone();
        headers.extend(request.headers.clone());

        let transport = self.inner.transport.merge(request.transport);
        transport
            .cache
            .unwrap_or(CacheMode::Default)
            .apply(&mut headers);
        let redirect = transport.redirect.unwrap_or_default();

        tracing::debug!(
            method = %request.method,
            url = %url,
            "Executing HTTP request"
        );

        let http_client = match redirect {
            RedirectPolicy::Follow => &self.inner.http_client,
            RedirectPolicy::Error => &self.inner.no_redirect_client,
        };
        let mut builder = http_client
            .request(request.method.clone(), url.clone())
            .headers(headers);
        if let Some(body) = body {
            builder = builder.body(body);
        }

        let response = builder.send().await?;

        if redirect == RedirectPolicy::Error && response.status().is_redirection() {
            let location = response
                .headers()
                .get(header::LOCATION)
                .and_then(|v| v.to_str().ok())
                .map(str::to_string);
            tracing::warn!(
                status = response.status().as_u16(),
                location = ?location,
                "Redirect rejected"
            );
            return Err(Error::Redirect {
                status: response.status(),
                location,
            });
        }

        Ok((response, url))
    }

    /// Turns a raw response into a JSON `Response`, or a [`ClientError`] when not ok.
    async fn parse_response<E>(
        &self,
        response: reqwest::Response,
        requested_url: &Url,
        start_time: Instant,
    ) -> Result<Response<Value>, E>
    where
        E: DeserializeOwned + Debug,
    {
        let status = response.status();
        let headers = response.headers().clone();
        let url = response.url().clone();

        tracing::info!(
            status = status.as_u16(),
            latency_ms = start_time.elapsed().as_millis(),
            "Received HTTP response"
        );

        if !status.is_success() {
            let raw_response = response.text().await?;

            if status.is_client_error() {
                tracing::error!(
                    status = status.as_u16(),
                    response = %raw_response,
                    "Client error (4xx)"
                );
            } else if status.is_server_error() {
                tracing::warn!(
                    status = status.as_u16(),
                    response = %raw_response,
                    "Server error (5xx)"
                );
            }

            let body = decode::<E, E>(status, &raw_response)?;
            return Err(ClientError::new(status, headers, body).into());
        }

        let (data, raw_body) = if status == StatusCode::NO_CONTENT {
            (Value::Null, String::new())
        } else {
            let raw_body = response.text().await?;
            (decode::<Value, E>(status, &raw_body)?, raw_body)
        };

        Ok(Response {
            data,
            status,
            status_text: status_text(status),
            ok: true,
            headers,
            redirected: url != *requested_url,
            url,
            raw_body,
            latency: start_time.elapsed(),
        })
    }

    /// Makes a GET request to the specified path.
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use fetchkit::Client;
    /// use serde::Deserialize;
    ///
    /// #[derive(Deserialize)]
    /// struct User { name: String }
    ///
    /// # async fn example() -> Result<(), fetchkit::Error> {
    /// let client = Client::builder()
    ///     .base_url("https://api.example.com")?
    ///     .build()?;
    ///
    /// let user: fetchkit::Response<User> = client.get("/users/123").await?;
    /// println!("User: {}", user.data.name);
    /// # Ok(())
    /// # }
    /// ```
    pub async fn get<T>(&self, path: impl Into<String>) -> Result<Response<T>>
    where
        T: DeserializeOwned,
    {
        self.get_with(path, RequestOptions::default()).await
    }

    /// Makes a GET request with per-call options.
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use fetchkit::{Client, RequestOptions};
    ///
    /// # async fn example() -> Result<(), fetchkit::Error> {
    /// # let client = Client::builder().base_url("https://api.example.com")?.build()?;
    /// let options = RequestOptions::new()
    ///     .query("page", 2)
    ///     .query("tag", None::<&str>);
    /// let users = client.get_with::<Vec<serde_json::Value>>("/users", options).await?;
    /// # Ok(())
    /// # }
    /// ```
    pub async fn get_with<T>(
        &self,
        path: impl Into<String>,
        options: RequestOptions,
    ) -> Result<Response<T>>
    where
        T: DeserializeOwned,
    {
        let request = Request::from_options(Method::GET, path, None, options);
        self.send(request).await
    }

    /// Makes a POST request to the specified path with a JSON body.
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use fetchkit::Client;
    /// use serde::{Deserialize, Serialize};
    ///
    /// #[derive(Serialize)]
    /// struct CreateUser { name: String }
    ///
    /// #[derive(Deserialize)]
    /// struct User { id: u64, name: String }
    ///
    /// # async fn example() -> Result<(), fetchkit::Error> {
    /// let client = Client::builder()
    ///     .base_url("https://api.example.com")?
    ///     .build()?;
    ///
    /// let request = CreateUser { name: "Alice".to_string() };
    /// let user: fetchkit::Response<User> = client.post("/users", &request).await?;
    /// println!("Created user ID: {}", user.data.id);
    /// # Ok(())
    /// # }
    /// ```
    pub async fn post<B, T>(&self, path: impl Into<String>, body: &B) -> Result<Response<T>>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        self.post_with(path, Some(body), RequestOptions::default()).await
    }

    /// Makes a POST request with per-call options. A `None` body sends no body at all.
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use fetchkit::{Client, RequestOptions};
    ///
    /// # async fn example() -> Result<(), fetchkit::Error> {
    /// # let client = Client::builder().base_url("https://api.example.com")?.build()?;
    /// // Trigger an action that takes no payload.
    /// let options = RequestOptions::new().header("X-Trace", "1")?;
    /// client
    ///     .post_with::<(), serde_json::Value>("/jobs/42/cancel", None, options)
    ///     .await?;
    /// # Ok(())
    /// # }
    /// ```
    pub async fn post_with<B, T>(
        &self,
        path: impl Into<String>,
        body: Option<&B>,
        options: RequestOptions,
    ) -> Result<Response<T>>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        self.send_with_body(Method::POST, path, body, options).await
    }

    /// Makes a PUT request to the specified path with a JSON body.
    pub async fn put<B, T>(&self, path: impl Into<String>, body: &B) -> Result<Response<T>>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        self.put_with(path, Some(body), RequestOptions::default()).await
    }

    /// Makes a PUT request with per-call options. A `None` body sends no body at all.
    pub async fn put_with<B, T>(
        &self,
        path: impl Into<String>,
        body: Option<&B>,
        options: RequestOptions,
    ) -> Result<Response<T>>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        self.send_with_body(Method::PUT, path, body, options).await
    }

    /// Makes a PATCH request to the specified path with a JSON body.
    pub async fn patch<B, T>(&self, path: impl Into<String>, body: &B) -> Result<Response<T>>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        self.patch_with(path, Some(body), RequestOptions::default()).await
    }

    /// Makes a PATCH request with per-call options. A `None` body sends no body at all.
    pub async fn patch_with<B, T>(
        &self,
        path: impl Into<String>,
        body: Option<&B>,
        options: RequestOptions,
    ) -> Result<Response<T>>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        self.send_with_body(Method::PATCH, path, body, options).await
    }

    /// Makes a DELETE request to the specified path.
    pub async fn delete<T>(&self, path: impl Into<String>) -> Result<Response<T>>
    where
        T: DeserializeOwned,
    {
        self.delete_with(path, RequestOptions::default()).await
    }

    /// Makes a DELETE request with per-call options.
    pub async fn delete_with<T>(
        &self,
        path: impl Into<String>,
        options: RequestOptions,
    ) -> Result<Response<T>>
    where
        T: DeserializeOwned,
    {
        let request = Request::from_options(Method::DELETE, path, None, options);
        self.send(request).await
    }

    async fn send_with_body<B, T>(
        &self,
        method: Method,
        path: impl Into<String>,
        body: Option<&B>,
        options: RequestOptions,
    ) -> Result<Response<T>>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let body = body
            .map(serde_json::to_value)
            .transpose()
            .map_err(Error::Encode)?;
        let request = Request::from_options(method, path, body, options);
        self.send(request).await
    }
}

/// Decodes a JSON body, logging the raw text when it does not parse.
fn decode<D, E>(status: StatusCode, raw: &str) -> Result<D, E>
where
    D: DeserializeOwned,
    E: Debug,
{
    serde_json::from_str(raw).map_err(|source| {
        tracing::error!(
            error = %source,
            raw_response = %raw,
            "Failed to deserialize response"
        );
        Error::Decode {
            status,
            raw_response: raw.to_string(),
            source,
        }
    })
}

/// Builder for configuring and creating a [`Client`].
///
/// # Examples
///
/// ```
/// use fetchkit::{CacheMode, ClientBuilder};
///
/// # fn example() -> Result<(), fetchkit::Error> {
/// let client = ClientBuilder::new()
///     .base_url("https://api.example.com")?
///     .default_header("User-Agent", "my-app/1.0")?
///     .cache(CacheMode::NoStore)
///     .build()?;
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Default)]
pub struct ClientBuilder {
    config: ClientConfig,
}

impl ClientBuilder {
    /// Creates a new `ClientBuilder` with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts from an existing configuration, for example one loaded from a file.
    pub fn config(mut self, config: ClientConfig) -> Self {
        self.config = config;
        self
    }

    /// Sets the base URL prepended to every request path.
    ///
    /// # Errors
    ///
    /// Returns an error if the URL is invalid.
    pub fn base_url(mut self, url: impl AsRef<str>) -> Result<Self> {
        let url = url.as_ref();
        Url::parse(url)?;
        self.config.base_url = Some(url.to_string());
        Ok(self)
    }

    /// Adds a default header that will be included in all requests.
    ///
    /// # Errors
    ///
    /// Returns an error if the header name or value is invalid.
    pub fn default_header(mut self, name: impl AsRef<str>, value: impl AsRef<str>) -> Result<Self> {
        parse_header(name.as_ref(), value.as_ref())?;
        self.config
            .headers
            .push((name.as_ref().to_string(), value.as_ref().to_string()));
        Ok(self)
    }

    /// Sets the default cache-mode hint.
    pub fn cache(mut self, mode: CacheMode) -> Self {
        self.config.cache = Some(mode);
        self
    }

    /// Sets the default redirect policy.
    pub fn redirect(mut self, policy: RedirectPolicy) -> Self {
        self.config.redirect = Some(policy);
        self
    }

    /// Sets the hook that rewrites every outgoing request.
    pub fn request_interceptor(mut self, interceptor: impl RequestInterceptor + 'static) -> Self {
        self.config.interceptors = self.config.interceptors.with_request(interceptor);
        self
    }

    /// Sets the hook that rewrites every successful response.
    pub fn response_interceptor(mut self, interceptor: impl ResponseInterceptor + 'static) -> Self {
        self.config.interceptors = self.config.interceptors.with_response(interceptor);
        self
    }

    /// Builds the configured `Client`.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid.
    pub fn build(self) -> Result<Client> {
        Client::new(self.config)
    }
}
