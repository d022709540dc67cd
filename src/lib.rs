//! # Fetchkit - a small JSON HTTP client
//!
//! Fetchkit wraps `reqwest` with the handful of things most JSON API clients
//! end up writing by hand: a base URL, default headers, query-string building,
//! JSON request and response bodies, and optional hooks around every call.
//!
//! ## Quick Start
//!
//! ```no_run
//! use fetchkit::{Client, RequestOptions};
//! use serde::{Deserialize, Serialize};
//!
//! #[derive(Serialize)]
//! struct CreateUser {
//!     name: String,
//!     email: String,
//! }
//!
//! #[derive(Deserialize)]
//! struct User {
//!     id: u64,
//!     name: String,
//!     email: String,
//! }
//!
//! #[tokio::main]
//! async fn main() -> Result<(), fetchkit::Error> {
//!     let client = Client::builder()
//!         .base_url("https://api.example.com")?
//!         .default_header("X-Api-Version", "2")?
//!         .build()?;
//!
//!     // GET with query parameters; `None` values are left out.
//!     let options = RequestOptions::new()
//!         .query("active", true)
//!         .query("team", None::<&str>);
//!     let users = client.get_with::<Vec<User>>("/users", options).await?;
//!     println!("{} users", users.data.len());
//!
//!     // POST a JSON body
//!     let new_user = CreateUser {
//!         name: "Alice".to_string(),
//!         email: "alice@example.com".to_string(),
//!     };
//!     let created = client.post::<_, User>("/users", &new_user).await?;
//!     println!("Created user with ID: {}", created.data.id);
//!
//!     // 204 answers decode from JSON null
//!     client.delete::<()>("/users/1").await?;
//!
//!     Ok(())
//! }
//! ```
//!
//! ## Features
//!
//! - **Base URL and default headers** - `Content-Type: application/json` plus your own, overridable per call
//! - **Query strings** - insertion-ordered, with absent values dropped
//! - **Typed bodies** - anything `Serialize` goes out, anything `Deserialize` comes back
//! - **Interceptors** - rewrite requests before they are sent and responses before they are returned
//! - **Structured errors** - not-ok answers become a [`ClientError`] with status, headers and the decoded error body
//! - **Logging** - request and response events through `tracing`
//!
//! There are no retries, no timeouts and no caching in this crate: every call is
//! a single request, and every failure is returned to the caller.
//!
//! ## Error Handling
//!
//! ```no_run
//! use fetchkit::{Client, Error};
//!
//! # async fn example() -> Result<(), Error> {
//! # let client = Client::builder().base_url("https://api.example.com")?.build()?;
//! match client.get::<serde_json::Value>("/endpoint").await {
//!     Ok(response) => println!("Success: {:?}", response.data),
//!     Err(Error::Http(err)) => {
//!         eprintln!("{} ({}): {}", err.message, err.status, err.body);
//!     }
//!     Err(Error::Decode { raw_response, source, .. }) => {
//!         eprintln!("Not JSON: {} ({})", raw_response, source);
//!     }
//!     Err(e) => eprintln!("Other error: {}", e),
//! }
//! # Ok(())
//! # }
//! ```

mod client;
pub mod config;
mod error;
pub mod interceptor;
pub mod query;
mod request;
mod response;

pub use client::{Client, ClientBuilder};
pub use config::{CacheMode, ClientConfig, RedirectPolicy, TransportOptions};
pub use error::{ClientError, Error, Result};
pub use interceptor::{Identity, Interceptors, RequestInterceptor, ResponseInterceptor};
pub use query::{IntoQueryValue, Query, QueryValue};
pub use request::{Request, RequestOptions};
pub use response::Response;
