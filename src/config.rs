//! Client configuration and transport passthrough options.

use crate::interceptor::Interceptors;
use http::{header, HeaderMap, HeaderValue};
use serde::de::{Deserializer, MapAccess, Visitor};
use serde::Deserialize;
use std::fmt;

/// Cache-mode hint, modelled on the fetch cache modes.
///
/// `reqwest` has no HTTP cache of its own, so the hint is rendered as request
/// cache directives for any cache sitting between the client and the server.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum CacheMode {
    /// No directive is sent.
    #[default]
    Default,
    /// `Cache-Control: no-store`.
    NoStore,
    /// `Cache-Control: no-cache` and `Pragma: no-cache`.
    Reload,
    /// `Cache-Control: max-age=0`.
    NoCache,
    /// `Cache-Control: max-stale`.
    ForceCache,
    /// `Cache-Control: only-if-cached`.
    OnlyIfCached,
}

impl CacheMode {
    /// Adds the directives for this mode to `headers`.
    ///
    /// A `Cache-Control` header that is already present is left alone.
    pub(crate) fn apply(self, headers: &mut HeaderMap) {
        if headers.contains_key(header::CACHE_CONTROL) {
            return;
        }
        let directive = match self {
            CacheMode::Default => return,
            CacheMode::NoStore => "no-store",
            CacheMode::Reload => {
                headers.insert(header::PRAGMA, HeaderValue::from_static("no-cache"));
                "no-cache"
            }
            CacheMode::NoCache => "max-age=0",
            CacheMode::ForceCache => "max-stale",
            CacheMode::OnlyIfCached => "only-if-cached",
        };
        headers.insert(header::CACHE_CONTROL, HeaderValue::from_static(directive));
    }
}

/// What to do when the server answers with a redirect.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum RedirectPolicy {
    /// Follow redirects (up to reqwest's default limit).
    #[default]
    Follow,
    /// Fail the call with [`Error::Redirect`](crate::Error::Redirect) on any 3xx answer.
    Error,
}

/// Options forwarded to the transport without interpretation by the dispatcher.
///
/// Client-level values act as defaults; per-call values win field by field.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct TransportOptions {
    /// Cache-mode hint.
    pub cache: Option<CacheMode>,
    /// Redirect handling.
    pub redirect: Option<RedirectPolicy>,
}

impl TransportOptions {
    /// Overlays `overrides` on top of `self`.
    pub fn merge(self, overrides: TransportOptions) -> TransportOptions {
        TransportOptions {
            cache: overrides.cache.or(self.cache),
            redirect: overrides.redirect.or(self.redirect),
        }
    }
}

/// Configuration accepted by [`Client::new`](crate::Client::new).
///
/// Every field is optional. The configuration is captured when the client is
/// built and never re-read afterwards.
///
/// # Examples
///
/// ```
/// use fetchkit::{CacheMode, ClientConfig};
///
/// let config: ClientConfig = serde_json::from_str(r#"{
///     "base_url": "https://api.example.com",
///     "headers": { "X-Api-Version": "2" },
///     "cache": "no-store"
/// }"#).unwrap();
///
/// assert_eq!(config.cache, Some(CacheMode::NoStore));
/// ```
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    /// Prefix prepended to every request path. Empty means paths must be absolute URLs.
    pub base_url: Option<String>,

    /// Headers laid over the `Content-Type: application/json` default, in the
    /// order they were given. Header names are case-insensitive, so of two
    /// entries naming the same header the later one wins.
    #[serde(deserialize_with = "ordered_headers")]
    pub headers: Vec<(String, String)>,

    /// Default cache-mode hint.
    pub cache: Option<CacheMode>,

    /// Default redirect handling.
    pub redirect: Option<RedirectPolicy>,

    /// Request and response hooks. Not deserializable; set them in code.
    #[serde(skip)]
    pub interceptors: Interceptors,
}

impl ClientConfig {
    pub(crate) fn transport(&self) -> TransportOptions {
        TransportOptions {
            cache: self.cache,
            redirect: self.redirect,
        }
    }
}

/// Reads a JSON object of headers, keeping the document order.
fn ordered_headers<'de, D>(deserializer: D) -> Result<Vec<(String, String)>, D::Error>
where
    D: Deserializer<'de>,
{
    struct OrderedHeaders;

    impl<'de> Visitor<'de> for OrderedHeaders {
        type Value = Vec<(String, String)>;

        fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            f.write_str("a map of header names to values")
        }

        fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<Self::Value, A::Error> {
            let mut headers = Vec::with_capacity(map.size_hint().unwrap_or(0));
            while let Some(entry) = map.next_entry::<String, String>()? {
                headers.push(entry);
            }
            Ok(headers)
        }
    }

    deserializer.deserialize_map(OrderedHeaders)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn per_call_transport_options_win() {
        let defaults = TransportOptions {
            cache: Some(CacheMode::NoStore),
            redirect: Some(RedirectPolicy::Follow),
        };
        let overrides = TransportOptions {
            cache: Some(CacheMode::Reload),
            redirect: None,
        };

        let merged = defaults.merge(overrides);
        assert_eq!(merged.cache, Some(CacheMode::Reload));
        assert_eq!(merged.redirect, Some(RedirectPolicy::Follow));
    }

    #[test]
    fn cache_mode_renders_directives() {
        let mut headers = HeaderMap::new();
        CacheMode::Reload.apply(&mut headers);
        assert_eq!(headers[header::CACHE_CONTROL], "no-cache");
        assert_eq!(headers[header::PRAGMA], "no-cache");

        let mut headers = HeaderMap::new();
        CacheMode::Default.apply(&mut headers);
        assert!(headers.is_empty());
    }

    #[test]
    fn explicit_cache_control_is_kept() {
        let mut headers = HeaderMap::new();
        headers.insert(header::CACHE_CONTROL, HeaderValue::from_static("max-age=60"));
        CacheMode::NoStore.apply(&mut headers);
        assert_eq!(headers[header::CACHE_CONTROL], "max-age=60");
    }

    #[test]
    fn config_deserializes_with_missing_fields() {
        let config: ClientConfig = serde_json::from_str("{}").unwrap();
        assert!(config.base_url.is_none());
        assert!(config.headers.is_empty());
        assert!(config.cache.is_none());
    }

    #[test]
    fn config_headers_keep_document_order() {
        let config: ClientConfig = serde_json::from_str(
            r#"{ "headers": { "x-trace": "lower", "X-Trace": "upper", "Accept": "*/*" } }"#,
        )
        .unwrap();

        assert_eq!(
            config.headers,
            vec![
                ("x-trace".to_string(), "lower".to_string()),
                ("X-Trace".to_string(), "upper".to_string()),
                ("Accept".to_string(), "*/*".to_string()),
            ]
        );
    }
}
