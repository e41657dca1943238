//! Transport layer: one HTTP exchange in, one `Result` out.
//!
//! The endpoint functions depend only on the [`Transport`] trait, so tests
//! and callers can substitute their own implementation. [`HttpTransport`] is
//! the reqwest-backed one.
//!
//! ### Contract
//!
//! - 2xx with a JSON body yields `Ok(body)`; an empty 2xx body yields `Payload::Null`.
//! - Non-2xx yields `Error::Status` with the engine's body untouched.
//! - Timeouts, connection failures and undecodable bodies yield transport errors.
//! - No retries, no backoff.

pub mod http;

use std::fmt;
use std::time::Duration;

use async_trait::async_trait;
use sift_core::{Payload, Result, ndjson};
use url::Url;

pub use http::HttpTransport;

/// HTTP verbs used by the search API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Method {
    Put,
    Get,
    Post,
    Delete,
}

impl Method {
    pub fn as_str(&self) -> &'static str {
        match self {
            Method::Put => "PUT",
            Method::Get => "GET",
            Method::Post => "POST",
            Method::Delete => "DELETE",
        }
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Request body, borrowed from the caller.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Body<'a> {
    /// A single JSON value.
    Json(&'a Payload),
    /// A sequence of values sent as NDJSON (`_bulk`, `_msearch`).
    NdJson(&'a [Payload]),
}

impl Body<'_> {
    /// Content-Type header for this body.
    pub fn content_type(&self) -> &'static str {
        match self {
            Body::Json(_) => "application/json",
            Body::NdJson(_) => ndjson::CONTENT_TYPE,
        }
    }

    /// Serialize the body to bytes for the wire.
    pub fn encode(&self) -> Result<Vec<u8>> {
        match self {
            Body::Json(value) => serde_json::to_vec(value).map_err(|e| sift_core::Error::Encode(e.to_string())),
            Body::NdJson(lines) => ndjson::encode(lines).map(String::into_bytes),
        }
    }
}

/// Per-call options.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RequestOptions {
    /// Overrides the transport's default timeout for this call.
    pub timeout: Option<Duration>,
}

impl RequestOptions {
    pub fn with_timeout(timeout: Duration) -> Self {
        Self { timeout: Some(timeout) }
    }

    /// Fill unset fields from `fallback`.
    pub fn or(self, fallback: &RequestOptions) -> Self {
        Self { timeout: self.timeout.or(fallback.timeout) }
    }
}

/// A client able to perform one HTTP exchange against the search engine.
///
/// Implementations must be safe to call concurrently and hold no mutable
/// per-call state.
#[async_trait]
pub trait Transport: Send + Sync {
    /// Perform one exchange with explicit options.
    async fn execute(
        &self, method: Method, url: &Url, body: Option<Body<'_>>, options: &RequestOptions,
    ) -> Result<Payload>;

    /// Perform one exchange with default options.
    async fn request(&self, method: Method, url: &Url, body: Option<Body<'_>>) -> Result<Payload> {
        self.execute(method, url, body, &RequestOptions::default()).await
    }

    async fn put(&self, url: &Url, body: Body<'_>) -> Result<Payload> {
        self.request(Method::Put, url, Some(body)).await
    }

    /// GET, optionally with a body (`_search` and `_msearch` send one).
    async fn get(&self, url: &Url, body: Option<Body<'_>>) -> Result<Payload> {
        self.request(Method::Get, url, body).await
    }

    async fn post(&self, url: &Url, body: Body<'_>) -> Result<Payload> {
        self.request(Method::Post, url, Some(body)).await
    }

    async fn delete(&self, url: &Url) -> Result<Payload> {
        self.request(Method::Delete, url, None).await
    }

    /// Borrow this transport with options applied to every call.
    fn with_options(&self, options: RequestOptions) -> Scoped<'_, Self>
    where
        Self: Sized,
    {
        Scoped { inner: self, options }
    }
}

/// A transport that applies fixed [`RequestOptions`] to every call.
///
/// Options passed explicitly to `execute` take precedence.
#[derive(Debug)]
pub struct Scoped<'a, T: ?Sized> {
    inner: &'a T,
    options: RequestOptions,
}

#[async_trait]
impl<T: Transport + ?Sized> Transport for Scoped<'_, T> {
    async fn execute(
        &self, method: Method, url: &Url, body: Option<Body<'_>>, options: &RequestOptions,
    ) -> Result<Payload> {
        let options = options.or(&self.options);
        self.inner.execute(method, url, body, &options).await
    }
}
