//! reqwest-backed transport.

use std::time::{Duration, Instant};

use async_trait::async_trait;
use reqwest::{Client, header};
use sift_core::{AppConfig, Error, Payload, Result};
use url::Url;

use super::{Body, Method, RequestOptions, Transport};

/// Default request timeout.
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Default connect timeout.
const DEFAULT_CONNECT_TIMEOUT: Duration = Duration::from_secs(5);

/// Default user agent.
const DEFAULT_USER_AGENT: &str = "sift/0.1";

/// Transport over a shared `reqwest::Client`.
///
/// Cloning is cheap and clones share the connection pool.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    http: Client,
}

impl HttpTransport {
    /// Create a transport with the default timeouts and user agent.
    pub fn new() -> Result<Self> {
        Self::build(DEFAULT_TIMEOUT, DEFAULT_CONNECT_TIMEOUT, DEFAULT_USER_AGENT)
    }

    /// Create a transport from loaded configuration.
    pub fn from_config(config: &AppConfig) -> Result<Self> {
        Self::build(config.timeout(), config.connect_timeout(), &config.user_agent)
    }

    /// Wrap an already configured reqwest client.
    pub fn with_client(http: Client) -> Self {
        Self { http }
    }

    fn build(timeout: Duration, connect_timeout: Duration, user_agent: &str) -> Result<Self> {
        let http = Client::builder()
            .user_agent(user_agent)
            .timeout(timeout)
            .connect_timeout(connect_timeout)
            .gzip(true)
            .build()
            .map_err(|e| Error::Network(format!("failed to build HTTP client: {}", e)))?;

        Ok(Self { http })
    }
}

impl From<Method> for reqwest::Method {
    fn from(method: Method) -> Self {
        match method {
            Method::Put => reqwest::Method::PUT,
            Method::Get => reqwest::Method::GET,
            Method::Post => reqwest::Method::POST,
            Method::Delete => reqwest::Method::DELETE,
        }
    }
}

/// Map a reqwest failure onto the transport error taxonomy.
fn transport_error(err: reqwest::Error) -> Error {
    if err.is_timeout() { Error::Timeout } else { Error::Network(err.to_string()) }
}

/// Decode an error body: JSON when it parses, raw text otherwise.
fn error_body(bytes: &[u8]) -> Option<Payload> {
    if bytes.iter().all(u8::is_ascii_whitespace) {
        return None;
    }
    serde_json::from_slice(bytes)
        .ok()
        .or_else(|| Some(Payload::String(String::from_utf8_lossy(bytes).into_owned())))
}

#[async_trait]
impl Transport for HttpTransport {
    async fn execute(
        &self, method: Method, url: &Url, body: Option<Body<'_>>, options: &RequestOptions,
    ) -> Result<Payload> {
        let start = Instant::now();

        let mut request = self
            .http
            .request(method.into(), url.clone())
            .header(header::ACCEPT, "application/json");

        if let Some(timeout) = options.timeout {
            request = request.timeout(timeout);
        }

        if let Some(body) = body {
            request = request
                .header(header::CONTENT_TYPE, body.content_type())
                .body(body.encode()?);
        }

        tracing::debug!("{} {}", method, url);

        let response = request.send().await.map_err(transport_error)?;
        let status = response.status();
        let bytes = response.bytes().await.map_err(transport_error)?;

        tracing::debug!(
            "{} {} -> {} in {:?} ({} bytes)",
            method,
            url,
            status.as_u16(),
            start.elapsed(),
            bytes.len()
        );

        if !status.is_success() {
            tracing::warn!(status = status.as_u16(), %method, %url, "search engine returned an error status");
            return Err(Error::Status { status: status.as_u16(), body: error_body(&bytes) });
        }

        if bytes.iter().all(u8::is_ascii_whitespace) {
            return Ok(Payload::Null);
        }

        serde_json::from_slice(&bytes).map_err(|e| Error::Decode(e.to_string()))
    }
}
