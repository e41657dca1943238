//! Search client bundling a transport with a server URL.

use std::time::Duration;

use sift_core::{AppConfig, Error, Payload, Result};
use url::Url;

use crate::bulk::{BulkAction, bulk_lines};
use crate::endpoint::{self, DocumentId};
use crate::msearch::MultiSearch;
use crate::transport::{HttpTransport, RequestOptions, Scoped, Transport};

/// Search engine client.
///
/// Holds no mutable state; share it by reference or clone it.
#[derive(Debug, Clone)]
pub struct SearchClient<T = HttpTransport> {
    url: Url,
    transport: T,
}

impl SearchClient<HttpTransport> {
    /// Create a client over HTTP from loaded configuration.
    pub fn from_config(config: &AppConfig) -> Result<Self> {
        let url = endpoint::parse_base(&config.server_url)?;
        let transport = HttpTransport::from_config(config)?;
        Ok(Self { url, transport })
    }

    /// Create a client over HTTP with default transport settings.
    pub fn connect(server_url: &str) -> Result<Self> {
        Ok(Self { url: endpoint::parse_base(server_url)?, transport: HttpTransport::new()? })
    }
}

impl<T: Transport> SearchClient<T> {
    pub fn new(url: Url, transport: T) -> Result<Self> {
        if url.cannot_be_a_base() {
            return Err(Error::InvalidUrl(format!("{url}: cannot carry a path")));
        }
        Ok(Self { url, transport })
    }

    pub fn url(&self) -> &Url {
        &self.url
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Borrow this client with a per-call timeout applied to every request.
    pub fn with_timeout(&self, timeout: Duration) -> SearchClient<Scoped<'_, T>> {
        SearchClient {
            url: self.url.clone(),
            transport: self.transport.with_options(RequestOptions::with_timeout(timeout)),
        }
    }

    pub async fn create_index(&self, name: &str, mapping: &Payload) -> Result<Payload> {
        endpoint::create_index(&self.transport, &self.url, name, mapping).await
    }

    pub async fn delete_index(&self, name: &str) -> Result<Payload> {
        endpoint::delete_index(&self.transport, &self.url, name).await
    }

    pub async fn update_index_mapping(&self, name: &str, properties: &Payload) -> Result<Payload> {
        endpoint::update_index_mapping(&self.transport, &self.url, name, properties).await
    }

    pub async fn index_document(&self, name: &str, document: &Payload, id: DocumentId) -> Result<Payload> {
        endpoint::index_document(&self.transport, &self.url, name, document, id).await
    }

    pub async fn delete_document(&self, name: &str, id: DocumentId) -> Result<Payload> {
        endpoint::delete_document(&self.transport, &self.url, name, id).await
    }

    pub async fn bulk(&self, lines: &[Payload]) -> Result<Payload> {
        endpoint::bulk(&self.transport, &self.url, lines).await
    }

    /// Render `actions` and send them as one bulk request.
    pub async fn bulk_actions(&self, actions: &[BulkAction]) -> Result<Payload> {
        let lines = bulk_lines(actions)?;
        self.bulk(&lines).await
    }

    pub async fn update_by_query(&self, name: &str, body: &Payload) -> Result<Payload> {
        endpoint::update_by_query(&self.transport, &self.url, name, body).await
    }

    pub async fn search(&self, name: &str, body: &Payload) -> Result<Payload> {
        endpoint::search(&self.transport, &self.url, name, body).await
    }

    pub async fn msearch(&self, lines: &[Payload]) -> Result<Payload> {
        endpoint::msearch(&self.transport, &self.url, lines).await
    }

    pub async fn multi_search(&self, searches: &MultiSearch) -> Result<Payload> {
        self.msearch(searches.lines()).await
    }
}
