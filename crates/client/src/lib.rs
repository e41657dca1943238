//! Client code for sift.
//!
//! This crate maps search engine operations onto HTTP requests: endpoint URL
//! construction, verb and body encoding per endpoint, and a pluggable
//! transport that normalizes every exchange into one `Result`.

pub mod bulk;
pub mod client;
pub mod endpoint;
pub mod msearch;
pub mod transport;

pub use bulk::{BulkAction, bulk_lines};
pub use client::SearchClient;
pub use endpoint::{
    DocumentId, bulk, create_index, delete_document, delete_index, index_document, msearch, search, update_by_query,
    update_index_mapping,
};
pub use msearch::MultiSearch;
pub use transport::{Body, HttpTransport, Method, RequestOptions, Scoped, Transport};

pub use sift_core::{AppConfig, Error, Payload, Result};
