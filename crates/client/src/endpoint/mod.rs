//! Search engine endpoints.
//!
//! One function per endpoint. Each builds the endpoint URL, picks the verb
//! and body encoding, and returns the transport's result unchanged.
//!
//! ### Endpoints
//!
//! | Function | Request |
//! |---|---|
//! | [`create_index`] | `PUT {url}/{name}` |
//! | [`delete_index`] | `DELETE {url}/{name}` |
//! | [`update_index_mapping`] | `PUT {url}/{name}/_mapping` |
//! | [`index_document`] | `PUT {url}/{name}/_doc/{id}` |
//! | [`delete_document`] | `DELETE {url}/{name}/_doc/{id}` |
//! | [`bulk`] | `POST {url}/_bulk` (NDJSON) |
//! | [`update_by_query`] | `POST {url}/{name}/_update_by_query?conflicts=proceed&wait_for_completion=false` |
//! | [`search`] | `GET {url}/{name}/_search` (JSON body) |
//! | [`msearch`] | `GET {url}/_msearch` (NDJSON body) |

pub mod url;

use ::url::Url;
use sift_core::{Payload, Result};

use crate::transport::{Body, Transport};

pub use self::url::{append_query, build_url, parse_base};

/// Document identifier within an index.
pub type DocumentId = u64;

/// Query parameters sent with every update-by-query.
///
/// Version conflicts skip the document instead of aborting, and the call
/// returns a task handle instead of waiting for completion.
pub const UPDATE_BY_QUERY_PARAMS: [(&str, &str); 2] = [("conflicts", "proceed"), ("wait_for_completion", "false")];

/// Create an index with its initial mappings and settings.
pub async fn create_index<T: Transport + ?Sized>(
    transport: &T, url: &Url, name: &str, mapping: &Payload,
) -> Result<Payload> {
    let target = build_url(url, &[name])?;
    tracing::debug!(index = name, "create index");
    transport.put(&target, Body::Json(mapping)).await
}

/// Delete an index.
pub async fn delete_index<T: Transport + ?Sized>(transport: &T, url: &Url, name: &str) -> Result<Payload> {
    let target = build_url(url, &[name])?;
    tracing::debug!(index = name, "delete index");
    transport.delete(&target).await
}

/// Add fields to an index mapping.
///
/// Incompatible type changes are rejected by the engine, not here.
pub async fn update_index_mapping<T: Transport + ?Sized>(
    transport: &T, url: &Url, name: &str, properties: &Payload,
) -> Result<Payload> {
    let target = build_url(url, &[name, "_mapping"])?;
    tracing::debug!(index = name, "update mapping");
    transport.put(&target, Body::Json(properties)).await
}

/// Create or overwrite the document stored at `id`.
pub async fn index_document<T: Transport + ?Sized>(
    transport: &T, url: &Url, name: &str, document: &Payload, id: DocumentId,
) -> Result<Payload> {
    let id = id.to_string();
    let target = build_url(url, &[name, "_doc", id.as_str()])?;
    tracing::debug!(index = name, id = %id, "index document");
    transport.put(&target, Body::Json(document)).await
}

/// Delete the document stored at `id`.
pub async fn delete_document<T: Transport + ?Sized>(
    transport: &T, url: &Url, name: &str, id: DocumentId,
) -> Result<Payload> {
    let id = id.to_string();
    let target = build_url(url, &[name, "_doc", id.as_str()])?;
    tracing::debug!(index = name, id = %id, "delete document");
    transport.delete(&target).await
}

/// Send a batch of bulk action and data lines.
///
/// [`BulkAction`](crate::bulk::BulkAction) renders typed actions into these lines.
pub async fn bulk<T: Transport + ?Sized>(transport: &T, url: &Url, lines: &[Payload]) -> Result<Payload> {
    let target = build_url(url, &["_bulk"])?;
    tracing::debug!(lines = lines.len(), "bulk");
    transport.post(&target, Body::NdJson(lines)).await
}

/// Start an asynchronous update-by-query.
///
/// Returns as soon as the engine has accepted the task; the response carries
/// the task id. Version-conflicted documents are skipped.
pub async fn update_by_query<T: Transport + ?Sized>(
    transport: &T, url: &Url, name: &str, body: &Payload,
) -> Result<Payload> {
    let target = append_query(build_url(url, &[name, "_update_by_query"])?, &UPDATE_BY_QUERY_PARAMS);
    tracing::debug!(index = name, "update by query");
    transport.post(&target, Body::Json(body)).await
}

/// Run a query against one index.
pub async fn search<T: Transport + ?Sized>(transport: &T, url: &Url, name: &str, body: &Payload) -> Result<Payload> {
    let target = build_url(url, &[name, "_search"])?;
    tracing::debug!(index = name, "search");
    transport.get(&target, Some(Body::Json(body))).await
}

/// Run several queries in one request.
///
/// `lines` alternates header and query lines; see [`MultiSearch`](crate::msearch::MultiSearch).
pub async fn msearch<T: Transport + ?Sized>(transport: &T, url: &Url, lines: &[Payload]) -> Result<Payload> {
    let target = build_url(url, &["_msearch"])?;
    tracing::debug!(lines = lines.len(), "multi search");
    transport.get(&target, Some(Body::NdJson(lines))).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transport::testing::StubTransport;
    use crate::transport::{Method, RequestOptions};
    use serde_json::json;
    use sift_core::{Error, ndjson};
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;

    fn base() -> Url {
        Url::parse("http://localhost:9200").unwrap()
    }

    #[tokio::test]
    async fn test_create_index() {
        let stub = StubTransport::ok();
        let mapping = json!({"mappings": {"properties": {"caption": {"type": "text"}}}});

        create_index(&stub, &base(), "photos", &mapping).await.unwrap();

        let call = stub.last();
        assert_eq!(call.method, Method::Put);
        assert_eq!(call.url, "http://localhost:9200/photos");
        assert_eq!(call.content_type, Some("application/json"));
        assert_eq!(call.json(), mapping);
    }

    #[tokio::test]
    async fn test_delete_index_twice_same_request() {
        let attempts = AtomicUsize::new(0);
        let stub = StubTransport::new(move |_| {
            if attempts.fetch_add(1, Ordering::SeqCst) == 0 {
                Ok(json!({"acknowledged": true}))
            } else {
                Err(Error::Status { status: 404, body: Some(json!({"error": "index_not_found"})) })
            }
        });

        delete_index(&stub, &base(), "photos").await.unwrap();
        let err = delete_index(&stub, &base(), "photos").await.unwrap_err();
        assert_eq!(err.status(), Some(404));

        let calls = stub.calls();
        assert_eq!(calls.len(), 2);
        for call in calls {
            assert_eq!(call.method, Method::Delete);
            assert_eq!(call.url, "http://localhost:9200/photos");
            assert!(call.body.is_none());
        }
    }

    #[tokio::test]
    async fn test_update_index_mapping() {
        let stub = StubTransport::ok();
        let properties = json!({"properties": {"rating": {"type": "integer"}}});

        update_index_mapping(&stub, &base(), "photos", &properties).await.unwrap();

        let call = stub.last();
        assert_eq!(call.method, Method::Put);
        assert_eq!(call.url, "http://localhost:9200/photos/_mapping");
        assert_eq!(call.json(), properties);
    }

    #[tokio::test]
    async fn test_index_and_delete_document() {
        let stub = StubTransport::ok();
        let doc = json!({"caption": "sunset over the bay", "rating": 5});

        index_document(&stub, &base(), "photos", &doc, 42).await.unwrap();
        delete_document(&stub, &base(), "photos", 42).await.unwrap();

        let calls = stub.calls();
        assert_eq!(calls[0].method, Method::Put);
        assert_eq!(calls[0].url, "http://localhost:9200/photos/_doc/42");
        assert_eq!(calls[0].json(), doc);

        assert_eq!(calls[1].method, Method::Delete);
        assert_eq!(calls[1].url, "http://localhost:9200/photos/_doc/42");
        assert!(calls[1].body.is_none());
    }

    #[tokio::test]
    async fn test_bulk_ndjson_body() {
        let stub = StubTransport::ok();
        let lines = vec![
            json!({"index": {"_index": "photos", "_id": "1"}}),
            json!({"caption": "first"}),
            json!({"delete": {"_index": "photos", "_id": "2"}}),
        ];

        bulk(&stub, &base(), &lines).await.unwrap();

        let call = stub.last();
        assert_eq!(call.method, Method::Post);
        assert_eq!(call.url, "http://localhost:9200/_bulk");
        assert_eq!(call.content_type, Some("application/x-ndjson"));
        let text = call.text();
        assert!(text.ends_with('\n'));
        assert_eq!(ndjson::decode(&text).unwrap(), lines);
    }

    #[tokio::test]
    async fn test_update_by_query_params() {
        let stub = StubTransport::ok();
        let body = json!({"script": {"source": "ctx._source.views = 0"}, "query": {"match_all": {}}});

        update_by_query(&stub, &base(), "photos", &body).await.unwrap();

        let call = stub.last();
        assert_eq!(call.method, Method::Post);
        let url = Url::parse(&call.url).unwrap();
        assert_eq!(url.path(), "/photos/_update_by_query");

        let mut pairs: Vec<(String, String)> = url.query_pairs().into_owned().collect();
        pairs.sort();
        assert_eq!(
            pairs,
            vec![
                ("conflicts".to_string(), "proceed".to_string()),
                ("wait_for_completion".to_string(), "false".to_string()),
            ]
        );
        assert_eq!(call.json(), body);
    }

    #[tokio::test]
    async fn test_update_by_query_base_path_preserved() {
        let stub = StubTransport::ok();
        let base = Url::parse("https://gateway.internal/os/").unwrap();

        update_by_query(&stub, &base, "photos", &json!({})).await.unwrap();

        assert_eq!(
            stub.last().url,
            "https://gateway.internal/os/photos/_update_by_query?conflicts=proceed&wait_for_completion=false"
        );
    }

    #[tokio::test]
    async fn test_search_get_with_body() {
        let stub = StubTransport::ok();
        let query = json!({"query": {"match": {"caption": "sunset"}}});

        search(&stub, &base(), "photos", &query).await.unwrap();

        let call = stub.last();
        assert_eq!(call.method, Method::Get);
        assert_eq!(call.url, "http://localhost:9200/photos/_search");
        assert_eq!(call.json(), query);
    }

    #[tokio::test]
    async fn test_search_missing_index_passes_error_through() {
        let stub = StubTransport::new(|call| {
            if call.method == Method::Get && call.url == "http://localhost:9200/missing/_search" {
                Err(Error::Status { status: 404, body: Some(json!({"error": "index_not_found"})) })
            } else {
                Ok(json!({}))
            }
        });

        let err = search(&stub, &base(), "missing", &json!({"query": {"match_all": {}}}))
            .await
            .unwrap_err();

        assert_eq!(err.status(), Some(404));
        assert_eq!(err.body(), Some(&json!({"error": "index_not_found"})));
    }

    #[tokio::test]
    async fn test_msearch_ndjson_body() {
        let stub = StubTransport::ok();
        let lines = vec![
            json!({"index": "photos"}),
            json!({"query": {"match": {"caption": "cat"}}}),
            json!({"index": "albums"}),
            json!({"query": {"match_all": {}}}),
        ];

        msearch(&stub, &base(), &lines).await.unwrap();

        let call = stub.last();
        assert_eq!(call.method, Method::Get);
        assert_eq!(call.url, "http://localhost:9200/_msearch");
        assert_eq!(call.content_type, Some("application/x-ndjson"));
        assert_eq!(ndjson::decode(&call.text()).unwrap(), lines);
    }

    #[tokio::test]
    async fn test_success_body_returned_unchanged() {
        let response = json!({"_index": "photos", "_id": "42", "result": "created", "_version": 1});
        let expected = response.clone();
        let stub = StubTransport::new(move |_| Ok(response.clone()));

        let result = index_document(&stub, &base(), "photos", &json!({}), 42).await.unwrap();
        assert_eq!(result, expected);
    }

    #[tokio::test]
    async fn test_timeout_surfaces_from_every_endpoint() {
        let stub = StubTransport::new(|_| Err(Error::Timeout));
        let url = base();
        let body = json!({});
        let lines = vec![json!({})];

        let results = vec![
            create_index(&stub, &url, "photos", &body).await,
            delete_index(&stub, &url, "photos").await,
            update_index_mapping(&stub, &url, "photos", &body).await,
            index_document(&stub, &url, "photos", &body, 1).await,
            delete_document(&stub, &url, "photos", 1).await,
            bulk(&stub, &url, &lines).await,
            update_by_query(&stub, &url, "photos", &body).await,
            search(&stub, &url, "photos", &body).await,
            msearch(&stub, &url, &lines).await,
        ];

        assert_eq!(stub.calls().len(), 9);
        for result in results {
            let err = result.unwrap_err();
            assert!(err.is_transport(), "unexpected error: {err:?}");
        }
    }

    #[tokio::test]
    async fn test_invalid_name_fails_before_sending() {
        let stub = StubTransport::ok();

        let err = delete_index(&stub, &base(), "").await.unwrap_err();
        assert!(matches!(err, Error::InvalidSegment(_)));

        let err = search(&stub, &base(), "..", &json!({})).await.unwrap_err();
        assert!(matches!(err, Error::InvalidSegment(_)));

        assert!(stub.calls().is_empty());
    }

    #[tokio::test]
    async fn test_name_with_separator_is_encoded() {
        let stub = StubTransport::ok();

        index_document(&stub, &base(), "team/photos", &json!({}), 3).await.unwrap();

        assert_eq!(stub.last().url, "http://localhost:9200/team%2Fphotos/_doc/3");
    }

    #[tokio::test]
    async fn test_scoped_transport_through_endpoint() {
        let stub = StubTransport::ok();
        let scoped = stub.with_options(RequestOptions::with_timeout(Duration::from_secs(3)));

        search(&scoped, &base(), "photos", &json!({})).await.unwrap();

        assert_eq!(stub.last().options.timeout, Some(Duration::from_secs(3)));
    }
}
