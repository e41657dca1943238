//! Multi-search request lines.

use serde_json::json;
use sift_core::{Error, Payload, Result};

/// Builder for `_msearch` lines: one header line and one query line per search.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MultiSearch {
    lines: Vec<Payload>,
}

impl MultiSearch {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a query against `index`.
    pub fn add(mut self, index: &str, query: Payload) -> Result<Self> {
        if index.is_empty() {
            return Err(Error::InvalidSegment("multi-search header without an index name".into()));
        }
        self.lines.push(json!({ "index": index }));
        self.lines.push(query);
        Ok(self)
    }

    /// Number of searches added.
    pub fn len(&self) -> usize {
        self.lines.len() / 2
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    pub fn lines(&self) -> &[Payload] {
        &self.lines
    }

    pub fn into_lines(self) -> Vec<Payload> {
        self.lines
    }
}
