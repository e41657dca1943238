//! Bulk action lines.
//!
//! A bulk body alternates an action-metadata line with, for index, create and
//! update actions, a data line. Delete actions have no data line.

use serde::Serialize;
use serde_json::json;
use sift_core::{Error, Payload, Result};

use crate::endpoint::DocumentId;

/// One bulk action against a document.
#[derive(Debug, Clone, PartialEq)]
pub enum BulkAction {
    /// Create or overwrite a document.
    Index { index: String, id: DocumentId, document: Payload },
    /// Create a document; the engine rejects the item if the id exists.
    Create { index: String, id: DocumentId, document: Payload },
    /// Merge a partial document into an existing one.
    Update { index: String, id: DocumentId, partial: Payload },
    /// Delete a document.
    Delete { index: String, id: DocumentId },
}

#[derive(Serialize)]
struct ActionMeta<'a> {
    #[serde(rename = "_index")]
    index: &'a str,
    #[serde(rename = "_id")]
    id: String,
}

impl BulkAction {
    pub fn index(index: impl Into<String>, id: DocumentId, document: Payload) -> Self {
        BulkAction::Index { index: index.into(), id, document }
    }

    pub fn create(index: impl Into<String>, id: DocumentId, document: Payload) -> Self {
        BulkAction::Create { index: index.into(), id, document }
    }

    pub fn update(index: impl Into<String>, id: DocumentId, partial: Payload) -> Self {
        BulkAction::Update { index: index.into(), id, partial }
    }

    pub fn delete(index: impl Into<String>, id: DocumentId) -> Self {
        BulkAction::Delete { index: index.into(), id }
    }

    /// Name of the action as written in the metadata line.
    pub fn name(&self) -> &'static str {
        match self {
            BulkAction::Index { .. } => "index",
            BulkAction::Create { .. } => "create",
            BulkAction::Update { .. } => "update",
            BulkAction::Delete { .. } => "delete",
        }
    }

    fn target(&self) -> (&str, DocumentId) {
        match self {
            BulkAction::Index { index, id, .. }
            | BulkAction::Create { index, id, .. }
            | BulkAction::Update { index, id, .. }
            | BulkAction::Delete { index, id } => (index, *id),
        }
    }

    /// Append this action's lines to `out`.
    pub fn write_lines(&self, out: &mut Vec<Payload>) -> Result<()> {
        let (index, id) = self.target();
        if index.is_empty() {
            return Err(Error::InvalidSegment(format!("{} action without an index name", self.name())));
        }

        let meta = serde_json::to_value(ActionMeta { index, id: id.to_string() })
            .map_err(|e| Error::Encode(e.to_string()))?;
        out.push(json!({ self.name(): meta }));

        match self {
            BulkAction::Index { document, .. } | BulkAction::Create { document, .. } => out.push(document.clone()),
            BulkAction::Update { partial, .. } => out.push(json!({ "doc": partial })),
            BulkAction::Delete { .. } => {}
        }

        Ok(())
    }
}

/// Render a batch of actions as bulk lines, in order.
pub fn bulk_lines(actions: &[BulkAction]) -> Result<Vec<Payload>> {
    let mut lines = Vec::with_capacity(actions.len() * 2);
    for action in actions {
        action.write_lines(&mut lines)?;
    }
    Ok(lines)
}
