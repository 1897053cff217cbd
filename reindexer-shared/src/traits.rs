//! Capability traits implemented directly by rows and documents.

use serde_json::{Map, Value};

use crate::document::IndexOperation;

/// Anything carrying the stable numeric key of its source record.
pub trait Identifiable {
    fn id(&self) -> u64;
}

/// A document that can be written to the search engine.
pub trait SearchDocument: Identifiable {
    /// Destination collection (index) name.
    fn collection(&self) -> &'static str;

    /// Kind tag stored alongside the document.
    fn kind(&self) -> &'static str;

    /// Key of the parent document, for child entities.
    fn parent_id(&self) -> Option<u64> {
        None
    }

    /// Searchable fields of the document.
    fn body(&self) -> Map<String, Value>;
}

/// Conversion into one bulk index operation.
pub trait BulkRow {
    fn to_index_operation(&self) -> IndexOperation;
}

/// Build the index operation for a document: its body tagged with the kind
/// and, for child entities, the parent key.
pub fn index_operation<T: SearchDocument>(document: &T) -> IndexOperation {
    let mut body = document.body();
    body.insert("type".to_string(), Value::from(document.kind()));

    let parent_id = document.parent_id().map(|parent| parent.to_string());
    if let Some(ref parent) = parent_id {
        body.insert("parent_id".to_string(), Value::from(parent.clone()));
    }

    IndexOperation {
        collection: document.collection().to_string(),
        kind: document.kind().to_string(),
        id: document.id().to_string(),
        parent_id,
        body: Value::Object(body),
    }
}
