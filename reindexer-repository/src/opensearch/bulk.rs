//! Bulk request bodies and response inspection.

use reindexer_shared::IndexOperation;
use serde_json::{json, Map, Value};

use crate::opensearch::index_config::IndexConfig;

/// Action and source lines for one bulk request, two per operation.
///
/// Child documents are routed by their parent key so they land on the
/// parent's shard.
pub(crate) fn bulk_lines(operations: &[IndexOperation], config: &IndexConfig) -> Vec<Value> {
    let mut lines = Vec::with_capacity(operations.len() * 2);

    for operation in operations {
        let mut action = Map::new();
        action.insert(
            "_index".to_string(),
            json!(config.index_name(&operation.collection)),
        );
        action.insert("_id".to_string(), json!(operation.id));
        if let Some(ref parent) = operation.parent_id {
            action.insert("routing".to_string(), json!(parent));
        }

        lines.push(json!({ "index": action }));
        lines.push(operation.body.clone());
    }

    lines
}

/// `id: reason` for every failed item of a bulk response.
pub(crate) fn bulk_failures(response: &Value) -> Vec<String> {
    if !response
        .get("errors")
        .and_then(|e| e.as_bool())
        .unwrap_or(false)
    {
        return Vec::new();
    }

    response
        .get("items")
        .and_then(|i| i.as_array())
        .map(|items| {
            items
                .iter()
                .filter_map(|item| item.get("index"))
                .filter_map(|result| {
                    let error = result.get("error")?;
                    let id = result.get("_id").and_then(|v| v.as_str()).unwrap_or("?");
                    let reason = error
                        .get("reason")
                        .and_then(|r| r.as_str())
                        .map(str::to_string)
                        .unwrap_or_else(|| error.to_string());
                    Some(format!("{}: {}", id, reason))
                })
                .collect()
        })
        .unwrap_or_default()
}
