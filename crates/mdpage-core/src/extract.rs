//! JSON-LD decoding into structured-data items.
//!
//! Each script payload decodes independently; a broken block is dropped
//! without affecting its siblings and without surfacing an error to the
//! caller. The only observable effect of a bad block is its absence from
//! the frontmatter.

use serde_json::Value;

/// One logical structured-data record: either a whole top-level JSON value
/// or a single entry of an `@graph` array.
pub type StructuredDataItem = Value;

/// Why a single script block was dropped. Never escapes [`extract_items`];
/// it exists so the drop path has a real error to log.
#[derive(Debug, thiserror::Error)]
pub enum ExtractError {
    #[error("invalid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("top-level value is not an object or array")]
    NotStructured,
}

/// Decode a sequence of raw JSON-LD script payloads into items, preserving
/// encounter order. Blocks that fail to parse, or that decode to a scalar,
/// are skipped silently.
pub fn extract_items<'a, I>(blocks: I) -> Vec<StructuredDataItem>
where
    I: IntoIterator<Item = &'a str>,
{
    let mut items = Vec::new();

    for block in blocks {
        match decode_block(block) {
            Ok(decoded) => items.extend(decoded),
            Err(err) => {
                tracing::debug!(error = %err, "dropping undecodable structured-data block");
            }
        }
    }

    items
}

fn decode_block(text: &str) -> Result<Vec<StructuredDataItem>, ExtractError> {
    let value: Value = serde_json::from_str(text)?;

    if !matches!(value, Value::Object(_) | Value::Array(_)) {
        return Err(ExtractError::NotStructured);
    }

    // An object carrying an `@graph` array is a container: each structured
    // entry of the graph becomes its own item.
    if let Value::Object(ref map) = value {
        if let Some(Value::Array(graph)) = map.get("@graph") {
            return Ok(graph
                .iter()
                .filter(|entry| matches!(entry, Value::Object(_) | Value::Array(_)))
                .cloned()
                .collect());
        }
    }

    Ok(vec![value])
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_single_object() {
        let items = extract_items([r#"{"name":"X","price":1}"#]);
        assert_eq!(items.len(), 1);
        assert_eq!(items[0], json!({"name": "X", "price": 1}));
    }

    #[test]
    fn test_graph_splits_into_items() {
        let items = extract_items([r#"{"@context":"https://schema.org","@graph":[{"a":1},{"b":2}]}"#]);
        assert_eq!(items.len(), 2);
        assert_eq!(items[0], json!({"a": 1}));
        assert_eq!(items[1], json!({"b": 2}));
    }

    #[test]
    fn test_graph_scalar_entries_skipped() {
        let items = extract_items([r#"{"@graph":[{"a":1},"stray",42]}"#]);
        assert_eq!(items.len(), 1);
    }

    #[test]
    fn test_graph_not_array_keeps_whole_value() {
        let items = extract_items([r#"{"@graph":"oops","name":"X"}"#]);
        assert_eq!(items.len(), 1);
        assert_eq!(items[0]["name"], json!("X"));
    }

    #[test]
    fn test_top_level_array_is_one_item() {
        let items = extract_items([r#"[{"a":1},{"b":2}]"#]);
        assert_eq!(items.len(), 1);
        assert!(items[0].is_array());
    }

    #[test]
    fn test_bad_blocks_dropped_independently() {
        let items = extract_items(["not json", r#"{"ok":true}"#, r#""just a string""#]);
        assert_eq!(items.len(), 1);
        assert_eq!(items[0], json!({"ok": true}));
    }

    #[test]
    fn test_order_preserved_across_blocks() {
        let items = extract_items([r#"{"first":1}"#, r#"{"@graph":[{"second":2}]}"#, r#"{"third":3}"#]);
        assert_eq!(items.len(), 3);
        assert!(items[0].get("first").is_some());
        assert!(items[1].get("second").is_some());
        assert!(items[2].get("third").is_some());
    }
}
