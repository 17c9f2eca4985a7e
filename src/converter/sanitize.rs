//!
//! Type-sanitation pass over the serialized outbound payload.
//!
//! The backend schema has no content type for tool invocations or tool
//! results. Any object whose `type` member still reads `tool_use` or
//! `tool_result` after assembly is rewritten to a `text` object carrying a
//! placeholder message. The rewrite walks the decoded tree and only touches
//! `type` members, so the same tags inside free text or tool input are left
//! alone.
//!
//! Authors:
//!   Jaro <yarenty@gmail.com>
//!
//! Copyright (c) 2026 SkyCorp

/* --- uses ------------------------------------------------------------------------------------ */

use serde_json::{Map, Value};

use crate::converter::content::{TEXT, TOOL_RESULT, TOOL_USE};
use crate::error::{GatewayError, Result};

/* --- constants ------------------------------------------------------------------------------ */

/** Placeholder text injected for a leftover tool invocation */
pub const TOOL_USE_PLACEHOLDER: &str = "incorrect tool use";

/** Placeholder text injected for a leftover tool result */
pub const TOOL_RESULT_PLACEHOLDER: &str = "incorrect tool result";

/* --- types ----------------------------------------------------------------------------------- */

///
/// Outcome of sanitizing a serialized payload.
#[derive(Debug, Clone, PartialEq)]
pub struct Sanitized {
    /** decoded, rewritten payload */
    pub payload: Value,
    /** number of objects whose type was rewritten */
    pub rewritten: usize,
}

/* --- start of code -------------------------------------------------------------------------- */

///
/// Decode serialized payload text and sanitize it.
///
/// # Arguments
///  * `serialized` - canonical JSON text of the assembled payload
///
/// # Returns
///  * Sanitized payload and rewrite count
///  * `GatewayError::SanitationDecode` if the text is not valid JSON
pub fn sanitize_serialized(serialized: &str) -> Result<Sanitized> {
    let mut payload: Value = serde_json::from_str(serialized)
        .map_err(|e| GatewayError::SanitationDecode(e.to_string()))?;
    let rewritten = sanitize_value(&mut payload);
    Ok(Sanitized { payload, rewritten })
}

///
/// Rewrite tool-shaped `type` members in place.
///
/// Walks the whole tree. Running it twice is the same as running it once.
///
/// # Arguments
///  * `value` - tree to sanitize
///
/// # Returns
///  * Number of objects rewritten
pub fn sanitize_value(value: &mut Value) -> usize {
    match value {
        Value::Object(fields) => {
            let mut rewritten = usize::from(rewrite_object(fields));
            for child in fields.values_mut() {
                rewritten += sanitize_value(child);
            }
            rewritten
        }
        Value::Array(items) => items.iter_mut().map(sanitize_value).sum(),
        _ => 0,
    }
}

///
/// Rewrite a single object if its `type` is tool-shaped.
///
/// The placeholder replaces any `text` member the object already carried.
fn rewrite_object(fields: &mut Map<String, Value>) -> bool {
    let placeholder = match fields.get("type").and_then(Value::as_str) {
        Some(TOOL_USE) => TOOL_USE_PLACEHOLDER,
        Some(TOOL_RESULT) => TOOL_RESULT_PLACEHOLDER,
        _ => return false,
    };

    fields.insert("type".to_string(), Value::String(TEXT.to_string()));
    fields.insert("text".to_string(), Value::String(placeholder.to_string()));
    true
}

/* --- tests ------------------------------------------------------------------------------- */

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    /// True if any object in the tree has a tool-shaped `type` member.
    fn has_tool_type(value: &Value) -> bool {
        match value {
            Value::Object(fields) => {
                matches!(fields.get("type").and_then(Value::as_str), Some("tool_use" | "tool_result"))
                    || fields.values().any(has_tool_type)
            }
            Value::Array(items) => items.iter().any(has_tool_type),
            _ => false,
        }
    }

    #[test]
    fn test_rewrites_tool_types_with_placeholders() {
        let mut value = json!({
            "system": [
                {"type": "tool_use", "id": "t1"},
                {"type": "tool_result", "tool_use_id": "t1"}
            ]
        });

        assert_eq!(sanitize_value(&mut value), 2);
        assert_eq!(value["system"][0], json!({"type": "text", "id": "t1", "text": "incorrect tool use"}));
        assert_eq!(
            value["system"][1],
            json!({"type": "text", "tool_use_id": "t1", "text": "incorrect tool result"})
        );
        assert!(!has_tool_type(&value));
    }

    #[test]
    fn test_placeholder_replaces_existing_text() {
        let mut value = json!({"type": "tool_use", "text": "real text", "id": "t1"});
        sanitize_value(&mut value);
        assert_eq!(value, json!({"type": "text", "text": "incorrect tool use", "id": "t1"}));

        let mut value = json!({"type": "tool_result", "text": 5});
        sanitize_value(&mut value);
        assert_eq!(value["text"], json!("incorrect tool result"));
    }

    #[test]
    fn test_ignores_tags_inside_string_values() {
        let original = json!({
            "messages": [{
                "role": "user",
                "content": [{"type": "text", "text": "what does \"tool_use\" mean?"}]
            }],
            "note": "tool_result",
            "labels": ["tool_use", "tool_result"],
            "input": {"kind": "tool_use"}
        });
        let mut value = original.clone();

        assert_eq!(sanitize_value(&mut value), 0);
        assert_eq!(value, original);
    }

    #[test]
    fn test_rewrites_nested_objects() {
        let mut value = json!({
            "metadata": {"history": [{"wrapper": {"type": "tool_result", "content": []}}]}
        });

        assert_eq!(sanitize_value(&mut value), 1);
        assert!(!has_tool_type(&value));
        assert_eq!(value["metadata"]["history"][0]["wrapper"]["text"], json!("incorrect tool result"));
    }

    #[test]
    fn test_idempotent() {
        let serialized = json!({
            "a": {"type": "tool_use"},
            "b": [{"type": "tool_result", "text": 5}],
            "c": {"type": "text", "text": "tool_use"}
        })
        .to_string();

        let once = sanitize_serialized(&serialized).unwrap();
        let twice = sanitize_serialized(&once.payload.to_string()).unwrap();

        assert_eq!(once.rewritten, 2);
        assert_eq!(twice.rewritten, 0);
        assert_eq!(once.payload.to_string(), twice.payload.to_string());
    }

    #[test]
    fn test_invalid_text_is_decode_error() {
        let result = sanitize_serialized("{\"type\": \"text\", ");
        assert!(matches!(result, Err(GatewayError::SanitationDecode(_))));
    }
}
