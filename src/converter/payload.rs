//!
//! Inbound payload decoding and outbound payload assembly.
//!
//! The inbound body is split into the three recognized keys (`tools`,
//! `messages`, `tool_choice`) and an ordered map of pass-through fields. The
//! assembler writes the translated recognized keys first and then merges the
//! pass-through fields without ever overwriting a translated key.
//!
//! Authors:
//!   Jaro <yarenty@gmail.com>
//!
//! Copyright (c) 2026 SkyCorp

/* --- uses ------------------------------------------------------------------------------------ */

use serde::de::DeserializeOwned;
use serde_json::{Map, Value};

use crate::converter::types::{SourceMessage, SourceTool, TargetMessage, TargetTool};
use crate::error::{GatewayError, Result};

/* --- constants ------------------------------------------------------------------------------ */

/** Top-level key holding tool declarations */
pub const TOOLS_KEY: &str = "tools";

/** Top-level key holding the conversation */
pub const MESSAGES_KEY: &str = "messages";

/** Top-level key holding the tool-choice directive */
pub const TOOL_CHOICE_KEY: &str = "tool_choice";

/** Keys the translator owns; everything else passes through */
pub const RECOGNIZED_KEYS: [&str; 3] = [TOOLS_KEY, MESSAGES_KEY, TOOL_CHOICE_KEY];

/** Tool-choice type that names one specific tool */
const SPECIFIC_TOOL_CHOICE: &str = "tool";

/* --- types ----------------------------------------------------------------------------------- */

///
/// Decoded inbound request.
///
/// `pass_through` keeps every unrecognized top-level member in request order.
#[derive(Debug, Clone)]
pub struct SourcePayload {
    /** tool declarations */
    pub tools: Vec<SourceTool>,
    /** conversation messages */
    pub messages: Vec<SourceMessage>,
    /** raw tool-choice directive, if any */
    pub tool_choice: Option<Value>,
    /** unrecognized top-level fields */
    pub pass_through: Map<String, Value>,
}

/* --- start of code -------------------------------------------------------------------------- */

impl SourcePayload {
    ///
    /// Decode a raw request body.
    ///
    /// # Arguments
    ///  * `body` - raw JSON bytes
    ///
    /// # Returns
    ///  * Decoded payload
    ///  * `GatewayError::InvalidRequestBody` if the body is not JSON or not shaped as a request
    pub fn from_slice(body: &[u8]) -> Result<Self> {
        let value: Value = serde_json::from_slice(body)
            .map_err(|e| GatewayError::InvalidRequestBody(format!("Invalid JSON: {}", e)))?;
        Self::from_value(value)
    }

    ///
    /// Split a decoded request object into recognized and pass-through parts.
    ///
    /// The recognized keys are removed from the map before it is kept as the
    /// pass-through set.
    pub fn from_value(value: Value) -> Result<Self> {
        let Value::Object(mut fields) = value else {
            return Err(GatewayError::InvalidRequestBody(
                "Request body must be a JSON object".to_string(),
            ));
        };

        let tools = take_sequence(&mut fields, TOOLS_KEY)?;
        let messages = take_sequence(&mut fields, MESSAGES_KEY)?;
        let tool_choice = fields.shift_remove(TOOL_CHOICE_KEY).filter(|v| !v.is_null());

        Ok(Self { tools, messages, tool_choice, pass_through: fields })
    }
}

///
/// Remove `key` from `fields` and decode it as a sequence.
///
/// Missing and `null` both decode as an empty sequence.
fn take_sequence<T: DeserializeOwned>(fields: &mut Map<String, Value>, key: &str) -> Result<Vec<T>> {
    match fields.shift_remove(key) {
        None | Some(Value::Null) => Ok(Vec::new()),
        Some(value) => serde_json::from_value(value).map_err(|e| {
            GatewayError::InvalidRequestBody(format!("Invalid '{}' field: {}", key, e))
        }),
    }
}

///
/// Narrow a tool-choice directive to the bare string the backend accepts.
///
/// An object whose `type` is a string yields that string. A directive that
/// names one specific tool, and every other shape, yields `None`. A
/// specific-tool directive is never forwarded as the bare string `"tool"`,
/// which has no meaning in the function-calling schema.
///
/// # Arguments
///  * `tool_choice` - raw directive from the request
///
/// # Returns
///  * `Some(type)` for a narrowable directive, `None` otherwise
pub fn narrow_tool_choice(tool_choice: Option<&Value>) -> Option<String> {
    let directive = tool_choice?.as_object()?;
    let choice_type = directive.get("type")?.as_str()?;

    if choice_type == SPECIFIC_TOOL_CHOICE || directive.contains_key("name") {
        return None;
    }
    Some(choice_type.to_string())
}

///
/// Build the outbound payload.
///
/// Recognized keys are written first. Pass-through fields are merged after
/// them; a pass-through entry under a recognized key is skipped explicitly, so
/// the translated values always win regardless of map semantics.
///
/// # Arguments
///  * `tools` - translated tool declarations
///  * `messages` - translated messages
///  * `tool_choice` - narrowed tool choice, if any
///  * `pass_through` - unrecognized top-level fields from the request
///
/// # Returns
///  * Ordered outbound object
///  * `GatewayError::Serialization` if a translated value cannot be serialized
pub fn assemble(
    tools: Vec<TargetTool>,
    messages: Vec<TargetMessage>,
    tool_choice: Option<String>,
    pass_through: Map<String, Value>,
) -> Result<Map<String, Value>> {
    let mut payload = Map::with_capacity(pass_through.len() + RECOGNIZED_KEYS.len());

    payload.insert(TOOLS_KEY.to_string(), serde_json::to_value(tools)?);
    payload.insert(MESSAGES_KEY.to_string(), serde_json::to_value(messages)?);
    if let Some(choice) = tool_choice {
        payload.insert(TOOL_CHOICE_KEY.to_string(), Value::String(choice));
    }

    for (key, value) in pass_through {
        if RECOGNIZED_KEYS.contains(&key.as_str()) {
            tracing::debug!("Ignoring pass-through field shadowing translated key '{}'", key);
            continue;
        }
        payload.entry(key).or_insert(value);
    }

    Ok(payload)
}

/* --- tests ------------------------------------------------------------------------------- */

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_from_value_splits_recognized_keys() {
        let payload = SourcePayload::from_value(json!({
            "model": "x",
            "tools": [{"name": "search", "description": "d", "input_schema": {}}],
            "max_tokens": 100,
            "messages": [{"role": "user", "content": [{"type": "text", "text": "hi"}]}],
            "tool_choice": {"type": "auto"},
            "stream": false
        }))
        .unwrap();

        assert_eq!(payload.tools.len(), 1);
        assert_eq!(payload.messages.len(), 1);
        assert_eq!(payload.tool_choice, Some(json!({"type": "auto"})));

        let keys: Vec<&str> = payload.pass_through.keys().map(String::as_str).collect();
        assert_eq!(keys, vec!["model", "max_tokens", "stream"]);
    }

    #[test]
    fn test_from_value_rejects_non_object() {
        let result = SourcePayload::from_value(json!([1, 2, 3]));
        assert!(matches!(result, Err(GatewayError::InvalidRequestBody(_))));
    }

    #[test]
    fn test_from_value_rejects_malformed_messages() {
        let result = SourcePayload::from_value(json!({"messages": "hello"}));
        assert!(matches!(result, Err(GatewayError::InvalidRequestBody(_))));
    }

    #[test]
    fn test_from_slice_rejects_invalid_json() {
        let result = SourcePayload::from_slice(b"{not json");
        assert!(matches!(result, Err(GatewayError::InvalidRequestBody(_))));
    }

    #[test]
    fn test_missing_and_null_sequences_are_empty() {
        let payload = SourcePayload::from_value(json!({"tools": null})).unwrap();
        assert!(payload.tools.is_empty());
        assert!(payload.messages.is_empty());
        assert!(payload.pass_through.is_empty());
    }

    #[test]
    fn test_narrow_tool_choice() {
        assert_eq!(narrow_tool_choice(Some(&json!({"type": "auto"}))).as_deref(), Some("auto"));
        assert_eq!(narrow_tool_choice(Some(&json!({"type": "any"}))).as_deref(), Some("any"));
        assert_eq!(
            narrow_tool_choice(Some(&json!({"type": "auto", "disable_parallel_tool_use": true})))
                .as_deref(),
            Some("auto")
        );

        assert_eq!(narrow_tool_choice(Some(&json!({"type": "tool", "name": "search"}))), None);
        assert_eq!(narrow_tool_choice(Some(&json!({"type": 3}))), None);
        assert_eq!(narrow_tool_choice(Some(&json!({"name": "search"}))), None);
        assert_eq!(narrow_tool_choice(Some(&json!("auto"))), None);
        assert_eq!(narrow_tool_choice(None), None);
    }

    #[test]
    fn test_assemble_preserves_pass_through() {
        let mut pass_through = Map::new();
        pass_through.insert("model".into(), json!("x"));
        pass_through.insert("temperature".into(), json!(0.2));
        pass_through.insert("metadata".into(), json!({"user_id": "u1"}));

        let payload = assemble(Vec::new(), Vec::new(), Some("auto".into()), pass_through).unwrap();

        assert_eq!(payload["model"], json!("x"));
        assert_eq!(payload["temperature"], json!(0.2));
        assert_eq!(payload["metadata"], json!({"user_id": "u1"}));
        assert_eq!(payload["tool_choice"], json!("auto"));
        assert_eq!(payload["tools"], json!([]));
        assert_eq!(payload["messages"], json!([]));

        let keys: Vec<&str> = payload.keys().map(String::as_str).collect();
        assert_eq!(keys, vec!["tools", "messages", "tool_choice", "model", "temperature", "metadata"]);
    }

    #[test]
    fn test_assemble_never_lets_pass_through_overwrite_translated_keys() {
        let mut pass_through = Map::new();
        pass_through.insert("tools".into(), json!("injected"));
        pass_through.insert("messages".into(), json!("injected"));
        pass_through.insert("tool_choice".into(), json!("injected"));

        let payload = assemble(Vec::new(), Vec::new(), None, pass_through).unwrap();

        assert_eq!(payload["tools"], json!([]));
        assert_eq!(payload["messages"], json!([]));
        assert!(!payload.contains_key("tool_choice"));
    }
}
