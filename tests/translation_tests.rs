//! Translation tests for toolgate
//!
//! Drives whole request bodies through the public translator and checks the
//! outbound payload: tool and message shapes, tool-choice narrowing, the
//! pass-through guarantee and the sanitation guarantee.

use serde_json::{Value, json};
use toolgate::config::{LogLevel, MultiBlockPolicy};
use toolgate::{GatewayError, RequestTranslator};

/// Translate a JSON body with the default translator
fn translate(body: Value) -> Value {
    RequestTranslator::default()
        .translate(body.to_string().as_bytes())
        .expect("translation should succeed")
        .payload
}

/// True if any object in the tree has a tool-shaped `type` member
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

/// Text message with tools and a pass-through model
#[test]
fn test_end_to_end_text_request() {
    let payload = translate(json!({
        "tools": [{"name": "search", "description": "web search", "input_schema": {"type": "object"}}],
        "messages": [{"role": "user", "content": [{"type": "text", "text": "hi"}]}],
        "model": "x"
    }));

    assert_eq!(
        payload["tools"],
        json!([{"type": "function", "function": {
            "name": "search", "description": "web search", "parameters": {"type": "object"}
        }}])
    );
    assert_eq!(payload["messages"], json!([{"role": "user", "content": [{"type": "text", "text": "hi"}]}]));
    assert_eq!(payload["model"], json!("x"));
}

/// Tool-use first block becomes a tool-role text item with the nested text
#[test]
fn test_end_to_end_tool_use_message() {
    let payload = translate(json!({
        "messages": [{
            "role": "assistant",
            "content": [{
                "type": "tool_use",
                "id": "t1",
                "name": "search",
                "input": {"q": "x"},
                "content": [{"type": "text", "text": "result body"}]
            }]
        }]
    }));

    assert_eq!(
        payload["messages"][0],
        json!({"role": "tool", "content": [{
            "type": "text", "text": "result body", "id": "t1", "input": {"q": "x"}, "name": "search"
        }]})
    );
}

/// Tool results reference their invocation through `tool_use_id`
#[test]
fn test_tool_result_message() {
    let payload = translate(json!({
        "messages": [{
            "role": "user",
            "content": [{
                "type": "tool_result",
                "tool_use_id": "t1",
                "content": [{"type": "text", "text": "42 results"}, {"type": "text", "text": "unused"}],
                "cache_control": {"type": "ephemeral"}
            }]
        }]
    }));

    assert_eq!(
        payload["messages"][0],
        json!({"role": "tool", "content": [{
            "type": "text", "text": "42 results", "id": "t1", "cache_control": {"type": "ephemeral"}
        }]})
    );
}

/// Tool parameters are relocated without being interpreted
#[test]
fn test_tool_parameters_deep_equal() {
    let schema = json!({
        "type": "object",
        "properties": {"q": {"type": "string", "enum": ["tool_use", "tool_result"]}},
        "required": ["q"],
        "additionalProperties": false
    });

    let payload = translate(json!({
        "tools": [{"name": "lookup", "description": "", "input_schema": schema}],
        "messages": []
    }));

    assert_eq!(payload["tools"][0]["function"]["name"], "lookup");
    assert_eq!(payload["tools"][0]["function"]["parameters"], schema);
}

/// Every unrecognized top-level key reaches the backend untouched
#[test]
fn test_pass_through_fields_preserved() {
    let pass_through = json!({
        "model": "gpt-compatible",
        "max_tokens": 1024,
        "stream": true,
        "temperature": 0.7,
        "stop_sequences": ["\n\nHuman:"],
        "metadata": {"user_id": "u-1", "nested": {"deep": [1, 2, 3]}},
        "system": "You are helpful."
    });

    let mut body = pass_through.clone();
    body["messages"] = json!([{"role": "user", "content": [{"type": "text", "text": "hi"}]}]);

    let payload = translate(body);
    for (key, value) in pass_through.as_object().unwrap() {
        assert_eq!(&payload[key], value, "pass-through field '{}' changed", key);
    }
}

/// Output keys: translated keys first, then pass-through in request order
#[test]
fn test_output_key_order() {
    let body = r#"{"model":"x","messages":[],"zeta":1,"alpha":2,"tool_choice":{"type":"auto"}}"#;
    let payload = RequestTranslator::default().translate(body.as_bytes()).unwrap().payload;

    let keys: Vec<&str> = payload.as_object().unwrap().keys().map(String::as_str).collect();
    assert_eq!(keys, vec!["tools", "messages", "tool_choice", "model", "zeta", "alpha"]);
}

/// Tool choice narrowing
#[test]
fn test_tool_choice_narrowing() {
    let auto = translate(json!({"messages": [], "tool_choice": {"type": "auto"}}));
    assert_eq!(auto["tool_choice"], json!("auto"));

    let any = translate(json!({"messages": [], "tool_choice": {"type": "any"}}));
    assert_eq!(any["tool_choice"], json!("any"));

    let specific =
        translate(json!({"messages": [], "tool_choice": {"type": "tool", "name": "search"}}));
    assert!(specific.get("tool_choice").is_none());

    let absent = translate(json!({"messages": []}));
    assert!(absent.get("tool_choice").is_none());
}

/// Same-named fields can never shadow translated output
#[test]
fn test_recognized_keys_come_from_translators() {
    let payload = translate(json!({
        "tools": [],
        "messages": [{"role": "user", "content": "plain string content"}]
    }));

    assert_eq!(payload["tools"], json!([]));
    assert_eq!(
        payload["messages"],
        json!([{"role": "user", "content": [{"type": "text", "text": "plain string content"}]}])
    );
}

/// No tool-shaped type survives anywhere in the outbound payload
#[test]
fn test_sanitation_invariant() {
    let payload = translate(json!({
        "messages": [
            {"role": "assistant", "content": [{"type": "tool_use", "id": "a", "name": "n", "input": {},
                "content": [{"type": "text", "text": "done"}]}]},
            {"role": "user", "content": [{"type": "text", "text": "mention tool_use in prose"}]}
        ],
        "system": [{"type": "tool_result", "tool_use_id": "a", "content": []}],
        "metadata": {"trace": [{"type": "tool_use"}]}
    }));

    assert!(!has_tool_type(&payload));
    assert_eq!(payload["system"][0]["type"], "text");
    assert_eq!(payload["system"][0]["text"], "incorrect tool result");
    assert_eq!(payload["metadata"]["trace"][0]["text"], "incorrect tool use");
    assert_eq!(payload["messages"][1]["content"][0]["text"], "mention tool_use in prose");
}

/// A pass-through tool object keeps its other fields but its text becomes the placeholder
#[test]
fn test_sanitation_replaces_existing_text() {
    let payload = translate(json!({
        "messages": [],
        "system": [{"type": "tool_use", "text": "real text", "id": "t1"}]
    }));

    assert_eq!(payload["system"][0]["type"], "text");
    assert_eq!(payload["system"][0]["text"], "incorrect tool use");
    assert_eq!(payload["system"][0]["id"], "t1");
}

/// Running the payload through the translator again changes nothing
#[test]
fn test_translation_output_is_stable() {
    let first = translate(json!({
        "messages": [{"role": "user", "content": [{"type": "text", "text": "hi"}]}],
        "system": [{"type": "tool_use"}],
        "model": "x"
    }));

    let mut reparsed = first.clone();
    let rewritten = toolgate::converter::sanitize_value(&mut reparsed);
    assert_eq!(rewritten, 0);
    assert_eq!(reparsed, first);
}

/// Only the first block is forwarded under the default policy
#[test]
fn test_multi_block_collapse() {
    let translation = RequestTranslator::default()
        .translate(
            json!({"messages": [{"role": "user", "content": [
                {"type": "text", "text": "first"},
                {"type": "text", "text": "second"},
                {"type": "tool_result", "tool_use_id": "x", "content": [{"type": "text", "text": "third"}]}
            ]}]})
            .to_string()
            .as_bytes(),
        )
        .unwrap();

    assert_eq!(translation.dropped_blocks, 2);
    assert_eq!(
        translation.payload["messages"][0],
        json!({"role": "user", "content": [{"type": "text", "text": "first"}]})
    );
}

/// The reject policy refuses multi-block messages
#[test]
fn test_multi_block_reject() {
    let translator = RequestTranslator::new(LogLevel::Info, MultiBlockPolicy::Reject);
    let body = json!({"messages": [{"role": "user", "content": [
        {"type": "text", "text": "first"},
        {"type": "text", "text": "second"}
    ]}]});

    let result = translator.translate(body.to_string().as_bytes());
    assert!(matches!(result, Err(GatewayError::MalformedContent(_))));
}

/// Empty content sequences are reported, not indexed
#[test]
fn test_empty_content_is_malformed() {
    let translator = RequestTranslator::default();

    let empty_message = json!({"messages": [{"role": "user", "content": []}]});
    assert!(matches!(
        translator.translate(empty_message.to_string().as_bytes()),
        Err(GatewayError::MalformedContent(_))
    ));

    let empty_nested = json!({"messages": [{"role": "user", "content": [
        {"type": "tool_result", "tool_use_id": "t1", "content": []}
    ]}]});
    assert!(matches!(
        translator.translate(empty_nested.to_string().as_bytes()),
        Err(GatewayError::MalformedContent(_))
    ));
}

/// Bodies that are not a request object are rejected
#[test]
fn test_invalid_bodies() {
    let translator = RequestTranslator::default();

    for body in [&b"not json"[..], b"[]", b"\"text\"", b"{\"messages\": 7}"] {
        assert!(
            matches!(translator.translate(body), Err(GatewayError::InvalidRequestBody(_))),
            "body {:?} should be rejected",
            String::from_utf8_lossy(body)
        );
    }
}
