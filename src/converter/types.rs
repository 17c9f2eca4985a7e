//!
//! Source and target data model for request translation.
//!
//! Source types describe the inbound content-block schema (typed tools,
//! structured content blocks). Target types describe the outbound OpenAI-style
//! function-calling schema with flattened text content.
//!
//! Authors:
//!   Jaro <yarenty@gmail.com>
//!
//! Copyright (c) 2026 SkyCorp

/* --- uses ------------------------------------------------------------------------------------ */

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/* --- source types ---------------------------------------------------------------------------- */

///
/// Tool declaration as offered by the caller.
///
/// The input schema is an opaque JSON Schema fragment; it is relocated, never
/// interpreted.
#[derive(Debug, Clone, Deserialize)]
pub struct SourceTool {
    /** tool name */
    pub name: String,
    /** human readable description */
    #[serde(default)]
    pub description: String,
    /** JSON schema of the tool input */
    #[serde(default)]
    pub input_schema: Value,
}

///
/// One typed unit inside a source message.
///
/// Which fields are populated depends on `block_type`: `text` blocks carry
/// `text`, `tool_use` blocks carry `id`/`name`/`input`, `tool_result` blocks
/// carry a tool-use id and nested `content`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SourceBlock {
    /** declared block type: text, tool_use, tool_result, ... */
    #[serde(rename = "type")]
    pub block_type: String,
    /** free text */
    pub text: Option<String>,
    /** invocation identifier */
    pub id: Option<String>,
    /** identifier of the invocation a tool_result answers */
    pub tool_use_id: Option<String>,
    /** structured tool input */
    pub input: Option<Value>,
    /** tool name */
    pub name: Option<String>,
    /** prompt caching annotation, carried through untouched */
    pub cache_control: Option<Value>,
    /** nested content items of a tool_result */
    pub content: Option<NestedContent>,
}

///
/// Nested content of a tool-shaped block.
///
/// The caller may send either a sequence of items or a bare string.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum NestedContent {
    /** bare string, equivalent to a single text item */
    Text(String),
    /** ordered sequence of items */
    Items(Vec<NestedItem>),
}

/// One element of a nested content sequence.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct NestedItem {
    #[serde(rename = "type")]
    pub item_type: Option<String>,
    pub text: Option<String>,
}

///
/// One source message: role plus ordered content blocks.
///
/// A bare string `content` is accepted as a single text block; a missing one
/// decodes as an empty sequence.
#[derive(Debug, Clone, Deserialize)]
pub struct SourceMessage {
    /** message role */
    pub role: String,
    /** ordered content blocks */
    #[serde(default, deserialize_with = "deserialize_blocks")]
    pub content: Vec<SourceBlock>,
}

/* --- target types ---------------------------------------------------------------------------- */

///
/// Flattened content item understood by the backend.
///
/// Absent source fields are omitted on the wire.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TargetItem {
    #[serde(rename = "type")]
    pub item_type: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub input: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cache_control: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

/// Outbound message.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TargetMessage {
    pub role: String,
    pub content: Vec<TargetItem>,
}

///
/// OpenAI-style function declaration.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TargetTool {
    /** always "function" */
    #[serde(rename = "type")]
    pub tool_type: String,
    /** function definition */
    pub function: TargetFunction,
}

/// Function part of a [`TargetTool`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TargetFunction {
    pub name: String,
    pub description: String,
    pub parameters: Value,
}

/* --- start of code -------------------------------------------------------------------------- */

impl SourceBlock {
    /// Build a plain text block.
    pub fn text(text: impl Into<String>) -> Self {
        Self { block_type: "text".to_string(), text: Some(text.into()), ..Default::default() }
    }
}

impl NestedContent {
    ///
    /// Text of the first nested element.
    ///
    /// # Returns
    ///  * `Some(text)` when a first element exists (empty string if it has no text)
    ///  * `None` when the sequence is empty
    pub fn first_text(&self) -> Option<String> {
        match self {
            NestedContent::Text(text) => Some(text.clone()),
            NestedContent::Items(items) => {
                items.first().map(|item| item.text.clone().unwrap_or_default())
            }
        }
    }
}

///
/// Accept `content` as either a block sequence or a bare string.
fn deserialize_blocks<'de, D>(deserializer: D) -> std::result::Result<Vec<SourceBlock>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum MessageContent {
        Text(String),
        Blocks(Vec<SourceBlock>),
    }

    Ok(match Option::<MessageContent>::deserialize(deserializer)? {
        Some(MessageContent::Text(text)) => vec![SourceBlock::text(text)],
        Some(MessageContent::Blocks(blocks)) => blocks,
        None => Vec::new(),
    })
}

/* --- tests ------------------------------------------------------------------------------- */
