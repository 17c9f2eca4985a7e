//!
//! Content-block and message translation.
//!
//! Maps one source content block onto one flattened target item, and one source
//! message onto one target message. Only the first block of a message decides
//! the outcome; see [`translate_message`].
//!
//! Authors:
//!   Jaro <yarenty@gmail.com>
//!
//! Copyright (c) 2026 SkyCorp

/* --- uses ------------------------------------------------------------------------------------ */

use crate::config::MultiBlockPolicy;
use crate::converter::types::{SourceBlock, SourceMessage, TargetItem, TargetMessage};
use crate::error::{GatewayError, Result};

/* --- constants ------------------------------------------------------------------------------ */

/** Block type of a tool invocation */
pub const TOOL_USE: &str = "tool_use";

/** Block type of a tool result */
pub const TOOL_RESULT: &str = "tool_result";

/** Block type of plain text */
pub const TEXT: &str = "text";

/** Role assigned to messages that start with a tool-shaped block */
pub const TOOL_ROLE: &str = "tool";

/* --- types ----------------------------------------------------------------------------------- */

///
/// Result of translating one message.
#[derive(Debug, Clone, PartialEq)]
pub struct TranslatedMessage {
    /** the outbound message */
    pub message: TargetMessage,
    /** number of source blocks after the first that were not emitted */
    pub dropped_blocks: usize,
}

/* --- start of code -------------------------------------------------------------------------- */

/// Whether a block type has no first-class representation in the target schema.
pub fn is_tool_shaped(block_type: &str) -> bool {
    block_type == TOOL_USE || block_type == TOOL_RESULT
}

///
/// Translate one source content block into one target content item.
///
/// Tool-shaped blocks (`tool_use`, `tool_result`) become `text` items whose
/// text is the first nested content element; `id`, `input`, `cache_control`
/// and `name` come from the outer block. Every other block keeps its declared
/// type and carries its fields straight over.
///
/// # Arguments
///  * `block` - source block to translate
///
/// # Returns
///  * Flattened target item
///  * `GatewayError::MalformedContent` if a tool-shaped block has no nested content
pub fn translate_block(block: SourceBlock) -> Result<TargetItem> {
    if !is_tool_shaped(&block.block_type) {
        return Ok(TargetItem {
            item_type: block.block_type,
            text: block.text,
            id: block.id,
            input: block.input,
            cache_control: block.cache_control,
            name: block.name,
        });
    }

    let text = block.content.as_ref().and_then(|content| content.first_text()).ok_or_else(|| {
        GatewayError::MalformedContent(format!(
            "{} block has no nested content to read text from",
            block.block_type
        ))
    })?;

    Ok(TargetItem {
        item_type: TEXT.to_string(),
        text: Some(text),
        id: block.id.or(block.tool_use_id),
        input: block.input,
        cache_control: block.cache_control,
        name: block.name,
    })
}

///
/// Translate one source message into one target message.
///
/// The first content block alone drives the result: a tool-shaped first block
/// forces the role to `tool`, anything else keeps the source role. The output
/// always holds exactly one content item, the translated first block. Under
/// [`MultiBlockPolicy::Collapse`] any further blocks are dropped and counted;
/// under [`MultiBlockPolicy::Reject`] they fail the message instead.
///
/// # Arguments
///  * `message` - source message to translate
///  * `policy` - what to do with blocks after the first
///
/// # Returns
///  * Translated message plus the number of dropped blocks
///  * `GatewayError::MalformedContent` if the message has no content blocks,
///    the first block cannot be translated, or the policy rejects extra blocks
pub fn translate_message(
    message: SourceMessage,
    policy: MultiBlockPolicy,
) -> Result<TranslatedMessage> {
    let block_count = message.content.len();

    if block_count > 1 && policy == MultiBlockPolicy::Reject {
        return Err(GatewayError::MalformedContent(format!(
            "multi-block messages are not supported ({} blocks in '{}' message)",
            block_count, message.role
        )));
    }

    let first = message.content.into_iter().next().ok_or_else(|| {
        GatewayError::MalformedContent(format!("'{}' message has no content blocks", message.role))
    })?;

    let role = if is_tool_shaped(&first.block_type) { TOOL_ROLE.to_string() } else { message.role };
    let item = translate_block(first)?;

    Ok(TranslatedMessage {
        message: TargetMessage { role, content: vec![item] },
        dropped_blocks: block_count - 1,
    })
}

/* --- tests ------------------------------------------------------------------------------- */
