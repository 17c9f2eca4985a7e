//!
//! Request translation from the content-block schema to the function-calling schema.
//!
//! Each submodule covers one stage of the pipeline:
//! - `types` - source and target data model
//! - `content` - content-block and message translation
//! - `tools` - tool definition translation
//! - `payload` - inbound decoding and outbound assembly
//! - `sanitize` - type-sanitation pass over the serialized payload
//!
//! [`RequestTranslator`] runs them in order for one request body.
//!
//! Authors:
//!   Jaro <yarenty@gmail.com>
//!
//! Copyright (c) 2026 SkyCorp

/* --- modules --------------------------------------------------------------------------------- */

pub mod content;
pub mod payload;
pub mod sanitize;
pub mod tools;
pub mod types;

/* --- uses ------------------------------------------------------------------------------------ */

use serde_json::Value;

use crate::config::{LogLevel, MultiBlockPolicy};
use crate::error::{GatewayError, Result};

pub use content::{translate_block, translate_message};
pub use payload::{SourcePayload, assemble, narrow_tool_choice};
pub use sanitize::{sanitize_serialized, sanitize_value};
pub use tools::translate_tool;

/* --- types ----------------------------------------------------------------------------------- */

///
/// Result of translating one request body.
#[derive(Debug, Clone, PartialEq)]
pub struct Translation {
    /** sanitized outbound payload, ready to forward */
    pub payload: Value,
    /** content blocks dropped by the first-block collapse */
    pub dropped_blocks: usize,
    /** objects rewritten by the sanitation pass */
    pub sanitized: usize,
}

///
/// Runs the full translation pipeline for one request.
///
/// Stateless apart from its settings; one instance is shared by all requests.
#[derive(Debug, Clone)]
pub struct RequestTranslator {
    /** logging level for debug output */
    log_level: LogLevel,
    /** handling of messages with more than one content block */
    multi_block: MultiBlockPolicy,
}

/* --- start of code -------------------------------------------------------------------------- */

impl RequestTranslator {
    ///
    /// Create a new translator.
    ///
    /// # Arguments
    ///  * `log_level` - logging level for debug output
    ///  * `multi_block` - handling of multi-block messages
    pub fn new(log_level: LogLevel, multi_block: MultiBlockPolicy) -> Self {
        Self { log_level, multi_block }
    }

    ///
    /// Translate a raw request body into the sanitized outbound payload.
    ///
    /// Decodes the body, translates tools and messages, narrows the tool
    /// choice, assembles the payload with pass-through fields, serializes it
    /// and runs the sanitation pass on the serialized form.
    ///
    /// # Arguments
    ///  * `body` - raw inbound JSON
    ///
    /// # Returns
    ///  * Outbound payload with translation statistics
    ///  * `GatewayError::InvalidRequestBody` if the body cannot be decoded
    ///  * `GatewayError::MalformedContent` if a message cannot be translated
    ///  * `GatewayError::SanitationDecode` if the serialized payload cannot be re-read
    pub fn translate(&self, body: &[u8]) -> Result<Translation> {
        let request = SourcePayload::from_slice(body)?;

        self.debug(&format!(
            "Translating {} tool(s), {} message(s), {} pass-through field(s)",
            request.tools.len(),
            request.messages.len(),
            request.pass_through.len()
        ));

        let tools: Vec<_> = request.tools.into_iter().map(translate_tool).collect();

        let mut messages = Vec::with_capacity(request.messages.len());
        let mut dropped_blocks = 0;
        for (index, message) in request.messages.into_iter().enumerate() {
            let translated = translate_message(message, self.multi_block).map_err(|e| match e {
                GatewayError::MalformedContent(msg) => {
                    GatewayError::MalformedContent(format!("messages[{}]: {}", index, msg))
                }
                other => other,
            })?;

            if translated.dropped_blocks > 0 {
                tracing::warn!(
                    "messages[{}]: only the first content block is forwarded, {} block(s) dropped",
                    index,
                    translated.dropped_blocks
                );
                dropped_blocks += translated.dropped_blocks;
            }
            messages.push(translated.message);
        }

        let tool_choice = narrow_tool_choice(request.tool_choice.as_ref());
        if request.tool_choice.is_some() && tool_choice.is_none() {
            self.debug(&format!(
                "Tool choice {:?} has no bare-string equivalent, omitting",
                request.tool_choice
            ));
        }

        let assembled = assemble(tools, messages, tool_choice, request.pass_through)?;
        let serialized = serde_json::to_string(&assembled)?;
        let sanitized = sanitize_serialized(&serialized)?;

        if sanitized.rewritten > 0 {
            tracing::warn!(
                "Sanitation rewrote {} tool-shaped object(s) to text",
                sanitized.rewritten
            );
        }

        Ok(Translation { payload: sanitized.payload, dropped_blocks, sanitized: sanitized.rewritten })
    }

    ///
    /// Log debug message if trace logging is enabled.
    ///
    /// # Arguments
    ///  * `msg` - debug message to log
    pub(crate) fn debug(&self, msg: &str) {
        if self.log_level.is_trace_enabled() {
            tracing::debug!("[TRACE] {}", msg);
        }
    }
}

impl Default for RequestTranslator {
    fn default() -> Self {
        Self::new(LogLevel::Info, MultiBlockPolicy::Collapse)
    }
}

/* --- tests ------------------------------------------------------------------------------- */
