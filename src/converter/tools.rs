//!
//! Tool definition translation.
//!
//! Authors:
//!   Jaro <yarenty@gmail.com>
//!
//! Copyright (c) 2026 SkyCorp

/* --- uses ------------------------------------------------------------------------------------ */

use crate::converter::types::{SourceTool, TargetFunction, TargetTool};

/* --- constants ------------------------------------------------------------------------------ */

/** Tool type of every translated declaration */
pub const FUNCTION_TYPE: &str = "function";

/* --- start of code -------------------------------------------------------------------------- */

///
/// Translate a source tool declaration into an OpenAI-style function declaration.
///
/// `input_schema` is relocated to `function.parameters` as a parsed value,
/// unknown nested members included.
pub fn translate_tool(tool: SourceTool) -> TargetTool {
    TargetTool {
        tool_type: FUNCTION_TYPE.to_string(),
        function: TargetFunction {
            name: tool.name,
            description: tool.description,
            parameters: tool.input_schema,
        },
    }
}

/* --- tests ------------------------------------------------------------------------------- */
