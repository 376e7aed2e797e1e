//! JSON argument parsing for model-issued tool calls.
//!
//! ```rust
//! use btooling::parse_tool_arguments;
//!
//! let args = parse_tool_arguments(r#"{"query":"rust"}"#).expect("arguments should parse");
//! assert_eq!(args["query"], "rust");
//! ```

use serde_json::Value;

use crate::ToolError;

pub fn parse_tool_arguments(args_json: &str) -> Result<Value, ToolError> {
    serde_json::from_str(args_json)
        .map_err(|err| ToolError::invalid_arguments(format!("invalid JSON arguments: {err}")))
}

/// Renders a broker result the way it is fed back to the model.
///
/// A missing or null `output` is reported as an empty object.
pub fn render_tool_output(data: &Value) -> String {
    match data.get("output") {
        Some(output) if !output.is_null() => output.to_string(),
        _ => "{}".to_string(),
    }
}
