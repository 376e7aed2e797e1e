//! Translation between model-side and broker-side tool names.
//!
//! The model sees `Toolkit_Tool`; the broker executes `Toolkit.Tool`. Only the
//! first separator is significant in either direction, so tool names that
//! contain further underscores survive the round trip.
//!
//! ```rust
//! use btooling::ToolName;
//!
//! let name = ToolName::from_model_name("Gmail_Send_Email");
//! assert_eq!(name.to_execution_name(), "Gmail.Send_Email");
//! assert_eq!(ToolName::from_execution_name("Gmail.Send_Email").to_model_name(), "Gmail_Send_Email");
//! ```

use std::fmt::{Display, Formatter};

const MODEL_SEPARATOR: char = '_';
const EXECUTION_SEPARATOR: char = '.';

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ToolName {
    toolkit: Option<String>,
    tool: String,
}

impl ToolName {
    pub fn new(toolkit: impl Into<String>, tool: impl Into<String>) -> Self {
        Self {
            toolkit: Some(toolkit.into()),
            tool: tool.into(),
        }
    }

    pub fn from_model_name(name: &str) -> Self {
        Self::split(name, MODEL_SEPARATOR)
    }

    pub fn from_execution_name(name: &str) -> Self {
        Self::split(name, EXECUTION_SEPARATOR)
    }

    fn split(name: &str, separator: char) -> Self {
        match name.split_once(separator) {
            Some((toolkit, tool)) => Self::new(toolkit, tool),
            None => Self {
                toolkit: None,
                tool: name.to_string(),
            },
        }
    }

    pub fn toolkit(&self) -> Option<&str> {
        self.toolkit.as_deref()
    }

    pub fn tool(&self) -> &str {
        &self.tool
    }

    pub fn to_model_name(&self) -> String {
        self.join(MODEL_SEPARATOR)
    }

    pub fn to_execution_name(&self) -> String {
        self.join(EXECUTION_SEPARATOR)
    }

    fn join(&self, separator: char) -> String {
        match &self.toolkit {
            Some(toolkit) => format!("{toolkit}{separator}{}", self.tool),
            None => self.tool.clone(),
        }
    }
}

impl Display for ToolName {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.to_execution_name())
    }
}
