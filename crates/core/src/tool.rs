//! Tool trait — the abstraction over agent capabilities.
//!
//! Tools are named units of work the agent can trigger from a user
//! message: do math, look something up, and so on. Dispatch is by
//! case-insensitive substring match of the tool's name against the raw
//! message, in configuration order.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::ToolError;

/// A descriptor for external tool-calling protocols.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolSchema {
    /// The tool name
    pub name: String,

    /// Description of what the tool does
    pub description: String,

    /// Descriptor kind; always "function"
    #[serde(rename = "type")]
    pub kind: String,
}

/// The core Tool trait.
///
/// `name` and `description` are static identity and metadata, not
/// computed. Execution takes the raw user message and returns the tool's
/// output text, or a tool-specific error on invalid input or internal
/// failure.
#[async_trait]
pub trait Tool: Send + Sync {
    /// The unique, non-empty name of this tool (e.g., "计算器").
    fn name(&self) -> &str;

    /// A description of what this tool does.
    fn description(&self) -> &str;

    /// Execute the tool against the raw user message.
    async fn execute(&self, input: &str) -> std::result::Result<String, ToolError>;

    /// Descriptor for external tool-calling protocols.
    fn schema(&self) -> ToolSchema {
        ToolSchema {
            name: self.name().to_string(),
            description: self.description().to_string(),
            kind: "function".into(),
        }
    }
}
