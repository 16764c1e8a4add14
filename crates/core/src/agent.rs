//! Agent configuration types.

use serde::{Deserialize, Serialize};

/// Plain-data configuration for an agent's behavior.
///
/// Capability objects (tools, memory, generator) are installed on the
/// agent itself; this struct holds only the serializable settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AgentConfig {
    /// Model name forwarded to the generator
    #[serde(default = "default_model")]
    pub model: String,

    /// Sampling temperature
    #[serde(default = "default_temperature")]
    pub temperature: f32,

    /// Maximum tokens per reply
    #[serde(default = "default_max_tokens")]
    pub max_tokens: u32,

    /// The agent's persona description
    #[serde(default = "default_personality")]
    pub personality: String,
}

fn default_model() -> String {
    "gpt-3.5-turbo".into()
}
fn default_temperature() -> f32 {
    0.7
}
fn default_max_tokens() -> u32 {
    1000
}
fn default_personality() -> String {
    "你是一个有帮助的AI助手".into()
}

impl Default for AgentConfig {
    fn default() -> Self {
        Self {
            model: default_model(),
            temperature: default_temperature(),
            max_tokens: default_max_tokens(),
            personality: default_personality(),
        }
    }
}
