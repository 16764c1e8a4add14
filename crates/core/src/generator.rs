//! ResponseGenerator trait — the abstraction over reply backends.
//!
//! A generator knows how to turn the current conversation state into a
//! reply string. The core imposes no format constraints beyond "returns
//! text", and determinism is neither guaranteed nor required: a canned
//! phrase picker and a network-backed model are equally conformant.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::GeneratorError;
use crate::message::{HistoryEntry, Role};

/// Everything a generator gets to see for one reply.
///
/// The history already ends with the user entry for the current turn
/// (possibly rewritten with recalled memory context).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerateRequest {
    /// The model to use (advisory; offline generators ignore it)
    pub model: String,

    /// Temperature (0.0 = deterministic, 1.0 = creative)
    #[serde(default = "default_temperature")]
    pub temperature: f32,

    /// Maximum tokens to generate
    pub max_tokens: u32,

    /// The agent's persona description
    pub personality: String,

    /// The conversation so far, oldest first
    pub history: Vec<HistoryEntry>,
}

fn default_temperature() -> f32 {
    0.7
}

impl GenerateRequest {
    /// The text the reply should answer: the most recent user entry.
    pub fn prompt(&self) -> Option<&str> {
        self.history
            .iter()
            .rev()
            .find(|e| e.role == Role::User)
            .map(|e| e.content.as_str())
    }
}

/// The core ResponseGenerator trait.
///
/// The agent calls `generate()` without knowing which backend is wired in.
/// There is no hidden default: every agent is constructed with an explicit
/// generator.
#[async_trait]
pub trait ResponseGenerator: Send + Sync {
    /// A human-readable name for this generator (e.g., "canned", "scripted").
    fn name(&self) -> &str;

    /// Produce a reply for the given conversation state.
    async fn generate(&self, request: GenerateRequest) -> std::result::Result<String, GeneratorError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prompt_is_last_user_entry() {
        let request = GenerateRequest {
            model: "gpt-3.5-turbo".into(),
            temperature: default_temperature(),
            max_tokens: 1000,
            personality: "你是一个有帮助的AI助手".into(),
            history: vec![
                HistoryEntry::user("第一条"),
                HistoryEntry::assistant("回复"),
                HistoryEntry::user("第二条"),
            ],
        };
        assert_eq!(request.prompt(), Some("第二条"));
    }

    #[test]
    fn prompt_empty_history() {
        let request = GenerateRequest {
            model: "gpt-3.5-turbo".into(),
            temperature: 0.7,
            max_tokens: 1000,
            personality: String::new(),
            history: vec![],
        };
        assert_eq!(request.prompt(), None);
    }
}
