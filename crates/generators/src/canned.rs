//! Canned-phrase generator — an offline stand-in for a model backend.
//!
//! Picks one of a fixed set of acknowledgement phrases at random, so the
//! chat pipeline can be exercised end-to-end without network access.
//! Non-deterministic by design; the turn protocol never relies on the
//! reply content.

use async_trait::async_trait;
use rand::Rng;
use tracing::debug;

use parley_core::error::GeneratorError;
use parley_core::generator::{GenerateRequest, ResponseGenerator};

/// The stock reply phrases.
const STOCK_PHRASES: [&str; 4] = [
    "这是一个很好的问题！",
    "我理解你的意思。",
    "让我来帮你解答。",
    "这是一个有趣的话题。",
];

/// A generator that replies with a random stock phrase.
#[derive(Debug, Default)]
pub struct CannedGenerator;

impl CannedGenerator {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl ResponseGenerator for CannedGenerator {
    fn name(&self) -> &str {
        "canned"
    }

    async fn generate(&self, request: GenerateRequest) -> Result<String, GeneratorError> {
        debug!(
            model = %request.model,
            history_len = request.history.len(),
            "Generating canned reply"
        );

        let idx = rand::rng().random_range(0..STOCK_PHRASES.len());
        Ok(STOCK_PHRASES[idx].to_string())
    }
}
