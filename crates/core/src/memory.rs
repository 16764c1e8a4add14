//! MemoryStore trait — the pluggable recall hook.
//!
//! A memory store lets the agent carry context across turns: before
//! generating, the agent asks for context relevant to the incoming
//! message; after generating, it records the exchange.
//!
//! Unlike tool failures, memory failures are NOT absorbed by the agent:
//! they propagate to the caller.

use async_trait::async_trait;

use crate::error::MemoryError;

/// The core MemoryStore trait.
///
/// Implementations: keyword (in-process substring recall), no-op.
#[async_trait]
pub trait MemoryStore: Send + Sync {
    /// The backend name (e.g., "keyword", "none").
    fn name(&self) -> &str;

    /// Find context relevant to the query.
    ///
    /// `None` (and, at the agent layer, an empty string) means "nothing
    /// relevant" and skips augmentation.
    async fn search(&self, query: &str) -> std::result::Result<Option<String>, MemoryError>;

    /// Record one completed exchange.
    async fn add(&self, query: &str, response: &str) -> std::result::Result<(), MemoryError>;
}
