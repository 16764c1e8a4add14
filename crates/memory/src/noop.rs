//! No-op memory store — disables recall entirely.

use async_trait::async_trait;

use parley_core::error::MemoryError;
use parley_core::memory::MemoryStore;

/// A no-op memory store that remembers nothing.
pub struct NoopMemory;

#[async_trait]
impl MemoryStore for NoopMemory {
    fn name(&self) -> &str {
        "none"
    }

    async fn search(&self, _query: &str) -> Result<Option<String>, MemoryError> {
        Ok(None)
    }

    async fn add(&self, _query: &str, _response: &str) -> Result<(), MemoryError> {
        Ok(())
    }
}
