//! Keyword memory — in-process recall by substring match.
//!
//! Stores completed exchanges in a Vec and recalls the most recent one
//! whose text overlaps the query. No embeddings, no persistence; useful
//! for tests and ephemeral sessions.

use async_trait::async_trait;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::debug;
use uuid::Uuid;

use parley_core::error::MemoryError;
use parley_core::memory::MemoryStore;

/// One recorded exchange.
#[derive(Debug, Clone)]
struct Exchange {
    id: Uuid,
    query: String,
    response: String,
}

/// An in-process memory store with case-insensitive substring recall.
///
/// An exchange matches when its recorded text contains the search text,
/// or the search text contains the recorded query. The most recent match
/// wins and is rendered as `"{query} -> {response}"`.
pub struct KeywordMemory {
    exchanges: Arc<RwLock<Vec<Exchange>>>,
}

impl KeywordMemory {
    pub fn new() -> Self {
        Self {
            exchanges: Arc::new(RwLock::new(Vec::new())),
        }
    }

    /// Number of stored exchanges.
    pub async fn len(&self) -> usize {
        self.exchanges.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.exchanges.read().await.is_empty()
    }

    /// Drop all stored exchanges.
    pub async fn clear(&self) {
        self.exchanges.write().await.clear();
    }
}

impl Default for KeywordMemory {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl MemoryStore for KeywordMemory {
    fn name(&self) -> &str {
        "keyword"
    }

    async fn search(&self, query: &str) -> Result<Option<String>, MemoryError> {
        let needle = query.to_lowercase();
        if needle.is_empty() {
            return Ok(None);
        }

        let exchanges = self.exchanges.read().await;
        let hit = exchanges.iter().rev().find(|e| {
            let stored = format!("{} {}", e.query, e.response).to_lowercase();
            stored.contains(&needle) || needle.contains(&e.query.to_lowercase())
        });

        if let Some(e) = hit {
            debug!(memory_id = %e.id, "Recalled exchange");
            return Ok(Some(format!("{} -> {}", e.query, e.response)));
        }

        Ok(None)
    }

    async fn add(&self, query: &str, response: &str) -> Result<(), MemoryError> {
        let mut exchanges = self.exchanges.write().await;
        exchanges.push(Exchange {
            id: Uuid::new_v4(),
            query: query.to_string(),
            response: response.to_string(),
        });
        Ok(())
    }
}
