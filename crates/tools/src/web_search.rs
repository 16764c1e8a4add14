//! Web search tool — stub that returns canned results.
//!
//! In production this would call a real search API. The stub returns a
//! fixed result list so keyword dispatch can be exercised end-to-end
//! without network access.

use async_trait::async_trait;
use tracing::debug;

use parley_core::error::ToolError;
use parley_core::tool::Tool;

pub struct WebSearchTool;

#[async_trait]
impl Tool for WebSearchTool {
    fn name(&self) -> &str {
        "网页搜索"
    }

    fn description(&self) -> &str {
        "搜索网络信息"
    }

    async fn execute(&self, input: &str) -> Result<String, ToolError> {
        debug!(query_len = input.len(), "Running stub web search");

        Ok(format!(
            "🔍 搜索 '{}' 的结果:\n\n1. 示例搜索结果 1\n2. 示例搜索结果 2\n3. 示例搜索结果 3",
            input
        ))
    }
}
