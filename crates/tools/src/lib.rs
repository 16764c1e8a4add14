//! Built-in tool implementations for Parley.
//!
//! Tools are triggered by keyword: the agent matches each tool's name
//! against the incoming message and hands the whole message to the first
//! tool that matches. Both built-ins work offline.

pub mod calculator;
pub mod web_search;

pub use calculator::CalculatorTool;
pub use web_search::WebSearchTool;

use std::sync::Arc;

use parley_core::tool::Tool;

/// The default ordered tool sequence.
///
/// Order matters: it is the keyword-match priority.
pub fn builtin_tools() -> Vec<Arc<dyn Tool>> {
    vec![Arc::new(CalculatorTool), Arc::new(WebSearchTool)]
}

/// Select built-in tools by name, preserving the requested order.
///
/// Unknown names are skipped.
pub fn tools_by_name(names: &[String]) -> Vec<Arc<dyn Tool>> {
    names
        .iter()
        .filter_map(|wanted| {
            builtin_tools()
                .into_iter()
                .find(|tool| tool.name() == wanted)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_order_is_match_priority() {
        let tools = builtin_tools();
        assert_eq!(tools[0].name(), "计算器");
        assert_eq!(tools[1].name(), "网页搜索");
    }

    #[test]
    fn select_by_name_preserves_requested_order() {
        let tools = tools_by_name(&["网页搜索".into(), "计算器".into()]);
        assert_eq!(tools.len(), 2);
        assert_eq!(tools[0].name(), "网页搜索");
        assert_eq!(tools[1].name(), "计算器");
    }

    #[test]
    fn unknown_names_are_skipped() {
        let tools = tools_by_name(&["天气".into(), "计算器".into()]);
        assert_eq!(tools.len(), 1);
        assert_eq!(tools[0].name(), "计算器");
    }
}
