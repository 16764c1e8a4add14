//! The agent — one `chat` turn orchestrated over the capability traits.

use std::sync::Arc;

use chrono::Utc;
use tracing::{debug, warn};

use parley_core::agent::AgentConfig;
use parley_core::error::Result;
use parley_core::event::{DomainEvent, EventBus};
use parley_core::generator::{GenerateRequest, ResponseGenerator};
use parley_core::memory::MemoryStore;
use parley_core::message::{ConversationHistory, HistoryEntry, Role};
use parley_core::tool::Tool;

use crate::thought::ThoughtChain;

/// A conversational agent.
///
/// Owns its configuration, conversation history, and thought chain.
/// Capabilities are installed at construction time: an explicit
/// generator (never a hidden default), an ordered tool sequence
/// (insertion order = match priority), and an optional memory store.
///
/// State is owned exclusively by one instance; `chat` takes `&mut self`,
/// so turns are serialized per agent.
pub struct Agent {
    config: AgentConfig,
    generator: Arc<dyn ResponseGenerator>,
    tools: Vec<Arc<dyn Tool>>,
    memory: Option<Arc<dyn MemoryStore>>,
    history: ConversationHistory,
    thoughts: ThoughtChain,
    event_bus: Arc<EventBus>,
}

impl Agent {
    /// Create a new agent with the given configuration and generator.
    pub fn new(config: AgentConfig, generator: Arc<dyn ResponseGenerator>) -> Self {
        Self {
            config,
            generator,
            tools: Vec::new(),
            memory: None,
            history: ConversationHistory::new(),
            thoughts: ThoughtChain::new(),
            event_bus: Arc::new(EventBus::default()),
        }
    }

    /// Build an agent from loaded application settings.
    ///
    /// Installs the enabled built-in tools (in configured order) and the
    /// selected memory backend.
    pub fn from_app_config(
        settings: &parley_config::AppConfig,
        generator: Arc<dyn ResponseGenerator>,
    ) -> Self {
        let mut agent = Self::new(settings.agent_config(), generator);
        for tool in parley_tools::tools_by_name(&settings.tools.enabled) {
            agent.add_tool(tool);
        }
        if settings.memory.backend == "keyword" {
            agent = agent.with_memory(Arc::new(parley_memory::KeywordMemory::new()));
        }
        agent
    }

    /// Append a tool to the match sequence (lowest priority position).
    pub fn with_tool(mut self, tool: Arc<dyn Tool>) -> Self {
        self.tools.push(tool);
        self
    }

    /// Attach a memory store.
    pub fn with_memory(mut self, memory: Arc<dyn MemoryStore>) -> Self {
        self.memory = Some(memory);
        self
    }

    /// Append a tool to the match sequence.
    pub fn add_tool(&mut self, tool: Arc<dyn Tool>) {
        self.tools.push(tool);
    }

    /// Replace the agent's persona description.
    pub fn set_personality(&mut self, personality: impl Into<String>) {
        self.config.personality = personality.into();
    }

    pub fn config(&self) -> &AgentConfig {
        &self.config
    }

    /// The installed tool sequence, in match-priority order.
    pub fn tools(&self) -> &[Arc<dyn Tool>] {
        &self.tools
    }

    /// The event bus this agent publishes to.
    pub fn event_bus(&self) -> &Arc<EventBus> {
        &self.event_bus
    }

    /// Immutable view of the conversation history.
    pub fn history(&self) -> &ConversationHistory {
        &self.history
    }

    /// Clear the conversation history. The thought chain is untouched.
    pub fn reset(&mut self) {
        self.history.clear();
    }

    /// Record a thought.
    pub fn think(&mut self, thought: impl Into<String>) {
        self.thoughts.think(thought);
    }

    /// Immutable view of the thought chain.
    pub fn thought_chain(&self) -> &ThoughtChain {
        &self.thoughts
    }

    /// Run one chat turn.
    ///
    /// Ordering guarantee: memory search completes before the tool check;
    /// the tool check completes before generation; generation completes
    /// before the memory write. A tool-handled turn short-circuits before
    /// history recording and never writes memory.
    ///
    /// Tool failures are absorbed into the reply; memory and generator
    /// failures propagate.
    pub async fn chat(&mut self, message: &str) -> Result<String> {
        debug!(chars = message.len(), "Processing chat turn");

        // Memory recall. The effective message is rewritten with recalled
        // context, but tool matching and the eventual memory write keep
        // using the original message.
        let mut effective = message.to_string();
        if let Some(memory) = &self.memory {
            let recalled = memory.search(message).await?;
            self.event_bus.publish(DomainEvent::MemoryAccessed {
                operation: "search".into(),
                timestamp: Utc::now(),
            });

            if let Some(context) = recalled.filter(|c| !c.is_empty()) {
                debug!(context_chars = context.len(), "Recalled memory context");
                effective = format!("相关记忆: {context}\n\n用户: {message}");
            }
        }

        // Keyword tool dispatch, on the raw message. First match wins and
        // ends the turn.
        if let Some(reply) = self.dispatch_tool(message).await {
            return Ok(reply);
        }

        let reply = self.exchange(&effective).await?;

        if let Some(memory) = &self.memory {
            // The original message is stored, not the augmented variant.
            memory.add(message, &reply).await?;
            self.event_bus.publish(DomainEvent::MemoryAccessed {
                operation: "add".into(),
                timestamp: Utc::now(),
            });
        }

        Ok(reply)
    }

    /// Try each tool in order against the raw message.
    ///
    /// Returns the finished reply for the first tool whose name is a
    /// case-insensitive substring of the message; `None` when nothing
    /// matches. Execution failure is converted into a reply, not an
    /// error, and still ends the dispatch.
    async fn dispatch_tool(&self, message: &str) -> Option<String> {
        let haystack = message.to_lowercase();

        for tool in &self.tools {
            if !haystack.contains(&tool.name().to_lowercase()) {
                continue;
            }

            debug!(tool = tool.name(), "Tool matched message");
            let reply = match tool.execute(message).await {
                Ok(result) => {
                    self.event_bus.publish(DomainEvent::ToolInvoked {
                        tool_name: tool.name().to_string(),
                        success: true,
                        timestamp: Utc::now(),
                    });
                    format!("🔧 使用工具 '{}':\n{}", tool.name(), result)
                }
                Err(e) => {
                    warn!(tool = tool.name(), error = %e, "Tool execution failed");
                    self.event_bus.publish(DomainEvent::ToolInvoked {
                        tool_name: tool.name().to_string(),
                        success: false,
                        timestamp: Utc::now(),
                    });
                    format!("工具调用失败: {e}")
                }
            };
            return Some(reply);
        }

        None
    }

    /// The base exchange: record the user entry, generate, record the
    /// assistant entry.
    async fn exchange(&mut self, message: &str) -> Result<String> {
        self.history.push(HistoryEntry::user(message));

        let request = GenerateRequest {
            model: self.config.model.clone(),
            temperature: self.config.temperature,
            max_tokens: self.config.max_tokens,
            personality: self.config.personality.clone(),
            history: self.history.entries().to_vec(),
        };

        let reply = self.generator.generate(request).await?;
        self.event_bus.publish(DomainEvent::ResponseGenerated {
            model: self.config.model.clone(),
            timestamp: Utc::now(),
        });

        self.history.push(HistoryEntry::assistant(&reply));
        Ok(reply)
    }

    /// Render the conversation history and, if any thoughts were
    /// recorded, a 1-indexed thought section beneath it.
    pub fn export_dialog(&self) -> String {
        let mut out = String::from("=== 对话历史 ===\n");

        for entry in self.history.entries() {
            let role = match entry.role {
                Role::User => "👤 用户",
                Role::Assistant => "🤖 Agent",
            };
            out.push_str(&format!("{}: {}\n", role, entry.content));
        }

        if !self.thoughts.is_empty() {
            out.push_str("\n=== 思维链 ===\n");
            for (i, thought) in self.thoughts.thoughts().iter().enumerate() {
                out.push_str(&format!("{}. {}\n", i + 1, thought));
            }
        }

        out
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────
