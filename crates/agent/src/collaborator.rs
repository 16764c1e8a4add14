//! Multi-agent collaboration — sequential piping between named agents.
//!
//! A collaborator holds a registry of named agents and runs a task
//! through them in a caller-given order, feeding each agent's reply into
//! the next agent's input.
//!
//! # Architecture
//!
//! ```text
//! Task
//!   │
//!   ▼
//! ┌──────────┐    ┌──────────┐    ┌──────────┐
//! │ Agent A   │ →  │ Agent B   │ →  │ Agent C   │
//! └──────────┘    └──────────┘    └──────────┘
//!      each reply becomes the next agent's input
//! ```

use std::collections::HashMap;

use tracing::{debug, info};

use parley_core::error::Result;

use crate::agent::Agent;

/// A registry of named agents with sequential task execution.
#[derive(Default)]
pub struct Collaborator {
    agents: HashMap<String, Agent>,
}

impl Collaborator {
    pub fn new() -> Self {
        Self {
            agents: HashMap::new(),
        }
    }

    /// Register an agent under a name. Re-adding a name replaces the
    /// previous agent. The agent's personality is stamped with its role.
    pub fn add_agent(&mut self, name: impl Into<String>, mut agent: Agent) {
        let name = name.into();
        agent.set_personality(format!("你是{name}，负责相应任务"));
        self.agents.insert(name, agent);
    }

    /// Look up a registered agent by name.
    pub fn agent(&self, name: &str) -> Option<&Agent> {
        self.agents.get(name)
    }

    /// Number of registered agents.
    pub fn len(&self) -> usize {
        self.agents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.agents.is_empty()
    }

    /// Run a task through the named agents in order.
    ///
    /// Each agent's reply is wrapped and handed to the next one.
    /// Unregistered names are skipped silently; capability errors from an
    /// agent's turn propagate. The result is every agent's labeled reply,
    /// joined with blank lines.
    pub async fn collaborate(&mut self, task: &str, sequence: &[&str]) -> Result<String> {
        info!(agents = sequence.len(), "Starting collaboration");

        let mut current_input = format!("任务: {task}\n\n");
        let mut results = Vec::new();

        for name in sequence {
            let Some(agent) = self.agents.get_mut(*name) else {
                debug!(agent = *name, "Skipping unregistered agent");
                continue;
            };

            let response = agent.chat(&current_input).await?;

            results.push(format!("=== {name} ===\n{response}"));
            current_input = format!("前面的工作:\n{response}\n\n需要继续:\n");
        }

        Ok(results.join("\n\n"))
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_helpers::*;
    use parley_core::agent::AgentConfig;
    use parley_core::error::Error;
    use std::sync::Arc;

    fn agent_with(generator: Arc<ScriptedGenerator>) -> Agent {
        Agent::new(AgentConfig::default(), generator)
    }

    #[tokio::test]
    async fn collaborate_pipes_between_agents() {
        let gen_a = Arc::new(ScriptedGenerator::single("甲的成果"));
        let gen_b = Arc::new(ScriptedGenerator::single("乙的成果"));

        let mut collaborator = Collaborator::new();
        collaborator.add_agent("研究员", agent_with(gen_a.clone()));
        collaborator.add_agent("作家", agent_with(gen_b.clone()));

        let result = collaborator
            .collaborate("写一篇短文", &["研究员", "作家"])
            .await
            .unwrap();

        assert_eq!(result, "=== 研究员 ===\n甲的成果\n\n=== 作家 ===\n乙的成果");

        // The first agent sees the task template.
        assert_eq!(
            gen_a.last_request().unwrap().prompt(),
            Some("任务: 写一篇短文\n\n")
        );
        // The second agent sees the first one's wrapped output.
        assert_eq!(
            gen_b.last_request().unwrap().prompt(),
            Some("前面的工作:\n甲的成果\n\n需要继续:\n")
        );
    }

    #[tokio::test]
    async fn unregistered_names_are_skipped_silently() {
        let gen_a = Arc::new(ScriptedGenerator::single("甲的成果"));
        let gen_b = Arc::new(ScriptedGenerator::single("乙的成果"));

        let mut collaborator = Collaborator::new();
        collaborator.add_agent("研究员", agent_with(gen_a));
        collaborator.add_agent("作家", agent_with(gen_b.clone()));

        let result = collaborator
            .collaborate("写一篇短文", &["研究员", "编辑", "作家"])
            .await
            .unwrap();

        // Exactly two labeled blocks; the missing name leaves no trace.
        assert_eq!(result.matches("=== ").count(), 2);
        assert!(!result.contains("编辑"));
        // The skipped name does not disturb the piping.
        assert_eq!(
            gen_b.last_request().unwrap().prompt(),
            Some("前面的工作:\n甲的成果\n\n需要继续:\n")
        );
    }

    #[tokio::test]
    async fn add_agent_stamps_personality() {
        let mut collaborator = Collaborator::new();
        collaborator.add_agent("研究员", agent_with(Arc::new(ScriptedGenerator::new(vec![]))));

        let agent = collaborator.agent("研究员").unwrap();
        assert_eq!(agent.config().personality, "你是研究员，负责相应任务");
    }

    #[tokio::test]
    async fn re_adding_a_name_replaces_the_agent() {
        let first = Arc::new(ScriptedGenerator::single("旧"));
        let second = Arc::new(ScriptedGenerator::single("新"));

        let mut collaborator = Collaborator::new();
        collaborator.add_agent("研究员", agent_with(first.clone()));
        collaborator.add_agent("研究员", agent_with(second.clone()));

        assert_eq!(collaborator.len(), 1);

        let result = collaborator
            .collaborate("任务", &["研究员"])
            .await
            .unwrap();
        assert_eq!(result, "=== 研究员 ===\n新");
        assert_eq!(first.call_count(), 0);
    }

    #[tokio::test]
    async fn empty_sequence_yields_empty_result() {
        let mut collaborator = Collaborator::new();
        collaborator.add_agent("研究员", agent_with(Arc::new(ScriptedGenerator::new(vec![]))));

        let result = collaborator.collaborate("任务", &[]).await.unwrap();
        assert!(result.is_empty());
    }

    #[tokio::test]
    async fn agent_capability_errors_propagate() {
        let generator = Arc::new(ScriptedGenerator::single("不会用到"));
        let agent = agent_with(generator).with_memory(Arc::new(FailingMemory));

        let mut collaborator = Collaborator::new();
        collaborator.add_agent("研究员", agent);

        let err = collaborator
            .collaborate("任务", &["研究员"])
            .await
            .unwrap_err();
        assert!(matches!(err, Error::Memory(_)));
    }
}
