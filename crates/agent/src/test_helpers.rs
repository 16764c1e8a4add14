//! Shared test doubles for agent and collaborator tests.

use std::sync::Mutex;

use async_trait::async_trait;

use parley_core::error::{GeneratorError, MemoryError, ToolError};
use parley_core::generator::{GenerateRequest, ResponseGenerator};
use parley_core::memory::MemoryStore;
use parley_core::tool::Tool;

/// A generator that returns a queue of scripted replies.
///
/// Every request is recorded for inspection. Panics if more calls are
/// made than replies provided.
pub struct ScriptedGenerator {
    replies: Mutex<Vec<String>>,
    requests: Mutex<Vec<GenerateRequest>>,
}

impl ScriptedGenerator {
    pub fn new(replies: Vec<&str>) -> Self {
        Self {
            replies: Mutex::new(replies.into_iter().map(String::from).collect()),
            requests: Mutex::new(Vec::new()),
        }
    }

    /// A generator with a single scripted reply.
    pub fn single(reply: &str) -> Self {
        Self::new(vec![reply])
    }

    pub fn call_count(&self) -> usize {
        self.requests.lock().unwrap().len()
    }

    /// The most recent request seen, if any.
    pub fn last_request(&self) -> Option<GenerateRequest> {
        self.requests.lock().unwrap().last().cloned()
    }
}

#[async_trait]
impl ResponseGenerator for ScriptedGenerator {
    fn name(&self) -> &str {
        "scripted"
    }

    async fn generate(&self, request: GenerateRequest) -> Result<String, GeneratorError> {
        self.requests.lock().unwrap().push(request);

        let mut replies = self.replies.lock().unwrap();
        if replies.is_empty() {
            panic!("ScriptedGenerator: no more replies queued");
        }
        Ok(replies.remove(0))
    }
}

/// A memory store that returns a fixed context and records all calls.
pub struct RecordingMemory {
    context: Option<String>,
    searches: Mutex<Vec<String>>,
    added: Mutex<Vec<(String, String)>>,
}

impl RecordingMemory {
    /// Always recalls the given context.
    pub fn with_context(context: &str) -> Self {
        Self {
            context: Some(context.to_string()),
            searches: Mutex::new(Vec::new()),
            added: Mutex::new(Vec::new()),
        }
    }

    /// Never recalls anything.
    pub fn empty() -> Self {
        Self {
            context: None,
            searches: Mutex::new(Vec::new()),
            added: Mutex::new(Vec::new()),
        }
    }

    pub fn searches(&self) -> Vec<String> {
        self.searches.lock().unwrap().clone()
    }

    pub fn added(&self) -> Vec<(String, String)> {
        self.added.lock().unwrap().clone()
    }
}

#[async_trait]
impl MemoryStore for RecordingMemory {
    fn name(&self) -> &str {
        "recording"
    }

    async fn search(&self, query: &str) -> Result<Option<String>, MemoryError> {
        self.searches.lock().unwrap().push(query.to_string());
        Ok(self.context.clone())
    }

    async fn add(&self, query: &str, response: &str) -> Result<(), MemoryError> {
        self.added
            .lock()
            .unwrap()
            .push((query.to_string(), response.to_string()));
        Ok(())
    }
}

/// A memory store whose every operation fails.
pub struct FailingMemory;

#[async_trait]
impl MemoryStore for FailingMemory {
    fn name(&self) -> &str {
        "failing"
    }

    async fn search(&self, _query: &str) -> Result<Option<String>, MemoryError> {
        Err(MemoryError::QueryFailed("memory backend offline".into()))
    }

    async fn add(&self, _query: &str, _response: &str) -> Result<(), MemoryError> {
        Err(MemoryError::Storage("memory backend offline".into()))
    }
}

/// A tool that counts its invocations and returns a fixed reply.
pub struct CountingTool {
    name: String,
    reply: String,
    calls: Mutex<usize>,
}

impl CountingTool {
    pub fn new(name: &str, reply: &str) -> Self {
        Self {
            name: name.to_string(),
            reply: reply.to_string(),
            calls: Mutex::new(0),
        }
    }

    pub fn calls(&self) -> usize {
        *self.calls.lock().unwrap()
    }
}

#[async_trait]
impl Tool for CountingTool {
    fn name(&self) -> &str {
        &self.name
    }

    fn description(&self) -> &str {
        "counts invocations"
    }

    async fn execute(&self, _input: &str) -> Result<String, ToolError> {
        *self.calls.lock().unwrap() += 1;
        Ok(self.reply.clone())
    }
}

/// A tool whose execution always fails.
pub struct FailingTool {
    name: String,
}

impl FailingTool {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
        }
    }
}

#[async_trait]
impl Tool for FailingTool {
    fn name(&self) -> &str {
        &self.name
    }

    fn description(&self) -> &str {
        "always fails"
    }

    async fn execute(&self, _input: &str) -> Result<String, ToolError> {
        Err(ToolError::ExecutionFailed {
            tool_name: self.name.clone(),
            reason: "模拟故障".into(),
        })
    }
}
