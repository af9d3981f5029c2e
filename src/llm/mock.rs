use std::sync::Mutex;
use crate::llm::LlmCaller;
use crate::memory::AgentMemory;
use crate::tools::ToolRegistry;
use crate::types::LlmResponse;
use async_trait::async_trait;

/// Scripted LLM caller: returns the programmed responses in order and
/// records every call.
pub struct MockLlmCaller {
    responses: Mutex<Vec<Result<LlmResponse, String>>>,
    call_log:  Mutex<Vec<(String, usize)>>,  // (model, messages sent)
}

impl MockLlmCaller {
    pub fn new(responses: Vec<LlmResponse>) -> Self {
        Self::with_results(responses.into_iter().map(Ok).collect())
    }

    /// Like `new`, but individual rounds may fail with a provider error.
    pub fn with_results(responses: Vec<Result<LlmResponse, String>>) -> Self {
        Self {
            responses: Mutex::new(responses),
            call_log:  Mutex::new(Vec::new()),
        }
    }

    /// Returns the number of times the caller was invoked
    pub fn call_count(&self) -> usize {
        self.call_log.lock().unwrap().len()
    }

    /// Returns the model string passed to the Nth call (0-indexed)
    pub fn model_for_call(&self, n: usize) -> Option<String> {
        self.call_log.lock().unwrap()
            .get(n)
            .map(|(model, _)| model.clone())
    }

    /// Returns how many chat messages the Nth call carried (0-indexed)
    pub fn messages_for_call(&self, n: usize) -> Option<usize> {
        self.call_log.lock().unwrap()
            .get(n)
            .map(|(_, count)| *count)
    }
}

#[async_trait]
impl LlmCaller for MockLlmCaller {
    async fn call_async(
        &self,
        memory: &AgentMemory,
        _tools: &ToolRegistry,
        model:  &str,
    ) -> Result<LlmResponse, String> {
        self.call_log.lock().unwrap()
            .push((model.to_string(), memory.build_messages().len()));

        let mut responses = self.responses.lock().unwrap();
        if responses.is_empty() {
            return Err("MockLlmCaller: no more programmed responses".to_string());
        }
        responses.remove(0)
    }
}
