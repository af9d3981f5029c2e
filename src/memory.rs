use crate::budget::TokenUsage;
use crate::trace::{TraceEntry, Trace};
use crate::types::{ToolCall, HistoryEntry, AgentConfig, ToolResult};
use chrono::Utc;

#[derive(Debug)]
pub struct AgentMemory {
    // ── Task definition ──────────────────────────────────
    /// The composed user message
    pub task:               String,
    /// The system prompt prepended to every LLM call
    pub system_prompt:      String,

    // ── Execution state ──────────────────────────────────
    /// Current model round (incremented at the start of each Planning cycle)
    pub step:               usize,

    // ── Tool call lifecycle ──────────────────────────────
    /// Set by PlanningState when the LLM requests tools, consumed by ActingState
    pub pending_tool_calls: Vec<ToolCall>,
    /// Set by ActingState, consumed by ObservingState
    pub tool_results:       Vec<ToolResult>,

    // ── History and results ──────────────────────────────
    /// Ordered list of completed tool calls and their observations
    pub history:            Vec<HistoryEntry>,
    /// Set when the LLM produces a final answer
    pub final_answer:       Option<String>,
    /// Set when the agent encounters an unrecoverable error
    pub error:              Option<String>,
    /// Token usage summed over every model round
    pub usage:              TokenUsage,

    // ── Configuration ────────────────────────────────────
    pub config:             AgentConfig,

    // ── Observability ────────────────────────────────────
    pub trace:              Trace,
}

impl AgentMemory {
    pub fn new(task: impl Into<String>) -> Self {
        Self {
            task:               task.into(),
            system_prompt:      String::new(),
            step:               0,
            pending_tool_calls: Vec::new(),
            tool_results:       Vec::new(),
            history:            Vec::new(),
            final_answer:       None,
            error:              None,
            usage:              TokenUsage::default(),
            config:             AgentConfig::default(),
            trace:              Trace::new(),
        }
    }

    pub fn with_system_prompt(mut self, prompt: impl Into<String>) -> Self {
        self.system_prompt = prompt.into();
        self
    }

    pub fn with_config(mut self, config: AgentConfig) -> Self {
        self.config = config;
        self
    }

    /// Records an event into the trace log. Called by all state handlers.
    pub fn log(&mut self, state: &str, event: &str, data: &str) {
        tracing::debug!(state, event, data, step = self.step, "agent trace");
        self.trace.record(TraceEntry {
            step:      self.step,
            state:     state.to_string(),
            event:     event.to_string(),
            data:      data.to_string(),
            timestamp: Utc::now(),
        });
    }

    /// Builds the chat messages array sent to the LLM.
    ///
    /// Tool calls from the same step are grouped under one assistant
    /// message, followed by one `tool` message per result, as the
    /// chat-completions protocol requires.
    pub fn build_messages(&self) -> Vec<serde_json::Value> {
        let mut messages = Vec::new();

        if !self.system_prompt.is_empty() {
            messages.push(serde_json::json!({
                "role": "system",
                "content": self.system_prompt
            }));
        }

        messages.push(serde_json::json!({
            "role": "user",
            "content": &self.task
        }));

        let mut steps: Vec<Vec<&HistoryEntry>> = Vec::new();
        for entry in &self.history {
            if let Some(last_step) = steps.last_mut() {
                if last_step[0].step == entry.step {
                    last_step.push(entry);
                    continue;
                }
            }
            steps.push(vec![entry]);
        }

        for step_entries in steps {
            let mut oai_tool_calls = Vec::new();
            let mut tool_results = Vec::new();

            for (idx, entry) in step_entries.into_iter().enumerate() {
                let tool_id = entry.tool.id.clone()
                    .unwrap_or_else(|| format!("call_{}_{}", entry.step, idx));

                oai_tool_calls.push(serde_json::json!({
                    "id": tool_id,
                    "type": "function",
                    "function": {
                        "name": entry.tool.name,
                        "arguments": serde_json::to_string(&entry.tool.args).unwrap_or_default()
                    }
                }));

                tool_results.push(serde_json::json!({
                    "role": "tool",
                    "tool_call_id": tool_id,
                    "content": entry.observation
                }));
            }

            messages.push(serde_json::json!({
                "role": "assistant",
                "content": null,
                "tool_calls": oai_tool_calls
            }));

            messages.extend(tool_results);
        }

        messages
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn entry(step: usize, id: Option<&str>, query: &str) -> HistoryEntry {
        HistoryEntry {
            step,
            tool: ToolCall {
                name: "search_resources".to_string(),
                args: HashMap::from([("query".to_string(), serde_json::json!(query))]),
                id:   id.map(str::to_string),
            },
            observation: "[]".to_string(),
            success:     true,
        }
    }

    #[test]
    fn messages_start_with_system_then_user() {
        let memory = AgentMemory::new("learn go").with_system_prompt("you are a coach");
        let messages = memory.build_messages();
        assert_eq!(messages.len(), 2);
        assert_eq!(messages[0]["role"], "system");
        assert_eq!(messages[1]["role"], "user");
        assert_eq!(messages[1]["content"], "learn go");
    }

    #[test]
    fn empty_system_prompt_is_omitted() {
        let messages = AgentMemory::new("task").build_messages();
        assert_eq!(messages.len(), 1);
        assert_eq!(messages[0]["role"], "user");
    }

    #[test]
    fn same_step_calls_share_one_assistant_message() {
        let mut memory = AgentMemory::new("task");
        memory.history.push(entry(1, Some("a"), "go basics"));
        memory.history.push(entry(1, Some("b"), "go concurrency"));
        memory.history.push(entry(2, None, "go testing"));

        let messages = memory.build_messages();
        // user, assistant(2 calls), tool, tool, assistant(1 call), tool
        assert_eq!(messages.len(), 6);
        assert_eq!(messages[1]["tool_calls"].as_array().map(Vec::len), Some(2));
        assert_eq!(messages[2]["tool_call_id"], "a");
        assert_eq!(messages[3]["tool_call_id"], "b");
        assert_eq!(messages[4]["tool_calls"][0]["id"], "call_2_0");
        assert_eq!(messages[5]["tool_call_id"], "call_2_0");
    }
}
