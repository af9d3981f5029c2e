use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::budget::TokenUsage;

/// A named state in the agent's state machine.
///
/// States are identified by their string name. The crate ships with
/// the constructors used by the roadmap loop (`State::idle()`,
/// `State::planning()`, …); the engine only cares that every state it
/// reaches has a registered handler.
///
/// ```
/// use achieve::State;
/// let planning = State::new("Planning");
/// assert_eq!(planning, State::planning());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct State(pub String);

impl State {
    /// Create a new state with the given name.
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    /// Returns the string name of this state.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns true for the two terminal states (`"Done"` or `"Error"`).
    pub fn is_terminal(&self) -> bool {
        self.0 == "Done" || self.0 == "Error"
    }

    // ── Well-known state constructors ───────────────────────────────────
    /// Before the first model round.
    pub fn idle()      -> Self { Self::new("Idle") }
    /// Awaiting the model's next move.
    pub fn planning()  -> Self { Self::new("Planning") }
    /// Executing the tool calls the model requested.
    pub fn acting()    -> Self { Self::new("Acting") }
    /// Committing tool observations to history.
    pub fn observing() -> Self { Self::new("Observing") }
    pub fn done()      -> Self { Self::new("Done") }
    pub fn error()     -> Self { Self::new("Error") }
}

impl std::fmt::Display for State {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A tool invocation requested by the LLM.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolCall {
    pub name: String,
    pub args: HashMap<String, serde_json::Value>,
    pub id:   Option<String>,
}

/// Result of a single tool execution within one model round.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolResult {
    pub tool:       ToolCall,
    pub output:     String,      // tool output as-is, or "ERROR: ..."
    pub success:    bool,
    pub latency_ms: u64,
}

impl ToolResult {
    pub fn success(tool: ToolCall, output: String, latency_ms: u64) -> Self {
        Self { tool, output, success: true, latency_ms }
    }

    pub fn failure(tool: ToolCall, error: String, latency_ms: u64) -> Self {
        Self { tool, output: format!("ERROR: {}", error), success: false, latency_ms }
    }
}

/// A completed tool invocation stored in history.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HistoryEntry {
    pub step:        usize,
    pub tool:        ToolCall,
    pub observation: String,
    pub success:     bool,
}

/// What the LLM can return. Always one of these variants.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum LlmResponse {
    /// LLM wants to invoke a tool
    ToolCall {
        tool:  ToolCall,
        usage: Option<TokenUsage>,
    },
    /// LLM wants several tools in one round; they still run one after another
    ParallelToolCalls {
        tools: Vec<ToolCall>,
        usage: Option<TokenUsage>,
    },
    /// LLM produced a final answer; the loop is complete
    FinalAnswer {
        content: String,
        usage:   Option<TokenUsage>,
    },
}

impl LlmResponse {
    pub fn usage(&self) -> Option<TokenUsage> {
        match self {
            LlmResponse::ToolCall { usage, .. }
            | LlmResponse::ParallelToolCalls { usage, .. }
            | LlmResponse::FinalAnswer { usage, .. } => *usage,
        }
    }
}

/// Tuning for the tool-calling loop.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AgentConfig {
    /// Hard cap on the number of model rounds
    pub max_steps: usize,

    /// Model name passed to the LLM caller. Empty means "caller's own default".
    pub model: String,
}

impl Default for AgentConfig {
    fn default() -> Self {
        Self {
            max_steps: 15,
            model:     "gpt-4o-mini".to_string(),
        }
    }
}
