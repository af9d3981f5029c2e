use std::sync::Arc;

use serde::Serialize;

use crate::builder::AgentBuilder;
use crate::engine::AgentEngine;
use crate::error::AgentError;
use crate::llm::LlmCaller;
use crate::search::{ResourceSearchTool, SEARCH_TOOL_DESCRIPTION, SEARCH_TOOL_NAME};
use crate::types::{AgentConfig, HistoryEntry};

use super::prompt::{system_prompt, user_message, UserProfile};

/// Output recorded when the agent runs out of model rounds.
pub const STOPPED_OUTPUT: &str = "Agent stopped due to iteration limit or time limit.";

/// Everything the agent produced for one run, kept for diagnostics.
#[derive(Debug, Clone, Serialize)]
pub struct RawResponse {
    /// The composed user message
    pub query:              String,
    /// The model's final answer, untouched
    pub output:             String,
    /// Tool calls and observations, in execution order
    pub intermediate_steps: Vec<HistoryEntry>,
}

/// Drives the coach agent: prompt assembly plus the tool-calling loop.
pub struct RoadmapGenerator {
    llm:    Arc<dyn LlmCaller>,
    search: Arc<ResourceSearchTool>,
    config: AgentConfig,
}

impl RoadmapGenerator {
    pub fn new(llm: Arc<dyn LlmCaller>, search: Arc<ResourceSearchTool>, config: AgentConfig) -> Self {
        Self { llm, search, config }
    }

    fn build_engine(&self, profile: &UserProfile) -> Result<AgentEngine, AgentError> {
        AgentBuilder::new(user_message(profile))
            .system_prompt(system_prompt())
            .llm(Arc::clone(&self.llm))
            .config(self.config.clone())
            .tool(
                SEARCH_TOOL_NAME,
                SEARCH_TOOL_DESCRIPTION,
                ResourceSearchTool::input_schema(),
                Arc::clone(&self.search).into_tool_fn(),
            )
            .build()
    }

    /// Runs the agent until the model gives a final answer.
    ///
    /// Running out of rounds is not an error: the response carries
    /// [`STOPPED_OUTPUT`] and the steps taken so far, and fails validation
    /// downstream like any other unusable answer. Provider errors abort
    /// the run; nothing is retried.
    pub async fn generate(&self, profile: &UserProfile) -> Result<RawResponse, AgentError> {
        let mut engine = self.build_engine(profile)?;
        tracing::info!(goal = %profile.goal, weeks = profile.duration_weeks, "generating roadmap");

        let result = engine.run().await;
        tracing::debug!(trace = %engine.trace().to_json(), "agent trace");

        let output = match result {
            Ok(output) => output,
            Err(err) if !engine.trace().for_event("MAX_STEPS").is_empty() => {
                tracing::warn!(
                    error = %err,
                    steps = engine.memory.history.len(),
                    "agent stopped before producing an answer"
                );
                STOPPED_OUTPUT.to_string()
            }
            Err(err) => {
                tracing::error!(
                    error = %err,
                    intermediate_steps = %serde_json::to_string(&engine.memory.history).unwrap_or_default(),
                    "roadmap generation failed"
                );
                return Err(err);
            }
        };

        Ok(RawResponse {
            query:              engine.memory.task.clone(),
            output,
            intermediate_steps: std::mem::take(&mut engine.memory.history),
        })
    }
}
