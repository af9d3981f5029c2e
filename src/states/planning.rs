use crate::states::AgentState;
use crate::events::Event;
use crate::memory::AgentMemory;
use crate::tools::ToolRegistry;
use crate::llm::LlmCaller;
use crate::types::{LlmResponse, ToolCall};
use async_trait::async_trait;

/// Awaits the model's next move: tool calls or a final answer.
pub struct PlanningState;

impl PlanningState {
    fn handle_tool_calls(&self, memory: &mut AgentMemory, tools: Vec<ToolCall>) -> Event {
        if tools.is_empty() {
            memory.error = Some("LLM requested an empty set of tool calls".to_string());
            memory.log("Planning", "LLM_ERROR", "empty tool call batch");
            return Event::fatal_error();
        }

        let names: Vec<&str> = tools.iter().map(|t| t.name.as_str()).collect();
        let data = format!("tools={:?}", names);
        memory.pending_tool_calls = tools;
        memory.log("Planning", "LLM_TOOL_CALL", &data);
        Event::llm_tool_call()
    }

    fn handle_final_answer(&self, memory: &mut AgentMemory, content: String) -> Event {
        let preview: String = content.chars().take(100).collect();
        memory.final_answer = Some(content);
        memory.log("Planning", "LLM_FINAL_ANSWER", &preview);
        Event::llm_final_answer()
    }
}

#[async_trait]
impl AgentState for PlanningState {
    fn name(&self) -> &'static str { "Planning" }

    async fn handle(
        &self,
        memory: &mut AgentMemory,
        tools:  &ToolRegistry,
        llm:    &dyn LlmCaller,
    ) -> Event {
        // 1. Guard: max steps
        if memory.step >= memory.config.max_steps {
            memory.error = Some(format!("Max steps {} exceeded", memory.config.max_steps));
            memory.log("Planning", "MAX_STEPS", &format!("step={}", memory.step));
            return Event::max_steps();
        }

        // 2. Increment step
        memory.step += 1;
        memory.log("Planning", "STEP_START", &format!("step={}/{}", memory.step, memory.config.max_steps));

        // 3. Call LLM
        let model = memory.config.model.clone();
        let response = match llm.call_async(memory, tools, &model).await {
            Ok(resp) => resp,
            Err(err) => {
                tracing::error!(error = %err, step = memory.step, "LLM call failed");
                memory.error = Some(err.clone());
                memory.log("Planning", "LLM_ERROR", &err);
                return Event::fatal_error();
            }
        };

        if let Some(usage) = response.usage() {
            memory.usage.add(usage);
        }

        match response {
            LlmResponse::ToolCall { tool, .. } => self.handle_tool_calls(memory, vec![tool]),
            LlmResponse::ParallelToolCalls { tools, .. } => self.handle_tool_calls(memory, tools),
            LlmResponse::FinalAnswer { content, .. } => self.handle_final_answer(memory, content),
        }
    }
}
