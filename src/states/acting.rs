use crate::states::AgentState;
use crate::events::Event;
use crate::memory::AgentMemory;
use crate::tools::ToolRegistry;
use crate::llm::LlmCaller;
use crate::types::ToolResult;
use async_trait::async_trait;
use std::time::Instant;

/// Runs every pending tool call, in order, one at a time.
pub struct ActingState;

#[async_trait]
impl AgentState for ActingState {
    fn name(&self) -> &'static str { "Acting" }

    async fn handle(
        &self,
        memory: &mut AgentMemory,
        tools:  &ToolRegistry,
        _llm:   &dyn LlmCaller,
    ) -> Event {
        let calls = std::mem::take(&mut memory.pending_tool_calls);
        if calls.is_empty() {
            memory.error = Some("ActingState called with no pending tool calls".to_string());
            memory.log("Acting", "FATAL_ERROR", "No pending tool calls");
            return Event::fatal_error();
        }

        let mut all_ok = true;
        for call in calls {
            memory.log("Acting", "TOOL_EXECUTE", &format!(
                "tool='{}' args={:?}", call.name, call.args
            ));

            let started = Instant::now();
            let outcome = tools.execute(&call.name, &call.args).await;
            let latency_ms = started.elapsed().as_millis() as u64;

            let result = match outcome {
                Ok(output) => {
                    memory.log("Acting", "TOOL_SUCCESS", &output.chars().take(100).collect::<String>());
                    ToolResult::success(call, output, latency_ms)
                }
                Err(err) => {
                    all_ok = false;
                    tracing::warn!(tool = %call.name, error = %err, "tool call failed");
                    memory.log("Acting", "TOOL_FAILURE", &err);
                    ToolResult::failure(call, err, latency_ms)
                }
            };
            memory.tool_results.push(result);
        }

        if all_ok { Event::tool_success() } else { Event::tool_failure() }
    }
}
