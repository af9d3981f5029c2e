use crate::states::AgentState;
use crate::events::Event;
use crate::memory::AgentMemory;
use crate::tools::ToolRegistry;
use crate::llm::LlmCaller;
use crate::types::HistoryEntry;
use async_trait::async_trait;

pub struct ObservingState;

#[async_trait]
impl AgentState for ObservingState {
    fn name(&self) -> &'static str { "Observing" }

    async fn handle(
        &self,
        memory: &mut AgentMemory,
        _tools: &ToolRegistry,
        _llm:   &dyn LlmCaller,
    ) -> Event {
        let results = std::mem::take(&mut memory.tool_results);
        for res in results {
            memory.log("Observing", "HISTORY_COMMIT", &format!(
                "step={} tool={} success={} latency_ms={}",
                memory.step, res.tool.name, res.success, res.latency_ms
            ));
            memory.history.push(HistoryEntry {
                step:        memory.step,
                tool:        res.tool,
                observation: res.output,
                success:     res.success,
            });
        }

        Event::r#continue()
    }
}
