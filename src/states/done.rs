use crate::states::AgentState;
use crate::events::Event;
use crate::memory::AgentMemory;
use crate::tools::ToolRegistry;
use crate::llm::LlmCaller;
use async_trait::async_trait;

pub struct DoneState;

#[async_trait]
impl AgentState for DoneState {
    fn name(&self) -> &'static str { "Done" }

    async fn handle(
        &self,
        memory: &mut AgentMemory,
        _tools: &ToolRegistry,
        _llm:   &dyn LlmCaller,
    ) -> Event {
        let truncated: String = memory.final_answer.as_deref()
            .unwrap_or("[No answer]")
            .chars()
            .take(100)
            .collect();
        memory.log("Done", "TASK_COMPLETE", &truncated);
        Event::start()  // never used: the engine exits before re-entering
    }
}
