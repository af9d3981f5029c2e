use crate::states::AgentState;
use crate::events::Event;
use crate::memory::AgentMemory;
use crate::tools::ToolRegistry;
use crate::llm::LlmCaller;
use async_trait::async_trait;

pub struct IdleState;

#[async_trait]
impl AgentState for IdleState {
    fn name(&self) -> &'static str { "Idle" }

    async fn handle(
        &self,
        memory: &mut AgentMemory,
        tools:  &ToolRegistry,
        _llm:   &dyn LlmCaller,
    ) -> Event {
        let data = format!(
            "model='{}' max_steps={} tools={}",
            memory.config.model, memory.config.max_steps, tools.len()
        );
        memory.log("Idle", "AGENT_STARTED", &data);
        Event::start()
    }
}
