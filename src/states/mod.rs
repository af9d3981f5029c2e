use crate::events::Event;
use crate::memory::AgentMemory;
use crate::tools::ToolRegistry;
use crate::llm::LlmCaller;
use async_trait::async_trait;

mod idle;
mod planning;
mod acting;
mod observing;
mod done;
mod error;

pub use idle::IdleState;
pub use planning::PlanningState;
pub use acting::ActingState;
pub use observing::ObservingState;
pub use done::DoneState;
pub use error::ErrorState;

/// The contract every state must fulfill.
///
/// 1. `handle()` performs the state's work using only `memory`, `tools`, and `llm`.
/// 2. `handle()` MUST return an Event and never panic.
/// 3. Non-fatal failures (tool error, unknown tool) are recorded as
///    observations and reported through the matching failure Event.
/// 4. Fatal failures set `memory.error` and return `Event::fatal_error()`.
/// 5. Always call `memory.log()` at least once per handle() call.
#[async_trait]
pub trait AgentState: Send + Sync {
    /// Returns the unique string name of this state.
    /// Must match the key used in the engine's handler map.
    fn name(&self) -> &'static str;

    /// Execute this state's logic. Returns the Event that drives
    /// the next transition lookup in the transition table.
    async fn handle(
        &self,
        memory: &mut AgentMemory,
        tools:  &ToolRegistry,
        llm:    &dyn LlmCaller,
    ) -> Event;
}
