use crate::memory::AgentMemory;
use crate::tools::ToolRegistry;
use crate::types::LlmResponse;
use async_trait::async_trait;

mod openai;
mod mock;

pub use openai::OpenAiCaller;
pub use mock::MockLlmCaller;

/// The single interface between the state machine and any LLM provider.
///
/// # Contract
/// - Must be Send + Sync (used behind `Arc<dyn LlmCaller>`)
/// - Returns Ok(LlmResponse) on any valid LLM interaction
/// - Returns Err(String) ONLY for unrecoverable failures:
///   - Network or authentication failure
///   - Response unparseable as LlmResponse
/// - MUST build the tool schemas from `tools.schemas()` and include
///   them in every API call
/// - MUST build messages from `memory.build_messages()`
///
/// No retry happens at this layer or above it.
#[async_trait]
pub trait LlmCaller: Send + Sync {
    async fn call_async(
        &self,
        memory: &AgentMemory,
        tools:  &ToolRegistry,
        model:  &str,
    ) -> Result<LlmResponse, String>;
}
