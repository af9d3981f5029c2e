use std::collections::{HashMap, HashSet};
use std::sync::Arc;
use crate::states::AgentState;
use crate::events::Event;
use crate::memory::AgentMemory;
use crate::tools::ToolRegistry;
use crate::llm::LlmCaller;
use crate::transitions::TransitionTable;
use crate::trace::Trace;
use crate::types::State;
use crate::error::AgentError;

pub struct AgentEngine {
    pub memory:      AgentMemory,
    pub tools:       ToolRegistry,
    pub llm:         Arc<dyn LlmCaller>,
    state:           State,
    transitions:     TransitionTable,
    handlers:        HashMap<String, Box<dyn AgentState>>,
    terminal_states: HashSet<String>,
}

impl AgentEngine {
    /// Creates a new engine. Prefer using AgentBuilder for ergonomic construction.
    pub fn new(
        memory:          AgentMemory,
        tools:           ToolRegistry,
        llm:             Arc<dyn LlmCaller>,
        transitions:     TransitionTable,
        handlers:        HashMap<String, Box<dyn AgentState>>,
        terminal_states: HashSet<String>,
    ) -> Self {
        Self {
            memory,
            tools,
            llm,
            state: State::idle(),
            transitions,
            handlers,
            terminal_states,
        }
    }

    /// Run the agent to completion.
    /// Returns Ok(final_answer) or Err(AgentError).
    pub async fn run(&mut self) -> Result<String, AgentError> {
        // Each model round takes at most three transitions.
        let safety_cap = self.memory.config.max_steps * 3 + 3;
        let mut iterations = 0;

        while !self.terminal_states.contains(self.state.as_str()) {
            iterations += 1;
            if iterations > safety_cap {
                return Err(AgentError::SafetyCapExceeded(iterations));
            }

            self.step().await?;
        }

        // Terminal handlers only record the outcome; their event is ignored.
        if let Some(handler) = self.handlers.get(self.state.as_str()) {
            handler.handle(&mut self.memory, &self.tools, self.llm.as_ref()).await;
        }

        tracing::info!(
            state         = %self.state,
            steps         = self.memory.step,
            tool_calls    = self.memory.history.len(),
            input_tokens  = self.memory.usage.input_tokens,
            output_tokens = self.memory.usage.output_tokens,
            "agent finished"
        );

        if self.state == State::done() {
            self.memory.final_answer.clone()
                .ok_or_else(|| AgentError::AgentFailed("No answer produced".to_string()))
        } else if self.state == State::error() {
            Err(AgentError::AgentFailed(
                self.memory.error.clone()
                    .unwrap_or_else(|| "Unknown error".to_string())
            ))
        } else {
            Err(AgentError::AgentFailed(format!("Terminated in state: {}", self.state)))
        }
    }

    /// Executes a single state transition.
    pub async fn step(&mut self) -> Result<(), AgentError> {
        tracing::debug!(state = %self.state, "agent step");

        let state_name = self.state.as_str();
        let handler = self.handlers.get(state_name)
            .ok_or_else(|| AgentError::NoHandlerForState(state_name.to_string()))?;

        let event: Event = handler.handle(&mut self.memory, &self.tools, self.llm.as_ref()).await;

        let key = (self.state.clone(), event.clone());
        let next_state = self.transitions.get(&key)
            .cloned()
            .ok_or_else(|| AgentError::InvalidTransition {
                from:  self.state.clone(),
                event: event.clone(),
            })?;

        tracing::info!(from = %self.state, event = %event, to = %next_state, "transition");

        self.state = next_state;
        Ok(())
    }

    /// Returns a reference to the full execution trace.
    pub fn trace(&self) -> &Trace {
        &self.memory.trace
    }

    /// Returns the current state (useful for inspection after run).
    pub fn current_state(&self) -> &State {
        &self.state
    }
}
