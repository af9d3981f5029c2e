use std::collections::{HashMap, HashSet};
use std::sync::Arc;
use crate::engine::AgentEngine;
use crate::error::AgentError;
use crate::memory::AgentMemory;
use crate::tools::{ToolRegistry, ToolFn};
use crate::llm::LlmCaller;
use crate::states::{
    AgentState, IdleState, PlanningState, ActingState,
    ObservingState, DoneState, ErrorState,
};
use crate::transitions::build_transition_table;
use crate::types::{AgentConfig, State};

pub struct AgentBuilder {
    memory: AgentMemory,
    tools:  ToolRegistry,
    llm:    Option<Arc<dyn LlmCaller>>,
    config: Option<AgentConfig>,
}

impl AgentBuilder {
    pub fn new(task: impl Into<String>) -> Self {
        Self {
            memory: AgentMemory::new(task),
            tools:  ToolRegistry::new(),
            llm:    None,
            config: None,
        }
    }

    pub fn system_prompt(mut self, p: impl Into<String>) -> Self {
        self.memory.system_prompt = p.into(); self
    }

    pub fn llm(mut self, llm: Arc<dyn LlmCaller>) -> Self {
        self.llm = Some(llm); self
    }

    pub fn config(mut self, config: AgentConfig) -> Self {
        self.config = Some(config); self
    }

    pub fn max_steps(mut self, n: usize) -> Self {
        self.memory.config.max_steps = n; self
    }

    /// Set the model used for every planning step.
    ///
    /// ```no_run
    /// # use achieve::AgentBuilder;
    /// AgentBuilder::new("task").model("gpt-4o-mini");
    /// ```
    pub fn model(mut self, model: impl Into<String>) -> Self {
        self.memory.config.model = model.into(); self
    }

    pub fn tool(
        mut self,
        name:        impl Into<String>,
        description: impl Into<String>,
        schema:      serde_json::Value,
        func:        ToolFn,
    ) -> Self {
        self.tools.register(name, description, schema, func);
        self
    }

    /// Builds the AgentEngine with the default state handlers.
    pub fn build(mut self) -> Result<AgentEngine, AgentError> {
        let llm = self.llm
            .ok_or_else(|| AgentError::BuildError("LLM caller is required".to_string()))?;

        if let Some(config) = self.config {
            self.memory.config = config;
        }

        if self.memory.config.max_steps == 0 {
            return Err(AgentError::BuildError("max_steps must be at least 1".to_string()));
        }

        let handlers: Vec<Box<dyn AgentState>> = vec![
            Box::new(IdleState),
            Box::new(PlanningState),
            Box::new(ActingState),
            Box::new(ObservingState),
            Box::new(DoneState),
            Box::new(ErrorState),
        ];
        let handlers: HashMap<String, Box<dyn AgentState>> = handlers.into_iter()
            .map(|h| (h.name().to_string(), h))
            .collect();

        let terminal_states: HashSet<String> = [State::done(), State::error()]
            .into_iter()
            .map(|s| s.0)
            .collect();

        Ok(AgentEngine::new(
            self.memory,
            self.tools,
            llm,
            build_transition_table(),
            handlers,
            terminal_states,
        ))
    }
}
