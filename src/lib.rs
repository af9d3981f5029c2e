pub mod types;
pub mod memory;
pub mod events;
pub mod transitions;
pub mod tools;
pub mod engine;
pub mod trace;
pub mod error;
pub mod builder;
pub mod budget;
pub mod states;
pub mod llm;
pub mod search;
pub mod roadmap;
pub mod store;
pub mod config;
pub mod cli;

// Convenience re-exports at crate root
pub use builder::AgentBuilder;
pub use engine::AgentEngine;
pub use memory::AgentMemory;
pub use types::{State, LlmResponse, ToolCall, HistoryEntry, AgentConfig};
pub use events::Event;
pub use tools::{ToolRegistry, ToolFn};
pub use llm::LlmCaller;
pub use trace::{TraceEntry, Trace};
pub use error::AgentError;
pub use config::Settings;
pub use roadmap::{GoalResponse, ParseFailure, RawResponse, RoadmapGenerator, UserProfile};
pub use search::ResourceSearchTool;
pub use store::{FileRoadmapStore, RoadmapStore};
