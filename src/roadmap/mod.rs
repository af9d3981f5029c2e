//! Learning roadmaps: the typed records, the coach prompts, the agent
//! that produces them and the path that validates the model's answer.

mod generator;
mod model;
mod normalize;
mod prompt;

pub use generator::{RawResponse, RoadmapGenerator, STOPPED_OUTPUT};
pub use model::{Assignment, GoalResponse, Resource, ResourceKind, WeeklyCheckpoint};
pub use normalize::{normalize_and_validate, parse_document, strip_code_fence, validate, ParseFailure};
pub use prompt::{format_instructions, system_prompt, user_message, UserProfile};
