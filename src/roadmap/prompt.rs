//! Prompt assembly for the roadmap coach.

use schemars::schema_for;

use super::model::GoalResponse;

/// The five answers collected from the user, embedded verbatim in the
/// user message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserProfile {
    pub goal:           String,
    pub skill_level:    String,
    pub duration_weeks: u32,
    pub daily_minutes:  u32,
    pub preferences:    String,
}

const ROLE: &str = "\
You are a world-class goal-setting coach in the Achieve app, with deep knowledge of any goal a user brings.
Your job is to help the user plan how to master a goal they care about.
Use the following information from the user to build a detailed, structured GoalResponse roadmap:

- user_goal: what the user wants to achieve.
- skill_level: their starting experience level (e.g. beginner, intermediate, advanced).
- duration_weeks: how many weeks they want to work on it.
- time_commitment_per_day_minutes: how much time per day they can dedicate.
- personalization_notes: preferences, learning styles, tools they like or dislike, or other constraints.

Your output must include:
- An overall strategy
- Weekly checkpoints (title, summary, goals, assignments)
- Assignments with time estimates and linked resources
- Success criteria
- General resources and tracking metrics where relevant

Use the search_resources tool to find real tutorials, guides and videos instead of inventing links.";

/// Format instructions carrying the JSON Schema generated from [`GoalResponse`].
pub fn format_instructions() -> String {
    let schema = schema_for!(GoalResponse);
    let schema_json = serde_json::to_string(&schema)
        .unwrap_or_else(|_| "{}".to_string());

    format!(
        "The output must be a single JSON instance that conforms to the JSON schema below.\n\
         Answer with the JSON document only: no commentary before or after it.\n\n\
         Here is the output schema:\n```\n{schema_json}\n```"
    )
}

/// Full system prompt: role, required sections and format instructions.
pub fn system_prompt() -> String {
    format!(
        "{ROLE}\n\nYou must return your result in this exact format:\n{}",
        format_instructions()
    )
}

/// The user message for one run.
pub fn user_message(profile: &UserProfile) -> String {
    format!(
        "The user's goal is: {}\n\
         Their current skill level is: {}\n\
         They want to work on this for {} weeks.\n\
         They have {} minutes per day to dedicate.\n\
         Their learning preferences or notes are: {}\n",
        profile.goal,
        profile.skill_level,
        profile.duration_weeks,
        profile.daily_minutes,
        profile.preferences,
    )
}
