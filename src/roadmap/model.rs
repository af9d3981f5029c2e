//! Typed records for a learning roadmap.
//!
//! Field names and nesting are the persisted JSON format; optional fields
//! serialize as `null` when absent.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Kind of learning resource. Known tags are matched case-sensitively;
/// anything else the model invents is kept verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ResourceKind {
    Video,
    Article,
    Course,
    Other(String),
}

impl ResourceKind {
    pub fn as_str(&self) -> &str {
        match self {
            ResourceKind::Video    => "video",
            ResourceKind::Article  => "article",
            ResourceKind::Course   => "course",
            ResourceKind::Other(s) => s,
        }
    }
}

impl From<String> for ResourceKind {
    fn from(s: String) -> Self {
        match s.as_str() {
            "video"   => ResourceKind::Video,
            "article" => ResourceKind::Article,
            "course"  => ResourceKind::Course,
            _         => ResourceKind::Other(s),
        }
    }
}

impl From<ResourceKind> for String {
    fn from(kind: ResourceKind) -> Self {
        match kind {
            ResourceKind::Other(s) => s,
            known                  => known.as_str().to_string(),
        }
    }
}

impl std::fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single learning resource: a tutorial, guide, video or course.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct Resource {
    pub title: String,
    /// Resource type, e.g. "video", "article", "course"
    #[serde(rename = "type")]
    #[schemars(with = "String")]
    pub kind: ResourceKind,
    pub url: String,
    pub description: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct Assignment {
    pub description: String,
    pub objective: String,
    pub resources: Vec<Resource>,
    pub estimated_time_minutes: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct WeeklyCheckpoint {
    /// Week number, starting at 1
    pub week: u32,
    pub title: String,
    pub summary: String,
    pub goals: Vec<String>,
    pub assignments: Vec<Assignment>,
    pub reflection_prompt: Option<String>,
}

/// The complete roadmap the coach produces for one goal.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct GoalResponse {
    /// The user's stated goal
    pub user_goal: String,
    /// The total duration in weeks (default 6)
    pub duration_weeks: u32,
    /// Estimated starting skill level, e.g. 'beginner'
    pub skill_level: String,
    /// User's daily available time to work on this goal
    pub time_commitment_per_day_minutes: u32,
    /// A brief summary of the strategy to achieve this goal
    pub overall_strategy: String,
    /// Detailed weekly breakdown of roadmap
    pub weekly_checkpoints: Vec<WeeklyCheckpoint>,
    /// General purpose resources for this goal
    pub general_resources: Vec<Resource>,
    /// Optional metrics for progress tracking
    pub tracking_metrics: Option<Vec<String>>,
    /// What constitutes success or completion of this goal
    pub success_criteria: Option<String>,
    /// Notes specific to this user's learning preferences or habits
    pub personalization_notes: Option<String>,
}

impl GoalResponse {
    /// Checks the constraints serde cannot express: positive week counts.
    pub fn check_invariants(&self) -> Result<(), String> {
        if self.duration_weeks == 0 {
            return Err("duration_weeks: must be a positive integer, got 0".to_string());
        }
        for (idx, checkpoint) in self.weekly_checkpoints.iter().enumerate() {
            if checkpoint.week == 0 {
                return Err(format!(
                    "weekly_checkpoints[{}].week: must be a positive integer, got 0", idx
                ));
            }
        }
        Ok(())
    }

    /// Total minutes across every assignment in every week.
    pub fn total_assignment_minutes(&self) -> u64 {
        self.weekly_checkpoints.iter()
            .flat_map(|w| w.assignments.iter())
            .map(|a| u64::from(a.estimated_time_minutes))
            .sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resource_kind_keeps_unknown_tags_verbatim() {
        let r: Resource = serde_json::from_value(serde_json::json!({
            "title": "Go by Example",
            "type": "podcast",
            "url": "https://gobyexample.com",
        })).unwrap();
        assert_eq!(r.kind, ResourceKind::Other("podcast".to_string()));
        assert_eq!(r.description, None);
        assert_eq!(serde_json::to_value(&r).unwrap()["type"], "podcast");
    }

    #[test]
    fn known_resource_kinds_round_trip() {
        for tag in ["video", "article", "course"] {
            let kind = ResourceKind::from(tag.to_string());
            assert!(!matches!(kind, ResourceKind::Other(_)));
            assert_eq!(String::from(kind), tag);
        }
    }

    #[test]
    fn schema_exposes_type_field_and_required_list() {
        let schema = serde_json::to_value(schemars::schema_for!(GoalResponse)).unwrap();
        let required = schema["required"].as_array().unwrap();
        assert!(required.contains(&serde_json::json!("overall_strategy")));
        assert!(!required.contains(&serde_json::json!("success_criteria")));
        assert_eq!(schema["definitions"]["Resource"]["properties"]["type"]["type"], "string");
    }
}
