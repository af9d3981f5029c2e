//! Runtime settings, read once from the environment at startup.

use std::path::PathBuf;

use crate::error::AgentError;
use crate::search::MAX_RESULTS;
use crate::types::AgentConfig;

pub const DEFAULT_MODEL: &str = "gpt-4o-mini";
pub const DEFAULT_DATA_DIR: &str = "data";
pub const DEFAULT_ROADMAP_NAME: &str = "user_roadmap";
pub const DEFAULT_MAX_STEPS: usize = 15;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    /// `OPENAI_API_KEY`
    pub openai_api_key: Option<String>,
    /// `OPENAI_API_BASE`, for OpenAI-compatible endpoints
    pub openai_api_base: Option<String>,
    /// `TAVILY_API_KEY`
    pub tavily_api_key: Option<String>,
    /// `ACHIEVE_MODEL`
    pub model: String,
    /// `ACHIEVE_DATA_DIR`
    pub data_dir: PathBuf,
    /// `ACHIEVE_ROADMAP_NAME`: file stem of the saved roadmap
    pub roadmap_name: String,
    /// `ACHIEVE_MAX_STEPS`
    pub max_steps: usize,
    /// `ACHIEVE_MAX_RESULTS`, capped at five
    pub max_results: usize,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            openai_api_key:  None,
            openai_api_base: None,
            tavily_api_key:  None,
            model:           DEFAULT_MODEL.to_string(),
            data_dir:        PathBuf::from(DEFAULT_DATA_DIR),
            roadmap_name:    DEFAULT_ROADMAP_NAME.to_string(),
            max_steps:       DEFAULT_MAX_STEPS,
            max_results:     MAX_RESULTS,
        }
    }
}

impl Settings {
    /// Reads settings from the process environment. Call
    /// `dotenvy::dotenv()` first to pick up a local `.env` file.
    pub fn from_env() -> Result<Self, AgentError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Reads settings through an arbitrary key lookup. Empty values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, AgentError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());
        let defaults = Self::default();

        let max_steps = match get("ACHIEVE_MAX_STEPS") {
            Some(raw) => parse_positive("ACHIEVE_MAX_STEPS", &raw)?,
            None      => defaults.max_steps,
        };
        let max_results = match get("ACHIEVE_MAX_RESULTS") {
            Some(raw) => parse_positive("ACHIEVE_MAX_RESULTS", &raw)?.min(MAX_RESULTS),
            None      => defaults.max_results,
        };

        Ok(Self {
            openai_api_key:  get("OPENAI_API_KEY"),
            openai_api_base: get("OPENAI_API_BASE"),
            tavily_api_key:  get("TAVILY_API_KEY"),
            model:           get("ACHIEVE_MODEL").unwrap_or(defaults.model),
            data_dir:        get("ACHIEVE_DATA_DIR").map(PathBuf::from).unwrap_or(defaults.data_dir),
            roadmap_name:    get("ACHIEVE_ROADMAP_NAME").unwrap_or(defaults.roadmap_name),
            max_steps,
            max_results,
        })
    }

    /// Names of required secrets that are not set.
    pub fn missing_secrets(&self) -> Vec<&'static str> {
        let mut missing = Vec::new();
        if self.openai_api_key.is_none() {
            missing.push("OPENAI_API_KEY");
        }
        if self.tavily_api_key.is_none() {
            missing.push("TAVILY_API_KEY");
        }
        missing
    }

    pub fn agent_config(&self) -> AgentConfig {
        AgentConfig {
            max_steps: self.max_steps,
            model:     self.model.clone(),
        }
    }
}

fn parse_positive(key: &str, raw: &str) -> Result<usize, AgentError> {
    match raw.parse::<usize>() {
        Ok(n) if n > 0 => Ok(n),
        _ => Err(AgentError::Config(format!("{} must be a positive integer, got '{}'", key, raw))),
    }
}
