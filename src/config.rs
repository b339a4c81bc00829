//! Configuration for the trip planning pipeline
//!
//! All cross-agent constants live here so the same threshold is referenced
//! everywhere instead of being duplicated with drift: the child age cutoff
//! used by the search stage's handoff decision, the forecast window used by
//! the weather stage's branch, and the model identifier per agent.

use std::env;

/// Age below which a participant counts as a child for the kid-friendly
/// handoff decision.
pub const DEFAULT_CHILD_AGE_THRESHOLD: u32 = 12;

/// Trips starting within this many days of "today" (inclusive) get a direct
/// forecast; trips further out get historical/typical-conditions guidance.
pub const DEFAULT_FORECAST_WINDOW_DAYS: i64 = 10;

/// Pipeline configuration, constructed once at startup and shared by the
/// manager and all agent factories.
#[derive(Debug, Clone)]
pub struct PlannerConfig {
    pub child_age_threshold: u32,
    pub forecast_window_days: i64,
    pub weather_model: String,
    pub search_model: String,
    pub recommendation_model: String,
    /// Turn cap per agent invocation, guarding against tool-call loops.
    pub max_turns: usize,
}

impl Default for PlannerConfig {
    fn default() -> Self {
        Self {
            child_age_threshold: DEFAULT_CHILD_AGE_THRESHOLD,
            forecast_window_days: DEFAULT_FORECAST_WINDOW_DAYS,
            weather_model: "gpt-4o".to_string(),
            search_model: "gpt-4.1-mini".to_string(),
            recommendation_model: "gpt-4.1-mini".to_string(),
            max_turns: 10,
        }
    }
}

impl PlannerConfig {
    /// Build a config from the environment, falling back to defaults for
    /// anything unset or unparsable.
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Some(v) = env_parse::<u32>("ADVENTURE_CHILD_AGE_THRESHOLD") {
            config.child_age_threshold = v;
        }
        if let Some(v) = env_parse::<i64>("ADVENTURE_FORECAST_WINDOW_DAYS") {
            config.forecast_window_days = v;
        }
        if let Ok(v) = env::var("ADVENTURE_WEATHER_MODEL") {
            config.weather_model = v;
        }
        if let Ok(v) = env::var("ADVENTURE_SEARCH_MODEL") {
            config.search_model = v;
        }
        if let Ok(v) = env::var("ADVENTURE_RECOMMENDATION_MODEL") {
            config.recommendation_model = v;
        }

        config
    }
}

fn env_parse<T: std::str::FromStr>(key: &str) -> Option<T> {
    env::var(key).ok().and_then(|v| v.parse().ok())
}
