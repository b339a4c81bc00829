//! Concrete agent definitions for the trip planning pipeline
//!
//! Each factory builds a declarative [`Agent`](crate::agent::Agent) from
//! the shared [`PlannerConfig`](crate::config::PlannerConfig): instruction
//! text with the configured constants interpolated, the structured-output
//! schema derived from the domain type, and the tools and handoff targets
//! the agent may use.

pub mod kid_friendly;
pub mod recommendation;
pub mod search;
pub mod weather;

pub use kid_friendly::create_kid_friendly_activity_agent;
pub use recommendation::create_recommendation_agent;
pub use search::create_activity_search_agent;
pub use weather::{create_weather_agent, ForecastBranch};

use schemars::JsonSchema;
use serde_json::Value;

/// JSON schema for a structured-output type, as advertised to the model.
pub(crate) fn schema_value<T: JsonSchema>() -> Value {
    serde_json::to_value(schemars::schema_for!(T))
        .unwrap_or_else(|_| serde_json::json!({ "type": "object" }))
}
