//! Result of a single agent invocation

use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::error::{PlannerError, Result};
use crate::models::ContextDelta;

/// The outcome of running one agent (including any handoffs that happened
/// inside the invocation).
#[derive(Debug, Clone)]
pub struct RunResult {
    /// The final output from whichever agent answered last.
    pub final_output: Value,

    /// Identity of the agent that produced the terminal output. Differs
    /// from the invoked agent when a handoff occurred.
    pub final_agent: String,
}

impl RunResult {
    /// Coerce the final output into its declared structured type. A failure
    /// is a schema mismatch attributed to the named stage and is fatal for
    /// the run.
    pub fn final_output_as<T: DeserializeOwned>(&self, stage: &str) -> Result<T> {
        serde_json::from_value(self.final_output.clone())
            .map_err(|e| PlannerError::schema_mismatch(stage, e.to_string()))
    }
}

/// An invocation's result paired with the context mutations it produced.
/// The caller merges the delta into the run's
/// [`TripContext`](crate::models::TripContext) so later stages observe them.
#[derive(Debug, Clone)]
pub struct RunOutcome {
    pub result: RunResult,
    pub delta: ContextDelta,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::WeatherAnalysis;

    #[test]
    fn test_coercion_success() {
        let result = RunResult {
            final_output: serde_json::json!({
                "summary": "Mild",
                "temperature_range": [10.0, 19.0],
                "precipitation_chance": 55.0,
                "recommended_clothing": ["rain jacket"]
            }),
            final_agent: "Weather Agent".to_string(),
        };
        let weather: WeatherAnalysis = result.final_output_as("weather").unwrap();
        assert_eq!(weather.summary, "Mild");
    }

    #[test]
    fn test_coercion_failure_names_stage() {
        let result = RunResult {
            final_output: Value::String("not structured output".to_string()),
            final_agent: "Weather Agent".to_string(),
        };
        let err = result
            .final_output_as::<WeatherAnalysis>("weather")
            .unwrap_err();
        assert!(matches!(
            err,
            PlannerError::SchemaMismatch { ref stage, .. } if stage == "weather"
        ));
    }
}
