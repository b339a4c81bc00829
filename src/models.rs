//! Domain records for the trip planning pipeline
//!
//! `TripQuery` is the immutable caller input, `TripContext` the per-run
//! mutable state threaded through tool calls, and the remaining types are
//! the structured outputs each agent must conform to. Every structured
//! output derives [`JsonSchema`] so its schema can be advertised to the
//! model verbatim.

use chrono::NaiveDate;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::error::{PlannerError, Result};

/// Immutable trip request, created once by the caller and never mutated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TripQuery {
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub location: String,
    pub participant_number: usize,
    pub participant_ages: Vec<u32>,
}

impl TripQuery {
    /// Validating constructor. The participant count must match the ages
    /// list, which must be non-empty, and the date range must be ordered.
    pub fn new(
        start_date: NaiveDate,
        end_date: NaiveDate,
        location: impl Into<String>,
        participant_ages: Vec<u32>,
    ) -> Result<Self> {
        let location = location.into();
        if location.trim().is_empty() {
            return Err(PlannerError::invalid_query("location must not be empty"));
        }
        if participant_ages.is_empty() {
            return Err(PlannerError::invalid_query(
                "participant_ages must not be empty",
            ));
        }
        if start_date > end_date {
            return Err(PlannerError::invalid_query(format!(
                "start_date {start_date} is after end_date {end_date}"
            )));
        }
        Ok(Self {
            start_date,
            end_date,
            location,
            participant_number: participant_ages.len(),
            participant_ages,
        })
    }

    /// Parse a query from JSON, re-running the construction-time checks.
    pub fn from_json(raw: &str) -> Result<Self> {
        let query: TripQuery = serde_json::from_str(raw)?;
        if query.participant_number != query.participant_ages.len() {
            return Err(PlannerError::invalid_query(format!(
                "participant_number {} does not match {} listed ages",
                query.participant_number,
                query.participant_ages.len()
            )));
        }
        Self::new(
            query.start_date,
            query.end_date,
            query.location,
            query.participant_ages,
        )
    }
}

/// Per-run shared state. Created at run start, mutated only by explicit
/// [`ContextDelta`] merges, discarded at run end. One context per run;
/// concurrent runs never share one.
#[derive(Debug, Clone, Default)]
pub struct TripContext {
    pub query: Option<TripQuery>,
    /// Unset until the child-threshold tool runs. Once set it stays
    /// consistent for the remainder of the run.
    pub meets_child_threshold: Option<bool>,
}

impl TripContext {
    pub fn new(query: TripQuery) -> Self {
        Self {
            query: Some(query),
            meets_child_threshold: None,
        }
    }

    /// Merge a delta produced by a tool or an agent invocation. A flag that
    /// is already set is never cleared.
    pub fn apply(&mut self, delta: &ContextDelta) {
        if let Some(met) = delta.meets_child_threshold {
            self.meets_child_threshold = Some(met);
        }
    }
}

/// Explicit mutation record returned by tools instead of aliasing the
/// shared context. Callers merge it via [`TripContext::apply`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContextDelta {
    pub meets_child_threshold: Option<bool>,
}

impl ContextDelta {
    pub fn is_empty(&self) -> bool {
        self.meets_child_threshold.is_none()
    }

    /// Fold another delta into this one; later writes win.
    pub fn merge(&mut self, other: &ContextDelta) {
        if other.meets_child_threshold.is_some() {
            self.meets_child_threshold = other.meets_child_threshold;
        }
    }
}

/// Weather analysis with recommendations, produced once by the weather
/// agent and immutable thereafter.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct WeatherAnalysis {
    pub summary: String,
    /// [min_temp, max_temp] in degrees Celsius
    pub temperature_range: [f64; 2],
    /// Chance of precipitation as a percentage in [0, 100]
    pub precipitation_chance: f64,
    pub recommended_clothing: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weather_warnings: Option<Vec<String>>,
}

impl WeatherAnalysis {
    /// Post-coercion sanity checks on model-produced values.
    pub fn validate(&self) -> Result<()> {
        if !(0.0..=100.0).contains(&self.precipitation_chance) {
            return Err(PlannerError::ModelBehaviorError {
                message: format!(
                    "precipitation_chance {} outside [0, 100]",
                    self.precipitation_chance
                ),
            });
        }
        if self.temperature_range[0] > self.temperature_range[1] {
            return Err(PlannerError::ModelBehaviorError {
                message: format!(
                    "temperature_range min {} exceeds max {}",
                    self.temperature_range[0], self.temperature_range[1]
                ),
            });
        }
        Ok(())
    }
}

/// A single activity surfaced by the search stage. Only the name is
/// required; everything else depends on what the search found.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct ActivityResult {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub age_range: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weather_dependency: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_url: Option<String>,
}

/// Output of the search stage, whichever agent completed it. The activity
/// list may be empty but is never null.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct SearchResult {
    pub search_summary: String,
    #[serde(default)]
    pub activities: Vec<ActivityResult>,
}

/// One recommended activity with the reasoning that selected it.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct ActivityRecommendation {
    pub name: String,
    pub description: String,
    pub reasoning: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub best_time: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weather_considerations: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub preparation_tips: Option<Vec<String>>,
}

/// Terminal aggregate produced by the recommendation agent; consumed only
/// for presentation.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct TripPlan {
    pub location: String,
    pub dates: String,
    pub participants_summary: String,
    pub weather_summary: String,
    #[serde(default)]
    pub recommended_activities: Vec<ActivityRecommendation>,
    #[serde(default)]
    pub packing_list: Vec<String>,
    #[serde(default)]
    pub general_tips: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn date(s: &str) -> NaiveDate {
        s.parse().unwrap()
    }

    #[test]
    fn test_query_construction() {
        let query = TripQuery::new(
            date("2025-06-05"),
            date("2025-06-14"),
            "Bogota",
            vec![32, 35, 10],
        )
        .unwrap();
        assert_eq!(query.participant_number, 3);
        assert_eq!(query.location, "Bogota");
    }

    #[test]
    fn test_query_rejects_empty_ages() {
        let err =
            TripQuery::new(date("2025-06-05"), date("2025-06-14"), "Bogota", vec![]).unwrap_err();
        assert!(matches!(err, PlannerError::InvalidQuery { .. }));
    }

    #[test]
    fn test_query_rejects_inverted_dates() {
        let err = TripQuery::new(date("2025-06-14"), date("2025-06-05"), "Bogota", vec![30])
            .unwrap_err();
        assert!(matches!(err, PlannerError::InvalidQuery { .. }));
    }

    #[test]
    fn test_query_rejects_blank_location() {
        let err =
            TripQuery::new(date("2025-06-05"), date("2025-06-14"), "  ", vec![30]).unwrap_err();
        assert!(matches!(err, PlannerError::InvalidQuery { .. }));
    }

    #[test]
    fn test_query_from_json_checks_participant_count() {
        let raw = r#"{
            "start_date": "2025-06-05",
            "end_date": "2025-06-14",
            "location": "Bogota",
            "participant_number": 5,
            "participant_ages": [32, 35, 10]
        }"#;
        let err = TripQuery::from_json(raw).unwrap_err();
        assert!(matches!(err, PlannerError::InvalidQuery { .. }));
    }

    #[test]
    fn test_context_delta_merge() {
        let mut ctx = TripContext::default();
        assert_eq!(ctx.meets_child_threshold, None);

        ctx.apply(&ContextDelta::default());
        assert_eq!(ctx.meets_child_threshold, None);

        ctx.apply(&ContextDelta {
            meets_child_threshold: Some(true),
        });
        assert_eq!(ctx.meets_child_threshold, Some(true));

        // An empty delta never clears a previously set flag.
        ctx.apply(&ContextDelta::default());
        assert_eq!(ctx.meets_child_threshold, Some(true));
    }

    #[test]
    fn test_weather_validation() {
        let mut weather = WeatherAnalysis {
            summary: "Mild and rainy".to_string(),
            temperature_range: [10.0, 19.0],
            precipitation_chance: 60.0,
            recommended_clothing: vec!["rain jacket".to_string()],
            weather_warnings: None,
        };
        assert!(weather.validate().is_ok());

        weather.precipitation_chance = 140.0;
        assert!(weather.validate().is_err());

        weather.precipitation_chance = 60.0;
        weather.temperature_range = [25.0, 10.0];
        assert!(weather.validate().is_err());
    }

    #[test]
    fn test_search_result_activities_default_to_empty() {
        let result: SearchResult =
            serde_json::from_str(r#"{"search_summary": "nothing found"}"#).unwrap();
        assert!(result.activities.is_empty());
    }
}
