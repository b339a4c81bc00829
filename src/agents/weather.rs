//! Weather analysis agent
//!
//! The weather stage branches on how far out the trip starts. Because the
//! handoff and rendering downstream depend on that branch, it is computed
//! here as real logic ([`ForecastBranch`]) and handed to the agent as a
//! directive, rather than left to the model to infer from the prompt.

use std::sync::Arc;

use chrono::NaiveDate;

use crate::agent::Agent;
use crate::config::PlannerConfig;
use crate::models::WeatherAnalysis;
use crate::tool::Tool;

use super::schema_value;

/// Which weather policy applies to a trip start date.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ForecastBranch {
    /// Trip starts within the forecast window: produce a direct forecast.
    NearTerm,
    /// Trip is further out: look up historical/typical conditions and
    /// phrase results as guidance, without naming a specific year.
    FarTerm,
}

impl ForecastBranch {
    /// The window boundary is inclusive: a trip starting exactly
    /// `window_days` from today is still near-term. Trips that already
    /// started are near-term as well.
    pub fn for_start_date(start: NaiveDate, today: NaiveDate, window_days: i64) -> Self {
        let days_out = (start - today).num_days();
        if days_out <= window_days {
            ForecastBranch::NearTerm
        } else {
            ForecastBranch::FarTerm
        }
    }

    /// The stage directive embedded into the agent's task input.
    pub fn directive(&self, window_days: i64) -> String {
        match self {
            ForecastBranch::NearTerm => format!(
                "The trip starts within {window_days} days of today. Provide a specific \
                 forecast for the trip dates: temperature range, precipitation chance, \
                 clothing recommendations, and any warnings."
            ),
            ForecastBranch::FarTerm => format!(
                "The trip starts more than {window_days} days from today, so no specific \
                 forecast is available yet. Use the web search tool to find historical \
                 weather patterns and climate information for the location and month(s) \
                 of the trip, searching by month and location only, without a specific \
                 year. Provide typical-conditions guidance: temperature range, \
                 precipitation chance, and clothing recommendations based on historical \
                 averages."
            ),
        }
    }
}

/// Create the weather analysis agent.
///
/// Produces a [`WeatherAnalysis`] regardless of which branch the stage
/// directive selects.
pub fn create_weather_agent(config: &PlannerConfig, search_tool: Arc<dyn Tool>) -> Agent {
    let instructions = format!(
        "You are a weather analyst that helps travelers prepare for their trip.\n\
         \n\
         You will be told whether the trip starts within {window} days of today and \
         which policy applies:\n\
         1. If the trip is within {window} days: provide a specific forecast including \
         temperature range, precipitation chance, clothing recommendations, and any \
         warnings.\n\
         2. If the trip is more than {window} days away: use the web search tool to \
         find historical weather patterns and climate information for the location and \
         month(s) of the trip, and provide general recommendations based on typical \
         conditions. Do not specify a year in searches, just the month and location.\n\
         3. Return a structured analysis in the WeatherAnalysis format, with \
         precipitation_chance as a percentage between 0 and 100.\n\
         \n\
         Always use the web search tool if the trip is more than {window} days away.",
        window = config.forecast_window_days
    );

    Agent::simple("Weather Agent", instructions)
        .with_model(&config.weather_model)
        .with_tool(search_tool)
        .with_output_schema(schema_value::<WeatherAnalysis>())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn date(s: &str) -> NaiveDate {
        s.parse().unwrap()
    }

    #[test]
    fn test_boundary_is_inclusive() {
        let today = date("2025-06-01");
        let window = 10;

        // N - 1, N, N + 1 days out
        assert_eq!(
            ForecastBranch::for_start_date(date("2025-06-10"), today, window),
            ForecastBranch::NearTerm
        );
        assert_eq!(
            ForecastBranch::for_start_date(date("2025-06-11"), today, window),
            ForecastBranch::NearTerm
        );
        assert_eq!(
            ForecastBranch::for_start_date(date("2025-06-12"), today, window),
            ForecastBranch::FarTerm
        );
    }

    #[test]
    fn test_started_trip_is_near_term() {
        let today = date("2025-06-10");
        assert_eq!(
            ForecastBranch::for_start_date(date("2025-06-05"), today, 10),
            ForecastBranch::NearTerm
        );
    }

    #[test]
    fn test_far_term_directive_omits_year_language() {
        let directive = ForecastBranch::FarTerm.directive(10);
        assert!(directive.contains("without a specific"));
        assert!(directive.contains("historical"));
    }
}
