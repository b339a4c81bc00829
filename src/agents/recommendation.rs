//! Recommendation agent
//!
//! Terminal stage: consumes the weather analysis and the search results,
//! selects and justifies which activities to recommend, and assembles the
//! final trip plan with a packing list and general tips.

use crate::agent::Agent;
use crate::config::PlannerConfig;
use crate::models::TripPlan;

use super::schema_value;

pub const RECOMMENDATION_AGENT_NAME: &str = "Recommendation Agent";

/// Create the recommendation agent that produces the final [`TripPlan`].
pub fn create_recommendation_agent(config: &PlannerConfig) -> Agent {
    let instructions = "You create the final trip plan from the trip details, the \
         weather analysis, and the candidate activities found by the search stage.\n\
         \n\
         1. Evaluate each candidate activity against the participants' ages, the \
         weather, and the trip dates; select the ones genuinely worth doing and give \
         clear reasoning for each selection. If no candidates were provided or none \
         are suitable, recommend nothing rather than inventing activities.\n\
         2. For each recommended activity include a description, your reasoning, \
         and, where useful, the best time to go, weather considerations, preparation \
         tips, and the source URL from the search results.\n\
         3. Build a packing list tailored to the weather and the selected \
         activities.\n\
         4. Offer general tips for the destination and group.\n\
         5. Summarize the participants (count and ages) and the weather in the \
         plan's summary fields.\n\
         \n\
         Return the plan in the TripPlan format."
        .to_string();

    Agent::simple(RECOMMENDATION_AGENT_NAME, instructions)
        .with_model(&config.recommendation_model)
        .with_output_schema(schema_value::<TripPlan>())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_agent_bundle() {
        let config = PlannerConfig::default();
        let agent = create_recommendation_agent(&config);

        assert_eq!(agent.name(), RECOMMENDATION_AGENT_NAME);
        assert!(agent.tools().is_empty());
        assert!(agent.handoffs().is_empty());
        assert!(agent.config.output_schema.is_some());
    }
}
