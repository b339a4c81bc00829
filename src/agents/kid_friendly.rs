//! Kid-friendly activity agent
//!
//! Handoff target for the search stage. Same structural contract as the
//! primary agent's direct path, but queries and extraction bias toward
//! options the whole group, children included, can join.

use std::sync::Arc;

use crate::agent::Agent;
use crate::config::PlannerConfig;
use crate::models::SearchResult;
use crate::tool::Tool;

use super::schema_value;

pub const KID_FRIENDLY_AGENT_NAME: &str = "Kid-Friendly Activity Agent";

/// Create the kid-friendly activity search agent.
pub fn create_kid_friendly_activity_agent(
    config: &PlannerConfig,
    search_tool: Arc<dyn Tool>,
) -> Agent {
    let instructions = format!(
        "You research and find family-friendly activities for a trip where at least \
         one participant is under {threshold} years old.\n\
         \n\
         Given the trip details and weather information (including any handoff \
         notes):\n\
         a. Internally brainstorm 3-5 relevant search queries focusing on \
         all-ages-inclusive activities suitable for every age group in the party, \
         weather suitability, and local family experiences.\n\
         b. Execute searches using the web search tool.\n\
         c. For each promising activity, extract and structure key information: \
         name, description, location, age range, price, duration, weather \
         dependency, and source URL. Prefer options explicitly open to young \
         children.\n\
         d. Compile a list of structured activity entries and a concise summary of \
         your findings.\n\
         \n\
         Return the results in the SearchResult format. You MUST use the web search \
         tool.",
        threshold = config.child_age_threshold
    );

    Agent::simple(KID_FRIENDLY_AGENT_NAME, instructions)
        .with_model(&config.search_model)
        .with_tool(search_tool)
        .with_handoff_description(
            "Finds activities suitable for groups that include young children, \
             biased toward all-ages-inclusive options.",
        )
        .with_output_schema(schema_value::<SearchResult>())
}
