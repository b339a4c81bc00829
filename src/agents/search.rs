//! Activity search agent
//!
//! The primary search agent checks the child threshold first and either
//! hands off to the kid-friendly variant or performs its own multi-query
//! search. The manager drives the same branch deterministically from the
//! context flag; the agent's declarative bundle still carries the tool and
//! the handoff target so a model-initiated handoff works identically.

use std::sync::Arc;

use crate::agent::Agent;
use crate::config::PlannerConfig;
use crate::handoff::Handoff;
use crate::models::SearchResult;
use crate::tool::{ChildThresholdTool, Tool};

use super::schema_value;

pub const SEARCH_AGENT_NAME: &str = "Activity Search Agent";

/// Create the primary activity search agent, wired to hand off to the
/// kid-friendly variant when the child threshold is met.
pub fn create_activity_search_agent(
    config: &PlannerConfig,
    search_tool: Arc<dyn Tool>,
    kid_friendly_agent: Agent,
) -> Agent {
    let instructions = format!(
        "You research and find suitable activities for a trip based on provided \
         details.\n\
         \n\
         Given the trip details (location, dates, participant ages) and weather \
         information:\n\
         \n\
         1. Check for young children: use the `check_child_threshold_status` tool to \
         determine if any participant is under {threshold} years old. If the tool \
         indicates the threshold is met, HAND OFF the task to the \
         '{kid_friendly}' agent, providing the original trip details and weather \
         summary in the handoff notes.\n\
         \n\
         2. If no young children (threshold not met):\n\
         a. Internally brainstorm 3-5 relevant search queries focusing on general \
         activities, age-appropriate options for the adult/older group, weather \
         suitability, and local experiences.\n\
         b. Execute searches using the web search tool.\n\
         c. For each promising activity found, extract and structure key \
         information: name, description, location, age range, price, duration, \
         weather dependency, and source URL.\n\
         d. Compile a list of structured activity entries and a concise summary of \
         your findings.\n\
         \n\
         Return the results in the SearchResult format. You MUST use the web search \
         tool for the direct search path.",
        threshold = config.child_age_threshold,
        kid_friendly = kid_friendly_agent.name(),
    );

    let handoff_description = kid_friendly_agent
        .config
        .handoff_description
        .clone()
        .unwrap_or_else(|| "Finds activities suitable for groups with young children.".to_string());

    Agent::simple(SEARCH_AGENT_NAME, instructions)
        .with_model(&config.search_model)
        .with_tool(Arc::new(ChildThresholdTool::new(config.child_age_threshold)))
        .with_tool(search_tool)
        .with_handoff(Handoff::new(kid_friendly_agent, handoff_description))
        .with_output_schema(schema_value::<SearchResult>())
}
