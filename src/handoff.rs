//! Agent handoff support
//!
//! A handoff lets one agent transfer control of the current invocation to
//! a more specialized agent. The handoff is advertised to the model as a
//! tool named after the target agent; when the model calls it, the runner
//! switches the active agent and forwards the caller's notes. The target's
//! output becomes the invocation's result and the target's identity is
//! recorded as the final responding agent.

use std::sync::Arc;

use serde::Deserialize;
use serde_json::Value;

use crate::agent::Agent;

/// Represents a potential handoff target.
#[derive(Clone)]
pub struct Handoff {
    /// The name the handoff is advertised under; defaults to the target
    /// agent's name.
    pub name: String,

    /// A description of the target agent's capabilities, shown to the
    /// primary agent so it can decide when delegation is appropriate.
    pub description: String,

    /// The agent to hand off to.
    pub agent: Arc<Agent>,
}

impl Handoff {
    /// Creates a handoff to `agent`, advertised under the agent's own name.
    pub fn new(agent: Agent, description: impl Into<String>) -> Self {
        let name = agent.name().to_string();
        Self {
            name,
            description: description.into(),
            agent: Arc::new(agent),
        }
    }

    pub fn agent(&self) -> &Agent {
        &self.agent
    }

    /// JSON schema for the handoff pseudo-tool's arguments.
    pub fn parameters_schema(&self) -> Value {
        serde_json::json!({
            "type": "object",
            "properties": {
                "notes": {
                    "type": "string",
                    "description": "Context to forward to the target agent"
                }
            },
            "required": []
        })
    }
}

impl std::fmt::Debug for Handoff {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Handoff")
            .field("name", &self.name)
            .field("description", &self.description)
            .field("agent", &self.agent.name())
            .finish()
    }
}

/// Arguments the model passes when calling a handoff pseudo-tool.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct HandoffArgs {
    #[serde(default)]
    pub notes: Option<String>,
}

impl HandoffArgs {
    /// Lenient parse: a handoff with unreadable arguments still happens,
    /// just without forwarded notes.
    pub fn from_value(value: &Value) -> Self {
        serde_json::from_value(value.clone()).unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_handoff_takes_agent_name() {
        let specialist = Agent::simple("KidFriendlyBot", "You find family activities.");
        let handoff = Handoff::new(specialist, "Finds activities suitable for children.");
        assert_eq!(handoff.name, "KidFriendlyBot");
        assert_eq!(handoff.agent().name(), "KidFriendlyBot");
    }

    #[test]
    fn test_handoff_args_parse() {
        let args = HandoffArgs::from_value(&serde_json::json!({
            "notes": "Trip to Bogota, children present"
        }));
        assert_eq!(args.notes.as_deref(), Some("Trip to Bogota, children present"));

        let args = HandoffArgs::from_value(&serde_json::json!(42));
        assert_eq!(args.notes, None);
    }
}
