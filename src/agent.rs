//! Agent definitions
//!
//! An [`Agent`] is a declarative bundle: a name, instruction text, the
//! structured-output schema it must produce, the tools it may invoke, and
//! the handoff targets it may transfer control to. Agents are configuration
//! only; the [`Runner`](crate::runner::Runner) executes them.

use std::sync::Arc;

use serde_json::Value;

use crate::handoff::Handoff;
use crate::tool::Tool;

/// Defines the complete configuration for an [`Agent`].
#[derive(Debug, Clone)]
pub struct AgentConfig {
    /// The name of the agent, used for identification and in logs.
    pub name: String,

    /// The system instructions that guide the agent's behavior.
    pub instructions: String,

    /// A description of the agent's capabilities, used when this agent is a
    /// potential handoff target for another agent.
    pub handoff_description: Option<String>,

    /// Tools the agent may invoke during its reasoning loop.
    pub tools: Vec<Arc<dyn Tool>>,

    /// Other agents this agent can hand control off to.
    pub handoffs: Vec<Handoff>,

    /// Model identifier used for this agent's completions.
    pub model: String,

    /// Sampling temperature, if overriding the model default.
    pub temperature: Option<f32>,

    /// Turn cap for a single invocation of this agent.
    pub max_turns: Option<usize>,

    /// JSON schema the agent's final output must conform to.
    pub output_schema: Option<Value>,
}

impl Default for AgentConfig {
    fn default() -> Self {
        Self {
            name: "Assistant".to_string(),
            instructions: "You are a helpful assistant.".to_string(),
            handoff_description: None,
            tools: vec![],
            handoffs: vec![],
            model: "gpt-4.1-mini".to_string(),
            temperature: None,
            max_turns: None,
            output_schema: None,
        }
    }
}

/// A configured participant in the pipeline. Cheap to clone and share.
#[derive(Debug, Clone)]
pub struct Agent {
    pub config: AgentConfig,
}

impl Agent {
    pub fn new(config: AgentConfig) -> Self {
        Self { config }
    }

    /// Creates a basic agent with just a name and instructions; everything
    /// else takes defaults.
    pub fn simple(name: impl Into<String>, instructions: impl Into<String>) -> Self {
        Self::new(AgentConfig {
            name: name.into(),
            instructions: instructions.into(),
            ..Default::default()
        })
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.config.model = model.into();
        self
    }

    pub fn with_tool(mut self, tool: Arc<dyn Tool>) -> Self {
        self.config.tools.push(tool);
        self
    }

    pub fn with_handoff(mut self, handoff: Handoff) -> Self {
        self.config.handoffs.push(handoff);
        self
    }

    pub fn with_handoff_description(mut self, description: impl Into<String>) -> Self {
        self.config.handoff_description = Some(description.into());
        self
    }

    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.config.temperature = Some(temperature);
        self
    }

    pub fn with_max_turns(mut self, max_turns: usize) -> Self {
        self.config.max_turns = Some(max_turns);
        self
    }

    /// Enforce a structured output schema on the agent's final answer.
    pub fn with_output_schema(mut self, schema: Value) -> Self {
        self.config.output_schema = Some(schema);
        self
    }

    pub fn name(&self) -> &str {
        &self.config.name
    }

    pub fn instructions(&self) -> &str {
        &self.config.instructions
    }

    pub fn tools(&self) -> &[Arc<dyn Tool>] {
        &self.config.tools
    }

    pub fn handoffs(&self) -> &[Handoff] {
        &self.config.handoffs
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_simple_agent() {
        let agent = Agent::simple("WeatherBot", "You analyze weather.");
        assert_eq!(agent.name(), "WeatherBot");
        assert_eq!(agent.instructions(), "You analyze weather.");
        assert!(agent.tools().is_empty());
        assert!(agent.handoffs().is_empty());
    }

    #[test]
    fn test_builder_chain() {
        let agent = Agent::simple("SearchBot", "You search.")
            .with_model("gpt-4.1-mini")
            .with_temperature(0.5)
            .with_max_turns(4)
            .with_output_schema(serde_json::json!({"type": "object"}));

        assert_eq!(agent.config.model, "gpt-4.1-mini");
        assert_eq!(agent.config.temperature, Some(0.5));
        assert_eq!(agent.config.max_turns, Some(4));
        assert!(agent.config.output_schema.is_some());
    }

    #[test]
    fn test_with_handoff() {
        let specialist = Agent::simple("Specialist", "You handle the special cases.");
        let primary = Agent::simple("Primary", "You route work.")
            .with_handoff(Handoff::new(specialist, "Handles special cases."));

        assert_eq!(primary.handoffs().len(), 1);
        assert_eq!(primary.handoffs()[0].name, "Specialist");
    }
}
