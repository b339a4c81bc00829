//! Tool system for agents
//!
//! Tools are context-aware capabilities an agent may invoke mid-reasoning.
//! A tool reads a snapshot of the per-run [`TripContext`] and returns a
//! string result for the model plus an explicit [`ContextDelta`]; the
//! caller merges the delta so the mutation is visible to later tool calls,
//! to handoff targets, and to subsequent stages. Tools must be safe to
//! invoke repeatedly within one stage.

use async_trait::async_trait;
use serde_json::Value;
use std::fmt::Debug;
use std::sync::Arc;

use crate::error::Result;
use crate::models::{ContextDelta, TripContext};

/// Result of one tool invocation: a message the model can reason over and
/// the explicit context mutation, if any.
#[derive(Debug, Clone, Default)]
pub struct ToolOutput {
    pub message: String,
    pub delta: ContextDelta,
}

impl ToolOutput {
    /// A plain informational result with no context mutation.
    pub fn message(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            delta: ContextDelta::default(),
        }
    }

    pub fn with_delta(message: impl Into<String>, delta: ContextDelta) -> Self {
        Self {
            message: message.into(),
            delta,
        }
    }
}

/// Trait for all tools that can be advertised to agents
#[async_trait]
pub trait Tool: Send + Sync + Debug {
    /// Get the name of the tool
    fn name(&self) -> &str;

    /// Get the description of the tool
    fn description(&self) -> &str;

    /// Get the JSON schema for the tool's parameters
    fn parameters_schema(&self) -> Value;

    /// Execute the tool against a context snapshot
    async fn execute(&self, arguments: Value, ctx: &TripContext) -> Result<ToolOutput>;
}

/// `check_child_threshold_status`: determines whether any participant is
/// below the configured child age threshold and records the answer in the
/// shared context.
#[derive(Debug, Clone)]
pub struct ChildThresholdTool {
    child_age_threshold: u32,
}

impl ChildThresholdTool {
    pub fn new(child_age_threshold: u32) -> Self {
        Self {
            child_age_threshold,
        }
    }
}

#[async_trait]
impl Tool for ChildThresholdTool {
    fn name(&self) -> &str {
        "check_child_threshold_status"
    }

    fn description(&self) -> &str {
        "Check whether any trip participant is below the child age threshold"
    }

    fn parameters_schema(&self) -> Value {
        serde_json::json!({
            "type": "object",
            "properties": {},
            "required": []
        })
    }

    async fn execute(&self, _arguments: Value, ctx: &TripContext) -> Result<ToolOutput> {
        // A missing query is a locally recoverable condition: signal it in
        // the message, leave the flag unset, and let the run continue.
        let Some(query) = &ctx.query else {
            return Ok(ToolOutput::message("Error: trip query context not found."));
        };

        let meets_threshold = query
            .participant_ages
            .iter()
            .any(|age| *age < self.child_age_threshold);

        Ok(ToolOutput::with_delta(
            format!(
                "Child threshold check complete. Children present: {}.",
                if meets_threshold { "Yes" } else { "No" }
            ),
            ContextDelta {
                meets_child_threshold: Some(meets_threshold),
            },
        ))
    }
}

/// Opaque text-in/text-out lookup backing the web-search tool. The actual
/// data source is an external collaborator; agents only see the tool.
#[async_trait]
pub trait SearchCapability: Send + Sync + Debug {
    async fn search(&self, query: &str) -> Result<String>;
}

/// Adapter exposing a [`SearchCapability`] to agents as the `web_search`
/// tool.
#[derive(Debug)]
pub struct WebSearchTool {
    backend: Arc<dyn SearchCapability>,
}

impl WebSearchTool {
    pub fn new(backend: Arc<dyn SearchCapability>) -> Self {
        Self { backend }
    }
}

#[async_trait]
impl Tool for WebSearchTool {
    fn name(&self) -> &str {
        "web_search"
    }

    fn description(&self) -> &str {
        "Search the web for activities, venues, and travel information"
    }

    fn parameters_schema(&self) -> Value {
        serde_json::json!({
            "type": "object",
            "properties": {
                "query": {
                    "type": "string",
                    "description": "The search query"
                }
            },
            "required": ["query"]
        })
    }

    async fn execute(&self, arguments: Value, _ctx: &TripContext) -> Result<ToolOutput> {
        let Some(query) = arguments.get("query").and_then(Value::as_str) else {
            return Ok(ToolOutput::message("Error: missing `query` argument."));
        };

        let results = self.backend.search(query).await?;
        Ok(ToolOutput::message(results))
    }
}
