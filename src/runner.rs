//! Agent invocation loop
//!
//! The [`Runner`] is the generic "run this agent" capability the manager
//! drives each stage through. It seeds the conversation, loops over model
//! turns, executes tool calls against a working context snapshot, merges
//! the explicit deltas tools return, and follows handoffs by switching the
//! active agent mid-invocation. The caller receives one [`RunResult`] plus
//! the accumulated [`ContextDelta`], regardless of whether a handoff
//! occurred internally.

use std::sync::Arc;

use serde_json::Value;
use tracing::{debug, info, warn};

use crate::agent::Agent;
use crate::error::{PlannerError, Result};
use crate::handoff::HandoffArgs;
use crate::items::Message;
use crate::model::{ModelProvider, ToolSpec};
use crate::models::{ContextDelta, TripContext};
use crate::result::{RunOutcome, RunResult};

/// Configuration shared by every invocation within one run.
#[derive(Clone)]
pub struct RunConfig {
    pub model_provider: Arc<dyn ModelProvider>,
    /// Fallback turn cap when the agent does not set its own.
    pub max_turns: usize,
}

impl RunConfig {
    pub fn new(model_provider: Arc<dyn ModelProvider>) -> Self {
        Self {
            model_provider,
            max_turns: 10,
        }
    }

    pub fn with_max_turns(mut self, max_turns: usize) -> Self {
        self.max_turns = max_turns;
        self
    }
}

/// Executes agents. Stateless; all per-run state lives in the arguments.
pub struct Runner;

impl Runner {
    /// Run an agent to completion on the given input.
    ///
    /// `ctx` is a read-only snapshot of the run's shared context; mutations
    /// requested by tools come back in the outcome's delta for the caller
    /// to merge. Within the invocation the runner maintains its own working
    /// copy so a tool's write is visible to later tool calls and to any
    /// handoff target.
    pub async fn run(
        agent: &Agent,
        input: impl Into<String>,
        ctx: &TripContext,
        config: &RunConfig,
    ) -> Result<RunOutcome> {
        let mut active = agent.clone();
        let mut working = ctx.clone();
        let mut accumulated = ContextDelta::default();

        let mut messages = vec![
            Message::system(system_prompt(&active)),
            Message::user(input.into()),
        ];

        let max_turns = active.config.max_turns.unwrap_or(config.max_turns);
        let mut turn_count = 0;

        loop {
            turn_count += 1;
            if turn_count > max_turns {
                return Err(PlannerError::MaxTurnsExceeded { max_turns });
            }

            debug!(turn = turn_count, agent = %active.name(), "starting turn");

            let response = config
                .model_provider
                .complete(
                    &active.config.model,
                    &messages,
                    &advertised_tools(&active),
                    active.config.temperature,
                )
                .await?;

            if response.has_tool_calls() {
                messages.push(Message::assistant_with_tool_calls(
                    response.content.clone().unwrap_or_default(),
                    response.tool_calls.clone(),
                ));

                // Handoff short-circuit: process the first handoff call and
                // start the next turn as the target agent.
                if let Some(handoff_call) = response
                    .tool_calls
                    .iter()
                    .find(|tc| active.handoffs().iter().any(|h| h.name == tc.name))
                {
                    let handoff = active
                        .handoffs()
                        .iter()
                        .find(|h| h.name == handoff_call.name)
                        .cloned()
                        .ok_or_else(|| PlannerError::HandoffError {
                            message: format!("unknown handoff target {}", handoff_call.name),
                        })?;

                    info!(from = %active.name(), to = %handoff.name, "handoff detected");

                    let ack = serde_json::json!({ "handoff": handoff.name, "ack": true });
                    messages.push(Message::tool(ack.to_string(), &handoff_call.id));

                    let args = HandoffArgs::from_value(&handoff_call.arguments);
                    active = handoff.agent().clone();
                    messages.push(Message::system(system_prompt(&active)));
                    if let Some(notes) = args.notes {
                        messages.push(Message::user(format!("Handoff notes: {notes}")));
                    }

                    continue;
                }

                for tool_call in &response.tool_calls {
                    let tool = active
                        .tools()
                        .iter()
                        .find(|t| t.name() == tool_call.name)
                        .cloned();

                    let Some(tool) = tool else {
                        warn!(tool = %tool_call.name, "model called unknown tool");
                        messages.push(Message::tool(
                            format!("Error: unknown tool `{}`", tool_call.name),
                            &tool_call.id,
                        ));
                        continue;
                    };

                    match tool.execute(tool_call.arguments.clone(), &working).await {
                        Ok(output) => {
                            working.apply(&output.delta);
                            accumulated.merge(&output.delta);
                            messages.push(Message::tool(output.message, &tool_call.id));
                        }
                        Err(e) => {
                            warn!(tool = %tool_call.name, error = %e, "tool failed");
                            messages.push(Message::tool(format!("Error: {e}"), &tool_call.id));
                        }
                    }
                }

                continue;
            }

            let Some(content) = response.content.filter(|c| !c.is_empty()) else {
                return Err(PlannerError::ModelBehaviorError {
                    message: "model returned neither content nor tool calls".to_string(),
                });
            };

            let final_output = if active.config.output_schema.is_some() {
                extract_json(&content).unwrap_or(Value::String(content))
            } else {
                Value::String(content)
            };

            return Ok(RunOutcome {
                result: RunResult {
                    final_output,
                    final_agent: active.name().to_string(),
                },
                delta: accumulated,
            });
        }
    }
}

fn system_prompt(agent: &Agent) -> String {
    match &agent.config.output_schema {
        Some(schema) => format!(
            "{}\n\nRespond with a single JSON object conforming to this schema, \
             with no surrounding prose:\n{}",
            agent.instructions(),
            schema
        ),
        None => agent.instructions().to_string(),
    }
}

/// Regular tools plus handoff targets, the latter advertised as pseudo-tools
/// named after the target agent.
fn advertised_tools(agent: &Agent) -> Vec<ToolSpec> {
    let mut specs: Vec<ToolSpec> = agent
        .tools()
        .iter()
        .map(|t| ToolSpec {
            name: t.name().to_string(),
            description: t.description().to_string(),
            parameters: t.parameters_schema(),
        })
        .collect();

    for handoff in agent.handoffs() {
        specs.push(ToolSpec {
            name: handoff.name.clone(),
            description: handoff.description.clone(),
            parameters: handoff.parameters_schema(),
        });
    }

    specs
}

/// Best-effort extraction of a JSON object from model output: direct parse,
/// then a fenced code block, then the outermost brace span.
fn extract_json(content: &str) -> Option<Value> {
    let trimmed = content.trim();
    if let Ok(value) = serde_json::from_str(trimmed) {
        return Some(value);
    }

    if let Some(start) = trimmed.find("```") {
        let body = &trimmed[start..];
        let inner = body
            .trim_start_matches("```json")
            .trim_start_matches("```")
            .split("```")
            .next()?;
        if let Ok(value) = serde_json::from_str(inner.trim()) {
            return Some(value);
        }
    }

    let start = trimmed.find('{')?;
    let end = trimmed.rfind('}')?;
    serde_json::from_str(trimmed.get(start..=end)?).ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::handoff::Handoff;
    use crate::items::{ModelResponse, ToolCall};
    use crate::models::TripQuery;
    use crate::tool::ChildThresholdTool;
    use async_trait::async_trait;
    use pretty_assertions::assert_eq;
    use std::sync::Mutex;

    /// Scripted provider: pops canned responses in order.
    struct ScriptedProvider {
        responses: Mutex<Vec<ModelResponse>>,
    }

    impl ScriptedProvider {
        fn new(responses: Vec<ModelResponse>) -> Self {
            Self {
                responses: Mutex::new(responses),
            }
        }
    }

    #[async_trait]
    impl ModelProvider for ScriptedProvider {
        async fn complete(
            &self,
            _model: &str,
            _messages: &[Message],
            _tools: &[ToolSpec],
            _temperature: Option<f32>,
        ) -> Result<ModelResponse> {
            let mut responses = self.responses.lock().unwrap();
            if responses.is_empty() {
                return Ok(ModelResponse::new_message("Default response"));
            }
            Ok(responses.remove(0))
        }
    }

    fn config(responses: Vec<ModelResponse>) -> RunConfig {
        RunConfig::new(Arc::new(ScriptedProvider::new(responses)))
    }

    fn ctx() -> TripContext {
        TripContext::new(
            TripQuery::new(
                "2025-06-05".parse().unwrap(),
                "2025-06-14".parse().unwrap(),
                "Bogota",
                vec![32, 35, 10],
            )
            .unwrap(),
        )
    }

    #[tokio::test]
    async fn test_simple_run() {
        let agent = Agent::simple("Echo", "You echo.");
        let outcome = Runner::run(
            &agent,
            "hello",
            &ctx(),
            &config(vec![ModelResponse::new_message("hello back")]),
        )
        .await
        .unwrap();

        assert_eq!(outcome.result.final_agent, "Echo");
        assert_eq!(
            outcome.result.final_output,
            Value::String("hello back".to_string())
        );
        assert!(outcome.delta.is_empty());
    }

    #[tokio::test]
    async fn test_tool_call_merges_delta() {
        let agent = Agent::simple("SearchBot", "You search.")
            .with_tool(Arc::new(ChildThresholdTool::new(12)));

        let responses = vec![
            ModelResponse::new_tool_calls(vec![ToolCall {
                id: "call_1".to_string(),
                name: "check_child_threshold_status".to_string(),
                arguments: serde_json::json!({}),
            }]),
            ModelResponse::new_message("done"),
        ];

        let outcome = Runner::run(&agent, "search", &ctx(), &config(responses))
            .await
            .unwrap();
        assert_eq!(outcome.delta.meets_child_threshold, Some(true));
    }

    #[tokio::test]
    async fn test_handoff_switches_final_agent() {
        let specialist = Agent::simple("Specialist", "You are the specialist.");
        let primary = Agent::simple("Primary", "You delegate.")
            .with_handoff(Handoff::new(specialist, "Handles specialist work."));

        let responses = vec![
            ModelResponse::new_tool_calls(vec![ToolCall {
                id: "call_1".to_string(),
                name: "Specialist".to_string(),
                arguments: serde_json::json!({"notes": "take over"}),
            }]),
            ModelResponse::new_message("specialist answer"),
        ];

        let outcome = Runner::run(&primary, "go", &ctx(), &config(responses))
            .await
            .unwrap();
        assert_eq!(outcome.result.final_agent, "Specialist");
        assert_eq!(
            outcome.result.final_output,
            Value::String("specialist answer".to_string())
        );
    }

    #[tokio::test]
    async fn test_unknown_tool_is_reported_not_fatal() {
        let agent = Agent::simple("Bot", "You work.");
        let responses = vec![
            ModelResponse::new_tool_calls(vec![ToolCall {
                id: "call_1".to_string(),
                name: "does_not_exist".to_string(),
                arguments: serde_json::json!({}),
            }]),
            ModelResponse::new_message("recovered"),
        ];

        let outcome = Runner::run(&agent, "go", &ctx(), &config(responses))
            .await
            .unwrap();
        assert_eq!(
            outcome.result.final_output,
            Value::String("recovered".to_string())
        );
    }

    #[tokio::test]
    async fn test_max_turns_exceeded() {
        let agent = Agent::simple("Loopy", "You loop.")
            .with_tool(Arc::new(ChildThresholdTool::new(12)))
            .with_max_turns(2);

        let tool_call = || {
            ModelResponse::new_tool_calls(vec![ToolCall {
                id: uuid::Uuid::new_v4().to_string(),
                name: "check_child_threshold_status".to_string(),
                arguments: serde_json::json!({}),
            }])
        };
        let responses = vec![tool_call(), tool_call(), tool_call()];

        let err = Runner::run(&agent, "go", &ctx(), &config(responses))
            .await
            .unwrap_err();
        assert!(matches!(err, PlannerError::MaxTurnsExceeded { max_turns: 2 }));
    }

    #[tokio::test]
    async fn test_structured_output_parsed_from_fenced_block() {
        let agent = Agent::simple("Structured", "You produce JSON.")
            .with_output_schema(serde_json::json!({"type": "object"}));

        let content = "Here you go:\n```json\n{\"answer\": 42}\n```";
        let outcome = Runner::run(
            &agent,
            "go",
            &ctx(),
            &config(vec![ModelResponse::new_message(content)]),
        )
        .await
        .unwrap();
        assert_eq!(outcome.result.final_output, serde_json::json!({"answer": 42}));
    }

    #[test]
    fn test_extract_json_variants() {
        assert_eq!(
            extract_json("{\"a\": 1}"),
            Some(serde_json::json!({"a": 1}))
        );
        assert_eq!(
            extract_json("prefix {\"a\": 1} suffix"),
            Some(serde_json::json!({"a": 1}))
        );
        assert_eq!(extract_json("no json here"), None);
    }
}
