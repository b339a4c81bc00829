//! Orchestration manager
//!
//! Drives the three-stage pipeline: weather analysis, activity search with
//! conditional handoff, and final recommendation. Stages run strictly
//! sequentially since each consumes the previous stage's typed output. All
//! stage invocations for one run are correlated by a trace id generated up
//! front; a coercion failure in any stage aborts the remainder of the run
//! without corrupting context already gathered.

use std::sync::Arc;

use serde_json::Value;
use tracing::{debug, info, warn, Instrument};

use crate::agent::Agent;
use crate::agents::{
    create_activity_search_agent, create_kid_friendly_activity_agent,
    create_recommendation_agent, create_weather_agent, ForecastBranch,
};
use crate::agents::search::SEARCH_AGENT_NAME;
use crate::config::PlannerConfig;
use crate::error::{PlannerError, Result};
use crate::model::ModelProvider;
use crate::models::{SearchResult, TripContext, TripPlan, TripQuery, WeatherAnalysis};
use crate::result::RunOutcome;
use crate::runner::{RunConfig, Runner};
use crate::tool::{ChildThresholdTool, SearchCapability, Tool, WebSearchTool};
use crate::trace::{gen_trace_id, run_span, stage_span};

/// Tagged result of the search stage. Callers switch on the tag, not on
/// the producing agent's runtime identity.
#[derive(Debug, Clone)]
pub enum SearchOutcome {
    /// The primary search agent completed the stage itself.
    Direct { agent: String, result: SearchResult },
    /// The kid-friendly variant produced the stage result via handoff.
    HandedOff { agent: String, result: SearchResult },
}

impl SearchOutcome {
    pub fn producing_agent(&self) -> &str {
        match self {
            SearchOutcome::Direct { agent, .. } | SearchOutcome::HandedOff { agent, .. } => agent,
        }
    }

    pub fn result(&self) -> &SearchResult {
        match self {
            SearchOutcome::Direct { result, .. } | SearchOutcome::HandedOff { result, .. } => {
                result
            }
        }
    }

    pub fn was_handed_off(&self) -> bool {
        matches!(self, SearchOutcome::HandedOff { .. })
    }
}

/// Coordinates the adventure planning workflow.
pub struct AdventureManager {
    config: PlannerConfig,
    run_config: RunConfig,
    threshold_tool: ChildThresholdTool,
    weather_agent: Agent,
    search_agent: Agent,
    kid_friendly_agent: Agent,
    recommendation_agent: Agent,
}

impl AdventureManager {
    pub fn new(
        config: PlannerConfig,
        provider: Arc<dyn ModelProvider>,
        search: Arc<dyn SearchCapability>,
    ) -> Self {
        let search_tool: Arc<dyn Tool> = Arc::new(WebSearchTool::new(search));
        let kid_friendly_agent = create_kid_friendly_activity_agent(&config, search_tool.clone());
        let search_agent = create_activity_search_agent(
            &config,
            search_tool.clone(),
            kid_friendly_agent.clone(),
        );
        let weather_agent = create_weather_agent(&config, search_tool);
        let recommendation_agent = create_recommendation_agent(&config);

        let run_config = RunConfig::new(provider).with_max_turns(config.max_turns);
        let threshold_tool = ChildThresholdTool::new(config.child_age_threshold);

        Self {
            config,
            run_config,
            threshold_tool,
            weather_agent,
            search_agent,
            kid_friendly_agent,
            recommendation_agent,
        }
    }

    /// Run the full planning pipeline for one trip query.
    pub async fn run(&self, query: TripQuery) -> Result<TripPlan> {
        let trace_id = gen_trace_id();
        info!(trace_id = %trace_id, "starting adventure planning");

        let mut ctx = TripContext::new(query);

        async {
            let weather = self
                .weather_stage(&mut ctx)
                .instrument(stage_span(&trace_id, "weather"))
                .await?;

            let search = self
                .search_stage(&mut ctx, &weather)
                .instrument(stage_span(&trace_id, "search"))
                .await?;

            let plan = self
                .recommendation_stage(&ctx, &weather, &search)
                .instrument(stage_span(&trace_id, "recommendation"))
                .await?;

            info!(trace_id = %trace_id, "adventure planning complete");
            Ok(plan)
        }
        .instrument(run_span(&trace_id))
        .await
    }

    /// Stage 1: fetch the weather analysis for the trip dates.
    pub async fn weather_stage(&self, ctx: &mut TripContext) -> Result<WeatherAnalysis> {
        info!("fetching weather information");
        let query = required_query(ctx)?;

        let today = chrono::Utc::now().date_naive();
        let branch = ForecastBranch::for_start_date(
            query.start_date,
            today,
            self.config.forecast_window_days,
        );
        debug!(?branch, "selected forecast branch");

        let input = format!(
            "Get a weather analysis for a trip to {} from {} to {}. Today's date is {}.\n\n{}",
            query.location,
            query.start_date,
            query.end_date,
            today,
            branch.directive(self.config.forecast_window_days),
        );

        let outcome = Runner::run(&self.weather_agent, input, ctx, &self.run_config).await?;
        ctx.apply(&outcome.delta);

        let weather: WeatherAnalysis = outcome.result.final_output_as("weather")?;
        weather.validate()?;
        info!("weather information fetched");
        Ok(weather)
    }

    /// Search stage state machine: Initial -> ThresholdChecked ->
    /// (HandedOff | DirectSearchComplete).
    pub async fn search_stage(
        &self,
        ctx: &mut TripContext,
        weather: &WeatherAnalysis,
    ) -> Result<SearchOutcome> {
        info!("searching for activities");

        // The threshold check always runs first and its write must land
        // before the handoff decision reads the flag.
        let check = self.threshold_tool.execute(Value::Null, ctx).await?;
        debug!(message = %check.message, "child threshold check");
        ctx.apply(&check.delta);

        let query = required_query(ctx)?;
        let threshold_met = ctx.meets_child_threshold.unwrap_or(false);

        let outcome = if threshold_met {
            let notes = format!(
                "Handoff notes: trip to {} from {} to {}, {} participants (ages: {:?}). \
                 Weather summary: {}",
                query.location,
                query.start_date,
                query.end_date,
                query.participant_number,
                query.participant_ages,
                weather.summary,
            );
            info!(
                from = %self.search_agent.name(),
                to = %self.kid_friendly_agent.name(),
                "child threshold met, handing off search"
            );
            Runner::run(&self.kid_friendly_agent, notes, ctx, &self.run_config).await?
        } else {
            let input = format!(
                "Find suitable activities for a trip to {} from {} to {} for {} participants \
                 (ages: {:?}).\n\nWeather summary: {}",
                query.location,
                query.start_date,
                query.end_date,
                query.participant_number,
                query.participant_ages,
                weather.summary,
            );
            Runner::run(&self.search_agent, input, ctx, &self.run_config).await?
        };

        self.tag_search_outcome(ctx, outcome, threshold_met)
    }

    fn tag_search_outcome(
        &self,
        ctx: &mut TripContext,
        outcome: RunOutcome,
        threshold_met: bool,
    ) -> Result<SearchOutcome> {
        ctx.apply(&outcome.delta);

        let agent = outcome.result.final_agent.clone();
        let result: SearchResult = outcome.result.final_output_as("search")?;

        // A handed-off result stands even when empty: rendering degrades to
        // "no activities" and the threshold flag stays consistent. No
        // fallback re-search is attempted.
        if result.activities.is_empty() {
            warn!(agent = %agent, "search stage produced no activities");
        }

        let handed_off = threshold_met || agent != SEARCH_AGENT_NAME;
        info!(agent = %agent, handed_off, "search stage complete");

        Ok(if handed_off {
            SearchOutcome::HandedOff { agent, result }
        } else {
            SearchOutcome::Direct { agent, result }
        })
    }

    /// Stage 3: synthesize the final plan from the earlier stages' outputs.
    pub async fn recommendation_stage(
        &self,
        ctx: &TripContext,
        weather: &WeatherAnalysis,
        search: &SearchOutcome,
    ) -> Result<TripPlan> {
        info!("evaluating activities and creating trip plan");
        let query = required_query(ctx)?;

        let weather_json = serde_json::to_string(weather)?;
        let activities_json = serde_json::to_string(&search.result().activities)?;

        let input = format!(
            "Create a trip plan for {} from {} to {} for {} participants (ages: {:?}).\n\n\
             Weather information:\n{}\n\n\
             Activity search summary:\n{}\n\n\
             Candidate activities:\n{}\n",
            query.location,
            query.start_date,
            query.end_date,
            query.participant_number,
            query.participant_ages,
            weather_json,
            search.result().search_summary,
            activities_json,
        );

        let outcome = Runner::run(&self.recommendation_agent, input, ctx, &self.run_config).await?;
        let plan: TripPlan = outcome.result.final_output_as("recommendation")?;
        info!("trip plan generated");
        Ok(plan)
    }
}

fn required_query(ctx: &TripContext) -> Result<&TripQuery> {
    ctx.query
        .as_ref()
        .ok_or_else(|| PlannerError::invalid_query("run started without a trip query"))
}
