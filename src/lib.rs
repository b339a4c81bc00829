//! # AdventureBot
//!
//! A multi-stage orchestration pipeline that coordinates LLM agents to plan
//! a trip: a weather agent analyzes conditions for the travel dates, a
//! search agent discovers candidate activities (handing off to a
//! kid-friendly variant when young children are in the party), and a
//! recommendation agent synthesizes the final itinerary.
//!
//! ## Core Concepts
//!
//! - **Agent**: a declarative bundle of instructions, output schema, tools,
//!   and handoff targets ([`agent::Agent`]), built by the factories in
//!   [`agents`].
//! - **Tool**: a context-aware capability an agent can invoke mid-reasoning
//!   ([`tool::Tool`]); mutations come back as explicit
//!   [`models::ContextDelta`]s instead of hidden aliasing.
//! - **Runner**: the generic invocation loop ([`runner::Runner`]) that
//!   executes an agent against a [`model::ModelProvider`], follows
//!   handoffs, and reports which agent ultimately answered.
//! - **Manager**: [`manager::AdventureManager`] sequences the three stages,
//!   threads typed outputs between them, and correlates everything under a
//!   per-run trace id.
//!
//! ## Example
//!
//! ```rust,no_run
//! use adventurebot::config::PlannerConfig;
//! use adventurebot::manager::AdventureManager;
//! use adventurebot::model::OpenAIProvider;
//! use adventurebot::models::TripQuery;
//! use adventurebot::render::render_trip_plan;
//! use adventurebot::tool::SearchCapability;
//! use std::sync::Arc;
//!
//! # #[derive(Debug)]
//! # struct MySearch;
//! # #[async_trait::async_trait]
//! # impl SearchCapability for MySearch {
//! #     async fn search(&self, q: &str) -> adventurebot::error::Result<String> {
//! #         Ok(q.to_string())
//! #     }
//! # }
//! # async fn example() -> adventurebot::error::Result<()> {
//! let query = TripQuery::new(
//!     "2025-06-05".parse().unwrap(),
//!     "2025-06-14".parse().unwrap(),
//!     "Bogota",
//!     vec![32, 35, 10],
//! )?;
//!
//! let manager = AdventureManager::new(
//!     PlannerConfig::from_env(),
//!     Arc::new(OpenAIProvider::new()),
//!     Arc::new(MySearch),
//! );
//! let plan = manager.run(query).await?;
//! println!("{}", render_trip_plan(&plan));
//! # Ok(())
//! # }
//! ```

pub mod agent;
pub mod agents;
pub mod config;
pub mod error;
pub mod handoff;
pub mod items;
pub mod manager;
pub mod model;
pub mod models;
pub mod render;
pub mod result;
pub mod runner;
pub mod tool;
pub mod trace;

pub use agent::{Agent, AgentConfig};
pub use config::PlannerConfig;
pub use error::{PlannerError, Result};
pub use handoff::Handoff;
pub use manager::{AdventureManager, SearchOutcome};
pub use model::{ModelProvider, OpenAIProvider, ToolSpec};
pub use models::{
    ActivityRecommendation, ActivityResult, ContextDelta, SearchResult, TripContext, TripPlan,
    TripQuery, WeatherAnalysis,
};
pub use render::render_trip_plan;
pub use result::{RunOutcome, RunResult};
pub use runner::{RunConfig, Runner};
pub use tool::{ChildThresholdTool, SearchCapability, Tool, ToolOutput, WebSearchTool};
