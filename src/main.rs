//! AdventureBot entry point
//!
//! Runs the planning pipeline once for a trip query (from a JSON file path
//! argument, or the built-in sample) and prints the rendered plan. Any
//! unrecovered stage failure exits non-zero with the failing stage named in
//! the message.

use std::process::ExitCode;
use std::sync::Arc;

use async_trait::async_trait;
use tracing::warn;
use tracing_subscriber::EnvFilter;

use adventurebot::config::PlannerConfig;
use adventurebot::error::Result;
use adventurebot::manager::AdventureManager;
use adventurebot::model::OpenAIProvider;
use adventurebot::models::TripQuery;
use adventurebot::render::render_trip_plan;
use adventurebot::tool::SearchCapability;

/// Placeholder search backend for running without a configured search
/// collaborator: tells the agent no results are available so it falls back
/// to destination knowledge instead of fabricating citations.
#[derive(Debug)]
struct OfflineSearch;

#[async_trait]
impl SearchCapability for OfflineSearch {
    async fn search(&self, query: &str) -> Result<String> {
        warn!(query, "no search backend configured");
        Ok(
            "No web search backend is configured; no results available. Rely on your \
             general knowledge of the destination and omit source URLs."
                .to_string(),
        )
    }
}

fn sample_query() -> Result<TripQuery> {
    TripQuery::new(
        "2025-06-05".parse().map_err(invalid_date)?,
        "2025-06-14".parse().map_err(invalid_date)?,
        "Bogota",
        vec![32, 35, 10],
    )
}

fn invalid_date(e: chrono::ParseError) -> adventurebot::PlannerError {
    adventurebot::PlannerError::invalid_query(format!("bad date: {e}"))
}

fn load_query() -> Result<TripQuery> {
    match std::env::args().nth(1) {
        Some(path) => {
            let raw = std::fs::read_to_string(path)?;
            TripQuery::from_json(&raw)
        }
        None => sample_query(),
    }
}

async fn run() -> Result<()> {
    let config = PlannerConfig::from_env();
    let query = load_query()?;

    let manager = AdventureManager::new(
        config,
        Arc::new(OpenAIProvider::new()),
        Arc::new(OfflineSearch),
    );

    let plan = manager.run(query).await?;
    println!("{}", render_trip_plan(&plan));
    Ok(())
}

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    match run().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("adventure planning failed: {e}");
            ExitCode::FAILURE
        }
    }
}
