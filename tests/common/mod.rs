//! Shared test fixtures: a scripted model provider and canned stage outputs.

use std::sync::Mutex;

use async_trait::async_trait;

use adventurebot::error::Result;
use adventurebot::items::{Message, ModelResponse};
use adventurebot::model::{ModelProvider, ToolSpec};
use adventurebot::models::TripQuery;

/// Model provider that pops canned responses in order and records every
/// call it serves.
#[derive(Debug, Default)]
pub struct ScriptedProvider {
    responses: Mutex<Vec<ModelResponse>>,
    calls: Mutex<Vec<String>>,
}

impl ScriptedProvider {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push_message(self, content: impl Into<String>) -> Self {
        self.responses
            .lock()
            .unwrap()
            .push(ModelResponse::new_message(content));
        self
    }

    pub fn push_json(self, value: serde_json::Value) -> Self {
        self.push_message(value.to_string())
    }

    /// Models invoked so far, in call order.
    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl ModelProvider for ScriptedProvider {
    async fn complete(
        &self,
        model: &str,
        _messages: &[Message],
        _tools: &[ToolSpec],
        _temperature: Option<f32>,
    ) -> Result<ModelResponse> {
        self.calls.lock().unwrap().push(model.to_string());
        let mut responses = self.responses.lock().unwrap();
        if responses.is_empty() {
            return Ok(ModelResponse::new_message("unscripted response"));
        }
        Ok(responses.remove(0))
    }
}

/// Search backend that returns a fixed blurb for any query.
#[derive(Debug)]
pub struct StubSearch;

#[async_trait]
impl adventurebot::tool::SearchCapability for StubSearch {
    async fn search(&self, query: &str) -> Result<String> {
        Ok(format!("stub results for: {query}"))
    }
}

pub fn bogota_family_query() -> TripQuery {
    TripQuery::new(
        "2025-06-05".parse().unwrap(),
        "2025-06-14".parse().unwrap(),
        "Bogota",
        vec![32, 35, 10],
    )
    .unwrap()
}

pub fn adults_only_query() -> TripQuery {
    TripQuery::new(
        "2025-06-05".parse().unwrap(),
        "2025-06-14".parse().unwrap(),
        "Bogota",
        vec![32, 35],
    )
    .unwrap()
}

pub fn weather_json() -> serde_json::Value {
    serde_json::json!({
        "summary": "Mild days with frequent afternoon showers.",
        "temperature_range": [9.0, 19.0],
        "precipitation_chance": 65.0,
        "recommended_clothing": ["layers", "rain jacket"],
        "weather_warnings": ["Afternoon thunderstorms possible"]
    })
}

pub fn search_json() -> serde_json::Value {
    serde_json::json!({
        "search_summary": "Found a mix of indoor and outdoor options.",
        "activities": [
            {
                "name": "Gold Museum",
                "description": "Pre-Columbian gold collection in the city center.",
                "location": "Bogota",
                "age_range": "All ages",
                "weather_dependency": "Indoor",
                "source_url": "https://example.com/gold-museum"
            }
        ]
    })
}

pub fn plan_json() -> serde_json::Value {
    serde_json::json!({
        "location": "Bogota",
        "dates": "2025-06-05 to 2025-06-14",
        "participants_summary": "3 participants (ages: 32, 35, 10)",
        "weather_summary": "Mild days with frequent afternoon showers.",
        "recommended_activities": [
            {
                "name": "Gold Museum",
                "description": "Pre-Columbian gold collection in the city center.",
                "reasoning": "Indoor activity that suits all three participants and the rainy forecast.",
                "source_url": "https://example.com/gold-museum"
            }
        ],
        "packing_list": ["Rain jacket", "Comfortable shoes"],
        "general_tips": ["Plan outdoor activities for the morning"]
    })
}
