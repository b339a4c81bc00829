//! Error types for the trip planning pipeline

use thiserror::Error;

/// Result type alias for the pipeline
pub type Result<T> = std::result::Result<T, PlannerError>;

/// Main error type for the trip planning pipeline
#[derive(Debug, Error)]
pub enum PlannerError {
    /// Error from the OpenAI API
    #[error("OpenAI API error: {0}")]
    OpenAIError(#[from] async_openai::error::OpenAIError),

    /// A stage's output could not be coerced to its declared schema.
    /// Fatal for the run: later stages depend on earlier typed outputs.
    #[error("schema mismatch in {stage} stage: {message}")]
    SchemaMismatch { stage: String, message: String },

    /// An invalid trip query was supplied by the caller
    #[error("invalid trip query: {message}")]
    InvalidQuery { message: String },

    /// Maximum turns exceeded within a single agent invocation
    #[error("maximum turns exceeded: {max_turns}")]
    MaxTurnsExceeded { max_turns: usize },

    /// Tool execution error
    #[error("tool execution error: {message}")]
    ToolExecutionError { message: String },

    /// Handoff error
    #[error("handoff error: {message}")]
    HandoffError { message: String },

    /// The model produced output the runner cannot act on
    #[error("model behavior error: {message}")]
    ModelBehaviorError { message: String },

    /// Serialization/deserialization error
    #[error("serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    /// IO error
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

impl PlannerError {
    /// Attribute a schema coercion failure to a named pipeline stage.
    pub fn schema_mismatch(stage: impl Into<String>, message: impl Into<String>) -> Self {
        Self::SchemaMismatch {
            stage: stage.into(),
            message: message.into(),
        }
    }

    pub fn invalid_query(message: impl Into<String>) -> Self {
        Self::InvalidQuery {
            message: message.into(),
        }
    }
}
