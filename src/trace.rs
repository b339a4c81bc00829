//! Per-run trace correlation
//!
//! Every pipeline run gets a UUID trace id, generated once and logged
//! before work starts. Each stage executes inside a named span carrying
//! that id so all invocations for one run can be correlated.

use tracing::Span;
use uuid::Uuid;

/// A unique identifier correlating every stage invocation of one run.
pub type TraceId = String;

/// Generates a new, unique trace id.
pub fn gen_trace_id() -> TraceId {
    Uuid::new_v4().to_string()
}

/// Span wrapping an entire pipeline run.
pub fn run_span(trace_id: &str) -> Span {
    tracing::info_span!("adventure_run", trace_id = %trace_id)
}

/// Span wrapping one pipeline stage of a run.
pub fn stage_span(trace_id: &str, stage: &str) -> Span {
    tracing::info_span!("stage", trace_id = %trace_id, stage = %stage)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_trace_ids_are_unique() {
        let a = gen_trace_id();
        let b = gen_trace_id();
        assert_ne!(a, b);
        assert_eq!(a.len(), 36);
    }
}
