//! Text rendering of the final trip plan

use std::fmt::Write;

use crate::models::TripPlan;

/// Render a complete trip plan for console presentation. Empty sections
/// degrade to explicit placeholder lines instead of vanishing.
pub fn render_trip_plan(plan: &TripPlan) -> String {
    let mut out = String::new();

    // String formatting is infallible; ignore the fmt::Result plumbing.
    let _ = writeln!(out, "=== Your Adventure Plan ===\n");
    let _ = writeln!(out, "Location: {}", plan.location);
    let _ = writeln!(out, "Dates: {}", plan.dates);
    let _ = writeln!(out, "Participants: {}\n", plan.participants_summary);
    let _ = writeln!(out, "Weather Summary:\n{}\n", plan.weather_summary);

    let _ = writeln!(out, "Recommended Activities:");
    if plan.recommended_activities.is_empty() {
        let _ = writeln!(
            out,
            "- No specific activities recommended based on search and evaluation."
        );
    }
    for activity in &plan.recommended_activities {
        let _ = writeln!(out, "\n- {}", activity.name);
        let _ = writeln!(out, "  Description: {}", activity.description);
        let _ = writeln!(out, "  Reasoning: {}", activity.reasoning);
        if let Some(best_time) = &activity.best_time {
            let _ = writeln!(out, "  Best Time: {best_time}");
        }
        if let Some(url) = &activity.source_url {
            let _ = writeln!(out, "  More Info: {url}");
        }
        if let Some(considerations) = &activity.weather_considerations {
            let _ = writeln!(out, "  Weather Considerations:");
            for consideration in considerations {
                let _ = writeln!(out, "    - {consideration}");
            }
        }
        if let Some(tips) = &activity.preparation_tips {
            let _ = writeln!(out, "  Preparation Tips:");
            for tip in tips {
                let _ = writeln!(out, "    - {tip}");
            }
        }
    }

    let _ = writeln!(out, "\nPacking List:");
    if plan.packing_list.is_empty() {
        let _ = writeln!(out, "- No specific packing items suggested.");
    }
    for item in &plan.packing_list {
        let _ = writeln!(out, "- {item}");
    }

    let _ = writeln!(out, "\nGeneral Tips:");
    if plan.general_tips.is_empty() {
        let _ = writeln!(out, "- No general tips provided.");
    }
    for tip in &plan.general_tips {
        let _ = writeln!(out, "- {tip}");
    }

    out
}
