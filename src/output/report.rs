use crate::planner::Itinerary;

/// Human-readable itinerary: summary table, then one section per stop
pub fn render_markdown(itinerary: &Itinerary) -> String {
    let summary = &itinerary.summary;
    let mut content = String::new();

    content.push_str("# Walking itinerary\n\n");

    content.push_str("| Metric | Value |\n");
    content.push_str("|--------|-------|\n");
    content.push_str(&format!("| Stops | {} |\n", summary.total_places));
    content.push_str(&format!(
        "| Walking | {:.1} min |\n",
        summary.total_walking_time_min
    ));
    content.push_str(&format!(
        "| Total duration | {:.1} h |\n",
        summary.total_duration_hours
    ));
    content.push_str(&format!(
        "| Generated | {} |\n",
        itinerary.generated_at.format("%Y-%m-%d %H:%M UTC")
    ));
    content.push_str("\n---\n\n");

    if itinerary.plan.is_empty() {
        content.push_str("*No stops*\n");
        return content;
    }

    for (idx, stop) in itinerary.plan.iter().enumerate() {
        content.push_str(&format!("## {}. {}\n\n", idx + 1, stop.title));
        content.push_str(&format!(
            "- **Walk:** {:.1} min ({:.0} m)\n",
            stop.walking_time_min, stop.walking_distance_m
        ));
        content.push_str(&format!("- **Visit:** {:.0} min\n", stop.visit_duration_min));
        content.push_str(&format!("- **Done at:** +{:.1} min\n", stop.elapsed_min));
        content.push_str(&format!("- **Location:** `{:.5}, {:.5}`\n", stop.lat, stop.lon));
        content.push('\n');
        content.push_str(&format!("{}\n\n", stop.why));
    }

    content
}
