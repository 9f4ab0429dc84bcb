pub mod bridge;

use std::fmt::Write;

use crate::{
    app::state::{FetchPhase, ViewState},
    domain::weather::round_temp,
};

use bridge::{MAX_FORECAST_ENTRIES, PropertyTree};

/// Console frame: a readable header followed by the renderer properties.
#[must_use]
pub fn render(view: &ViewState) -> String {
    let mut tree = PropertyTree::renderer_layout(MAX_FORECAST_ENTRIES);
    bridge::push(&bridge::project(view), &mut tree);

    let mut out = String::new();
    let _ = writeln!(
        out,
        "{}  {}{}  {} [{}]",
        view.location_label,
        round_temp(view.current_temperature),
        view.units.symbol(),
        view.current_category.label(),
        view.current_category.icon_name(),
    );
    if let Some(condition) = view.current_condition {
        let _ = writeln!(out, "{} ({})", condition.main, condition.description);
    }
    let _ = writeln!(
        out,
        "{} {:02}:00, {:?}",
        view.current_day.abbreviation(),
        view.current_hour,
        view.time_of_day,
    );
    if let Some(line) = status_line(view) {
        let _ = writeln!(out, "{line}");
    }
    out.push('\n');
    out.push_str(&tree.to_string());
    out
}

fn status_line(view: &ViewState) -> Option<String> {
    if let Some(message) = &view.error_message {
        return Some(format!("! {message}"));
    }
    match view.phase {
        FetchPhase::Loading => Some("Loading...".to_string()),
        FetchPhase::Idle | FetchPhase::Loaded | FetchPhase::Error => None,
    }
}
