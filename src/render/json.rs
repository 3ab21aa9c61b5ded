use crate::view::DashboardView;

/// Render the view as pretty JSON for the presentation layer.
///
/// Grid widgets are keyed by widget id and fields by name, both in sorted
/// order, so the same view always renders to the same bytes.
pub fn render_json_view(view: &DashboardView) -> anyhow::Result<String> {
    let mut json = serde_json::to_string_pretty(view)?;
    json.push('\n');
    Ok(json)
}
