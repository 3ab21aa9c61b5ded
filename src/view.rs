//! Dashboard page assembly: existence check, resolution, composition.

use crate::compose::{GridWidget, SkippedWidget, WidgetComposer};
use crate::error::EngineError;
use crate::prefs::{PreferenceStore, keys};
use crate::registry::WidgetTypeRegistry;
use crate::resolve::{DashboardResolver, Resolution};
use crate::source::{DashboardId, DataApi, WidgetId};

use serde::Serialize;
use std::collections::BTreeMap;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DashboardSummary {
    #[serde(rename = "dashboardid")]
    pub id: DashboardId,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DashboardView {
    pub dashboard: DashboardSummary,
    pub fullscreen: bool,
    pub filter_enabled: bool,
    pub grid_widgets: BTreeMap<WidgetId, GridWidget>,
    pub skipped: Vec<SkippedWidget>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PageOutcome {
    View(DashboardView),
    /// Nothing to show; send the user to the dashboard list.
    RedirectToList,
}

/// Request-level inputs that are not part of composition.
#[derive(Debug, Clone, Copy, Default)]
pub struct ViewRequest {
    pub dashboard: Option<DashboardId>,
    pub fullscreen: bool,
}

pub fn build_dashboard_view<P, A>(
    request: ViewRequest,
    registry: &WidgetTypeRegistry,
    resolver: &DashboardResolver,
    prefs: &mut P,
    api: &A,
) -> Result<PageOutcome, EngineError>
where
    P: PreferenceStore + ?Sized,
    A: DataApi + ?Sized,
{
    // An explicitly requested dashboard must exist before anything else runs.
    // Id 0 means "none requested" and falls through to resolution.
    if let Some(id) = request.dashboard.filter(|id| !id.is_zero()) {
        if !api.dashboard_exists(id)? {
            return Err(EngineError::DashboardNotFound(id));
        }
    }

    let dashboard = match resolver.resolve(request.dashboard, prefs, api)? {
        Resolution::Found(dashboard) => dashboard,
        Resolution::NotFound => return Ok(PageOutcome::RedirectToList),
    };

    let composition = WidgetComposer::new(registry).compose(&dashboard.widgets, &*prefs)?;

    let filter_enabled = prefs
        .get(keys::FILTER_ENABLED)?
        .is_some_and(|v| v.is_set());

    Ok(PageOutcome::View(DashboardView {
        dashboard: DashboardSummary {
            id: dashboard.id,
            name: dashboard.name,
        },
        fullscreen: request.fullscreen,
        filter_enabled,
        grid_widgets: composition.widgets,
        skipped: composition
            .skipped
            .into_iter()
            .map(|(id, error)| SkippedWidget {
                id,
                error: error.to_string(),
            })
            .collect(),
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::prefs::{MemoryPreferences, PrefValue};
    use crate::source::JsonDataSource;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn source() -> JsonDataSource {
        let dashboards = serde_json::from_value(json!([{
            "dashboardid": "1",
            "name": "Global view",
            "widgets": [
                { "widgetid": "5", "type": "clock", "name": "", "row": 0, "col": 0, "height": 2, "width": 4 },
                { "widgetid": "6", "type": "weather", "name": "Forecast" }
            ]
        }]))
        .unwrap();
        JsonDataSource::from_dashboards(dashboards).unwrap()
    }

    fn build(request: ViewRequest, prefs: &mut MemoryPreferences) -> Result<PageOutcome, EngineError> {
        let registry = WidgetTypeRegistry::with_defaults();
        let resolver = DashboardResolver::new(DashboardId(1));
        build_dashboard_view(request, &registry, &resolver, prefs, &source())
    }

    #[test]
    fn default_dashboard_view_with_pass_through_flags() {
        let mut prefs = MemoryPreferences::new().with(keys::FILTER_ENABLED, PrefValue::Int(1));
        let request = ViewRequest {
            dashboard: None,
            fullscreen: true,
        };

        let PageOutcome::View(view) = build(request, &mut prefs).unwrap() else {
            panic!("expected a view");
        };

        assert_eq!(
            view.dashboard,
            DashboardSummary {
                id: DashboardId(1),
                name: "Global view".into(),
            }
        );
        assert!(view.fullscreen);
        assert!(view.filter_enabled);
        assert_eq!(view.grid_widgets.len(), 1);
        assert_eq!(view.grid_widgets[&WidgetId(5)].header, "Clock");
        assert_eq!(view.skipped.len(), 1);
        assert_eq!(view.skipped[0].id, WidgetId(6));
        assert_eq!(view.skipped[0].error, "unknown widget type 'weather'");
    }

    #[test]
    fn redirects_once_the_list_was_opened() {
        let mut prefs = MemoryPreferences::new().with(keys::LIST_WAS_OPENED, PrefValue::Int(1));
        assert_eq!(
            build(ViewRequest::default(), &mut prefs).unwrap(),
            PageOutcome::RedirectToList
        );
    }

    #[test]
    fn unknown_explicit_dashboard_is_an_error() {
        let mut prefs = MemoryPreferences::new();
        let request = ViewRequest {
            dashboard: Some(DashboardId(8)),
            fullscreen: false,
        };
        assert_eq!(
            build(request, &mut prefs),
            Err(EngineError::DashboardNotFound(DashboardId(8)))
        );
        assert_eq!(prefs.get(keys::LAST_VIEWED_DASHBOARD).unwrap(), None);
    }

    #[test]
    fn zero_id_falls_back_to_the_default_dashboard() {
        let mut prefs = MemoryPreferences::new();
        let request = ViewRequest {
            dashboard: Some(DashboardId(0)),
            fullscreen: false,
        };
        let PageOutcome::View(view) = build(request, &mut prefs).unwrap() else {
            panic!("expected the default dashboard");
        };
        assert_eq!(view.dashboard.id, DashboardId(1));
    }
}
