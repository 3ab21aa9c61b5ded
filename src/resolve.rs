//! Pick the dashboard to show and fetch it.
//!
//! Precedence: explicit request, then the user's last viewed dashboard, then
//! the configured default dashboard, but the default only applies while the
//! user has never opened the dashboard list.

use crate::error::EngineError;
use crate::prefs::{PrefValue, PreferenceStore, keys};
use crate::source::{Dashboard, DashboardId, DataApi};

use tracing::{debug, info};

#[derive(Debug, Clone, PartialEq)]
pub enum Resolution {
    Found(Dashboard),
    /// No dashboard to show; the caller sends the user to the list.
    NotFound,
}

#[derive(Debug, Clone, Copy)]
pub struct DashboardResolver {
    default_dashboard: DashboardId,
}

impl DashboardResolver {
    pub fn new(default_dashboard: DashboardId) -> Self {
        Self { default_dashboard }
    }

    /// Dashboard id to load, or `None` when there is nothing to load.
    pub fn resolve_id<P: PreferenceStore + ?Sized>(
        &self,
        requested: Option<DashboardId>,
        prefs: &P,
    ) -> Result<Option<DashboardId>, EngineError> {
        let mut id = match requested {
            Some(id) => id,
            None => prefs
                .get(keys::LAST_VIEWED_DASHBOARD)?
                .and_then(|v| v.as_id())
                .map(DashboardId)
                .unwrap_or_default(),
        };

        if id.is_zero() {
            let list_was_opened = prefs
                .get(keys::LIST_WAS_OPENED)?
                .is_some_and(|v| v.is_set());
            if !list_was_opened {
                debug!(default = %self.default_dashboard, "falling back to default dashboard");
                id = self.default_dashboard;
            }
        }

        Ok((!id.is_zero()).then_some(id))
    }

    /// Resolve, fetch and remember the dashboard as last viewed.
    pub fn resolve<P, A>(
        &self,
        requested: Option<DashboardId>,
        prefs: &mut P,
        api: &A,
    ) -> Result<Resolution, EngineError>
    where
        P: PreferenceStore + ?Sized,
        A: DataApi + ?Sized,
    {
        let Some(id) = self.resolve_id(requested, prefs)? else {
            info!("no dashboard selected");
            return Ok(Resolution::NotFound);
        };

        let Some(dashboard) = api.fetch_dashboard(id)? else {
            info!(dashboard = %id, "dashboard not found");
            return Ok(Resolution::NotFound);
        };

        prefs.set(keys::LAST_VIEWED_DASHBOARD, PrefValue::Id(id.0))?;
        info!(dashboard = %id, widgets = dashboard.widgets.len(), "resolved dashboard");
        Ok(Resolution::Found(dashboard))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::DataApiUnavailable;
    use crate::prefs::MemoryPreferences;
    use crate::source::JsonDataSource;
    use serde_json::json;

    const DEFAULT: DashboardId = DashboardId(1);

    fn resolver() -> DashboardResolver {
        DashboardResolver::new(DEFAULT)
    }

    fn source() -> JsonDataSource {
        let dashboards = serde_json::from_value(json!([
            { "dashboardid": 1, "name": "Global view" },
            { "dashboardid": 4, "name": "Network" }
        ]))
        .unwrap();
        JsonDataSource::from_dashboards(dashboards).unwrap()
    }

    struct DownApi;

    impl DataApi for DownApi {
        fn fetch_dashboard(&self, _id: DashboardId) -> Result<Option<Dashboard>, DataApiUnavailable> {
            Err(DataApiUnavailable::new("timeout"))
        }

        fn dashboard_exists(&self, _id: DashboardId) -> Result<bool, DataApiUnavailable> {
            Err(DataApiUnavailable::new("timeout"))
        }
    }

    #[test]
    fn explicit_request_wins() {
        let prefs = MemoryPreferences::new().with(keys::LAST_VIEWED_DASHBOARD, PrefValue::Id(4));
        let id = resolver().resolve_id(Some(DashboardId(9)), &prefs).unwrap();
        assert_eq!(id, Some(DashboardId(9)));
    }

    #[test]
    fn last_viewed_is_used_without_request() {
        let prefs = MemoryPreferences::new().with(keys::LAST_VIEWED_DASHBOARD, PrefValue::Id(4));
        assert_eq!(resolver().resolve_id(None, &prefs).unwrap(), Some(DashboardId(4)));
    }

    #[test]
    fn default_dashboard_until_list_is_opened() {
        let prefs = MemoryPreferences::new().with(keys::LAST_VIEWED_DASHBOARD, PrefValue::Id(0));
        assert_eq!(resolver().resolve_id(None, &prefs).unwrap(), Some(DEFAULT));

        let prefs = prefs.with(keys::LIST_WAS_OPENED, PrefValue::Int(1));
        assert_eq!(resolver().resolve_id(None, &prefs).unwrap(), None);
    }

    #[test]
    fn explicit_zero_still_gets_the_default() {
        let prefs = MemoryPreferences::new();
        let id = resolver().resolve_id(Some(DashboardId(0)), &prefs).unwrap();
        assert_eq!(id, Some(DEFAULT));
    }

    #[test]
    fn resolve_remembers_last_viewed() {
        let mut prefs = MemoryPreferences::new();
        let resolution = resolver().resolve(Some(DashboardId(4)), &mut prefs, &source()).unwrap();

        match resolution {
            Resolution::Found(d) => assert_eq!(d.name, "Network"),
            Resolution::NotFound => panic!("expected dashboard 4"),
        }
        assert_eq!(
            prefs.get(keys::LAST_VIEWED_DASHBOARD).unwrap(),
            Some(PrefValue::Id(4))
        );

        // Next visit without a request lands on the same dashboard.
        let again = resolver().resolve(None, &mut prefs, &source()).unwrap();
        assert!(matches!(again, Resolution::Found(d) if d.id == DashboardId(4)));
    }

    #[test]
    fn missing_dashboard_is_not_found_and_not_remembered() {
        let mut prefs = MemoryPreferences::new().with(keys::LAST_VIEWED_DASHBOARD, PrefValue::Id(4));
        let resolution = resolver().resolve(Some(DashboardId(77)), &mut prefs, &source()).unwrap();

        assert_eq!(resolution, Resolution::NotFound);
        assert_eq!(
            prefs.get(keys::LAST_VIEWED_DASHBOARD).unwrap(),
            Some(PrefValue::Id(4))
        );
    }

    #[test]
    fn nothing_selected_is_not_found() {
        let mut prefs = MemoryPreferences::new().with(keys::LIST_WAS_OPENED, PrefValue::Int(1));
        let resolution = resolver().resolve(None, &mut prefs, &source()).unwrap();
        assert_eq!(resolution, Resolution::NotFound);
    }

    #[test]
    fn data_api_failure_propagates() {
        let mut prefs = MemoryPreferences::new();
        let err = resolver().resolve(Some(DashboardId(4)), &mut prefs, &DownApi).unwrap_err();
        assert_eq!(err, EngineError::DataApiUnavailable(DataApiUnavailable::new("timeout")));
        assert_eq!(prefs.get(keys::LAST_VIEWED_DASHBOARD).unwrap(), None);
    }
}
