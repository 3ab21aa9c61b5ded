//! Data API seam and a JSON-export backed implementation.

use crate::error::DataApiUnavailable;
use crate::source::dashboard::Dashboard;
use crate::source::ids::{DashboardId, WidgetId};

use anyhow::{Context, bail};
use std::collections::{BTreeMap, BTreeSet};
use std::fs;

/// Read side of the dashboard data API.
pub trait DataApi {
    /// Dashboard with its widgets, or `None` when the id is unknown.
    fn fetch_dashboard(&self, id: DashboardId) -> Result<Option<Dashboard>, DataApiUnavailable>;

    fn dashboard_exists(&self, id: DashboardId) -> Result<bool, DataApiUnavailable>;
}

/// Dashboards loaded from a JSON export (a list of dashboard records).
#[derive(Debug, Clone, Default)]
pub struct JsonDataSource {
    dashboards: BTreeMap<DashboardId, Dashboard>,
}

impl JsonDataSource {
    pub fn load(path: &str) -> crate::Result<Self> {
        let text =
            fs::read_to_string(path).with_context(|| format!("read dashboards file {}", path))?;
        let dashboards: Vec<Dashboard> = serde_json::from_str(&text)
            .with_context(|| format!("parse dashboards file {}", path))?;
        Self::from_dashboards(dashboards).with_context(|| format!("validate dashboards file {}", path))
    }

    /// Index dashboards by id. Ids must be unique and non-zero.
    pub fn from_dashboards(dashboards: Vec<Dashboard>) -> crate::Result<Self> {
        let mut out = BTreeMap::new();
        for dashboard in dashboards {
            if dashboard.id.is_zero() {
                bail!("dashboard id 0 is reserved (dashboard {:?})", dashboard.name);
            }
            let id = dashboard.id;
            if out.insert(id, dashboard).is_some() {
                bail!("duplicate dashboard id: {}", id);
            }
        }
        Ok(Self { dashboards: out })
    }

    pub fn dashboards(&self) -> impl Iterator<Item = &Dashboard> {
        self.dashboards.values()
    }

    /// Ids of every widget on every dashboard.
    pub fn widget_ids(&self) -> BTreeSet<WidgetId> {
        self.dashboards
            .values()
            .flat_map(|d| d.widgets.iter().map(|w| w.id))
            .collect()
    }
}

impl DataApi for JsonDataSource {
    fn fetch_dashboard(&self, id: DashboardId) -> Result<Option<Dashboard>, DataApiUnavailable> {
        Ok(self.dashboards.get(&id).cloned())
    }

    fn dashboard_exists(&self, id: DashboardId) -> Result<bool, DataApiUnavailable> {
        Ok(self.dashboards.contains_key(&id))
    }
}
