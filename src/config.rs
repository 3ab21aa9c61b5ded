//! Engine configuration.
//!
//! Defaults merged with `DASHGRID_*` environment variables, e.g.
//! `DASHGRID_DEFAULT_DASHBOARD_ID=3`, `DASHGRID_REGISTRY=types.json`,
//! `DASHGRID_DEBUG=true`.

use crate::registry::WidgetTypeRegistry;
use crate::source::DashboardId;

use anyhow::anyhow;
use figment::Figment;
use figment::providers::{Env, Serialized};
use serde::{Deserialize, Serialize};

pub const ENV_PREFIX: &str = "DASHGRID_";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Dashboard shown to users who have neither a last viewed dashboard
    /// nor ever opened the dashboard list.
    pub default_dashboard_id: u64,

    /// Optional registry override file (see `registry::TypeOverride`).
    pub registry: Option<String>,

    pub debug: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            default_dashboard_id: 1,
            registry: None,
            debug: false,
        }
    }
}

impl Config {
    pub fn figment() -> Figment {
        Figment::new()
            .merge(Serialized::defaults(Config::default()))
            .merge(Env::prefixed(ENV_PREFIX))
    }

    pub fn load() -> crate::Result<Self> {
        Self::from_figment(Self::figment())
    }

    pub fn from_figment(figment: Figment) -> crate::Result<Self> {
        figment
            .extract()
            .map_err(|e| anyhow!("load configuration: {}", e))
    }

    pub fn default_dashboard(&self) -> DashboardId {
        DashboardId(self.default_dashboard_id)
    }

    /// Built-in widget types, adjusted by the override file if configured.
    pub fn registry(&self) -> crate::Result<WidgetTypeRegistry> {
        match &self.registry {
            Some(path) => WidgetTypeRegistry::load_with_overrides(path),
            None => Ok(WidgetTypeRegistry::with_defaults()),
        }
    }
}
