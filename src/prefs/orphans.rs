//! Report refresh overrides left behind by deleted widgets.
//!
//! Overrides are keyed by widget id alone and nothing removes them when a
//! widget or dashboard goes away. This only finds them.

use crate::source::WidgetId;

use regex::Regex;
use serde::Serialize;
use std::collections::BTreeSet;
use tracing::warn;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OrphanedOverride {
    pub key: String,
    pub widget: WidgetId,
}

/// Refresh override keys whose widget id is not in `live`, sorted by key.
pub fn find_orphaned_refresh_overrides(
    keys: &[String],
    live: &BTreeSet<WidgetId>,
) -> crate::Result<Vec<OrphanedOverride>> {
    const RF_RATE_KEY_RE: &str = r"^widget\.([0-9]+)\.rf_rate$";
    let re = Regex::new(RF_RATE_KEY_RE)?;

    let mut out = Vec::new();
    for key in keys {
        let Some(caps) = re.captures(key) else {
            continue;
        };
        let widget = match caps[1].parse::<u64>() {
            Ok(id) => WidgetId(id),
            Err(e) => {
                warn!(%key, error = %e, "skipping preference key with unusable widget id");
                continue;
            }
        };
        if !live.contains(&widget) {
            out.push(OrphanedOverride {
                key: key.clone(),
                widget,
            });
        }
    }

    out.sort_by(|a, b| a.key.cmp(&b.key));
    Ok(out)
}
