//! Per-user preference storage.
//!
//! The engine reads refresh overrides and the last viewed dashboard through
//! [`PreferenceStore`], and writes the last viewed dashboard back. A store
//! value is always scoped to a single user.

pub mod file;
pub mod memory;
pub mod orphans;

pub use file::FilePreferences;
pub use memory::MemoryPreferences;

use crate::error::PreferenceStoreUnavailable;
use crate::source::WidgetId;

use serde::{Deserialize, Serialize};

/// Preference keys used by the dashboard view.
pub mod keys {
    use crate::source::WidgetId;

    pub const LAST_VIEWED_DASHBOARD: &str = "last_viewed_dashboard_id";
    pub const LIST_WAS_OPENED: &str = "list_was_opened";
    pub const FILTER_ENABLED: &str = "dashconf.filter.enable";

    /// Refresh override for one widget instance. Keyed by widget id only.
    pub fn widget_refresh_rate(widget: WidgetId) -> String {
        format!("widget.{}.rf_rate", widget)
    }
}

/// A stored value; the variant is the stored value type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "lowercase")]
pub enum PrefValue {
    Int(i64),
    Str(String),
    Id(u64),
}

impl PrefValue {
    /// Integer reading of the value. Strings must hold a whole integer.
    pub fn as_int(&self) -> Option<i64> {
        match self {
            PrefValue::Int(n) => Some(*n),
            PrefValue::Id(n) => i64::try_from(*n).ok(),
            PrefValue::Str(s) => s.trim().parse().ok(),
        }
    }

    pub fn as_id(&self) -> Option<u64> {
        self.as_int().and_then(|n| u64::try_from(n).ok())
    }

    /// Flags are stored as integer 1.
    pub fn is_set(&self) -> bool {
        self.as_int() == Some(1)
    }
}

pub trait PreferenceStore {
    fn get(&self, key: &str) -> Result<Option<PrefValue>, PreferenceStoreUnavailable>;

    fn set(&mut self, key: &str, value: PrefValue) -> Result<(), PreferenceStoreUnavailable>;

    /// Every key stored for this user.
    fn keys(&self) -> Result<Vec<String>, PreferenceStoreUnavailable>;

    fn get_or(&self, key: &str, default: PrefValue) -> Result<PrefValue, PreferenceStoreUnavailable> {
        Ok(self.get(key)?.unwrap_or(default))
    }
}

/// Store a refresh interval override for one widget.
pub fn set_widget_refresh_rate<P: PreferenceStore + ?Sized>(
    prefs: &mut P,
    widget: WidgetId,
    seconds: u32,
) -> Result<(), PreferenceStoreUnavailable> {
    prefs.set(
        &keys::widget_refresh_rate(widget),
        PrefValue::Int(i64::from(seconds)),
    )
}

/// Record that the user has seen the dashboard list, which disables the
/// default dashboard fallback.
pub fn mark_list_opened<P: PreferenceStore + ?Sized>(
    prefs: &mut P,
) -> Result<(), PreferenceStoreUnavailable> {
    prefs.set(keys::LIST_WAS_OPENED, PrefValue::Int(1))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn refresh_key_embeds_widget_id() {
        assert_eq!(keys::widget_refresh_rate(WidgetId(42)), "widget.42.rf_rate");
    }

    #[test]
    fn integer_readings() {
        assert_eq!(PrefValue::Str(" 30 ".into()).as_int(), Some(30));
        assert_eq!(PrefValue::Str("soon".into()).as_int(), None);
        assert_eq!(PrefValue::Id(7).as_id(), Some(7));
        assert_eq!(PrefValue::Int(-1).as_id(), None);
    }

    #[test]
    fn only_one_counts_as_set() {
        assert!(PrefValue::Int(1).is_set());
        assert!(PrefValue::Str("1".into()).is_set());
        assert!(!PrefValue::Int(0).is_set());
        assert!(!PrefValue::Int(2).is_set());
    }

    #[test]
    fn value_type_is_part_of_the_encoding() {
        let json = serde_json::to_string(&PrefValue::Id(3)).unwrap();
        assert_eq!(json, r#"{"type":"id","value":3}"#);
    }

    #[test]
    fn helpers_write_the_expected_keys() {
        let mut prefs = MemoryPreferences::new();
        set_widget_refresh_rate(&mut prefs, WidgetId(5), 120).unwrap();
        mark_list_opened(&mut prefs).unwrap();

        assert_eq!(prefs.get("widget.5.rf_rate").unwrap(), Some(PrefValue::Int(120)));
        assert_eq!(prefs.get(keys::LIST_WAS_OPENED).unwrap(), Some(PrefValue::Int(1)));
        assert_eq!(
            prefs.get_or("missing", PrefValue::Int(0)).unwrap(),
            PrefValue::Int(0)
        );
    }
}
