//! Preference store backed by a JSON file shared by all users.
//!
//! JSON shape:
//! {
//!   "admin": {
//!     "last_viewed_dashboard_id": { "type": "id", "value": 1 },
//!     "widget.5.rf_rate":         { "type": "int", "value": 120 }
//!   }
//! }
//!
//! Writes go straight to disk; a failed write leaves the in-memory view
//! unchanged.

use crate::error::PreferenceStoreUnavailable;
use crate::prefs::{PrefValue, PreferenceStore};

use std::collections::BTreeMap;
use std::fs;
use std::io::ErrorKind;
use std::path::PathBuf;

type Profiles = BTreeMap<String, BTreeMap<String, PrefValue>>;

#[derive(Debug, Clone)]
pub struct FilePreferences {
    path: PathBuf,
    user: String,
    profiles: Profiles,
}

impl FilePreferences {
    /// Open the store as `user`. A missing file is an empty store.
    pub fn open(path: impl Into<PathBuf>, user: &str) -> Result<Self, PreferenceStoreUnavailable> {
        let path = path.into();
        let profiles = match fs::read_to_string(&path) {
            Ok(text) if text.trim().is_empty() => Profiles::new(),
            Ok(text) => serde_json::from_str(&text).map_err(|e| {
                PreferenceStoreUnavailable::new(format!("parse {}: {}", path.display(), e))
            })?,
            Err(e) if e.kind() == ErrorKind::NotFound => Profiles::new(),
            Err(e) => {
                return Err(PreferenceStoreUnavailable::new(format!(
                    "read {}: {}",
                    path.display(),
                    e
                )));
            }
        };

        Ok(Self {
            path,
            user: user.to_string(),
            profiles,
        })
    }

    pub fn user(&self) -> &str {
        &self.user
    }

    fn write(&self, profiles: &Profiles) -> Result<(), PreferenceStoreUnavailable> {
        let json = serde_json::to_string_pretty(profiles).map_err(|e| {
            PreferenceStoreUnavailable::new(format!("encode {}: {}", self.path.display(), e))
        })?;
        fs::write(&self.path, json).map_err(|e| {
            PreferenceStoreUnavailable::new(format!("write {}: {}", self.path.display(), e))
        })
    }
}

impl PreferenceStore for FilePreferences {
    fn get(&self, key: &str) -> Result<Option<PrefValue>, PreferenceStoreUnavailable> {
        Ok(self
            .profiles
            .get(&self.user)
            .and_then(|values| values.get(key))
            .cloned())
    }

    fn set(&mut self, key: &str, value: PrefValue) -> Result<(), PreferenceStoreUnavailable> {
        let mut next = self.profiles.clone();
        next.entry(self.user.clone())
            .or_default()
            .insert(key.to_string(), value);
        self.write(&next)?;
        self.profiles = next;
        Ok(())
    }

    fn keys(&self) -> Result<Vec<String>, PreferenceStoreUnavailable> {
        Ok(self
            .profiles
            .get(&self.user)
            .map(|values| values.keys().cloned().collect())
            .unwrap_or_default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn missing_file_is_an_empty_store() {
        let dir = tempfile::tempdir().unwrap();
        let prefs = FilePreferences::open(dir.path().join("prefs.json"), "admin").unwrap();
        assert_eq!(prefs.keys().unwrap(), Vec::<String>::new());
        assert_eq!(prefs.user(), "admin");
    }

    #[test]
    fn writes_persist_per_user() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("prefs.json");

        let mut admin = FilePreferences::open(&path, "admin").unwrap();
        admin.set("widget.5.rf_rate", PrefValue::Int(120)).unwrap();

        let mut guest = FilePreferences::open(&path, "guest").unwrap();
        assert_eq!(guest.get("widget.5.rf_rate").unwrap(), None);
        guest.set("list_was_opened", PrefValue::Int(1)).unwrap();

        let reopened = FilePreferences::open(&path, "admin").unwrap();
        assert_eq!(reopened.get("widget.5.rf_rate").unwrap(), Some(PrefValue::Int(120)));
        assert_eq!(reopened.keys().unwrap(), vec!["widget.5.rf_rate".to_string()]);
    }

    #[test]
    fn malformed_file_is_unavailable() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("prefs.json");
        fs::write(&path, "{ not json").unwrap();

        let err = FilePreferences::open(&path, "admin").unwrap_err();
        assert!(err.reason.starts_with("parse "));
    }

    #[test]
    fn failed_write_keeps_previous_state() {
        let dir = tempfile::tempdir().unwrap();
        // A directory cannot be written as a file.
        let mut prefs = FilePreferences {
            path: dir.path().to_path_buf(),
            user: "admin".into(),
            profiles: Profiles::new(),
        };

        assert!(prefs.set("k", PrefValue::Int(1)).is_err());
        assert_eq!(prefs.get("k").unwrap(), None);
    }
}
