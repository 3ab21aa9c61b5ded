use crate::error::PreferenceStoreUnavailable;
use crate::prefs::{PrefValue, PreferenceStore};

use std::collections::BTreeMap;

/// In-process preference store for one user.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MemoryPreferences {
    values: BTreeMap<String, PrefValue>,
}

impl MemoryPreferences {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, key: &str, value: PrefValue) -> Self {
        self.values.insert(key.to_string(), value);
        self
    }
}

impl PreferenceStore for MemoryPreferences {
    fn get(&self, key: &str) -> Result<Option<PrefValue>, PreferenceStoreUnavailable> {
        Ok(self.values.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: PrefValue) -> Result<(), PreferenceStoreUnavailable> {
        self.values.insert(key.to_string(), value);
        Ok(())
    }

    fn keys(&self) -> Result<Vec<String>, PreferenceStoreUnavailable> {
        Ok(self.values.keys().cloned().collect())
    }
}
