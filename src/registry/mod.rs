//! Widget type registry.
//!
//! Maps each widget type to its display name, default refresh interval,
//! field schema and client-side event triggers. Built once at startup and
//! only read afterwards, so it can be shared across threads without locking.

mod builtin;
pub mod schema;

pub use schema::{FieldSchema, ValueSlot};

use crate::error::WidgetError;
use crate::source::WidgetType;

use anyhow::{Context, bail};
use serde::Deserialize;
use std::collections::BTreeMap;
use std::fs;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WidgetTypeMeta {
    /// Header used when a widget has no name of its own. Never empty.
    pub display_name: String,
    pub default_refresh_seconds: u32,
    pub field_schema: FieldSchema,
    pub triggers: Vec<String>,
}

impl WidgetTypeMeta {
    pub fn new(display_name: &str, default_refresh_seconds: u32) -> Self {
        Self {
            display_name: display_name.to_string(),
            default_refresh_seconds,
            field_schema: FieldSchema::standard(),
            triggers: Vec::new(),
        }
    }

    pub fn with_schema(mut self, field_schema: FieldSchema) -> Self {
        self.field_schema = field_schema;
        self
    }
}

/// Per-type adjustments read from the registry override file.
///
/// JSON shape:
/// {
///   "clock": { "name": "World clock", "rf_rate": 30 },
///   "url":   { "rf_rate": 600 }
/// }
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TypeOverride {
    #[serde(default)]
    pub name: Option<String>,

    #[serde(default)]
    pub rf_rate: Option<u32>,
}

pub type RegistryOverrides = BTreeMap<WidgetType, TypeOverride>;

#[derive(Debug, Clone, Default)]
pub struct WidgetTypeRegistry {
    types: BTreeMap<WidgetType, WidgetTypeMeta>,
}

impl WidgetTypeRegistry {
    pub fn with_defaults() -> Self {
        let mut registry = Self::default();
        builtin::register_all(&mut registry);
        registry
    }

    /// Add or replace a widget type.
    pub fn register(
        &mut self,
        widget_type: impl Into<WidgetType>,
        meta: WidgetTypeMeta,
    ) -> crate::Result<()> {
        let widget_type = widget_type.into();
        if meta.display_name.trim().is_empty() {
            bail!("widget type '{}' needs a non-empty display name", widget_type);
        }
        self.insert(widget_type, meta);
        Ok(())
    }

    pub(crate) fn insert(&mut self, widget_type: WidgetType, meta: WidgetTypeMeta) {
        self.types.insert(widget_type, meta);
    }

    pub fn lookup(&self, widget_type: &WidgetType) -> Result<&WidgetTypeMeta, WidgetError> {
        self.types
            .get(widget_type)
            .ok_or_else(|| WidgetError::UnknownWidgetType(widget_type.clone()))
    }

    pub fn contains(&self, widget_type: &WidgetType) -> bool {
        self.types.contains_key(widget_type)
    }

    pub fn len(&self) -> usize {
        self.types.len()
    }

    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }

    /// Apply display name / default refresh overrides. Every overridden type
    /// must already be registered.
    pub fn apply_overrides(&mut self, overrides: &RegistryOverrides) -> crate::Result<()> {
        for (widget_type, adjust) in overrides {
            let Some(meta) = self.types.get_mut(widget_type) else {
                bail!("override for unknown widget type '{}'", widget_type);
            };
            if let Some(name) = &adjust.name {
                if name.trim().is_empty() {
                    bail!("override for widget type '{}' has an empty name", widget_type);
                }
                meta.display_name = name.clone();
            }
            if let Some(rf_rate) = adjust.rf_rate {
                meta.default_refresh_seconds = rf_rate;
            }
        }
        Ok(())
    }

    /// Built-in types with the overrides from `path` applied.
    pub fn load_with_overrides(path: &str) -> crate::Result<Self> {
        let text = fs::read_to_string(path)
            .with_context(|| format!("read registry override file {}", path))?;
        let overrides: RegistryOverrides = serde_json::from_str(&text)
            .with_context(|| format!("parse registry override file {}", path))?;

        let mut registry = Self::with_defaults();
        registry
            .apply_overrides(&overrides)
            .with_context(|| format!("apply registry override file {}", path))?;
        Ok(registry)
    }
}
