//! Error taxonomy.
//!
//! Widget-level errors are collected by the composer and never abort a
//! dashboard. Store and transport errors propagate to the caller untouched.

use crate::registry::ValueSlot;
use crate::source::{DashboardId, FieldType, WidgetType};

use thiserror::Error;

/// Failure to build one grid widget.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum WidgetError {
    #[error("unknown widget type '{0}'")]
    UnknownWidgetType(WidgetType),

    #[error("field '{field}' has type {field_type}, which widget type '{widget_type}' does not map")]
    UnmappedFieldType {
        widget_type: WidgetType,
        field: String,
        field_type: FieldType,
    },

    #[error("field '{field}' has no {slot} value")]
    MissingFieldValue { field: String, slot: ValueSlot },
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("preference store unavailable: {reason}")]
pub struct PreferenceStoreUnavailable {
    pub reason: String,
}

impl PreferenceStoreUnavailable {
    pub fn new(reason: impl Into<String>) -> Self {
        Self {
            reason: reason.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("data API unavailable: {reason}")]
pub struct DataApiUnavailable {
    pub reason: String,
}

impl DataApiUnavailable {
    pub fn new(reason: impl Into<String>) -> Self {
        Self {
            reason: reason.into(),
        }
    }
}

/// Request-level failure.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EngineError {
    #[error("dashboard {0} not found")]
    DashboardNotFound(DashboardId),

    #[error(transparent)]
    PreferenceStoreUnavailable(#[from] PreferenceStoreUnavailable),

    #[error(transparent)]
    DataApiUnavailable(#[from] DataApiUnavailable),
}
