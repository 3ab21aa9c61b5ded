//! Field normalization: tagged raw fields to a flat name -> value map.

use crate::error::WidgetError;
use crate::registry::WidgetTypeRegistry;
use crate::source::{ObjectId, RawField, WidgetType};

use serde::Serialize;
use std::collections::BTreeMap;

/// Key the composer reserves for the widget's own type.
pub const TYPE_KEY: &str = "type";

/// A resolved field value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum Scalar {
    Int(i64),
    Str(String),
    Id(ObjectId),
}

pub type FieldMap = BTreeMap<String, Scalar>;

/// Resolve each field through the widget type's schema.
///
/// Fields are applied in declaration order, so a repeated name keeps the
/// last value. Any field the schema cannot resolve fails the whole widget.
pub fn normalize(
    registry: &WidgetTypeRegistry,
    fields: &[RawField],
    widget_type: &WidgetType,
) -> Result<FieldMap, WidgetError> {
    let schema = &registry.lookup(widget_type)?.field_schema;

    let mut out = FieldMap::new();
    for field in fields {
        let slot = schema
            .slot_for(field.field_type)
            .ok_or_else(|| WidgetError::UnmappedFieldType {
                widget_type: widget_type.clone(),
                field: field.name.clone(),
                field_type: field.field_type,
            })?;

        let value = slot
            .select(field)
            .ok_or_else(|| WidgetError::MissingFieldValue {
                field: field.name.clone(),
                slot,
            })?;

        out.insert(field.name.clone(), value);
    }

    Ok(out)
}
