//! Dashboard records as the data API returns them.
//!
//! JSON shape:
//! {
//!   "dashboardid": "1",
//!   "name": "Global view",
//!   "widgets": [
//!     {
//!       "widgetid": "5",
//!       "type": "clock",
//!       "name": "",                 // empty => type display name
//!       "row": "0", "col": "0",     // geometry, quoted or not
//!       "height": "2", "width": "4",
//!       "fields": [
//!         { "type": "0", "name": "time_type", "value_int": "1" }
//!       ]
//!     }
//!   ]
//! }
//!
//! Nothing here is validated against the widget type registry; unknown
//! widget types and field types are carried through and reported per widget
//! during composition.

use crate::source::ids::{DashboardId, ObjectId, WidgetId, WidgetType, lenient_i64, lenient_opt_i64};

use serde::{Deserialize, Deserializer};
use std::fmt;

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Dashboard {
    #[serde(rename = "dashboardid")]
    pub id: DashboardId,

    #[serde(default)]
    pub name: String,

    /// Unordered on the wire.
    #[serde(default)]
    pub widgets: Vec<RawWidget>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct RawWidget {
    #[serde(rename = "widgetid")]
    pub id: WidgetId,

    #[serde(rename = "type")]
    pub widget_type: WidgetType,

    #[serde(default)]
    pub name: String,

    #[serde(default, deserialize_with = "lenient_i64")]
    pub row: i64,

    #[serde(default, deserialize_with = "lenient_i64")]
    pub col: i64,

    #[serde(default, deserialize_with = "lenient_i64")]
    pub height: i64,

    #[serde(default, deserialize_with = "lenient_i64")]
    pub width: i64,

    /// Declaration order matters: later fields win on duplicate names.
    #[serde(default)]
    pub fields: Vec<RawField>,
}

/// A tagged widget field. Exactly one `value_*` slot is expected to be set,
/// the one the widget type's schema selects for `field_type`.
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
pub struct RawField {
    #[serde(rename = "type")]
    pub field_type: FieldType,

    pub name: String,

    #[serde(default, deserialize_with = "lenient_opt_i64")]
    pub value_int: Option<i64>,

    #[serde(default)]
    pub value_str: Option<String>,

    #[serde(default)]
    pub value_groupid: Option<ObjectId>,

    #[serde(default)]
    pub value_hostid: Option<ObjectId>,

    #[serde(default)]
    pub value_itemid: Option<ObjectId>,

    #[serde(default)]
    pub value_graphid: Option<ObjectId>,

    #[serde(default)]
    pub value_sysmapid: Option<ObjectId>,
}

impl RawField {
    pub fn with_int(name: &str, value: i64) -> Self {
        Self {
            field_type: FieldType::INT32,
            name: name.to_string(),
            value_int: Some(value),
            ..Self::default()
        }
    }

    pub fn with_str(name: &str, value: &str) -> Self {
        Self {
            field_type: FieldType::STR,
            name: name.to_string(),
            value_str: Some(value.to_string()),
            ..Self::default()
        }
    }
}

/// Numeric field type discriminator (`type` on the wire).
///
/// Values outside the known set are kept so the registry can report them as
/// unmapped instead of failing the whole dashboard at parse time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct FieldType(pub i32);

impl FieldType {
    pub const INT32: FieldType = FieldType(0);
    pub const STR: FieldType = FieldType(1);
    pub const GROUP: FieldType = FieldType(2);
    pub const HOST: FieldType = FieldType(3);
    pub const ITEM: FieldType = FieldType(4);
    pub const ITEM_PROTOTYPE: FieldType = FieldType(5);
    pub const GRAPH: FieldType = FieldType(6);
    pub const GRAPH_PROTOTYPE: FieldType = FieldType(7);
    pub const MAP: FieldType = FieldType(8);

    pub fn name(self) -> Option<&'static str> {
        let name = match self {
            FieldType::INT32 => "int32",
            FieldType::STR => "string",
            FieldType::GROUP => "host group",
            FieldType::HOST => "host",
            FieldType::ITEM => "item",
            FieldType::ITEM_PROTOTYPE => "item prototype",
            FieldType::GRAPH => "graph",
            FieldType::GRAPH_PROTOTYPE => "graph prototype",
            FieldType::MAP => "map",
            _ => return None,
        };
        Some(name)
    }
}

impl fmt::Display for FieldType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.name() {
            Some(name) => write!(f, "{} ({})", self.0, name),
            None => write!(f, "{}", self.0),
        }
    }
}

impl<'de> Deserialize<'de> for FieldType {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = lenient_i64(deserializer)?;
        i32::try_from(raw)
            .map(FieldType)
            .map_err(|_| serde::de::Error::custom(format!("field type out of range: {}", raw)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn parses_api_shaped_dashboard() {
        let text = r#"{
            "dashboardid": "1",
            "name": "Global view",
            "widgets": [{
                "widgetid": "5",
                "type": "clock",
                "name": "",
                "row": "0", "col": "0", "height": "2", "width": "4",
                "fields": [{ "type": "0", "name": "time_type", "value_int": "1" }]
            }]
        }"#;
        let dashboard: Dashboard = serde_json::from_str(text).unwrap();

        assert_eq!(dashboard.id, DashboardId(1));
        assert_eq!(dashboard.widgets.len(), 1);
        let widget = &dashboard.widgets[0];
        assert_eq!(widget.id, WidgetId(5));
        assert_eq!(widget.widget_type.as_str(), "clock");
        assert_eq!((widget.height, widget.width), (2, 4));
        assert_eq!(widget.fields, vec![RawField::with_int("time_type", 1)]);
    }

    #[test]
    fn unknown_field_types_survive_parsing() {
        let field: RawField =
            serde_json::from_str(r#"{ "type": 42, "name": "x", "value_str": "y" }"#).unwrap();
        assert_eq!(field.field_type, FieldType(42));
        assert_eq!(field.field_type.to_string(), "42");
    }

    #[test]
    fn missing_geometry_defaults_to_zero() {
        let widget: RawWidget =
            serde_json::from_str(r#"{ "widgetid": 9, "type": "url" }"#).unwrap();
        assert_eq!((widget.row, widget.col, widget.height, widget.width), (0, 0, 0, 0));
        assert!(widget.fields.is_empty());
        assert!(widget.name.is_empty());
    }
}
