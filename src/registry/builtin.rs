//! Built-in widget types.

use crate::registry::schema::{FieldSchema, ValueSlot};
use crate::registry::{WidgetTypeMeta, WidgetTypeRegistry};
use crate::source::FieldType;

const MINUTE: u32 = 60;
const QUARTER_HOUR: u32 = 15 * 60;

#[derive(Clone, Copy)]
enum Fields {
    Standard,
    Clock,
    Graph,
    PlainText,
    Map,
    HostFilter,
}

impl Fields {
    fn schema(self) -> FieldSchema {
        let schema = FieldSchema::standard();
        match self {
            Fields::Standard => schema,
            Fields::Clock => schema.with(FieldType::ITEM, ValueSlot::ItemId),
            Fields::Graph => schema
                .with(FieldType::ITEM, ValueSlot::ItemId)
                .with(FieldType::ITEM_PROTOTYPE, ValueSlot::ItemId)
                .with(FieldType::GRAPH, ValueSlot::GraphId)
                .with(FieldType::GRAPH_PROTOTYPE, ValueSlot::GraphId),
            Fields::PlainText => schema
                .with(FieldType::ITEM, ValueSlot::ItemId)
                .with(FieldType::ITEM_PROTOTYPE, ValueSlot::ItemId),
            Fields::Map => schema.with(FieldType::MAP, ValueSlot::SysmapId),
            Fields::HostFilter => schema
                .with(FieldType::GROUP, ValueSlot::GroupId)
                .with(FieldType::HOST, ValueSlot::HostId),
        }
    }
}

// (type, display name, default refresh seconds, field schema)
const BUILTIN_TYPES: &[(&str, &str, u32, Fields)] = &[
    ("actlog", "Action log", MINUTE, Fields::Standard),
    ("clock", "Clock", QUARTER_HOUR, Fields::Clock),
    ("dataover", "Data overview", MINUTE, Fields::HostFilter),
    ("discovery", "Discovery status", MINUTE, Fields::Standard),
    ("favgrph", "Favourite graphs", QUARTER_HOUR, Fields::Standard),
    ("favmaps", "Favourite maps", QUARTER_HOUR, Fields::Standard),
    ("favscr", "Favourite screens", QUARTER_HOUR, Fields::Standard),
    ("graph", "Graph", MINUTE, Fields::Graph),
    ("hoststat", "Host status", MINUTE, Fields::HostFilter),
    ("navigationtree", "Map navigation tree", QUARTER_HOUR, Fields::Map),
    ("plaintext", "Plain text", MINUTE, Fields::PlainText),
    ("problems", "Problems", MINUTE, Fields::HostFilter),
    ("stszbx", "Status of Zabbix", QUARTER_HOUR, Fields::Standard),
    ("syssum", "System status", MINUTE, Fields::HostFilter),
    ("sysmap", "Map", QUARTER_HOUR, Fields::Map),
    ("trigover", "Trigger overview", MINUTE, Fields::HostFilter),
    ("url", "URL", 0, Fields::Standard),
    ("webovr", "Web monitoring", MINUTE, Fields::HostFilter),
];

/// Dashboard events a widget type hooks into on the client.
fn triggers(widget_type: &str) -> &'static [&'static str] {
    match widget_type {
        "navigationtree" => &[
            "onEditStart",
            "beforeDashboardSave",
            "afterDashboardSave",
            "onEditStop",
            "beforeConfigLoad",
        ],
        "sysmap" => &["afterUpdateWidgetConfig"],
        _ => &[],
    }
}

pub(crate) fn register_all(registry: &mut WidgetTypeRegistry) {
    for &(widget_type, display_name, refresh, fields) in BUILTIN_TYPES {
        registry.insert(
            widget_type.into(),
            WidgetTypeMeta {
                triggers: triggers(widget_type).iter().map(|t| t.to_string()).collect(),
                ..WidgetTypeMeta::new(display_name, refresh).with_schema(fields.schema())
            },
        );
    }
}
