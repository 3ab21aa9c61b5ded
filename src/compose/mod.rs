//! Composition model: combine a dashboard's raw widgets with the widget type
//! registry and the user's preferences into grid widgets.

pub mod fields;

pub use fields::{FieldMap, Scalar, TYPE_KEY, normalize};

use crate::error::{PreferenceStoreUnavailable, WidgetError};
use crate::prefs::{PreferenceStore, keys};
use crate::registry::WidgetTypeRegistry;
use crate::source::{RawWidget, WidgetId, WidgetType};

use serde::Serialize;
use std::collections::BTreeMap;
use tracing::{debug, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Position {
    pub row: u32,
    pub col: u32,
    pub height: u32,
    pub width: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GridWidget {
    #[serde(rename = "widgetid")]
    pub id: WidgetId,

    #[serde(rename = "type")]
    pub widget_type: WidgetType,

    /// Widget name, or the type's display name when the name is empty.
    pub header: String,

    /// Client-side dashboard events this widget type listens to.
    pub triggers: Vec<String>,

    #[serde(rename = "pos")]
    pub position: Position,

    #[serde(rename = "rf_rate")]
    pub refresh_seconds: u32,

    /// Normalized fields plus the reserved `"type"` entry.
    pub fields: FieldMap,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SkippedWidget {
    #[serde(rename = "widgetid")]
    pub id: WidgetId,
    pub error: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Composition {
    pub widgets: BTreeMap<WidgetId, GridWidget>,
    /// Widgets left out of `widgets`, in input order.
    pub skipped: Vec<(WidgetId, WidgetError)>,
}

pub struct WidgetComposer<'a> {
    registry: &'a WidgetTypeRegistry,
}

impl<'a> WidgetComposer<'a> {
    pub fn new(registry: &'a WidgetTypeRegistry) -> Self {
        Self { registry }
    }

    /// Build grid widgets for every widget that resolves.
    ///
    /// Per-widget failures are logged and collected in `skipped`; only an
    /// unavailable preference store aborts composition.
    pub fn compose<P: PreferenceStore + ?Sized>(
        &self,
        widgets: &[RawWidget],
        prefs: &P,
    ) -> Result<Composition, PreferenceStoreUnavailable> {
        let mut out = Composition::default();

        for widget in widgets {
            match self.compose_one(widget, prefs)? {
                // A repeated id replaces whatever the earlier widget produced,
                // whether that was a grid widget or a skip.
                Ok(grid) => {
                    let before = out.skipped.len();
                    out.skipped.retain(|(id, _)| *id != grid.id);
                    if out.widgets.insert(grid.id, grid).is_some() || out.skipped.len() != before {
                        warn!(widget = %widget.id, "duplicate widget id, keeping the later one");
                    }
                }
                Err(error) => {
                    if out.widgets.remove(&widget.id).is_some() {
                        warn!(widget = %widget.id, "duplicate widget id, dropping the earlier one");
                    }
                    out.skipped.retain(|(id, _)| *id != widget.id);
                    warn!(widget = %widget.id, %error, "skipping widget");
                    out.skipped.push((widget.id, error));
                }
            }
        }

        Ok(out)
    }

    fn compose_one<P: PreferenceStore + ?Sized>(
        &self,
        widget: &RawWidget,
        prefs: &P,
    ) -> Result<Result<GridWidget, WidgetError>, PreferenceStoreUnavailable> {
        let meta = match self.registry.lookup(&widget.widget_type) {
            Ok(meta) => meta,
            Err(e) => return Ok(Err(e)),
        };

        let header = if widget.name.is_empty() {
            meta.display_name.clone()
        } else {
            widget.name.clone()
        };

        let refresh_seconds = refresh_override(widget.id, prefs)?
            .unwrap_or(meta.default_refresh_seconds);

        let mut fields = match normalize(self.registry, &widget.fields, &widget.widget_type) {
            Ok(fields) => fields,
            Err(e) => return Ok(Err(e)),
        };
        fields.insert(
            TYPE_KEY.to_string(),
            Scalar::Str(widget.widget_type.as_str().to_string()),
        );

        debug!(widget = %widget.id, %header, refresh_seconds, "composed widget");

        Ok(Ok(GridWidget {
            id: widget.id,
            widget_type: widget.widget_type.clone(),
            header,
            triggers: meta.triggers.clone(),
            position: Position {
                row: coord(widget.row),
                col: coord(widget.col),
                height: coord(widget.height),
                width: coord(widget.width),
            },
            refresh_seconds,
            fields,
        }))
    }
}

/// Stored refresh interval for one widget instance, if any.
fn refresh_override<P: PreferenceStore + ?Sized>(
    widget: WidgetId,
    prefs: &P,
) -> Result<Option<u32>, PreferenceStoreUnavailable> {
    let key = keys::widget_refresh_rate(widget);
    let Some(value) = prefs.get(&key)? else {
        return Ok(None);
    };

    match value.as_int() {
        Some(seconds) => Ok(Some(coord(seconds))),
        None => {
            warn!(%key, ?value, "ignoring non-integer refresh override");
            Ok(None)
        }
    }
}

/// Clamp into the non-negative `u32` range.
fn coord(value: i64) -> u32 {
    u32::try_from(value.max(0)).unwrap_or(u32::MAX)
}
