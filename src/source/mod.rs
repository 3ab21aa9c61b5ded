//! Source layer: dashboard records as delivered by the data API, plus the
//! API seam itself.

pub mod api;
pub mod dashboard;
pub mod ids;

pub use api::{DataApi, JsonDataSource};
pub use dashboard::{Dashboard, FieldType, RawField, RawWidget};
pub use ids::{DashboardId, ObjectId, WidgetId, WidgetType};
