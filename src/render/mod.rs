//! Output rendering for the presentation layer.

pub mod json;

pub use json::render_json_view;
