//! Dashboard widget composition.
//!
//! Resolves which dashboard a user should see and turns its stored widget
//! rows into render-ready grid widgets.

pub mod compose;
pub mod config;
pub mod error;
pub mod logging;
pub mod prefs;
pub mod registry;
pub mod render;
pub mod resolve;
pub mod source;
pub mod view;

pub type Result<T> = anyhow::Result<T>;
