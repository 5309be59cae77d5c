//! Panel tree orchestrator.
//!
//! Downstream code imports panel types from here; the arena, reflow and
//! render internals live in private submodules.

mod core;
mod reflow;
mod render;

pub use self::core::{Assignment, Layout, Panel, PanelId, PanelSnapshot, PanelSpec, Subdivision};
pub use render::RenderCache;
