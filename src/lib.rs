//! Hierarchical text panels for fixed-width character displays.
//!
//! A [`Layout`] is a tree of rectangular panels. Leaves hold text, containers
//! split their interior among children side by side or stacked. Every
//! mutation refits the tree so children always fill their parent exactly,
//! and [`Layout::render`] turns any subtree into a bordered block of text
//! built from the [`Frame`] and [`wrap`] primitives.
//!
//! ```
//! use textpanel::{Layout, PanelSpec, Subdivision, Variables};
//!
//! let mut layout = Layout::new(PanelSpec::new("screen", 20, 5));
//! let root = layout.root();
//! layout.subdivide(root, Subdivision::horizontal(2).with_names(["left", "right"]))?;
//! layout.assign(root, "left", "hello")?;
//! layout.assign(root, "right", "{{who}}")?;
//!
//! let block = layout.render(root, &Variables::new().with("who", "world"))?;
//! assert_eq!(block.lines().count(), 5);
//! assert_eq!(layout["left"].content(), "hello");
//! # Ok::<(), textpanel::PanelError>(())
//! ```
//!
//! Indexing a layout by name (`layout["left"]`) panics when no panel has that
//! name; [`Layout::get`] is the fallible lookup and returns
//! [`PanelError::NotFound`] instead.

pub mod compose;
pub mod config;
pub mod error;
pub mod frame;
pub mod geometry;
pub mod logging;
pub mod metrics;
pub mod panel;
pub mod substitute;

pub use compose::{side_by_side, stack};
pub use config::{LayoutConfig, RemainderPolicy};
pub use error::{PanelError, Result};
pub use frame::{Frame, bookify, clean, frame, wrap, wrap_lines};
pub use geometry::{Borders, Orientation, Size};
pub use logging::{LogEvent, LogFields, LogLevel, LogSink, Logger, LoggingError, LoggingResult};
pub use metrics::{LayoutMetrics, MetricSnapshot};
pub use panel::{
    Assignment, Layout, Panel, PanelId, PanelSnapshot, PanelSpec, RenderCache, Subdivision,
};
pub use substitute::{Variables, substitute};
