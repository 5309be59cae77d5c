//! Error module orchestrator.
//!
//! Every fallible operation in the crate reports a [`PanelError`].

mod types;

pub use types::{PanelError, Result};
