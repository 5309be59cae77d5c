//! Frame/wrap engine.
//!
//! Pure functions that fit arbitrary text into a fixed character budget and
//! draw optional ASCII borders and padding around it. [`clean`] and
//! [`bookify`] tidy prose before it is framed.

mod core;
pub mod text;
pub mod wrap;

pub(crate) use self::core::fit;
pub use self::core::{Frame, frame, line_height, longest_line_width};
pub use text::{PAGE_BREAK, bookify, clean};
pub use wrap::{wrap, wrap_lines};
