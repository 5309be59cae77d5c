//! Placeholder substitution for leaf content.
//!
//! Content strings may embed `{{name}}`, `{{name.field}}`, `{{name[0]}}` or
//! `{{name['key']}}` placeholders. They are resolved against an explicit
//! [`Variables`] registry handed to the render call.

mod core;

pub use self::core::{Variables, substitute};
