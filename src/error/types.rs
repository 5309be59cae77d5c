use thiserror::Error;

/// Unified result type for the textpanel crate.
pub type Result<T> = std::result::Result<T, PanelError>;

/// Errors surfaced by the panel tree, the frame engine's callers and the
/// placeholder substitution pass.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PanelError {
    #[error("invalid operation: {0}")]
    InvalidOperation(String),
    #[error("no panel named `{0}` was found")]
    NotFound(String),
    #[error("bad placeholder `{{{{{placeholder}}}}}`: {reason}")]
    BadPlaceholder { placeholder: String, reason: String },
}

impl PanelError {
    pub(crate) fn invalid(message: impl Into<String>) -> Self {
        Self::InvalidOperation(message.into())
    }

    pub(crate) fn bad_placeholder(placeholder: &str, reason: impl Into<String>) -> Self {
        Self::BadPlaceholder {
            placeholder: placeholder.to_string(),
            reason: reason.into(),
        }
    }
}
