use std::sync::{Arc, Mutex};

use crate::logging::Logger;
use crate::metrics::LayoutMetrics;

/// What a reflow does with the rounding remainder when every child of a
/// container carries an explicit percent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RemainderPolicy {
    /// Add the remainder to the last child so the children fill the interior.
    #[default]
    LastChild,
    /// Leave the remainder unassigned; children may under-fill the interior.
    Leave,
}

/// Configuration knobs for a [`Layout`](crate::Layout).
#[derive(Debug, Clone)]
pub struct LayoutConfig {
    /// Optional structured logger for layout and render events.
    pub logger: Option<Logger>,
    /// Metrics accumulator shared with the caller.
    pub metrics: Option<Arc<Mutex<LayoutMetrics>>>,
    /// Target prefix used on emitted log events.
    pub log_target: String,
    pub remainder_policy: RemainderPolicy,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            logger: None,
            metrics: None,
            log_target: "textpanel".to_string(),
            remainder_policy: RemainderPolicy::default(),
        }
    }
}

impl LayoutConfig {
    pub fn with_logger(mut self, logger: Logger) -> Self {
        self.logger = Some(logger);
        self
    }

    pub fn with_remainder_policy(mut self, policy: RemainderPolicy) -> Self {
        self.remainder_policy = policy;
        self
    }

    pub fn with_log_target(mut self, target: impl Into<String>) -> Self {
        self.log_target = target.into();
        self
    }

    /// Enable metrics collection if it has not already been configured.
    pub fn enable_metrics(&mut self) {
        if self.metrics.is_none() {
            self.metrics = Some(Arc::new(Mutex::new(LayoutMetrics::new())));
        }
    }

    /// Disable metrics collection.
    pub fn disable_metrics(&mut self) {
        self.metrics = None;
    }

    /// Access the shared metrics handle if metrics are enabled.
    pub fn metrics_handle(&self) -> Option<Arc<Mutex<LayoutMetrics>>> {
        self.metrics.as_ref().map(Arc::clone)
    }
}
