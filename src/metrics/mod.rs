use crate::logging::{LogEvent, LogFields, LogLevel};
use serde_json::json;

/// Counters describing how much work the layout engine has done.
#[derive(Debug, Default, Clone)]
pub struct LayoutMetrics {
    subdivisions: u64,
    reflows: u64,
    sealed_containers: u64,
    renders: u64,
    cache_hits: u64,
}

impl LayoutMetrics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record_subdivision(&mut self) {
        self.subdivisions = self.subdivisions.saturating_add(1);
    }

    pub fn record_reflow(&mut self, sealed: usize) {
        self.reflows = self.reflows.saturating_add(1);
        self.sealed_containers = self.sealed_containers.saturating_add(sealed as u64);
    }

    pub fn record_render(&mut self) {
        self.renders = self.renders.saturating_add(1);
    }

    pub fn record_cache_hits(&mut self, count: usize) {
        if count > 0 {
            self.cache_hits = self.cache_hits.saturating_add(count as u64);
        }
    }

    pub fn snapshot(&self) -> MetricSnapshot {
        MetricSnapshot {
            subdivisions: self.subdivisions,
            reflows: self.reflows,
            sealed_containers: self.sealed_containers,
            renders: self.renders,
            cache_hits: self.cache_hits,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MetricSnapshot {
    pub subdivisions: u64,
    pub reflows: u64,
    pub sealed_containers: u64,
    pub renders: u64,
    pub cache_hits: u64,
}

impl MetricSnapshot {
    pub fn to_log_event(&self, target: &str) -> LogEvent {
        LogEvent::with_fields(LogLevel::Info, target, "layout_metrics", self.as_fields())
    }

    pub fn as_fields(&self) -> LogFields {
        let mut map = LogFields::new();
        map.insert("subdivisions".to_string(), json!(self.subdivisions));
        map.insert("reflows".to_string(), json!(self.reflows));
        map.insert("sealed_containers".to_string(), json!(self.sealed_containers));
        map.insert("renders".to_string(), json!(self.renders));
        map.insert("cache_hits".to_string(), json!(self.cache_hits));
        map
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn snapshot_reports_counters() {
        let mut metrics = LayoutMetrics::new();
        metrics.record_subdivision();
        metrics.record_reflow(3);
        metrics.record_render();
        metrics.record_cache_hits(0);

        let snapshot = metrics.snapshot();
        assert_eq!(snapshot.subdivisions, 1);
        assert_eq!(snapshot.sealed_containers, 3);
        assert_eq!(snapshot.cache_hits, 0);

        let event = snapshot.to_log_event("textpanel::metrics");
        assert_eq!(event.message, "layout_metrics");
        assert_eq!(event.fields["reflows"], json!(1));
    }
}
