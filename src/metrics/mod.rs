use crate::logging::{LogEvent, LogFields, LogLevel};
use serde_json::json;
use std::time::Duration;

#[derive(Debug, Default, Clone)]
pub struct RuntimeMetrics {
    events: u64,
    renders: u64,
    dirty_panes: u64,
    swaps: u64,
}

impl RuntimeMetrics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record_event(&mut self) {
        self.events = self.events.saturating_add(1);
    }

    pub fn record_render(&mut self, dirty_count: usize) {
        self.renders = self.renders.saturating_add(1);
        self.dirty_panes = self.dirty_panes.saturating_add(dirty_count as u64);
    }

    pub fn record_swap(&mut self) {
        self.swaps = self.swaps.saturating_add(1);
    }

    pub fn snapshot(&self, uptime: Duration) -> MetricSnapshot {
        MetricSnapshot {
            uptime_ms: uptime.as_millis() as u64,
            events: self.events,
            renders: self.renders,
            dirty_panes: self.dirty_panes,
            swaps: self.swaps,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MetricSnapshot {
    pub uptime_ms: u64,
    pub events: u64,
    pub renders: u64,
    pub dirty_panes: u64,
    pub swaps: u64,
}

impl MetricSnapshot {
    pub fn to_log_event(&self, target: &str) -> LogEvent {
        LogEvent::with_fields(
            LogLevel::Info,
            target.to_string(),
            "runtime_metrics".to_string(),
            self.as_fields(),
        )
    }

    pub fn as_fields(&self) -> LogFields {
        let mut map = LogFields::new();
        map.insert("uptime_ms".to_string(), json!(self.uptime_ms));
        map.insert("events".to_string(), json!(self.events));
        map.insert("renders".to_string(), json!(self.renders));
        map.insert("dirty_panes".to_string(), json!(self.dirty_panes));
        map.insert("swaps".to_string(), json!(self.swaps));
        map
    }
}
