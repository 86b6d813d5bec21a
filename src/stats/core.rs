use std::io;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, PoisonError, RwLock};
use std::thread::{self, JoinHandle};
use std::time::Duration;

use serde_json::json;
use sysinfo::System;

use crate::logging::{LogLevel, Logger, event_with_fields, json_kv};

const CALCULATING: &str = "calculating...";
const LOG_TARGET: &str = "clockwall::stats";

/// Latest resource usage, already formatted for display.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatsSnapshot {
    pub cpu_percent: String,
    pub mem_percent: String,
}

impl StatsSnapshot {
    /// Placeholder shown until the first sample lands.
    pub fn calculating() -> Self {
        Self {
            cpu_percent: CALCULATING.to_string(),
            mem_percent: CALCULATING.to_string(),
        }
    }

    pub fn from_usage(cpu_percent: f32, used_memory: u64, total_memory: u64) -> Self {
        let mem = if total_memory == 0 {
            0.0
        } else {
            used_memory as f64 / total_memory as f64 * 100.0
        };
        Self {
            cpu_percent: format!("{:.1}%", cpu_percent.clamp(0.0, 100.0)),
            mem_percent: format!("{mem:.1}%"),
        }
    }

    pub fn status_line(&self) -> String {
        format!("CPU: {} | MEM: {}", self.cpu_percent, self.mem_percent)
    }
}

impl Default for StatsSnapshot {
    fn default() -> Self {
        Self::calculating()
    }
}

/// Single-slot mailbox: every publish replaces the whole snapshot, readers
/// always get the latest complete value.
#[derive(Debug, Default)]
pub struct StatsMailbox {
    slot: RwLock<Arc<StatsSnapshot>>,
}

impl StatsMailbox {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn publish(&self, snapshot: StatsSnapshot) {
        let next = Arc::new(snapshot);
        let mut guard = self.slot.write().unwrap_or_else(PoisonError::into_inner);
        *guard = next;
    }

    pub fn latest(&self) -> Arc<StatsSnapshot> {
        let guard = self.slot.read().unwrap_or_else(PoisonError::into_inner);
        Arc::clone(&*guard)
    }
}

/// Source of resource usage samples.
pub trait StatsSampler: Send {
    fn sample(&mut self) -> StatsSnapshot;
}

/// Samples global CPU and memory usage through `sysinfo`.
pub struct SysinfoSampler {
    system: System,
}

impl SysinfoSampler {
    pub fn new() -> Self {
        let mut system = System::new();
        system.refresh_cpu();
        Self { system }
    }
}

impl Default for SysinfoSampler {
    fn default() -> Self {
        Self::new()
    }
}

impl StatsSampler for SysinfoSampler {
    fn sample(&mut self) -> StatsSnapshot {
        self.system.refresh_cpu();
        self.system.refresh_memory();
        StatsSnapshot::from_usage(
            self.system.global_cpu_info().cpu_usage(),
            self.system.used_memory(),
            self.system.total_memory(),
        )
    }
}

/// Background thread that feeds a [`StatsMailbox`] on a fixed interval.
/// Stopping wakes the thread immediately; dropping the poller stops it.
pub struct StatsPoller {
    stop: Arc<AtomicBool>,
    handle: Option<JoinHandle<()>>,
}

impl StatsPoller {
    pub fn spawn<S>(
        mut sampler: S,
        mailbox: Arc<StatsMailbox>,
        interval: Duration,
        logger: Option<Logger>,
    ) -> io::Result<Self>
    where
        S: StatsSampler + 'static,
    {
        let stop = Arc::new(AtomicBool::new(false));
        let flag = Arc::clone(&stop);
        let handle = thread::Builder::new()
            .name("clockwall-stats".to_string())
            .spawn(move || {
                log_poller(
                    logger.as_ref(),
                    "stats_poller_started",
                    json_kv("interval_ms", json!(interval.as_millis() as u64)),
                );
                let mut samples: u64 = 0;
                while !flag.load(Ordering::Acquire) {
                    mailbox.publish(sampler.sample());
                    samples = samples.saturating_add(1);
                    thread::park_timeout(interval);
                }
                log_poller(
                    logger.as_ref(),
                    "stats_poller_stopped",
                    json_kv("samples", json!(samples)),
                );
            })?;

        Ok(Self {
            stop,
            handle: Some(handle),
        })
    }

    pub fn stop(&mut self) {
        self.stop.store(true, Ordering::Release);
        if let Some(handle) = self.handle.take() {
            handle.thread().unpark();
            let _ = handle.join();
        }
    }

    pub fn is_running(&self) -> bool {
        self.handle.is_some()
    }
}

impl Drop for StatsPoller {
    fn drop(&mut self) {
        self.stop();
    }
}

fn log_poller(logger: Option<&Logger>, message: &str, field: (String, serde_json::Value)) {
    if let Some(logger) = logger {
        let event = event_with_fields(LogLevel::Info, LOG_TARGET, message, [field]);
        let _ = logger.log_event(event);
    }
}
