use std::io::Write;
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

use chrono::{DateTime, Utc};
use crossterm::event::{self, Event as CrosstermEvent, KeyEvent};
use crossterm::terminal;
use serde_json::json;

use crate::logging::{event_with_fields, json_kv};
use crate::{
    AnsiRenderer, DashboardError, LogLevel, Logger, PaneRegistry, Result, RuntimeMetrics, Size,
};

pub mod dashboard;
pub mod driver;
pub mod notification;

pub use dashboard::{Dashboard, Frame, KeyAction, PaneFrame, key_action};

const LOG_TARGET: &str = "clockwall::runtime";
const METRICS_TARGET: &str = "clockwall::runtime.metrics";

/// Configuration knobs for the runtime loop.
#[derive(Clone)]
pub struct RuntimeConfig {
    /// Interval between clock ticks.
    pub tick_interval: Duration,
    /// Optional structured logger used by the runtime.
    pub logger: Option<Logger>,
    /// Metrics accumulator used for periodic snapshots.
    pub metrics: Option<Arc<Mutex<RuntimeMetrics>>>,
    /// Interval between metrics snapshot emissions. Zero disables snapshots.
    pub metrics_interval: Duration,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            tick_interval: Duration::from_secs(1),
            logger: None,
            metrics: None,
            metrics_interval: Duration::from_secs(5),
        }
    }
}

impl RuntimeConfig {
    /// Enable metrics collection if it has not already been configured.
    pub fn enable_metrics(&mut self) {
        if self.metrics.is_none() {
            self.metrics = Some(Arc::new(Mutex::new(RuntimeMetrics::new())));
        }
    }

    /// Access the shared metrics handle if metrics are enabled.
    pub fn metrics_handle(&self) -> Option<Arc<Mutex<RuntimeMetrics>>> {
        self.metrics.as_ref().map(Arc::clone)
    }
}

/// Triggers the runtime reacts to. Ticks and input both end in one redraw.
#[derive(Debug, Clone)]
pub enum RuntimeEvent {
    Tick,
    Key(KeyEvent),
    Resize(Size),
}

/// Where the runtime learns the terminal size before each redraw.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SizeSource {
    Terminal,
    Fixed(Size),
}

/// Drives a [`Dashboard`]: owns the pane registry and renderer, reacts to
/// ticks, keys and resizes, and repaints whatever changed.
pub struct DashboardRuntime {
    dashboard: Dashboard,
    registry: PaneRegistry,
    renderer: AnsiRenderer,
    config: RuntimeConfig,
    size_source: SizeSource,
    should_exit: bool,
    clear_pending: bool,
    start_instant: Option<Instant>,
    last_metrics_emit: Option<Instant>,
}

impl DashboardRuntime {
    /// Runtime that re-queries the live terminal size before every redraw.
    pub fn new(dashboard: Dashboard, renderer: AnsiRenderer) -> Self {
        Self::with_size_source(dashboard, renderer, SizeSource::Terminal)
    }

    /// Runtime with a fixed size that only changes through resize events,
    /// for scripted runs without a terminal.
    pub fn headless(dashboard: Dashboard, renderer: AnsiRenderer, size: Size) -> Self {
        Self::with_size_source(dashboard, renderer, SizeSource::Fixed(size))
    }

    fn with_size_source(
        dashboard: Dashboard,
        renderer: AnsiRenderer,
        size_source: SizeSource,
    ) -> Self {
        Self {
            dashboard,
            registry: PaneRegistry::new(),
            renderer,
            config: RuntimeConfig::default(),
            size_source,
            should_exit: false,
            clear_pending: true,
            start_instant: None,
            last_metrics_emit: None,
        }
    }

    pub fn config_mut(&mut self) -> &mut RuntimeConfig {
        &mut self.config
    }

    pub fn dashboard(&self) -> &Dashboard {
        &self.dashboard
    }

    pub fn dashboard_mut(&mut self) -> &mut Dashboard {
        &mut self.dashboard
    }

    pub fn should_exit(&self) -> bool {
        self.should_exit
    }

    /// Interactive loop: poll input until the next tick is due, redraw on
    /// every tick and every handled event, stop on a quit key.
    pub fn run(&mut self, stdout: &mut impl Write) -> Result<()> {
        self.bootstrap(stdout, Utc::now())?;
        let mut last_tick = Instant::now();

        while !self.should_exit {
            let timeout = self
                .config
                .tick_interval
                .checked_sub(last_tick.elapsed())
                .unwrap_or_else(|| Duration::from_millis(0));

            if event::poll(timeout).map_err(backend)? {
                if let Some(runtime_event) = map_event(event::read().map_err(backend)?) {
                    let now = Utc::now();
                    if self.dispatch_event(runtime_event, now) {
                        self.redraw(stdout, now)?;
                    }
                }
                if self.should_exit {
                    break;
                }
            }

            if last_tick.elapsed() >= self.config.tick_interval {
                last_tick = Instant::now();
                let now = Utc::now();
                self.dispatch_event(RuntimeEvent::Tick, now);
                self.redraw(stdout, now)?;
            }

            self.maybe_emit_metrics();
        }

        self.finalize();
        Ok(())
    }

    /// Replay `events`, each stamped with the wall-clock instant it happens
    /// at, redrawing after each one exactly as the interactive loop would.
    pub fn run_scripted<I>(&mut self, stdout: &mut impl Write, events: I) -> Result<()>
    where
        I: IntoIterator<Item = (DateTime<Utc>, RuntimeEvent)>,
    {
        let mut events = events.into_iter().peekable();
        let start = events.peek().map(|(at, _)| *at).unwrap_or_else(Utc::now);
        self.bootstrap(stdout, start)?;

        for (now, event) in events {
            if self.dispatch_event(event, now) {
                self.redraw(stdout, now)?;
            }
            if self.should_exit {
                break;
            }
        }
        self.finalize();
        Ok(())
    }

    /// Apply one event. Returns whether a redraw should follow.
    pub fn dispatch_event(&mut self, event: RuntimeEvent, now: DateTime<Utc>) -> bool {
        self.record_metric(|metrics| metrics.record_event());
        let redraw = match &event {
            RuntimeEvent::Tick => true,
            RuntimeEvent::Resize(size) => {
                self.handle_resize(*size);
                true
            }
            RuntimeEvent::Key(key) => self.handle_key(key, now),
        };
        self.log_runtime_event(
            LogLevel::Debug,
            "event_dispatched",
            [
                json_kv("event", json!(describe_event(&event))),
                json_kv("redraw", json!(redraw)),
            ],
        );
        redraw
    }

    fn handle_key(&mut self, key: &KeyEvent, now: DateTime<Utc>) -> bool {
        match key_action(key) {
            KeyAction::Quit => {
                self.should_exit = true;
                self.log_runtime_event(LogLevel::Info, "exit_requested", std::iter::empty());
                false
            }
            KeyAction::Swap(index) => match self.dashboard.swap(index, now) {
                Some(outcome) => {
                    self.record_metric(|metrics| metrics.record_swap());
                    self.log_runtime_event(
                        LogLevel::Info,
                        "swap_applied",
                        [
                            json_kv("index", json!(outcome.index)),
                            json_kv("old_focus", json!(outcome.old_focus)),
                            json_kv("new_focus", json!(outcome.new_focus)),
                        ],
                    );
                    true
                }
                None => {
                    self.log_runtime_event(
                        LogLevel::Debug,
                        "swap_ignored",
                        [json_kv("index", json!(index))],
                    );
                    false
                }
            },
            KeyAction::Ignore => false,
        }
    }

    fn handle_resize(&mut self, size: Size) {
        if let SizeSource::Fixed(_) = self.size_source {
            self.size_source = SizeSource::Fixed(size);
        }
        self.clear_pending = true;
        self.log_runtime_event(
            LogLevel::Info,
            "resized",
            [
                json_kv("width", json!(size.width)),
                json_kv("height", json!(size.height)),
            ],
        );
    }

    fn current_size(&self) -> Result<Size> {
        match self.size_source {
            SizeSource::Terminal => {
                let (width, height) = terminal::size().map_err(backend)?;
                Ok(Size::new(width, height))
            }
            SizeSource::Fixed(size) => Ok(size),
        }
    }

    /// Re-query the size, re-solve the layout, and paint dirty panes.
    pub fn redraw(&mut self, stdout: &mut impl Write, now: DateTime<Utc>) -> Result<()> {
        let size = self.current_size()?;
        let frame = self.dashboard.compose(size, now);

        if self.clear_pending {
            self.clear_pending = false;
            self.renderer.clear(stdout)?;
            self.registry.invalidate_all();
        }

        self.registry.sync_layout(&frame.layouts());
        for pane in frame.panes {
            self.registry.apply_content(&pane.id, pane.content)?;
        }

        let vacated = self.registry.take_vacated();
        let dirty = self.registry.take_dirty();
        if dirty.is_empty() && vacated.is_empty() {
            return Ok(());
        }

        self.renderer.render(stdout, &vacated, &dirty)?;
        self.record_metric(|metrics| metrics.record_render(dirty.len()));
        self.log_runtime_event(
            LogLevel::Debug,
            "render_completed",
            [json_kv("dirty_panes", json!(dirty.len()))],
        );
        Ok(())
    }

    fn bootstrap(&mut self, stdout: &mut impl Write, now: DateTime<Utc>) -> Result<()> {
        self.should_exit = false;
        self.clear_pending = true;
        self.ensure_metrics_initialized();
        let started = Instant::now();
        self.start_instant = Some(started);
        self.last_metrics_emit = Some(started);

        let slots = self.dashboard.ordering().snapshot();
        for slot in slots.iter().filter(|slot| !slot.is_renderable()) {
            self.log_runtime_event(
                LogLevel::Warn,
                "slot_unresolved",
                [
                    json_kv("name", json!(slot.slot.name)),
                    json_kv("location", json!(slot.slot.location)),
                ],
            );
        }
        self.log_runtime_event(
            LogLevel::Info,
            "runtime_started",
            [json_kv("slots", json!(slots.len()))],
        );

        self.redraw(stdout, now)
    }

    fn finalize(&mut self) {
        let uptime_ms = self
            .start_instant
            .map(|start| start.elapsed().as_millis())
            .unwrap_or(0);
        self.log_runtime_event(
            LogLevel::Info,
            "runtime_stopped",
            [json_kv("uptime_ms", json!(uptime_ms as u64))],
        );
    }

    fn ensure_metrics_initialized(&mut self) {
        if self.config.metrics.is_none() && self.config.metrics_interval > Duration::from_millis(0)
        {
            self.config.metrics = Some(Arc::new(Mutex::new(RuntimeMetrics::new())));
        }
    }

    fn log_runtime_event<I>(&self, level: LogLevel, message: &str, fields: I)
    where
        I: IntoIterator<Item = (String, serde_json::Value)>,
    {
        if let Some(logger) = self.config.logger.as_ref() {
            let event = event_with_fields(level, LOG_TARGET, message, fields);
            let _ = logger.log_event(event);
        }
    }

    fn record_metric(&self, record: impl FnOnce(&mut RuntimeMetrics)) {
        if let Some(metrics) = self.config.metrics.as_ref() {
            if let Ok(mut guard) = metrics.lock() {
                record(&mut guard);
            }
        }
    }

    fn maybe_emit_metrics(&mut self) {
        if self.config.metrics.is_none() {
            return;
        }

        if self.config.metrics_interval == Duration::from_millis(0) {
            return;
        }

        let now = Instant::now();
        match self.last_metrics_emit {
            Some(last) if now.duration_since(last) < self.config.metrics_interval => {
                return;
            }
            _ => {
                self.last_metrics_emit = Some(now);
            }
        }

        let uptime = self
            .start_instant
            .map(|start| now.duration_since(start))
            .unwrap_or_default();

        if let (Some(logger), Some(metrics)) =
            (self.config.logger.as_ref(), self.config.metrics.as_ref())
        {
            if let Ok(guard) = metrics.lock() {
                let snapshot_event = guard.snapshot(uptime).to_log_event(METRICS_TARGET);
                let _ = logger.log_event(snapshot_event);
            }
        }
    }
}

fn backend(err: std::io::Error) -> DashboardError {
    DashboardError::Backend(err.to_string())
}

fn map_event(event: CrosstermEvent) -> Option<RuntimeEvent> {
    match event {
        CrosstermEvent::Key(key) => Some(RuntimeEvent::Key(key)),
        CrosstermEvent::Resize(width, height) => {
            Some(RuntimeEvent::Resize(Size::new(width, height)))
        }
        _ => None,
    }
}

fn describe_event(event: &RuntimeEvent) -> &'static str {
    match event {
        RuntimeEvent::Tick => "tick",
        RuntimeEvent::Key(_) => "key",
        RuntimeEvent::Resize(_) => "resize",
    }
}
