//! Multi-timezone clock dashboard for the terminal.
//!
//! One focus clock spans the top of the screen, up to six secondary clocks
//! sit below it in rows of three, and a two-line footer carries system stats
//! or transient notifications plus key help. Pressing `1`-`6` swaps the
//! matching secondary clock into focus.
//!
//! The crate is split the usual way: pure rendering helpers (`glyph`,
//! `indicator`, `width`, `render`), the grid solver (`layout`), shared state
//! (`timezone`, `stats`), and the terminal loop (`runtime`).

pub mod config;
pub mod cursor;
pub mod error;
pub mod geometry;
pub mod glyph;
pub mod indicator;
pub mod layout;
pub mod logging;
pub mod metrics;
pub mod registry;
pub mod render;
pub mod runtime;
pub mod stats;
pub mod timezone;
pub mod width;

pub use config::{ConfigError, DashboardConfig};
pub use error::{DashboardError, Result};
pub use geometry::{Rect, Size};
pub use layout::{GridCell, GridLayout, RenderPlan};
pub use logging::{LogEvent, LogFields, LogLevel, Logger, LoggingError, LoggingResult};
pub use metrics::{MetricSnapshot, RuntimeMetrics};
pub use registry::{PaneContent, PaneId, PaneLayout, PaneRegistry};
pub use render::{AnsiRenderer, RendererSettings};
pub use runtime::driver::cli::{CliDriver, CliDriverError, DriverResult};
pub use runtime::{Dashboard, DashboardRuntime, KeyAction, RuntimeConfig, RuntimeEvent, key_action};
pub use stats::{StatsMailbox, StatsPoller, StatsSampler, StatsSnapshot, SysinfoSampler};
pub use timezone::{OrderingStore, ResolvedSlot, SwapOutcome, TimezoneSlot};
pub use width::display_width;
