use thiserror::Error;

use crate::config::ConfigError;

/// Unified result type for the dashboard crate.
pub type Result<T> = std::result::Result<T, DashboardError>;

/// Errors surfaced by the dashboard. Everything the clock engine can recover
/// from locally (bad timezones, unsupported glyphs, degenerate geometry,
/// out-of-range swaps) never reaches this type.
#[derive(Debug, Error)]
pub enum DashboardError {
    #[error("pane `{0}` not found")]
    PaneNotFound(String),
    #[error("terminal backend error: {0}")]
    Backend(String),
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Io(#[from] std::io::Error),
}
