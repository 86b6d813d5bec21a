//! Layout module orchestrator.
//!
//! The dashboard uses a single fixed-shape grid; the solver lives in `grid`.

pub mod grid;

pub use grid::{FOOTER_HEIGHT, GridCell, GridLayout, ITEMS_PER_ROW, MAX_SECONDARY, RenderPlan};
