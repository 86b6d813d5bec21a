//! Pane registry: last known rect and content per dashboard pane, with
//! content hashing so unchanged panes are not redrawn.

mod core;

pub use core::{PaneContent, PaneId, PaneLayout, PaneRegistry, PaneState};
