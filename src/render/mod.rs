//! Rendering: clock-face composition, per-cell layout, footer text, and the
//! ANSI pane renderer that writes it all to the terminal.

pub mod art;
pub mod cell;
mod core;
pub mod footer;

pub use art::compose_time_art;
pub use cell::{ART_MIN_HEIGHT, CellContent, CellMode, cell_mode, cell_title, render_cell};
pub use core::{AnsiRenderer, BorderSet, RendererSettings};
pub use footer::{HELP_TEXT, footer_lines};
