//! Terminal display width helpers.
//!
//! Width measurement, centering, and escape-aware truncation for text that is
//! about to be placed into a fixed character grid.

mod utils;

pub use utils::{
    center, center_stripped, display_width, fit_to_width, text_width, truncate_to_width,
};
