//! Block-character glyph atlas used by the large clock faces.

mod core;

pub use core::{GLYPH_HEIGHT, GLYPH_WIDTH, Glyph, glyph_rows, is_supported};
