//! Dashboard grid: one focus band across the top, secondary cells below it in
//! rows of three, and a fixed footer along the bottom.
//!
//! ```text
//! ┌──────────── focus ────────────┐
//! │                               │
//! ├───[1]───┬───[2]───┬────[3]────┤
//! │         │         │           │
//! ├───[4]───┼───[5]───┼────[6]────┤
//! │         │         │           │
//! └─────────┴─────────┴───────────┘
//!   footer (stats / notification)
//!   footer (key help)
//! ```
//!
//! Integer-division remainders are absorbed by the last column of each row and
//! by the last band, so the plan always tiles the terminal exactly: no gaps, no
//! overlap, for any size. Bands are only allocated for secondary rows that are
//! actually occupied, and a partially filled row splits its width among the
//! cells it holds.
//!
//! # Example
//! ```
//! use clockwall::layout::GridLayout;
//! use clockwall::Size;
//!
//! let plan = GridLayout::new().solve(Size::new(120, 41), 6);
//! assert_eq!(plan.focus.height, 13);
//! assert_eq!(plan.secondaries.len(), 6);
//! assert_eq!(plan.secondaries[5].rect.x1(), 119);
//! assert_eq!(plan.footer.y, 39);
//! ```

use crate::{Rect, Size};

/// Rows reserved at the bottom for the footer.
pub const FOOTER_HEIGHT: u16 = 2;

/// Secondary cells per grid row.
pub const ITEMS_PER_ROW: usize = 3;

/// Secondary cells the grid can hold (two rows of three).
pub const MAX_SECONDARY: usize = 6;

/// Placement of one secondary cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GridCell {
    /// Ordering index of the slot shown here (1-based; 0 is focus).
    pub slot: usize,
    pub row: usize,
    pub col: usize,
    pub rect: Rect,
}

/// Output of one layout pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderPlan {
    pub size: Size,
    pub focus: Rect,
    pub secondaries: Vec<GridCell>,
    pub footer: Rect,
}

impl RenderPlan {
    /// Every rectangle in the plan: focus, secondaries, footer.
    pub fn rects(&self) -> impl Iterator<Item = Rect> + '_ {
        std::iter::once(self.focus)
            .chain(self.secondaries.iter().map(|cell| cell.rect))
            .chain(std::iter::once(self.footer))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GridLayout {
    footer_height: u16,
}

impl Default for GridLayout {
    fn default() -> Self {
        Self {
            footer_height: FOOTER_HEIGHT,
        }
    }
}

impl GridLayout {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_footer_height(mut self, rows: u16) -> Self {
        self.footer_height = rows;
        self
    }

    pub fn footer_height(&self) -> u16 {
        self.footer_height
    }

    /// Solve the grid for a terminal of `size` showing `secondary_count`
    /// secondary cells (capped at [`MAX_SECONDARY`]).
    pub fn solve(&self, size: Size, secondary_count: usize) -> RenderPlan {
        let width = size.width as u32;
        let footer_height = self.footer_height.min(size.height);
        let grid_height = (size.height - footer_height) as u32;

        let count = secondary_count.min(MAX_SECONDARY);
        let rows = count.div_ceil(ITEMS_PER_ROW);
        let row_height = grid_height / (rows as u32 + 1);

        let focus_height = if rows == 0 { grid_height } else { row_height };
        let focus = rect(0, 0, width, focus_height);

        let mut secondaries = Vec::with_capacity(count);
        for idx in 0..count {
            let row = idx / ITEMS_PER_ROW;
            let col = idx % ITEMS_PER_ROW;
            let in_row = (count - row * ITEMS_PER_ROW).min(ITEMS_PER_ROW);

            let col_width = width / in_row as u32;
            let x0 = col as u32 * col_width;
            let cell_width = if col == in_row - 1 {
                width - x0
            } else {
                col_width
            };

            let y0 = (row as u32 + 1) * row_height;
            let cell_height = if row == rows - 1 {
                grid_height - y0
            } else {
                row_height
            };

            secondaries.push(GridCell {
                slot: idx + 1,
                row,
                col,
                rect: rect(x0, y0, cell_width, cell_height),
            });
        }

        RenderPlan {
            size,
            focus,
            secondaries,
            footer: rect(0, grid_height, width, footer_height as u32),
        }
    }
}

// Every input is bounded by the u16 terminal size, so the narrowing is lossless.
fn rect(x: u32, y: u32, width: u32, height: u32) -> Rect {
    Rect::new(x as u16, y as u16, width as u16, height as u16)
}
