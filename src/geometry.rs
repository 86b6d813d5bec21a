/// Integer size measured in terminal character cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Size {
    pub width: u16,
    pub height: u16,
}

impl Size {
    pub const fn new(width: u16, height: u16) -> Self {
        Self { width, height }
    }
}

/// Rectangle area anchored within the terminal grid.
///
/// Stored as origin plus extent so zero-area regions stay representable; the
/// inclusive far corner is available through [`Rect::x1`] and [`Rect::y1`] for
/// non-empty rectangles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Rect {
    pub x: u16,
    pub y: u16,
    pub width: u16,
    pub height: u16,
}

impl Rect {
    pub const fn new(x: u16, y: u16, width: u16, height: u16) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Build a rectangle from inclusive corner coordinates. Inverted corners
    /// collapse to a zero-area rectangle at `(x0, y0)`.
    pub fn from_corners(x0: u16, y0: u16, x1: u16, y1: u16) -> Self {
        let width = if x1 >= x0 { x1 - x0 + 1 } else { 0 };
        let height = if y1 >= y0 { y1 - y0 + 1 } else { 0 };
        Self::new(x0, y0, width, height)
    }

    pub fn bottom(&self) -> u16 {
        self.y.saturating_add(self.height)
    }

    pub fn right(&self) -> u16 {
        self.x.saturating_add(self.width)
    }

    /// Inclusive right column. Only meaningful when `width > 0`.
    pub fn x1(&self) -> u16 {
        self.right().saturating_sub(1)
    }

    /// Inclusive bottom row. Only meaningful when `height > 0`.
    pub fn y1(&self) -> u16 {
        self.bottom().saturating_sub(1)
    }

    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    pub fn area(&self) -> u32 {
        self.width as u32 * self.height as u32
    }

    /// Shrink by one cell on every side, the space left inside a box frame.
    pub fn inner(&self) -> Rect {
        Rect::new(
            self.x.saturating_add(1),
            self.y.saturating_add(1),
            self.width.saturating_sub(2),
            self.height.saturating_sub(2),
        )
    }

    pub fn contains(&self, col: u16, row: u16) -> bool {
        col >= self.x && col < self.right() && row >= self.y && row < self.bottom()
    }

    pub fn overlaps(&self, other: &Rect) -> bool {
        !self.is_empty()
            && !other.is_empty()
            && self.x < other.right()
            && other.x < self.right()
            && self.y < other.bottom()
            && other.y < self.bottom()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn corners_are_inclusive() {
        let rect = Rect::from_corners(2, 3, 11, 5);
        assert_eq!(rect, Rect::new(2, 3, 10, 3));
        assert_eq!(rect.x1(), 11);
        assert_eq!(rect.y1(), 5);
    }

    #[test]
    fn inverted_corners_collapse() {
        let rect = Rect::from_corners(5, 5, 4, 4);
        assert!(rect.is_empty());
        assert_eq!(rect.area(), 0);
    }

    #[test]
    fn inner_never_underflows() {
        assert_eq!(Rect::new(0, 0, 1, 1).inner(), Rect::new(1, 1, 0, 0));
        assert_eq!(Rect::new(4, 2, 10, 6).inner(), Rect::new(5, 3, 8, 4));
    }

    #[test]
    fn adjacent_rects_do_not_overlap() {
        let left = Rect::new(0, 0, 5, 5);
        let right = Rect::new(5, 0, 5, 5);
        assert!(!left.overlaps(&right));
        assert!(left.overlaps(&Rect::new(4, 4, 2, 2)));
    }
}
