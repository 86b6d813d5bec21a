//! Terminal control sequences used by the pane renderer.
//!
//! All positions are 0-based cell coordinates; the helpers translate to the
//! 1-based form the terminal expects.

const CSI: &str = "\x1b[";

/// Move the cursor to an absolute 1-based `row` and `column`.
pub fn move_to(row: u16, column: u16) -> String {
    format!("{CSI}{row};{column}H")
}

/// Move the cursor to the 0-based cell `(x, y)`.
pub fn cell(x: u16, y: u16) -> String {
    move_to(y.saturating_add(1), x.saturating_add(1))
}

/// Reset all text attributes.
pub fn reset_style() -> &'static str {
    "\x1b[0m"
}

/// Clear the whole screen and home the cursor.
pub fn clear_screen() -> &'static str {
    "\x1b[2J\x1b[H"
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn absolute_position_is_well_formed() {
        assert_eq!(move_to(3, 5), "\x1b[3;5H");
    }

    #[test]
    fn cell_coordinates_are_zero_based() {
        assert_eq!(cell(0, 0), "\x1b[1;1H");
        assert_eq!(cell(9, 2), "\x1b[3;10H");
    }
}
