//! Per-cell clock rendering.
//!
//! A cell is rendered into exactly `height` lines so the surface can overwrite
//! every row of the previous frame. The mode is chosen from the cell height:
//! glyph art when there is room for it, a single plain-text time line otherwise.

use chrono::NaiveDateTime;

use crate::geometry::Size;
use crate::indicator::{business_hours, day_phase, progress_bar};
use crate::width::{center, center_stripped};

use super::art::{
    art_time_text, compose_time_art, long_date_text, plain_time_text, short_date_text,
};

/// Minimum cell height for glyph art: five glyph rows, the date, the business
/// line, and the progress bar.
pub const ART_MIN_HEIGHT: u16 = 8;

const ART_BLOCK_ROWS: usize = 7;
const PLAIN_BLOCK_ROWS: usize = 2;
const PLAIN_BAR_MIN_HEIGHT: usize = 3;
const BOLD: &str = "\x1b[1m";
const RESET: &str = "\x1b[0m";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CellMode {
    Art,
    Plain,
}

pub fn cell_mode(height: u16) -> CellMode {
    if height < ART_MIN_HEIGHT {
        CellMode::Plain
    } else {
        CellMode::Art
    }
}

/// Fully laid out cell body, one entry per row of the cell.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CellContent {
    pub mode: CellMode,
    pub lines: Vec<String>,
}

/// Render the clock for `local` into a cell of `area` size.
pub fn render_cell(area: Size, local: &NaiveDateTime) -> CellContent {
    let mode = cell_mode(area.height);
    let height = area.height as usize;
    let width = area.width as usize;
    let mut lines = vec![String::new(); height];

    if height == 0 {
        return CellContent { mode, lines };
    }

    match mode {
        CellMode::Art => {
            let mut block = Vec::with_capacity(ART_BLOCK_ROWS);
            for row in compose_time_art(&art_time_text(local)) {
                block.push(center(&row, width));
            }
            let date = format!("{BOLD}{}{RESET}", long_date_text(local));
            block.push(center_stripped(&date, width));
            let status = business_hours(local);
            block.push(center(
                &format!("{} {}", status.indicator(), status.label()),
                width,
            ));

            let top = (height - 1 - ART_BLOCK_ROWS) / 2;
            place(&mut lines, top, block);
            lines[height - 1] = progress_bar(local, width);
        }
        CellMode::Plain => {
            let block = vec![
                center(&plain_time_text(local), width),
                center(&short_date_text(local), width),
            ];
            if height >= PLAIN_BAR_MIN_HEIGHT {
                let top = (height - 1 - PLAIN_BLOCK_ROWS) / 2;
                place(&mut lines, top, block);
                lines[height - 1] = progress_bar(local, width);
            } else {
                place(&mut lines, 0, block);
            }
        }
    }

    CellContent { mode, lines }
}

fn place(lines: &mut [String], top: usize, block: Vec<String>) {
    for (slot, line) in lines.iter_mut().skip(top).zip(block) {
        *slot = line;
    }
}

/// Title embedded in the cell frame: `" UTC 🌞 🟢 "`, or `" [3] UTC 🌞 🟢 "`
/// for secondary cells that can be swapped with the given key.
pub fn cell_title(name: &str, local: &NaiveDateTime, swap_key: Option<usize>) -> String {
    let icon = day_phase(local).icon();
    let business = business_hours(local).indicator();
    match swap_key {
        Some(key) => format!(" [{key}] {name} {icon} {business} "),
        None => format!(" {name} {icon} {business} "),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::glyph::GLYPH_HEIGHT;
    use chrono::NaiveDate;

    fn monday(h: u32, m: u32, s: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 1, 1)
            .unwrap()
            .and_hms_opt(h, m, s)
            .unwrap()
    }

    #[test]
    fn mode_threshold_is_eight_rows() {
        assert_eq!(cell_mode(7), CellMode::Plain);
        assert_eq!(cell_mode(8), CellMode::Art);
        let plain = render_cell(Size::new(40, 7), &monday(10, 0, 0));
        let art = render_cell(Size::new(40, 8), &monday(10, 0, 0));
        assert_eq!(plain.mode, CellMode::Plain);
        assert_eq!(art.mode, CellMode::Art);
    }

    #[test]
    fn every_row_is_accounted_for() {
        for height in 0..20 {
            let cell = render_cell(Size::new(30, height), &monday(13, 14, 15));
            assert_eq!(cell.lines.len(), height as usize);
        }
    }

    #[test]
    fn art_mode_pins_bar_to_last_row() {
        let cell = render_cell(Size::new(60, 12), &monday(10, 0, 0));
        let last = cell.lines.last().unwrap();
        assert!(last.starts_with('['));
        assert!(last.ends_with("14h 0m left"));
        // (12 - 1 - 7) / 2 = 2 blank rows above the glyph block.
        assert!(cell.lines[0].is_empty());
        assert!(cell.lines[1].is_empty());
        assert!(cell.lines[2].contains('█'));
        assert!(cell.lines[2 + GLYPH_HEIGHT].contains("Monday, January 1, 2024"));
        assert!(cell.lines[2 + GLYPH_HEIGHT + 1].contains("Business hours"));
    }

    #[test]
    fn art_mode_at_minimum_height_has_no_gaps() {
        let cell = render_cell(Size::new(60, 8), &monday(18, 30, 0));
        assert!(cell.lines[0].contains('█'));
        assert!(cell.lines[5].contains("\x1b[1mMonday, January 1, 2024\x1b[0m"));
        assert!(cell.lines[6].contains("After hours"));
        assert!(cell.lines[7].ends_with("5h 30m left"));
    }

    #[test]
    fn plain_mode_centers_time_and_date() {
        let cell = render_cell(Size::new(31, 5), &monday(15, 4, 5));
        // (5 - 1 - 2) / 2 = 1
        assert!(cell.lines[0].is_empty());
        assert_eq!(cell.lines[1], format!("{}03:04:05 PM", " ".repeat(10)));
        assert_eq!(cell.lines[2].trim_start(), "Mon, Jan 1");
        assert!(cell.lines[4].starts_with('['));
    }

    #[test]
    fn tiny_cells_drop_the_bar() {
        let cell = render_cell(Size::new(20, 2), &monday(15, 4, 5));
        assert_eq!(cell.lines[0].trim_start(), "03:04:05 PM");
        assert_eq!(cell.lines[1].trim_start(), "Mon, Jan 1");
    }

    #[test]
    fn art_rows_blink_on_odd_seconds() {
        let even = render_cell(Size::new(60, 8), &monday(10, 0, 4));
        let odd = render_cell(Size::new(60, 8), &monday(10, 0, 5));
        // Colon glyph has ink in rows 1 and 3 only.
        assert_ne!(even.lines[1], odd.lines[1]);
        assert_eq!(even.lines[0], odd.lines[0]);
    }

    #[test]
    fn titles_carry_indicators_and_keys() {
        let noon = monday(12, 0, 0);
        assert_eq!(cell_title("UTC", &noon, None), " UTC 🌞 🟢 ");
        assert_eq!(cell_title("EST", &monday(23, 0, 0), Some(6)), " [6] EST 🌙 🔴 ");
    }
}
