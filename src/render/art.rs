//! Clock-face text composition: time formatting and glyph stitching.

use chrono::{NaiveDateTime, Timelike};

use crate::glyph::{GLYPH_HEIGHT, glyph_rows};

const ART_FORMAT: &str = "%I:%M %p";
const ART_BLINK_FORMAT: &str = "%I %M %p";
const PLAIN_FORMAT: &str = "%I:%M:%S %p";
const LONG_DATE_FORMAT: &str = "%A, %B %-d, %Y";
const SHORT_DATE_FORMAT: &str = "%a, %b %-d";

/// Time string fed to the glyph composer. The separator colon is replaced by
/// a space on odd seconds so the clock face blinks once per second.
pub fn art_time_text(local: &NaiveDateTime) -> String {
    let format = if local.second() % 2 == 1 {
        ART_BLINK_FORMAT
    } else {
        ART_FORMAT
    };
    local.format(format).to_string()
}

/// `03:04:05 PM`, used when the cell is too short for glyphs.
pub fn plain_time_text(local: &NaiveDateTime) -> String {
    local.format(PLAIN_FORMAT).to_string()
}

/// `Monday, January 2, 2006`
pub fn long_date_text(local: &NaiveDateTime) -> String {
    local.format(LONG_DATE_FORMAT).to_string()
}

/// `Mon, Jan 2`
pub fn short_date_text(local: &NaiveDateTime) -> String {
    local.format(SHORT_DATE_FORMAT).to_string()
}

/// Stitch the glyphs for `text` into five rows, one space between glyphs.
///
/// Characters without a glyph contribute nothing, so everything after them
/// shifts left by a glyph width.
pub fn compose_time_art(text: &str) -> Vec<String> {
    let mut rows = vec![String::new(); GLYPH_HEIGHT];
    let mut first = true;

    for glyph in text.chars().filter_map(glyph_rows) {
        for (row, slice) in rows.iter_mut().zip(glyph.iter()) {
            if !first {
                row.push(' ');
            }
            row.push_str(slice);
        }
        first = false;
    }

    rows
}
