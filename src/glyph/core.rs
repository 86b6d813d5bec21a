/// Rows per glyph.
pub const GLYPH_HEIGHT: usize = 5;

/// Columns per glyph row.
pub const GLYPH_WIDTH: usize = 5;

/// One fixed-size block-character bitmap.
pub type Glyph = [&'static str; GLYPH_HEIGHT];

static DIGIT_0: Glyph = ["█████", "█   █", "█   █", "█   █", "█████"];
static DIGIT_1: Glyph = ["  █  ", " ██  ", "  █  ", "  █  ", "█████"];
static DIGIT_2: Glyph = ["█████", "    █", "█████", "█    ", "█████"];
static DIGIT_3: Glyph = ["█████", "    █", "█████", "    █", "█████"];
static DIGIT_4: Glyph = ["█   █", "█   █", "█████", "    █", "    █"];
static DIGIT_5: Glyph = ["█████", "█    ", "█████", "    █", "█████"];
static DIGIT_6: Glyph = ["█████", "█    ", "█████", "█   █", "█████"];
static DIGIT_7: Glyph = ["█████", "    █", "    █", "    █", "    █"];
static DIGIT_8: Glyph = ["█████", "█   █", "█████", "█   █", "█████"];
static DIGIT_9: Glyph = ["█████", "█   █", "█████", "    █", "█████"];
static COLON: Glyph = ["     ", "  █  ", "     ", "  █  ", "     "];
static SPACE: Glyph = ["     ", "     ", "     ", "     ", "     "];
static LETTER_A: Glyph = ["     ", " ██  ", "█  █ ", "████ ", "█  █ "];
static LETTER_M: Glyph = ["     ", "█ █ █", "█████", "█ █ █", "█   █"];
static LETTER_P: Glyph = ["     ", "████ ", "█  █ ", "████ ", "█    "];

/// Look up the bitmap for `ch`. Anything outside the clock character set
/// returns `None`.
pub fn glyph_rows(ch: char) -> Option<&'static Glyph> {
    let glyph = match ch {
        '0' => &DIGIT_0,
        '1' => &DIGIT_1,
        '2' => &DIGIT_2,
        '3' => &DIGIT_3,
        '4' => &DIGIT_4,
        '5' => &DIGIT_5,
        '6' => &DIGIT_6,
        '7' => &DIGIT_7,
        '8' => &DIGIT_8,
        '9' => &DIGIT_9,
        ':' => &COLON,
        ' ' => &SPACE,
        'A' => &LETTER_A,
        'M' => &LETTER_M,
        'P' => &LETTER_P,
        _ => return None,
    };
    Some(glyph)
}

pub fn is_supported(ch: char) -> bool {
    glyph_rows(ch).is_some()
}
