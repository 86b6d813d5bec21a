use unicode_width::UnicodeWidthStr;

const ESC: char = '\x1b';

/// Compute the display width of a string after stripping ANSI escapes.
pub fn display_width(text: &str) -> usize {
    let clean = strip_ansi_escapes::strip(text);
    let clean_str = String::from_utf8_lossy(&clean);
    UnicodeWidthStr::width(&*clean_str)
}

/// Display width of text taken literally, wide characters counting as two
/// columns. Escape sequences are not recognised here.
pub fn text_width(text: &str) -> usize {
    UnicodeWidthStr::width(text)
}

/// Left-pad `text` so it sits centered in `width` columns.
///
/// Padding is `(width - text_width) / 2`, truncated; the odd leftover column
/// stays on the right implicitly. Text wider than `width` is returned as is.
pub fn center(text: &str, width: usize) -> String {
    pad_left(text, width.saturating_sub(text_width(text)) / 2)
}

/// Like [`center`], but measures the text with style escapes removed while
/// still emitting the original styled string.
pub fn center_stripped(text: &str, width: usize) -> String {
    pad_left(text, width.saturating_sub(display_width(text)) / 2)
}

fn pad_left(text: &str, padding: usize) -> String {
    let mut out = String::with_capacity(text.len() + padding);
    out.extend(std::iter::repeat(' ').take(padding));
    out.push_str(text);
    out
}

/// Cut `text` down to at most `width` visible columns. Escape sequences are
/// copied through without counting, and a reset is appended when styled text
/// had to be cut so the style cannot leak into neighbouring cells.
///
/// The visible prefix is measured as a whole string, the same way
/// [`display_width`] measures, so `display_width` of the result never exceeds
/// `width` even for multi-codepoint sequences such as emoji with VS16.
pub fn truncate_to_width(text: &str, width: usize) -> String {
    let mut out = String::with_capacity(text.len());
    let mut visible = String::with_capacity(text.len());
    let mut styled = false;
    let mut chars = text.chars().peekable();

    while let Some(ch) = chars.next() {
        if ch == ESC {
            styled = true;
            out.push(ch);
            if chars.peek() == Some(&'[') {
                out.push('[');
                chars.next();
                for next in chars.by_ref() {
                    out.push(next);
                    if ('\x40'..='\x7e').contains(&next) {
                        break;
                    }
                }
            }
            continue;
        }

        visible.push(ch);
        if UnicodeWidthStr::width(visible.as_str()) > width {
            if styled {
                out.push_str("\x1b[0m");
            }
            return out;
        }
        out.push(ch);
    }

    out
}

/// Truncate then right-pad with spaces so the line covers exactly `width`
/// visible columns.
pub fn fit_to_width(text: &str, width: usize) -> String {
    let mut line = truncate_to_width(text, width);
    let visible = display_width(&line);
    line.extend(std::iter::repeat(' ').take(width.saturating_sub(visible)));
    line
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn center_pads_left_only() {
        assert_eq!(center("AB", 10), "    AB");
        assert_eq!(center("ABC", 10), "   ABC");
    }

    #[test]
    fn center_never_truncates() {
        assert_eq!(center("overflowing", 4), "overflowing");
    }

    #[test]
    fn center_stripped_measures_visible_text() {
        let styled = "\x1b[1mAB\x1b[0m";
        let centered = center_stripped(styled, 10);
        assert_eq!(centered, format!("    {styled}"));
    }

    #[test]
    fn wide_characters_count_double() {
        assert_eq!(text_width("🌙"), 2);
        assert_eq!(text_width("🌙x"), 3);
        assert_eq!(center("🌙", 6), "  🌙");
    }

    #[test]
    fn display_width_ignores_escapes() {
        assert_eq!(display_width("\x1b[32m███\x1b[0m"), 3);
    }

    #[test]
    fn truncate_keeps_escapes_intact() {
        let cut = truncate_to_width("\x1b[1mabcdef\x1b[0m", 3);
        assert_eq!(cut, "\x1b[1mabc\x1b[0m");
        assert_eq!(display_width(&cut), 3);
    }

    #[test]
    fn truncate_does_not_split_wide_chars() {
        assert_eq!(truncate_to_width("a🌙b", 2), "a");
    }

    #[test]
    fn presentation_sequences_never_overflow() {
        let sun = "\u{2600}\u{FE0F}";
        for width in 0..6 {
            let cut = truncate_to_width(&format!("a{sun}b"), width);
            assert!(display_width(&cut) <= width, "{cut:?} wider than {width}");
            assert_eq!(display_width(&fit_to_width(&format!("{sun}{sun}"), width)), width);
        }
    }

    #[test]
    fn fit_pads_short_lines() {
        assert_eq!(fit_to_width("hi", 5), "hi   ");
        assert_eq!(fit_to_width("hello world", 5), "hello");
    }
}
