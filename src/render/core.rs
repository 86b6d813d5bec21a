use std::io::Write;

use crate::cursor;
use crate::error::Result;
use crate::geometry::Rect;
use crate::registry::{PaneId, PaneState};
use crate::width::{display_width, fit_to_width, truncate_to_width};

/// Box-drawing set used for pane frames.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BorderSet {
    pub horizontal: char,
    pub vertical: char,
    pub top_left: char,
    pub top_right: char,
    pub bottom_left: char,
    pub bottom_right: char,
}

impl BorderSet {
    pub const LIGHT: BorderSet = BorderSet {
        horizontal: '─',
        vertical: '│',
        top_left: '┌',
        top_right: '┐',
        bottom_left: '└',
        bottom_right: '┘',
    };

    pub const ASCII: BorderSet = BorderSet {
        horizontal: '-',
        vertical: '|',
        top_left: '+',
        top_right: '+',
        bottom_left: '+',
        bottom_right: '+',
    };
}

/// Renderer runtime parameters.
#[derive(Debug, Clone)]
pub struct RendererSettings {
    pub border: BorderSet,
}

impl Default for RendererSettings {
    fn default() -> Self {
        Self {
            border: BorderSet::LIGHT,
        }
    }
}

/// ANSI escape code renderer writing panes directly to a terminal handle.
///
/// Every row of a pane is positioned explicitly and overwritten edge to edge,
/// so shorter content never leaves residue from the previous frame.
pub struct AnsiRenderer {
    settings: RendererSettings,
}

impl AnsiRenderer {
    pub fn new(settings: RendererSettings) -> Self {
        Self { settings }
    }

    pub fn with_default() -> Self {
        Self::new(RendererSettings::default())
    }

    pub fn settings(&self) -> &RendererSettings {
        &self.settings
    }

    /// Wipe the screen, used before the first frame and after resizes.
    pub fn clear(&mut self, writer: &mut impl Write) -> Result<()> {
        write!(writer, "{}", cursor::clear_screen())?;
        writer.flush()?;
        Ok(())
    }

    pub fn render(
        &mut self,
        writer: &mut impl Write,
        vacated: &[Rect],
        dirty: &[(PaneId, PaneState)],
    ) -> Result<()> {
        for rect in vacated {
            blank(writer, *rect)?;
        }

        for (_id, state) in dirty {
            self.render_pane(writer, state)?;
        }

        writer.flush()?;
        Ok(())
    }

    fn render_pane(&self, writer: &mut impl Write, state: &PaneState) -> Result<()> {
        let rect = state.layout.rect;
        if rect.is_empty() {
            return Ok(());
        }

        if state.layout.framed {
            if rect.width < 2 || rect.height < 2 {
                return blank(writer, rect);
            }
            self.render_frame(writer, rect, state.content.title.as_deref())?;
        }

        let area = state.layout.content_rect();
        let width = area.width as usize;
        for row in 0..area.height {
            let line = state
                .content
                .lines
                .get(row as usize)
                .map(String::as_str)
                .unwrap_or("");
            write!(
                writer,
                "{}{}{}",
                cursor::cell(area.x, area.y + row),
                fit_to_width(line, width),
                cursor::reset_style()
            )?;
        }

        Ok(())
    }

    fn render_frame(&self, writer: &mut impl Write, rect: Rect, title: Option<&str>) -> Result<()> {
        let border = self.settings.border;
        let span = rect.width as usize - 2;

        let title = truncate_to_width(title.unwrap_or(""), span);
        let fill = span.saturating_sub(display_width(&title));
        let mut top = String::with_capacity(rect.width as usize * 3 + title.len());
        top.push(border.top_left);
        top.push_str(&title);
        top.extend(std::iter::repeat(border.horizontal).take(fill));
        top.push(border.top_right);
        write!(writer, "{}{}", cursor::cell(rect.x, rect.y), top)?;

        for row in 1..rect.height - 1 {
            let y = rect.y + row;
            write!(writer, "{}{}", cursor::cell(rect.x, y), border.vertical)?;
            write!(writer, "{}{}", cursor::cell(rect.x1(), y), border.vertical)?;
        }

        let mut bottom = String::with_capacity(rect.width as usize * 3);
        bottom.push(border.bottom_left);
        bottom.extend(std::iter::repeat(border.horizontal).take(span));
        bottom.push(border.bottom_right);
        write!(writer, "{}{}", cursor::cell(rect.x, rect.y1()), bottom)?;
        Ok(())
    }
}

fn blank(writer: &mut impl Write, rect: Rect) -> Result<()> {
    if rect.is_empty() {
        return Ok(());
    }
    let spaces = " ".repeat(rect.width as usize);
    for row in 0..rect.height {
        write!(writer, "{}{}", cursor::cell(rect.x, rect.y + row), spaces)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::{PaneContent, PaneLayout, PaneRegistry};
    use std::collections::HashMap;

    fn render_one(layout: PaneLayout, content: PaneContent) -> String {
        let mut registry = PaneRegistry::new();
        let mut solved = HashMap::new();
        solved.insert("pane".to_string(), layout);
        registry.sync_layout(&solved);
        registry.apply_content("pane", content).unwrap();
        let dirty = registry.take_dirty();

        let mut output = Vec::new();
        let mut renderer = AnsiRenderer::with_default();
        renderer.render(&mut output, &[], &dirty).unwrap();
        String::from_utf8(output).unwrap()
    }

    #[test]
    fn bare_pane_writes_every_row() {
        let rendered = render_one(
            PaneLayout::bare(Rect::new(2, 3, 5, 2)),
            PaneContent::new(None, vec!["hi".into()]),
        );
        assert!(rendered.contains("\u{1b}[4;3Hhi   "));
        assert!(rendered.contains("\u{1b}[5;3H     "));
    }

    #[test]
    fn framed_pane_embeds_title_in_top_border() {
        let rendered = render_one(
            PaneLayout::framed(Rect::new(0, 0, 12, 4)),
            PaneContent::new(Some(" UTC ".into()), vec!["12:00".into()]),
        );
        assert!(rendered.contains("\u{1b}[1;1H┌ UTC ─────┐"));
        assert!(rendered.contains("\u{1b}[2;2H12:00     "));
        assert!(rendered.contains("\u{1b}[4;1H└──────────┘"));
        assert!(rendered.contains("\u{1b}[2;12H│"));
    }

    #[test]
    fn long_content_is_cut_to_the_pane() {
        let rendered = render_one(
            PaneLayout::bare(Rect::new(0, 0, 4, 1)),
            PaneContent::new(None, vec!["overflowing".into()]),
        );
        assert!(rendered.contains("\u{1b}[1;1Hover\u{1b}[0m"));
        assert!(!rendered.contains("overf"));
    }

    #[test]
    fn overlong_title_is_truncated() {
        let rendered = render_one(
            PaneLayout::framed(Rect::new(0, 0, 6, 3)),
            PaneContent::new(Some(" Philippine Time ".into()), Vec::new()),
        );
        assert!(rendered.contains("┌ Phi┐"));
    }

    #[test]
    fn emoji_title_in_narrow_frame_keeps_border_width() {
        let rendered = render_one(
            PaneLayout::framed(Rect::new(0, 0, 4, 3)),
            PaneContent::new(Some(" \u{2600}\u{FE0F} Sun ".into()), Vec::new()),
        );
        let top = rendered
            .split("\u{1b}[1;1H")
            .nth(1)
            .and_then(|rest| rest.split('\u{1b}').next())
            .unwrap();
        assert!(top.starts_with('┌') && top.ends_with('┐'));
        assert_eq!(display_width(top), 4);
    }

    #[test]
    fn ascii_border_set_frames_panes() {
        let mut registry = PaneRegistry::new();
        let mut solved = HashMap::new();
        solved.insert("pane".to_string(), PaneLayout::framed(Rect::new(0, 0, 8, 3)));
        registry.sync_layout(&solved);
        registry
            .apply_content("pane", PaneContent::new(Some(" UTC ".into()), Vec::new()))
            .unwrap();

        let mut output = Vec::new();
        let mut renderer = AnsiRenderer::new(RendererSettings {
            border: BorderSet::ASCII,
        });
        renderer.render(&mut output, &[], &registry.take_dirty()).unwrap();
        let rendered = String::from_utf8(output).unwrap();
        assert!(rendered.contains("\u{1b}[1;1H+ UTC -+"));
        assert!(rendered.contains("\u{1b}[3;1H+------+"));
        assert!(!rendered.contains('┌'));
    }

    #[test]
    fn vacated_areas_are_blanked() {
        let mut output = Vec::new();
        let mut renderer = AnsiRenderer::with_default();
        renderer
            .render(&mut output, &[Rect::new(1, 1, 3, 2)], &[])
            .unwrap();
        let rendered = String::from_utf8(output).unwrap();
        assert_eq!(rendered, "\u{1b}[2;2H   \u{1b}[3;2H   ");
    }

    #[test]
    fn tiny_framed_pane_is_blanked_not_framed() {
        let rendered = render_one(
            PaneLayout::framed(Rect::new(0, 0, 1, 3)),
            PaneContent::new(Some("x".into()), vec!["y".into()]),
        );
        assert!(!rendered.contains('┌'));
        assert!(!rendered.contains('y'));
    }
}
