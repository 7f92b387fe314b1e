use crate::geometry::Size;
use unicode_width::UnicodeWidthStr;

/// Natural-size capability supplied by the host toolkit.
///
/// Layout code never inspects a rendering surface; every width and height it
/// works with comes through this trait. `W` is whatever handle the host uses
/// for its widgets.
pub trait Measure<W> {
    /// Natural size of a row label as it will be displayed.
    fn label_size(&self, text: &str) -> Size;

    /// Natural (unconstrained) size of a widget.
    fn natural_size(&self, widget: &W) -> Size;
}

/// Monospace estimate: every display column is `cell_width` units wide and
/// every line is `line_height` units tall.
///
/// Column counting goes through `unicode-width`, so CJK and other wide glyphs
/// occupy two cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CellMeasure {
    pub cell_width: u32,
    pub line_height: u32,
}

impl CellMeasure {
    pub const fn new(cell_width: u32, line_height: u32) -> Self {
        Self { cell_width, line_height }
    }

    /// Size of `text` laid out on a single line. Empty text has no extent.
    pub fn text_size(&self, text: &str) -> Size {
        if text.is_empty() {
            return Size::ZERO;
        }
        let columns = u32::try_from(text.width()).unwrap_or(u32::MAX);
        Size::new(columns.saturating_mul(self.cell_width), self.line_height)
    }
}

impl Default for CellMeasure {
    fn default() -> Self {
        Self::new(7, 16)
    }
}

/// Widgets that were measured up front.
impl Measure<Size> for CellMeasure {
    fn label_size(&self, text: &str) -> Size {
        self.text_size(text)
    }

    fn natural_size(&self, widget: &Size) -> Size {
        *widget
    }
}

/// Plain text widgets (static labels, read-only values).
impl Measure<String> for CellMeasure {
    fn label_size(&self, text: &str) -> Size {
        self.text_size(text)
    }

    fn natural_size(&self, widget: &String) -> Size {
        self.text_size(widget)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ascii_text_uses_one_cell_per_char() {
        let m = CellMeasure::new(7, 16);
        assert_eq!(m.text_size("Name:"), Size::new(35, 16));
    }

    #[test]
    fn wide_glyphs_take_two_cells() {
        let m = CellMeasure::new(10, 16);
        assert_eq!(m.text_size("日本"), Size::new(40, 16));
    }

    #[test]
    fn empty_text_is_zero_sized() {
        assert_eq!(CellMeasure::default().text_size(""), Size::ZERO);
    }

    #[test]
    fn pre_measured_widgets_pass_through() {
        let m = CellMeasure::default();
        assert_eq!(m.natural_size(&Size::new(120, 24)), Size::new(120, 24));
    }
}
