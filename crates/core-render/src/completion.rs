//! Multi-column completion candidate grid.
//!
//! Shape: every column is as wide as the widest candidate, columns are
//! separated by `COLUMN_MARGIN` spaces, and as many columns as fit in the
//! terminal width are used (at least one). Candidates fill the grid
//! column-major, so the last column may be ragged.

use crate::request::CompletionOverlay;
use crate::writer::ScreenWriter;
use core_text::str_width;

pub const COLUMN_MARGIN: usize = 2;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GridLayout {
    pub col_width: usize,
    pub cols: usize,
    pub rows: usize,
    count: usize,
}

impl GridLayout {
    /// Shape for candidates of the given display widths in `term_width` columns.
    pub fn compute(widths: &[usize], term_width: usize) -> Self {
        let col_width = widths.iter().copied().max().unwrap_or(0);
        let cols = ((term_width + COLUMN_MARGIN) / (col_width + COLUMN_MARGIN)).max(1);
        let count = widths.len();
        Self {
            col_width,
            cols,
            rows: count.div_ceil(cols),
            count,
        }
    }

    /// Candidate index at (`row`, `col`), `None` for a blank slot.
    pub fn index(&self, row: usize, col: usize) -> Option<usize> {
        let k = col * self.rows + row;
        (row < self.rows && col < self.cols && k < self.count).then_some(k)
    }
}

/// Append the grid for `overlay` below the current content.
///
/// Each row starts on a fresh line. A placed candidate is its text plus
/// padding to the column width (both in the current-completion style when it
/// is the selected one), followed by the unstyled margin. Blank slots emit
/// nothing.
pub fn write_grid(w: &mut ScreenWriter, overlay: &CompletionOverlay, current_style: &str) {
    let widths: Vec<usize> = overlay
        .candidates
        .iter()
        .map(|c| str_width(&c.text))
        .collect();
    let layout = GridLayout::compute(&widths, w.width());

    for row in 0..layout.rows {
        w.newline();
        for col in 0..layout.cols {
            let Some(k) = layout.index(row, col) else {
                continue;
            };
            let style = if overlay.current == Some(k) {
                current_style
            } else {
                ""
            };
            let text = &overlay.candidates[k].text;
            w.write_str(text, style);
            w.write_spaces(layout.col_width - widths[k], style);
            w.write_spaces(COLUMN_MARGIN, "");
        }
    }
}
