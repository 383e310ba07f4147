//! Screen rendering for an interactive line editor.
//!
//! A refresh cycle turns a [`request::RenderRequest`] (prompt, styled tokens,
//! cursor byte offset, optional completion overlay, mode, tip) into one
//! batched terminal write:
//!
//! 1. `Renderer::refresh` queries the terminal width and starts a fresh
//!    [`writer::ScreenWriter`].
//! 2. Prompt, tokens (with the selected completion spliced in), right prompt,
//!    mode banner, tip and completion grid are fed glyph by glyph through the
//!    wrap-aware writer, which records the logical cursor ("dot").
//! 3. `Renderer::commit` erases the previous output (using only the previous
//!    buffer's dot line), paints the new [`ScreenBuffer`], moves the physical
//!    cursor to the dot and writes everything at once.
//!
//! Invariants:
//! - No buffer line's cumulative display width exceeds the cycle's terminal
//!   width (for widths >= 2).
//! - Line-break cells have width 0 and never carry a style.
//! - The buffer's dot is always a position the writer actually reached during
//!   the cycle.
//!
//! The previous buffer is never diffed against the new one: every cycle erases
//! and repaints. Content comparison is left to the caller (skip `refresh` when
//! nothing changed).

pub mod ansi;
pub mod completion;
pub mod error;
pub mod metrics;
pub mod renderer;
pub mod request;
pub mod writer;

pub use error::{RenderError, Result};
pub use renderer::Renderer;
pub use request::{Candidate, CandidatePart, CompletionOverlay, Mode, RenderRequest, Token};
pub use writer::ScreenWriter;

/// One screen slot: a glyph, its display width and its SGR tag.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cell {
    pub glyph: char,
    /// Columns occupied (0, 1 or 2). `0` for line breaks and combining marks.
    pub width: u8,
    pub style: String,
}

impl Cell {
    #[inline]
    pub fn new(glyph: char, width: u8, style: &str) -> Self {
        Self {
            glyph,
            width,
            style: style.to_string(),
        }
    }

    /// Terminator appended to a line when the writer moves to the next one.
    #[inline]
    pub fn line_break() -> Self {
        Self {
            glyph: '\n',
            width: 0,
            style: String::new(),
        }
    }

    #[inline]
    pub fn is_line_break(&self) -> bool {
        self.glyph == '\n'
    }
}

/// (line, column) within the rendered area; column counts display cells.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Position {
    pub line: usize,
    pub col: usize,
}

impl Position {
    pub const fn new(line: usize, col: usize) -> Self {
        Self { line, col }
    }
}

/// Lines of cells produced by one refresh cycle plus the recorded dot.
///
/// Pure container: wrap and column bookkeeping live in [`ScreenWriter`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScreenBuffer {
    lines: Vec<Vec<Cell>>,
    dot: Position,
}

impl Default for ScreenBuffer {
    fn default() -> Self {
        Self::new(0)
    }
}

impl ScreenBuffer {
    /// Empty buffer holding a single empty line; `width` is a capacity hint.
    pub fn new(width: usize) -> Self {
        Self {
            lines: vec![Vec::with_capacity(width)],
            dot: Position::default(),
        }
    }

    /// Append to the current (last) line.
    pub fn append_cell(&mut self, cell: Cell) {
        if let Some(line) = self.lines.last_mut() {
            line.push(cell);
        }
    }

    /// Start a new, empty line.
    pub fn append_line(&mut self, width: usize) {
        self.lines.push(Vec::with_capacity(width));
    }

    pub fn lines(&self) -> &[Vec<Cell>] {
        &self.lines
    }

    pub fn line_count(&self) -> usize {
        self.lines.len()
    }

    /// Cumulative display width of line `idx` (0 for an out of range index).
    pub fn line_width(&self, idx: usize) -> usize {
        self.lines
            .get(idx)
            .map(|l| l.iter().map(|c| c.width as usize).sum())
            .unwrap_or(0)
    }

    /// Printable content of line `idx`, line break excluded (testing / diagnostics).
    pub fn line_text(&self, idx: usize) -> String {
        self.lines
            .get(idx)
            .map(|l| {
                l.iter()
                    .filter(|c| !c.is_line_break())
                    .map(|c| c.glyph)
                    .collect()
            })
            .unwrap_or_default()
    }

    pub fn dot(&self) -> Position {
        self.dot
    }

    pub fn set_dot(&mut self, dot: Position) {
        self.dot = dot;
    }
}
