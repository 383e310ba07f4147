//! Wrap-aware cell writer (one instance per refresh cycle).
//!
//! Owns the per-cycle state: terminal width, continuation indent, the live
//! cursor and the [`ScreenBuffer`] being built. All content reaches the buffer
//! through [`ScreenWriter::write`], which decides where each glyph lands.
//!
//! Wrapping rules for a glyph of width `w` at column `c`:
//! * `c + w > width`: break the line first, then place the glyph.
//! * `c + w == width`: place the glyph, then break the line. The break is
//!   emitted eagerly so the result never depends on how a terminal treats
//!   the pending-wrap state at the last column.
//! * otherwise: place the glyph.
//!
//! A line break appends a line-break cell, starts a new buffer line and, when
//! an indent is set, pads the new line with that many unstyled spaces.

use crate::{Cell, Position, ScreenBuffer};
use core_text::{char_width, is_printable};

#[derive(Debug, Clone)]
pub struct ScreenWriter {
    width: usize,
    indent: usize,
    cursor: Position,
    buf: ScreenBuffer,
}

impl ScreenWriter {
    /// Fresh cycle state: indent 0, cursor at the origin, empty buffer.
    pub fn new(width: u16) -> Self {
        let width = width as usize;
        Self {
            width,
            indent: 0,
            cursor: Position::default(),
            buf: ScreenBuffer::new(width),
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn indent(&self) -> usize {
        self.indent
    }

    /// Continuation padding for lines started after this call.
    pub fn set_indent(&mut self, indent: usize) {
        self.indent = indent;
    }

    pub fn cursor(&self) -> Position {
        self.cursor
    }

    pub fn buffer(&self) -> &ScreenBuffer {
        &self.buf
    }

    /// Record the current cursor as the buffer's dot.
    pub fn mark_dot(&mut self) {
        self.buf.set_dot(self.cursor);
    }

    /// Consume the writer, yielding the buffer and the final cursor (where the
    /// physical cursor sits once the buffer is painted).
    pub fn finish(self) -> (ScreenBuffer, Position) {
        (self.buf, self.cursor)
    }

    fn append_to_line(&mut self, cell: Cell) {
        self.cursor.col += cell.width as usize;
        self.buf.append_cell(cell);
    }

    /// Line break transition.
    pub fn newline(&mut self) {
        self.buf.append_cell(Cell::line_break());
        self.buf.append_line(self.width);
        self.cursor.line += 1;
        self.cursor.col = 0;
        for _ in 0..self.indent {
            self.append_to_line(Cell::new(' ', 1, ""));
        }
    }

    /// Write one glyph. `'\n'` breaks the line; other unprintable glyphs are
    /// dropped without a cell or a column advance.
    pub fn write(&mut self, glyph: char, style: &str) {
        if glyph == '\n' {
            self.newline();
            return;
        }
        if !is_printable(glyph) {
            return;
        }
        let w = char_width(glyph);
        let cell = Cell::new(glyph, w, style);
        let end = self.cursor.col + w as usize;
        if end > self.width {
            self.newline();
            self.append_to_line(cell);
        } else if end == self.width {
            self.append_to_line(cell);
            self.newline();
        } else {
            self.append_to_line(cell);
        }
    }

    pub fn write_str(&mut self, s: &str, style: &str) {
        for c in s.chars() {
            self.write(c, style);
        }
    }

    pub fn write_spaces(&mut self, n: usize, style: &str) {
        for _ in 0..n {
            self.write(' ', style);
        }
    }
}
