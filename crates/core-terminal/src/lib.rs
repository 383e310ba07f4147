//! Terminal width source.
//!
//! The renderer re-queries the column count at the start of every refresh
//! cycle so a resize between keystrokes is picked up by the next repaint.
//! Raw-mode setup and input reading belong to the caller; this crate only
//! answers "how wide is the terminal right now".

use std::io;

pub trait TerminalSize {
    /// Current terminal width in columns. Blocking.
    fn columns(&mut self) -> io::Result<u16>;
}

/// Queries the controlling terminal through crossterm.
#[derive(Debug, Default, Clone, Copy)]
pub struct CrosstermSize;

impl CrosstermSize {
    pub fn new() -> Self {
        Self
    }
}

impl TerminalSize for CrosstermSize {
    fn columns(&mut self) -> io::Result<u16> {
        let (cols, _rows) = crossterm::terminal::size()?;
        Ok(cols)
    }
}

/// Always reports the same width. Used when output is not a tty and by tests.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedWidth(pub u16);

impl TerminalSize for FixedWidth {
    fn columns(&mut self) -> io::Result<u16> {
        Ok(self.0)
    }
}

impl<T: TerminalSize + ?Sized> TerminalSize for &mut T {
    fn columns(&mut self) -> io::Result<u16> {
        (**self).columns()
    }
}

impl<T: TerminalSize + ?Sized> TerminalSize for Box<T> {
    fn columns(&mut self) -> io::Result<u16> {
        (**self).columns()
    }
}
