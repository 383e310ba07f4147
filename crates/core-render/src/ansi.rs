//! ANSI escape vocabulary used by the commit step.
//!
//! Only a fixed VT100 subset is emitted:
//! * relative cursor moves `ESC[<n>A` / `B` / `C` / `D`
//! * carriage return + erase to end of screen (`\r ESC[J`)
//! * SGR reset `ESC[m` followed by SGR apply `ESC[<tag>m`
//!
//! Cursor moves and the erase go through crossterm's `Command::write_ansi`,
//! which formats into any `fmt::Write` without touching the terminal. SGR is
//! written by hand because tags are opaque strings and the reset must be the
//! bare `ESC[m` form.

use crate::Position;
use crossterm::Command;
use crossterm::cursor::{MoveDown, MoveLeft, MoveRight, MoveUp};
use crossterm::terminal::{Clear, ClearType};
use std::fmt::{self, Write};

pub const SGR_RESET: &str = "\x1b[m";

#[inline]
fn count(n: usize) -> u16 {
    u16::try_from(n).unwrap_or(u16::MAX)
}

/// Write the relative moves taking the cursor from `from` to `to`.
///
/// At most one vertical and one horizontal primitive; a zero delta on an
/// axis emits nothing for that axis.
pub fn write_delta(out: &mut impl Write, from: Position, to: Position) -> fmt::Result {
    if from.line < to.line {
        MoveDown(count(to.line - from.line)).write_ansi(out)?;
    } else if from.line > to.line {
        MoveUp(count(from.line - to.line)).write_ansi(out)?;
    }
    if from.col < to.col {
        MoveRight(count(to.col - from.col)).write_ansi(out)?;
    } else if from.col > to.col {
        MoveLeft(count(from.col - to.col)).write_ansi(out)?;
    }
    Ok(())
}

/// Bytes moving the cursor from `from` to `to`; empty when they are equal.
pub fn delta_sequence(from: Position, to: Position) -> Vec<u8> {
    let mut s = String::new();
    // Formatting into a String cannot fail.
    let _ = write_delta(&mut s, from, to);
    s.into_bytes()
}

/// Move up over `lines` previously painted lines, return to column 0 and
/// erase everything below.
pub fn write_erase(out: &mut impl Write, lines: usize) -> fmt::Result {
    if lines > 0 {
        MoveUp(count(lines)).write_ansi(out)?;
    }
    out.write_char('\r')?;
    Clear(ClearType::FromCursorDown).write_ansi(out)
}

/// Switch to `tag`: always a full reset first, even when `tag` is empty.
pub fn write_style(out: &mut impl Write, tag: &str) -> fmt::Result {
    write!(out, "{SGR_RESET}\x1b[{tag}m")
}
