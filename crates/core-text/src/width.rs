//! Character display width table.
//!
//! Every width decision made by the renderer flows through [`char_width`].
//! The table is fixed: wide glyphs occupy 2 columns, printable glyphs 1,
//! combining marks 0 (they ride on the preceding glyph), and unprintable
//! glyphs 0. Unprintable glyphs are never stored by the renderer; the 0 is
//! returned only so width sums over raw text stay consistent with what is
//! actually painted.
//!
//! Width precedence:
//! 1. Unprintable (controls, format characters, non-ASCII separators,
//!    private use, noncharacters) => 0.
//! 2. Primary emoji blocks and regional indicators => 2 (terminals render
//!    these wide even where the baseline table says otherwise).
//! 3. `unicode_width` East Asian width (W/F => 2, combining => 0).
//! 4. Everything else => 1.
//!
//! Invariants:
//! - No caller computes display width without going through this module.
//! - `is_printable(c) == false` implies `char_width(c) == 0`.

use unicode_width::UnicodeWidthChar;

// Regional Indicator range
fn is_regional_indicator(c: char) -> bool {
    ('\u{1F1E6}'..='\u{1F1FF}').contains(&c)
}

// Primary emoji blocks & supplemental symbols. Misc Symbols / Dingbats are left
// to the baseline table because most terminals draw them narrow without VS16.
fn is_extended_pictographic(c: char) -> bool {
    ('\u{1F300}'..='\u{1FAFF}').contains(&c)
}

// Cf (format) characters that have no glyph of their own.
fn is_format_char(c: char) -> bool {
    matches!(c,
        '\u{00AD}'
        | '\u{0600}'..='\u{0605}'
        | '\u{061C}'
        | '\u{06DD}'
        | '\u{070F}'
        | '\u{0890}'..='\u{0891}'
        | '\u{08E2}'
        | '\u{180E}'
        | '\u{200B}'..='\u{200F}'
        | '\u{202A}'..='\u{202E}'
        | '\u{2060}'..='\u{2064}'
        | '\u{2066}'..='\u{206F}'
        | '\u{FEFF}'
        | '\u{FFF9}'..='\u{FFFB}'
        | '\u{110BD}'
        | '\u{110CD}'
        | '\u{13430}'..='\u{1343F}'
        | '\u{1BCA0}'..='\u{1BCA3}'
        | '\u{1D173}'..='\u{1D17A}'
        // tags
        | '\u{E0001}'
        | '\u{E0020}'..='\u{E007F}'
    )
}

fn is_private_use(c: char) -> bool {
    ('\u{E000}'..='\u{F8FF}').contains(&c)
        || ('\u{F0000}'..='\u{FFFFD}').contains(&c)
        || ('\u{100000}'..='\u{10FFFD}').contains(&c)
}

fn is_noncharacter(c: char) -> bool {
    let low = c as u32 & 0xFFFF;
    low == 0xFFFE || low == 0xFFFF || ('\u{FDD0}'..='\u{FDEF}').contains(&c)
}

/// Whether `c` is a glyph the terminal can draw. ASCII space is the only
/// printable separator.
pub fn is_printable(c: char) -> bool {
    if c == ' ' {
        return true;
    }
    !(c.is_control()
        || c.is_whitespace()
        || is_format_char(c)
        || is_private_use(c)
        || is_noncharacter(c))
}

/// Display width of a single glyph in terminal columns (0, 1 or 2).
#[inline]
pub fn char_width(c: char) -> u8 {
    if c.is_ascii() {
        return if is_printable(c) { 1 } else { 0 };
    }
    if !is_printable(c) {
        return 0;
    }
    if is_extended_pictographic(c) || is_regional_indicator(c) {
        return 2;
    }
    match UnicodeWidthChar::width(c) {
        Some(2) => 2,
        Some(0) => 0,
        _ => 1,
    }
}

/// Display width of a whole string: the sum of its glyph widths.
pub fn str_width(s: &str) -> usize {
    s.chars().map(|c| char_width(c) as usize).sum()
}
