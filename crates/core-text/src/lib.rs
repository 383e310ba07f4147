//! Text measurement shared by the renderer and its callers.
//!
//! Only display width lives here today: the renderer works glyph by glyph
//! (one `char` per cell) and needs a single authoritative answer for how many
//! terminal columns a glyph occupies.

pub mod width;

pub use width::{char_width, is_printable, str_width};
