//! Refresh / commit protocol.
//!
//! [`compose`] and [`encode_frame`] are pure: the bytes of a cycle depend only
//! on the request, the terminal width, the style table and the previous
//! buffer's dot line. [`Renderer`] adds the two blocking calls (width query,
//! output write) and keeps the last committed buffer.

use crate::ansi::{SGR_RESET, write_delta, write_erase, write_style};
use crate::completion::write_grid;
use crate::error::Result;
use crate::metrics::{RefreshMetrics, RefreshMetricsSnapshot};
use crate::request::{CompletionOverlay, Mode, RenderRequest};
use crate::writer::ScreenWriter;
use crate::{Position, ScreenBuffer};
use core_config::Styles;
use core_terminal::TerminalSize;
use core_text::str_width;
use std::io::Write;
use std::time::Instant;
use tracing::{debug, error, warn};

pub const DEFAULT_FALLBACK_COLUMNS: u16 = 80;

/// Splice the selected candidate into the line in place of the original bytes.
fn write_candidate(w: &mut ScreenWriter, overlay: &CompletionOverlay, styles: &Styles) {
    let Some(cand) = overlay.selected() else {
        return;
    };
    for part in &cand.parts {
        if part.already_typed {
            let style = format!("{}{}", overlay.style, styles.already_typed);
            w.write_str(&part.text, &style);
        } else {
            w.write_str(&part.text, &overlay.style);
        }
    }
}

/// Build the whole frame for `req` at `width` columns.
pub fn compose(width: u16, styles: &Styles, req: &RenderRequest) -> ScreenWriter {
    compose_into(ScreenWriter::new(width), styles, req)
}

/// Feed `req` through a freshly started writer.
pub fn compose_into(mut w: ScreenWriter, styles: &Styles, req: &RenderRequest) -> ScreenWriter {
    w.write_str(&req.prompt, &styles.prompt);
    // Continuation lines line up under the input unless the prompt already
    // takes half the width.
    if w.cursor().col * 2 < w.width() {
        w.set_indent(w.cursor().col);
    }

    // Only a selected candidate replaces the completed range.
    let splice = req.completion.as_ref().filter(|c| c.selected().is_some());
    let mut i = 0usize; // bytes of token text consumed
    let mut suppress = false;
    if req.dot == 0 {
        w.mark_dot();
    }
    if let Some(overlay) = splice
        && overlay.start == 0
    {
        write_candidate(&mut w, overlay, styles);
        suppress = true;
    }
    for token in &req.tokens {
        for c in token.text.chars() {
            let silenced = suppress && splice.is_some_and(|o| i < o.end);
            if !silenced {
                w.write(c, &token.style);
            }
            i += c.len_utf8();
            if let Some(overlay) = splice
                && i == overlay.start
            {
                write_candidate(&mut w, overlay, styles);
                suppress = true;
            }
            if i == req.dot {
                w.mark_dot();
            }
        }
    }

    if !req.rprompt.is_empty() {
        let padding = w.width() as isize
            - 1
            - w.cursor().col as isize
            - str_width(&req.rprompt) as isize;
        if padding >= 1 {
            w.write_spaces(padding as usize, "");
            w.write_str(&req.rprompt, &styles.rprompt);
        }
    }

    w.set_indent(0);

    if req.mode != Mode::Insert {
        w.newline();
        if let Some(banner) = req.mode.banner() {
            w.write_str(banner, &styles.mode);
        }
    }

    if !req.tip.is_empty() {
        w.newline();
        w.write_str(&req.tip, &styles.tip);
    }

    if let Some(overlay) = &req.completion {
        write_grid(&mut w, overlay, &styles.current_completion);
    }

    w
}

/// Bytes for one commit: erase the previous output, paint `buf`, then move
/// from `cursor` (where painting leaves the terminal cursor) to the dot.
pub fn encode_frame(prev_dot_line: usize, buf: &ScreenBuffer, cursor: Position) -> String {
    let mut out = String::new();
    // Formatting into a String cannot fail.
    let _ = write_erase(&mut out, prev_dot_line);

    let mut style = "";
    for line in buf.lines() {
        for cell in line {
            if cell.width > 0 && cell.style != style {
                let _ = write_style(&mut out, &cell.style);
                style = cell.style.as_str();
            }
            out.push(cell.glyph);
        }
    }
    if !style.is_empty() {
        out.push_str(SGR_RESET);
    }

    let _ = write_delta(&mut out, cursor, buf.dot());
    out
}

/// Owns the output sink, the width source and the last committed buffer.
///
/// Not reentrant: one cycle at a time from the single editing loop.
pub struct Renderer<W: Write, T: TerminalSize> {
    out: W,
    size: T,
    styles: Styles,
    fallback_width: u16,
    last_width: Option<u16>,
    prev: ScreenBuffer,
    metrics: RefreshMetrics,
}

impl<W: Write, T: TerminalSize> Renderer<W, T> {
    pub fn new(out: W, size: T, styles: Styles) -> Self {
        Self {
            out,
            size,
            styles,
            fallback_width: DEFAULT_FALLBACK_COLUMNS,
            last_width: None,
            prev: ScreenBuffer::default(),
            metrics: RefreshMetrics::default(),
        }
    }

    /// Width used when the very first width query fails.
    pub fn with_fallback_width(mut self, columns: u16) -> Self {
        self.fallback_width = columns.max(1);
        self
    }

    pub fn styles(&self) -> &Styles {
        &self.styles
    }

    pub fn set_styles(&mut self, styles: Styles) {
        self.styles = styles;
    }

    /// Last successfully committed buffer.
    pub fn previous(&self) -> &ScreenBuffer {
        &self.prev
    }

    pub fn output(&self) -> &W {
        &self.out
    }

    pub fn output_mut(&mut self) -> &mut W {
        &mut self.out
    }

    pub fn into_output(self) -> W {
        self.out
    }

    pub fn metrics(&self) -> RefreshMetricsSnapshot {
        self.metrics.snapshot()
    }

    /// Re-query the terminal width. Failure or a zero width falls back to the
    /// last good width, then to the configured fallback.
    fn query_width(&mut self) -> u16 {
        let fallback = self.last_width.unwrap_or(self.fallback_width);
        match self.size.columns() {
            Ok(0) => {
                warn!(target: "render.width", fallback, "zero_width_reported");
                fallback
            }
            Ok(cols) => {
                if let Some(old) = self.last_width
                    && old != cols
                {
                    debug!(target: "render.width", old, new = cols, "width_changed");
                }
                self.last_width = Some(cols);
                cols
            }
            Err(e) => {
                warn!(target: "render.width", error = %e, fallback, "width_query_failed");
                fallback
            }
        }
    }

    /// Begin a cycle: query the width and hand out a fresh writer.
    pub fn start_cycle(&mut self) -> ScreenWriter {
        ScreenWriter::new(self.query_width())
    }

    /// Redraw the editor for `req`. On error nothing is recorded as committed.
    pub fn refresh(&mut self, req: &RenderRequest) -> Result<()> {
        let started = Instant::now();
        let frame = self.start_cycle();
        let frame = compose_into(frame, &self.styles, req);
        let res = self.commit(frame);
        self.metrics
            .record_refresh_ns(started.elapsed().as_nanos() as u64);
        res
    }

    /// Erase the previous output, paint `frame` and place the cursor, in a
    /// single write. The frame becomes the previous buffer only on success.
    pub fn commit(&mut self, frame: ScreenWriter) -> Result<()> {
        let width = frame.width();
        let (buf, cursor) = frame.finish();
        let bytes = encode_frame(self.prev.dot().line, &buf, cursor);

        if let Err(e) = self
            .out
            .write_all(bytes.as_bytes())
            .and_then(|()| self.out.flush())
        {
            self.metrics.record_failure();
            error!(target: "render.commit", error = %e, bytes = bytes.len(), "output_write_failed");
            return Err(e.into());
        }

        self.metrics.record_commit(bytes.len(), buf.line_count());
        debug!(
            target: "render.commit",
            width,
            lines = buf.line_count(),
            bytes = bytes.len(),
            dot_line = buf.dot().line,
            dot_col = buf.dot().col,
            "frame_committed"
        );
        self.prev = buf;
        Ok(())
    }
}
