//! End-to-end refresh cycles against an in-memory sink.

use core_config::Styles;
use core_render::{
    Candidate, CompletionOverlay, Mode, Position, RenderRequest, Renderer, Token,
};
use core_terminal::{FixedWidth, TerminalSize};
use pretty_assertions::assert_eq;
use std::cell::Cell;
use std::rc::Rc;

fn styles() -> Styles {
    Styles {
        prompt: "1".into(),
        rprompt: "7".into(),
        mode: "1;7;33".into(),
        tip: String::new(),
        completion: String::new(),
        current_completion: "7".into(),
        already_typed: ";4".into(),
        tokens: Default::default(),
    }
}

fn request(text: &str, dot: usize) -> RenderRequest {
    RenderRequest {
        prompt: "> ".into(),
        tokens: vec![Token::new(text, "")],
        dot,
        ..Default::default()
    }
}

fn take_output(r: &mut Renderer<Vec<u8>, impl TerminalSize>) -> String {
    String::from_utf8(std::mem::take(r.output_mut())).unwrap()
}

#[test]
fn first_cycle_bytes() {
    let mut r = Renderer::new(Vec::new(), FixedWidth(20), styles());
    r.refresh(&request("ls", 1)).unwrap();
    assert_eq!(
        take_output(&mut r),
        "\r\x1b[J\x1b[m\x1b[1m> \x1b[m\x1b[mls\x1b[1D"
    );
}

#[test]
fn second_cycle_erases_up_to_previous_dot_line() {
    let mut r = Renderer::new(Vec::new(), FixedWidth(6), styles());
    // "> abcd" fills the line, dot ends on line 1.
    r.refresh(&request("abcd", 4)).unwrap();
    assert_eq!(r.previous().dot(), Position::new(1, 2));
    take_output(&mut r);

    r.refresh(&request("a", 1)).unwrap();
    let out = take_output(&mut r);
    assert!(out.starts_with("\x1b[1A\r\x1b[J"), "{out:?}");
    assert_eq!(r.previous().dot(), Position::new(0, 3));
}

#[test]
fn identical_inputs_give_identical_bytes() {
    let mut req = request("echo hello world", 5);
    req.mode = Mode::Command;
    req.tip = "tip".into();
    let mut r = Renderer::new(Vec::new(), FixedWidth(12), styles());
    r.refresh(&req).unwrap();
    take_output(&mut r);
    r.refresh(&req).unwrap();
    let a = take_output(&mut r);
    r.refresh(&req).unwrap();
    let b = take_output(&mut r);
    assert_eq!(a, b);
}

#[derive(Clone)]
struct SharedWidth(Rc<Cell<u16>>);

impl TerminalSize for SharedWidth {
    fn columns(&mut self) -> std::io::Result<u16> {
        Ok(self.0.get())
    }
}

#[test]
fn width_is_requeried_every_cycle() {
    let width = Rc::new(Cell::new(40));
    let mut r = Renderer::new(Vec::new(), SharedWidth(width.clone()), styles());
    r.refresh(&request("abcdefghij", 10)).unwrap();
    assert_eq!(r.previous().line_count(), 1);

    width.set(8);
    r.refresh(&request("abcdefghij", 10)).unwrap();
    assert_eq!(r.previous().line_text(0), "> abcdef");
    assert_eq!(r.previous().line_text(1), "  ghij");
    assert!(r.previous().lines().iter().all(|l| {
        l.iter().map(|c| c.width as usize).sum::<usize>() <= 8
    }));
}

#[test]
fn completed_bytes_never_reach_the_sink() {
    let mut req = request("cat XYZQ", 8);
    req.completion = Some(CompletionOverlay {
        candidates: vec![Candidate::plain("notes.txt"), Candidate::plain("notes.md")],
        current: Some(1),
        start: 4,
        end: 8,
        style: "34".into(),
    });
    let mut r = Renderer::new(Vec::new(), FixedWidth(40), styles());
    r.refresh(&req).unwrap();
    let out = take_output(&mut r);
    assert!(!out.contains("XYZQ"));
    assert!(out.contains("\x1b[m\x1b[34mnotes.md"));
    assert_eq!(r.previous().line_text(0), "> cat notes.md");
    assert_eq!(r.previous().dot(), Position::new(0, 14));
}

#[test]
fn grid_of_seven_in_twenty_columns() {
    let names = ["aaaa", "bbbb", "cccc", "dddd", "eeee", "ffff", "gggg"];
    let mut req = request("", 0);
    req.completion = Some(CompletionOverlay {
        candidates: names.into_iter().map(Candidate::plain).collect(),
        current: None,
        start: 0,
        end: 0,
        style: String::new(),
    });
    let mut r = Renderer::new(Vec::new(), FixedWidth(20), styles());
    r.refresh(&req).unwrap();
    let buf = r.previous();
    assert_eq!(buf.line_text(1), "aaaa  dddd  gggg  ");
    assert_eq!(buf.line_text(2), "bbbb  eeee  ");
    assert_eq!(buf.line_text(3), "cccc  ffff  ");
    assert_eq!(buf.line_count(), 4);
}

#[test]
fn selected_grid_entry_is_highlighted_on_the_wire() {
    let mut req = request("x", 1);
    req.completion = Some(CompletionOverlay {
        candidates: vec![Candidate::plain("ab"), Candidate::plain("abcd")],
        current: Some(0),
        start: 0,
        end: 1,
        style: String::new(),
    });
    let mut r = Renderer::new(Vec::new(), FixedWidth(40), styles());
    r.refresh(&req).unwrap();
    let out = take_output(&mut r);
    // Candidate text plus its padding to the column width share the style.
    assert!(out.contains("\x1b[m\x1b[7mab  \x1b[m\x1b[m  abcd"), "{out:?}");
}

#[test]
fn rprompt_omitted_matches_plain_output() {
    let mut with = RenderRequest {
        prompt: "0123456789".into(),
        tokens: vec![Token::new("abcde", "")],
        dot: 5,
        ..Default::default()
    };
    let without = with.clone();
    with.rprompt = "RPROMP".into();

    let mut a = Renderer::new(Vec::new(), FixedWidth(20), styles());
    a.refresh(&with).unwrap();
    let mut b = Renderer::new(Vec::new(), FixedWidth(20), styles());
    b.refresh(&without).unwrap();
    assert_eq!(take_output(&mut a), take_output(&mut b));
}

#[test]
fn metrics_count_committed_cycles() {
    let mut r = Renderer::new(Vec::new(), FixedWidth(20), styles());
    r.refresh(&request("a", 1)).unwrap();
    r.refresh(&request("ab", 2)).unwrap();
    let written = r.output().len() as u64;
    let m = r.metrics();
    assert_eq!(m.cycles, 2);
    assert_eq!(m.failed_commits, 0);
    assert_eq!(m.bytes_written, written);
    assert_eq!(m.last_line_count, 1);
}

#[test]
fn unprintable_input_is_dropped() {
    let mut r = Renderer::new(Vec::new(), FixedWidth(20), styles());
    r.refresh(&request("a\x07b", 3)).unwrap();
    assert_eq!(r.previous().line_text(0), "> ab");
    assert_eq!(r.previous().dot(), Position::new(0, 4));
}
