//! Property tests for wrap bookkeeping and cursor deltas.

use core_config::Styles;
use core_render::ansi::delta_sequence;
use core_render::renderer::compose;
use core_render::{
    Candidate, CompletionOverlay, Mode, Position, RenderRequest, ScreenWriter, Token,
};
use proptest::prelude::*;

/// Apply a cursor-movement sequence to `pos`, the way a VT100 would.
fn apply_moves(mut pos: Position, bytes: &[u8]) -> Position {
    let s = std::str::from_utf8(bytes).unwrap();
    let mut rest = s;
    while let Some(tail) = rest.strip_prefix("\x1b[") {
        let digits: String = tail.chars().take_while(|c| c.is_ascii_digit()).collect();
        let n: usize = digits.parse().unwrap();
        let op = tail[digits.len()..].chars().next().unwrap();
        match op {
            'A' => pos.line -= n,
            'B' => pos.line += n,
            'C' => pos.col += n,
            'D' => pos.col -= n,
            other => panic!("unexpected op {other}"),
        }
        rest = &tail[digits.len() + 1..];
    }
    assert!(rest.is_empty(), "trailing bytes {rest:?}");
    pos
}

fn text_strategy() -> impl Strategy<Value = String> {
    prop::collection::vec(
        prop_oneof![
            4 => prop::char::range('a', 'z'),
            1 => Just(' '),
            1 => Just('界'),
            1 => Just('😀'),
            1 => Just('\u{0301}'),
            1 => Just('\t'),
        ],
        0..60,
    )
    .prop_map(|v| v.into_iter().collect())
}

fn char_boundary(text: &str, pick: usize) -> usize {
    let mut bounds: Vec<usize> = text.char_indices().map(|(i, _)| i).collect();
    bounds.push(text.len());
    bounds[pick % bounds.len()]
}

proptest! {
    #[test]
    fn delta_round_trip(l1 in 0usize..50, c1 in 0usize..200, l2 in 0usize..50, c2 in 0usize..200) {
        let a = Position::new(l1, c1);
        let b = Position::new(l2, c2);
        let there = apply_moves(a, &delta_sequence(a, b));
        prop_assert_eq!(there, b);
        prop_assert_eq!(apply_moves(there, &delta_sequence(b, a)), a);
    }

    #[test]
    fn delta_to_self_is_empty(l in 0usize..100, c in 0usize..300) {
        let p = Position::new(l, c);
        prop_assert!(delta_sequence(p, p).is_empty());
    }

    #[test]
    fn lines_never_exceed_width(
        width in 2u16..40,
        prompt in "[a-z>$ ]{0,12}",
        text in text_strategy(),
        rprompt in "[A-Z]{0,6}",
        tip in "[a-z ]{0,30}",
        n_cands in 0usize..12,
        cand_len in 1usize..15,
        pick in any::<usize>(),
    ) {
        let dot = char_boundary(&text, pick);
        let completion = (n_cands > 0).then(|| CompletionOverlay {
            candidates: (0..n_cands)
                .map(|i| Candidate::plain("x".repeat(cand_len + i % 3)))
                .collect(),
            current: Some(pick % n_cands),
            start: dot,
            end: dot,
            style: "33".into(),
        });
        let req = RenderRequest {
            prompt,
            rprompt,
            tokens: vec![Token::new(text, "")],
            dot,
            completion,
            mode: Mode::Completing,
            tip,
        };
        let w = compose(width, &Styles::default(), &req);
        let buf = w.buffer();
        for i in 0..buf.line_count() {
            prop_assert!(buf.line_width(i) <= width as usize, "line {} too wide", i);
        }
        prop_assert!(buf.dot().line < buf.line_count());
    }

    #[test]
    fn exact_fill_forces_wrap(width in 1u16..30) {
        let mut w = ScreenWriter::new(width);
        w.write_str(&"a".repeat(width as usize), "");
        prop_assert_eq!(w.cursor(), Position::new(1, 0));
        w.write('b', "");
        prop_assert_eq!(w.buffer().line_text(1), "b");
    }

    #[test]
    fn dot_zero_follows_prompt(prompt in "[a-z> ]{0,30}", text in "[a-z]{0,30}", width in 2u16..40) {
        let req = RenderRequest {
            prompt: prompt.clone(),
            tokens: vec![Token::new(text, "")],
            dot: 0,
            ..Default::default()
        };
        let mut only_prompt = ScreenWriter::new(width);
        only_prompt.write_str(&prompt, "");
        let w = compose(width, &Styles::default(), &req);
        prop_assert_eq!(w.buffer().dot(), only_prompt.cursor());
    }
}
