//! Scanner for Python docstrings.
//!
//! The string begin/end punctuation scopes are shared by every string
//! literal, so the begin marker only opens a block when the token also
//! carries one of the docstring qualifier scopes. Per-line spans start at
//! the indentation width recorded from the opening line, clamped to each
//! line's actual extent; raw docstrings (`r"""`) are tagged so the Sphinx
//! scanner can apply raw-string backslash semantics.

use crate::document::SourceText;
use crate::ir::{DocBlock, DocKind, Span};
use crate::token::{self, Marker, Token, TokenEvent, replay};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    Outside,
    Inside,
}

#[derive(Debug, Default)]
struct Context {
    docs: Vec<(Vec<Span>, bool)>,
    spans: Vec<Span>,
    start: Option<u32>,
    line: Option<u32>,
    tabwidth: u32,
    raw: bool,
}

impl Context {
    fn open(&mut self, tokens: &[Token], index: usize) {
        let opener = &tokens[index];
        self.raw = token::is_raw_docstring(opener);
        // The indentation token precedes the quote token, behind the `r`
        // prefix for raw strings.
        let tabindex = index.checked_sub(1 + usize::from(self.raw));
        self.tabwidth = tabindex
            .and_then(|i| tokens.get(i))
            .map(|t| t.text.chars().count() as u32)
            .unwrap_or(0);
        self.line = Some(opener.line);
        self.start = Some(opener.end());
    }

    fn flush_line(&mut self, tokens: &[Token], index: usize, next_line: u32) {
        let prev = index.checked_sub(1).and_then(|i| tokens.get(i));
        match (self.line, self.start, prev) {
            (Some(line), Some(start), Some(prev)) => {
                let end = prev.end();
                self.spans.push(Span::new(line, start.min(end), end));
            }
            _ => log::warn!("line boundary without an open docstring line"),
        }
        self.start = Some(self.tabwidth);
        self.line = Some(next_line);
    }

    fn close(&mut self, end: u32) {
        if let (Some(line), Some(start)) = (self.line, self.start) {
            self.spans.push(Span::new(line, start.min(end), end));
        }
        self.docs.push((std::mem::take(&mut self.spans), self.raw));
        self.reset();
    }

    fn reset(&mut self) {
        self.spans.clear();
        self.start = None;
        self.line = None;
    }
}

fn step(state: State, ctx: &mut Context, tokens: &[Token], event: TokenEvent) -> State {
    if let TokenEvent::End = event {
        // Unterminated docstring at end of input: dropped, not reported.
        ctx.reset();
        return State::Outside;
    }

    match (state, event) {
        (State::Outside, TokenEvent::Marker { kind: Marker::BlockBegin, index }) => {
            if !token::is_docstring_begin(&tokens[index]) {
                // An ordinary string literal.
                return State::Outside;
            }
            ctx.open(tokens, index);
            State::Inside
        }
        (State::Outside, _) => State::Outside,

        (State::Inside, TokenEvent::LineIncrement { index }) => {
            ctx.flush_line(tokens, index, tokens[index].line);
            State::Inside
        }
        (State::Inside, TokenEvent::Marker { kind: Marker::BlockEnd, index }) => {
            ctx.close(tokens[index].start);
            State::Outside
        }
        (State::Inside, TokenEvent::Marker { kind: Marker::BlockBegin, index }) => {
            log::warn!(
                "unexpected string-begin marker inside a docstring (line {})",
                tokens[index].line
            );
            State::Inside
        }
        (State::Inside, _) => State::Inside,
    }
}

/// Scans `tokens` for Python docstrings.
pub fn scan(tokens: &[Token], src: &impl SourceText) -> Vec<DocBlock> {
    let scopes = [
        (Marker::BlockBegin, "punctuation.definition.string.begin.python"),
        (Marker::BlockEnd, "punctuation.definition.string.end.python"),
    ];

    let mut ctx = Context::default();
    let mut state = State::Outside;
    replay(tokens, &scopes, |event| {
        state = step(state, &mut ctx, tokens, event);
    });

    ctx.docs
        .into_iter()
        .filter_map(|(spans, raw)| {
            super::materialize(DocKind::DelimitedBlock { raw }, spans, src)
        })
        .collect()
}
