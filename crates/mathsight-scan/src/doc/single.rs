//! Scanner for runs of single-line documentation comments (`///`).
//!
//! States: `Outside` until a line marker is seen, `Met` while skipping the
//! marker's leading space, `Inside` over the line body, `Wait` at each line
//! boundary deciding whether the next line re-qualifies as a continuation.
//! A line continues the run only by re-seeing the marker (possibly after
//! whitespace); any other character ends the block.

use crate::document::SourceText;
use crate::ir::{DocBlock, DocKind, Span};
use crate::token::{Language, Marker, Token, TokenEvent, replay};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    Outside,
    Met,
    Wait,
    Inside,
}

#[derive(Debug, Default)]
struct Context {
    docs: Vec<Vec<Span>>,
    spans: Vec<Span>,
    start: Option<u32>,
    line: Option<u32>,
}

impl Context {
    fn open(&mut self, token: &Token) {
        self.line = Some(token.line);
        self.start = Some(token.end());
    }

    /// Closes the current line's span at the previous token's end offset.
    fn flush_line(&mut self, tokens: &[Token], index: usize) {
        let prev = index.checked_sub(1).and_then(|i| tokens.get(i));
        match (self.line, self.start, prev) {
            (Some(line), Some(start), Some(prev)) => {
                self.spans.push(Span::new(line, start, prev.end()));
            }
            _ => log::warn!("line boundary without an open doc-comment line"),
        }
    }

    fn emit(&mut self) {
        if !self.spans.is_empty() {
            self.docs.push(std::mem::take(&mut self.spans));
        }
        self.start = None;
        self.line = None;
    }
}

fn step(state: State, ctx: &mut Context, tokens: &[Token], event: TokenEvent) -> State {
    match (state, event) {
        (State::Outside, TokenEvent::Marker { kind: Marker::Line, index }) => {
            ctx.open(&tokens[index]);
            State::Met
        }
        (State::Outside, _) => State::Outside,

        (State::Met, TokenEvent::Character { index, offset, ch }) => {
            let token = &tokens[index];
            ctx.start = Some(token.start + offset as u32 + u32::from(ch == ' '));
            State::Inside
        }
        (State::Met, TokenEvent::LineIncrement { index }) => {
            ctx.flush_line(tokens, index);
            State::Wait
        }
        (State::Met, TokenEvent::End) => {
            ctx.flush_line(tokens, tokens.len());
            ctx.emit();
            State::Outside
        }
        (State::Met, _) => State::Met,

        (State::Wait, TokenEvent::Marker { kind: Marker::Line, index }) => {
            ctx.open(&tokens[index]);
            State::Met
        }
        (State::Wait, TokenEvent::Character { ch: ' ', .. }) => State::Wait,
        (State::Wait, TokenEvent::Character { .. })
        | (State::Wait, TokenEvent::LineIncrement { .. })
        | (State::Wait, TokenEvent::End) => {
            // The run did not continue; the offending character starts
            // fresh scanning from Outside and needs no replay.
            ctx.emit();
            State::Outside
        }
        (State::Wait, _) => State::Wait,

        (State::Inside, TokenEvent::Character { .. }) => State::Inside,
        (State::Inside, TokenEvent::LineIncrement { index }) => {
            ctx.flush_line(tokens, index);
            State::Wait
        }
        (State::Inside, TokenEvent::End) => {
            ctx.flush_line(tokens, tokens.len());
            ctx.emit();
            State::Outside
        }
        (State::Inside, _) => State::Inside,
    }
}

/// Scans `tokens` for runs of single-line documentation comments.
pub fn scan(tokens: &[Token], lang: Language, src: &impl SourceText) -> Vec<DocBlock> {
    let Some(marker) = lang.line_marker_scope() else {
        return Vec::new();
    };
    let scopes = [(Marker::Line, marker)];

    let mut ctx = Context::default();
    let mut state = State::Outside;
    replay(tokens, &scopes, |event| {
        state = step(state, &mut ctx, tokens, event);
    });

    ctx.docs
        .into_iter()
        .filter_map(|spans| super::materialize(DocKind::SingleLineRun, spans, src))
        .collect()
}
