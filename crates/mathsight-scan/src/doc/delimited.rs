//! Scanner for delimited documentation blocks (`/** ... */`).
//!
//! Unlike single-line runs, a delimited block only ends on its explicit end
//! marker; the `Wait` state at each line boundary merely skips leading
//! whitespace and the conventional `*` continuation marker before body
//! content resumes. A block still open when the token stream ends is
//! dropped, not reported.

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
    fn is_open(&self) -> bool {
        self.line.is_some()
    }

    fn flush_line(&mut self, tokens: &[Token], index: usize, next_line: u32) {
        let prev = index.checked_sub(1).and_then(|i| tokens.get(i));
        match (self.line, self.start, prev) {
            (Some(line), Some(start), Some(prev)) => {
                self.spans.push(Span::new(line, start, prev.end()));
            }
            _ => log::warn!("line boundary without an open block-comment line"),
        }
        self.line = Some(next_line);
        self.start = Some(0);
    }

    fn close(&mut self, end: u32) {
        if let (Some(line), Some(start)) = (self.line, self.start) {
            // The end marker's own start offset bounds the final line span,
            // so the closing `*/` is not part of the block text.
            self.spans.push(Span::new(line, start, end.max(start)));
        }
        self.docs.push(std::mem::take(&mut self.spans));
        self.reset();
    }

    fn reset(&mut self) {
        self.spans.clear();
        self.start = None;
        self.line = None;
    }
}

fn step(state: State, ctx: &mut Context, tokens: &[Token], event: TokenEvent) -> State {
    // The end marker closes the block from any state; end-of-stream drops
    // whatever is still open.
    match event {
        TokenEvent::Marker { kind: Marker::BlockEnd, index } => {
            if ctx.is_open() {
                ctx.close(tokens[index].start);
            } else {
                log::warn!(
                    "unexpected block-comment end marker outside a block (line {})",
                    tokens[index].line
                );
            }
            return State::Outside;
        }
        TokenEvent::End => {
            ctx.reset();
            return State::Outside;
        }
        _ => {}
    }

    match (state, event) {
        (State::Outside, TokenEvent::Marker { kind: Marker::BlockBegin, index }) => {
            let token = &tokens[index];
            ctx.line = Some(token.line);
            ctx.start = Some(token.end());
            State::Met
        }
        (State::Outside, _) => State::Outside,

        (_, TokenEvent::Marker { kind: Marker::BlockBegin, index }) => {
            log::warn!(
                "unexpected block-comment begin marker inside a block (line {})",
                tokens[index].line
            );
            state
        }

        (State::Met, TokenEvent::Character { index, offset, ch }) => {
            let token = &tokens[index];
            ctx.start = Some(token.start + offset as u32 + u32::from(ch == ' '));
            State::Inside
        }
        (State::Met, TokenEvent::LineIncrement { index }) => {
            ctx.flush_line(tokens, index, tokens[index].line);
            State::Wait
        }
        (State::Met, _) => State::Met,

        (State::Wait, TokenEvent::Character { index, offset, ch }) => {
            let token = &tokens[index];
            ctx.line = Some(token.line);
            match ch {
                ' ' => {
                    ctx.start = Some(token.start + offset as u32 + 1);
                    State::Wait
                }
                // Leading `*` continuation marker, skipped like the
                // marker-adjacent space in `Met`.
                '*' => {
                    ctx.start = Some(token.start + offset as u32 + 1);
                    State::Met
                }
                _ => {
                    ctx.start = Some(token.start + offset as u32);
                    State::Inside
                }
            }
        }
        (State::Wait, TokenEvent::LineIncrement { index }) => {
            ctx.flush_line(tokens, index, tokens[index].line);
            State::Wait
        }
        (State::Wait, _) => State::Wait,

        (State::Inside, TokenEvent::Character { .. }) => State::Inside,
        (State::Inside, TokenEvent::LineIncrement { index }) => {
            ctx.flush_line(tokens, index, tokens[index].line);
            State::Wait
        }
        (State::Inside, _) => State::Inside,
    }
}

/// Scans `tokens` for delimited documentation blocks.
pub fn scan(tokens: &[Token], lang: Language, src: &impl SourceText) -> Vec<DocBlock> {
    let scopes = [
        (Marker::BlockBegin, lang.block_begin_scope()),
        (Marker::BlockEnd, lang.block_end_scope()),
    ];

    let mut ctx = Context::default();
    let mut state = State::Outside;
    replay(tokens, &scopes, |event| {
        state = step(state, &mut ctx, tokens, event);
    });

    ctx.docs
        .into_iter()
        .filter_map(|spans| {
            super::materialize(DocKind::DelimitedBlock { raw: false }, spans, src)
        })
        .collect()
}
