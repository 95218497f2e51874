//! Scanner for Markdown-style dollar math.
//!
//! A single `$` opens an inline formula that must close on the same line;
//! `$$` opens a display block that may span lines and closes on the next
//! `$$`. A backslash escapes the dollar that follows it, both outside and
//! inside a formula.

use crate::document::SourceText;
use crate::ir::{DocBlock, FormulaOccurrence, Notation, Span};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    Outside,
    OutsideBackslash,
    /// One `$` seen; the next character decides inline vs. block.
    OutsideDollar,
    Inside,
    InsideBackslash,
    /// Inside a block formula, one `$` of the closing pair seen.
    InsideDollar,
}

#[derive(Debug)]
struct Context {
    formulas: Vec<(Vec<Span>, Notation)>,
    notation: Notation,
    spans: Vec<Span>,
    start: u32,
    line: u32,
}

impl Default for Context {
    fn default() -> Self {
        Self {
            formulas: Vec::new(),
            notation: Notation::MarkdownInline,
            spans: Vec::new(),
            start: 0,
            line: 0,
        }
    }
}

impl Context {
    fn open(&mut self, line: u32, start: u32) {
        self.spans.clear();
        self.line = line;
        self.start = start;
    }

    fn flush_line(&mut self, prev_end: u32, next_line: u32, next_start: u32) {
        self.spans.push(Span::new(self.line, self.start, prev_end));
        self.line = next_line;
        self.start = next_start;
    }

    fn emit(&mut self, end: u32) {
        self.spans.push(Span::new(self.line, self.start, end));
        self.formulas
            .push((std::mem::take(&mut self.spans), self.notation));
    }
}

/// Scans one documentation block for dollar-delimited formulas.
pub fn scan(block: &DocBlock, src: &impl SourceText) -> Vec<FormulaOccurrence> {
    let mut ctx = Context::default();
    let mut state = State::Outside;

    for (index, line) in block.lines.iter().enumerate() {
        if index > 0 {
            let prev = &block.lines[index - 1];
            state = match state {
                // An open block formula accumulates the finished line; an
                // inline formula cannot span lines and is abandoned.
                State::Inside | State::InsideBackslash | State::InsideDollar
                    if ctx.notation == Notation::MarkdownBlock =>
                {
                    ctx.flush_line(prev.span.end, line.span.line, line.span.start);
                    State::Inside
                }
                _ => State::Outside,
            };
        }

        for (offset, ch) in line.text.chars().enumerate() {
            let pos = line.span.start + offset as u32;
            state = match state {
                State::Outside => match ch {
                    '$' => {
                        ctx.open(line.span.line, pos);
                        State::OutsideDollar
                    }
                    '\\' => State::OutsideBackslash,
                    _ => State::Outside,
                },
                State::OutsideBackslash => State::Outside,
                State::OutsideDollar => match ch {
                    '$' => {
                        ctx.notation = Notation::MarkdownBlock;
                        State::Inside
                    }
                    '\\' => {
                        ctx.notation = Notation::MarkdownInline;
                        State::InsideBackslash
                    }
                    _ => {
                        ctx.notation = Notation::MarkdownInline;
                        State::Inside
                    }
                },
                State::Inside => match ch {
                    '$' if ctx.notation == Notation::MarkdownInline => {
                        ctx.emit(pos + 1);
                        State::Outside
                    }
                    '$' => State::InsideDollar,
                    '\\' => State::InsideBackslash,
                    _ => State::Inside,
                },
                State::InsideBackslash => State::Inside,
                State::InsideDollar => match ch {
                    '$' => {
                        ctx.emit(pos + 1);
                        State::Outside
                    }
                    '\\' => State::InsideBackslash,
                    _ => State::Inside,
                },
            };
        }
    }

    ctx.formulas
        .into_iter()
        .filter_map(|(spans, notation)| {
            extract(&spans, notation, src).map(|text| FormulaOccurrence {
                spans,
                notation,
                text,
            })
        })
        .collect()
}

fn extract(spans: &[Span], notation: Notation, src: &impl SourceText) -> Option<String> {
    let joined = spans
        .iter()
        .map(|span| src.get_text(*span))
        .collect::<Vec<_>>()
        .join(notation.line_separator());
    let mark_len = match notation {
        Notation::MarkdownBlock => 2,
        _ => 1,
    };
    let chars: Vec<char> = joined.chars().collect();
    if chars.len() < mark_len * 2 {
        return None;
    }
    let inner: String = chars[mark_len..chars.len() - mark_len].iter().collect();
    let text = inner.trim().to_string();
    if text.is_empty() { None } else { Some(text) }
}
