//! Scanner for Doxygen math commands.
//!
//! Recognizes the four delimiter pairs `\f$ ... \f$`, `\f( ... \f)`,
//! `\f[ ... \f]` and `\f{env}{ ... \f}`. The opening mark fixes which
//! closing mark ends the formula; the others are ordinary content. Dollar
//! and paren forms render inline and join continuation lines with nothing,
//! bracket and brace forms are display math joined with newlines.

use crate::document::SourceText;
use crate::ir::{DocBlock, FormulaOccurrence, Notation, Span};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Mark {
    notation: Notation,
    close: char,
}

fn mark_for(ch: char) -> Option<Mark> {
    match ch {
        '$' => Some(Mark { notation: Notation::DoxygenDollar, close: '$' }),
        '(' => Some(Mark { notation: Notation::DoxygenParen, close: ')' }),
        '[' => Some(Mark { notation: Notation::DoxygenBracket, close: ']' }),
        '{' => Some(Mark { notation: Notation::DoxygenBrace, close: '}' }),
        _ => None,
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    Outside,
    OutsideBackslash,
    OutsideBackslashF,
    Inside,
    InsideBackslash,
    InsideBackslashF,
}

impl State {
    fn inside(self) -> bool {
        matches!(
            self,
            State::Inside | State::InsideBackslash | State::InsideBackslashF
        )
    }
}

#[derive(Debug, Default)]
struct Context {
    formulas: Vec<(Vec<Span>, Notation)>,
    mark: Option<Mark>,
    spans: Vec<Span>,
    start: u32,
    line: u32,
}

impl Context {
    fn open(&mut self, mark: Mark, line: u32, start: u32) {
        self.mark = Some(mark);
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
        if let Some(mark) = self.mark.take() {
            self.formulas
                .push((std::mem::take(&mut self.spans), mark.notation));
        }
    }
}

/// Scans one documentation block for Doxygen math commands.
pub fn scan(block: &DocBlock, src: &impl SourceText) -> Vec<FormulaOccurrence> {
    let mut ctx = Context::default();
    let mut state = State::Outside;

    for (index, line) in block.lines.iter().enumerate() {
        if index > 0 {
            // Line boundary: an open formula accumulates the finished line,
            // a half-seen `\f` opener does not survive the break.
            if state.inside() {
                let prev = &block.lines[index - 1];
                ctx.flush_line(prev.span.end, line.span.line, line.span.start);
                state = State::Inside;
            } else {
                state = State::Outside;
            }
        }

        for (offset, ch) in line.text.chars().enumerate() {
            let pos = line.span.start + offset as u32;
            state = match state {
                State::Outside => match ch {
                    '\\' => State::OutsideBackslash,
                    _ => State::Outside,
                },
                State::OutsideBackslash => match ch {
                    'f' => State::OutsideBackslashF,
                    '\\' => State::OutsideBackslash,
                    _ => State::Outside,
                },
                State::OutsideBackslashF => match mark_for(ch) {
                    Some(mark) => {
                        // The span starts at the backslash of `\f`.
                        ctx.open(mark, line.span.line, pos - 2);
                        State::Inside
                    }
                    None if ch == '\\' => State::OutsideBackslash,
                    None => State::Outside,
                },
                State::Inside => match ch {
                    '\\' => State::InsideBackslash,
                    _ => State::Inside,
                },
                State::InsideBackslash => match ch {
                    'f' => State::InsideBackslashF,
                    '\\' => State::InsideBackslash,
                    _ => State::Inside,
                },
                State::InsideBackslashF => {
                    if ctx.mark.map(|m| m.close) == Some(ch) {
                        ctx.emit(pos + 1);
                        State::Outside
                    } else if ch == '\\' {
                        State::InsideBackslash
                    } else {
                        State::Inside
                    }
                }
            };
        }
    }
    // A formula still open at the end of the block is dropped.

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

/// Normalizes the captured delimiter-to-delimiter text: strips the three
/// characters of each mark, trims, and rewrites the brace form's
/// `env}{body` into a LaTeX environment. Empty results are discarded.
fn extract(spans: &[Span], notation: Notation, src: &impl SourceText) -> Option<String> {
    let joined = spans
        .iter()
        .map(|span| src.get_text(*span))
        .collect::<Vec<_>>()
        .join(notation.line_separator());
    let chars: Vec<char> = joined.chars().collect();
    if chars.len() < 6 {
        return None;
    }
    let inner: String = chars[3..chars.len() - 3].iter().collect();

    // The brace form keeps its body verbatim; the environment rewrite
    // supplies the structure and LaTeX is whitespace-tolerant inside it.
    if notation == Notation::DoxygenBrace {
        let split = inner.find("}{")?;
        let env = &inner[..split];
        let body = &inner[split + 2..];
        return Some(format!("\\begin{{{env}}}\n{body}\n\\end{{{env}}}"));
    }

    let text = inner.trim().to_string();
    if text.is_empty() { None } else { Some(text) }
}
