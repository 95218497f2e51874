//! Scanner for Sphinx math markup in docstrings.
//!
//! Two forms: the inline role `` :math:`...` `` closed by the first
//! unescaped backtick, and the `.. math::` directive whose body is every
//! following line that is blank or more indented than the directive. The
//! directive may open with `:name:` option lines; `:nowrap:` (or
//! `:no-wrap:`) suppresses the `split` environment wrapper. Unlike the
//! character machines, this scanner works line by line and reprocesses the
//! remainder of a line after a match.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::ir::{DocBlock, FormulaOccurrence, Notation, Span};

const ROLE: &str = ":math:`";
const DIRECTIVE: &str = ".. math::";
const ROLE_LEN: u32 = 7;
const DIRECTIVE_LEN: u32 = 9;

static OPTION_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\s*:([\w-]+):(.*)$").expect("option pattern"));

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    Outside,
    Inline,
    Block,
}

/// Scans one documentation block for Sphinx math markup. Inline role
/// occurrences precede directive occurrences in the result.
pub fn scan(block: &DocBlock) -> Vec<FormulaOccurrence> {
    let raw = block.kind.is_raw();
    let mut inlines = Vec::new();
    let mut blocks = Vec::new();
    let mut texts: Vec<String> = Vec::new();
    let mut spans: Vec<Span> = Vec::new();
    let mut state = State::Outside;
    let mut start_index: usize = 0;

    let mut i = 0;
    while i < block.lines.len() {
        let line = &block.lines[i];
        let text = chars_from(&line.text, start_index);
        let base = line.span.start + start_index as u32;

        match state {
            State::Outside => {
                if start_index == 0 && is_directive_line(&line.text) {
                    texts.clear();
                    spans.clear();
                    state = State::Block;
                    start_index = DIRECTIVE.len();
                } else if let Some(idx) = find_chars(&text, ROLE) {
                    texts.clear();
                    spans.clear();
                    state = State::Inline;
                    start_index += idx + ROLE.len();
                } else {
                    start_index = 0;
                    i += 1;
                }
            }

            State::Inline => match unescaped_backtick(&text) {
                Some(idx) => {
                    texts.push(text.chars().take(idx).collect());
                    spans.push(Span::new(line.span.line, base, base + idx as u32));
                    // Widen to the full markup: the role prefix before the
                    // first capture, the closing backtick after the last.
                    if let Some(first) = spans.first_mut() {
                        first.start = first.start.saturating_sub(ROLE_LEN);
                    }
                    if let Some(last) = spans.last_mut() {
                        last.end += 1;
                    }
                    let joined = texts.join(Notation::SphinxInline.line_separator());
                    let trimmed = joined.trim().to_string();
                    if !trimmed.is_empty() {
                        inlines.push(FormulaOccurrence {
                            spans: std::mem::take(&mut spans),
                            notation: Notation::SphinxInline,
                            text: trimmed,
                        });
                    }
                    texts.clear();
                    spans.clear();
                    state = State::Outside;
                    start_index += idx + 1;
                }
                None => {
                    texts.push(text);
                    spans.push(Span::new(line.span.line, base, line.span.end));
                    start_index = 0;
                    i += 1;
                }
            },

            State::Block => {
                if text.trim().is_empty() {
                    // Blank body lines are kept as placeholders so the
                    // extractor can substitute a row separator.
                    texts.push(String::new());
                    spans.push(Span::new(line.span.line, base, line.span.end));
                    start_index = 0;
                    i += 1;
                } else if text.starts_with(char::is_whitespace) {
                    texts.push(text);
                    spans.push(Span::new(line.span.line, base, line.span.end));
                    start_index = 0;
                    i += 1;
                } else {
                    // A non-indented line ends the directive and is
                    // reprocessed from Outside.
                    finish_block(&mut texts, &mut spans, raw, &mut blocks);
                    state = State::Outside;
                    start_index = 0;
                }
            }
        }
    }

    match state {
        // A directive body may run to the end of the block.
        State::Block => finish_block(&mut texts, &mut spans, raw, &mut blocks),
        // An unterminated inline role is dropped.
        State::Inline | State::Outside => {}
    }

    inlines.extend(blocks);
    inlines
}

fn finish_block(
    texts: &mut Vec<String>,
    spans: &mut Vec<Span>,
    raw: bool,
    out: &mut Vec<FormulaOccurrence>,
) {
    if let Some(text) = extract_block(texts, raw) {
        if let Some(first) = spans.first_mut() {
            first.start = first.start.saturating_sub(DIRECTIVE_LEN);
        }
        out.push(FormulaOccurrence {
            spans: std::mem::take(spans),
            notation: Notation::SphinxBlock,
            text,
        });
    }
    texts.clear();
    spans.clear();
}

/// Normalizes a directive body: consumes leading `:name:` option lines,
/// strips surrounding blank lines, dedents by the minimum indent, turns
/// interior blank lines into `\\` row separators, and wraps the result in
/// a `split` environment unless a nowrap option was given.
fn extract_block(texts: &[String], raw: bool) -> Option<String> {
    let first = texts.iter().position(|t| !t.trim().is_empty())?;

    let mut options = Vec::new();
    let mut body_from = first;
    while body_from < texts.len() {
        let Some(caps) = OPTION_RE.captures(&texts[body_from]) else {
            break;
        };
        options.push(caps[1].to_string());
        body_from += 1;
    }

    let body: Vec<&String> = texts[body_from..]
        .iter()
        .skip_while(|t| t.trim().is_empty())
        .collect();
    let body: Vec<&String> = body
        .iter()
        .rev()
        .skip_while(|t| t.trim().is_empty())
        .copied()
        .collect::<Vec<_>>()
        .into_iter()
        .rev()
        .collect();
    if body.is_empty() {
        return None;
    }

    let indent = body
        .iter()
        .filter(|t| !t.trim().is_empty())
        .map(|t| t.chars().take_while(|c| c.is_whitespace()).count())
        .min()
        .unwrap_or(0);

    // In a raw docstring `\\` is already two source characters; in an
    // ordinary docstring the author had to write `\\\\`, which the collapse
    // below folds back down.
    let row_sep = if raw { "\\\\" } else { "\\\\\\\\" };
    let lines: Vec<String> = body
        .iter()
        .map(|t| {
            if t.trim().is_empty() {
                row_sep.to_string()
            } else {
                t.chars().skip(indent).collect()
            }
        })
        .collect();
    let mut joined = lines.join("\n");
    if !raw {
        joined = joined.replace("\\\\", "\\");
    }

    let nowrap = options.iter().any(|o| o == "nowrap" || o == "no-wrap");
    if nowrap {
        Some(joined)
    } else {
        Some(format!("\\begin{{split}}\n{joined}\n\\end{{split}}"))
    }
}

/// A directive opens only at the start of a line, and `.. math::` must be
/// followed by whitespace or the end of the line. The remainder of the
/// directive line, if any, is the first body line.
fn is_directive_line(text: &str) -> bool {
    text.starts_with(DIRECTIVE)
        && text[DIRECTIVE.len()..]
            .chars()
            .next()
            .is_none_or(char::is_whitespace)
}

fn chars_from(s: &str, from: usize) -> String {
    s.chars().skip(from).collect()
}

/// Char index of `needle` within `haystack`.
fn find_chars(haystack: &str, needle: &str) -> Option<usize> {
    haystack
        .find(needle)
        .map(|byte_idx| haystack[..byte_idx].chars().count())
}

/// Char index of the first backtick not preceded by a backslash.
fn unescaped_backtick(text: &str) -> Option<usize> {
    let mut prev = None;
    for (idx, ch) in text.chars().enumerate() {
        if ch == '`' && prev != Some('\\') {
            return Some(idx);
        }
        prev = Some(ch);
    }
    None
}
