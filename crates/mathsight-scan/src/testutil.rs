//! Hand-rolled tokenizers approximating the scope streams a TextMate
//! grammar produces for C/C++ and Python sources. Only the scopes the
//! scanners care about are modeled; everything else becomes plain tokens.

use crate::ir::{DocBlock, DocKind, DocLine, Span};
use crate::token::Token;

const CPP_LINE: &str = "punctuation.definition.comment.documentation.cpp";
const CPP_BEGIN: &str = "punctuation.definition.comment.begin.documentation.cpp";
const CPP_END: &str = "punctuation.definition.comment.end.documentation.cpp";
const PY_BEGIN: &str = "punctuation.definition.string.begin.python";
const PY_END: &str = "punctuation.definition.string.end.python";
const PY_DOC: &str = "string.quoted.docstring.multi.python";
const PY_RAW_DOC: &str = "string.quoted.docstring.raw.multi.python";

fn col(line: &str, byte_idx: usize) -> u32 {
    line[..byte_idx].chars().count() as u32
}

fn push(tokens: &mut Vec<Token>, line_no: u32, start: u32, text: &str, scopes: &[&str]) {
    tokens.push(Token::new(line_no, start, text, scopes));
}

/// Tokenizes C/C++ source, tagging `///`, `/**` and `*/` markers.
/// Blank lines yield a single empty token, as real tokenizers do.
pub(crate) fn cpp_tokens(source: &str) -> Vec<Token> {
    let mut tokens = Vec::new();
    let mut inside_block = false;

    for (line_no, line) in source.lines().enumerate() {
        let line_no = line_no as u32;
        if line.is_empty() {
            push(&mut tokens, line_no, 0, "", &[]);
            continue;
        }

        if inside_block {
            if let Some(idx) = line.find("*/") {
                if idx > 0 {
                    push(&mut tokens, line_no, 0, &line[..idx], &[]);
                }
                push(&mut tokens, line_no, col(line, idx), "*/", &[CPP_END]);
                let rest = &line[idx + 2..];
                if !rest.is_empty() {
                    push(&mut tokens, line_no, col(line, idx + 2), rest, &[]);
                }
                inside_block = false;
            } else {
                push(&mut tokens, line_no, 0, line, &[]);
            }
            continue;
        }

        if let Some(idx) = line.find("///") {
            if idx > 0 {
                push(&mut tokens, line_no, 0, &line[..idx], &[]);
            }
            push(&mut tokens, line_no, col(line, idx), "///", &[CPP_LINE]);
            let rest = &line[idx + 3..];
            if !rest.is_empty() {
                push(&mut tokens, line_no, col(line, idx + 3), rest, &[]);
            }
        } else if let Some(idx) = line.find("/**") {
            if idx > 0 {
                push(&mut tokens, line_no, 0, &line[..idx], &[]);
            }
            push(&mut tokens, line_no, col(line, idx), "/**", &[CPP_BEGIN]);
            let after = idx + 3;
            if let Some(close) = line[after..].find("*/") {
                let close = after + close;
                if close > after {
                    push(&mut tokens, line_no, col(line, after), &line[after..close], &[]);
                }
                push(&mut tokens, line_no, col(line, close), "*/", &[CPP_END]);
                let rest = &line[close + 2..];
                if !rest.is_empty() {
                    push(&mut tokens, line_no, col(line, close + 2), rest, &[]);
                }
            } else {
                let rest = &line[after..];
                if !rest.is_empty() {
                    push(&mut tokens, line_no, col(line, after), rest, &[]);
                }
                inside_block = true;
            }
        } else if let Some(idx) = line.find("*/") {
            // Stray close marker, as a mis-scoped tokenizer would tag it.
            if idx > 0 {
                push(&mut tokens, line_no, 0, &line[..idx], &[]);
            }
            push(&mut tokens, line_no, col(line, idx), "*/", &[CPP_END]);
            let rest = &line[idx + 2..];
            if !rest.is_empty() {
                push(&mut tokens, line_no, col(line, idx + 2), rest, &[]);
            }
        } else {
            push(&mut tokens, line_no, 0, line, &[]);
        }
    }
    tokens
}

/// Tokenizes Python source, tagging `"""` docstring delimiters (with the
/// docstring qualifier scope on the opener) and plain `"` strings (begin
/// and end punctuation only, so they must be ignored by the scanner).
pub(crate) fn python_tokens(source: &str) -> Vec<Token> {
    let mut tokens = Vec::new();
    let mut inside_doc = false;

    for (line_no, line) in source.lines().enumerate() {
        let line_no = line_no as u32;
        if line.is_empty() {
            push(&mut tokens, line_no, 0, "", &[]);
            continue;
        }

        if inside_doc {
            if let Some(idx) = line.find("\"\"\"") {
                if idx > 0 {
                    push(&mut tokens, line_no, 0, &line[..idx], &[]);
                }
                push(&mut tokens, line_no, col(line, idx), "\"\"\"", &[PY_END, PY_DOC]);
                inside_doc = false;
            } else {
                push(&mut tokens, line_no, 0, line, &[]);
            }
            continue;
        }

        let trimmed = line.trim_start();
        let indent_len = line.len() - trimmed.len();
        let is_docstring = trimmed.starts_with("\"\"\"") || trimmed.starts_with("r\"\"\"");
        if is_docstring {
            let raw = trimmed.starts_with('r');
            if indent_len > 0 {
                push(&mut tokens, line_no, 0, &line[..indent_len], &[]);
            }
            let mut at = indent_len;
            if raw {
                push(&mut tokens, line_no, col(line, at), "r", &[]);
                at += 1;
            }
            let doc_scope = if raw { PY_RAW_DOC } else { PY_DOC };
            push(&mut tokens, line_no, col(line, at), "\"\"\"", &[PY_BEGIN, doc_scope]);
            at += 3;
            if let Some(close) = line[at..].find("\"\"\"") {
                let close = at + close;
                if close > at {
                    push(&mut tokens, line_no, col(line, at), &line[at..close], &[]);
                }
                push(&mut tokens, line_no, col(line, close), "\"\"\"", &[PY_END, doc_scope]);
                let rest = &line[close + 3..];
                if !rest.is_empty() {
                    push(&mut tokens, line_no, col(line, close + 3), rest, &[]);
                }
            } else {
                let rest = &line[at..];
                if !rest.is_empty() {
                    push(&mut tokens, line_no, col(line, at), rest, &[]);
                }
                inside_doc = true;
            }
        } else if let Some(open) = line.find('"') {
            // An ordinary string literal: punctuation scopes without the
            // docstring qualifier.
            if open > 0 {
                push(&mut tokens, line_no, 0, &line[..open], &[]);
            }
            push(&mut tokens, line_no, col(line, open), "\"", &[PY_BEGIN]);
            let after = open + 1;
            if let Some(close) = line[after..].find('"') {
                let close = after + close;
                if close > after {
                    push(&mut tokens, line_no, col(line, after), &line[after..close], &[]);
                }
                push(&mut tokens, line_no, col(line, close), "\"", &[PY_END]);
                let rest = &line[close + 1..];
                if !rest.is_empty() {
                    push(&mut tokens, line_no, col(line, close + 1), rest, &[]);
                }
            } else {
                push(&mut tokens, line_no, col(line, after), &line[after..], &[]);
            }
        } else {
            push(&mut tokens, line_no, 0, line, &[]);
        }
    }
    tokens
}

/// Builds a documentation block directly from per-line text, for formula
/// scanner tests that do not need the token layer. Lines are placed at the
/// given `first_line` with the given start column on every line.
pub(crate) fn block(kind: DocKind, first_line: u32, start: u32, lines: &[&str]) -> DocBlock {
    DocBlock {
        kind,
        lines: lines
            .iter()
            .enumerate()
            .map(|(i, text)| {
                let line = first_line + i as u32;
                let end = start + text.chars().count() as u32;
                DocLine {
                    span: Span::new(line, start, end),
                    text: text.to_string(),
                }
            })
            .collect(),
    }
}

/// A [`crate::document::SourceText`] view over a block built with
/// [`block`], reconstructing full lines with leading padding so absolute
/// spans resolve correctly.
pub(crate) fn block_source(doc: &DocBlock) -> crate::document::LineIndex {
    let last = doc.lines.last().map(|l| l.span.line).unwrap_or(0);
    let mut lines = vec![String::new(); last as usize + 1];
    for line in &doc.lines {
        let pad = " ".repeat(line.span.start as usize);
        lines[line.span.line as usize] = format!("{pad}{}", line.text);
    }
    crate::document::LineIndex::new(&lines.join("\n"))
}
