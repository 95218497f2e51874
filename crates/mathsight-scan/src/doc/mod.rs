//! Documentation-block scanners.
//!
//! Each scanner folds the token event stream into a list of documentation
//! blocks: maximal runs of single-line doc comments (`///`), delimited
//! block comments (`/** */`), or Python docstrings (`"""`). Blocks carry
//! one span per physical line plus the extracted line text.

pub mod delimited;
pub mod docstring;
pub mod single;

use crate::document::SourceText;
use crate::ir::{DocBlock, DocKind, DocLine, Span};
use crate::token::{Language, Token};

/// Runs the documentation scanners appropriate for `lang` and returns all
/// blocks in document order.
pub fn scan_blocks(tokens: &[Token], lang: Language, src: &impl SourceText) -> Vec<DocBlock> {
    match lang {
        Language::C | Language::Cpp => {
            let mut blocks = single::scan(tokens, lang, src);
            blocks.extend(delimited::scan(tokens, lang, src));
            blocks.sort_by_key(|b| b.lines.first().map(|l| (l.span.line, l.span.start)));
            blocks
        }
        Language::Python => docstring::scan(tokens, src),
    }
}

/// Turns a completed span list into a [`DocBlock`], materializing line text
/// through the caller's [`SourceText`]. Empty span lists produce no block.
pub(crate) fn materialize(kind: DocKind, spans: Vec<Span>, src: &impl SourceText) -> Option<DocBlock> {
    if spans.is_empty() {
        return None;
    }
    let lines = spans
        .into_iter()
        .map(|span| DocLine {
            text: src.get_text(span),
            span,
        })
        .collect();
    Some(DocBlock { kind, lines })
}
