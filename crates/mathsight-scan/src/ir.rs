use serde::{Deserialize, Serialize};

/// A character range on a single source line. `start` is inclusive, `end`
/// exclusive, both measured in characters from the start of the line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Span {
    pub line: u32,
    pub start: u32,
    pub end: u32,
}

impl Span {
    pub fn new(line: u32, start: u32, end: u32) -> Self {
        Self { line, start, end }
    }

    pub fn len(&self) -> u32 {
        self.end.saturating_sub(self.start)
    }

    pub fn is_empty(&self) -> bool {
        self.end <= self.start
    }
}

/// One line's contribution to a documentation block: its span in the source
/// plus the extracted text under that span.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocLine {
    pub span: Span,
    pub text: String,
}

/// How a documentation block is delimited in the source.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "kebab-case")]
pub enum DocKind {
    /// A run of consecutive single-line markers (`///`).
    SingleLineRun,
    /// Explicit begin/end markers (`/** */`, Python `"""` docstrings).
    /// `raw` records raw-string semantics (Python `r"""`), where backslashes
    /// in the source are literal.
    DelimitedBlock { raw: bool },
}

impl DocKind {
    pub fn is_raw(&self) -> bool {
        matches!(self, DocKind::DelimitedBlock { raw: true })
    }
}

/// A maximal contiguous documentation-comment region.
///
/// Invariant: `lines` is non-empty and its spans sit on strictly increasing
/// line numbers (see [`contiguous`]).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocBlock {
    pub kind: DocKind,
    pub lines: Vec<DocLine>,
}

impl DocBlock {
    /// Length in characters of the widest line in the block.
    pub fn width(&self) -> u32 {
        self.lines
            .iter()
            .map(|line| line.text.chars().count() as u32)
            .max()
            .unwrap_or(0)
    }
}

/// A math-markup convention recognized by one of the formula scanners.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Notation {
    DoxygenDollar,
    DoxygenParen,
    DoxygenBracket,
    DoxygenBrace,
    MarkdownInline,
    MarkdownBlock,
    SphinxInline,
    SphinxBlock,
}

impl Notation {
    /// The separator used when joining per-line captures of a multi-line
    /// formula. Inline notations never span lines, so their separator is
    /// only ever applied to a single capture.
    pub fn line_separator(&self) -> &'static str {
        match self {
            Notation::DoxygenDollar | Notation::DoxygenParen => "",
            Notation::DoxygenBracket | Notation::DoxygenBrace => "\n",
            Notation::MarkdownInline => "",
            Notation::MarkdownBlock => "\n",
            Notation::SphinxInline => " ",
            Notation::SphinxBlock => "\n",
        }
    }
}

/// One recognized embedded-math occurrence: the physical spans it covers,
/// its notation, and the normalized render-ready LaTeX text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormulaOccurrence {
    pub spans: Vec<Span>,
    pub notation: Notation,
    pub text: String,
}

/// Indices into a formula's span list bounding the lines a preview may
/// collapse without hiding non-formula text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormulaLocation {
    pub start: usize,
    pub end: usize,
}

/// A formula occurrence together with its display-line range and the width
/// of the enclosing documentation block, ready for preview sizing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LocatedFormula {
    pub formula: FormulaOccurrence,
    pub location: FormulaLocation,
    /// First source line the preview may occupy.
    pub display_start: u32,
    /// Last source line the preview may occupy.
    pub display_end: u32,
    /// Widest line of the enclosing block, in characters.
    pub width: u32,
}

impl LocatedFormula {
    /// Number of lines available to the preview.
    pub fn display_lines(&self) -> u32 {
        self.display_end - self.display_start + 1
    }
}

/// Checks the span-list invariant shared by blocks and formulas: non-empty,
/// one span per consecutive line, `start <= end` on every span.
pub fn contiguous(spans: &[Span]) -> bool {
    let Some(first) = spans.first() else {
        return false;
    };
    for (i, span) in spans.iter().enumerate() {
        if span.line != first.line + i as u32 {
            return false;
        }
        if span.start > span.end {
            return false;
        }
    }
    true
}
