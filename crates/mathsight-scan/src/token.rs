use serde::{Deserialize, Serialize};

/// A lexical token produced by an external tokenizer.
///
/// Tokens arrive ordered by document position. `start` is the column of the
/// token's first character on `line`; `scopes` carries the syntactic scope
/// names the tokenizer attached to the token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Token {
    pub line: u32,
    pub start: u32,
    pub text: String,
    #[serde(default)]
    pub scopes: Vec<String>,
}

impl Token {
    pub fn new(line: u32, start: u32, text: impl Into<String>, scopes: &[&str]) -> Self {
        Self {
            line,
            start,
            text: text.into(),
            scopes: scopes.iter().map(|s| s.to_string()).collect(),
        }
    }

    /// Column one past the token's last character. Computed from the text
    /// rather than trusted from the tokenizer, which reports surrogate-based
    /// widths for some punctuation.
    pub fn end(&self) -> u32 {
        self.start.saturating_add(self.text.chars().count() as u32)
    }

    pub fn has_scope(&self, name: &str) -> bool {
        self.scopes.iter().any(|scope| scope == name)
    }
}

/// Source language, selecting which scope names denote documentation
/// markers in the token stream.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    C,
    Cpp,
    Python,
}

impl Language {
    /// Scope marking a single-line documentation comment (`///`).
    pub fn line_marker_scope(&self) -> Option<&'static str> {
        match self {
            Language::C => Some("punctuation.definition.comment.documentation.c"),
            Language::Cpp => Some("punctuation.definition.comment.documentation.cpp"),
            Language::Python => None,
        }
    }

    /// Scope marking the opening of a delimited documentation block.
    pub fn block_begin_scope(&self) -> &'static str {
        match self {
            Language::C => "punctuation.definition.comment.begin.documentation.c",
            Language::Cpp => "punctuation.definition.comment.begin.documentation.cpp",
            Language::Python => "punctuation.definition.string.begin.python",
        }
    }

    /// Scope marking the close of a delimited documentation block.
    pub fn block_end_scope(&self) -> &'static str {
        match self {
            Language::C => "punctuation.definition.comment.end.documentation.c",
            Language::Cpp => "punctuation.definition.comment.end.documentation.cpp",
            Language::Python => "punctuation.definition.string.end.python",
        }
    }
}

/// Python docstring qualifier scopes. The string-begin punctuation scope is
/// shared with every other string literal; only tokens that also carry one
/// of these actually open a docstring.
pub(crate) const DOCSTRING_SCOPES: [&str; 2] = [
    "string.quoted.docstring.multi.python",
    "string.quoted.docstring.single.python",
];
pub(crate) const RAW_DOCSTRING_SCOPES: [&str; 2] = [
    "string.quoted.docstring.raw.multi.python",
    "string.quoted.docstring.raw.single.python",
];

pub(crate) fn is_docstring_begin(token: &Token) -> bool {
    DOCSTRING_SCOPES
        .iter()
        .chain(RAW_DOCSTRING_SCOPES.iter())
        .any(|scope| token.has_scope(scope))
}

pub(crate) fn is_raw_docstring(token: &Token) -> bool {
    !DOCSTRING_SCOPES.iter().any(|scope| token.has_scope(scope))
}

/// A distinguished marker event derived from a token's scope set.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Marker {
    /// Single-line documentation marker (`///`).
    Line,
    /// Delimited-block begin marker (`/**`, `"""`).
    BlockBegin,
    /// Delimited-block end marker (`*/`, `"""`).
    BlockEnd,
}

/// One step of the replayable per-character event stream a scanner folds
/// over. Indices refer back into the token slice so handlers can inspect
/// neighboring tokens (the previous token's end closes a line span).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenEvent {
    /// The token at `index` sits on a new line.
    LineIncrement { index: usize },
    /// The token at `index` carries a configured marker scope. Its
    /// characters are not replayed.
    Marker { kind: Marker, index: usize },
    /// Character `offset` (in chars) of the token at `index`.
    Character { index: usize, offset: usize, ch: char },
    /// Synthetic end-of-stream event after the last token.
    End,
}

/// Replays `tokens` as an ordered event stream into `sink`.
///
/// For each token, in document order: a [`TokenEvent::LineIncrement`] when
/// its line differs from the previous token's, then either a single
/// [`TokenEvent::Marker`] (first matching scope wins, characters skipped) or
/// one [`TokenEvent::Character`] per character, and finally a
/// [`TokenEvent::End`]. Deterministic given identical token input.
pub fn replay<F>(tokens: &[Token], scopes: &[(Marker, &str)], mut sink: F)
where
    F: FnMut(TokenEvent),
{
    let mut line: u32 = 0;
    'tokens: for (index, token) in tokens.iter().enumerate() {
        if token.line != line {
            sink(TokenEvent::LineIncrement { index });
            line = token.line;
        }

        for (kind, scope) in scopes {
            if token.has_scope(scope) {
                sink(TokenEvent::Marker { kind: *kind, index });
                continue 'tokens;
            }
        }

        for (offset, ch) in token.text.chars().enumerate() {
            sink(TokenEvent::Character { index, offset, ch });
        }
    }
    sink(TokenEvent::End);
}
