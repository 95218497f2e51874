use crate::ir::Span;

/// Read access to raw source line text, owned by the caller.
///
/// The scanners compute spans from token positions and need to materialize
/// the text underneath; they never hold the document themselves.
pub trait SourceText {
    /// Returns the text under `span`, clamped to the actual line extent.
    /// Out-of-range lines yield an empty string.
    fn get_text(&self, span: Span) -> String;
}

/// A line-indexed snapshot of a document, the default [`SourceText`]
/// implementation.
#[derive(Debug, Clone)]
pub struct LineIndex {
    lines: Vec<String>,
}

impl LineIndex {
    /// Splits `source` into lines. Both `\n` and `\r\n` endings are
    /// accepted; the terminators are not part of any line.
    pub fn new(source: &str) -> Self {
        let lines = source
            .split('\n')
            .map(|line| line.strip_suffix('\r').unwrap_or(line).to_string())
            .collect();
        Self { lines }
    }

    pub fn line_count(&self) -> usize {
        self.lines.len()
    }

    pub fn line(&self, line: u32) -> Option<&str> {
        self.lines.get(line as usize).map(String::as_str)
    }
}

impl SourceText for LineIndex {
    fn get_text(&self, span: Span) -> String {
        let Some(line) = self.lines.get(span.line as usize) else {
            return String::new();
        };
        let len = line.chars().count() as u32;
        let start = span.start.min(len);
        let end = span.end.min(len);
        if end <= start {
            return String::new();
        }
        line.chars()
            .skip(start as usize)
            .take((end - start) as usize)
            .collect()
    }
}
