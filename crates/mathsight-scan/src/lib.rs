//! Extraction of embedded math formulas from source-code documentation.
//!
//! The input is a tokenized document: the token stream an editor-grade
//! tokenizer produces, with syntactic scope names attached. Scanning runs
//! in three stages: documentation blocks are recovered from the token
//! stream (`///` runs, `/** */` blocks, Python docstrings), formula
//! scanners find math markup inside each block (Doxygen commands,
//! Markdown dollars, Sphinx roles and directives), and the locator works
//! out which source lines each formula fully owns so a preview can be
//! placed over them.
//!
//! ```
//! use mathsight_scan::{scan, Language, LineIndex, ScanOptions, Token};
//!
//! let source = "/// The square \\f$ x^2 \\f$ of x.\n";
//! let tokens = vec![
//!     Token::new(0, 0, "///", &["punctuation.definition.comment.documentation.cpp"]),
//!     Token::new(0, 3, " The square \\f$ x^2 \\f$ of x.", &[]),
//! ];
//! let index = LineIndex::new(source);
//! let options = ScanOptions::for_language(Language::Cpp);
//! let formulas = scan(&tokens, Language::Cpp, &index, &options);
//! assert_eq!(formulas.len(), 1);
//! assert_eq!(formulas[0].formula.text, "x^2");
//! ```

pub mod doc;
pub mod document;
pub mod formula;
pub mod ir;
pub mod locate;
pub mod scan;
pub mod token;

#[cfg(test)]
pub(crate) mod testutil;

pub use document::{LineIndex, SourceText};
pub use ir::{
    DocBlock, DocKind, DocLine, FormulaLocation, FormulaOccurrence, LocatedFormula, Notation, Span,
};
pub use scan::{NotationFamily, ScanOptions, scan};
pub use token::{Language, Token};
