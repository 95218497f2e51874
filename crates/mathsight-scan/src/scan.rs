//! Top-level scan entry point.

use serde::{Deserialize, Serialize};

use crate::doc;
use crate::document::SourceText;
use crate::formula;
use crate::ir::LocatedFormula;
use crate::locate;
use crate::token::{Language, Token};

/// A family of math-markup conventions handled by one formula scanner.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NotationFamily {
    Doxygen,
    Markdown,
    Sphinx,
}

/// Which notation families to scan for, in priority order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScanOptions {
    pub notations: Vec<NotationFamily>,
}

impl ScanOptions {
    /// The conventional defaults: Doxygen commands for C and C++, Sphinx
    /// markup plus Markdown dollars for Python. Markdown is not enabled for
    /// C/C++ by default because its dollar delimiters collide with the
    /// Doxygen `\f$` form.
    pub fn for_language(lang: Language) -> Self {
        let notations = match lang {
            Language::C | Language::Cpp => vec![NotationFamily::Doxygen],
            Language::Python => vec![NotationFamily::Sphinx, NotationFamily::Markdown],
        };
        Self { notations }
    }
}

/// Scans a tokenized document for math formulas embedded in its
/// documentation comments.
///
/// Blocks are found first, then each enabled formula scanner runs over
/// each block; results arrive grouped by block in document order. The scan
/// never fails: malformed markup is dropped and unexpected token
/// sequences are logged and skipped.
pub fn scan(
    tokens: &[Token],
    lang: Language,
    src: &impl SourceText,
    options: &ScanOptions,
) -> Vec<LocatedFormula> {
    let blocks = doc::scan_blocks(tokens, lang, src);
    log::debug!("found {} documentation blocks", blocks.len());

    let mut found = Vec::new();
    for block in &blocks {
        for family in &options.notations {
            let occurrences = match family {
                NotationFamily::Doxygen => formula::doxygen::scan(block, src),
                NotationFamily::Markdown => formula::markdown::scan(block, src),
                NotationFamily::Sphinx => formula::sphinx::scan(block),
            };
            found.extend(
                occurrences
                    .into_iter()
                    .map(|occurrence| locate::located(occurrence, block)),
            );
        }
    }
    log::debug!("found {} formulas", found.len());
    found
}
