//! Formula placement within its documentation block.
//!
//! A preview rendered over the source may only cover lines the formula
//! fully owns, otherwise it would hide surrounding prose. The locator
//! compares the formula's first and last spans against the block's line
//! spans and narrows the usable line range accordingly.

use crate::ir::{DocBlock, FormulaLocation, FormulaOccurrence, LocatedFormula};

/// Computes which of the formula's spans bound its fully-owned lines.
///
/// With one span the formula is inline and the preview sits on that line.
/// With two spans neither line can be given up without losing the whole
/// formula, so both are kept. Otherwise the first line is ceded when the
/// formula shares it with leading text, the last when it shares it with
/// trailing text.
pub fn locate(formula: &FormulaOccurrence, block: &DocBlock) -> FormulaLocation {
    let n = formula.spans.len();
    let (Some(first), Some(last)) = (formula.spans.first(), formula.spans.last()) else {
        log::warn!("formula without spans");
        return FormulaLocation { start: 0, end: 0 };
    };

    let start_full = block_line(block, first.line).is_some_and(|s| s.start == first.start);
    let end_full = block_line(block, last.line).is_some_and(|s| s.end == last.end);

    match n {
        1 => FormulaLocation { start: 0, end: 0 },
        2 => match (start_full, end_full) {
            // Both-shared deliberately keeps the pair: ceding either line
            // would lose the whole formula.
            (true, true) | (false, false) => FormulaLocation { start: 0, end: 1 },
            (true, false) => FormulaLocation { start: 0, end: 0 },
            (false, true) => FormulaLocation { start: 1, end: 1 },
        },
        _ => FormulaLocation {
            start: usize::from(!start_full),
            end: n - 1 - usize::from(!end_full),
        },
    }
}

fn block_line(block: &DocBlock, line: u32) -> Option<crate::ir::Span> {
    let first = block.lines.first()?.span.line;
    let index = line.checked_sub(first)? as usize;
    block.lines.get(index).map(|l| l.span)
}

/// Pairs a formula with its location and preview sizing data.
pub fn located(formula: FormulaOccurrence, block: &DocBlock) -> LocatedFormula {
    let location = locate(&formula, block);
    // Spanless occurrences degrade the same way locate() does.
    let display_start = formula
        .spans
        .get(location.start)
        .map_or(0, |span| span.line);
    let display_end = formula
        .spans
        .get(location.end)
        .map_or(display_start, |span| span.line);
    LocatedFormula {
        formula,
        location,
        display_start,
        display_end,
        width: block.width(),
    }
}
