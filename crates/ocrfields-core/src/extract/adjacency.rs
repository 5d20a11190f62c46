//! Recovery of totals whose label and amount were recognized as separate fragments.
//!
//! A right-aligned amount, or a line with wide letter spacing, often comes out
//! of the recognizer as `"TOTAL"` followed by `"10,00"`. For every fragment that
//! mentions a total keyword, the bare amount detector is run over that fragment
//! and the next two. Geometry is never consulted; the fragment sequence is the
//! reading order.

use super::rules::patterns::TOTAL_KEYWORDS;
use super::rules::{AmountDetector, Candidate, PatternDetector};
use super::Fragment;

/// Number of fragments inspected from a keyword fragment (offsets 0, 1, 2).
pub const ADJACENCY_WINDOW: usize = 3;

/// True when the fragment text contains a total keyword (case-insensitive).
pub fn is_total_keyword(text: &str) -> bool {
    let lower = text.to_lowercase();
    TOTAL_KEYWORDS.iter().any(|k| lower.contains(k))
}

/// Produce the extra total candidates found next to total keywords.
///
/// With `isolate_pages`, fragments from another page than the keyword are
/// skipped; the window is not widened to compensate.
pub fn merge_split_totals(fragments: &[Fragment], isolate_pages: bool) -> Vec<Candidate> {
    let mut candidates = Vec::new();

    for (index, keyword) in fragments.iter().enumerate() {
        if !is_total_keyword(&keyword.text) {
            continue;
        }

        for neighbor in fragments.iter().skip(index).take(ADJACENCY_WINDOW) {
            if isolate_pages && neighbor.page != keyword.page {
                continue;
            }
            candidates.extend(AmountDetector.candidates(&neighbor.text, neighbor.confidence));
        }
    }

    candidates
}
