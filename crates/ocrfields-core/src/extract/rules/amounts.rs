//! Monetary amount detection.

use super::patterns::{AMOUNT, TOTAL_INLINE};
use super::PatternDetector;

/// Finds totals written next to their label in the same fragment,
/// e.g. `TOTAL R$ 10,00`.
#[derive(Debug, Default, Clone, Copy)]
pub struct InlineTotalDetector;

impl PatternDetector for InlineTotalDetector {
    fn detect_all(&self, text: &str) -> Vec<String> {
        TOTAL_INLINE
            .captures_iter(text)
            .map(|caps| strip_spaces(&caps[2]))
            .collect()
    }
}

/// Finds amounts without any label.
///
/// Arbitrary numbers would match too easily on their own, so this detector
/// is only run on fragments close to a total keyword.
#[derive(Debug, Default, Clone, Copy)]
pub struct AmountDetector;

impl PatternDetector for AmountDetector {
    fn detect_all(&self, text: &str) -> Vec<String> {
        AMOUNT
            .captures_iter(text)
            .map(|caps| strip_spaces(&caps[2]))
            .collect()
    }
}

fn strip_spaces(amount: &str) -> String {
    amount.chars().filter(|c| !c.is_whitespace()).collect()
}
