//! Date detection.

use super::patterns::DATE;
use super::PatternDetector;

/// Finds day/month/year dates separated by `/` or `-`.
///
/// Values are returned as matched; separator normalization happens once a
/// candidate is accepted.
#[derive(Debug, Default, Clone, Copy)]
pub struct DateDetector;

impl PatternDetector for DateDetector {
    fn detect_all(&self, text: &str) -> Vec<String> {
        DATE.find_iter(text).map(|m| m.as_str().to_string()).collect()
    }
}
