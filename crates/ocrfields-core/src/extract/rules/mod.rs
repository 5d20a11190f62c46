//! Rule-based pattern detectors.

pub mod amounts;
pub mod dates;
pub mod identifiers;
pub mod patterns;

pub use amounts::{AmountDetector, InlineTotalDetector};
pub use dates::DateDetector;
pub use identifiers::{DigitRunDetector, FormattedIdentifierDetector, IdentifierKind};

/// An unresolved guess for one field, carrying the confidence of its source fragment.
#[derive(Debug, Clone, PartialEq)]
pub struct Candidate {
    pub value: String,
    pub confidence: f64,
}

impl Candidate {
    pub fn new(value: impl Into<String>, confidence: f64) -> Self {
        Self {
            value: value.into(),
            confidence,
        }
    }
}

/// Trait for stateless pattern detectors.
pub trait PatternDetector {
    /// Find every matching value in already-normalized text.
    fn detect_all(&self, text: &str) -> Vec<String>;

    /// Upper bound applied to the fragment confidence, if any.
    fn confidence_cap(&self) -> Option<f64> {
        None
    }

    /// Detect values and pair them with the (capped) fragment confidence.
    fn candidates(&self, text: &str, confidence: f64) -> Vec<Candidate> {
        let confidence = match self.confidence_cap() {
            Some(cap) => confidence.min(cap),
            None => confidence,
        };

        self.detect_all(text)
            .into_iter()
            .map(|value| Candidate::new(value, confidence))
            .collect()
    }
}
