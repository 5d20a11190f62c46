//! CPF and CNPJ (Brazilian taxpayer identifier) detection.

use regex::Regex;

use super::patterns::{CNPJ_FORMATTED, CPF_FORMATTED};
use super::PatternDetector;
use crate::extract::normalize::{digits_only, format_identifier};

/// Confidence ceiling for identifiers found as unpunctuated digit runs.
pub const DIGIT_RUN_CONFIDENCE_CAP: f64 = 0.85;

/// Identifier type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum IdentifierKind {
    /// CPF, individual taxpayer (11 digits).
    Cpf,
    /// CNPJ, organization taxpayer (14 digits).
    Cnpj,
}

impl IdentifierKind {
    /// Number of digits in a complete identifier.
    pub fn digit_count(&self) -> usize {
        match self {
            IdentifierKind::Cpf => 11,
            IdentifierKind::Cnpj => 14,
        }
    }

    fn formatted_pattern(&self) -> &'static Regex {
        match self {
            IdentifierKind::Cpf => &*CPF_FORMATTED,
            IdentifierKind::Cnpj => &*CNPJ_FORMATTED,
        }
    }
}

/// Finds identifiers written with their canonical punctuation.
#[derive(Debug, Clone, Copy)]
pub struct FormattedIdentifierDetector {
    kind: IdentifierKind,
}

impl FormattedIdentifierDetector {
    pub fn new(kind: IdentifierKind) -> Self {
        Self { kind }
    }
}

impl PatternDetector for FormattedIdentifierDetector {
    fn detect_all(&self, text: &str) -> Vec<String> {
        self.kind
            .formatted_pattern()
            .find_iter(text)
            .map(|m| m.as_str().to_string())
            .collect()
    }
}

/// Treats a whole fragment as an identifier when its digits alone have the
/// right length, whatever the punctuation around them.
///
/// The evidence is weaker than a punctuated match, so confidence is capped
/// at [`DIGIT_RUN_CONFIDENCE_CAP`].
#[derive(Debug, Clone, Copy)]
pub struct DigitRunDetector {
    kind: IdentifierKind,
}

impl DigitRunDetector {
    pub fn new(kind: IdentifierKind) -> Self {
        Self { kind }
    }
}

impl PatternDetector for DigitRunDetector {
    fn detect_all(&self, text: &str) -> Vec<String> {
        let digits = digits_only(text);
        if digits.len() == self.kind.digit_count() {
            vec![format_identifier(self.kind, &digits)]
        } else {
            Vec::new()
        }
    }

    fn confidence_cap(&self) -> Option<f64> {
        Some(DIGIT_RUN_CONFIDENCE_CAP)
    }
}
