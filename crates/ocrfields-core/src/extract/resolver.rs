//! Candidate resolution.

use super::normalize::round_decimals;
use super::rules::{Candidate, IdentifierKind};

/// Lowest confidence ever exposed for an accepted field.
pub const MIN_FIELD_CONFIDENCE: f64 = 0.2;

/// Highest confidence ever exposed for an accepted field.
pub const MAX_FIELD_CONFIDENCE: f64 = 0.99;

/// Clamp into [`MIN_FIELD_CONFIDENCE`, `MAX_FIELD_CONFIDENCE`] and round to 3 decimals.
pub fn clamp_confidence(confidence: f64) -> f64 {
    round_decimals(confidence.clamp(MIN_FIELD_CONFIDENCE, MAX_FIELD_CONFIDENCE), 3)
}

/// Pick the highest-confidence candidate; on ties the earliest one wins.
///
/// The returned candidate carries the clamped confidence.
pub fn resolve(candidates: &[Candidate]) -> Option<Candidate> {
    let mut best: Option<&Candidate> = None;

    for candidate in candidates {
        match best {
            Some(current) if candidate.confidence <= current.confidence => {}
            _ => best = Some(candidate),
        }
    }

    best.map(|c| Candidate::new(c.value.clone(), clamp_confidence(c.confidence)))
}

/// Resolve the taxpayer identifier. An accepted CNPJ always beats a CPF,
/// whatever their confidences.
pub fn resolve_identifier(
    cnpj: &[Candidate],
    cpf: &[Candidate],
) -> Option<(IdentifierKind, Candidate)> {
    resolve(cnpj)
        .map(|c| (IdentifierKind::Cnpj, c))
        .or_else(|| resolve(cpf).map(|c| (IdentifierKind::Cpf, c)))
}
