//! Rule-based field extractor composing detectors, merger, resolver and normalizer.

use tracing::debug;

use crate::models::block::{Block, Page};
use crate::models::config::ExtractionConfig;
use crate::models::fields::{ExtractedField, FieldSet};

use super::adjacency::merge_split_totals;
use super::normalize::{format_identifier, normalize_date, normalize_total};
use super::resolver::{resolve, resolve_identifier};
use super::rules::{
    Candidate, DateDetector, DigitRunDetector, FormattedIdentifierDetector, IdentifierKind,
    InlineTotalDetector, PatternDetector,
};
use super::{FieldExtractor, Fragment};

/// Candidates gathered for each field before resolution.
#[derive(Debug, Default)]
struct CandidateLists {
    date: Vec<Candidate>,
    total: Vec<Candidate>,
    cpf: Vec<Candidate>,
    cnpj: Vec<Candidate>,
}

/// Rule-based extractor for date, total and CPF/CNPJ.
///
/// Holds no mutable state; one instance can be shared across threads.
#[derive(Debug, Clone, Default)]
pub struct RuleFieldExtractor {
    /// Keep the adjacency merger from crossing page boundaries.
    isolate_pages: bool,
}

impl RuleFieldExtractor {
    /// Create an extractor with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an extractor from configuration.
    pub fn from_config(config: &ExtractionConfig) -> Self {
        Self::new().with_page_isolation(config.isolate_pages)
    }

    /// Set page isolation for the adjacency merger.
    pub fn with_page_isolation(mut self, isolate: bool) -> Self {
        self.isolate_pages = isolate;
        self
    }

    fn collect_candidates(&self, fragments: &[Fragment]) -> CandidateLists {
        let mut lists = CandidateLists::default();
        let cpf = FormattedIdentifierDetector::new(IdentifierKind::Cpf);
        let cnpj = FormattedIdentifierDetector::new(IdentifierKind::Cnpj);

        for fragment in fragments {
            let (text, confidence) = (fragment.text.as_str(), fragment.confidence);
            lists.date.extend(DateDetector.candidates(text, confidence));
            lists.total.extend(InlineTotalDetector.candidates(text, confidence));
            lists.cpf.extend(cpf.candidates(text, confidence));
            lists.cnpj.extend(cnpj.candidates(text, confidence));
        }

        lists
            .total
            .extend(merge_split_totals(fragments, self.isolate_pages));

        let cpf_run = DigitRunDetector::new(IdentifierKind::Cpf);
        let cnpj_run = DigitRunDetector::new(IdentifierKind::Cnpj);
        for fragment in fragments {
            lists.cpf.extend(cpf_run.candidates(&fragment.text, fragment.confidence));
            lists.cnpj.extend(cnpj_run.candidates(&fragment.text, fragment.confidence));
        }

        lists
    }

    fn extract_fragments(&self, fragments: &[Fragment]) -> FieldSet {
        let lists = self.collect_candidates(fragments);

        debug!(
            "Extracting from {} fragments: {} date, {} total, {} CPF, {} CNPJ candidates",
            fragments.len(),
            lists.date.len(),
            lists.total.len(),
            lists.cpf.len(),
            lists.cnpj.len()
        );

        let date = resolve(&lists.date)
            .map(|c| ExtractedField::new(normalize_date(&c.value), c.confidence));
        let total = resolve(&lists.total)
            .map(|c| ExtractedField::new(normalize_total(&c.value), c.confidence));
        let cnpj_cpf = resolve_identifier(&lists.cnpj, &lists.cpf)
            .map(|(kind, c)| ExtractedField::new(format_identifier(kind, &c.value), c.confidence));

        FieldSet {
            date,
            total,
            cnpj_cpf,
        }
    }
}

impl FieldExtractor for RuleFieldExtractor {
    fn extract(&self, blocks: &[Block]) -> FieldSet {
        let fragments: Vec<Fragment> = blocks
            .iter()
            .filter_map(|b| Fragment::from_block(b, 0))
            .collect();

        self.extract_fragments(&fragments)
    }

    fn extract_pages(&self, pages: &[Page]) -> FieldSet {
        let fragments: Vec<Fragment> = pages
            .iter()
            .enumerate()
            .flat_map(|(index, page)| {
                page.blocks
                    .iter()
                    .filter_map(move |b| Fragment::from_block(b, index))
            })
            .collect();

        self.extract_fragments(&fragments)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::block::{Document, Quad};
    use crate::models::fields::FieldName;
    use pretty_assertions::assert_eq;

    const BOX: Quad = [[0.0, 0.0], [90.0, 0.0], [90.0, 20.0], [0.0, 20.0]];

    fn block(text: &str, confidence: f64) -> Block {
        Block::new(BOX, text, confidence).unwrap()
    }

    fn value(fields: &FieldSet, name: FieldName) -> Option<&str> {
        fields.get(name).map(|f| f.value.as_str())
    }

    #[test]
    fn test_empty_input() {
        let fields = RuleFieldExtractor::new().extract(&[]);
        assert_eq!(fields, FieldSet::default());
        assert!(fields.is_empty());
    }

    #[test]
    fn test_split_total() {
        let fields =
            RuleFieldExtractor::new().extract(&[block("TOTAL", 0.95), block("10,00", 0.96)]);
        assert_eq!(value(&fields, FieldName::Total), Some("10,00"));
    }

    #[test]
    fn test_receipt_fields() {
        let blocks = vec![
            block("DATA 12/01/2026", 0.97),
            block("TOTAL", 0.95),
            block("10,00", 0.96),
            block("12345678000195", 0.94),
        ];

        let fields = RuleFieldExtractor::new().extract(&blocks);

        assert_eq!(
            fields,
            FieldSet {
                date: Some(ExtractedField::new("12/01/2026", 0.97)),
                total: Some(ExtractedField::new("10,00", 0.96)),
                cnpj_cpf: Some(ExtractedField::new("12.345.678/0001-95", 0.85)),
            }
        );
    }

    #[test]
    fn test_date_separator_normalized() {
        let fields = RuleFieldExtractor::new().extract(&[block("Emissao 05-03-2025", 0.8)]);
        assert_eq!(value(&fields, FieldName::Date), Some("05/03/2025"));
    }

    #[test]
    fn test_inline_total_strips_spaces() {
        let fields = RuleFieldExtractor::new().extract(&[block("VALOR TOTAL R$ 1 250,00", 0.9)]);
        assert_eq!(value(&fields, FieldName::Total), Some("1250,00"));
    }

    #[test]
    fn test_highest_confidence_total_wins() {
        let blocks = vec![
            block("TOTAL 15,00", 0.7),
            block("Valor pago", 0.6),
            block("20,00", 0.9),
        ];
        let fields = RuleFieldExtractor::new().extract(&blocks);
        assert_eq!(value(&fields, FieldName::Total), Some("20,00"));
        assert_eq!(fields.total.unwrap().confidence, 0.9);
    }

    #[test]
    fn test_formatted_cpf_keeps_confidence() {
        let fields = RuleFieldExtractor::new().extract(&[block("CPF 123.456.789-09", 0.93)]);
        let field = fields.cnpj_cpf.unwrap();
        assert_eq!(field.value, "123.456.789-09");
        assert_eq!(field.confidence, 0.93);
    }

    #[test]
    fn test_unformatted_cpf_is_capped() {
        let fields = RuleFieldExtractor::new().extract(&[block("12345678909", 0.99)]);
        let field = fields.cnpj_cpf.unwrap();
        assert_eq!(field.value, "123.456.789-09");
        assert!(field.confidence <= 0.85);
    }

    #[test]
    fn test_cnpj_wins_over_more_confident_cpf() {
        let blocks = vec![
            block("CPF 123.456.789-09", 0.99),
            block("12345678000195", 0.3),
        ];
        let fields = RuleFieldExtractor::new().extract(&blocks);
        assert_eq!(value(&fields, FieldName::CnpjCpf), Some("12.345.678/0001-95"));
    }

    #[test]
    fn test_blank_blocks_do_not_occupy_window_slots() {
        let blocks = vec![
            block("TOTAL", 0.9),
            block("   ", 0.9),
            block("", 0.9),
            block("a", 0.9),
            block("10,00", 0.9),
        ];
        let fields = RuleFieldExtractor::new().extract(&blocks);
        assert_eq!(value(&fields, FieldName::Total), Some("10,00"));
    }

    #[test]
    fn test_offset_three_not_merged() {
        let blocks = vec![
            block("TOTAL", 0.9),
            block("a", 0.9),
            block("b", 0.9),
            block("10,00", 0.9),
        ];
        let fields = RuleFieldExtractor::new().extract(&blocks);
        assert!(fields.total.is_none());
    }

    #[test]
    fn test_low_confidence_is_raised() {
        let fields = RuleFieldExtractor::new().extract(&[block("12/01/2026", 0.05)]);
        assert_eq!(fields.date.unwrap().confidence, 0.2);
    }

    #[test]
    fn test_idempotent() {
        let blocks = vec![
            block("DATA 12/01/2026", 0.97),
            block("TOTAL", 0.95),
            block("10,00", 0.96),
            block("123.456.789-09", 0.91),
        ];
        let extractor = RuleFieldExtractor::new();

        let first = extractor.extract(&blocks);
        let second = extractor.extract(&blocks);
        assert_eq!(first, second);
        assert_eq!(
            serde_json::to_string(&first).unwrap(),
            serde_json::to_string(&second).unwrap()
        );
    }

    #[test]
    fn test_pages_are_flattened_in_order() {
        let pages = vec![
            Page::new(1, vec![block("DATA 12/01/2026", 0.9), block("TOTAL", 0.9)]),
            Page::new(2, vec![block("10,00", 0.9)]),
        ];

        let fields = RuleFieldExtractor::new().extract_pages(&pages);
        assert_eq!(value(&fields, FieldName::Date), Some("12/01/2026"));
        assert_eq!(value(&fields, FieldName::Total), Some("10,00"));
    }

    #[test]
    fn test_page_isolation() {
        let pages = vec![
            Page::new(1, vec![block("TOTAL", 0.9)]),
            Page::new(2, vec![block("10,00", 0.9)]),
        ];

        let isolated = RuleFieldExtractor::new().with_page_isolation(true);
        assert!(isolated.extract_pages(&pages).total.is_none());

        let config = ExtractionConfig { isolate_pages: true };
        assert!(RuleFieldExtractor::from_config(&config).extract_pages(&pages).total.is_none());
    }

    #[test]
    fn test_extract_document() {
        let extractor = RuleFieldExtractor::new();
        let image = Document::Image(vec![block("TOTAL 10,00", 0.99)]);
        let pages = Document::Pages(vec![Page::new(1, vec![block("TOTAL 10,00", 0.99)])]);

        assert_eq!(extractor.extract_document(&image), extractor.extract_document(&pages));
    }

    #[test]
    fn test_free_functions() {
        let blocks = vec![block("TOTAL", 0.95), block("10,00", 0.96)];
        assert_eq!(
            crate::extract_fields(&blocks),
            crate::extract_page_fields(&[Page::new(1, blocks.clone())])
        );
    }
}
