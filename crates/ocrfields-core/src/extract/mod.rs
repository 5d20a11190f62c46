//! Field extraction from recognized blocks.

pub mod adjacency;
mod engine;
pub mod normalize;
pub mod resolver;
pub mod rules;

pub use engine::RuleFieldExtractor;

use crate::models::block::{Block, Document, Page};
use crate::models::fields::FieldSet;

use normalize::normalize_spaces;

/// Trait for field extractors.
///
/// Extraction never fails: a field that cannot be found is `None` in the
/// returned [`FieldSet`].
pub trait FieldExtractor {
    /// Extract fields from the blocks of a single image, in reading order.
    fn extract(&self, blocks: &[Block]) -> FieldSet;

    /// Extract fields from a paged document. Pages are read in order, as one
    /// continuous sequence of blocks.
    fn extract_pages(&self, pages: &[Page]) -> FieldSet;

    /// Extract fields from either kind of document.
    fn extract_document(&self, document: &Document) -> FieldSet {
        match document {
            Document::Image(blocks) => self.extract(blocks),
            Document::Pages(pages) => self.extract_pages(pages),
        }
    }
}

/// Extract fields from image blocks with the default extractor.
pub fn extract_fields(blocks: &[Block]) -> FieldSet {
    RuleFieldExtractor::new().extract(blocks)
}

/// Extract fields from document pages with the default extractor.
pub fn extract_page_fields(pages: &[Page]) -> FieldSet {
    RuleFieldExtractor::new().extract_pages(pages)
}

/// Whitespace-normalized, non-empty text of one block.
#[derive(Debug, Clone, PartialEq)]
pub struct Fragment {
    pub text: String,
    pub confidence: f64,
    /// Index of the page the block came from (0 for images).
    pub page: usize,
}

impl Fragment {
    pub fn new(text: impl Into<String>, confidence: f64, page: usize) -> Self {
        Self {
            text: text.into(),
            confidence,
            page,
        }
    }

    /// Normalize a block's text. Blocks with blank text yield `None`.
    pub fn from_block(block: &Block, page: usize) -> Option<Self> {
        let text = normalize_spaces(block.text());
        if text.is_empty() {
            return None;
        }
        Some(Self::new(text, block.confidence(), page))
    }
}
