//! Boundary with the external recognition engine.
//!
//! The engine emits JSON shaped like `{ "engine": ..., "blocks": [...] }` for
//! images and `{ "engine": ..., "pages": [{ "page": 1, "blocks": [...] }] }` for
//! paged documents. Unknown keys (request ids, timings) are ignored.

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::error::{BlockError, OcrFieldsError, Result};
use crate::extract::normalize::round_decimals;
use crate::models::block::{Block, Document, Page, Quad};

/// A block as emitted by the recognizer, before validation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawBlock {
    pub bbox: Quad,
    pub text: String,
    pub confidence: f64,
}

/// A page as emitted by the recognizer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawPage {
    pub page: u32,
    pub blocks: Vec<RawBlock>,
}

/// Full output of one recognition run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RecognitionOutput {
    Pages {
        #[serde(default)]
        engine: Option<String>,
        pages: Vec<RawPage>,
    },
    Image {
        #[serde(default)]
        engine: Option<String>,
        blocks: Vec<RawBlock>,
    },
}

/// What to do with confidence values outside of [0.0, 1.0].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ConfidencePolicy {
    /// Reject the input.
    Strict,
    /// Clamp into range, round to 4 decimals and trim the text.
    #[default]
    Clamp,
}

impl ConfidencePolicy {
    /// Turn a raw block into a validated one.
    pub fn apply(&self, raw: RawBlock) -> std::result::Result<Block, BlockError> {
        match self {
            ConfidencePolicy::Strict => Block::try_from(raw),
            ConfidencePolicy::Clamp => {
                let confidence = repair_confidence(raw.confidence);
                if confidence != raw.confidence {
                    debug!(
                        "Clamped confidence {} to {} for block {:?}",
                        raw.confidence, confidence, raw.text
                    );
                }
                Block::new(raw.bbox, raw.text.trim(), confidence)
            }
        }
    }
}

fn repair_confidence(raw: f64) -> f64 {
    if raw.is_nan() {
        return 0.0;
    }
    round_decimals(raw.clamp(0.0, 1.0), 4)
}

impl RecognitionOutput {
    /// Parse recognition output from JSON text.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Name of the engine that produced this output, if reported.
    pub fn engine(&self) -> Option<&str> {
        match self {
            RecognitionOutput::Pages { engine, .. } | RecognitionOutput::Image { engine, .. } => {
                engine.as_deref()
            }
        }
    }

    /// Validate blocks and page numbering, producing a [`Document`].
    pub fn into_document(self, policy: ConfidencePolicy) -> Result<Document> {
        match self {
            RecognitionOutput::Image { blocks, .. } => {
                let blocks = convert_blocks(blocks, policy)?;
                Ok(Document::Image(blocks))
            }
            RecognitionOutput::Pages { pages, .. } => {
                let mut converted = Vec::with_capacity(pages.len());
                for (index, page) in pages.into_iter().enumerate() {
                    let expected = index as u32 + 1;
                    if page.page != expected {
                        warn!("Page {} found where page {} was expected", page.page, expected);
                        return Err(OcrFieldsError::PageNumbering {
                            expected,
                            found: page.page,
                        });
                    }
                    converted.push(Page::new(page.page, convert_blocks(page.blocks, policy)?));
                }
                Ok(Document::Pages(converted))
            }
        }
    }
}

fn convert_blocks(blocks: Vec<RawBlock>, policy: ConfidencePolicy) -> Result<Vec<Block>> {
    blocks
        .into_iter()
        .map(|raw| policy.apply(raw).map_err(OcrFieldsError::from))
        .collect()
}
