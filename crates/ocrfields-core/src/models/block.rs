//! Recognized text fragments and the pages that hold them.

use serde::{Deserialize, Serialize};

use crate::error::BlockError;
use crate::recognition::RawBlock;

/// Quadrilateral corner points `(x, y)`, in the winding order of the recognizer.
pub type Quad = [[f32; 2]; 4];

/// One recognized text fragment.
///
/// The confidence invariant (`0.0..=1.0`) is checked on construction and on
/// deserialization, so every `Block` in circulation is valid.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawBlock")]
pub struct Block {
    bbox: Quad,
    text: String,
    confidence: f64,
}

impl Block {
    /// Create a block, rejecting confidence outside of [0.0, 1.0].
    pub fn new(bbox: Quad, text: impl Into<String>, confidence: f64) -> Result<Self, BlockError> {
        if !(0.0..=1.0).contains(&confidence) {
            return Err(BlockError::ConfidenceOutOfRange(confidence));
        }

        Ok(Self {
            bbox,
            text: text.into(),
            confidence,
        })
    }

    /// Corner points of the fragment.
    pub fn bbox(&self) -> &Quad {
        &self.bbox
    }

    /// Recognized text, as produced by the recognizer.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Recognition confidence (0.0 - 1.0).
    pub fn confidence(&self) -> f64 {
        self.confidence
    }

    /// Get the center point of the bounding box.
    pub fn center(&self) -> (f32, f32) {
        let x = self.bbox.iter().map(|p| p[0]).sum::<f32>() / 4.0;
        let y = self.bbox.iter().map(|p| p[1]).sum::<f32>() / 4.0;
        (x, y)
    }

    /// Get the axis-aligned bounding rectangle `(min_x, min_y, max_x, max_y)`.
    pub fn rect(&self) -> (f32, f32, f32, f32) {
        let min_x = self.bbox.iter().map(|p| p[0]).fold(f32::INFINITY, f32::min);
        let max_x = self.bbox.iter().map(|p| p[0]).fold(f32::NEG_INFINITY, f32::max);
        let min_y = self.bbox.iter().map(|p| p[1]).fold(f32::INFINITY, f32::min);
        let max_y = self.bbox.iter().map(|p| p[1]).fold(f32::NEG_INFINITY, f32::max);

        (min_x, min_y, max_x, max_y)
    }
}

impl TryFrom<RawBlock> for Block {
    type Error = BlockError;

    fn try_from(raw: RawBlock) -> Result<Self, Self::Error> {
        Block::new(raw.bbox, raw.text, raw.confidence)
    }
}

/// Height of a reading-order row bucket, in pixels.
const ROW_BUCKET: f32 = 20.0;

/// Sort blocks by reading order (top-to-bottom, left-to-right).
///
/// Blocks whose top edges fall into the same 20px bucket count as one row.
pub fn sort_by_reading_order(blocks: &mut [Block]) {
    blocks.sort_by(|a, b| {
        let (ax, ay, _, _) = a.rect();
        let (bx, by, _, _) = b.rect();

        let row_a = (ay / ROW_BUCKET) as i32;
        let row_b = (by / ROW_BUCKET) as i32;

        if row_a != row_b {
            row_a.cmp(&row_b)
        } else {
            ax.total_cmp(&bx)
        }
    });
}

/// One rasterized page of a multi-page document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Page {
    /// 1-based page number.
    pub number: u32,
    /// Blocks in reading order.
    pub blocks: Vec<Block>,
}

impl Page {
    pub fn new(number: u32, blocks: Vec<Block>) -> Self {
        Self { number, blocks }
    }

    /// Sort this page's blocks by reading order.
    pub fn sort_by_reading_order(&mut self) {
        sort_by_reading_order(&mut self.blocks);
    }
}

/// Recognized content of one upload: a single image or a paged document.
#[derive(Debug, Clone, PartialEq)]
pub enum Document {
    Image(Vec<Block>),
    Pages(Vec<Page>),
}

impl Document {
    /// Total number of blocks across all pages.
    pub fn block_count(&self) -> usize {
        match self {
            Document::Image(blocks) => blocks.len(),
            Document::Pages(pages) => pages.iter().map(|p| p.blocks.len()).sum(),
        }
    }

    /// Number of pages (an image counts as one).
    pub fn page_count(&self) -> usize {
        match self {
            Document::Image(_) => 1,
            Document::Pages(pages) => pages.len(),
        }
    }

    /// Sort blocks by reading order, page by page.
    pub fn sort_by_reading_order(&mut self) {
        match self {
            Document::Image(blocks) => sort_by_reading_order(blocks),
            Document::Pages(pages) => pages.iter_mut().for_each(Page::sort_by_reading_order),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn quad(x: f32, y: f32, w: f32, h: f32) -> Quad {
        [[x, y], [x + w, y], [x + w, y + h], [x, y + h]]
    }

    #[test]
    fn test_block_rejects_out_of_range_confidence() {
        assert_eq!(
            Block::new(quad(0.0, 0.0, 1.0, 1.0), "x", 1.5),
            Err(BlockError::ConfidenceOutOfRange(1.5))
        );
        assert!(Block::new(quad(0.0, 0.0, 1.0, 1.0), "x", -0.01).is_err());
        assert!(Block::new(quad(0.0, 0.0, 1.0, 1.0), "x", f64::NAN).is_err());
    }

    #[test]
    fn test_block_accepts_bounds() {
        assert!(Block::new(quad(0.0, 0.0, 1.0, 1.0), "x", 0.0).is_ok());
        assert!(Block::new(quad(0.0, 0.0, 1.0, 1.0), "x", 1.0).is_ok());
    }

    #[test]
    fn test_block_deserialize_validates() {
        let ok = r#"{"bbox":[[0,0],[1,0],[1,1],[0,1]],"text":"TOTAL","confidence":0.9}"#;
        let block: Block = serde_json::from_str(ok).unwrap();
        assert_eq!(block.text(), "TOTAL");

        let bad = r#"{"bbox":[[0,0],[1,0],[1,1],[0,1]],"text":"TOTAL","confidence":1.2}"#;
        assert!(serde_json::from_str::<Block>(bad).is_err());
    }

    #[test]
    fn test_geometry() {
        let block = Block::new(quad(10.0, 20.0, 100.0, 20.0), "x", 0.5).unwrap();
        assert_eq!(block.center(), (60.0, 30.0));
        assert_eq!(block.rect(), (10.0, 20.0, 110.0, 40.0));
    }

    #[test]
    fn test_sort_by_reading_order() {
        let mut blocks = vec![
            Block::new(quad(95.0, 27.0, 80.0, 20.0), "10,00", 0.9).unwrap(),
            Block::new(quad(0.0, 50.0, 80.0, 20.0), "third", 0.9).unwrap(),
            Block::new(quad(0.0, 25.0, 80.0, 20.0), "TOTAL", 0.9).unwrap(),
            Block::new(quad(0.0, 0.0, 80.0, 20.0), "first", 0.9).unwrap(),
        ];

        sort_by_reading_order(&mut blocks);

        let texts: Vec<&str> = blocks.iter().map(Block::text).collect();
        assert_eq!(texts, vec!["first", "TOTAL", "10,00", "third"]);
    }

    #[test]
    fn test_sort_tolerates_nan_geometry() {
        let mut blocks = vec![
            Block::new(quad(f32::NAN, 0.0, 80.0, 20.0), "nan", 0.9).unwrap(),
            Block::new(quad(100.0, 0.0, 80.0, 20.0), "second", 0.9).unwrap(),
            Block::new(quad(0.0, 0.0, 80.0, 20.0), "first", 0.9).unwrap(),
        ];

        sort_by_reading_order(&mut blocks);

        let texts: Vec<&str> = blocks.iter().map(Block::text).collect();
        assert_eq!(texts, vec!["first", "second", "nan"]);
    }

    #[test]
    fn test_document_counts() {
        let block = Block::new(quad(0.0, 0.0, 1.0, 1.0), "x", 0.5).unwrap();
        let doc = Document::Pages(vec![
            Page::new(1, vec![block.clone(), block.clone()]),
            Page::new(2, vec![block]),
        ]);
        assert_eq!(doc.block_count(), 3);
        assert_eq!(doc.page_count(), 2);
        if let Document::Pages(pages) = &doc {
            assert_eq!(pages[1].number, 2);
        }
        assert_eq!(Document::Image(Vec::new()).page_count(), 1);
    }
}
