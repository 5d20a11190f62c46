//! Core library for structured field extraction from OCR output.
//!
//! This crate provides:
//! - A validated block model for recognized text fragments
//! - Conversion from raw recognition-engine output (images and paged documents)
//! - Rule-based detectors for dates, totals and CPF/CNPJ identifiers
//! - Adjacency merging, confidence-based resolution and value normalization

pub mod error;
pub mod extract;
pub mod models;
pub mod recognition;

pub use error::{BlockError, OcrFieldsError, Result};
pub use extract::{extract_fields, extract_page_fields, FieldExtractor, RuleFieldExtractor};
pub use models::block::{sort_by_reading_order, Block, Document, Page, Quad};
pub use models::config::OcrFieldsConfig;
pub use models::fields::{ExtractedField, FieldName, FieldSet};
pub use recognition::{ConfidencePolicy, RawBlock, RawPage, RecognitionOutput};
