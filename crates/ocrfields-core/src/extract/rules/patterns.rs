//! Common regex patterns for field extraction.
//!
//! Amounts follow the Brazilian convention (`1.234,56`) but plain decimals
//! with either separator (`1234.56`, `1234,56`) are accepted too.

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    // Dates: D/M/Y with 1-2 digit day and month, 2-4 digit year, `/` or `-`
    pub static ref DATE: Regex = Regex::new(
        r"\b([0-3]?[0-9][/-][01]?[0-9][/-][0-9]{2,4})\b"
    ).unwrap();

    // Labeled total, e.g. "TOTAL: R$ 1.234,56" or "Valor total 10,00"
    pub static ref TOTAL_INLINE: Regex = Regex::new(
        r"(?i)\b(?:total|valor\s*(?:total)?|amount)\s*[:\-]?\s*(r\$\s*)?([0-9]{1,3}(?:[.\s][0-9]{3})*,[0-9]{2}|[0-9]+[.,][0-9]{2})\b"
    ).unwrap();

    // Unlabeled amount, only used next to a total keyword
    pub static ref AMOUNT: Regex = Regex::new(
        r"(?i)(r\$\s*)?([0-9]{1,3}(?:[.\s][0-9]{3})*,[0-9]{2}|[0-9]+[.,][0-9]{2})"
    ).unwrap();

    // CPF (individual taxpayer): 000.000.000-00
    pub static ref CPF_FORMATTED: Regex = Regex::new(
        r"\b([0-9]{3}\.[0-9]{3}\.[0-9]{3}-[0-9]{2})\b"
    ).unwrap();

    // CNPJ (organization taxpayer): 00.000.000/0000-00
    pub static ref CNPJ_FORMATTED: Regex = Regex::new(
        r"\b([0-9]{2}\.[0-9]{3}\.[0-9]{3}/[0-9]{4}-[0-9]{2})\b"
    ).unwrap();
}

/// Keywords that mark a fragment as a total label for adjacency merging.
pub const TOTAL_KEYWORDS: [&str; 2] = ["total", "valor"];
