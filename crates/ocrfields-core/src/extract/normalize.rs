//! Value normalization and formatting.

use rust_decimal::Decimal;
use std::str::FromStr;

use super::rules::IdentifierKind;

/// Collapse runs of whitespace into a single space and trim the ends.
pub fn normalize_spaces(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Round to `decimals` places from the exact binary value of `value`.
///
/// `0.8765` is stored as `0.87649999...` and rounds to `0.876`.
pub fn round_decimals(value: f64, decimals: usize) -> f64 {
    format!("{:.*}", decimals, value).parse().unwrap_or(value)
}

/// Keep only ASCII digits.
pub fn digits_only(text: &str) -> String {
    text.chars().filter(|c| c.is_ascii_digit()).collect()
}

/// Format CPF as `000.000.000-00`.
///
/// Input that does not contain exactly 11 digits is returned unchanged.
pub fn format_cpf(cpf: &str) -> String {
    let digits = digits_only(cpf);

    if digits.len() != 11 {
        return cpf.to_string();
    }

    format!(
        "{}.{}.{}-{}",
        &digits[0..3],
        &digits[3..6],
        &digits[6..9],
        &digits[9..11]
    )
}

/// Format CNPJ as `00.000.000/0000-00`.
///
/// Input that does not contain exactly 14 digits is returned unchanged.
pub fn format_cnpj(cnpj: &str) -> String {
    let digits = digits_only(cnpj);

    if digits.len() != 14 {
        return cnpj.to_string();
    }

    format!(
        "{}.{}.{}/{}-{}",
        &digits[0..2],
        &digits[2..5],
        &digits[5..8],
        &digits[8..12],
        &digits[12..14]
    )
}

/// Format an identifier of the given kind.
pub fn format_identifier(kind: IdentifierKind, value: &str) -> String {
    match kind {
        IdentifierKind::Cpf => format_cpf(value),
        IdentifierKind::Cnpj => format_cnpj(value),
    }
}

/// Rewrite `-` date separators to `/`. Day, month and year are left as written.
pub fn normalize_date(date: &str) -> String {
    date.replace('-', "/")
}

/// Remove whitespace from a total, keeping its separators verbatim.
pub fn normalize_total(total: &str) -> String {
    total.chars().filter(|c| !c.is_whitespace()).collect()
}

/// Parse a total (e.g. "1.234,56", "1234,56" or "1234.56") into a decimal.
///
/// When both separators appear, whichever comes last is the decimal one.
pub fn parse_amount(s: &str) -> Option<Decimal> {
    let cleaned: String = s
        .chars()
        .filter(|c| c.is_ascii_digit() || *c == ',' || *c == '.')
        .collect();

    let normalized = match (cleaned.rfind(','), cleaned.rfind('.')) {
        (Some(_), None) => cleaned.replace(',', "."),
        (Some(c), Some(d)) if c > d => cleaned.replace('.', "").replace(',', "."),
        (Some(_), Some(_)) => cleaned.replace(',', ""),
        _ => cleaned,
    };

    Decimal::from_str(&normalized).ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_spaces() {
        assert_eq!(normalize_spaces("  TOTAL \t  10,00\n"), "TOTAL 10,00");
        assert_eq!(normalize_spaces("   "), "");
    }

    #[test]
    fn test_round_decimals() {
        assert_eq!(round_decimals(0.8765, 3), 0.876);
        assert_eq!(round_decimals(0.87654, 3), 0.877);
        assert_eq!(round_decimals(0.500_05, 4), 0.5);
        assert_eq!(round_decimals(0.99, 3), 0.99);
    }

    #[test]
    fn test_format_cpf() {
        assert_eq!(format_cpf("12345678909"), "123.456.789-09");
        assert_eq!(format_cpf("123.456.789-09"), "123.456.789-09");
        assert_eq!(format_cpf("1234"), "1234");
    }

    #[test]
    fn test_format_cnpj() {
        assert_eq!(format_cnpj("12345678000195"), "12.345.678/0001-95");
        assert_eq!(format_cnpj("12.345.678/0001-95"), "12.345.678/0001-95");
        assert_eq!(format_cnpj("12345678909"), "12345678909");
    }

    #[test]
    fn test_normalize_date() {
        assert_eq!(normalize_date("12-01-2026"), "12/01/2026");
        assert_eq!(normalize_date("1/2/26"), "1/2/26");
    }

    #[test]
    fn test_normalize_total_keeps_separators() {
        assert_eq!(normalize_total("1 234,56"), "1234,56");
        assert_eq!(normalize_total("1.234,56"), "1.234,56");
        assert_eq!(normalize_total("99.90"), "99.90");
    }

    #[test]
    fn test_parse_amount() {
        assert_eq!(parse_amount("10,00"), Some(Decimal::new(1000, 2)));
        assert_eq!(parse_amount("1.234,56"), Some(Decimal::new(123456, 2)));
        assert_eq!(parse_amount("1234.56"), Some(Decimal::new(123456, 2)));
        assert_eq!(parse_amount("1,234.56"), Some(Decimal::new(123456, 2)));
        assert_eq!(parse_amount("R$"), None);
    }
}
