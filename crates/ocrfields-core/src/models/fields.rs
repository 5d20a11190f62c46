//! Extracted field values.

use std::fmt;
use std::str::FromStr;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::extract::normalize::parse_amount;

/// Accepted value for one field, with its resolved confidence.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExtractedField {
    /// Canonical display value.
    pub value: String,
    /// Resolved confidence, always within [0.2, 0.99].
    pub confidence: f64,
}

impl ExtractedField {
    pub fn new(value: impl Into<String>, confidence: f64) -> Self {
        Self {
            value: value.into(),
            confidence,
        }
    }
}

/// Names of the fields produced by extraction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldName {
    /// Document date.
    Date,
    /// Monetary total.
    Total,
    /// Taxpayer identifier (CNPJ or CPF).
    CnpjCpf,
}

impl FieldName {
    /// All field names, in output order.
    pub const ALL: [FieldName; 3] = [FieldName::Date, FieldName::Total, FieldName::CnpjCpf];

    pub fn as_str(&self) -> &'static str {
        match self {
            FieldName::Date => "date",
            FieldName::Total => "total",
            FieldName::CnpjCpf => "cnpj_cpf",
        }
    }
}

impl fmt::Display for FieldName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FieldName {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "date" => Ok(FieldName::Date),
            "total" => Ok(FieldName::Total),
            "cnpj_cpf" => Ok(FieldName::CnpjCpf),
            other => Err(format!("unknown field: {}", other)),
        }
    }
}

/// Result of one extraction call.
///
/// Every key is serialized, absent fields as `null`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FieldSet {
    pub date: Option<ExtractedField>,
    pub total: Option<ExtractedField>,
    pub cnpj_cpf: Option<ExtractedField>,
}

impl FieldSet {
    /// Look up a field by name.
    pub fn get(&self, name: FieldName) -> Option<&ExtractedField> {
        match name {
            FieldName::Date => self.date.as_ref(),
            FieldName::Total => self.total.as_ref(),
            FieldName::CnpjCpf => self.cnpj_cpf.as_ref(),
        }
    }

    /// Iterate over `(name, value)` pairs in output order.
    pub fn iter(&self) -> impl Iterator<Item = (FieldName, Option<&ExtractedField>)> + '_ {
        FieldName::ALL.into_iter().map(move |name| (name, self.get(name)))
    }

    /// True when no field was found.
    pub fn is_empty(&self) -> bool {
        self.date.is_none() && self.total.is_none() && self.cnpj_cpf.is_none()
    }

    /// Number of fields that were found.
    pub fn found_count(&self) -> usize {
        self.iter().filter(|(_, f)| f.is_some()).count()
    }

    /// Total parsed as a decimal number, if present and parseable.
    pub fn total_amount(&self) -> Option<Decimal> {
        self.total.as_ref().and_then(|f| parse_amount(&f.value))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_empty_field_set_keeps_keys() {
        let json = serde_json::to_value(FieldSet::default()).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"date": null, "total": null, "cnpj_cpf": null})
        );
    }

    #[test]
    fn test_get_by_name() {
        let fields = FieldSet {
            total: Some(ExtractedField::new("10,00", 0.96)),
            ..Default::default()
        };

        assert_eq!(fields.get(FieldName::Total).map(|f| f.value.as_str()), Some("10,00"));
        assert!(fields.get(FieldName::Date).is_none());
        assert_eq!(fields.found_count(), 1);
        assert!(!fields.is_empty());
    }

    #[test]
    fn test_field_name_round_trip() {
        for name in FieldName::ALL {
            assert_eq!(name.as_str().parse::<FieldName>(), Ok(name));
        }
        assert!("amount".parse::<FieldName>().is_err());
    }

    #[test]
    fn test_total_amount() {
        let fields = FieldSet {
            total: Some(ExtractedField::new("1.234,56", 0.9)),
            ..Default::default()
        };
        assert_eq!(fields.total_amount(), Some(Decimal::new(123456, 2)));
    }
}
