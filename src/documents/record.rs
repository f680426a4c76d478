//! Contract record - the flat key/value data supplied by the form layer.
//!
//! Field names are normalized exactly once, when the record is constructed:
//! keys are trimmed and lower-cased, and every historical alias is renamed to
//! its canonical field. Downstream code only ever sees canonical names.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Historical field aliases and the canonical field they map to.
///
/// When both an alias and its canonical field are present, the canonical
/// value wins. When several aliases map to the same field, the one listed
/// first here wins.
pub const FIELD_ALIASES: &[(&str, &str)] = &[
    ("contract_type", "lease_type"),
    ("rental_type", "lease_type"),
    ("landlord", "landlord_name"),
    ("tenant", "tenant_name"),
    ("rent", "rent_amount"),
    ("utilities", "utilities_amount"),
    ("warm_rent", "utilities_amount"),
    ("deposit", "deposit_amount"),
    ("move_in_date", "start_date"),
    ("begin_date", "start_date"),
    ("move_out_date", "end_date"),
    ("parking_type", "garage_type"),
    ("object_type", "garage_type"),
];

/// A single raw form value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    Bool(bool),
    Integer(i64),
    Float(f64),
    Text(String),
}

impl FieldValue {
    /// Raw display form, before any placeholder or locale handling.
    pub fn to_raw_string(&self) -> String {
        match self {
            Self::Bool(true) => "ja".to_string(),
            Self::Bool(false) => "nein".to_string(),
            Self::Integer(value) => value.to_string(),
            Self::Float(value) => value.to_string(),
            Self::Text(value) => value.clone(),
        }
    }

    /// Interpret the value as a yes/no answer.
    pub fn as_flag(&self) -> Option<bool> {
        match self {
            Self::Bool(value) => Some(*value),
            Self::Integer(1) => Some(true),
            Self::Integer(0) => Some(false),
            Self::Integer(_) | Self::Float(_) => None,
            Self::Text(value) => match value.trim().to_lowercase().as_str() {
                "true" | "ja" | "yes" | "1" | "x" | "on" => Some(true),
                "false" | "nein" | "no" | "0" | "off" => Some(false),
                _ => None,
            },
        }
    }
}

impl From<&str> for FieldValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for FieldValue {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<bool> for FieldValue {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<i64> for FieldValue {
    fn from(value: i64) -> Self {
        Self::Integer(value)
    }
}

impl From<f64> for FieldValue {
    fn from(value: f64) -> Self {
        Self::Float(value)
    }
}

/// Immutable, normalized contract data.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(from = "BTreeMap<String, Option<FieldValue>>")]
pub struct ContractRecord {
    fields: BTreeMap<String, FieldValue>,
}

impl ContractRecord {
    /// Build a record from raw form fields, normalizing keys and aliases.
    pub fn new<I, K>(fields: I) -> Self
    where
        I: IntoIterator<Item = (K, FieldValue)>,
        K: Into<String>,
    {
        let raw: BTreeMap<String, FieldValue> = fields
            .into_iter()
            .map(|(key, value)| (key.into().trim().to_lowercase(), value))
            .filter(|(key, _)| !key.is_empty())
            .collect();

        let mut normalized: BTreeMap<String, FieldValue> = raw
            .iter()
            .filter(|(key, _)| canonical_name(key).is_none())
            .map(|(key, value)| (key.clone(), value.clone()))
            .collect();

        for (alias, canonical) in FIELD_ALIASES {
            let Some(value) = raw.get(*alias) else {
                continue;
            };
            if normalized.contains_key(*canonical) {
                log::warn!(
                    "ignoring field alias '{}' because '{}' is already set",
                    alias,
                    canonical
                );
                continue;
            }
            normalized.insert((*canonical).to_string(), value.clone());
        }

        Self { fields: normalized }
    }

    /// Convenience constructor for text-only records.
    pub fn from_pairs(pairs: &[(&str, &str)]) -> Self {
        Self::new(pairs.iter().map(|(key, value)| (*key, FieldValue::from(*value))))
    }

    pub fn get(&self, field: &str) -> Option<&FieldValue> {
        self.fields.get(field)
    }

    /// Trimmed text of a field, `None` when absent or blank.
    pub fn text(&self, field: &str) -> Option<String> {
        let raw = self.fields.get(field)?.to_raw_string();
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(trimmed.to_string())
        }
    }

    pub fn is_present(&self, field: &str) -> bool {
        self.text(field).is_some()
    }

    pub fn flag(&self, field: &str) -> Option<bool> {
        self.fields.get(field).and_then(FieldValue::as_flag)
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.fields.keys().map(String::as_str)
    }
}

impl From<BTreeMap<String, Option<FieldValue>>> for ContractRecord {
    fn from(raw: BTreeMap<String, Option<FieldValue>>) -> Self {
        Self::new(
            raw.into_iter()
                .filter_map(|(key, value)| value.map(|value| (key, value))),
        )
    }
}

fn canonical_name(alias: &str) -> Option<&'static str> {
    FIELD_ALIASES
        .iter()
        .find(|(candidate, _)| *candidate == alias)
        .map(|(_, canonical)| *canonical)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_alias_is_renamed_to_canonical_field() {
        let record = ContractRecord::from_pairs(&[("contract_type", "unlimited"), ("rent", "450")]);
        assert_eq!(record.text("lease_type").as_deref(), Some("unlimited"));
        assert_eq!(record.text("rent_amount").as_deref(), Some("450"));
        assert!(record.get("contract_type").is_none());
        assert!(record.get("rent").is_none());
    }

    #[test]
    fn test_canonical_field_wins_over_alias() {
        let record =
            ContractRecord::from_pairs(&[("rent", "999"), ("rent_amount", "450")]);
        assert_eq!(record.text("rent_amount").as_deref(), Some("450"));
        assert_eq!(record.len(), 1);
    }

    #[test]
    fn test_keys_are_trimmed_and_lowercased() {
        let record = ContractRecord::from_pairs(&[(" Landlord_Name ", "Max Muster")]);
        assert_eq!(record.text("landlord_name").as_deref(), Some("Max Muster"));
    }

    #[test]
    fn test_blank_text_is_not_present() {
        let record = ContractRecord::from_pairs(&[("tenant_name", "   ")]);
        assert!(!record.is_present("tenant_name"));
        assert!(record.text("tenant_name").is_none());
    }

    #[test]
    fn test_deserialization_drops_nulls_and_keeps_scalars() {
        let json = r#"{
            "landlord_name": "Max Muster",
            "rent_amount": 450,
            "furnished": true,
            "end_date": null
        }"#;

        let record: ContractRecord = serde_json::from_str(json).unwrap();
        assert_eq!(record.len(), 3);
        assert_eq!(record.get("rent_amount"), Some(&FieldValue::Integer(450)));
        assert_eq!(record.flag("furnished"), Some(true));
        assert!(record.get("end_date").is_none());
    }

    #[test]
    fn test_flag_parsing() {
        assert_eq!(FieldValue::from("Ja").as_flag(), Some(true));
        assert_eq!(FieldValue::from("no").as_flag(), Some(false));
        assert_eq!(FieldValue::from("vielleicht").as_flag(), None);
        assert_eq!(FieldValue::Integer(1).as_flag(), Some(true));
    }
}
