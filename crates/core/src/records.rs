//! Flat records handed over by the text/CSV collaborator.
//!
//! Parsing and encoding detection happen upstream. This module only checks
//! the structure of an already-parsed payload, maps header spellings onto
//! the canonical field set and turns records into `Asset` values.

use crate::error::{InventoryError, Result};
use crate::util::fold_text;
use patrimonio_api::Asset;
use serde_json::{Map, Value};
use std::collections::BTreeMap;

/// Canonical field names, as used on the `Asset` wire format.
pub const ASSET_ID_FIELD: &str = "assetId";
const DESCRIPTION_FIELD: &str = "description";
const CATEGORY_FIELD: &str = "category";
const VALUE_FIELD: &str = "value";
const UNIT_FIELD: &str = "uorg";
const GROUP_FIELD: &str = "group";
const SITE_FIELD: &str = "site";

/// Header spellings seen in exported spreadsheets, folded (lowercase, no
/// accents, alphanumerics only).
const HEADER_ALIASES: &[(&str, &str)] = &[
    ("assetid", ASSET_ID_FIELD),
    ("patrimonio", ASSET_ID_FIELD),
    ("numeropatrimonio", ASSET_ID_FIELD),
    ("tombamento", ASSET_ID_FIELD),
    ("tombo", ASSET_ID_FIELD),
    ("plaqueta", ASSET_ID_FIELD),
    ("description", DESCRIPTION_FIELD),
    ("descricao", DESCRIPTION_FIELD),
    ("denominacao", DESCRIPTION_FIELD),
    ("category", CATEGORY_FIELD),
    ("categoria", CATEGORY_FIELD),
    ("classe", CATEGORY_FIELD),
    ("value", VALUE_FIELD),
    ("valor", VALUE_FIELD),
    ("valoraquisicao", VALUE_FIELD),
    ("uorg", UNIT_FIELD),
    ("unidade", UNIT_FIELD),
    ("destinationunit", UNIT_FIELD),
    ("group", GROUP_FIELD),
    ("grupo", GROUP_FIELD),
    ("uorggroup", GROUP_FIELD),
    ("destinationgroup", GROUP_FIELD),
    ("site", SITE_FIELD),
    ("local", SITE_FIELD),
    ("localizacao", SITE_FIELD),
];

/// One flat string-keyed record.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawRecord(pub Map<String, Value>);

impl RawRecord {
    /// Rename known header spellings to their canonical field. When two
    /// headers map to the same field, the first non-empty one in column
    /// order is kept.
    pub fn canonicalize(self) -> Self {
        let mut out = Map::with_capacity(self.0.len());
        for (header, value) in self.0 {
            let name = canonical_field(&header).map_or(header, str::to_string);
            match out.get(&name) {
                Some(existing) if !is_blank(existing) => {}
                _ => {
                    out.insert(name, value);
                }
            }
        }
        Self(out)
    }

    /// The primary key after trimming, if present and non-blank.
    pub fn asset_id(&self) -> Option<String> {
        self.0
            .get(ASSET_ID_FIELD)
            .and_then(scalar_text)
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
    }

    /// Convert into an `Asset`, tolerating missing optional fields.
    pub fn into_asset(self, position: usize) -> Result<Asset> {
        let asset_id = self.asset_id().ok_or_else(|| {
            InventoryError::InvalidImportShape(format!("record {position} has no {ASSET_ID_FIELD}"))
        })?;

        let mut fields = self.0;
        fields.remove(ASSET_ID_FIELD);

        let mut text = |name: &str| -> Result<Option<String>> {
            match fields.remove(name) {
                None | Some(Value::Null) => Ok(None),
                Some(value) => scalar_text(&value).map(Some).ok_or_else(|| {
                    InventoryError::InvalidImportShape(format!(
                        "record {position}: field '{name}' is not a scalar"
                    ))
                }),
            }
        };

        let description = text(DESCRIPTION_FIELD)?;
        let category = text(CATEGORY_FIELD)?;
        let destination_unit = text(UNIT_FIELD)?;
        let destination_group = text(GROUP_FIELD)?;
        let site = text(SITE_FIELD)?;

        let mut extra: BTreeMap<String, Value> = BTreeMap::new();
        let value = match fields.remove(VALUE_FIELD) {
            None | Some(Value::Null) => None,
            Some(Value::Number(n)) => n.as_f64(),
            Some(raw) => {
                let parsed = scalar_text(&raw).and_then(|s| parse_amount(&s));
                if parsed.is_none() {
                    // Keep unreadable amounts instead of failing the import
                    extra.insert("valueText".to_string(), raw);
                }
                parsed
            }
        };

        for (name, value) in fields {
            if value.is_object() || value.is_array() {
                return Err(InventoryError::InvalidImportShape(format!(
                    "record {position}: field '{name}' is not a scalar"
                )));
            }
            extra.insert(name, value);
        }

        Ok(Asset {
            asset_id,
            description,
            category,
            value,
            destination_unit,
            destination_group,
            site,
            extra,
        })
    }
}

/// Check that a payload is an array of flat objects.
pub fn parse_payload(payload: Value) -> Result<Vec<RawRecord>> {
    let Value::Array(items) = payload else {
        return Err(InventoryError::InvalidImportShape(
            "expected a JSON array of records".to_string(),
        ));
    };

    items
        .into_iter()
        .enumerate()
        .map(|(position, item)| match item {
            Value::Object(map) => Ok(RawRecord(map)),
            other => Err(InventoryError::InvalidImportShape(format!(
                "record {position} is {}, expected an object",
                json_kind(&other)
            ))),
        })
        .collect()
}

/// Canonicalize headers and drop records without a usable primary key.
pub fn prepare_records(records: Vec<RawRecord>) -> Vec<RawRecord> {
    let total = records.len();
    let kept: Vec<RawRecord> = records
        .into_iter()
        .map(RawRecord::canonicalize)
        .filter(|r| r.asset_id().is_some())
        .collect();

    let dropped = total - kept.len();
    if dropped > 0 {
        tracing::warn!("Dropped {} record(s) without {}", dropped, ASSET_ID_FIELD);
    }
    kept
}

/// Convert prepared records into assets, rejecting the whole batch on the
/// first malformed record.
pub fn into_assets(records: Vec<RawRecord>) -> Result<Vec<Asset>> {
    records
        .into_iter()
        .enumerate()
        .map(|(position, record)| record.into_asset(position))
        .collect()
}

pub fn canonical_field(header: &str) -> Option<&'static str> {
    let folded: String = fold_text(header)
        .chars()
        .filter(|c| c.is_ascii_alphanumeric())
        .collect();
    HEADER_ALIASES
        .iter()
        .find(|(alias, _)| *alias == folded)
        .map(|(_, field)| *field)
}

fn scalar_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

fn is_blank(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::String(s) => s.trim().is_empty(),
        _ => false,
    }
}

/// Accepts "1234.5", "1234,50" and "1.234,50".
fn parse_amount(raw: &str) -> Option<f64> {
    let cleaned: String = raw
        .trim()
        .trim_start_matches("R$")
        .trim()
        .chars()
        .filter(|c| !c.is_whitespace())
        .collect();
    if cleaned.is_empty() {
        return None;
    }
    let normalized = if cleaned.contains(',') {
        cleaned.replace('.', "").replace(',', ".")
    } else {
        cleaned
    };
    normalized.parse().ok()
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn record(value: Value) -> RawRecord {
        match value {
            Value::Object(map) => RawRecord(map),
            _ => panic!("test record must be an object"),
        }
    }

    #[test]
    fn test_headers_are_canonicalized() {
        let rec = record(json!({
            "Patrimônio": 123,
            "Descrição": "Cadeira",
            "UNIDADE": "FIN",
            "Serial": "X"
        }))
        .canonicalize();
        assert_eq!(rec.asset_id().as_deref(), Some("123"));
        assert_eq!(rec.0.get("description"), Some(&json!("Cadeira")));
        assert_eq!(rec.0.get("uorg"), Some(&json!("FIN")));
        assert_eq!(rec.0.get("Serial"), Some(&json!("X")));
    }

    #[test]
    fn test_first_aliased_column_wins() {
        let rec = record(json!({"tombo": "1", "patrimonio": "2"})).canonicalize();
        assert_eq!(rec.asset_id().as_deref(), Some("1"));

        let rec = record(json!({"tombo": " ", "patrimonio": "2"})).canonicalize();
        assert_eq!(rec.asset_id().as_deref(), Some("2"));
    }

    #[test]
    fn test_prepare_drops_blank_keys() {
        let records = vec![
            record(json!({"assetId": "  "})),
            record(json!({"tombo": "7"})),
            record(json!({"description": "orphan"})),
        ];
        let kept = prepare_records(records);
        assert_eq!(kept.len(), 1);
        assert_eq!(kept[0].asset_id().as_deref(), Some("7"));
    }

    #[test]
    fn test_into_asset_coerces_scalars() {
        let asset = record(json!({
            "assetId": " 55 ",
            "uorg": 12,
            "value": "1.234,50",
            "extraCol": true
        }))
        .into_asset(0)
        .unwrap();
        assert_eq!(asset.asset_id, "55");
        assert_eq!(asset.destination_unit.as_deref(), Some("12"));
        assert_eq!(asset.value, Some(1234.5));
        assert_eq!(asset.extra.get("extraCol"), Some(&json!(true)));
    }

    #[test]
    fn test_unreadable_amount_is_kept_as_text() {
        let asset = record(json!({"assetId": "1", "value": "n/a"}))
            .into_asset(0)
            .unwrap();
        assert_eq!(asset.value, None);
        assert_eq!(asset.extra.get("valueText"), Some(&json!("n/a")));
    }

    #[test]
    fn test_payload_shape_checks() {
        assert!(matches!(
            parse_payload(json!({"assetId": "1"})),
            Err(InventoryError::InvalidImportShape(_))
        ));
        assert!(matches!(
            parse_payload(json!([{"assetId": "1"}, "oops"])),
            Err(InventoryError::InvalidImportShape(_))
        ));
        assert!(matches!(
            into_assets(vec![record(json!({"assetId": "1", "nested": {"a": 1}}))]),
            Err(InventoryError::InvalidImportShape(_))
        ));
        assert_eq!(parse_payload(json!([])).unwrap().len(), 0);
    }
}
