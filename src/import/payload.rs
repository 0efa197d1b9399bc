//! Import payload shape and schema validation
//!
//! The structured extraction service promises JSON matching the embedded
//! schema; the payload is still validated here before anything is
//! normalized, so a drifting service fails the import cleanly instead of
//! producing half-usable records.

use rust_embed::Embed;
use serde::Deserialize;
use serde_json::Value;

use crate::import::ImportError;

#[derive(Embed)]
#[folder = "schemas/"]
struct EmbeddedSchemas;

const IMPORT_SCHEMA: &str = "import.schema.json";

/// `{ reports: [...], stock: [...] }` as produced by the service
#[derive(Debug, Clone, Deserialize)]
pub struct ImportPayload {
    pub reports: Vec<ImportedReport>,
    pub stock: Vec<ImportedStock>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImportedReport {
    #[serde(default)]
    pub requester_name: String,
    #[serde(default)]
    pub campus: String,
    #[serde(default)]
    pub import_date: String,
    #[serde(default)]
    pub export_date: String,
    #[serde(default)]
    pub items: Vec<ImportedItem>,
    #[serde(default)]
    pub status: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ImportedItem {
    pub name: String,
    pub quantity: i64,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImportedStock {
    pub name: String,
    pub quantity: i64,
    /// May be absent or the literal placeholder `N/A`
    #[serde(default)]
    pub last_in_date: String,
}

/// Validate a raw value against the import schema and deserialize it
pub fn validate(value: Value) -> Result<ImportPayload, ImportError> {
    let file =
        EmbeddedSchemas::get(IMPORT_SCHEMA).ok_or(ImportError::MissingAsset(IMPORT_SCHEMA))?;
    let schema: Value = serde_json::from_slice(&file.data)
        .map_err(|err| ImportError::Parse(format!("embedded schema is not JSON: {err}")))?;

    let validator = jsonschema::validator_for(&schema)
        .map_err(|err| ImportError::Parse(format!("embedded schema is invalid: {err}")))?;
    if let Err(error) = validator.validate(&value) {
        return Err(ImportError::InvalidPayload(error.to_string()));
    }

    serde_json::from_value(value).map_err(|err| ImportError::Parse(err.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_minimal_valid_payload() {
        let payload = validate(json!({"reports": [], "stock": []})).unwrap();
        assert!(payload.reports.is_empty());
        assert!(payload.stock.is_empty());
    }

    #[test]
    fn test_full_payload_deserializes() {
        let payload = validate(json!({
            "reports": [{
                "requesterName": "Sok Dara",
                "campus": "Campus2",
                "importDate": "2026-01-15",
                "exportDate": "2026-01-16",
                "items": [{"name": "Bk", "quantity": 5}],
                "status": "Process"
            }],
            "stock": [
                {"name": "Bk", "quantity": 20, "lastInDate": "2026-01-10"},
                {"name": "Mouse", "quantity": 9, "lastInDate": "N/A"}
            ]
        }))
        .unwrap();

        assert_eq!(payload.reports[0].items[0].quantity, 5);
        assert_eq!(payload.stock[1].last_in_date, "N/A");
    }

    #[test]
    fn test_missing_top_level_keys_are_rejected() {
        assert!(matches!(
            validate(json!({"reports": []})),
            Err(ImportError::InvalidPayload(_))
        ));
    }

    #[test]
    fn test_wrongly_typed_sections_are_rejected() {
        assert!(matches!(
            validate(json!({"reports": "many", "stock": []})),
            Err(ImportError::InvalidPayload(_))
        ));
        assert!(matches!(
            validate(json!({"reports": [], "stock": [{"name": "Bk"}]})),
            Err(ImportError::InvalidPayload(_))
        ));
    }
}
