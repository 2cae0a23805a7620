//! Shared query parameter types for list endpoints.
//!
//! Identifier-typed parameters are accepted as plain strings and validated
//! in the handlers so a malformed value produces a 400 naming the parameter
//! instead of a framework rejection.

use serde::Deserialize;
use tea_core::error::CoreError;
use tea_core::ident::IdType;

/// Query parameters for `GET /product`.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductListParams {
    pub page_offset: Option<i64>,
    pub page_size: Option<i64>,
    pub barcode: Option<String>,
    pub sku: Option<String>,
    pub vendor_uuid: Option<String>,
    pub id_type: Option<String>,
    pub id_value: Option<String>,
}

/// Query parameters for `GET /component` and `GET /release`.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IdentifierListParams {
    pub page_offset: Option<i64>,
    pub page_size: Option<i64>,
    pub id_type: Option<String>,
    pub id_value: Option<String>,
}

/// Query parameters for `GET /collection` (no entity-specific filters).
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageParams {
    pub page_offset: Option<i64>,
    pub page_size: Option<i64>,
}

/// Validate an `idType`/`idValue` filter pair: both present or both absent,
/// and the type must be a known [`IdType`].
pub fn validate_identifier_filter(
    id_type: &Option<String>,
    id_value: &Option<String>,
) -> Result<(), CoreError> {
    match (id_type, id_value) {
        (Some(id_type), Some(_)) => {
            IdType::parse(id_type)?;
            Ok(())
        }
        (None, None) => Ok(()),
        _ => Err(CoreError::Validation(
            "Parameters 'idType' and 'idValue' must be supplied together".to_string(),
        )),
    }
}
