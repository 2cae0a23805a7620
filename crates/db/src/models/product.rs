//! Product entity model and DTOs.

use sqlx::types::Json;
use sqlx::FromRow;
use tea_core::ident::EntityIdentifier;
use tea_core::types::{EntityId, QualifierMap, Timestamp};

/// A product row from the `products` table.
///
/// `qualifiers` and `identifiers` are JSONB columns decoded here, at the
/// store adapter edge. A malformed stored value fails row decode loudly.
#[derive(Debug, Clone, FromRow)]
pub struct Product {
    pub uuid: EntityId,
    pub organization_id: EntityId,
    pub name: String,
    pub product_type: String,
    pub namespace: Option<String>,
    pub version: Option<String>,
    pub barcode: Option<String>,
    pub sku: Option<String>,
    pub vendor_uuid: Option<EntityId>,
    pub subpath: Option<String>,
    pub qualifiers: Json<Vec<QualifierMap>>,
    pub identifiers: Json<Vec<EntityIdentifier>>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for inserting a new product. Validation and defaulting happen in the
/// orchestrator; by this point every field is final.
#[derive(Debug, Clone)]
pub struct CreateProduct {
    pub organization_id: EntityId,
    pub name: String,
    pub product_type: String,
    pub namespace: Option<String>,
    pub version: Option<String>,
    pub barcode: Option<String>,
    pub sku: Option<String>,
    pub vendor_uuid: Option<EntityId>,
    pub subpath: Option<String>,
    pub qualifiers: Vec<QualifierMap>,
    pub identifiers: Vec<EntityIdentifier>,
}

/// DTO for patching a product. Only non-`None` fields are applied; the
/// ordered-list fields are replaced wholesale when present.
#[derive(Debug, Clone, Default)]
pub struct UpdateProduct {
    pub name: Option<String>,
    pub product_type: Option<String>,
    pub namespace: Option<String>,
    pub version: Option<String>,
    pub barcode: Option<String>,
    pub sku: Option<String>,
    pub vendor_uuid: Option<EntityId>,
    pub subpath: Option<String>,
    pub qualifiers: Option<Vec<QualifierMap>>,
    pub identifiers: Option<Vec<EntityIdentifier>>,
}

/// Optional filters for product listing.
#[derive(Debug, Clone, Default)]
pub struct ProductFilter {
    pub barcode: Option<String>,
    pub sku: Option<String>,
    pub vendor_uuid: Option<EntityId>,
    /// Both must be present together; enforced by the handler.
    pub id_type: Option<String>,
    pub id_value: Option<String>,
}
