//! Component entity model and DTOs.

use sqlx::types::Json;
use sqlx::FromRow;
use tea_core::ident::EntityIdentifier;
use tea_core::types::{EntityId, QualifierMap, Timestamp};

/// A component row from the `components` table.
///
/// Carries the same identifying attributes as a product. A component is
/// always associated with at least one product at creation time.
#[derive(Debug, Clone, FromRow)]
pub struct Component {
    pub uuid: EntityId,
    pub organization_id: EntityId,
    pub name: String,
    pub component_type: String,
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

/// DTO for inserting a new component.
#[derive(Debug, Clone)]
pub struct CreateComponent {
    pub organization_id: EntityId,
    pub name: String,
    pub component_type: String,
    pub namespace: Option<String>,
    pub version: Option<String>,
    pub barcode: Option<String>,
    pub sku: Option<String>,
    pub vendor_uuid: Option<EntityId>,
    pub subpath: Option<String>,
    pub qualifiers: Vec<QualifierMap>,
    pub identifiers: Vec<EntityIdentifier>,
}

/// DTO for patching a component. List fields are replaced wholesale.
#[derive(Debug, Clone, Default)]
pub struct UpdateComponent {
    pub name: Option<String>,
    pub component_type: Option<String>,
    pub namespace: Option<String>,
    pub version: Option<String>,
    pub barcode: Option<String>,
    pub sku: Option<String>,
    pub vendor_uuid: Option<EntityId>,
    pub subpath: Option<String>,
    pub qualifiers: Option<Vec<QualifierMap>>,
    pub identifiers: Option<Vec<EntityIdentifier>>,
}

/// Optional filters for component listing.
#[derive(Debug, Clone, Default)]
pub struct ComponentFilter {
    pub id_type: Option<String>,
    pub id_value: Option<String>,
}
