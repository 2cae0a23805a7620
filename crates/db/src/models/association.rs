//! Association (join) row models.
//!
//! Pure join rows: two foreign keys, an optional relationship label, and a
//! creation timestamp. Each pair is unique per table (`uq_*` constraints).

use sqlx::FromRow;
use tea_core::types::{EntityId, Timestamp};

/// A row from `product_components`.
#[derive(Debug, Clone, FromRow)]
pub struct ProductComponent {
    pub product_uuid: EntityId,
    pub component_uuid: EntityId,
    pub relationship: Option<String>,
    pub created_at: Timestamp,
}

/// A row from `release_components`.
#[derive(Debug, Clone, FromRow)]
pub struct ReleaseComponent {
    pub release_uuid: EntityId,
    pub component_uuid: EntityId,
    pub relationship: Option<String>,
    pub created_at: Timestamp,
}

/// A row from `collection_products`.
#[derive(Debug, Clone, FromRow)]
pub struct CollectionProduct {
    pub collection_uuid: EntityId,
    pub product_uuid: EntityId,
    pub created_at: Timestamp,
}
