//! Collection entity model and DTOs.

use sqlx::types::Json;
use sqlx::FromRow;
use tea_core::artifact::{Artifact, UpdateReason};
use tea_core::lifecycle::Lifecycle;
use tea_core::types::{EntityId, Timestamp};

/// A collection row from the `collections` table.
///
/// The artifact list, update reason and lifecycle are JSONB columns decoded
/// here at the adapter edge. Exactly one lifecycle value is present at all
/// times.
#[derive(Debug, Clone, FromRow)]
pub struct Collection {
    pub uuid: EntityId,
    pub organization_id: EntityId,
    pub name: String,
    pub description: Option<String>,
    /// Placeholder, always 1. Kept on the wire for compatibility.
    pub version: i32,
    /// The release that spawned this collection (provenance, not a FK).
    pub release_uuid: EntityId,
    pub release_date: Timestamp,
    pub update_reason: Json<UpdateReason>,
    pub artifacts: Json<Vec<Artifact>>,
    pub lifecycle: Json<Lifecycle>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for inserting a new collection. The name, description and initial
/// lifecycle have already been synthesized from the triggering release.
#[derive(Debug, Clone)]
pub struct CreateCollection {
    pub organization_id: EntityId,
    pub name: String,
    pub description: Option<String>,
    pub release_uuid: EntityId,
    pub release_date: Timestamp,
    pub update_reason: UpdateReason,
    pub artifacts: Vec<Artifact>,
    pub lifecycle: Lifecycle,
}

/// DTO for patching a collection.
///
/// `lifecycle` is always resolved by the orchestrator before the store
/// write: either an explicit, table-checked transition or the forced
/// `updated` phase when only the artifact list changed.
#[derive(Debug, Clone, Default)]
pub struct UpdateCollection {
    pub name: Option<String>,
    pub description: Option<String>,
    pub update_reason: Option<UpdateReason>,
    pub artifacts: Option<Vec<Artifact>>,
    pub lifecycle: Option<Lifecycle>,
}
