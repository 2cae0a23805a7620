//! Release entity model and DTOs.

use sqlx::FromRow;
use tea_core::types::{EntityId, Timestamp};

/// A release row from the `releases` table.
///
/// A release is tied to exactly one product (denormalized from the
/// originating component's product) and one originating component via a
/// `release_components` association row.
#[derive(Debug, Clone, FromRow)]
pub struct Release {
    pub uuid: EntityId,
    pub organization_id: EntityId,
    pub product_uuid: EntityId,
    pub tag: String,
    pub version: String,
    pub name: Option<String>,
    pub description: Option<String>,
    pub release_date: Timestamp,
    pub valid_until_date: Option<Timestamp>,
    pub prerelease: bool,
    pub draft: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for inserting a new release. `tag` has already been derived
/// (`"v" + version` unless overridden).
#[derive(Debug, Clone)]
pub struct CreateRelease {
    pub organization_id: EntityId,
    pub product_uuid: EntityId,
    pub tag: String,
    pub version: String,
    pub name: Option<String>,
    pub description: Option<String>,
    pub release_date: Timestamp,
    pub valid_until_date: Option<Timestamp>,
    pub prerelease: bool,
    pub draft: bool,
}

/// DTO for patching a release.
#[derive(Debug, Clone, Default)]
pub struct UpdateRelease {
    pub tag: Option<String>,
    pub version: Option<String>,
    pub name: Option<String>,
    pub description: Option<String>,
    pub release_date: Option<Timestamp>,
    pub valid_until_date: Option<Timestamp>,
    pub prerelease: Option<bool>,
    pub draft: Option<bool>,
}

/// Optional filters for release listing.
#[derive(Debug, Clone, Default)]
pub struct ReleaseFilter {
    pub id_type: Option<String>,
    pub id_value: Option<String>,
}
