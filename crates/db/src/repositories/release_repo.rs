//! Repository for the `releases` table.

use sqlx::PgPool;
use tea_core::types::EntityId;

use crate::models::release::{CreateRelease, Release, ReleaseFilter, UpdateRelease};

const COLUMNS: &str = "uuid, organization_id, product_uuid, tag, version, name, description, \
    release_date, valid_until_date, prerelease, draft, created_at, updated_at";

/// Filter clause shared by `list` and `count`. The identifier filter matches
/// releases whose originating component carries the identifier.
const FILTER: &str = "organization_id = $1
    AND ($2::text IS NULL OR EXISTS (
        SELECT 1 FROM release_components rc
        JOIN components c ON c.uuid = rc.component_uuid
        WHERE rc.release_uuid = releases.uuid
          AND c.identifiers @> jsonb_build_array(
              jsonb_build_object('idType', $2::text, 'idValue', $3::text))))";

/// Provides CRUD operations for releases.
pub struct ReleaseRepo;

impl ReleaseRepo {
    /// Insert a new release and its originating-component association in one
    /// transaction.
    ///
    /// The release row and its `release_components` row are created
    /// atomically so a release never exists without its component link.
    pub async fn create_with_component(
        pool: &PgPool,
        input: &CreateRelease,
        component_uuid: EntityId,
        relationship: Option<&str>,
    ) -> Result<Release, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let query = format!(
            "INSERT INTO releases
                (organization_id, product_uuid, tag, version, name, description,
                 release_date, valid_until_date, prerelease, draft)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
             RETURNING {COLUMNS}"
        );
        let release = sqlx::query_as::<_, Release>(&query)
            .bind(input.organization_id)
            .bind(input.product_uuid)
            .bind(&input.tag)
            .bind(&input.version)
            .bind(&input.name)
            .bind(&input.description)
            .bind(input.release_date)
            .bind(input.valid_until_date)
            .bind(input.prerelease)
            .bind(input.draft)
            .fetch_one(&mut *tx)
            .await?;

        sqlx::query(
            "INSERT INTO release_components (release_uuid, component_uuid, relationship)
             VALUES ($1, $2, $3)",
        )
        .bind(release.uuid)
        .bind(component_uuid)
        .bind(relationship)
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;
        Ok(release)
    }

    /// Find a release by its identifier, regardless of organization.
    pub async fn find_by_id(pool: &PgPool, id: EntityId) -> Result<Option<Release>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM releases WHERE uuid = $1");
        sqlx::query_as::<_, Release>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List one page of releases for an organization, oldest first.
    pub async fn list(
        pool: &PgPool,
        organization_id: EntityId,
        filter: &ReleaseFilter,
        page_size: i64,
        page_offset: i64,
    ) -> Result<Vec<Release>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM releases WHERE {FILTER}
             ORDER BY created_at ASC
             LIMIT $4 OFFSET $5"
        );
        sqlx::query_as::<_, Release>(&query)
            .bind(organization_id)
            .bind(&filter.id_type)
            .bind(&filter.id_value)
            .bind(page_size)
            .bind(page_offset)
            .fetch_all(pool)
            .await
    }

    /// Full count under the same filter.
    pub async fn count(
        pool: &PgPool,
        organization_id: EntityId,
        filter: &ReleaseFilter,
    ) -> Result<i64, sqlx::Error> {
        let query = format!("SELECT COUNT(*) FROM releases WHERE {FILTER}");
        sqlx::query_scalar::<_, i64>(&query)
            .bind(organization_id)
            .bind(&filter.id_type)
            .bind(&filter.id_value)
            .fetch_one(pool)
            .await
    }

    /// Patch a release. Only non-`None` fields are applied.
    pub async fn update(
        pool: &PgPool,
        id: EntityId,
        input: &UpdateRelease,
    ) -> Result<Option<Release>, sqlx::Error> {
        let query = format!(
            "UPDATE releases SET
                tag = COALESCE($2, tag),
                version = COALESCE($3, version),
                name = COALESCE($4, name),
                description = COALESCE($5, description),
                release_date = COALESCE($6, release_date),
                valid_until_date = COALESCE($7, valid_until_date),
                prerelease = COALESCE($8, prerelease),
                draft = COALESCE($9, draft),
                updated_at = NOW()
             WHERE uuid = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Release>(&query)
            .bind(id)
            .bind(&input.tag)
            .bind(&input.version)
            .bind(&input.name)
            .bind(&input.description)
            .bind(input.release_date)
            .bind(input.valid_until_date)
            .bind(input.prerelease)
            .bind(input.draft)
            .fetch_optional(pool)
            .await
    }
}
