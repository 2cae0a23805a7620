//! Repository for the `collections` table.

use sqlx::types::Json;
use sqlx::PgPool;
use tea_core::types::EntityId;

use crate::models::collection::{Collection, CreateCollection, UpdateCollection};

const COLUMNS: &str = "uuid, organization_id, name, description, version, release_uuid, \
    release_date, update_reason, artifacts, lifecycle, created_at, updated_at";

/// Provides CRUD operations for collections.
pub struct CollectionRepo;

impl CollectionRepo {
    /// Insert a new collection with its product associations in one
    /// transaction.
    pub async fn create_for_products(
        pool: &PgPool,
        input: &CreateCollection,
        product_uuids: &[EntityId],
    ) -> Result<Collection, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let query = format!(
            "INSERT INTO collections
                (organization_id, name, description, release_uuid, release_date,
                 update_reason, artifacts, lifecycle)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
             RETURNING {COLUMNS}"
        );
        let collection = sqlx::query_as::<_, Collection>(&query)
            .bind(input.organization_id)
            .bind(&input.name)
            .bind(&input.description)
            .bind(input.release_uuid)
            .bind(input.release_date)
            .bind(Json(&input.update_reason))
            .bind(Json(&input.artifacts))
            .bind(Json(&input.lifecycle))
            .fetch_one(&mut *tx)
            .await?;

        for product_uuid in product_uuids {
            sqlx::query(
                "INSERT INTO collection_products (collection_uuid, product_uuid)
                 VALUES ($1, $2)",
            )
            .bind(collection.uuid)
            .bind(product_uuid)
            .execute(&mut *tx)
            .await?;
        }

        tx.commit().await?;
        Ok(collection)
    }

    /// Find a collection by its identifier, regardless of organization.
    pub async fn find_by_id(
        pool: &PgPool,
        id: EntityId,
    ) -> Result<Option<Collection>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM collections WHERE uuid = $1");
        sqlx::query_as::<_, Collection>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List one page of collections for an organization, oldest first.
    pub async fn list(
        pool: &PgPool,
        organization_id: EntityId,
        page_size: i64,
        page_offset: i64,
    ) -> Result<Vec<Collection>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM collections WHERE organization_id = $1
             ORDER BY created_at ASC
             LIMIT $2 OFFSET $3"
        );
        sqlx::query_as::<_, Collection>(&query)
            .bind(organization_id)
            .bind(page_size)
            .bind(page_offset)
            .fetch_all(pool)
            .await
    }

    /// Full count for an organization.
    pub async fn count(pool: &PgPool, organization_id: EntityId) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM collections WHERE organization_id = $1")
            .bind(organization_id)
            .fetch_one(pool)
            .await
    }

    /// Patch a collection. Only non-`None` fields are applied; the artifact
    /// list is replaced wholesale and the lifecycle value, when present, has
    /// already been resolved by the orchestrator.
    pub async fn update(
        pool: &PgPool,
        id: EntityId,
        input: &UpdateCollection,
    ) -> Result<Option<Collection>, sqlx::Error> {
        let query = format!(
            "UPDATE collections SET
                name = COALESCE($2, name),
                description = COALESCE($3, description),
                update_reason = COALESCE($4, update_reason),
                artifacts = COALESCE($5, artifacts),
                lifecycle = COALESCE($6, lifecycle),
                updated_at = NOW()
             WHERE uuid = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Collection>(&query)
            .bind(id)
            .bind(&input.name)
            .bind(&input.description)
            .bind(input.update_reason.as_ref().map(Json))
            .bind(input.artifacts.as_ref().map(Json))
            .bind(input.lifecycle.as_ref().map(Json))
            .fetch_optional(pool)
            .await
    }

    /// Delete a collection and its product association rows in one
    /// transaction. No cascading into products. Returns `true` if the
    /// collection existed.
    pub async fn delete(pool: &PgPool, id: EntityId) -> Result<bool, sqlx::Error> {
        let mut tx = pool.begin().await?;

        sqlx::query("DELETE FROM collection_products WHERE collection_uuid = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?;

        let result = sqlx::query("DELETE FROM collections WHERE uuid = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(result.rows_affected() > 0)
    }
}
