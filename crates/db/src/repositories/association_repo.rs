//! Relationship manager: association rows and cascade deletes.
//!
//! Maintains the `product_components`, `release_components` and
//! `collection_products` join tables. Inserting an existing pair violates a
//! `uq_*` constraint and surfaces as a database error; callers that need
//! idempotency must check first. Cascade deletes run inside a transaction so
//! a failure partway leaves no partial deletion visible.

use sqlx::PgPool;
use tea_core::types::EntityId;

use crate::models::association::{CollectionProduct, ProductComponent, ReleaseComponent};

pub struct AssociationRepo;

impl AssociationRepo {
    // -----------------------------------------------------------------------
    // Link creation
    // -----------------------------------------------------------------------

    /// Insert a product-component association row.
    pub async fn link_product_component(
        pool: &PgPool,
        product_uuid: EntityId,
        component_uuid: EntityId,
        relationship: Option<&str>,
    ) -> Result<ProductComponent, sqlx::Error> {
        sqlx::query_as::<_, ProductComponent>(
            "INSERT INTO product_components (product_uuid, component_uuid, relationship)
             VALUES ($1, $2, $3)
             RETURNING product_uuid, component_uuid, relationship, created_at",
        )
        .bind(product_uuid)
        .bind(component_uuid)
        .bind(relationship)
        .fetch_one(pool)
        .await
    }

    /// Insert a release-component association row.
    pub async fn link_release_component(
        pool: &PgPool,
        release_uuid: EntityId,
        component_uuid: EntityId,
        relationship: Option<&str>,
    ) -> Result<ReleaseComponent, sqlx::Error> {
        sqlx::query_as::<_, ReleaseComponent>(
            "INSERT INTO release_components (release_uuid, component_uuid, relationship)
             VALUES ($1, $2, $3)
             RETURNING release_uuid, component_uuid, relationship, created_at",
        )
        .bind(release_uuid)
        .bind(component_uuid)
        .bind(relationship)
        .fetch_one(pool)
        .await
    }

    /// Insert a collection-product association row.
    pub async fn link_collection_product(
        pool: &PgPool,
        collection_uuid: EntityId,
        product_uuid: EntityId,
    ) -> Result<CollectionProduct, sqlx::Error> {
        sqlx::query_as::<_, CollectionProduct>(
            "INSERT INTO collection_products (collection_uuid, product_uuid)
             VALUES ($1, $2)
             RETURNING collection_uuid, product_uuid, created_at",
        )
        .bind(collection_uuid)
        .bind(product_uuid)
        .fetch_one(pool)
        .await
    }

    // -----------------------------------------------------------------------
    // Projections (ordered by association creation, oldest first)
    // -----------------------------------------------------------------------

    /// Components associated with a product.
    pub async fn components_of_product(
        pool: &PgPool,
        product_uuid: EntityId,
    ) -> Result<Vec<EntityId>, sqlx::Error> {
        sqlx::query_scalar::<_, EntityId>(
            "SELECT component_uuid FROM product_components
             WHERE product_uuid = $1 ORDER BY created_at ASC",
        )
        .bind(product_uuid)
        .fetch_all(pool)
        .await
    }

    /// Releases originated by a component.
    pub async fn releases_of_component(
        pool: &PgPool,
        component_uuid: EntityId,
    ) -> Result<Vec<EntityId>, sqlx::Error> {
        sqlx::query_scalar::<_, EntityId>(
            "SELECT release_uuid FROM release_components
             WHERE component_uuid = $1 ORDER BY created_at ASC",
        )
        .bind(component_uuid)
        .fetch_all(pool)
        .await
    }

    /// Components associated with a release.
    pub async fn components_of_release(
        pool: &PgPool,
        release_uuid: EntityId,
    ) -> Result<Vec<EntityId>, sqlx::Error> {
        sqlx::query_scalar::<_, EntityId>(
            "SELECT component_uuid FROM release_components
             WHERE release_uuid = $1 ORDER BY created_at ASC",
        )
        .bind(release_uuid)
        .fetch_all(pool)
        .await
    }

    /// Products aggregated by a collection.
    pub async fn products_of_collection(
        pool: &PgPool,
        collection_uuid: EntityId,
    ) -> Result<Vec<EntityId>, sqlx::Error> {
        sqlx::query_scalar::<_, EntityId>(
            "SELECT product_uuid FROM collection_products
             WHERE collection_uuid = $1 ORDER BY created_at ASC",
        )
        .bind(collection_uuid)
        .fetch_all(pool)
        .await
    }

    /// Collections referencing a product.
    pub async fn collections_of_product(
        pool: &PgPool,
        product_uuid: EntityId,
    ) -> Result<Vec<EntityId>, sqlx::Error> {
        sqlx::query_scalar::<_, EntityId>(
            "SELECT collection_uuid FROM collection_products
             WHERE product_uuid = $1 ORDER BY created_at ASC",
        )
        .bind(product_uuid)
        .fetch_all(pool)
        .await
    }

    /// The earliest product association for a component, used to resolve
    /// the owning product on release creation. Ordered by association
    /// creation so the answer is deterministic when a component belongs to
    /// several products.
    pub async fn first_product_of_component(
        pool: &PgPool,
        component_uuid: EntityId,
    ) -> Result<Option<EntityId>, sqlx::Error> {
        sqlx::query_scalar::<_, EntityId>(
            "SELECT product_uuid FROM product_components
             WHERE component_uuid = $1 ORDER BY created_at ASC LIMIT 1",
        )
        .bind(component_uuid)
        .fetch_optional(pool)
        .await
    }

    /// Whether a specific product-component pair exists.
    pub async fn product_component_exists(
        pool: &PgPool,
        product_uuid: EntityId,
        component_uuid: EntityId,
    ) -> Result<bool, sqlx::Error> {
        sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS (
                SELECT 1 FROM product_components
                WHERE product_uuid = $1 AND component_uuid = $2)",
        )
        .bind(product_uuid)
        .bind(component_uuid)
        .fetch_one(pool)
        .await
    }

    // -----------------------------------------------------------------------
    // Cascade deletes (single all-or-nothing transactions)
    // -----------------------------------------------------------------------

    /// Delete a product together with everything that references it: its
    /// component associations, its collection associations, its releases and
    /// their component associations, then the product row itself.
    ///
    /// Returns `true` if the product existed.
    pub async fn cascade_delete_product(
        pool: &PgPool,
        product_uuid: EntityId,
    ) -> Result<bool, sqlx::Error> {
        let mut tx = pool.begin().await?;

        sqlx::query(
            "DELETE FROM release_components WHERE release_uuid IN
                (SELECT uuid FROM releases WHERE product_uuid = $1)",
        )
        .bind(product_uuid)
        .execute(&mut *tx)
        .await?;

        sqlx::query("DELETE FROM releases WHERE product_uuid = $1")
            .bind(product_uuid)
            .execute(&mut *tx)
            .await?;

        sqlx::query("DELETE FROM product_components WHERE product_uuid = $1")
            .bind(product_uuid)
            .execute(&mut *tx)
            .await?;

        sqlx::query("DELETE FROM collection_products WHERE product_uuid = $1")
            .bind(product_uuid)
            .execute(&mut *tx)
            .await?;

        let result = sqlx::query("DELETE FROM products WHERE uuid = $1")
            .bind(product_uuid)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;
        tracing::debug!(%product_uuid, existed = result.rows_affected() > 0, "product cascade delete committed");
        Ok(result.rows_affected() > 0)
    }

    /// Delete a component and every association row referencing it, then the
    /// component row. Returns `true` if the component existed.
    pub async fn cascade_delete_component(
        pool: &PgPool,
        component_uuid: EntityId,
    ) -> Result<bool, sqlx::Error> {
        let mut tx = pool.begin().await?;

        sqlx::query("DELETE FROM product_components WHERE component_uuid = $1")
            .bind(component_uuid)
            .execute(&mut *tx)
            .await?;

        sqlx::query("DELETE FROM release_components WHERE component_uuid = $1")
            .bind(component_uuid)
            .execute(&mut *tx)
            .await?;

        let result = sqlx::query("DELETE FROM components WHERE uuid = $1")
            .bind(component_uuid)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;
        tracing::debug!(%component_uuid, existed = result.rows_affected() > 0, "component cascade delete committed");
        Ok(result.rows_affected() > 0)
    }

    /// Delete a release and its component association rows. Returns `true`
    /// if the release existed.
    pub async fn cascade_delete_release(
        pool: &PgPool,
        release_uuid: EntityId,
    ) -> Result<bool, sqlx::Error> {
        let mut tx = pool.begin().await?;

        sqlx::query("DELETE FROM release_components WHERE release_uuid = $1")
            .bind(release_uuid)
            .execute(&mut *tx)
            .await?;

        let result = sqlx::query("DELETE FROM releases WHERE uuid = $1")
            .bind(release_uuid)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;
        tracing::debug!(%release_uuid, existed = result.rows_affected() > 0, "release cascade delete committed");
        Ok(result.rows_affected() > 0)
    }
}
