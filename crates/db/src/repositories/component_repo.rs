//! Repository for the `components` table.

use sqlx::types::Json;
use sqlx::PgPool;
use tea_core::types::EntityId;

use crate::models::component::{Component, ComponentFilter, CreateComponent, UpdateComponent};

const COLUMNS: &str = "uuid, organization_id, name, component_type, namespace, version, \
    barcode, sku, vendor_uuid, subpath, qualifiers, identifiers, created_at, updated_at";

/// Filter clause shared by `list` and `count`.
const FILTER: &str = "organization_id = $1
    AND ($2::text IS NULL OR identifiers @> jsonb_build_array(
        jsonb_build_object('idType', $2::text, 'idValue', $3::text)))";

/// Provides CRUD operations for components.
pub struct ComponentRepo;

impl ComponentRepo {
    /// Insert a new component and its required product association in one
    /// transaction.
    ///
    /// A component must be associated with at least one product at creation
    /// time; running both writes atomically guarantees a failed association
    /// insert never leaves an unassociated component behind.
    pub async fn create_with_product(
        pool: &PgPool,
        input: &CreateComponent,
        product_uuid: EntityId,
        relationship: Option<&str>,
    ) -> Result<Component, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let query = format!(
            "INSERT INTO components
                (organization_id, name, component_type, namespace, version,
                 barcode, sku, vendor_uuid, subpath, qualifiers, identifiers)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)
             RETURNING {COLUMNS}"
        );
        let component = sqlx::query_as::<_, Component>(&query)
            .bind(input.organization_id)
            .bind(&input.name)
            .bind(&input.component_type)
            .bind(&input.namespace)
            .bind(&input.version)
            .bind(&input.barcode)
            .bind(&input.sku)
            .bind(input.vendor_uuid)
            .bind(&input.subpath)
            .bind(Json(&input.qualifiers))
            .bind(Json(&input.identifiers))
            .fetch_one(&mut *tx)
            .await?;

        sqlx::query(
            "INSERT INTO product_components (product_uuid, component_uuid, relationship)
             VALUES ($1, $2, $3)",
        )
        .bind(product_uuid)
        .bind(component.uuid)
        .bind(relationship)
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;
        Ok(component)
    }

    /// Find a component by its identifier, regardless of organization.
    pub async fn find_by_id(pool: &PgPool, id: EntityId) -> Result<Option<Component>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM components WHERE uuid = $1");
        sqlx::query_as::<_, Component>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List one page of components for an organization, oldest first.
    pub async fn list(
        pool: &PgPool,
        organization_id: EntityId,
        filter: &ComponentFilter,
        page_size: i64,
        page_offset: i64,
    ) -> Result<Vec<Component>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM components WHERE {FILTER}
             ORDER BY created_at ASC
             LIMIT $4 OFFSET $5"
        );
        sqlx::query_as::<_, Component>(&query)
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
        filter: &ComponentFilter,
    ) -> Result<i64, sqlx::Error> {
        let query = format!("SELECT COUNT(*) FROM components WHERE {FILTER}");
        sqlx::query_scalar::<_, i64>(&query)
            .bind(organization_id)
            .bind(&filter.id_type)
            .bind(&filter.id_value)
            .fetch_one(pool)
            .await
    }

    /// Patch a component. Only non-`None` fields are applied.
    pub async fn update(
        pool: &PgPool,
        id: EntityId,
        input: &UpdateComponent,
    ) -> Result<Option<Component>, sqlx::Error> {
        let query = format!(
            "UPDATE components SET
                name = COALESCE($2, name),
                component_type = COALESCE($3, component_type),
                namespace = COALESCE($4, namespace),
                version = COALESCE($5, version),
                barcode = COALESCE($6, barcode),
                sku = COALESCE($7, sku),
                vendor_uuid = COALESCE($8, vendor_uuid),
                subpath = COALESCE($9, subpath),
                qualifiers = COALESCE($10, qualifiers),
                identifiers = COALESCE($11, identifiers),
                updated_at = NOW()
             WHERE uuid = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Component>(&query)
            .bind(id)
            .bind(&input.name)
            .bind(&input.component_type)
            .bind(&input.namespace)
            .bind(&input.version)
            .bind(&input.barcode)
            .bind(&input.sku)
            .bind(input.vendor_uuid)
            .bind(&input.subpath)
            .bind(input.qualifiers.as_ref().map(Json))
            .bind(input.identifiers.as_ref().map(Json))
            .fetch_optional(pool)
            .await
    }

    /// Distinct versions of the releases this component originated,
    /// oldest association first. Backs the component list/get wire shape.
    pub async fn release_versions(
        pool: &PgPool,
        component_uuid: EntityId,
    ) -> Result<Vec<String>, sqlx::Error> {
        sqlx::query_scalar::<_, String>(
            "SELECT DISTINCT ON (r.version) r.version
             FROM release_components rc
             JOIN releases r ON r.uuid = rc.release_uuid
             WHERE rc.component_uuid = $1
             ORDER BY r.version, rc.created_at ASC",
        )
        .bind(component_uuid)
        .fetch_all(pool)
        .await
    }
}
