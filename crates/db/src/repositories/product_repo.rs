//! Repository for the `products` table.

use sqlx::types::Json;
use sqlx::PgPool;
use tea_core::types::EntityId;

use crate::models::product::{CreateProduct, Product, ProductFilter, UpdateProduct};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "uuid, organization_id, name, product_type, namespace, version, \
    barcode, sku, vendor_uuid, subpath, qualifiers, identifiers, created_at, updated_at";

/// Filter clause shared by `list` and `count`. `$1` is the organization,
/// `$2`-`$6` the optional filters.
const FILTER: &str = "organization_id = $1
    AND ($2::text IS NULL OR barcode = $2)
    AND ($3::text IS NULL OR sku = $3)
    AND ($4::uuid IS NULL OR vendor_uuid = $4)
    AND ($5::text IS NULL OR identifiers @> jsonb_build_array(
        jsonb_build_object('idType', $5::text, 'idValue', $6::text)))";

/// Provides CRUD operations for products.
pub struct ProductRepo;

impl ProductRepo {
    /// Insert a new product, returning the created row.
    pub async fn create(pool: &PgPool, input: &CreateProduct) -> Result<Product, sqlx::Error> {
        let query = format!(
            "INSERT INTO products
                (organization_id, name, product_type, namespace, version,
                 barcode, sku, vendor_uuid, subpath, qualifiers, identifiers)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Product>(&query)
            .bind(input.organization_id)
            .bind(&input.name)
            .bind(&input.product_type)
            .bind(&input.namespace)
            .bind(&input.version)
            .bind(&input.barcode)
            .bind(&input.sku)
            .bind(input.vendor_uuid)
            .bind(&input.subpath)
            .bind(Json(&input.qualifiers))
            .bind(Json(&input.identifiers))
            .fetch_one(pool)
            .await
    }

    /// Find a product by its identifier, regardless of organization.
    /// The caller is responsible for the organization scope check.
    pub async fn find_by_id(pool: &PgPool, id: EntityId) -> Result<Option<Product>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM products WHERE uuid = $1");
        sqlx::query_as::<_, Product>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List one page of products for an organization, oldest first.
    pub async fn list(
        pool: &PgPool,
        organization_id: EntityId,
        filter: &ProductFilter,
        page_size: i64,
        page_offset: i64,
    ) -> Result<Vec<Product>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM products WHERE {FILTER}
             ORDER BY created_at ASC
             LIMIT $7 OFFSET $8"
        );
        sqlx::query_as::<_, Product>(&query)
            .bind(organization_id)
            .bind(&filter.barcode)
            .bind(&filter.sku)
            .bind(filter.vendor_uuid)
            .bind(&filter.id_type)
            .bind(&filter.id_value)
            .bind(page_size)
            .bind(page_offset)
            .fetch_all(pool)
            .await
    }

    /// Full count under the same filter, independent of the returned page.
    pub async fn count(
        pool: &PgPool,
        organization_id: EntityId,
        filter: &ProductFilter,
    ) -> Result<i64, sqlx::Error> {
        let query = format!("SELECT COUNT(*) FROM products WHERE {FILTER}");
        sqlx::query_scalar::<_, i64>(&query)
            .bind(organization_id)
            .bind(&filter.barcode)
            .bind(&filter.sku)
            .bind(filter.vendor_uuid)
            .bind(&filter.id_type)
            .bind(&filter.id_value)
            .fetch_one(pool)
            .await
    }

    /// Patch a product. Only non-`None` fields are applied; list fields are
    /// replaced wholesale. Returns `None` if no row exists.
    pub async fn update(
        pool: &PgPool,
        id: EntityId,
        input: &UpdateProduct,
    ) -> Result<Option<Product>, sqlx::Error> {
        let query = format!(
            "UPDATE products SET
                name = COALESCE($2, name),
                product_type = COALESCE($3, product_type),
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
        sqlx::query_as::<_, Product>(&query)
            .bind(id)
            .bind(&input.name)
            .bind(&input.product_type)
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
}
