//! Handlers for the `/product` resource.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use serde::{Deserialize, Serialize};
use tea_core::error::CoreError;
use tea_core::ident::{parse_uuid_param, EntityIdentifier, ProductType};
use tea_core::paging::{clamp_page_offset, clamp_page_size};
use tea_core::required::require_non_empty;
use tea_core::types::{EntityId, QualifierMap};
use tea_db::models::product::{CreateProduct, Product, ProductFilter, UpdateProduct};
use tea_db::repositories::{AssociationRepo, ProductRepo};
use tea_db::scope::authorize_org;
use tea_db::DbPool;

use crate::error::{AppError, AppResult};
use crate::extract::AppJson;
use crate::middleware::auth::AuthOrg;
use crate::query::{validate_identifier_filter, ProductListParams};
use crate::response::{PagedResponse, Pagination};
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Request / response types
// ---------------------------------------------------------------------------

/// Request body for `POST /product`. Required fields are validated here so a
/// missing one is a 400 naming the field.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductCreateRequest {
    pub name: Option<String>,
    #[serde(rename = "type")]
    pub product_type: Option<ProductType>,
    pub namespace: Option<String>,
    pub version: Option<String>,
    pub barcode: Option<String>,
    pub sku: Option<String>,
    pub vendor_uuid: Option<EntityId>,
    pub subpath: Option<String>,
    pub qualifiers: Option<Vec<QualifierMap>>,
    pub identifiers: Option<Vec<EntityIdentifier>>,
}

/// Request body for `PATCH /product/{uuid}`. Only present fields overwrite;
/// list fields are replaced wholesale.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductPatchRequest {
    pub name: Option<String>,
    #[serde(rename = "type")]
    pub product_type: Option<ProductType>,
    pub namespace: Option<String>,
    pub version: Option<String>,
    pub barcode: Option<String>,
    pub sku: Option<String>,
    pub vendor_uuid: Option<EntityId>,
    pub subpath: Option<String>,
    pub qualifiers: Option<Vec<QualifierMap>>,
    pub identifiers: Option<Vec<EntityIdentifier>>,
}

/// Wire shape for a product.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductResponse {
    pub identifier: EntityId,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub barcode: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sku: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub vendor_uuid: Option<EntityId>,
    pub identifiers: Vec<EntityIdentifier>,
    #[serde(rename = "type")]
    pub product_type: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub namespace: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
    pub qualifiers: Vec<QualifierMap>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subpath: Option<String>,
    pub components: Vec<EntityId>,
}

/// Assemble the wire shape: the row plus its component association
/// projection.
async fn to_response(pool: &DbPool, product: Product) -> AppResult<ProductResponse> {
    let components = AssociationRepo::components_of_product(pool, product.uuid).await?;
    Ok(ProductResponse {
        identifier: product.uuid,
        name: product.name,
        barcode: product.barcode,
        sku: product.sku,
        vendor_uuid: product.vendor_uuid,
        identifiers: product.identifiers.0,
        product_type: product.product_type,
        namespace: product.namespace,
        version: product.version,
        qualifiers: product.qualifiers.0,
        subpath: product.subpath,
        components,
    })
}

fn product_not_found(id: EntityId) -> AppError {
    AppError::Core(CoreError::NotFound {
        entity: "Product",
        id,
    })
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// POST /product
pub async fn create(
    State(state): State<AppState>,
    org: AuthOrg,
    AppJson(input): AppJson<ProductCreateRequest>,
) -> AppResult<(StatusCode, Json<ProductResponse>)> {
    let name = require_non_empty(input.name, "name")?;

    let create_dto = CreateProduct {
        organization_id: org.id,
        name,
        product_type: input.product_type.unwrap_or_default().as_str().to_string(),
        namespace: input.namespace,
        version: input.version,
        barcode: input.barcode,
        sku: input.sku,
        vendor_uuid: input.vendor_uuid,
        subpath: input.subpath,
        qualifiers: input.qualifiers.unwrap_or_default(),
        identifiers: input.identifiers.unwrap_or_default(),
    };

    let product = ProductRepo::create(&state.pool, &create_dto).await?;
    let response = to_response(&state.pool, product).await?;
    Ok((StatusCode::CREATED, Json(response)))
}

/// GET /product
pub async fn list(
    State(state): State<AppState>,
    org: AuthOrg,
    Query(params): Query<ProductListParams>,
) -> AppResult<Json<PagedResponse<ProductResponse>>> {
    validate_identifier_filter(&params.id_type, &params.id_value)?;
    let vendor_uuid = params
        .vendor_uuid
        .as_deref()
        .map(|raw| parse_uuid_param("vendorUuid", raw))
        .transpose()?;

    let page_size = clamp_page_size(params.page_size);
    let page_offset = clamp_page_offset(params.page_offset);
    let filter = ProductFilter {
        barcode: params.barcode,
        sku: params.sku,
        vendor_uuid,
        id_type: params.id_type,
        id_value: params.id_value,
    };

    let products = ProductRepo::list(&state.pool, org.id, &filter, page_size, page_offset).await?;
    let total = ProductRepo::count(&state.pool, org.id, &filter).await?;

    let mut data = Vec::with_capacity(products.len());
    for product in products {
        data.push(to_response(&state.pool, product).await?);
    }

    let pagination = Pagination::new(total, page_offset, page_size, data.len());
    Ok(Json(PagedResponse { data, pagination }))
}

/// GET /product/{uuid}
pub async fn get_by_id(
    State(state): State<AppState>,
    org: AuthOrg,
    Path(raw_id): Path<String>,
) -> AppResult<Json<ProductResponse>> {
    let id = parse_uuid_param("uuid", &raw_id)?;
    let product = ProductRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| product_not_found(id))?;
    authorize_org("Product", product.organization_id, org.id)?;

    Ok(Json(to_response(&state.pool, product).await?))
}

/// PATCH /product/{uuid}
pub async fn update(
    State(state): State<AppState>,
    org: AuthOrg,
    Path(raw_id): Path<String>,
    AppJson(input): AppJson<ProductPatchRequest>,
) -> AppResult<Json<ProductResponse>> {
    let id = parse_uuid_param("uuid", &raw_id)?;
    let existing = ProductRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| product_not_found(id))?;
    authorize_org("Product", existing.organization_id, org.id)?;

    let update_dto = UpdateProduct {
        name: input.name,
        product_type: input.product_type.map(|t| t.as_str().to_string()),
        namespace: input.namespace,
        version: input.version,
        barcode: input.barcode,
        sku: input.sku,
        vendor_uuid: input.vendor_uuid,
        subpath: input.subpath,
        qualifiers: input.qualifiers,
        identifiers: input.identifiers,
    };

    let product = ProductRepo::update(&state.pool, id, &update_dto)
        .await?
        .ok_or_else(|| product_not_found(id))?;
    Ok(Json(to_response(&state.pool, product).await?))
}

/// DELETE /product/{uuid}
///
/// Cascades: the product's component associations, its releases and their
/// component associations, and its collection associations all go in the
/// same transaction as the product row.
pub async fn delete(
    State(state): State<AppState>,
    org: AuthOrg,
    Path(raw_id): Path<String>,
) -> AppResult<StatusCode> {
    let id = parse_uuid_param("uuid", &raw_id)?;
    let existing = ProductRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| product_not_found(id))?;
    authorize_org("Product", existing.organization_id, org.id)?;

    let deleted = AssociationRepo::cascade_delete_product(&state.pool, id).await?;
    if deleted {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(product_not_found(id))
    }
}
