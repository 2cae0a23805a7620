//! Handlers for the `/component` resource.
//!
//! A component must be associated with at least one product at creation
//! time, so `POST /component` requires a `productIdentifier` and writes the
//! component row and the association in one transaction.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use serde::{Deserialize, Serialize};
use tea_core::error::CoreError;
use tea_core::ident::{parse_uuid_param, EntityIdentifier, ProductType};
use tea_core::paging::{clamp_page_offset, clamp_page_size};
use tea_core::required::{require, require_non_empty};
use tea_core::types::{EntityId, QualifierMap};
use tea_db::models::component::{Component, ComponentFilter, CreateComponent, UpdateComponent};
use tea_db::repositories::{AssociationRepo, ComponentRepo, ProductRepo};
use tea_db::scope::authorize_org;
use tea_db::DbPool;

use crate::error::{AppError, AppResult};
use crate::extract::AppJson;
use crate::middleware::auth::AuthOrg;
use crate::query::{validate_identifier_filter, IdentifierListParams};
use crate::response::{PagedResponse, Pagination};
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Request / response types
// ---------------------------------------------------------------------------

/// Request body for `POST /component`.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComponentCreateRequest {
    pub name: Option<String>,
    /// The product this component belongs to. Required.
    pub product_identifier: Option<String>,
    /// Optional relationship label stored on the association row.
    pub relationship: Option<String>,
    #[serde(rename = "type")]
    pub component_type: Option<ProductType>,
    pub namespace: Option<String>,
    pub version: Option<String>,
    pub barcode: Option<String>,
    pub sku: Option<String>,
    pub vendor: Option<EntityId>,
    pub subpath: Option<String>,
    pub qualifiers: Option<Vec<QualifierMap>>,
    pub identifiers: Option<Vec<EntityIdentifier>>,
}

/// Request body for `PATCH /component/{uuid}`.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComponentPatchRequest {
    pub name: Option<String>,
    #[serde(rename = "type")]
    pub component_type: Option<ProductType>,
    pub namespace: Option<String>,
    pub version: Option<String>,
    pub barcode: Option<String>,
    pub sku: Option<String>,
    pub vendor: Option<EntityId>,
    pub subpath: Option<String>,
    pub qualifiers: Option<Vec<QualifierMap>>,
    pub identifiers: Option<Vec<EntityIdentifier>>,
}

/// Wire shape returned by create and patch: the full identifying attributes.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ComponentDetailResponse {
    pub identifier: EntityId,
    pub name: String,
    #[serde(rename = "type")]
    pub component_type: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub namespace: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub barcode: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sku: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub vendor: Option<EntityId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subpath: Option<String>,
    pub qualifiers: Vec<QualifierMap>,
    pub identifiers: Vec<EntityIdentifier>,
}

/// Wire shape returned by list and get: the summary with release projections.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ComponentSummaryResponse {
    pub uuid: EntityId,
    pub name: String,
    pub identifiers: Vec<EntityIdentifier>,
    /// Distinct versions of the releases this component originated.
    pub versions: Vec<String>,
    pub releases: Vec<EntityId>,
}

fn to_detail(component: Component) -> ComponentDetailResponse {
    ComponentDetailResponse {
        identifier: component.uuid,
        name: component.name,
        component_type: component.component_type,
        namespace: component.namespace,
        version: component.version,
        barcode: component.barcode,
        sku: component.sku,
        vendor: component.vendor_uuid,
        subpath: component.subpath,
        qualifiers: component.qualifiers.0,
        identifiers: component.identifiers.0,
    }
}

async fn to_summary(pool: &DbPool, component: Component) -> AppResult<ComponentSummaryResponse> {
    let versions = ComponentRepo::release_versions(pool, component.uuid).await?;
    let releases = AssociationRepo::releases_of_component(pool, component.uuid).await?;
    Ok(ComponentSummaryResponse {
        uuid: component.uuid,
        name: component.name,
        identifiers: component.identifiers.0,
        versions,
        releases,
    })
}

fn component_not_found(id: EntityId) -> AppError {
    AppError::Core(CoreError::NotFound {
        entity: "Component",
        id,
    })
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// POST /component
pub async fn create(
    State(state): State<AppState>,
    org: AuthOrg,
    AppJson(input): AppJson<ComponentCreateRequest>,
) -> AppResult<(StatusCode, Json<ComponentDetailResponse>)> {
    let name = require_non_empty(input.name, "name")?;
    let raw_product = require(input.product_identifier, "productIdentifier")?;
    let product_uuid = parse_uuid_param("productIdentifier", &raw_product)?;

    let product = ProductRepo::find_by_id(&state.pool, product_uuid)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Product",
            id: product_uuid,
        }))?;
    authorize_org("Product", product.organization_id, org.id)?;

    let create_dto = CreateComponent {
        organization_id: org.id,
        name,
        component_type: input
            .component_type
            .unwrap_or_default()
            .as_str()
            .to_string(),
        namespace: input.namespace,
        version: input.version,
        barcode: input.barcode,
        sku: input.sku,
        vendor_uuid: input.vendor,
        subpath: input.subpath,
        qualifiers: input.qualifiers.unwrap_or_default(),
        identifiers: input.identifiers.unwrap_or_default(),
    };

    let component = ComponentRepo::create_with_product(
        &state.pool,
        &create_dto,
        product.uuid,
        input.relationship.as_deref(),
    )
    .await?;
    Ok((StatusCode::CREATED, Json(to_detail(component))))
}

/// GET /component
pub async fn list(
    State(state): State<AppState>,
    org: AuthOrg,
    Query(params): Query<IdentifierListParams>,
) -> AppResult<Json<PagedResponse<ComponentSummaryResponse>>> {
    validate_identifier_filter(&params.id_type, &params.id_value)?;

    let page_size = clamp_page_size(params.page_size);
    let page_offset = clamp_page_offset(params.page_offset);
    let filter = ComponentFilter {
        id_type: params.id_type,
        id_value: params.id_value,
    };

    let components =
        ComponentRepo::list(&state.pool, org.id, &filter, page_size, page_offset).await?;
    let total = ComponentRepo::count(&state.pool, org.id, &filter).await?;

    let mut data = Vec::with_capacity(components.len());
    for component in components {
        data.push(to_summary(&state.pool, component).await?);
    }

    let pagination = Pagination::new(total, page_offset, page_size, data.len());
    Ok(Json(PagedResponse { data, pagination }))
}

/// GET /component/{uuid}
pub async fn get_by_id(
    State(state): State<AppState>,
    org: AuthOrg,
    Path(raw_id): Path<String>,
) -> AppResult<Json<ComponentSummaryResponse>> {
    let id = parse_uuid_param("uuid", &raw_id)?;
    let component = ComponentRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| component_not_found(id))?;
    authorize_org("Component", component.organization_id, org.id)?;

    Ok(Json(to_summary(&state.pool, component).await?))
}

/// PATCH /component/{uuid}
pub async fn update(
    State(state): State<AppState>,
    org: AuthOrg,
    Path(raw_id): Path<String>,
    AppJson(input): AppJson<ComponentPatchRequest>,
) -> AppResult<Json<ComponentDetailResponse>> {
    let id = parse_uuid_param("uuid", &raw_id)?;
    let existing = ComponentRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| component_not_found(id))?;
    authorize_org("Component", existing.organization_id, org.id)?;

    let update_dto = UpdateComponent {
        name: input.name,
        component_type: input.component_type.map(|t| t.as_str().to_string()),
        namespace: input.namespace,
        version: input.version,
        barcode: input.barcode,
        sku: input.sku,
        vendor_uuid: input.vendor,
        subpath: input.subpath,
        qualifiers: input.qualifiers,
        identifiers: input.identifiers,
    };

    let component = ComponentRepo::update(&state.pool, id, &update_dto)
        .await?
        .ok_or_else(|| component_not_found(id))?;
    Ok(Json(to_detail(component)))
}

/// DELETE /component/{uuid}
///
/// Removes every product and release association referencing the component
/// before the component row, atomically.
pub async fn delete(
    State(state): State<AppState>,
    org: AuthOrg,
    Path(raw_id): Path<String>,
) -> AppResult<StatusCode> {
    let id = parse_uuid_param("uuid", &raw_id)?;
    let existing = ComponentRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| component_not_found(id))?;
    authorize_org("Component", existing.organization_id, org.id)?;

    let deleted = AssociationRepo::cascade_delete_component(&state.pool, id).await?;
    if deleted {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(component_not_found(id))
    }
}
