//! Handlers for the `/release` resource.
//!
//! A release is created against the product that owns the given component.
//! The caller may name the product explicitly; otherwise the earliest
//! product association for the component is used, which keeps the choice
//! deterministic when a component belongs to several products.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use serde::{Deserialize, Serialize};
use tea_core::error::CoreError;
use tea_core::ident::{parse_uuid_param, EntityIdentifier};
use tea_core::paging::{clamp_page_offset, clamp_page_size};
use tea_core::required::require;
use tea_core::types::{EntityId, Timestamp};
use tea_db::models::release::{CreateRelease, Release, ReleaseFilter, UpdateRelease};
use tea_db::repositories::{AssociationRepo, ComponentRepo, ReleaseRepo};
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

/// Request body for `POST /release`.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReleaseCreateRequest {
    /// The component this release snapshots. Required.
    pub component_identifier: Option<String>,
    /// Optional explicit product; must be associated with the component.
    pub product_identifier: Option<String>,
    pub version: Option<String>,
    pub release_date: Option<Timestamp>,
    /// Defaults to `"v" + version` when omitted.
    pub tag: Option<String>,
    pub name: Option<String>,
    pub description: Option<String>,
    pub valid_until_date: Option<Timestamp>,
    #[serde(default)]
    pub prerelease: bool,
    #[serde(default)]
    pub draft: bool,
}

/// Request body for `PATCH /release/{uuid}`.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReleasePatchRequest {
    pub tag: Option<String>,
    pub version: Option<String>,
    pub name: Option<String>,
    pub description: Option<String>,
    pub release_date: Option<Timestamp>,
    pub valid_until_date: Option<Timestamp>,
    pub prerelease: Option<bool>,
    pub draft: Option<bool>,
}

/// Wire shape returned by create and patch.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReleaseDetailResponse {
    pub uuid: EntityId,
    pub product_uuid: EntityId,
    pub tag: String,
    pub version: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub release_date: Timestamp,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub valid_until_date: Option<Timestamp>,
    pub prerelease: bool,
    pub draft: bool,
    pub components: Vec<EntityId>,
}

/// Wire shape returned by list and get.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReleaseSummaryResponse {
    pub uuid: EntityId,
    pub version: String,
    pub release_date: Timestamp,
    pub pre_release: bool,
    /// Identifiers of the originating component(s).
    pub identifiers: Vec<EntityIdentifier>,
    /// Collections referencing this release's product.
    pub collection_references: Vec<EntityId>,
}

async fn to_detail(pool: &DbPool, release: Release) -> AppResult<ReleaseDetailResponse> {
    let components = AssociationRepo::components_of_release(pool, release.uuid).await?;
    Ok(ReleaseDetailResponse {
        uuid: release.uuid,
        product_uuid: release.product_uuid,
        tag: release.tag,
        version: release.version,
        name: release.name,
        description: release.description,
        release_date: release.release_date,
        valid_until_date: release.valid_until_date,
        prerelease: release.prerelease,
        draft: release.draft,
        components,
    })
}

async fn to_summary(pool: &DbPool, release: Release) -> AppResult<ReleaseSummaryResponse> {
    let mut identifiers = Vec::new();
    for component_uuid in AssociationRepo::components_of_release(pool, release.uuid).await? {
        if let Some(component) = ComponentRepo::find_by_id(pool, component_uuid).await? {
            identifiers.extend(component.identifiers.0);
        }
    }
    let collection_references =
        AssociationRepo::collections_of_product(pool, release.product_uuid).await?;

    Ok(ReleaseSummaryResponse {
        uuid: release.uuid,
        version: release.version,
        release_date: release.release_date,
        pre_release: release.prerelease,
        identifiers,
        collection_references,
    })
}

fn release_not_found(id: EntityId) -> AppError {
    AppError::Core(CoreError::NotFound {
        entity: "Release",
        id,
    })
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// POST /release
pub async fn create(
    State(state): State<AppState>,
    org: AuthOrg,
    AppJson(input): AppJson<ReleaseCreateRequest>,
) -> AppResult<(StatusCode, Json<ReleaseDetailResponse>)> {
    let raw_component = require(input.component_identifier, "componentIdentifier")?;
    let component_uuid = parse_uuid_param("componentIdentifier", &raw_component)?;
    let version = require(input.version, "version")?;
    let release_date = require(input.release_date, "releaseDate")?;

    let component = ComponentRepo::find_by_id(&state.pool, component_uuid)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Component",
            id: component_uuid,
        }))?;
    authorize_org("Component", component.organization_id, org.id)?;

    // Resolve the owning product: explicit when given, otherwise the
    // component's earliest product association.
    let product_uuid = match input.product_identifier {
        Some(raw_product) => {
            let product_uuid = parse_uuid_param("productIdentifier", &raw_product)?;
            let associated = AssociationRepo::product_component_exists(
                &state.pool,
                product_uuid,
                component.uuid,
            )
            .await?;
            if !associated {
                return Err(AppError::Core(CoreError::Validation(format!(
                    "Component {component_uuid} is not associated with product {product_uuid}"
                ))));
            }
            product_uuid
        }
        None => AssociationRepo::first_product_of_component(&state.pool, component.uuid)
            .await?
            .ok_or_else(|| {
                AppError::Core(CoreError::Validation(format!(
                    "Component {component_uuid} is not associated with any product"
                )))
            })?,
    };

    let tag = input.tag.unwrap_or_else(|| format!("v{version}"));
    let create_dto = CreateRelease {
        organization_id: org.id,
        product_uuid,
        tag,
        version,
        name: input.name,
        description: input.description,
        release_date,
        valid_until_date: input.valid_until_date,
        prerelease: input.prerelease,
        draft: input.draft,
    };

    let release =
        ReleaseRepo::create_with_component(&state.pool, &create_dto, component.uuid, None).await?;
    let response = to_detail(&state.pool, release).await?;
    Ok((StatusCode::CREATED, Json(response)))
}

/// GET /release
pub async fn list(
    State(state): State<AppState>,
    org: AuthOrg,
    Query(params): Query<IdentifierListParams>,
) -> AppResult<Json<PagedResponse<ReleaseSummaryResponse>>> {
    validate_identifier_filter(&params.id_type, &params.id_value)?;

    let page_size = clamp_page_size(params.page_size);
    let page_offset = clamp_page_offset(params.page_offset);
    let filter = ReleaseFilter {
        id_type: params.id_type,
        id_value: params.id_value,
    };

    let releases = ReleaseRepo::list(&state.pool, org.id, &filter, page_size, page_offset).await?;
    let total = ReleaseRepo::count(&state.pool, org.id, &filter).await?;

    let mut data = Vec::with_capacity(releases.len());
    for release in releases {
        data.push(to_summary(&state.pool, release).await?);
    }

    let pagination = Pagination::new(total, page_offset, page_size, data.len());
    Ok(Json(PagedResponse { data, pagination }))
}

/// GET /release/{uuid}
pub async fn get_by_id(
    State(state): State<AppState>,
    org: AuthOrg,
    Path(raw_id): Path<String>,
) -> AppResult<Json<ReleaseSummaryResponse>> {
    let id = parse_uuid_param("uuid", &raw_id)?;
    let release = ReleaseRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| release_not_found(id))?;
    authorize_org("Release", release.organization_id, org.id)?;

    Ok(Json(to_summary(&state.pool, release).await?))
}

/// PATCH /release/{uuid}
pub async fn update(
    State(state): State<AppState>,
    org: AuthOrg,
    Path(raw_id): Path<String>,
    AppJson(input): AppJson<ReleasePatchRequest>,
) -> AppResult<Json<ReleaseDetailResponse>> {
    let id = parse_uuid_param("uuid", &raw_id)?;
    let existing = ReleaseRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| release_not_found(id))?;
    authorize_org("Release", existing.organization_id, org.id)?;

    let update_dto = UpdateRelease {
        tag: input.tag,
        version: input.version,
        name: input.name,
        description: input.description,
        release_date: input.release_date,
        valid_until_date: input.valid_until_date,
        prerelease: input.prerelease,
        draft: input.draft,
    };

    let release = ReleaseRepo::update(&state.pool, id, &update_dto)
        .await?
        .ok_or_else(|| release_not_found(id))?;
    Ok(Json(to_detail(&state.pool, release).await?))
}

/// DELETE /release/{uuid}
pub async fn delete(
    State(state): State<AppState>,
    org: AuthOrg,
    Path(raw_id): Path<String>,
) -> AppResult<StatusCode> {
    let id = parse_uuid_param("uuid", &raw_id)?;
    let existing = ReleaseRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| release_not_found(id))?;
    authorize_org("Release", existing.organization_id, org.id)?;

    let deleted = AssociationRepo::cascade_delete_release(&state.pool, id).await?;
    if deleted {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(release_not_found(id))
    }
}
