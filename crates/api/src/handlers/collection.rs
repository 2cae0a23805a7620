//! Handlers for the `/collection` resource.
//!
//! Collections are born from a release and carry the artifact list, the
//! update reason and the lifecycle value. Lifecycle changes go through the
//! transition table in `tea_core::lifecycle`; the one exception is an
//! artifact-only patch, which forces the phase to `updated`.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use serde::{Deserialize, Serialize};
use tea_core::artifact::{Artifact, UpdateReason};
use tea_core::error::CoreError;
use tea_core::ident::parse_uuid_param;
use tea_core::lifecycle::{Lifecycle, LifecyclePhase};
use tea_core::paging::{clamp_page_offset, clamp_page_size};
use tea_core::required::require;
use tea_core::types::{EntityId, Timestamp};
use tea_db::models::collection::{Collection, CreateCollection, UpdateCollection};
use tea_db::repositories::{AssociationRepo, CollectionRepo, ReleaseRepo};
use tea_db::scope::authorize_org;
use tea_db::DbPool;

use crate::error::{AppError, AppResult};
use crate::extract::AppJson;
use crate::middleware::auth::AuthOrg;
use crate::query::PageParams;
use crate::response::{PagedResponse, Pagination};
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Request / response types
// ---------------------------------------------------------------------------

/// Request body for `POST /collection`.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CollectionCreateRequest {
    /// The release this collection snapshots. Required.
    pub release_identifier: Option<String>,
    /// Why the collection exists. Required; the type is a closed enum.
    pub update_reason: Option<UpdateReason>,
    /// Synthesized from the release when omitted.
    pub name: Option<String>,
    pub description: Option<String>,
    #[serde(default)]
    pub artifacts: Vec<Artifact>,
}

/// Lifecycle change requested in a collection patch.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LifecyclePatchRequest {
    pub phase: LifecyclePhase,
    pub description: Option<String>,
}

/// Request body for `PATCH /collection/{uuid}`.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CollectionPatchRequest {
    pub name: Option<String>,
    pub description: Option<String>,
    pub update_reason: Option<UpdateReason>,
    /// Replaces the artifact list wholesale when present.
    pub artifacts: Option<Vec<Artifact>>,
    pub lifecycle: Option<LifecyclePatchRequest>,
}

/// Wire shape for a collection.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CollectionResponse {
    pub uuid: EntityId,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub version: i32,
    pub release_date: Timestamp,
    pub update_reason: UpdateReason,
    pub artifacts: Vec<Artifact>,
    pub lifecycle: Lifecycle,
    pub products: Vec<EntityId>,
}

async fn to_response(pool: &DbPool, collection: Collection) -> AppResult<CollectionResponse> {
    let products = AssociationRepo::products_of_collection(pool, collection.uuid).await?;
    Ok(CollectionResponse {
        uuid: collection.uuid,
        name: collection.name,
        description: collection.description,
        version: collection.version,
        release_date: collection.release_date,
        update_reason: collection.update_reason.0,
        artifacts: collection.artifacts.0,
        lifecycle: collection.lifecycle.0,
        products,
    })
}

fn collection_not_found(id: EntityId) -> AppError {
    AppError::Core(CoreError::NotFound {
        entity: "Collection",
        id,
    })
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// POST /collection
pub async fn create(
    State(state): State<AppState>,
    org: AuthOrg,
    AppJson(input): AppJson<CollectionCreateRequest>,
) -> AppResult<(StatusCode, Json<CollectionResponse>)> {
    let raw_release = require(input.release_identifier, "releaseIdentifier")?;
    let release_uuid = parse_uuid_param("releaseIdentifier", &raw_release)?;
    let update_reason = require(input.update_reason, "updateReason")?;

    let release = ReleaseRepo::find_by_id(&state.pool, release_uuid)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Release",
            id: release_uuid,
        }))?;
    authorize_org("Release", release.organization_id, org.id)?;

    // Name and description fall back to values synthesized from the
    // triggering release when the caller omits them.
    let name = input.name.unwrap_or_else(|| match &release.name {
        Some(release_name) => format!("{} {}", release_name, release.version),
        None => format!("Collection for release {}", release.tag),
    });
    let description = input.description.or_else(|| {
        release
            .description
            .clone()
            .or_else(|| Some(format!("Artifacts for release {}", release.tag)))
    });

    let create_dto = CreateCollection {
        organization_id: org.id,
        name,
        description,
        release_uuid: release.uuid,
        release_date: release.release_date,
        update_reason,
        artifacts: input.artifacts,
        lifecycle: Lifecycle::initial(release.uuid),
    };

    let collection =
        CollectionRepo::create_for_products(&state.pool, &create_dto, &[release.product_uuid])
            .await?;
    let response = to_response(&state.pool, collection).await?;
    Ok((StatusCode::CREATED, Json(response)))
}

/// GET /collection
pub async fn list(
    State(state): State<AppState>,
    org: AuthOrg,
    Query(params): Query<PageParams>,
) -> AppResult<Json<PagedResponse<CollectionResponse>>> {
    let page_size = clamp_page_size(params.page_size);
    let page_offset = clamp_page_offset(params.page_offset);

    let collections = CollectionRepo::list(&state.pool, org.id, page_size, page_offset).await?;
    let total = CollectionRepo::count(&state.pool, org.id).await?;

    let mut data = Vec::with_capacity(collections.len());
    for collection in collections {
        data.push(to_response(&state.pool, collection).await?);
    }

    let pagination = Pagination::new(total, page_offset, page_size, data.len());
    Ok(Json(PagedResponse { data, pagination }))
}

/// GET /collection/{uuid}
pub async fn get_by_id(
    State(state): State<AppState>,
    org: AuthOrg,
    Path(raw_id): Path<String>,
) -> AppResult<Json<CollectionResponse>> {
    let id = parse_uuid_param("uuid", &raw_id)?;
    let collection = CollectionRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| collection_not_found(id))?;
    authorize_org("Collection", collection.organization_id, org.id)?;

    Ok(Json(to_response(&state.pool, collection).await?))
}

/// PATCH /collection/{uuid}
///
/// An explicit `lifecycle` request is checked against the transition table
/// and rejected with 400 when out of table. Without one, a patch that
/// touches the artifact list forces the phase to `updated`.
pub async fn update(
    State(state): State<AppState>,
    org: AuthOrg,
    Path(raw_id): Path<String>,
    AppJson(input): AppJson<CollectionPatchRequest>,
) -> AppResult<Json<CollectionResponse>> {
    let id = parse_uuid_param("uuid", &raw_id)?;
    let existing = CollectionRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| collection_not_found(id))?;
    authorize_org("Collection", existing.organization_id, org.id)?;

    let lifecycle = match &input.lifecycle {
        Some(requested) => Some(
            existing
                .lifecycle
                .0
                .transition(requested.phase, requested.description.clone())?,
        ),
        None if input.artifacts.is_some() => Some(existing.lifecycle.0.artifacts_updated()),
        None => None,
    };

    let update_dto = UpdateCollection {
        name: input.name,
        description: input.description,
        update_reason: input.update_reason,
        artifacts: input.artifacts,
        lifecycle,
    };

    let collection = CollectionRepo::update(&state.pool, id, &update_dto)
        .await?
        .ok_or_else(|| collection_not_found(id))?;
    Ok(Json(to_response(&state.pool, collection).await?))
}

/// DELETE /collection/{uuid}
pub async fn delete(
    State(state): State<AppState>,
    org: AuthOrg,
    Path(raw_id): Path<String>,
) -> AppResult<StatusCode> {
    let id = parse_uuid_param("uuid", &raw_id)?;
    let existing = CollectionRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| collection_not_found(id))?;
    authorize_org("Collection", existing.organization_id, org.id)?;

    let deleted = CollectionRepo::delete(&state.pool, id).await?;
    if deleted {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(collection_not_found(id))
    }
}
