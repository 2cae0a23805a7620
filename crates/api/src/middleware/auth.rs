//! Organization-context extractor for Axum handlers.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use tea_core::error::CoreError;
use tea_core::types::EntityId;
use tea_db::repositories::OrganizationRepo;

use crate::error::AppError;
use crate::state::AppState;

/// Authenticated organization resolved from an API token in the
/// `Authorization` header.
///
/// Every entity handler takes this extractor; the resolved organization id
/// scopes all store calls. A missing or unknown token is a 401; entities
/// belonging to a different organization produce 403 downstream.
#[derive(Debug, Clone)]
pub struct AuthOrg {
    /// The caller's organization id.
    pub id: EntityId,
}

impl FromRequestParts<AppState> for AuthOrg {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let auth_header = parts
            .headers
            .get("authorization")
            .and_then(|v| v.to_str().ok())
            .ok_or_else(|| {
                AppError::Core(CoreError::Unauthorized(
                    "Missing Authorization header".into(),
                ))
            })?;

        let token = auth_header.strip_prefix("Bearer ").ok_or_else(|| {
            AppError::Core(CoreError::Unauthorized(
                "Invalid Authorization format. Expected: Bearer <token>".into(),
            ))
        })?;

        let organization = OrganizationRepo::find_by_token(&state.pool, token)
            .await?
            .ok_or_else(|| AppError::Core(CoreError::Unauthorized("Invalid API token".into())))?;

        Ok(AuthOrg {
            id: organization.uuid,
        })
    }
}
