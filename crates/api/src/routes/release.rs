//! Route definitions for the `/release` resource.

use axum::routing::get;
use axum::Router;

use crate::handlers::release;
use crate::state::AppState;

/// Release routes mounted at `/release`.
///
/// ```text
/// GET    /          -> list
/// POST   /          -> create
/// GET    /{uuid}    -> get_by_id
/// PATCH  /{uuid}    -> update
/// DELETE /{uuid}    -> delete
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(release::list).post(release::create))
        .route(
            "/{uuid}",
            get(release::get_by_id)
                .patch(release::update)
                .delete(release::delete),
        )
}
