//! Route definitions for the `/collection` resource.

use axum::routing::get;
use axum::Router;

use crate::handlers::collection;
use crate::state::AppState;

/// Collection routes mounted at `/collection`.
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
        .route("/", get(collection::list).post(collection::create))
        .route(
            "/{uuid}",
            get(collection::get_by_id)
                .patch(collection::update)
                .delete(collection::delete),
        )
}
