//! Route definitions for the `/component` resource.

use axum::routing::get;
use axum::Router;

use crate::handlers::component;
use crate::state::AppState;

/// Component routes mounted at `/component`.
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
        .route("/", get(component::list).post(component::create))
        .route(
            "/{uuid}",
            get(component::get_by_id)
                .patch(component::update)
                .delete(component::delete),
        )
}
