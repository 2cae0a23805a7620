//! Route definitions for the `/product` resource.

use axum::routing::get;
use axum::Router;

use crate::handlers::product;
use crate::state::AppState;

/// Product routes mounted at `/product`.
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
        .route("/", get(product::list).post(product::create))
        .route(
            "/{uuid}",
            get(product::get_by_id)
                .patch(product::update)
                .delete(product::delete),
        )
}
