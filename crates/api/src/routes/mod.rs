pub mod collection;
pub mod component;
pub mod health;
pub mod product;
pub mod release;

use axum::Router;

use crate::state::AppState;

/// Build the entity route tree, mounted at the application root.
///
/// Route hierarchy:
///
/// ```text
/// /product                     list, create
/// /product/{uuid}              get, patch, delete
///
/// /component                   list, create
/// /component/{uuid}            get, patch, delete
///
/// /release                     list, create
/// /release/{uuid}              get, patch, delete
///
/// /collection                  list, create
/// /collection/{uuid}           get, patch, delete
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/product", product::router())
        .nest("/component", component::router())
        .nest("/release", release::router())
        .nest("/collection", collection::router())
}
