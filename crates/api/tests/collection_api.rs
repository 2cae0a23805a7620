//! HTTP-level integration tests for the `/collection` endpoints, including
//! the lifecycle state machine and the artifact-only update path.

mod common;

use axum::http::StatusCode;
use common::{body_json, delete, get, patch_json, post_json};
use sqlx::PgPool;

async fn create_product(pool: &PgPool, name: &str) -> String {
    let app = common::build_test_app(pool.clone());
    let json = body_json(post_json(app, "/product", serde_json::json!({"name": name})).await).await;
    json["identifier"].as_str().unwrap().to_string()
}

async fn create_component(pool: &PgPool, name: &str, product_id: &str) -> String {
    let app = common::build_test_app(pool.clone());
    let json = body_json(
        post_json(
            app,
            "/component",
            serde_json::json!({"name": name, "productIdentifier": product_id}),
        )
        .await,
    )
    .await;
    json["identifier"].as_str().unwrap().to_string()
}

async fn create_release(pool: &PgPool, component_id: &str, version: &str) -> String {
    let app = common::build_test_app(pool.clone());
    let json = body_json(
        post_json(
            app,
            "/release",
            serde_json::json!({
                "componentIdentifier": component_id,
                "version": version,
                "releaseDate": "2026-03-01T00:00:00Z",
                "name": "Widget"
            }),
        )
        .await,
    )
    .await;
    json["uuid"].as_str().unwrap().to_string()
}

async fn create_collection(pool: &PgPool, release_id: &str) -> serde_json::Value {
    let app = common::build_test_app(pool.clone());
    let response = post_json(
        app,
        "/collection",
        serde_json::json!({
            "releaseIdentifier": release_id,
            "updateReason": {"type": "INITIAL_RELEASE"}
        }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    body_json(response).await
}

// ---------------------------------------------------------------------------
// Create
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn create_collection_starts_in_created_phase(pool: PgPool) {
    common::seed_org(&pool).await;
    let product_id = create_product(&pool, "P").await;
    let component_id = create_component(&pool, "comp", &product_id).await;
    let release_id = create_release(&pool, &component_id, "1.0.0").await;

    let json = create_collection(&pool, &release_id).await;

    assert_eq!(json["version"], 1);
    assert_eq!(json["updateReason"]["type"], "INITIAL_RELEASE");
    assert_eq!(json["artifacts"], serde_json::json!([]));
    assert_eq!(json["lifecycle"]["phase"], "created");
    assert_eq!(json["lifecycle"]["name"], "Created");
    assert!(json["lifecycle"]["completedOn"].is_null());
    assert_eq!(json["products"][0], product_id.as_str());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn create_collection_honors_caller_name_and_description(pool: PgPool) {
    common::seed_org(&pool).await;
    let product_id = create_product(&pool, "P").await;
    let component_id = create_component(&pool, "comp", &product_id).await;
    let release_id = create_release(&pool, &component_id, "1.0.0").await;

    let app = common::build_test_app(pool);
    let response = post_json(
        app,
        "/collection",
        serde_json::json!({
            "releaseIdentifier": release_id,
            "updateReason": {"type": "INITIAL_RELEASE"},
            "name": "Q1 Compliance Drop",
            "description": "Artifacts for the Q1 audit"
        }),
    )
    .await;

    assert_eq!(response.status(), StatusCode::CREATED);
    let json = body_json(response).await;
    assert_eq!(json["name"], "Q1 Compliance Drop");
    assert_eq!(json["description"], "Artifacts for the Q1 audit");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn create_collection_synthesizes_name_from_release(pool: PgPool) {
    common::seed_org(&pool).await;
    let product_id = create_product(&pool, "P").await;
    let component_id = create_component(&pool, "comp", &product_id).await;
    // create_release names the release "Widget".
    let release_id = create_release(&pool, &component_id, "2.0.0").await;

    let json = create_collection(&pool, &release_id).await;
    assert_eq!(json["name"], "Widget 2.0.0");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn create_collection_requires_release_and_reason(pool: PgPool) {
    common::seed_org(&pool).await;

    let app = common::build_test_app(pool.clone());
    let response = post_json(
        app,
        "/collection",
        serde_json::json!({"updateReason": {"type": "INITIAL_RELEASE"}}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let product_id = create_product(&pool, "P").await;
    let component_id = create_component(&pool, "comp", &product_id).await;
    let release_id = create_release(&pool, &component_id, "1.0.0").await;

    let app = common::build_test_app(pool);
    let response = post_json(
        app,
        "/collection",
        serde_json::json!({"releaseIdentifier": release_id}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert!(json["error"].as_str().unwrap().contains("updateReason"));
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn create_collection_rejects_unknown_reason_type(pool: PgPool) {
    common::seed_org(&pool).await;
    let product_id = create_product(&pool, "P").await;
    let component_id = create_component(&pool, "comp", &product_id).await;
    let release_id = create_release(&pool, &component_id, "1.0.0").await;

    let app = common::build_test_app(pool);
    let response = post_json(
        app,
        "/collection",
        serde_json::json!({
            "releaseIdentifier": release_id,
            "updateReason": {"type": "BECAUSE"}
        }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

// ---------------------------------------------------------------------------
// Lifecycle transitions
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn lifecycle_walks_created_to_completed(pool: PgPool) {
    common::seed_org(&pool).await;
    let product_id = create_product(&pool, "P").await;
    let component_id = create_component(&pool, "comp", &product_id).await;
    let release_id = create_release(&pool, &component_id, "1.0.0").await;
    let collection = create_collection(&pool, &release_id).await;
    let id = collection["uuid"].as_str().unwrap().to_string();

    let app = common::build_test_app(pool.clone());
    let json = body_json(
        patch_json(
            app,
            &format!("/collection/{id}"),
            serde_json::json!({"lifecycle": {"phase": "in-progress"}}),
        )
        .await,
    )
    .await;
    assert_eq!(json["lifecycle"]["phase"], "in-progress");
    assert_eq!(json["lifecycle"]["name"], "In Progress");

    let app = common::build_test_app(pool);
    let json = body_json(
        patch_json(
            app,
            &format!("/collection/{id}"),
            serde_json::json!({"lifecycle": {"phase": "completed", "description": "signed off"}}),
        )
        .await,
    )
    .await;
    assert_eq!(json["lifecycle"]["phase"], "completed");
    assert_eq!(json["lifecycle"]["description"], "signed off");
    assert!(json["lifecycle"]["completedOn"].is_string());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn out_of_table_transition_returns_400(pool: PgPool) {
    common::seed_org(&pool).await;
    let product_id = create_product(&pool, "P").await;
    let component_id = create_component(&pool, "comp", &product_id).await;
    let release_id = create_release(&pool, &component_id, "1.0.0").await;
    let collection = create_collection(&pool, &release_id).await;
    let id = collection["uuid"].as_str().unwrap().to_string();

    // created -> updated is not in the transition table.
    let app = common::build_test_app(pool.clone());
    let response = patch_json(
        app,
        &format!("/collection/{id}"),
        serde_json::json!({"lifecycle": {"phase": "updated"}}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert!(json["error"].as_str().unwrap().contains("transition"));

    // The stored phase is unchanged after the rejected request.
    let app = common::build_test_app(pool);
    let json = body_json(get(app, &format!("/collection/{id}")).await).await;
    assert_eq!(json["lifecycle"]["phase"], "created");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn deprecated_phase_is_terminal(pool: PgPool) {
    common::seed_org(&pool).await;
    let product_id = create_product(&pool, "P").await;
    let component_id = create_component(&pool, "comp", &product_id).await;
    let release_id = create_release(&pool, &component_id, "1.0.0").await;
    let collection = create_collection(&pool, &release_id).await;
    let id = collection["uuid"].as_str().unwrap().to_string();

    for phase in ["completed", "deprecated"] {
        let app = common::build_test_app(pool.clone());
        let response = patch_json(
            app,
            &format!("/collection/{id}"),
            serde_json::json!({"lifecycle": {"phase": phase}}),
        )
        .await;
        assert_eq!(response.status(), StatusCode::OK);
    }

    let app = common::build_test_app(pool);
    let response = patch_json(
        app,
        &format!("/collection/{id}"),
        serde_json::json!({"lifecycle": {"phase": "in-progress"}}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

// ---------------------------------------------------------------------------
// Artifact updates
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn artifact_only_patch_forces_updated_phase(pool: PgPool) {
    common::seed_org(&pool).await;
    let product_id = create_product(&pool, "P").await;
    let component_id = create_component(&pool, "comp", &product_id).await;
    let release_id = create_release(&pool, &component_id, "1.0.0").await;
    let collection = create_collection(&pool, &release_id).await;
    let id = collection["uuid"].as_str().unwrap().to_string();

    // created -> updated is out of table, but an artifact-only patch forces
    // it anyway.
    let app = common::build_test_app(pool);
    let response = patch_json(
        app,
        &format!("/collection/{id}"),
        serde_json::json!({
            "artifacts": [{
                "name": "sbom.cdx.json",
                "type": "bom",
                "downloadUrls": ["https://example.com/sbom.cdx.json"],
                "checksums": [{"algorithm": "SHA-256", "value": "deadbeef"}]
            }]
        }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    assert_eq!(json["artifacts"].as_array().unwrap().len(), 1);
    assert_eq!(json["artifacts"][0]["type"], "bom");
    assert_eq!(json["lifecycle"]["phase"], "updated");
    assert_eq!(
        json["lifecycle"]["description"],
        "artifacts have been updated"
    );
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn empty_patch_changes_nothing(pool: PgPool) {
    common::seed_org(&pool).await;
    let product_id = create_product(&pool, "P").await;
    let component_id = create_component(&pool, "comp", &product_id).await;
    let release_id = create_release(&pool, &component_id, "1.0.0").await;
    let collection = create_collection(&pool, &release_id).await;
    let id = collection["uuid"].as_str().unwrap().to_string();

    let app = common::build_test_app(pool.clone());
    patch_json(
        app,
        &format!("/collection/{id}"),
        serde_json::json!({"artifacts": [{"name": "a.json"}]}),
    )
    .await;

    let app = common::build_test_app(pool);
    let response = patch_json(app, &format!("/collection/{id}"), serde_json::json!({})).await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    // Artifacts and phase are untouched by the empty body.
    assert_eq!(json["artifacts"][0]["name"], "a.json");
    assert_eq!(json["lifecycle"]["phase"], "updated");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn artifact_patch_replaces_list_wholesale(pool: PgPool) {
    common::seed_org(&pool).await;
    let product_id = create_product(&pool, "P").await;
    let component_id = create_component(&pool, "comp", &product_id).await;
    let release_id = create_release(&pool, &component_id, "1.0.0").await;
    let collection = create_collection(&pool, &release_id).await;
    let id = collection["uuid"].as_str().unwrap().to_string();

    let app = common::build_test_app(pool.clone());
    patch_json(
        app,
        &format!("/collection/{id}"),
        serde_json::json!({
            "artifacts": [
                {"name": "a.json"},
                {"name": "b.json"}
            ]
        }),
    )
    .await;

    let app = common::build_test_app(pool);
    let json = body_json(
        patch_json(
            app,
            &format!("/collection/{id}"),
            serde_json::json!({"artifacts": [{"name": "c.json"}]}),
        )
        .await,
    )
    .await;
    assert_eq!(json["artifacts"].as_array().unwrap().len(), 1);
    assert_eq!(json["artifacts"][0]["name"], "c.json");
}

// ---------------------------------------------------------------------------
// Delete
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn delete_collection_leaves_release_and_product(pool: PgPool) {
    common::seed_org(&pool).await;
    let product_id = create_product(&pool, "P").await;
    let component_id = create_component(&pool, "comp", &product_id).await;
    let release_id = create_release(&pool, &component_id, "1.0.0").await;
    let collection = create_collection(&pool, &release_id).await;
    let id = collection["uuid"].as_str().unwrap().to_string();

    let app = common::build_test_app(pool.clone());
    let response = delete(app, &format!("/collection/{id}")).await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let app = common::build_test_app(pool.clone());
    assert_eq!(
        get(app, &format!("/collection/{id}")).await.status(),
        StatusCode::NOT_FOUND
    );
    let app = common::build_test_app(pool.clone());
    assert_eq!(
        get(app, &format!("/release/{release_id}")).await.status(),
        StatusCode::OK
    );
    let app = common::build_test_app(pool);
    assert_eq!(
        get(app, &format!("/product/{product_id}")).await.status(),
        StatusCode::OK
    );
}

// ---------------------------------------------------------------------------
// End-to-end publication flow
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn full_publication_flow(pool: PgPool) {
    common::seed_org(&pool).await;

    // Product, component, release, collection.
    let product_id = create_product(&pool, "Widget Server").await;
    let component_id = create_component(&pool, "widget-core", &product_id).await;
    let release_id = create_release(&pool, &component_id, "1.0.0").await;
    let collection = create_collection(&pool, &release_id).await;
    let collection_id = collection["uuid"].as_str().unwrap().to_string();

    // The collection references the product; the release sees the collection.
    assert_eq!(collection["products"][0], product_id.as_str());
    let app = common::build_test_app(pool.clone());
    let release = body_json(get(app, &format!("/release/{release_id}")).await).await;
    assert_eq!(release["collectionReferences"][0], collection_id.as_str());

    // Work the collection: start, attach artifacts, complete.
    let app = common::build_test_app(pool.clone());
    patch_json(
        app,
        &format!("/collection/{collection_id}"),
        serde_json::json!({"lifecycle": {"phase": "in-progress"}}),
    )
    .await;

    let app = common::build_test_app(pool.clone());
    let json = body_json(
        patch_json(
            app,
            &format!("/collection/{collection_id}"),
            serde_json::json!({
                "artifacts": [{
                    "name": "sbom.cdx.json",
                    "type": "bom",
                    "checksums": [{"algorithm": "SHA-256", "value": "cafe"}]
                }]
            }),
        )
        .await,
    )
    .await;
    assert_eq!(json["lifecycle"]["phase"], "updated");

    let app = common::build_test_app(pool.clone());
    let json = body_json(
        patch_json(
            app,
            &format!("/collection/{collection_id}"),
            serde_json::json!({"lifecycle": {"phase": "completed"}}),
        )
        .await,
    )
    .await;
    assert_eq!(json["lifecycle"]["phase"], "completed");
    assert!(json["lifecycle"]["completedOn"].is_string());

    // The product still lists its component.
    let app = common::build_test_app(pool);
    let product = body_json(get(app, &format!("/product/{product_id}")).await).await;
    assert_eq!(product["components"][0], component_id.as_str());
}
